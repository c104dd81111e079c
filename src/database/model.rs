use crate::domain::{Article, DisplayTo, NavigationLink, NavigationSection, Page, PageTemplate};
use crate::error::StoreError;
use chrono::NaiveDateTime;
use derive_more::derive::Display;

#[derive(sqlx::FromRow, Debug, Eq, PartialEq, Clone, Display)]
#[display("{}", slug)]
pub struct DbPage {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub template: String,
    pub body_markdown: Option<String>,
    pub body_html: Option<String>,
    pub body_json: Option<String>,
    pub is_top_level_path: bool,
    pub landing_page: bool,
    pub subforem_id: Option<i64>,
    pub content_hash: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<DbPage> for Page {
    type Error = StoreError;

    fn try_from(db_page: DbPage) -> Result<Self, Self::Error> {
        let template: PageTemplate = db_page
            .template
            .parse()
            .map_err(|_| StoreError::corrupt(format!("page {} has template '{}'", db_page.id, db_page.template)))?;

        Ok(Page {
            id: Some(db_page.id),
            slug: db_page.slug,
            title: db_page.title,
            description: db_page.description,
            template,
            body_markdown: db_page.body_markdown,
            body_html: db_page.body_html,
            body_json: db_page.body_json,
            is_top_level_path: db_page.is_top_level_path,
            landing_page: db_page.landing_page,
            subforem_id: db_page.subforem_id,
            content_hash: db_page.content_hash,
            created_at: Some(db_page.created_at),
            updated_at: Some(db_page.updated_at),
        })
    }
}

#[derive(sqlx::FromRow, Debug, Eq, PartialEq, Clone, Display)]
#[display("{} ({})", name, url)]
pub struct DbNavigationLink {
    pub id: i64,
    pub url: String,
    pub name: String,
    pub icon: String,
    pub section: String,
    pub position: Option<i64>,
    pub display_to: String,
}

impl TryFrom<DbNavigationLink> for NavigationLink {
    type Error = StoreError;

    fn try_from(row: DbNavigationLink) -> Result<Self, Self::Error> {
        let section = NavigationSection::parse(&row.section)
            .map_err(|_| StoreError::corrupt(format!("link {} has section '{}'", row.id, row.section)))?;
        let display_to = DisplayTo::parse(&row.display_to).map_err(|_| {
            StoreError::corrupt(format!("link {} has display_to '{}'", row.id, row.display_to))
        })?;

        Ok(NavigationLink {
            id: Some(row.id),
            url: row.url,
            name: row.name,
            icon: row.icon,
            section,
            position: row.position,
            display_to,
        })
    }
}

#[derive(sqlx::FromRow, Debug, Eq, PartialEq, Clone)]
pub struct DbArticle {
    pub id: i64,
    pub title: String,
    pub path: String,
    pub description: String,
    pub user_id: i64,
    pub tags: String,
    pub published: bool,
    pub published_at: Option<NaiveDateTime>,
}

impl TryFrom<DbArticle> for Article {
    type Error = StoreError;

    fn try_from(row: DbArticle) -> Result<Self, Self::Error> {
        // tags are stored as a JSON array string
        let tags: Vec<String> = serde_json::from_str(&row.tags)
            .map_err(|e| StoreError::corrupt(format!("article {} tags: {e}", row.id)))?;

        Ok(Article {
            id: row.id,
            title: row.title,
            path: row.path,
            description: row.description,
            user_id: row.user_id,
            tags,
            published: row.published,
            published_at: row.published_at,
        })
    }
}
