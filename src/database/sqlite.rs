use crate::database::model::{DbArticle, DbNavigationLink, DbPage};
use crate::database::{
    ArticleRepository, NavigationLinkRepository, PageRepository, SubforemRepository,
    UserRepository,
};
use crate::domain::{Article, NavigationLink, Page, Subforem};
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Sqlite};
use tracing::debug;

const PAGE_COLUMNS: &str = "id, slug, title, description, template, body_markdown, body_html, \
                            body_json, is_top_level_path, landing_page, subforem_id, content_hash, \
                            created_at, updated_at";

const ARTICLE_COLUMNS: &str =
    "a.id, a.title, a.path, a.description, a.user_id, a.tags, a.published, a.published_at";

pub struct SqliteRepository {
    pool: Pool<Sqlite>,
}

impl SqliteRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    async fn page_by_id(&self, id: i64) -> StoreResult<Page> {
        let db_page = sqlx::query_as::<_, DbPage>(&format!(
            "SELECT {PAGE_COLUMNS} FROM pages WHERE id = ?"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        db_page.try_into()
    }
}

fn into_pages(db_pages: Vec<DbPage>) -> StoreResult<Vec<Page>> {
    db_pages.into_iter().map(Page::try_from).collect()
}

fn into_article(row: Option<DbArticle>) -> StoreResult<Option<Article>> {
    row.map(Article::try_from).transpose()
}

#[async_trait]
impl PageRepository for SqliteRepository {
    async fn find_page(&self, slug: &str, subforem_id: Option<i64>) -> StoreResult<Option<Page>> {
        let db_page = sqlx::query_as::<_, DbPage>(&format!(
            "SELECT {PAGE_COLUMNS} FROM pages WHERE slug = ? AND subforem_id IS ?"
        ))
        .bind(slug)
        .bind(subforem_id)
        .fetch_optional(&self.pool)
        .await?;

        db_page.map(Page::try_from).transpose()
    }

    async fn lookup_page(
        &self,
        slug: &str,
        preferred_subforem: Option<i64>,
        top_level_only: bool,
    ) -> StoreResult<Option<Page>> {
        let db_page = sqlx::query_as::<_, DbPage>(&format!(
            r#"
            SELECT {PAGE_COLUMNS} FROM pages
            WHERE slug = ? AND (? = 0 OR is_top_level_path = 1)
            ORDER BY CASE
                WHEN subforem_id IS ? THEN 0
                WHEN subforem_id IS NULL THEN 1
                ELSE 2
            END, id
            LIMIT 1
            "#
        ))
        .bind(slug)
        .bind(top_level_only)
        .bind(preferred_subforem)
        .fetch_optional(&self.pool)
        .await?;

        db_page.map(Page::try_from).transpose()
    }

    async fn find_landing_page(&self, subforem_id: Option<i64>) -> StoreResult<Option<Page>> {
        let db_page = sqlx::query_as::<_, DbPage>(&format!(
            r#"
            SELECT {PAGE_COLUMNS} FROM pages
            WHERE landing_page = 1 AND (subforem_id IS ? OR subforem_id IS NULL)
            ORDER BY subforem_id IS NULL, id
            LIMIT 1
            "#
        ))
        .bind(subforem_id)
        .fetch_optional(&self.pool)
        .await?;

        db_page.map(Page::try_from).transpose()
    }

    async fn get_all_pages(&self) -> StoreResult<Vec<Page>> {
        let db_pages =
            sqlx::query_as::<_, DbPage>(&format!("SELECT {PAGE_COLUMNS} FROM pages ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;

        into_pages(db_pages)
    }

    async fn save_page(&self, page: &Page) -> StoreResult<Page> {
        let mut page = page.clone();
        page.derive_body_html()?;
        page.validate()?;

        let now = Utc::now().naive_utc();

        let id = match page.id {
            Some(id) => {
                let result = sqlx::query(
                    r#"
                    UPDATE pages
                    SET
                        slug = ?,
                        title = ?,
                        description = ?,
                        template = ?,
                        body_markdown = ?,
                        body_html = ?,
                        body_json = ?,
                        is_top_level_path = ?,
                        landing_page = ?,
                        subforem_id = ?,
                        content_hash = ?,
                        updated_at = ?
                    WHERE id = ?
                    "#,
                )
                .bind(&page.slug)
                .bind(&page.title)
                .bind(&page.description)
                .bind(page.template.as_str())
                .bind(&page.body_markdown)
                .bind(&page.body_html)
                .bind(&page.body_json)
                .bind(page.is_top_level_path)
                .bind(page.landing_page)
                .bind(page.subforem_id)
                .bind(&page.content_hash)
                .bind(now)
                .bind(id)
                .execute(&self.pool)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(StoreError::validation(format!(
                        "page {id} ('{}') no longer exists",
                        page.slug
                    )));
                }
                id
            }
            None => {
                let result = sqlx::query(
                    r#"
                    INSERT INTO pages (
                        slug, title, description, template, body_markdown, body_html, body_json,
                        is_top_level_path, landing_page, subforem_id, content_hash,
                        created_at, updated_at
                    )
                    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(&page.slug)
                .bind(&page.title)
                .bind(&page.description)
                .bind(page.template.as_str())
                .bind(&page.body_markdown)
                .bind(&page.body_html)
                .bind(&page.body_json)
                .bind(page.is_top_level_path)
                .bind(page.landing_page)
                .bind(page.subforem_id)
                .bind(&page.content_hash)
                .bind(now)
                .bind(now)
                .execute(&self.pool)
                .await?;

                result.last_insert_rowid()
            }
        };

        let stored = self.page_by_id(id).await?;
        debug!(page = %stored.slug, id, "saved page");
        Ok(stored)
    }
}

#[async_trait]
impl NavigationLinkRepository for SqliteRepository {
    async fn upsert_by_identity(&self, link: &NavigationLink) -> StoreResult<NavigationLink> {
        link.validate()?;

        // the (url, name) unique constraint carries the identity
        let row = sqlx::query_as::<_, DbNavigationLink>(
            r#"
            INSERT INTO navigation_links (url, name, icon, section, position, display_to)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(url, name) DO UPDATE SET
                icon = excluded.icon,
                section = excluded.section,
                position = excluded.position,
                display_to = excluded.display_to
            RETURNING id, url, name, icon, section, position, display_to
            "#,
        )
        .bind(&link.url)
        .bind(&link.name)
        .bind(&link.icon)
        .bind(link.section.as_str())
        .bind(link.position)
        .bind(link.display_to.as_str())
        .fetch_one(&self.pool)
        .await?;

        debug!(link = %row, "upserted navigation link");
        row.try_into()
    }

    async fn all_links(&self) -> StoreResult<Vec<NavigationLink>> {
        let rows = sqlx::query_as::<_, DbNavigationLink>(
            r#"
            SELECT id, url, name, icon, section, position, display_to
            FROM navigation_links
            ORDER BY section, position IS NULL, position, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(NavigationLink::try_from).collect()
    }
}

#[async_trait]
impl ArticleRepository for SqliteRepository {
    async fn latest_published_tagged(&self, tag: &str) -> StoreResult<Option<Article>> {
        let row = sqlx::query_as::<_, DbArticle>(&format!(
            r#"
            SELECT {ARTICLE_COLUMNS} FROM articles a
            WHERE a.published = 1
              AND EXISTS (SELECT 1 FROM json_each(a.tags) WHERE json_each.value = ?)
            ORDER BY a.published_at DESC, a.id DESC
            LIMIT 1
            "#
        ))
        .bind(tag)
        .fetch_optional(&self.pool)
        .await?;

        into_article(row)
    }

    async fn latest_published_by(&self, username: &str) -> StoreResult<Option<Article>> {
        let row = sqlx::query_as::<_, DbArticle>(&format!(
            r#"
            SELECT {ARTICLE_COLUMNS} FROM articles a
            JOIN users u ON u.id = a.user_id
            WHERE a.published = 1 AND u.username = ?
            ORDER BY a.published_at DESC, a.id DESC
            LIMIT 1
            "#
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        into_article(row)
    }

    async fn recent_published(&self, limit: u32) -> StoreResult<Vec<Article>> {
        let rows = sqlx::query_as::<_, DbArticle>(&format!(
            r#"
            SELECT {ARTICLE_COLUMNS} FROM articles a
            WHERE a.published = 1
            ORDER BY a.published_at DESC, a.id DESC
            LIMIT ?
            "#
        ))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Article::try_from).collect()
    }

    async fn count_published(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles WHERE published = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_published_tagged(&self, tag: &str) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM articles a
            WHERE a.published = 1
              AND EXISTS (SELECT 1 FROM json_each(a.tags) WHERE json_each.value = ?)
            "#,
        )
        .bind(tag)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn count_registered(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE registered = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl SubforemRepository for SqliteRepository {
    async fn find_subforem(&self, id: i64) -> StoreResult<Option<Subforem>> {
        let subforem = sqlx::query_as::<_, Subforem>("SELECT id, domain FROM subforems WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(subforem)
    }

    async fn find_subforem_by_domain(&self, domain: &str) -> StoreResult<Option<Subforem>> {
        let subforem =
            sqlx::query_as::<_, Subforem>("SELECT id, domain FROM subforems WHERE domain = ?")
                .bind(domain)
                .fetch_optional(&self.pool)
                .await?;
        Ok(subforem)
    }
}
