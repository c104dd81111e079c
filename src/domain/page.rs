use crate::error::StoreError;
use crate::parser::markdown::render_stored_markdown;
use chrono::NaiveDateTime;
use derive_more::derive::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Deepest slug, counted in `/`-separated segments, that can name a page.
pub const MAX_SLUG_SEGMENTS: usize = 6;

/// Render mode of a page. Each variant reads exactly one body representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageTemplate {
    /// HTML wrapped in the site layout, from `body_html`.
    #[default]
    #[display("contained")]
    Contained,
    /// `body_json` served verbatim as `application/json`.
    #[display("json")]
    Json,
    /// The processed body served as `text/plain`.
    #[display("txt")]
    Txt,
}

impl PageTemplate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contained => "contained",
            Self::Json => "json",
            Self::Txt => "txt",
        }
    }
}

impl FromStr for PageTemplate {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contained" => Ok(Self::Contained),
            "json" => Ok(Self::Json),
            "txt" => Ok(Self::Txt),
            other => Err(StoreError::validation(format!(
                "template must be one of contained, json, txt (got '{other}')"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub id: Option<i64>,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub template: PageTemplate,
    pub body_markdown: Option<String>,
    pub body_html: Option<String>,
    pub body_json: Option<String>,
    pub is_top_level_path: bool,
    pub landing_page: bool,
    pub subforem_id: Option<i64>,
    pub content_hash: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Page {
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: None,
            slug: slug.into(),
            title: title.into(),
            description: String::new(),
            template: PageTemplate::Contained,
            body_markdown: None,
            body_html: None,
            body_json: None,
            is_top_level_path: false,
            landing_page: false,
            subforem_id: None,
            content_hash: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Replaces the markdown body and drops the cached html so it is derived again on save.
    pub fn set_markdown(&mut self, markdown: impl Into<String>) {
        self.body_markdown = Some(markdown.into());
        self.body_html = None;
    }

    /// Fills `body_html` from `body_markdown` when the cached html is missing.
    pub fn derive_body_html(&mut self) -> Result<(), StoreError> {
        if self.body_html.is_none()
            && let Some(markdown) = &self.body_markdown
        {
            let html = render_stored_markdown(markdown)
                .map_err(|e| StoreError::validation(format!("markdown for '{}': {e}", self.slug)))?;
            self.body_html = Some(html);
        }
        Ok(())
    }

    /// The rendered body used by the `contained` and `txt` templates.
    pub fn processed_html(&self) -> &str {
        self.body_html.as_deref().unwrap_or_default()
    }

    /// Public path of the page: `/<slug>` for top-level pages, `/page/<slug>` otherwise.
    pub fn path(&self) -> String {
        if self.is_top_level_path {
            format!("/{}", self.slug)
        } else {
            format!("/page/{}", self.slug)
        }
    }

    /// CSS class distinguishing this page's view, e.g. `pageslug-about`.
    pub fn slug_class(&self) -> String {
        format!("pageslug-{}", self.slug)
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        validate_slug(&self.slug)?;

        if self.title.trim().is_empty() {
            return Err(StoreError::validation(format!(
                "page '{}' is missing a title",
                self.slug
            )));
        }

        if self.template == PageTemplate::Json {
            let json = self.body_json.as_deref().ok_or_else(|| {
                StoreError::validation(format!("json page '{}' has no body_json", self.slug))
            })?;
            serde_json::from_str::<serde_json::Value>(json).map_err(|e| {
                StoreError::validation(format!("body_json of '{}' is not JSON: {e}", self.slug))
            })?;
        }

        Ok(())
    }
}

/// Slugs are ASCII words joined by single `/`.
pub fn validate_slug(slug: &str) -> Result<(), StoreError> {
    if slug.is_empty() {
        return Err(StoreError::validation("slug can't be blank"));
    }

    let segments: Vec<&str> = slug.split('/').collect();
    if segments.len() > MAX_SLUG_SEGMENTS {
        return Err(StoreError::validation(format!(
            "slug '{slug}' is deeper than {MAX_SLUG_SEGMENTS} segments"
        )));
    }

    for segment in segments {
        if segment.is_empty() {
            return Err(StoreError::validation(format!("slug '{slug}' has an empty segment")));
        }
        if !segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(StoreError::validation(format!(
                "slug '{slug}' may only contain letters, digits, '-' and '_'"
            )));
        }
    }

    Ok(())
}
