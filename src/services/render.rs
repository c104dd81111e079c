use crate::domain::{Page, PageTemplate};
use crate::error::PageError;
use crate::services::views::Views;
use axum::http::{HeaderValue, header::CONTENT_TYPE};
use axum::response::{Html, IntoResponse, Response};
use minijinja::context;
use std::sync::Arc;

/// A page body together with the content type its template implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedPage {
    Html(String),
    Json(String),
    Text(String),
}

impl RenderedPage {
    pub fn body(&self) -> &str {
        match self {
            Self::Html(body) | Self::Json(body) | Self::Text(body) => body,
        }
    }
}

impl IntoResponse for RenderedPage {
    fn into_response(self) -> Response {
        match self {
            Self::Html(body) => Html(body).into_response(),
            Self::Json(body) => (
                [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
                body,
            )
                .into_response(),
            Self::Text(body) => (
                [(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"))],
                body,
            )
                .into_response(),
        }
    }
}

pub struct PageRenderer {
    views: Arc<Views>,
}

impl PageRenderer {
    pub fn new(views: Arc<Views>) -> Self {
        Self { views }
    }

    /// Renders a page by its template. Exactly one body representation is read per variant.
    pub async fn render(&self, page: &Page) -> Result<RenderedPage, PageError> {
        match page.template {
            PageTemplate::Contained => Ok(RenderedPage::Html(self.render_contained(page).await?)),
            PageTemplate::Json => Ok(RenderedPage::Json(
                page.body_json.clone().unwrap_or_default(),
            )),
            PageTemplate::Txt => Ok(RenderedPage::Text(page.processed_html().to_owned())),
        }
    }

    async fn render_contained(&self, page: &Page) -> Result<String, PageError> {
        let view_class = if page.is_top_level_path {
            format!("stories-show {}", page.slug_class())
        } else {
            "page-show".to_string()
        };

        self.views
            .render(
                "page.html",
                context! {
                    page => context! {
                        title => &page.title,
                        description => &page.description,
                        path => page.path(),
                        body_html => page.processed_html(),
                    },
                    view_class => view_class,
                },
            )
            .await
    }
}
