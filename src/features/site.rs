use crate::AppState;
use crate::error::PageError;
use crate::services::site::{StaticPage, robots_txt};
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Uri, header::CONTENT_TYPE, header::REFERER};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use minijinja::context;

pub fn site_router() -> Router<AppState> {
    let mut router = Router::new()
        .route("/robots.txt", get(robots_handler))
        .route("/report-abuse", get(report_abuse_handler));
    for page in StaticPage::ALL {
        router = router.route(page.path(), get(static_page_handler));
    }
    router
}

async fn robots_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"))],
        robots_txt(&state.config),
    )
}

async fn static_page_handler(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Html<String>, PageError> {
    let page = StaticPage::from_path(uri.path()).ok_or_else(|| PageError::not_found(uri.path()))?;
    let html = state.views.render(page.template(), context! {}).await?;
    Ok(Html(html))
}

async fn report_abuse_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, PageError> {
    let reported_url = headers
        .get(REFERER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let html = state
        .views
        .render("report_abuse.html", context! { reported_url => reported_url })
        .await?;
    Ok(Html(html))
}
