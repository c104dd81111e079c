use crate::AppState;
use crate::error::PageError;
use crate::services::context::RequestContext;
use axum::extract::State;
use axum::http::{HeaderValue, header::CACHE_CONTROL};
use axum::response::{Html, IntoResponse, Response};
use minijinja::context;

pub async fn landing_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Response, PageError> {
    let cache_control = HeaderValue::from_str(&format!(
        "public, max-age={0}, s-maxage={0}",
        state.config.landing_cache_max_age
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("public"));

    // a stored page marked as the landing page takes over the root
    if let Some(page) = state.resolver.landing_page(&ctx).await? {
        let rendered = state.renderer.render(&page).await?;
        return Ok(([(CACHE_CONTROL, cache_control)], rendered).into_response());
    }

    let landing = state.landing.load().await?;
    let html = state
        .views
        .render(
            "landing.html",
            context! {
                stats => landing.stats,
                featured => landing.featured,
            },
        )
        .await?;

    Ok(([(CACHE_CONTROL, cache_control)], Html(html)).into_response())
}
