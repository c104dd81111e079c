use crate::AppState;
use crate::error::PageError;
use crate::services::context::RequestContext;
use crate::services::resolver::Resolution;
use axum::extract::State;
use axum::http::{Method, Uri};
use axum::response::{IntoResponse, Response};

/// Catch-all for `/<slug>`, `/<slug>.txt` and `/page/<slug>`.
pub async fn page_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    method: Method,
    uri: Uri,
) -> Result<Response, PageError> {
    if method != Method::GET && method != Method::HEAD {
        return Err(PageError::routing(format!("{} {}", method, uri.path())));
    }

    let target = uri.path_and_query().map_or(uri.path(), |target| target.as_str());
    match state.resolver.resolve(target, &ctx).await? {
        Resolution::Redirect(redirect) => Ok(redirect.into_response()),
        Resolution::Render(page) => Ok(state.renderer.render(&page).await?.into_response()),
    }
}
