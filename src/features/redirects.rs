use crate::AppState;
use crate::error::PageError;
use crate::services::redirect::Redirect;
use crate::services::threads::NamedRedirect;
use axum::extract::State;
use axum::http::Uri;
use axum::routing::get;
use axum::Router;

pub fn redirects_router() -> Router<AppState> {
    let mut router = Router::new().route("/api", get(api_docs_handler));
    for named in NamedRedirect::ALL {
        router = router.route(&format!("/{}", named.slug()), get(named_redirect_handler));
    }
    router
}

async fn named_redirect_handler(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Redirect, PageError> {
    let slug = uri.path().trim_start_matches('/');
    let named = NamedRedirect::from_slug(slug).ok_or_else(|| PageError::not_found(slug))?;
    state.threads.redirect_for(named).await
}

async fn api_docs_handler(State(state): State<AppState>) -> Redirect {
    Redirect::Found(state.config.api_docs_url.clone())
}
