use crate::AppState;
use crate::error::PageError;
use crate::services::context::RequestContext;
use axum::extract::FromRequestParts;
use axum::http::header::HOST;
use axum::http::request::Parts;

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let host = parts
            .headers
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .map(strip_port)
            .filter(|host| !host.is_empty());

        let subforem_id = match &host {
            Some(host) => state
                .subforems
                .find_subforem_by_domain(host)
                .await?
                .map(|subforem| subforem.id),
            None => None,
        };

        Ok(Self { subforem_id, host })
    }
}

// "other.com:3000" -> "other.com"
fn strip_port(host: &str) -> String {
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name.to_ascii_lowercase(),
        _ => host.to_ascii_lowercase(),
    }
}
