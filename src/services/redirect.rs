use crate::error::PageError;
use axum::http::{HeaderValue, StatusCode, header::LOCATION};
use axum::response::{IntoResponse, Response};
use url::Url;

pub const NOTIFICATIONS_PATH: &str = "/notifications";

/// An HTTP redirect with the status the route calls for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    /// 301, for pages that permanently live on another tenant's domain.
    Permanent(String),
    /// 302, for targets that move over time (latest threads, docs).
    Found(String),
}

impl Redirect {
    pub fn location(&self) -> &str {
        match self {
            Self::Permanent(location) | Self::Found(location) => location,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Permanent(_) => StatusCode::MOVED_PERMANENTLY,
            Self::Found(_) => StatusCode::FOUND,
        }
    }
}

impl IntoResponse for Redirect {
    fn into_response(self) -> Response {
        match (HeaderValue::from_str(self.location()), self) {
            (Ok(location), redirect) => (redirect.status(), [(LOCATION, location)]).into_response(),
            // a tenant redirect that cannot be sent is a bad request, not a different destination
            (Err(_), Self::Permanent(location)) => PageError::routing(location).into_response(),
            (Err(_), Self::Found(_)) => (
                StatusCode::FOUND,
                [(LOCATION, HeaderValue::from_static(NOTIFICATIONS_PATH))],
            )
                .into_response(),
        }
    }
}

/// Reduces a stored redirect target to a path on the app's own domain.
///
/// The target is resolved against `base` and only its path (and query) are kept, so
/// `https://attacker.com/hijacked/welcome` becomes `/hijacked/welcome`. Returns `None` for
/// targets that cannot be expressed as an http(s) path.
pub fn same_origin_path(base: &Url, target: &str) -> Option<String> {
    let resolved = base.join(target.trim()).ok()?;
    if !matches!(resolved.scheme(), "http" | "https") {
        return None;
    }

    // a leading "//" would be read by browsers as a protocol-relative URL
    let mut path = format!("/{}", resolved.path().trim_start_matches('/'));
    if let Some(query) = resolved.query() {
        path.push('?');
        path.push_str(query);
    }
    Some(path)
}
