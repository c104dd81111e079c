use crate::config::base_url;
use crate::services::redirect::{NOTIFICATIONS_PATH, Redirect, same_origin_path};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use url::Url;

fn base() -> Url {
    base_url("https://", "vibecoding.community").unwrap()
}

// relative article paths pass through unchanged
#[test]
fn test_relative_paths_are_kept() {
    assert_eq!(same_origin_path(&base(), "/ben/welcome-thread-1").as_deref(), Some("/ben/welcome-thread-1"));
    assert_eq!(same_origin_path(&base(), "/search?q=vibes").as_deref(), Some("/search?q=vibes"));
}

// a hijacked path pointing at another host is reduced to its path on our domain
#[test]
fn test_foreign_hosts_are_stripped() {
    assert_eq!(
        same_origin_path(&base(), "https://attacker.com/hijacked/welcome").as_deref(),
        Some("/hijacked/welcome")
    );
    assert_eq!(
        same_origin_path(&base(), "//attacker.com/hijacked").as_deref(),
        Some("/hijacked")
    );
}

// collapsing leading slashes keeps browsers from reading the result as protocol-relative
#[test]
fn test_result_is_never_protocol_relative() {
    let path = same_origin_path(&base(), "https://attacker.com//evil.com/x").unwrap();
    assert!(path.starts_with('/'));
    assert!(!path.starts_with("//"));
    assert_eq!(path, "/evil.com/x");
}

// schemes that cannot carry a path on our domain are rejected outright
#[test]
fn test_non_http_schemes_are_rejected() {
    assert_eq!(same_origin_path(&base(), "javascript:alert(1)"), None);
    assert_eq!(same_origin_path(&base(), "mailto:someone@example.com"), None);
}

#[test]
fn test_redirect_statuses() {
    let permanent = Redirect::Permanent("https://other.com/about".into()).into_response();
    assert_eq!(permanent.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(permanent.headers()["location"], "https://other.com/about");

    let found = Redirect::Found("/welcome-thread".into()).into_response();
    assert_eq!(found.status(), StatusCode::FOUND);
    assert_eq!(found.headers()["location"], "/welcome-thread");

    // a location that cannot be a header value falls back to notifications
    let broken = Redirect::Found("/bad\nheader".into()).into_response();
    assert_eq!(broken.status(), StatusCode::FOUND);
    assert_eq!(broken.headers()["location"], NOTIFICATIONS_PATH);
}

// a cross-tenant redirect with an unsendable location is a bad request, never a detour
#[test]
fn test_broken_permanent_redirect_is_bad_request() {
    let broken = Redirect::Permanent("https://other.com/bad\nheader".into()).into_response();
    assert_eq!(broken.status(), StatusCode::BAD_REQUEST);
    assert!(broken.headers().get("location").is_none());
}
