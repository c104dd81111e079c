use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use sqlx::error::ErrorKind;
use thiserror::Error;
use tracing::error;

/// Failures raised by the persistence layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The record breaks a persistence constraint. Seeding treats this as non-fatal.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A stored row could not be turned back into a domain value.
    #[error("corrupt record: {0}")]
    Corrupt(String),

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl StoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::Corrupt(msg.into())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && matches!(
                db_err.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            )
        {
            return Self::Validation(db_err.message().to_string());
        }
        Self::Database(err)
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Request-time failures, each mapped onto exactly one HTTP status.
#[derive(Error, Debug)]
pub enum PageError {
    /// The path parsed but nothing answers to it.
    #[error("no page found for {0}")]
    NotFound(String),

    /// The path is structurally invalid and was rejected before any lookup.
    #[error("no route matches {0}")]
    Routing(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to render template: {0}")]
    Render(#[from] minijinja::Error),
}

impl PageError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn routing(what: impl Into<String>) -> Self {
        Self::Routing(what.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Routing(_) => StatusCode::BAD_REQUEST,
            Self::Store(_) | Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (heading, detail) = match &self {
            Self::NotFound(_) => ("Page not found", "This page does not exist."),
            Self::Routing(_) => ("No route matches", "This address is not a valid page path."),
            Self::Store(_) | Self::Render(_) => {
                error!(error = %self, "request failed");
                ("Something went wrong", "Please try again later.")
            }
        };

        let body = format!(
            "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"><title>{heading}</title></head>\
             <body><main class=\"error-page\"><h1>{heading}</h1><p>{detail}</p></main></body></html>"
        );

        (status, Html(body)).into_response()
    }
}
