//! Defines the app level error type and its conversion to HTTP responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::html::error_view;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The ledger file could not be created, read or written.
    #[error("could not access the ledger file: {0}")]
    LedgerIo(String),

    /// The ledger file could not be parsed as CSV at all, e.g. the header is
    /// unreadable.
    ///
    /// Individual malformed rows do not cause this error, they are skipped.
    #[error("could not parse the ledger CSV: {0}")]
    InvalidCsv(String),

    /// Could not acquire the lock that serializes writes to the ledger.
    #[error("could not acquire the ledger lock")]
    LedgerLockError,

    /// The configured timezone is not a valid, canonical timezone name.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::LedgerIo(value.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        match value.kind() {
            csv::ErrorKind::Io(error) => Error::LedgerIo(error.to_string()),
            _ => Error::InvalidCsv(value.to_string()),
        }
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn client_message(&self) -> &'static str {
        match self {
            Error::InvalidTimezoneError(_) => {
                "Invalid timezone settings, check the server configuration."
            }
            _ => "An unexpected error occurred, check the server logs for more details.",
        }
    }

    /// Render the error as a full HTML page, for routes that serve pages.
    pub(crate) fn into_page_response(self) -> Response {
        tracing::error!("An unexpected error occurred: {}", self);

        let page = error_view(
            "Internal Server Error",
            "500",
            "Sorry, something went wrong.",
            self.client_message(),
        );

        (self.status_code(), page).into_response()
    }
}

/// Errors are returned to API clients as a JSON object with an `error` field.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("An unexpected error occurred: {}", self);

        (
            self.status_code(),
            Json(json!({ "error": self.client_message() })),
        )
            .into_response()
    }
}
