// errors.rs
use crate::gates::GateResult;
use crate::syndication::ExportError;
use astra::Response;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, missing resources, gate rejections) or downstream layers (DB, exporters).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// Carries the `Allow` header value for the path.
    #[error("Method Not Allowed")]
    MethodNotAllowed(&'static str),

    #[error("Payload Too Large")]
    PayloadTooLarge,

    /// Required gates failed; carries the failing results for the caller.
    #[error("Listing cannot be published: {} required check(s) failed", .0.len())]
    GateBlocked(Vec<GateResult>),

    #[error("Database Error: {0}")]
    DbError(String),

    #[error("Export Error: {0}")]
    ExportError(#[from] ExportError),

    #[error("Spreadsheet Error: {0}")]
    XlsxError(String),

    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::MethodNotAllowed(_) => 405,
            ServerError::PayloadTooLarge => 413,
            ServerError::GateBlocked(_) => 422,
            ServerError::DbError(_)
            | ServerError::ExportError(_)
            | ServerError::XlsxError(_)
            | ServerError::InternalError => 500,
        }
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> Self {
        ServerError::BadRequest(format!("invalid JSON: {err}"))
    }
}

impl From<rusqlite::Error> for ServerError {
    fn from(err: rusqlite::Error) -> Self {
        ServerError::DbError(err.to_string())
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
