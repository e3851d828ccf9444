use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;
use tracing::error;

const INTERNAL_ERROR_BODY: &str = r#"{"error":"Internal server error"}"#;

/// Convert a ServerError into a JSON error response.
/// Server-side failures are logged and never leak detail to the client.
pub fn error_response(err: ServerError) -> Response {
    let status = err.status();

    let body = match &err {
        ServerError::NotFound => json!({ "error": "Not found" }).to_string(),
        ServerError::BadRequest(msg) => json!({ "error": msg }).to_string(),
        ServerError::MethodNotAllowed(_) => json!({ "error": "Method not allowed" }).to_string(),
        ServerError::PayloadTooLarge => json!({ "error": "Request body too large" }).to_string(),
        ServerError::GateBlocked(issues) => json!({
            "error": err.to_string(),
            "issues": issues,
        })
        .to_string(),
        ServerError::DbError(_)
        | ServerError::ExportError(_)
        | ServerError::XlsxError(_)
        | ServerError::InternalError => {
            error!(error = %err, "request failed");
            INTERNAL_ERROR_BODY.to_string()
        }
    };

    let mut builder = ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref());
    if let ServerError::MethodNotAllowed(allow) = &err {
        builder = builder.header("Allow", *allow);
    }

    builder
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::from(INTERNAL_ERROR_BODY)))
}
