use crate::errors::{ResultResp, ServerError};
use astra::{Body, ResponseBuilder};
use base64::Engine;
use sha2::{Digest, Sha256};

const FEED_CACHE_CONTROL: &str = "public, max-age=3600";

/// Strong ETag: URL-safe base64 of the body's SHA-256, quoted.
pub fn etag_for(body: &[u8]) -> String {
    let digest = Sha256::digest(body);
    format!(
        "\"{}\"",
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest)
    )
}

fn etag_matches(if_none_match: &str, etag: &str) -> bool {
    if_none_match.trim() == "*"
        || if_none_match
            .split(',')
            .map(|t| t.trim().trim_start_matches("W/"))
            .any(|t| t == etag)
}

/// 200 with the feed body, or 304 when the client already holds this version.
/// A `filename` turns the body into a download.
pub fn feed_response(
    body: String,
    content_type: &str,
    if_none_match: Option<&str>,
    filename: Option<&str>,
) -> ResultResp {
    let etag = etag_for(body.as_bytes());

    if if_none_match.is_some_and(|inm| etag_matches(inm, &etag)) {
        return ResponseBuilder::new()
            .status(304)
            .header("ETag", etag)
            .header("Cache-Control", FEED_CACHE_CONTROL)
            .body(Body::empty())
            .map_err(|_| ServerError::InternalError);
    }

    let mut builder = ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type)
        .header("ETag", etag)
        .header("Cache-Control", FEED_CACHE_CONTROL);
    if let Some(name) = filename {
        builder = builder.header(
            "Content-Disposition",
            format!("attachment; filename=\"{name}\""),
        );
    }

    builder
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}
