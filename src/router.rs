use crate::config::Config;
use crate::db::Database;
use crate::errors::{ResultResp, ServerError};
use crate::handlers::{export, feeds, listings, pages, partners};
use astra::Request;
use std::collections::HashMap;
use std::io::Read;
use std::str::FromStr;
use url::form_urlencoded;

const MAX_BODY_BYTES: u64 = 1024 * 1024;

pub fn handle(mut req: Request, db: &Database, config: &Config) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", []) => pages::home(db, config),

        // Partner feeds are GET-only.
        ("GET", ["feeds", feed_id]) => feeds::partner_feed(&req, db, config, feed_id),
        (_, ["feeds", _]) => Err(ServerError::MethodNotAllowed("GET")),
        ("GET", ["og-image"]) => pages::og_image(&req, db, config),
        (_, ["og-image"]) => Err(ServerError::MethodNotAllowed("GET")),

        ("GET", ["listings"]) => listings::list(&req, db),
        ("POST", ["listings"]) => {
            let body = read_body(&mut req)?;
            listings::save(&body, db)
        }
        ("GET", ["listings", id]) => listings::get(db, id),
        ("DELETE", ["listings", id]) => listings::delete(db, id),
        ("GET", ["listings", id, "validation"]) => listings::validation(&req, db, config, id),
        ("POST", ["listings", id, "status"]) => {
            let body = read_body(&mut req)?;
            listings::change_status(&body, db, id)
        }
        ("GET", ["listings", id, "history"]) => listings::history(db, id),
        ("GET", ["listings", id, "share"]) => pages::share(db, config, id),

        ("GET", ["export"]) => export::export(&req, db, config),

        ("GET", ["partners"]) => partners::list(config),
        ("GET", ["partners", id, "export-url"]) => partners::export_url(config, id),

        (_, ["listings"]) => Err(ServerError::MethodNotAllowed("GET, POST")),
        (_, ["listings", _]) => Err(ServerError::MethodNotAllowed("GET, DELETE")),
        (_, ["listings", _, "status"]) => Err(ServerError::MethodNotAllowed("POST")),
        (_, ["listings", _, "validation" | "history" | "share"])
        | (_, ["export"])
        | (_, ["partners"])
        | (_, ["partners", _, "export-url"])
        | (_, []) => Err(ServerError::MethodNotAllowed("GET")),
        _ => Err(ServerError::NotFound),
    }
}

/// Reads at most `MAX_BODY_BYTES`; anything longer is rejected, not truncated.
fn read_body(req: &mut Request) -> Result<Vec<u8>, ServerError> {
    let mut buf = Vec::new();
    req.body_mut()
        .reader()
        .take(MAX_BODY_BYTES + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("could not read body: {e}")))?;
    if buf.len() as u64 > MAX_BODY_BYTES {
        return Err(ServerError::PayloadTooLarge);
    }
    Ok(buf)
}

/// Decoded query string. Blank values count as absent.
pub struct Query {
    params: HashMap<String, String>,
}

impl Query {
    pub fn from_request(req: &Request) -> Self {
        Self::parse(req.uri().query().unwrap_or(""))
    }

    pub fn parse(raw: &str) -> Self {
        Self {
            params: form_urlencoded::parse(raw.as_bytes()).into_owned().collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn required(&self, name: &str) -> Result<&str, ServerError> {
        self.get(name)
            .ok_or_else(|| ServerError::BadRequest(format!("{name} is required")))
    }

    /// `true`, `1` and `yes` (any case) are on; absent means `default`.
    pub fn flag(&self, name: &str, default: bool) -> bool {
        match self.get(name) {
            Some(v) => matches!(v.to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
            None => default,
        }
    }

    pub fn parse_opt<T>(&self, name: &str) -> Result<Option<T>, ServerError>
    where
        T: FromStr<Err = String>,
    {
        self.get(name)
            .map(|v| {
                v.parse::<T>()
                    .map_err(|e| ServerError::BadRequest(format!("invalid {name}: {e}")))
            })
            .transpose()
    }

    /// Comma-separated list; every item must parse.
    pub fn parse_list<T>(&self, name: &str) -> Result<Vec<T>, ServerError>
    where
        T: FromStr<Err = String>,
    {
        match self.get(name) {
            None => Ok(Vec::new()),
            Some(v) => v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    s.parse::<T>()
                        .map_err(|e| ServerError::BadRequest(format!("invalid {name}: {e}")))
                })
                .collect(),
        }
    }
}
