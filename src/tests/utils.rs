use crate::config::Config;
use crate::db::listings::save_listing;
use crate::db::{init_db, Database};
use crate::domain::listing::{Listing, ListingStatus};
use crate::gates::defaults::tests::publishable_listing;
use crate::router::handle;
use astra::{Body, Response};
use http::{Method, Request};
use std::io::Read;
use std::time::{SystemTime, UNIX_EPOCH};

/// Fresh database file in the temp dir, with the production schema applied.
pub fn init_test_db(name: &str) -> Database {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let path = std::env::temp_dir().join(format!("{name}_{nanos}.sqlite3"));
    let db = Database::new(path.to_string_lossy().into_owned());

    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    db
}

pub fn test_config() -> Config {
    Config {
        public_base_url: "https://feeds.acme.example".into(),
        ..Config::default()
    }
}

/// Stores a publishable listing with the given status.
pub fn seed_listing(db: &Database, id: &str, status: ListingStatus) -> Listing {
    let mut listing = publishable_listing(id);
    listing.status = status;
    save_listing(db, &listing).expect("seed listing");
    listing
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn with_body(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Runs the request through the router, turning errors into responses the
/// same way the server loop does.
pub fn send(req: Request<Body>, db: &Database, config: &Config) -> Response {
    match handle(req, db, config) {
        Ok(resp) => resp,
        Err(err) => crate::responses::error_response(err),
    }
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body()
        .reader()
        .read_to_string(&mut body)
        .expect("read body");
    body
}

pub fn body_json(resp: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(resp)).expect("json body")
}
