use crate::config::Config;
use crate::db::{init_db, Database};
use crate::router::handle;
use astra::{Request, Server};
use std::time::Instant;
use tracing::{error, info};

mod config;
mod db;
mod domain;
mod errors;
mod gates;
mod handlers;
mod logging;
mod responses;
mod router;
mod share;
mod syndication;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    logging::init_logging();

    // 1️⃣ Load configuration
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };
    let addr = match config.socket_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    // 2️⃣ Open the database and apply the schema
    let db = Database::new(config.database_path.clone());
    if let Err(e) = init_db(&db) {
        error!("Database initialization failed: {e}");
        std::process::exit(1);
    }

    // 3️⃣ Start the server
    info!(%addr, partners = config.partners.len(), "starting listing feeds server");
    let server = Server::bind(&addr).max_workers(config.max_workers);

    let result = server.serve(move |req: Request, _info| {
        let started = Instant::now();
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let resp = match handle(req, &db, &config) {
            Ok(resp) => resp,
            Err(err) => responses::error_response(err),
        };

        info!(
            %method,
            %path,
            status = resp.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request"
        );
        resp
    });

    if let Err(e) = result {
        error!("Server ended with error: {e}");
    }

    info!("Server shut down cleanly.");
}
