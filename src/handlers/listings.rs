use crate::config::Config;
use crate::db::listings::{
    delete_listing, get_listing, list_listings, save_listing, save_with_status_change,
    status_history, ListingFilter,
};
use crate::db::Database;
use crate::domain::lifecycle::{authorize_status, transition};
use crate::domain::listing::{Listing, ListingStatus, ListingType};
use crate::errors::{ResultResp, ServerError};
use crate::gates::{default_gates, evaluate, handoff_gates};
use crate::responses::{json_response, json_response_with_status};
use crate::router::Query;
use crate::syndication::find_partner;
use astra::Request;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

fn load(db: &Database, id: &str) -> Result<Listing, ServerError> {
    get_listing(db, id)?.ok_or(ServerError::NotFound)
}

pub fn list(req: &Request, db: &Database) -> ResultResp {
    let query = Query::from_request(req);
    let filter = ListingFilter {
        company_id: query.get("companyId").map(str::to_string),
        status: query.parse_opt::<ListingStatus>("status")?,
        listing_type: query.parse_opt::<ListingType>("listingType")?,
        search: query.get("q").map(str::to_string),
    };

    let listings = list_listings(db, &filter)?;
    json_response(&json!({ "count": listings.len(), "listings": listings }))
}

/// Creates or replaces a listing. Saving with status `active` runs the
/// default gates first; anything else is stored as-is. A payload without
/// `status` keeps the stored one, so edits to a published listing are gated.
pub fn save(body: &[u8], db: &Database) -> ResultResp {
    let raw: Value = serde_json::from_slice(body)?;
    let has_status = raw.get("status").is_some_and(|s| !s.is_null());
    let mut listing: Listing = serde_json::from_value(raw)?;
    if listing.id.trim().is_empty() {
        listing.id = format!("lst-{}", Utc::now().format("%Y%m%d%H%M%S%f"));
    }

    let stored = get_listing(db, &listing.id)?;
    let created = stored.is_none();
    let from = stored.as_ref().map_or(ListingStatus::Draft, |s| s.status);
    if !has_status {
        listing.status = from;
    }

    authorize_status(&listing, listing.status, &default_gates())?;

    if let Some(prev) = &stored {
        listing.created_at = prev.created_at;
    }
    listing.updated_at = Utc::now();

    if created || from != listing.status {
        save_with_status_change(db, &listing, from)?;
    } else {
        save_listing(db, &listing)?;
    }

    info!(listing = %listing.id, status = %listing.status, created, "listing saved");

    let report = evaluate(&listing, &default_gates());
    json_response_with_status(
        if created { 201 } else { 200 },
        &json!({ "listing": listing, "validation": report }),
    )
}

pub fn get(db: &Database, id: &str) -> ResultResp {
    json_response(&load(db, id)?)
}

pub fn delete(db: &Database, id: &str) -> ResultResp {
    if !delete_listing(db, id)? {
        return Err(ServerError::NotFound);
    }
    info!(listing = %id, "listing deleted");
    json_response(&json!({ "deleted": id }))
}

/// Gate report for a stored listing. With `partnerId`, the partner's
/// handoff gates are added to the defaults.
pub fn validation(req: &Request, db: &Database, config: &Config, id: &str) -> ResultResp {
    let listing = load(db, id)?;
    let query = Query::from_request(req);

    let gates = match query.get("partnerId") {
        Some(pid) => {
            let partner = find_partner(&config.partners, pid).ok_or(ServerError::NotFound)?;
            handoff_gates(partner)
        }
        None => default_gates(),
    };

    json_response(&evaluate(&listing, &gates))
}

#[derive(Debug, Deserialize)]
struct StatusBody {
    status: String,
}

pub fn change_status(body: &[u8], db: &Database, id: &str) -> ResultResp {
    let StatusBody { status } = serde_json::from_slice(body)?;
    let target: ListingStatus = status
        .parse()
        .map_err(|e| ServerError::BadRequest(format!("invalid status: {e}")))?;

    let mut listing = load(db, id)?;
    let previous = transition(&mut listing, target, &default_gates())?;
    save_with_status_change(db, &listing, previous)?;

    info!(listing = %id, from = %previous, to = %target, "status changed");
    json_response(&json!({
        "id": listing.id,
        "previousStatus": previous,
        "status": listing.status,
    }))
}

pub fn history(db: &Database, id: &str) -> ResultResp {
    load(db, id)?;
    json_response(&status_history(db, id)?)
}
