// src/syndication/json.rs

use crate::domain::listing::Listing;
use crate::syndication::{ExportError, ExportOptions};
use chrono::SecondsFormat;
use serde_json::{json, Value};

const PHOTO_KEYS: &[&str] = &["media"];
const PRIVATE_KEYS: &[&str] = &["private", "serialNumber"];

/// The listing's camelCase form with excluded groups removed.
pub fn redact(listing: &Listing, opts: &ExportOptions) -> Result<Value, ExportError> {
    let mut value = serde_json::to_value(listing)?;

    if let Value::Object(map) = &mut value {
        if !opts.include_photos {
            for key in PHOTO_KEYS {
                map.remove(*key);
            }
        }
        if !opts.include_private_fields {
            for key in PRIVATE_KEYS {
                map.remove(*key);
            }
        }
    }

    Ok(value)
}

pub fn export_json(listings: &[Listing], opts: &ExportOptions) -> Result<String, ExportError> {
    let items = listings
        .iter()
        .map(|l| redact(l, opts))
        .collect::<Result<Vec<_>, _>>()?;

    let doc = json!({
        "partnerId": opts.partner_id,
        "generatedAt": opts.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        "count": items.len(),
        "listings": items,
    });

    Ok(serde_json::to_string_pretty(&doc)?)
}
