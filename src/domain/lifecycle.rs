// src/domain/lifecycle.rs

use crate::domain::listing::{Listing, ListingStatus};
use crate::errors::ServerError;
use crate::gates::{evaluate, GateReport, ValidationGate};
use chrono::Utc;
use tracing::info;

/// Decides whether `listing` may be stored with status `target`.
///
/// Only `active` is gated: the required gates must all pass. Every other
/// status is accepted without evaluating anything. Returns the report when
/// gates were run.
pub fn authorize_status(
    listing: &Listing,
    target: ListingStatus,
    gates: &[ValidationGate],
) -> Result<Option<GateReport>, ServerError> {
    if target != ListingStatus::Active {
        return Ok(None);
    }

    let report = evaluate(listing, gates);
    if report.can_publish {
        Ok(Some(report))
    } else {
        info!(
            listing = %listing.id,
            failed = report.required_issues.len(),
            "publish blocked by validation gates"
        );
        Err(ServerError::GateBlocked(report.required_issues))
    }
}

/// Moves `listing` to `target` if allowed, stamping `updated_at`.
/// On rejection the listing is left untouched.
pub fn transition(
    listing: &mut Listing,
    target: ListingStatus,
    gates: &[ValidationGate],
) -> Result<ListingStatus, ServerError> {
    authorize_status(listing, target, gates)?;

    let previous = listing.status;
    if previous != target {
        listing.status = target;
        listing.updated_at = Utc::now();
    }
    Ok(previous)
}
