// src/gates/partner.rs

use crate::domain::listing::Listing;
use crate::gates::defaults::default_gates;
use crate::gates::evaluator::{ValidationGate, Verdict};
use crate::syndication::partner::SyndicationPartner;

/// Gates derived from what a partner needs on every listing it receives.
pub fn partner_gates(partner: &SyndicationPartner) -> Vec<ValidationGate> {
    let mut gates = Vec::with_capacity(partner.required_fields.len() + 1);

    let accepted = partner.clone();
    gates.push(ValidationGate::new(
        format!("partner_{}_listing_type", partner.id),
        format!("{} Listing Type", partner.name),
        true,
        move |l: &Listing| {
            Verdict::check(
                accepted.accepts(l.listing_type),
                format!("{} does not accept {} listings", accepted.name, l.listing_type),
            )
        },
    ));

    for &field in &partner.required_fields {
        let partner_name = partner.name.clone();
        let key = serde_json::to_value(field)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        gates.push(ValidationGate::new(
            format!("partner_{key}"),
            format!("{} field: {}", partner.name, key),
            true,
            move |l: &Listing| {
                Verdict::check(
                    field.is_present(l),
                    format!("{} requires {}", partner_name, field.label()),
                )
            },
        ));
    }

    gates
}

/// Everything a listing must satisfy before it is handed to `partner`.
pub fn handoff_gates(partner: &SyndicationPartner) -> Vec<ValidationGate> {
    let mut gates = default_gates();
    gates.extend(partner_gates(partner));
    gates
}
