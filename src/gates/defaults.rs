// src/gates/defaults.rs

use crate::domain::fields::ListingField;
use crate::domain::listing::Listing;
use crate::gates::evaluator::{ValidationGate, Verdict};
use chrono::{Datelike, Utc};

pub const MIN_DESCRIPTION_CHARS: usize = 50;

pub const BASIC_INFO: &str = "basic_info";
pub const PRICING: &str = "pricing";
pub const LOCATION: &str = "location";
pub const MARKETING_CONTENT: &str = "marketing_content";
pub const MEDIA: &str = "media";
pub const PROPERTY_DETAILS: &str = "property_details";
pub const CONTACT_INFO: &str = "contact_info";
pub const FEATURES: &str = "features";

/// The publishing gates every listing goes through, in display order.
pub fn default_gates() -> Vec<ValidationGate> {
    vec![
        ValidationGate::new(BASIC_INFO, "Basic Information", true, basic_info),
        ValidationGate::new(PRICING, "Pricing", true, pricing),
        ValidationGate::new(LOCATION, "Location", true, location),
        ValidationGate::new(MARKETING_CONTENT, "Marketing Content", true, |l: &Listing| {
            Verdict::check(
                l.description.trim().chars().count() >= MIN_DESCRIPTION_CHARS,
                format!("Description must be at least {MIN_DESCRIPTION_CHARS} characters"),
            )
        }),
        ValidationGate::new(MEDIA, "Photos", true, |l: &Listing| {
            Verdict::check(l.media.has_any(), "At least one photo is required")
        }),
        ValidationGate::new(PROPERTY_DETAILS, "Property Details", false, property_details),
        ValidationGate::new(CONTACT_INFO, "Contact Information", false, |l: &Listing| {
            Verdict::check(
                ListingField::ContactEmail.is_present(l) || ListingField::ContactPhone.is_present(l),
                "Add a contact email or phone so leads can reach you",
            )
        }),
        ValidationGate::new(FEATURES, "Features", false, |l: &Listing| {
            Verdict::check(
                l.enabled_features().next().is_some(),
                "Listings with features highlighted get more views",
            )
        }),
    ]
}

fn basic_info(l: &Listing) -> Verdict {
    let mut missing = Vec::new();
    if !ListingField::Title.is_present(l) {
        missing.push("title");
    }
    if !ListingField::Make.is_present(l) {
        missing.push("make");
    }
    if !ListingField::Model.is_present(l) {
        missing.push("model");
    }
    if !missing.is_empty() {
        return Verdict::fail(format!("Missing {}", missing.join(", ")));
    }

    let latest = Utc::now().year() + 1;
    match l.year {
        None => Verdict::fail("Year is required"),
        Some(y) if !(1900..=latest).contains(&y) => {
            Verdict::fail(format!("Year must be between 1900 and {latest}"))
        }
        Some(_) => Verdict::pass(),
    }
}

fn pricing(l: &Listing) -> Verdict {
    let offer = l.offer_type;
    if offer.sells() && !l.sale_price.is_some_and(|p| p > 0) {
        return Verdict::fail("Sale price is required for listings offered for sale");
    }
    if offer.rents() && !l.rent_price.is_some_and(|p| p > 0) {
        return Verdict::fail("Rent price is required for listings offered for rent");
    }
    Verdict::pass()
}

fn location(l: &Listing) -> Verdict {
    let missing: Vec<&str> = [
        (ListingField::City, "city"),
        (ListingField::State, "state"),
        (ListingField::PostalCode, "postal code"),
    ]
    .into_iter()
    .filter(|(field, _)| !field.is_present(l))
    .map(|(_, name)| name)
    .collect();

    Verdict::check(missing.is_empty(), format!("Location is missing {}", missing.join(", ")))
}

fn property_details(l: &Listing) -> Verdict {
    let complete = ListingField::Bedrooms.is_present(l)
        && ListingField::Bathrooms.is_present(l)
        && ListingField::SquareFeet.is_present(l);
    Verdict::check(complete, "Bedrooms, bathrooms and square feet help buyers compare")
}
