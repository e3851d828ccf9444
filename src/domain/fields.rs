// src/domain/fields.rs

use crate::domain::listing::Listing;
use serde::{Deserialize, Serialize};

/// Listing fields a syndication partner can insist on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingField {
    Title,
    Year,
    Make,
    Model,
    SerialNumber,
    /// The price matching the offer type (sale and/or rent).
    Price,
    LotRent,
    Bedrooms,
    Bathrooms,
    SquareFeet,
    Dimensions,
    Description,
    Photos,
    Address,
    City,
    State,
    PostalCode,
    CommunityName,
    ContactEmail,
    ContactPhone,
}

fn filled(s: &str) -> bool {
    !s.trim().is_empty()
}

fn positive(n: Option<i64>) -> bool {
    n.is_some_and(|v| v > 0)
}

impl ListingField {
    pub fn label(self) -> &'static str {
        match self {
            ListingField::Title => "a title",
            ListingField::Year => "a model year",
            ListingField::Make => "a make / manufacturer",
            ListingField::Model => "a model",
            ListingField::SerialNumber => "a serial number",
            ListingField::Price => "a price",
            ListingField::LotRent => "the lot rent",
            ListingField::Bedrooms => "the number of bedrooms",
            ListingField::Bathrooms => "the number of bathrooms",
            ListingField::SquareFeet => "the square footage",
            ListingField::Dimensions => "width and length",
            ListingField::Description => "a description",
            ListingField::Photos => "at least one photo",
            ListingField::Address => "a street address",
            ListingField::City => "a city",
            ListingField::State => "a state",
            ListingField::PostalCode => "a postal code",
            ListingField::CommunityName => "a community name",
            ListingField::ContactEmail => "a contact email",
            ListingField::ContactPhone => "a contact phone number",
        }
    }

    /// Field-presence check. Zero and blank count as missing.
    pub fn is_present(self, listing: &Listing) -> bool {
        match self {
            ListingField::Title => filled(&listing.title),
            ListingField::Year => listing.year.is_some_and(|y| y > 0),
            ListingField::Make => filled(&listing.make),
            ListingField::Model => filled(&listing.model),
            ListingField::SerialNumber => listing.serial_number.as_deref().is_some_and(filled),
            ListingField::Price => {
                let offer = listing.offer_type;
                (!offer.sells() || positive(listing.sale_price))
                    && (!offer.rents() || positive(listing.rent_price))
            }
            ListingField::LotRent => positive(listing.lot_rent),
            ListingField::Bedrooms => listing.bedrooms.is_some_and(|b| b > 0),
            ListingField::Bathrooms => listing.bathrooms.is_some_and(|b| b > 0.0),
            ListingField::SquareFeet => listing.square_feet.is_some_and(|s| s > 0),
            ListingField::Dimensions => {
                listing.width.is_some_and(|w| w > 0) && listing.length.is_some_and(|l| l > 0)
            }
            ListingField::Description => filled(&listing.description),
            ListingField::Photos => listing.media.has_any(),
            ListingField::Address => filled(&listing.location.address),
            ListingField::City => filled(&listing.location.city),
            ListingField::State => filled(&listing.location.state),
            ListingField::PostalCode => filled(&listing.location.postal_code),
            ListingField::CommunityName => filled(&listing.location.community_name),
            ListingField::ContactEmail => filled(&listing.contact.email),
            ListingField::ContactPhone => filled(&listing.contact.phone),
        }
    }
}
