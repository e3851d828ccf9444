// src/domain/listing.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// listing
//  ├── id / companyId
//  ├── listingType / offerType / status
//  ├── title, year, make, model, serialNumber
//  ├── salePrice, rentPrice, lotRent
//  ├── bedrooms, bathrooms, squareFeet, width, length
//  ├── description
//  ├── location
//  │    ├── address, city, state, postalCode
//  │    ├── communityName
//  │    └── latitude / longitude
//  ├── media
//  │    ├── primaryPhoto
//  │    └── photos[]
//  ├── features { name: bool }
//  ├── contact { name, email, phone }
//  └── private { acquisitionCost, internalNotes, sellerName }

/// The core record for a home or vehicle offered for sale or rent.
///
/// Serialized in camelCase, the same shape the dealership front end stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub company_id: String,

    #[serde(default)]
    pub listing_type: ListingType,
    #[serde(default)]
    pub offer_type: OfferType,
    #[serde(default)]
    pub status: ListingStatus,

    #[serde(default)]
    pub title: String,
    pub year: Option<i32>,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    pub serial_number: Option<String>,

    // Whole dollars.
    pub sale_price: Option<i64>,
    pub rent_price: Option<i64>,
    pub lot_rent: Option<i64>,

    pub bedrooms: Option<u32>,
    pub bathrooms: Option<f64>,
    pub square_feet: Option<u32>,
    pub width: Option<u32>,
    pub length: Option<u32>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub media: Media,
    #[serde(default)]
    pub features: BTreeMap<String, bool>,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub private: PrivateDetails,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub community_name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Media {
    pub primary_photo: Option<String>,
    pub photos: Vec<String>,
}

impl Media {
    /// Primary photo first, then the remaining photos without repeating it.
    pub fn ordered_photos(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        if let Some(primary) = self.primary_photo.as_deref().filter(|p| !p.is_empty()) {
            out.push(primary);
        }
        for photo in &self.photos {
            if !photo.is_empty() && !out.contains(&photo.as_str()) {
                out.push(photo);
            }
        }
        out
    }

    pub fn has_any(&self) -> bool {
        !self.ordered_photos().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Dealer-only data. Never leaves the service unless a caller asks for private fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrivateDetails {
    pub acquisition_cost: Option<i64>,
    pub internal_notes: String,
    pub seller_name: String,
}

impl Listing {
    /// A blank draft, used by tests and as the base for partial payloads.
    pub fn new(id: impl Into<String>, company_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            company_id: company_id.into(),
            listing_type: ListingType::default(),
            offer_type: OfferType::default(),
            status: ListingStatus::default(),
            title: String::new(),
            year: None,
            make: String::new(),
            model: String::new(),
            serial_number: None,
            sale_price: None,
            rent_price: None,
            lot_rent: None,
            bedrooms: None,
            bathrooms: None,
            square_feet: None,
            width: None,
            length: None,
            description: String::new(),
            location: Location::default(),
            media: Media::default(),
            features: BTreeMap::new(),
            contact: Contact::default(),
            private: PrivateDetails::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Names of features flagged true, in stable (sorted) order.
    pub fn enabled_features(&self) -> impl Iterator<Item = &str> {
        self.features
            .iter()
            .filter(|(_, on)| **on)
            .map(|(name, _)| name.as_str())
    }

    /// Display headline: the title, or "year make model" when no title was entered.
    pub fn headline(&self) -> String {
        if !self.title.trim().is_empty() {
            return self.title.trim().to_string();
        }
        let year = self.year.map(|y| y.to_string()).unwrap_or_default();
        [year.as_str(), self.make.trim(), self.model.trim()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Lifecycle status. Only the move to `Active` is gated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    #[default]
    Draft,
    Active,
    Sold,
    Rented,
    Inactive,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferType {
    #[default]
    ForSale,
    ForRent,
    Both,
}

impl OfferType {
    pub fn sells(self) -> bool {
        matches!(self, OfferType::ForSale | OfferType::Both)
    }

    pub fn rents(self) -> bool {
        matches!(self, OfferType::ForRent | OfferType::Both)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingType {
    #[default]
    ManufacturedHome,
    Rv,
    Vehicle,
    Land,
    RentalProperty,
}

// The string forms below match the serde names so query params,
// DB columns and JSON bodies all agree.

macro_rules! str_enum {
    ($ty:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $s,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($s => Ok($ty::$variant),)+
                    other => Err(format!(
                        concat!("unknown ", stringify!($ty), " '{}'"),
                        other
                    )),
                }
            }
        }
    };
}

str_enum!(ListingStatus {
    Draft => "draft",
    Active => "active",
    Sold => "sold",
    Rented => "rented",
    Inactive => "inactive",
});

str_enum!(OfferType {
    ForSale => "for_sale",
    ForRent => "for_rent",
    Both => "both",
});

str_enum!(ListingType {
    ManufacturedHome => "manufactured_home",
    Rv => "rv",
    Vehicle => "vehicle",
    Land => "land",
    RentalProperty => "rental_property",
});
