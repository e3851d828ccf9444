// src/syndication/columns.rs

use crate::domain::listing::Listing;

/// One cell of a flat (CSV / spreadsheet) export.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    fn text(s: &str) -> Cell {
        let s = s.trim();
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }

    fn num<N: Into<f64>>(n: Option<N>) -> Cell {
        n.map(|v| Cell::Number(v.into())).unwrap_or(Cell::Empty)
    }

    // Whole dollars.
    fn money(n: Option<i64>) -> Cell {
        n.map(|v| Cell::Number(v as f64)).unwrap_or(Cell::Empty)
    }
}

pub struct Column {
    pub header: &'static str,
    pub value: fn(&Listing) -> Cell,
}

const BASE: &[Column] = &[
    Column { header: "id", value: |l| Cell::text(&l.id) },
    Column { header: "title", value: |l| Cell::text(&l.title) },
    Column { header: "status", value: |l| Cell::text(l.status.as_str()) },
    Column { header: "listingType", value: |l| Cell::text(l.listing_type.as_str()) },
    Column { header: "offerType", value: |l| Cell::text(l.offer_type.as_str()) },
    Column { header: "year", value: |l| Cell::num(l.year) },
    Column { header: "make", value: |l| Cell::text(&l.make) },
    Column { header: "model", value: |l| Cell::text(&l.model) },
    Column { header: "salePrice", value: |l| Cell::money(l.sale_price) },
    Column { header: "rentPrice", value: |l| Cell::money(l.rent_price) },
    Column { header: "lotRent", value: |l| Cell::money(l.lot_rent) },
    Column { header: "bedrooms", value: |l| Cell::num(l.bedrooms) },
    Column { header: "bathrooms", value: |l| Cell::num(l.bathrooms) },
    Column { header: "squareFeet", value: |l| Cell::num(l.square_feet) },
    Column { header: "address", value: |l| Cell::text(&l.location.address) },
    Column { header: "city", value: |l| Cell::text(&l.location.city) },
    Column { header: "state", value: |l| Cell::text(&l.location.state) },
    Column { header: "zip", value: |l| Cell::text(&l.location.postal_code) },
    Column { header: "description", value: |l| Cell::text(&l.description) },
    Column { header: "features", value: |l| {
        Cell::text(&l.enabled_features().collect::<Vec<_>>().join("|"))
    } },
];

const PHOTOS: &[Column] = &[
    Column { header: "primaryPhoto", value: |l| {
        Cell::text(l.media.ordered_photos().first().copied().unwrap_or(""))
    } },
    Column { header: "photos", value: |l| Cell::text(&l.media.ordered_photos().join("|")) },
];

const PRIVATE: &[Column] = &[
    Column { header: "serialNumber", value: |l| Cell::text(l.serial_number.as_deref().unwrap_or("")) },
    Column { header: "acquisitionCost", value: |l| Cell::money(l.private.acquisition_cost) },
    Column { header: "internalNotes", value: |l| Cell::text(&l.private.internal_notes) },
    Column { header: "sellerName", value: |l| Cell::text(&l.private.seller_name) },
];

/// Columns for a flat export; optional groups are appended after the base set.
pub fn columns(include_photos: bool, include_private_fields: bool) -> Vec<&'static Column> {
    let mut out: Vec<&'static Column> = BASE.iter().collect();
    if include_photos {
        out.extend(PHOTOS.iter());
    }
    if include_private_fields {
        out.extend(PRIVATE.iter());
    }
    out
}
