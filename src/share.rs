// src/share.rs

use crate::domain::listing::Listing;
use serde::Serialize;
use url::{form_urlencoded, Url};

pub const OG_DESCRIPTION_CHARS: usize = 160;

/// What link previews show for a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OgCard {
    pub title: String,
    pub description: String,
    pub image: String,
    pub url: String,
}

fn absolute(base_url: &str, path_or_url: &str) -> String {
    if path_or_url.starts_with("http://") || path_or_url.starts_with("https://") {
        path_or_url.to_string()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path_or_url.trim_start_matches('/')
        )
    }
}

/// `{base}/listings/{id}/share` with the id encoded as one path segment.
fn share_url(base_url: &str, id: &str) -> String {
    match Url::parse(base_url) {
        Ok(mut url) => {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.pop_if_empty().extend(["listings", id, "share"]);
            }
            url.to_string()
        }
        Err(_) => {
            let encoded: String = form_urlencoded::byte_serialize(id.as_bytes()).collect();
            absolute(base_url, &format!("/listings/{encoded}/share"))
        }
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.chars().count() <= max {
        return text;
    }
    let cut: String = text.chars().take(max - 1).collect();
    format!("{}…", cut.trim_end())
}

fn summary(listing: &Listing) -> String {
    let mut parts = Vec::new();
    if listing.offer_type.sells() {
        if let Some(p) = listing.sale_price.filter(|p| *p > 0) {
            parts.push(format!("${p}"));
        }
    }
    if listing.offer_type.rents() {
        if let Some(p) = listing.rent_price.filter(|p| *p > 0) {
            parts.push(format!("${p}/mo"));
        }
    }
    if let Some(b) = listing.bedrooms.filter(|b| *b > 0) {
        parts.push(format!("{b} bd"));
    }
    let place = [listing.location.city.trim(), listing.location.state.trim()]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    if !place.is_empty() {
        parts.push(place);
    }
    parts.join(" · ")
}

impl OgCard {
    pub fn for_listing(listing: &Listing, base_url: &str, default_image: &str) -> Self {
        let description = if listing.description.trim().is_empty() {
            summary(listing)
        } else {
            truncate_chars(&listing.description, OG_DESCRIPTION_CHARS)
        };

        let image = listing
            .media
            .ordered_photos()
            .first()
            .map(|p| absolute(base_url, p))
            .unwrap_or_else(|| absolute(base_url, default_image));

        Self {
            title: listing.headline(),
            description,
            image,
            url: share_url(base_url, &listing.id),
        }
    }
}
