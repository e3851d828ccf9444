// templates/pages/share.rs

use crate::domain::listing::Listing;
use crate::share::OgCard;
use crate::templates::{desktop_layout, money};
use maud::{html, Markup};

/// Public page a shared link lands on; carries the Open Graph tags previews read.
pub fn share_page(listing: &Listing, og: &OgCard) -> Markup {
    let head = html! {
        meta property="og:type" content="website";
        meta property="og:title" content=(og.title);
        meta property="og:description" content=(og.description);
        meta property="og:image" content=(og.image);
        meta property="og:url" content=(og.url);
        meta name="twitter:card" content="summary_large_image";
    };

    desktop_layout(
        &og.title,
        head,
        html! {
            article class="listing" {
                h1 { (og.title) }
                img src=(og.image) alt=(og.title);

                p class="pricing" {
                    @if listing.offer_type.sells() {
                        @if let Some(price) = listing.sale_price.filter(|p| *p > 0) {
                            (money(price, ""))
                        }
                    }
                    @if listing.offer_type.rents() {
                        @if let Some(rent) = listing.rent_price.filter(|p| *p > 0) {
                            " " (money(rent, "/mo"))
                        }
                    }
                }

                ul class="facts" {
                    @if let Some(beds) = listing.bedrooms { li { (beds) " bedrooms" } }
                    @if let Some(baths) = listing.bathrooms { li { (baths.to_string()) " bathrooms" } }
                    @if let Some(sqft) = listing.square_feet { li { (sqft) " sq ft" } }
                    @if !listing.location.city.is_empty() {
                        li { (listing.location.city) ", " (listing.location.state) }
                    }
                }

                @if !listing.description.is_empty() {
                    p class="description" { (listing.description) }
                }

                @let features: Vec<&str> = listing.enabled_features().collect();
                @if !features.is_empty() {
                    h2 { "Features" }
                    ul { @for f in features { li { (f) } } }
                }
            }
        },
    )
}
