use crate::config::Config;
use crate::db::listings::{get_listing, list_listings, ListingFilter};
use crate::db::Database;
use crate::errors::{ResultResp, ServerError};
use crate::responses::{html_response, json_response};
use crate::router::Query;
use crate::share::OgCard;
use crate::syndication::generate_export_url;
use crate::templates::pages::{home_page, share_page, PartnerFeedVm};
use astra::Request;

pub fn home(db: &Database, config: &Config) -> ResultResp {
    let active = list_listings(db, &ListingFilter::active())?.len();
    let feeds: Vec<PartnerFeedVm> = config
        .partners
        .iter()
        .map(|partner| PartnerFeedVm {
            partner,
            export_url: generate_export_url(&config.public_base_url, partner),
        })
        .collect();

    html_response(home_page(&feeds, active))
}

/// GET /og-image?listingId=: the link-preview card as JSON.
pub fn og_image(req: &Request, db: &Database, config: &Config) -> ResultResp {
    let query = Query::from_request(req);
    let id = query.required("listingId")?;
    let listing = get_listing(db, id)?.ok_or(ServerError::NotFound)?;

    json_response(&OgCard::for_listing(
        &listing,
        &config.public_base_url,
        &config.default_og_image,
    ))
}

pub fn share(db: &Database, config: &Config, id: &str) -> ResultResp {
    let listing = get_listing(db, id)?.ok_or(ServerError::NotFound)?;
    let og = OgCard::for_listing(&listing, &config.public_base_url, &config.default_og_image);
    html_response(share_page(&listing, &og))
}
