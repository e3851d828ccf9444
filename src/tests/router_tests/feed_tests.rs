use crate::db::listings::save_listing;
use crate::db::Database;
use crate::domain::listing::{ListingStatus, ListingType, OfferType};
use crate::gates::defaults::tests::publishable_listing;
use crate::tests::utils::{
    body_json, body_string, get, init_test_db, seed_listing, send, test_config, with_body,
};
use http::Method;

#[test]
fn zillow_feed_lists_only_active_listings() {
    let db = init_test_db("feed_zillow_active");
    let config = test_config();
    seed_listing(&db, "A-1", ListingStatus::Active);
    seed_listing(&db, "D-1", ListingStatus::Draft);

    let resp = send(get("/feeds/zillow?partnerId=zillow"), &db, &config);
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["Content-Type"], "text/xml");
    assert!(resp.headers().contains_key("ETag"));

    let body = body_string(resp);
    assert!(body.contains("<listings partnerId=\"zillow\""));
    assert!(body.contains("<listing id=\"A-1\">"));
    assert!(!body.contains("D-1"));
}

#[test]
fn sale_listing_has_sale_price_and_no_rent_price() {
    let db = init_test_db("feed_sale_price");
    let config = test_config();
    let mut listing = publishable_listing("S-1");
    listing.status = ListingStatus::Active;
    listing.offer_type = OfferType::ForSale;
    listing.sale_price = Some(89500);
    listing.rent_price = None;
    save_listing(&db, &listing).unwrap();

    let body = body_string(send(get("/feeds/zillow?partnerId=zillow"), &db, &config));
    assert!(body.contains("<salePrice>89500</salePrice>"));
    assert!(!body.contains("<rentPrice>"));
}

#[test]
fn feeds_never_carry_private_fields() {
    let db = init_test_db("feed_private");
    let config = test_config();
    let mut listing = publishable_listing("P-1");
    listing.status = ListingStatus::Active;
    listing.private.internal_notes = "owner will take 80k".into();
    save_listing(&db, &listing).unwrap();

    let body = body_string(send(get("/feeds/zillow?partnerId=zillow"), &db, &config));
    assert!(!body.contains("owner will take 80k"));
}

#[test]
fn missing_partner_id_is_bad_request() {
    let db = init_test_db("feed_missing_partner");
    let resp = send(get("/feeds/zillow"), &db, &test_config());
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["error"], "partnerId is required");
}

#[test]
fn invalid_listing_type_is_bad_request() {
    let db = init_test_db("feed_bad_type");
    let resp = send(
        get("/feeds/zillow?partnerId=zillow&listingType=yacht"),
        &db,
        &test_config(),
    );
    assert_eq!(resp.status(), 400);
}

#[test]
fn unknown_feed_is_not_found() {
    let db = init_test_db("feed_unknown");
    let resp = send(get("/feeds/craigslist?partnerId=x"), &db, &test_config());
    assert_eq!(resp.status(), 404);
}

#[test]
fn feeds_are_get_only() {
    let db = init_test_db("feed_post");
    let resp = send(
        with_body(Method::POST, "/feeds/zillow?partnerId=zillow", "{}"),
        &db,
        &test_config(),
    );
    assert_eq!(resp.status(), 405);
    assert_eq!(resp.headers()["Allow"], "GET");
}

#[test]
fn matching_etag_returns_not_modified() {
    let db = init_test_db("feed_etag");
    let config = test_config();
    seed_listing(&db, "A-1", ListingStatus::Active);

    let first = send(get("/feeds/zillow?partnerId=zillow"), &db, &config);
    let etag = first.headers()["ETag"].to_str().unwrap().to_string();

    let mut req = get("/feeds/zillow?partnerId=zillow");
    req.headers_mut().insert("If-None-Match", etag.parse().unwrap());
    let second = send(req, &db, &config);
    assert_eq!(second.status(), 304);
    assert_eq!(body_string(second), "");
}

#[test]
fn mhvillage_serves_xml_and_json() {
    let db = init_test_db("feed_mhvillage");
    let config = test_config();
    seed_listing(&db, "A-1", ListingStatus::Active);

    let xml = body_string(send(
        get("/feeds/mhvillage?partnerId=mhv-123"),
        &db,
        &config,
    ));
    assert!(xml.contains("<MHVillageFeed partnerId=\"mhv-123\""));
    assert!(xml.contains("<Home id=\"A-1\">"));

    let resp = send(
        get("/feeds/mhvillage?partnerId=mhv-123&format=json"),
        &db,
        &config,
    );
    assert_eq!(resp.headers()["Content-Type"], "application/json");
    let json = body_json(resp);
    assert_eq!(json["partnerId"], "mhv-123");
    assert_eq!(json["count"], 1);
    assert!(json["listings"][0].get("private").is_none());
}

#[test]
fn zillow_rejects_non_xml_formats() {
    let db = init_test_db("feed_zillow_csv");
    let resp = send(
        get("/feeds/zillow?partnerId=zillow&format=csv"),
        &db,
        &test_config(),
    );
    assert_eq!(resp.status(), 400);
}

#[test]
fn listing_type_narrows_the_feed() {
    let db = init_test_db("feed_listing_type");
    let config = test_config();
    seed_listing(&db, "MH-1", ListingStatus::Active);
    let mut land = publishable_listing("LAND-1");
    land.status = ListingStatus::Active;
    land.listing_type = ListingType::Land;
    save_listing(&db, &land).unwrap();

    let body = body_string(send(
        get("/feeds/zillow?partnerId=zillow&listingType=land"),
        &db,
        &config,
    ));
    assert!(body.contains("LAND-1"));
    assert!(!body.contains("MH-1"));
}

#[test]
fn zillow_feed_skips_listing_types_it_does_not_accept() {
    let db = init_test_db("feed_partner_types");
    let config = test_config();
    let mut rv = publishable_listing("RV-1");
    rv.status = ListingStatus::Active;
    rv.listing_type = ListingType::Rv;
    save_listing(&db, &rv).unwrap();

    let body = body_string(send(get("/feeds/zillow?partnerId=zillow"), &db, &config));
    assert!(!body.contains("RV-1"));
}

#[test]
fn database_failure_is_a_generic_500() {
    let db = Database::new("/nonexistent-dir/for/tests/feeds.sqlite3");
    let resp = send(get("/feeds/zillow?partnerId=zillow"), &db, &test_config());
    assert_eq!(resp.status(), 500);
    assert_eq!(body_string(resp), r#"{"error":"Internal server error"}"#);
}
