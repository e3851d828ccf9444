use crate::domain::listing::ListingStatus;
use crate::tests::utils::{
    body_json, body_string, get, init_test_db, seed_listing, send, test_config, with_body,
};
use http::Method;

#[test]
fn og_image_returns_card() {
    let db = init_test_db("og_image_card");
    let config = test_config();
    seed_listing(&db, "L-1", ListingStatus::Active);

    let resp = send(get("/og-image?listingId=L-1"), &db, &config);
    assert_eq!(resp.status(), 200);

    let json = body_json(resp);
    assert_eq!(json["title"], "2019 Clayton Tempo 16x76");
    assert_eq!(json["image"], "https://cdn.example.com/l/1.jpg");
    assert_eq!(json["url"], "https://feeds.acme.example/listings/L-1/share");
}

#[test]
fn og_image_url_is_followable_for_odd_ids() {
    let db = init_test_db("og_image_odd_id");
    let config = test_config();
    seed_listing(&db, "a b?x=1#y", ListingStatus::Active);

    let json = body_json(send(
        get("/og-image?listingId=a%20b%3Fx%3D1%23y"),
        &db,
        &config,
    ));
    assert_eq!(
        json["url"],
        "https://feeds.acme.example/listings/a%20b%3Fx=1%23y/share"
    );
}

#[test]
fn og_image_errors() {
    let db = init_test_db("og_image_errors");
    let config = test_config();

    assert_eq!(send(get("/og-image"), &db, &config).status(), 400);
    assert_eq!(send(get("/og-image?listingId=missing"), &db, &config).status(), 404);
    assert_eq!(
        send(with_body(Method::POST, "/og-image?listingId=x", ""), &db, &config).status(),
        405
    );
}

#[test]
fn share_page_carries_open_graph_tags() {
    let db = init_test_db("share_page");
    let config = test_config();
    seed_listing(&db, "L-1", ListingStatus::Active);

    let resp = send(get("/listings/L-1/share"), &db, &config);
    assert_eq!(resp.status(), 200);
    let html = body_string(resp);
    assert!(html.contains(r#"property="og:image" content="https://cdn.example.com/l/1.jpg""#));
    assert!(html.contains("2019 Clayton Tempo 16x76"));
}

#[test]
fn home_lists_partner_feeds() {
    let db = init_test_db("home_page");
    let config = test_config();
    seed_listing(&db, "L-1", ListingStatus::Active);

    let html = body_string(send(get("/"), &db, &config));
    assert!(html.contains("Syndication feeds"));
    assert!(html.contains("https://feeds.acme.example/feeds/zillow?partnerId=zillow"));
}

#[test]
fn partner_endpoints() {
    let db = init_test_db("partner_endpoints");
    let config = test_config();

    let json = body_json(send(get("/partners"), &db, &config));
    assert_eq!(json[0]["id"], "zillow");
    assert!(json[0]["exportUrl"]
        .as_str()
        .unwrap()
        .starts_with("https://feeds.acme.example/feeds/zillow?"));

    let json = body_json(send(get("/partners/MHVillage/export-url"), &db, &config));
    assert!(json["url"].as_str().unwrap().contains("/feeds/mhvillage?partnerId=mhvillage"));

    assert_eq!(send(get("/partners/none/export-url"), &db, &config).status(), 404);
}

#[test]
fn unknown_path_is_not_found() {
    let db = init_test_db("unknown_path");
    assert_eq!(send(get("/nowhere"), &db, &test_config()).status(), 404);
}
