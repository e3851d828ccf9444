use crate::db::listings::{get_listing, status_history};
use crate::domain::listing::ListingStatus;
use crate::tests::utils::{
    body_json, body_string, get, init_test_db, seed_listing, send, test_config, with_body,
};
use http::Method;
use serde_json::json;

fn draft_payload(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "companyId": "acme",
        "listingType": "manufactured_home",
        "offerType": "for_sale",
        "status": "draft",
        "title": "2021 Champion Titan",
        "salePrice": 64000
    })
}

#[test]
fn draft_saves_without_gates() {
    let db = init_test_db("listing_save_draft");
    let config = test_config();

    let resp = send(
        with_body(Method::POST, "/listings", &draft_payload("D-1").to_string()),
        &db,
        &config,
    );
    assert_eq!(resp.status(), 201);

    let json = body_json(resp);
    assert_eq!(json["listing"]["id"], "D-1");
    assert_eq!(json["validation"]["canPublish"], false);
    assert!(get_listing(&db, "D-1").unwrap().is_some());
}

#[test]
fn saving_active_with_empty_description_is_blocked() {
    let db = init_test_db("listing_save_active_blocked");
    let mut payload = draft_payload("A-1");
    payload["status"] = json!("active");
    payload["description"] = json!("");

    let resp = send(
        with_body(Method::POST, "/listings", &payload.to_string()),
        &db,
        &test_config(),
    );
    assert_eq!(resp.status(), 422);

    let json = body_json(resp);
    let issues = json["issues"].as_array().unwrap();
    let marketing = issues
        .iter()
        .find(|i| i["id"] == "marketing_content")
        .expect("marketing_content issue");
    assert_eq!(
        marketing["message"],
        "Description must be at least 50 characters"
    );
    assert!(get_listing(&db, "A-1").unwrap().is_none());
}

fn stored_active_payload(id: &str) -> serde_json::Value {
    let mut listing = crate::gates::defaults::tests::publishable_listing(id);
    listing.status = ListingStatus::Active;
    serde_json::to_value(&listing).unwrap()
}

#[test]
fn editing_an_active_listing_into_an_invalid_state_is_blocked() {
    let db = init_test_db("listing_edit_active_blocked");
    let config = test_config();
    seed_listing(&db, "A-1", ListingStatus::Active);

    let mut payload = stored_active_payload("A-1");
    payload["description"] = json!("");
    let resp = send(
        with_body(Method::POST, "/listings", &payload.to_string()),
        &db,
        &config,
    );
    assert_eq!(resp.status(), 422);

    let stored = get_listing(&db, "A-1").unwrap().unwrap();
    assert_eq!(stored.status, ListingStatus::Active);
    assert!(!stored.description.is_empty());
}

#[test]
fn omitted_status_keeps_the_stored_one_and_is_gated() {
    let db = init_test_db("listing_edit_omitted_status");
    let config = test_config();
    seed_listing(&db, "A-1", ListingStatus::Active);

    let mut payload = stored_active_payload("A-1");
    payload.as_object_mut().unwrap().remove("status");
    payload["description"] = json!("");
    let resp = send(
        with_body(Method::POST, "/listings", &payload.to_string()),
        &db,
        &config,
    );
    assert_eq!(resp.status(), 422);
    assert_eq!(
        get_listing(&db, "A-1").unwrap().unwrap().status,
        ListingStatus::Active
    );

    let mut payload = stored_active_payload("A-1");
    payload.as_object_mut().unwrap().remove("status");
    payload["title"] = json!("2019 Clayton Tempo, new roof");
    let resp = send(
        with_body(Method::POST, "/listings", &payload.to_string()),
        &db,
        &config,
    );
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp)["listing"]["status"], "active");

    let stored = get_listing(&db, "A-1").unwrap().unwrap();
    assert_eq!(stored.status, ListingStatus::Active);
    assert!(status_history(&db, "A-1").unwrap().is_empty());
}

#[test]
fn missing_id_is_generated() {
    let db = init_test_db("listing_generated_id");
    let mut payload = draft_payload("");
    payload.as_object_mut().unwrap().remove("id");

    let json = body_json(send(
        with_body(Method::POST, "/listings", &payload.to_string()),
        &db,
        &test_config(),
    ));
    assert!(json["listing"]["id"].as_str().unwrap().starts_with("lst-"));
}

#[test]
fn malformed_body_is_bad_request() {
    let db = init_test_db("listing_bad_json");
    let resp = send(
        with_body(Method::POST, "/listings", "{not json"),
        &db,
        &test_config(),
    );
    assert_eq!(resp.status(), 400);
}

#[test]
fn get_and_delete_listing() {
    let db = init_test_db("listing_get_delete");
    let config = test_config();
    seed_listing(&db, "L-1", ListingStatus::Draft);

    let resp = send(get("/listings/L-1"), &db, &config);
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp)["salePrice"], 89500);

    let del = Method::DELETE;
    assert_eq!(send(with_body(del.clone(), "/listings/L-1", ""), &db, &config).status(), 200);
    assert_eq!(send(with_body(del, "/listings/L-1", ""), &db, &config).status(), 404);
    assert_eq!(send(get("/listings/L-1"), &db, &config).status(), 404);
}

#[test]
fn list_filters_by_query() {
    let db = init_test_db("listing_list");
    let config = test_config();
    seed_listing(&db, "A-1", ListingStatus::Active);
    seed_listing(&db, "D-1", ListingStatus::Draft);

    let json = body_json(send(get("/listings?status=active"), &db, &config));
    assert_eq!(json["count"], 1);
    assert_eq!(json["listings"][0]["id"], "A-1");

    let json = body_json(send(get("/listings?q=TEMPO"), &db, &config));
    assert_eq!(json["count"], 2);

    assert_eq!(send(get("/listings?status=gone"), &db, &config).status(), 400);
}

#[test]
fn status_change_is_gated_and_recorded() {
    let db = init_test_db("listing_status_change");
    let config = test_config();
    seed_listing(&db, "L-1", ListingStatus::Draft);

    let resp = send(
        with_body(Method::POST, "/listings/L-1/status", r#"{"status":"active"}"#),
        &db,
        &config,
    );
    assert_eq!(resp.status(), 200);
    let json = body_json(resp);
    assert_eq!(json["previousStatus"], "draft");
    assert_eq!(json["status"], "active");

    let history = status_history(&db, "L-1").unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].to_status, "active");

    let json = body_json(send(get("/listings/L-1/history"), &db, &config));
    assert_eq!(json[0]["fromStatus"], "draft");
}

#[test]
fn activating_an_incomplete_listing_is_rejected() {
    let db = init_test_db("listing_status_blocked");
    let config = test_config();
    let mut listing = seed_listing(&db, "L-1", ListingStatus::Draft);
    listing.media = Default::default();
    crate::db::listings::save_listing(&db, &listing).unwrap();

    let resp = send(
        with_body(Method::POST, "/listings/L-1/status", r#"{"status":"active"}"#),
        &db,
        &config,
    );
    assert_eq!(resp.status(), 422);
    assert_eq!(
        get_listing(&db, "L-1").unwrap().unwrap().status,
        ListingStatus::Draft
    );
}

#[test]
fn marking_sold_skips_gates() {
    let db = init_test_db("listing_status_sold");
    let config = test_config();
    let mut listing = seed_listing(&db, "L-1", ListingStatus::Active);
    listing.description.clear();
    crate::db::listings::save_listing(&db, &listing).unwrap();

    let resp = send(
        with_body(Method::POST, "/listings/L-1/status", r#"{"status":"sold"}"#),
        &db,
        &config,
    );
    assert_eq!(resp.status(), 200);
}

#[test]
fn unknown_status_is_bad_request() {
    let db = init_test_db("listing_status_unknown");
    let config = test_config();
    seed_listing(&db, "L-1", ListingStatus::Draft);

    let resp = send(
        with_body(Method::POST, "/listings/L-1/status", r#"{"status":"archived"}"#),
        &db,
        &config,
    );
    assert_eq!(resp.status(), 400);
}

#[test]
fn validation_report_with_partner_gates() {
    let db = init_test_db("listing_validation");
    let config = test_config();
    let mut listing = seed_listing(&db, "L-1", ListingStatus::Draft);
    listing.width = None;
    listing.length = None;
    crate::db::listings::save_listing(&db, &listing).unwrap();

    let json = body_json(send(get("/listings/L-1/validation"), &db, &config));
    assert_eq!(json["canPublish"], true);

    let json = body_json(send(
        get("/listings/L-1/validation?partnerId=mhvillage"),
        &db,
        &config,
    ));
    assert_eq!(json["canPublish"], false);
    let ids: Vec<&str> = json["requiredIssues"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|i| i["id"].as_str())
        .collect();
    assert!(ids.contains(&"partner_dimensions"));

    let resp = send(get("/listings/L-1/validation?partnerId=nope"), &db, &config);
    assert_eq!(resp.status(), 404);
}

#[test]
fn wrong_method_on_listing_routes() {
    let db = init_test_db("listing_wrong_method");
    let resp = send(
        with_body(Method::PUT, "/listings/L-1", "{}"),
        &db,
        &test_config(),
    );
    assert_eq!(resp.status(), 405);
    assert_eq!(resp.headers()["Allow"], "GET, DELETE");
    assert!(body_string(resp).contains("Method not allowed"));

    let resp = send(get("/listings/L-1/status"), &db, &test_config());
    assert_eq!(resp.headers()["Allow"], "POST");

    let resp = send(
        with_body(Method::PUT, "/listings", "{}"),
        &db,
        &test_config(),
    );
    assert_eq!(resp.headers()["Allow"], "GET, POST");
}

#[test]
fn oversized_body_is_rejected_not_truncated() {
    let db = init_test_db("listing_oversized_body");
    let padding = "x".repeat(1_100_000);
    let payload = json!({ "id": "BIG-1", "description": padding }).to_string();

    let resp = send(
        with_body(Method::POST, "/listings", &payload),
        &db,
        &test_config(),
    );
    assert_eq!(resp.status(), 413);
    assert_eq!(body_json(resp)["error"], "Request body too large");
    assert!(get_listing(&db, "BIG-1").unwrap().is_none());
}
