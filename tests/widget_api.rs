//! Integration tests for the widget REST API
//!
//! These tests drive the router the way the storefront does: mount a
//! session, toggle garments, navigate the deck and hand bundles to a bag.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt; // for `oneshot`

use shop_the_look_rust::config::ShopConfig;
use shop_the_look_rust::look::AppState;
use shop_the_look_rust::router::create_app_router;

fn create_app(config: ShopConfig) -> axum::Router {
    let state = Arc::new(AppState::new(config).expect("valid catalog"));
    create_app_router(state)
}

/// Test app with the timer switched off
fn create_test_app() -> axum::Router {
    create_app(ShopConfig {
        auto_advance: None,
        ..ShopConfig::default()
    })
}

/// Helper function to send a request and get the response (REST API)
async fn send_rest_request(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(json!({}));

    (status, body)
}

async fn mount(app: &axum::Router) -> String {
    let (status, body) = send_rest_request(app, "POST", "/looks/sessions", Some(json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["sessionId"].as_str().unwrap().to_string()
}

async fn toggle(app: &axum::Router, session_id: &str, item_id: &str) -> Value {
    let uri = format!("/looks/sessions/{session_id}/toggle");
    let (status, body) =
        send_rest_request(app, "POST", &uri, Some(json!({ "itemId": item_id }))).await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn test_rest_list_looks() {
    let app = create_test_app();

    let (status, body) = send_rest_request(&app, "GET", "/looks", None).await;

    assert_eq!(status, StatusCode::OK);
    let looks = body.as_array().unwrap();
    assert_eq!(looks.len(), 3);
    assert_eq!(looks[0]["displayName"], "Boy Look");
    assert_eq!(looks[2]["items"][1]["unitPrice"], 65.0);
}

#[tokio::test]
async fn test_rest_mount_starts_fully_selected() {
    let app = create_test_app();
    let id = mount(&app).await;

    let (status, view) = send_rest_request(&app, "GET", &format!("/looks/sessions/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["phase"], "idle");
    assert_eq!(view["lookId"], "boy");
    assert!(view["items"]
        .as_array()
        .unwrap()
        .iter()
        .all(|i| i["selected"] == true));
    assert_eq!(view["prices"]["subtotal"], "£82.00");
    assert_eq!(view["prices"]["savings"], "Save £8.20");
    assert_eq!(view["selectionIndicator"], "checkmark");
    assert!(view.get("positionHint").is_none());

    let front = &view["cards"][0]["transform"];
    assert_eq!(front["zIndex"], 3);
    assert_eq!(front["opacity"], 1.0);
    assert_eq!(front["interactive"], true);
    assert_eq!(view["cards"][2]["transform"]["zIndex"], 1);
}

#[tokio::test]
async fn test_rest_mount_without_body() {
    let app = create_test_app();

    let (status, view) = send_rest_request(&app, "POST", "/looks/sessions", None).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(view["lookId"], "boy");
    assert!(view.get("positionHint").is_none());
}

#[tokio::test]
async fn test_rest_boy_look_pricing_walkthrough() {
    let app = create_test_app();
    let id = mount(&app).await;

    let view = toggle(&app, &id, "boy-3").await;
    assert_eq!(view["prices"]["finalTotal"], "£66.50");
    assert_eq!(view["prices"]["savings"], "Save £3.50");

    let view = toggle(&app, &id, "boy-2").await;
    assert_eq!(view["prices"]["finalTotal"], "£42.00");
    assert_eq!(view["prices"]["savings"], Value::Null);
    assert_eq!(
        view["summary"]["incentiveMessage"],
        "Add one more item to unlock a 5% bundle discount"
    );

    let view = toggle(&app, &id, "boy-1").await;
    assert_eq!(view["prices"]["finalTotal"], "£0.00");
    assert_eq!(view["canAddBundle"], false);
    assert_eq!(
        view["summary"]["incentiveMessage"],
        "Curate your look to unlock up to 10% discount"
    );

    // foreign ids are ignored
    let view = toggle(&app, &id, "girl-1").await;
    assert_eq!(view["summary"]["selectedCount"], 0);
}

#[tokio::test]
async fn test_rest_navigation_resets_selection() {
    let app = create_test_app();
    let id = mount(&app).await;
    toggle(&app, &id, "boy-1").await;

    let (_, view) =
        send_rest_request(&app, "POST", &format!("/looks/sessions/{id}/advance"), None).await;
    assert_eq!(view["lookId"], "girl");
    assert_eq!(view["summary"]["selectedCount"], 3);

    let (_, view) =
        send_rest_request(&app, "POST", &format!("/looks/sessions/{id}/retreat"), None).await;
    assert_eq!(view["lookId"], "boy");
    assert_eq!(view["summary"]["selectedCount"], 3);
}

#[tokio::test]
async fn test_rest_drag_gestures() {
    let app = create_test_app();
    let id = mount(&app).await;
    let start = format!("/looks/sessions/{id}/drag/start");
    let end = format!("/looks/sessions/{id}/drag/end");

    // background card cannot be grabbed
    let (status, body) = send_rest_request(&app, "POST", &start, Some(json!({ "cardIndex": 2 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("cannot be dragged"));

    let (status, view) = send_rest_request(&app, "POST", &start, Some(json!({ "cardIndex": 0 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["phase"], "dragging");

    let (_, body) = send_rest_request(
        &app,
        "POST",
        &end,
        Some(json!({ "offsetX": -30.0, "velocityX": -50.0 })),
    )
    .await;
    assert_eq!(body["outcome"], "snapBack");
    assert_eq!(body["view"]["activeIndex"], 0);

    send_rest_request(&app, "POST", &start, Some(json!({ "cardIndex": 0 }))).await;
    let (_, body) = send_rest_request(
        &app,
        "POST",
        &end,
        Some(json!({ "offsetX": -80.0, "velocityX": -10.0 })),
    )
    .await;
    assert_eq!(body["outcome"], "forward");
    assert_eq!(body["view"]["activeIndex"], 1);
    assert_eq!(body["view"]["phase"], "idle");
}

#[tokio::test]
async fn test_rest_add_bundle_and_read_bag() {
    let app = create_test_app();
    let id = mount(&app).await;
    toggle(&app, &id, "boy-3").await;

    let uri = format!("/looks/sessions/{id}/bundle");
    let (status, body) = send_rest_request(&app, "POST", &uri, Some(json!({ "bagId": "bag-7" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order"]["summary"]["discountPercent"], 5);
    assert_eq!(body["bag"]["bagId"], "bag-7");

    let (status, bag) = send_rest_request(&app, "GET", "/bag/bag-7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bag["summary"], "1x Cozy Knit Cardigan, 1x Comfort Fit Trousers");
    assert_eq!(bag["total"], "£66.50");
}

#[tokio::test]
async fn test_rest_bag_total_matches_bundles_at_different_tiers() {
    let app = create_test_app();
    let id = mount(&app).await;
    let uri = format!("/looks/sessions/{id}/bundle");

    let (_, first) = send_rest_request(&app, "POST", &uri, Some(json!({ "bagId": "bag-9" }))).await;
    assert_eq!(first["order"]["summary"]["discountPercent"], 10);

    toggle(&app, &id, "boy-3").await;
    let (_, second) = send_rest_request(&app, "POST", &uri, Some(json!({ "bagId": "bag-9" }))).await;
    assert_eq!(second["order"]["summary"]["discountPercent"], 5);

    let (_, bag) = send_rest_request(&app, "GET", "/bag/bag-9", None).await;
    // 73.80 at 10% plus 66.50 at 5%
    assert_eq!(bag["total"], "£140.30");
    assert_eq!(bag["lines"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_rest_empty_bundle_is_rejected() {
    let app = create_test_app();
    let id = mount(&app).await;
    for item in ["boy-1", "boy-2", "boy-3"] {
        toggle(&app, &id, item).await;
    }

    let uri = format!("/looks/sessions/{id}/bundle");
    let (status, body) = send_rest_request(&app, "POST", &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Bundle is empty, select at least one item");
}

#[tokio::test]
async fn test_rest_unknown_bag_reads_empty() {
    let app = create_test_app();

    let (status, bag) = send_rest_request(&app, "GET", "/bag/nothing-here", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(bag["lines"], json!([]));
    assert_eq!(bag["total"], "£0.00");
}

#[tokio::test]
async fn test_rest_unmount() {
    let app = create_test_app();
    let id = mount(&app).await;
    let uri = format!("/looks/sessions/{id}");

    let (status, _) = send_rest_request(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send_rest_request(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("Session not found"));
}

#[tokio::test]
async fn test_rest_small_screen_and_currency() {
    let app = create_app(ShopConfig {
        auto_advance: None,
        currency: shop_the_look_rust::look::models::Currency::Eur,
        ..ShopConfig::default()
    });

    let (_, view) = send_rest_request(
        &app,
        "POST",
        "/looks/sessions",
        Some(json!({ "smallScreen": true })),
    )
    .await;

    assert_eq!(view["positionHint"], "1 / 3");
    assert_eq!(view["items"][0]["price"], "€49.14");
}

#[tokio::test(start_paused = true)]
async fn test_rest_auto_advance_pauses_on_hover() {
    let app = create_app(ShopConfig::default());
    let id = mount(&app).await;
    let uri = format!("/looks/sessions/{id}");
    let pointer = format!("/looks/sessions/{id}/pointer");

    tokio::time::sleep(Duration::from_millis(3100)).await;
    let (_, view) = send_rest_request(&app, "GET", &uri, None).await;
    assert_eq!(view["activeIndex"], 1);

    let (_, view) = send_rest_request(&app, "POST", &pointer, Some(json!({ "inside": true }))).await;
    assert_eq!(view["phase"], "paused");

    tokio::time::sleep(Duration::from_secs(9)).await;
    let (_, view) = send_rest_request(&app, "GET", &uri, None).await;
    assert_eq!(view["activeIndex"], 1);

    send_rest_request(&app, "POST", &pointer, Some(json!({ "inside": false }))).await;
    tokio::time::sleep(Duration::from_millis(3100)).await;
    let (_, view) = send_rest_request(&app, "GET", &uri, None).await;
    assert_eq!(view["activeIndex"], 2);
    assert_eq!(view["lookId"], "newborn");
}
