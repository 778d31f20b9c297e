use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use seatline_api::{app, AppState};
use seatline_catalog::RouteTable;
use seatline_core::{Capability, RoleEntry, RoleTable, TokenIssuer};
use seatline_order::AllocationEngine;
use seatline_shared::Route;
use serde_json::{json, Value};
use tower::ServiceExt;

const SECRET: &str = "integration-secret";

fn test_app() -> Router {
    let table = RouteTable::new(
        vec![Route::new("London", "Paris", 20), Route::new("Osaka", "London", 200)],
        vec!["A".to_string(), "B".to_string()],
        5,
    )
    .unwrap();
    let roles = RoleTable::new(vec![
        RoleEntry {
            email: "a@a.com".into(),
            caps: vec![Capability::Admin, Capability::Read, Capability::Write],
        },
        RoleEntry {
            email: "b@b.com".into(),
            caps: vec![Capability::Read],
        },
        RoleEntry {
            email: "c@c.com".into(),
            caps: vec![Capability::Write],
        },
    ]);

    let engine = AllocationEngine::with_rng(table, StdRng::seed_from_u64(7));
    let tokens = TokenIssuer::new(SECRET, 3600, roles);
    app(AppState::new(engine, tokens, Duration::from_secs(5)))
}

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn token_for(app: &Router, email: &str) -> String {
    let (status, body) = send(app, Method::POST, "/v1/auth/token", None, Some(json!({ "email": email }))).await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();
    assert!(token.starts_with("Bearer "));
    token
}

fn purchase_body(email: &str, price: u32) -> Value {
    json!({
        "user": { "first_name": "Alice", "last_name": "Cooper", "email": email },
        "from": "London",
        "to": "Paris",
        "price": price,
    })
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_list_routes_is_public() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/v1/routes", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["routes"][0], json!({ "from": "London", "to": "Paris", "price": 20 }));
    assert_eq!(body["routes"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_purchase_requires_token() {
    let app = test_app();
    let (status, body) = send(&app, Method::POST, "/v1/tickets", None, Some(purchase_body("user1@example.com", 20))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = send(
        &app,
        Method::POST,
        "/v1/tickets",
        Some("Bearer not-a-jwt"),
        Some(purchase_body("user1@example.com", 20)),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_underpaid_purchase() {
    let app = test_app();
    let admin = token_for(&app, "a@a.com").await;

    let (status, body) = send(&app, Method::POST, "/v1/tickets", Some(&admin), Some(purchase_body("user1@example.com", 10))).await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert!(body["error"].as_str().unwrap().contains("you must pay more money"));

    let (status, _) = send(&app, Method::GET, "/v1/tickets/user1@example.com", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ticket_lifecycle() {
    let app = test_app();
    let admin = token_for(&app, "a@a.com").await;
    let reader = token_for(&app, "b@b.com").await;

    let (status, ticket) = send(&app, Method::POST, "/v1/tickets", Some(&admin), Some(purchase_body("user1@example.com", 20))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ticket["message"], "Ticket purchased successfully");
    assert_eq!(ticket["route"], 0);
    let section = ticket["section"].as_str().unwrap().to_string();
    let seat = ticket["seat"].as_u64().unwrap();

    let (status, _) = send(&app, Method::POST, "/v1/tickets", Some(&admin), Some(purchase_body("user1@example.com", 20))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, receipt) = send(&app, Method::GET, "/v1/tickets/user1@example.com", Some(&reader), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(receipt["price"], 20);
    assert_eq!(receipt["to"], "Paris");
    assert_eq!(receipt["ticket_id"], ticket["ticket_id"]);

    let uri = format!("/v1/routes/{}/sections/{}/seats", ticket["route"], section);
    let (status, listing) = send(&app, Method::GET, &uri, Some(&reader), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["seats"][0]["seat"].as_u64(), Some(seat));
    assert_eq!(listing["seats"][0]["user"]["email"], "user1@example.com");

    let new_seat = (seat + 1) % 5;
    let (status, body) = send(
        &app,
        Method::PUT,
        "/v1/tickets/user1@example.com/seat",
        Some(&admin),
        Some(json!({ "seat": new_seat })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Seat modified successfully");

    let (status, body) = send(&app, Method::DELETE, "/v1/tickets/user1@example.com", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User removed successfully");
    assert_eq!(body["route"], 0);
    assert_eq!(body["seat"].as_u64(), Some(new_seat));
    assert_eq!(body["section"], section.as_str());

    let (status, _) = send(&app, Method::DELETE, "/v1/tickets/user1@example.com", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reader_cannot_modify_others() {
    let app = test_app();
    let admin = token_for(&app, "a@a.com").await;
    let reader = token_for(&app, "b@b.com").await;

    let (status, _) = send(&app, Method::POST, "/v1/tickets", Some(&admin), Some(purchase_body("user1@example.com", 20))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::DELETE, "/v1/tickets/user1@example.com", Some(&reader), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/v1/tickets/user1@example.com/seat",
        Some(&reader),
        Some(json!({ "seat": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::POST, "/v1/tickets", Some(&reader), Some(purchase_body("user2@example.com", 20))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_writer_cannot_list_sections() {
    let app = test_app();
    let writer = token_for(&app, "c@c.com").await;

    let (status, _) = send(&app, Method::GET, "/v1/routes/0/sections/A/seats", Some(&writer), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_listing_unknown_section() {
    let app = test_app();
    let reader = token_for(&app, "b@b.com").await;

    let (status, _) = send(&app, Method::GET, "/v1/routes/0/sections/Z/seats", Some(&reader), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::GET, "/v1/routes/9/sections/A/seats", Some(&reader), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_relocate_out_of_range() {
    let app = test_app();
    let admin = token_for(&app, "a@a.com").await;

    send(&app, Method::POST, "/v1/tickets", Some(&admin), Some(purchase_body("user1@example.com", 20))).await;
    let (status, _) = send(
        &app,
        Method::PUT,
        "/v1/tickets/user1@example.com/seat",
        Some(&admin),
        Some(json!({ "seat": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
