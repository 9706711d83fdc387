//! End-to-end checks through the router: routing, status codes, auth
//! gating, and the JSON error bodies clients rely on.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt;

use bluewater_backend::auth::{JwtConfig, JwtService};
use bluewater_backend::rest::{app, AppState};
use bluewater_backend::storage::{JsonConnection, Store};

fn test_app() -> (Router, TempDir) {
    let dir = TempDir::new().expect("temp dir");
    let conn = JsonConnection::new(dir.path()).expect("connection");
    let store = Store::open(&conn).expect("store");
    let jwt = JwtService::new(&JwtConfig {
        secret: "integration-test-secret".to_string(),
        expires_hours: 1,
    });
    let state = AppState::new(store, jwt);
    state.accounts.seed_if_empty().expect("seed");
    (app(state), dir)
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn login(router: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_answers_ok() {
    let (router, _dir) = test_app();
    let (status, body) = send(&router, Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn unknown_api_paths_return_json_not_found() {
    let (router, _dir) = test_app();
    let (status, body) = send(&router, Method::GET, "/api/no-such-thing", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Not Found" }));
}

#[tokio::test]
async fn login_and_me_round_trip() {
    let (router, _dir) = test_app();
    let token = login(&router, "admin@example.com", "password").await;

    let (status, body) = send(&router, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "admin@example.com");
    assert_eq!(body["role"], "admin");
    assert!(body.get("passwordHash").is_none());

    let (status, body) = send(&router, Method::GET, "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "missing_token" }));

    let (status, _) = send(&router, Method::GET, "/api/auth/me", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bad_credentials_are_rejected() {
    let (router, _dir) = test_app();
    let (status, body) = send(
        &router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "admin@example.com", "password": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "invalid_credentials" }));
}

#[tokio::test]
async fn user_management_is_role_gated() {
    let (router, _dir) = test_app();

    let (status, _) = send(&router, Method::GET, "/api/auth/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "name": "Desk", "email": "desk@example.com", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let staff_token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(&router, Method::GET, "/api/auth/users", Some(&staff_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN, "{body}");

    let admin_token = login(&router, "admin@example.com", "password").await;
    let (status, body) = send(&router, Method::GET, "/api/auth/users", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn appointment_start_is_idempotent_over_http() {
    let (router, _dir) = test_app();
    let (status, appt) = send(
        &router,
        Method::POST,
        "/api/appointments",
        None,
        Some(json!({ "customerName": "Sara", "room": "R1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(appt["status"], "Booked");
    let id = appt["id"].as_u64().unwrap();

    let uri = format!("/api/appointments/{id}/start");
    let (status, first) = send(&router, Method::POST, &uri, None, None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["status"], "running");

    let (status, second) = send(&router, Method::POST, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["id"], second["id"]);

    let (_, appts) = send(&router, Method::GET, "/api/appointments", None, None).await;
    assert_eq!(appts[0]["status"], "In-Progress");
}

#[tokio::test]
async fn complete_and_extend_work_without_a_request_body() {
    let (router, _dir) = test_app();
    let (_, appt) = send(
        &router,
        Method::POST,
        "/api/appointments",
        None,
        Some(json!({ "customerName": "Sara" })),
    )
    .await;
    let uri = format!("/api/appointments/{}/start", appt["id"]);
    let (_, session) = send(&router, Method::POST, &uri, None, None).await;
    let sid = session["id"].as_u64().unwrap();

    let (status, extended) = send(
        &router,
        Method::POST,
        &format!("/api/sessions/{sid}/extend"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{extended}");
    assert!(extended["endAt"].is_string());

    let (status, done) = send(
        &router,
        Method::POST,
        &format!("/api/sessions/{sid}/complete"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{done}");
    assert_eq!(done["status"], "completed");
    assert!(done["rateLink"].as_str().unwrap().contains("/rate?"));
}

#[tokio::test]
async fn invoice_totals_flow_through_the_api() {
    let (router, _dir) = test_app();
    let (status, inv) = send(
        &router,
        Method::POST,
        "/api/invoices",
        None,
        Some(json!({
            "customerName": "Walk-in",
            "items": [{ "qty": 2, "price": 50 }],
            "discount": 10,
            "taxRate": 5
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(inv["subtotal"], 100.0);
    assert_eq!(inv["tax"], 4.5);
    assert_eq!(inv["total"], 94.5);
    assert_eq!(inv["currency"], "AED");

    let (status, body) = send(&router, Method::POST, "/api/invoices", None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "customerId or customerName is required");

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/invoices/from-appointment",
        None,
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "appointmentId is required");
}

#[tokio::test]
async fn settings_put_and_patch_both_merge() {
    let (router, _dir) = test_app();
    let (status, _) = send(
        &router,
        Method::PUT,
        "/api/settings",
        None,
        Some(json!({ "businessName": "Bluewater Spa" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &router,
        Method::PATCH,
        "/api/settings",
        None,
        Some(json!({ "defaultPrintMode": "A4" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["businessName"], "Bluewater Spa");
    assert_eq!(body["defaultPrintMode"], "a4");

    let (status, body) = send(
        &router,
        Method::PATCH,
        "/api/settings",
        None,
        Some(json!({ "defaultTaxRate": -5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "defaultTaxRate must be >= 0");
}
