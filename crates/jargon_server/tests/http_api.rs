use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use jargon_core::db::open_db_in_memory;
use jargon_server::{app, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app(base_path: &str) -> Router {
    let conn = open_db_in_memory().unwrap();
    app(AppState::new(conn), base_path)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
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

fn create_body(id: &str, label: &str) -> Value {
    json!({
        "id": id,
        "term": label,
        "definition": "",
        "dateAdded": "2024-01-01T00:00:00Z",
        "initialThoughts": "x",
    })
}

#[tokio::test]
async fn empty_store_lists_empty_array() {
    let app = test_app("");
    let (status, body) = send(&app, Method::GET, "/terms", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_then_list_returns_stored_record() {
    let app = test_app("");

    let (status, body) = send(&app, Method::POST, "/terms", Some(create_body("a1", "Idempotent"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, body) = send(&app, Method::GET, "/terms", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "id": "a1",
            "term": "Idempotent",
            "definition": "",
            "understood": false,
            "dateAdded": "2024-01-01T00:00:00Z",
            "initialThoughts": "x",
        }])
    );
}

#[tokio::test]
async fn create_ignores_understood_in_payload() {
    let app = test_app("");
    let mut body = create_body("a1", "Eager");
    body["understood"] = json!(true);
    body["dateUnderstood"] = json!("2024-01-02T00:00:00Z");

    let (status, _) = send(&app, Method::POST, "/terms", Some(body)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed) = send(&app, Method::GET, "/terms", None).await;
    assert_eq!(listed[0]["understood"], json!(false));
    assert!(listed[0].get("dateUnderstood").is_none());
}

#[tokio::test]
async fn update_rewrites_content_only() {
    let app = test_app("");
    send(&app, Method::POST, "/terms", Some(create_body("a1", "Idempotent"))).await;
    send(
        &app,
        Method::PUT,
        "/terms/a1/toggle",
        Some(json!({ "understood": true, "dateUnderstood": "2024-02-01T00:00:00Z" })),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/terms/a1",
        Some(json!({
            "term": "Idempotence",
            "definition": "Same result when repeated",
            "notes": "see HTTP PUT",
            "eli5": "Pressing the button twice is fine",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (_, listed) = send(&app, Method::GET, "/terms", None).await;
    let term = &listed[0];
    assert_eq!(term["term"], json!("Idempotence"));
    assert_eq!(term["notes"], json!("see HTTP PUT"));
    assert_eq!(term["eli5"], json!("Pressing the button twice is fine"));
    assert_eq!(term["understood"], json!(true));
    assert_eq!(term["dateUnderstood"], json!("2024-02-01T00:00:00Z"));
    assert_eq!(term["dateAdded"], json!("2024-01-01T00:00:00Z"));
    assert_eq!(term["initialThoughts"], json!("x"));
}

#[tokio::test]
async fn toggle_on_then_off_clears_timestamp() {
    let app = test_app("");
    send(&app, Method::POST, "/terms", Some(create_body("a1", "Monad"))).await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/terms/a1/toggle",
        Some(json!({ "understood": true, "dateUnderstood": "2024-02-01T00:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, listed) = send(&app, Method::GET, "/terms", None).await;
    assert_eq!(listed[0]["understood"], json!(true));

    let (status, _) = send(
        &app,
        Method::PUT,
        "/terms/a1/toggle",
        Some(json!({ "understood": false, "dateUnderstood": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, listed) = send(&app, Method::GET, "/terms", None).await;
    assert_eq!(listed[0]["understood"], json!(false));
    assert!(listed[0].get("dateUnderstood").is_none());
}

#[tokio::test]
async fn unpaired_toggle_is_rejected() {
    let app = test_app("");
    send(&app, Method::POST, "/terms", Some(create_body("a1", "Monad"))).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/terms/a1/toggle",
        Some(json!({ "understood": true })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());

    let (_, listed) = send(&app, Method::GET, "/terms", None).await;
    assert_eq!(listed[0]["understood"], json!(false));
}

#[tokio::test]
async fn delete_is_idempotent() {
    let app = test_app("");
    send(&app, Method::POST, "/terms", Some(create_body("a1", "Monad"))).await;
    send(&app, Method::POST, "/terms", Some(create_body("b2", "Functor"))).await;

    let (status, body) = send(&app, Method::DELETE, "/terms/a1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, body) = send(&app, Method::DELETE, "/terms/a1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (_, listed) = send(&app, Method::GET, "/terms", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], json!("b2"));
}

#[tokio::test]
async fn update_of_missing_term_reports_error_body() {
    let app = test_app("");
    let (status, body) = send(
        &app,
        Method::PUT,
        "/terms/missing",
        Some(json!({ "term": "Ghost", "definition": null, "notes": null, "eli5": null })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("missing"));
}

#[tokio::test]
async fn duplicate_id_is_rejected() {
    let app = test_app("");
    let (status, _) = send(&app, Method::POST, "/terms", Some(create_body("a1", "First"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::POST, "/terms", Some(create_body("a1", "Second"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());

    let (_, listed) = send(&app, Method::GET, "/terms", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["term"], json!("First"));
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = test_app("");
    let request = Request::builder()
        .method(Method::POST)
        .uri("/terms")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn record_with_missing_or_null_fields_is_rejected_as_store_failure() {
    let app = test_app("");

    let mut null_label = create_body("a1", "placeholder");
    null_label["term"] = Value::Null;
    let (status, body) = send(&app, Method::POST, "/terms", Some(null_label)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());

    let (status, body) = send(
        &app,
        Method::POST,
        "/terms",
        Some(json!({ "term": "No id or date" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());

    let (_, listed) = send(&app, Method::GET, "/terms", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn routes_are_mounted_under_base_path() {
    let app = test_app("/api");

    let (status, body) = send(&app, Method::GET, "/api/terms", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, _) = send(&app, Method::GET, "/terms", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
