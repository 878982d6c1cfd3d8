//! `HttpApi` against an in-process axum backend.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use booster_client::http::DEFAULT_TIMEOUT;
use booster_client::{Action, BoosterApi, Dashboard, HttpApi};
use booster_core::validation::report_range;
use booster_core::{ChatId, FileSessionStore, GroupId};
use serde_json::{Value, json};

use crate::common::spawn_backend;

type Params = Query<HashMap<String, String>>;

fn chat(params: &Params) -> &str {
    params.get("chatId").map(String::as_str).unwrap_or("")
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    match body["chatId"].as_str() {
        Some("42") => (
            StatusCode::OK,
            Json(json!({
                "message": "Login successful",
                "user": {"_id": "u42", "chatId": "42", "activeWalletGroupId": "g1"}
            })),
        ),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "User not found"})),
        ),
    }
}

async fn active_group(params: Params) -> impl IntoResponse {
    if chat(&params) == "42" {
        (
            StatusCode::OK,
            Json(json!({"_id": "g1", "name": "alpha", "isActive": true, "wallets": [
                {"address": "0xa"}, {"address": "0xb", "privateKey": "0xkey"}
            ]})),
        )
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "No active wallet group"})),
        )
    }
}

async fn view_group(Path(id): Path<String>, params: Params) -> Json<Value> {
    Json(json!({"_id": id, "name": format!("group of {}", chat(&params)), "wallets": []}))
}

async fn active_token() -> Json<Value> {
    Json(Value::Null)
}

async fn tokens(headers: HeaderMap) -> impl IntoResponse {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some("Bearer tok-1");
    if authorized {
        (StatusCode::OK, Json(json!([{"_id": "t1", "name": "Booster", "symbol": "BST", "address": "0xt"}])))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"message": "Unauthorized"})))
    }
}

async fn distribute(Json(body): Json<Value>) -> StatusCode {
    if body["amount"] == "0.25" {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    }
}

async fn burn() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn usage_report(Json(body): Json<Value>) -> impl IntoResponse {
    let ok = body == json!({"chatId": "42", "fromDate": "2024-03-01", "toDate": "2024-03-31", "userID": "u42"});
    if ok {
        ([(header::CONTENT_TYPE, "application/pdf")], b"%PDF-1.4".to_vec()).into_response()
    } else {
        (StatusCode::BAD_REQUEST, Json(json!({"error": "bad report request"}))).into_response()
    }
}

fn backend() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/wallet-groups/active", get(active_group))
        .route("/view-wallet-group/{id}", get(view_group))
        .route("/tokens", get(tokens))
        .route("/tokens/active", get(active_token))
        .route("/distribute", post(distribute))
        .route("/burn", post(burn))
        .route("/usage-report", post(usage_report))
}

async fn api() -> HttpApi {
    let base = spawn_backend(backend()).await;
    HttpApi::new(&base, DEFAULT_TIMEOUT).unwrap()
}

#[tokio::test]
async fn test_active_group_and_missing_group() {
    let api = api().await;
    let group = api
        .active_wallet_group(&ChatId::new("42"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(group.name, "alpha");
    assert_eq!(group.wallets[0].private_key_display(), "Hidden");
    assert_eq!(group.wallets[1].private_key_display(), "0xkey");

    assert!(api.active_wallet_group(&ChatId::new("7")).await.unwrap().is_none());
    assert!(api.active_token(&ChatId::new("42")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_view_group_path_and_query() {
    let api = api().await;
    let group = api
        .view_wallet_group(&ChatId::new("42"), Some(&GroupId::new("g 9")))
        .await
        .unwrap();
    assert_eq!(group.id, Some(GroupId::new("g 9")));
    assert_eq!(group.name, "group of 42");
}

#[tokio::test]
async fn test_error_body_becomes_alert() {
    let api = api().await;
    let err = api
        .login(&booster_client::wire::LoginRequest::ChatId {
            chat_id: "nobody".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, booster_client::Error::Http { status: 404, .. }));
    assert_eq!(err.alert(Action::Login), "Login failed: User not found");
}

#[tokio::test]
async fn test_non_json_error_falls_back() {
    let api = api().await;
    let err = api.burn(&ChatId::new("42"), 1.0).await.unwrap_err();
    assert_eq!(err.server_message(), None);
    assert_eq!(err.alert(Action::Burn), Action::Burn.fallback());
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let base = spawn_backend(backend()).await;
    let anonymous = HttpApi::new(&base, DEFAULT_TIMEOUT).unwrap();
    assert!(anonymous.tokens(&ChatId::new("42")).await.is_err());

    let authorized = anonymous.with_bearer(Some("tok-1".into()));
    let tokens = authorized.tokens(&ChatId::new("42")).await.unwrap();
    assert_eq!(tokens[0].label(), "BST (Booster)");
}

#[tokio::test]
async fn test_empty_ack_body() {
    let api = api().await;
    let ack = api.distribute(&ChatId::new("42"), "0.25").await.unwrap();
    assert!(ack.message.is_none());
}

#[tokio::test]
async fn test_usage_report_bytes() {
    let api = api().await;
    let range = report_range(Some("2024-03-01"), Some("2024-03-31")).unwrap();
    let pdf = api.usage_report(&ChatId::new("42"), &range, "u42").await.unwrap();
    assert_eq!(pdf, b"%PDF-1.4");
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let api = HttpApi::new("http://127.0.0.1:1/api", DEFAULT_TIMEOUT).unwrap();
    let err = api.distribute(&ChatId::new("42"), "1").await.unwrap_err();
    assert!(err.is_network());
    assert_eq!(
        err.alert(Action::Distribute),
        "Network error. Please check your connection and retry."
    );
}

#[tokio::test]
async fn test_dashboard_over_http_with_file_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let api = Arc::new(api().await);

    let dashboard = Dashboard::new(api.clone(), Arc::new(FileSessionStore::new(&path)));
    let session = dashboard.login("42", None).await.unwrap();
    assert_eq!(session.id, "u42");
    assert!(path.exists());

    let restarted = Dashboard::new(api, Arc::new(FileSessionStore::new(&path)));
    let pdf = restarted
        .usage_report(Some("2024-03-01"), Some("2024-03-31"))
        .await
        .unwrap();
    assert_eq!(pdf, b"%PDF-1.4");
}
