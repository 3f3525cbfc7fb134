//! HTTP API integration tests
//!
//! Drives the full router over an in-memory SQLite database with stub
//! delegates, covering the account lifecycle and the password-recovery
//! handshake end to end.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use account_service::application::{
    AccountService, DelegateError, NotificationDispatcher, TokenAuthority, TokenClaims,
};
use account_service::create_router;
use account_service::infrastructure::database::entities::account;
use account_service::infrastructure::database::migrator::Migrator;
use account_service::infrastructure::database::repositories::AccountRepository;
use account_service::interfaces::http::modules::accounts::AccountsState;
use account_service::interfaces::http::modules::health::HealthState;

struct StubTokenAuthority;

#[async_trait]
impl TokenAuthority for StubTokenAuthority {
    async fn issue(&self, _claims: &TokenClaims) -> Result<String, DelegateError> {
        Ok("stub-token".to_string())
    }
}

struct StubDispatcher;

#[async_trait]
impl NotificationDispatcher for StubDispatcher {
    async fn send_email(
        &self,
        _address: &str,
        _subject: &str,
        _body: &str,
    ) -> Result<(), DelegateError> {
        Ok(())
    }
}

async fn setup() -> (Router, DatabaseConnection) {
    // A single pooled connection keeps every query on the same
    // in-memory database.
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    let repo = Arc::new(AccountRepository::new(db.clone()));
    let service = Arc::new(AccountService::new(
        repo,
        Arc::new(StubTokenAuthority),
        Arc::new(StubDispatcher),
        4,
        false,
    ));

    let router = create_router(
        AccountsState { service },
        HealthState {
            db: db.clone(),
            started_at: Arc::new(Instant::now()),
        },
        None,
    );

    (router, db)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register_default(app: &Router) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v0/users/register",
            json!({"userName": "test", "email": "test@x.com", "password": "12345"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[tokio::test]
async fn register_creates_account_with_defaults() {
    let (app, _db) = setup().await;
    let body = register_default(&app).await;

    assert_eq!(body["token"], "stub-token");
    assert_eq!(body["user"]["userName"], "test");
    assert_eq!(body["user"]["email"], "test@x.com");
    assert_eq!(body["user"]["status"], "active");
    assert_eq!(body["user"]["roles"], json!(["user"]));
    // The digest never leaves the service, and no recovery window is open.
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordResetToken").is_none());
}

#[tokio::test]
async fn register_rejects_duplicate_identifiers() {
    let (app, _db) = setup().await;
    register_default(&app).await;

    for body in [
        json!({"userName": "test", "email": "fresh@x.com", "password": "12345"}),
        json!({"userName": "fresh", "email": "test@x.com", "password": "12345"}),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/v0/users/register", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "User already exists");
    }
}

#[tokio::test]
async fn register_validates_fields_in_order() {
    let (app, _db) = setup().await;

    let cases = [
        (json!({}), "User name can not be empty!"),
        (json!({"userName": "test"}), "Email can not be empty!"),
        (
            json!({"userName": "test", "email": "test@x.com"}),
            "Password can not be empty!",
        ),
    ];
    for (body, message) in cases {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/v0/users/register", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], message);
    }
}

#[tokio::test]
async fn lookup_works_by_either_identifier() {
    let (app, _db) = setup().await;
    register_default(&app).await;

    for uri in ["/api/v0/users/test", "/api/v0/users/test@x.com"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["userName"], "test");
    }

    let response = app.clone().oneshot(get("/api/v0/users/nobody")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "User does not exists");

    let response = app.clone().oneshot(get("/api/v0/users")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listing = body_json(response).await;
    assert_eq!(listing.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn authenticate_checks_credentials() {
    let (app, _db) = setup().await;
    register_default(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v0/users/authenticate",
            json!({"email": "test@x.com", "password": "12345"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["token"], "stub-token");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v0/users/authenticate",
            json!({"email": "test@x.com", "password": "wrong"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Authentication failed");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v0/users/authenticate",
            json!({"email": "nobody@x.com", "password": "12345"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "User does not exists");
}

#[tokio::test]
async fn update_applies_gates_then_changes() {
    let (app, _db) = setup().await;
    register_default(&app).await;

    // Roles must survive null filtering.
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/v0/users/1",
            json!({"id": 1, "roles": [null], "status": "active"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "User roles can not be empty!"
    );

    // Body and path ids must agree after coercion.
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/v0/users/2",
            json!({"id": 1, "roles": ["user"], "status": "active"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "User does not have enough permissions to access."
    );

    // A string body id is coerced before comparison.
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/v0/users/1",
            json!({"id": "1", "roles": [null, "admin", "user"], "status": "inactive"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/api/v0/users/test")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["roles"], json!(["admin", "user"]));
    assert_eq!(body["status"], "inactive");
}

#[tokio::test]
async fn delete_is_soft_and_idempotent_misses() {
    let (app, _db) = setup().await;
    register_default(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v0/users/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Deleted accounts no longer satisfy lookups...
    let response = app.clone().oneshot(get("/api/v0/users/test")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // ...or deletes.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v0/users/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "User does not exists");
}

#[tokio::test]
async fn reset_requires_a_submitted_token() {
    let (app, _db) = setup().await;

    // Checked before any lookup: the email does not even exist.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v0/users/resetPassword",
            json!({"email": "nobody@x.com", "password": "new-pass"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Invalid token for reseting password."
    );
}

#[tokio::test]
async fn password_recovery_round_trip() {
    let (app, _db) = setup().await;
    register_default(&app).await;

    let response = app
        .clone()
        .oneshot(get("/api/v0/users/forgotPassword/test@x.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let token = body["passwordResetToken"].as_str().unwrap().to_string();
    assert_eq!(token.len(), 12);

    // Wrong token: distinct error.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v0/users/resetPassword",
            json!({"email": "test@x.com", "token": "000000000000", "password": "new-pass"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid token.");

    // Correct token: credential replaced, window closed.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v0/users/resetPassword",
            json!({"email": "test@x.com", "token": token, "password": "new-pass"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body.get("passwordResetToken").is_none());

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v0/users/authenticate",
            json!({"email": "test@x.com", "password": "new-pass"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Replaying the consumed token reports a missing recovery window.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v0/users/resetPassword",
            json!({"email": "test@x.com", "token": token, "password": "other"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Invalid token for reseting password."
    );
}

#[tokio::test]
async fn expired_reset_token_is_rejected() {
    let (app, db) = setup().await;
    register_default(&app).await;

    let response = app
        .clone()
        .oneshot(get("/api/v0/users/forgotPassword/test"))
        .await
        .unwrap();
    let token = body_json(response).await["passwordResetToken"]
        .as_str()
        .unwrap()
        .to_string();

    // Push the stored expiry into the past.
    let model = account::Entity::find()
        .filter(account::Column::Email.eq("test@x.com"))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    let mut stored: account::ActiveModel = model.into();
    stored.password_reset_expires = Set(Some(Utc::now() - Duration::hours(2)));
    stored.update(&db).await.unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v0/users/resetPassword",
            json!({"email": "test@x.com", "token": token, "password": "new-pass"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Token expired, generate a new one"
    );
}

#[tokio::test]
async fn healthcheck_reports_ok() {
    let (app, _db) = setup().await;

    let response = app
        .clone()
        .oneshot(get("/api/v0/users/healthcheck"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "OK");
    assert_eq!(body["database"], "ok");
}
