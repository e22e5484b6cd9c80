//! HTTP-level integration tests for the identity-provider webhook.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_raw, TEST_WEBHOOK_SECRET};
use sqlx::PgPool;

use boxd_core::webhook::SigningSecret;
use boxd_db::repositories::UserRepo;

/// Sign a payload the way the identity provider's delivery
/// infrastructure would, returning the three header values.
fn signed_headers(msg_id: &str, body: &str) -> (String, String, String) {
    let secret = SigningSecret::parse(TEST_WEBHOOK_SECRET).expect("test secret should parse");
    let timestamp = chrono::Utc::now().timestamp().to_string();
    let signature = secret.sign(msg_id, &timestamp, body.as_bytes());
    (msg_id.to_string(), timestamp, signature)
}

fn user_created_body(user_id: &str) -> String {
    serde_json::json!({ "type": "user.created", "data": { "id": user_id } }).to_string()
}

/// A correctly signed user.created event provisions a user row.
#[sqlx::test(migrations = "../db/migrations")]
async fn user_created_event_provisions_user(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body = user_created_body("user_abc");
    let (id, ts, sig) = signed_headers("msg_1", &body);

    let response = post_raw(
        app,
        "/api/webhooks",
        &[("svix-id", id.as_str()), ("svix-timestamp", ts.as_str()), ("svix-signature", sig.as_str())],
        &body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "User saved to DB");
    assert!(UserRepo::exists(&pool, "user_abc").await.unwrap());
}

/// Redelivery of the same event is acknowledged without error.
#[sqlx::test(migrations = "../db/migrations")]
async fn replayed_event_is_a_noop(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body = user_created_body("user_abc");

    for msg_id in ["msg_1", "msg_1"] {
        let (id, ts, sig) = signed_headers(msg_id, &body);
        let response = post_raw(
            app.clone(),
            "/api/webhooks",
            &[("svix-id", id.as_str()), ("svix-timestamp", ts.as_str()), ("svix-signature", sig.as_str())],
            &body,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

/// Every signature header is required; absence is a 400 before any
/// storage access.
#[sqlx::test(migrations = "../db/migrations")]
async fn missing_signature_header_is_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body = user_created_body("user_abc");
    let (id, ts, _sig) = signed_headers("msg_1", &body);

    let response = post_raw(
        app,
        "/api/webhooks",
        &[("svix-id", id.as_str()), ("svix-timestamp", ts.as_str())],
        &body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!UserRepo::exists(&pool, "user_abc").await.unwrap());
}

/// A wrong signature is rejected before the event is interpreted.
#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_signature_is_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body = user_created_body("user_abc");
    let (id, ts, sig) = signed_headers("msg_1", "a different body entirely");

    let response = post_raw(
        app,
        "/api/webhooks",
        &[("svix-id", id.as_str()), ("svix-timestamp", ts.as_str()), ("svix-signature", sig.as_str())],
        &body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!UserRepo::exists(&pool, "user_abc").await.unwrap());
}

/// A signature with a timestamp outside the tolerance window is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn stale_timestamp_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = user_created_body("user_abc");

    let secret = SigningSecret::parse(TEST_WEBHOOK_SECRET).unwrap();
    let stale = (chrono::Utc::now().timestamp() - 3600).to_string();
    let sig = secret.sign("msg_1", &stale, body.as_bytes());

    let response = post_raw(
        app,
        "/api/webhooks",
        &[("svix-id", "msg_1"), ("svix-timestamp", stale.as_str()), ("svix-signature", sig.as_str())],
        &body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Event types other than user.created are acknowledged as no-ops.
#[sqlx::test(migrations = "../db/migrations")]
async fn other_event_types_are_acknowledged(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body =
        serde_json::json!({ "type": "user.deleted", "data": { "id": "user_abc" } }).to_string();
    let (id, ts, sig) = signed_headers("msg_1", &body);

    let response = post_raw(
        app,
        "/api/webhooks",
        &[("svix-id", id.as_str()), ("svix-timestamp", ts.as_str()), ("svix-signature", sig.as_str())],
        &body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Unhandled event");
    assert!(!UserRepo::exists(&pool, "user_abc").await.unwrap());
}

/// With no signing secret configured the endpoint answers 500.
#[sqlx::test(migrations = "../db/migrations")]
async fn missing_secret_config_is_500(pool: PgPool) {
    let mut config = common::test_config();
    config.webhook_secret = None;
    let app = common::build_test_app_with(pool, config);

    let body = user_created_body("user_abc");
    let (id, ts, sig) = signed_headers("msg_1", &body);

    let response = post_raw(
        app,
        "/api/webhooks",
        &[("svix-id", id.as_str()), ("svix-timestamp", ts.as_str()), ("svix-signature", sig.as_str())],
        &body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

/// A correctly signed but malformed event body is a client error.
#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_event_payload_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = "this is not json";
    let (id, ts, sig) = signed_headers("msg_1", body);

    let response = post_raw(
        app,
        "/api/webhooks",
        &[("svix-id", id.as_str()), ("svix-timestamp", ts.as_str()), ("svix-signature", sig.as_str())],
        body,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
