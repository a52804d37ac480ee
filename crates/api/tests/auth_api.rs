//! HTTP-level integration tests for signup, login, refresh, logout and
//! session lookup.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, get_auth, post_auth, post_json, signup_token};
use serde_json::json;
use sqlx::PgPool;

async fn login(app: axum::Router, email: &str, password: &str) -> axum::response::Response {
    post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": email, "password": password }),
    )
    .await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn signup_returns_tokens_and_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/signup",
        json!({ "email": "Ola@Example.com", "password": "haslo123" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["expires_in"], 15 * 60);
    assert_eq!(json["user"]["email"], "ola@example.com");
    assert!(json["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn signup_with_taken_email_is_conflict(pool: PgPool) {
    let app = common::build_test_app(pool);
    signup_token(app.clone(), "dup@example.com").await;

    let response = post_json(
        app,
        "/api/v1/auth/signup",
        json!({ "email": "DUP@example.com", "password": "haslo123" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn signup_validates_email_and_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let bad_email = post_json(
        app.clone(),
        "/api/v1/auth/signup",
        json!({ "email": "not-an-email", "password": "haslo123" }),
    )
    .await;
    assert_eq!(bad_email.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(bad_email).await["code"], "VALIDATION_ERROR");

    let short_password = post_json(
        app,
        "/api/v1/auth/signup",
        json!({ "email": "a@b.pl", "password": "123" }),
    )
    .await;
    assert_eq!(short_password.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_accepts_correct_password_only(pool: PgPool) {
    let app = common::build_test_app(pool);
    signup_token(app.clone(), "jan@example.com").await;

    let ok = login(app.clone(), "jan@example.com", "haslo123").await;
    assert_eq!(ok.status(), StatusCode::OK);
    let json = body_json(ok).await;
    assert!(json["user"]["last_sign_in_at"].is_string());

    let wrong = login(app.clone(), "jan@example.com", "zle-haslo").await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let unknown = login(app, "nikt@example.com", "haslo123").await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_rotates_the_session(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app.clone(),
        "/api/v1/auth/signup",
        json!({ "email": "r@example.com", "password": "haslo123" }),
    )
    .await;
    let issued = body_json(response).await;
    let refresh_token = issued["refresh_token"].as_str().unwrap().to_string();
    let access_token = issued["access_token"].as_str().unwrap().to_string();

    let first = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);
    let rotated = body_json(first).await;
    assert_ne!(rotated["refresh_token"], refresh_token.as_str());

    // The access token of the rotated-away session stops working; the new
    // one works.
    let old_access = get_auth(app.clone(), "/api/v1/auth/session", &access_token).await;
    assert_eq!(old_access.status(), StatusCode::UNAUTHORIZED);
    let new_access = rotated["access_token"].as_str().unwrap();
    let current = get_auth(app.clone(), "/api/v1/auth/session", new_access).await;
    assert_eq!(current.status(), StatusCode::OK);

    let reused = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(reused.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn session_requires_bearer_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let anonymous = get(app.clone(), "/api/v1/auth/session").await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let garbage = get_auth(app.clone(), "/api/v1/auth/session", "garbage").await;
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);

    let token = signup_token(app.clone(), "s@example.com").await;
    let response = get_auth(app, "/api/v1/auth/session", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["email"], "s@example.com");
    assert!(json["data"]["session_id"].is_i64());
    assert!(json["data"]["expires_at"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn logout_ends_access_and_refresh_tokens(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app.clone(),
        "/api/v1/auth/signup",
        json!({ "email": "out@example.com", "password": "haslo123" }),
    )
    .await;
    let json = body_json(response).await;
    let access = json["access_token"].as_str().unwrap().to_string();
    let refresh = json["refresh_token"].as_str().unwrap().to_string();

    // A second session of the same user, opened by a separate login.
    let other = login(app.clone(), "out@example.com", "haslo123").await;
    let other_access = body_json(other).await["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let logout = post_auth(app.clone(), "/api/v1/auth/logout", &access).await;
    assert_eq!(logout.status(), StatusCode::NO_CONTENT);

    for token in [&access, &other_access] {
        let session = get_auth(app.clone(), "/api/v1/auth/session", token).await;
        assert_eq!(session.status(), StatusCode::UNAUTHORIZED);
        let leads = get_auth(app.clone(), "/api/v1/leads", token).await;
        assert_eq!(leads.status(), StatusCode::UNAUTHORIZED);
    }
    let again = post_auth(app.clone(), "/api/v1/auth/logout", &access).await;
    assert_eq!(again.status(), StatusCode::UNAUTHORIZED);

    let after = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh }),
    )
    .await;
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_session_signs_out(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup_token(app.clone(), "del@example.com").await;

    let response = delete_auth(app.clone(), "/api/v1/auth/session", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let after = get_auth(app, "/api/v1/auth/session", &token).await;
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(after).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn session_events_are_published(pool: PgPool) {
    let state = common::test_state(pool, common::test_config());
    let mut rx = state.event_bus.subscribe();
    let app = common::build_test_app_with_state(state);

    let token = signup_token(app.clone(), "ev@example.com").await;
    login(app.clone(), "ev@example.com", "haslo123").await;
    post_auth(app, "/api/v1/auth/logout", &token).await;

    let types: Vec<String> = [
        rx.recv().await.unwrap(),
        rx.recv().await.unwrap(),
        rx.recv().await.unwrap(),
    ]
    .into_iter()
    .map(|e| e.event_type)
    .collect();
    assert_eq!(
        types,
        ["session.signed_up", "session.signed_in", "session.signed_out"]
    );
}
