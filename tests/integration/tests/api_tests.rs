//! API Integration Tests
//!
//! The router runs against in-memory repositories and a fake Google OAuth
//! server, so these tests need no external services.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use bunpo_core::entities::NewUser;
use bunpo_core::traits::UserRepository;
use integration_tests::{
    assert_json, assert_status, location, query_param, set_cookie_header, state_cookie,
    FakeProfile, TestOptions, TestServer, ALLOWED_NAME, GOOD_CODE,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_readiness_reports_unreachable_database() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::SERVICE_UNAVAILABLE)
        .await
        .unwrap();
    assert_eq!(body["checks"]["database"], "unhealthy");
}

#[tokio::test]
async fn test_request_id_header() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_redirects_with_state_cookie() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/auth/google/login").await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

    let cookie = set_cookie_header(&response, "oauthstate").expect("state cookie");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=600"));
    assert!(!cookie.contains("Secure"));

    let state = state_cookie(&response).unwrap();
    let target = location(&response).expect("redirect target");
    assert_eq!(target.path(), "/auth");
    assert_eq!(query_param(&target, "state").as_deref(), Some(state.as_str()));
    assert_eq!(query_param(&target, "client_id").as_deref(), Some("test-client"));
    assert_eq!(query_param(&target, "response_type").as_deref(), Some("code"));
    assert_eq!(query_param(&target, "access_type").as_deref(), Some("offline"));
    assert_eq!(
        query_param(&target, "prompt").as_deref(),
        Some("select_account")
    );
}

#[tokio::test]
async fn test_callback_success_returns_token() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.login(GOOD_CODE).await.unwrap();
    let cleared = set_cookie_header(&response, "oauthstate").expect("cookie cleared");
    assert!(cleared.contains("Max-Age=0"));

    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "login successful");
    assert_eq!(body["data"]["user"]["name"], ALLOWED_NAME);
    assert_eq!(body["data"]["user"]["email"], "ada.lovelace@example.com");

    let token = body["data"]["token"].as_str().unwrap();
    let claims = server.jwt.decode_token(token).unwrap();
    assert_eq!(claims.iss, "bunpo-backend");
    assert_eq!(claims.provider, "google");

    let users = server.users.snapshot();
    assert_eq!(users.len(), 1);
    assert_eq!(
        users[0].picture_url.as_deref(),
        Some("https://example.com/ada.png")
    );

    let logs = server.logs.snapshot();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, "login");
    assert_eq!(logs[0].detail, "authenticated via Google OAuth");
}

#[tokio::test]
async fn test_repeat_login_reuses_account() {
    let server = TestServer::start().await.expect("Failed to start server");

    assert_status(server.login(GOOD_CODE).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_status(server.login(GOOD_CODE).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();

    assert_eq!(server.users.snapshot().len(), 1);
    assert_eq!(server.logs.snapshot().len(), 2);
}

#[tokio::test]
async fn test_callback_success_redirect() {
    let server = TestServer::start_with(TestOptions {
        success_redirect: Some("http://localhost:5173/welcome".to_string()),
        ..Default::default()
    })
    .await
    .expect("Failed to start server");

    let response = server.login(GOOD_CODE).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

    let target = location(&response).unwrap();
    assert_eq!(target.path(), "/welcome");
    assert!(query_param(&target, "token").is_some());
    assert_eq!(
        query_param(&target, "email").as_deref(),
        Some("ada.lovelace@example.com")
    );
    assert_eq!(query_param(&target, "name").as_deref(), Some(ALLOWED_NAME));
    assert_eq!(
        query_param(&target, "picture").as_deref(),
        Some("https://example.com/ada.png")
    );
}

#[tokio::test]
async fn test_callback_refuses_other_account() {
    let server = TestServer::start_with(TestOptions {
        profile: FakeProfile::named("Charles Babbage"),
        ..Default::default()
    })
    .await
    .expect("Failed to start server");

    let response = server.login(GOOD_CODE).await.unwrap();
    assert!(set_cookie_header(&response, "oauthstate").is_some());

    let body: Value = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "unauthorize");

    assert!(server.users.snapshot().is_empty());
    assert!(server.logs.snapshot().is_empty());
}

#[tokio::test]
async fn test_callback_refusal_redirect() {
    let server = TestServer::start_with(TestOptions {
        profile: FakeProfile::named("Charles Babbage"),
        failure_redirect: Some("http://localhost:5173/login".to_string()),
        ..Default::default()
    })
    .await
    .expect("Failed to start server");

    let response = server.login(GOOD_CODE).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

    let target = location(&response).unwrap();
    assert_eq!(target.path(), "/login");
    assert_eq!(query_param(&target, "error").as_deref(), Some("unauthorize"));
}

#[tokio::test]
async fn test_callback_refuses_stored_account_with_other_name() {
    let server = TestServer::start().await.expect("Failed to start server");
    server
        .users
        .create(&NewUser {
            email: "ada.lovelace@example.com".to_string(),
            name: "Ada".to_string(),
            provider: "google".to_string(),
            provider_id: "google-1001".to_string(),
            picture_url: None,
        })
        .await
        .unwrap();

    let response = server.login(GOOD_CODE).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_callback_state_errors() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .get_with_cookie("/auth/google/callback?state=abc", "oauthstate=abc")
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["message"], "authorization code is required");

    let response = server
        .get("/auth/google/callback?code=good-code&state=abc")
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["message"], "missing oauth state");

    let response = server
        .get_with_cookie(
            "/auth/google/callback?code=good-code&state=abc",
            "oauthstate=xyz",
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["message"], "state mismatch");

    assert!(server.users.snapshot().is_empty());
}

#[tokio::test]
async fn test_callback_malformed_query_uses_envelope() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .get_with_cookie(
            "/auth/google/callback?code=a&code=b&state=abc",
            "oauthstate=abc",
        )
        .await
        .unwrap();
    assert!(set_cookie_header(&response, "oauthstate").is_some());

    let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["errors"]["code"], "BAD_REQUEST");
    assert!(server.users.snapshot().is_empty());
}

#[tokio::test]
async fn test_callback_provider_failure_is_bad_gateway() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.login("rejected-code").await.unwrap();
    let body: Value = assert_json(response, StatusCode::BAD_GATEWAY).await.unwrap();
    assert_eq!(body["status"], "error");
    assert!(!body["message"].as_str().unwrap().contains("invalid_grant"));
}

// ============================================================================
// Logout Tests
// ============================================================================

async fn login_token(server: &TestServer) -> String {
    let response = server.login(GOOD_CODE).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_logout_records_entry() {
    let server = TestServer::start().await.expect("Failed to start server");
    let token = login_token(&server).await;

    let response = server.post_auth("/auth/logout", &token, None).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["message"], "logout recorded");
    assert_eq!(body["data"], json!({ "status": "ok" }));

    let response = server
        .post_auth(
            "/auth/logout",
            &token,
            Some(json!({ "detail": "switching devices" })),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let logs = server.logs.snapshot();
    assert_eq!(logs[1].action, "logout");
    assert_eq!(logs[1].detail, "user initiated logout");
    assert_eq!(logs[2].detail, "switching devices");
}

#[tokio::test]
async fn test_logout_requires_valid_token() {
    let server = TestServer::start().await.expect("Failed to start server");

    let url = format!("{}/auth/logout", server.base_url());
    let response = server.client.post(&url).send().await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .post_auth("/auth/logout", "not-a-jwt", None)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    assert!(server.logs.snapshot().is_empty());
}

#[tokio::test]
async fn test_logout_rejects_long_detail() {
    let server = TestServer::start().await.expect("Failed to start server");
    let token = login_token(&server).await;

    let response = server
        .post_auth(
            "/auth/logout",
            &token,
            Some(json!({ "detail": "x".repeat(501) })),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// User and Log Tests
// ============================================================================

#[tokio::test]
async fn test_list_users_masks_email() {
    let server = TestServer::start().await.expect("Failed to start server");
    login_token(&server).await;

    let response = server.get("/api/users").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["message"], "users retrieved successfully");
    assert_eq!(body["data"]["count"], 1);

    let user = &body["data"]["users"][0];
    assert_eq!(user["email"], "ada*****@example.com");
    assert_eq!(user["provider"], "google");
    assert!(user.get("id").is_none());

    let reference = user["reference"].as_str().unwrap();
    let stored = &server.users.snapshot()[0];
    assert_eq!(server.references.decode(reference).unwrap(), stored.id);
}

#[tokio::test]
async fn test_list_logs_paginated() {
    let server = TestServer::start().await.expect("Failed to start server");
    let token = login_token(&server).await;
    for _ in 0..11 {
        server.post_auth("/auth/logout", &token, None).await.unwrap();
    }

    let response = server.get("/api/users/logs?page=2&page_size=5").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["message"], "user logs retrieved successfully");
    assert_eq!(
        body["data"]["meta"],
        json!({ "page": 2, "page_size": 5, "total_items": 12, "total_pages": 3 })
    );
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 5);
    assert_eq!(body["data"]["items"][0]["user_name"], ALLOWED_NAME);

    let response = server
        .get("/api/users/logs?page=oops&page_size=500")
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["data"]["meta"]["page"], 1);
    assert_eq!(body["data"]["meta"]["page_size"], 10);
}

#[tokio::test]
async fn test_list_logs_by_reference() {
    let server = TestServer::start().await.expect("Failed to start server");
    login_token(&server).await;

    let other = server
        .users
        .create(&NewUser {
            email: "someone@example.com".to_string(),
            name: "Someone".to_string(),
            provider: "google".to_string(),
            provider_id: "google-2002".to_string(),
            picture_url: None,
        })
        .await
        .unwrap();
    let other_token = server.token_for(&other).unwrap();
    server
        .post_auth("/auth/logout", &other_token, None)
        .await
        .unwrap();

    let reference = server.references.encode(other.id).unwrap();

    let response = server
        .get(&format!("/api/users/{reference}/logs"))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["data"]["meta"]["total_items"], 1);
    assert_eq!(body["data"]["items"][0]["action"], "logout");
    assert_eq!(body["data"]["items"][0]["user_name"], "Someone");

    let response = server
        .get(&format!("/api/users/logs?reference={reference}"))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["data"]["meta"]["total_items"], 1);
}

#[tokio::test]
async fn test_invalid_reference_rejected() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/users/not-valid/logs").await.unwrap();
    let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["message"], "invalid user reference");

    let response = server
        .get("/api/users/logs?reference=not-valid")
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Bunpo Tests
// ============================================================================

#[tokio::test]
async fn test_bunpo_endpoint() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/bunpo/test").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(
        body,
        json!({
            "status": "success",
            "message": "endpoint success",
            "data": { "message": "endpoint success" },
        })
    );
}
