mod common;

use auth::Principal;
use auth::TokenIssuer;
use chrono::Duration;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_register_returns_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "password": "abcde"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 200);
    assert!(body["data"]["token"].is_string());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;
    app.register("Ada", "ada@example.com", "abcde").await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "name": "Another Ada",
            "email": "ADA@example.com",
            "password": "fghij"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_register_invalid_input() {
    let app = TestApp::spawn().await;

    let cases = [
        json!({"name": "", "email": "ada@example.com", "password": "abcde"}),
        json!({"name": "Ada", "email": "not-an-email", "password": "abcde"}),
        json!({"name": "Ada", "email": "ada@example.com", "password": "abcd"}),
        json!({"email": "ada@example.com", "password": "abcde"}),
    ];

    for case in cases {
        let response = app
            .post("/api/users")
            .json(&case)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", case);
    }
}

#[tokio::test]
async fn test_unreadable_bodies_get_error_envelope() {
    let app = TestApp::spawn().await;

    let wrong_type = app
        .post("/api/users")
        .json(&json!({"name": "Ada", "email": "ada@example.com", "password": 12345}))
        .send()
        .await
        .expect("Failed to execute request");
    let no_content_type = app
        .post("/api/auth")
        .body(r#"{"email": "ada@example.com", "password": "abcde"}"#)
        .send()
        .await
        .expect("Failed to execute request");
    let not_json = app
        .post("/api/users")
        .header("content-type", "application/json")
        .body("{name: Ada")
        .send()
        .await
        .expect("Failed to execute request");

    for response in [wrong_type, no_content_type, not_json] {
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(
            body,
            json!({"status_code": 400, "data": {"message": "Invalid request body"}})
        );
    }
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    let registration_token = app.register("Ada", "ada@example.com", "abcde").await;

    let response = app
        .post("/api/auth")
        .json(&json!({
            "email": "ada@example.com",
            "password": "abcde"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    let token = body["data"]["token"].as_str().unwrap();

    assert_eq!(
        app.user_id(token).await,
        app.user_id(&registration_token).await
    );
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_email_look_the_same() {
    let app = TestApp::spawn().await;
    app.register("Ada", "ada@example.com", "abcde").await;

    let wrong_password = app
        .post("/api/auth")
        .json(&json!({"email": "ada@example.com", "password": "abcdf"}))
        .send()
        .await
        .expect("Failed to execute request");
    let unknown_email = app
        .post("/api/auth")
        .json(&json!({"email": "nobody@example.com", "password": "abcde"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let wrong_password: Value = wrong_password.json().await.unwrap();
    let unknown_email: Value = unknown_email.json().await.unwrap();
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password["data"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_invalid_input() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth")
        .json(&json!({"email": "not-an-email", "password": "abcde"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_current_user() {
    let app = TestApp::spawn().await;
    let token = app.register("Ada", "Ada@Example.com", "abcde").await;

    let response = app
        .get_authenticated("/api/auth", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "Ada");
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_current_user_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/auth")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bearer_header_is_not_accepted() {
    let app = TestApp::spawn().await;
    let token = app.register("Ada", "ada@example.com", "abcde").await;

    let response = app
        .get("/api/auth")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = TestApp::spawn().await;
    let token = app.register("Ada", "ada@example.com", "abcde").await;
    let user_id = app.user_id(&token).await;

    // Issued long ago with a one hour lifetime
    let expired = app.token_issued_at(&user_id, 3600, 1_000_000);

    let response = app
        .get_authenticated("/api/auth", &expired)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_rejected() {
    let app = TestApp::spawn().await;
    let token = app.register("Ada", "ada@example.com", "abcde").await;
    let user_id = app.user_id(&token).await;

    let forged = TokenIssuer::new(b"some-other-secret-of-at-least-32-bytes")
        .issue(&Principal::new(user_id), Duration::seconds(3600))
        .unwrap();

    let response = app
        .get_authenticated("/api/auth", &forged)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_for_non_user_subject_rejected() {
    let app = TestApp::spawn().await;
    let now = chrono::Utc::now().timestamp();
    let token = app.token_issued_at("u1", 3600, now);

    let response = app
        .get_authenticated("/api/auth", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Unauthorized");
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let app = TestApp::spawn().await;

    for token in ["", "abc", "a.b.c"] {
        let response = app
            .get_authenticated("/api/auth", token)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{:?}", token);
    }
}
