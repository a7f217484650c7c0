use std::sync::Arc;

use auth::Authenticator;
use auth::Principal;
use auth::TokenIssuer;
use chrono::Duration;
use serde_json::json;
use serde_json::Value;
use user_service::domain::profile::service::ProfileService;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::middleware::AUTH_TOKEN_HEADER;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::InMemoryProfileRepository;
use user_service::outbound::repositories::InMemoryUserRepository;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server on in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_issuer: TokenIssuer,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let users = Arc::new(InMemoryUserRepository::new());
        let profiles = Arc::new(InMemoryProfileRepository::new());

        let user_service = Arc::new(UserService::new(Arc::clone(&users)));
        let profile_service = Arc::new(ProfileService::new(profiles, users));
        let authenticator = Arc::new(
            Authenticator::new(TEST_SECRET, Duration::seconds(3600))
                .expect("Failed to create authenticator"),
        );

        let router = create_router(user_service, profile_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_issuer: TokenIssuer::new(TEST_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with a session token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).header(AUTH_TOKEN_HEADER, token)
    }

    /// Helper to make POST request with a session token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).header(AUTH_TOKEN_HEADER, token)
    }

    /// Helper to make PUT request with a session token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .header(AUTH_TOKEN_HEADER, token)
    }

    /// Helper to make DELETE request with a session token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .header(AUTH_TOKEN_HEADER, token)
    }

    /// Register an account and return its session token
    pub async fn register(&self, name: &str, email: &str, password: &str) -> String {
        let response = self
            .post("/api/users")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }

    /// Id of the account a session token belongs to
    pub async fn user_id(&self, token: &str) -> String {
        let body: Value = self
            .get_authenticated("/api/auth", token)
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response");

        body["data"]["id"].as_str().expect("Missing id").to_string()
    }

    /// Token signed with the server's secret, issued at an explicit time
    pub fn token_issued_at(&self, subject: &str, ttl_seconds: i64, issued_at: i64) -> String {
        self.token_issuer
            .issue_at(
                &Principal::new(subject),
                Duration::seconds(ttl_seconds),
                issued_at,
            )
            .expect("Failed to issue token")
    }
}
