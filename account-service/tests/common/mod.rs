use std::sync::Arc;

use account_service::account::models::Scope;
use account_service::account::service::AccountService;
use account_service::account::tokens::TokenIssuer;
use account_service::account::tokens::TokenLifetimes;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryUserRepository;
use auth::JwtHandler;
use auth::PasswordHasher;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
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

        let account_service = Arc::new(AccountService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(PasswordHasher::new()),
            TokenIssuer::new(
                Arc::new(JwtHandler::new(JWT_SECRET)),
                TokenLifetimes::default(),
            ),
            Scope::default(),
        ));

        let router = create_router(account_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
        }
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Register a user and return the raw response
    pub async fn register(&self, body: serde_json::Value) -> reqwest::Response {
        self.post("/users")
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Validate credentials and return the raw response
    pub async fn validate(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/users/validate")
            .json(&serde_json::json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
