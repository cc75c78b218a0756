use std::sync::Arc;

use auth::Authenticator;
use auth::HashScheme;
use auth::PasswordHasher;
use auth::TokenCodec;
use auth::TokenSettings;
use curator_service::domain::content::service::ContentService;
use curator_service::domain::tag::service::TagService;
use curator_service::domain::user::service::UserService;
use curator_service::inbound::http::router::create_router;
use curator_service::outbound::repositories::InMemoryStore;
use serde_json::json;
use serde_json::Value;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_codec: Arc<TokenCodec>,
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

        let store = Arc::new(InMemoryStore::new());

        let token_codec = Arc::new(
            TokenCodec::new(&TokenSettings::new(TEST_SECRET)).expect("Valid token settings"),
        );
        // Minimum bcrypt cost keeps the suite fast
        let password_hasher =
            PasswordHasher::with_scheme(HashScheme::Bcrypt, 4).expect("Valid bcrypt cost");
        let authenticator = Arc::new(Authenticator::new(
            password_hasher,
            Arc::clone(&token_codec),
        ));

        let user_service = Arc::new(UserService::new(Arc::clone(&store), authenticator));
        let tag_service = Arc::new(TagService::new(Arc::clone(&store)));
        let content_service = Arc::new(ContentService::new(Arc::clone(&store), store));

        let router = create_router(
            user_service,
            content_service,
            tag_service,
            Arc::clone(&token_codec),
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create reqwest client"),
            token_codec,
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

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.delete(path).bearer_auth(token)
    }

    /// Register a user and return the response body
    pub async fn register(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/users")
            .json(&json!({
                "email": email,
                "password": password,
                "full_name": "Test User"
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in through the form endpoint and return the raw response
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/token")
            .form(&[("username", email), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register a user and return a valid access token for it
    pub async fn register_and_login(&self, email: &str) -> String {
        self.register(email, "pass_word!").await;

        let body: Value = self
            .login(email, "pass_word!")
            .await
            .json()
            .await
            .expect("Failed to parse response");

        body["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string()
    }

    /// Publish a content item and return its JSON representation
    pub async fn create_content(&self, token: &str, title: &str, tags: &[&str]) -> Value {
        let response = self
            .post_authenticated("/content", token)
            .json(&json!({
                "title": title,
                "url": "https://example.com/article",
                "tags": tags
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }
}
