//! Integration tests for OfficeBar.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p officebar-integration-tests
//! ```
//!
//! Each test boots the full router on an ephemeral localhost port and talks
//! to it over HTTP, the way a real client would. No external services are
//! contacted: notification channels are either left unconfigured or pointed
//! at fake endpoints spawned by the test itself.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::{IpAddr, Ipv4Addr};

use reqwest::{Client, Response};
use secrecy::SecretString;
use serde_json::{Value, json};

use officebar_server::config::AppConfig;
use officebar_server::routes;
use officebar_server::state::AppState;

/// A running OfficeBar server plus a client pointed at it.
pub struct TestApp {
    client: Client,
    base_url: String,
}

impl TestApp {
    /// Boot the app with no notification channels configured.
    pub async fn spawn() -> Self {
        Self::spawn_with_config(test_config()).await
    }

    /// Boot the app with the given configuration.
    pub async fn spawn_with_config(config: AppConfig) -> Self {
        let state = AppState::new(config);
        let app = routes::routes().with_state(state);

        let listener = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        Self {
            client: Client::new(),
            base_url: format!("http://{addr}/api"),
        }
    }

    /// GET a path under `/api`.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .expect("GET request should send")
    }

    /// GET a path under `/api` with a bearer token.
    pub async fn get_authed(&self, path: &str, token: &str) -> Response {
        self.client
            .get(format!("{}{path}", self.base_url))
            .bearer_auth(token)
            .send()
            .await
            .expect("GET request should send")
    }

    /// POST a JSON body to a path under `/api`.
    pub async fn post(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await
            .expect("POST request should send")
    }

    /// POST a JSON body to a path under `/api` with a bearer token.
    pub async fn post_authed(&self, path: &str, token: &str, body: &Value) -> Response {
        self.client
            .post(format!("{}{path}", self.base_url))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("POST request should send")
    }

    /// Sign up a fresh employee and return their bearer token.
    pub async fn signup(&self, email: &str, first_name: &str, last_name: &str) -> String {
        let response = self
            .post(
                "/auth/signup",
                &json!({
                    "email": email,
                    "password": "hunter2x",
                    "firstName": first_name,
                    "lastName": last_name,
                }),
            )
            .await;
        assert_eq!(response.status(), 201, "signup should succeed");

        let body: Value = response.json().await.expect("signup response is JSON");
        body["token"]
            .as_str()
            .expect("signup response has a token")
            .to_owned()
    }
}

/// Configuration with every notification channel disabled.
#[must_use]
pub fn test_config() -> AppConfig {
    AppConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        token_secret: SecretString::from("k9mX2pQ7vL4nR8tY3wZ6bC1dF5gH0jS9".to_string()),
        telegram: None,
        discord: None,
        gmail: None,
    }
}

/// Two lattes and an espresso, the usual afternoon round.
#[must_use]
pub fn sample_items() -> Value {
    json!([
        { "drinkId": "latte", "drinkName": "Latte", "quantity": 2, "price": "0.00" },
        { "drinkId": "espresso", "drinkName": "Espresso", "quantity": 1, "price": "0.00" },
    ])
}
