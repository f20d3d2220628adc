#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;

use cashcard_api::config::{AppConfig, StoreBackend};
use cashcard_api::database::DatabaseManager;
use cashcard_api::{app, AppState};

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Start the real router on a free port, backed by a freshly seeded in-memory store.
    /// Each test gets its own server so mutations never leak between tests.
    pub async fn spawn() -> Result<Self> {
        let mut config = AppConfig::development();
        config.database.backend = StoreBackend::Memory;
        config.database.seed_demo_data = true;

        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let repository = DatabaseManager::open(&config.database).await?;
        let state = AppState::new(&config, repository)?;
        let router = app(&config, state);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let server = Self {
            port,
            base_url,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get(&self, path: &str, user: &str, password: &str) -> reqwest::RequestBuilder {
        self.client.get(self.url(path)).basic_auth(user, Some(password))
    }

    pub fn post(&self, path: &str, user: &str, password: &str) -> reqwest::RequestBuilder {
        self.client.post(self.url(path)).basic_auth(user, Some(password))
    }

    pub fn put(&self, path: &str, user: &str, password: &str) -> reqwest::RequestBuilder {
        self.client.put(self.url(path)).basic_auth(user, Some(password))
    }

    pub fn delete(&self, path: &str, user: &str, password: &str) -> reqwest::RequestBuilder {
        self.client.delete(self.url(path)).basic_auth(user, Some(password))
    }

    /// GET as sarah1, the owner of cards 99, 100 and 101
    pub fn get_as_sarah(&self, path: &str) -> reqwest::RequestBuilder {
        self.get(path, SARAH, SARAH_PASSWORD)
    }
}

pub const SARAH: &str = "sarah1";
pub const SARAH_PASSWORD: &str = "abc123";
pub const KUMAR: &str = "kumar2";
pub const KUMAR_PASSWORD: &str = "xyz789";

/// Ids of a JSON array of cash cards, in response order
pub fn ids(cards: &Value) -> Vec<i64> {
    cards
        .as_array()
        .map(|arr| arr.iter().filter_map(|c| c.get("id").and_then(Value::as_i64)).collect())
        .unwrap_or_default()
}
