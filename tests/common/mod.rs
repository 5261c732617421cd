#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use goals_api::app::{app, AppState};
use goals_api::auth::{generate_jwt, Claims};
use goals_api::database::MemoryAccountStore;
use serde_json::Value;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Router served in-process on an unused port, backed by a fresh in-memory store
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    client: reqwest::Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;

        let router = app(AppState::new(Arc::new(MemoryAccountStore::new()), TEST_SECRET));
        tokio::spawn(async move { axum::serve(listener, router).await });

        Ok(Self {
            port,
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub async fn list(&self, user: Uuid) -> Result<reqwest::Response> {
        Ok(self
            .client
            .get(self.url("/api/accounts"))
            .bearer_auth(token(user))
            .send()
            .await?)
    }

    pub async fn create(&self, user: Uuid, body: Value) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url("/api/accounts"))
            .bearer_auth(token(user))
            .json(&body)
            .send()
            .await?)
    }

    pub async fn update(&self, user: Uuid, id: &str, body: Value) -> Result<reqwest::Response> {
        Ok(self
            .client
            .put(self.url(&format!("/api/accounts/{}", id)))
            .bearer_auth(token(user))
            .json(&body)
            .send()
            .await?)
    }

    pub async fn delete(&self, user: Uuid, id: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .delete(self.url(&format!("/api/accounts/{}", id)))
            .bearer_auth(token(user))
            .send()
            .await?)
    }
}

pub fn token(user: Uuid) -> String {
    generate_jwt(&Claims::new(user, 1), TEST_SECRET).expect("failed to sign test token")
}
