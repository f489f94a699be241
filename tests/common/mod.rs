#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use planvibe_api::config::{AppConfig, Environment};
use planvibe_api::database::MemoryStore;
use planvibe_api::{app, AppState};
use reqwest::StatusCode;
use serde_json::{json, Value};

pub const SECRET: &str = "integration-test-secret";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

/// Serve the app on a free port, backed by a fresh in-memory store.
///
/// The server task lives on the calling test's runtime and stops with it.
pub async fn spawn_server() -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let mut config = AppConfig::new(Environment::Development, SECRET);
    config.security.bcrypt_cost = 4;
    let state = AppState::new(config, Arc::new(MemoryStore::new()));

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;
    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.expect("server");
    });

    Ok(TestServer {
        port,
        base_url,
        client: reqwest::Client::new(),
    })
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<reqwest::Response> {
        let res = self
            .client
            .post(self.url("/register"))
            .json(&json!({ "username": username, "email": email, "password": password }))
            .send()
            .await?;
        Ok(res)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<reqwest::Response> {
        let res = self
            .client
            .post(self.url("/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        Ok(res)
    }

    /// Register a fresh account and return its bearer token.
    pub async fn signup(&self, email: &str) -> Result<String> {
        let res = self.register("tester", email, "secret-pass").await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());

        let res = self.login(email, "secret-pass").await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());

        let body = res.json::<Value>().await?;
        body["data"]["token"]
            .as_str()
            .map(str::to_string)
            .context("login response missing token")
    }

    pub async fn get(&self, path: &str, token: &str) -> Result<(StatusCode, Value)> {
        let res = self.client.get(self.url(path)).bearer_auth(token).send().await?;
        Ok((res.status(), res.json().await?))
    }

    pub async fn post(&self, path: &str, token: &str, body: Value) -> Result<(StatusCode, Value)> {
        let res = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        Ok((res.status(), res.json().await?))
    }

    pub async fn put(&self, path: &str, token: &str, body: Value) -> Result<(StatusCode, Value)> {
        let res = self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        Ok((res.status(), res.json().await?))
    }

    pub async fn delete(&self, path: &str, token: &str) -> Result<(StatusCode, Value)> {
        let res = self.client.delete(self.url(path)).bearer_auth(token).send().await?;
        Ok((res.status(), res.json().await?))
    }
}
