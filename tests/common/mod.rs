#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub const PASSWORD: &str = "correct-horse";

/// Request body limit the test server runs with.
pub const MAX_BODY_BYTES: usize = 16 * 1024;

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Cargo builds the server binary before integration tests run
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_pagewise-api"));
        cmd.env("APP_ENV", "development")
            .env("PAGEWISE_HOST", "127.0.0.1")
            .env("PAGEWISE_PORT", port.to_string())
            .env("SECURITY_JWT_SECRET", "integration-test-secret")
            .env("SECURITY_PASSWORD_HASH_COST", "4")
            .env("API_MAX_REQUEST_SIZE_BYTES", MAX_BODY_BYTES.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    // Use stable get_or_init and convert init errors into a panic with context.
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Register a fresh account and return its bearer token and user JSON.
pub async fn signup(server: &TestServer, client: &reqwest::Client) -> Result<(String, Value)> {
    let email = format!("reader-{}@example.com", uuid::Uuid::new_v4().simple());
    let res = client
        .post(server.url("/auth/signup"))
        .json(&json!({ "name": "Test Reader", "email": email, "password": PASSWORD }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "signup failed: {}", res.status());

    let body = res.json::<Value>().await?;
    let token = body["data"]["token"]
        .as_str()
        .context("signup response has no token")?
        .to_string();
    Ok((token, body["data"]["user"].clone()))
}
