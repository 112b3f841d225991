//! Registry Client
//!
//! Used by service instances to announce themselves to the gateway's registry over HTTP.
//! Transport errors are retried with exponential backoff and jitter; HTTP error statuses
//! are not, since the registry answered and a retry would get the same answer.

use anyhow::Result;
use std::collections::HashMap;
use std::time::Duration;

use super::protocol::*;
use super::types::{InstanceStatus, ServiceInstance};

const REQUEST_TIMEOUT: Duration = Duration::from_millis(500);
const ATTEMPTS: usize = 3;

pub struct RegistryClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl RegistryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    pub async fn register(&self, instance: &ServiceInstance) -> Result<ServiceInstance> {
        let url = format!("{}{}", self.base_url, ENDPOINT_REGISTER);
        let response = self
            .send_with_retry(|| self.http_client.post(url.as_str()).json(instance))
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "Register '{}' failed: {}",
                instance.name,
                response.status()
            ));
        }

        let body: RegisterResponse = response.json().await?;
        tracing::info!(
            "Registered '{}' with registry at {}",
            body.instance.name,
            self.base_url
        );
        Ok(body.instance)
    }

    /// `Ok(None)` when the registry has no entry for `name`.
    pub async fn lookup(&self, name: &str) -> Result<Option<ServiceInstance>> {
        let url = format!("{}{}/{}", self.base_url, ENDPOINT_LOOKUP, name);
        let response = self
            .send_with_retry(|| self.http_client.get(url.as_str()))
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(anyhow::anyhow!("Lookup '{}' failed: {}", name, response.status()));
        }

        Ok(Some(response.json().await?))
    }

    pub async fn list_all(&self) -> Result<HashMap<String, ServiceInstance>> {
        let url = format!("{}{}", self.base_url, ENDPOINT_SERVICES);
        let response = self
            .send_with_retry(|| self.http_client.get(url.as_str()))
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("List services failed: {}", response.status()));
        }

        let body: ListServicesResponse = response.json().await?;
        Ok(body.services)
    }

    pub async fn set_status(&self, name: &str, status: InstanceStatus) -> Result<ServiceInstance> {
        let url = format!("{}{}/{}/status", self.base_url, ENDPOINT_SERVICES, name);
        let payload = StatusUpdateRequest { status };
        let response = self
            .send_with_retry(|| self.http_client.put(url.as_str()).json(&payload))
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "Status update for '{}' failed: {}",
                name,
                response.status()
            ));
        }

        Ok(response.json().await?)
    }

    pub async fn deregister(&self, name: &str) -> Result<bool> {
        let url = format!("{}{}/{}", self.base_url, ENDPOINT_SERVICES, name);
        let response = self
            .send_with_retry(|| self.http_client.delete(url.as_str()))
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("Deregister '{}' failed: {}", name, response.status()));
        }

        let body: DeregisterResponse = response.json().await?;
        Ok(body.removed)
    }

    async fn send_with_retry<F>(&self, build: F) -> Result<reqwest::Response>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut delay_ms = 150u64;

        for attempt in 0..ATTEMPTS {
            match build().timeout(REQUEST_TIMEOUT).send().await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    if attempt + 1 == ATTEMPTS {
                        return Err(anyhow::anyhow!(e));
                    }
                    tracing::warn!("Registry request failed (attempt {}): {}", attempt + 1, e);
                    let jitter = rand::random::<u64>() % 50;
                    tokio::time::sleep(Duration::from_millis(delay_ms + jitter)).await;
                    delay_ms = (delay_ms * 2).min(1200);
                }
            }
        }

        Err(anyhow::anyhow!("Retry attempts exhausted"))
    }
}
