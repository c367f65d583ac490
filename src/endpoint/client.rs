use super::types::CreateEndpointRequest;
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use tracing::debug;

pub const API_KEY_VAR: &str = "HF_API_KEY";

/// The Inference Endpoints API, as far as provisioning needs it.
#[async_trait]
pub trait EndpointApi: Send + Sync {
    /// Submits a creation request and returns the raw response body.
    async fn create_endpoint(&self, request: &CreateEndpointRequest) -> Result<Value>;

    /// Fetches the endpoint descriptor, including `status`.
    async fn get_endpoint(&self, name: &str) -> Result<Value>;
}

/// A non-empty bearer token. `Debug` output is redacted.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(Error::MissingApiKey {
                var: API_KEY_VAR.to_string(),
            });
        }
        Ok(Self(key))
    }

    pub fn from_env() -> Result<Self> {
        Self::from_var(API_KEY_VAR)
    }

    pub fn from_var(var: &str) -> Result<Self> {
        let key = std::env::var(var).map_err(|_| Error::MissingApiKey {
            var: var.to_string(),
        })?;
        Self::new(key).map_err(|_| Error::MissingApiKey {
            var: var.to_string(),
        })
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

pub struct HfEndpointClient {
    client: reqwest::Client,
    api_base: String,
    username: String,
    api_key: ApiKey,
}

impl HfEndpointClient {
    pub fn new(api_base: impl Into<String>, username: impl Into<String>, api_key: ApiKey) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            username: username.into(),
            api_key,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/v2/endpoint/{}", self.api_base, self.username)
    }
}

#[async_trait]
impl EndpointApi for HfEndpointClient {
    async fn create_endpoint(&self, request: &CreateEndpointRequest) -> Result<Value> {
        let url = self.collection_url();
        debug!("Creating endpoint '{}' at {}", request.name, url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose())
            .json(request)
            .send()
            .await?;

        // error payloads come back with non-2xx codes; callers inspect the body
        let out: Value = response.json().await?;
        Ok(out)
    }

    async fn get_endpoint(&self, name: &str) -> Result<Value> {
        let url = format!("{}/{}", self.collection_url(), name);

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.api_key.expose())
            .send()
            .await?;

        let info: Value = response.json().await?;
        Ok(info)
    }
}
