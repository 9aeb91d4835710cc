//! Remote directory client.
//!
//! Every call carries an explicit timeout. Transport failures become
//! `RegistryUnavailable`; the HTTP status distinguishes `AlreadyBound` and `NotFound`.
//! Names travel percent-encoded, so any string registered through the JSON body can be
//! looked up and removed again.

use super::Registry;
use super::protocol::*;
use super::types::Endpoint;
use crate::error::{ElectionError, Result};

use reqwest::StatusCode;
use std::net::SocketAddr;
use std::time::Duration;

pub struct HttpRegistry {
    base_url: String,
    timeout: Duration,
    http_client: reqwest::Client,
}

impl HttpRegistry {
    pub fn new(directory_addr: SocketAddr, timeout: Duration) -> Self {
        Self::with_base_url(&format!("http://{}", directory_addr), timeout)
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            http_client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `{base}{prefix}/{name}`, with `name` percent-encoded as a single path segment.
    fn named_url(&self, prefix: &str, name: &str) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.url(prefix)).map_err(Self::unavailable)?;
        url.path_segments_mut()
            .map_err(|_| Self::unavailable(format!("{} cannot carry a path", self.base_url)))?
            .push(name);
        Ok(url)
    }

    fn unavailable(e: impl ToString) -> ElectionError {
        ElectionError::RegistryUnavailable(e.to_string())
    }
}

impl Registry for HttpRegistry {
    async fn register(&self, name: &str, endpoint: Endpoint) -> Result<()> {
        let request = RegisterRequest {
            name: name.to_string(),
            endpoint,
        };

        let response = self
            .http_client
            .post(self.url(ENDPOINT_REGISTER))
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(Self::unavailable)?;

        match response.status() {
            StatusCode::CONFLICT => Err(ElectionError::AlreadyBound(name.to_string())),
            status if status.is_success() => Ok(()),
            status => Err(Self::unavailable(format!("register returned {}", status))),
        }
    }

    async fn lookup(&self, name: &str) -> Result<Endpoint> {
        let response = self
            .http_client
            .get(self.named_url(ENDPOINT_LOOKUP, name)?)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(Self::unavailable)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ElectionError::NotFound(name.to_string()));
        }
        if !response.status().is_success() {
            return Err(Self::unavailable(format!(
                "lookup returned {}",
                response.status()
            )));
        }

        let body: LookupResponse = response.json().await.map_err(Self::unavailable)?;
        body.endpoint
            .ok_or_else(|| ElectionError::NotFound(name.to_string()))
    }

    async fn list(&self) -> Result<Vec<String>> {
        let response = self
            .http_client
            .get(self.url(ENDPOINT_LIST))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(Self::unavailable)?;

        if !response.status().is_success() {
            return Err(Self::unavailable(format!(
                "list returned {}",
                response.status()
            )));
        }

        let body: ListResponse = response.json().await.map_err(Self::unavailable)?;
        Ok(body.names)
    }

    async fn deregister(&self, name: &str) -> Result<()> {
        let response = self
            .http_client
            .delete(self.named_url(ENDPOINT_ENTRY, name)?)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(Self::unavailable)?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ElectionError::NotFound(name.to_string())),
            status if status.is_success() => Ok(()),
            status => Err(Self::unavailable(format!("deregister returned {}", status))),
        }
    }
}
