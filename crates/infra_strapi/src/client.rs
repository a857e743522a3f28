//! HTTP client for the Strapi REST API

use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use core_kernel::{AdapterHealth, HealthCheckResult, HealthCheckable};

use crate::config::StrapiConfig;
use crate::error::{error_message, StrapiError};

/// Thin wrapper over `reqwest::Client` speaking JSON to one CMS
///
/// The client is cheap to share; adapters hold it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct StrapiClient {
    http: reqwest::Client,
    config: StrapiConfig,
}

impl StrapiClient {
    pub fn new(config: StrapiConfig) -> Result<Self, StrapiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StrapiError::Configuration(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &StrapiConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        token: Option<&str>,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, StrapiError> {
        let request = self.request(Method::GET, token, path).query(query);
        self.send(Method::GET, path, request).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        token: Option<&str>,
        path: &str,
        body: &B,
    ) -> Result<T, StrapiError> {
        let request = self.request(Method::POST, token, path).json(body);
        self.send(Method::POST, path, request).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        token: Option<&str>,
        path: &str,
        body: &B,
    ) -> Result<T, StrapiError> {
        let request = self.request(Method::PUT, token, path).json(body);
        self.send(Method::PUT, path, request).await
    }

    fn request(&self, method: Method, token: Option<&str>, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url, path);
        let request = self.http.request(method, url);
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, StrapiError> {
        let start = Instant::now();
        let response = request.send().await.map_err(|e| self.transport_error(path, e))?;
        let status = response.status();

        debug!(
            method = %method,
            path,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Strapi request"
        );

        if !status.is_success() {
            return Err(Self::status_error(path, response).await);
        }

        let body = response.bytes().await.map_err(|e| self.transport_error(path, e))?;
        serde_json::from_slice(&body).map_err(|e| StrapiError::decode(path, e.to_string()))
    }

    fn transport_error(&self, path: &str, error: reqwest::Error) -> StrapiError {
        if error.is_timeout() {
            StrapiError::Timeout {
                path: path.to_string(),
                timeout_ms: self.config.timeout.as_millis() as u64,
            }
        } else {
            StrapiError::Transport {
                path: path.to_string(),
                source: error,
            }
        }
    }

    async fn status_error(path: &str, response: Response) -> StrapiError {
        let status = response.status();
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok());
        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);

        if status.is_server_error() {
            warn!(path, status = status.as_u16(), message = %message, "Strapi server error");
        }

        StrapiError::Status {
            path: path.to_string(),
            status,
            message,
            retry_after_secs,
        }
    }
}

#[async_trait]
impl HealthCheckable for StrapiClient {
    /// Calls the CMS liveness endpoint, which answers 204
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();
        let result = self
            .http
            .get(format!("{}/_health", self.config.base_url))
            .send()
            .await;
        let latency_ms = start.elapsed().as_millis() as u64;

        let (status, message) = match result {
            Ok(response) if response.status().is_success() => (AdapterHealth::Healthy, None),
            Ok(response) if response.status() == StatusCode::TOO_MANY_REQUESTS => (
                AdapterHealth::Degraded,
                Some("rate limited".to_string()),
            ),
            Ok(response) => (
                AdapterHealth::Unhealthy,
                Some(format!("health endpoint answered {}", response.status())),
            ),
            Err(e) => (AdapterHealth::Unhealthy, Some(format!("CMS unreachable: {e}"))),
        };

        HealthCheckResult {
            adapter_id: "strapi".to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}
