//! HTTP client for the external analysis service

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client as HttpClient;
use std::time::Duration;
use txanalyzer_config::AnalysisConfig;

use crate::error::{CoreError, CoreResult};
use crate::models::{AnalysisResult, ServiceHealth, TransactionInput};

/// The collaborator that classifies transactions
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Submit one transaction and return the service's verdict
    async fn analyze(&self, transaction: &TransactionInput) -> CoreResult<AnalysisResult>;

    /// Probe the service; never fails, unreachable services report as such
    async fn health(&self) -> ServiceHealth;
}

/// reqwest-backed analysis service client
pub struct HttpAnalysisClient {
    http_client: HttpClient,
    endpoint_url: String,
    health_url: String,
}

impl HttpAnalysisClient {
    /// Create a client for the configured service
    pub fn new(config: &AnalysisConfig) -> CoreResult<Self> {
        let mut builder = HttpClient::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build().map_err(|e| CoreError::InternalError {
            message: format!("Failed to build HTTP client: {}", e),
        })?;

        Ok(Self {
            http_client,
            endpoint_url: config.endpoint_url(),
            health_url: config.health_url(),
        })
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Build an error from a non-success response, preferring the service's own message
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> CoreError {
        let body_text = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<serde_json::Value>(&body_text)
            .ok()
            .and_then(|json| {
                json.get("error")
                    .or_else(|| json.get("message"))
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            })
            .unwrap_or(body_text);

        CoreError::Service {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisClient {
    /// POST the transaction as JSON and parse the verdict
    async fn analyze(&self, transaction: &TransactionInput) -> CoreResult<AnalysisResult> {
        let response = self.http_client
            .post(&self.endpoint_url)
            .headers(Self::create_headers())
            .json(transaction)
            .send()
            .await
            .map_err(|e| CoreError::Network { message: e.to_string() })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        let body = response.text().await?;
        serde_json::from_str::<AnalysisResult>(&body)
            .map_err(|e| CoreError::InvalidResponse { message: e.to_string() })
    }

    async fn health(&self) -> ServiceHealth {
        let response = match self.http_client.get(&self.health_url).send().await {
            Ok(response) => response,
            Err(e) => {
                log::debug!("Health probe to {} failed: {}", self.health_url, e);
                return ServiceHealth {
                    reachable: false,
                    status: "unreachable".to_string(),
                };
            }
        };

        let status = response.status();
        if !status.is_success() {
            return ServiceHealth {
                reachable: false,
                status: format!("HTTP {}", status.as_u16()),
            };
        }

        let reported = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|json| json.get("status").and_then(|v| v.as_str()).map(str::to_string))
            .unwrap_or_else(|| "unknown".to_string());

        ServiceHealth {
            reachable: true,
            status: reported,
        }
    }
}
