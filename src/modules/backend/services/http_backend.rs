use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use tracing::{debug, info};

use super::backend_trait::{BackendApi, SubmitMatchingRequest};
use crate::config::BackendConfig;
use crate::core::{AppError, Result};
use crate::modules::matching::models::{BookingCandidate, Payment, SelectionEntry};

/// REST client for the wholesaler backend
///
/// Requests carry a bearer token, time out per `BackendConfig`, and are
/// retried with exponential backoff on transient failures.
pub struct HttpBackendClient {
    client: ClientWithMiddleware,
    base_url: Url,
    api_key: String,
}

impl HttpBackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let base_url = Url::parse(config.normalized_base_url()).map_err(|e| {
            AppError::Configuration(format!("Invalid BACKEND_BASE_URL {}: {}", config.base_url, e))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(AppError::Configuration(format!(
                "BACKEND_BASE_URL cannot be used as a base: {}",
                config.base_url
            )));
        }

        let http = Client::builder().timeout(config.timeout()).build()?;
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Append path segments to the base URL, escaping each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::internal("backend base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn ensure_success(response: Response, operation: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(AppError::backend(format!(
            "{} failed with {}: {}",
            operation, status, body
        )))
    }
}

#[async_trait]
impl BackendApi for HttpBackendClient {
    async fn fetch_payment(&self, payment_id: &str) -> Result<Payment> {
        let url = self.endpoint(&["payments", payment_id])?;
        debug!(payment_id, url = %url, "Fetching payment");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::not_found(format!("Payment {}", payment_id)));
        }

        let response = Self::ensure_success(response, "Fetch payment").await?;
        response
            .json::<Payment>()
            .await
            .map_err(|e| AppError::backend(format!("Failed to parse payment {}: {}", payment_id, e)))
    }

    async fn fetch_bookings_for_supplier(&self, supplier_id: &str) -> Result<Vec<BookingCandidate>> {
        let url = self.endpoint(&["suppliers", supplier_id, "bookings"])?;
        debug!(supplier_id, url = %url, "Fetching supplier bookings");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let response = Self::ensure_success(response, "Fetch supplier bookings").await?;
        let bookings = response.json::<Vec<BookingCandidate>>().await.map_err(|e| {
            AppError::backend(format!(
                "Failed to parse bookings for supplier {}: {}",
                supplier_id, e
            ))
        })?;

        debug!(supplier_id, count = bookings.len(), "Fetched supplier bookings");
        Ok(bookings)
    }

    async fn submit_matching(&self, payment_id: &str, entries: &[SelectionEntry]) -> Result<()> {
        let url = self.endpoint(&["payments", payment_id, "matched-bookings"])?;
        let body = SubmitMatchingRequest {
            matched_bookings: entries.to_vec(),
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::not_found(format!("Payment {}", payment_id)));
        }

        Self::ensure_success(response, "Submit matching").await?;
        info!(payment_id, entries = entries.len(), "Matching submitted to backend");
        Ok(())
    }

    async fn health(&self) -> Result<()> {
        let url = self.endpoint(&["health"])?;
        let response = self.client.get(url).send().await?;
        Self::ensure_success(response, "Backend health check").await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "wholesaler-backend"
    }
}
