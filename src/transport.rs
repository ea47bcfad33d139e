//! HTTP transport for booking submissions.
//!
//! This module defines the `HttpClient` trait to abstract a single HTTP
//! attempt, enabling testability with mock implementations, plus the
//! [`Transport`] driver that layers retry and backoff on top of it.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::config::RetryConfig;
use crate::error::Result;
use crate::request::BookingRequest;

/// Response from a single HTTP attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as a string
    pub body: String,
}

/// Trait for executing a single booking submission attempt.
///
/// This abstraction allows for different implementations (production vs.
/// testing) and makes the retry driver testable without real HTTP calls.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Execute one HTTP attempt for the given request.
    ///
    /// # Errors
    /// Returns an error if the request fails due to network issues, times
    /// out, or the URL is invalid.
    async fn execute(
        &self,
        endpoint: &str,
        request: &BookingRequest,
        timeout_ms: u64,
    ) -> Result<RawResponse>;
}

// ============================================================================
// Production Implementation using reqwest
// ============================================================================

/// Production HTTP client using reqwest.
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a new reqwest-based HTTP client.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    #[tracing::instrument(skip(self, request), fields(booking_id = %request.booking_id))]
    async fn execute(
        &self,
        endpoint: &str,
        request: &BookingRequest,
        timeout_ms: u64,
    ) -> Result<RawResponse> {
        let url = format!("{}/bookings", endpoint.trim_end_matches('/'));

        tracing::debug!(url = %url, timeout_ms, "sending booking request");

        // .json() also sets Content-Type: application/json.
        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_millis(timeout_ms))
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(status, response_len = body.len(), "booking request answered");

        Ok(RawResponse { status, body })
    }
}

// ============================================================================
// Test/Mock Implementation
// ============================================================================

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Mock HTTP client for testing.
///
/// Responses are scripted in FIFO order and every call is recorded, so tests
/// can assert both what was sent and how many attempts were made.
#[derive(Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<VecDeque<Result<RawResponse>>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
    delay: Arc<Mutex<Option<Duration>>>,
}

/// Record of a call made to the mock HTTP client.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub endpoint: String,
    pub booking_id: String,
    pub body: String,
    pub timeout_ms: u64,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the next response; responses are consumed in FIFO order.
    pub fn push_response(&self, response: Result<RawResponse>) {
        self.responses.lock().push_back(response);
    }

    /// Delay every call by the given duration, to keep a submission in
    /// flight long enough for tests to observe it.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    /// Get all calls that have been made to this mock client.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    /// Get the number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn execute(
        &self,
        endpoint: &str,
        request: &BookingRequest,
        timeout_ms: u64,
    ) -> Result<RawResponse> {
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.calls.lock().push(MockCall {
            endpoint: endpoint.to_string(),
            booking_id: request.booking_id.clone(),
            body: serde_json::to_string(request)?,
            timeout_ms,
        });

        self.responses.lock().pop_front().unwrap_or_else(|| {
            Err(crate::error::BookerError::Internal(
                "no mock response scripted".to_string(),
            ))
        })
    }
}

// ============================================================================
// Retry driver
// ============================================================================

/// Retrying driver around an [`HttpClient`].
///
/// Network failures and retryable statuses (429 and any 5xx) are retried
/// with exponential backoff and jitter; other statuses are returned to the
/// caller as-is. The same request (same `booking_id`) is sent on every
/// attempt, so the server can deduplicate.
pub struct Transport<H: HttpClient> {
    client: H,
    config: RetryConfig,
}

impl<H: HttpClient> Transport<H> {
    /// Create a new transport over the given client and retry tuning.
    pub fn new(client: H, config: RetryConfig) -> Self {
        Self { client, config }
    }

    /// Whether a status code indicates the server may succeed on a retry.
    pub fn is_retryable_status(status: u16) -> bool {
        status == 429 || (500..600).contains(&status)
    }

    /// Send the request, retrying up to `max_retries` times.
    ///
    /// When retries are exhausted, the last response (or last network
    /// error) is surfaced for the interpreter to classify.
    #[tracing::instrument(skip(self, request), fields(booking_id = %request.booking_id))]
    pub async fn send(&self, endpoint: &str, request: &BookingRequest) -> Result<RawResponse> {
        let mut attempt: u32 = 0;

        loop {
            match self
                .client
                .execute(endpoint, request, self.config.timeout_ms)
                .await
            {
                Ok(response) if !Self::is_retryable_status(response.status) => {
                    return Ok(response);
                }
                Ok(response) => {
                    if attempt >= self.config.max_retries {
                        tracing::warn!(
                            status = response.status,
                            attempt,
                            "retries exhausted, surfacing last response"
                        );
                        return Ok(response);
                    }
                    tracing::warn!(status = response.status, attempt, "retryable status");
                }
                Err(e) => {
                    if attempt >= self.config.max_retries {
                        tracing::warn!(error = %e, attempt, "retries exhausted");
                        return Err(e);
                    }
                    tracing::warn!(error = %e, attempt, "attempt failed");
                }
            }

            let delay = self.backoff_delay(attempt);
            tracing::debug!(backoff_ms = delay.as_millis() as u64, attempt, "backing off");
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    /// Exponential backoff: `backoff_ms * backoff_factor^attempt`, capped at
    /// `max_backoff_ms`, plus uniform jitter.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponential = self
            .config
            .backoff_ms
            .saturating_mul(self.config.backoff_factor.saturating_pow(attempt));
        let capped = exponential.min(self.config.max_backoff_ms);

        let jitter = if self.config.jitter_ms == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..=self.config.jitter_ms)
        };

        Duration::from_millis(capped + jitter)
    }
}
