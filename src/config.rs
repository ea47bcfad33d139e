//! Configuration for the submission client.

/// Configuration for a [`Submitter`](crate::Submitter).
///
/// The endpoint base URL has no sensible default and must be supplied at
/// construction; the tuning knobs start at values suitable for an
/// interactive form (short backoff, 10s per-attempt timeout).
#[derive(Debug, Clone)]
pub struct SubmitterConfig {
    /// Base URL of the booking API (e.g., "https://api.example.com")
    pub endpoint: String,

    /// Maximum number of retry attempts before giving up
    pub max_retries: u32,

    /// Base backoff duration in milliseconds (will be exponentially increased)
    pub backoff_ms: u64,

    /// Factor by which the backoff_ms is increased with each retry
    pub backoff_factor: u64,

    /// Maximum backoff time in milliseconds
    pub max_backoff_ms: u64,

    /// Upper bound of the uniform jitter added to each backoff, in milliseconds
    pub jitter_ms: u64,

    /// Timeout for each individual request attempt in milliseconds
    pub timeout_ms: u64,
}

impl SubmitterConfig {
    /// Create a configuration for the given endpoint with default tuning.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            max_retries: 3,
            backoff_ms: 500,
            backoff_factor: 2,
            max_backoff_ms: 8_000,
            jitter_ms: 100,
            timeout_ms: 10_000,
        }
    }
}

/// Retry and timeout tuning consumed by the transport.
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub backoff_ms: u64,
    pub backoff_factor: u64,
    pub max_backoff_ms: u64,
    pub jitter_ms: u64,
    pub timeout_ms: u64,
}

impl From<&SubmitterConfig> for RetryConfig {
    fn from(config: &SubmitterConfig) -> Self {
        RetryConfig {
            max_retries: config.max_retries,
            backoff_ms: config.backoff_ms,
            backoff_factor: config.backoff_factor,
            max_backoff_ms: config.max_backoff_ms,
            jitter_ms: config.jitter_ms,
            timeout_ms: config.timeout_ms,
        }
    }
}
