//! Client-side booking submission with retry logic and idempotent delivery.
//!
//! This crate turns raw booking form fields into a validated request and
//! drives it to a remote booking API:
//! - Validates fields and assigns a client-generated `booking_id`, reused
//!   across retries as an idempotency key
//! - Sends the request with a bounded per-attempt timeout
//! - Retries network failures and retryable statuses with exponential
//!   backoff and jitter
//! - Classifies the response into a UI-presentable [`SubmissionResult`]
//! - Allows a single submission in flight at a time per controller
//!
//! # Example
//! ```ignore
//! use booker::{BookingForm, Submitter, SubmitterConfig};
//!
//! let submitter = Submitter::new(SubmitterConfig::new("https://api.example.com"));
//!
//! let form = BookingForm {
//!     customer_name: "Alice".into(),
//!     unit_type: "10x10".into(),
//!     start_date: "2024-05-01".into(),
//!     ..Default::default()
//! };
//!
//! let result = submitter.submit(&form).await?;
//! println!("{}", result.message());
//! ```

pub mod config;
pub mod error;
pub mod interpret;
pub mod request;
pub mod submitter;
pub mod transport;

// Re-export commonly used types
pub use config::{RetryConfig, SubmitterConfig};
pub use error::{BookerError, Result};
pub use interpret::{interpret, ErrorKind, SubmissionResult};
pub use request::{BookingForm, BookingRequest};
pub use submitter::{SubmissionState, Submitter};
pub use transport::{HttpClient, MockHttpClient, RawResponse, ReqwestHttpClient, Transport};
