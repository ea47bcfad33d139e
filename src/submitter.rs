//! Submission controller: drives build → send → interpret behind a
//! single-flight `submit` operation.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::config::SubmitterConfig;
use crate::error::{BookerError, Result};
use crate::interpret::{interpret, ErrorKind, SubmissionResult};
use crate::request::{BookingForm, BookingRequest};
use crate::transport::{HttpClient, ReqwestHttpClient, Transport};

/// Where a submitter currently is in the submission lifecycle.
#[derive(Debug, Clone)]
pub enum SubmissionState {
    /// No submission started, or the last one was discarded
    Idle,
    /// A request is on the wire or waiting out a retry backoff
    InFlight(BookingRequest),
    /// The last submission finished with this result
    Completed(SubmissionResult),
}

impl SubmissionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionState::InFlight(_))
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, SubmissionState::Completed(_))
    }
}

/// Client-side booking submission controller.
///
/// Drives one submission at a time through Idle → InFlight → Completed; the
/// next `submit` returns the state to Idle before starting over. A second
/// `submit` while one is in flight is rejected immediately with
/// [`BookerError::AlreadyInFlight`] — duplicates are refused, not queued.
pub struct Submitter<H: HttpClient = ReqwestHttpClient> {
    config: SubmitterConfig,
    transport: Transport<H>,
    state: Mutex<SubmissionState>,
    in_flight: AtomicBool,
}

impl Submitter<ReqwestHttpClient> {
    /// Create a submitter backed by a real HTTP client.
    pub fn new(config: SubmitterConfig) -> Self {
        Self::with_client(config, ReqwestHttpClient::new())
    }
}

impl<H: HttpClient> Submitter<H> {
    /// Create a submitter over a caller-supplied HTTP client. Tests use
    /// this to script responses.
    pub fn with_client(config: SubmitterConfig, client: H) -> Self {
        let transport = Transport::new(client, (&config).into());
        Self {
            config,
            transport,
            state: Mutex::new(SubmissionState::Idle),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SubmissionState {
        self.state.lock().clone()
    }

    /// Result of the last completed submission, if any.
    pub fn last_result(&self) -> Option<SubmissionResult> {
        match &*self.state.lock() {
            SubmissionState::Completed(result) => Some(result.clone()),
            _ => None,
        }
    }

    /// Submit a booking form.
    ///
    /// Validation failures short-circuit before any network traffic;
    /// network and server outcomes are folded into the returned
    /// [`SubmissionResult`]. The only `Err` is
    /// [`BookerError::AlreadyInFlight`], returned immediately when another
    /// submission is running on this controller.
    ///
    /// Dropping the returned future cancels the in-flight request and
    /// returns the submitter to idle, discarding the result; a request that
    /// already reached the server is deduplicated there by `booking_id`.
    pub async fn submit(&self, form: &BookingForm) -> Result<SubmissionResult> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            tracing::debug!("submission rejected: another is in flight");
            return Err(BookerError::AlreadyInFlight);
        }

        // Runs on every exit path, including the future being dropped
        // mid-flight: a still-InFlight state rolls back to Idle and the
        // flag clears.
        let _reset = scopeguard::guard((), |_| {
            let mut state = self.state.lock();
            if state.is_in_flight() {
                *state = SubmissionState::Idle;
            }
            self.in_flight.store(false, Ordering::Release);
        });

        *self.state.lock() = SubmissionState::Idle;

        let request = match BookingRequest::build(form) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(error = %e, "form rejected before send");
                let result = SubmissionResult::failure(ErrorKind::Validation, e.to_string());
                *self.state.lock() = SubmissionState::Completed(result.clone());
                return Ok(result);
            }
        };

        tracing::info!(booking_id = %request.booking_id, "submitting booking");
        *self.state.lock() = SubmissionState::InFlight(request.clone());

        let result = match self.transport.send(&self.config.endpoint, &request).await {
            Ok(response) => interpret(&response),
            Err(e) => SubmissionResult::failure(ErrorKind::Network, e.to_string()),
        };

        tracing::info!(
            booking_id = %request.booking_id,
            success = result.is_success(),
            "submission finished"
        );
        *self.state.lock() = SubmissionState::Completed(result.clone());

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::transport::{MockHttpClient, RawResponse};

    fn valid_form() -> BookingForm {
        BookingForm {
            customer_name: "Alice".to_string(),
            unit_type: "10x10".to_string(),
            start_date: "2024-05-01".to_string(),
            facility_id: None,
            end_date: None,
        }
    }

    fn test_submitter(mock: MockHttpClient) -> Submitter<MockHttpClient> {
        let mut config = SubmitterConfig::new("https://api.example.com");
        config.backoff_ms = 1;
        config.jitter_ms = 0;
        Submitter::with_client(config, mock)
    }

    fn confirmed() -> Result<RawResponse> {
        Ok(RawResponse {
            status: 200,
            body: r#"{"message":"Booking confirmed"}"#.to_string(),
        })
    }

    #[tokio::test]
    async fn test_submit_success_completes_state_machine() {
        let mock = MockHttpClient::new();
        mock.push_response(confirmed());
        let submitter = test_submitter(mock);

        assert!(matches!(submitter.state(), SubmissionState::Idle));
        assert!(submitter.last_result().is_none());

        let result = submitter.submit(&valid_form()).await.unwrap();
        assert_eq!(result.message(), "Booking confirmed");

        assert!(submitter.state().is_completed());
        assert_eq!(submitter.last_result(), Some(result));
    }

    #[tokio::test]
    async fn test_validation_failure_sends_nothing() {
        let mock = MockHttpClient::new();
        let submitter = test_submitter(mock.clone());

        let form = BookingForm {
            customer_name: String::new(),
            ..valid_form()
        };
        let result = submitter.submit(&form).await.unwrap();

        match result {
            SubmissionResult::Failure { kind, .. } => assert_eq!(kind, ErrorKind::Validation),
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_network_failure_is_folded_into_result() {
        let mock = MockHttpClient::new();
        // No scripted responses: every attempt errors until retries run out.
        let submitter = test_submitter(mock.clone());

        let result = submitter.submit(&valid_form()).await.unwrap();
        match result {
            SubmissionResult::Failure { kind, .. } => assert_eq!(kind, ErrorKind::Network),
            other => panic!("expected network failure, got {other:?}"),
        }
        assert_eq!(mock.call_count(), 4);
    }

    #[tokio::test]
    async fn test_concurrent_submit_is_rejected() {
        let mock = MockHttpClient::new();
        mock.set_delay(Duration::from_millis(100));
        mock.push_response(confirmed());
        let submitter = Arc::new(test_submitter(mock.clone()));

        let first = tokio::spawn({
            let submitter = submitter.clone();
            async move { submitter.submit(&valid_form()).await }
        });

        // Let the first submission reach the wire.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(submitter.state().is_in_flight());

        let second = submitter.submit(&valid_form()).await;
        assert!(matches!(second, Err(BookerError::AlreadyInFlight)));

        let first = first.await.unwrap().unwrap();
        assert!(first.is_success());
        // The rejected call never produced a second request.
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_dropped_submission_returns_to_idle() {
        let mock = MockHttpClient::new();
        mock.set_delay(Duration::from_secs(5));
        mock.push_response(confirmed());
        let submitter = test_submitter(mock.clone());

        let cancelled =
            tokio::time::timeout(Duration::from_millis(20), submitter.submit(&valid_form())).await;
        assert!(cancelled.is_err());

        // The discarded submission left no trace and the next one runs.
        assert!(matches!(submitter.state(), SubmissionState::Idle));

        mock.set_delay(Duration::from_millis(0));
        let result = submitter.submit(&valid_form()).await.unwrap();
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn test_next_submit_resets_completed_state() {
        let mock = MockHttpClient::new();
        mock.push_response(Ok(RawResponse {
            status: 400,
            body: r#"{"message":"bad date"}"#.to_string(),
        }));
        mock.push_response(confirmed());
        let submitter = test_submitter(mock);

        let first = submitter.submit(&valid_form()).await.unwrap();
        assert!(!first.is_success());

        let second = submitter.submit(&valid_form()).await.unwrap();
        assert!(second.is_success());
        assert_eq!(submitter.last_result(), Some(second));
    }
}
