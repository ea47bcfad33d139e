//! Classification of raw HTTP responses into submission results.

use serde::Deserialize;

use crate::transport::RawResponse;

/// Classified failure cause, surfaced to the UI alongside the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad form input; no request was sent
    Validation,
    /// The request never got an HTTP response (connect failure, timeout)
    Network,
    /// The server answered, but not with the expected body shape
    Parse,
    /// The server answered with an error status
    Server,
}

/// Outcome of one logical submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Success { message: String },
    Failure { kind: ErrorKind, message: String },
}

impl SubmissionResult {
    pub fn success(message: impl Into<String>) -> Self {
        SubmissionResult::Success {
            message: message.into(),
        }
    }

    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        SubmissionResult::Failure {
            kind,
            message: message.into(),
        }
    }

    /// The message to display to the user.
    pub fn message(&self) -> &str {
        match self {
            SubmissionResult::Success { message } => message,
            SubmissionResult::Failure { message, .. } => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success { .. })
    }
}

/// Body shape the booking API is expected to return.
#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

/// Classify a raw response into a [`SubmissionResult`].
///
/// Total over its input: malformed bodies and error statuses come back as
/// failures, never as panics or errors.
pub fn interpret(response: &RawResponse) -> SubmissionResult {
    let parsed: Result<ApiMessage, _> = serde_json::from_str(&response.body);
    let success = (200..300).contains(&response.status);

    match (success, parsed) {
        (true, Ok(api)) => SubmissionResult::success(api.message),
        (true, Err(e)) => SubmissionResult::failure(
            ErrorKind::Parse,
            format!("malformed response body: {e}"),
        ),
        (false, Ok(api)) => SubmissionResult::failure(ErrorKind::Server, api.message),
        (false, Err(_)) => SubmissionResult::failure(
            ErrorKind::Server,
            format!("booking service returned status {}", response.status),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_ok_response_is_success() {
        let result = interpret(&response(200, r#"{"message":"ok"}"#));
        assert_eq!(result, SubmissionResult::success("ok"));
    }

    #[test]
    fn test_created_counts_as_success() {
        let result = interpret(&response(201, r#"{"message":"Booking successful!"}"#));
        assert_eq!(result, SubmissionResult::success("Booking successful!"));
    }

    #[test]
    fn test_server_error_carries_server_message() {
        let result = interpret(&response(400, r#"{"message":"bad date"}"#));
        assert_eq!(
            result,
            SubmissionResult::failure(ErrorKind::Server, "bad date")
        );
    }

    #[test]
    fn test_server_error_without_message_gets_generic_text() {
        let result = interpret(&response(502, "<html>Bad Gateway</html>"));
        assert_eq!(
            result,
            SubmissionResult::failure(ErrorKind::Server, "booking service returned status 502")
        );
    }

    #[test]
    fn test_malformed_success_body_is_parse_failure() {
        let result = interpret(&response(200, "not json"));
        match result {
            SubmissionResult::Failure { kind, .. } => assert_eq!(kind, ErrorKind::Parse),
            other => panic!("expected parse failure, got {other:?}"),
        }
    }

    #[test]
    fn test_success_body_missing_message_is_parse_failure() {
        let result = interpret(&response(200, r#"{"status":"ok"}"#));
        match result {
            SubmissionResult::Failure { kind, .. } => assert_eq!(kind, ErrorKind::Parse),
            other => panic!("expected parse failure, got {other:?}"),
        }
    }

    #[test]
    fn test_extra_fields_are_tolerated() {
        let result = interpret(&response(200, r#"{"message":"ok","booking_id":"b-1"}"#));
        assert_eq!(result, SubmissionResult::success("ok"));
    }
}
