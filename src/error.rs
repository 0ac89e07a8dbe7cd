use thiserror::Error;

/// Caller-facing error type for every adapter operation.
///
/// Transport, credential and service failures all collapse into
/// [`SafarError::Unavailable`]; the underlying detail is logged, never returned.
#[derive(Error, Debug)]
pub enum SafarError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unable to connect to Safar AI.")]
    Unavailable,

    #[error("Empty response from AI")]
    EmptyResponse,

    #[error("Malformed structured response: {0}")]
    MalformedStructure(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SafarError>;

impl SafarError {
    /// Only transport-level failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SafarError::Unavailable)
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            SafarError::InvalidRequest(_) => "INVALID_REQUEST",
            SafarError::Unavailable => "ASSISTANT_UNAVAILABLE",
            SafarError::EmptyResponse => "EMPTY_RESPONSE",
            SafarError::MalformedStructure(_) => "MALFORMED_STRUCTURE",
        }
    }

    /// Empty and malformed replies both mean "could not generate" to a caller,
    /// as opposed to "offline".
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            SafarError::EmptyResponse | SafarError::MalformedStructure(_)
        )
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "retryable": self.is_retryable()
            }
        })
    }
}

/// Failures of a single exchange with the remote endpoint.
///
/// These carry provider detail for logs and retry decisions. They are
/// converted to [`SafarError::Unavailable`] at the adapter boundary.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("no API key found in {0}")]
    MissingCredential(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode response envelope: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),
}

impl TransportError {
    /// Whether a retry has a chance of succeeding.
    pub fn is_transient(&self) -> bool {
        match self {
            TransportError::MissingCredential(_) | TransportError::Decode(_) => false,
            TransportError::Http(err) => err.is_connect() || err.is_timeout() || err.is_request(),
            TransportError::Status { status, .. } => *status == 429 || *status >= 500,
            TransportError::Timeout(_) => true,
        }
    }
}

impl From<TransportError> for SafarError {
    fn from(_: TransportError) -> Self {
        SafarError::Unavailable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_hides_detail() {
        let err = SafarError::from(TransportError::Status {
            status: 401,
            message: "API key not valid. Please pass a valid API key.".to_string(),
        });

        assert_eq!(err.to_string(), "Unable to connect to Safar AI.");
        assert_eq!(err.error_code(), "ASSISTANT_UNAVAILABLE");
        assert!(err.is_retryable());
    }

    #[test]
    fn generation_failures_are_not_retryable() {
        let empty = SafarError::EmptyResponse;
        let malformed = SafarError::MalformedStructure("days[0]: missing `theme`".to_string());

        assert!(empty.is_generation_failure());
        assert!(malformed.is_generation_failure());
        assert!(!empty.is_retryable());
        assert!(!malformed.is_retryable());
        assert!(!SafarError::Unavailable.is_generation_failure());
    }

    #[test]
    fn error_payload_shape() {
        let payload = SafarError::MalformedStructure("bad".to_string()).to_error_payload();
        assert_eq!(payload["error"]["code"], "MALFORMED_STRUCTURE");
        assert_eq!(payload["error"]["retryable"], false);
        assert!(payload["error"]["message"]
            .as_str()
            .unwrap()
            .contains("bad"));
    }

    #[test]
    fn transient_classification() {
        let throttled = TransportError::Status {
            status: 429,
            message: "quota".to_string(),
        };
        let rejected = TransportError::Status {
            status: 403,
            message: "denied".to_string(),
        };

        assert!(throttled.is_transient());
        assert!(!rejected.is_transient());
        assert!(!TransportError::MissingCredential("API_KEY".to_string()).is_transient());
        assert!(TransportError::Timeout(std::time::Duration::from_secs(5)).is_transient());
    }
}
