use thiserror::Error;

const GENERIC_MESSAGE: &str = "failed to load data";
const REJECTED_MESSAGE: &str = "request was rejected by the service";

/// Why a fetch did not produce a page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("unexpected http status: {code}")]
    Status { code: u16 },

    /// `success: false` in an otherwise well-formed response.
    #[error("rejected by service: {}", .0.as_deref().unwrap_or("no message"))]
    Rejected(Option<String>),

    #[error("invalid response: {0}")]
    Decode(String),

    #[error("timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

impl FetchError {
    /// Text surfaced to the user as the error message.
    ///
    /// Business errors carry the service's message when it sent one; every
    /// other failure gets a generic message.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Rejected(Some(msg)) if !msg.trim().is_empty() => msg.clone(),
            FetchError::Rejected(_) => REJECTED_MESSAGE.to_string(),
            _ => GENERIC_MESSAGE.to_string(),
        }
    }

    pub fn is_business(&self) -> bool {
        matches!(self, FetchError::Rejected(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_error_uses_service_message() {
        let err = FetchError::Rejected(Some("not allowed".into()));
        assert_eq!(err.user_message(), "not allowed");
        assert!(err.is_business());
    }

    #[test]
    fn business_error_without_message_uses_default() {
        assert_eq!(FetchError::Rejected(None).user_message(), REJECTED_MESSAGE);
        assert_eq!(
            FetchError::Rejected(Some("  ".into())).user_message(),
            REJECTED_MESSAGE
        );
    }

    #[test]
    fn transport_errors_are_generic() {
        for err in [
            FetchError::Transport("connection refused".into()),
            FetchError::Status { code: 502 },
            FetchError::Decode("expected object".into()),
            FetchError::Timeout { timeout_ms: 100 },
        ] {
            assert_eq!(err.user_message(), GENERIC_MESSAGE);
            assert!(!err.is_business());
        }
    }
}
