//! Backend client error types.

/// Errors from talking to the transit backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Request never produced a response (network, DNS, timeout)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("upstream error {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Response body is not valid JSON
    #[error("JSON parse error: {message}")]
    Decode {
        message: String,
        body: Option<String>,
    },

    /// JSON is valid but not shaped as expected
    #[error("unexpected response shape: {0}")]
    DataShape(String),

    /// Client could not be set up (bad config, missing fixture data)
    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl BackendError {
    /// Whether the request failed before any response arrived.
    pub fn is_transport(&self) -> bool {
        matches!(self, BackendError::Transport(_))
    }

    /// HTTP status of an upstream rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = BackendError::Upstream {
            status: 503,
            body: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "upstream error 503: Service Unavailable");
        assert_eq!(err.status(), Some(503));
        assert!(!err.is_transport());

        let err = BackendError::Decode {
            message: "expected value at line 1 column 1".into(),
            body: Some("<html>".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("expected value"));

        let err = BackendError::DataShape("missing field `destination`".into());
        assert_eq!(
            err.to_string(),
            "unexpected response shape: missing field `destination`"
        );
        assert_eq!(err.status(), None);
    }
}
