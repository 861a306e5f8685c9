//! Error types for catalog fetching and rendering.
//!
//! Every failure a pipeline can observe is folded into [`CatalogError`]
//! before it reaches the [`ErrorReporter`](crate::report::ErrorReporter).

use serde_json::json;
use std::any::Any;
use std::collections::HashMap;
use thiserror::Error;

/// The main error type for catalog operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The endpoint answered with a non-2xx status.
    #[error("Network error ({status})")]
    Network {
        /// The HTTP status code.
        status: u16,
    },

    /// The response body was not valid JSON.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The transport rejected the request (offline, DNS, TLS, ...).
    #[error("{0}")]
    Transport(String),

    /// Anything else caught at a pipeline boundary.
    #[error("{0}")]
    Unknown(String),
}

impl CatalogError {
    /// Creates a network error for a status code.
    #[must_use]
    pub fn network(status: u16) -> Self {
        Self::Network { status }
    }

    /// Creates a decode error.
    #[must_use]
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode(reason.into())
    }

    /// Creates a transport error.
    #[must_use]
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport(reason.into())
    }

    /// Wraps a panic payload caught at a pipeline boundary.
    ///
    /// String payloads are used verbatim; anything else is described by
    /// its type since it cannot be displayed.
    #[must_use]
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Self::Unknown(message)
    }

    /// Returns the HTTP status code, if this is a network error.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Network { status } => Some(*status),
            _ => None,
        }
    }

    /// Whether the pipeline recovers from this error locally.
    ///
    /// Only decode failures are recovered (as an empty payload).
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    /// Returns the short kind name used in diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network { .. } => "NetworkError",
            Self::Decode(_) => "DecodeError",
            Self::Transport(_) | Self::Unknown(_) => "UnknownError",
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("type".to_string(), json!(self.kind()));
        if let Some(status) = self.status_code() {
            map.insert("status".to_string(), json!(status));
        }
        map.insert("message".to_string(), json!(self.to_string()));
        map
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::network(status.as_u16());
        }
        if err.is_decode() {
            return Self::decode(err.to_string());
        }
        Self::transport(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_display() {
        let err = CatalogError::network(404);
        assert_eq!(err.to_string(), "Network error (404)");
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.kind(), "NetworkError");
    }

    #[test]
    fn test_transport_error_is_unknown_kind() {
        let err = CatalogError::transport("dns lookup failed");
        assert_eq!(err.to_string(), "dns lookup failed");
        assert_eq!(err.kind(), "UnknownError");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_decode_error_is_recoverable() {
        let err: CatalogError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert!(err.is_recoverable());
        assert_eq!(err.kind(), "DecodeError");
    }

    #[test]
    fn test_from_panic_payloads() {
        let boxed: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(CatalogError::from_panic(boxed.as_ref()), CatalogError::Unknown("boom".into()));

        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned boom"));
        assert_eq!(CatalogError::from_panic(boxed.as_ref()).to_string(), "owned boom");

        let boxed: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(CatalogError::from_panic(boxed.as_ref()).to_string(), "unknown panic payload");
    }

    #[test]
    fn test_to_dict() {
        let dict = CatalogError::network(500).to_dict();
        assert_eq!(dict.get("type").unwrap(), "NetworkError");
        assert_eq!(dict.get("status").unwrap(), 500);
        assert_eq!(dict.get("message").unwrap(), "Network error (500)");
    }
}
