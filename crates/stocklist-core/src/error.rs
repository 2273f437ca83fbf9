// ── Errors ──
//
// The CLI and TUI only ever see CoreError; HTTP details are folded in
// by the From<stocklist_api::Error> impl below.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // ── Reaching the API ─────────────────────────────────────────────
    #[error("Cannot connect to catalog API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Catalog API timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── What it answered ─────────────────────────────────────────────
    #[error("Catalog API request failed: {message}")]
    Api { message: String, status: Option<u16> },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    // ── Lookups ──────────────────────────────────────────────────────
    #[error("Product not found: {identifier}")]
    ProductNotFound { identifier: String },

    #[error("Bad configuration: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Returns `true` for a missing product or a 404 from the API.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ProductNotFound { .. } | Self::Api { status: Some(404), .. }
        )
    }
}

// ── From the HTTP layer ──────────────────────────────────────────────

impl From<stocklist_api::Error> for CoreError {
    fn from(err: stocklist_api::Error) -> Self {
        match err {
            stocklist_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            stocklist_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            stocklist_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            stocklist_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            stocklist_api::Error::Status {
                status,
                body_preview,
            } => CoreError::Api {
                message: if body_preview.is_empty() {
                    format!("HTTP {status}")
                } else {
                    format!("HTTP {status}: {body_preview}")
                },
                status: Some(status),
            },
            stocklist_api::Error::Deserialization { message, body: _ } => {
                CoreError::MalformedResponse { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_404_is_not_found() {
        let err = CoreError::from(stocklist_api::Error::Status {
            status: 404,
            body_preview: String::new(),
        });
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Catalog API request failed: HTTP 404");
    }

    #[test]
    fn deserialization_maps_to_malformed() {
        let err = CoreError::from(stocklist_api::Error::Deserialization {
            message: "expected value".into(),
            body: "<html>".into(),
        });
        assert!(matches!(err, CoreError::MalformedResponse { .. }));
        assert!(!err.is_not_found());
    }

    #[test]
    fn timeout_keeps_duration() {
        let err = CoreError::from(stocklist_api::Error::Timeout { timeout_secs: 5 });
        assert!(matches!(err, CoreError::Timeout { timeout_secs: 5 }));
    }
}
