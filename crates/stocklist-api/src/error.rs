use thiserror::Error;

/// Everything that can go wrong talking to the catalog API.
///
/// `stocklist-core` folds these into its own error type; nothing above
/// that layer sees a raw `reqwest` error.
#[derive(Debug, Error)]
pub enum Error {
    // ── Network ─────────────────────────────────────────────────────
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("bad endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("no response within {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Certificate loading or TLS backend setup.
    #[error("TLS setup failed: {0}")]
    Tls(String),

    // ── Response ────────────────────────────────────────────────────
    /// The server answered with a non-2xx status. The preview is the
    /// first few hundred bytes of the body.
    #[error("server returned {status}: {body_preview}")]
    Status { status: u16, body_preview: String },

    /// The body did not match the expected payload shape. `body` keeps
    /// the full text for logging.
    #[error("unexpected payload: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// HTTP status attached to the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Retrying (the user pressing reload) has a fair chance of success.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Transport(e) => e.is_connect() || e.is_timeout(),
            _ => self.status().is_some_and(|s| s >= 500),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
