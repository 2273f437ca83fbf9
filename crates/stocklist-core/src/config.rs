// ── Runtime catalog configuration ──
//
// Describes *where* the catalog API lives and how to reach it. Core never
// reads config files; the CLI/TUI builds a `CatalogConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// Public catalog API used when no profile overrides it.
pub const DEFAULT_API_URL: &str = "https://bad-api-assignment.reaktor.com";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certs on local mirrors).
    DangerAcceptInvalid,
}

/// Configuration for talking to one catalog API.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API root, e.g. `https://bad-api-assignment.reaktor.com`.
    pub api_url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl CatalogConfig {
    /// Config for `api_url` with strict TLS and a 30s timeout.
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_tls(mut self, tls: TlsVerification) -> Self {
        self.tls = tls;
        self
    }
}
