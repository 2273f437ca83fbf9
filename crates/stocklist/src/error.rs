//! What the user sees when a command fails.
//!
//! Library errors are folded into [`CliError`], whose miette help text
//! says what to try next and whose variant picks the exit status.

use miette::Diagnostic;
use thiserror::Error;

use stocklist_config::ConfigError;
use stocklist_core::CoreError;

/// Exit statuses, stable for scripts.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Network ──────────────────────────────────────────────────────
    #[error("Catalog API unreachable at {url}")]
    #[diagnostic(
        code(stocklist::connection_failed),
        help(
            "Is the machine online and the URL right?\n\
             Point elsewhere with --api-url, or change api_url in the profile."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("No answer from the catalog API within {seconds}s")]
    #[diagnostic(
        code(stocklist::timeout),
        help("Availability lookups are often slow; raise the limit with --timeout.")
    )]
    Timeout { seconds: u64 },

    // ── Lookups ──────────────────────────────────────────────────────
    #[error("No {resource_type} '{identifier}'")]
    #[diagnostic(
        code(stocklist::not_found),
        help("`stocklist {list_command}` lists what exists.")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Catalog API request failed: {message}")]
    #[diagnostic(
        code(stocklist::api_error),
        help("The API fails intermittently; running the command again usually works.")
    )]
    ApiError { message: String },

    #[error("The catalog API returned data that could not be read: {message}")]
    #[diagnostic(code(stocklist::malformed_response))]
    MalformedResponse { message: String },

    // ── Input ────────────────────────────────────────────────────────
    #[error("Bad {field}: {reason}")]
    #[diagnostic(code(stocklist::validation))]
    Validation { field: String, reason: String },

    #[error("No profile named '{name}'")]
    #[diagnostic(
        code(stocklist::profile_not_found),
        help("Known profiles: {available}\nAdd one with `stocklist config init`.")
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(stocklist::config))]
    Config(Box<figment::Error>),

    #[error("cannot encode config as TOML: {0}")]
    #[diagnostic(code(stocklist::config))]
    ConfigWrite(#[from] toml::ser::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::ProfileNotFound { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::ProductNotFound { identifier } => CliError::NotFound {
                resource_type: "product".into(),
                identifier,
                list_command: "products".into(),
            },

            CoreError::Api {
                message,
                status: Some(404),
            } => CliError::NotFound {
                resource_type: "resource".into(),
                identifier: message,
                list_command: "manufacturers".into(),
            },

            CoreError::Api { message, .. } => CliError::ApiError { message },

            CoreError::MalformedResponse { message } => CliError::MalformedResponse { message },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: String::new(),
            },
            ConfigError::Serialization(e) => CliError::ConfigWrite(e),
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}
