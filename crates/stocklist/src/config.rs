//! CLI configuration: thin wrapper around `stocklist_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--api-url, --timeout, etc.).

use std::time::Duration;

use clap::ValueEnum;

use stocklist_core::{CatalogConfig, Category, TlsVerification};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use stocklist_config::{
    Config, Defaults, Profile, config_path, load_config, load_config_or_default, parse_api_url,
    save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Fill `--output` and `--color` from `[defaults]` when not given.
pub fn apply_defaults(global: &mut GlobalOpts, defaults: &Defaults) {
    if global.output.is_none() {
        global.output = OutputFormat::from_str(&defaults.output, true).ok();
    }
    if global.color.is_none() {
        global.color = ColorMode::from_str(&defaults.color, true).ok();
    }
}

/// Parse a `--category` value, falling back to the configured default.
pub fn resolve_category(raw: Option<&str>, defaults: &Defaults) -> Result<Category, CliError> {
    match raw {
        Some(value) => value.parse().map_err(|_| CliError::Validation {
            field: "category".into(),
            reason: format!("expected 'jackets', 'shirts', or 'accessories', got '{value}'"),
        }),
        None => Ok(defaults.category()?),
    }
}

/// Translate config + global flags into a `CatalogConfig`.
///
/// Precedence: flag/env, then the selected profile, then `[defaults]`,
/// then built-in values.
pub fn build_catalog_config(global: &GlobalOpts, cfg: &Config) -> Result<CatalogConfig, CliError> {
    let selected = cfg
        .select_profile(global.profile.as_deref())
        .map_err(|_| profile_not_found(global, cfg))?;
    let fallback = Profile::default();
    let profile = selected.map_or(&fallback, |(_, p)| p);

    // 1. API URL (flag > env > profile > built-in)
    let url_str = global.api_url.as_deref().unwrap_or(&profile.api_url);
    let url = parse_api_url(url_str)?;

    // 2. TLS verification
    let tls = if global.insecure || profile.insecure.unwrap_or(cfg.defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    // 3. Timeout
    let timeout_secs = global
        .timeout
        .or(profile.timeout)
        .unwrap_or(cfg.defaults.timeout);

    Ok(CatalogConfig::new(url)
        .with_tls(tls)
        .with_timeout(Duration::from_secs(timeout_secs)))
}

fn profile_not_found(global: &GlobalOpts, cfg: &Config) -> CliError {
    let available: Vec<_> = cfg.profiles.keys().cloned().collect();
    CliError::ProfileNotFound {
        name: active_profile_name(global, cfg),
        available: if available.is_empty() {
            "(none)".into()
        } else {
            available.join(", ")
        },
    }
}
