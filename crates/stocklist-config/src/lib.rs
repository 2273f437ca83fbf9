//! Shared configuration for the stocklist CLI and TUI.
//!
//! TOML profiles, file location, figment-based loading, and translation
//! to `stocklist_core::CatalogConfig`. Both binaries depend on this crate;
//! the CLI adds `GlobalOpts`-aware overrides on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stocklist_core::{CatalogConfig, Category, DEFAULT_API_URL, TlsVerification};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found")]
    UnknownProfile { name: String },

    #[error("cannot encode config as TOML: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("cannot read configuration: {0}")]
    Figment(Box<figment::Error>),

    #[error("config file I/O: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── File layout ─────────────────────────────────────────────────────

/// Contents of `config.toml`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is requested.
    pub default_profile: Option<String>,

    /// Settings that apply whatever the profile.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named API profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Pick the profile to use.
    ///
    /// An explicitly requested profile must exist. Without a request the
    /// `default_profile` is used when present; otherwise `None`, meaning
    /// the built-in API applies.
    pub fn select_profile<'a>(
        &'a self,
        requested: Option<&'a str>,
    ) -> Result<Option<(&'a str, &'a Profile)>, ConfigError> {
        if let Some(name) = requested {
            return self
                .profiles
                .get(name)
                .map(|p| Some((name, p)))
                .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() });
        }
        Ok(self
            .default_profile
            .as_deref()
            .and_then(|name| self.profiles.get(name).map(|p| (name, p))))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Category shown first (`jackets`, `shirts`, `accessories`).
    #[serde(default = "default_category")]
    pub category: String,

    /// Letter selected on startup.
    #[serde(default = "default_letter")]
    pub letter: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            category: default_category(),
            letter: default_letter(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

impl Defaults {
    pub fn category(&self) -> Result<Category, ConfigError> {
        self.category.parse().map_err(|_| ConfigError::Validation {
            field: "defaults.category".into(),
            reason: format!(
                "expected 'jackets', 'shirts', or 'accessories', got '{}'",
                self.category
            ),
        })
    }

    /// The startup letter, uppercased.
    pub fn letter(&self) -> Result<char, ConfigError> {
        let mut chars = self.letter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c.to_ascii_uppercase()),
            _ => Err(ConfigError::Validation {
                field: "defaults.letter".into(),
                reason: format!("expected a single character, got '{}'", self.letter),
            }),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_category() -> String {
    "jackets".into()
}
fn default_letter() -> String {
    "A".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named API profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// API base URL (e.g., "https://bad-api-assignment.reaktor.com").
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Extra PEM root to trust.
    pub ca_cert: Option<PathBuf>,

    /// Falls back to `defaults.insecure`.
    pub insecure: Option<bool>,

    /// Seconds; falls back to `defaults.timeout`.
    pub timeout: Option<u64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            ca_cert: None,
            insecure: None,
            timeout: None,
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}

// ── Location ────────────────────────────────────────────────────────

const FILE_NAME: &str = "config.toml";

/// Platform config directory (`~/.config/stocklist` on Linux), or
/// `$HOME/.config/stocklist` when the platform lookup fails.
pub fn config_path() -> PathBuf {
    let dir = ProjectDirs::from("com", "stocklist", "stocklist").map_or_else(
        || {
            let home = std::env::var_os("HOME")
                .map_or_else(|| PathBuf::from("."), PathBuf::from);
            home.join(".config").join("stocklist")
        },
        |dirs| dirs.config_dir().to_path_buf(),
    );
    dir.join(FILE_NAME)
}

// ── Loading ─────────────────────────────────────────────────────────

/// [`load_config_from`] the platform location.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` + environment. A missing file yields the defaults.
///
/// Environment keys use a `STOCKLIST_` prefix and `__` for nesting:
/// `STOCKLIST_DEFAULTS__OUTPUT=json`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    Ok(Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("STOCKLIST_").split("__"))
        .extract()?)
}

/// For commands that must work before a valid config exists.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Saving ──────────────────────────────────────────────────────────

/// Write `cfg` to [`config_path`] and return where it went.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(cfg)?)?;
    Ok(())
}

// ── Translation to core config ──────────────────────────────────────

/// Build a `CatalogConfig` from a profile, falling back to `defaults`
/// for TLS and timeout settings the profile leaves unset.
pub fn profile_to_catalog_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<CatalogConfig, ConfigError> {
    let url = parse_api_url(&profile.api_url)?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ca) = &profile.ca_cert {
        TlsVerification::CustomCa(ca.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));

    Ok(CatalogConfig::new(url).with_tls(tls).with_timeout(timeout))
}

/// Resolve the `CatalogConfig` for an optional profile name.
///
/// Used by the TUI; the CLI layers its flag overrides over the same
/// profile selection.
pub fn resolve_catalog_config(
    cfg: &Config,
    requested: Option<&str>,
) -> Result<CatalogConfig, ConfigError> {
    match cfg.select_profile(requested)? {
        Some((_, profile)) => profile_to_catalog_config(profile, &cfg.defaults),
        None => profile_to_catalog_config(&Profile::default(), &cfg.defaults),
    }
}

/// Parse and validate an API base URL.
pub fn parse_api_url(raw: &str) -> Result<url::Url, ConfigError> {
    let url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: "api_url".into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("expected an http(s) URL, got '{raw}'"),
        });
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.output, "table");
        assert_eq!(cfg.defaults.category().unwrap(), Category::Jackets);
        assert_eq!(cfg.defaults.letter().unwrap(), 'A');
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn reads_profiles_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "mirror"

[defaults]
output = "json"
category = "shirts"
letter = "k"

[profiles.mirror]
api_url = "http://localhost:8080"
timeout = 5
insecure = true
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.defaults.output, "json");
        assert_eq!(cfg.defaults.category().unwrap(), Category::Shirts);
        assert_eq!(cfg.defaults.letter().unwrap(), 'K');

        let catalog = resolve_catalog_config(&cfg, None).unwrap();
        assert_eq!(catalog.api_url.as_str(), "http://localhost:8080/");
        assert_eq!(catalog.timeout, Duration::from_secs(5));
        assert_eq!(catalog.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn save_then_load_keeps_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                api_url: "https://mirror.example.com".into(),
                ca_cert: Some(PathBuf::from("/etc/ssl/mirror.pem")),
                insecure: None,
                timeout: None,
            },
        );
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        let catalog = resolve_catalog_config(&loaded, None).unwrap();
        assert_eq!(
            catalog.tls,
            TlsVerification::CustomCa(PathBuf::from("/etc/ssl/mirror.pem"))
        );
        assert_eq!(catalog.timeout, Duration::from_secs(30));
    }

    #[test]
    fn unknown_requested_profile_is_an_error() {
        let cfg = Config::default();
        let err = resolve_catalog_config(&cfg, Some("nope")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProfile { .. }));
    }

    #[test]
    fn no_profiles_uses_builtin_api() {
        let catalog = resolve_catalog_config(&Config::default(), None).unwrap();
        assert_eq!(catalog.api_url.as_str(), "https://bad-api-assignment.reaktor.com/");
        assert_eq!(catalog.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse_api_url("ftp://example.com").is_err());
        assert!(parse_api_url("not a url").is_err());

        let defaults = Defaults {
            category: "hats".into(),
            letter: "AB".into(),
            ..Defaults::default()
        };
        assert!(defaults.category().is_err());
        assert!(defaults.letter().is_err());
    }
}
