//! `stocklist config`: edit the TOML file without opening it.

use dialoguer::{Confirm, Input};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Prompts fail when stdin is not a terminal.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("{e} (use `config init --defaults` when not on a terminal)"),
    }
}

fn profile_not_found(name: String, cfg: &Config) -> CliError {
    let available: Vec<_> = cfg.profiles.keys().cloned().collect();
    CliError::ProfileNotFound {
        name,
        available: if available.is_empty() {
            "(none)".into()
        } else {
            available.join(", ")
        },
    }
}

/// Apply one `key = value` assignment to a profile.
fn set_profile_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "api_url" | "api-url" => {
            config::parse_api_url(&value)?;
            profile.api_url = value;
        }
        "insecure" => {
            profile.insecure = Some(value.parse().map_err(|_| CliError::Validation {
                field: "insecure".into(),
                reason: "expected true or false".into(),
            })?);
        }
        "timeout" => {
            profile.timeout = Some(value.parse().map_err(|_| CliError::Validation {
                field: "timeout".into(),
                reason: "expected whole seconds".into(),
            })?);
        }
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: "expected one of api_url, insecure, timeout, ca_cert".into(),
            });
        }
    }
    Ok(())
}

// ── Handlers ────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init { defaults } => init(defaults),
        ConfigCommand::Show => show(global),
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }
        ConfigCommand::Set { key, value } => set(global, &key, value),
        ConfigCommand::Profiles => {
            list_profiles(&config::load_config_or_default());
            Ok(())
        }
        ConfigCommand::SetDefault { name } => set_default(name),
    }
}

/// Prompt for a profile unless `accept_defaults`, then make it the default.
fn init(accept_defaults: bool) -> Result<(), CliError> {
    let mut name = String::from("default");
    let mut profile = Profile::default();

    if !accept_defaults {
        eprintln!("Writing {}\n", config::config_path().display());
        prompt_profile(&mut name, &mut profile)?;
    }

    let mut cfg = config::load_config_or_default();
    cfg.profiles.insert(name.clone(), profile);
    cfg.default_profile = Some(name.clone());

    let path = config::save_config(&cfg)?;
    eprintln!("Saved profile '{name}' to {} and made it the default", path.display());
    Ok(())
}

fn prompt_profile(name: &mut String, profile: &mut Profile) -> Result<(), CliError> {
    *name = Input::new()
        .with_prompt("Profile")
        .default(name.clone())
        .interact_text()
        .map_err(prompt_err)?;

    profile.api_url = Input::new()
        .with_prompt("Catalog API base URL")
        .default(profile.api_url.clone())
        .validate_with(|raw: &String| {
            config::parse_api_url(raw).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()
        .map_err(prompt_err)?;

    let timeout: u64 = Input::new()
        .with_prompt("Timeout per request, in seconds")
        .default(30)
        .interact_text()
        .map_err(prompt_err)?;
    profile.timeout = Some(timeout);

    let insecure = Confirm::new()
        .with_prompt("Accept self-signed certificates?")
        .default(false)
        .interact()
        .map_err(prompt_err)?;
    profile.insecure = insecure.then_some(true);
    Ok(())
}

/// TOML in table mode, since that is what the user would edit.
fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config()?;
    let out = output::render_single(
        global.output.unwrap_or_default(),
        &cfg,
        |c| toml::to_string_pretty(c).unwrap_or_else(|_| format!("{c:#?}")),
        |_| config::config_path().display().to_string(),
    );
    output::print_output(out.trim_end(), global.quiet);
    Ok(())
}

/// Edits the active profile, creating it when absent.
fn set(global: &GlobalOpts, key: &str, value: String) -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();
    let name = config::active_profile_name(global, &cfg);

    set_profile_key(cfg.profiles.entry(name.clone()).or_default(), key, value)?;
    config::save_config(&cfg)?;
    eprintln!("Updated {key} in profile '{name}'");
    Ok(())
}

/// One name per line; the default is starred.
fn list_profiles(cfg: &Config) {
    if cfg.profiles.is_empty() {
        eprintln!("No profiles yet; `stocklist config init` creates one");
        return;
    }
    let default = cfg.default_profile.as_deref().unwrap_or("default");
    for name in cfg.profiles.keys() {
        if name == default {
            println!("{name} *");
        } else {
            println!("{name}");
        }
    }
}

fn set_default(name: String) -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();
    if !cfg.profiles.contains_key(&name) {
        return Err(profile_not_found(name, &cfg));
    }
    cfg.default_profile = Some(name.clone());
    config::save_config(&cfg)?;
    eprintln!("'{name}' is now the default profile");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_profile_key_validates_values() {
        let mut profile = Profile::default();

        set_profile_key(&mut profile, "timeout", "12".into()).unwrap();
        set_profile_key(&mut profile, "insecure", "true".into()).unwrap();
        set_profile_key(&mut profile, "api-url", "http://localhost:8080".into()).unwrap();
        assert_eq!(profile.timeout, Some(12));
        assert_eq!(profile.insecure, Some(true));
        assert_eq!(profile.api_url, "http://localhost:8080");

        assert!(set_profile_key(&mut profile, "timeout", "soon".into()).is_err());
        assert!(set_profile_key(&mut profile, "api_url", "ftp://x".into()).is_err());
        assert!(set_profile_key(&mut profile, "site", "x".into()).is_err());
    }
}
