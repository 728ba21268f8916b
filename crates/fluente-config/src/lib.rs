//! Shared configuration for the Fluente CLI and TUI.
//!
//! TOML profiles, credential resolution (keyring + env + plaintext), and
//! translation to a [`ServerConfig`] both binaries hand to
//! `fluente_api::ApiClient`. The CLI adds flag-aware overrides on top.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Resolved server settings ────────────────────────────────────────

/// Everything needed to connect and log in to one backend.
///
/// This is the single boundary where config types cross into API types:
/// consumers build an `ApiClient` from it and call `login`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub base_url: url::Url,
    pub email: String,
    pub password: SecretString,
    pub timeout: Duration,
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named backend profile.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Backend base URL (e.g., "https://school.example.com").
    pub server: String,

    /// Login email for this profile.
    pub email: Option<String>,

    /// Password (plaintext — prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Override timeout in seconds.
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("app", "fluente", "fluente").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("fluente");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load Config from an explicit path + environment.
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("FLUENTE_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

/// Serialize config to TOML and write to an explicit path.
pub fn save_config_to(cfg: &Config, path: &std::path::Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the password for a profile: env var, then keyring, then the
/// plaintext field.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's password_env → env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. Shared env var
    if let Ok(val) = std::env::var("FLUENTE_PASSWORD") {
        return Ok(SecretString::from(val));
    }

    // 3. System keyring
    if let Ok(entry) = keyring::Entry::new("fluente", &format!("{profile_name}/password")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 4. Plaintext in config
    if let Some(ref password) = profile.password {
        return Ok(SecretString::from(password.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Store a password in the system keyring for a profile.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    keyring::Entry::new("fluente", &format!("{profile_name}/password"))
        .and_then(|entry| entry.set_password(password))
        .map_err(|err| ConfigError::Validation {
            field: "keyring".into(),
            reason: err.to_string(),
        })
}

/// Build a [`ServerConfig`] from a profile — no CLI flag overrides.
///
/// Suitable for the TUI and other non-CLI consumers.
pub fn profile_to_server_config(
    profile: &Profile,
    profile_name: &str,
) -> Result<ServerConfig, ConfigError> {
    let base_url: url::Url = profile.server.parse().map_err(|_| ConfigError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {}", profile.server),
    })?;

    let email = profile
        .email
        .clone()
        .or_else(|| std::env::var("FLUENTE_EMAIL").ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })?;

    let password = resolve_password(profile, profile_name)?;
    let timeout = Duration::from_secs(profile.timeout.unwrap_or(30));

    Ok(ServerConfig {
        base_url,
        email,
        password,
        timeout,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn profile(server: &str) -> Profile {
        Profile {
            server: server.into(),
            email: Some("admin@school.example".into()),
            password: Some("plaintext-pw".into()),
            password_env: None,
            timeout: None,
        }
    }

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.default_profile.as_deref(), Some("default"));
        assert_eq!(config.defaults.output, "table");
        assert_eq!(config.defaults.timeout, 30);
    }

    #[test]
    fn plaintext_password_is_last_resort() {
        let profile = profile("http://localhost:3000");
        let secret = resolve_password(&profile, "default").unwrap();
        assert_eq!(secret.expose_secret(), "plaintext-pw");
    }

    #[test]
    fn invalid_server_url_is_a_validation_error() {
        let profile = profile("not a url");
        let result = profile_to_server_config(&profile, "default");
        assert!(matches!(result, Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn profile_resolves_to_server_config() {
        let mut profile = profile("http://localhost:3000");
        profile.timeout = Some(5);
        let server = profile_to_server_config(&profile, "default").unwrap();
        assert_eq!(server.base_url.as_str(), "http://localhost:3000/");
        assert_eq!(server.email, "admin@school.example");
        assert_eq!(server.timeout, Duration::from_secs(5));
    }

    #[test]
    fn save_and_reload_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config
            .profiles
            .insert("school".into(), profile("http://localhost:3000"));
        config.default_profile = Some("school".into());
        save_config_to(&config, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.default_profile.as_deref(), Some("school"));
        assert!(loaded.profiles.contains_key("school"));
    }
}
