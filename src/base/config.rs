//! Load configuration via `config` crate with env-override support.

use std::{
    net::IpAddr,
    ops::Deref,
    path::Path,
    sync::Arc,
};

use serde::Deserialize;

use crate::base::replies;

use super::types::{Res, Void};

/// Default address to bind the activity endpoint to.
fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default port for the activity endpoint (the conventional Bot Framework port).
fn default_port() -> u16 {
    3978
}

/// Default timeout, in seconds, for outbound connector calls.
fn default_connector_timeout_secs() -> u64 {
    30
}

/// Default welcome message for new conversation members.
fn default_welcome_message() -> String {
    replies::WELCOME.to_string()
}

/// Default apology sent when a handler fails.
fn default_apology_message() -> String {
    replies::APOLOGY.to_string()
}

/// Configuration for the empty-agent application.
///
/// Trivially cloneable; the settings themselves live behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Config {
    /// The shared settings.
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inner: Arc::new(ConfigInner::default()),
        }
    }
}

/// The settings behind [`Config`].
#[derive(Debug, Deserialize, Clone)]
pub struct ConfigInner {
    /// Address the activity endpoint binds to (`EMPTY_AGENT_HOST`).
    #[serde(default = "default_host")]
    pub host: String,
    /// Port the activity endpoint binds to (`EMPTY_AGENT_PORT`).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Timeout for replies posted to the channel connector (`EMPTY_AGENT_CONNECTOR_TIMEOUT_SECS`).
    #[serde(default = "default_connector_timeout_secs")]
    pub connector_timeout_secs: u64,
    /// Optional override of the welcome message (`EMPTY_AGENT_WELCOME_MESSAGE`).
    #[serde(default = "default_welcome_message")]
    pub welcome_message: String,
    /// Optional override of the error apology (`EMPTY_AGENT_APOLOGY_MESSAGE`).
    #[serde(default = "default_apology_message")]
    pub apology_message: String,
}

impl Default for ConfigInner {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            connector_timeout_secs: default_connector_timeout_secs(),
            welcome_message: default_welcome_message(),
            apology_message: default_apology_message(),
        }
    }
}

impl Config {
    /// Loads settings from `EMPTY_AGENT_*` environment variables and a TOML file.
    ///
    /// The file is `explicit_path` when given, else `.hidden/config.toml` if it exists.
    pub fn load(explicit_path: Option<&Path>) -> Res<Self> {
        Self::load_with_env(explicit_path, None)
    }

    /// Like [`Config::load`], reading variables from `env` instead of the process environment when given.
    fn load_with_env(explicit_path: Option<&Path>, env: Option<config::Map<String, String>>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().prefix("EMPTY_AGENT").source(env));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        if result.connector_timeout_secs == 0 {
            return Err(anyhow::anyhow!("Connector timeout must be greater than 0 seconds."));
        }

        Ok(result)
    }

    /// The socket address string the host binds to.
    ///
    /// IPv6 literals are bracketed so the port stays separable.
    pub fn bind_address(&self) -> String {
        match self.host.parse::<IpAddr>() {
            Ok(IpAddr::V6(ip)) => format!("[{}]:{}", ip, self.port),
            _ => format!("{}:{}", self.host, self.port),
        }
    }
}

/// Loads a `.env` file into the process environment.
///
/// Uses `path` when given, else searches from the current directory upwards.
/// A missing file is fine; a malformed one is an error.
pub fn load_env_file(path: Option<&Path>) -> Void {
    let result = match path {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };

    match result {
        Err(e) if !e.not_found() => Err(anyhow::anyhow!("Failed to load .env file: {}", e)),
        _ => Ok(()),
    }
}

// Tests.

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_temp_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("empty-agent-{}-{name}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.port, 3978);
        assert_eq!(config.bind_address(), "0.0.0.0:3978");
        assert_eq!(config.welcome_message, replies::WELCOME);
        assert_eq!(config.apology_message, replies::APOLOGY);
    }

    fn env(vars: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
    }

    #[test]
    fn test_bind_address_brackets_ipv6() {
        let mut config = Config::default();
        Arc::make_mut(&mut config.inner).host = "::".to_string();

        assert_eq!(config.bind_address(), "[::]:3978");

        Arc::make_mut(&mut config.inner).host = "localhost".to_string();

        assert_eq!(config.bind_address(), "localhost:3978");
    }

    #[test]
    fn test_load_from_file() {
        let path = write_temp_config("file", "port = 4000\nwelcome_message = \"Hi there\"\n");

        let config = Config::load_with_env(Some(&path), env(&[])).unwrap();

        assert_eq!(config.port, 4000);
        assert_eq!(config.welcome_message, "Hi there");
        assert_eq!(config.apology_message, replies::APOLOGY);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_load_rejects_zero_timeout() {
        let path = write_temp_config("timeout", "connector_timeout_secs = 0\n");

        let result = Config::load_with_env(Some(&path), env(&[]));

        assert!(result.is_err());

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_load_reads_prefixed_env() {
        let path = write_temp_config("env", "welcome_message = \"From file\"\n");

        let config = Config::load_with_env(Some(&path), env(&[("EMPTY_AGENT_PORT", "5000"), ("OTHER_PORT", "1")])).unwrap();

        assert_eq!(config.port, 5000);
        assert_eq!(config.welcome_message, "From file");

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_load_env_file_ignores_missing_file() {
        let path = std::env::temp_dir().join(format!("empty-agent-{}-missing.env", std::process::id()));

        assert!(load_env_file(Some(&path)).is_ok());
    }

    #[test]
    fn test_load_env_file_rejects_malformed_file() {
        let path = std::env::temp_dir().join(format!("empty-agent-{}-malformed.env", std::process::id()));
        std::fs::write(&path, "this line is not an assignment\n").unwrap();

        assert!(load_env_file(Some(&path)).is_err());

        let _ = std::fs::remove_file(path);
    }
}
