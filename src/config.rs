//! Configuration management for the RAX FTP client
//!
//! Settings come from built-in defaults, then an optional TOML file, then
//! environment variables prefixed with `RAX_FTP_CLIENT_`.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::session::SessionSettings;

/// Default config file looked up in the working directory (extension optional)
const DEFAULT_CONFIG_NAME: &str = "rax-ftp-client";
const ENV_PREFIX: &str = "RAX_FTP_CLIENT";

/// What to do with an error-class reply during login or the transfer preamble
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    /// Log the reply and carry on with the next step.
    #[default]
    Lenient,
    /// Abort on the first error-class reply.
    Strict,
}

/// When the data connection is opened relative to the consuming command's reply
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DataConnectOrder {
    /// Connect only once the server accepted the command.
    #[default]
    AfterReply,
    /// Connect right after PASV, before the command is sent.
    BeforeReply,
}

/// Complete client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Name checked against the server certificate; the target host when unset
    pub tls_server_name: Option<String>,

    /// Timeout for establishing control and data TCP connections
    pub connect_timeout_secs: u64,

    /// Control port used when the URL carries none
    pub default_port: u16,

    pub status_policy: StatusPolicy,

    pub data_connect_order: DataConnectOrder,

    /// Directory downloads are written into
    pub download_dir: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            tls_server_name: None,
            connect_timeout_secs: 4,
            default_port: 21,
            status_policy: StatusPolicy::Lenient,
            data_connect_order: DataConnectOrder::AfterReply,
            download_dir: ".".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration, reading `path` when given or the optional
    /// `rax-ftp-client.toml` in the working directory otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("connect_timeout_secs", defaults.connect_timeout_secs as i64)?
            .set_default("default_port", i64::from(defaults.default_port))?
            .set_default("status_policy", "lenient")?
            .set_default("data_connect_order", "after_reply")?
            .set_default("download_dir", defaults.download_dir)?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let config: ClientConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.connect_timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "connect_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.default_port == 0 {
            return Err(config::ConfigError::Message(
                "default_port cannot be 0".into(),
            ));
        }

        if matches!(&self.tls_server_name, Some(name) if name.trim().is_empty()) {
            return Err(config::ConfigError::Message(
                "tls_server_name cannot be empty".into(),
            ));
        }

        if self.download_dir.is_empty() {
            return Err(config::ConfigError::Message(
                "download_dir cannot be empty".into(),
            ));
        }

        Ok(())
    }

    /// Get connect timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Get download directory as PathBuf
    pub fn download_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.download_dir)
    }

    /// The TLS identity to verify for `host`.
    pub fn server_name_for<'a>(&'a self, host: &'a str) -> &'a str {
        self.tls_server_name.as_deref().unwrap_or(host)
    }

    /// Settings handed to the control session for a connection to `host`.
    pub fn session_settings(&self, host: &str) -> SessionSettings {
        SessionSettings {
            server_name: self.server_name_for(host).to_string(),
            connect_timeout: self.connect_timeout(),
            status_policy: self.status_policy,
            data_connect_order: self.data_connect_order,
        }
    }
}
