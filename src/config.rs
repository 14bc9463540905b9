//! Configuration loading via `ortho-config`.
//!
//! Credentials and endpoint settings merge defaults, configuration files and
//! `VULTR_*` environment variables. The command line carries no credential
//! flags.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

/// Public Vultr API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.vultr.com/v2";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Connection settings for the Vultr API.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(
    prefix = "VULTR",
    discovery(
        app_name = "vultr-cli",
        env_var = "VULTR_CLI_CONFIG_PATH",
        config_file_name = "vultr-cli.toml",
        dotfile_name = ".vultr-cli.toml",
        project_file_name = "vultr-cli.toml"
    )
)]
pub struct VultrConfig {
    /// Personal access token sent as a bearer token. Required.
    pub api_key: Option<String>,
    /// Base URL of the v2 API, without a trailing slash.
    #[ortho_config(default = DEFAULT_API_URL.to_owned())]
    pub api_url: String,
    /// Timeout applied to each request, in seconds.
    #[ortho_config(default = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,
}

impl VultrConfig {
    /// Loads configuration without attempting to parse CLI arguments. Values
    /// merge defaults, configuration files, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([std::ffi::OsString::from("vultr-cli")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Returns the API key after checking it is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] with guidance on where to set the
    /// key when it is absent or blank.
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(ConfigError::MissingField(String::from(
                "missing Vultr API key: set VULTR_API_KEY or add api_key to vultr-cli.toml",
            ))),
        }
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Performs semantic validation on the loaded values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when the API key or URL is blank
    /// and [`ConfigError::Invalid`] when the timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api_key()?;
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::MissingField(String::from(
                "missing API URL: set VULTR_API_URL or add api_url to vultr-cli.toml",
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(String::from(
                "request_timeout_secs must be greater than zero",
            )));
        }
        Ok(())
    }
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Indicates a required configuration field is empty or missing.
    #[error("missing configuration field: {0}")]
    MissingField(String),
    /// Indicates a field holds an unusable value.
    #[error("invalid configuration: {0}")]
    Invalid(String),
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
}

impl From<ortho_config::OrthoError> for ConfigError {
    fn from(value: ortho_config::OrthoError) -> Self {
        Self::Parse(value.to_string())
    }
}
