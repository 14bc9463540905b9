//! Unit tests for configuration loading and validation.

use rstest::*;
use tempfile::TempDir;
use vultr_cli::config::{DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
use vultr_cli::test_support::EnvGuard;
use vultr_cli::{ConfigError, VultrConfig};

#[fixture]
fn valid_config() -> VultrConfig {
    VultrConfig {
        api_key: Some(String::from("VULTRAPIKEYEXAMPLE")),
        api_url: String::from(DEFAULT_API_URL),
        request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
    }
}

#[rstest]
fn valid_config_passes_validation(valid_config: VultrConfig) {
    valid_config
        .validate()
        .unwrap_or_else(|err| panic!("valid config should pass: {err}"));
    assert_eq!(valid_config.request_timeout().as_secs(), 60);
}

#[rstest]
#[case::absent(None)]
#[case::empty(Some(""))]
#[case::blank(Some("   "))]
fn missing_api_key_produces_actionable_error(
    valid_config: VultrConfig,
    #[case] api_key: Option<&str>,
) {
    let cfg = VultrConfig {
        api_key: api_key.map(String::from),
        ..valid_config
    };

    let error = cfg.validate().expect_err("api key is required");
    let ConfigError::MissingField(ref message) = error else {
        panic!("expected MissingField error");
    };
    assert!(
        message.contains("VULTR_API_KEY"),
        "error should mention env var: {message}"
    );
    assert!(
        message.contains("vultr-cli.toml"),
        "error should mention config file: {message}"
    );
    assert!(
        message.contains("api_key"),
        "error should mention TOML key: {message}"
    );
}

#[rstest]
fn api_key_is_trimmed(valid_config: VultrConfig) {
    let cfg = VultrConfig {
        api_key: Some(String::from("  padded-key \n")),
        ..valid_config
    };

    assert_eq!(cfg.api_key(), Ok("padded-key"));
}

#[rstest]
fn blank_api_url_is_rejected(valid_config: VultrConfig) {
    let cfg = VultrConfig {
        api_url: String::from("  "),
        ..valid_config
    };

    let err = cfg.validate().expect_err("api url is required");
    assert!(
        err.to_string().contains("VULTR_API_URL"),
        "unexpected error: {err}"
    );
}

#[rstest]
fn zero_timeout_is_rejected(valid_config: VultrConfig) {
    let cfg = VultrConfig {
        request_timeout_secs: 0,
        ..valid_config
    };

    let err = cfg.validate().expect_err("zero timeout should error");
    assert!(
        matches!(err, ConfigError::Invalid(_)),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn config_loads_values_from_environment() {
    let tmp = TempDir::new().unwrap_or_else(|err| panic!("tempdir: {err}"));
    let home = tmp.path().to_string_lossy().to_string();
    let _guard = EnvGuard::set_vars(&[
        ("HOME", Some(home.as_str())),
        ("XDG_CONFIG_HOME", Some(home.as_str())),
        ("VULTR_CLI_CONFIG_PATH", None),
        ("VULTR_API_KEY", Some("env-api-key")),
        ("VULTR_API_URL", Some("http://127.0.0.1:9/v2")),
        ("VULTR_REQUEST_TIMEOUT_SECS", Some("7")),
    ])
    .await;

    let cfg = VultrConfig::load_without_cli_args()
        .unwrap_or_else(|err| panic!("config should load: {err}"));

    assert_eq!(cfg.api_key.as_deref(), Some("env-api-key"));
    assert_eq!(cfg.api_url, "http://127.0.0.1:9/v2");
    assert_eq!(cfg.request_timeout_secs, 7);
}

#[tokio::test]
async fn config_falls_back_to_defaults() {
    let tmp = TempDir::new().unwrap_or_else(|err| panic!("tempdir: {err}"));
    let home = tmp.path().to_string_lossy().to_string();
    let _guard = EnvGuard::set_vars(&[
        ("HOME", Some(home.as_str())),
        ("XDG_CONFIG_HOME", Some(home.as_str())),
        ("VULTR_CLI_CONFIG_PATH", None),
        ("VULTR_API_KEY", None),
        ("VULTR_API_URL", None),
        ("VULTR_REQUEST_TIMEOUT_SECS", None),
    ])
    .await;

    let cfg = VultrConfig::load_without_cli_args()
        .unwrap_or_else(|err| panic!("config should load: {err}"));

    assert_eq!(cfg.api_key, None);
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
    assert_eq!(cfg.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
}
