//! Unit tests for the `vultr-cli` binary implementation.

use super::*;
use rstest::rstest;
use vultr_cli::RequestError;

#[rstest]
#[case::help(&["vultr-cli", "--help"], 0)]
#[case::version(&["vultr-cli", "--version"], 0)]
#[case::missing_instance_id(&["vultr-cli", "server", "start"], 1)]
#[case::unknown_command(&["vultr-cli", "server", "explode", "abc123"], 1)]
#[case::bad_number(&["vultr-cli", "server", "os", "change", "abc123", "--os", "ten"], 1)]
fn parse_errors_map_to_exit_codes(#[case] argv: &[&str], #[case] expected: i32) {
    let err = Cli::try_parse_from(argv).expect_err("argv should not parse into a command");
    assert_eq!(i32::from(err.use_stderr()), expected);
}

#[rstest]
fn write_error_renders_remote_failure() {
    let mut buf = Vec::new();
    let err = CliError::Command(CommandError::Remote {
        action: "starting server",
        source: VultrError::Api {
            status: 404,
            message: String::from("Invalid instance-id."),
        },
    });

    write_error(&mut buf, &err);

    let rendered = String::from_utf8(buf).unwrap_or_else(|utf8_err| panic!("utf8: {utf8_err}"));
    assert_eq!(
        rendered,
        "error starting server : Invalid instance-id. (HTTP 404)\n"
    );
}

#[rstest]
fn write_error_renders_validation_failure_verbatim() {
    let mut buf = Vec::new();
    let err = CliError::Command(CommandError::Request(RequestError::RestoreSourceMissing));

    write_error(&mut buf, &err);

    let rendered = String::from_utf8(buf).unwrap_or_else(|utf8_err| panic!("utf8: {utf8_err}"));
    assert_eq!(
        rendered,
        "at least one flag must be provided (snapshot or backup)\n"
    );
}

#[rstest]
fn write_error_renders_missing_api_key_guidance() {
    let config = VultrConfig {
        api_key: None,
        api_url: String::from("https://api.vultr.com/v2"),
        request_timeout_secs: 60,
    };
    let err = CliError::from(config.validate().expect_err("api key is required"));

    let mut buf = Vec::new();
    write_error(&mut buf, &err);

    let rendered = String::from_utf8(buf).unwrap_or_else(|utf8_err| panic!("utf8: {utf8_err}"));
    assert!(rendered.contains("VULTR_API_KEY"), "rendered: {rendered}");
    assert!(rendered.contains("vultr-cli.toml"), "rendered: {rendered}");
}
