//! Unit tests for command dispatch.

use clap::Parser;
use rstest::rstest;

use super::*;
use crate::api::{Instance, Ipv4, Links, Meta, UserData};
use crate::cli::{Cli, RootCommand};
use crate::options::APP_OS_ID;
use crate::request::{
    BackupScheduleRequest, InstanceUpdateRequest, ListOptions, RestoreRequest, ReverseIpRequest,
};
use crate::test_support::{ApiCall, ScriptedApi, ScriptedFailure, ScriptedResponses};

fn server_command(args: &[&str]) -> ServerCommand {
    let argv = ["vultr-cli", "server"].into_iter().chain(args.iter().copied());
    let cli = Cli::try_parse_from(argv).unwrap_or_else(|err| panic!("parse {args:?}: {err}"));
    let RootCommand::Server(command) = cli.command;
    command
}

fn cells(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

async fn run(
    api: &ScriptedApi,
    args: &[&str],
) -> (Result<(), CommandError<ScriptedFailure>>, String) {
    let mut out = Vec::new();
    let result = dispatch(api, server_command(args), &mut out).await;
    let text = String::from_utf8(out).unwrap_or_else(|err| panic!("utf8 output: {err}"));
    (result, text)
}

fn id(value: &str) -> String {
    value.to_owned()
}

#[rstest]
#[case::start(&["start", "abc123"], ApiCall::Start(id("abc123")), "Started up server")]
#[case::stop(&["stop", "abc123"], ApiCall::Halt(id("abc123")), "Stopped the server")]
#[case::restart(&["restart", "abc123"], ApiCall::Reboot(id("abc123")), "Rebooted server")]
#[case::reinstall(&["reinstall", "abc123"], ApiCall::Reinstall(id("abc123")), "Reinstalled server")]
#[case::destroy_alias(&["destroy", "abc123"], ApiCall::Delete(id("abc123")), "Deleted server")]
#[case::tag(
    &["tag", "abc123", "--tag", "prod"],
    ApiCall::Update(id("abc123"), InstanceUpdateRequest::tag("prod")),
    "Tagged server with : prod"
)]
#[case::label(
    &["label", "abc123", "-l", "web"],
    ApiCall::Update(id("abc123"), InstanceUpdateRequest::label("web")),
    "Labeled server with : web"
)]
#[case::firewall_group(
    &["update-firewall-group", "-i", "abc123", "-f", "fw-1"],
    ApiCall::Update(id("abc123"), InstanceUpdateRequest::firewall_group("fw-1")),
    "Updated firewall-group"
)]
#[case::os_change(
    &["os", "change", "abc123", "--os", "387"],
    ApiCall::Update(id("abc123"), InstanceUpdateRequest::os(387)),
    "Updated OS"
)]
#[case::app_change(
    &["app", "change", "abc123", "--app", "37"],
    ApiCall::Update(id("abc123"), InstanceUpdateRequest::app(37)),
    "Updated Application"
)]
#[case::plan_upgrade(
    &["plans", "upgrade", "abc123", "--plan", "vc2-2c-4gb"],
    ApiCall::Update(id("abc123"), InstanceUpdateRequest::plan("vc2-2c-4gb")),
    "Upgraded plan"
)]
#[case::restore_snapshot(
    &["restore", "abc123", "--snapshot", "snap-1"],
    ApiCall::Restore(id("abc123"), RestoreRequest { backup_id: None, snapshot_id: Some(id("snap-1")) }),
    "Instance has been restored"
)]
#[case::backup_create(
    &["backup", "create", "abc123", "--type", "daily", "--hour", "4"],
    ApiCall::SetBackupSchedule(
        id("abc123"),
        BackupScheduleRequest { cron_type: id("daily"), hour: 4, dow: 0, dom: 0 }
    ),
    "Created backup schedule"
)]
#[case::iso_attach(
    &["iso", "attach", "abc123", "--iso-id", "iso-1"],
    ApiCall::AttachIso(id("abc123"), id("iso-1")),
    "ISO has been attached"
)]
#[case::iso_detach(&["iso", "detach", "abc123"], ApiCall::DetachIso(id("abc123")), "ISO has been detached")]
#[case::ipv4_create(
    &["ipv4", "create", "abc123", "--reboot"],
    ApiCall::CreateIpv4(id("abc123"), true),
    "IPV4 has been created"
)]
#[case::ipv4_delete(
    &["ipv4", "destroy", "abc123", "-i", "192.0.2.20"],
    ApiCall::DeleteIpv4(id("abc123"), id("192.0.2.20")),
    "IPV4 has been deleted"
)]
#[case::reverse_default(
    &["reverse-dns", "default-ipv4", "abc123", "-i", "192.0.2.10"],
    ApiCall::DefaultReverseIpv4(id("abc123"), id("192.0.2.10")),
    "Set default reverse dns"
)]
#[case::reverse_delete_v6(
    &["reverse-dns", "destroy-ipv6", "abc123", "-i", "2001:db8::1"],
    ApiCall::DeleteReverseIpv6(id("abc123"), id("2001:db8::1")),
    "Deleted reverse DNS IPV6 entry"
)]
#[case::reverse_set_v4(
    &["reverse-dns", "set-ipv4", "abc123", "-i", "192.0.2.10", "-e", "web.example.com"],
    ApiCall::CreateReverseIpv4(
        id("abc123"),
        ReverseIpRequest { ip: id("192.0.2.10"), reverse: id("web.example.com") }
    ),
    "Set reverse DNS entry for ipv4 address"
)]
#[case::reverse_set_v6(
    &["reverse-dns", "set-ipv6", "abc123", "-i", "2001:db8::1", "-e", "web.example.com"],
    ApiCall::CreateReverseIpv6(
        id("abc123"),
        ReverseIpRequest { ip: id("2001:db8::1"), reverse: id("web.example.com") }
    ),
    "Set reverse DNS entry for ipv6 address"
)]
#[tokio::test]
async fn confirming_commands_make_one_call_and_print_one_line(
    #[case] args: &[&str],
    #[case] expected_call: ApiCall,
    #[case] expected_line: &str,
) {
    let api = ScriptedApi::new();

    let (result, output) = run(&api, args).await;

    result.unwrap_or_else(|err| panic!("command should succeed: {err}"));
    assert_eq!(api.calls(), vec![expected_call]);
    assert_eq!(output, format!("{expected_line}\n"));
}

#[rstest]
#[case::start(&["start", "abc123"], "error starting server : boom")]
#[case::tag(&["tag", "abc123", "-t", "prod"], "error adding tag to server : boom")]
#[case::list(&["list"], "error getting list of servers : boom")]
#[case::backup_get(&["backup", "get", "abc123"], "error getting backup schedule : boom")]
#[case::reverse_list(&["reverse-dns", "list-ipv6", "abc123"], "error getting the reverse ipv6 list : boom")]
#[case::create(
    &["create", "-r", "ewr", "-p", "vc2-1c-1gb", "-o", "387"],
    "error creating instance : boom"
)]
#[tokio::test]
async fn remote_failures_name_the_action(#[case] args: &[&str], #[case] expected: &str) {
    let api = ScriptedApi::failing("boom");

    let (result, output) = run(&api, args).await;

    let err = result.expect_err("gateway failure should surface");
    assert!(matches!(err, CommandError::Remote { .. }), "unexpected: {err:?}");
    assert_eq!(err.to_string(), expected);
    assert_eq!(api.calls().len(), 1);
    assert!(output.is_empty(), "nothing should be printed: {output}");
}

#[tokio::test]
async fn create_with_app_forces_app_os_id() {
    let api = ScriptedApi::with_responses(ScriptedResponses {
        instance: Instance {
            id: id("new-1"),
            default_password: id("s3cret"),
            ..Instance::default()
        },
        ..ScriptedResponses::default()
    });

    let (result, output) = run(
        &api,
        &["create", "--region", "ewr", "--plan", "vc2-1c-1gb", "--app", "37"],
    )
    .await;

    result.unwrap_or_else(|err| panic!("create should succeed: {err}"));
    let calls = api.calls();
    let [ApiCall::Create(request)] = calls.as_slice() else {
        panic!("expected a single create call, got {calls:?}");
    };
    assert_eq!(request.os_source.key(), "app_id");
    assert_eq!(request.os_id, APP_OS_ID);
    assert_eq!(request.app_id, Some(37));
    let lines: Vec<Vec<&str>> = output.lines().map(cells).collect();
    assert_eq!(lines.first(), Some(&vec!["SERVER", "INFO"]));
    assert_eq!(lines.get(1), Some(&vec!["ID", "new-1"]));
    assert_eq!(lines.last(), Some(&vec!["DEFAULT", "PASSWORD", "s3cret"]));
}

#[rstest]
#[case::ambiguous(
    &["create", "-r", "ewr", "-p", "vc2-1c-1gb", "--app", "37", "--snapshot", "snap-1"],
    "error creating instance : too many options have been selected : [app_id, snapshot_id] : please select one"
)]
#[case::missing(
    &["create", "-r", "ewr", "-p", "vc2-1c-1gb"],
    "error creating instance : an os ID must be provided"
)]
#[case::restore_neither(
    &["restore", "abc123"],
    "at least one flag must be provided (snapshot or backup)"
)]
#[case::restore_both(
    &["restore", "abc123", "-b", "bak-1", "-s", "snap-1"],
    "one flag must be provided not both (snapshot or backup)"
)]
#[tokio::test]
async fn validation_failures_make_no_call(#[case] args: &[&str], #[case] expected: &str) {
    let api = ScriptedApi::new();

    let (result, output) = run(&api, args).await;

    let err = result.expect_err("invalid flags should fail");
    assert_eq!(err.to_string(), expected);
    assert!(api.calls().is_empty(), "no gateway call expected");
    assert!(output.is_empty());
}

#[tokio::test]
async fn list_passes_paging_through_and_prints_meta() {
    let api = ScriptedApi::with_responses(ScriptedResponses {
        instances: vec![Instance {
            id: id("abc123"),
            ..Instance::default()
        }],
        meta: Meta {
            total: 30,
            links: Links {
                next: id("next-cursor"),
                prev: String::new(),
            },
        },
        ..ScriptedResponses::default()
    });

    let (result, output) = run(&api, &["l", "--per-page", "5", "--cursor", "abc"]).await;

    result.unwrap_or_else(|err| panic!("list should succeed: {err}"));
    assert_eq!(
        api.calls(),
        vec![ApiCall::List(ListOptions {
            per_page: 5,
            cursor: Some(id("abc")),
        })]
    );
    let lines: Vec<Vec<&str>> = output.lines().map(cells).collect();
    assert_eq!(lines.get(1).and_then(|row| row.first()), Some(&"abc123"));
    assert_eq!(lines.last(), Some(&vec!["30", "next-cursor"]));
    assert!(output.contains("META\n"));
}

#[tokio::test]
async fn ipv4_list_uses_default_page_size() {
    let api = ScriptedApi::with_responses(ScriptedResponses {
        ipv4: vec![Ipv4 {
            ip: id("192.0.2.10"),
            ip_type: id("main_ip"),
            ..Ipv4::default()
        }],
        ..ScriptedResponses::default()
    });

    let (result, output) = run(&api, &["ipv4", "v4", "abc123"]).await;

    result.unwrap_or_else(|err| panic!("ipv4 list should succeed: {err}"));
    assert_eq!(
        api.calls(),
        vec![ApiCall::ListIpv4(
            id("abc123"),
            ListOptions {
                per_page: 25,
                cursor: None,
            }
        )]
    );
    let lines: Vec<Vec<&str>> = output.lines().map(cells).collect();
    assert_eq!(
        lines.first(),
        Some(&vec!["IP", "NETMASK", "GATEWAY", "TYPE", "REVERSE"])
    );
    assert_eq!(lines.get(1), Some(&vec!["192.0.2.10", "main_ip"]));
}

#[tokio::test]
async fn user_data_get_prints_decoded_payload() {
    let api = ScriptedApi::with_responses(ScriptedResponses {
        user_data: UserData {
            data: id("aGVsbG8="),
        },
        ..ScriptedResponses::default()
    });

    let (result, output) = run(&api, &["user-data", "get", "abc123"]).await;

    result.unwrap_or_else(|err| panic!("user-data get should succeed: {err}"));
    assert_eq!(api.calls(), vec![ApiCall::GetUserData(id("abc123"))]);
    assert_eq!(output, "USERDATA\nhello\n");
}

#[tokio::test]
async fn user_data_set_reports_unreadable_file() {
    let api = ScriptedApi::new();
    let tmp = tempfile::TempDir::new().unwrap_or_else(|err| panic!("tempdir: {err}"));
    let missing_path = tmp.path().join("absent.yml");
    let missing = missing_path
        .to_str()
        .unwrap_or_else(|| panic!("temp path should be utf8"));

    let (result, _) = run(&api, &["user-data", "set", "abc123", "-d", missing]).await;

    let err = result.expect_err("unreadable file should fail");
    assert!(matches!(err, CommandError::UserData(_)), "unexpected: {err:?}");
    assert!(err.to_string().starts_with("error reading user-data : "));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn user_data_set_sends_encoded_file() {
    let api = ScriptedApi::new();
    let tmp = tempfile::TempDir::new().unwrap_or_else(|err| panic!("tempdir: {err}"));
    let path = tmp.path().join("user-data.sh");
    std::fs::write(&path, "hello").unwrap_or_else(|err| panic!("write user-data: {err}"));
    let path_str = path
        .to_str()
        .unwrap_or_else(|| panic!("temp path should be utf8"));

    let (result, output) = run(&api, &["user-data", "set", "abc123", "--userdata", path_str]).await;

    result.unwrap_or_else(|err| panic!("user-data set should succeed: {err}"));
    assert_eq!(
        api.calls(),
        vec![ApiCall::Update(
            id("abc123"),
            InstanceUpdateRequest::user_data("aGVsbG8=")
        )]
    );
    assert_eq!(output, "Set user-data for server\n");
}
