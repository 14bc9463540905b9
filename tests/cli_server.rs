//! End-to-end tests driving the `vultr-cli` binary against a mock Vultr API.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use camino::Utf8PathBuf;
use cap_std::{ambient_authority, fs_utf8::Dir};
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{any, body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn command_for(server: &MockServer) -> Command {
    let mut cmd = cargo_bin_cmd!("vultr-cli");
    cmd.env("VULTR_API_KEY", "cli-test-key")
        .env("VULTR_API_URL", format!("{}/v2", server.uri()))
        .env_remove("VULTR_CLI_CONFIG_PATH")
        .env_remove("RUST_LOG");
    cmd
}

#[tokio::test(flavor = "multi_thread")]
async fn tag_patches_instance_and_confirms() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/v2/instances/abc123"))
        .and(header("authorization", "Bearer cli-test-key"))
        .and(body_json(json!({"tag": "prod"})))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"instance": {"id": "abc123"}})))
        .expect(1)
        .mount(&server)
        .await;

    command_for(&server)
        .args(["server", "tag", "abc123", "--tag", "prod"])
        .assert()
        .success()
        .stdout("Tagged server with : prod\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn api_failure_is_reported_on_stdout_with_exit_one() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/instances/missing/start"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"error": "Invalid instance-id.", "status": 404})),
        )
        .expect(1)
        .mount(&server)
        .await;

    command_for(&server)
        .args(["server", "start", "missing"])
        .assert()
        .failure()
        .code(1)
        .stdout("error starting server : Invalid instance-id. (HTTP 404)\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn conflicting_os_sources_never_reach_the_api() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    command_for(&server)
        .args([
            "server", "create", "-r", "ewr", "-p", "vc2-1c-1gb", "--app", "37", "--iso", "iso-1",
        ])
        .assert()
        .failure()
        .code(1)
        .stdout(
            "error creating instance : too many options have been selected : \
             [app_id, iso_id] : please select one\n",
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn app_source_overrides_explicit_os_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/instances"))
        .and(body_partial_json(json!({"os_id": 186, "app_id": 37})))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "instance": {"id": "new-1", "os_id": 186, "app_id": 37}
        })))
        .expect(1)
        .mount(&server)
        .await;

    command_for(&server)
        .args([
            "server", "create", "-r", "ewr", "-p", "vc2-1c-1gb", "--os", "387", "--app", "37",
        ])
        .assert()
        .success()
        .stdout(contains("SERVER INFO"))
        .stdout(contains("new-1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn user_data_set_reads_paths_outside_the_working_directory() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/v2/instances/abc123"))
        .and(body_json(json!({"user_data": "aGVsbG8="})))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap_or_else(|err| panic!("tempdir: {err}"));
    let tmp_root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf())
        .unwrap_or_else(|non_utf8_path| panic!("temp dir should be utf8: {}", non_utf8_path.display()));
    let fs = Dir::open_ambient_dir(&tmp_root, ambient_authority())
        .unwrap_or_else(|err| panic!("open temp dir: {err}"));
    fs.create_dir("work")
        .unwrap_or_else(|err| panic!("create work dir: {err}"));
    fs.write("cloud-init.yml", "hello")
        .unwrap_or_else(|err| panic!("write user-data: {err}"));
    let work_dir = tmp_root.join("work");

    command_for(&server)
        .current_dir(&work_dir)
        .args(["server", "user-data", "set", "abc123", "-d", "../cloud-init.yml"])
        .assert()
        .success()
        .stdout("Set user-data for server\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn list_prints_servers_and_paging_meta() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/instances"))
        .and(query_param("per_page", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "instances": [{"id": "abc123", "label": "web-1", "region": "ewr"}],
            "meta": {"total": 1, "links": {"next": "", "prev": ""}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let aligned_header =
        predicate::str::is_match(r"(?m)^ID\s+IP\s+LABEL\s+OS\s+STATUS\s+REGION\s")
            .unwrap_or_else(|err| panic!("header pattern: {err}"));
    command_for(&server)
        .args(["server", "list"])
        .assert()
        .success()
        .stdout(aligned_header)
        .stdout(contains("web-1"))
        .stdout(contains("META"));
}

#[tokio::test(flavor = "multi_thread")]
async fn restore_requires_a_source() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    command_for(&server)
        .args(["server", "restore", "abc123"])
        .assert()
        .failure()
        .code(1)
        .stdout("at least one flag must be provided (snapshot or backup)\n");
}
