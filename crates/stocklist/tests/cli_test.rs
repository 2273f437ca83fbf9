//! Integration tests for the `stocklist` CLI binary.
//!
//! Argument parsing, help output, completions and error exit codes run
//! without network access; listing tests use a local wiremock API.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `stocklist` binary with env isolation.
///
/// Clears all `STOCKLIST_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn stocklist_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("stocklist");
    cmd.env("HOME", "/tmp/stocklist-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/stocklist-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("STOCKLIST_PROFILE")
        .env_remove("STOCKLIST_API_URL")
        .env_remove("STOCKLIST_OUTPUT")
        .env_remove("STOCKLIST_INSECURE")
        .env_remove("STOCKLIST_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn product(id: &str, name: &str, category: &str, manufacturer: &str) -> Value {
    json!({
        "id": id,
        "type": category,
        "name": name,
        "color": ["blue"],
        "price": 51,
        "manufacturer": manufacturer
    })
}

/// A small catalog: two jackets, one shirt, one accessory, one manufacturer.
async fn mount_catalog(server: &MockServer) {
    let bodies = [
        (
            "jackets",
            json!([
                product("b1f2", "BRIBO JACKET", "jackets", "reps"),
                product("a9c3", "ALAK RAIN", "jackets", "reps"),
            ]),
        ),
        ("shirts", json!([product("c001", "CANT SHIRT", "shirts", "reps")])),
        ("accessories", json!([product("d002", "DAL HAT", "accessories", "reps")])),
    ];
    for (category, body) in bodies {
        Mock::given(method("GET"))
            .and(path(format!("/products/{category}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/availability/reps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "response": [
                {
                    "id": "B1F2",
                    "DATAPAYLOAD": "<AVAILABILITY>\n  <INSTOCKVALUE>INSTOCK</INSTOCKVALUE>\n</AVAILABILITY>"
                },
                {
                    "id": "A9C3",
                    "DATAPAYLOAD": "<AVAILABILITY>\n  <INSTOCKVALUE>OUTOFSTOCK</INSTOCKVALUE>\n</AVAILABILITY>"
                }
            ]
        })))
        .mount(server)
        .await;
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run_against(server: &MockServer, args: &[&str]) -> std::process::Output {
    let uri = server.uri();
    let args: Vec<String> = args.iter().map(|s| (*s).to_owned()).collect();
    tokio::task::spawn_blocking(move || {
        stocklist_cmd()
            .args(["--api-url", &uri])
            .args(&args)
            .output()
            .unwrap()
    })
    .await
    .unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = stocklist_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    stocklist_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("products")
            .and(predicate::str::contains("availability"))
            .and(predicate::str::contains("manufacturers")),
    );
}

#[test]
fn test_version_flag() {
    stocklist_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stocklist"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    stocklist_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    stocklist_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stocklist"));
}

// ── Argument errors ─────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = stocklist_cmd().arg("teleport").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("unrecognized subcommand"));
}

#[test]
fn test_invalid_output_format() {
    let output = stocklist_cmd()
        .args(["-o", "xml", "products"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("invalid value"));
}

#[test]
fn test_invalid_category_is_usage_error() {
    let output = stocklist_cmd()
        .args(["--api-url", "http://127.0.0.1:9", "products", "-c", "socks"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("socks"));
}

#[test]
fn test_unknown_profile_is_usage_error() {
    let output = stocklist_cmd()
        .args(["--profile", "staging", "products"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("staging"));
}

#[test]
fn test_invalid_api_url_is_usage_error() {
    let output = stocklist_cmd()
        .args(["--api-url", "ftp://example.com", "letters"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    stocklist_cmd()
        .args(["config", "show", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"defaults\""));
}

#[test]
fn test_config_path_points_at_toml() {
    stocklist_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_use_missing_profile() {
    let output = stocklist_cmd()
        .args(["config", "use", "nowhere"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("nowhere"));
}

// ── Network errors ──────────────────────────────────────────────────

#[test]
fn test_connection_refused_exit_code() {
    let output = stocklist_cmd()
        .args(["--api-url", "http://127.0.0.1:9", "products"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7), "{}", combined_output(&output));
}

// ── Listing against a mock API ──────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_products_json_sorted_with_availability() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let output = run_against(&server, &["-o", "json", "products", "-c", "jackets"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let items: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = items.iter().map(|v| v["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["ALAK RAIN", "BRIBO JACKET"]);
    assert_eq!(items[0]["stock_level"], "out_of_stock");
    assert_eq!(items[1]["availability"], "In stock");
    assert_eq!(items[1]["price"], 51.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_products_letter_filter_plain() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let output = run_against(&server, &["-o", "plain", "products", "-l", "b"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "b1f2");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_unknown_product_exit_code() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let output = run_against(&server, &["show", "zzzz"]).await;
    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_manufacturers_plain() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let output = run_against(&server, &["-o", "plain", "manufacturers"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "reps");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_detail_fields() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;

    let output = run_against(&server, &["show", "B1F2"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let text = String::from_utf8_lossy(&output.stdout);
    for expected in [
        "BRIBO JACKET",
        "ID:            b1f2",
        "Type:          jackets",
        "Price:         51$",
        "Manufacturer:  reps",
        "Availability:  In stock",
        "Colors:        blue",
    ] {
        assert!(text.contains(expected), "missing {expected:?} in:\n{text}");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_letters_json_counts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/shirts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product("s1", "BEAM", "shirts", "reps"),
            product("s2", "BOLT", "shirts", "reps"),
            product("s3", "ORB", "shirts", "reps"),
        ])))
        .mount(&server)
        .await;

    let output = run_against(&server, &["-o", "json", "letters", "-c", "shirts"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let rows: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        rows,
        json!([
            {"letter": "B", "products": 2},
            {"letter": "O", "products": 1},
        ])
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_availability_json_uppercases_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/availability/reps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "response": [
                {"id": "b1f2", "DATAPAYLOAD": "<AVAILABILITY><INSTOCKVALUE>INSTOCK</INSTOCKVALUE></AVAILABILITY>"},
                {"id": "a9c3", "DATAPAYLOAD": "<AVAILABILITY><INSTOCKVALUE>OUTOFSTOCK</INSTOCKVALUE></AVAILABILITY>"}
            ]
        })))
        .mount(&server)
        .await;

    let output = run_against(&server, &["-o", "json", "availability", "reps"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(!String::from_utf8_lossy(&output.stderr).contains("warning:"));

    let items: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    let mut pairs: Vec<(String, String)> = items
        .iter()
        .map(|v| {
            (
                v["id"].as_str().unwrap().to_owned(),
                v["level"].as_str().unwrap().to_owned(),
            )
        })
        .collect();
    pairs.sort();
    assert_eq!(
        pairs,
        vec![
            ("A9C3".to_owned(), "out_of_stock".to_owned()),
            ("B1F2".to_owned(), "in_stock".to_owned()),
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_availability_sentinel_warns() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/availability/reps"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 200, "response": "[]"})),
        )
        .mount(&server)
        .await;

    let output = run_against(&server, &["-o", "plain", "availability", "reps"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(String::from_utf8_lossy(&output.stdout).trim().is_empty());
    assert!(
        String::from_utf8_lossy(&output.stderr)
            .contains("Something went wrong with retrieving item availability"),
        "{}",
        combined_output(&output)
    );
}
