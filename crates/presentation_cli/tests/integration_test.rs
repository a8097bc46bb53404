//! Integration tests for the CLI binary
//!
//! Runs `bikeshare-cli` with a temporary configuration file. None of these
//! commands reach the network.

#![allow(clippy::panic)]

use std::io::Write;
use std::process::{Command, Output};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn run(config: &tempfile::NamedTempFile, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bikeshare-cli"))
        .arg("--config")
        .arg(config.path())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}): {}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

const LOCATED: &str = r#"
[location]
latitude = 41.8786
longitude = -87.6403

[discovery]
startup_region_radius_meters = 300.0
"#;

#[test]
fn frame_startup_uses_configured_location() {
    let config = write_config(LOCATED);
    let output = run(&config, &["frame", "--startup"]);

    assert!(output.status.success());
    let region = stdout_json(&output);
    assert_eq!(region["span_meters"], 300.0);
    assert_eq!(region["center"]["latitude"], 41.8786);
}

#[test]
fn frame_reset_triples_startup_radius() {
    let config = write_config(LOCATED);
    let output = run(&config, &["frame", "--reset"]);

    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["span_meters"], 900.0);
}

#[test]
fn frame_without_location_fails() {
    let config = write_config("");
    let output = run(&config, &["frame", "--startup"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("device location unknown"), "{stderr}");
}

#[test]
fn config_prints_effective_values() {
    let config = write_config("[stations]\ndataset_id = \"abcd-1234\"\n");
    let output = run(&config, &["config"]);

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["stations"]["dataset_id"], "abcd-1234");
    assert_eq!(json["geocoding"]["min_request_interval_ms"], 1100);
}

#[test]
fn invalid_config_is_rejected() {
    let config = write_config("[stations]\nmax_results = 0\n");
    let output = run(&config, &["config"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("max_results"), "{stderr}");
}

#[test]
fn discover_rejects_empty_address_without_network() {
    let config = write_config(
        "[geocoding]\nbase_url = \"http://127.0.0.1:1\"\n[stations]\nbase_url = \"http://127.0.0.1:1\"\n",
    );
    let output = run(&config, &["discover", "Union Station", "   ", "--retries", "3"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("search failed"), "{stderr}");
    assert!(output.stdout.is_empty());
}
