// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests running the `portico` binary against temp config files.
//!
//! Each test writes its own config and passes it with `--config`, so tests
//! are independent of the machine's standard config locations.

use std::io::Write;
use std::process::{Command, Output};

use tempfile::NamedTempFile;

fn config_file(toml: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(toml.as_bytes()).unwrap();
    file
}

fn portico(config: &NamedTempFile, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_portico"))
        .arg("--config")
        .arg(config.path())
        .arg("--plain")
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---- inspect ----

#[test]
fn test_inspect_json_lists_points_and_features() {
    let config = config_file("");
    let output = portico(&config, &["inspect", "--json"]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["features"].as_array().unwrap().len(), 8);
    let nav_content = report["points"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["point"] == "nav-content")
        .unwrap();
    assert_eq!(nav_content["extensions"][0], "nav-content:app");
}

#[test]
fn test_inspect_reports_disabled_feature() {
    let config = config_file("[features]\ngitops-manifest-updater = false\n");
    let output = portico(&config, &["inspect"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("warning: feature `gitops-manifest-updater` disabled by configuration"));
    assert!(!text.contains("entity-card:gitops-manifest-updater"));
}

// ---- config errors ----

#[test]
fn test_invalid_config_exits_nonzero() {
    let config = config_file("[points]\nstrictt = [\"sign-in-page\"]\n");
    let output = portico(&config, &["inspect"]);
    assert!(!output.status.success());
}

#[test]
fn test_strict_conflict_free_portal_still_assembles() {
    let config = config_file("[points]\nstrict = [\"sign-in-page\", \"nav-content\"]\n");
    let output = portico(&config, &["check"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout(&output).contains("0 failed"));
}

// ---- nav ----

#[test]
fn test_nav_renders_sidebar_shell() {
    let config = config_file("");
    let output = portico(&config, &["nav", "--json"]);
    assert!(output.status.success());
    let view: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(view["element"], "CompatWrapper");
    assert_eq!(view["children"][0]["element"], "Sidebar");
}

// ---- entity ----

#[test]
fn test_entity_shows_argocd_only_when_annotated() {
    let config = config_file("");
    let bare = portico(&config, &["entity", "--kind", "Component", "--name", "svc", "--json"]);
    assert!(bare.status.success());
    assert!(!stdout(&bare).contains("argocd"));

    let annotated = portico(
        &config,
        &[
            "entity",
            "--kind",
            "Component",
            "--name",
            "svc",
            "--annotation",
            "argocd/app-name=svc",
            "--json",
        ],
    );
    let page: serde_json::Value = serde_json::from_str(&stdout(&annotated)).unwrap();
    assert_eq!(page["entity"], "component:default/svc");
    assert!(
        page["cards"]
            .as_array()
            .unwrap()
            .iter()
            .any(|c| c["id"] == "entity-card:argocd/overview")
    );
}

// ---- sign-in ----

#[test]
fn test_sign_in_guest_and_unconfigured_github() {
    let config = config_file("");
    let guest = portico(&config, &["sign-in", "guest"]);
    assert!(guest.status.success());
    assert!(stdout(&guest).contains("user:development/guest"));

    let github = portico(&config, &["sign-in", "github-auth-provider"]);
    assert!(!github.status.success());
    assert!(String::from_utf8_lossy(&github.stderr).contains("core.auth.github"));
}

#[test]
fn test_sign_in_github_when_configured() {
    let config = config_file("[auth.providers.github]\nclient_id = \"abc123\"\n");
    let output = portico(&config, &["sign-in", "github-auth-provider"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("via github"));
}

// ---- features ----

#[test]
fn test_features_search() {
    let config = config_file("");
    let output = portico(&config, &["features", "argo"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("argocd"));
    assert!(text.contains("(legacy)"));
    assert!(!text.contains("kubernetes"));
}
