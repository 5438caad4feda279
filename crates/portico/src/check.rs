// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `portico check` command implementation.
//!
//! Assembles and activates the portal the way a host would at startup and
//! reports each stage.

use std::io::IsTerminal;

use portico_app::build_portal;
use portico_config::model::PorticoConfig;
use portico_core::PorticoError;

/// Status of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: &'static str,
    pub status: CheckStatus,
    pub message: String,
}

impl CheckResult {
    fn new(name: &'static str, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name,
            status,
            message: message.into(),
        }
    }
}

/// Run every check. Later stages are skipped once one fails.
pub async fn collect_checks(config: PorticoConfig) -> Vec<CheckResult> {
    let mut results = vec![CheckResult::new(
        "config",
        CheckStatus::Pass,
        format!("loaded (app.title={})", config.app.title),
    )];

    let configured: Vec<String> = config
        .auth
        .configured_providers()
        .map(str::to_string)
        .collect();

    let portal = match build_portal(config) {
        Ok(portal) => portal,
        Err(e) => {
            results.push(CheckResult::new("assembly", CheckStatus::Fail, e.to_string()));
            return results;
        }
    };

    let app = &portal.app;
    results.push(CheckResult::new(
        "assembly",
        CheckStatus::Pass,
        format!(
            "{} features, {} extensions",
            app.feature_ids().len(),
            app.extension_count()
        ),
    ));
    for warning in app.warnings() {
        results.push(CheckResult::new("assembly", CheckStatus::Warn, warning.to_string()));
    }

    match app.activate().await {
        Ok(active) if active.failures().is_empty() => {
            results.push(CheckResult::new("activation", CheckStatus::Pass, "all loaders resolved"));
        }
        Ok(active) => {
            for failure in active.failures() {
                results.push(CheckResult::new(
                    "activation",
                    CheckStatus::Warn,
                    format!("{} omitted: {}", failure.extension, failure.message),
                ));
            }
        }
        Err(e) => {
            results.push(CheckResult::new("activation", CheckStatus::Fail, e.to_string()));
            return results;
        }
    }

    if configured.is_empty() {
        results.push(CheckResult::new(
            "auth",
            CheckStatus::Warn,
            "no auth providers configured; only guest sign-in is available",
        ));
    } else {
        results.push(CheckResult::new(
            "auth",
            CheckStatus::Pass,
            format!("configured: {}", configured.join(", ")),
        ));
    }

    results
}

fn status_label(status: CheckStatus, use_color: bool) -> String {
    use colored::Colorize;
    match (status, use_color) {
        (CheckStatus::Pass, true) => "✓".green().to_string(),
        (CheckStatus::Warn, true) => "!".yellow().to_string(),
        (CheckStatus::Fail, true) => "✗".red().to_string(),
        (CheckStatus::Pass, false) => "[OK]  ".to_string(),
        (CheckStatus::Warn, false) => "[WARN]".to_string(),
        (CheckStatus::Fail, false) => "[FAIL]".to_string(),
    }
}

/// Run the `portico check` command.
pub async fn run_check(config: PorticoConfig, plain: bool) -> Result<(), PorticoError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    let results = collect_checks(config).await;

    println!();
    println!("  portico check");
    println!("  {}", "-".repeat(50));
    for result in &results {
        println!(
            "    {} {:<12} {}",
            status_label(result.status, use_color),
            result.name,
            result.message
        );
    }

    let fail_count = results.iter().filter(|r| r.status == CheckStatus::Fail).count();
    let warn_count = results.iter().filter(|r| r.status == CheckStatus::Warn).count();
    println!();
    println!("  {fail_count} failed, {warn_count} warnings");

    if fail_count > 0 {
        return Err(PorticoError::Internal(format!("{fail_count} check(s) failed")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use portico_config::model::AuthProviderConfig;

    #[tokio::test]
    async fn default_config_passes_with_auth_warning() {
        let results = collect_checks(PorticoConfig::default()).await;
        assert!(results.iter().all(|r| r.status != CheckStatus::Fail));
        let auth = results.iter().find(|r| r.name == "auth").unwrap();
        assert_eq!(auth.status, CheckStatus::Warn);
    }

    #[tokio::test]
    async fn configured_provider_passes_auth() {
        let mut config = PorticoConfig::default();
        config.auth.providers.insert(
            "github".into(),
            AuthProviderConfig {
                client_id: Some("abc".into()),
                enabled: true,
            },
        );
        let results = collect_checks(config).await;
        let auth = results.iter().find(|r| r.name == "auth").unwrap();
        assert_eq!(auth.status, CheckStatus::Pass);
        assert!(auth.message.contains("github"));
    }

    #[tokio::test]
    async fn bad_point_override_fails_assembly() {
        let mut config = PorticoConfig::default();
        config.points.strict.push("entity-card".into());
        let results = collect_checks(config).await;
        let last = results.last().unwrap();
        assert_eq!(last.name, "assembly");
        assert_eq!(last.status, CheckStatus::Fail);
    }

    #[test]
    fn plain_labels_have_no_color() {
        assert_eq!(status_label(CheckStatus::Fail, false), "[FAIL]");
    }
}
