// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as log levels, URL schemes, and point policy lists.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::PorticoConfig;

/// Log levels accepted by `app.log_level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// The point that can never be made optional.
const SIGN_IN_POINT: &str = "sign-in-page";

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &PorticoConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.app.title.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "app.title must not be empty".to_string(),
        });
    }

    let base_url = config.app.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push(ConfigError::Validation {
            message: format!("app.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    if !LOG_LEVELS.contains(&config.app.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level `{}` is not one of: {}",
                config.app.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    for (list, names) in [
        ("points.strict", &config.points.strict),
        ("points.mandatory", &config.points.mandatory),
        ("points.optional", &config.points.optional),
    ] {
        let mut seen = HashSet::new();
        for (i, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                errors.push(ConfigError::Validation {
                    message: format!("{list}[{i}] must not be empty"),
                });
            } else if !seen.insert(name.as_str()) {
                errors.push(ConfigError::Validation {
                    message: format!("duplicate point `{name}` in {list}"),
                });
            }
        }
    }

    if config.points.optional.iter().any(|p| p == SIGN_IN_POINT) {
        errors.push(ConfigError::Validation {
            message: format!("points.optional must not contain `{SIGN_IN_POINT}`; it is always mandatory"),
        });
    }

    for name in &config.points.mandatory {
        if config.points.optional.contains(name) {
            errors.push(ConfigError::Validation {
                message: format!("point `{name}` is listed as both mandatory and optional"),
            });
        }
    }

    if config.extensions.keys().any(|k| k.trim().is_empty()) {
        errors.push(ConfigError::Validation {
            message: "extensions table contains an empty extension id".to_string(),
        });
    }

    if config.features.keys().any(|k| k.trim().is_empty()) {
        errors.push(ConfigError::Validation {
            message: "features table contains an empty feature id".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(config: &PorticoConfig) -> Vec<String> {
        validate_config(config)
            .unwrap_err()
            .into_iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&PorticoConfig::default()).is_ok());
    }

    #[test]
    fn bad_log_level_fails_validation() {
        let mut config = PorticoConfig::default();
        config.app.log_level = "loud".to_string();
        assert!(messages(&config).iter().any(|m| m.contains("app.log_level")));
    }

    #[test]
    fn non_http_base_url_fails_validation() {
        let mut config = PorticoConfig::default();
        config.app.base_url = "localhost:3000".to_string();
        assert!(messages(&config).iter().any(|m| m.contains("app.base_url")));
    }

    #[test]
    fn sign_in_cannot_be_optional() {
        let mut config = PorticoConfig::default();
        config.points.optional = vec!["sign-in-page".to_string()];
        assert!(messages(&config).iter().any(|m| m.contains("always mandatory")));
    }

    #[test]
    fn duplicate_and_empty_points_are_all_reported() {
        let mut config = PorticoConfig::default();
        config.points.strict = vec!["nav-content".to_string(), "nav-content".to_string()];
        config.points.mandatory = vec![" ".to_string()];
        let msgs = messages(&config);
        assert_eq!(msgs.len(), 2);
        assert!(msgs.iter().any(|m| m.contains("duplicate point `nav-content`")));
        assert!(msgs.iter().any(|m| m.contains("points.mandatory[0]")));
    }

    #[test]
    fn mandatory_and_optional_overlap_fails() {
        let mut config = PorticoConfig::default();
        config.points.mandatory = vec!["page".to_string()];
        config.points.optional = vec!["page".to_string()];
        assert!(messages(&config).iter().any(|m| m.contains("both mandatory and optional")));
    }

    #[test]
    fn empty_toggle_keys_fail() {
        let mut config = PorticoConfig::default();
        config.extensions.insert(String::new(), false);
        config.features.insert(" ".to_string(), true);
        assert_eq!(messages(&config).len(), 2);
    }
}
