// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Portico portal.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level Portico configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PorticoConfig {
    /// Portal identity and logging settings.
    #[serde(default)]
    pub app: AppConfig,

    /// Per-point conflict and activation policy.
    #[serde(default)]
    pub points: PointsConfig,

    /// Extension toggles keyed by extension id (`false` disables).
    #[serde(default)]
    pub extensions: BTreeMap<String, bool>,

    /// Feature toggles keyed by feature id (`false` removes the feature).
    #[serde(default)]
    pub features: BTreeMap<String, bool>,

    /// Authentication provider settings.
    #[serde(default)]
    pub auth: AuthConfig,
}

impl PorticoConfig {
    /// Returns false only when the extension is explicitly disabled.
    pub fn extension_enabled(&self, extension_id: &str) -> bool {
        self.extensions.get(extension_id).copied().unwrap_or(true)
    }

    /// Returns false only when the feature is explicitly disabled.
    pub fn feature_enabled(&self, feature_id: &str) -> bool {
        self.features.get(feature_id).copied().unwrap_or(true)
    }
}

/// Portal identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Title shown in the portal shell.
    #[serde(default = "default_title")]
    pub title: String,

    /// Public base URL of the portal frontend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            base_url: default_base_url(),
            log_level: default_log_level(),
        }
    }
}

fn default_title() -> String {
    "Portico".to_string()
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Extension point policy overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PointsConfig {
    /// Singleton points on which more than one contender is a fatal error.
    #[serde(default)]
    pub strict: Vec<String>,

    /// Points whose loader failure aborts activation.
    #[serde(default)]
    pub mandatory: Vec<String>,

    /// Points that degrade by omission when their loader fails.
    /// `sign-in-page` cannot be made optional.
    #[serde(default)]
    pub optional: Vec<String>,
}

/// Authentication provider configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Providers keyed by name (e.g. "github").
    #[serde(default)]
    pub providers: BTreeMap<String, AuthProviderConfig>,
}

impl AuthConfig {
    /// Names of providers that are enabled and carry a client id.
    pub fn configured_providers(&self) -> impl Iterator<Item = &str> {
        self.providers
            .iter()
            .filter(|(_, p)| p.is_configured())
            .map(|(name, _)| name.as_str())
    }
}

/// A single authentication provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthProviderConfig {
    /// OAuth client id. `None` leaves the provider unconfigured.
    #[serde(default)]
    pub client_id: Option<String>,

    /// Whether the provider may be used at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl AuthProviderConfig {
    pub fn is_configured(&self) -> bool {
        self.enabled
            && self
                .client_id
                .as_deref()
                .is_some_and(|id| !id.trim().is_empty())
    }
}

fn default_true() -> bool {
    true
}
