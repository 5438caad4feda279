// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./portico.toml` > `~/.config/portico/portico.toml` > `/etc/portico/portico.toml`
//! with environment variable overrides via `PORTICO_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::PorticoConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/portico/portico.toml` (system-wide)
/// 3. `~/.config/portico/portico.toml` (user XDG config)
/// 4. `./portico.toml` (local directory)
/// 5. `PORTICO_*` environment variables
pub fn load_config() -> Result<PorticoConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<PorticoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PorticoConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PorticoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PorticoConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PorticoConfig::default()))
        .merge(Toml::file("/etc/portico/portico.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("portico/portico.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("portico.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")`: `PORTICO_APP_LOG_LEVEL`
/// must map to `app.log_level`, not `app.log.level`.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("PORTICO_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        let mapped = map_env_key(key.as_str());
        mapped.into()
    })
}

/// Map a lowercased, prefix-stripped env var name to a dotted config key.
pub(crate) fn map_env_key(key: &str) -> String {
    key.replacen("app_", "app.", 1)
        .replacen("points_", "points.", 1)
}
