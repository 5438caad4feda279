// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Features: named bundles of extensions distributed as a unit.

use std::collections::HashSet;

use portico_core::{FeatureId, PluginId, PorticoError};

use crate::extension::{Extension, ExtensionDefinition};

/// Whether a feature is a full plugin or a module extending one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureKind {
    Plugin,
    /// A module contributes extensions under an existing plugin's namespace.
    Module { name: String },
}

/// A named, ordered bundle of extensions.
#[derive(Debug, Clone)]
pub struct Feature {
    id: FeatureId,
    plugin_id: PluginId,
    kind: FeatureKind,
    extensions: Vec<Extension>,
}

impl Feature {
    pub fn id(&self) -> &FeatureId {
        &self.id
    }

    pub fn plugin_id(&self) -> &PluginId {
        &self.plugin_id
    }

    pub fn kind(&self) -> &FeatureKind {
        &self.kind
    }

    /// Extensions in declaration order.
    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }
}

/// Create a plugin feature identified by its plugin id.
pub fn create_frontend_plugin(
    plugin_id: impl Into<String>,
    extensions: Vec<ExtensionDefinition>,
) -> Result<Feature, PorticoError> {
    let plugin_id = PluginId::new(plugin_id);
    validate_plugin_id(&plugin_id)?;
    let id = FeatureId::plugin(&plugin_id);
    build(id, plugin_id, FeatureKind::Plugin, extensions)
}

/// Create a module contributing extensions under `plugin_id`'s namespace.
///
/// Modules are identified by `plugin_id/module`, so several modules may
/// extend the same plugin (e.g. `app/sign-in` and `app/nav`).
pub fn create_frontend_module(
    plugin_id: impl Into<String>,
    module: impl Into<String>,
    extensions: Vec<ExtensionDefinition>,
) -> Result<Feature, PorticoError> {
    let plugin_id = PluginId::new(plugin_id);
    validate_plugin_id(&plugin_id)?;
    let module = module.into();
    if module.trim().is_empty() || module.contains('/') {
        return Err(PorticoError::Config(format!(
            "module name `{module}` for plugin `{plugin_id}` must be non-empty and contain no '/'"
        )));
    }
    let id = FeatureId::module(&plugin_id, &module);
    build(id, plugin_id, FeatureKind::Module { name: module }, extensions)
}

fn validate_plugin_id(plugin_id: &PluginId) -> Result<(), PorticoError> {
    let id = plugin_id.as_str();
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
    if valid {
        Ok(())
    } else {
        Err(PorticoError::Config(format!(
            "plugin id `{id}` must be non-empty and contain only alphanumerics, '-', '_' or '.'"
        )))
    }
}

fn build(
    id: FeatureId,
    plugin_id: PluginId,
    kind: FeatureKind,
    definitions: Vec<ExtensionDefinition>,
) -> Result<Feature, PorticoError> {
    let extensions: Vec<Extension> = definitions
        .into_iter()
        .map(|def| def.bind(&plugin_id))
        .collect();

    let mut seen = HashSet::new();
    for ext in &extensions {
        if !seen.insert(&ext.id) {
            return Err(PorticoError::Config(format!(
                "feature `{id}` declares extension `{}` more than once",
                ext.id
            )));
        }
    }

    Ok(Feature {
        id,
        plugin_id,
        kind,
        extensions,
    })
}
