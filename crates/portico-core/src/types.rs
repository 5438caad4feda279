// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common identity and context types shared across the Portico framework.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifier of the plugin that owns a feature or extension (e.g. "catalog").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PluginId(pub String);

impl PluginId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an extension, rendered as `kind:namespace/name`.
///
/// The namespace is the owning plugin id. Unnamed extensions render as
/// `kind:namespace`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExtensionId(pub String);

impl ExtensionId {
    pub fn new(kind: &str, namespace: &str, name: Option<&str>) -> Self {
        match name {
            Some(name) => Self(format!("{kind}:{namespace}/{name}")),
            None => Self(format!("{kind}:{namespace}")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a feature in an application's feature list.
///
/// Plugins are identified by their plugin id. Modules are identified by
/// `plugin_id/module_name`, so several modules may extend the same plugin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeatureId(pub String);

impl FeatureId {
    pub fn plugin(plugin_id: &PluginId) -> Self {
        Self(plugin_id.0.clone())
    }

    pub fn module(plugin_id: &PluginId, module: &str) -> Self {
        Self(format!("{}/{module}", plugin_id.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How many extensions an extension point retains.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    /// Exactly one extension is retained.
    Singleton,
    /// Every contributed extension is retained.
    Multi,
}

/// The kind of value an extension contributes once its loader resolves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ContributionKind {
    SignInPage,
    NavContent,
    NavItem,
    EntityCard,
    EntityContent,
    Page,
}

/// A catalog entity being viewed, as seen by extension filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityContext {
    pub kind: String,
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

impl EntityContext {
    /// Create an entity in the `default` namespace without annotations.
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            namespace: "default".to_string(),
            name: name.into(),
            annotations: BTreeMap::new(),
        }
    }

    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations.get(key).map(String::as_str)
    }

    /// Returns true if the annotation is present with a non-blank value.
    pub fn has_annotation(&self, key: &str) -> bool {
        self.annotation(key).is_some_and(|v| !v.trim().is_empty())
    }

    /// Entity reference in `kind:namespace/name` form, lowercased kind.
    pub fn entity_ref(&self) -> String {
        format!(
            "{}:{}/{}",
            self.kind.to_lowercase(),
            self.namespace,
            self.name
        )
    }
}

/// The context an extension filter is evaluated against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "lowercase")]
pub enum ViewContext {
    /// App-wide surfaces with no entity in view (nav, pages, sign-in).
    Global,
    /// An entity page.
    Entity(EntityContext),
}

impl ViewContext {
    pub fn entity(&self) -> Option<&EntityContext> {
        match self {
            ViewContext::Entity(entity) => Some(entity),
            ViewContext::Global => None,
        }
    }
}

/// Reference to an externally configured API (e.g. `core.auth.github`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApiRef(pub String);

impl ApiRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A signed-in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Entity reference of the signed-in user (`user:development/guest` for guests).
    pub user_entity_ref: String,
    /// Id of the sign-in provider that produced this identity.
    pub provider: String,
}

impl Identity {
    pub fn guest() -> Self {
        Self {
            user_entity_ref: "user:development/guest".to_string(),
            provider: "guest".to_string(),
        }
    }
}
