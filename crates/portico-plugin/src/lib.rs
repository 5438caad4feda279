// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feature and extension composition for the Portico portal.
//!
//! Features bundle extensions produced by blueprints (or converted from
//! legacy plugins). `create_app` resolves them against the host's extension
//! points into an immutable [`Application`], and
//! [`Application::activate`] resolves their loaders.

pub mod activation;
pub mod api;
pub mod app;
pub mod blueprint;
pub mod catalog;
pub mod contribution;
pub mod extension;
pub mod feature;
pub mod legacy;
pub mod point;

pub use activation::{ActivationFailure, ActiveApp};
pub use api::ApiRegistry;
pub use app::{AppWarning, Application, CreateAppOptions, create_app};
pub use blueprint::Blueprint;
pub use catalog::{CatalogEntry, builtin_catalog, is_argocd_configured, search_catalog};
pub use contribution::{Contribution, NavItem, SignInPage, SignInProvider, ViewNode};
pub use extension::{Extension, ExtensionDefinition, Filter, Loader};
pub use feature::{Feature, FeatureKind, create_frontend_module, create_frontend_plugin};
pub use legacy::{
    LegacyComponent, LegacyComponentKind, LegacyConversion, LegacyExtensionConfig, LegacyPlugin,
    compat_wrapper, convert_legacy_entity_card_extension, convert_legacy_entity_content_extension,
    convert_legacy_plugin,
};
pub use point::{ExtensionPoint, PointRegistry};
