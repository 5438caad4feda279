// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Portico portal framework.
//!
//! This crate provides the error taxonomy, the identity and view-context
//! types, and the runtime API traits shared by the composition core and the
//! portal application.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PorticoError;
pub use types::{
    ApiRef, Cardinality, ContributionKind, EntityContext, ExtensionId, FeatureId, Identity,
    PluginId, ViewContext,
};

pub use traits::{ApiAdapter, AuthApi};
