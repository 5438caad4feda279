// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Portico portal framework.

use thiserror::Error;

/// The primary error type used across composition, activation, and sign-in.
///
/// Composition-time variants abort startup. Runtime variants
/// (`LoaderFailure`, `AuthProviderUnavailable`) are isolated to the
/// extension point or sign-in attempt that raised them.
#[derive(Debug, Error)]
pub enum PorticoError {
    /// Invalid or inconsistent composition parameters.
    #[error("configuration error: {0}")]
    Config(String),

    /// A blueprint was invoked without one of its required parameters.
    #[error("configuration error: blueprint `{blueprint}` is missing required parameter `{field}`")]
    MissingParameter { blueprint: String, field: String },

    /// More than one extension targets a singleton point marked strict.
    #[error(
        "configuration error: strict singleton point `{point}` has {} contenders: {}",
        .extensions.len(),
        .extensions.join(", ")
    )]
    SingletonConflict {
        point: String,
        extensions: Vec<String>,
    },

    /// An extension references a point the host registry does not know.
    #[error("extension `{extension}` targets unknown extension point `{point}`")]
    UnknownExtensionPoint { extension: String, point: String },

    /// Two features share the same feature id.
    #[error("duplicate feature `{feature_id}` in feature list")]
    DuplicateFeature { feature_id: String },

    /// An extension's loader failed or produced the wrong contribution.
    #[error("loader for extension `{extension}` on point `{point}` failed: {message}")]
    LoaderFailure {
        extension: String,
        point: String,
        message: String,
    },

    /// A loader on a mandatory point failed, so the application cannot start.
    #[error("mandatory extension point `{point}` failed to activate: {source}")]
    MandatoryPointFailed {
        point: String,
        source: Box<PorticoError>,
    },

    /// A sign-in provider references an authentication API that is not configured.
    #[error("sign-in provider `{provider}` is unavailable: no authentication API registered for `{api_ref}`")]
    AuthProviderUnavailable { provider: String, api_ref: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PorticoError {
    /// Shorthand for a missing blueprint parameter.
    pub fn missing(blueprint: &str, field: &str) -> Self {
        PorticoError::MissingParameter {
            blueprint: blueprint.to_string(),
            field: field.to_string(),
        }
    }

    /// Returns true for errors raised while composing the application.
    ///
    /// These are always fatal: the application never becomes live.
    pub fn is_composition_error(&self) -> bool {
        matches!(
            self,
            PorticoError::Config(_)
                | PorticoError::MissingParameter { .. }
                | PorticoError::SingletonConflict { .. }
                | PorticoError::UnknownExtensionPoint { .. }
                | PorticoError::DuplicateFeature { .. }
        )
    }

    /// Returns true for missing or invalid parameters and strict singleton conflicts.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            PorticoError::Config(_)
                | PorticoError::MissingParameter { .. }
                | PorticoError::SingletonConflict { .. }
        )
    }
}
