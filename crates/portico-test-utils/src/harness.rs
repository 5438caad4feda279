// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for assembling and activating applications.
//!
//! `TestHarness` collects features, optional TOML configuration and an
//! optional point registry, then runs `create_app` and activation the same
//! way the binary does.

use portico_config::model::PorticoConfig;
use portico_core::PorticoError;
use portico_plugin::{
    ActiveApp, Application, CreateAppOptions, Feature, PointRegistry, create_app,
};

/// Builder for test applications.
#[derive(Debug, Default)]
pub struct TestHarness {
    features: Vec<Feature>,
    config: Option<PorticoConfig>,
    points: Option<PointRegistry>,
}

impl TestHarness {
    pub fn builder() -> Self {
        Self::default()
    }

    /// Append a feature in registration order.
    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    pub fn with_features(mut self, features: impl IntoIterator<Item = Feature>) -> Self {
        self.features.extend(features);
        self
    }

    /// Use configuration parsed and validated from TOML.
    ///
    /// Panics on invalid TOML so fixture mistakes fail loudly.
    pub fn with_config_toml(mut self, toml: &str) -> Self {
        let config = portico_config::load_and_validate_str(toml)
            .unwrap_or_else(|errors| panic!("invalid test config: {errors:?}"));
        self.config = Some(config);
        self
    }

    pub fn with_config(mut self, config: PorticoConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_points(mut self, points: PointRegistry) -> Self {
        self.points = Some(points);
        self
    }

    /// Assemble the application.
    pub fn build(self) -> Result<Application, PorticoError> {
        create_app(CreateAppOptions {
            features: self.features,
            points: self.points,
            config: self.config,
        })
    }

    /// Assemble and activate the application.
    pub async fn activate(self) -> Result<ActiveApp, PorticoError> {
        self.build()?.activate().await
    }
}
