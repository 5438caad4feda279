// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The portal's feature list and assembly.

use portico_config::model::PorticoConfig;
use portico_core::PorticoError;
use portico_plugin::catalog::{
    argocd_plugin, catalog_plugin, entity_scaffolder_content_plugin,
    gitops_manifest_updater_plugin, kubernetes_plugin, kyverno_policy_reports_plugin,
};
use portico_plugin::{ApiRegistry, Application, CreateAppOptions, Feature, PointRegistry, create_app};
use tracing::info;

use crate::apis::api_registry_from_config;
use crate::nav::nav_module;
use crate::sign_in::sign_in_module;

/// Every portal feature in registration order.
pub fn portal_features() -> Result<Vec<Feature>, PorticoError> {
    Ok(vec![
        sign_in_module()?,
        catalog_plugin()?,
        nav_module()?,
        kubernetes_plugin()?,
        kyverno_policy_reports_plugin()?,
        entity_scaffolder_content_plugin()?,
        gitops_manifest_updater_plugin()?,
        argocd_plugin()?,
    ])
}

/// The assembled portal and the APIs its sign-in page can reach.
#[derive(Debug, Clone)]
pub struct Portal {
    pub app: Application,
    pub apis: ApiRegistry,
}

/// Assemble the portal from `config`.
pub fn build_portal(config: PorticoConfig) -> Result<Portal, PorticoError> {
    let apis = api_registry_from_config(&config.auth);
    let app = create_app(
        CreateAppOptions::new(portal_features()?)
            .points(PointRegistry::with_defaults())
            .config(config),
    )?;
    info!(
        features = app.feature_ids().len(),
        apis = apis.len(),
        "portal assembled"
    );
    Ok(Portal { app, apis })
}
