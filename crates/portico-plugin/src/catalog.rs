// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in plugin catalog.
//!
//! Stand-ins for the third-party plugins the portal ships with. Each entry
//! builds a feature that contributes at the plugin's interface boundary
//! (pages, entity cards and tabs); the plugins' own behavior is not modeled.

use portico_core::{EntityContext, PorticoError};
use serde::Serialize;

use crate::blueprint::{
    Blueprint, EntityCardBlueprint, EntityCardParams, EntityContentBlueprint, EntityContentParams,
    PageBlueprint, PageParams,
};
use crate::contribution::{CardType, EntityComponent, ViewNode};
use crate::extension::{Filter, Loader};
use crate::feature::{Feature, create_frontend_plugin};
use crate::legacy::{
    LegacyComponent, LegacyComponentKind, LegacyConversion, LegacyExtensionConfig, LegacyPlugin,
    convert_legacy_entity_card_extension, convert_legacy_entity_content_extension,
    convert_legacy_plugin,
};

pub const ARGOCD_APP_NAME: &str = "argocd/app-name";
pub const ARGOCD_APP_SELECTOR: &str = "argocd/app-selector";
pub const KUBERNETES_ID: &str = "backstage.io/kubernetes-id";
pub const KUBERNETES_LABEL_SELECTOR: &str = "backstage.io/kubernetes-label-selector";
pub const MANIFEST_FILE_PATH: &str = "terasky.backstage.io/manifest-file-path";

/// A plugin compiled into the portal.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    /// Feature id of the built plugin.
    pub id: &'static str,
    pub package: &'static str,
    pub description: &'static str,
    /// Written against the legacy plugin interface and converted on build.
    pub legacy: bool,
    #[serde(skip)]
    pub build: fn() -> Result<Feature, PorticoError>,
}

/// Returns all built-in plugins in portal registration order.
pub fn builtin_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry {
            id: "catalog",
            package: "@backstage/plugin-catalog",
            description: "Software catalog index page and entity overview cards",
            legacy: false,
            build: catalog_plugin,
        },
        CatalogEntry {
            id: "kubernetes",
            package: "@backstage/plugin-kubernetes",
            description: "Kubernetes workloads tab for entities with cluster annotations",
            legacy: false,
            build: kubernetes_plugin,
        },
        CatalogEntry {
            id: "kyverno-policy-reports",
            package: "@terasky/backstage-plugin-kyverno-policy-reports",
            description: "Kyverno policy report tab for Kubernetes-backed entities",
            legacy: false,
            build: kyverno_policy_reports_plugin,
        },
        CatalogEntry {
            id: "entity-scaffolder-content",
            package: "@terasky/backstage-plugin-entity-scaffolder-content",
            description: "Entity-scoped scaffolder templates tab",
            legacy: false,
            build: entity_scaffolder_content_plugin,
        },
        CatalogEntry {
            id: "gitops-manifest-updater",
            package: "@terasky/backstage-plugin-gitops-manifest-updater",
            description: "Card for editing GitOps manifests referenced by an entity",
            legacy: false,
            build: gitops_manifest_updater_plugin,
        },
        CatalogEntry {
            id: "argocd",
            package: "@roadiehq/backstage-plugin-argo-cd",
            description: "Argo CD overview card and deployment history, converted from the legacy plugin interface",
            legacy: true,
            build: argocd_plugin,
        },
    ]
}

/// Filter the catalog by id, package or description (case-insensitive).
///
/// An empty query returns every entry.
pub fn search_catalog(query: &str) -> Vec<CatalogEntry> {
    if query.is_empty() {
        return builtin_catalog();
    }
    let query_lower = query.to_lowercase();
    builtin_catalog()
        .into_iter()
        .filter(|e| {
            e.id.contains(&query_lower)
                || e.package.to_lowercase().contains(&query_lower)
                || e.description.to_lowercase().contains(&query_lower)
        })
        .collect()
}

fn placeholder(element: &'static str) -> EntityComponent {
    EntityComponent::new(move |entity| ViewNode::new(element).prop("entity", entity.entity_ref()))
}

pub fn catalog_plugin() -> Result<Feature, PorticoError> {
    create_frontend_plugin(
        "catalog",
        vec![
            PageBlueprint::make(
                PageParams::default()
                    .path("/catalog")
                    .loader(Loader::ready(ViewNode::new("CatalogIndexPage"))),
            )?,
            EntityCardBlueprint::make(
                EntityCardParams::default()
                    .name("about")
                    .card_type(CardType::Info)
                    .loader(Loader::ready(placeholder("EntityAboutCard"))),
            )?
            .with_order(-10),
        ],
    )
}

pub fn kubernetes_plugin() -> Result<Feature, PorticoError> {
    create_frontend_plugin(
        "kubernetes",
        vec![EntityContentBlueprint::make(
            EntityContentParams::default()
                .path("kubernetes")
                .title("Kubernetes")
                .filter(Filter::has_any_annotation(&[
                    KUBERNETES_ID,
                    KUBERNETES_LABEL_SELECTOR,
                ]))
                .loader(Loader::ready(placeholder("EntityKubernetesContent"))),
        )?],
    )
}

pub fn kyverno_policy_reports_plugin() -> Result<Feature, PorticoError> {
    create_frontend_plugin(
        "kyverno-policy-reports",
        vec![EntityContentBlueprint::make(
            EntityContentParams::default()
                .path("kyverno-policy-reports")
                .title("Kyverno Policy Reports")
                .filter(Filter::has_any_annotation(&[
                    KUBERNETES_ID,
                    KUBERNETES_LABEL_SELECTOR,
                ]))
                .loader(Loader::ready(placeholder("KyvernoPolicyReportsContent"))),
        )?],
    )
}

pub fn entity_scaffolder_content_plugin() -> Result<Feature, PorticoError> {
    create_frontend_plugin(
        "entity-scaffolder-content",
        vec![EntityContentBlueprint::make(
            EntityContentParams::default()
                .path("scaffolder")
                .title("Scaffolder")
                .filter(Filter::entity(|e| {
                    matches!(e.kind.to_lowercase().as_str(), "component" | "system")
                }))
                .loader(Loader::ready(placeholder("EntityScaffolderContent"))),
        )?],
    )
}

pub fn gitops_manifest_updater_plugin() -> Result<Feature, PorticoError> {
    create_frontend_plugin(
        "gitops-manifest-updater",
        vec![EntityCardBlueprint::make(
            EntityCardParams::default()
                .card_type(CardType::Content)
                .filter(Filter::has_any_annotation(&[MANIFEST_FILE_PATH]))
                .loader(Loader::ready(placeholder("GitOpsManifestUpdaterCard"))),
        )?],
    )
}

/// Whether `entity` carries the annotations the Argo CD plugin needs.
pub fn is_argocd_configured(entity: &EntityContext) -> bool {
    entity.has_annotation(ARGOCD_APP_NAME) || entity.has_annotation(ARGOCD_APP_SELECTOR)
}

/// The Argo CD plugin in its legacy, imperative form.
pub fn argocd_legacy_plugin() -> LegacyPlugin {
    LegacyPlugin::new("argocd")
        .provide(
            LegacyComponent::new("overview", LegacyComponentKind::Card, |e| {
                ViewNode::new("EntityArgoCDOverviewCard").prop("entity", e.entity_ref())
            })
            .with_filter(is_argocd_configured),
        )
        .provide(
            LegacyComponent::new("history", LegacyComponentKind::Content, |e| {
                ViewNode::new("EntityArgoCDHistoryCard").prop("entity", e.entity_ref())
            })
            .with_filter(is_argocd_configured),
        )
}

/// Convert the legacy Argo CD plugin into a feature.
pub fn argocd_plugin() -> Result<Feature, PorticoError> {
    let legacy = argocd_legacy_plugin();
    let mut extensions = Vec::new();
    for component in legacy.components() {
        let converted = match component.kind() {
            LegacyComponentKind::Card => convert_legacy_entity_card_extension(
                component,
                LegacyExtensionConfig::default().card_type(CardType::Info),
            )?,
            LegacyComponentKind::Content => convert_legacy_entity_content_extension(
                component,
                LegacyExtensionConfig::default().path("argocd").title("Argo CD"),
            )?,
        };
        extensions.push(converted);
    }
    convert_legacy_plugin(&legacy, LegacyConversion { extensions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use portico_core::ViewContext;

    #[test]
    fn builtin_catalog_lists_six_plugins() {
        let catalog = builtin_catalog();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.iter().filter(|e| e.legacy).count(), 1);
    }

    #[test]
    fn every_entry_builds_a_feature_with_its_id() {
        for entry in builtin_catalog() {
            let feature = (entry.build)().unwrap();
            assert_eq!(feature.id().as_str(), entry.id);
            assert!(!feature.extensions().is_empty(), "{} has no extensions", entry.id);
        }
    }

    #[test]
    fn search_catalog_by_id() {
        let results = search_catalog("kyverno");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "kyverno-policy-reports");
    }

    #[test]
    fn search_catalog_case_insensitive() {
        let results = search_catalog("ARGO CD");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "argocd");
    }

    #[test]
    fn search_catalog_by_package() {
        let results = search_catalog("@terasky");
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn search_catalog_empty_returns_all() {
        assert_eq!(search_catalog("").len(), 6);
    }

    #[test]
    fn search_catalog_no_match() {
        assert!(search_catalog("xyz_nonexistent").is_empty());
    }

    #[test]
    fn argocd_configuration_requires_non_blank_annotation() {
        let bare = EntityContext::new("Component", "svc");
        assert!(!is_argocd_configured(&bare));
        assert!(is_argocd_configured(&bare.clone().with_annotation(ARGOCD_APP_NAME, "svc")));
        assert!(is_argocd_configured(
            &bare.clone().with_annotation(ARGOCD_APP_SELECTOR, "app=svc")
        ));
        assert!(!is_argocd_configured(&bare.with_annotation(ARGOCD_APP_NAME, "  ")));
    }

    #[test]
    fn argocd_feature_gates_on_is_argocd_configured() {
        let feature = argocd_plugin().unwrap();
        let ids: Vec<&str> = feature.extensions().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["entity-card:argocd/overview", "entity-content:argocd/history"]);

        let configured = EntityContext::new("Component", "svc").with_annotation(ARGOCD_APP_NAME, "svc");
        let bare = EntityContext::new("Component", "svc");
        for ext in feature.extensions() {
            assert!(ext.applies_to(&ViewContext::Entity(configured.clone())));
            assert!(!ext.applies_to(&ViewContext::Entity(bare.clone())));
        }
    }
}
