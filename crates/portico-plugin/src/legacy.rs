// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter from the older imperative plugin interface to declarative extensions.
//!
//! A [`LegacyPlugin`] exposes components directly, each rendering straight
//! from an entity and optionally carrying its own entity predicate. The
//! conversion functions wrap a component behind the loader/filter contract
//! and never touch the legacy plugin itself.

use std::fmt;
use std::sync::Arc;

use portico_core::{ContributionKind, EntityContext, PluginId, PorticoError};
use tracing::debug;

use crate::contribution::{
    CardType, Contribution, EntityCard, EntityComponent, EntityContent, ViewNode,
};
use crate::extension::{ExtensionDefinition, Filter, Loader};
use crate::feature::{Feature, create_frontend_plugin};
use crate::point;

/// Element name used to wrap legacy views for the current host.
pub const COMPAT_WRAPPER: &str = "CompatWrapper";

/// Wrap a legacy-style view so the current host can mount it.
pub fn compat_wrapper(node: ViewNode) -> ViewNode {
    ViewNode::new(COMPAT_WRAPPER).child(node)
}

/// The slot a legacy component was written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyComponentKind {
    Card,
    Content,
}

type LegacyRenderFn = dyn Fn(&EntityContext) -> ViewNode + Send + Sync;
type LegacyPredicate = dyn Fn(&EntityContext) -> bool + Send + Sync;

/// A component exported by a legacy plugin.
#[derive(Clone)]
pub struct LegacyComponent {
    name: String,
    kind: LegacyComponentKind,
    render: Arc<LegacyRenderFn>,
    filter: Option<Arc<LegacyPredicate>>,
}

impl LegacyComponent {
    pub fn new(
        name: impl Into<String>,
        kind: LegacyComponentKind,
        render: impl Fn(&EntityContext) -> ViewNode + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            render: Arc::new(render),
            filter: None,
        }
    }

    /// Attach the component's own entity predicate.
    pub fn with_filter(mut self, filter: impl Fn(&EntityContext) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> LegacyComponentKind {
        self.kind
    }

    /// Render directly, the way the legacy host did.
    pub fn render(&self, entity: &EntityContext) -> ViewNode {
        (self.render)(entity)
    }

    /// Evaluate the component's own predicate; components without one always apply.
    pub fn is_applicable(&self, entity: &EntityContext) -> bool {
        self.filter.as_ref().is_none_or(|f| f(entity))
    }
}

impl fmt::Debug for LegacyComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegacyComponent")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("filter", &self.filter.is_some())
            .finish()
    }
}

/// A plugin written against the older imperative interface.
#[derive(Debug, Clone)]
pub struct LegacyPlugin {
    id: PluginId,
    components: Vec<LegacyComponent>,
}

impl LegacyPlugin {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: PluginId::new(id),
            components: Vec::new(),
        }
    }

    pub fn provide(mut self, component: LegacyComponent) -> Self {
        self.components.push(component);
        self
    }

    pub fn id(&self) -> &PluginId {
        &self.id
    }

    pub fn components(&self) -> &[LegacyComponent] {
        &self.components
    }

    pub fn component(&self, name: &str) -> Option<&LegacyComponent> {
        self.components.iter().find(|c| c.name == name)
    }
}

/// Options for converting one legacy component.
#[derive(Debug, Clone, Default)]
pub struct LegacyExtensionConfig {
    /// Replaces the component's own predicate when set.
    pub filter: Option<Filter>,
    pub card_type: Option<CardType>,
    /// Extension name; defaults to the component name.
    pub name: Option<String>,
    /// Route segment; required for content extensions.
    pub path: Option<String>,
    /// Tab title for content extensions; defaults to the component name.
    pub title: Option<String>,
}

impl LegacyExtensionConfig {
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn card_type(mut self, card_type: CardType) -> Self {
        self.card_type = Some(card_type);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Extensions converted from one legacy plugin.
#[derive(Debug, Default)]
pub struct LegacyConversion {
    pub extensions: Vec<ExtensionDefinition>,
}

fn resolve_filter(component: &LegacyComponent, explicit: Option<Filter>) -> Option<Filter> {
    explicit.or_else(|| {
        component.filter.clone().map(|predicate| Filter::entity(move |e| predicate(e)))
    })
}

fn wrapped_component(component: &LegacyComponent) -> EntityComponent {
    let render = Arc::clone(&component.render);
    EntityComponent::new(move |entity| compat_wrapper(render(entity)))
}

fn expect_kind(
    component: &LegacyComponent,
    expected: LegacyComponentKind,
    converter: &str,
) -> Result<(), PorticoError> {
    if component.kind == expected {
        Ok(())
    } else {
        Err(PorticoError::Config(format!(
            "{converter}: legacy component `{}` is a {:?} component, expected {expected:?}",
            component.name, component.kind
        )))
    }
}

/// Convert a legacy entity card component into an entity-card extension.
pub fn convert_legacy_entity_card_extension(
    component: &LegacyComponent,
    config: LegacyExtensionConfig,
) -> Result<ExtensionDefinition, PorticoError> {
    const CONVERTER: &str = "convert_legacy_entity_card_extension";
    expect_kind(component, LegacyComponentKind::Card, CONVERTER)?;

    let card_type = config.card_type;
    let view = wrapped_component(component);
    let loader = Loader::ready(Contribution::EntityCard(EntityCard {
        card_type,
        component: view,
    }));
    let name = config.name.unwrap_or_else(|| component.name.clone());

    let mut def = ExtensionDefinition::new(
        "entity-card",
        Some(name),
        point::ENTITY_CARD,
        ContributionKind::EntityCard,
        loader,
    );
    def.filter = resolve_filter(component, config.filter);
    def.legacy_origin = Some(component.name.clone());
    Ok(def)
}

/// Convert a legacy entity content component into an entity-content extension.
///
/// Fails when `path` is missing.
pub fn convert_legacy_entity_content_extension(
    component: &LegacyComponent,
    config: LegacyExtensionConfig,
) -> Result<ExtensionDefinition, PorticoError> {
    const CONVERTER: &str = "convert_legacy_entity_content_extension";
    expect_kind(component, LegacyComponentKind::Content, CONVERTER)?;

    let path = match config.path {
        Some(path) if !path.trim().is_empty() => path.trim_start_matches('/').to_string(),
        _ => return Err(PorticoError::missing(CONVERTER, "path")),
    };
    let title = config.title.unwrap_or_else(|| component.name.clone());
    let view = wrapped_component(component);
    let loader = Loader::ready(Contribution::EntityContent(EntityContent {
        path,
        title,
        component: view,
    }));
    let name = config.name.unwrap_or_else(|| component.name.clone());

    let mut def = ExtensionDefinition::new(
        "entity-content",
        Some(name),
        point::ENTITY_CONTENT,
        ContributionKind::EntityContent,
        loader,
    );
    def.filter = resolve_filter(component, config.filter);
    def.legacy_origin = Some(component.name.clone());
    Ok(def)
}

/// Produce a new feature wrapping the converted extensions of `plugin`.
///
/// Every converted extension must originate from a component of this
/// plugin. The legacy plugin is only read.
pub fn convert_legacy_plugin(
    plugin: &LegacyPlugin,
    conversion: LegacyConversion,
) -> Result<Feature, PorticoError> {
    for def in &conversion.extensions {
        match def.legacy_origin() {
            Some(origin) if plugin.component(origin).is_some() => {}
            Some(origin) => {
                return Err(PorticoError::Config(format!(
                    "legacy plugin `{}` has no component `{origin}`",
                    plugin.id
                )));
            }
            None => {
                return Err(PorticoError::Config(format!(
                    "extension `{}:{}` passed to convert_legacy_plugin(`{}`) was not produced by a legacy converter",
                    def.kind,
                    def.name.as_deref().unwrap_or("<unnamed>"),
                    plugin.id
                )));
            }
        }
    }

    debug!(
        plugin = %plugin.id,
        converted = conversion.extensions.len(),
        "converted legacy plugin"
    );
    create_frontend_plugin(plugin.id.as_str(), conversion.extensions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use portico_core::ViewContext;

    fn overview_card() -> LegacyComponent {
        LegacyComponent::new("overview", LegacyComponentKind::Card, |e| {
            ViewNode::new("OverviewCard").prop("entity", e.entity_ref())
        })
        .with_filter(|e| e.has_annotation("argocd/app-name"))
    }

    fn history_content() -> LegacyComponent {
        LegacyComponent::new("history", LegacyComponentKind::Content, |_| ViewNode::new("History"))
    }

    fn plugin() -> LegacyPlugin {
        LegacyPlugin::new("argocd")
            .provide(overview_card())
            .provide(history_content())
    }

    #[test]
    fn content_conversion_requires_path() {
        let err = convert_legacy_entity_content_extension(
            &history_content(),
            LegacyExtensionConfig::default(),
        )
        .unwrap_err();
        match err {
            PorticoError::MissingParameter { field, .. } => assert_eq!(field, "path"),
            other => panic!("expected MissingParameter, got {other}"),
        }
    }

    #[test]
    fn kind_mismatch_is_a_config_error() {
        let err = convert_legacy_entity_card_extension(
            &history_content(),
            LegacyExtensionConfig::default(),
        )
        .unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn component_filter_is_lifted_when_no_explicit_filter() {
        let def =
            convert_legacy_entity_card_extension(&overview_card(), LegacyExtensionConfig::default())
                .unwrap();
        let filter = def.filter.unwrap();
        let configured = EntityContext::new("Component", "a").with_annotation("argocd/app-name", "a");
        let bare = EntityContext::new("Component", "b");
        assert!(filter.evaluate(&ViewContext::Entity(configured)));
        assert!(!filter.evaluate(&ViewContext::Entity(bare)));
        assert!(!filter.evaluate(&ViewContext::Global));
    }

    #[test]
    fn explicit_filter_replaces_component_filter() {
        let def = convert_legacy_entity_card_extension(
            &overview_card(),
            LegacyExtensionConfig::default().filter(Filter::new(|_| true)),
        )
        .unwrap();
        assert!(def.filter.unwrap().evaluate(&ViewContext::Global));
    }

    #[tokio::test]
    async fn converted_card_renders_through_compat_wrapper() {
        let def =
            convert_legacy_entity_card_extension(&overview_card(), LegacyExtensionConfig::default())
                .unwrap();
        let entity = EntityContext::new("Component", "svc");
        match def.loader.load().await.unwrap() {
            Contribution::EntityCard(card) => {
                let view = card.component.render(&entity);
                assert_eq!(view.element, COMPAT_WRAPPER);
                assert_eq!(view.children[0].props["entity"], "component:default/svc");
            }
            other => panic!("unexpected contribution {other:?}"),
        }
    }

    #[test]
    fn convert_plugin_produces_feature_and_leaves_legacy_untouched() {
        let legacy = plugin();
        let card = legacy.component("overview").unwrap();
        let content = legacy.component("history").unwrap();

        let feature = convert_legacy_plugin(
            &legacy,
            LegacyConversion {
                extensions: vec![
                    convert_legacy_entity_card_extension(card, LegacyExtensionConfig::default())
                        .unwrap(),
                    convert_legacy_entity_content_extension(
                        content,
                        LegacyExtensionConfig::default().path("/argocd").title("Argo CD"),
                    )
                    .unwrap(),
                ],
            },
        )
        .unwrap();

        let ids: Vec<&str> = feature.extensions().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["entity-card:argocd/overview", "entity-content:argocd/history"]
        );

        assert_eq!(legacy.components().len(), 2);
        let entity = EntityContext::new("Component", "svc");
        assert!(!legacy.component("overview").unwrap().is_applicable(&entity));
        assert_eq!(legacy.component("history").unwrap().render(&entity).element, "History");
    }

    #[test]
    fn convert_plugin_rejects_foreign_components() {
        let other = LegacyComponent::new("foreign", LegacyComponentKind::Card, |_| ViewNode::new("X"));
        let def = convert_legacy_entity_card_extension(&other, LegacyExtensionConfig::default()).unwrap();
        let err = convert_legacy_plugin(
            &plugin(),
            LegacyConversion {
                extensions: vec![def],
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("has no component `foreign`"));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn converted_filter_equals_original_predicate(
                threshold in 0usize..8,
                name_len in 0usize..16,
                with_annotation in any::<bool>(),
            ) {
                let predicate = move |e: &EntityContext| e.name.len() > threshold && e.has_annotation("k");
                let component = LegacyComponent::new("c", LegacyComponentKind::Card, |_| ViewNode::new("C"))
                    .with_filter(predicate);
                let def = convert_legacy_entity_card_extension(&component, LegacyExtensionConfig::default()).unwrap();
                let filter = def.filter.unwrap();

                let mut entity = EntityContext::new("Component", "x".repeat(name_len));
                if with_annotation {
                    entity = entity.with_annotation("k", "v");
                }
                prop_assert_eq!(filter.evaluate(&ViewContext::Entity(entity.clone())), predicate(&entity));
            }
        }
    }
}
