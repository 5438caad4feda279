// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loader resolution.
//!
//! Activation runs every bound loader concurrently, once. A failure only
//! removes the owning contribution unless its point is mandatory.

use std::collections::BTreeMap;

use futures::future::join_all;
use portico_core::{EntityContext, ExtensionId, PorticoError, ViewContext};
use tracing::{debug, error, info, warn};

use crate::app::Application;
use crate::contribution::{
    Contribution, EntityCard, EntityContent, NavContentProps, NavItem, Page, SignInPage,
    SignInPageProps, ViewNode,
};
use crate::extension::Extension;
use crate::point;

/// An optional contribution omitted because its loader failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationFailure {
    pub point: String,
    pub extension: ExtensionId,
    pub message: String,
}

#[derive(Debug, Clone)]
struct Resolved {
    extension: Extension,
    contribution: Contribution,
}

/// An application whose loaders have all been resolved.
#[derive(Debug, Clone)]
pub struct ActiveApp {
    app: Application,
    resolved: BTreeMap<String, Vec<Resolved>>,
    failures: Vec<ActivationFailure>,
}

async fn load_one(extension: &Extension) -> Result<Contribution, PorticoError> {
    let failure = |message: String| PorticoError::LoaderFailure {
        extension: extension.id.to_string(),
        point: extension.point.clone(),
        message,
    };
    let contribution = extension
        .loader
        .load()
        .await
        .map_err(|e| failure(e.to_string()))?;
    if contribution.kind() != extension.produces {
        return Err(failure(format!(
            "loader produced `{}`, expected `{}`",
            contribution.kind(),
            extension.produces
        )));
    }
    Ok(contribution)
}

impl Application {
    /// Resolve every loader concurrently.
    ///
    /// Returns `MandatoryPointFailed` if any loader on a mandatory point
    /// fails; other failures are recorded on the returned [`ActiveApp`].
    pub async fn activate(&self) -> Result<ActiveApp, PorticoError> {
        let pending: Vec<(&str, &Extension)> = self
            .points()
            .flat_map(|p| self.extensions(&p.name).iter().map(move |e| (p.name.as_str(), e)))
            .collect();
        debug!(loaders = pending.len(), "activating application");

        let results = join_all(pending.iter().map(|(_, ext)| load_one(ext))).await;

        let mut resolved: BTreeMap<String, Vec<Resolved>> = BTreeMap::new();
        let mut failures = Vec::new();
        for ((point_name, extension), result) in pending.into_iter().zip(results) {
            match result {
                Ok(contribution) => resolved.entry(point_name.to_string()).or_default().push(
                    Resolved {
                        extension: extension.clone(),
                        contribution,
                    },
                ),
                Err(err) => {
                    let mandatory = self.point(point_name).is_some_and(|p| p.mandatory);
                    if mandatory {
                        error!(point = point_name, extension = %extension.id, error = %err, "mandatory point failed");
                        return Err(PorticoError::MandatoryPointFailed {
                            point: point_name.to_string(),
                            source: Box::new(err),
                        });
                    }
                    warn!(point = point_name, extension = %extension.id, error = %err, "contribution omitted");
                    failures.push(ActivationFailure {
                        point: point_name.to_string(),
                        extension: extension.id.clone(),
                        message: err.to_string(),
                    });
                }
            }
        }

        info!(
            resolved = resolved.values().map(Vec::len).sum::<usize>(),
            failed = failures.len(),
            "application activated"
        );
        Ok(ActiveApp {
            app: self.clone(),
            resolved,
            failures,
        })
    }
}

impl ActiveApp {
    pub fn application(&self) -> &Application {
        &self.app
    }

    /// Contributions omitted during activation.
    pub fn failures(&self) -> &[ActivationFailure] {
        &self.failures
    }

    fn resolved(&self, point: &str) -> &[Resolved] {
        self.resolved
            .get(point)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn applicable(&self, point: &str, ctx: &ViewContext) -> Vec<&Resolved> {
        self.resolved(point)
            .iter()
            .filter(|r| r.extension.applies_to(ctx))
            .collect()
    }

    /// Render the sign-in page. `None` when no sign-in extension is bound.
    pub fn sign_in_page(&self, props: &SignInPageProps) -> Option<SignInPage> {
        self.resolved(point::SIGN_IN_PAGE)
            .iter()
            .find_map(|r| match &r.contribution {
                Contribution::SignInPage(renderer) => Some(renderer.render(props)),
                _ => None,
            })
    }

    /// Sign-in page props derived from the application config.
    pub fn sign_in_props(&self) -> SignInPageProps {
        SignInPageProps {
            app_title: self.app.config().app.title.clone(),
        }
    }

    /// Navigation items in resolved order.
    pub fn nav_items(&self) -> Vec<NavItem> {
        self.applicable(point::NAV_ITEM, &ViewContext::Global)
            .into_iter()
            .filter_map(|r| match &r.contribution {
                Contribution::NavItem(item) => Some(item.clone()),
                _ => None,
            })
            .collect()
    }

    /// Apply the nav content shell to the nav items.
    pub fn render_nav(&self) -> Option<ViewNode> {
        let props = NavContentProps {
            items: self.nav_items(),
        };
        self.resolved(point::NAV_CONTENT)
            .iter()
            .find_map(|r| match &r.contribution {
                Contribution::NavContent(component) => Some(component.render(&props)),
                _ => None,
            })
    }

    /// Entity cards whose filters accept `entity`.
    pub fn entity_cards(&self, entity: &EntityContext) -> Vec<(&ExtensionId, &EntityCard)> {
        let ctx = ViewContext::Entity(entity.clone());
        self.applicable(point::ENTITY_CARD, &ctx)
            .into_iter()
            .filter_map(|r| match &r.contribution {
                Contribution::EntityCard(card) => Some((&r.extension.id, card)),
                _ => None,
            })
            .collect()
    }

    /// Entity content tabs whose filters accept `entity`.
    pub fn entity_contents(&self, entity: &EntityContext) -> Vec<(&ExtensionId, &EntityContent)> {
        let ctx = ViewContext::Entity(entity.clone());
        self.applicable(point::ENTITY_CONTENT, &ctx)
            .into_iter()
            .filter_map(|r| match &r.contribution {
                Contribution::EntityContent(content) => Some((&r.extension.id, content)),
                _ => None,
            })
            .collect()
    }

    pub fn pages(&self) -> Vec<&Page> {
        self.applicable(point::PAGE, &ViewContext::Global)
            .into_iter()
            .filter_map(|r| match &r.contribution {
                Contribution::Page(page) => Some(page),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::app::{CreateAppOptions, create_app};
    use crate::blueprint::{
        Blueprint, EntityCardBlueprint, EntityCardParams, NavContentBlueprint, NavContentParams,
        NavItemBlueprint, NavItemParams, PageBlueprint, PageParams, SignInPageBlueprint,
        SignInPageParams,
    };
    use crate::contribution::{
        EntityComponent, NavContentComponent, SignInProvider, SignInRenderer,
    };
    use crate::extension::{ExtensionDefinition, Filter, Loader};
    use crate::feature::{create_frontend_module, create_frontend_plugin};

    fn sign_in_ok() -> ExtensionDefinition {
        SignInPageBlueprint::make(SignInPageParams::default().loader(Loader::ready(
            SignInRenderer::with_providers(vec![SignInProvider::guest()]),
        )))
        .unwrap()
    }

    fn sign_in_failing() -> ExtensionDefinition {
        SignInPageBlueprint::make(SignInPageParams::default().loader(Loader::new(|| async {
            Err(PorticoError::Internal("renderer bundle missing".into()))
        })))
        .unwrap()
    }

    fn nav_shell() -> ExtensionDefinition {
        NavContentBlueprint::make(NavContentParams::default().component(NavContentComponent::new(
            |props| {
                ViewNode::new("Sidebar")
                    .children(props.items.iter().map(NavItem::to_view))
            },
        )))
        .unwrap()
    }

    fn nav(name: &str) -> ExtensionDefinition {
        NavItemBlueprint::make(
            NavItemParams::default()
                .name(name)
                .title(name)
                .to(format!("/{name}")),
        )
        .unwrap()
    }

    fn failing_card(name: &str) -> ExtensionDefinition {
        EntityCardBlueprint::make(EntityCardParams::default().name(name).loader(Loader::new(
            || async { Err(PorticoError::Internal("chunk load failed".into())) },
        )))
        .unwrap()
    }

    fn card(name: &str, filter: Option<Filter>) -> ExtensionDefinition {
        let mut params = EntityCardParams::default()
            .name(name)
            .loader(Loader::ready(EntityComponent::fixed(ViewNode::new(name))));
        if let Some(filter) = filter {
            params = params.filter(filter);
        }
        EntityCardBlueprint::make(params).unwrap()
    }

    #[tokio::test]
    async fn sign_in_and_empty_nav_resolve() {
        let app = create_app(CreateAppOptions::new(vec![
            create_frontend_module("app", "sign-in", vec![sign_in_ok()]).unwrap(),
            create_frontend_module("app", "nav", vec![nav_shell()]).unwrap(),
        ]))
        .unwrap();
        let active = app.activate().await.unwrap();

        let page = active.sign_in_page(&active.sign_in_props()).unwrap();
        assert_eq!(page.props.app_title, "Portico");
        assert_eq!(page.providers, vec![SignInProvider::guest()]);

        assert!(active.nav_items().is_empty());
        let nav = active.render_nav().unwrap();
        assert_eq!(nav.element, "Sidebar");
        assert!(nav.children.is_empty());
    }

    #[tokio::test]
    async fn nav_items_flow_into_shell_in_order() {
        let app = create_app(CreateAppOptions::new(vec![
            create_frontend_plugin("a", vec![nav("docs")]).unwrap(),
            create_frontend_module("app", "nav", vec![nav_shell()]).unwrap(),
            create_frontend_plugin("b", vec![nav("apis")]).unwrap(),
        ]))
        .unwrap();
        let active = app.activate().await.unwrap();
        let titles: Vec<String> = active.nav_items().into_iter().map(|i| i.title).collect();
        assert_eq!(titles, vec!["docs", "apis"]);
        assert_eq!(active.render_nav().unwrap().children.len(), 2);
    }

    #[tokio::test]
    async fn optional_failure_is_isolated() {
        let app = create_app(CreateAppOptions::new(vec![
            create_frontend_plugin("p", vec![failing_card("broken"), card("fine", None)]).unwrap(),
        ]))
        .unwrap();
        let active = app.activate().await.unwrap();
        let entity = EntityContext::new("Component", "svc");
        let cards = active.entity_cards(&entity);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].0.as_str(), "entity-card:p/fine");
        assert_eq!(active.failures().len(), 1);
        assert_eq!(active.failures()[0].extension.as_str(), "entity-card:p/broken");
    }

    #[tokio::test]
    async fn mandatory_failure_aborts_activation() {
        let app = create_app(CreateAppOptions::new(vec![
            create_frontend_plugin("p", vec![sign_in_failing()]).unwrap(),
        ]))
        .unwrap();
        match app.activate().await.unwrap_err() {
            PorticoError::MandatoryPointFailed { point, source } => {
                assert_eq!(point, "sign-in-page");
                assert!(matches!(*source, PorticoError::LoaderFailure { .. }));
            }
            other => panic!("expected MandatoryPointFailed, got {other}"),
        }
    }

    #[tokio::test]
    async fn wrong_contribution_kind_is_a_loader_failure() {
        let mut lying = card("lying", None);
        lying.loader = Loader::ready(Contribution::Page(Page {
            path: "/x".into(),
            view: ViewNode::new("X"),
        }));
        let app = create_app(CreateAppOptions::new(vec![
            create_frontend_plugin("p", vec![lying]).unwrap(),
        ]))
        .unwrap();
        let active = app.activate().await.unwrap();
        assert!(active.failures()[0].message.contains("expected `entity-card`"));
    }

    #[tokio::test]
    async fn filters_gate_entity_cards() {
        let app = create_app(CreateAppOptions::new(vec![
            create_frontend_plugin(
                "p",
                vec![
                    card("any", None),
                    card("annotated", Some(Filter::has_any_annotation(&["argocd/app-name"]))),
                ],
            )
            .unwrap(),
        ]))
        .unwrap();
        let active = app.activate().await.unwrap();
        let bare = EntityContext::new("Component", "a");
        let annotated = EntityContext::new("Component", "b").with_annotation("argocd/app-name", "b");
        assert_eq!(active.entity_cards(&bare).len(), 1);
        assert_eq!(active.entity_cards(&annotated).len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn loaders_run_concurrently_once_per_activation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let slow = |name: &'static str, calls: Arc<AtomicUsize>| {
            PageBlueprint::make(PageParams::default().name(name).path(format!("/{name}")).loader(
                Loader::new(move || {
                    let calls = Arc::clone(&calls);
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_secs(5)).await;
                        Ok(ViewNode::new("Page"))
                    }
                }),
            ))
            .unwrap()
        };
        let app = create_app(CreateAppOptions::new(vec![
            create_frontend_plugin(
                "p",
                vec![slow("one", Arc::clone(&calls)), slow("two", Arc::clone(&calls))],
            )
            .unwrap(),
        ]))
        .unwrap();

        let started = tokio::time::Instant::now();
        let active = app.activate().await.unwrap();
        assert!(started.elapsed() < Duration::from_secs(10));
        assert_eq!(active.pages().len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
