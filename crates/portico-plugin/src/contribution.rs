// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Values extensions contribute once their loaders resolve.
//!
//! A [`ViewNode`] is a declarative element tree standing in for a
//! renderable. Nothing in this crate renders it; hosts walk the tree.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use portico_core::{ApiRef, ContributionKind, EntityContext, Identity, PorticoError};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::debug;

use crate::api::ApiRegistry;

/// A declarative UI element with ordered props and children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewNode {
    pub element: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub props: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ViewNode>,
}

impl ViewNode {
    pub fn new(element: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            props: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn child(mut self, child: ViewNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ViewNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Depth-first search for the first node with the given element name.
    pub fn find(&self, element: &str) -> Option<&ViewNode> {
        if self.element == element {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(element))
    }

    /// Depth-first list of every node with the given element name.
    pub fn find_all<'a>(&'a self, element: &str) -> Vec<&'a ViewNode> {
        let mut found = Vec::new();
        self.collect(element, &mut found);
        found
    }

    fn collect<'a>(&'a self, element: &str, out: &mut Vec<&'a ViewNode>) {
        if self.element == element {
            out.push(self);
        }
        for child in &self.children {
            child.collect(element, out);
        }
    }

    /// Indented outline, one element per line.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(0, &mut out);
        out
    }

    fn write_outline(&self, depth: usize, out: &mut String) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&self.element);
        for (k, v) in &self.props {
            out.push_str(&format!(" {k}={v:?}"));
        }
        out.push('\n');
        for child in &self.children {
            child.write_outline(depth + 1, out);
        }
    }
}

/// A dynamic navigation entry injected into the nav shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub title: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl NavItem {
    pub fn to_view(&self) -> ViewNode {
        let mut node = ViewNode::new("SidebarItem")
            .prop("text", &self.title)
            .prop("to", &self.to);
        if let Some(icon) = &self.icon {
            node = node.prop("icon", icon);
        }
        node
    }
}

/// Props the host passes to the nav content component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavContentProps {
    /// Items from every nav-item extension, in registration order.
    pub items: Vec<NavItem>,
}

type NavContentFn = dyn Fn(&NavContentProps) -> ViewNode + Send + Sync;

/// Component that renders the whole nav shell around the dynamic items.
#[derive(Clone)]
pub struct NavContentComponent(Arc<NavContentFn>);

impl NavContentComponent {
    pub fn new(f: impl Fn(&NavContentProps) -> ViewNode + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn render(&self, props: &NavContentProps) -> ViewNode {
        (self.0)(props)
    }
}

impl fmt::Debug for NavContentComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NavContentComponent(..)")
    }
}

type EntityRenderFn = dyn Fn(&EntityContext) -> ViewNode + Send + Sync;

/// Component rendered against the entity currently in view.
#[derive(Clone)]
pub struct EntityComponent(Arc<EntityRenderFn>);

impl EntityComponent {
    pub fn new(f: impl Fn(&EntityContext) -> ViewNode + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// A component that ignores the entity and always renders `node`.
    pub fn fixed(node: ViewNode) -> Self {
        Self::new(move |_| node.clone())
    }

    pub fn render(&self, entity: &EntityContext) -> ViewNode {
        (self.0)(entity)
    }
}

impl fmt::Debug for EntityComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EntityComponent(..)")
    }
}

/// Placement hint for entity cards.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Summary,
    Info,
    Content,
}

#[derive(Debug, Clone)]
pub struct EntityCard {
    pub card_type: Option<CardType>,
    pub component: EntityComponent,
}

#[derive(Debug, Clone)]
pub struct EntityContent {
    /// Route segment under the entity page (e.g. "kubernetes").
    pub path: String,
    pub title: String,
    pub component: EntityComponent,
}

#[derive(Debug, Clone)]
pub struct Page {
    pub path: String,
    pub view: ViewNode,
}

/// One entry in a sign-in page's provider list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignInProvider {
    /// Always-available identity that needs no credentials.
    Guest(GuestToken),
    /// A provider backed by an externally configured authentication API.
    Custom {
        id: String,
        title: String,
        message: String,
        #[serde(rename = "apiRef")]
        api_ref: ApiRef,
    },
}

/// The literal `"guest"` token in a provider list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuestToken {
    Guest,
}

impl SignInProvider {
    pub fn guest() -> Self {
        SignInProvider::Guest(GuestToken::Guest)
    }

    pub fn custom(
        id: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
        api_ref: ApiRef,
    ) -> Self {
        SignInProvider::Custom {
            id: id.into(),
            title: title.into(),
            message: message.into(),
            api_ref,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            SignInProvider::Guest(_) => "guest",
            SignInProvider::Custom { id, .. } => id,
        }
    }
}

/// Props the host passes to the sign-in page renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInPageProps {
    pub app_title: String,
}

/// A rendered sign-in page: the host props plus the provider list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInPage {
    pub props: SignInPageProps,
    pub providers: Vec<SignInProvider>,
}

impl SignInPage {
    pub fn provider(&self, id: &str) -> Option<&SignInProvider> {
        self.providers.iter().find(|p| p.id() == id)
    }

    pub fn view(&self) -> ViewNode {
        let providers = self.providers.iter().map(|p| match p {
            SignInProvider::Guest(_) => ViewNode::new("GuestProvider"),
            SignInProvider::Custom {
                id,
                title,
                message,
                api_ref,
            } => ViewNode::new("Provider")
                .prop("id", id)
                .prop("title", title)
                .prop("message", message)
                .prop("apiRef", api_ref.as_str()),
        });
        ViewNode::new("SignInPage")
            .prop("title", &self.props.app_title)
            .children(providers)
    }

    /// Run the sign-in flow for the provider with the given id.
    ///
    /// Fails with `AuthProviderUnavailable` when the provider is not listed
    /// or its API reference has no registered authentication API.
    pub async fn sign_in(
        &self,
        provider_id: &str,
        apis: &ApiRegistry,
    ) -> Result<Identity, PorticoError> {
        match self.provider(provider_id) {
            Some(SignInProvider::Guest(_)) => Ok(Identity::guest()),
            Some(SignInProvider::Custom { id, api_ref, .. }) => {
                let api = apis.auth(api_ref).ok_or_else(|| {
                    PorticoError::AuthProviderUnavailable {
                        provider: id.clone(),
                        api_ref: api_ref.to_string(),
                    }
                })?;
                debug!(provider = %id, api = api.name(), "delegating sign-in");
                api.sign_in().await
            }
            None => Err(PorticoError::AuthProviderUnavailable {
                provider: provider_id.to_string(),
                api_ref: "(not listed on sign-in page)".to_string(),
            }),
        }
    }
}

type SignInRenderFn = dyn Fn(&SignInPageProps) -> SignInPage + Send + Sync;

/// Renderer produced by the sign-in page loader.
#[derive(Clone)]
pub struct SignInRenderer(Arc<SignInRenderFn>);

impl SignInRenderer {
    pub fn new(f: impl Fn(&SignInPageProps) -> SignInPage + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// A renderer that lists the given providers.
    pub fn with_providers(providers: Vec<SignInProvider>) -> Self {
        Self::new(move |props| SignInPage {
            props: props.clone(),
            providers: providers.clone(),
        })
    }

    pub fn render(&self, props: &SignInPageProps) -> SignInPage {
        (self.0)(props)
    }
}

impl fmt::Debug for SignInRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SignInRenderer(..)")
    }
}

/// A resolved contribution. The variant must match the target point's kind.
#[derive(Debug, Clone)]
pub enum Contribution {
    SignInPage(SignInRenderer),
    NavContent(NavContentComponent),
    NavItem(NavItem),
    EntityCard(EntityCard),
    EntityContent(EntityContent),
    Page(Page),
}

impl Contribution {
    pub fn kind(&self) -> ContributionKind {
        match self {
            Contribution::SignInPage(_) => ContributionKind::SignInPage,
            Contribution::NavContent(_) => ContributionKind::NavContent,
            Contribution::NavItem(_) => ContributionKind::NavItem,
            Contribution::EntityCard(_) => ContributionKind::EntityCard,
            Contribution::EntityContent(_) => ContributionKind::EntityContent,
            Contribution::Page(_) => ContributionKind::Page,
        }
    }
}
