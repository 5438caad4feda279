// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extensions: typed contributions bound to an extension point.
//!
//! Blueprints produce an [`ExtensionDefinition`]; a feature binds each
//! definition to its plugin id, yielding an [`Extension`].

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use portico_core::{ContributionKind, EntityContext, ExtensionId, PluginId, PorticoError, ViewContext};

use crate::contribution::Contribution;

type LoaderFn<T> = dyn Fn() -> BoxFuture<'static, Result<T, PorticoError>> + Send + Sync;

/// A deferred, possibly asynchronous producer of a value.
///
/// Nothing runs until [`Loader::load`] is called. Each call starts a fresh
/// load; callers decide how often that happens.
pub struct Loader<T>(Arc<LoaderFn<T>>);

impl<T> Clone for Loader<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: Send + 'static> Loader<T> {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, PorticoError>> + Send + 'static,
    {
        Self(Arc::new(move || f().boxed()))
    }

    /// A loader that resolves immediately to a clone of `value`.
    pub fn ready(value: T) -> Self
    where
        T: Clone + Sync,
    {
        Self::new(move || {
            let value = value.clone();
            async move { Ok(value) }
        })
    }

    pub fn load(&self) -> BoxFuture<'static, Result<T, PorticoError>> {
        (self.0)()
    }

    /// Transform the loaded value without loading anything now.
    pub fn map<U, M>(self, f: M) -> Loader<U>
    where
        U: Send + 'static,
        M: Fn(T) -> U + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        Loader::new(move || {
            let fut = self.load();
            let f = Arc::clone(&f);
            async move { fut.await.map(|value| (*f)(value)) }
        })
    }
}

impl<T> fmt::Debug for Loader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Loader(..)")
    }
}

type FilterFn = dyn Fn(&ViewContext) -> bool + Send + Sync;

/// A pure predicate over the view context deciding whether an extension applies.
#[derive(Clone)]
pub struct Filter(Arc<FilterFn>);

impl Filter {
    pub fn new(f: impl Fn(&ViewContext) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Lift an entity predicate. Global contexts never match.
    pub fn entity(f: impl Fn(&EntityContext) -> bool + Send + Sync + 'static) -> Self {
        Self::new(move |ctx| ctx.entity().is_some_and(&f))
    }

    /// Matches entities carrying a non-blank value for any of the annotations.
    pub fn has_any_annotation(keys: &'static [&'static str]) -> Self {
        Self::entity(move |e| keys.iter().any(|k| e.has_annotation(k)))
    }

    pub fn evaluate(&self, ctx: &ViewContext) -> bool {
        (self.0)(ctx)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter(..)")
    }
}

/// An extension before it is bound to the feature that declares it.
#[derive(Clone)]
pub struct ExtensionDefinition {
    /// Blueprint kind, the first segment of the extension id.
    pub kind: &'static str,
    pub name: Option<String>,
    /// Name of the target extension point.
    pub point: String,
    /// The contribution kind the loader must produce.
    pub produces: ContributionKind,
    pub loader: Loader<Contribution>,
    pub filter: Option<Filter>,
    /// Ordering hint; lower sorts first. Unset hints keep registration order.
    pub order: Option<i32>,
    /// Legacy component this definition was converted from, if any.
    pub(crate) legacy_origin: Option<String>,
}

impl ExtensionDefinition {
    pub fn new(
        kind: &'static str,
        name: Option<String>,
        point: impl Into<String>,
        produces: ContributionKind,
        loader: Loader<Contribution>,
    ) -> Self {
        Self {
            kind,
            name,
            point: point.into(),
            produces,
            loader,
            filter: None,
            order: None,
            legacy_origin: None,
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    /// Retarget the definition at a different point name.
    pub fn attach_to(mut self, point: impl Into<String>) -> Self {
        self.point = point.into();
        self
    }

    pub fn legacy_origin(&self) -> Option<&str> {
        self.legacy_origin.as_deref()
    }

    pub(crate) fn bind(self, plugin_id: &PluginId) -> Extension {
        Extension {
            id: ExtensionId::new(self.kind, plugin_id.as_str(), self.name.as_deref()),
            plugin_id: plugin_id.clone(),
            point: self.point,
            produces: self.produces,
            loader: self.loader,
            filter: self.filter,
            order: self.order,
        }
    }
}

impl fmt::Debug for ExtensionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionDefinition")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("point", &self.point)
            .field("produces", &self.produces)
            .field("filter", &self.filter.is_some())
            .field("order", &self.order)
            .finish()
    }
}

/// An extension owned by a feature, identified by `(plugin_id, id)`.
#[derive(Clone)]
pub struct Extension {
    pub id: ExtensionId,
    pub plugin_id: PluginId,
    pub point: String,
    pub produces: ContributionKind,
    pub loader: Loader<Contribution>,
    pub filter: Option<Filter>,
    pub order: Option<i32>,
}

impl Extension {
    /// Evaluate the filter. Extensions without one always apply.
    pub fn applies_to(&self, ctx: &ViewContext) -> bool {
        self.filter.as_ref().is_none_or(|f| f.evaluate(ctx))
    }
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extension")
            .field("id", &self.id)
            .field("plugin_id", &self.plugin_id)
            .field("point", &self.point)
            .field("produces", &self.produces)
            .field("filter", &self.filter.is_some())
            .field("order", &self.order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::contribution::NavItem;

    #[tokio::test]
    async fn loader_is_lazy_and_runs_per_load() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let loader: Loader<u32> = Loader::new(move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(7)
            }
        });
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_eq!(loader.load().await.unwrap(), 7);
        assert_eq!(loader.clone().load().await.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn map_transforms_and_propagates_errors() {
        let ok = Loader::ready(2u32).map(|n| n * 10);
        assert_eq!(ok.load().await.unwrap(), 20);

        let failing: Loader<u32> =
            Loader::new(|| async { Err(PorticoError::Internal("nope".into())) });
        let mapped = failing.map(|n| n + 1);
        assert!(mapped.load().await.is_err());
    }

    #[test]
    fn entity_filter_never_matches_global() {
        let filter = Filter::entity(|_| true);
        assert!(!filter.evaluate(&ViewContext::Global));
        assert!(filter.evaluate(&ViewContext::Entity(EntityContext::new("Component", "a"))));
    }

    #[test]
    fn annotation_filter_matches_any_key() {
        let filter = Filter::has_any_annotation(&["a/one", "a/two"]);
        let with_two = EntityContext::new("Component", "x").with_annotation("a/two", "v");
        let without = EntityContext::new("Component", "y");
        assert!(filter.evaluate(&ViewContext::Entity(with_two)));
        assert!(!filter.evaluate(&ViewContext::Entity(without)));
    }

    #[test]
    fn bind_derives_namespaced_id() {
        let def = ExtensionDefinition::new(
            "nav-item",
            None,
            "nav-item",
            ContributionKind::NavItem,
            Loader::ready(Contribution::NavItem(NavItem {
                title: "Docs".into(),
                to: "/docs".into(),
                icon: None,
            })),
        );
        let ext = def.bind(&PluginId::new("techdocs"));
        assert_eq!(ext.id.as_str(), "nav-item:techdocs");
        assert!(ext.applies_to(&ViewContext::Global));
    }
}
