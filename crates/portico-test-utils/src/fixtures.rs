// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entity and feature fixtures.

use portico_core::EntityContext;
use portico_plugin::blueprint::{
    EntityCardBlueprint, EntityCardParams, NavItemBlueprint, NavItemParams, SignInPageBlueprint,
    SignInPageParams,
};
use portico_plugin::contribution::{EntityComponent, SignInRenderer};
use portico_plugin::{Blueprint, Feature, Filter, Loader, SignInProvider, ViewNode, create_frontend_plugin};

/// An entity in the default namespace with the given annotations.
pub fn entity(kind: &str, name: &str, annotations: &[(&str, &str)]) -> EntityContext {
    annotations
        .iter()
        .fold(EntityContext::new(kind, name), |e, (k, v)| e.with_annotation(*k, *v))
}

/// A plugin contributing one nav item per title, linking to `/<title>`.
pub fn nav_feature(plugin_id: &str, titles: &[&str]) -> Feature {
    let defs = titles
        .iter()
        .map(|t| {
            NavItemBlueprint::make(
                NavItemParams::default()
                    .name(*t)
                    .title(*t)
                    .to(format!("/{t}")),
            )
            .expect("nav item params are complete")
        })
        .collect();
    create_frontend_plugin(plugin_id, defs).expect("valid fixture feature")
}

/// A plugin contributing a sign-in page offering `providers`.
pub fn sign_in_feature(plugin_id: &str, providers: Vec<SignInProvider>) -> Feature {
    let def = SignInPageBlueprint::make(
        SignInPageParams::default().loader(Loader::ready(SignInRenderer::with_providers(providers))),
    )
    .expect("sign-in params are complete");
    create_frontend_plugin(plugin_id, vec![def]).expect("valid fixture feature")
}

/// A plugin contributing one entity card rendering a `<name>` element.
pub fn card_feature(plugin_id: &str, name: &str, filter: Option<Filter>) -> Feature {
    let mut params = EntityCardParams::default()
        .name(name)
        .loader(Loader::ready(EntityComponent::fixed(ViewNode::new(name))));
    if let Some(filter) = filter {
        params = params.filter(filter);
    }
    let def = EntityCardBlueprint::make(params).expect("entity card params are complete");
    create_frontend_plugin(plugin_id, vec![def]).expect("valid fixture feature")
}
