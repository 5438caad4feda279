// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `app/sign-in` module.

use portico_core::{ApiRef, PorticoError};
use portico_plugin::blueprint::{SignInPageBlueprint, SignInPageParams};
use portico_plugin::contribution::SignInRenderer;
use portico_plugin::{Blueprint, Feature, Loader, SignInProvider, create_frontend_module};

pub const GITHUB_AUTH_API: &str = "core.auth.github";
pub const GITHUB_PROVIDER_ID: &str = "github-auth-provider";

/// Guest first, then GitHub.
pub fn sign_in_providers() -> Vec<SignInProvider> {
    vec![
        SignInProvider::guest(),
        SignInProvider::custom(
            GITHUB_PROVIDER_ID,
            "GitHub",
            "Sign in using GitHub",
            ApiRef::new(GITHUB_AUTH_API),
        ),
    ]
}

pub fn sign_in_module() -> Result<Feature, PorticoError> {
    let page = SignInPageBlueprint::make(SignInPageParams::default().loader(Loader::new(|| async {
        Ok(SignInRenderer::with_providers(sign_in_providers()))
    })))?;
    create_frontend_module("app", "sign-in", vec![page])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_contributes_a_single_sign_in_page() {
        let module = sign_in_module().unwrap();
        assert_eq!(module.id().as_str(), "app/sign-in");
        assert_eq!(module.extensions().len(), 1);
        assert_eq!(module.extensions()[0].id.as_str(), "sign-in-page:app");
    }

    #[test]
    fn providers_are_guest_then_github() {
        let providers = sign_in_providers();
        let ids: Vec<&str> = providers.iter().map(SignInProvider::id).collect();
        assert_eq!(ids, vec!["guest", GITHUB_PROVIDER_ID]);
    }
}
