// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `portico sign-in` command implementation.

use portico_app::{Portal, build_portal};
use portico_config::model::PorticoConfig;
use portico_core::{Identity, PorticoError};
use tracing::info;

/// Sign in through the portal's sign-in page.
pub async fn sign_in(portal: &Portal, provider: &str) -> Result<Identity, PorticoError> {
    let active = portal.app.activate().await?;
    let page = active
        .sign_in_page(&active.sign_in_props())
        .ok_or_else(|| PorticoError::Internal("no sign-in page is bound".to_string()))?;
    page.sign_in(provider, &portal.apis).await
}

/// Run the `portico sign-in` command.
pub async fn run_sign_in(config: PorticoConfig, provider: &str) -> Result<(), PorticoError> {
    let portal = build_portal(config)?;
    let identity = sign_in(&portal, provider).await?;
    info!(provider = %identity.provider, user = %identity.user_entity_ref, "signed in");
    println!("signed in as {} via {}", identity.user_entity_ref, identity.provider);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn guest_always_signs_in() {
        let portal = build_portal(PorticoConfig::default()).unwrap();
        assert_eq!(sign_in(&portal, "guest").await.unwrap(), Identity::guest());
    }

    #[tokio::test]
    async fn unknown_provider_is_unavailable() {
        let portal = build_portal(PorticoConfig::default()).unwrap();
        let err = sign_in(&portal, "okta").await.unwrap_err();
        assert!(matches!(err, PorticoError::AuthProviderUnavailable { .. }));
    }
}
