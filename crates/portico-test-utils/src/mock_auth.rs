// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock authentication API for deterministic sign-in tests.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use portico_core::{ApiAdapter, ApiRef, AuthApi, Identity, PorticoError};

/// An `AuthApi` that returns a fixed identity or a fixed failure.
pub struct MockAuthApi {
    api_ref: ApiRef,
    outcome: Result<Identity, String>,
    attempts: Arc<Mutex<usize>>,
}

impl MockAuthApi {
    /// Signs everyone in as `user_entity_ref`.
    pub fn succeeding(api_ref: &str, user_entity_ref: &str) -> Self {
        Self {
            api_ref: ApiRef::new(api_ref),
            outcome: Ok(Identity {
                user_entity_ref: user_entity_ref.to_string(),
                provider: api_ref.to_string(),
            }),
            attempts: Arc::new(Mutex::new(0)),
        }
    }

    /// Rejects every sign-in with `message`.
    pub fn failing(api_ref: &str, message: &str) -> Self {
        Self {
            api_ref: ApiRef::new(api_ref),
            outcome: Err(message.to_string()),
            attempts: Arc::new(Mutex::new(0)),
        }
    }

    /// Number of sign-in attempts so far.
    pub async fn attempts(&self) -> usize {
        *self.attempts.lock().await
    }
}

impl ApiAdapter for MockAuthApi {
    fn api_ref(&self) -> &ApiRef {
        &self.api_ref
    }

    fn name(&self) -> &str {
        "mock-auth"
    }
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn sign_in(&self) -> Result<Identity, PorticoError> {
        *self.attempts.lock().await += 1;
        self.outcome.clone().map_err(PorticoError::Internal)
    }
}
