// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry of runtime authentication APIs keyed by [`ApiRef`].

use std::collections::HashMap;
use std::sync::Arc;

use portico_core::{ApiRef, AuthApi};

/// Holds the authentication APIs available to the sign-in flow.
///
/// Separate from the extension-point map: composition never consults it.
#[derive(Clone, Default)]
pub struct ApiRegistry {
    auth: HashMap<ApiRef, Arc<dyn AuthApi>>,
}

impl ApiRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an API under its own reference, replacing any previous one.
    pub fn register_auth(&mut self, api: Arc<dyn AuthApi>) {
        self.auth.insert(api.api_ref().clone(), api);
    }

    pub fn auth(&self, api_ref: &ApiRef) -> Option<Arc<dyn AuthApi>> {
        self.auth.get(api_ref).cloned()
    }

    /// Registered references, sorted.
    pub fn refs(&self) -> Vec<&ApiRef> {
        let mut refs: Vec<&ApiRef> = self.auth.keys().collect();
        refs.sort();
        refs
    }

    pub fn len(&self) -> usize {
        self.auth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.auth.is_empty()
    }
}

impl std::fmt::Debug for ApiRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiRegistry")
            .field("auth", &self.refs())
            .finish()
    }
}
