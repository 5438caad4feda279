// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait for runtime APIs registered with the portal.

use crate::types::ApiRef;

/// The base trait for every API the portal exposes to extensions at runtime.
pub trait ApiAdapter: Send + Sync + 'static {
    /// Returns the reference this API is registered under.
    fn api_ref(&self) -> &ApiRef;

    /// Returns a human-readable name for diagnostics.
    fn name(&self) -> &str;
}
