// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication API trait consulted by the sign-in flow.

use async_trait::async_trait;

use crate::error::PorticoError;
use crate::traits::adapter::ApiAdapter;
use crate::types::Identity;

/// An externally configured authentication mechanism.
///
/// Sign-in page providers reference an `AuthApi` by its [`ApiRef`](crate::types::ApiRef).
/// The composition system never checks that the reference resolves; the
/// sign-in flow does, at runtime.
#[async_trait]
pub trait AuthApi: ApiAdapter {
    /// Runs the sign-in flow and returns the signed-in identity.
    async fn sign_in(&self) -> Result<Identity, PorticoError>;
}
