// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runtime API traits.
//!
//! APIs extend the [`ApiAdapter`] base trait and use `#[async_trait]` for
//! dynamic dispatch compatibility.

pub mod adapter;
pub mod auth;

pub use adapter::ApiAdapter;
pub use auth::AuthApi;
