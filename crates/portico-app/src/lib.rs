// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Portico portal.
//!
//! Wires the app's own modules (sign-in page, navigation shell) together
//! with the built-in plugins into one ordered feature list, and builds the
//! authentication APIs the sign-in page delegates to.

pub mod apis;
pub mod nav;
pub mod portal;
pub mod sign_in;

pub use apis::{ConfiguredAuthApi, api_registry_from_config};
pub use nav::nav_module;
pub use portal::{Portal, build_portal, portal_features};
pub use sign_in::sign_in_module;
