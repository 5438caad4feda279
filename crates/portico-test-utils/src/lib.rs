// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Portico integration tests.
//!
//! # Components
//!
//! - [`CountingLoader`], [`failing_loader`], [`delayed_loader`] - loaders with observable behavior
//! - [`MockAuthApi`] - authentication API with a fixed outcome
//! - [`TestHarness`] - assembles and activates an application from fixtures

pub mod fixtures;
pub mod harness;
pub mod loaders;
pub mod mock_auth;

pub use fixtures::{card_feature, entity, nav_feature, sign_in_feature};
pub use harness::TestHarness;
pub use loaders::{CountingLoader, delayed_loader, failing_loader};
pub use mock_auth::MockAuthApi;
