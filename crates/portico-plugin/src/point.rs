// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extension point registry.
//!
//! The `PointRegistry` stores `ExtensionPoint` records keyed by name. It is
//! built once at host startup and handed to the assembler, which treats it
//! as read-only.

use std::collections::BTreeMap;

use portico_config::model::PointsConfig;
use portico_core::{Cardinality, ContributionKind, PorticoError};
use tracing::debug;

pub const SIGN_IN_PAGE: &str = "sign-in-page";
pub const NAV_CONTENT: &str = "nav-content";
pub const NAV_ITEM: &str = "nav-item";
pub const ENTITY_CARD: &str = "entity-card";
pub const ENTITY_CONTENT: &str = "entity-content";
pub const PAGE: &str = "page";

/// A named slot in the host application that accepts extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionPoint {
    pub name: String,
    pub cardinality: Cardinality,
    /// Contribution kind every extension on this point must produce.
    pub accepts: ContributionKind,
    /// A loader failure on a mandatory point aborts activation.
    pub mandatory: bool,
    /// Multiple contenders on a strict singleton are a fatal error.
    pub strict: bool,
}

impl ExtensionPoint {
    pub fn singleton(name: impl Into<String>, accepts: ContributionKind) -> Self {
        Self {
            name: name.into(),
            cardinality: Cardinality::Singleton,
            accepts,
            mandatory: false,
            strict: false,
        }
    }

    pub fn multi(name: impl Into<String>, accepts: ContributionKind) -> Self {
        Self {
            name: name.into(),
            cardinality: Cardinality::Multi,
            accepts,
            mandatory: false,
            strict: false,
        }
    }

    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

/// Registry of extension points known to the host.
#[derive(Debug, Clone, Default)]
pub struct PointRegistry {
    points: BTreeMap<String, ExtensionPoint>,
}

impl PointRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard portal points.
    ///
    /// `sign-in-page` is a mandatory singleton; `nav-content` is a singleton
    /// shell; everything else is multi.
    pub fn with_defaults() -> Self {
        let mut points = BTreeMap::new();
        for point in [
            ExtensionPoint::singleton(SIGN_IN_PAGE, ContributionKind::SignInPage).mandatory(),
            ExtensionPoint::singleton(NAV_CONTENT, ContributionKind::NavContent),
            ExtensionPoint::multi(NAV_ITEM, ContributionKind::NavItem),
            ExtensionPoint::multi(ENTITY_CARD, ContributionKind::EntityCard),
            ExtensionPoint::multi(ENTITY_CONTENT, ContributionKind::EntityContent),
            ExtensionPoint::multi(PAGE, ContributionKind::Page),
        ] {
            points.insert(point.name.clone(), point);
        }
        Self { points }
    }

    /// Register a point. Names are unique within a registry.
    pub fn register(&mut self, point: ExtensionPoint) -> Result<(), PorticoError> {
        if self.points.contains_key(&point.name) {
            return Err(PorticoError::Config(format!(
                "extension point `{}` is already registered",
                point.name
            )));
        }
        debug!(point = %point.name, cardinality = %point.cardinality, "extension point registered");
        self.points.insert(point.name.clone(), point);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ExtensionPoint> {
        self.points.get(name)
    }

    /// All points, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &ExtensionPoint> {
        self.points.values()
    }

    /// Apply strict/mandatory/optional overrides from configuration.
    ///
    /// Every named point must exist; `strict` applies only to singletons and
    /// `sign-in-page` can never be made optional.
    pub fn apply_config(&mut self, config: &PointsConfig) -> Result<(), PorticoError> {
        for name in &config.strict {
            let point = self.lookup_mut(name, "points.strict")?;
            if point.cardinality != Cardinality::Singleton {
                return Err(PorticoError::Config(format!(
                    "points.strict: `{name}` is a multi point; only singleton points can be strict"
                )));
            }
            point.strict = true;
        }
        for name in &config.mandatory {
            self.lookup_mut(name, "points.mandatory")?.mandatory = true;
        }
        for name in &config.optional {
            if name == SIGN_IN_PAGE {
                return Err(PorticoError::Config(format!(
                    "points.optional: `{SIGN_IN_PAGE}` is always mandatory"
                )));
            }
            self.lookup_mut(name, "points.optional")?.mandatory = false;
        }
        Ok(())
    }

    fn lookup_mut(&mut self, name: &str, setting: &str) -> Result<&mut ExtensionPoint, PorticoError> {
        self.points.get_mut(name).ok_or_else(|| {
            PorticoError::Config(format!("{setting}: unknown extension point `{name}`"))
        })
    }

    /// Returns the number of registered points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if no points are registered.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
