// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Application assembly.
//!
//! `create_app` flattens an ordered feature list into extensions, resolves
//! each against the point registry, applies singleton policy and freezes the
//! result. The returned [`Application`] is immutable and cheap to share.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

use portico_config::model::PorticoConfig;
use portico_core::{Cardinality, ExtensionId, FeatureId, PorticoError, ViewContext};
use tracing::{debug, info, warn};

use crate::extension::Extension;
use crate::feature::Feature;
use crate::point::{ExtensionPoint, PointRegistry};

/// Inputs to [`create_app`].
#[derive(Debug, Default)]
pub struct CreateAppOptions {
    /// Features in registration order.
    pub features: Vec<Feature>,
    /// Host point registry; defaults to [`PointRegistry::with_defaults`].
    pub points: Option<PointRegistry>,
    /// Toggles and point overrides; defaults to an empty configuration.
    pub config: Option<PorticoConfig>,
}

impl CreateAppOptions {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features,
            ..Default::default()
        }
    }

    pub fn points(mut self, points: PointRegistry) -> Self {
        self.points = Some(points);
        self
    }

    pub fn config(mut self, config: PorticoConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// A non-fatal observation made while assembling the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppWarning {
    /// Earlier contenders for a singleton point were discarded.
    SingletonOverridden {
        point: String,
        winner: ExtensionId,
        discarded: Vec<ExtensionId>,
    },
    FeatureDisabled { feature_id: FeatureId },
    ExtensionDisabled { extension_id: ExtensionId },
    /// A config toggle names a feature or extension that does not exist.
    UnmatchedToggle { section: &'static str, key: String },
}

impl fmt::Display for AppWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppWarning::SingletonOverridden {
                point,
                winner,
                discarded,
            } => {
                let discarded: Vec<&str> = discarded.iter().map(ExtensionId::as_str).collect();
                write!(
                    f,
                    "singleton point `{point}` resolved to `{winner}`; discarded {}",
                    discarded.join(", ")
                )
            }
            AppWarning::FeatureDisabled { feature_id } => {
                write!(f, "feature `{feature_id}` disabled by configuration")
            }
            AppWarning::ExtensionDisabled { extension_id } => {
                write!(f, "extension `{extension_id}` disabled by configuration")
            }
            AppWarning::UnmatchedToggle { section, key } => {
                write!(f, "[{section}] toggle `{key}` matches nothing")
            }
        }
    }
}

struct Tagged {
    feature_index: usize,
    extension_index: usize,
    extension: Extension,
}

#[derive(Debug)]
struct AppInner {
    points: PointRegistry,
    bindings: BTreeMap<String, Vec<Extension>>,
    feature_ids: Vec<FeatureId>,
    warnings: Vec<AppWarning>,
    config: PorticoConfig,
}

/// The frozen point → extension(s) map.
#[derive(Debug, Clone)]
pub struct Application {
    inner: Arc<AppInner>,
}

/// Assemble an immutable [`Application`] from an ordered feature list.
///
/// Fails on duplicate feature ids, duplicate extension ids, unknown
/// points, contribution kind mismatches and strict singleton conflicts.
pub fn create_app(options: CreateAppOptions) -> Result<Application, PorticoError> {
    let CreateAppOptions {
        features,
        points,
        config,
    } = options;
    let config = config.unwrap_or_default();
    let mut points = points.unwrap_or_else(PointRegistry::with_defaults);
    points.apply_config(&config.points)?;

    let mut warnings = Vec::new();

    let mut seen_features = HashSet::new();
    for feature in &features {
        if !seen_features.insert(feature.id().clone()) {
            return Err(PorticoError::DuplicateFeature {
                feature_id: feature.id().to_string(),
            });
        }
    }

    for key in config.features.keys() {
        if !features.iter().any(|f| f.id().as_str() == key) {
            warn!(section = "features", key = %key, "config toggle matches nothing");
            warnings.push(AppWarning::UnmatchedToggle {
                section: "features",
                key: key.clone(),
            });
        }
    }

    let mut feature_ids = Vec::new();
    let mut flattened = Vec::new();
    for (feature_index, feature) in features.into_iter().enumerate() {
        if !config.feature_enabled(feature.id().as_str()) {
            info!(feature = %feature.id(), "feature disabled by configuration");
            warnings.push(AppWarning::FeatureDisabled {
                feature_id: feature.id().clone(),
            });
            continue;
        }
        feature_ids.push(feature.id().clone());
        for (extension_index, extension) in feature.extensions().iter().enumerate() {
            flattened.push(Tagged {
                feature_index,
                extension_index,
                extension: extension.clone(),
            });
        }
    }

    let mut seen_extensions = HashSet::new();
    for tagged in &flattened {
        if !seen_extensions.insert(tagged.extension.id.clone()) {
            return Err(PorticoError::Config(format!(
                "extension `{}` is declared by more than one feature",
                tagged.extension.id
            )));
        }
    }

    for key in config.extensions.keys() {
        if !seen_extensions.iter().any(|id| id.as_str() == key) {
            warn!(section = "extensions", key = %key, "config toggle matches nothing");
            warnings.push(AppWarning::UnmatchedToggle {
                section: "extensions",
                key: key.clone(),
            });
        }
    }

    let mut grouped: BTreeMap<String, Vec<Tagged>> = BTreeMap::new();
    for tagged in flattened {
        let ext = &tagged.extension;
        if !config.extension_enabled(ext.id.as_str()) {
            info!(extension = %ext.id, "extension disabled by configuration");
            warnings.push(AppWarning::ExtensionDisabled {
                extension_id: ext.id.clone(),
            });
            continue;
        }
        let point = points
            .get(&ext.point)
            .ok_or_else(|| PorticoError::UnknownExtensionPoint {
                extension: ext.id.to_string(),
                point: ext.point.clone(),
            })?;
        if point.accepts != ext.produces {
            return Err(PorticoError::Config(format!(
                "extension `{}` produces `{}` but point `{}` accepts `{}`",
                ext.id, ext.produces, point.name, point.accepts
            )));
        }
        grouped.entry(ext.point.clone()).or_default().push(tagged);
    }

    let mut bindings = BTreeMap::new();
    for point in points.iter() {
        let mut contenders = grouped.remove(&point.name).unwrap_or_default();
        // Order hints only rank multi points; singletons resolve by registration.
        contenders.sort_by_key(|t| {
            let hint = match point.cardinality {
                Cardinality::Multi => t.extension.order.unwrap_or(0),
                Cardinality::Singleton => 0,
            };
            (hint, t.feature_index, t.extension_index)
        });
        let extensions: Vec<Extension> = contenders.into_iter().map(|t| t.extension).collect();
        let resolved = resolve_point(point, extensions, &mut warnings)?;
        debug!(point = %point.name, extensions = resolved.len(), "point resolved");
        bindings.insert(point.name.clone(), resolved);
    }

    let app = Application {
        inner: Arc::new(AppInner {
            points,
            bindings,
            feature_ids,
            warnings,
            config,
        }),
    };
    info!(
        features = app.inner.feature_ids.len(),
        extensions = app.extension_count(),
        warnings = app.inner.warnings.len(),
        "application assembled"
    );
    Ok(app)
}

fn resolve_point(
    point: &ExtensionPoint,
    mut extensions: Vec<Extension>,
    warnings: &mut Vec<AppWarning>,
) -> Result<Vec<Extension>, PorticoError> {
    if point.cardinality == Cardinality::Multi || extensions.len() <= 1 {
        return Ok(extensions);
    }
    if point.strict {
        return Err(PorticoError::SingletonConflict {
            point: point.name.clone(),
            extensions: extensions.iter().map(|e| e.id.to_string()).collect(),
        });
    }
    let Some(winner) = extensions.pop() else {
        return Ok(extensions);
    };
    let discarded: Vec<ExtensionId> = extensions.into_iter().map(|e| e.id).collect();
    for id in &discarded {
        warn!(point = %point.name, winner = %winner.id, discarded = %id, "singleton contender discarded");
    }
    warnings.push(AppWarning::SingletonOverridden {
        point: point.name.clone(),
        winner: winner.id.clone(),
        discarded,
    });
    Ok(vec![winner])
}

impl Application {
    pub fn point(&self, name: &str) -> Option<&ExtensionPoint> {
        self.inner.points.get(name)
    }

    pub fn points(&self) -> impl Iterator<Item = &ExtensionPoint> {
        self.inner.points.iter()
    }

    /// Extensions bound to `point`, in resolved order. Unknown points are empty.
    pub fn extensions(&self, point: &str) -> &[Extension] {
        self.inner
            .bindings
            .get(point)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The resolved extension of a singleton point.
    pub fn singleton(&self, point: &str) -> Option<&Extension> {
        self.extensions(point).first()
    }

    /// Extensions on `point` whose filter accepts `ctx`.
    pub fn applicable(&self, point: &str, ctx: &ViewContext) -> Vec<&Extension> {
        self.extensions(point)
            .iter()
            .filter(|e| e.applies_to(ctx))
            .collect()
    }

    /// Ids of the features that took part in assembly.
    pub fn feature_ids(&self) -> &[FeatureId] {
        &self.inner.feature_ids
    }

    pub fn warnings(&self) -> &[AppWarning] {
        &self.inner.warnings
    }

    pub fn config(&self) -> &PorticoConfig {
        &self.inner.config
    }

    pub fn extension_count(&self) -> usize {
        self.inner.bindings.values().map(Vec::len).sum()
    }
}
