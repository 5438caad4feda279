// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `portico inspect`, `portico nav` and `portico features`.

use portico_app::build_portal;
use portico_config::model::PorticoConfig;
use portico_core::{Cardinality, ContributionKind, PorticoError};
use portico_plugin::{Application, search_catalog};
use serde::Serialize;

/// One extension point and what resolved onto it.
#[derive(Debug, Serialize)]
pub struct PointSummary {
    pub point: String,
    pub cardinality: Cardinality,
    pub accepts: ContributionKind,
    pub mandatory: bool,
    pub strict: bool,
    pub extensions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub features: Vec<String>,
    pub points: Vec<PointSummary>,
    pub warnings: Vec<String>,
}

pub fn inspect(app: &Application) -> InspectReport {
    InspectReport {
        features: app.feature_ids().iter().map(ToString::to_string).collect(),
        points: app
            .points()
            .map(|p| PointSummary {
                point: p.name.clone(),
                cardinality: p.cardinality,
                accepts: p.accepts,
                mandatory: p.mandatory,
                strict: p.strict,
                extensions: app
                    .extensions(&p.name)
                    .iter()
                    .map(|e| e.id.to_string())
                    .collect(),
            })
            .collect(),
        warnings: app.warnings().iter().map(ToString::to_string).collect(),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, PorticoError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| PorticoError::Internal(format!("failed to serialize output: {e}")))
}

/// Run the `portico inspect` command.
pub fn run_inspect(config: PorticoConfig, json: bool) -> Result<(), PorticoError> {
    let portal = build_portal(config)?;
    let report = inspect(&portal.app);

    if json {
        println!("{}", to_json(&report)?);
        return Ok(());
    }

    println!("features: {}", report.features.join(", "));
    for point in &report.points {
        let mut flags = vec![point.cardinality.to_string()];
        if point.mandatory {
            flags.push("mandatory".into());
        }
        if point.strict {
            flags.push("strict".into());
        }
        println!("{} ({})", point.point, flags.join(", "));
        for id in &point.extensions {
            println!("  {id}");
        }
    }
    for warning in &report.warnings {
        println!("warning: {warning}");
    }
    Ok(())
}

/// Run the `portico nav` command.
pub async fn run_nav(config: PorticoConfig, json: bool) -> Result<(), PorticoError> {
    let portal = build_portal(config)?;
    let active = portal.app.activate().await?;
    let Some(view) = active.render_nav() else {
        return Err(PorticoError::Config(
            "no nav-content extension is bound".to_string(),
        ));
    };
    if json {
        println!("{}", to_json(&view)?);
    } else {
        print!("{}", view.outline());
    }
    Ok(())
}

/// Run the `portico features` command.
pub fn run_features(query: &str) {
    let entries = search_catalog(query);
    if entries.is_empty() {
        println!("no plugins match `{query}`");
        return;
    }
    for entry in entries {
        let legacy = if entry.legacy { " (legacy)" } else { "" };
        println!("{:<28} {}{legacy}", entry.id, entry.package);
        println!("{:<28} {}", "", entry.description);
    }
}
