// SPDX-FileCopyrightText: 2026 Portico Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Portico - portal composition CLI.
//!
//! Assembles the portal from its feature list and configuration, then
//! reports on the resulting application.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod check;
mod entity;
mod inspect;
mod sign_in;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use portico_config::model::PorticoConfig;
use portico_core::PorticoError;

/// Portico - portal composition CLI.
#[derive(Parser, Debug)]
#[command(name = "portico", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble and activate the portal, reporting warnings and failures.
    Check,
    /// Show every extension point and the extensions bound to it.
    Inspect {
        #[arg(long)]
        json: bool,
    },
    /// Search the built-in plugin catalog.
    Features {
        /// Case-insensitive match on id, package or description.
        query: Option<String>,
    },
    /// Render the navigation sidebar.
    Nav {
        #[arg(long)]
        json: bool,
    },
    /// Show the cards and tabs that apply to an entity.
    Entity {
        #[arg(long)]
        kind: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "default")]
        namespace: String,
        /// Entity annotation as KEY=VALUE; repeatable.
        #[arg(long = "annotation", value_parser = entity::parse_annotation)]
        annotations: Vec<(String, String)>,
        #[arg(long)]
        json: bool,
    },
    /// Run the sign-in flow for a provider listed on the sign-in page.
    SignIn {
        /// Provider id, e.g. `guest` or `github-auth-provider`.
        provider: String,
    },
}

fn load_config(path: Option<&PathBuf>) -> PorticoConfig {
    let loaded = match path {
        Some(path) => portico_config::load_and_validate_path(path),
        None => portico_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            portico_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("portico={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli, config: PorticoConfig) -> Result<(), PorticoError> {
    match cli.command {
        Some(Commands::Check) => check::run_check(config, cli.plain).await,
        Some(Commands::Inspect { json }) => inspect::run_inspect(config, json),
        Some(Commands::Features { query }) => {
            inspect::run_features(query.as_deref().unwrap_or_default());
            Ok(())
        }
        Some(Commands::Nav { json }) => inspect::run_nav(config, json).await,
        Some(Commands::Entity {
            kind,
            name,
            namespace,
            annotations,
            json,
        }) => {
            let mut entity = portico_core::EntityContext::new(kind, name);
            entity.namespace = namespace;
            entity.annotations.extend(annotations);
            entity::run_entity(config, &entity, json).await
        }
        Some(Commands::SignIn { provider }) => sign_in::run_sign_in(config, &provider).await,
        None => {
            println!("portico: use --help for available commands");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());
    init_tracing(&config.app.log_level);

    if let Err(e) = run(cli, config).await {
        eprintln!("portico: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc supports advancing the stats epoch.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_parses_entity_annotations() {
        let cli = Cli::try_parse_from([
            "portico",
            "entity",
            "--kind",
            "Component",
            "--name",
            "svc",
            "--annotation",
            "argocd/app-name=svc",
            "--annotation",
            "backstage.io/kubernetes-id=svc",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Entity {
                annotations, namespace, ..
            }) => {
                assert_eq!(namespace, "default");
                assert_eq!(annotations.len(), 2);
                assert_eq!(annotations[0], ("argocd/app-name".into(), "svc".into()));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_malformed_annotation() {
        let parsed = Cli::try_parse_from([
            "portico", "entity", "--kind", "Component", "--name", "svc", "--annotation", "novalue",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from(["portico", "inspect", "--json", "--plain"]).unwrap();
        assert!(cli.plain);
        assert!(matches!(cli.command, Some(Commands::Inspect { json: true })));
    }
}
