//! Route table inspector.
//!
//! Loads a route table, builds the router and either lists it, prints the
//! tree, or resolves one request against it.

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use route_trie::config::load_config;
use route_trie::observability::logging::init_logging;
use route_trie::{handler_fn, Outcome, Router};

#[derive(Parser)]
#[command(name = "route-trie")]
#[command(about = "Inspect a route table and resolve requests against it", long_about = None)]
struct Cli {
    /// Route table file (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered routes
    Routes,
    /// Print the radix tree
    Tree,
    /// Resolve a request
    Match {
        /// Request method, e.g. GET
        method: String,
        /// Request path, e.g. /users/42
        path: String,
    },
}

#[derive(Serialize)]
struct MatchReport<'a> {
    outcome: Outcome,
    status: u16,
    route: Option<&'a str>,
    params: Vec<Param<'a>>,
}

#[derive(Serialize)]
struct Param<'a> {
    name: &'a str,
    value: &'a str,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    init_logging(&config.observability.log_level)?;

    tracing::info!(config = %cli.config.display(), "route-trie v0.1.0 starting");

    // Every handler name resolves; the handler just reports which one ran.
    let router = Router::from_config(&config, |name| {
        let name = name.to_string();
        Some(handler_fn(move |ctx| {
            tracing::info!(handler = %name, route = ?ctx.path(), "Handler invoked");
            Ok(())
        }))
    })?;

    match cli.command {
        Commands::Routes => {
            println!("{}", serde_json::to_string_pretty(&router.routes())?);
        }
        Commands::Tree => {
            print!("{router}");
        }
        Commands::Match { method, path } => {
            let mut ctx = router.new_context();
            router.find(&method, &path, &mut ctx);
            let status = match ctx.invoke() {
                Ok(()) => 200,
                Err(e) => e.code,
            };

            let report = MatchReport {
                outcome: ctx.outcome(),
                status,
                route: ctx.path(),
                params: ctx
                    .params()
                    .map(|(name, value)| Param { name, value })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
