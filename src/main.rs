//! `view-router`: inspect the drone console route table.
//!
//! ```text
//! view-router routes                    # table as JSON
//! view-router resolve /app/ping         # match a browser URL
//! view-router navigate / /about /plot   # run a navigation sequence
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use view_router::app;
use view_router::config::{self, RouterConfig};
use view_router::observability::logging;
use view_router::routing::RouteInfo;

#[derive(Parser)]
#[command(name = "view-router")]
#[command(about = "Inspect and exercise the drone console route table", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base path prefix (overrides config and BASE_URL)
    #[arg(short, long)]
    base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the route table
    Routes,
    /// Match a browser URL against the table
    Resolve { url: String },
    /// Navigate through route-relative paths in order
    Navigate {
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

#[derive(Serialize)]
struct Resolution<'a> {
    url: &'a str,
    path: String,
    route: Option<RouteInfo>,
    error: Option<String>,
}

#[derive(Serialize)]
struct Step<'a> {
    target: &'a str,
    href: String,
    committed: Option<String>,
    error: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let log = logging::init(&RouterConfig::default().log_level);

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => RouterConfig::from_env(),
    };
    if let Some(base) = cli.base {
        config.base = base;
    }
    let config = config::loader::finalize(config)?;

    if let Some(log) = &log {
        log.set_level(&config.log_level);
    }

    let router = app::build_default_router(&config)?;

    match cli.command {
        Commands::Routes => {
            println!("{}", serde_json::to_string_pretty(&router.routes())?);
        }
        Commands::Resolve { url } => {
            let resolution = match router.match_url(&url) {
                Ok((location, record)) => Resolution {
                    url: &url,
                    path: location.full_path(),
                    route: Some(record.info()),
                    error: None,
                },
                Err(e) => Resolution {
                    url: &url,
                    path: String::new(),
                    route: None,
                    error: Some(e.to_string()),
                },
            };
            println!("{}", serde_json::to_string_pretty(&resolution)?);
        }
        Commands::Navigate { paths } => {
            let mut steps = Vec::with_capacity(paths.len());
            for target in &paths {
                let step = match router.push(target).await {
                    Ok(route) => Step {
                        target,
                        href: router.href(&route.full_path()),
                        committed: Some(route.view_name().to_string()),
                        error: None,
                    },
                    Err(e) => Step {
                        target,
                        href: router.href(target),
                        committed: None,
                        error: Some(e.to_string()),
                    },
                };
                steps.push(step);
            }
            println!("{}", serde_json::to_string_pretty(&steps)?);
        }
    }

    Ok(())
}
