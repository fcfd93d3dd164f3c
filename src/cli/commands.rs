use crate::cache::{load_cache, write_cache};
use crate::config::RouterConfig;
use crate::generator::ParamData;
use crate::hot_reload::build_router;
use crate::logging::{init_logging_with_config, LogConfig};
use crate::router::Router;
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use http::Method;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Command-line interface for routekit
///
/// Inspect route tables, try matches and generation, and manage route caches.
#[derive(Parser)]
#[command(name = "routekit")]
#[command(about = "Route table inspection and cache tool", long_about = None)]
pub struct Cli {
    /// Debug-level pretty logs on stderr instead of the environment's settings
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Where to load routes from
#[derive(clap::Args, Debug, Clone)]
pub struct RouteSource {
    /// Route table file (YAML, JSON or TOML)
    #[arg(short, long)]
    pub routes: Option<PathBuf>,

    /// Precompiled route cache; preferred over --routes when both are given
    #[arg(short, long)]
    pub cache: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List every registered route in registration order
    Routes {
        #[command(flatten)]
        source: RouteSource,
    },
    /// Match a request and print the route and extracted parameters
    Match {
        #[command(flatten)]
        source: RouteSource,

        /// HTTP method, e.g. GET
        method: String,

        /// Request path, e.g. /users/42
        path: String,
    },
    /// Generate the path for a named route
    Generate {
        #[command(flatten)]
        source: RouteSource,

        /// Route name
        name: String,

        /// Parameter data as a JSON object, e.g. '{"id": 42, "tags": ["a", "b"]}'
        #[arg(short, long)]
        data: Option<String>,
    },
    /// Build or verify route cache artifacts
    Cache {
        #[command(subcommand)]
        sub: CacheCommand,
    },
}

/// Route cache subcommands
#[derive(Subcommand)]
pub enum CacheCommand {
    /// Compile a route table into a cache artifact
    Build {
        /// Route table file (YAML, JSON or TOML)
        #[arg(short, long)]
        routes: PathBuf,

        /// Output path of the artifact
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Check that an artifact loads
    Check {
        /// Path of the artifact
        #[arg(short, long)]
        cache: PathBuf,
    },
}

impl Cli {
    /// Logging settings for this invocation.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        if self.verbose {
            LogConfig::default_dev()
        } else {
            LogConfig::from_env()
        }
    }
}

/// Load a router from a cache, falling back to the route table when the cache
/// is missing or rejected.
pub fn load_router(source: &RouteSource, config: RouterConfig) -> anyhow::Result<Router> {
    if let Some(cache) = &source.cache {
        match load_cache(cache) {
            Ok(router) => return Ok(router),
            Err(e) if source.routes.is_some() => {
                warn!(
                    file = %cache.display(),
                    error = %format!("{e:#}"),
                    "Route cache unusable, falling back to route table"
                );
            }
            Err(e) => return Err(e),
        }
    }
    match &source.routes {
        Some(routes) => build_router(routes, config),
        None => bail!("either --routes or --cache is required"),
    }
}

fn build_from_table(path: &Path, config: RouterConfig) -> anyhow::Result<Router> {
    build_router(path, config).with_context(|| format!("cannot build routes from {}", path.display()))
}

/// Run a parsed command, writing results to stdout.
///
/// Returns `Ok(false)` when the command ran but found nothing (no match).
pub fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = RouterConfig::from_env();
    match cli.command {
        Commands::Routes { source } => {
            let router = load_router(&source, config)?;
            for route in router.all_routes() {
                println!(
                    "{:<7} {:<40} {:<30} {}",
                    route.method.as_str(),
                    route.path,
                    route.name,
                    route.handler
                );
            }
            Ok(true)
        }
        Commands::Match {
            source,
            method,
            path,
        } => {
            let router = load_router(&source, config)?;
            let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                .with_context(|| format!("invalid method '{}'", method))?;
            match router.route(method, &path) {
                Some(m) => {
                    println!("{} -> {}", m.route_name(), m.handler());
                    let mut params: Vec<_> = m.path_params_map().into_iter().collect();
                    params.sort();
                    for (k, v) in params {
                        println!("  {} = {}", k, v);
                    }
                    Ok(true)
                }
                None => {
                    println!("no match");
                    Ok(false)
                }
            }
        }
        Commands::Generate { source, name, data } => {
            let router = load_router(&source, config)?;
            let data: ParamData = match data {
                Some(json) => serde_json::from_str(&json).context("--data must be a JSON object")?,
                None => ParamData::new(),
            };
            println!("{}", router.generate(&name, &data)?);
            Ok(true)
        }
        Commands::Cache { sub } => match sub {
            CacheCommand::Build { routes, out } => {
                let router = build_from_table(&routes, config)?;
                write_cache(router.collection(), &out)?;
                println!(
                    "wrote {} routes to {}",
                    router.collection().len(),
                    out.display()
                );
                Ok(true)
            }
            CacheCommand::Check { cache } => {
                let router = load_cache(&cache)?;
                println!("ok: {} routes", router.collection().len());
                Ok(true)
            }
        },
    }
}

/// Parse arguments from the process, install logging and run.
pub fn run_cli() -> anyhow::Result<bool> {
    let cli = Cli::parse();
    if let Err(err) = init_logging_with_config(&cli.log_config()) {
        eprintln!("warning: {err:#}");
    }
    run(cli)
}
