//! # CLI Module
//!
//! The `routekit` binary: a read-only consumer of the routing core.
//!
//! ## Commands
//!
//! ```bash
//! # List routes
//! routekit routes --routes config/routes.yaml
//!
//! # Try a match (exit code 1 on no match)
//! routekit match --routes config/routes.yaml GET /users/42
//!
//! # Generate a path
//! routekit generate --routes config/routes.yaml users.show --data '{"id": 42}'
//!
//! # Precompile for production, then verify
//! routekit cache build --routes config/routes.yaml --out routes.cache.json
//! routekit cache check --cache routes.cache.json
//! ```
//!
//! `-v` / `--verbose` switches logging to debug-level pretty output on stderr.
//!
//! Every command that takes `--routes` also accepts `--cache`. With both, the
//! cache is tried first and the route table is the fallback.

mod commands;


pub use commands::{load_router, run, run_cli, CacheCommand, Cli, Commands, RouteSource};
