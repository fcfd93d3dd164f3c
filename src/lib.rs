//! # routekit
//!
//! **routekit** is a route compilation, matching and reverse-URL generation
//! engine. Routes are declared as `(method, path pattern, name, handler)` with
//! optional per-parameter regular expressions; the engine matches incoming
//! requests against them, extracts named path parameters, and turns a route
//! name plus parameter data back into a path.
//!
//! ## Architecture
//!
//! - **[`route`]** - Route definitions, handler references and route table files
//! - **[`compiler`]** - Path template parsing into literal and placeholder segments
//! - **[`router`]** - Route registration, static/dynamic indexes and request matching
//! - **[`generator`]** - Reverse routing: name + parameters to path
//! - **[`cache`]** - Serialize a compiled collection and restore it without recompiling
//! - **[`config`]** - Duplicate-name and trailing-slash policies
//! - **[`hot_reload`]** - Rebuild and republish routes when the table file changes
//! - **[`logging`]** - `tracing-subscriber` setup for binaries
//! - **[`cli`]** - The `routekit` command-line tool
//!
//! ### Matching Flow
//!
//! ```text
//! route(method, path)
//!   -> normalize trailing slash (config)
//!   -> static index: exact (method, path) lookup
//!   -> dynamic list for method, in registration order: first regex that matches
//!   -> RouteMatch { route, path_params } or None
//! ```
//!
//! Static routes always win over dynamic ones for the same method and path,
//! regardless of registration order.
//!
//! ## Quick Start
//!
//! ```no_run
//! use routekit::{param_data, HandlerRef, Method, RouteDefinition, Router, RouterConfig};
//!
//! let routes = vec![
//!     RouteDefinition::new(
//!         Method::GET,
//!         "/users/{id}",
//!         "users.show",
//!         HandlerRef::Function("users::show".into()),
//!     )
//!     .with_param("id", r"\d+"),
//! ];
//! let router = Router::from_definitions(routes, RouterConfig::default()).unwrap();
//!
//! let m = router.route(Method::GET, "/users/42").unwrap();
//! assert_eq!(m.get_path_param("id"), Some("42"));
//!
//! let path = router.generate("users.show", &param_data([("id", 42)])).unwrap();
//! assert_eq!(path, "/users/42");
//! ```
//!
//! ## Concurrency
//!
//! A [`Router`] is immutable once built and can be shared across threads
//! behind an `Arc`. To replace routes at runtime, build a new router and
//! publish it through a [`RouterHandle`]; readers keep the snapshot they
//! loaded.

pub mod cache;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod error;
pub mod generator;
pub mod hot_reload;
pub mod logging;
pub mod route;
pub mod router;

pub use config::{DuplicateNamePolicy, RouterConfig, TrailingSlash};
pub use error::{CacheError, CompileError, GenerateError, RegistrationError};
pub use generator::{param_data, ParamData, ParamValue};
pub use http::Method;
pub use route::{load_routes, HandlerRef, RouteDefinition};
pub use router::{RouteCollection, RouteMatch, Router, RouterHandle};
