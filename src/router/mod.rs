//! # Router Module
//!
//! The router module registers route definitions, matches requests to them and
//! resolves route names for reverse generation.
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Registration**: at warm-up every [`RouteDefinition`](crate::route::RouteDefinition)
//!    is compiled into a [`CompiledRoute`] and indexed by a [`RouteCollection`]:
//!    static routes by exact `(method, path)`, dynamic routes in a per-method
//!    list in registration order, and every route by name.
//!
//! 2. **Matching**: [`Router::route`] probes the static index, then tries the
//!    dynamic routes' anchored regexes in order. The first match wins and its
//!    named captures become the path parameters.
//!
//! A collection is sealed into a [`Router`] once registration is complete and
//! is read-only from then on. [`RouterHandle`] publishes whole snapshots for
//! callers that rebuild routes at runtime.
//!
//! ## Example
//!
//! ```rust,ignore
//! use routekit::config::RouterConfig;
//! use routekit::route::{HandlerRef, RouteDefinition};
//! use routekit::router::Router;
//! use http::Method;
//!
//! let router = Router::from_definitions(
//!     vec![RouteDefinition::new(
//!         Method::GET,
//!         "/users/{id}",
//!         "users.show",
//!         HandlerRef::Function("users::show".into()),
//!     )
//!     .with_param("id", r"\d+")],
//!     RouterConfig::default(),
//! )?;
//!
//! if let Some(m) = router.route(Method::GET, "/users/42") {
//!     assert_eq!(m.get_path_param("id"), Some("42"));
//! }
//! ```

mod collection;
mod core;
mod handle;
mod route;

pub use self::core::{ParamVec, RouteMatch, Router, MAX_INLINE_PARAMS};
pub use collection::RouteCollection;
pub use handle::RouterHandle;
pub use route::CompiledRoute;
