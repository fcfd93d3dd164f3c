//! # Path Generator
//!
//! Reverse routing: produce a concrete path from a route and a map of
//! parameter values, the inverse of matching.
//!
//! Generation is pure and knows nothing about the current request, so it can
//! be called from templates, redirects or CLI output alike. It is normally
//! reached through [`Router::generate`](crate::router::Router::generate),
//! which resolves a route name first.
//!
//! ## Example
//!
//! ```rust,ignore
//! use routekit::generator::{param_data, ParamValue};
//!
//! // GET /tags/{tag}   (tag: [a-z]+)
//! let path = router.generate("tags.show", &param_data([("tag", vec!["a", "b", "c"])]))?;
//! assert_eq!(path, "/tags/a,b,c");
//! ```
//!
//! Matching `/tags/a,b,c` hands back the joined text `a,b,c` as one parameter
//! (given a constraint that accepts commas). Splitting it is the caller's job.

mod core;
mod value;

pub use self::core::{generate, DEFAULT_LIST_DELIMITER};
pub use value::{param_data, ParamData, ParamValue};
