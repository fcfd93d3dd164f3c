//! # Route Module
//!
//! Route definitions are the input to everything else in the crate: an
//! immutable description of one endpoint (method, raw path pattern, unique
//! name, per-placeholder constraints and an opaque handler reference).
//!
//! Definitions can be built in code or loaded from a route table file:
//!
//! ```rust,ignore
//! use routekit::route::load_routes;
//!
//! let routes = load_routes("config/routes.yaml")?;
//! ```

mod load;
mod types;

pub use load::*;
pub use types::*;
