//! # Router Configuration
//!
//! Environment variable based configuration for route registration and lookup.
//!
//! ## Environment Variables
//!
//! ### `ROUTEKIT_DUPLICATE_NAMES`
//!
//! What happens when two routes are registered under the same name:
//! - `warn` (default): the later registration wins and a warning is logged
//! - `strict`: registration fails with `DuplicateRouteName`
//!
//! ### `ROUTEKIT_TRAILING_SLASH`
//!
//! - `strict` (default): a registered path ending in `/` (other than `/`
//!   itself) is rejected as malformed, and request paths are looked up verbatim
//! - `trim`: trailing slashes are removed from registered paths and from
//!   request paths before lookup
//!
//! ## Usage
//!
//! ```rust
//! use routekit::config::RouterConfig;
//!
//! let config = RouterConfig::from_env();
//! println!("duplicate names: {:?}", config.duplicate_names);
//! ```

use serde::{Deserialize, Serialize};
use std::env;

/// Policy for a route name that is registered twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateNamePolicy {
    /// Last registration wins, with a logged warning
    #[default]
    Warn,
    /// Reject the second registration
    Strict,
}

impl DuplicateNamePolicy {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "strict" => DuplicateNamePolicy::Strict,
            _ => DuplicateNamePolicy::Warn,
        }
    }
}

/// Handling of a trailing `/` on registered and requested paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingSlash {
    #[default]
    Strict,
    Trim,
}

impl TrailingSlash {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "trim" => TrailingSlash::Trim,
            _ => TrailingSlash::Strict,
        }
    }

    /// Apply the policy to a path. Only `Trim` changes anything, and `/` is left alone.
    #[must_use]
    pub fn normalize<'a>(&self, path: &'a str) -> &'a str {
        match self {
            TrailingSlash::Trim if path.len() > 1 => {
                let trimmed = path.trim_end_matches('/');
                if trimmed.is_empty() {
                    "/"
                } else {
                    trimmed
                }
            }
            _ => path,
        }
    }
}

/// Configuration captured by a route collection when it is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    pub duplicate_names: DuplicateNamePolicy,
    pub trailing_slash: TrailingSlash,
}

impl RouterConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let duplicate_names = env::var("ROUTEKIT_DUPLICATE_NAMES")
            .map(|v| DuplicateNamePolicy::parse(&v))
            .unwrap_or_default();
        let trailing_slash = env::var("ROUTEKIT_TRAILING_SLASH")
            .map(|v| TrailingSlash::parse(&v))
            .unwrap_or_default();
        RouterConfig {
            duplicate_names,
            trailing_slash,
        }
    }
}
