//! # Route Cache
//!
//! Production boots can skip path compilation entirely by loading a
//! precompiled route collection.
//!
//! The artifact is JSON:
//!
//! ```text
//! {
//!   "format": "routekit-route-cache",
//!   "version": 1,
//!   "checksum": "<sha256 of payload>",
//!   "payload": {
//!     "config": { ... },
//!     "routes": [ { definition, template, matcher, validators }, ... ],
//!     "static_index": [ { method, path, route }, ... ],
//!     "dynamic_index": [ { method, routes: [i, j, ...] }, ... ],
//!     "named_index": [ { name, route }, ... ]
//!   }
//! }
//! ```
//!
//! Regexes are stored as source strings and rebuilt on load; segment
//! templates are stored as-is. Any shape, version or checksum problem is a
//! [`CacheError::Corrupt`](crate::error::CacheError::Corrupt). Falling back to
//! live registration on that error is up to the caller.

mod codec;

pub use codec::{deserialize, serialize, CACHE_FORMAT, CACHE_VERSION};

use crate::router::{RouteCollection, Router};
use anyhow::Context;
use std::path::Path;
use tracing::{error, info};

/// Serialize `collection` and write it to `path`.
pub fn write_cache(collection: &RouteCollection, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    let bytes = serialize(collection)?;
    std::fs::write(path, &bytes)
        .with_context(|| format!("failed to write route cache {}", path.display()))?;
    info!(
        file = %path.display(),
        routes_count = collection.len(),
        bytes = bytes.len(),
        "Route cache written"
    );
    Ok(())
}

/// Read a cache file and seal it into a [`Router`].
pub fn load_cache(path: impl AsRef<Path>) -> anyhow::Result<Router> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read route cache {}", path.display()))?;
    let collection = deserialize(&bytes).map_err(|e| {
        error!(file = %path.display(), error = %e, "Route cache rejected");
        e
    })?;
    info!(file = %path.display(), "Route cache loaded");
    Ok(Router::from_cache(collection))
}
