//! # Hot Reload Module
//!
//! Development-mode reloading of a route table file without restarting.
//!
//! When the watched file changes, a complete new [`Router`] is built from it
//! and published through a [`RouterHandle`]. Readers never observe a partially
//! registered collection: they keep whichever snapshot they loaded until they
//! load again.
//!
//! If the new table fails to load or register, the error is logged and the
//! previous snapshot stays live.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use routekit::{hot_reload::watch_routes, router::RouterHandle};
//! use std::sync::Arc;
//!
//! let handle = Arc::new(RouterHandle::new(router));
//! let _watcher = watch_routes("config/routes.yaml", Arc::clone(&handle), config)?;
//!
//! // per request
//! let router = handle.load();
//! ```
//!
//! For production, build the router once (or load it from a route cache) and
//! do not watch.

use crate::config::RouterConfig;
use crate::route::load_routes;
use crate::router::{Router, RouterHandle};
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// Build a router from a route table file.
pub fn build_router(path: &Path, config: RouterConfig) -> anyhow::Result<Router> {
    let routes = load_routes(path)?;
    Ok(Router::from_definitions(routes, config)?)
}

/// Watch a route table file and publish a rebuilt [`Router`] when it changes.
pub fn watch_routes<P>(
    routes_path: P,
    handle: Arc<RouterHandle>,
    config: RouterConfig,
) -> notify::Result<RecommendedWatcher>
where
    P: AsRef<Path>,
{
    let path: PathBuf = routes_path.as_ref().to_path_buf();
    let watch_path = path.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    match build_router(&watch_path, config) {
                        Ok(router) => {
                            info!(
                                file = %watch_path.display(),
                                "hot-reload: applying route table update"
                            );
                            handle.publish(router);
                        }
                        Err(e) => error!(
                            file = %watch_path.display(),
                            error = %format!("{e:#}"),
                            "hot-reload: route table rejected, keeping previous routes"
                        ),
                    }
                }
            }
            Err(e) => error!(error = ?e, "hot-reload: watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&path, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}
