//! Router core module - hot path for request routing.
//!
//! Matching probes the static index first, then walks the method's dynamic
//! routes in registration order. Both steps only read the immutable
//! collection, so a `Router` can be shared across threads without locking.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use super::collection::RouteCollection;
use super::route::CompiledRoute;
use crate::config::RouterConfig;
use crate::error::{GenerateError, RegistrationError};
use crate::generator::{self, ParamData};
use crate::route::{HandlerRef, RouteDefinition};
use http::Method;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Maximum number of path parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Extracted path parameters. Names are shared with the compiled route;
/// values are per-request data from the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

const SLOW_MATCH: Duration = Duration::from_millis(1);

/// Result of successfully matching a request to a route.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route
    pub route: Arc<CompiledRoute>,
    /// Path parameters extracted from the URL (e.g., `{id}` → `("id", "123")`).
    /// Always empty for static routes.
    pub path_params: ParamVec,
}

impl RouteMatch {
    #[must_use]
    pub fn route_name(&self) -> &str {
        self.route.name()
    }

    #[must_use]
    pub fn handler(&self) -> &HandlerRef {
        &self.route.definition().handler
    }

    /// Get a path parameter by name.
    ///
    /// List-valued parameters come back as the raw joined text; splitting on
    /// the delimiter is up to the caller.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Convert path_params to a HashMap.
    /// Note: This allocates - use get_path_param() in hot paths instead
    #[must_use]
    pub fn path_params_map(&self) -> HashMap<String, String> {
        self.path_params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// Matcher and reverse generator over a sealed [`RouteCollection`].
///
/// Cloning is cheap: clones share the same collection.
#[derive(Debug, Clone)]
pub struct Router {
    collection: Arc<RouteCollection>,
}

impl Router {
    /// Seal a fully built collection.
    #[must_use]
    pub fn new(collection: RouteCollection) -> Self {
        collection.log_summary("definitions");
        Self {
            collection: Arc::new(collection),
        }
    }

    /// Seal a collection that was decoded from a route cache.
    pub(crate) fn from_cache(collection: RouteCollection) -> Self {
        collection.log_summary("cache");
        Self {
            collection: Arc::new(collection),
        }
    }

    /// Register every definition in order and seal the result.
    pub fn from_definitions<I>(definitions: I, config: RouterConfig) -> Result<Self, RegistrationError>
    where
        I: IntoIterator<Item = RouteDefinition>,
    {
        Ok(Self::new(RouteCollection::from_definitions(
            definitions,
            config,
        )?))
    }

    #[must_use]
    pub fn collection(&self) -> &RouteCollection {
        &self.collection
    }

    /// Route definitions in registration order.
    pub fn all_routes(&self) -> impl Iterator<Item = &RouteDefinition> {
        self.collection.all_routes()
    }

    /// Match a request to a route.
    ///
    /// 1. Exact `(method, path)` probe of the static index. Static routes
    ///    therefore win over dynamic ones regardless of registration order.
    /// 2. Otherwise the method's dynamic routes are tried in registration
    ///    order and the first whose regex matches wins.
    ///
    /// Returns `None` when nothing matches. Whether that means 404 or 405 is
    /// for the caller to decide.
    #[must_use]
    pub fn route(&self, method: Method, path: &str) -> Option<RouteMatch> {
        debug!(method = %method, path = %path, "Route match attempt");
        let match_start = Instant::now();

        let path = self.collection.config.trailing_slash.normalize(path);
        let result = self
            .match_static(&method, path)
            .or_else(|| self.match_dynamic(&method, path));

        let match_duration = match_start.elapsed();
        match &result {
            Some(m) if match_duration > SLOW_MATCH => {
                warn!(
                    method = %method,
                    path = %path,
                    route_name = %m.route_name(),
                    duration_us = match_duration.as_micros(),
                    "Slow route matching detected"
                );
            }
            Some(m) => {
                debug!(
                    method = %method,
                    path = %path,
                    route_name = %m.route_name(),
                    path_params = ?m.path_params,
                    duration_us = match_duration.as_micros(),
                    "Route matched"
                );
            }
            None => {
                debug!(
                    method = %method,
                    path = %path,
                    duration_us = match_duration.as_micros(),
                    "No route matched"
                );
            }
        }
        result
    }

    fn match_static(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let route = self.collection.static_index.get(method)?.get(path)?;
        Some(RouteMatch {
            route: Arc::clone(route),
            path_params: ParamVec::new(),
        })
    }

    fn match_dynamic(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let routes = self.collection.dynamic.get(method)?;
        routes.iter().find_map(|route| {
            let captures = route.matcher()?.captures(path)?;
            let path_params = route
                .param_names()
                .iter()
                .filter_map(|name| {
                    captures
                        .name(name)
                        .map(|m| (Arc::clone(name), m.as_str().to_owned()))
                })
                .collect();
            Some(RouteMatch {
                route: Arc::clone(route),
                path_params,
            })
        })
    }

    /// Build the path for the route registered under `name`.
    ///
    /// # Errors
    ///
    /// [`GenerateError::UnknownRoute`] if no route has that name, otherwise
    /// whatever [`generator::generate`] reports.
    pub fn generate(&self, name: &str, data: &ParamData) -> Result<String, GenerateError> {
        let route = self
            .collection
            .named(name)
            .ok_or_else(|| GenerateError::UnknownRoute {
                name: name.to_owned(),
            })?;
        generator::generate(route, data)
    }
}
