use super::route::CompiledRoute;
use crate::config::{DuplicateNamePolicy, RouterConfig, TrailingSlash};
use crate::error::{CompileError, RegistrationError};
use crate::route::{is_supported_method, RouteDefinition};
use http::Method;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Index over every registered route.
///
/// - `static_index`: exact `(method, path)` lookup for routes without placeholders
/// - `dynamic`: per-method routes in registration order, tried first to last
/// - `named`: route name to route, for reverse generation
///
/// Built once during warm-up, then handed to a [`Router`](super::Router) and
/// never mutated again.
#[derive(Debug, Default)]
pub struct RouteCollection {
    pub(crate) config: RouterConfig,
    pub(crate) static_index: HashMap<Method, HashMap<String, Arc<CompiledRoute>>>,
    pub(crate) dynamic: HashMap<Method, Vec<Arc<CompiledRoute>>>,
    pub(crate) named: HashMap<String, Arc<CompiledRoute>>,
    /// Live routes in registration order
    pub(crate) routes: Vec<Arc<CompiledRoute>>,
}

impl RouteCollection {
    #[must_use]
    pub fn new(config: RouterConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Register every definition in order, failing on the first bad one.
    pub fn from_definitions<I>(definitions: I, config: RouterConfig) -> Result<Self, RegistrationError>
    where
        I: IntoIterator<Item = RouteDefinition>,
    {
        let mut collection = Self::new(config);
        for definition in definitions {
            collection.register(definition)?;
        }
        Ok(collection)
    }

    /// Compile a route and add it to the indexes.
    ///
    /// Static routes go into the exact-match index (a later route with the same
    /// method and path replaces the earlier one). Dynamic routes are appended to
    /// their method's list. The name index is last-registration-wins unless the
    /// strict duplicate-name policy is active.
    ///
    /// # Errors
    ///
    /// Any [`RegistrationError`]. The collection is left unchanged on error.
    pub fn register(&mut self, mut definition: RouteDefinition) -> Result<(), RegistrationError> {
        if !is_supported_method(&definition.method) {
            return Err(RegistrationError::UnsupportedMethod {
                route: definition.name,
                method: definition.method.to_string(),
            });
        }

        match self.config.trailing_slash {
            TrailingSlash::Strict if definition.path.len() > 1 && definition.path.ends_with('/') => {
                return Err(RegistrationError::Compile {
                    route: definition.name.clone(),
                    source: CompileError::MalformedPattern {
                        position: definition.path.len() - 1,
                        path: definition.path,
                        reason: "trailing slash".to_string(),
                    },
                });
            }
            TrailingSlash::Trim => {
                definition.path = TrailingSlash::Trim.normalize(&definition.path).to_string();
            }
            TrailingSlash::Strict => {}
        }

        let route = Arc::new(CompiledRoute::compile(definition)?);

        if let Some(previous) = self.named.get(route.name()) {
            match self.config.duplicate_names {
                DuplicateNamePolicy::Strict => {
                    return Err(RegistrationError::DuplicateRouteName {
                        name: route.name().to_string(),
                        previous: previous.definition().describe(),
                        current: route.definition().describe(),
                    });
                }
                DuplicateNamePolicy::Warn => {
                    warn!(
                        route_name = %route.name(),
                        previous = %previous.definition().describe(),
                        current = %route.definition().describe(),
                        "Duplicate route name; last registration wins"
                    );
                }
            }
        }

        let method = route.definition().method.clone();

        if route.is_dynamic() {
            self.dynamic
                .entry(method.clone())
                .or_default()
                .push(Arc::clone(&route));
            self.routes.push(Arc::clone(&route));
        } else {
            let replaced = self
                .static_index
                .entry(method.clone())
                .or_default()
                .insert(route.definition().path.clone(), Arc::clone(&route));
            match replaced {
                Some(old) => {
                    warn!(
                        method = %method,
                        path = %route.definition().path,
                        previous = %old.name(),
                        current = %route.name(),
                        "Duplicate static route; last registration wins"
                    );
                    match self.routes.iter().position(|r| Arc::ptr_eq(r, &old)) {
                        Some(pos) => self.routes[pos] = Arc::clone(&route),
                        None => self.routes.push(Arc::clone(&route)),
                    }
                }
                None => self.routes.push(Arc::clone(&route)),
            }
        }

        debug!(
            method = %method,
            path = %route.definition().path,
            route_name = %route.name(),
            dynamic = route.is_dynamic(),
            "Route registered"
        );
        self.named.insert(route.name().to_string(), route);
        Ok(())
    }

    /// Route definitions in registration order.
    pub fn all_routes(&self) -> impl Iterator<Item = &RouteDefinition> {
        self.routes.iter().map(|r| r.definition())
    }

    /// Compiled routes in registration order.
    #[must_use]
    pub fn routes(&self) -> &[Arc<CompiledRoute>] {
        &self.routes
    }

    #[must_use]
    pub fn named(&self, name: &str) -> Option<&Arc<CompiledRoute>> {
        self.named.get(name)
    }

    #[must_use]
    pub fn config(&self) -> RouterConfig {
        self.config
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    #[must_use]
    pub fn static_count(&self) -> usize {
        self.static_index.values().map(HashMap::len).sum()
    }

    #[must_use]
    pub fn dynamic_count(&self) -> usize {
        self.dynamic.values().map(Vec::len).sum()
    }

    pub(crate) fn log_summary(&self, source: &str) {
        let routes_summary: Vec<String> = self
            .routes
            .iter()
            .take(10)
            .map(|r| r.definition().describe())
            .collect();
        info!(
            routes_count = self.len(),
            static_count = self.static_count(),
            dynamic_count = self.dynamic_count(),
            named_count = self.named.len(),
            source = source,
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );
    }
}
