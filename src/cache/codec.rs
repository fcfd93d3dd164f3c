use crate::compiler::CompiledPath;
use crate::config::RouterConfig;
use crate::error::CacheError;
use crate::route::{HandlerRef, ParamConstraint, RouteDefinition, SUPPORTED_METHODS};
use crate::router::{CompiledRoute, RouteCollection};
use http::Method;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Format tag embedded in every artifact.
pub const CACHE_FORMAT: &str = "routekit-route-cache";

/// Schema version. Bump on any change to the payload layout.
pub const CACHE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Envelope {
    format: String,
    version: u32,
    /// Lowercase hex SHA-256 of the serialized payload
    checksum: String,
    payload: Payload,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Payload {
    config: RouterConfig,
    /// Live routes in registration order; the indexes below refer to positions here
    routes: Vec<CachedRoute>,
    static_index: Vec<StaticEntry>,
    dynamic_index: Vec<DynamicEntry>,
    named_index: Vec<NamedEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CachedRoute {
    method: String,
    path: String,
    name: String,
    parameters: BTreeMap<String, ParamConstraint>,
    handler: HandlerRef,
    template: CompiledPath,
    /// Anchored whole-path regex source, dynamic routes only
    matcher: Option<String>,
    /// Anchored validator sources keyed by placeholder
    validators: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StaticEntry {
    method: String,
    path: String,
    route: usize,
}

/// One method's dynamic list, in match order.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct DynamicEntry {
    method: String,
    routes: Vec<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct NamedEntry {
    name: String,
    route: usize,
}

fn checksum(payload: &Payload) -> Result<String, serde_json::Error> {
    let bytes = serde_json::to_vec(payload)?;
    let digest = Sha256::digest(&bytes);
    Ok(digest.iter().map(|b| format!("{:02x}", b)).collect())
}

fn method_rank(method: &Method) -> usize {
    SUPPORTED_METHODS
        .iter()
        .position(|m| m == method)
        .unwrap_or(SUPPORTED_METHODS.len())
}

/// Stable position of `route` in the collection's route list.
fn index_of(positions: &HashMap<*const CompiledRoute, usize>, route: &Arc<CompiledRoute>) -> Option<usize> {
    positions.get(&Arc::as_ptr(route)).copied()
}

fn build_payload(collection: &RouteCollection) -> Result<Payload, CacheError> {
    let mut positions: HashMap<*const CompiledRoute, usize> = HashMap::new();
    let mut routes = Vec::with_capacity(collection.routes.len());

    // Routes that only survive in the name index (their static key was taken
    // over later) still need an entry so generation keeps working.
    let extra: Vec<&Arc<CompiledRoute>> = {
        let mut named: Vec<(&String, &Arc<CompiledRoute>)> = collection.named.iter().collect();
        named.sort_by(|a, b| a.0.cmp(b.0));
        named
            .into_iter()
            .map(|(_, r)| r)
            .filter(|r| !collection.routes.iter().any(|live| Arc::ptr_eq(live, r)))
            .collect()
    };

    for route in collection.routes.iter().chain(extra) {
        if positions.contains_key(&Arc::as_ptr(route)) {
            continue;
        }
        positions.insert(Arc::as_ptr(route), routes.len());
        let definition = route.definition();
        routes.push(CachedRoute {
            method: definition.method.to_string(),
            path: definition.path.clone(),
            name: definition.name.clone(),
            parameters: definition.parameters.clone(),
            handler: definition.handler.clone(),
            template: route.template().clone(),
            matcher: route.matcher().map(|re| re.as_str().to_string()),
            validators: route
                .validators()
                .iter()
                .map(|(name, re)| (name.clone(), re.as_str().to_string()))
                .collect(),
        });
    }

    let missing = || CacheError::corrupt("collection references a route it does not own");

    let mut static_index = Vec::with_capacity(collection.static_count());
    for (method, by_path) in &collection.static_index {
        for (path, route) in by_path {
            static_index.push(StaticEntry {
                method: method.to_string(),
                path: path.clone(),
                route: index_of(&positions, route).ok_or_else(missing)?,
            });
        }
    }
    static_index.sort_by(|a, b| {
        (method_rank_str(&a.method), &a.path).cmp(&(method_rank_str(&b.method), &b.path))
    });

    let mut dynamic_index = Vec::with_capacity(collection.dynamic.len());
    for (method, list) in &collection.dynamic {
        let routes = list
            .iter()
            .map(|route| index_of(&positions, route).ok_or_else(missing))
            .collect::<Result<Vec<_>, _>>()?;
        dynamic_index.push(DynamicEntry {
            method: method.to_string(),
            routes,
        });
    }
    dynamic_index.sort_by_key(|e| method_rank_str(&e.method));

    let mut named_index = Vec::with_capacity(collection.named.len());
    for (name, route) in &collection.named {
        named_index.push(NamedEntry {
            name: name.clone(),
            route: index_of(&positions, route).ok_or_else(missing)?,
        });
    }
    named_index.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Payload {
        config: collection.config,
        routes,
        static_index,
        dynamic_index,
        named_index,
    })
}

fn method_rank_str(method: &str) -> usize {
    Method::from_bytes(method.as_bytes())
        .map(|m| method_rank(&m))
        .unwrap_or(usize::MAX)
}

/// Encode a collection into a self-describing, versioned artifact.
///
/// Output is deterministic for a given collection.
pub fn serialize(collection: &RouteCollection) -> Result<Vec<u8>, CacheError> {
    let payload = build_payload(collection)?;
    let checksum = checksum(&payload).map_err(|e| CacheError::corrupt(e.to_string()))?;
    let envelope = Envelope {
        format: CACHE_FORMAT.to_string(),
        version: CACHE_VERSION,
        checksum,
        payload,
    };
    serde_json::to_vec(&envelope).map_err(|e| CacheError::corrupt(e.to_string()))
}

/// Decode an artifact produced by [`serialize`].
///
/// Segment templates and regex sources are taken verbatim from the artifact;
/// only the regex engines are rebuilt. Dynamic route order is preserved.
///
/// # Errors
///
/// [`CacheError::Corrupt`] when the artifact is not valid JSON, misses a
/// section, carries an unknown format or version, fails its checksum, refers
/// to a route index that does not exist, or holds a regex that does not compile.
pub fn deserialize(bytes: &[u8]) -> Result<RouteCollection, CacheError> {
    let envelope: Envelope = serde_json::from_slice(bytes)
        .map_err(|e| CacheError::corrupt(format!("unreadable artifact: {}", e)))?;

    if envelope.format != CACHE_FORMAT {
        return Err(CacheError::corrupt(format!(
            "unknown format tag '{}'",
            envelope.format
        )));
    }
    if envelope.version != CACHE_VERSION {
        return Err(CacheError::corrupt(format!(
            "unsupported version {} (expected {})",
            envelope.version, CACHE_VERSION
        )));
    }
    let expected = checksum(&envelope.payload).map_err(|e| CacheError::corrupt(e.to_string()))?;
    if expected != envelope.checksum {
        return Err(CacheError::corrupt("checksum mismatch"));
    }

    let payload = envelope.payload;
    let mut routes: Vec<Arc<CompiledRoute>> = Vec::with_capacity(payload.routes.len());
    for cached in payload.routes {
        routes.push(Arc::new(restore_route(cached)?));
    }
    let route_at = |index: usize| {
        routes
            .get(index)
            .cloned()
            .ok_or_else(|| CacheError::corrupt(format!("route index {} out of range", index)))
    };

    let mut collection = RouteCollection::new(payload.config);

    let mut live = vec![false; routes.len()];
    for entry in payload.static_index {
        let method = parse_method(&entry.method)?;
        let route = route_at(entry.route)?;
        if route.is_dynamic()
            || route.definition().method != method
            || route.definition().path != entry.path
        {
            return Err(CacheError::corrupt(format!(
                "static entry {} {} points at an incompatible route",
                entry.method, entry.path
            )));
        }
        live[entry.route] = true;
        collection
            .static_index
            .entry(method)
            .or_default()
            .insert(entry.path, route);
    }
    for entry in payload.dynamic_index {
        let method = parse_method(&entry.method)?;
        let mut list = Vec::with_capacity(entry.routes.len());
        for index in entry.routes {
            let route = route_at(index)?;
            if !route.is_dynamic() || route.definition().method != method {
                return Err(CacheError::corrupt(format!(
                    "dynamic entry {} points at an incompatible route",
                    entry.method
                )));
            }
            live[index] = true;
            list.push(route);
        }
        collection.dynamic.insert(method, list);
    }
    for entry in payload.named_index {
        let route = route_at(entry.route)?;
        if route.name() != entry.name {
            return Err(CacheError::corrupt(format!(
                "named entry '{}' points at route '{}'",
                entry.name,
                route.name()
            )));
        }
        collection.named.insert(entry.name, route);
    }

    collection.routes = routes
        .iter()
        .zip(live)
        .filter(|(_, live)| *live)
        .map(|(route, _)| Arc::clone(route))
        .collect();
    Ok(collection)
}

fn parse_method(method: &str) -> Result<Method, CacheError> {
    Method::from_bytes(method.as_bytes())
        .map_err(|_| CacheError::corrupt(format!("invalid method '{}'", method)))
}

fn restore_route(cached: CachedRoute) -> Result<CompiledRoute, CacheError> {
    let method = parse_method(&cached.method)?;
    if cached.template.reconstruct() != cached.path {
        return Err(CacheError::corrupt(format!(
            "template for route '{}' does not reproduce its path",
            cached.name
        )));
    }
    if cached.template.is_dynamic() != cached.matcher.is_some() {
        return Err(CacheError::corrupt(format!(
            "route '{}' has an inconsistent matcher",
            cached.name
        )));
    }
    let name = cached.name.clone();
    let definition = RouteDefinition {
        method,
        path: cached.path,
        name: cached.name,
        parameters: cached.parameters,
        handler: cached.handler,
    };
    CompiledRoute::from_parts(
        definition,
        cached.template,
        cached.matcher.as_deref(),
        &cached.validators,
    )
    .map_err(|e| CacheError::corrupt(format!("route '{}': {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteDefinition;

    fn sample() -> RouteCollection {
        let handler = |n: &str| HandlerRef::Function(n.to_string());
        RouteCollection::from_definitions(
            vec![
                RouteDefinition::new(Method::GET, "/a", "a", handler("a")),
                RouteDefinition::new(Method::GET, "/b", "b", handler("b")),
            ],
            RouterConfig::default(),
        )
        .unwrap()
    }

    /// Edit the payload and re-sign it so only the consistency checks can object.
    fn resigned(edit: impl FnOnce(&mut Payload)) -> Vec<u8> {
        let mut envelope: Envelope = serde_json::from_slice(&serialize(&sample()).unwrap()).unwrap();
        edit(&mut envelope.payload);
        envelope.checksum = checksum(&envelope.payload).unwrap();
        serde_json::to_vec(&envelope).unwrap()
    }

    #[test]
    fn test_resigned_artifact_still_loads() {
        let decoded = deserialize(&resigned(|_| {})).unwrap();
        assert_eq!(decoded.len(), 2);
    }

    #[test]
    fn test_static_entry_with_foreign_path_is_corrupt() {
        let bytes = resigned(|payload| payload.static_index[0].path = "/elsewhere".to_string());
        let err = deserialize(&bytes).unwrap_err();
        assert!(err.to_string().contains("incompatible route"));
    }

    #[test]
    fn test_named_entry_pointing_at_other_route_is_corrupt() {
        let bytes = resigned(|payload| {
            let (first, second) = (payload.named_index[0].route, payload.named_index[1].route);
            payload.named_index[0].route = second;
            payload.named_index[1].route = first;
        });
        let err = deserialize(&bytes).unwrap_err();
        assert!(err.to_string().contains("named entry"));
    }

    #[test]
    fn test_out_of_range_index_is_corrupt() {
        let bytes = resigned(|payload| payload.named_index[0].route = 99);
        let err = deserialize(&bytes).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
