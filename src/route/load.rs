use super::types::{HandlerRef, ParamConstraint, RouteDefinition};
use anyhow::{bail, Context};
use http::Method;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// On-disk route table: an ordered list of routes.
///
/// `routes` is required; an empty document does not parse.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RouteTable {
    routes: Vec<RouteEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RouteEntry {
    name: String,
    method: String,
    path: String,
    /// `{ function: .. }`, `{ method: { type, name } }` or `{ closure: .. }`
    #[serde(with = "serde_yaml::with::singleton_map")]
    handler: HandlerRef,
    #[serde(default)]
    parameters: BTreeMap<String, String>,
}

impl RouteEntry {
    fn into_definition(self) -> anyhow::Result<RouteDefinition> {
        let method = Method::from_bytes(self.method.to_ascii_uppercase().as_bytes())
            .with_context(|| format!("route '{}': invalid method '{}'", self.name, self.method))?;
        let parameters = self
            .parameters
            .into_iter()
            .map(|(name, regex)| {
                let constraint = ParamConstraint::new(&name, regex);
                (name, constraint)
            })
            .collect();
        Ok(RouteDefinition {
            method,
            path: self.path,
            name: self.name,
            parameters,
            handler: self.handler,
        })
    }
}

/// Parse a route table from a string. `format` is a file extension: `yaml`, `yml`, `json` or `toml`.
pub fn parse_routes(content: &str, format: &str) -> anyhow::Result<Vec<RouteDefinition>> {
    let table: RouteTable = match format {
        "yaml" | "yml" => serde_yaml::from_str(content)?,
        "json" => serde_json::from_str(content)?,
        "toml" => toml::from_str(content)?,
        other => bail!("unsupported route table format '{}'", other),
    };

    table
        .routes
        .into_iter()
        .map(RouteEntry::into_definition)
        .collect()
}

/// Load route definitions from a YAML, JSON or TOML file, in file order.
pub fn load_routes(file_path: impl AsRef<Path>) -> anyhow::Result<Vec<RouteDefinition>> {
    let path = file_path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read route table {}", path.display()))?;
    let format = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let routes = parse_routes(&content, &format)
        .with_context(|| format!("failed to parse route table {}", path.display()))?;
    tracing::debug!(
        file = %path.display(),
        routes_count = routes.len(),
        "Route table loaded"
    );
    Ok(routes)
}
