use http::Method;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Methods a route can be registered for. Anything else is rejected at registration.
pub const SUPPORTED_METHODS: [Method; 7] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::HEAD,
    Method::OPTIONS,
];

/// Constraint used when a placeholder has no declared regex.
pub const DEFAULT_PARAM_REGEX: &str = "[^/]+";

#[must_use]
pub fn is_supported_method(method: &Method) -> bool {
    SUPPORTED_METHODS.contains(method)
}

/// Regex a placeholder's value must satisfy, both when matching and when generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamConstraint {
    pub regex: String,
    /// Literal token in the path this constraint binds to, e.g. `{id}`
    pub replace_token: String,
}

impl ParamConstraint {
    pub fn new(name: &str, regex: impl Into<String>) -> Self {
        Self {
            regex: regex.into(),
            replace_token: format!("{{{}}}", name),
        }
    }
}

/// What should run when a route matches.
///
/// Owned and interpreted by the dispatcher; routing only stores and returns it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerRef {
    /// A free function, by path
    Function(String),
    /// A method on a type
    Method {
        #[serde(rename = "type")]
        type_name: String,
        name: String,
    },
    /// A closure registered under an identifier
    Closure(String),
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerRef::Function(path) => write!(f, "{}", path),
            HandlerRef::Method { type_name, name } => write!(f, "{}::{}", type_name, name),
            HandlerRef::Closure(id) => write!(f, "closure:{}", id),
        }
    }
}

/// One routable endpoint, immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    pub method: Method,
    /// Raw pattern, e.g. `/users/{id}/posts/{tag}`
    pub path: String,
    /// Unique name used for reverse lookup
    pub name: String,
    /// Declared constraints keyed by placeholder name
    pub parameters: BTreeMap<String, ParamConstraint>,
    pub handler: HandlerRef,
}

impl RouteDefinition {
    pub fn new(
        method: Method,
        path: impl Into<String>,
        name: impl Into<String>,
        handler: HandlerRef,
    ) -> Self {
        Self {
            method,
            path: path.into(),
            name: name.into(),
            parameters: BTreeMap::new(),
            handler,
        }
    }

    /// Declare the regex for placeholder `name`.
    #[must_use]
    pub fn with_param(mut self, name: &str, regex: impl Into<String>) -> Self {
        self.parameters
            .insert(name.to_string(), ParamConstraint::new(name, regex));
        self
    }

    /// True iff the path holds at least one `{placeholder}`.
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        self.path.contains('{')
    }

    /// `METHOD path`, used in diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}
