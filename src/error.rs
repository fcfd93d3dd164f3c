//! Error taxonomy for route registration, reverse generation and the route cache.
//!
//! Matching never fails: a request that does not resolve is `None`, not an
//! error. Every other stage reports a dedicated enum so callers can tell a
//! broken route table (fatal at warm-up) from a bad `generate` call
//! (recoverable, surfaced to whoever asked for the URL).

use std::fmt;

/// Failure to compile a raw path pattern into segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// Bad placeholder syntax or an unusable path shape
    MalformedPattern {
        /// The pattern that failed to compile
        path: String,
        /// Byte offset of the offending character
        position: usize,
        /// Human readable description of the problem
        reason: String,
    },
    /// The same `{name}` appears more than once in one path
    DuplicateParameterName {
        /// The pattern that failed to compile
        path: String,
        /// The repeated placeholder name
        name: String,
    },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::MalformedPattern {
                path,
                position,
                reason,
            } => write!(
                f,
                "malformed route pattern '{}' at position {}: {}",
                path, position, reason
            ),
            CompileError::DuplicateParameterName { path, name } => write!(
                f,
                "duplicate parameter name '{{{}}}' in route pattern '{}'",
                name, path
            ),
        }
    }
}

impl std::error::Error for CompileError {}

/// Failure to add a route definition to a collection.
///
/// All variants are fatal for warm-up: there is no degraded routing mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// The route's path did not compile
    Compile {
        /// Name of the route being registered
        route: String,
        /// Underlying compiler error
        source: CompileError,
    },
    /// A parameter constraint (or the whole-path regex built from it) failed to compile
    InvalidRegexConstraint {
        /// Name of the route being registered
        route: String,
        /// Placeholder the constraint belongs to
        parameter: String,
        /// The constraint regex as written
        pattern: String,
        /// Regex engine diagnostic
        reason: String,
    },
    /// The method is not one the router dispatches on
    UnsupportedMethod {
        /// Name of the route being registered
        route: String,
        /// The rejected method
        method: String,
    },
    /// A route name was reused while the strict duplicate-name policy is active
    DuplicateRouteName {
        /// The contested name
        name: String,
        /// `METHOD path` of the route already holding the name
        previous: String,
        /// `METHOD path` of the rejected route
        current: String,
    },
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationError::Compile { route, source } => {
                write!(f, "cannot register route '{}': {}", route, source)
            }
            RegistrationError::InvalidRegexConstraint {
                route,
                parameter,
                pattern,
                reason,
            } => write!(
                f,
                "cannot register route '{}': constraint for '{}' ('{}') is not a valid regex: {}",
                route, parameter, pattern, reason
            ),
            RegistrationError::UnsupportedMethod { route, method } => write!(
                f,
                "cannot register route '{}': unsupported method '{}'",
                route, method
            ),
            RegistrationError::DuplicateRouteName {
                name,
                previous,
                current,
            } => write!(
                f,
                "route name '{}' is already used by {} (rejected {})",
                name, previous, current
            ),
        }
    }
}

impl std::error::Error for RegistrationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistrationError::Compile { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Failure to build a path from a route and a data map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// No route is registered under the requested name
    UnknownRoute {
        /// The requested route name
        name: String,
    },
    /// Data was supplied for a route without placeholders
    UnexpectedData {
        /// Name of the route
        route: String,
        /// Keys that were supplied
        keys: Vec<String>,
    },
    /// Data was supplied but the route declares no constraints to validate it against
    MissingParameterDefinitions {
        /// Name of the route
        route: String,
    },
    /// A data key has no constraint on the route
    UnknownParameter {
        /// Name of the route
        route: String,
        /// The unknown key
        key: String,
    },
    /// A value (or one element of a list value) violates its constraint
    InvalidParameterValue {
        /// Name of the route
        route: String,
        /// Parameter the value was supplied for
        key: String,
        /// The offending value
        value: String,
        /// The constraint it failed
        pattern: String,
    },
    /// A list value was supplied for a placeholder that shares its segment
    /// with other placeholders, so no delimiter can be derived
    UnsupportedListParameter {
        /// Name of the route
        route: String,
        /// Parameter the list was supplied for
        key: String,
        /// Raw text of the segment holding the placeholder
        segment: String,
    },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::UnknownRoute { name } => {
                write!(f, "no route named '{}'", name)
            }
            GenerateError::UnexpectedData { route, keys } => write!(
                f,
                "route '{}' has no parameters but data was supplied for: {}",
                route,
                keys.join(", ")
            ),
            GenerateError::MissingParameterDefinitions { route } => write!(
                f,
                "route '{}' declares no parameter constraints; cannot validate supplied data",
                route
            ),
            GenerateError::UnknownParameter { route, key } => {
                write!(f, "route '{}' has no parameter named '{}'", route, key)
            }
            GenerateError::InvalidParameterValue {
                route,
                key,
                value,
                pattern,
            } => write!(
                f,
                "invalid value '{}' for parameter '{}' of route '{}': expected to match '{}'",
                value, key, route, pattern
            ),
            GenerateError::UnsupportedListParameter {
                route,
                key,
                segment,
            } => write!(
                f,
                "parameter '{}' of route '{}' cannot take a list: segment '{}' holds more than one placeholder",
                key, route, segment
            ),
        }
    }
}

impl std::error::Error for GenerateError {}

/// Failure to decode a route cache artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The artifact does not have the expected shape, version or checksum
    Corrupt {
        /// What was wrong with it
        reason: String,
    },
}

impl CacheError {
    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        CacheError::Corrupt {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Corrupt { reason } => write!(f, "corrupt route cache: {}", reason),
        }
    }
}

impl std::error::Error for CacheError {}
