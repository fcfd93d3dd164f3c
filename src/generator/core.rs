use super::value::{ParamData, ParamValue};
use crate::compiler::{Piece, Segment};
use crate::error::GenerateError;
use crate::router::CompiledRoute;
use std::collections::HashMap;

/// Join delimiter for a list value whose placeholder stands alone in its segment.
pub const DEFAULT_LIST_DELIMITER: &str = ",";

/// How one placeholder resolves during generation.
enum Resolved<'a> {
    /// Substituted in place of the token
    Scalar(&'a str),
    /// Replaces the whole segment
    Expanded(String),
}

/// Build a concrete path for `route` from `data`.
///
/// - Static routes return their path unchanged and accept no data.
/// - Every key must have a declared constraint and every value (each element,
///   for lists) must satisfy it.
/// - A list value expands the whole segment holding its placeholder: the
///   elements are joined with the segment's literal text (the segment minus the
///   placeholder token), or with `,` when the placeholder stands alone.
/// - A segment that still holds a placeholder with no value is dropped
///   entirely, so `/search/{q}/{page}` without `page` yields `/search/term`.
///   When every segment after the leading `/` is dropped the result is `/`.
///
/// No slash normalization is applied to the result.
///
/// # Errors
///
/// See [`GenerateError`]. The first offending key (in key order) is reported.
pub fn generate(route: &CompiledRoute, data: &ParamData) -> Result<String, GenerateError> {
    let definition = route.definition();

    if !route.is_dynamic() {
        if !data.is_empty() {
            return Err(GenerateError::UnexpectedData {
                route: definition.name.clone(),
                keys: data.keys().cloned().collect(),
            });
        }
        return Ok(definition.path.clone());
    }

    if !data.is_empty() && definition.parameters.is_empty() {
        return Err(GenerateError::MissingParameterDefinitions {
            route: definition.name.clone(),
        });
    }

    let mut resolved: HashMap<&str, Resolved<'_>> = HashMap::with_capacity(data.len());
    for (key, value) in data {
        let (validator, pattern) = match (route.validator(key), definition.parameters.get(key)) {
            (Some(validator), Some(constraint)) => (validator, constraint.regex.as_str()),
            _ => {
                return Err(GenerateError::UnknownParameter {
                    route: definition.name.clone(),
                    key: key.clone(),
                })
            }
        };
        let invalid = |value: &str| GenerateError::InvalidParameterValue {
            route: definition.name.clone(),
            key: key.clone(),
            value: value.to_string(),
            pattern: pattern.to_string(),
        };

        match value {
            ParamValue::Scalar(text) => {
                if !validator.is_match(text) {
                    return Err(invalid(text));
                }
                resolved.insert(key.as_str(), Resolved::Scalar(text));
            }
            ParamValue::List(items) => {
                if let Some(bad) = items.iter().find(|item| !validator.is_match(item)) {
                    return Err(invalid(bad));
                }
                let Some(segment) = route.template().segment_containing(key) else {
                    continue;
                };
                if segment.param_names().count() > 1 {
                    return Err(GenerateError::UnsupportedListParameter {
                        route: definition.name.clone(),
                        key: key.clone(),
                        segment: segment.raw(),
                    });
                }
                if items.is_empty() {
                    continue;
                }
                let literal = segment.literal_text();
                let delimiter = if literal.is_empty() {
                    DEFAULT_LIST_DELIMITER
                } else {
                    literal.as_str()
                };
                resolved.insert(key.as_str(), Resolved::Expanded(items.join(delimiter)));
            }
        }
    }

    let rendered: Vec<String> = route
        .template()
        .segments
        .iter()
        .filter_map(|segment| render_segment(segment, &resolved))
        .collect();
    if rendered.len() <= 1 {
        return Ok("/".to_string());
    }
    Ok(rendered.join("/"))
}

/// Render one segment, or `None` when any of its placeholders is unresolved.
fn render_segment(segment: &Segment, resolved: &HashMap<&str, Resolved<'_>>) -> Option<String> {
    let mut out = String::new();
    for piece in &segment.pieces {
        match piece {
            Piece::Literal(text) => out.push_str(text),
            Piece::Param(name) => match resolved.get(name.as_str())? {
                Resolved::Scalar(value) => out.push_str(value),
                Resolved::Expanded(joined) => return Some(joined.clone()),
            },
        }
    }
    Some(out)
}
