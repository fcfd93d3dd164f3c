use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;

/// A value supplied for one placeholder during generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Scalar(String),
    /// Expanded into a repeatable segment, elements joined by the segment's delimiter
    List(Vec<String>),
}

/// Data for one `generate` call, keyed by placeholder name.
pub type ParamData = BTreeMap<String, ParamValue>;

/// Build [`ParamData`] from `(name, value)` pairs.
///
/// ```rust
/// use routekit::generator::{param_data, ParamValue};
///
/// let data = param_data([("id", ParamValue::from(42)), ("tag", vec!["a", "b"].into())]);
/// assert_eq!(data["id"], ParamValue::Scalar("42".to_string()));
/// ```
pub fn param_data<I, K, V>(pairs: I) -> ParamData
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<ParamValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Scalar(s) => write!(f, "{}", s),
            ParamValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Scalar(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Scalar(value.to_string())
    }
}

macro_rules! scalar_from_display {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(value: $t) -> Self {
                    ParamValue::Scalar(value.to_string())
                }
            }
        )*
    };
}

scalar_from_display!(i32, i64, u32, u64, usize, bool);

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        ParamValue::List(
            values
                .into_iter()
                .map(|v| match v.into() {
                    ParamValue::Scalar(s) => s,
                    ParamValue::List(inner) => inner.join(","),
                })
                .collect(),
        )
    }
}

fn scalar_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl TryFrom<serde_json::Value> for ParamValue {
    type Error = String;

    /// Strings, numbers and booleans become scalars; arrays of those become lists.
    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        if let serde_json::Value::Array(items) = &value {
            return items
                .iter()
                .map(|item| {
                    scalar_text(item).ok_or_else(|| format!("unsupported list element: {}", item))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(ParamValue::List);
        }
        scalar_text(&value)
            .map(ParamValue::Scalar)
            .ok_or_else(|| format!("unsupported parameter value: {}", value))
    }
}

impl<'de> Deserialize<'de> for ParamValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        ParamValue::try_from(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_object() {
        let data: ParamData =
            serde_json::from_str(r#"{"id": 7, "tags": ["a", 2, true], "slug": "x"}"#).unwrap();
        assert_eq!(data["id"], ParamValue::Scalar("7".to_string()));
        assert_eq!(
            data["tags"],
            ParamValue::List(vec!["a".to_string(), "2".to_string(), "true".to_string()])
        );
        assert_eq!(data["slug"], ParamValue::Scalar("x".to_string()));
    }

    #[test]
    fn test_nested_values_are_rejected() {
        assert!(serde_json::from_str::<ParamData>(r#"{"id": {"a": 1}}"#).is_err());
        assert!(serde_json::from_str::<ParamData>(r#"{"id": [[1]]}"#).is_err());
        assert!(serde_json::from_str::<ParamData>(r#"{"id": null}"#).is_err());
    }

    #[test]
    fn test_param_data_builder() {
        let data = param_data([("a", ParamValue::from(1u32)), ("b", vec![1, 2].into())]);
        assert_eq!(data["a"].to_string(), "1");
        assert_eq!(data["b"].to_string(), "[1, 2]");
    }
}
