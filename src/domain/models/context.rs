use serde_json::Value;

use crate::domain::errors::LoggerError;

/// Segments appended to a logger's context path when deriving a child.
///
/// Built from a single string or an ordered sequence of strings. Dynamic
/// input goes through `TryFrom<Value>`, which rejects every other shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextSegments(Vec<String>);

impl ContextSegments {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ContextSegments {
    fn from(segment: &str) -> Self {
        Self(vec![segment.to_string()])
    }
}

impl From<String> for ContextSegments {
    fn from(segment: String) -> Self {
        Self(vec![segment])
    }
}

impl From<Vec<String>> for ContextSegments {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl From<Vec<&str>> for ContextSegments {
    fn from(segments: Vec<&str>) -> Self {
        Self(segments.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for ContextSegments {
    fn from(segments: &[&str]) -> Self {
        Self(segments.iter().map(|s| (*s).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ContextSegments {
    fn from(segments: [&str; N]) -> Self {
        Self(segments.iter().map(|s| (*s).to_string()).collect())
    }
}

impl TryFrom<Value> for ContextSegments {
    type Error = LoggerError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(segment) => Ok(Self(vec![segment])),
            Value::Array(items) if items.iter().all(Value::is_string) => Ok(Self(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            )),
            other => Err(LoggerError::InvalidContext(other.to_string())),
        }
    }
}
