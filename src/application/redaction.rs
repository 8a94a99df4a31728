//! Path-based redaction of structured log details.
//!
//! Rules address a field with a dotted path (`meta.secret`, `users[0].token`,
//! `users.0.token`). A rule whose path resolves to a present, truthy value
//! replaces it with `[Filtered]` or with the output of its transform. Paths
//! that resolve to nothing, to a falsy value, or that run into a scalar
//! halfway down are skipped.

use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Replacement written by rules without a transform.
pub const FILTERED_MARKER: &str = "[Filtered]";

/// Custom replacement for a matched value.
pub type RedactionTransform = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// A single registered redaction rule.
#[derive(Clone)]
pub struct RedactionRule {
    path: String,
    segments: Vec<String>,
    transform: Option<RedactionTransform>,
}

impl RedactionRule {
    /// Rule replacing the value at `path` with [`FILTERED_MARKER`].
    ///
    /// The path is not validated; a path that never resolves is a no-op.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let segments = parse_path(&path);
        Self {
            path,
            segments,
            transform: None,
        }
    }

    #[must_use]
    pub fn with_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Replace the value at this rule's path in `target`.
    ///
    /// The value is read from `source`, so a rule never sees what earlier
    /// rules wrote. The path must still resolve in `target`. Returns whether
    /// a value was replaced.
    pub fn apply(&self, source: &Map<String, Value>, target: &mut Map<String, Value>) -> bool {
        let Some(value) = resolve(source, &self.segments) else {
            return false;
        };
        if !is_truthy(value) {
            return false;
        }
        let Some(slot) = resolve_mut(target, &self.segments) else {
            return false;
        };

        *slot = match &self.transform {
            Some(transform) => transform(value),
            None => Value::String(FILTERED_MARKER.to_string()),
        };
        true
    }
}

impl fmt::Debug for RedactionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedactionRule")
            .field("path", &self.path)
            .field("custom_transform", &self.transform.is_some())
            .finish()
    }
}

/// Produce a redacted copy of `details`; the input is left untouched.
pub fn redact(details: &Map<String, Value>, rules: &[RedactionRule]) -> Map<String, Value> {
    let mut result = details.clone();
    for rule in rules {
        rule.apply(details, &mut result);
    }
    result
}

/// `a.b[0].c` -> `["a", "b", "0", "c"]`
fn parse_path(path: &str) -> Vec<String> {
    path.split(['.', '['])
        .map(|segment| segment.strip_suffix(']').unwrap_or(segment).to_string())
        .collect()
}

fn resolve<'a>(root: &'a Map<String, Value>, segments: &[String]) -> Option<&'a Value> {
    let (first, rest) = segments.split_first()?;
    let mut current = root.get(first)?;

    for segment in rest {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}

fn resolve_mut<'a>(
    root: &'a mut Map<String, Value>,
    segments: &[String],
) -> Option<&'a mut Value> {
    let (first, rest) = segments.split_first()?;
    let mut current = root.get_mut(first)?;

    for segment in rest {
        current = match current {
            Value::Object(map) => map.get_mut(segment)?,
            Value::Array(items) => items.get_mut(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}

/// Falsy values (null, false, 0, NaN, "") are never redacted.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
