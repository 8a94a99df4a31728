//! Structured payload attached to a log call.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::backtrace::BacktraceStatus;

/// Details attached to a log call: either a structured object or an error.
///
/// Objects pass through field redaction before reaching a transport, errors
/// never do so their structure stays intact for diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Details {
    /// Arbitrary structured data
    Object(Map<String, Value>),
    /// A captured error value
    Error(ErrorDetails),
}

impl Default for Details {
    fn default() -> Self {
        Self::Object(Map::new())
    }
}

impl Details {
    /// Capture any error, walking its source chain.
    pub fn from_error<E>(err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        Self::Error(ErrorDetails::from_error(err))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Object(map) => Some(map),
            Self::Error(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Object(map) => map.is_empty(),
            Self::Error(_) => false,
        }
    }
}

impl From<Map<String, Value>> for Details {
    fn from(map: Map<String, Value>) -> Self {
        Self::Object(map)
    }
}

impl From<ErrorDetails> for Details {
    fn from(err: ErrorDetails) -> Self {
        Self::Error(err)
    }
}

impl From<&anyhow::Error> for Details {
    fn from(err: &anyhow::Error) -> Self {
        Self::Error(ErrorDetails::from_anyhow(err))
    }
}

/// Serializable snapshot of an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Short type name of the error
    pub name: String,

    /// Display output of the error
    pub message: String,

    /// Display output of each error in the source chain, outermost first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<String>,

    /// Captured backtrace, when one was available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorDetails {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            causes: Vec::new(),
            stack: None,
        }
    }

    pub fn from_error<E>(err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            name: short_type_name(std::any::type_name::<E>()).to_string(),
            message: err.to_string(),
            causes,
            stack: None,
        }
    }

    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let backtrace = err.backtrace();
        let stack = match backtrace.status() {
            BacktraceStatus::Captured => Some(backtrace.to_string()),
            _ => None,
        };

        Self {
            name: "Error".to_string(),
            message: err.to_string(),
            causes: err
                .chain()
                .skip(1)
                .map(ToString::to_string)
                .collect(),
            stack,
        }
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}

/// `my_crate::errors::ParseError` -> `ParseError`, `dyn core::error::Error` -> `Error`
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
