// Core types for tool dispatch
//
// Parameter contracts, invocation requests and tagged results.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

use crate::media::MediaError;
use crate::providers::BackendError;

/// Semantic type of a tool parameter. Every kind travels as a JSON string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Enum(&'static [&'static str]),
    Base64Blob,
}

/// One declared parameter of a tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub default: Option<&'static str>,
}

impl ParamSpec {
    pub fn required(name: &'static str, description: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            description,
            kind,
            required: true,
            default: None,
        }
    }

    pub fn optional(
        name: &'static str,
        description: &'static str,
        kind: ParamKind,
        default: &'static str,
    ) -> Self {
        Self {
            name,
            description,
            kind,
            required: false,
            default: Some(default),
        }
    }

    /// Check a present value against the declared kind
    pub fn accepts(&self, value: &str) -> bool {
        match self.kind {
            ParamKind::String => true,
            ParamKind::Enum(allowed) => allowed.contains(&value),
            ParamKind::Base64Blob => !value.trim().is_empty(),
        }
    }

    fn schema(&self) -> Value {
        let mut prop = Map::new();
        prop.insert("type".into(), "string".into());
        prop.insert("description".into(), self.description.into());
        match self.kind {
            ParamKind::String => {}
            ParamKind::Enum(allowed) => {
                prop.insert("enum".into(), allowed.iter().copied().collect());
            }
            ParamKind::Base64Blob => {
                prop.insert("contentEncoding".into(), "base64".into());
            }
        }
        if let Some(default) = self.default {
            prop.insert("default".into(), default.into());
        }
        Value::Object(prop)
    }
}

/// Immutable description of a registered tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParamSpec>,
}

impl ToolDefinition {
    /// JSON Schema for the tool's arguments object
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|p| (p.name.to_string(), p.schema()))
            .collect();
        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// One incoming tool call, already authenticated by the transport
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationRequest {
    pub tool_name: String,
    pub arguments: Map<String, Value>,
}

impl InvocationRequest {
    pub fn new(tool_name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments,
        }
    }
}

/// Validated, defaulted arguments handed to a tool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolArgs {
    values: HashMap<String, String>,
}

impl ToolArgs {
    pub(crate) fn insert(&mut self, name: &str, value: String) {
        self.values.insert(name.to_string(), value);
    }

    /// Fetch a declared argument; validation guarantees presence
    pub fn require(&self, name: &str) -> Result<&str, ToolError> {
        self.values
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ToolError::Internal(format!("argument '{}' was not validated", name)))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Dispatcher-level failure categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    UnknownTool,
    MissingArgument,
    InvalidArgument,
    HandlerError,
}

/// Structured failure returned instead of an unhandled fault
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub argument: Option<String>,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            argument: None,
        }
    }

    pub fn for_argument(kind: FailureKind, argument: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            argument: Some(argument.to_string()),
        }
    }
}

/// Outcome of exactly one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationResult {
    Success(String),
    Failure(Failure),
}

impl InvocationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, InvocationResult::Success(_))
    }

    /// Text shown to the caller (result text or failure explanation)
    pub fn text(&self) -> &str {
        match self {
            InvocationResult::Success(text) => text,
            InvocationResult::Failure(failure) => &failure.message,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            InvocationResult::Success(_) => None,
            InvocationResult::Failure(failure) => Some(failure.kind),
        }
    }
}

/// Errors a tool handler can return
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error(transparent)]
    Media(#[from] MediaError),

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVELS: &[&str] = &["mild", "medium", "savage"];

    #[test]
    fn test_enum_param_accepts_only_allowed() {
        let param = ParamSpec::optional("humor_level", "How brutal", ParamKind::Enum(LEVELS), "medium");

        assert!(param.accepts("savage"));
        assert!(!param.accepts("extreme"));
        assert!(!param.required);
    }

    #[test]
    fn test_blob_param_rejects_blank() {
        let param = ParamSpec::required("image_base64", "Image", ParamKind::Base64Blob);

        assert!(param.accepts("aGVsbG8="));
        assert!(!param.accepts("   "));
    }

    #[test]
    fn test_input_schema_shape() {
        let definition = ToolDefinition {
            name: "roast_profile".to_string(),
            description: "Roast".to_string(),
            parameters: vec![
                ParamSpec::required("profile_description", "Profile", ParamKind::String),
                ParamSpec::optional("humor_level", "Level", ParamKind::Enum(LEVELS), "medium"),
            ],
        };

        let schema = definition.input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], serde_json::json!(["profile_description"]));
        assert_eq!(
            schema["properties"]["humor_level"]["enum"],
            serde_json::json!(["mild", "medium", "savage"])
        );
        assert_eq!(schema["properties"]["humor_level"]["default"], "medium");
    }

    #[test]
    fn test_invocation_result_text() {
        let ok = InvocationResult::Success("done".to_string());
        let failed = InvocationResult::Failure(Failure::new(FailureKind::UnknownTool, "nope"));

        assert!(ok.is_success());
        assert_eq!(failed.text(), "nope");
        assert_eq!(failed.failure_kind(), Some(FailureKind::UnknownTool));
    }

    #[test]
    fn test_backend_error_display() {
        let err = ToolError::from(BackendError::NotConfigured);
        assert_eq!(err.to_string(), "backend error: not configured");
    }
}
