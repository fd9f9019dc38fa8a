// User-friendly error messages
//
// Turns technical failures into readable text for the chat orchestrator.
// Every failure message starts with the same marker so callers can spot it.

use crate::media::MediaError;
use crate::providers::BackendError;
use crate::tools::types::{ParamKind, ParamSpec, ToolError};

const MARKER: &str = "❌";

/// Message for a tool name missing from the catalog
pub fn unknown_tool_error(name: &str) -> String {
    format!(
        "{} Unknown tool '{}'. Call `help` to see the available tools.",
        MARKER, name
    )
}

/// Message for a required argument that was not supplied
pub fn missing_argument_error(name: &str) -> String {
    format!("{} Missing required argument '{}'.", MARKER, name)
}

/// Message for an argument that fails its declared type
pub fn invalid_argument_error(param: &ParamSpec) -> String {
    let expected = match param.kind {
        ParamKind::String => "a string".to_string(),
        ParamKind::Enum(allowed) => format!("one of: {}", allowed.join(", ")),
        ParamKind::Base64Blob => "a non-empty base64-encoded string".to_string(),
    };
    format!(
        "{} Invalid value for '{}': expected {}.",
        MARKER, param.name, expected
    )
}

/// Message for a handler that panicked
pub fn internal_error() -> String {
    format!("{} Something went wrong while running this tool. Please try again.", MARKER)
}

/// Message for any error a tool handler returned
pub fn tool_error_message(err: &ToolError) -> String {
    match err {
        ToolError::Media(MediaError::InvalidImage(_)) => format!(
            "{} Could not process the image. Please ensure it's a valid image format.",
            MARKER
        ),
        ToolError::Media(MediaError::ImageTooLarge { limit, .. }) => format!(
            "{} Image is too large. Please upload an image smaller than {}MB.",
            MARKER,
            limit / (1024 * 1024)
        ),
        ToolError::Backend(BackendError::NotConfigured) => format!(
            "{} The AI backend is not configured (backend error: not configured).\n\n\
            Suggestion: set OPENAI_API_KEY and restart the server.",
            MARKER
        ),
        ToolError::Backend(BackendError::Timeout { secs }) => format!(
            "{} The AI backend did not answer within {}s. Please try again.",
            MARKER, secs
        ),
        ToolError::Backend(BackendError::Status { status, .. }) => format!(
            "{} The AI backend rejected the request (HTTP {}).",
            MARKER, status
        ),
        ToolError::Backend(other) => format!("{} AI backend failure: {}", MARKER, other),
        ToolError::Internal(_) => internal_error(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_configured_message_names_condition() {
        let msg = tool_error_message(&ToolError::Backend(BackendError::NotConfigured));
        assert!(msg.contains("not configured"));
        assert!(msg.contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_image_too_large_mentions_limit() {
        let msg = tool_error_message(&ToolError::Media(MediaError::ImageTooLarge {
            size: 11 * 1024 * 1024,
            limit: 10 * 1024 * 1024,
        }));
        assert!(msg.contains("10MB"));
    }

    #[test]
    fn test_invalid_enum_lists_choices() {
        let param = ParamSpec::optional(
            "humor_level",
            "How brutal",
            ParamKind::Enum(&["mild", "medium", "savage"]),
            "medium",
        );
        let msg = invalid_argument_error(&param);
        assert!(msg.contains("humor_level"));
        assert!(msg.contains("mild, medium, savage"));
    }

    #[test]
    fn test_backend_status_does_not_leak_body() {
        let msg = tool_error_message(&ToolError::Backend(BackendError::Status {
            status: 401,
            body: "{\"error\":\"invalid key sk-abc\"}".to_string(),
        }));
        assert!(msg.contains("401"));
        assert!(!msg.contains("sk-abc"));
    }
}
