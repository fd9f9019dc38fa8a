// Detect red flags - safety assessment of a conversation or profile

use async_trait::async_trait;

use super::{ask_backend, format_response};
use crate::providers::CompletionRequest;
use crate::tools::registry::{Tool, ToolContext};
use crate::tools::types::{ParamKind, ParamSpec, ToolArgs, ToolError};

pub const CONTEXT_TYPES: &[&str] = &["conversation", "profile"];

const TEMPERATURE: f32 = 0.3;

pub struct RedFlagsTool;

#[async_trait]
impl Tool for RedFlagsTool {
    fn name(&self) -> &str {
        "detect_red_flags"
    }

    fn description(&self) -> &str {
        "Detect potential red flags in conversations or profiles. Returns a safety assessment and advice."
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::required(
                "conversation_or_profile",
                "The text to analyze",
                ParamKind::String,
            ),
            ParamSpec::optional(
                "context_type",
                "Whether it's a 'conversation' or 'profile'",
                ParamKind::Enum(CONTEXT_TYPES),
                "conversation",
            ),
        ]
    }

    async fn execute(&self, args: &ToolArgs, context: &ToolContext) -> Result<String, ToolError> {
        let text = args.require("conversation_or_profile")?;
        let context_type = args.require("context_type")?;

        let prompt = format!(
            "Analyze this dating {} for potential red flags:\n\n{}\n\n\
            Look for:\n\
            - Manipulative behavior\n\
            - Disrespectful language\n\
            - Inconsistencies\n\
            - Pushy behavior\n\
            - Inappropriate requests\n\
            - Signs of dishonesty\n\
            - Controlling tendencies\n\n\
            Provide a safety assessment and advice.",
            context_type, text
        );

        let request = CompletionRequest::text(prompt)
            .with_max_tokens(600)
            .with_temperature(TEMPERATURE);
        let analysis = ask_backend(context, request).await?;

        Ok(format_response(
            "🚨 **Red Flag Analysis**",
            &analysis,
            "⚠️ **Safety Reminders:**",
            &[
                "Trust your instincts",
                "Take things slow",
                "Meet in public places",
                "Tell friends about your dates",
                "Block if you feel uncomfortable",
            ],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::implementations::test_support::{context_with, run, RecordingProvider};
    use serde_json::json;

    #[tokio::test]
    async fn test_profile_context() {
        let provider = RecordingProvider::new("No major concerns.");
        let context = context_with(provider.clone());

        let text = run(
            &RedFlagsTool,
            json!({"conversation_or_profile": "Send me money first", "context_type": "profile"}),
            &context,
        )
        .await
        .unwrap();

        assert!(text.contains("No major concerns."));
        assert!(provider.last_prompt().starts_with("Analyze this dating profile"));
        assert_eq!(provider.last_request().temperature, TEMPERATURE);
    }
}
