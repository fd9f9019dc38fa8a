// Improve bio - rewrite a dating app bio

use async_trait::async_trait;

use super::{ask_backend, format_response};
use crate::providers::CompletionRequest;
use crate::tools::registry::{Tool, ToolContext};
use crate::tools::types::{ParamKind, ParamSpec, ToolArgs, ToolError};

pub struct ImproveBioTool;

#[async_trait]
impl Tool for ImproveBioTool {
    fn name(&self) -> &str {
        "improve_bio"
    }

    fn description(&self) -> &str {
        "Improve your dating app bio to be more attractive. Explains what changed and why."
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::required("current_bio", "Your current dating app bio", ParamKind::String),
            ParamSpec::optional(
                "additional_info",
                "Additional details about yourself (hobbies, job, etc.)",
                ParamKind::String,
                "",
            ),
        ]
    }

    async fn execute(&self, args: &ToolArgs, context: &ToolContext) -> Result<String, ToolError> {
        let current_bio = args.require("current_bio")?;
        let additional_info = args.require("additional_info")?;

        let prompt = format!(
            "Improve this dating app bio:\n\
            Current bio: \"{}\"\n\n\
            Additional details about user: {}\n\n\
            Create an improved version that is:\n\
            1. More engaging and attractive\n\
            2. Shows personality\n\
            3. Includes conversation starters\n\
            4. Avoids common clichés\n\
            5. Appropriate length (not too long)\n\n\
            Explain what changes were made and why.",
            current_bio, additional_info
        );

        let request = CompletionRequest::text(prompt)
            .with_max_tokens(600)
            .with_temperature(0.7);
        let improved = ask_backend(context, request).await?;

        Ok(format_response(
            "✨ **Bio Improvement Suggestions**",
            &improved,
            "📝 **Pro Tips:**",
            &[
                "Keep it authentic to who you are",
                "Include conversation starters",
                "Show, don't just tell your qualities",
                "Update regularly to keep it fresh",
            ],
        ))
    }
}
