// Generate opener - personalized first messages

use async_trait::async_trait;

use super::{ask_backend, format_response};
use crate::providers::CompletionRequest;
use crate::tools::registry::{Tool, ToolContext};
use crate::tools::types::{ParamKind, ParamSpec, ToolArgs, ToolError};

pub struct GenerateOpenerTool;

#[async_trait]
impl Tool for GenerateOpenerTool {
    fn name(&self) -> &str {
        "generate_opener"
    }

    fn description(&self) -> &str {
        "Generate personalized conversation openers based on a match's profile."
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::required(
            "match_info",
            "Information about your match (bio, photos, interests, etc.)",
            ParamKind::String,
        )]
    }

    async fn execute(&self, args: &ToolArgs, context: &ToolContext) -> Result<String, ToolError> {
        let match_info = args.require("match_info")?;

        let prompt = format!(
            "Based on this information about a dating match:\n{}\n\n\
            Generate 5 creative conversation starters that:\n\
            1. Reference something specific from their profile\n\
            2. Ask engaging questions\n\
            3. Show genuine interest\n\
            4. Avoid generic \"hey\" messages\n\
            5. Have potential for good responses\n\n\
            Make them feel personalized and thoughtful.",
            match_info
        );

        let request = CompletionRequest::text(prompt)
            .with_max_tokens(600)
            .with_temperature(0.8);
        let openers = ask_backend(context, request).await?;

        Ok(format_response(
            "🚀 **Conversation Starters**",
            &openers,
            "💡 **Opening Message Tips:**",
            &[
                "Reference something specific from their profile",
                "Ask open-ended questions",
                "Show genuine curiosity",
                "Avoid generic compliments",
                "Keep it light and fun",
            ],
        ))
    }
}
