// Conversation replies - reply suggestions for an ongoing chat

use async_trait::async_trait;

use super::{ask_backend, format_response};
use crate::providers::CompletionRequest;
use crate::tools::registry::{Tool, ToolContext};
use crate::tools::types::{ParamKind, ParamSpec, ToolArgs, ToolError};

pub struct ConversationRepliesTool;

#[async_trait]
impl Tool for ConversationRepliesTool {
    fn name(&self) -> &str {
        "generate_conversation_replies"
    }

    fn description(&self) -> &str {
        "Generate smart replies for dating conversations. Also flags anything concerning in the exchange."
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::required(
                "conversation_context",
                "The conversation history or current message",
                ParamKind::String,
            ),
            ParamSpec::optional(
                "goal",
                "Your goal (continue conversation, ask for date, be flirty, be funny)",
                ParamKind::String,
                "continue conversation",
            ),
        ]
    }

    async fn execute(&self, args: &ToolArgs, context: &ToolContext) -> Result<String, ToolError> {
        let conversation = args.require("conversation_context")?;
        let goal = args.require("goal")?;

        let prompt = format!(
            "Based on this dating conversation context:\n{}\n\n\
            User goal: {}\n\n\
            Provide 3-5 potential reply options that are:\n\
            1. Engaging and show interest\n\
            2. Ask follow-up questions\n\
            3. Keep the conversation flowing\n\
            4. Match the tone of the conversation\n\
            5. Move toward meeting/date if appropriate\n\n\
            Also assess if there are any red flags in the conversation.",
            conversation, goal
        );

        let request = CompletionRequest::text(prompt)
            .with_max_tokens(800)
            .with_temperature(0.8);
        let replies = ask_backend(context, request).await?;

        Ok(format_response(
            "💬 **Smart Reply Suggestions**",
            &replies,
            "🎯 **Tips:**",
            &[
                "Personalize the reply to match your voice",
                "Ask follow-up questions to keep conversation flowing",
                "Show genuine interest in their responses",
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
    async fn test_goal_defaults_and_policy() {
        let provider = RecordingProvider::new("1. Tell me more!");
        let context = context_with(provider.clone());

        let text = run(
            &ConversationRepliesTool,
            json!({"conversation_context": "Them: I just got back from Peru"}),
            &context,
        )
        .await
        .unwrap();

        assert!(text.starts_with("💬 **Smart Reply Suggestions**"));
        let prompt = provider.last_prompt();
        assert!(prompt.contains("I just got back from Peru"));
        assert!(prompt.contains("User goal: continue conversation"));
        assert_eq!(provider.last_request().temperature, 0.8);
    }
}
