// Roast profile - humorous but constructive profile feedback

use async_trait::async_trait;

use super::{ask_backend, format_response};
use crate::providers::CompletionRequest;
use crate::tools::registry::{Tool, ToolContext};
use crate::tools::types::{ParamKind, ParamSpec, ToolArgs, ToolError};

pub const HUMOR_LEVELS: &[&str] = &["mild", "medium", "savage"];

pub struct RoastProfileTool;

fn humor_instruction(level: &str) -> &'static str {
    match level {
        "mild" => "Be gentle and mostly constructive with light humor.",
        "savage" => "Be brutally honest with sharp humor, but still helpful.",
        _ => "Balance humor and constructive feedback equally.",
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[async_trait]
impl Tool for RoastProfileTool {
    fn name(&self) -> &str {
        "roast_profile"
    }

    fn description(&self) -> &str {
        "Get your dating profile roasted with constructive feedback. Humor level is mild, medium or savage."
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::required(
                "profile_description",
                "Description of your dating profile",
                ParamKind::String,
            ),
            ParamSpec::optional(
                "humor_level",
                "How brutal to be (mild, medium, savage)",
                ParamKind::Enum(HUMOR_LEVELS),
                "medium",
            ),
        ]
    }

    async fn execute(&self, args: &ToolArgs, context: &ToolContext) -> Result<String, ToolError> {
        let profile = args.require("profile_description")?;
        let level = args.require("humor_level")?;

        let prompt = format!(
            "Roast this dating profile with {} humor level:\n{}\n\n\
            {}\n\n\
            Provide:\n\
            1. Humorous roasting points\n\
            2. Constructive feedback mixed in\n\
            3. Specific suggestions for improvement\n\
            4. End on a positive/encouraging note\n\n\
            Keep it fun but ultimately helpful for improving their dating success.",
            level,
            profile,
            humor_instruction(level)
        );

        let request = CompletionRequest::text(prompt)
            .with_max_tokens(800)
            .with_temperature(0.9);
        let roast = ask_backend(context, request).await?;

        Ok(format_response(
            &format!("🔥 **Profile Roast ({} Level)**", title_case(level)),
            &roast,
            "😅 **Remember:**",
            &[
                "It's all in good fun!",
                "Use the feedback to improve",
                "Confidence is attractive",
                "Every roast comes with love ❤️",
            ],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::implementations::test_support::{context_with, run, RecordingProvider};
    use serde_json::json;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("savage"), "Savage");
        assert_eq!(title_case(""), "");
    }

    #[tokio::test]
    async fn test_savage_roast() {
        let provider = RecordingProvider::new("Your fish photo has more personality than you.");
        let context = context_with(provider.clone());

        let text = run(
            &RoastProfileTool,
            json!({"profile_description": "Holding a fish. Loves travel.", "humor_level": "savage"}),
            &context,
        )
        .await
        .unwrap();

        assert!(text.starts_with("🔥 **Profile Roast (Savage Level)**"));
        assert!(provider.last_prompt().contains("brutally honest"));
        assert_eq!(provider.last_request().temperature, 0.9);
    }

    #[tokio::test]
    async fn test_default_level_is_medium() {
        let provider = RecordingProvider::new("ok");
        let context = context_with(provider.clone());

        let text = run(&RoastProfileTool, json!({"profile_description": "x"}), &context)
            .await
            .unwrap();

        assert!(text.contains("(Medium Level)"));
        assert!(provider.last_prompt().contains("Balance humor"));
    }
}
