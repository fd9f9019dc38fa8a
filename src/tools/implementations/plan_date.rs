// Plan date - date ideas for a location, budget and stage

use async_trait::async_trait;

use super::{ask_backend, format_response};
use crate::providers::CompletionRequest;
use crate::tools::registry::{Tool, ToolContext};
use crate::tools::types::{ParamKind, ParamSpec, ToolArgs, ToolError};

pub struct PlanDateTool;

#[async_trait]
impl Tool for PlanDateTool {
    fn name(&self) -> &str {
        "plan_date"
    }

    fn description(&self) -> &str {
        "Get date planning suggestions based on preferences. Includes costs, outfits and backup plans."
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::required("location", "City or area for the date", ParamKind::String),
            ParamSpec::optional("budget", "Budget level (low, medium, high)", ParamKind::String, "medium"),
            ParamSpec::optional(
                "interests",
                "Shared interests or activities you both like",
                ParamKind::String,
                "",
            ),
            ParamSpec::optional(
                "date_type",
                "Type of date (first_date, second_date, romantic, fun)",
                ParamKind::String,
                "first_date",
            ),
        ]
    }

    async fn execute(&self, args: &ToolArgs, context: &ToolContext) -> Result<String, ToolError> {
        let location = args.require("location")?;
        let budget = args.require("budget")?;
        let interests = args.require("interests")?;
        let date_type = args.require("date_type")?;

        let prompt = format!(
            "Plan a {} in {} with a {} budget.\n\n\
            Shared interests: {}\n\n\
            Provide:\n\
            1. 3-5 specific date ideas with locations\n\
            2. Estimated costs\n\
            3. What to wear suggestions\n\
            4. Conversation topics\n\
            5. How to suggest the date\n\
            6. Backup plans if needed\n\n\
            Make it memorable but appropriate for the relationship stage.",
            date_type.replace('_', " "),
            location,
            budget,
            interests
        );

        let request = CompletionRequest::text(prompt)
            .with_max_tokens(800)
            .with_temperature(0.7);
        let plan = ask_backend(context, request).await?;

        Ok(format_response(
            "💕 **Date Planning Assistant**",
            &plan,
            "🎯 **Date Success Tips:**",
            &[
                "Confirm plans the day before",
                "Arrive on time",
                "Put phone away and be present",
                "Ask questions and listen actively",
                "Have fun and be yourself!",
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
    async fn test_defaults_fill_prompt() {
        let provider = RecordingProvider::new("1. Sunset at Miradouro da Graça");
        let context = context_with(provider.clone());

        let text = run(&PlanDateTool, json!({"location": "Lisbon"}), &context)
            .await
            .unwrap();

        assert!(text.contains("Miradouro"));
        assert!(provider
            .last_prompt()
            .starts_with("Plan a first date in Lisbon with a medium budget."));
    }
}
