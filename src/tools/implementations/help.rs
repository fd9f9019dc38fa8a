// Help tool - static catalog description

use async_trait::async_trait;

use crate::tools::registry::{Tool, ToolContext};
use crate::tools::types::{ParamSpec, ToolArgs, ToolDefinition, ToolError};

const HELP_NAME: &str = "help";
const HELP_DESCRIPTION: &str = "Get help and see all available Dating Wingman tools.";

/// Help text is rendered once from the catalog and never changes
pub struct HelpTool {
    text: String,
}

impl HelpTool {
    pub fn from_catalog(definitions: &[&ToolDefinition]) -> Self {
        let mut text = String::from("🎯 **Dating Wingman - Your AI Dating Assistant**\n\n**Available Tools:**\n\n");

        for definition in definitions.iter().filter(|d| d.name != HELP_NAME) {
            text.push_str(&catalog_line(definition));
        }
        text.push_str(&format!("- **{}** - {}\n", HELP_NAME, HELP_DESCRIPTION));

        text.push_str(
            "\n**How to Use:**\n\
            1. Upload screenshots directly in chat for profile analysis\n\
            2. Ask for specific help: \"Generate openers for this match\"\n\
            3. Add context: the more you share, the better the advice\n\n\
            **Example Requests:**\n\
            - \"Analyze this profile screenshot\"\n\
            - \"Help me reply to this message\"\n\
            - \"Improve my bio\"\n\
            - \"Plan a first date in Lisbon\"\n",
        );

        Self { text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

fn catalog_line(definition: &ToolDefinition) -> String {
    let summary = definition
        .description
        .split_terminator(". ")
        .next()
        .unwrap_or(&definition.description)
        .trim_end_matches('.');

    let args: Vec<String> = definition
        .parameters
        .iter()
        .map(|p| if p.required { p.name.to_string() } else { format!("[{}]", p.name) })
        .collect();

    if args.is_empty() {
        format!("- **{}** - {}\n", definition.name, summary)
    } else {
        format!("- **{}** ({}) - {}\n", definition.name, args.join(", "), summary)
    }
}

#[async_trait]
impl Tool for HelpTool {
    fn name(&self) -> &str {
        HELP_NAME
    }

    fn description(&self) -> &str {
        HELP_DESCRIPTION
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![]
    }

    async fn execute(&self, _args: &ToolArgs, _context: &ToolContext) -> Result<String, ToolError> {
        Ok(self.text.clone())
    }
}
