// Tool implementations
//
// One handler per capability. Each builds a prompt, optionally normalizes an
// image, calls the backend once and wraps the text in a short banner.

// Handshake and catalog
pub mod help;
pub mod validate;

// Image tools
pub mod analyze_profile;

// Text tools
pub mod conversation_replies;
pub mod generate_opener;
pub mod improve_bio;
pub mod plan_date;
pub mod red_flags;
pub mod roast_profile;

// Re-exports for convenience
pub use analyze_profile::AnalyzeProfileTool;
pub use conversation_replies::ConversationRepliesTool;
pub use generate_opener::GenerateOpenerTool;
pub use help::HelpTool;
pub use improve_bio::ImproveBioTool;
pub use plan_date::PlanDateTool;
pub use red_flags::RedFlagsTool;
pub use roast_profile::RoastProfileTool;
pub use validate::ValidateTool;

use crate::providers::CompletionRequest;
use crate::tools::registry::{RegistryError, ToolContext, ToolRegistry};
use crate::tools::types::ToolError;

/// Assemble the full catalog. `help` is registered last so it can describe
/// every other tool.
pub fn build_registry(validate_identity: &str) -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(ValidateTool::new(validate_identity)))?;
    registry.register(Box::new(AnalyzeProfileTool))?;
    registry.register(Box::new(ConversationRepliesTool))?;
    registry.register(Box::new(ImproveBioTool))?;
    registry.register(Box::new(GenerateOpenerTool))?;
    registry.register(Box::new(RoastProfileTool))?;
    registry.register(Box::new(RedFlagsTool))?;
    registry.register(Box::new(PlanDateTool))?;

    let help = HelpTool::from_catalog(&registry.list_tools());
    registry.register(Box::new(help))?;

    Ok(registry)
}

/// Send a prompt through the backend with the caller's sampling policy
pub(crate) async fn ask_backend(
    context: &ToolContext,
    request: CompletionRequest,
) -> Result<String, ToolError> {
    Ok(context.backend.complete(&request).await?)
}

/// Banner + body + tips layout shared by the text tools
pub(crate) fn format_response(title: &str, body: &str, tips_heading: &str, tips: &[&str]) -> String {
    let mut out = format!("{}\n\n{}\n\n{}\n", title, body.trim(), tips_heading);
    for tip in tips {
        out.push_str("- ");
        out.push_str(tip);
        out.push('\n');
    }
    out
}
