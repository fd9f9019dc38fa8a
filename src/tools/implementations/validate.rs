// Validate tool - handshake identity for the orchestrator

use async_trait::async_trait;

use crate::tools::registry::{Tool, ToolContext};
use crate::tools::types::{ParamSpec, ToolArgs, ToolError};

pub struct ValidateTool {
    identity: String,
}

impl ValidateTool {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
        }
    }
}

#[async_trait]
impl Tool for ValidateTool {
    fn name(&self) -> &str {
        "validate"
    }

    fn description(&self) -> &str {
        "Validation tool used by the orchestrator handshake. Returns the server's identity string."
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![]
    }

    async fn execute(&self, _args: &ToolArgs, _context: &ToolContext) -> Result<String, ToolError> {
        Ok(self.identity.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::implementations::test_support::{run, unconfigured_context};

    #[tokio::test]
    async fn test_validate_returns_identity_without_backend() {
        let tool = ValidateTool::new("15550001111");
        let context = unconfigured_context();

        let first = run(&tool, serde_json::json!({}), &context).await.unwrap();
        let second = run(&tool, serde_json::json!({}), &context).await.unwrap();

        assert_eq!(first, "15550001111");
        assert_eq!(first, second);
    }
}
