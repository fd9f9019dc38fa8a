// Tool registry and trait definition
//
// Explicit catalog built once at startup; read-only afterwards.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

use crate::media::MediaNormalizer;
use crate::providers::BackendClient;
use crate::tools::types::{ParamSpec, ToolArgs, ToolDefinition, ToolError};

/// Shared collaborators handed to every tool call
#[derive(Clone)]
pub struct ToolContext {
    pub backend: BackendClient,
    pub media: MediaNormalizer,
}

/// Tool trait - all tools must implement this
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (e.g., "improve_bio")
    fn name(&self) -> &str;

    /// Human-readable description of what the tool does
    fn description(&self) -> &str;

    /// Declared parameters, in validation order
    fn parameters(&self) -> Vec<ParamSpec>;

    /// Execute the tool with validated arguments
    async fn execute(&self, args: &ToolArgs, context: &ToolContext) -> Result<String, ToolError>;

    /// Get full tool definition
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tool '{0}' is already registered")]
    DuplicateTool(String),
}

/// A definition captured at registration, paired with its handler
pub struct RegisteredTool {
    pub definition: ToolDefinition,
    pub handler: Box<dyn Tool>,
}

/// Registry of available tools, in registration order
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create empty registry
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool; names must be unique
    pub fn register(&mut self, tool: Box<dyn Tool>) -> Result<(), RegistryError> {
        let definition = tool.definition();
        if self.index.contains_key(&definition.name) {
            return Err(RegistryError::DuplicateTool(definition.name));
        }

        self.index.insert(definition.name.clone(), self.tools.len());
        self.tools.push(RegisteredTool {
            definition,
            handler: tool,
        });
        Ok(())
    }

    /// Get tool by name
    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// Check if tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// List all tool names in registration order
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.definition.name.as_str()).collect()
    }

    /// Get all tool definitions in registration order
    pub fn list_tools(&self) -> Vec<&ToolDefinition> {
        self.tools.iter().map(|t| &t.definition).collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
