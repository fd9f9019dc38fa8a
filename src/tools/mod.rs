// Tool dispatch system
//
// Explicit catalog of remotely invocable tools, argument validation and
// routing of invocations to their handlers.

pub mod dispatcher;
pub mod implementations;
pub mod registry;
pub mod types;

pub use dispatcher::{validate_arguments, Dispatcher};
pub use implementations::build_registry;
pub use registry::{RegisteredTool, RegistryError, Tool, ToolContext, ToolRegistry};
pub use types::{
    Failure, FailureKind, InvocationRequest, InvocationResult, ParamKind, ParamSpec, ToolArgs,
    ToolDefinition, ToolError,
};
