// Tool dispatcher
//
// lookup -> validate arguments (declaration order, first error wins)
// -> run handler -> tagged InvocationResult. Nothing escapes unstructured.

use futures::FutureExt;
use serde_json::{Map, Value};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::errors;
use crate::tools::registry::{ToolContext, ToolRegistry};
use crate::tools::types::{
    Failure, FailureKind, InvocationRequest, InvocationResult, ToolArgs, ToolDefinition,
};

/// Routes invocations to registered tools
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    context: ToolContext,
}

impl Dispatcher {
    pub fn new(registry: ToolRegistry, context: ToolContext) -> Self {
        Self {
            registry: Arc::new(registry),
            context,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn context(&self) -> &ToolContext {
        &self.context
    }

    /// Run one invocation to completion. Always returns a tagged result.
    pub async fn dispatch(&self, request: InvocationRequest) -> InvocationResult {
        let invocation_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "invocation",
            tool = %request.tool_name,
            invocation_id = %invocation_id
        );

        self.dispatch_inner(request).instrument(span).await
    }

    async fn dispatch_inner(&self, request: InvocationRequest) -> InvocationResult {
        let start = Instant::now();

        let Some(entry) = self.registry.get(&request.tool_name) else {
            tracing::info!("Unknown tool requested");
            return InvocationResult::Failure(Failure::new(
                FailureKind::UnknownTool,
                errors::unknown_tool_error(&request.tool_name),
            ));
        };

        let args = match validate_arguments(&entry.definition, &request.arguments) {
            Ok(args) => args,
            Err(failure) => {
                tracing::info!(
                    kind = ?failure.kind,
                    argument = failure.argument.as_deref().unwrap_or(""),
                    "Invocation rejected"
                );
                return InvocationResult::Failure(failure);
            }
        };

        let outcome = AssertUnwindSafe(entry.handler.execute(&args, &self.context))
            .catch_unwind()
            .await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(Ok(text)) => {
                tracing::info!(elapsed_ms, status = "success", "Tool completed");
                InvocationResult::Success(text)
            }
            Ok(Err(err)) => {
                tracing::warn!(elapsed_ms, status = "failure", error = %err, "Tool failed");
                InvocationResult::Failure(Failure::new(
                    FailureKind::HandlerError,
                    errors::tool_error_message(&err),
                ))
            }
            Err(_) => {
                tracing::error!(elapsed_ms, status = "panic", "Tool handler panicked");
                InvocationResult::Failure(Failure::new(
                    FailureKind::HandlerError,
                    errors::internal_error(),
                ))
            }
        }
    }
}

/// Check arguments against a definition in declaration order.
///
/// Missing optional parameters take their default; a JSON `null` counts as
/// missing. Undeclared arguments are ignored.
pub fn validate_arguments(
    definition: &ToolDefinition,
    arguments: &Map<String, Value>,
) -> Result<ToolArgs, Failure> {
    let mut args = ToolArgs::default();

    for param in &definition.parameters {
        match arguments.get(param.name) {
            None | Some(Value::Null) => {
                if param.required {
                    return Err(Failure::for_argument(
                        FailureKind::MissingArgument,
                        param.name,
                        errors::missing_argument_error(param.name),
                    ));
                }
                args.insert(param.name, param.default.unwrap_or_default().to_string());
            }
            Some(Value::String(value)) if param.accepts(value) => {
                args.insert(param.name, value.clone());
            }
            Some(_) => {
                return Err(Failure::for_argument(
                    FailureKind::InvalidArgument,
                    param.name,
                    errors::invalid_argument_error(param),
                ));
            }
        }
    }

    for name in arguments.keys() {
        if !definition.parameters.iter().any(|p| p.name == name) {
            tracing::debug!(argument = %name, "Ignoring undeclared argument");
        }
    }

    Ok(args)
}
