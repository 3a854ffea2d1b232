//! Dispatch Engine - routes invocations to registered tools.
//!
//! `dispatch` is total: every invocation resolves to a [`ToolOutcome`].
//! Unknown names and invalid arguments become failures before the handler
//! runs; handler errors, panics, and overruns are caught at this boundary
//! and never reach the transport layer.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{error, info, warn};

use super::error::ToolError;
use super::outcome::ToolOutcome;
use super::registry::ToolRegistry;

/// Generic diagnostic for unexpected handler faults. Details stay in the
/// server log; the peer only learns that the invocation failed.
const HANDLER_FAULT_MESSAGE: &str = "tool execution failed";

/// Dispatch engine over a read-only tool registry.
#[derive(Clone)]
pub struct DispatchEngine {
    registry: Arc<ToolRegistry>,
    /// Upper bound on one handler execution.
    timeout: Duration,
}

impl DispatchEngine {
    pub fn new(registry: Arc<ToolRegistry>, timeout: Duration) -> Self {
        Self { registry, timeout }
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Dispatch one invocation: look up, validate, execute.
    pub async fn dispatch(&self, tool_name: &str, raw_arguments: Option<Value>) -> ToolOutcome {
        let Some(definition) = self.registry.lookup(tool_name) else {
            warn!(tool = tool_name, "call for unregistered tool");
            return ToolOutcome::failure(ToolError::unknown_tool(tool_name).to_string());
        };

        let raw = raw_arguments.unwrap_or(Value::Null);
        let arguments = match definition.schema.validate(&raw) {
            Ok(arguments) => arguments,
            Err(e) => {
                warn!(tool = tool_name, error = %e, "argument validation failed");
                return ToolOutcome::failure(e.to_string());
            }
        };

        info!(tool = tool_name, "dispatching tool call");

        // The handler runs as its own task so a panic is contained in the
        // JoinError instead of unwinding through the transport loop.
        let handler = Arc::clone(&definition.handler);
        let mut task = tokio::spawn(async move { handler.call(arguments).await });

        match tokio::time::timeout(self.timeout, &mut task).await {
            Err(_) => {
                warn!(tool = tool_name, timeout = ?self.timeout, "tool execution exceeded time budget");
                task.abort();
                ToolOutcome::failure(ToolError::Timeout.to_string())
            }
            Ok(Err(join_err)) => {
                error!(tool = tool_name, error = %join_err, "tool handler panicked");
                ToolOutcome::failure(HANDLER_FAULT_MESSAGE)
            }
            Ok(Ok(Err(fault))) => {
                error!(tool = tool_name, error = %fault, "tool handler fault");
                ToolOutcome::failure(HANDLER_FAULT_MESSAGE)
            }
            Ok(Ok(Ok(outcome))) => outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::handler::ToolHandler;
    use crate::domains::tools::registry::ToolDefinition;
    use crate::domains::tools::schema::ToolSchema;
    use serde_json::{Map, json};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHandler {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl ToolHandler for CountingHandler {
        async fn call(&self, _arguments: Map<String, Value>) -> anyhow::Result<ToolOutcome> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ToolOutcome::text("counted"))
        }
    }

    struct FaultyHandler;

    #[async_trait::async_trait]
    impl ToolHandler for FaultyHandler {
        async fn call(&self, _arguments: Map<String, Value>) -> anyhow::Result<ToolOutcome> {
            anyhow::bail!("connection reset by peer (secret=hunter2)")
        }
    }

    struct PanickingHandler;

    #[async_trait::async_trait]
    impl ToolHandler for PanickingHandler {
        async fn call(&self, _arguments: Map<String, Value>) -> anyhow::Result<ToolOutcome> {
            panic!("handler bug")
        }
    }

    struct SlowHandler;

    #[async_trait::async_trait]
    impl ToolHandler for SlowHandler {
        async fn call(&self, _arguments: Map<String, Value>) -> anyhow::Result<ToolOutcome> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(ToolOutcome::text("too late"))
        }
    }

    fn engine_with(definitions: Vec<ToolDefinition>) -> DispatchEngine {
        let mut registry = ToolRegistry::new();
        for definition in definitions {
            registry.register(definition).unwrap();
        }
        DispatchEngine::new(Arc::new(registry), Duration::from_millis(200))
    }

    #[tokio::test]
    async fn test_unknown_tool_is_failure() {
        let engine = engine_with(vec![]);
        let outcome = engine.dispatch("nonexistent", Some(json!({}))).await;
        match outcome {
            ToolOutcome::Failure(msg) => assert!(msg.contains("unknown tool")),
            ToolOutcome::Success(_) => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let calls = Arc::new(AtomicUsize::new(0));
        let engine = engine_with(vec![ToolDefinition::new(
            "count",
            "count calls",
            ToolSchema::empty(),
            Arc::new(CountingHandler { calls: calls.clone() }),
        )]);

        let outcome = engine.dispatch("count", None).await;
        assert_eq!(outcome, ToolOutcome::text("counted"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_arguments_never_reach_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let engine = engine_with(vec![ToolDefinition::new(
            "count",
            "count calls",
            ToolSchema::empty().required_string("key", "required key"),
            Arc::new(CountingHandler { calls: calls.clone() }),
        )]);

        let outcome = engine.dispatch("count", Some(json!({}))).await;
        assert!(outcome.is_failure());
        let outcome = engine.dispatch("count", Some(json!({ "key": 7 }))).await;
        assert!(outcome.is_failure());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_handler_fault_is_generic_failure() {
        let engine = engine_with(vec![ToolDefinition::new(
            "flaky",
            "always faults",
            ToolSchema::empty(),
            Arc::new(FaultyHandler),
        )]);

        match engine.dispatch("flaky", None).await {
            ToolOutcome::Failure(msg) => {
                assert_eq!(msg, HANDLER_FAULT_MESSAGE);
                assert!(!msg.contains("hunter2"));
            }
            ToolOutcome::Success(_) => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn test_handler_panic_is_contained() {
        let engine = engine_with(vec![ToolDefinition::new(
            "crashy",
            "always panics",
            ToolSchema::empty(),
            Arc::new(PanickingHandler),
        )]);

        let outcome = engine.dispatch("crashy", None).await;
        assert_eq!(outcome, ToolOutcome::failure(HANDLER_FAULT_MESSAGE));
    }

    #[tokio::test]
    async fn test_slow_handler_times_out() {
        let engine = engine_with(vec![ToolDefinition::new(
            "slow",
            "sleeps past the budget",
            ToolSchema::empty(),
            Arc::new(SlowHandler),
        )]);

        let outcome = engine.dispatch("slow", None).await;
        assert_eq!(outcome, ToolOutcome::failure("timed out"));
    }
}
