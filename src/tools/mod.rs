//! Tool abstraction, registry, and task-driven tool discovery.

pub mod builtin;
pub mod discovery;
pub mod external;

pub use discovery::{identify_suitable_tools, task_arguments, CandidateSource, ToolCandidate};
pub use external::{ApiDescriptor, ExternalApiTool};

use crate::types::{AgentError, ToolCapability};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Result of a single tool execution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResult {
    pub success: bool,
    pub output: String,
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            output: String::new(),
            error: Some(error.into()),
        }
    }
}

/// Something the agent can call while working on a task.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON schema of the accepted arguments
    fn parameters(&self) -> Value;

    fn usage_examples(&self) -> Vec<String> {
        Vec::new()
    }

    async fn execute(&self, args: Value) -> Result<ToolResult>;

    /// Capability record the agent keeps for this tool.
    fn capability(&self) -> ToolCapability {
        ToolCapability {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters(),
            usage_examples: self.usage_examples(),
            effectiveness_score: 0.0,
            last_used: None,
        }
    }
}

/// Registry of callable tools, ordered by name.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in tools.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(builtin::WebSearchTool::new()));
        registry.register(Arc::new(builtin::CodeAnalysisTool::new()));
        registry.register(Arc::new(builtin::PlanningTool::new()));
        registry
    }

    /// Register a tool, replacing any tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn capabilities(&self) -> BTreeMap<String, ToolCapability> {
        self.tools
            .iter()
            .map(|(name, tool)| (name.clone(), tool.capability()))
            .collect()
    }

    pub async fn execute(&self, name: &str, args: Value) -> Result<ToolResult> {
        let tool = self
            .get(name)
            .ok_or_else(|| AgentError::ToolNotFound(name.to_string()))?;
        tool.execute(args).await
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}
