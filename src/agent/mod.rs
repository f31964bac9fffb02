pub mod core;
pub mod factory;

pub use core::{
    run_tool_calls, AdaptationOutcome, AgentStatus, EnhancedAgent, PlanningOutcome,
    ThinkingOptions, ToolCallRecord, ToolJob, ToolUsageOutcome,
};
pub use factory::{create_agent, load_agent, save_agent};
