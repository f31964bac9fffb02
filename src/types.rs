//! Common types shared by the reasoning, tool, planning and adaptation layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Phase of the chain-of-thought pipeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningStep {
    Analysis,
    Planning,
    Execution,
    Evaluation,
    Reflection,
}

impl ReasoningStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasoningStep::Analysis => "analysis",
            ReasoningStep::Planning => "planning",
            ReasoningStep::Execution => "execution",
            ReasoningStep::Evaluation => "evaluation",
            ReasoningStep::Reflection => "reflection",
        }
    }

    /// Title-cased label used in reports.
    pub fn title(&self) -> &'static str {
        match self {
            ReasoningStep::Analysis => "Analysis",
            ReasoningStep::Planning => "Planning",
            ReasoningStep::Execution => "Execution",
            ReasoningStep::Evaluation => "Evaluation",
            ReasoningStep::Reflection => "Reflection",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ReasoningStep::Analysis => "🔍",
            ReasoningStep::Planning => "📋",
            ReasoningStep::Execution => "⚡",
            ReasoningStep::Evaluation => "🎯",
            ReasoningStep::Reflection => "🪞",
        }
    }
}

impl fmt::Display for ReasoningStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recorded step of the thinking history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThinkingStep {
    pub step: ReasoningStep,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Confidence from 0.0 to 1.0
    pub confidence: f32,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl ThinkingStep {
    pub fn new(step: ReasoningStep, content: impl Into<String>, confidence: f32) -> Self {
        Self {
            step,
            content: content.into(),
            timestamp: Utc::now(),
            confidence,
            dependencies: Vec::new(),
        }
    }
}

/// Lifecycle of an agent goal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Pending,
    InProgress,
    Completed,
    Abandoned,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Pending => "pending",
            GoalStatus::InProgress => "in_progress",
            GoalStatus::Completed => "completed",
            GoalStatus::Abandoned => "abandoned",
        }
    }
}

/// A long-running objective tracked by the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentGoal {
    pub id: String,
    pub description: String,
    /// Higher is more urgent
    pub priority: u8,
    pub deadline: Option<DateTime<Utc>>,
    pub status: GoalStatus,
    #[serde(default)]
    pub sub_goals: Vec<String>,
    /// Progress from 0.0 to 1.0
    pub progress: f32,
}

impl AgentGoal {
    pub fn new(description: impl Into<String>, priority: u8) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            description: description.into(),
            priority,
            deadline: None,
            status: GoalStatus::Pending,
            sub_goals: Vec::new(),
            progress: 0.0,
        }
    }

    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_sub_goals(mut self, sub_goals: Vec<String>) -> Self {
        self.sub_goals = sub_goals;
        self
    }

    /// Set progress and move the status along with it.
    pub fn set_progress(&mut self, progress: f32) {
        if self.status == GoalStatus::Abandoned {
            return;
        }
        self.progress = progress.clamp(0.0, 1.0);
        self.status = if self.progress >= 1.0 {
            GoalStatus::Completed
        } else if self.progress > 0.0 {
            GoalStatus::InProgress
        } else {
            GoalStatus::Pending
        };
    }
}

/// What the agent knows about a tool it can use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCapability {
    pub name: String,
    pub description: String,
    pub parameters: Value,
    #[serde(default)]
    pub usage_examples: Vec<String>,
    /// Grows with successful use, capped at 1.0
    #[serde(default)]
    pub effectiveness_score: f32,
    #[serde(default)]
    pub last_used: Option<DateTime<Utc>>,
}

impl ToolCapability {
    pub fn record_success(&mut self) {
        self.effectiveness_score = (self.effectiveness_score + 0.1).min(1.0);
        self.last_used = Some(Utc::now());
    }
}

/// Coarse difficulty bucket shared by query and objective analysis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Moderate => "moderate",
            Complexity::Complex => "complex",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Planning horizon. Unknown inputs are kept verbatim and weigh like `Short`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeHorizon {
    Short,
    Medium,
    Long,
    Unrecognized(String),
}

impl TimeHorizon {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "short" => TimeHorizon::Short,
            "medium" => TimeHorizon::Medium,
            "long" => TimeHorizon::Long,
            _ => TimeHorizon::Unrecognized(raw.trim().to_string()),
        }
    }

    pub fn multiplier(&self) -> u32 {
        match self {
            TimeHorizon::Short | TimeHorizon::Unrecognized(_) => 1,
            TimeHorizon::Medium => 3,
            TimeHorizon::Long => 10,
        }
    }
}

impl fmt::Display for TimeHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeHorizon::Short => f.write_str("short"),
            TimeHorizon::Medium => f.write_str("medium"),
            TimeHorizon::Long => f.write_str("long"),
            TimeHorizon::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

/// One observation recorded after a reasoning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryObservation {
    pub query_length: usize,
    pub steps_taken: usize,
    pub success: bool,
    pub timestamp: DateTime<Utc>,
}

/// What the agent remembered about a tool-assisted task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolUsagePattern {
    pub successful_tools: Vec<String>,
    pub task_complexity: usize,
    pub success_rate: f32,
}

/// A learned pattern, keyed by a coarse task signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LearnedPattern {
    Query { observations: Vec<QueryObservation> },
    ToolUsage(ToolUsagePattern),
}

pub type PatternStore = HashMap<String, LearnedPattern>;

/// Errors raised by the agent library.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Tool discovery is disabled")]
    DiscoveryDisabled,

    #[error("Goal not found: {0}")]
    GoalNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_horizon_parse() {
        assert_eq!(TimeHorizon::parse("Medium"), TimeHorizon::Medium);
        assert_eq!(TimeHorizon::parse(" long "), TimeHorizon::Long);
        let odd = TimeHorizon::parse("invalid");
        assert_eq!(odd.multiplier(), 1);
        assert_eq!(odd.to_string(), "invalid");
    }

    #[test]
    fn test_goal_progress_drives_status() {
        let mut goal = AgentGoal::new("ship it", 2);
        assert_eq!(goal.status, GoalStatus::Pending);

        goal.set_progress(0.4);
        assert_eq!(goal.status, GoalStatus::InProgress);

        goal.set_progress(1.7);
        assert_eq!(goal.progress, 1.0);
        assert_eq!(goal.status, GoalStatus::Completed);
    }

    #[test]
    fn test_abandoned_goal_ignores_progress() {
        let mut goal = AgentGoal::new("drop it", 1);
        goal.status = GoalStatus::Abandoned;
        goal.set_progress(0.5);
        assert_eq!(goal.progress, 0.0);
        assert_eq!(goal.status, GoalStatus::Abandoned);
    }

    #[test]
    fn test_effectiveness_is_capped() {
        let mut cap = ToolCapability {
            name: "web_search".to_string(),
            description: "search".to_string(),
            parameters: serde_json::json!({}),
            usage_examples: vec![],
            effectiveness_score: 0.95,
            last_used: None,
        };
        cap.record_success();
        assert_eq!(cap.effectiveness_score, 1.0);
        assert!(cap.last_used.is_some());
    }

    #[test]
    fn test_learned_pattern_serialization_tag() {
        let pattern = LearnedPattern::ToolUsage(ToolUsagePattern {
            successful_tools: vec!["planning".to_string()],
            task_complexity: 1,
            success_rate: 1.0,
        });
        let json = serde_json::to_value(&pattern).unwrap();
        assert_eq!(json["kind"], "tool_usage");
    }
}
