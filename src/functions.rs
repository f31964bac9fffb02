//! Public facade
//!
//! `EnhancedFunctions` wraps one shared agent and exposes the four report
//! producing entry points plus status and goal helpers. Every entry point
//! returns Markdown; failures are logged and rendered as a `❌` line.

use crate::agent::{create_agent, run_tool_calls, EnhancedAgent, ThinkingOptions};
use crate::config::AppConfig;
use crate::report;
use crate::tools::ApiDescriptor;
use crate::types::{AgentError, Result, TimeHorizon};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error};

/// Cloneable handle to a shared agent.
#[derive(Clone)]
pub struct EnhancedFunctions {
    agent: Arc<RwLock<EnhancedAgent>>,
}

impl EnhancedFunctions {
    pub fn new(agent: EnhancedAgent) -> Self {
        Self {
            agent: Arc::new(RwLock::new(agent)),
        }
    }

    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        Ok(Self::new(create_agent(config)?))
    }

    pub fn agent(&self) -> Arc<RwLock<EnhancedAgent>> {
        Arc::clone(&self.agent)
    }

    /// Chain-of-thought analysis of a query.
    ///
    /// `reasoning_depth` is clamped to 1..=5. Unset arguments take the configured
    /// defaults on every call.
    pub async fn enhanced_thinking(
        &self,
        query: &str,
        reasoning_depth: Option<i64>,
        enable_critical_thinking: Option<bool>,
    ) -> String {
        let mut agent = self.agent.write().await;
        let limits = agent.config().limits.clone();

        let query = match require("query", query, limits.max_input_chars) {
            Ok(query) => query,
            Err(e) => return fail("Error during the thinking process", e),
        };

        let defaults = agent.default_thinking();
        let options = ThinkingOptions::new(
            reasoning_depth.unwrap_or(i64::from(defaults.depth)),
            enable_critical_thinking.unwrap_or(defaults.critical_thinking),
        );

        let outcome = agent.chain_of_thought(&query, options);
        report::thinking_report(&outcome)
    }

    /// Pick suitable tools for a task, call them, and report.
    ///
    /// `available_apis` is a JSON list of `{name, description?, parameters?}` objects.
    /// Tool calls run with no lock held on the agent.
    pub async fn discover_and_use_tools(
        &self,
        task_description: &str,
        available_apis: Option<&Value>,
    ) -> String {
        let (task, candidates, jobs) = {
            let agent = self.agent.read().await;
            let limits = agent.config().limits.clone();

            let task = match require("task_description", task_description, limits.max_input_chars)
            {
                Ok(task) => task,
                Err(e) => return fail("Tool discovery and usage error", e),
            };

            let mut apis = available_apis.map(ApiDescriptor::parse_list).unwrap_or_default();
            apis.truncate(limits.max_list_items);
            debug!(apis = apis.len(), "Discovering tools");

            let candidates = match agent.identify_suitable_tools(&task, &apis) {
                Ok(candidates) => candidates,
                Err(e) => return fail("Tool discovery and usage error", e),
            };
            let jobs = agent.prepare_tool_calls(&task, &candidates, &apis);
            (task, candidates, jobs)
        };

        let calls = run_tool_calls(jobs).await;
        let usage = self.agent.write().await.record_tool_usage(&task, calls);
        report::tools_report(&task, &candidates, &usage)
    }

    /// Plan an objective; `time_horizon` falls back to the configured default.
    pub async fn agentic_planning(
        &self,
        objective: &str,
        constraints: Option<Vec<String>>,
        time_horizon: Option<&str>,
    ) -> String {
        let mut agent = self.agent.write().await;
        let limits = agent.config().limits.clone();

        let objective = match require("objective", objective, limits.max_input_chars) {
            Ok(objective) => objective,
            Err(e) => return fail("Agentic planning error", e),
        };
        let constraints = sanitize_list(constraints, limits.max_list_items, limits.max_input_chars);
        let horizon = TimeHorizon::parse(
            time_horizon.unwrap_or(agent.config().planning.default_time_horizon.as_str()),
        );

        let outcome = agent.plan(&objective, &constraints, &horizon);
        report::planning_report(&outcome)
    }

    pub async fn real_world_adaptation(
        &self,
        context: &str,
        environmental_factors: Option<Vec<String>>,
        adaptation_goals: Option<Vec<String>>,
    ) -> String {
        let agent = self.agent.read().await;
        let limits = agent.config().limits.clone();

        let context = match require("context", context, limits.max_input_chars) {
            Ok(context) => context,
            Err(e) => return fail("Real-world adaptation error", e),
        };
        let factors = sanitize_list(
            environmental_factors,
            limits.max_list_items,
            limits.max_input_chars,
        );
        let goals = sanitize_list(adaptation_goals, limits.max_list_items, limits.max_input_chars);

        let outcome = agent.adapt(&context, &factors, &goals);
        report::adaptation_report(&outcome)
    }

    pub async fn plugin_info(&self) -> String {
        let agent = self.agent.read().await;
        report::plugin_info(&agent.status())
    }

    pub async fn active_goals(&self) -> String {
        let agent = self.agent.read().await;
        report::goals_report(&agent.goals().active())
    }

    /// Set a goal's progress (0.0 to 1.0) and report the remaining active goals.
    pub async fn update_goal_progress(&self, goal_id: &str, progress: f32) -> String {
        let mut agent = self.agent.write().await;
        if let Err(e) = agent.update_goal_progress(goal_id.trim(), progress) {
            return fail("Goal update error", e);
        }
        report::goals_report(&agent.goals().active())
    }

    pub async fn abandon_goal(&self, goal_id: &str) -> String {
        let mut agent = self.agent.write().await;
        if let Err(e) = agent.abandon_goal(goal_id.trim()) {
            return fail("Goal update error", e);
        }
        report::goals_report(&agent.goals().active())
    }
}

fn fail(context: &str, err: AgentError) -> String {
    error!("{}: {}", context, err);
    report::error_report(context, err)
}

/// Trim, drop control characters (newlines and tabs survive) and cap the length.
fn sanitize(raw: &str, max_chars: usize) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t'))
        .take(max_chars)
        .collect();
    cleaned.trim_end().to_string()
}

fn require(field: &'static str, raw: &str, max_chars: usize) -> Result<String> {
    let value = sanitize(raw, max_chars);
    if value.is_empty() {
        return Err(AgentError::InvalidInput {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(value)
}

fn sanitize_list(items: Option<Vec<String>>, max_items: usize, max_chars: usize) -> Vec<String> {
    items
        .unwrap_or_default()
        .iter()
        .map(|item| sanitize(item, max_chars))
        .filter(|item| !item.is_empty())
        .take(max_items)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("  hello\u{0007} world \n", 100), "hello world");
        assert_eq!(sanitize("line one\nline two", 100), "line one\nline two");
        assert_eq!(sanitize("abcdef", 3), "abc");
        assert_eq!(sanitize("çalışma", 3), "çal");
    }

    #[test]
    fn test_require_rejects_blank() {
        let err = require("query", " \u{0000} ", 10).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input for query: must not be empty");
    }

    #[test]
    fn test_sanitize_list() {
        let items = Some(vec![
            " a ".to_string(),
            "".to_string(),
            "b".to_string(),
            "c".to_string(),
        ]);
        assert_eq!(sanitize_list(items, 2, 10), vec!["a", "b"]);
        assert!(sanitize_list(None, 2, 10).is_empty());
    }

    #[tokio::test]
    async fn test_out_of_range_depth_still_reasons() {
        let functions = EnhancedFunctions::from_config(&AppConfig::default()).unwrap();
        let shallow = functions
            .enhanced_thinking("What is ownership?", Some(-4), None)
            .await;
        assert!(shallow.contains("### Step 5: Reflection"));

        let deep = functions
            .enhanced_thinking("What is ownership?", Some(42), Some(false))
            .await;
        assert!(deep.contains("### Step 4: Reflection"));
        assert_eq!(functions.agent.read().await.thinking_history().len(), 9);
    }
}
