use crate::planning::{analyze_objective, assess_risks, create_strategic_plan};
use crate::tools::{Tool, ToolResult};
use crate::types::TimeHorizon;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Turns an objective into a strategic plan with a risk assessment.
pub struct PlanningTool;

#[derive(Debug, Deserialize)]
struct PlanningArgs {
    objective: String,
    #[serde(default)]
    constraints: Vec<String>,
    time_horizon: Option<String>,
}

impl PlanningTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlanningTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for PlanningTool {
    fn name(&self) -> &str {
        "planning"
    }

    fn description(&self) -> &str {
        "Task planning and strategic thinking: break an objective into steps, risks and checkpoints"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "objective": {
                    "type": "string",
                    "description": "The objective to plan for"
                },
                "constraints": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Known constraints (budget, time, team)"
                },
                "time_horizon": {
                    "type": "string",
                    "enum": ["short", "medium", "long"],
                    "description": "Planning horizon"
                }
            },
            "required": ["objective"]
        })
    }

    fn usage_examples(&self) -> Vec<String> {
        vec![
            "Project planning".to_string(),
            "Problem-solving strategy".to_string(),
        ]
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        let args: PlanningArgs =
            serde_json::from_value(args).context("Failed to parse planning arguments")?;

        if args.objective.trim().is_empty() {
            return Ok(ToolResult::failure("Objective is empty"));
        }

        let horizon = TimeHorizon::parse(args.time_horizon.as_deref().unwrap_or("short"));
        let analysis = analyze_objective(&args.objective, &args.constraints, &horizon);
        let plan = create_strategic_plan(&analysis);
        let risks = assess_risks(&plan);

        let output = serde_json::json!({
            "analysis": analysis,
            "plan": plan,
            "risks": risks,
        });
        Ok(ToolResult::success(output.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_planning_tool_output() {
        let tool = PlanningTool::new();
        let result = tool
            .execute(serde_json::json!({
                "objective": "Migrate the billing service",
                "constraints": ["Budget: $10K", "Time: 2 months"],
                "time_horizon": "medium"
            }))
            .await
            .unwrap();

        assert!(result.success);
        let output: Value = serde_json::from_str(&result.output).unwrap();
        assert_eq!(output["analysis"]["complexity"], "moderate");
        assert_eq!(output["analysis"]["estimated_days"], 9);
        assert_eq!(output["plan"]["main_steps"].as_array().unwrap().len(), 3);
        assert_eq!(output["risks"]["overall_level"], "low");
    }

    #[tokio::test]
    async fn test_planning_tool_requires_objective() {
        let tool = PlanningTool::new();
        assert!(tool.execute(serde_json::json!({})).await.is_err());

        let result = tool
            .execute(serde_json::json!({"objective": ""}))
            .await
            .unwrap();
        assert!(!result.success);
    }
}
