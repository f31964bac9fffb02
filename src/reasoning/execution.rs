//! Execution planning and simulated plan execution.

use super::analysis::QueryAnalysis;
use crate::types::Complexity;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Seconds budgeted per plan step
const SECONDS_PER_STEP: u32 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionPlan {
    pub strategy: String,
    pub steps: Vec<String>,
    pub required_tools: Vec<String>,
    pub estimated_seconds: u32,
    pub confidence: f32,
}

impl ExecutionPlan {
    pub fn new(steps: Vec<String>, required_tools: Vec<String>) -> Self {
        Self {
            strategy: format!("{}-step approach", steps.len()),
            estimated_seconds: steps.len() as u32 * SECONDS_PER_STEP,
            steps,
            required_tools,
            confidence: 0.9,
        }
    }
}

pub fn create_execution_plan(analysis: &QueryAnalysis) -> ExecutionPlan {
    let (steps, tools): (&[&str], &[&str]) = match analysis.complexity {
        Complexity::Complex => (
            &[
                "Break the problem into sub-parts",
                "Gather sources for each part",
                "Synthesize the information",
                "Verify the results",
            ],
            &["web_search", "code_analysis", "planning"],
        ),
        Complexity::Moderate => (
            &[
                "Identify relevant information sources",
                "Collect and evaluate information",
                "Formulate the conclusion",
            ],
            &["web_search", "planning"],
        ),
        Complexity::Simple => (
            &["Formulate a direct answer", "Verify the answer"],
            &["planning"],
        ),
    };

    ExecutionPlan::new(
        steps.iter().map(|s| s.to_string()).collect(),
        tools.iter().map(|s| s.to_string()).collect(),
    )
}

/// Outcome of one executed plan step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    /// 1-based step number
    pub step: usize,
    pub description: String,
    pub result: Option<String>,
    pub error: Option<String>,
}

impl StepOutcome {
    pub fn success(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub steps: Vec<StepOutcome>,
    pub answer: String,
    pub success: bool,
    pub summary: String,
    pub confidence: f32,
}

pub fn execute_plan(plan: &ExecutionPlan) -> ExecutionResult {
    let steps: Vec<StepOutcome> = plan
        .steps
        .iter()
        .enumerate()
        .map(|(i, step)| match execute_step(step) {
            Ok(result) => StepOutcome {
                step: i + 1,
                description: step.clone(),
                result: Some(result),
                error: None,
            },
            Err(e) => {
                warn!("Plan step {} failed: {}", i + 1, e);
                StepOutcome {
                    step: i + 1,
                    description: step.clone(),
                    result: None,
                    error: Some(e.to_string()),
                }
            }
        })
        .collect();

    let succeeded = steps.iter().filter(|s| s.success()).count();
    let success = succeeded == steps.len();

    let answer = if success {
        synthesize(&steps)
    } else {
        "Some steps failed during plan execution. Partial results are available.".to_string()
    };

    let summary = if success {
        format!("{} steps completed", steps.len())
    } else {
        format!("{}/{} steps completed with errors", succeeded, steps.len())
    };

    ExecutionResult {
        steps,
        answer,
        success,
        summary,
        confidence: if success { 0.8 } else { 0.4 },
    }
}

/// Resolve a single step. Tools are not invoked here; the result is keyed on
/// what the step asks for.
fn execute_step(step: &str) -> Result<String> {
    let lowered = step.trim().to_lowercase();
    if lowered.is_empty() {
        bail!("empty plan step");
    }

    let result = if lowered.contains("information") || lowered.contains("source") {
        "Relevant information sources identified and accessed".to_string()
    } else if lowered.contains("analy") {
        "Detailed analysis completed".to_string()
    } else if lowered.contains("evaluat") {
        "Evaluation criteria applied".to_string()
    } else if lowered.contains("verif") {
        "Results verified and confirmed".to_string()
    } else {
        format!("Step completed successfully: {}", step.trim())
    };
    Ok(result)
}

fn synthesize(steps: &[StepOutcome]) -> String {
    format!(
        "All {} steps completed successfully. A reliable conclusion was reached through \
         comprehensive analysis and evaluation.",
        steps.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reasoning::analysis::analyze_query;

    #[test]
    fn test_plan_shape_follows_complexity() {
        let simple = create_execution_plan(&analyze_query("Python nedir?"));
        assert_eq!(simple.steps.len(), 2);
        assert_eq!(simple.required_tools, vec!["planning"]);
        assert_eq!(simple.strategy, "2-step approach");
        assert_eq!(simple.estimated_seconds, 60);

        let complex = create_execution_plan(&analyze_query("Analyze the market"));
        assert_eq!(complex.steps.len(), 4);
        assert_eq!(complex.required_tools.len(), 3);
    }

    #[test]
    fn test_execute_plan_success() {
        let plan = create_execution_plan(&analyze_query(
            "one two three four five six seven eight nine ten eleven",
        ));
        let result = execute_plan(&plan);

        assert!(result.success);
        assert_eq!(result.confidence, 0.8);
        assert_eq!(result.summary, "3 steps completed");
        assert_eq!(
            result.steps[0].result.as_deref(),
            Some("Relevant information sources identified and accessed")
        );
        assert_eq!(
            result.steps[2].result.as_deref(),
            Some("Step completed successfully: Formulate the conclusion")
        );
        assert!(result.answer.starts_with("All 3 steps completed"));
    }

    #[test]
    fn test_execute_plan_with_failing_step() {
        let plan = ExecutionPlan::new(
            vec!["Verify the answer".to_string(), "   ".to_string()],
            vec![],
        );
        let result = execute_plan(&plan);

        assert!(!result.success);
        assert_eq!(result.confidence, 0.4);
        assert_eq!(result.summary, "1/2 steps completed with errors");
        assert!(result.steps[1].error.is_some());
        assert!(result.answer.contains("Partial results"));
    }
}
