//! Chain-of-thought reasoning
//!
//! A query runs through analysis, planning, execution, an optional critical
//! evaluation and a final reflection. Each phase yields a `ThinkingStep`
//! carrying its own confidence; the agent core stitches them together.

pub mod analysis;
pub mod execution;
pub mod review;

pub use analysis::{analyze_query, QueryAnalysis, QuestionKind};
pub use execution::{create_execution_plan, execute_plan, ExecutionPlan, ExecutionResult, StepOutcome};
pub use review::{critical_evaluation, reflect, Evaluation, Reflection};

use crate::report::percent;
use crate::types::ThinkingStep;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Result of a full reasoning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningOutcome {
    pub chain: Vec<ThinkingStep>,
    pub final_answer: String,
    pub confidence: f32,
    pub thinking_process: String,
}

/// Mean step confidence plus a small bonus per step, capped at 1.0.
pub fn overall_confidence(chain: &[ThinkingStep]) -> f32 {
    if chain.is_empty() {
        return 0.0;
    }

    let average = chain.iter().map(|s| s.confidence).sum::<f32>() / chain.len() as f32;
    let step_bonus = (chain.len() as f32 * 0.02).min(0.1);

    (average + step_bonus).min(1.0)
}

pub fn format_thinking_process(chain: &[ThinkingStep]) -> String {
    let mut formatted = String::from("🧠 **Thinking Process:**\n\n");

    for (i, step) in chain.iter().enumerate() {
        let _ = writeln!(
            formatted,
            "{} **Step {} - {}:** {}",
            step.step.emoji(),
            i + 1,
            step.step.title(),
            step.content
        );
        let _ = writeln!(formatted, "   *Confidence: {}*\n", percent(step.confidence));
    }

    formatted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReasoningStep;

    #[test]
    fn test_overall_confidence_empty() {
        assert_eq!(overall_confidence(&[]), 0.0);
    }

    #[test]
    fn test_overall_confidence_bonus() {
        let chain = vec![
            ThinkingStep::new(ReasoningStep::Analysis, "a", 0.5),
            ThinkingStep::new(ReasoningStep::Planning, "b", 0.7),
        ];
        // mean 0.6 + 2 * 0.02
        assert!((overall_confidence(&chain) - 0.64).abs() < 1e-5);
    }

    #[test]
    fn test_overall_confidence_capped() {
        let chain: Vec<_> = (0..6)
            .map(|_| ThinkingStep::new(ReasoningStep::Execution, "x", 0.98))
            .collect();
        assert_eq!(overall_confidence(&chain), 1.0);
    }

    #[test]
    fn test_format_thinking_process() {
        let chain = vec![ThinkingStep::new(ReasoningStep::Analysis, "looked closely", 0.85)];
        let text = format_thinking_process(&chain);
        assert!(text.starts_with("🧠 **Thinking Process:**"));
        assert!(text.contains("🔍 **Step 1 - Analysis:** looked closely"));
        assert!(text.contains("*Confidence: 85.0%*"));
    }
}
