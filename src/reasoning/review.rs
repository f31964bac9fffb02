//! Critical evaluation of an execution and reflection over the finished chain.

use super::execution::ExecutionResult;
use crate::types::{QueryObservation, ThinkingStep};
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub assessment: String,
    pub needs_improvement: bool,
    pub confidence: f32,
}

pub fn critical_evaluation(execution: &ExecutionResult) -> Evaluation {
    let mut points = Vec::new();

    if execution.success {
        points.push("✓ Plan executed successfully");
    } else {
        points.push("⚠ Problems occurred while executing the plan");
    }

    if execution.answer.trim().is_empty() {
        points.push("⚠ The answer remained vague");
    } else {
        points.push("✓ A concrete answer was produced");
    }

    let confidence = execution.confidence;
    if confidence > 0.7 {
        points.push("✓ High confidence level");
    } else if confidence > 0.5 {
        points.push("◐ Medium confidence level");
    } else {
        points.push("⚠ Low confidence level");
    }

    Evaluation {
        assessment: points.join("; "),
        needs_improvement: confidence < 0.6,
        confidence: 0.85,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reflection {
    pub insights: String,
    /// Key under which the observation is filed, e.g. `query_type_4_words`
    pub pattern_key: String,
    pub observation: QueryObservation,
    pub confidence: f32,
}

pub fn reflect(chain: &[ThinkingStep], query: &str) -> Reflection {
    let mut insights = Vec::new();

    let high_confidence = chain.iter().filter(|s| s.confidence > 0.8).count();
    if high_confidence as f32 > chain.len() as f32 * 0.7 {
        insights.push("Steps were completed with a generally high confidence level");
    }

    if chain
        .iter()
        .any(|s| s.content.to_lowercase().contains("error"))
    {
        insights.push("Error handling could be improved");
    }

    if chain.len() > 5 {
        insights.push("A multi-step approach works well for complex queries");
    }

    let insights = if insights.is_empty() {
        "The process went as expected".to_string()
    } else {
        insights.join("; ")
    };

    Reflection {
        insights,
        pattern_key: format!("query_type_{}_words", query.split_whitespace().count()),
        observation: QueryObservation {
            query_length: query.chars().count(),
            steps_taken: chain.len(),
            success: chain
                .iter()
                .any(|s| s.content.to_lowercase().contains("success")),
            timestamp: Utc::now(),
        },
        confidence: 0.75,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReasoningStep;

    fn execution(success: bool, confidence: f32, answer: &str) -> ExecutionResult {
        ExecutionResult {
            steps: vec![],
            answer: answer.to_string(),
            success,
            summary: String::new(),
            confidence,
        }
    }

    #[test]
    fn test_evaluation_of_successful_run() {
        let eval = critical_evaluation(&execution(true, 0.8, "done"));
        assert_eq!(
            eval.assessment,
            "✓ Plan executed successfully; ✓ A concrete answer was produced; ✓ High confidence level"
        );
        assert!(!eval.needs_improvement);
        assert_eq!(eval.confidence, 0.85);
    }

    #[test]
    fn test_evaluation_of_failed_run() {
        let eval = critical_evaluation(&execution(false, 0.4, ""));
        assert!(eval.assessment.contains("⚠ Problems occurred"));
        assert!(eval.assessment.contains("⚠ The answer remained vague"));
        assert!(eval.assessment.contains("⚠ Low confidence level"));
        assert!(eval.needs_improvement);
    }

    #[test]
    fn test_evaluation_medium_band() {
        let eval = critical_evaluation(&execution(true, 0.55, "ok"));
        assert!(eval.assessment.contains("◐ Medium confidence level"));
        assert!(eval.needs_improvement);
    }

    #[test]
    fn test_reflection_default_insight_and_key() {
        let chain = vec![ThinkingStep::new(ReasoningStep::Analysis, "looked", 0.5)];
        let reflection = reflect(&chain, "two words");
        assert_eq!(reflection.insights, "The process went as expected");
        assert_eq!(reflection.pattern_key, "query_type_2_words");
        assert_eq!(reflection.observation.steps_taken, 1);
        assert!(!reflection.observation.success);
    }

    #[test]
    fn test_reflection_insights() {
        let chain = vec![
            ThinkingStep::new(ReasoningStep::Analysis, "fine", 0.85),
            ThinkingStep::new(ReasoningStep::Planning, "fine", 0.9),
            ThinkingStep::new(ReasoningStep::Execution, "finished with errors", 0.4),
            ThinkingStep::new(ReasoningStep::Evaluation, "executed successfully", 0.85),
        ];
        let reflection = reflect(&chain, "q");
        assert!(reflection.insights.contains("high confidence"));
        assert!(reflection.insights.contains("Error handling"));
        assert!(reflection.observation.success);
    }
}
