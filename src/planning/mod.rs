//! Agentic planning: objective analysis, strategic plans and risk assessment.

pub mod goals;

pub use goals::GoalBook;

use crate::types::{Complexity, TimeHorizon};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Low,
    High,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Low => "low",
            Impact::High => "high",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveAnalysis {
    pub interpretation: String,
    pub complexity: Complexity,
    pub time_horizon: TimeHorizon,
    pub estimated_days: u32,
    pub constraint_impact: Impact,
}

impl ObjectiveAnalysis {
    pub fn estimated_duration(&self) -> String {
        if self.estimated_days == 1 {
            "1 day".to_string()
        } else {
            format!("{} days", self.estimated_days)
        }
    }
}

pub fn analyze_objective(
    objective: &str,
    constraints: &[String],
    horizon: &TimeHorizon,
) -> ObjectiveAnalysis {
    let words = objective.split_whitespace().count();

    let complexity = if words > 20 || constraints.len() > 3 {
        Complexity::Complex
    } else if words > 10 || constraints.len() > 1 {
        Complexity::Moderate
    } else {
        Complexity::Simple
    };

    let base_days = match complexity {
        Complexity::Simple => 1,
        Complexity::Moderate => 3,
        Complexity::Complex => 7,
    };

    ObjectiveAnalysis {
        interpretation: format!(
            "Objective analysis complete: {} level, {} term",
            complexity, horizon
        ),
        complexity,
        time_horizon: horizon.clone(),
        estimated_days: base_days * horizon.multiplier(),
        constraint_impact: if constraints.len() > 2 {
            Impact::High
        } else {
            Impact::Low
        },
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum StepDuration {
    Days(f32),
    DayRange(u32, u32),
    Continuous,
}

impl fmt::Display for StepDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepDuration::Days(days) if (*days - 1.0).abs() < f32::EPSILON => f.write_str("1 day"),
            StepDuration::Days(days) => write!(f, "{} days", days),
            StepDuration::DayRange(from, to) => write!(f, "{}-{} days", from, to),
            StepDuration::Continuous => f.write_str("continuous"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanStep {
    pub title: String,
    pub description: String,
    pub duration: StepDuration,
    pub priority: Priority,
}

impl PlanStep {
    fn new(title: &str, description: &str, duration: StepDuration, priority: Priority) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            duration,
            priority,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategicPlan {
    pub main_steps: Vec<PlanStep>,
    pub progress_metrics: Vec<String>,
    pub checkpoints: Vec<String>,
    pub adaptation_triggers: Vec<String>,
}

pub fn create_strategic_plan(analysis: &ObjectiveAnalysis) -> StrategicPlan {
    use StepDuration::*;

    let main_steps = match analysis.complexity {
        Complexity::Complex => vec![
            PlanStep::new(
                "Detailed Planning",
                "Thorough analysis and definition of sub-goals",
                Days(2.0),
                Priority::High,
            ),
            PlanStep::new(
                "Resource Gathering",
                "Collect the required tools and information",
                Days(1.0),
                Priority::High,
            ),
            PlanStep::new(
                "Step-by-Step Execution",
                "Carry out the plan systematically",
                DayRange(3, 5),
                Priority::Critical,
            ),
            PlanStep::new(
                "Monitoring and Adaptation",
                "Track progress and apply corrections",
                Continuous,
                Priority::Medium,
            ),
        ],
        Complexity::Moderate => vec![
            PlanStep::new(
                "Preparation",
                "Basic planning and resource identification",
                Days(1.0),
                Priority::High,
            ),
            PlanStep::new(
                "Execution",
                "Achieve the main objective",
                Days(2.0),
                Priority::Critical,
            ),
            PlanStep::new(
                "Evaluation",
                "Check the results",
                Days(0.5),
                Priority::Medium,
            ),
        ],
        Complexity::Simple => vec![
            PlanStep::new(
                "Direct Execution",
                "Achieve the objective directly",
                Days(1.0),
                Priority::Critical,
            ),
            PlanStep::new(
                "Verification",
                "Check the outcome",
                Days(0.2),
                Priority::Low,
            ),
        ],
    };

    StrategicPlan {
        main_steps,
        progress_metrics: to_strings(&[
            "Percentage of completed steps",
            "Quality score",
            "Schedule adherence",
        ]),
        checkpoints: to_strings(&["After every step", "Major milestones"]),
        adaptation_triggers: to_strings(&[
            "Unexpected obstacles",
            "Resource changes",
            "Priority shifts",
        ]),
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Risk {
    pub kind: String,
    pub description: String,
    pub probability: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub summary: String,
    pub risks: Vec<Risk>,
    pub overall_level: RiskLevel,
}

pub fn assess_risks(plan: &StrategicPlan) -> RiskAssessment {
    let mut risks = Vec::new();

    if plan.main_steps.len() > 3 {
        risks.push(Risk {
            kind: "Complexity Risk".to_string(),
            description: "A multi-step plan can make coordination difficult".to_string(),
            probability: 0.3,
        });
    }

    if plan
        .main_steps
        .iter()
        .any(|s| s.priority == Priority::Critical)
    {
        risks.push(Risk {
            kind: "Critical Point Risk".to_string(),
            description: "A setback in a critical step can affect the whole plan".to_string(),
            probability: 0.4,
        });
    }

    if plan
        .main_steps
        .iter()
        .any(|s| s.duration == StepDuration::Continuous)
    {
        risks.push(Risk {
            kind: "Continuous Monitoring Risk".to_string(),
            description: "Long-term monitoring requirements can drain resources".to_string(),
            probability: 0.2,
        });
    }

    RiskAssessment {
        summary: format!("{} main risk categories identified", risks.len()),
        overall_level: if risks.len() > 1 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        },
        risks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraints(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("constraint {}", i)).collect()
    }

    #[test]
    fn test_objective_complexity_and_duration() {
        let analysis = analyze_objective(
            "Web sitesi performansını iyileştir",
            &constraints(2),
            &TimeHorizon::Medium,
        );
        assert_eq!(analysis.complexity, Complexity::Moderate);
        assert_eq!(analysis.estimated_days, 9);
        assert_eq!(analysis.estimated_duration(), "9 days");
        assert_eq!(analysis.constraint_impact, Impact::Low);

        let analysis = analyze_objective("x", &constraints(4), &TimeHorizon::Long);
        assert_eq!(analysis.complexity, Complexity::Complex);
        assert_eq!(analysis.estimated_days, 70);
        assert_eq!(analysis.constraint_impact, Impact::High);
    }

    #[test]
    fn test_unrecognized_horizon_weighs_like_short() {
        let horizon = TimeHorizon::parse("invalid");
        let analysis = analyze_objective("", &[], &horizon);
        assert_eq!(analysis.complexity, Complexity::Simple);
        assert_eq!(analysis.estimated_duration(), "1 day");
        assert!(analysis.interpretation.contains("invalid term"));
    }

    #[test]
    fn test_plan_steps_by_complexity() {
        let simple = create_strategic_plan(&analyze_objective("x", &[], &TimeHorizon::Short));
        assert_eq!(simple.main_steps.len(), 2);
        assert_eq!(simple.main_steps[1].duration.to_string(), "0.2 days");

        let complex =
            create_strategic_plan(&analyze_objective("x", &constraints(5), &TimeHorizon::Short));
        assert_eq!(complex.main_steps.len(), 4);
        assert_eq!(complex.main_steps[2].duration.to_string(), "3-5 days");
        assert_eq!(complex.main_steps[3].duration.to_string(), "continuous");
        assert_eq!(complex.progress_metrics.len(), 3);
    }

    #[test]
    fn test_risks_for_complex_plan() {
        let plan =
            create_strategic_plan(&analyze_objective("x", &constraints(5), &TimeHorizon::Short));
        let risks = assess_risks(&plan);
        assert_eq!(risks.risks.len(), 3);
        assert_eq!(risks.overall_level, RiskLevel::Medium);
        assert_eq!(risks.summary, "3 main risk categories identified");
        assert_eq!(risks.risks[1].probability, 0.4);
    }

    #[test]
    fn test_risks_for_simple_plan() {
        let plan = create_strategic_plan(&analyze_objective("x", &[], &TimeHorizon::Short));
        let risks = assess_risks(&plan);
        assert_eq!(risks.risks.len(), 1);
        assert_eq!(risks.risks[0].kind, "Critical Point Risk");
        assert_eq!(risks.overall_level, RiskLevel::Low);
    }
}
