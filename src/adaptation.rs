//! Real-world adaptation: reading a situation and proposing how to adapt.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContextPattern {
    Change,
    Problem,
    Opportunity,
}

impl ContextPattern {
    const ALL: [ContextPattern; 3] = [
        ContextPattern::Change,
        ContextPattern::Problem,
        ContextPattern::Opportunity,
    ];

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            ContextPattern::Change => &["değişim", "değişiklik", "change"],
            ContextPattern::Problem => &["problem", "sorun", "issue"],
            ContextPattern::Opportunity => &["fırsat", "gelişme", "opportunit", "growth"],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContextPattern::Change => "Change-driven situation",
            ContextPattern::Problem => "Situation requiring problem solving",
            ContextPattern::Opportunity => "Opportunity evaluation situation",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CriticalFactor {
    TimeConstraint,
    ResourceLimitation,
    CompetitiveEnvironment,
}

impl CriticalFactor {
    /// First category whose keywords appear in the factor text.
    fn classify(factor: &str) -> Option<CriticalFactor> {
        let lowered = factor.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| lowered.contains(w));

        if has(&["zaman", "time", "deadline"]) {
            Some(CriticalFactor::TimeConstraint)
        } else if has(&["kaynak", "resource", "budget"]) {
            Some(CriticalFactor::ResourceLimitation)
        } else if has(&["rekabet", "competit"]) {
            Some(CriticalFactor::CompetitiveEnvironment)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CriticalFactor::TimeConstraint => "Time constraint",
            CriticalFactor::ResourceLimitation => "Resource limitation",
            CriticalFactor::CompetitiveEnvironment => "Competitive environment",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextAnalysis {
    pub interpretation: String,
    pub patterns: Vec<ContextPattern>,
    pub critical_factors: Vec<CriticalFactor>,
}

pub fn analyze_context(context: &str, environmental_factors: &[String]) -> ContextAnalysis {
    let lowered = context.to_lowercase();
    let patterns: Vec<ContextPattern> = ContextPattern::ALL
        .into_iter()
        .filter(|p| p.keywords().iter().any(|k| lowered.contains(k)))
        .collect();

    let mut critical_factors = Vec::new();
    for factor in environmental_factors.iter().filter_map(|f| CriticalFactor::classify(f)) {
        if !critical_factors.contains(&factor) {
            critical_factors.push(factor);
        }
    }

    ContextAnalysis {
        interpretation: format!(
            "Context analysis: {} main patterns, {} critical factors",
            patterns.len(),
            critical_factors.len()
        ),
        patterns,
        critical_factors,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Approach {
    pub name: String,
    pub description: String,
    pub implementation: String,
    pub expected_benefit: String,
    pub risk_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptationStrategies {
    pub approaches: Vec<Approach>,
    pub goals: Vec<String>,
    pub short_term_metrics: Vec<String>,
    pub long_term_metrics: Vec<String>,
}

fn approach_for(pattern: ContextPattern) -> Approach {
    let (name, description, implementation, benefit, risk) = match pattern {
        ContextPattern::Change => (
            "Flexible Adaptation",
            "Respond quickly to changing conditions",
            "Continuous adjustment through a modular approach",
            "Fast reaction to change",
            "medium",
        ),
        ContextPattern::Problem => (
            "Systematic Problem Solving",
            "Step-by-step problem analysis and resolution",
            "Root-cause analysis and iterative fixes",
            "Lasting solutions",
            "low",
        ),
        ContextPattern::Opportunity => (
            "Proactive Opportunity Evaluation",
            "Spot and evaluate opportunities early",
            "Continuous scanning and rapid assessment",
            "Competitive advantage",
            "medium-high",
        ),
    };

    Approach {
        name: name.to_string(),
        description: description.to_string(),
        implementation: implementation.to_string(),
        expected_benefit: benefit.to_string(),
        risk_level: risk.to_string(),
    }
}

pub fn develop_strategies(analysis: &ContextAnalysis, goals: &[String]) -> AdaptationStrategies {
    AdaptationStrategies {
        approaches: analysis.patterns.iter().copied().map(approach_for).collect(),
        goals: goals.to_vec(),
        short_term_metrics: vec![
            "Speed of adaptation".to_string(),
            "First results".to_string(),
            "Resource usage".to_string(),
        ],
        long_term_metrics: vec![
            "Sustainability".to_string(),
            "Learning rate".to_string(),
            "Performance improvement".to_string(),
        ],
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningPlan {
    pub recommendations: Vec<Recommendation>,
    pub observation_strategy: String,
    pub analysis_method: String,
    pub implementation_approach: String,
    pub evaluation_criteria: String,
    pub learning_speed_indicators: Vec<String>,
}

pub fn learning_recommendations(
    analysis: &ContextAnalysis,
    strategies: &AdaptationStrategies,
) -> LearningPlan {
    let mut recommendations = Vec::new();

    if !analysis.critical_factors.is_empty() {
        recommendations.push(Recommendation {
            category: "Critical Factor Management".to_string(),
            suggestion: "Set up dedicated monitoring for the identified critical factors"
                .to_string(),
        });
    }

    if strategies.approaches.len() > 2 {
        recommendations.push(Recommendation {
            category: "Strategy Diversity".to_string(),
            suggestion: "Test and evaluate the strategies in parallel".to_string(),
        });
    }

    recommendations.push(Recommendation {
        category: "Continuous Improvement".to_string(),
        suggestion: "Run regular feedback loops and track performance metrics".to_string(),
    });

    LearningPlan {
        recommendations,
        observation_strategy: "Systematic data collection and trend analysis".to_string(),
        analysis_method: "Statistical evaluation and pattern recognition".to_string(),
        implementation_approach: "Incremental rollout and A/B testing".to_string(),
        evaluation_criteria: "Objective metrics and subjective assessments".to_string(),
        learning_speed_indicators: vec![
            "Speed of recognizing new patterns".to_string(),
            "Adaptation time".to_string(),
            "Error reduction rate".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_context_patterns_and_factors() {
        let analysis = analyze_context(
            "Uzaktan çalışma ortamında ekip yönetimi sorunları ve hızlı değişim",
            &strings(&["Zaman farkları", "İletişim zorlukları", "Tight deadline"]),
        );

        assert_eq!(
            analysis.patterns,
            vec![ContextPattern::Change, ContextPattern::Problem]
        );
        // Both time-related factors collapse into one
        assert_eq!(analysis.critical_factors, vec![CriticalFactor::TimeConstraint]);
        assert_eq!(
            analysis.interpretation,
            "Context analysis: 2 main patterns, 1 critical factors"
        );
    }

    #[test]
    fn test_factor_uses_first_matching_category() {
        assert_eq!(
            CriticalFactor::classify("time and budget"),
            Some(CriticalFactor::TimeConstraint)
        );
        assert_eq!(
            CriticalFactor::classify("Rekabet yoğun"),
            Some(CriticalFactor::CompetitiveEnvironment)
        );
        assert_eq!(CriticalFactor::classify("weather"), None);
    }

    #[test]
    fn test_strategies_follow_patterns() {
        let analysis = analyze_context("change, problem and growth opportunity", &[]);
        let strategies = develop_strategies(&analysis, &strings(&["Team cohesion"]));

        assert_eq!(strategies.approaches.len(), 3);
        assert_eq!(strategies.approaches[0].name, "Flexible Adaptation");
        assert_eq!(strategies.approaches[2].risk_level, "medium-high");
        assert_eq!(strategies.goals, vec!["Team cohesion"]);

        let plan = learning_recommendations(&analysis, &strategies);
        let categories: Vec<_> = plan
            .recommendations
            .iter()
            .map(|r| r.category.as_str())
            .collect();
        assert_eq!(categories, vec!["Strategy Diversity", "Continuous Improvement"]);
    }

    #[test]
    fn test_empty_context() {
        let analysis = analyze_context("", &[]);
        assert!(analysis.patterns.is_empty());
        let strategies = develop_strategies(&analysis, &[]);
        assert!(strategies.approaches.is_empty());
        let plan = learning_recommendations(&analysis, &strategies);
        assert_eq!(plan.recommendations.len(), 1);
    }
}
