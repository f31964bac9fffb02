//! Markdown rendering for the facade's reports.

use crate::agent::{AdaptationOutcome, AgentStatus, PlanningOutcome, ToolUsageOutcome};
use crate::reasoning::ReasoningOutcome;
use crate::tools::ToolCandidate;
use crate::types::AgentGoal;
use std::fmt::Write;

/// Format a 0..1 ratio as a percentage with one decimal.
pub fn percent(ratio: f32) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Collapse whitespace runs, line breaks included, so caller text stays on one line.
pub fn inline(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn join_or_none<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = items
        .into_iter()
        .map(|s| inline(s.as_ref()))
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        "none".to_string()
    } else {
        joined
    }
}

pub fn error_report(context: &str, error: impl std::fmt::Display) -> String {
    format!("❌ {}: {}", context, error)
}

pub fn thinking_report(outcome: &ReasoningOutcome) -> String {
    let mut out = String::from("# 🧠 Enhanced Thinking Response\n\n");
    let _ = writeln!(out, "## 📝 Summary\n{}\n", outcome.final_answer);
    let _ = writeln!(
        out,
        "**Overall Confidence:** {}\n",
        percent(outcome.confidence)
    );
    let _ = writeln!(out, "## 🔄 Thinking Process\n{}", outcome.thinking_process);
    out.push_str("## 📊 Detailed Analysis\n");

    for (i, step) in outcome.chain.iter().enumerate() {
        let _ = write!(
            out,
            "\n### Step {}: {}\n- **Content:** {}\n- **Confidence:** {}\n- **Time:** {}\n",
            i + 1,
            step.step.title(),
            step.content,
            percent(step.confidence),
            step.timestamp.to_rfc3339()
        );
    }

    out
}

pub fn tools_report(task: &str, candidates: &[ToolCandidate], usage: &ToolUsageOutcome) -> String {
    let mut out = String::from("# 🛠️ Intelligent Tool Usage\n\n");
    let _ = writeln!(out, "## 📋 Task\n{}\n", inline(task));
    out.push_str("## 🔧 Selected Tools\n");

    if candidates.is_empty() {
        out.push_str("- No suitable tools found\n");
    }
    for candidate in candidates {
        let _ = writeln!(
            out,
            "- **{}**: {}",
            inline(&candidate.name),
            inline(&candidate.description)
        );
    }

    let _ = write!(out, "\n## ⚡ Usage Results\n{}\n", usage.summary);
    for call in usage.calls.iter().filter(|c| !c.success) {
        let _ = writeln!(
            out,
            "- ⚠ `{}`: {}",
            inline(&call.tool),
            inline(call.error.as_deref().unwrap_or("unknown error"))
        );
    }

    let _ = write!(
        out,
        "\n## 📊 Performance\n- **Tools Used:** {}\n- **Success Rate:** {}\n- **New Patterns Learned:** {}\n",
        candidates.len(),
        percent(usage.success_rate),
        usage.new_patterns
    );

    out
}

pub fn planning_report(outcome: &PlanningOutcome) -> String {
    let analysis = &outcome.analysis;
    let mut out = String::from("# 🎯 Agentic Planning Response\n\n");
    let _ = write!(
        out,
        "## 🎪 Objective Analysis\n{}\n\n**Complexity Level:** {}\n**Estimated Duration:** {}\n",
        inline(&analysis.interpretation),
        analysis.complexity,
        analysis.estimated_duration()
    );
    if let Some(id) = &outcome.goal_id {
        let _ = writeln!(out, "**Tracked Goal:** `{}`", id);
    }

    out.push_str("\n## 📋 Strategic Plan\n\n### Main Steps:\n");
    for (i, step) in outcome.plan.main_steps.iter().enumerate() {
        let _ = write!(
            out,
            "{}. {}\n   - {}\n   - Duration: {}\n   - Priority: {}\n\n",
            i + 1,
            step.title,
            step.description,
            step.duration,
            step.priority.as_str()
        );
    }

    let _ = write!(
        out,
        "\n## ⚠️ Risk Analysis\n{}\n\n### Identified Risks:\n",
        outcome.risks.summary
    );
    if outcome.risks.risks.is_empty() {
        out.push_str("- No significant risks identified\n");
    }
    for risk in &outcome.risks.risks {
        let _ = writeln!(
            out,
            "- **{}**: {} (Probability: {})",
            risk.kind,
            risk.description,
            percent(risk.probability)
        );
    }

    let plan = &outcome.plan;
    let _ = write!(
        out,
        "\n## 🔄 Monitoring and Adaptation Strategy\n- **Progress Metrics:** {}\n- **Checkpoints:** {}\n- **Adaptation Triggers:** {}\n",
        join_or_none(&plan.progress_metrics),
        join_or_none(&plan.checkpoints),
        join_or_none(&plan.adaptation_triggers)
    );

    out
}

pub fn adaptation_report(outcome: &AdaptationOutcome) -> String {
    let AdaptationOutcome {
        analysis,
        strategies,
        learning,
    } = outcome;

    let mut out = String::from("# 🌍 Real-World Adaptation Analysis\n\n");
    let _ = write!(
        out,
        "## 🔍 Context Analysis\n{}\n\n**Identified Patterns:** {}\n**Critical Factors:** {}\n",
        analysis.interpretation,
        join_or_none(analysis.patterns.iter().map(|p| p.label())),
        join_or_none(analysis.critical_factors.iter().map(|f| f.label()))
    );

    out.push_str("\n## 🎯 Adaptation Strategies\n\n### Recommended Approaches:\n");
    if strategies.approaches.is_empty() {
        out.push_str("- No specific pattern detected; continue with the current approach\n");
    }
    for (i, approach) in strategies.approaches.iter().enumerate() {
        let _ = write!(
            out,
            "\n#### {}. {}\n- **Description:** {}\n- **Implementation:** {}\n- **Expected Benefit:** {}\n- **Risk Level:** {}\n",
            i + 1,
            approach.name,
            approach.description,
            approach.implementation,
            approach.expected_benefit,
            approach.risk_level
        );
    }

    out.push_str("\n## 📚 Learning and Improvement\n\n### Recommendations:\n");
    for rec in &learning.recommendations {
        let _ = writeln!(out, "- **{}**: {}", rec.category, rec.suggestion);
    }

    let _ = write!(
        out,
        "\n### Continuous Improvement Cycle:\n1. **Observe:** {}\n2. **Analyze:** {}\n3. **Apply:** {}\n4. **Evaluate:** {}\n",
        learning.observation_strategy,
        learning.analysis_method,
        learning.implementation_approach,
        learning.evaluation_criteria
    );

    let _ = write!(
        out,
        "\n## 📊 Adaptation Success Metrics\n- **Adaptation Goals:** {}\n- **Short-Term Targets:** {}\n- **Long-Term Targets:** {}\n- **Learning Speed Indicators:** {}\n",
        join_or_none(&strategies.goals),
        join_or_none(&strategies.short_term_metrics),
        join_or_none(&strategies.long_term_metrics),
        join_or_none(&learning.learning_speed_indicators)
    );

    out
}

pub fn goals_report(goals: &[&AgentGoal]) -> String {
    let mut out = String::from("# 🎯 Active Goals\n\n");
    if goals.is_empty() {
        out.push_str("No active goals.\n");
        return out;
    }

    for goal in goals {
        let deadline = goal
            .deadline
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "none".to_string());
        let _ = write!(
            out,
            "## {}\n- **Id:** `{}`\n- **Priority:** {}\n- **Status:** {}\n- **Progress:** {}\n- **Deadline:** {}\n- **Sub-goals:** {}\n\n",
            inline(&goal.description),
            goal.id,
            goal.priority,
            goal.status.as_str(),
            percent(goal.progress),
            deadline,
            join_or_none(&goal.sub_goals)
        );
    }

    out
}

pub fn plugin_info(status: &AgentStatus) -> String {
    format!(
        "# 🧠 Enhanced Agent Plugin\n\n\
         ## 📋 Features\n\
         - **Chain-of-Thought Reasoning**: step-by-step analysis with confidence tracking\n\
         - **Dynamic Tool Discovery**: find and use the right tools for a task\n\
         - **Critical Thinking**: self-assessment of every reasoning run\n\
         - **Agentic Planning**: long-horizon plans and goal tracking\n\
         - **Real-World Adaptation**: context-aware strategies\n\n\
         ## 🛠️ Available Functions\n\
         1. `enhanced_thinking()` - advanced thinking and analysis\n\
         2. `discover_and_use_tools()` - dynamic tool usage\n\
         3. `agentic_planning()` - strategic planning\n\
         4. `real_world_adaptation()` - real-world adaptation\n\n\
         ## 📊 Status\n\
         - **Agent Status**: Active\n\
         - **Learned Patterns**: {}\n\
         - **Available Tools**: {}\n\
         - **Thinking History**: {} steps\n\
         - **Active Goals**: {}\n",
        status.learned_patterns, status.tools, status.thinking_steps, status.active_goals
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{EnhancedAgent, ThinkingOptions};
    use crate::config::AppConfig;
    use crate::tools::ToolRegistry;
    use crate::types::TimeHorizon;

    fn agent() -> EnhancedAgent {
        EnhancedAgent::new(AppConfig::default(), ToolRegistry::with_builtins())
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.853), "85.3%");
        assert_eq!(percent(0.0), "0.0%");
        assert_eq!(percent(1.0), "100.0%");
    }

    #[test]
    fn test_thinking_report_sections() {
        let outcome = agent().chain_of_thought("Why is the sky blue?", ThinkingOptions::default());
        let report = thinking_report(&outcome);

        let summary = report.find("## 📝 Summary").unwrap();
        let process = report.find("## 🔄 Thinking Process").unwrap();
        let detail = report.find("## 📊 Detailed Analysis").unwrap();
        assert!(summary < process && process < detail);
        assert!(report.contains("### Step 1: Analysis"));
        assert!(report.contains("### Step 5: Reflection"));
    }

    #[test]
    fn test_planning_report_lists_risks() {
        let constraints: Vec<String> = (0..4).map(|i| format!("constraint {}", i)).collect();
        let outcome = agent().plan("Rebuild the platform", &constraints, &TimeHorizon::Long);
        let report = planning_report(&outcome);

        assert!(report.contains("**Complexity Level:** complex"));
        assert!(report.contains("**Estimated Duration:** 70 days"));
        assert!(report.contains("### Main Steps:"));
        assert!(report.contains("(Probability: 30.0%)"));
        assert!(report.contains("## 🔄 Monitoring and Adaptation Strategy"));
    }

    #[test]
    fn test_adaptation_report_echoes_goals() {
        let goals = vec!["Keep the team aligned".to_string()];
        let outcome = agent().adapt("A sudden change in the market", &[], &goals);
        let report = adaptation_report(&outcome);

        assert!(report.contains("#### 1. Flexible Adaptation"));
        assert!(report.contains("**Critical Factors:** none"));
        assert!(report.contains("**Adaptation Goals:** Keep the team aligned"));
    }

    #[test]
    fn test_plugin_info_counts() {
        let info = plugin_info(&AgentStatus {
            learned_patterns: 2,
            tools: 3,
            thinking_steps: 10,
            active_goals: 1,
        });
        assert!(info.contains("**Learned Patterns**: 2"));
        assert!(info.contains("**Available Tools**: 3"));
        assert!(info.contains("**Thinking History**: 10 steps"));
    }

    #[tokio::test]
    async fn test_caller_text_cannot_open_blocks() {
        let mut agent = agent();
        let task = "search x\n# injected\n- fake bullet";
        let candidates = agent.identify_suitable_tools(task, &[]).unwrap();
        let usage = agent.use_tools(task, &candidates, &[]).await;
        let report = tools_report(task, &candidates, &usage);

        assert!(report.contains("search x # injected - fake bullet"));
        assert!(!report.lines().any(|line| line.starts_with("# injected")));
        assert!(!report.lines().any(|line| line == "- fake bullet"));

        let outcome = agent.plan("Ship\n## Owned", &[], &TimeHorizon::parse("soon\n# x"));
        let goal = &agent.goals().goals()[0];
        let goals = goals_report(&[goal]);
        assert!(goals.starts_with("# 🎯 Active Goals\n\n## Ship ## Owned\n"));

        let planning = planning_report(&outcome);
        assert!(planning.contains("soon # x term"));
        assert!(!planning.lines().any(|line| line.starts_with("# x")));
    }

    #[test]
    fn test_goals_report_empty() {
        assert!(goals_report(&[]).contains("No active goals."));
    }
}
