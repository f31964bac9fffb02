//! Agent Core
//!
//! Owns the thinking history, tool capabilities, learned patterns and goals,
//! and drives the reasoning, tool, planning and adaptation pipelines.

use crate::adaptation::{
    analyze_context, develop_strategies, learning_recommendations, AdaptationStrategies,
    ContextAnalysis, LearningPlan,
};
use crate::config::AppConfig;
use crate::persistence::{AgentSnapshot, ToolEffectiveness};
use crate::planning::{
    analyze_objective, assess_risks, create_strategic_plan, GoalBook, ObjectiveAnalysis,
    RiskAssessment, StrategicPlan,
};
use crate::reasoning::{
    analyze_query, create_execution_plan, critical_evaluation, execute_plan,
    format_thinking_process, overall_confidence, reflect, ReasoningOutcome,
};
use crate::report::join_or_none;
use crate::tools::{
    identify_suitable_tools, task_arguments, ApiDescriptor, CandidateSource, ExternalApiTool,
    Tool, ToolCandidate, ToolRegistry,
};
use crate::types::{
    AgentError, AgentGoal, LearnedPattern, PatternStore, QueryObservation, ReasoningStep,
    Result, ThinkingStep, TimeHorizon, ToolCapability, ToolUsagePattern,
};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of a single tool call made while working on a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRecord {
    pub tool: String,
    pub source: CandidateSource,
    pub success: bool,
    pub output: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolUsageOutcome {
    pub calls: Vec<ToolCallRecord>,
    pub summary: String,
    pub success_rate: f32,
    /// Number of patterns learned by this run (0 or 1)
    pub new_patterns: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningOutcome {
    pub objective: String,
    pub analysis: ObjectiveAnalysis,
    pub plan: StrategicPlan,
    pub risks: RiskAssessment,
    /// Id of the goal registered for this objective, if goal tracking is on
    pub goal_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptationOutcome {
    pub analysis: ContextAnalysis,
    pub strategies: AdaptationStrategies,
    pub learning: LearningPlan,
}

/// Counters shown by the plugin info report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentStatus {
    pub learned_patterns: usize,
    pub tools: usize,
    pub thinking_steps: usize,
    pub active_goals: usize,
}

/// Settings for one chain-of-thought run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinkingOptions {
    pub depth: u8,
    pub critical_thinking: bool,
}

impl ThinkingOptions {
    /// Depth is clamped to 1..=5.
    pub fn new(depth: i64, critical_thinking: bool) -> Self {
        Self {
            depth: depth.clamp(1, 5) as u8,
            critical_thinking,
        }
    }
}

impl Default for ThinkingOptions {
    fn default() -> Self {
        Self::new(3, true)
    }
}

/// A tool call resolved against the registry, ready to run without the agent.
pub struct ToolJob {
    name: String,
    source: CandidateSource,
    tool: Option<Arc<dyn Tool>>,
    args: Value,
}

/// Heuristic reasoning agent
pub struct EnhancedAgent {
    config: AppConfig,
    /// Most recent steps, bounded by `learning.max_thinking_history`
    thinking_history: VecDeque<ThinkingStep>,
    goals: GoalBook,
    available_tools: BTreeMap<String, ToolCapability>,
    registry: ToolRegistry,
    learned_patterns: PatternStore,
}

impl EnhancedAgent {
    pub fn new(config: AppConfig, registry: ToolRegistry) -> Self {
        let available_tools = registry.capabilities();
        Self {
            config,
            thinking_history: VecDeque::new(),
            goals: GoalBook::new(),
            available_tools,
            registry,
            learned_patterns: PatternStore::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Configured settings, used when a caller leaves them unset.
    pub fn default_thinking(&self) -> ThinkingOptions {
        ThinkingOptions::new(
            i64::from(self.config.reasoning.default_depth),
            self.config.reasoning.enable_critical_thinking,
        )
    }

    pub fn thinking_history(&self) -> &VecDeque<ThinkingStep> {
        &self.thinking_history
    }

    pub fn available_tools(&self) -> &BTreeMap<String, ToolCapability> {
        &self.available_tools
    }

    pub fn learned_patterns(&self) -> &PatternStore {
        &self.learned_patterns
    }

    pub fn goals(&self) -> &GoalBook {
        &self.goals
    }

    /// Register an extra tool; it becomes discoverable immediately.
    pub fn register_tool(&mut self, tool: Arc<dyn Tool>) {
        self.available_tools
            .insert(tool.name().to_string(), tool.capability());
        self.registry.register(tool);
    }

    /// Append a step to the thinking history and return it.
    pub fn add_thinking_step(
        &mut self,
        step: ReasoningStep,
        content: impl Into<String>,
        confidence: f32,
    ) -> ThinkingStep {
        let thinking = ThinkingStep::new(step, content, confidence);
        self.thinking_history.push_back(thinking.clone());

        let cap = self.config.learning.max_thinking_history;
        while self.thinking_history.len() > cap {
            self.thinking_history.pop_front();
        }

        debug!(step = %step, confidence, "Recorded thinking step");
        thinking
    }

    /// Run the full chain of thought for a query.
    pub fn chain_of_thought(&mut self, query: &str, options: ThinkingOptions) -> ReasoningOutcome {
        let mut chain = Vec::new();

        let analysis = analyze_query(query);
        chain.push(self.add_thinking_step(
            ReasoningStep::Analysis,
            format!(
                "Query analysis: {}. Key concepts: {}",
                analysis.interpretation,
                join_or_none(&analysis.key_concepts)
            ),
            analysis.confidence,
        ));

        let plan = create_execution_plan(&analysis);
        chain.push(self.add_thinking_step(
            ReasoningStep::Planning,
            format!(
                "Execution plan: {}. Required steps: {}",
                plan.strategy,
                join_or_none(&plan.steps)
            ),
            plan.confidence,
        ));

        let execution = execute_plan(&plan);
        chain.push(self.add_thinking_step(
            ReasoningStep::Execution,
            format!("Execution result: {}. {}", execution.summary, execution.answer),
            execution.confidence,
        ));

        if options.critical_thinking {
            let evaluation = critical_evaluation(&execution);
            chain.push(self.add_thinking_step(
                ReasoningStep::Evaluation,
                format!("Critical evaluation: {}", evaluation.assessment),
                evaluation.confidence,
            ));
        }

        let reflection = reflect(&chain, query);
        chain.push(self.add_thinking_step(
            ReasoningStep::Reflection,
            format!("Reflection: {}", reflection.insights),
            reflection.confidence,
        ));
        self.record_observation(reflection.pattern_key, reflection.observation);

        let confidence = overall_confidence(&chain);
        info!(
            steps = chain.len(),
            complexity = %analysis.complexity,
            depth = options.depth,
            "Chain of thought complete"
        );

        ReasoningOutcome {
            thinking_process: format_thinking_process(&chain),
            final_answer: execution.answer,
            confidence,
            chain,
        }
    }

    fn record_observation(&mut self, key: String, observation: QueryObservation) {
        if !self.config.learning.enable_pattern_learning {
            return;
        }

        let cap = self.config.learning.max_observations_per_pattern;
        let entry = self
            .learned_patterns
            .entry(key)
            .or_insert_with(|| LearnedPattern::Query {
                observations: Vec::new(),
            });

        match entry {
            LearnedPattern::Query { observations } => {
                observations.push(observation);
                if observations.len() > cap {
                    let excess = observations.len() - cap;
                    observations.drain(..excess);
                }
            }
            other => {
                *other = LearnedPattern::Query {
                    observations: vec![observation],
                }
            }
        }
    }

    /// Rank registered tools and the given external APIs for a task.
    pub fn identify_suitable_tools(
        &self,
        task: &str,
        apis: &[ApiDescriptor],
    ) -> Result<Vec<ToolCandidate>> {
        if !self.config.tools.enable_auto_discovery {
            return Err(AgentError::DiscoveryDisabled);
        }

        let candidates = identify_suitable_tools(
            task,
            &self.available_tools,
            apis,
            self.config.tools.max_suggestions,
        );
        debug!(count = candidates.len(), "Identified candidate tools");
        Ok(candidates)
    }

    /// Call every candidate concurrently and learn from the results.
    pub async fn use_tools(
        &mut self,
        task: &str,
        candidates: &[ToolCandidate],
        apis: &[ApiDescriptor],
    ) -> ToolUsageOutcome {
        let jobs = self.prepare_tool_calls(task, candidates, apis);
        let calls = run_tool_calls(jobs).await;
        self.record_tool_usage(task, calls)
    }

    /// Resolve candidates to callable tools with arguments built from the task.
    pub fn prepare_tool_calls(
        &self,
        task: &str,
        candidates: &[ToolCandidate],
        apis: &[ApiDescriptor],
    ) -> Vec<ToolJob> {
        candidates
            .iter()
            .map(|candidate| {
                let tool: Option<Arc<dyn Tool>> = match candidate.source {
                    CandidateSource::Registered => self.registry.get(&candidate.name),
                    CandidateSource::External => apis
                        .iter()
                        .find(|api| api.name == candidate.name)
                        .map(|api| Arc::new(ExternalApiTool::new(api.clone())) as Arc<dyn Tool>),
                };
                ToolJob {
                    name: candidate.name.clone(),
                    source: candidate.source,
                    tool,
                    args: task_arguments(&candidate.parameters, task),
                }
            })
            .collect()
    }

    /// Update tool effectiveness and learn a pattern from finished calls.
    pub fn record_tool_usage(
        &mut self,
        task: &str,
        calls: Vec<ToolCallRecord>,
    ) -> ToolUsageOutcome {
        for call in calls.iter().filter(|c| c.success) {
            if let Some(capability) = self.available_tools.get_mut(&call.tool) {
                capability.record_success();
            }
        }

        let successes = calls.iter().filter(|c| c.success).count();
        let success_rate = if calls.is_empty() {
            0.0
        } else {
            successes as f32 / calls.len() as f32
        };

        let mut new_patterns = 0;
        let key = format!("task_type_{}_words", task.split_whitespace().count());
        if self.config.learning.enable_pattern_learning && !self.learned_patterns.contains_key(&key)
        {
            self.learned_patterns.insert(
                key,
                LearnedPattern::ToolUsage(ToolUsagePattern {
                    successful_tools: calls
                        .iter()
                        .filter(|c| c.success)
                        .map(|c| c.tool.clone())
                        .collect(),
                    task_complexity: calls.len(),
                    success_rate,
                }),
            );
            new_patterns = 1;
        }

        info!(
            used = calls.len(),
            successes, new_patterns, "Tool usage complete"
        );

        ToolUsageOutcome {
            summary: format!("{}/{} tools used successfully", successes, calls.len()),
            calls,
            success_rate,
            new_patterns,
        }
    }

    /// Analyze an objective, build its plan and risk assessment, and track it as a goal.
    pub fn plan(
        &mut self,
        objective: &str,
        constraints: &[String],
        horizon: &TimeHorizon,
    ) -> PlanningOutcome {
        let analysis = analyze_objective(objective, constraints, horizon);
        let plan = create_strategic_plan(&analysis);
        let risks = assess_risks(&plan);

        let goal_id = if self.config.planning.track_goals {
            Some(self.goals.track(objective, &analysis, &plan).id.clone())
        } else {
            None
        };

        PlanningOutcome {
            objective: objective.to_string(),
            analysis,
            plan,
            risks,
            goal_id,
        }
    }

    pub fn update_goal_progress(&mut self, id: &str, progress: f32) -> Result<&AgentGoal> {
        self.goals.update_progress(id, progress)
    }

    pub fn abandon_goal(&mut self, id: &str) -> Result<()> {
        self.goals.abandon(id)
    }

    pub fn adapt(
        &self,
        context: &str,
        environmental_factors: &[String],
        adaptation_goals: &[String],
    ) -> AdaptationOutcome {
        let analysis = analyze_context(context, environmental_factors);
        let strategies = develop_strategies(&analysis, adaptation_goals);
        let learning = learning_recommendations(&analysis, &strategies);
        AdaptationOutcome {
            analysis,
            strategies,
            learning,
        }
    }

    pub fn status(&self) -> AgentStatus {
        AgentStatus {
            learned_patterns: self.learned_patterns.len(),
            tools: self.available_tools.len(),
            thinking_steps: self.thinking_history.len(),
            active_goals: self.goals.active().len(),
        }
    }

    /// Capture the state worth keeping between runs.
    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            learned_patterns: self.learned_patterns.clone(),
            tool_effectiveness: self
                .available_tools
                .iter()
                .map(|(name, cap)| {
                    (
                        name.clone(),
                        ToolEffectiveness {
                            score: cap.effectiveness_score,
                            last_used: cap.last_used,
                        },
                    )
                })
                .collect(),
            goals: self.goals.goals().to_vec(),
        }
    }

    /// Restore learned state. Effectiveness of tools that are no longer registered is dropped.
    pub fn restore(&mut self, snapshot: AgentSnapshot) {
        self.learned_patterns = snapshot.learned_patterns;
        for (name, effectiveness) in snapshot.tool_effectiveness {
            if let Some(capability) = self.available_tools.get_mut(&name) {
                capability.effectiveness_score = effectiveness.score.clamp(0.0, 1.0);
                capability.last_used = effectiveness.last_used;
            }
        }
        self.goals = GoalBook::from_goals(snapshot.goals);
    }
}

/// Run prepared calls concurrently. Needs no access to the agent.
pub async fn run_tool_calls(jobs: Vec<ToolJob>) -> Vec<ToolCallRecord> {
    let results = join_all(jobs.iter().map(|job| async move {
        match &job.tool {
            Some(tool) => tool.execute(job.args.clone()).await,
            None => Err(AgentError::ToolNotFound(job.name.clone()).into()),
        }
    }))
    .await;

    jobs.into_iter()
        .zip(results)
        .map(|(job, result)| match result {
            Ok(result) if result.success => ToolCallRecord {
                tool: job.name,
                source: job.source,
                success: true,
                output: Some(result.output),
                error: None,
            },
            Ok(result) => ToolCallRecord {
                tool: job.name,
                source: job.source,
                success: false,
                output: None,
                error: result.error,
            },
            Err(e) => {
                warn!(tool = %job.name, "Tool call failed: {:#}", e);
                ToolCallRecord {
                    tool: job.name,
                    source: job.source,
                    success: false,
                    output: None,
                    error: Some(format!("{:#}", e)),
                }
            }
        })
        .collect()
}
