//! Goal bookkeeping for planned objectives.

use super::{ObjectiveAnalysis, StrategicPlan};
use crate::types::{AgentError, AgentGoal, Complexity, GoalStatus, Result};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalBook {
    goals: Vec<AgentGoal>,
}

impl GoalBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_goals(goals: Vec<AgentGoal>) -> Self {
        Self { goals }
    }

    /// Register a goal for a planned objective. Sub-goals are the plan's step titles.
    pub fn track(
        &mut self,
        objective: &str,
        analysis: &ObjectiveAnalysis,
        plan: &StrategicPlan,
    ) -> &AgentGoal {
        let priority = match analysis.complexity {
            Complexity::Simple => 1,
            Complexity::Moderate => 2,
            Complexity::Complex => 3,
        };

        let goal = AgentGoal::new(objective, priority)
            .with_deadline(Utc::now() + Duration::days(analysis.estimated_days as i64))
            .with_sub_goals(plan.main_steps.iter().map(|s| s.title.clone()).collect());

        info!(goal_id = %goal.id, priority, "Tracking new goal");
        self.goals.push(goal);
        &self.goals[self.goals.len() - 1]
    }

    pub fn goals(&self) -> &[AgentGoal] {
        &self.goals
    }

    pub fn get(&self, id: &str) -> Option<&AgentGoal> {
        self.goals.iter().find(|g| g.id == id)
    }

    /// Goals that are neither completed nor abandoned, most urgent first.
    pub fn active(&self) -> Vec<&AgentGoal> {
        let mut active: Vec<&AgentGoal> = self
            .goals
            .iter()
            .filter(|g| matches!(g.status, GoalStatus::Pending | GoalStatus::InProgress))
            .collect();
        active.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.deadline.cmp(&b.deadline)));
        active
    }

    pub fn update_progress(&mut self, id: &str, progress: f32) -> Result<&AgentGoal> {
        let goal = self
            .goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| AgentError::GoalNotFound(id.to_string()))?;
        goal.set_progress(progress);
        Ok(goal)
    }

    pub fn abandon(&mut self, id: &str) -> Result<()> {
        let goal = self
            .goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| AgentError::GoalNotFound(id.to_string()))?;
        goal.status = GoalStatus::Abandoned;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::{analyze_objective, create_strategic_plan};
    use crate::types::TimeHorizon;

    fn tracked(book: &mut GoalBook, objective: &str, constraints: usize) -> String {
        let constraints: Vec<String> = (0..constraints).map(|i| i.to_string()).collect();
        let analysis = analyze_objective(objective, &constraints, &TimeHorizon::Short);
        let plan = create_strategic_plan(&analysis);
        book.track(objective, &analysis, &plan).id.clone()
    }

    #[test]
    fn test_track_sets_sub_goals_and_deadline() {
        let mut book = GoalBook::new();
        let id = tracked(&mut book, "Launch the blog", 0);

        let goal = book.get(&id).unwrap();
        assert_eq!(goal.priority, 1);
        assert_eq!(goal.sub_goals, vec!["Direct Execution", "Verification"]);
        assert!(goal.deadline.unwrap() > Utc::now());
        assert_eq!(goal.status, GoalStatus::Pending);
    }

    #[test]
    fn test_active_ordering_and_lifecycle() {
        let mut book = GoalBook::new();
        let simple = tracked(&mut book, "small", 0);
        let complex = tracked(&mut book, "big", 5);

        let active = book.active();
        assert_eq!(active[0].id, complex);

        book.update_progress(&simple, 1.0).unwrap();
        book.abandon(&complex).unwrap();
        assert!(book.active().is_empty());
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_unknown_goal() {
        let mut book = GoalBook::new();
        assert!(matches!(
            book.update_progress("nope", 0.5),
            Err(AgentError::GoalNotFound(_))
        ));
        assert!(book.abandon("nope").is_err());
    }
}
