//! Agent Factory
//!
//! Builds agents from configuration, optionally restoring learned state.

use crate::agent::EnhancedAgent;
use crate::config::AppConfig;
use crate::persistence::AgentSnapshot;
use crate::tools::ToolRegistry;
use anyhow::{Context, Result};
use tracing::info;

/// Create a fresh agent with the built-in tools.
pub fn create_agent(config: &AppConfig) -> Result<EnhancedAgent> {
    config.validate().context("Invalid agent configuration")?;
    Ok(EnhancedAgent::new(
        config.clone(),
        ToolRegistry::with_builtins(),
    ))
}

/// Create an agent and restore the saved snapshot when persistence is enabled.
pub fn load_agent(config: &AppConfig) -> Result<EnhancedAgent> {
    let mut agent = create_agent(config)?;

    if !config.state.persist {
        return Ok(agent);
    }

    if let Some(path) = config.state.resolved_path() {
        let snapshot = AgentSnapshot::load(&path)
            .with_context(|| format!("Failed to restore agent state from {}", path.display()))?;
        info!(
            patterns = snapshot.learned_patterns.len(),
            goals = snapshot.goals.len(),
            "Restored agent state"
        );
        agent.restore(snapshot);
    }

    Ok(agent)
}

/// Save the agent's learned state when persistence is enabled.
pub fn save_agent(agent: &EnhancedAgent) -> Result<()> {
    let state = &agent.config().state;
    if !state.persist {
        return Ok(());
    }

    if let Some(path) = state.resolved_path() {
        agent
            .snapshot()
            .save(&path)
            .with_context(|| format!("Failed to save agent state to {}", path.display()))?;
    }
    Ok(())
}
