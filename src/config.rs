//! Application configuration
//!
//! Loaded from TOML or JSON (picked by file extension), then overlaid with
//! `ENHANCED_AGENT_<SECTION>_<FIELD>` environment variables and validated.

use crate::types::AgentError;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

const ENV_PREFIX: &str = "ENHANCED_AGENT_";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReasoningConfig {
    /// Depth used when the caller does not pass one (1-5)
    pub default_depth: u8,
    pub enable_critical_thinking: bool,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            default_depth: 3,
            enable_critical_thinking: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToolsConfig {
    pub enable_auto_discovery: bool,
    /// Maximum number of tools suggested for one task
    pub max_suggestions: usize,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            enable_auto_discovery: true,
            max_suggestions: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanningConfig {
    /// Horizon used when the caller passes none
    pub default_time_horizon: String,
    /// Register an `AgentGoal` for every planned objective
    pub track_goals: bool,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            default_time_horizon: "short".to_string(),
            track_goals: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LearningConfig {
    pub enable_pattern_learning: bool,
    /// Observations kept per query pattern
    pub max_observations_per_pattern: usize,
    /// Thinking steps kept in memory
    pub max_thinking_history: usize,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            enable_pattern_learning: true,
            max_observations_per_pattern: 50,
            max_thinking_history: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LimitsConfig {
    /// Inputs longer than this are truncated
    pub max_input_chars: usize,
    pub max_list_items: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_input_chars: 4000,
            max_list_items: 32,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StateConfig {
    pub persist: bool,
    /// Snapshot location; defaults to the platform data directory
    pub path: Option<PathBuf>,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            persist: true,
            path: None,
        }
    }
}

impl StateConfig {
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().join("state.json")))
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub reasoning: ReasoningConfig,
    pub tools: ToolsConfig,
    pub planning: PlanningConfig,
    pub learning: LearningConfig,
    pub limits: LimitsConfig,
    pub logging: LoggingConfig,
    pub state: StateConfig,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "enhanced-agent", "enhanced-agent")
}

impl AppConfig {
    /// Default config file location (`config.toml` in the platform config dir).
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load from the default location, falling back to defaults when absent.
    pub fn load() -> Result<Self> {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::parse_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path; the file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::parse_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn parse_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&raw)
                .with_context(|| format!("Invalid JSON config: {}", path.display())),
            _ => toml::from_str(&raw)
                .with_context(|| format!("Invalid TOML config: {}", path.display())),
        }
    }

    /// Apply `ENHANCED_AGENT_*` variables. Unparseable values are skipped with a warning.
    pub fn apply_env_overrides(&mut self) {
        let vars: Vec<(String, String)> = std::env::vars()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect();

        for (key, value) in vars {
            if let Err(e) = self.apply_env_var(&key, &value) {
                warn!("Ignoring {}: {}", key, e);
            }
        }
    }

    fn apply_env_var(&mut self, key: &str, value: &str) -> Result<()> {
        let key = key.trim_start_matches(ENV_PREFIX).to_lowercase();
        match key.as_str() {
            "reasoning_default_depth" => self.reasoning.default_depth = value.parse()?,
            "reasoning_enable_critical_thinking" => {
                self.reasoning.enable_critical_thinking = parse_bool(value)?
            }
            "tools_enable_auto_discovery" => self.tools.enable_auto_discovery = parse_bool(value)?,
            "tools_max_suggestions" => self.tools.max_suggestions = value.parse()?,
            "planning_default_time_horizon" => {
                self.planning.default_time_horizon = value.to_string()
            }
            "planning_track_goals" => self.planning.track_goals = parse_bool(value)?,
            "learning_enable_pattern_learning" => {
                self.learning.enable_pattern_learning = parse_bool(value)?
            }
            "learning_max_observations_per_pattern" => {
                self.learning.max_observations_per_pattern = value.parse()?
            }
            "learning_max_thinking_history" => {
                self.learning.max_thinking_history = value.parse()?
            }
            "limits_max_input_chars" => self.limits.max_input_chars = value.parse()?,
            "limits_max_list_items" => self.limits.max_list_items = value.parse()?,
            "logging_level" => self.logging.level = value.to_string(),
            "state_persist" => self.state.persist = parse_bool(value)?,
            "state_path" => self.state.path = Some(PathBuf::from(value)),
            other => anyhow::bail!("unknown setting '{}'", other),
        }
        Ok(())
    }

    pub fn validate(&self) -> std::result::Result<(), AgentError> {
        if !(1..=5).contains(&self.reasoning.default_depth) {
            return Err(AgentError::Config(format!(
                "reasoning.default_depth must be between 1 and 5, got {}",
                self.reasoning.default_depth
            )));
        }
        if self.tools.max_suggestions == 0 {
            return Err(AgentError::Config(
                "tools.max_suggestions must be at least 1".to_string(),
            ));
        }
        if self.limits.max_input_chars == 0 {
            return Err(AgentError::Config(
                "limits.max_input_chars must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected a boolean, got '{}'", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.reasoning.default_depth, 3);
        assert!(config.tools.enable_auto_discovery);
    }

    #[test]
    #[serial]
    fn test_load_toml_partial() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[reasoning]\ndefault_depth = 4\n\n[tools]\nenable_auto_discovery = false").unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.reasoning.default_depth, 4);
        assert!(!config.tools.enable_auto_discovery);
        // Untouched sections keep their defaults
        assert_eq!(config.tools.max_suggestions, 5);
        assert!(config.reasoning.enable_critical_thinking);
    }

    #[test]
    #[serial]
    fn test_load_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, r#"{{"reasoning": {{"default_depth": 2}}, "state": {{"persist": false}}}}"#).unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.reasoning.default_depth, 2);
        assert!(!config.state.persist);
    }

    #[test]
    #[serial]
    fn test_invalid_depth_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[reasoning]\ndefault_depth = 9").unwrap();

        assert!(AppConfig::load_from(file.path()).is_err());
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        unsafe {
            std::env::set_var("ENHANCED_AGENT_TOOLS_MAX_SUGGESTIONS", "2");
            std::env::set_var("ENHANCED_AGENT_REASONING_ENABLE_CRITICAL_THINKING", "off");
            std::env::set_var("ENHANCED_AGENT_BOGUS_FIELD", "1");
        }

        let mut config = AppConfig::default();
        config.apply_env_overrides();

        unsafe {
            std::env::remove_var("ENHANCED_AGENT_TOOLS_MAX_SUGGESTIONS");
            std::env::remove_var("ENHANCED_AGENT_REASONING_ENABLE_CRITICAL_THINKING");
            std::env::remove_var("ENHANCED_AGENT_BOGUS_FIELD");
        }

        assert_eq!(config.tools.max_suggestions, 2);
        assert!(!config.reasoning.enable_critical_thinking);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("Yes").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(parse_bool("maybe").is_err());
    }
}
