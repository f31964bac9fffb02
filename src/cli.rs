//! Command-line front end over the `EnhancedFunctions` facade.

use crate::agent::{load_agent, save_agent};
use crate::config::AppConfig;
use crate::functions::EnhancedFunctions;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::{Path, PathBuf};
use termimad::{FmtText, MadSkin};

#[derive(Parser, Debug)]
#[command(name = "enhanced-agent")]
#[command(about = "Chain-of-thought reasoning, tool discovery, planning and adaptation reports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (TOML, or JSON with a .json extension)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Print raw Markdown instead of rendering it
    #[arg(long, default_value_t = false, global = true)]
    pub plain: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reason about a query step by step
    Think {
        query: String,
        /// Reasoning depth (1-5)
        #[arg(long)]
        depth: Option<i64>,
        /// Skip the critical evaluation step
        #[arg(long, default_value_t = false)]
        no_critical: bool,
    },
    /// Discover and use tools for a task
    Tools {
        task: String,
        /// JSON array of external API descriptors
        #[arg(long, value_name = "FILE")]
        apis: Option<PathBuf>,
    },
    /// Build a strategic plan for an objective
    Plan {
        objective: String,
        /// Constraint (repeatable)
        #[arg(long = "constraint")]
        constraints: Vec<String>,
        /// short, medium or long
        #[arg(long)]
        horizon: Option<String>,
    },
    /// Propose adaptation strategies for a situation
    Adapt {
        context: String,
        /// Environmental factor (repeatable)
        #[arg(short, long = "factor")]
        factors: Vec<String>,
        /// Adaptation goal (repeatable)
        #[arg(short, long = "goal")]
        goals: Vec<String>,
    },
    /// Show plugin features and agent status
    Info,
    /// List or update tracked goals
    Goals {
        #[command(subcommand)]
        action: Option<GoalCommand>,
    },
}

#[derive(Subcommand, Debug)]
pub enum GoalCommand {
    /// List active goals
    List,
    /// Set a goal's progress (0.0 to 1.0)
    Progress { id: String, progress: f32 },
    /// Abandon a goal
    Abandon { id: String },
}

impl Cli {
    pub fn load_config(&self) -> Result<AppConfig> {
        match &self.config {
            Some(path) => AppConfig::load_from(path),
            None => AppConfig::load(),
        }
    }
}

/// Run one command against an agent restored from disk, then persist its state.
pub async fn run(cli: Cli, config: AppConfig) -> Result<()> {
    let functions = EnhancedFunctions::new(load_agent(&config)?);

    let output = match cli.command {
        Commands::Think {
            query,
            depth,
            no_critical,
        } => {
            let critical = if no_critical { Some(false) } else { None };
            functions.enhanced_thinking(&query, depth, critical).await
        }
        Commands::Tools { task, apis } => {
            let apis = apis.as_deref().map(read_apis).transpose()?;
            functions.discover_and_use_tools(&task, apis.as_ref()).await
        }
        Commands::Plan {
            objective,
            constraints,
            horizon,
        } => {
            functions
                .agentic_planning(&objective, Some(constraints), horizon.as_deref())
                .await
        }
        Commands::Adapt {
            context,
            factors,
            goals,
        } => {
            functions
                .real_world_adaptation(&context, Some(factors), Some(goals))
                .await
        }
        Commands::Info => functions.plugin_info().await,
        Commands::Goals { action } => match action.unwrap_or(GoalCommand::List) {
            GoalCommand::List => functions.active_goals().await,
            GoalCommand::Progress { id, progress } => {
                functions.update_goal_progress(&id, progress).await
            }
            GoalCommand::Abandon { id } => functions.abandon_goal(&id).await,
        },
    };

    if cli.plain {
        println!("{}", output);
    } else {
        println!("{}", render_markdown(&output));
    }

    let agent = functions.agent();
    let agent = agent.read().await;
    save_agent(&agent)?;
    Ok(())
}

fn read_apis(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read API list: {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid API list JSON: {}", path.display()))
}

fn render_markdown(text: &str) -> String {
    let skin = MadSkin::default();
    let (w, _) = termimad::terminal_size();
    let width = std::cmp::max(20, w.saturating_sub(4) as usize);
    FmtText::from(&skin, text, Some(width)).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_plan_command() {
        let cli = Cli::try_parse_from([
            "enhanced-agent",
            "plan",
            "Ship the release",
            "--constraint",
            "Budget: $10K",
            "--constraint",
            "Team: 3",
            "--horizon",
            "medium",
            "--plain",
        ])
        .unwrap();

        assert!(cli.plain);
        match cli.command {
            Commands::Plan {
                objective,
                constraints,
                horizon,
            } => {
                assert_eq!(objective, "Ship the release");
                assert_eq!(constraints.len(), 2);
                assert_eq!(horizon.as_deref(), Some("medium"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_goals_defaults_to_list() {
        let cli = Cli::try_parse_from(["enhanced-agent", "goals"]).unwrap();
        assert!(matches!(cli.command, Commands::Goals { action: None }));
    }

    #[test]
    fn test_read_apis() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"[{{"name": "weather_api", "description": "Weather data"}}]"#).unwrap();
        let apis = read_apis(file.path()).unwrap();
        assert_eq!(apis[0]["name"], "weather_api");

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "not json").unwrap();
        assert!(read_apis(bad.path()).is_err());
    }
}
