//! Learned-state snapshot
//!
//! Patterns, tool effectiveness and goals survive between runs as a pretty
//! printed JSON file.

use crate::types::{AgentError, AgentGoal, PatternStore, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ToolEffectiveness {
    pub score: f32,
    pub last_used: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSnapshot {
    pub learned_patterns: PatternStore,
    pub tool_effectiveness: BTreeMap<String, ToolEffectiveness>,
    pub goals: Vec<AgentGoal>,
}

impl AgentSnapshot {
    /// Load a snapshot; a missing file is an empty snapshot.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No snapshot found, starting fresh");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path).map_err(|e| {
            AgentError::Persistence(format!("failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            AgentError::Persistence(format!("invalid snapshot {}: {}", path.display(), e))
        })
    }

    /// Write the snapshot through a uniquely named temp file in the target
    /// directory, then move it into place.
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| {
            AgentError::Persistence(format!("failed to create {}: {}", dir.display(), e))
        })?;

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AgentError::Persistence(format!("failed to serialize snapshot: {}", e)))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| {
            AgentError::Persistence(format!(
                "failed to create temp file in {}: {}",
                dir.display(),
                e
            ))
        })?;
        tmp.write_all(json.as_bytes()).map_err(|e| {
            AgentError::Persistence(format!("failed to write {}: {}", tmp.path().display(), e))
        })?;
        tmp.persist(path).map_err(|e| {
            AgentError::Persistence(format!("failed to replace {}: {}", path.display(), e.error))
        })?;

        debug!(path = %path.display(), "Saved snapshot");
        Ok(())
    }
}
