//! Keyword-based tool discovery.

use super::external::ApiDescriptor;
use crate::types::ToolCapability;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Bonus for registered tools that have proven effective
const EFFECTIVENESS_BONUS: f32 = 0.5;
const EFFECTIVENESS_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    Registered,
    External,
}

/// A tool judged relevant to a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCandidate {
    pub name: String,
    pub description: String,
    pub relevance: f32,
    pub parameters: Value,
    pub source: CandidateSource,
}

fn keyword_hits(keywords: &[String], description: &str) -> usize {
    let description = description.to_lowercase();
    keywords
        .iter()
        .filter(|keyword| description.contains(keyword.as_str()))
        .count()
}

/// Rank registered tools and external APIs against a task description.
///
/// Relevance is the number of task keywords found in a tool's description;
/// registered tools with an effectiveness above 0.5 get a bonus. Candidates
/// with zero relevance are dropped, ties keep registry-then-API order.
pub fn identify_suitable_tools(
    task: &str,
    capabilities: &BTreeMap<String, ToolCapability>,
    apis: &[ApiDescriptor],
    limit: usize,
) -> Vec<ToolCandidate> {
    let keywords: Vec<String> = task
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();

    let mut candidates = Vec::new();

    for (name, capability) in capabilities {
        let mut relevance = keyword_hits(&keywords, &capability.description) as f32;
        if capability.effectiveness_score > EFFECTIVENESS_THRESHOLD {
            relevance += EFFECTIVENESS_BONUS;
        }
        if relevance > 0.0 {
            candidates.push(ToolCandidate {
                name: name.clone(),
                description: capability.description.clone(),
                relevance,
                parameters: capability.parameters.clone(),
                source: CandidateSource::Registered,
            });
        }
    }

    for api in apis {
        let relevance = keyword_hits(&keywords, api.description.as_deref().unwrap_or("")) as f32;
        if relevance > 0.0 {
            candidates.push(ToolCandidate {
                name: api.name.clone(),
                description: api.description_or_default().to_string(),
                relevance,
                parameters: api.parameters.clone().unwrap_or_else(|| Value::Object(Map::new())),
                source: CandidateSource::External,
            });
        }
    }

    candidates.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(limit);
    candidates
}

/// Build call arguments for a candidate: every string parameter receives the
/// task text, list parameters start empty, everything else is left out.
///
/// Accepts either a JSON schema (`{"properties": {...}}`) or a flat
/// `{"param": "type"}` map. When a schema lists `required` parameters only
/// those are filled.
pub fn task_arguments(parameters: &Value, task: &str) -> Value {
    let mut args = Map::new();

    let required: Option<Vec<&str>> = parameters
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect());

    let declared: Vec<(String, String)> = match parameters.get("properties").and_then(Value::as_object) {
        Some(properties) => properties
            .iter()
            .map(|(name, spec)| {
                let kind = spec.get("type").and_then(Value::as_str).unwrap_or("string");
                (name.clone(), kind.to_string())
            })
            .collect(),
        None => parameters
            .as_object()
            .map(|flat| {
                flat.iter()
                    .map(|(name, kind)| (name.clone(), kind.as_str().unwrap_or("").to_string()))
                    .collect()
            })
            .unwrap_or_default(),
    };

    for (name, kind) in declared {
        if required
            .as_ref()
            .is_some_and(|names| !names.contains(&name.as_str()))
        {
            continue;
        }
        match kind.to_lowercase().as_str() {
            "string" | "str" => {
                args.insert(name, Value::String(task.to_string()));
            }
            "array" | "list" => {
                args.insert(name, Value::Array(Vec::new()));
            }
            _ => {}
        }
    }

    Value::Object(args)
}
