//! Caller-supplied API descriptors.
//!
//! The host hands the agent a list of APIs it may use. Only the descriptor is
//! known here; invoking an external API yields an acknowledgement the host can
//! act on.

use crate::tools::{Tool, ToolResult};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

const DEFAULT_DESCRIPTION: &str = "External API";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Option<Value>,
}

impl ApiDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            parameters: None,
        }
    }

    pub fn with_parameters(mut self, parameters: Value) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION)
    }

    /// Parse a loose JSON list. Entries that are not objects or carry no
    /// string `name` are skipped.
    pub fn parse_list(value: &Value) -> Vec<ApiDescriptor> {
        let Some(items) = value.as_array() else {
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| {
                let name = item.get("name")?.as_str()?.trim();
                if name.is_empty() {
                    debug!("Skipping API descriptor with empty name");
                    return None;
                }
                Some(ApiDescriptor {
                    name: name.to_string(),
                    description: item
                        .get("description")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    parameters: item.get("parameters").cloned(),
                })
            })
            .collect()
    }
}

/// Tool wrapper around an `ApiDescriptor`.
pub struct ExternalApiTool {
    descriptor: ApiDescriptor,
}

impl ExternalApiTool {
    pub fn new(descriptor: ApiDescriptor) -> Self {
        Self { descriptor }
    }
}

#[async_trait]
impl Tool for ExternalApiTool {
    fn name(&self) -> &str {
        &self.descriptor.name
    }

    fn description(&self) -> &str {
        self.descriptor.description_or_default()
    }

    fn parameters(&self) -> Value {
        self.descriptor
            .parameters
            .clone()
            .unwrap_or_else(|| serde_json::json!({}))
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        if !args.is_object() {
            return Ok(ToolResult::failure(format!(
                "Arguments for '{}' must be a JSON object",
                self.descriptor.name
            )));
        }
        Ok(ToolResult::success(format!(
            "'{}' tool used successfully",
            self.descriptor.name
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_skips_invalid_entries() {
        let value = serde_json::json!([
            {"name": "weather_api", "description": "Weather data", "parameters": {"location": "str"}},
            {"description": "no name"},
            "not an object",
            {"name": "  "},
            {"name": "bare_api"}
        ]);

        let apis = ApiDescriptor::parse_list(&value);
        assert_eq!(apis.len(), 2);
        assert_eq!(apis[0].name, "weather_api");
        assert_eq!(apis[0].parameters, Some(serde_json::json!({"location": "str"})));
        assert_eq!(apis[1].description_or_default(), "External API");
    }

    #[test]
    fn test_parse_list_non_array() {
        assert!(ApiDescriptor::parse_list(&serde_json::json!(null)).is_empty());
        assert!(ApiDescriptor::parse_list(&serde_json::json!({"name": "x"})).is_empty());
    }

    #[tokio::test]
    async fn test_external_tool_execute() {
        let tool = ExternalApiTool::new(ApiDescriptor::new("database_api", "Database operations"));
        let ok = tool.execute(serde_json::json!({"query": "select"})).await.unwrap();
        assert!(ok.success);
        assert_eq!(ok.output, "'database_api' tool used successfully");

        let bad = tool.execute(serde_json::json!([1, 2])).await.unwrap();
        assert!(!bad.success);
    }
}
