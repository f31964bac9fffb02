use crate::tools::{Tool, ToolResult};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

const DEFAULT_MAX_RESULTS: usize = 5;
const HARD_MAX_RESULTS: usize = 20;

/// Web search request recorder.
///
/// No search backend is bundled: the tool validates the request and hands
/// back the normalized query so the host can perform the lookup.
pub struct WebSearchTool;

#[derive(Debug, Deserialize)]
struct WebSearchArgs {
    query: String,
    max_results: Option<usize>,
}

impl WebSearchTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WebSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the internet for current information, news and technical references"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "What to search for"
                },
                "max_results": {
                    "type": "integer",
                    "description": "Maximum number of results (default 5, max 20)"
                }
            },
            "required": ["query"]
        })
    }

    fn usage_examples(&self) -> Vec<String> {
        vec![
            "Searching current news".to_string(),
            "Researching technical information".to_string(),
        ]
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        let args: WebSearchArgs =
            serde_json::from_value(args).context("Failed to parse web_search arguments")?;

        let query = args.query.split_whitespace().collect::<Vec<_>>().join(" ");
        if query.is_empty() {
            return Ok(ToolResult::failure("Search query is empty"));
        }

        let max_results = args
            .max_results
            .unwrap_or(DEFAULT_MAX_RESULTS)
            .clamp(1, HARD_MAX_RESULTS);

        let output = serde_json::json!({
            "query": query,
            "max_results": max_results,
            "status": "queued",
        });
        Ok(ToolResult::success(output.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_web_search_normalizes_query() {
        let tool = WebSearchTool::new();
        let result = tool
            .execute(serde_json::json!({"query": "  rust   async  ", "max_results": 100}))
            .await
            .unwrap();

        assert!(result.success);
        let output: Value = serde_json::from_str(&result.output).unwrap();
        assert_eq!(output["query"], "rust async");
        assert_eq!(output["max_results"], 20);
    }

    #[tokio::test]
    async fn test_web_search_empty_query() {
        let tool = WebSearchTool::new();
        let result = tool.execute(serde_json::json!({"query": "   "})).await.unwrap();
        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_web_search_missing_query() {
        let tool = WebSearchTool::new();
        assert!(tool.execute(serde_json::json!({})).await.is_err());
    }
}
