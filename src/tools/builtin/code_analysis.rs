use crate::tools::{Tool, ToolResult};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lines longer than this are flagged
const LONG_LINE: usize = 100;
/// Brace nesting deeper than this is flagged
const DEEP_NESTING: usize = 4;

/// Static metrics and improvement hints for a code snippet.
pub struct CodeAnalysisTool;

#[derive(Debug, Deserialize)]
struct CodeAnalysisArgs {
    code: String,
    language: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CodeReport {
    language: String,
    total_lines: usize,
    blank_lines: usize,
    comment_lines: usize,
    todo_markers: usize,
    longest_line: usize,
    max_nesting: usize,
    suggestions: Vec<String>,
}

impl CodeAnalysisTool {
    pub fn new() -> Self {
        Self
    }

    fn guess_language(code: &str) -> &'static str {
        if code.contains("fn ") && (code.contains("let ") || code.contains("->")) {
            "rust"
        } else if code.contains("def ") || (code.contains("import ") && code.contains(':')) {
            "python"
        } else if code.contains("function ") || code.contains("const ") {
            "javascript"
        } else {
            "unknown"
        }
    }

    fn is_comment(line: &str) -> bool {
        ["//", "#", "--", "/*", "*"]
            .iter()
            .any(|prefix| line.starts_with(prefix))
    }

    fn analyze(code: &str, language: Option<String>) -> CodeReport {
        let mut report = CodeReport {
            language: language.unwrap_or_else(|| Self::guess_language(code).to_string()),
            total_lines: 0,
            blank_lines: 0,
            comment_lines: 0,
            todo_markers: 0,
            longest_line: 0,
            max_nesting: 0,
            suggestions: Vec::new(),
        };

        let mut depth: usize = 0;
        for line in code.lines() {
            report.total_lines += 1;
            report.longest_line = report.longest_line.max(line.chars().count());

            let trimmed = line.trim();
            if trimmed.is_empty() {
                report.blank_lines += 1;
                continue;
            }
            if Self::is_comment(trimmed) {
                report.comment_lines += 1;
            }
            if trimmed.contains("TODO") || trimmed.contains("FIXME") {
                report.todo_markers += 1;
            }

            for ch in trimmed.chars() {
                match ch {
                    '{' => {
                        depth += 1;
                        report.max_nesting = report.max_nesting.max(depth);
                    }
                    '}' => depth = depth.saturating_sub(1),
                    _ => {}
                }
            }
        }

        if report.longest_line > LONG_LINE {
            report
                .suggestions
                .push(format!("Wrap lines longer than {} characters", LONG_LINE));
        }
        if report.todo_markers > 0 {
            report
                .suggestions
                .push("Resolve outstanding TODO/FIXME markers".to_string());
        }
        if report.max_nesting > DEEP_NESTING {
            report
                .suggestions
                .push("Reduce nesting by extracting helper functions".to_string());
        }
        if report.comment_lines == 0 && report.total_lines > 20 {
            report
                .suggestions
                .push("Document the non-obvious parts of this code".to_string());
        }

        report
    }
}

impl Default for CodeAnalysisTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for CodeAnalysisTool {
    fn name(&self) -> &str {
        "code_analysis"
    }

    fn description(&self) -> &str {
        "Analyze source code and suggest improvements: bug detection, performance analysis"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "code": {
                    "type": "string",
                    "description": "Source code to analyze"
                },
                "language": {
                    "type": "string",
                    "description": "Language of the code; guessed when omitted"
                }
            },
            "required": ["code"]
        })
    }

    fn usage_examples(&self) -> Vec<String> {
        vec!["Bug detection".to_string(), "Performance analysis".to_string()]
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        let args: CodeAnalysisArgs =
            serde_json::from_value(args).context("Failed to parse code_analysis arguments")?;

        if args.code.trim().is_empty() {
            return Ok(ToolResult::failure("No code provided"));
        }

        let language = args.language.filter(|l| !l.trim().is_empty());
        let report = Self::analyze(&args.code, language);
        let output = serde_json::to_string(&report).context("Failed to serialize code report")?;
        Ok(ToolResult::success(output))
    }
}
