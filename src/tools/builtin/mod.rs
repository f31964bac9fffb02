mod code_analysis;
mod planning;
mod web_search;

pub use code_analysis::CodeAnalysisTool;
pub use planning::PlanningTool;
pub use web_search::WebSearchTool;
