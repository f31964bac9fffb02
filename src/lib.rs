pub mod adaptation;
pub mod agent;
pub mod cli;
pub mod config;
pub mod functions;
pub mod persistence;
pub mod planning;
pub mod reasoning;
pub mod report;
pub mod tools;
pub mod types;

pub use agent::EnhancedAgent;
pub use config::AppConfig;
pub use functions::EnhancedFunctions;
