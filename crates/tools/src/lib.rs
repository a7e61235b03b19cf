//! Built-in tool implementations for MinAgent.
//!
//! Tools give the agent the ability to act: evaluate arithmetic, run Python
//! snippets in a persistent session, and search the web.

pub mod calculator;
pub mod python_repl;
pub mod web_search;

use minagent_config::{SearchConfig, ToolsConfig};
use minagent_core::tool::ToolRegistry;
use tracing::warn;

pub use calculator::CalculatorTool;
pub use python_repl::{PythonReplTool, ReplSession};
pub use web_search::{SearchEngine, WebSearchTool};

/// Create a tool registry with the built-in tools enabled in `[tools]`.
///
/// Web search is skipped with a warning when it is enabled but the search
/// API key is missing, so a fresh install still gets a working agent.
pub fn registry_from_config(tools: &ToolsConfig, search: &SearchConfig) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    if tools.calculator {
        registry.add(Box::new(CalculatorTool));
    }
    if tools.python_repl {
        registry.add(Box::new(PythonReplTool::new(tools.python_bin.clone())));
    }
    if tools.web_search {
        match WebSearchTool::from_config(search) {
            Ok(tool) => registry.add(Box::new(tool)),
            Err(e) => warn!(error = %e, "Web search disabled"),
        }
    }
    registry
}
