//! Tool trait: the abstraction over agent capabilities.
//!
//! Tools are what give the agent the ability to act in the world:
//! evaluate arithmetic, run Python, search the web, etc. A tool is a name,
//! a description written for the model, and a text-in/text-out `run`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::ToolError;

/// Name and description of a tool, as shown to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// The tool name (case-sensitive; the model must echo it exactly)
    pub name: String,

    /// Description of what the tool does and when to use it
    pub description: String,
}

/// The core Tool trait.
///
/// Any state a tool needs between calls (an interpreter session, an API
/// client) is owned by the tool instance itself. The registry and the
/// agent loop only ever call `run`.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "Calculator", "Python REPL").
    fn name(&self) -> &str;

    /// A description of what this tool does (sent to the LLM).
    fn description(&self) -> &str;

    /// Execute the tool with the literal `Action Input:` text.
    async fn run(&self, input: &str) -> std::result::Result<String, ToolError>;

    /// Snapshot of this tool's name and description.
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name().to_string(),
            description: self.description().to_string(),
        }
    }
}

/// An ordered registry of available tools.
///
/// Registration order is observable: it is the order tools are listed to
/// the model. Duplicate names are accepted; [`lookup`](Self::lookup)
/// resolves to the most recently registered one.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Append a tool to the end of the registration order.
    pub fn add(&mut self, tool: Box<dyn Tool>) {
        tracing::debug!(tool = tool.name(), "Registering tool");
        self.tools.push(tool);
    }

    /// Remove every tool named exactly `name`. Returns whether any was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.tools.len();
        self.tools.retain(|t| t.name() != name);
        self.tools.len() < before
    }

    /// Get a tool by exact name. The last registered match wins.
    pub fn lookup(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .rev()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    /// All descriptors, in registration order.
    pub fn list(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(|t| t.descriptor()).collect()
    }

    /// One `name: description` line per tool, for the prompt template.
    pub fn describe(&self) -> String {
        self.tools
            .iter()
            .map(|t| format!("{}: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Comma-joined tool names, for the prompt template.
    pub fn names(&self) -> String {
        self.tools
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Box<dyn Tool>> for ToolRegistry {
    fn from_iter<I: IntoIterator<Item = Box<dyn Tool>>>(iter: I) -> Self {
        Self {
            tools: iter.into_iter().collect(),
        }
    }
}
