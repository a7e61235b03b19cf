//! The agent loop: the heart of MinAgent.
//!
//! The agent follows a **Reason → Act → Observe** cycle over plain text:
//!
//! 1. **Prompt** the model with the task template, tool list and question
//! 2. **Parse** the response into a [`Directive`]
//! 3. **If a tool call**: run the tool, append the observation, loop to 1
//! 4. **If an answer**: return it to the caller
//!
//! The loop ends on an answer, on an unparseable response, or when the
//! iteration bound is reached (in which case the most recent observations
//! are returned as a best-effort answer).

pub mod controller;
pub mod insight;
pub mod markers;
pub mod parser;
pub mod prompt;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use controller::{AgentOutcome, MinimalAgent, Termination, ToolInvocation};
pub use parser::{Directive, extract_observations, extract_thoughts, parse};
pub use prompt::{PromptInputs, PromptTemplate};
