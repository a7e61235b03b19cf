//! # MinAgent Core
//!
//! Domain types, traits, and error definitions for the MinAgent controller.
//! This crate has **no framework dependencies**: it defines the two
//! collaborator contracts the agent loop is written against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator is a trait here. Implementations live in
//! their respective crates:
//! - [`Provider`]: the LLM backend (`minagent-providers`)
//! - [`Tool`]: a named capability the model may invoke (`minagent-tools`)
//!
//! The agent loop in `minagent-agent` only ever sees these traits, so tests
//! swap in scripted providers and stub tools freely.

pub mod error;
pub mod provider;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ProviderError, Result, ToolError};
pub use provider::Provider;
pub use tool::{Tool, ToolDescriptor, ToolRegistry};
