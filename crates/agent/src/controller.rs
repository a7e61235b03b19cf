//! The reason-act-observe controller.
//!
//! One call to [`MinimalAgent::run`] drives the model through at most
//! `max_iterations` turns:
//!
//! 1. Render the prompt and generate. A `Chat Response:` here is returned
//!    straight away without touching the context.
//! 2. Otherwise the response opens the context and each turn parses the
//!    latest response:
//!    - **Final / chat answer**: returned.
//!    - **Tool call**: dispatched; the result (or an `Error: ...` line) is
//!      appended as `Observation:` and the model continues from `Thought:`.
//!    - **Unparseable**: the run fails with [`Error::Parse`].
//! 3. If the bound runs out, the last few observations are returned as a
//!    best-effort answer.
//!
//! Tool failures and unknown tool names never abort a run; the model sees
//! them as observations and gets a chance to correct itself.

use std::sync::Arc;

use minagent_config::AgentConfig;
use minagent_core::error::{Error, Result};
use minagent_core::provider::Provider;
use minagent_core::tool::{Tool, ToolRegistry};
use tracing::{debug, info, warn};

use crate::insight;
use crate::markers::{OBSERVATION, THOUGHT, default_stop_sequences};
use crate::parser::{Directive, parse};
use crate::prompt::{PromptInputs, PromptTemplate, today};

/// Default bound on generate/parse/dispatch cycles per query.
pub const DEFAULT_MAX_ITERATIONS: u32 = 10;

/// Characters of a tool result shown in debug logs.
const LOG_PREVIEW_CHARS: usize = 500;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The first response was a `Chat Response:`; the loop never started.
    DirectChat,
    /// A final (or chat) answer was reached inside the loop.
    Answered,
    /// The iteration bound ran out; the answer is the insight fallback.
    Exhausted,
}

/// One dispatched tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub tool: String,
    pub input: String,
    pub observation: String,
}

/// The result of [`MinimalAgent::run_traced`].
#[derive(Debug, Clone)]
pub struct AgentOutcome {
    /// The answer text handed back to the user.
    pub answer: String,
    pub termination: Termination,
    /// Completed loop iterations (0 for a direct chat answer).
    pub iterations: u32,
    /// Tool calls in the order they were made, including unknown tools.
    pub tool_calls: Vec<ToolInvocation>,
    /// Every model response of the loop, each followed by its observation.
    pub context: Vec<String>,
}

/// A tool-using agent over a plain-text protocol.
pub struct MinimalAgent {
    /// LLM backend asked for every step.
    provider: Arc<dyn Provider>,
    /// Tools the model may call, looked up by exact name.
    tools: ToolRegistry,
    /// Prompt rendered before each generation.
    prompt: PromptTemplate,
    /// Tool calls allowed before the fallback answer is returned.
    max_iterations: u32,
    /// Stop sequences sent with every generation.
    stop: Vec<String>,
}

impl MinimalAgent {
    /// Create an agent with the default prompt, bound and stop sequences.
    pub fn new(provider: Arc<dyn Provider>, tools: ToolRegistry) -> Self {
        Self {
            provider,
            tools,
            prompt: PromptTemplate::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            stop: default_stop_sequences(),
        }
    }

    /// Create an agent configured from the `[agent]` section.
    pub fn from_config(
        provider: Arc<dyn Provider>,
        tools: ToolRegistry,
        config: &AgentConfig,
    ) -> Self {
        Self::new(provider, tools)
            .with_prompt(PromptTemplate::from_config(config))
            .with_max_iterations(config.max_iterations)
    }

    /// Set max iterations.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    /// Replace the prompt template.
    pub fn with_prompt(mut self, prompt: PromptTemplate) -> Self {
        self.prompt = prompt;
        self
    }

    /// Replace the stop sequences sent with every generation.
    pub fn with_stop_sequences(mut self, stop: Vec<String>) -> Self {
        self.stop = stop;
        self
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Register a tool at the end of the registration order.
    pub fn add_tool(&mut self, tool: Box<dyn Tool>) {
        self.tools.add(tool);
    }

    /// Remove every tool named exactly `name`.
    pub fn remove_tool(&mut self, name: &str) -> bool {
        self.tools.remove(name)
    }

    /// `name: description` per registered tool, one per line.
    pub fn tool_descriptions(&self) -> String {
        self.tools.describe()
    }

    /// Registered tool names joined with `", "`.
    pub fn tool_names(&self) -> String {
        self.tools.names()
    }

    /// Answer `query`, returning only the answer text.
    pub async fn run(&self, query: &str) -> Result<String> {
        self.run_traced(query).await.map(|outcome| outcome.answer)
    }

    /// Answer `query`, returning the answer together with how it was reached.
    pub async fn run_traced(&self, query: &str) -> Result<AgentOutcome> {
        info!(
            provider = self.provider.name(),
            model = self.provider.model(),
            max_iter = self.max_iterations,
            tools = self.tools.len(),
            "Agent run starting"
        );

        let today = today();
        let tool_description = self.tools.describe();
        let tool_names = self.tools.names();
        let render = |previous: &str| {
            self.prompt.render(&PromptInputs {
                today: &today,
                tool_description: &tool_description,
                tool_names: &tool_names,
                question: query,
                previous_responses: previous,
            })
        };

        let mut latest = self.provider.generate(&render(""), &self.stop).await?;

        if let Directive::ChatAnswer(answer) = parse(&latest) {
            info!("Direct chat answer");
            return Ok(AgentOutcome {
                answer,
                termination: Termination::DirectChat,
                iterations: 0,
                tool_calls: Vec::new(),
                context: Vec::new(),
            });
        }

        let mut context = vec![latest.clone()];
        let mut tool_calls = Vec::new();

        for iteration in 1..=self.max_iterations {
            if iteration > 1 {
                let prompt = render(&context.join("\n"));
                latest = self.provider.generate(&prompt, &self.stop).await?;
                context.push(latest.clone());
            }

            debug!(iteration, response_len = latest.len(), "Agent iteration");

            let (tool, input) = match parse(&latest) {
                Directive::FinalAnswer(answer) | Directive::ChatAnswer(answer) => {
                    info!(iteration, tool_calls = tool_calls.len(), "Agent answered");
                    return Ok(AgentOutcome {
                        answer,
                        termination: Termination::Answered,
                        iterations: iteration,
                        tool_calls,
                        context,
                    });
                }
                Directive::Unparseable => {
                    warn!(iteration, "Unparseable model response");
                    return Err(Error::Parse { response: latest });
                }
                Directive::ToolCall { tool, input } => (tool, input),
            };

            let observation = self.dispatch(&tool, &input).await;
            if let Some(last) = context.last_mut() {
                last.push_str(&format!("\n{OBSERVATION} {observation}\n{THOUGHT}"));
            }
            tool_calls.push(ToolInvocation {
                tool,
                input,
                observation,
            });
        }

        warn!(
            max_iter = self.max_iterations,
            tool_calls = tool_calls.len(),
            "Max iterations reached without a final answer"
        );

        Ok(AgentOutcome {
            answer: insight::summarize(&context),
            termination: Termination::Exhausted,
            iterations: self.max_iterations,
            tool_calls,
            context,
        })
    }

    /// Run one tool call and turn whatever happens into observation text.
    async fn dispatch(&self, name: &str, input: &str) -> String {
        let Some(tool) = self.tools.lookup(name) else {
            warn!(tool = name, "Unknown tool requested");
            return format!(
                "Error: Unknown tool: {name}. Available tools: {}",
                self.tools.names()
            );
        };

        debug!(tool = name, input, "Executing tool");
        match tool.run(input).await {
            Ok(result) => {
                debug!(tool = name, result = preview(&result), "Tool result");
                result
            }
            Err(e) => {
                warn!(tool = name, error = %e, "Tool failed");
                format!("Error: {e}")
            }
        }
    }
}

fn preview(text: &str) -> &str {
    text.char_indices()
        .nth(LOG_PREVIEW_CHARS)
        .map_or(text, |(at, _)| &text[..at])
}
