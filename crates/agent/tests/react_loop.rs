//! End-to-end runs of the agent loop against the built-in tools.

use async_trait::async_trait;
use minagent_agent::{MinimalAgent, Termination};
use minagent_config::{SearchConfig, ToolsConfig};
use minagent_core::error::ProviderError;
use minagent_core::{Error, Provider, ToolRegistry};
use minagent_tools::{CalculatorTool, registry_from_config};
use std::sync::{Arc, Mutex};

/// Replays canned model turns and keeps the prompts it saw.
struct Script {
    turns: Mutex<Vec<&'static str>>,
    prompts: Mutex<Vec<String>>,
}

impl Script {
    fn new(mut turns: Vec<&'static str>) -> Arc<Self> {
        turns.reverse();
        Arc::new(Self {
            turns: Mutex::new(turns),
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Provider for Script {
    fn name(&self) -> &str {
        "script"
    }

    fn model(&self) -> &str {
        "script-1"
    }

    async fn generate(&self, prompt: &str, _stop: &[String]) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.turns
            .lock()
            .unwrap()
            .pop()
            .map(str::to_string)
            .ok_or_else(|| ProviderError::InvalidResponse("script exhausted".into()))
    }
}

fn calculator_only() -> ToolRegistry {
    let tools = ToolsConfig {
        python_repl: false,
        ..ToolsConfig::default()
    };
    registry_from_config(&tools, &SearchConfig::default())
}

#[tokio::test]
async fn calculator_round_trip() {
    let script = Script::new(vec![
        "Thought: I should multiply.\nPlan: use Calculator\nAction: Calculator\nAction Input: 12 * (3 + 4)",
        "Thought: I now know the answer\nFinal Answer: 12 * (3 + 4) = 84",
    ]);
    let agent = MinimalAgent::new(script.clone(), calculator_only());

    let outcome = agent.run_traced("What is 12 * (3 + 4)?").await.unwrap();

    assert_eq!(outcome.answer, "12 * (3 + 4) = 84");
    assert_eq!(outcome.termination, Termination::Answered);
    assert_eq!(outcome.tool_calls[0].observation, "84");

    let prompts = script.prompts.lock().unwrap();
    assert!(prompts[1].contains("Action Input: 12 * (3 + 4)\nObservation: 84\nThought:"));
}

#[tokio::test]
async fn bad_calculator_input_lets_the_model_recover() {
    let script = Script::new(vec![
        "Action: Calculator\nAction Input: twelve times four",
        "Action: Calculator\nAction Input: 12 * 4",
        "Final Answer: 48",
    ]);
    let agent = MinimalAgent::new(script.clone(), calculator_only());

    let outcome = agent.run_traced("twelve times four?").await.unwrap();

    assert_eq!(outcome.answer, "48");
    assert_eq!(outcome.iterations, 3);
    assert!(outcome.tool_calls[0].observation.starts_with("Error: Invalid tool input:"));
    assert_eq!(outcome.tool_calls[1].observation, "48");
}

#[tokio::test]
async fn misspelled_tool_then_correct_one() {
    let script = Script::new(vec![
        "Action: calculator\nAction Input: 1 + 1",
        "Action: Calculator\nAction Input: 1 + 1",
        "Final Answer: 2",
    ]);
    let mut registry = ToolRegistry::new();
    registry.add(Box::new(CalculatorTool));
    let agent = MinimalAgent::new(script, registry);

    let outcome = agent.run_traced("1 + 1").await.unwrap();
    assert_eq!(
        outcome.tool_calls[0].observation,
        "Error: Unknown tool: calculator. Available tools: Calculator"
    );
    assert_eq!(outcome.answer, "2");
}

#[tokio::test]
async fn direct_chat_never_touches_tools() {
    let script = Script::new(vec!["Chat Response: Hello! How can I help?"]);
    let agent = MinimalAgent::new(script.clone(), calculator_only());

    let answer = agent.run("hi").await.unwrap();
    assert_eq!(answer, "Hello! How can I help?");
    assert_eq!(script.prompts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn gibberish_is_reported_with_the_raw_text() {
    let script = Script::new(vec!["¯\\_(ツ)_/¯"]);
    let agent = MinimalAgent::new(script, calculator_only());

    let err = agent.run("?").await.unwrap_err();
    assert!(matches!(&err, Error::Parse { response } if response == "¯\\_(ツ)_/¯"));
    assert!(err.to_string().contains("Could not parse"));
}

#[tokio::test]
async fn bounded_loop_summarizes_observations() {
    let script = Script::new(vec![
        "Action: Calculator\nAction Input: 1 + 1",
        "Action: Calculator\nAction Input: 2 + 2",
    ]);
    let agent = MinimalAgent::new(script.clone(), calculator_only()).with_max_iterations(2);

    let outcome = agent.run_traced("count").await.unwrap();

    assert_eq!(outcome.termination, Termination::Exhausted);
    assert!(outcome.answer.ends_with("Here's what I found: 2\n\n4"));
    assert_eq!(script.prompts.lock().unwrap().len(), 2);
}
