//! Shared test doubles for controller tests.

use async_trait::async_trait;
use minagent_core::error::{ProviderError, ToolError};
use minagent_core::provider::Provider;
use minagent_core::tool::Tool;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A provider that replays scripted responses in order and records every
/// prompt and stop list it was called with.
///
/// Panics if more calls are made than responses provided.
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<String, ProviderError>>>,
    prompts: Mutex<Vec<String>>,
    stops: Mutex<Vec<Vec<String>>>,
}

impl ScriptedProvider {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(|r| Ok(r.into())).collect()),
            prompts: Mutex::new(Vec::new()),
            stops: Mutex::new(Vec::new()),
        }
    }

    /// Queue a failure after the scripted responses.
    pub fn then_fail(self, error: ProviderError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn stops(&self) -> Vec<Vec<String>> {
        self.stops.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn generate(&self, prompt: &str, stop: &[String]) -> Result<String, ProviderError> {
        let call = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.to_string());
            prompts.len()
        };
        self.stops.lock().unwrap().push(stop.to_vec());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("ScriptedProvider: no response for call #{call}"))
    }
}

/// A tool that returns a fixed reply (or error) and records its inputs.
pub struct StubTool {
    name: String,
    reply: Result<String, String>,
    inputs: Arc<Mutex<Vec<String>>>,
}

impl StubTool {
    pub fn ok(name: &str, reply: &str) -> Self {
        Self {
            name: name.into(),
            reply: Ok(reply.into()),
            inputs: Arc::default(),
        }
    }

    pub fn failing(name: &str, message: &str) -> Self {
        Self {
            name: name.into(),
            reply: Err(message.into()),
            inputs: Arc::default(),
        }
    }

    /// Handle to the recorded inputs that outlives moving the tool into a registry.
    pub fn inputs(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.inputs)
    }
}

#[async_trait]
impl Tool for StubTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "A stub tool"
    }

    async fn run(&self, input: &str) -> Result<String, ToolError> {
        self.inputs.lock().unwrap().push(input.to_string());
        self.reply.clone().map_err(ToolError::Execution)
    }
}
