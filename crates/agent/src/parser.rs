//! Response parser: turns one raw model response into a [`Directive`].
//!
//! Recognition order, first match wins:
//!
//! 1. `Chat Response:` anywhere in the text
//! 2. `Final Answer:` anywhere in the text
//! 3. `Action: [name]` followed by `Action Input: input`
//! 4. a looser line-based reading of `Action:` / `Action Input:`
//! 5. [`Directive::Unparseable`]
//!
//! Parsing is total: every input yields exactly one directive.

use regex_lite::Regex;
use std::sync::LazyLock;

use crate::markers::{
    ACTION, ACTION_INPUT, CHAT_RESPONSE, FINAL_ANSWER, OBSERVATION, PLAN, THOUGHT,
};

/// The structured meaning of one model response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Direct conversational answer; no tools needed.
    ChatAnswer(String),
    /// Conclusion reached after zero or more tool calls.
    FinalAnswer(String),
    /// Request to run `tool` with the literal `input` text.
    ToolCall { tool: String, input: String },
    /// None of the above could be recognized.
    Unparseable,
}

// `Observation:` is cut off by hand afterwards; there is no lookahead.
static ACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Action: \[?(.*?)\]?\n*Action Input:\s*(.*)").expect("action pattern is valid")
});

/// Parse one raw model response.
pub fn parse(text: &str) -> Directive {
    if let Some(answer) = after_marker(text, CHAT_RESPONSE) {
        return Directive::ChatAnswer(answer);
    }
    if let Some(answer) = after_marker(text, FINAL_ANSWER) {
        return Directive::FinalAnswer(answer);
    }
    if let Some(call) = structured_action(text) {
        return call;
    }
    loose_action(text).unwrap_or(Directive::Unparseable)
}

/// Everything after the first `marker`, trimmed.
fn after_marker(text: &str, marker: &str) -> Option<String> {
    text.find(marker)
        .map(|at| text[at + marker.len()..].trim().to_string())
}

/// Text up to the first `Observation:`, or all of it.
fn until_observation(text: &str) -> &str {
    text.find(OBSERVATION).map_or(text, |at| &text[..at])
}

fn structured_action(text: &str) -> Option<Directive> {
    let caps = ACTION_RE.captures(text)?;
    let tool = caps.get(1)?.as_str().trim().to_string();
    let input = until_observation(caps.get(2)?.as_str())
        .trim_matches(|c: char| c.is_whitespace() || c == '"' || c == '\'')
        .to_string();
    Some(Directive::ToolCall { tool, input })
}

fn loose_action(text: &str) -> Option<Directive> {
    let action_at = text.find(ACTION)?;
    let input_at = text.find(ACTION_INPUT)?;

    let after_action = &text[action_at + ACTION.len()..];
    let tool = after_action.lines().next().unwrap_or_default().trim().to_string();
    let input = until_observation(&text[input_at + ACTION_INPUT.len()..])
        .trim()
        .to_string();
    Some(Directive::ToolCall { tool, input })
}

/// Find every `start` marker and return the text from it to the nearest
/// following `ends` marker (or end of text), trimmed.
fn segments(text: &str, start: &str, ends: &[&str]) -> Vec<String> {
    let mut found = Vec::new();
    let mut rest = text;
    while let Some(at) = rest.find(start) {
        let body = &rest[at + start.len()..];
        let end = ends
            .iter()
            .filter_map(|marker| body.find(marker))
            .min()
            .unwrap_or(body.len());
        found.push(body[..end].trim().to_string());
        rest = &body[end..];
    }
    found
}

/// Every `Observation:` segment, each ending at the next `Thought:`.
pub fn extract_observations(text: &str) -> Vec<String> {
    segments(text, OBSERVATION, &[THOUGHT])
}

/// Every `Thought:` segment, each ending at the next `Action:`, `Plan:` or
/// `Final Answer:`.
pub fn extract_thoughts(text: &str) -> Vec<String> {
    segments(text, THOUGHT, &[ACTION, PLAN, FINAL_ANSWER])
}
