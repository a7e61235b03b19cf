//! Literal protocol markers shared by prompts, the parser and the loop.
//!
//! Each marker is case-sensitive and includes its trailing colon.

pub const CHAT_RESPONSE: &str = "Chat Response:";
pub const FINAL_ANSWER: &str = "Final Answer:";
pub const THOUGHT: &str = "Thought:";
pub const PLAN: &str = "Plan:";
pub const ACTION: &str = "Action:";
pub const ACTION_INPUT: &str = "Action Input:";
pub const OBSERVATION: &str = "Observation:";

/// Generation must halt before the model writes its own observation.
pub const STOP_SEQUENCES: [&str; 2] = ["\nObservation:", "\n\tObservation:"];

/// [`STOP_SEQUENCES`] as owned strings, the shape providers take.
pub fn default_stop_sequences() -> Vec<String> {
    STOP_SEQUENCES.iter().map(|s| s.to_string()).collect()
}
