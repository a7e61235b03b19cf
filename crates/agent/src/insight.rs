//! Best-effort answer when the iteration bound runs out.

use crate::parser::extract_observations;

/// How many trailing observations the fallback answer quotes.
pub const MAX_INSIGHTS: usize = 3;

pub const EXHAUSTED_PREFIX: &str =
    "I wasn't able to reach a definite conclusion after multiple attempts. Here's what I found: ";

/// The last [`MAX_INSIGHTS`] observations across the whole context, oldest
/// first, separated by a blank line.
pub fn extract_insights(context: &[String]) -> String {
    let observations = extract_observations(&context.join("\n"));
    let start = observations.len().saturating_sub(MAX_INSIGHTS);
    observations[start..].join("\n\n")
}

/// The full fallback answer.
pub fn summarize(context: &[String]) -> String {
    format!("{EXHAUSTED_PREFIX}{}", extract_insights(context))
}
