//! Error types for the MinAgent domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each collaborator has its own error enum; only [`Error`] ever reaches
//! the caller of the agent loop.

use thiserror::Error;

/// The top-level error type for all MinAgent operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Protocol errors ---
    /// The model produced text that matches none of the response grammars.
    #[error("Could not parse tool call from response: {response}")]
    Parse { response: String },

    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Collaborator errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Failures raised inside a tool's `run`.
///
/// The agent loop never propagates these: each one is rendered as an
/// `Error: <message>` observation and fed back to the model.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{0}")]
    Failed(String),

    #[error("Invalid tool input: {0}")]
    InvalidInput(String),

    #[error("Tool not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("{0}")]
    Execution(String),
}
