//! Error taxonomy for the session engine.
//!
//! `ServiceError` describes failures of the remote generation/evaluation
//! service. It lives here, not in the HTTP crate, so adapters and the
//! player can classify failures without string matching.

use thiserror::Error;

/// Failure of a remote call to the generation/evaluation service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request did not complete within the bounded timeout.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A transport-level failure (DNS, connect, broken stream).
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with an error status.
    #[error("service error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The service answered 2xx but the body did not parse.
    #[error("invalid service response: {0}")]
    InvalidResponse(String),
}

impl ServiceError {
    /// Timeouts and transport failures are worth retrying as-is; a 4xx from
    /// the service generally is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ServiceError::Timeout(_) | ServiceError::Network(_) => true,
            ServiceError::Api { status, .. } => *status >= 500,
            ServiceError::InvalidResponse(_) => false,
        }
    }
}

/// Errors surfaced by the session engine.
///
/// `Generation` and `Evaluation` are retryable from the user's point of
/// view: the question's local state is left untouched, so the same action
/// can simply be attempted again. `Validation` never reaches the network.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid session setup input (zero questions, no kinds enabled).
    #[error("invalid session setup: {0}")]
    Configuration(String),

    /// Problem generation failed at the service boundary.
    #[error("problem generation failed: {0}")]
    Generation(#[source] ServiceError),

    /// Answer evaluation failed at the service boundary.
    #[error("answer evaluation failed: {0}")]
    Evaluation(#[source] ServiceError),

    /// The answer is incomplete or malformed, or no instance was generated
    /// yet for the active question.
    #[error("invalid answer: {0}")]
    Validation(String),

    /// The durable store could not be written or cleared.
    #[error("session storage failed: {0}")]
    Storage(String),
}

impl EngineError {
    /// Whether retrying the same user action can succeed without any local
    /// correction.
    pub fn is_retryable(&self) -> bool {
        match self {
            EngineError::Generation(e) | EngineError::Evaluation(e) => e.is_retryable(),
            EngineError::Storage(_) => true,
            EngineError::Configuration(_) | EngineError::Validation(_) => false,
        }
    }
}
