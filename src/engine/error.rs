//! Engine error taxonomy.
//!
//! Deliberately small: an empty dataset is not an error (every count and
//! ratio resolves to zero), and a model-fit failure is absorbed by the
//! forecaster's fallback path. The only fault a caller can trigger is an
//! unparseable date parameter.

/// Request-level engine failure, surfaced to the caller.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    #[error("invalid date parameter '{input}': expected an ISO-8601 date or datetime")]
    InvalidDate { input: String },
}
