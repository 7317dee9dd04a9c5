//! Error types for challenge generation and reliability evaluation.

use thiserror::Error;

/// Errors raised by the generation and evaluation core.
///
/// All of them are fatal to the call that produced them; no partial result is
/// ever returned alongside an error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("invalid challenge width {n_bits}: {reason}")]
    InvalidWidth { n_bits: usize, reason: String },

    #[error("requested {requested} distinct challenges but at most {available} can be constructed")]
    InsufficientCandidates { requested: usize, available: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("challenge width {actual} does not match model width {expected}")]
    ChallengeWidthMismatch { expected: usize, actual: usize },

    #[error("model returned {actual} responses for {expected} challenges")]
    ResponseCount { expected: usize, actual: usize },

    #[error("evaluation needs at least one trial and one challenge")]
    EmptyEvaluation,

    /// Failure reported by an external primitive model.
    #[error("model evaluation failed: {0}")]
    Model(String),
}

pub type Result<T> = std::result::Result<T, Error>;
