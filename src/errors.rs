//! Error types for the sum-check protocol
//!
//! Every variant is terminal for a protocol session. Field elements are
//! carried as rendered strings so the error type stays independent of `F`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SumCheckError {
    #[error("round {round}: polynomial degree {observed} exceeds declared bound {declared}")]
    DegreeBoundViolation {
        round: usize,
        declared: usize,
        observed: usize,
    },

    #[error("round {round}: g(0) + g(1) = {actual}, expected {expected}")]
    ConsistencyViolation {
        round: usize,
        expected: String,
        actual: String,
    },

    #[error("final check failed: oracle g(r) = {expected}, last round polynomial gives {actual}")]
    FinalCheckFailure { expected: String, actual: String },

    #[error("malformed protocol state: {0}")]
    MalformedState(String),

    #[error("oracle evaluation error: {0}")]
    EvaluationError(String),

    #[error("randomness source unavailable: {0}")]
    RandomnessUnavailable(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl SumCheckError {
    /// True when the error is evidence of a cheating (or broken) prover,
    /// as opposed to a caller or configuration mistake.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            SumCheckError::DegreeBoundViolation { .. }
                | SumCheckError::ConsistencyViolation { .. }
                | SumCheckError::FinalCheckFailure { .. }
        )
    }

    pub(crate) fn consistency<F: core::fmt::Display>(round: usize, expected: F, actual: F) -> Self {
        SumCheckError::ConsistencyViolation {
            round,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    pub(crate) fn final_check<F: core::fmt::Display>(expected: F, actual: F) -> Self {
        SumCheckError::FinalCheckFailure {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

impl From<ark_serialize::SerializationError> for SumCheckError {
    fn from(err: ark_serialize::SerializationError) -> Self {
        SumCheckError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SumCheckError>;
