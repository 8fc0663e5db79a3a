//! Per-variable degree bounds d_1..d_n
//!
//! Bounds are declared by whoever builds the oracle. They are never
//! estimated by probing the polynomial: over a finite field, sampling-based
//! degree estimation is meaningless (wrap-around, characteristic
//! collisions) and would let a prover choose the bound the verifier checks.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SumCheckError};
use crate::field::SumCheckField;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeBounds {
    bounds: Vec<usize>,
}

impl DegreeBounds {
    /// Bounds for variables 1..n in order; n must be at least 1
    pub fn new(bounds: Vec<usize>) -> Result<Self> {
        if bounds.is_empty() {
            return Err(SumCheckError::InvalidParameter(
                "a sum-check instance needs at least one variable".into(),
            ));
        }
        Ok(Self { bounds })
    }

    /// Same bound d for every one of `num_vars` variables
    pub fn uniform(num_vars: usize, degree: usize) -> Result<Self> {
        Self::new(vec![degree; num_vars])
    }

    /// Multilinear extension: degree at most 1 in each variable
    pub fn multilinear(num_vars: usize) -> Result<Self> {
        Self::uniform(num_vars, 1)
    }

    pub fn num_vars(&self) -> usize {
        self.bounds.len()
    }

    /// Bound for round `round` (1-based, as in the protocol description)
    pub fn get(&self, round: usize) -> Option<usize> {
        round.checked_sub(1).and_then(|i| self.bounds.get(i)).copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.bounds
    }

    pub fn max(&self) -> usize {
        self.bounds.iter().copied().max().unwrap_or(0)
    }

    /// Σ d_j, the numerator of the Schwartz-Zippel soundness bound
    pub fn total(&self) -> usize {
        self.bounds.iter().sum()
    }

    /// Upper bound on the probability that a false claim is accepted:
    /// Σ d_j / |F|, clamped to 1
    pub fn soundness_error<F: SumCheckField>(&self) -> f64 {
        (self.total() as f64 / F::order_f64()).min(1.0)
    }

    /// Reject a round polynomial whose degree exceeds d_round
    pub fn enforce(&self, round: usize, observed: usize) -> Result<()> {
        let declared = self.get(round).ok_or_else(|| {
            SumCheckError::MalformedState(format!(
                "round {} outside 1..={}",
                round,
                self.num_vars()
            ))
        })?;
        if observed > declared {
            return Err(SumCheckError::DegreeBoundViolation {
                round,
                declared,
                observed,
            });
        }
        Ok(())
    }
}
