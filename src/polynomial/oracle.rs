//! Evaluation-only access to the polynomial being summed
//!
//! Prover and verifier never look inside g. They see its arity, a degree
//! bound per variable, and point evaluations.

use ark_ff::Field;

use super::DegreeBounds;
use crate::errors::{Result, SumCheckError};

/// Oracle for a multivariate polynomial g: F^n -> F
///
/// The degree bounds are part of the oracle's construction, derived from
/// how g is represented (1 per variable for a multilinear extension, k for
/// a product of k multilinear factors, ...). They are what the verifier
/// enforces each round, so an oracle must never under-report them.
pub trait PolynomialOracle<F: Field>: Sync {
    /// Declared arity n
    fn num_vars(&self) -> usize;

    /// Declared degree bound of g in variable `variable` (0-based)
    fn degree_bound(&self, variable: usize) -> usize;

    /// Evaluate g at `point`, which must have exactly `num_vars()` entries
    fn evaluate(&self, point: &[F]) -> Result<F>;

    /// All declared bounds d_1..d_n
    fn degree_bounds(&self) -> Result<DegreeBounds> {
        DegreeBounds::new((0..self.num_vars()).map(|i| self.degree_bound(i)).collect())
    }
}

impl<F: Field, O: PolynomialOracle<F> + ?Sized> PolynomialOracle<F> for &O {
    fn num_vars(&self) -> usize {
        (**self).num_vars()
    }

    fn degree_bound(&self, variable: usize) -> usize {
        (**self).degree_bound(variable)
    }

    fn evaluate(&self, point: &[F]) -> Result<F> {
        (**self).evaluate(point)
    }
}

/// Arity check shared by the oracle implementations
pub fn ensure_arity<F>(num_vars: usize, point: &[F]) -> Result<()> {
    if point.len() != num_vars {
        return Err(SumCheckError::EvaluationError(format!(
            "point has {} coordinates, oracle expects {}",
            point.len(),
            num_vars
        )));
    }
    Ok(())
}
