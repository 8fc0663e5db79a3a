//! Multilinear polynomial with dense representation over {0,1}^ℓ

use ark_ff::Field;
use rayon::prelude::*;

use super::{ensure_arity, eq_table, PolynomialOracle};
use crate::errors::{Result, SumCheckError};

/// Tables at least this long are evaluated and folded with rayon
pub const PARALLEL_THRESHOLD: usize = 1 << 10;

/// Multilinear extension of a table of 2^ℓ values. The first variable is
/// the most significant bit of the table index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultilinearPolynomial<F: Field> {
    pub evaluations: Vec<F>, // dense evaluations over Boolean hypercube
    pub num_vars: usize,     // ℓ
}

impl<F: Field> MultilinearPolynomial<F> {
    /// Create from evaluations; len must be 2^ℓ
    pub fn from_evaluations(evaluations: Vec<F>, num_vars: usize) -> Result<Self> {
        let expected = 1usize.checked_shl(num_vars as u32).ok_or_else(|| {
            SumCheckError::InvalidParameter(format!("{} variables is too many", num_vars))
        })?;
        if evaluations.len() != expected {
            return Err(SumCheckError::InvalidParameter(format!(
                "evaluation table has {} entries, 2^{} = {} required",
                evaluations.len(),
                num_vars,
                expected
            )));
        }
        Ok(Self { evaluations, num_vars })
    }

    /// Evaluate at Boolean point e ∈ {0,1}^ℓ (given as bools)
    pub fn eval_boolean(&self, e: &[bool]) -> Result<F> {
        ensure_arity(self.num_vars, e)?;
        let idx = e.iter().fold(0usize, |idx, &b| (idx << 1) | b as usize);
        Ok(self.evaluations[idx])
    }

    /// Σ_{x∈{0,1}^ℓ} Z(x)
    pub fn sum_over_hypercube(&self) -> F {
        if self.evaluations.len() >= PARALLEL_THRESHOLD {
            self.evaluations.par_iter().copied().sum()
        } else {
            self.evaluations.iter().sum()
        }
    }

    /// Evaluate MLE at arbitrary point x ∈ F^ℓ in O(2^ℓ) as Σ_e Z(e)·ẽq(x, e)
    fn evaluate_unchecked(&self, x: &[F]) -> F {
        let weights = eq_table(x);
        if self.evaluations.len() >= PARALLEL_THRESHOLD {
            self.evaluations
                .par_iter()
                .zip(weights.par_iter())
                .map(|(z, w)| *z * w)
                .sum()
        } else {
            self.evaluations
                .iter()
                .zip(weights.iter())
                .map(|(z, w)| *z * w)
                .sum()
        }
    }

    /// Bind the first variable to `r`, leaving an MLE in ℓ-1 variables:
    /// Z'(x_2..x_ℓ) = (1-r)·Z(0, x_2..) + r·Z(1, x_2..)
    pub fn fix_first_variable(&self, r: F) -> Result<Self> {
        self.fix_first_variable_with_threshold(r, PARALLEL_THRESHOLD)
    }

    /// [`Self::fix_first_variable`], folding on rayon once each half has
    /// at least `parallel_threshold` entries
    pub fn fix_first_variable_with_threshold(
        &self,
        r: F,
        parallel_threshold: usize,
    ) -> Result<Self> {
        if self.num_vars == 0 {
            return Err(SumCheckError::MalformedState(
                "cannot bind a variable of a constant polynomial".into(),
            ));
        }
        let half = self.evaluations.len() / 2;
        let (lo, hi) = self.evaluations.split_at(half);
        let fold = |(a, b): (&F, &F)| *a + r * (*b - a);
        let evaluations = if half >= parallel_threshold.max(1) {
            lo.par_iter().zip(hi.par_iter()).map(fold).collect()
        } else {
            lo.iter().zip(hi.iter()).map(fold).collect()
        };
        Ok(Self {
            evaluations,
            num_vars: self.num_vars - 1,
        })
    }
}

impl<F: Field> PolynomialOracle<F> for MultilinearPolynomial<F> {
    fn num_vars(&self) -> usize {
        self.num_vars
    }

    fn degree_bound(&self, _variable: usize) -> usize {
        1
    }

    #[tracing::instrument(
        skip_all,
        name = "MultilinearPolynomial::evaluate",
        fields(num_vars = self.num_vars)
    )]
    fn evaluate(&self, point: &[F]) -> Result<F> {
        ensure_arity(self.num_vars, point)?;
        Ok(self.evaluate_unchecked(point))
    }
}
