//! Product of multilinear polynomials
//!
//! G(x) = Π_k Z_k(x) for MLEs Z_1..Z_k over the same ℓ variables. Each Z_k
//! has degree 1 in every variable, so G has degree at most k in every
//! variable. This is the shape of R1CS-style sum-check instances
//! (A·B for k=2, eq·A·B for k=3).

use ark_ff::Field;

use super::{ensure_arity, MultilinearPolynomial, PolynomialOracle};
use crate::errors::{Result, SumCheckError};

#[derive(Debug, Clone)]
pub struct ProductPolynomial<F: Field> {
    factors: Vec<MultilinearPolynomial<F>>,
    num_vars: usize,
}

impl<F: Field> ProductPolynomial<F> {
    pub fn new(factors: Vec<MultilinearPolynomial<F>>) -> Result<Self> {
        let num_vars = factors
            .first()
            .map(|f| f.num_vars)
            .ok_or_else(|| {
                SumCheckError::InvalidParameter("product needs at least one factor".into())
            })?;
        if let Some(bad) = factors.iter().find(|f| f.num_vars != num_vars) {
            return Err(SumCheckError::InvalidParameter(format!(
                "factor has {} variables, expected {}",
                bad.num_vars, num_vars
            )));
        }
        Ok(Self { factors, num_vars })
    }

    pub fn factors(&self) -> &[MultilinearPolynomial<F>] {
        &self.factors
    }

    pub fn sum_over_hypercube(&self) -> F {
        (0..1usize << self.num_vars)
            .map(|idx| self.factors.iter().map(|f| f.evaluations[idx]).product::<F>())
            .sum()
    }
}

impl<F: Field> PolynomialOracle<F> for ProductPolynomial<F> {
    fn num_vars(&self) -> usize {
        self.num_vars
    }

    fn degree_bound(&self, _variable: usize) -> usize {
        self.factors.len()
    }

    fn evaluate(&self, point: &[F]) -> Result<F> {
        ensure_arity(self.num_vars, point)?;
        self.factors
            .iter()
            .try_fold(F::one(), |acc, f| -> Result<F> { Ok(acc * f.evaluate(point)?) })
    }
}
