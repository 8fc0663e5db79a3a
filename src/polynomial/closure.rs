//! Oracle backed by a plain Rust closure
//!
//! Arity and degree bounds are stated explicitly at construction; nothing
//! is inferred from the closure itself.

use ark_ff::Field;
use core::marker::PhantomData;

use super::{ensure_arity, DegreeBounds, PolynomialOracle};
use crate::errors::{Result, SumCheckError};

pub struct ClosureOracle<F, G> {
    bounds: DegreeBounds,
    func: G,
    _field: PhantomData<F>,
}

impl<F, G> ClosureOracle<F, G>
where
    F: Field,
    G: Fn(&[F]) -> F + Sync,
{
    /// `bounds[i]` is the degree of the closure's polynomial in variable i;
    /// the arity is `bounds.len()`.
    pub fn new(bounds: Vec<usize>, func: G) -> Result<Self> {
        Ok(Self {
            bounds: DegreeBounds::new(bounds)?,
            func,
            _field: PhantomData,
        })
    }

    /// Like [`ClosureOracle::new`] with an explicit arity, checked against
    /// the number of bounds.
    pub fn with_arity(num_vars: usize, bounds: Vec<usize>, func: G) -> Result<Self> {
        if bounds.len() != num_vars {
            return Err(SumCheckError::InvalidParameter(format!(
                "{} degree bounds declared for {} variables",
                bounds.len(),
                num_vars
            )));
        }
        Self::new(bounds, func)
    }
}

impl<F, G> PolynomialOracle<F> for ClosureOracle<F, G>
where
    F: Field,
    G: Fn(&[F]) -> F + Sync,
{
    fn num_vars(&self) -> usize {
        self.bounds.num_vars()
    }

    fn degree_bound(&self, variable: usize) -> usize {
        self.bounds.as_slice().get(variable).copied().unwrap_or(0)
    }

    fn evaluate(&self, point: &[F]) -> Result<F> {
        ensure_arity(self.num_vars(), point)?;
        Ok((self.func)(point))
    }

    fn degree_bounds(&self) -> Result<DegreeBounds> {
        Ok(self.bounds.clone())
    }
}
