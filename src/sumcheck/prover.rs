//! Sum-check provers
//!
//! Round j message: g_j(X) = Σ_{b∈{0,1}^(n-j)} g(r_1, ..., r_{j-1}, X, b).
//!
//! - [`OracleProver`] works against any [`PolynomialOracle`]. It evaluates
//!   g_j on X = 0..=d_j by summing oracle values over the remaining
//!   sub-cube and interpolates. O(d_j · 2^(n-j)) oracle calls in round j.
//! - [`FoldingProver`] works on products of multilinear tables and binds
//!   each challenge into the tables, O(k · 2^n) field operations in total.

use ark_ff::Field;
use rayon::prelude::*;
use tracing::debug;

use super::univariate::UnivariatePolynomial;
use crate::errors::{Result, SumCheckError};
use crate::polynomial::multilinear::PARALLEL_THRESHOLD;
use crate::polynomial::{MultilinearPolynomial, PolynomialOracle, ProductPolynomial};

/// Prover side of the protocol. Calls must alternate
/// `compute_round_polynomial`, `receive_challenge`, ... for rounds 1..=n.
pub trait SumCheckProver<F: Field> {
    fn num_vars(&self) -> usize;

    /// Current round, 1-based; n+1 once every challenge has been received
    fn round(&self) -> usize;

    /// The prover's own claim H = Σ_{x∈{0,1}^n} g(x)
    fn claimed_sum(&self) -> Result<F>;

    /// g_j for the current round j
    fn compute_round_polynomial(&mut self) -> Result<UnivariatePolynomial<F>>;

    /// Record r_j and move to round j+1
    fn receive_challenge(&mut self, challenge: F) -> Result<()>;
}

/// Shared round bookkeeping for the provers in this module
#[derive(Debug, Clone)]
struct RoundTracker {
    num_vars: usize,
    round: usize,
    polynomial_sent: bool,
}

impl RoundTracker {
    fn new(num_vars: usize) -> Self {
        Self { num_vars, round: 1, polynomial_sent: false }
    }

    fn begin_round(&mut self) -> Result<usize> {
        if self.round > self.num_vars {
            return Err(SumCheckError::MalformedState(format!(
                "all {} rounds already completed",
                self.num_vars
            )));
        }
        if self.polynomial_sent {
            return Err(SumCheckError::MalformedState(format!(
                "round {} polynomial already sent, awaiting challenge",
                self.round
            )));
        }
        self.polynomial_sent = true;
        Ok(self.round)
    }

    fn end_round(&mut self) -> Result<usize> {
        if !self.polynomial_sent {
            return Err(SumCheckError::MalformedState(format!(
                "challenge for round {} received before its polynomial",
                self.round
            )));
        }
        self.polynomial_sent = false;
        let finished = self.round;
        self.round += 1;
        Ok(finished)
    }
}

/// Prover that only has oracle access to g
pub struct OracleProver<'a, F: Field, O: PolynomialOracle<F>> {
    oracle: &'a O,
    challenges: Vec<F>,
    tracker: RoundTracker,
    parallel_threshold: usize,
}

impl<'a, F: Field, O: PolynomialOracle<F>> OracleProver<'a, F, O> {
    pub fn new(oracle: &'a O) -> Result<Self> {
        let num_vars = oracle.num_vars();
        if num_vars == 0 {
            return Err(SumCheckError::InvalidParameter(
                "oracle must have at least one variable".into(),
            ));
        }
        Ok(Self {
            oracle,
            challenges: Vec::with_capacity(num_vars),
            tracker: RoundTracker::new(num_vars),
            parallel_threshold: PARALLEL_THRESHOLD,
        })
    }

    /// Sub-cubes with at least this many points are summed with rayon
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }

    pub fn challenges(&self) -> &[F] {
        &self.challenges
    }

    /// [g(prefix, x, bits(mask)) for x in 0..=degree], bits MSB first
    fn evaluate_slice(&self, mask: usize, rest: usize, degree: usize) -> Result<Vec<F>> {
        let n = self.tracker.num_vars;
        let mut point = Vec::with_capacity(n);
        point.extend_from_slice(&self.challenges);
        point.push(F::zero());
        for j in 0..rest {
            let bit = (mask >> (rest - 1 - j)) & 1 == 1;
            point.push(if bit { F::one() } else { F::zero() });
        }
        let slot = self.challenges.len();
        (0..=degree as u64)
            .map(|x| {
                point[slot] = F::from(x);
                self.oracle.evaluate(&point)
            })
            .collect()
    }

    fn sum_slices(&self, rest: usize, degree: usize) -> Result<Vec<F>> {
        let total = 1usize << rest;
        let add = |mut acc: Vec<F>, other: Vec<F>| -> Result<Vec<F>> {
            for (a, b) in acc.iter_mut().zip(other) {
                *a += b;
            }
            Ok(acc)
        };
        if total >= self.parallel_threshold {
            (0..total)
                .into_par_iter()
                .map(|mask| self.evaluate_slice(mask, rest, degree))
                .try_reduce(|| vec![F::zero(); degree + 1], add)
        } else {
            (0..total).try_fold(vec![F::zero(); degree + 1], |acc, mask| {
                add(acc, self.evaluate_slice(mask, rest, degree)?)
            })
        }
    }
}

impl<'a, F: Field, O: PolynomialOracle<F>> SumCheckProver<F> for OracleProver<'a, F, O> {
    fn num_vars(&self) -> usize {
        self.tracker.num_vars
    }

    fn round(&self) -> usize {
        self.tracker.round
    }

    #[tracing::instrument(
        skip_all,
        name = "OracleProver::claimed_sum",
        fields(num_vars = self.tracker.num_vars)
    )]
    fn claimed_sum(&self) -> Result<F> {
        let n = self.tracker.num_vars;
        let total = 1usize << n;
        let eval = |mask: usize| {
            let point: Vec<F> = (0..n)
                .map(|j| if (mask >> (n - 1 - j)) & 1 == 1 { F::one() } else { F::zero() })
                .collect();
            self.oracle.evaluate(&point)
        };
        if total >= self.parallel_threshold {
            (0..total)
                .into_par_iter()
                .map(eval)
                .try_reduce(F::zero, |a, b| Ok(a + b))
        } else {
            (0..total).try_fold(F::zero(), |acc, mask| Ok(acc + eval(mask)?))
        }
    }

    #[tracing::instrument(
        skip_all,
        name = "OracleProver::compute_round_polynomial",
        fields(round = self.tracker.round)
    )]
    fn compute_round_polynomial(&mut self) -> Result<UnivariatePolynomial<F>> {
        let round = self.tracker.begin_round()?;
        let rest = self.tracker.num_vars - round;
        let degree = self.oracle.degree_bound(round - 1);
        let evals = self.sum_slices(rest, degree)?;
        debug!(round, degree, sub_cube = 1usize << rest, "computed round polynomial");
        UnivariatePolynomial::from_evaluations(&evals)
    }

    fn receive_challenge(&mut self, challenge: F) -> Result<()> {
        let round = self.tracker.end_round()?;
        self.challenges.push(challenge);
        debug!(round, next_round = self.tracker.round, "prover received challenge");
        Ok(())
    }
}

/// Prover for g = Π_k Z_k with multilinear Z_k, holding the tables of
/// every factor and halving them as challenges arrive.
#[derive(Debug, Clone)]
pub struct FoldingProver<F: Field> {
    tables: Vec<MultilinearPolynomial<F>>,
    tracker: RoundTracker,
    parallel_threshold: usize,
}

impl<F: Field> FoldingProver<F> {
    pub fn new(factors: Vec<MultilinearPolynomial<F>>) -> Result<Self> {
        let product = ProductPolynomial::new(factors)?;
        let num_vars = product.num_vars();
        if num_vars == 0 {
            return Err(SumCheckError::InvalidParameter(
                "polynomial must have at least one variable".into(),
            ));
        }
        Ok(Self {
            tables: product.factors().to_vec(),
            tracker: RoundTracker::new(num_vars),
            parallel_threshold: PARALLEL_THRESHOLD,
        })
    }

    /// Tables with at least this many entries per half are processed with rayon
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }

    pub fn from_multilinear(poly: MultilinearPolynomial<F>) -> Result<Self> {
        Self::new(vec![poly])
    }

    pub fn from_product(poly: &ProductPolynomial<F>) -> Result<Self> {
        Self::new(poly.factors().to_vec())
    }

    /// Degree of g in each variable: the number of factors
    pub fn degree(&self) -> usize {
        self.tables.len()
    }

    /// Per index i of the lower half, Π_k Z_k(x, i) at x = 0..=degree,
    /// using Z_k(x, i) = lo + x·(hi - lo)
    fn slice_products(&self, i: usize, half: usize) -> Vec<F> {
        let degree = self.degree();
        let mut out = vec![F::one(); degree + 1];
        for table in &self.tables {
            let lo = table.evaluations[i];
            let step = table.evaluations[i + half] - lo;
            let mut value = lo;
            for slot in out.iter_mut() {
                *slot *= value;
                value += step;
            }
        }
        out
    }
}

impl<F: Field> SumCheckProver<F> for FoldingProver<F> {
    fn num_vars(&self) -> usize {
        self.tracker.num_vars
    }

    fn round(&self) -> usize {
        self.tracker.round
    }

    fn claimed_sum(&self) -> Result<F> {
        let len = self.tables[0].evaluations.len();
        let product_at = |idx: usize| self.tables.iter().map(|t| t.evaluations[idx]).product::<F>();
        if len >= self.parallel_threshold {
            Ok((0..len).into_par_iter().map(product_at).sum())
        } else {
            Ok((0..len).map(product_at).sum())
        }
    }

    #[tracing::instrument(
        skip_all,
        name = "FoldingProver::compute_round_polynomial",
        fields(round = self.tracker.round)
    )]
    fn compute_round_polynomial(&mut self) -> Result<UnivariatePolynomial<F>> {
        let round = self.tracker.begin_round()?;
        let half = self.tables[0].evaluations.len() / 2;
        let degree = self.degree();
        let zero = || vec![F::zero(); degree + 1];
        let add = |mut acc: Vec<F>, other: Vec<F>| {
            for (a, b) in acc.iter_mut().zip(other) {
                *a += b;
            }
            acc
        };
        let evals = if half >= self.parallel_threshold {
            (0..half)
                .into_par_iter()
                .map(|i| self.slice_products(i, half))
                .reduce(zero, add)
        } else {
            (0..half).map(|i| self.slice_products(i, half)).fold(zero(), add)
        };
        debug!(round, degree, "computed round polynomial from folded tables");
        UnivariatePolynomial::from_evaluations(&evals)
    }

    fn receive_challenge(&mut self, challenge: F) -> Result<()> {
        let round = self.tracker.end_round()?;
        self.tables = self
            .tables
            .iter()
            .map(|t| t.fix_first_variable_with_threshold(challenge, self.parallel_threshold))
            .collect::<Result<_>>()?;
        debug!(round, remaining_vars = self.tables[0].num_vars, "folded tables");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Bls12381Fr as Fr;
    use crate::polynomial::ClosureOracle;
    use ark_ff::Zero;
    use ark_std::test_rng;
    use ark_std::UniformRand;
    use rand::Rng;

    fn random_mle(num_vars: usize) -> MultilinearPolynomial<Fr> {
        let mut rng = test_rng();
        let evals = (0..1usize << num_vars).map(|_| Fr::from(rng.gen::<u64>() % 7)).collect();
        MultilinearPolynomial::from_evaluations(evals, num_vars).unwrap()
    }

    #[test]
    fn prover_univariate_degree1() {
        let mut rng = test_rng();
        let poly = random_mle(3);
        let claimed_sum = poly.evaluations.iter().copied().fold(Fr::zero(), |a, b| a + b);
        let mut prover = OracleProver::new(&poly).unwrap();
        assert_eq!(prover.claimed_sum().unwrap(), claimed_sum);

        // Round 1: no prefix, g1(0) + g1(1) must equal total sum
        let g1 = prover.compute_round_polynomial().unwrap();
        assert!(g1.degree() <= 1);
        assert_eq!(g1.sum_over_boolean(), claimed_sum);

        let r1 = Fr::rand(&mut rng);
        prover.receive_challenge(r1).unwrap();

        // Round 2 with prefix [r1]
        let g2 = prover.compute_round_polynomial().unwrap();
        assert_eq!(g2.sum_over_boolean(), g1.evaluate(r1));
    }

    #[test]
    fn folding_and_oracle_provers_agree() {
        let mut rng = test_rng();
        let factors = vec![random_mle(4), random_mle(4), random_mle(4)];
        let product = ProductPolynomial::new(factors.clone()).unwrap();
        let mut oracle_prover = OracleProver::new(&product).unwrap().with_parallel_threshold(4);
        let mut folding_prover = FoldingProver::new(factors).unwrap();

        assert_eq!(oracle_prover.claimed_sum().unwrap(), folding_prover.claimed_sum().unwrap());
        assert_eq!(folding_prover.claimed_sum().unwrap(), product.sum_over_hypercube());

        for _ in 0..4 {
            let a = oracle_prover.compute_round_polynomial().unwrap();
            let b = folding_prover.compute_round_polynomial().unwrap();
            assert_eq!(a, b);
            assert!(a.degree() <= 3);
            let r = Fr::rand(&mut rng);
            oracle_prover.receive_challenge(r).unwrap();
            folding_prover.receive_challenge(r).unwrap();
        }
        assert_eq!(oracle_prover.round(), 5);
    }

    #[test]
    fn folding_threshold_does_not_change_messages() {
        let mut rng = test_rng();
        let factors = vec![random_mle(5), random_mle(5)];
        let mut sequential = FoldingProver::new(factors.clone())
            .unwrap()
            .with_parallel_threshold(usize::MAX);
        let mut parallel = FoldingProver::new(factors).unwrap().with_parallel_threshold(1);

        assert_eq!(sequential.claimed_sum().unwrap(), parallel.claimed_sum().unwrap());
        for _ in 0..5 {
            assert_eq!(
                sequential.compute_round_polynomial().unwrap(),
                parallel.compute_round_polynomial().unwrap()
            );
            let r = Fr::rand(&mut rng);
            sequential.receive_challenge(r).unwrap();
            parallel.receive_challenge(r).unwrap();
        }
    }

    #[test]
    fn out_of_order_calls_are_malformed() {
        let poly = random_mle(2);
        let mut prover = FoldingProver::from_multilinear(poly).unwrap();

        let err = prover.receive_challenge(Fr::from(3u64)).unwrap_err();
        assert!(matches!(err, SumCheckError::MalformedState(_)));

        prover.compute_round_polynomial().unwrap();
        let err = prover.compute_round_polynomial().unwrap_err();
        assert!(matches!(err, SumCheckError::MalformedState(_)));

        prover.receive_challenge(Fr::from(3u64)).unwrap();
        prover.compute_round_polynomial().unwrap();
        prover.receive_challenge(Fr::from(5u64)).unwrap();
        let err = prover.compute_round_polynomial().unwrap_err();
        assert!(matches!(err, SumCheckError::MalformedState(_)));
    }

    #[test]
    fn honest_rounds_respect_declared_bounds() {
        // g(x, y) = x²·y + y: bounds (2, 1)
        let oracle = ClosureOracle::new(vec![2, 1], |p: &[Fr]| p[0] * p[0] * p[1] + p[1]).unwrap();
        let mut prover = OracleProver::new(&oracle).unwrap();
        let g1 = prover.compute_round_polynomial().unwrap();
        assert_eq!(g1.degree(), 2);
        prover.receive_challenge(Fr::from(9u64)).unwrap();
        let g2 = prover.compute_round_polynomial().unwrap();
        assert_eq!(g2.degree(), 1);
        // g(9, y) = 82·y
        assert_eq!(g2.evaluate(Fr::from(1u64)), Fr::from(82u64));
    }

    #[test]
    fn deterministic_for_identical_challenges() {
        let poly = random_mle(5);
        let challenges: Vec<Fr> = (1..=5u64).map(|i| Fr::from(i * 1_000_003)).collect();
        let run = || {
            let mut prover = OracleProver::new(&poly).unwrap();
            challenges
                .iter()
                .map(|r| {
                    let g = prover.compute_round_polynomial().unwrap();
                    prover.receive_challenge(*r).unwrap();
                    g
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
