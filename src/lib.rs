//! # sumcheck_ip: the sum-check interactive proof
//!
//! A prover convinces a verifier that Σ_{x∈{0,1}^n} g(x) = H for an
//! n-variate polynomial g over a finite field, in n rounds of one
//! univariate polynomial each, with a single oracle query to g at the end.
//! A false claim is accepted with probability at most Σ d_j / |F|.
//!
//! ## Structure
//!
//! - `field`: Prime fields the protocol runs over (BLS12-381 Fr, small primes)
//! - `polynomial`: Oracle trait, degree bounds, multilinear and product polynomials
//! - `sumcheck`: Prover, verifier, orchestrator and the Fiat-Shamir proof
//! - `config`: Runtime configuration
//! - `errors`: Error taxonomy
//!
//! ## Usage
//!
//! ```ignore
//! let g = MultilinearPolynomial::from_evaluations(evals, 3)?;
//! let outcome = run_sumcheck(&g, g.sum_over_hypercube(), &SumCheckConfig::default())?;
//! assert!(outcome.is_accepted());
//! ```

pub mod config;
pub mod errors;
pub mod field;
pub mod polynomial;
pub mod sumcheck;

// Re-exports
pub use config::{ChallengeSourceKind, SumCheckConfig};
pub use errors::{Result, SumCheckError};
pub use field::SumCheckField;
pub use polynomial::{
    ClosureOracle, DegreeBounds, MultilinearPolynomial, PolynomialOracle, ProductPolynomial,
};
pub use sumcheck::{
    run_sumcheck, FoldingProver, OracleProver, ProtocolOutcome, ProtocolStatus, SumCheckProof,
    SumCheckProtocol, SumCheckProver, SumCheckVerifier, Transcript, UnivariatePolynomial,
};
