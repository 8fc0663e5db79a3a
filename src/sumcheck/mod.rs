//! Sum-check protocol
//!
//! Reduces a claim Σ_{x∈{0,1}^n} g(x) = H to a single evaluation
//! g(r_1, ..., r_n) at a random point, one variable per round.
//!
//! Supports both the interactive protocol ([`SumCheckProtocol`], with a
//! prover and a verifier exchanging messages) and a non-interactive proof
//! via Fiat-Shamir ([`SumCheckProof`]).

pub mod challenge;
mod proof;
mod protocol;
mod prover;
pub mod transcript;
mod univariate;
mod verifier;

pub use challenge::{ChallengeSource, RngChallenger, TranscriptChallenger};
pub use proof::{SubClaim, SumCheckProof};
pub use protocol::{
    run_sumcheck, ProtocolOutcome, ProtocolState, ProtocolStatus, RoundRecord, SumCheckProtocol,
};
pub use prover::{FoldingProver, OracleProver, SumCheckProver};
pub use transcript::Transcript;
pub use univariate::UnivariatePolynomial;
pub use verifier::{check_round, SumCheckVerifier, VerifierState};
