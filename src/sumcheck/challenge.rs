//! Sources of verifier randomness
//!
//! Soundness rests on each r_j being uniform over F and independent of the
//! prover's messages. Two sources qualify:
//! - [`RngChallenger`]: a cryptographically secure RNG (interactive
//!   protocol). The `CryptoRng` bound keeps weak generators out.
//! - [`TranscriptChallenger`]: Fiat-Shamir over a Blake2b transcript of the
//!   statement and every round polynomial (non-interactive protocol).

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use super::transcript::Transcript;
use super::univariate::UnivariatePolynomial;
use crate::errors::{Result, SumCheckError};
use crate::field::SumCheckField;
use crate::polynomial::DegreeBounds;

/// Extra bytes drawn beyond the field width so the reduction mod p is
/// statistically uniform (bias < 2^-128)
const UNIFORMITY_MARGIN: usize = 16;

pub trait ChallengeSource<F: SumCheckField> {
    /// Bind the statement being proven. Called once, before round 1.
    fn observe_statement(&mut self, _claimed_sum: &F, _bounds: &DegreeBounds) {}

    /// Record an accepted round polynomial
    fn observe_round(&mut self, _round: usize, _poly: &UnivariatePolynomial<F>) {}

    /// Produce r_round
    fn sample(&mut self, round: usize) -> Result<F>;
}

impl<F: SumCheckField, C: ChallengeSource<F> + ?Sized> ChallengeSource<F> for Box<C> {
    fn observe_statement(&mut self, claimed_sum: &F, bounds: &DegreeBounds) {
        (**self).observe_statement(claimed_sum, bounds)
    }

    fn observe_round(&mut self, round: usize, poly: &UnivariatePolynomial<F>) {
        (**self).observe_round(round, poly)
    }

    fn sample(&mut self, round: usize) -> Result<F> {
        (**self).sample(round)
    }
}

/// Uniform challenges from a cryptographically secure RNG
pub struct RngChallenger<R: RngCore + CryptoRng> {
    rng: R,
}

impl<R: RngCore + CryptoRng> RngChallenger<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngChallenger<OsRng> {
    /// Challenges drawn from the operating system's CSPRNG
    pub fn from_os() -> Self {
        Self::new(OsRng)
    }
}

impl<F: SumCheckField, R: RngCore + CryptoRng> ChallengeSource<F> for RngChallenger<R> {
    fn sample(&mut self, round: usize) -> Result<F> {
        let mut bytes = vec![0u8; F::byte_width() + UNIFORMITY_MARGIN];
        self.rng.try_fill_bytes(&mut bytes).map_err(|e| {
            SumCheckError::RandomnessUnavailable(format!("round {}: {}", round, e))
        })?;
        Ok(F::from_be_bytes_mod_order(&bytes))
    }
}

/// Fiat-Shamir challenges: r_j = H(statement, g_1, r_1, ..., g_j)
#[derive(Clone)]
pub struct TranscriptChallenger {
    transcript: Transcript,
}

impl TranscriptChallenger {
    pub fn new(domain_label: &[u8]) -> Self {
        Self {
            transcript: Transcript::new(domain_label),
        }
    }

    pub fn from_transcript(transcript: Transcript) -> Self {
        Self { transcript }
    }

    pub fn into_transcript(self) -> Transcript {
        self.transcript
    }
}

impl<F: SumCheckField> ChallengeSource<F> for TranscriptChallenger {
    fn observe_statement(&mut self, claimed_sum: &F, bounds: &DegreeBounds) {
        self.transcript.absorb_u64(b"num_vars", bounds.num_vars() as u64);
        for d in bounds.as_slice() {
            self.transcript.absorb_u64(b"degree_bound", *d as u64);
        }
        self.transcript.absorb_field(b"claimed_sum", claimed_sum);
    }

    fn observe_round(&mut self, round: usize, poly: &UnivariatePolynomial<F>) {
        self.transcript.absorb_u64(b"round", round as u64);
        self.transcript.absorb_polynomial(b"round_poly", poly);
    }

    fn sample(&mut self, _round: usize) -> Result<F> {
        Ok(self.transcript.squeeze_challenge(b"challenge"))
    }
}
