//! Protocol orchestrator
//!
//! Owns the prover, the verifier and the single [`ProtocolState`], and
//! moves messages between the two roles one round at a time. The first
//! failed check ends the session: the state becomes `Rejected` and no
//! further round is requested from the prover.

use core::fmt;

use tracing::{debug, info, warn};

use super::challenge::ChallengeSource;
use super::prover::{OracleProver, SumCheckProver};
use super::univariate::UnivariatePolynomial;
use super::verifier::SumCheckVerifier;
use crate::config::SumCheckConfig;
use crate::errors::{Result, SumCheckError};
use crate::field::SumCheckField;
use crate::polynomial::PolynomialOracle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolStatus {
    Running,
    Accepted,
    /// Terminal, with the machine-readable reason
    Rejected(SumCheckError),
}

impl ProtocolStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ProtocolStatus::Running)
    }
}

/// Round index, challenges so far, the current claim c_r and the status
#[derive(Debug, Clone)]
pub struct ProtocolState<F: SumCheckField> {
    num_vars: usize,
    round: usize,
    claimed_sum: F,
    current_claim: F,
    challenges: Vec<F>,
    status: ProtocolStatus,
}

impl<F: SumCheckField> ProtocolState<F> {
    fn new(claimed_sum: F, num_vars: usize) -> Self {
        Self {
            num_vars,
            round: 1,
            claimed_sum,
            current_claim: claimed_sum,
            challenges: Vec::with_capacity(num_vars),
            status: ProtocolStatus::Running,
        }
    }

    /// Current round r, 1..=n while running, n+1 after the last round
    pub fn round(&self) -> usize {
        self.round
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// H, the claim the session started from
    pub fn claimed_sum(&self) -> F {
        self.claimed_sum
    }

    /// c_r; for r = 1 this is H, afterwards g_{r-1}(r_{r-1})
    pub fn current_claim(&self) -> F {
        self.current_claim
    }

    pub fn challenges(&self) -> &[F] {
        &self.challenges
    }

    pub fn status(&self) -> &ProtocolStatus {
        &self.status
    }
}

impl<F: SumCheckField> fmt::Display for ProtocolState<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Protocol(round: {}/{}, H: {}, claim: {}, challenges: [",
            self.round, self.num_vars, self.claimed_sum, self.current_claim
        )?;
        for (i, r) in self.challenges.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", r)?;
        }
        write!(f, "], status: {:?})", self.status)
    }
}

/// One completed round as seen on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRecord<F: SumCheckField> {
    pub round: usize,
    pub polynomial: UnivariatePolynomial<F>,
    pub challenge: F,
}

/// Result of a finished session
#[derive(Debug, Clone)]
pub struct ProtocolOutcome<F: SumCheckField> {
    pub status: ProtocolStatus,
    pub challenges: Vec<F>,
    pub rounds: Vec<RoundRecord<F>>,
}

impl<F: SumCheckField> ProtocolOutcome<F> {
    pub fn is_accepted(&self) -> bool {
        self.status == ProtocolStatus::Accepted
    }

    pub fn rejection(&self) -> Option<&SumCheckError> {
        match &self.status {
            ProtocolStatus::Rejected(err) => Some(err),
            _ => None,
        }
    }

    /// The random point r_1..r_n on acceptance, the rejection reason otherwise
    pub fn into_result(self) -> Result<Vec<F>> {
        match self.status {
            ProtocolStatus::Accepted => Ok(self.challenges),
            ProtocolStatus::Rejected(err) => Err(err),
            ProtocolStatus::Running => Err(SumCheckError::MalformedState(
                "session has not finished".into(),
            )),
        }
    }
}

pub struct SumCheckProtocol<'a, F, O, P, C>
where
    F: SumCheckField,
    O: PolynomialOracle<F>,
    P: SumCheckProver<F>,
    C: ChallengeSource<F>,
{
    prover: P,
    verifier: SumCheckVerifier<'a, F, O, C>,
    state: ProtocolState<F>,
    rounds: Vec<RoundRecord<F>>,
}

impl<'a, F, O, P, C> SumCheckProtocol<'a, F, O, P, C>
where
    F: SumCheckField,
    O: PolynomialOracle<F>,
    P: SumCheckProver<F>,
    C: ChallengeSource<F>,
{
    /// Start a session for the claim Σ_{x∈{0,1}^n} g(x) = `claimed_sum`
    pub fn new(oracle: &'a O, prover: P, claimed_sum: F, challenger: C) -> Result<Self> {
        let num_vars = oracle.num_vars();
        if num_vars == 0 {
            return Err(SumCheckError::InvalidParameter(
                "function arity must be at least 1".into(),
            ));
        }
        if prover.num_vars() != num_vars || prover.round() != 1 {
            return Err(SumCheckError::MalformedState(format!(
                "prover is at round {} of {} variables, oracle has {} variables",
                prover.round(),
                prover.num_vars(),
                num_vars
            )));
        }
        let verifier = SumCheckVerifier::new(oracle, claimed_sum, challenger)?;
        Ok(Self {
            prover,
            verifier,
            state: ProtocolState::new(claimed_sum, num_vars),
            rounds: Vec::with_capacity(num_vars),
        })
    }

    pub fn state(&self) -> &ProtocolState<F> {
        &self.state
    }

    pub fn prover(&self) -> &P {
        &self.prover
    }

    pub fn rounds(&self) -> &[RoundRecord<F>] {
        &self.rounds
    }

    fn finish(&mut self, status: ProtocolStatus) {
        match &status {
            ProtocolStatus::Accepted => info!(state = %self.state, "sum-check accepted"),
            ProtocolStatus::Rejected(err) => {
                warn!(round = self.state.round, error = %err, "sum-check rejected")
            }
            ProtocolStatus::Running => {}
        }
        self.state.status = status;
    }

    fn exchange(&mut self, round: usize) -> Result<()> {
        let poly = self.prover.compute_round_polynomial()?;
        self.verifier.check_round_polynomial(round, &poly)?;
        let challenge = self.verifier.sample_challenge()?;
        self.prover.receive_challenge(challenge)?;

        self.state.current_claim = poly.evaluate(challenge);
        self.state.challenges.push(challenge);
        self.state.round += 1;
        self.rounds.push(RoundRecord {
            round,
            polynomial: poly,
            challenge,
        });
        Ok(())
    }

    /// Run exactly one round; after round n this also runs the final check.
    /// Rejections are reported through the returned status. Calling this
    /// on a finished session is a `MalformedState` error.
    #[tracing::instrument(
        skip_all,
        name = "SumCheckProtocol::advance_round",
        fields(round = self.state.round)
    )]
    pub fn advance_round(&mut self) -> Result<&ProtocolStatus> {
        if self.state.status.is_terminal() {
            return Err(SumCheckError::MalformedState(format!(
                "sum-check session already finished: {:?}",
                self.state.status
            )));
        }
        let round = self.state.round;
        debug!(state = %self.state, "advancing");

        if let Err(err) = self.exchange(round) {
            self.finish(ProtocolStatus::Rejected(err));
            return Ok(&self.state.status);
        }

        if round == self.state.num_vars {
            let status = match self.verifier.final_check() {
                Ok(()) => ProtocolStatus::Accepted,
                Err(err) => ProtocolStatus::Rejected(err),
            };
            self.finish(status);
        }
        Ok(&self.state.status)
    }

    /// Advance until the session is accepted or rejected
    pub fn run(mut self) -> ProtocolOutcome<F> {
        while !self.state.status.is_terminal() {
            if self.advance_round().is_err() {
                break;
            }
        }
        ProtocolOutcome {
            status: self.state.status,
            challenges: self.state.challenges,
            rounds: self.rounds,
        }
    }
}

/// Run an interactive session for `oracle` with an honest [`OracleProver`]
/// and the challenge source selected by `config`
pub fn run_sumcheck<F, O>(
    oracle: &O,
    claimed_sum: F,
    config: &SumCheckConfig,
) -> Result<ProtocolOutcome<F>>
where
    F: SumCheckField,
    O: PolynomialOracle<F>,
{
    config.validate()?;
    if oracle.num_vars() > config.max_num_vars {
        return Err(SumCheckError::InvalidParameter(format!(
            "{} variables exceeds the configured maximum of {}",
            oracle.num_vars(),
            config.max_num_vars
        )));
    }
    let prover = OracleProver::new(oracle)?.with_parallel_threshold(config.parallel_threshold);
    let challenger = config.challenger::<F>();
    let protocol = SumCheckProtocol::new(oracle, prover, claimed_sum, challenger)?;
    Ok(protocol.run())
}
