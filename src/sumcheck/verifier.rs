use ark_ff::Field;
use tracing::{debug, info, warn};

use super::challenge::ChallengeSource;
use super::univariate::UnivariatePolynomial;
use crate::errors::{Result, SumCheckError};
use crate::field::SumCheckField;
use crate::polynomial::{DegreeBounds, PolynomialOracle};

/// Verifier state machine. `Accepted` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifierState {
    /// Waiting for g_j
    AwaitingPolynomial(usize),
    /// g_j accepted, r_j not yet sampled
    AwaitingChallenge(usize),
    /// All n challenges sampled, oracle query pending
    FinalCheck,
    Accepted,
    Rejected,
}

impl VerifierState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, VerifierState::Accepted | VerifierState::Rejected)
    }
}

/// Stateless round check: degree bound first, then g_j(0) + g_j(1) = c_j
pub fn check_round<F: Field>(
    round: usize,
    poly: &UnivariatePolynomial<F>,
    expected_claim: F,
    bounds: &DegreeBounds,
) -> Result<()> {
    bounds.enforce(round, poly.degree())?;
    let actual = poly.sum_over_boolean();
    if actual != expected_claim {
        return Err(SumCheckError::consistency(round, expected_claim, actual));
    }
    Ok(())
}

/// Verifier for sum-check. Maintains the current claim, the challenges
/// sampled so far and the state machine; any failure is permanent.
pub struct SumCheckVerifier<'a, F: SumCheckField, O: PolynomialOracle<F>, C: ChallengeSource<F>> {
    oracle: &'a O,
    bounds: DegreeBounds,
    challenger: C,
    state: VerifierState,
    current_claim: F,
    challenges: Vec<F>,
    pending: Option<UnivariatePolynomial<F>>,
    rejection: Option<SumCheckError>,
}

impl<'a, F, O, C> SumCheckVerifier<'a, F, O, C>
where
    F: SumCheckField,
    O: PolynomialOracle<F>,
    C: ChallengeSource<F>,
{
    pub fn new(oracle: &'a O, claimed_sum: F, mut challenger: C) -> Result<Self> {
        let bounds = oracle.degree_bounds()?;
        challenger.observe_statement(&claimed_sum, &bounds);
        Ok(Self {
            oracle,
            challenges: Vec::with_capacity(bounds.num_vars()),
            bounds,
            challenger,
            state: VerifierState::AwaitingPolynomial(1),
            current_claim: claimed_sum,
            pending: None,
            rejection: None,
        })
    }

    pub fn state(&self) -> VerifierState {
        self.state
    }

    pub fn num_vars(&self) -> usize {
        self.bounds.num_vars()
    }

    pub fn bounds(&self) -> &DegreeBounds {
        &self.bounds
    }

    /// c_j: the value g_j(0) + g_j(1) must match in the current round
    pub fn current_claim(&self) -> F {
        self.current_claim
    }

    pub fn challenges(&self) -> &[F] {
        &self.challenges
    }

    /// Why the verifier rejected, once it has
    pub fn rejection(&self) -> Option<&SumCheckError> {
        self.rejection.as_ref()
    }

    fn guard_terminal(&self, operation: &str) -> Result<()> {
        if self.state.is_terminal() {
            return Err(SumCheckError::MalformedState(format!(
                "{} called on a finished session ({:?})",
                operation, self.state
            )));
        }
        Ok(())
    }

    fn reject(&mut self, err: SumCheckError) -> SumCheckError {
        warn!(state = ?self.state, error = %err, "verifier rejects");
        self.state = VerifierState::Rejected;
        self.pending = None;
        self.rejection = Some(err.clone());
        err
    }

    /// Check g_round against the declared bound and the running claim
    #[tracing::instrument(
        skip_all,
        name = "SumCheckVerifier::check_round_polynomial",
        fields(round = round)
    )]
    pub fn check_round_polynomial(
        &mut self,
        round: usize,
        poly: &UnivariatePolynomial<F>,
    ) -> Result<()> {
        self.guard_terminal("check_round_polynomial")?;
        if self.state != VerifierState::AwaitingPolynomial(round) {
            return Err(self.reject(SumCheckError::MalformedState(format!(
                "polynomial for round {} received in state {:?}",
                round, self.state
            ))));
        }
        if let Err(err) = check_round(round, poly, self.current_claim, &self.bounds) {
            return Err(self.reject(err));
        }
        self.challenger.observe_round(round, poly);
        self.pending = Some(poly.clone());
        self.state = VerifierState::AwaitingChallenge(round);
        debug!(round, degree = poly.degree(), "round polynomial accepted");
        Ok(())
    }

    /// Sample r_j for the polynomial just accepted and fix c_{j+1} = g_j(r_j)
    pub fn sample_challenge(&mut self) -> Result<F> {
        self.guard_terminal("sample_challenge")?;
        let round = match self.state {
            VerifierState::AwaitingChallenge(round) => round,
            state => {
                return Err(self.reject(SumCheckError::MalformedState(format!(
                    "challenge requested in state {:?} before a polynomial was accepted",
                    state
                ))))
            }
        };
        let challenge = match self.challenger.sample(round) {
            Ok(r) => r,
            Err(err) => return Err(self.reject(err)),
        };
        let Some(poly) = self.pending.take() else {
            let err = SumCheckError::MalformedState("accepted polynomial missing".into());
            return Err(self.reject(err));
        };
        self.current_claim = poly.evaluate(challenge);
        self.challenges.push(challenge);
        self.state = if round == self.num_vars() {
            VerifierState::FinalCheck
        } else {
            VerifierState::AwaitingPolynomial(round + 1)
        };
        Ok(challenge)
    }

    /// Compare g(r_1, ..., r_n) with g_n(r_n). The only oracle query.
    #[tracing::instrument(
        skip_all,
        name = "SumCheckVerifier::final_check",
        fields(num_vars = self.bounds.num_vars())
    )]
    pub fn final_check(&mut self) -> Result<()> {
        self.guard_terminal("final_check")?;
        if self.state != VerifierState::FinalCheck {
            return Err(self.reject(SumCheckError::MalformedState(format!(
                "final check requested in state {:?}",
                self.state
            ))));
        }
        let oracle_value = match self.oracle.evaluate(&self.challenges) {
            Ok(v) => v,
            Err(err) => return Err(self.reject(err)),
        };
        if oracle_value != self.current_claim {
            return Err(self.reject(SumCheckError::final_check(oracle_value, self.current_claim)));
        }
        self.state = VerifierState::Accepted;
        info!(num_vars = self.num_vars(), "verifier accepts");
        Ok(())
    }
}
