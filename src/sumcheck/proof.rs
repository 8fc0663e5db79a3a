//! Non-interactive sum-check proof
//!
//! The prover runs the same rounds as in the interactive protocol, taking
//! r_j from a [`TranscriptChallenger`]; the verifier replays the
//! transcript. Verification ends in a [`SubClaim`]: "g(point) =
//! expected_evaluation", which the caller discharges either with direct
//! oracle access or through an external commitment opening.

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::vec::Vec;
use tracing::debug;

use super::challenge::{ChallengeSource, TranscriptChallenger};
use super::prover::SumCheckProver;
use super::transcript::Transcript;
use super::univariate::UnivariatePolynomial;
use super::verifier::check_round;
use crate::errors::SumCheckError;
use crate::field::SumCheckField;
use crate::polynomial::{DegreeBounds, PolynomialOracle};

/// Round polynomials g_1..g_n. The claimed value of g(r_1, ..., r_n) is
/// g_n(r_n), which the verifier recomputes, so it is not sent.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct SumCheckProof<F: SumCheckField> {
    pub round_polys: Vec<UnivariatePolynomial<F>>,
}

/// What remains to be checked after the rounds: g(point) = expected_evaluation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubClaim<F: SumCheckField> {
    pub point: Vec<F>,
    pub expected_evaluation: F,
}

impl<F: SumCheckField> SubClaim<F> {
    /// Discharge the sub-claim with one oracle query
    pub fn check<O: PolynomialOracle<F>>(&self, oracle: &O) -> crate::errors::Result<()> {
        let actual = oracle.evaluate(&self.point)?;
        if actual != self.expected_evaluation {
            return Err(SumCheckError::final_check(actual, self.expected_evaluation));
        }
        Ok(())
    }
}

impl<F: SumCheckField> SumCheckProof<F> {
    /// Run `prover` to completion against Fiat-Shamir challenges
    #[tracing::instrument(
        skip_all,
        name = "SumCheckProof::prove",
        fields(num_vars = prover.num_vars())
    )]
    pub fn prove<P: SumCheckProver<F>>(
        prover: &mut P,
        claimed_sum: F,
        bounds: &DegreeBounds,
        transcript: &mut Transcript,
    ) -> crate::errors::Result<(Self, Vec<F>)> {
        if bounds.num_vars() != prover.num_vars() {
            return Err(SumCheckError::InvalidParameter(format!(
                "{} degree bounds for a {}-variable prover",
                bounds.num_vars(),
                prover.num_vars()
            )));
        }
        let mut challenger = TranscriptChallenger::from_transcript(transcript.clone());
        challenger.observe_statement(&claimed_sum, bounds);

        let num_vars = prover.num_vars();
        let mut round_polys = Vec::with_capacity(num_vars);
        let mut challenges = Vec::with_capacity(num_vars);
        for round in 1..=num_vars {
            let poly = prover.compute_round_polynomial()?;
            challenger.observe_round(round, &poly);
            let r: F = challenger.sample(round)?;
            prover.receive_challenge(r)?;
            round_polys.push(poly);
            challenges.push(r);
        }
        *transcript = challenger.into_transcript();

        Ok((Self { round_polys }, challenges))
    }

    /// Replay the transcript and check every round, without touching g.
    /// Returns the sub-claim the caller still has to verify.
    #[tracing::instrument(
        skip_all,
        name = "SumCheckProof::verify_rounds",
        fields(num_vars = bounds.num_vars())
    )]
    pub fn verify_rounds(
        &self,
        claimed_sum: F,
        bounds: &DegreeBounds,
        transcript: &mut Transcript,
    ) -> crate::errors::Result<SubClaim<F>> {
        if self.round_polys.len() != bounds.num_vars() {
            return Err(SumCheckError::MalformedState(format!(
                "proof has {} round polynomials, expected {}",
                self.round_polys.len(),
                bounds.num_vars()
            )));
        }
        let mut challenger = TranscriptChallenger::from_transcript(transcript.clone());
        challenger.observe_statement(&claimed_sum, bounds);

        let mut current = claimed_sum;
        let mut point = Vec::with_capacity(bounds.num_vars());
        for (i, poly) in self.round_polys.iter().enumerate() {
            let round = i + 1;
            check_round(round, poly, current, bounds)?;
            challenger.observe_round(round, poly);
            let r: F = challenger.sample(round)?;
            current = poly.evaluate(r);
            point.push(r);
            debug!(round, "round polynomial verified");
        }
        *transcript = challenger.into_transcript();

        Ok(SubClaim {
            point,
            expected_evaluation: current,
        })
    }

    /// Full verification with oracle access to g
    pub fn verify<O: PolynomialOracle<F>>(
        &self,
        claimed_sum: F,
        oracle: &O,
        transcript: &mut Transcript,
    ) -> crate::errors::Result<Vec<F>> {
        let bounds = oracle.degree_bounds()?;
        let sub_claim = self.verify_rounds(claimed_sum, &bounds, transcript)?;
        sub_claim.check(oracle)?;
        Ok(sub_claim.point)
    }

    /// Number of field elements sent: Σ (deg g_j + 1)
    pub fn num_field_elements(&self) -> usize {
        self.round_polys.iter().map(|p| p.coeffs().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Bls12381Fr as Fr;
    use crate::polynomial::{MultilinearPolynomial, ProductPolynomial};
    use crate::sumcheck::prover::{FoldingProver, OracleProver};
    use ark_ff::One;
    use ark_std::test_rng;
    use rand::Rng;

    fn random_mle(num_vars: usize, seed_offset: u64) -> MultilinearPolynomial<Fr> {
        let mut rng = test_rng();
        let evals = (0..1usize << num_vars)
            .map(|_| Fr::from(rng.gen::<u64>() % 100 + seed_offset))
            .collect();
        MultilinearPolynomial::from_evaluations(evals, num_vars).unwrap()
    }

    fn prove(poly: &MultilinearPolynomial<Fr>) -> SumCheckProof<Fr> {
        let mut prover = FoldingProver::from_multilinear(poly.clone()).unwrap();
        let bounds = poly.degree_bounds().unwrap();
        let mut transcript = Transcript::new(b"sumcheck");
        SumCheckProof::prove(&mut prover, poly.sum_over_hypercube(), &bounds, &mut transcript)
            .unwrap()
            .0
    }

    #[test]
    fn sumcheck_nizk_complete() {
        let poly = random_mle(4, 0);
        let proof = prove(&poly);

        let mut verifier_transcript = Transcript::new(b"sumcheck");
        let r = proof
            .verify(poly.sum_over_hypercube(), &poly, &mut verifier_transcript)
            .unwrap();
        assert_eq!(r.len(), 4);
        let last = proof.round_polys.last().unwrap();
        assert_eq!(poly.evaluate(&r).unwrap(), last.evaluate(r[3]));
    }

    #[test]
    fn sumcheck_nizk_soundness_wrong_sum() {
        let poly = random_mle(3, 0);
        let proof = prove(&poly);
        let wrong_sum = poly.sum_over_hypercube() + Fr::one();

        let mut verifier_transcript = Transcript::new(b"sumcheck");
        let err = proof.verify(wrong_sum, &poly, &mut verifier_transcript).unwrap_err();
        assert!(matches!(err, SumCheckError::ConsistencyViolation { round: 1, .. }));
    }

    #[test]
    fn sumcheck_nizk_soundness_tampered_proof() {
        let poly = random_mle(3, 0);
        let mut proof = prove(&poly);
        let mut coeffs = proof.round_polys[1].coeffs().to_vec();
        coeffs[0] += Fr::one();
        proof.round_polys[1] = UnivariatePolynomial::new(coeffs);

        let mut verifier_transcript = Transcript::new(b"sumcheck");
        let err = proof
            .verify(poly.sum_over_hypercube(), &poly, &mut verifier_transcript)
            .unwrap_err();
        assert!(err.is_protocol_violation());
    }

    #[test]
    fn proof_for_one_polynomial_fails_for_another() {
        let poly = random_mle(3, 0);
        let other = random_mle(3, 1);
        let proof = prove(&poly);

        // the other polynomial's sum differs by 8, so round 1 already fails
        let mut transcript = Transcript::new(b"sumcheck");
        assert!(proof.verify(other.sum_over_hypercube(), &other, &mut transcript).is_err());

        // same claimed sum but a different g: only the oracle query can tell
        let mut transcript = Transcript::new(b"sumcheck");
        let err = proof
            .verify(poly.sum_over_hypercube(), &other, &mut transcript)
            .unwrap_err();
        assert!(matches!(err, SumCheckError::FinalCheckFailure { .. }));
    }

    #[test]
    fn sub_claim_without_oracle_access() {
        let factors = vec![random_mle(3, 0), random_mle(3, 2)];
        let product = ProductPolynomial::new(factors).unwrap();
        let bounds = product.degree_bounds().unwrap();
        let claimed_sum = product.sum_over_hypercube();

        let mut prover = OracleProver::new(&product).unwrap();
        let mut transcript = Transcript::new(b"product");
        let (proof, prover_point) =
            SumCheckProof::prove(&mut prover, claimed_sum, &bounds, &mut transcript).unwrap();
        assert!(proof.round_polys.iter().all(|p| p.degree() <= 2));

        let mut transcript = Transcript::new(b"product");
        let sub_claim = proof.verify_rounds(claimed_sum, &bounds, &mut transcript).unwrap();
        assert_eq!(sub_claim.point, prover_point);
        sub_claim.check(&product).unwrap();
    }

    #[test]
    fn round_count_mismatch_is_malformed() {
        let poly = random_mle(3, 0);
        let mut proof = prove(&poly);
        proof.round_polys.pop();
        let mut transcript = Transcript::new(b"sumcheck");
        let err = proof
            .verify(poly.sum_over_hypercube(), &poly, &mut transcript)
            .unwrap_err();
        assert!(matches!(err, SumCheckError::MalformedState(_)));
    }

    #[test]
    fn multiple_runs_same_result() {
        let poly = random_mle(3, 0);
        assert_eq!(prove(&poly), prove(&poly));
    }

    #[test]
    fn proof_serializes_compactly() {
        let poly = random_mle(5, 0);
        let proof = prove(&poly);
        // multilinear: each round sends at most 2 coefficients
        assert!(proof.num_field_elements() <= 2 * 5);

        let mut bytes = Vec::new();
        proof.serialize_compressed(&mut bytes).unwrap();
        let decoded = SumCheckProof::<Fr>::deserialize_compressed(&bytes[..]).unwrap();
        assert_eq!(decoded, proof);
    }

    #[test]
    fn padded_round_polynomial_fails_to_decode() {
        let poly = random_mle(3, 0);
        let proof = prove(&poly);

        // re-encode by hand with a zero appended to g_1
        let mut bytes = Vec::new();
        (proof.round_polys.len() as u64).serialize_compressed(&mut bytes).unwrap();
        for (i, g) in proof.round_polys.iter().enumerate() {
            let mut coeffs = g.coeffs().to_vec();
            if i == 0 {
                coeffs.push(Fr::from(0u64));
            }
            coeffs.serialize_compressed(&mut bytes).unwrap();
        }
        assert!(SumCheckProof::<Fr>::deserialize_compressed(&bytes[..]).is_err());

        let decoded = SumCheckProof::<Fr>::deserialize_compressed_unchecked(&bytes[..]).unwrap();
        assert_eq!(decoded, proof);
        assert_eq!(decoded.num_field_elements(), proof.num_field_elements());
        let mut transcript = Transcript::new(b"sumcheck");
        decoded
            .verify(poly.sum_over_hypercube(), &poly, &mut transcript)
            .unwrap();
    }
}
