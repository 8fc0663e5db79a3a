//! Walk through sum-check sessions and print every round
//!
//! Run with `RUST_LOG=debug` to see the protocol's own tracing output.
//!
//! - an honest prover for g(a, b, c) = a·b²·c + b + c³ over Fp61
//! - the same oracle with a false claim
//! - a Fiat-Shamir proof for a product of multilinear polynomials over BLS12-381 Fr

use ark_serialize::CanonicalSerialize;
use ark_std::test_rng;
use sumcheck_ip::field::{Bls12381Fr as Fr, Fp61};
use sumcheck_ip::sumcheck::RngChallenger;
use sumcheck_ip::{
    ClosureOracle, FoldingProver, MultilinearPolynomial, OracleProver, PolynomialOracle,
    ProductPolynomial, ProtocolStatus, SumCheckField, SumCheckProof, SumCheckProtocol,
    SumCheckProver, Transcript,
};
use tracing_subscriber::EnvFilter;

fn main() -> sumcheck_ip::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Interactive sum-check over {} ===", Fp61::field_name());
    let g = ClosureOracle::new(vec![1, 2, 3], |p: &[Fp61]| {
        p[0] * p[1] * p[1] * p[2] + p[1] + p[2] * p[2] * p[2]
    })?;
    let bounds = g.degree_bounds()?;
    println!("degree bounds: {:?}", bounds.as_slice());
    println!("soundness error: ≤ {:e}", bounds.soundness_error::<Fp61>());

    let prover = OracleProver::new(&g)?;
    let claimed_sum = prover.claimed_sum()?;
    println!("claimed sum H = {}", claimed_sum);

    let mut protocol = SumCheckProtocol::new(&g, prover, claimed_sum, RngChallenger::from_os())?;
    while *protocol.advance_round()? == ProtocolStatus::Running {
        println!("  {}", protocol.state());
    }
    for record in protocol.rounds() {
        println!(
            "  round {}: g_{}(X) coefficients {:?}, r_{} = {}",
            record.round,
            record.round,
            record.polynomial.coeffs().iter().map(|c| c.to_string()).collect::<Vec<_>>(),
            record.round,
            record.challenge
        );
    }
    println!("status: {:?}", protocol.state().status());

    println!("\n=== False claim H + 1 ===");
    let prover = OracleProver::new(&g)?;
    let outcome =
        SumCheckProtocol::new(&g, prover, claimed_sum + Fp61::from(1u64), RngChallenger::from_os())?
            .run();
    match outcome.rejection() {
        Some(reason) => println!("rejected after {} rounds: {}", outcome.rounds.len(), reason),
        None => println!("unexpectedly accepted"),
    }

    println!("\n=== Fiat-Shamir proof over {} ===", Fr::field_name());
    let mut rng = test_rng();
    let num_vars = 10;
    let factors: Vec<MultilinearPolynomial<Fr>> = (0..2)
        .map(|_| {
            let evals = (0..1usize << num_vars).map(|_| Fr::random(&mut rng)).collect();
            MultilinearPolynomial::from_evaluations(evals, num_vars)
        })
        .collect::<sumcheck_ip::Result<_>>()?;
    let product = ProductPolynomial::new(factors)?;
    let sum = product.sum_over_hypercube();
    let bounds = product.degree_bounds()?;

    let mut prover = FoldingProver::from_product(&product)?;
    let mut transcript = Transcript::new(b"sumcheck-demo");
    let (proof, _) = SumCheckProof::prove(&mut prover, sum, &bounds, &mut transcript)?;

    let mut bytes = Vec::new();
    proof.serialize_compressed(&mut bytes)?;
    println!(
        "proof: {} rounds, {} field elements, {} bytes",
        proof.round_polys.len(),
        proof.num_field_elements(),
        bytes.len()
    );

    let mut transcript = Transcript::new(b"sumcheck-demo");
    let point = proof.verify(sum, &product, &mut transcript)?;
    println!("verified; random point has {} coordinates", point.len());

    Ok(())
}
