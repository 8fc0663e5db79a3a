//! Blake2b-based Fiat-Shamir transcript
//!
//! Converts the interactive sum-check protocol to a non-interactive one by
//! deriving verifier challenges from a hash of every prior message.
//! Each absorbed message is framed as label || len (u64 LE) || bytes, and
//! every squeezed digest is fed back into the state, so a challenge binds
//! the full history including earlier challenges.

use blake2::Blake2b512;
use digest::{Digest, Output};

use super::univariate::UnivariatePolynomial;
use crate::field::SumCheckField;

#[derive(Clone)]
pub struct Transcript {
    hasher: Blake2b512,
}

impl Transcript {
    /// Create new transcript with a domain separator label
    pub fn new(domain_label: &[u8]) -> Self {
        let mut hasher = Blake2b512::default();
        hasher.update(domain_label);
        Self { hasher }
    }

    /// Append an arbitrary message
    pub fn absorb(&mut self, label: &[u8], bytes: &[u8]) {
        self.hasher.update(label);
        self.hasher.update((bytes.len() as u64).to_le_bytes());
        self.hasher.update(bytes);
    }

    pub fn absorb_u64(&mut self, label: &[u8], value: u64) {
        self.absorb(label, &value.to_be_bytes());
    }

    pub fn absorb_field<F: SumCheckField>(&mut self, label: &[u8], x: &F) {
        self.absorb(label, &x.to_bytes_be());
    }

    pub fn absorb_polynomial<F: SumCheckField>(
        &mut self,
        label: &[u8],
        poly: &UnivariatePolynomial<F>,
    ) {
        self.absorb(label, &poly.to_bytes());
    }

    /// Derive a challenge from the current transcript state.
    ///
    /// The 512-bit digest is reduced mod p; for fields of at most 256 bits
    /// the result is within 2^-256 of uniform.
    pub fn squeeze_challenge<F: SumCheckField>(&mut self, label: &[u8]) -> F {
        self.hasher.update(label);

        let digest: Output<Blake2b512> = self.hasher.clone().finalize();
        let challenge = F::from_le_bytes_mod_order(&digest);

        self.hasher.update(digest);
        challenge
    }

    /// Reset the transcript to a fresh domain
    pub fn reset(&mut self, domain_label: &[u8]) {
        *self = Self::new(domain_label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Bls12381Fr as Fr, Fp61};

    #[test]
    fn transcript_deterministic() {
        let mut t1 = Transcript::new(b"test");
        let mut t2 = Transcript::new(b"test");

        t1.absorb_field(b"m", &Fr::from(42u64));
        t2.absorb_field(b"m", &Fr::from(42u64));

        assert_eq!(t1.squeeze_challenge::<Fr>(b"c"), t2.squeeze_challenge::<Fr>(b"c"));
    }

    #[test]
    fn transcript_different_inputs() {
        let mut t1 = Transcript::new(b"test");
        let mut t2 = Transcript::new(b"test");

        t1.absorb_field(b"m", &Fr::from(42u64));
        t2.absorb_field(b"m", &Fr::from(43u64));

        assert_ne!(t1.squeeze_challenge::<Fr>(b"c"), t2.squeeze_challenge::<Fr>(b"c"));
    }

    #[test]
    fn transcript_different_labels() {
        let mut t1 = Transcript::new(b"test1");
        let mut t2 = Transcript::new(b"test2");

        t1.absorb_field(b"m", &Fr::from(42u64));
        t2.absorb_field(b"m", &Fr::from(42u64));

        assert_ne!(t1.squeeze_challenge::<Fr>(b"c"), t2.squeeze_challenge::<Fr>(b"c"));
    }

    #[test]
    fn consecutive_challenges_differ() {
        let mut t = Transcript::new(b"test");
        let a: Fp61 = t.squeeze_challenge(b"c");
        let b: Fp61 = t.squeeze_challenge(b"c");
        assert_ne!(a, b);
    }

    #[test]
    fn message_framing_prevents_concatenation_collisions() {
        let mut t1 = Transcript::new(b"test");
        let mut t2 = Transcript::new(b"test");
        t1.absorb(b"m", b"ab");
        t1.absorb(b"m", b"c");
        t2.absorb(b"m", b"a");
        t2.absorb(b"m", b"bc");
        assert_ne!(t1.squeeze_challenge::<Fp61>(b"c"), t2.squeeze_challenge::<Fp61>(b"c"));
    }

    #[test]
    fn reset_restores_fresh_state() {
        let mut t1 = Transcript::new(b"test");
        t1.absorb(b"m", b"noise");
        t1.reset(b"test");
        let mut t2 = Transcript::new(b"test");
        assert_eq!(t1.squeeze_challenge::<Fr>(b"c"), t2.squeeze_challenge::<Fr>(b"c"));
    }
}
