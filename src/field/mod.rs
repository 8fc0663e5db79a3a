//! Finite field arithmetic module
//!
//! The protocol is generic over any `ark_ff::PrimeField`. This module adds
//! the few extras the protocol needs on top of it (fixed-width encoding,
//! field size for the soundness bound) and a handful of concrete fields:
//! BLS12-381 Fr for production-sized instances and small word-sized primes
//! for tests and demos.

pub mod bls12_381;
pub mod small;

pub use ark_ff::{Field as ArkField, PrimeField};
pub use ark_bls12_381::Fr as Bls12381Fr;
pub use small::{Fp61, Fp65521, Fp97};

use ark_ff::BigInteger;

use crate::errors::{Result, SumCheckError};

/// Trait representing a prime field usable by the sum-check protocol
pub trait SumCheckField: PrimeField {
    /// Field name for debugging
    fn field_name() -> &'static str;

    /// Generate a uniformly random field element
    fn random<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        Self::rand(rng)
    }

    /// Width in bytes of the fixed-width encoding
    fn byte_width() -> usize {
        ((Self::MODULUS_BIT_SIZE + 7) / 8) as usize
    }

    /// Fixed-width big-endian encoding of the canonical representative
    fn to_bytes_be(&self) -> Vec<u8> {
        let mut bytes = self.into_bigint().to_bytes_be();
        let width = Self::byte_width();
        bytes.split_off(bytes.len() - width)
    }

    /// Inverse of [`SumCheckField::to_bytes_be`]. Non-canonical encodings
    /// (values >= p) are rejected.
    fn from_bytes_be(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::byte_width() {
            return Err(SumCheckError::Serialization(format!(
                "expected {} bytes for a {} element, got {}",
                Self::byte_width(),
                Self::field_name(),
                bytes.len()
            )));
        }
        let fe = Self::from_be_bytes_mod_order(bytes);
        if fe.to_bytes_be() != bytes {
            return Err(SumCheckError::Serialization(format!(
                "non-canonical {} encoding",
                Self::field_name()
            )));
        }
        Ok(fe)
    }

    /// |F| as a float; only used for reporting the Schwartz-Zippel bound
    fn order_f64() -> f64 {
        Self::MODULUS
            .as_ref()
            .iter()
            .rev()
            .fold(0f64, |acc, limb| acc * 18_446_744_073_709_551_616f64 + *limb as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::{One, Zero};
    use ark_std::test_rng;

    fn encoding_is_fixed_width<F: SumCheckField>() {
        let mut rng = test_rng();
        for _ in 0..20 {
            let a = F::random(&mut rng);
            let bytes = a.to_bytes_be();
            assert_eq!(bytes.len(), F::byte_width());
            assert_eq!(F::from_bytes_be(&bytes).unwrap(), a);
        }
        assert_eq!(F::zero().to_bytes_be(), vec![0u8; F::byte_width()]);
        let one = F::one().to_bytes_be();
        assert_eq!(*one.last().unwrap(), 1);
    }

    #[test]
    fn fixed_width_encodings() {
        encoding_is_fixed_width::<Bls12381Fr>();
        encoding_is_fixed_width::<Fp61>();
        encoding_is_fixed_width::<Fp97>();
        assert_eq!(Bls12381Fr::byte_width(), 32);
        assert_eq!(Fp61::byte_width(), 8);
        assert_eq!(Fp97::byte_width(), 1);
    }

    #[test]
    fn rejects_wrong_width_and_non_canonical() {
        assert!(matches!(
            Fp61::from_bytes_be(&[0u8; 4]),
            Err(SumCheckError::Serialization(_))
        ));
        // 0xff = 255 >= 97
        assert!(matches!(
            Fp97::from_bytes_be(&[0xff]),
            Err(SumCheckError::Serialization(_))
        ));
    }

    #[test]
    fn field_order() {
        assert_eq!(Fp97::order_f64(), 97.0);
        assert_eq!(Fp65521::order_f64(), 65521.0);
        assert!(Fp61::order_f64() > 2.0e18);
        assert!(Bls12381Fr::order_f64() > 1.0e76);
    }
}
