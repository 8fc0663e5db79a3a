//! Univariate round polynomials
//!
//! A round message g_j(X) in coefficient form [c0, c1, ..., cd] for
//! c0 + c1·X + ... + cd·X^d. Trailing zero coefficients are stripped on
//! construction, so `degree()` is the true degree the verifier enforces,
//! whatever length the prover padded its message to.

use ark_ff::Field;
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
};
use ark_std::vec::Vec;

use crate::errors::SumCheckError;
use crate::field::SumCheckField;

#[derive(Debug, Clone, PartialEq, Eq, CanonicalSerialize)]
pub struct UnivariatePolynomial<F: Field> {
    /// Coefficients [c0, c1, c2, ...] for c0 + c1*t + c2*t² + ...
    coeffs: Vec<F>,
}

impl<F: Field> Valid for UnivariatePolynomial<F> {
    /// Only the trimmed form is canonical
    fn check(&self) -> Result<(), SerializationError> {
        if self.coeffs.last().map_or(false, |c| c.is_zero()) {
            return Err(SerializationError::InvalidData);
        }
        Ok(())
    }
}

impl<F: Field> CanonicalDeserialize for UnivariatePolynomial<F> {
    /// Rejects trailing zero coefficients when validating; without
    /// validation they are trimmed instead
    fn deserialize_with_mode<R: Read>(
        reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let coeffs = Vec::<F>::deserialize_with_mode(reader, compress, validate)?;
        match validate {
            Validate::Yes => {
                let poly = Self { coeffs };
                poly.check()?;
                Ok(poly)
            }
            Validate::No => Ok(Self::new(coeffs)),
        }
    }
}

impl<F: Field> UnivariatePolynomial<F> {
    pub fn new(mut coeffs: Vec<F>) -> Self {
        while coeffs.last().map_or(false, |c| c.is_zero()) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    pub fn coeffs(&self) -> &[F] {
        &self.coeffs
    }

    /// Degree of the polynomial; the zero polynomial reports 0
    pub fn degree(&self) -> usize {
        self.coeffs.iter().rposition(|c| !c.is_zero()).unwrap_or(0)
    }

    pub fn evaluate(&self, t: F) -> F {
        // Horner's method
        self.coeffs
            .iter()
            .rev()
            .fold(F::zero(), |acc, c| acc * t + c)
    }

    /// Returns g(0) + g(1)
    /// g(0) = c0, g(1) = Σ c_i
    pub fn sum_over_boolean(&self) -> F {
        match self.coeffs.split_first() {
            Some((c0, _)) => *c0 + self.coeffs.iter().sum::<F>(),
            None => F::zero(),
        }
    }

    /// Evaluation form: [g(0), g(1), ..., g(count - 1)]
    pub fn evaluations(&self, count: usize) -> Vec<F> {
        (0..count as u64).map(|i| self.evaluate(F::from(i))).collect()
    }

    /// Lagrange interpolation from points (0, 1, 2, ..., d) -> (y0, y1, ..., yd)
    ///
    /// Fails only when the field characteristic is at most d, where the
    /// nodes 0..=d are no longer distinct.
    pub fn from_evaluations(ys: &[F]) -> crate::errors::Result<Self> {
        let n = ys.len();
        if n <= 1 {
            return Ok(Self::new(ys.to_vec()));
        }

        let mut coeffs = vec![F::zero(); n];
        for (i, y) in ys.iter().enumerate() {
            if y.is_zero() {
                continue;
            }
            // L_i(t) = Π_{j≠i} (t - j) / (i - j)
            let i_f = F::from(i as u64);
            let mut basis = Vec::with_capacity(n);
            basis.push(F::one());
            let mut denom = F::one();
            for j in (0..n).filter(|&j| j != i) {
                let j_f = F::from(j as u64);
                denom *= i_f - j_f;
                // multiply by (t - j)
                basis.push(F::zero());
                for k in (0..basis.len()).rev() {
                    let lower = if k > 0 { basis[k - 1] } else { F::zero() };
                    basis[k] = lower - basis[k] * j_f;
                }
            }
            let inv = denom.inverse().ok_or_else(|| {
                SumCheckError::InvalidParameter(format!(
                    "cannot interpolate {} points: field characteristic too small",
                    n
                ))
            })?;
            let scale = *y * inv;
            for (c, b) in coeffs.iter_mut().zip(basis.iter()) {
                *c += *b * scale;
            }
        }
        Ok(Self::new(coeffs))
    }
}

impl<F: SumCheckField> UnivariatePolynomial<F> {
    /// Wire encoding: u32 big-endian coefficient count, then each
    /// coefficient as a fixed-width big-endian field element
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + self.coeffs.len() * F::byte_width());
        out.extend_from_slice(&(self.coeffs.len() as u32).to_be_bytes());
        for c in &self.coeffs {
            out.extend_from_slice(&c.to_bytes_be());
        }
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> crate::errors::Result<Self> {
        if bytes.len() < 4 {
            return Err(SumCheckError::Serialization("missing coefficient count".into()));
        }
        let (prefix, body) = bytes.split_at(4);
        let len = u32::from_be_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize;
        let width = F::byte_width();
        if body.len() != len * width {
            return Err(SumCheckError::Serialization(format!(
                "{} coefficients need {} bytes, got {}",
                len,
                len * width,
                body.len()
            )));
        }
        let coeffs = body
            .chunks_exact(width)
            .map(F::from_bytes_be)
            .collect::<crate::errors::Result<Vec<F>>>()?;
        Ok(Self::new(coeffs))
    }
}
