//! Polynomials the sum-check protocol is run over
//!
//! MLE definition (paper §3.3):
//! Z̃(x) = Σ Z(e) · ẽq(x, e), where x ∈ F^ℓ, e ∈ {0,1}^ℓ
//!
//! The protocol itself only needs the [`PolynomialOracle`] view.

pub mod closure;
pub mod degree;
pub mod eq;
pub mod multilinear;
pub mod oracle;
pub mod product;

pub use closure::ClosureOracle;
pub use degree::DegreeBounds;
pub use eq::eq_table;
pub use multilinear::MultilinearPolynomial;
pub use oracle::{ensure_arity, PolynomialOracle};
pub use product::ProductPolynomial;
