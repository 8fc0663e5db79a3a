//! BLS12-381 scalar field
//!
//! Wrapper around ark-bls12-381 scalar field (Fr), the default field for
//! production-sized instances (|F| ~ 2^255).

use super::SumCheckField;
pub use ark_bls12_381::Fr;

impl SumCheckField for Fr {
    fn field_name() -> &'static str {
        "BLS12-381 Scalar Field (Fr)"
    }
}
