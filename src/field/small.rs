//! Word-sized prime fields
//!
//! - `Fp61`: Mersenne prime 2^61 - 1, large enough that toy polynomials
//!   never wrap around and the soundness error is ~2^-60 per degree.
//! - `Fp65521`, `Fp97`: deliberately small fields, used to observe the
//!   Schwartz-Zippel soundness error empirically.

use ark_ff::fields::{Fp64, MontBackend, MontConfig};

use super::SumCheckField;

#[derive(MontConfig)]
#[modulus = "2305843009213693951"]
#[generator = "37"]
pub struct Fp61Config;
pub type Fp61 = Fp64<MontBackend<Fp61Config, 1>>;

#[derive(MontConfig)]
#[modulus = "65521"]
#[generator = "17"]
pub struct Fp65521Config;
pub type Fp65521 = Fp64<MontBackend<Fp65521Config, 1>>;

#[derive(MontConfig)]
#[modulus = "97"]
#[generator = "5"]
pub struct Fp97Config;
pub type Fp97 = Fp64<MontBackend<Fp97Config, 1>>;

impl SumCheckField for Fp61 {
    fn field_name() -> &'static str {
        "Mersenne-61"
    }
}

impl SumCheckField for Fp65521 {
    fn field_name() -> &'static str {
        "F_65521"
    }
}

impl SumCheckField for Fp97 {
    fn field_name() -> &'static str {
        "F_97"
    }
}
