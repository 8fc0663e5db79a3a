//! Equality polynomial ẽq(x, e) = Π_i (e_i·x_i + (1-e_i)·(1-x_i))

use ark_ff::Field;

/// All 2^ℓ values ẽq(x, e) for e ∈ {0,1}^ℓ, indexed with x_1 as the most
/// significant bit. O(2^ℓ) multiplications.
pub fn eq_table<F: Field>(x: &[F]) -> Vec<F> {
    let mut table = Vec::with_capacity(1 << x.len());
    table.push(F::one());
    for xi in x {
        let mut next = Vec::with_capacity(table.len() * 2);
        for w in &table {
            let hi = *w * xi;
            next.push(*w - hi);
            next.push(hi);
        }
        table = next;
    }
    table
}
