//! Logistic sigmoid and its derivatives up to fourth order.
//!
//! Every derivative is written as a polynomial in `s = σ(z)`, so one
//! exponential serves each evaluation.

/// Highest derivative order tabulated here.
pub const MAX_ORDER: usize = 4;

/// σ(z) = 1 / (1 + e^{-z}), evaluated without overflowing for large |z|.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// The `order`-th derivative of σ at `z`.
///
/// Jets never request more than their nesting depth allows, which is at most
/// `MAX_ORDER`. Higher orders yield NaN, which training reports as
/// `NonFiniteUpdate`.
pub fn derivative(order: usize, z: f64) -> f64 {
    debug_assert!(
        order <= MAX_ORDER,
        "sigmoid derivative of order {} requested, only {} are tabulated",
        order,
        MAX_ORDER
    );
    let s = sigmoid(z);
    let ds = s * (1.0 - s);
    match order {
        0 => s,
        1 => ds,
        2 => ds * (1.0 - 2.0 * s),
        3 => ds * (1.0 - 6.0 * s + 6.0 * s * s),
        4 => ds * (1.0 - 2.0 * s) * (1.0 - 12.0 * s + 12.0 * s * s),
        _ => f64::NAN,
    }
}
