//! Decimal helpers shared by the resolvers.
//!
//! Every division in the pricing path goes through [`safe_div`] so a zero
//! reserve or an unset native price degrades to zero instead of panicking.

use bigdecimal::BigDecimal;
use num_traits::Zero;
use once_cell::sync::Lazy;

/// 2 as BigDecimal. Used for averaging both sides of a swap and for
/// extrapolating the unknown side of a balanced pool.
pub static TWO_BD: Lazy<BigDecimal> = Lazy::new(|| BigDecimal::from(2u32));

/// Divide `numerator` by `denominator`, returning zero when the
/// denominator is zero.
pub fn safe_div(numerator: &BigDecimal, denominator: &BigDecimal) -> BigDecimal {
    if denominator.is_zero() {
        BigDecimal::zero()
    } else {
        numerator / denominator
    }
}
