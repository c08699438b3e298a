//! Wide integer helpers: square root, `a × b / d` and narrowing.
//!
//! Pool amounts are `u128`, but products of two amounts need 256 bits and
//! `mul_div` falls back to 512 bits, so only a final result that does not
//! fit back into `u128` is an overflow.

use ruint::aliases::{U256, U512};

use crate::error::DexError;

/// Full 256-bit product of two `u128` values.
#[must_use]
pub fn wide_product(a: u128, b: u128) -> U256 {
    // (2¹²⁸ − 1)² < 2²⁵⁶
    U256::from(a) * U256::from(b)
}

/// Integer square root via Newton's method: the largest `r` with `r² ≤ n`.
#[must_use]
pub fn isqrt(n: U256) -> U256 {
    if n.is_zero() {
        return U256::ZERO;
    }
    let two = U256::from(2u8);
    let mut x = n;
    let mut y = n / two + n % two;
    while y < x {
        x = y;
        y = (x + n / x) / two;
    }
    x
}

/// Computes `floor(a × b / d)`.
///
/// # Errors
///
/// - [`DexError::InsufficientReserves`] if `d` is zero; every divisor in
///   the pool formulas is a reserve or a share supply.
/// - [`DexError::Overflow`] if the quotient does not fit in 256 bits.
pub fn mul_div(a: U256, b: U256, d: U256, context: &'static str) -> Result<U256, DexError> {
    if d.is_zero() {
        return Err(DexError::InsufficientReserves);
    }
    if let Some(product) = a.checked_mul(b) {
        return Ok(product / d);
    }

    let quotient = (U512::from(a) * U512::from(b)) / U512::from(d);
    let limbs = quotient.into_limbs();
    if limbs[4..].iter().any(|limb| *limb != 0) {
        return Err(DexError::Overflow(context));
    }
    Ok(U256::from_limbs_slice(&limbs[..4]))
}

/// Narrows a wide intermediate back to `u128`.
///
/// # Errors
///
/// [`DexError::Overflow`] if `value` exceeds `u128::MAX`.
pub fn narrow(value: U256, context: &'static str) -> Result<u128, DexError> {
    u128::try_from(value).map_err(|_| DexError::Overflow(context))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide(v: u128) -> U256 {
        U256::from(v)
    }

    #[test]
    fn isqrt_exact_squares() {
        assert_eq!(isqrt(wide(0)), wide(0));
        assert_eq!(isqrt(wide(1)), wide(1));
        assert_eq!(isqrt(wide(40_000)), wide(200));
        assert_eq!(isqrt(wide(1_000_000_000_000)), wide(1_000_000));
    }

    #[test]
    fn isqrt_floors() {
        assert_eq!(isqrt(wide(2)), wide(1));
        assert_eq!(isqrt(wide(8)), wide(2));
        assert_eq!(isqrt(wide(99)), wide(9));
    }

    #[test]
    fn isqrt_of_largest_product() {
        let root = isqrt(wide_product(u128::MAX, u128::MAX));
        assert_eq!(root, wide(u128::MAX));
    }

    #[test]
    fn isqrt_of_eighteen_decimal_product() {
        // 1e20 · 1e20 is far beyond u128.
        let root = isqrt(wide_product(10u128.pow(20), 10u128.pow(20)));
        assert_eq!(root, wide(10u128.pow(20)));
    }

    #[test]
    fn mul_div_floors() {
        assert_eq!(mul_div(wide(10), wide(10), wide(3), "t"), Ok(wide(33)));
    }

    #[test]
    fn mul_div_past_u128() {
        // u128::MAX² / u128::MAX takes the 256-bit fast path.
        assert_eq!(
            mul_div(wide(u128::MAX), wide(u128::MAX), wide(u128::MAX), "t"),
            Ok(wide(u128::MAX))
        );
    }

    #[test]
    fn mul_div_through_512_bits() {
        assert_eq!(
            mul_div(U256::MAX, U256::MAX, U256::MAX, "t"),
            Ok(U256::MAX)
        );
        assert_eq!(mul_div(U256::MAX, wide(4), wide(8), "t"), Ok(U256::MAX / wide(2)));
    }

    #[test]
    fn mul_div_errors() {
        assert_eq!(mul_div(U256::MAX, wide(2), wide(1), "t"), Err(DexError::Overflow("t")));
        assert_eq!(mul_div(wide(1), wide(1), wide(0), "t"), Err(DexError::InsufficientReserves));
    }

    #[test]
    fn narrow_keeps_fitting_values() {
        assert_eq!(narrow(wide(u128::MAX), "t"), Ok(u128::MAX));
        assert_eq!(narrow(wide(u128::MAX) + wide(1), "t"), Err(DexError::Overflow("t")));
    }

    #[test]
    fn wide_products_order() {
        assert!(wide_product(u128::MAX, 4) > wide_product(u128::MAX, 3));
        assert_eq!(wide_product(1_000, 1_000), wide(1_000_000));
    }
}
