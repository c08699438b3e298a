//! Pure constant-product formulas (`x · y = k`).
//!
//! Every function here is stateless and floors every division, so results
//! always favour the pool over the caller.
//!
//! # Swap pricing
//!
//! With `m = 10 000 − fee_bps`:
//!
//! ```text
//! in_after_fee = amount_in × m
//! amount_out   = in_after_fee × reserve_out / (reserve_in × 10 000 + in_after_fee)
//! ```
//!
//! The fee is folded into the trade, not taken out of the reserve: the full
//! `amount_in` lands in the pool, so `k` grows on every swap with a non-zero
//! fee. Because the denominator always exceeds `in_after_fee × 10 000 / m`,
//! `amount_out < reserve_out` and a single swap can never drain a side.
//!
//! # Shares
//!
//! - First deposit: `floor(√(x · y))`.
//! - Later deposits: `min(x · S / Rx, y · S / Ry)`.
//! - Withdrawal of `s` shares: `(s · Rx / S, s · Ry / S)`.

use ruint::aliases::U256;

use super::integer::{isqrt, mul_div, narrow, wide_product};
use crate::domain::{Amount, FeeTier, Shares, Withdrawal, MAX_BPS};
use crate::error::DexError;

fn fee_multiplier(fee: FeeTier) -> Result<U256, DexError> {
    match fee.input_multiplier() {
        Some(m) if m > 0 => Ok(U256::from(m)),
        _ => Err(DexError::InvalidFee("fee must be below 100%")),
    }
}

/// `floor(a × b / d)` for `u128` operands with a `u128` result.
fn scale(a: u128, b: u128, d: u128, context: &'static str) -> Result<u128, DexError> {
    let quotient = mul_div(U256::from(a), U256::from(b), U256::from(d), context)?;
    narrow(quotient, context)
}

/// Output of selling `amount_in` into a pool with the given reserves.
///
/// # Errors
///
/// - [`DexError::ZeroAmount`] if `amount_in` is zero.
/// - [`DexError::InsufficientReserves`] if either reserve is zero.
/// - [`DexError::InvalidFee`] if the fee is 100% or more.
pub fn amount_out(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeTier,
) -> Result<Amount, DexError> {
    if amount_in.is_zero() {
        return Err(DexError::ZeroAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(DexError::InsufficientReserves);
    }

    // Both terms stay below 2¹⁴³.
    let in_after_fee = U256::from(amount_in.get()) * fee_multiplier(fee)?;
    let denominator = U256::from(reserve_in.get()) * U256::from(MAX_BPS) + in_after_fee;

    let output = mul_div(in_after_fee, U256::from(reserve_out.get()), denominator, "swap output")?;
    narrow(output, "swap output").map(Amount::new)
}

/// Smallest input whose [`amount_out`] is at least `amount_out`.
///
/// # Errors
///
/// - [`DexError::ZeroAmount`] if `amount_out` is zero.
/// - [`DexError::InsufficientReserves`] if either reserve is zero or the
///   requested output is not strictly below `reserve_out`.
/// - [`DexError::InvalidFee`] if the fee is 100% or more.
/// - [`DexError::Overflow`] if the required input exceeds `u128::MAX`.
pub fn amount_in(
    amount_out: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeTier,
) -> Result<Amount, DexError> {
    if amount_out.is_zero() {
        return Err(DexError::ZeroAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
        return Err(DexError::InsufficientReserves);
    }

    let denominator = U256::from(reserve_out.get() - amount_out.get()) * fee_multiplier(fee)?;
    let floor = mul_div(
        wide_product(reserve_in.get(), amount_out.get()),
        U256::from(MAX_BPS),
        denominator,
        "exact-out input",
    )?;

    narrow(floor, "exact-out input")?
        .checked_add(1)
        .map(Amount::new)
        .ok_or(DexError::Overflow("exact-out input"))
}

/// Amount of the other token that matches `amount` at the current ratio.
///
/// # Errors
///
/// - [`DexError::ZeroAmount`] if `amount` is zero.
/// - [`DexError::InsufficientReserves`] if either reserve is zero.
/// - [`DexError::Overflow`] if the matching amount exceeds `u128::MAX`.
pub fn quote(amount: Amount, reserve_from: Amount, reserve_to: Amount) -> Result<Amount, DexError> {
    if amount.is_zero() {
        return Err(DexError::ZeroAmount);
    }
    if reserve_from.is_zero() || reserve_to.is_zero() {
        return Err(DexError::InsufficientReserves);
    }
    scale(amount.get(), reserve_to.get(), reserve_from.get(), "quote").map(Amount::new)
}

/// Shares minted by the deposit that funds an empty pool.
///
/// # Errors
///
/// [`DexError::InsufficientLiquidityMinted`] if the root floors to zero.
pub fn initial_shares(amount_a: Amount, amount_b: Amount) -> Result<Shares, DexError> {
    let root = isqrt(wide_product(amount_a.get(), amount_b.get()));
    match narrow(root, "initial shares")? {
        0 => Err(DexError::InsufficientLiquidityMinted),
        minted => Ok(Shares::new(minted)),
    }
}

/// Shares minted by a deposit into a funded pool.
///
/// Takes the smaller of the two per-side ratios, so any excess over the
/// current ratio is donated to existing holders.
///
/// # Errors
///
/// - [`DexError::InsufficientLiquidityMinted`] if the result is zero.
/// - [`DexError::InsufficientReserves`] if a reserve is zero.
/// - [`DexError::Overflow`] if a per-side ratio exceeds `u128::MAX`.
pub fn proportional_shares(
    amount_a: Amount,
    amount_b: Amount,
    reserve_a: Amount,
    reserve_b: Amount,
    total: Shares,
) -> Result<Shares, DexError> {
    let by_a = scale(amount_a.get(), total.get(), reserve_a.get(), "share ratio a")?;
    let by_b = scale(amount_b.get(), total.get(), reserve_b.get(), "share ratio b")?;
    match by_a.min(by_b) {
        0 => Err(DexError::InsufficientLiquidityMinted),
        minted => Ok(Shares::new(minted)),
    }
}

/// Token amounts redeemed by burning `shares` out of `total`.
///
/// # Errors
///
/// - [`DexError::ZeroWithdrawAmount`] if both amounts floor to zero.
/// - [`DexError::InsufficientReserves`] if `total` is zero.
/// - [`DexError::Overflow`] if `shares` exceeds `total` far enough that
///   an amount leaves `u128`.
pub fn withdrawal(
    shares: Shares,
    reserve_a: Amount,
    reserve_b: Amount,
    total: Shares,
) -> Result<Withdrawal, DexError> {
    let amount_a = scale(shares.get(), reserve_a.get(), total.get(), "withdraw a")?;
    let amount_b = scale(shares.get(), reserve_b.get(), total.get(), "withdraw b")?;
    if amount_a == 0 && amount_b == 0 {
        return Err(DexError::ZeroWithdrawAmount);
    }
    Ok(Withdrawal {
        amount_a: Amount::new(amount_a),
        amount_b: Amount::new(amount_b),
    })
}
