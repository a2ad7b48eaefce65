//! Conversions between liquidity and token amounts over a tick range.
//!
//! Amount A and amount B deltas take an explicit rounding direction; deposits round up and
//! withdrawals round down so the pool never pays out more than it holds.

use crate::error::ErrorCode;
use crate::math::core_arithmetic::{div_rounding, Q64x64, Rounding};
use crate::utils::constants::FRAC_BITS;
use anchor_lang::prelude::*;
use ethnum::U256;

/// Where the pool price sits relative to a position's range.
#[derive(Copy, Clone, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub enum PositionStatus {
    /// Price at or below the lower bound: the position holds only token A.
    PriceBelowRange,
    PriceInRange,
    /// Price at or above the upper bound: the position holds only token B.
    PriceAboveRange,
}

#[inline(always)]
fn sorted(sqrt_price_0: Q64x64, sqrt_price_1: Q64x64) -> (u128, u128) {
    if sqrt_price_0 <= sqrt_price_1 {
        (sqrt_price_0.raw(), sqrt_price_1.raw())
    } else {
        (sqrt_price_1.raw(), sqrt_price_0.raw())
    }
}

#[inline(always)]
fn to_token_amount(value: U256) -> Result<u64> {
    require!(value <= U256::from(u64::MAX), ErrorCode::Overflow);
    Ok(value.as_u64())
}

/// Calculates the amount of token A backing `liquidity` between two sqrt prices.
///
/// # Arguments
///
/// * `sqrt_price_0`, `sqrt_price_1` - The two bounds as Q64.64 values, in either order.
/// * `liquidity` - The liquidity active between them.
/// * `rounding` - `Up` when the amount is owed to the pool, `Down` when it is paid out.
///
/// # Errors
///
/// * `ErrorCode::Overflow` - if the numerator leaves 256 bits or the amount does not fit in `u64`.
///
/// # Formula
///
/// amount_a = liquidity * (sqrt_upper - sqrt_lower) * 2^64 / (sqrt_lower * sqrt_upper)
pub fn get_amount_a_delta(
    sqrt_price_0: Q64x64,
    sqrt_price_1: Q64x64,
    liquidity: u128,
    rounding: Rounding,
) -> Result<u64> {
    let (sqrt_lower, sqrt_upper) = sorted(sqrt_price_0, sqrt_price_1);
    let diff = sqrt_upper - sqrt_lower;
    if liquidity == 0 || diff == 0 {
        return Ok(0);
    }
    require!(sqrt_lower != 0, ErrorCode::DivisionByZero);

    // Numerator is liquidity * diff lifted back into Q64.64; check the lift stays in 256 bits
    let product = U256::from(liquidity) * U256::from(diff);
    require!(product.leading_zeros() >= FRAC_BITS, ErrorCode::Overflow);
    let numerator = product << FRAC_BITS;

    // Denominator is the product of both bounds, at most 2^256 / 2^64
    let denominator = U256::from(sqrt_lower) * U256::from(sqrt_upper);

    to_token_amount(div_rounding(numerator, denominator, rounding))
}

/// Calculates the amount of token B backing `liquidity` between two sqrt prices.
///
/// # Formula
///
/// amount_b = liquidity * (sqrt_upper - sqrt_lower) / 2^64
pub fn get_amount_b_delta(
    sqrt_price_0: Q64x64,
    sqrt_price_1: Q64x64,
    liquidity: u128,
    rounding: Rounding,
) -> Result<u64> {
    let (sqrt_lower, sqrt_upper) = sorted(sqrt_price_0, sqrt_price_1);
    let diff = sqrt_upper - sqrt_lower;
    if liquidity == 0 || diff == 0 {
        return Ok(0);
    }

    let product = U256::from(liquidity) * U256::from(diff);
    let amount = product >> FRAC_BITS;
    let has_remainder = product & U256::from(u64::MAX) != U256::ZERO;
    match rounding {
        Rounding::Up if has_remainder => to_token_amount(amount + U256::ONE),
        _ => to_token_amount(amount),
    }
}

/// Liquidity supported by `amount` of token A between two sqrt prices, rounded down.
///
/// liquidity = amount * sqrt_lower * sqrt_upper / ((sqrt_upper - sqrt_lower) * 2^64)
///
/// # Errors
///
/// * `ErrorCode::InvalidRange` - if both bounds are equal.
/// * `ErrorCode::Overflow` - if the liquidity does not fit in `u128`.
pub fn liquidity_from_amount_a(
    sqrt_price_0: Q64x64,
    sqrt_price_1: Q64x64,
    amount: u64,
) -> Result<u128> {
    let (sqrt_lower, sqrt_upper) = sorted(sqrt_price_0, sqrt_price_1);
    let diff = sqrt_upper - sqrt_lower;
    require!(diff != 0, ErrorCode::InvalidRange);

    let numerator = U256::from(amount)
        .checked_mul(U256::from(sqrt_lower))
        .and_then(|v| v.checked_mul(U256::from(sqrt_upper)))
        .ok_or(ErrorCode::Overflow)?;
    let denominator = U256::from(diff) << FRAC_BITS;

    let liquidity = numerator / denominator;
    require!(liquidity <= U256::from(u128::MAX), ErrorCode::Overflow);
    Ok(liquidity.as_u128())
}

/// Liquidity supported by `amount` of token B between two sqrt prices, rounded down.
///
/// liquidity = amount * 2^64 / (sqrt_upper - sqrt_lower)
pub fn liquidity_from_amount_b(
    sqrt_price_0: Q64x64,
    sqrt_price_1: Q64x64,
    amount: u64,
) -> Result<u128> {
    let (sqrt_lower, sqrt_upper) = sorted(sqrt_price_0, sqrt_price_1);
    let diff = sqrt_upper - sqrt_lower;
    require!(diff != 0, ErrorCode::InvalidRange);

    let liquidity = (U256::from(amount) << FRAC_BITS) / U256::from(diff);
    require!(liquidity <= U256::from(u128::MAX), ErrorCode::Overflow);
    Ok(liquidity.as_u128())
}

/// Classifies the current price against a range given by its sqrt-price bounds.
pub fn position_status(
    sqrt_price_current: Q64x64,
    sqrt_price_lower: Q64x64,
    sqrt_price_upper: Q64x64,
) -> PositionStatus {
    if sqrt_price_current <= sqrt_price_lower {
        PositionStatus::PriceBelowRange
    } else if sqrt_price_current >= sqrt_price_upper {
        PositionStatus::PriceAboveRange
    } else {
        PositionStatus::PriceInRange
    }
}

/// Classifies by tick index. A range is active while `tick_lower <= tick_current < tick_upper`.
pub fn position_status_by_tick(tick_current: i32, tick_lower: i32, tick_upper: i32) -> PositionStatus {
    if tick_current < tick_lower {
        PositionStatus::PriceBelowRange
    } else if tick_current < tick_upper {
        PositionStatus::PriceInRange
    } else {
        PositionStatus::PriceAboveRange
    }
}

/// Calculates the token amounts backing `liquidity` over `[sqrt_price_lower, sqrt_price_upper]`
/// at the current sqrt price.
///
/// This function determines the split depending on where the current price sits:
/// - At or below the lower bound, only token A is required.
/// - At or above the upper bound, only token B is required.
/// - Inside the range, token A covers `[current, upper]` and token B covers `[lower, current]`.
///
/// The in-range formulas reduce to the single-token ones when the current price touches either
/// bound, so the result is continuous across region changes.
///
/// # Errors
///
/// * `ErrorCode::InvalidRange` - if `sqrt_price_lower >= sqrt_price_upper`.
/// * `ErrorCode::Overflow` - if an amount does not fit in `u64`.
pub fn get_amounts_for_liquidity(
    liquidity: u128,
    sqrt_price_current: Q64x64,
    sqrt_price_lower: Q64x64,
    sqrt_price_upper: Q64x64,
    rounding: Rounding,
) -> Result<(u64, u64)> {
    require!(
        sqrt_price_lower < sqrt_price_upper,
        ErrorCode::InvalidRange
    );

    match position_status(sqrt_price_current, sqrt_price_lower, sqrt_price_upper) {
        PositionStatus::PriceBelowRange => Ok((
            get_amount_a_delta(sqrt_price_lower, sqrt_price_upper, liquidity, rounding)?,
            0,
        )),
        PositionStatus::PriceAboveRange => Ok((
            0,
            get_amount_b_delta(sqrt_price_lower, sqrt_price_upper, liquidity, rounding)?,
        )),
        PositionStatus::PriceInRange => Ok((
            get_amount_a_delta(sqrt_price_current, sqrt_price_upper, liquidity, rounding)?,
            get_amount_b_delta(sqrt_price_lower, sqrt_price_current, liquidity, rounding)?,
        )),
    }
}

/// Calculates the largest liquidity both token amounts can fund over the range.
///
/// Inside the range each amount implies its own liquidity and the smaller one wins, so an
/// unbalanced deposit is never credited for the surplus side.
pub fn get_liquidity_for_amounts(
    amount_a: u64,
    amount_b: u64,
    sqrt_price_current: Q64x64,
    sqrt_price_lower: Q64x64,
    sqrt_price_upper: Q64x64,
) -> Result<u128> {
    require!(
        sqrt_price_lower < sqrt_price_upper,
        ErrorCode::InvalidRange
    );

    match position_status(sqrt_price_current, sqrt_price_lower, sqrt_price_upper) {
        PositionStatus::PriceBelowRange => {
            liquidity_from_amount_a(sqrt_price_lower, sqrt_price_upper, amount_a)
        }
        PositionStatus::PriceAboveRange => {
            liquidity_from_amount_b(sqrt_price_lower, sqrt_price_upper, amount_b)
        }
        PositionStatus::PriceInRange => {
            let liquidity_a =
                liquidity_from_amount_a(sqrt_price_current, sqrt_price_upper, amount_a)?;
            let liquidity_b =
                liquidity_from_amount_b(sqrt_price_lower, sqrt_price_current, amount_b)?;
            Ok(liquidity_a.min(liquidity_b))
        }
    }
}

/// Applies a signed liquidity delta.
///
/// # Errors
///
/// * `ErrorCode::LiquidityUnderflow` - removing more than `liquidity`.
/// * `ErrorCode::Overflow` - adding past `u128::MAX`.
pub fn add_liquidity_delta(liquidity: u128, delta: i128) -> Result<u128> {
    if delta < 0 {
        liquidity
            .checked_sub(delta.unsigned_abs())
            .ok_or_else(|| error!(ErrorCode::LiquidityUnderflow))
    } else {
        liquidity
            .checked_add(delta.unsigned_abs())
            .ok_or_else(|| error!(ErrorCode::Overflow))
    }
}
