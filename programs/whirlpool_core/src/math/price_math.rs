//! Human-readable prices ⇄ sqrt prices ⇄ tick indices.
//!
//! Prices are quoted as token B per token A in whole-token units. Mint decimals scale the raw
//! on-chain ratio: `raw_price = price * 10^(decimals_b - decimals_a)`.

use crate::error::ErrorCode;
use crate::math::core_arithmetic::{pow10, ratio_to_decimal, sqrt_u256, Q64x64};
use crate::math::tick_math::{
    get_initializable_tick_index, sqrt_x64_to_tick, sqrt_x64_to_tick_ceil, tick_to_sqrt_x64,
    TickRounding,
};
use crate::utils::constants::MAX_TOKEN_DECIMALS;
use anchor_lang::prelude::*;
use ethnum::U256;
use rust_decimal::Decimal;

fn check_decimals(decimals_a: u8, decimals_b: u8) -> Result<()> {
    require!(
        decimals_a <= MAX_TOKEN_DECIMALS && decimals_b <= MAX_TOKEN_DECIMALS,
        ErrorCode::InvalidPrice
    );
    Ok(())
}

/// Converts a decimal price to a Q64.64 sqrt price: `sqrt(price * 10^(db - da)) * 2^64`, floored.
///
/// The whole computation stays in integers. With `price = m / 10^s` the result is
/// `isqrt(floor(m * 10^db * 2^128 / 10^(s + da)))`, which equals the floor of the real value.
///
/// # Errors
/// * `ErrorCode::InvalidPrice` - the price is not strictly positive, or a decimals value exceeds
///   `MAX_TOKEN_DECIMALS`.
/// * `ErrorCode::Overflow` - the sqrt price does not fit in Q64.64.
pub fn price_to_sqrt_x64(price: Decimal, decimals_a: u8, decimals_b: u8) -> Result<Q64x64> {
    require!(price > Decimal::ZERO, ErrorCode::InvalidPrice);
    check_decimals(decimals_a, decimals_b)?;

    let mantissa = U256::from(price.mantissa().unsigned_abs());
    let (num, den) = if decimals_b >= decimals_a {
        let shift = pow10(u32::from(decimals_b - decimals_a))?;
        (mantissa * shift, pow10(price.scale())?)
    } else {
        let shift = u32::from(decimals_a - decimals_b);
        (mantissa, pow10(price.scale() + shift)?)
    };

    // floor(num * 2^128 / den), split so the shifted numerator never leaves 256 bits.
    let whole = num / den;
    let rem = num % den;
    require!(whole >> 128u32 == U256::ZERO, ErrorCode::Overflow);
    require!(rem.leading_zeros() >= 128, ErrorCode::Overflow);
    let radicand = (whole << 128u32) + ((rem << 128u32) / den);

    let root = sqrt_u256(radicand);
    require!(root <= U256::from(u128::MAX), ErrorCode::Overflow);
    Ok(Q64x64::from_raw(root.as_u128()))
}

/// Converts a Q64.64 sqrt price back to a decimal price, truncated toward zero.
pub fn sqrt_x64_to_price(sqrt_price: Q64x64, decimals_a: u8, decimals_b: u8) -> Result<Decimal> {
    check_decimals(decimals_a, decimals_b)?;
    let squared = U256::from(sqrt_price.raw()) * U256::from(sqrt_price.raw());
    let one_x128 = U256::ONE << 128u32;
    if decimals_a >= decimals_b {
        let scale = pow10(u32::from(decimals_a - decimals_b))?;
        let num = squared.checked_mul(scale).ok_or(ErrorCode::Overflow)?;
        ratio_to_decimal(num, one_x128)
    } else {
        let scale = pow10(u32::from(decimals_b - decimals_a))?;
        let den = one_x128.checked_mul(scale).ok_or(ErrorCode::Overflow)?;
        ratio_to_decimal(squared, den)
    }
}

/// Greatest tick whose price does not exceed `price`.
pub fn price_to_tick_index(price: Decimal, decimals_a: u8, decimals_b: u8) -> Result<i32> {
    sqrt_x64_to_tick(price_to_sqrt_x64(price, decimals_a, decimals_b)?)
}

pub fn tick_index_to_price(tick: i32, decimals_a: u8, decimals_b: u8) -> Result<Decimal> {
    sqrt_x64_to_price(tick_to_sqrt_x64(tick)?, decimals_a, decimals_b)
}

/// Converts a decimal price to a tick usable as a position bound.
///
/// `Down` and `Nearest` start from the floor tick; `Up` starts from the smallest tick whose price
/// is at or above `price`. A lower bound rounded `Down` together with an upper bound rounded `Up`
/// therefore always covers the requested price interval.
pub fn price_to_initializable_tick_index(
    price: Decimal,
    decimals_a: u8,
    decimals_b: u8,
    tick_spacing: u16,
    rounding: TickRounding,
) -> Result<i32> {
    let sqrt_price = price_to_sqrt_x64(price, decimals_a, decimals_b)?;
    let tick = match rounding {
        TickRounding::Up => sqrt_x64_to_tick_ceil(sqrt_price)?,
        TickRounding::Down | TickRounding::Nearest => sqrt_x64_to_tick(sqrt_price)?,
    };
    get_initializable_tick_index(tick, tick_spacing, rounding)
}

/// Price of token A in units of token B turned around: the same pool quoted as A per B.
pub fn invert_price(price: Decimal) -> Result<Decimal> {
    require!(price > Decimal::ZERO, ErrorCode::InvalidPrice);
    Decimal::ONE
        .checked_div(price)
        .ok_or_else(|| error!(ErrorCode::Overflow))
}
