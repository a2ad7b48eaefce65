//! # whirlpool_core::math::core_arithmetic
//!
//! Q64.64 fixed-point primitives shared by every price, tick and liquidity conversion.
//!
//! ## Features
//! - `Q64x64`: transparent `u128` wrapper interpreted as `value / 2^64`, with checked arithmetic.
//! - `mul_div`, `mul_div_round_up`: exact `(a * b) / c` over a 256-bit intermediate.
//! - `sqrt_x64`: exact floor square root of a Q64.64 value.
//! - `to_q64` / `from_q64`: conversions between `rust_decimal::Decimal` and Q64.64.
//!
//! ## Safety & Determinism
//! - Every multiplication is widened to `U256` before being narrowed back; anything that does not
//!   fit returns `ErrorCode::Overflow` instead of saturating.
//! - Division truncates toward zero unless a `Rounding::Up` is requested. Callers pick the
//!   direction that favours the protocol.

use crate::error::ErrorCode;
use crate::utils::constants::{FRAC_BITS, ONE_X64};
use anchor_lang::prelude::*;
use ethnum::U256;
use rust_decimal::Decimal;

/// Largest scale `rust_decimal` can carry.
const MAX_DECIMAL_SCALE: u32 = 28;

/// Largest mantissa `rust_decimal` can carry (2^96 - 1).
const MAX_DECIMAL_MANTISSA: u128 = (1u128 << 96) - 1;

/// Rounding direction for divisions and shifts that drop precision.
#[derive(Copy, Clone, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub enum Rounding {
    /// Truncate toward zero.
    Down,
    /// Round away from zero whenever a remainder is dropped.
    Up,
}

// ---------- Core Fixed-Point Wrapper ---------------------------------------

#[repr(transparent)]
#[derive(
    Copy, Clone, Default, Debug, PartialEq, Eq, PartialOrd, Ord, AnchorSerialize, AnchorDeserialize,
)]
/// A fixed-point number with 64 integer bits and 64 fractional bits stored in a `u128`.
///
/// Sqrt prices are carried in this format throughout the crate: `sqrt_price = sqrt(price) * 2^64`.
pub struct Q64x64(u128);

impl Q64x64 {
    #[inline(always)]
    pub const fn raw(self) -> u128 {
        self.0
    }

    #[inline(always)]
    pub const fn from_raw(v: u128) -> Self {
        Self(v)
    }

    #[inline(always)]
    pub const fn from_int(x: u64) -> Self {
        Self((x as u128) << FRAC_BITS)
    }

    #[inline(always)]
    pub const fn zero() -> Self {
        Self(0)
    }

    #[inline(always)]
    pub const fn one() -> Self {
        Self(ONE_X64)
    }

    /// Integer part, truncated.
    #[inline(always)]
    pub const fn floor(self) -> u64 {
        (self.0 >> FRAC_BITS) as u64
    }

    // Product of two Q64.64 values. The full 256-bit product is shifted back by FRAC_BITS
    // and must fit in 128 bits again.
    #[inline(always)]
    pub fn checked_mul(self, rhs: Self) -> Result<Self> {
        let prod = (U256::from(self.0) * U256::from(rhs.0)) >> FRAC_BITS;
        narrow(prod).map(Self)
    }

    /// Quotient truncated toward zero.
    #[inline(always)]
    pub fn checked_div(self, rhs: Self) -> Result<Self> {
        self.checked_div_rounding(rhs, Rounding::Down)
    }

    // Quotient of two Q64.64 values with an explicit rounding direction. The dividend is widened
    // and pre-shifted by FRAC_BITS so the quotient stays in Q64.64.
    #[inline(always)]
    pub fn checked_div_rounding(self, rhs: Self, rounding: Rounding) -> Result<Self> {
        require!(rhs.0 != 0, ErrorCode::DivisionByZero);
        let num = U256::from(self.0) << FRAC_BITS;
        let den = U256::from(rhs.0);
        narrow(div_rounding(num, den, rounding)).map(Self)
    }

    #[inline(always)]
    pub fn checked_add(self, rhs: Self) -> Result<Self> {
        Ok(Self(self.0.checked_add(rhs.0).ok_or(ErrorCode::Overflow)?))
    }

    #[inline(always)]
    pub fn checked_sub(self, rhs: Self) -> Result<Self> {
        Ok(Self(self.0.checked_sub(rhs.0).ok_or(ErrorCode::Overflow)?))
    }
}

#[inline(always)]
fn narrow(value: U256) -> Result<u128> {
    if value > U256::from(u128::MAX) {
        return err!(ErrorCode::Overflow);
    }
    Ok(value.as_u128())
}

#[inline(always)]
pub(crate) fn div_rounding(num: U256, den: U256, rounding: Rounding) -> U256 {
    let quotient = num / den;
    match rounding {
        Rounding::Up if num % den != U256::ZERO => quotient + U256::ONE,
        _ => quotient,
    }
}

// ---------- Uniswap-style mul_div for exact (a * b) / c --------------------

/// `(a * b) / c` truncated, over a 256-bit intermediate.
#[inline(always)]
pub fn mul_div(a: u128, b: u128, c: u128) -> Result<u128> {
    mul_div_rounding(a, b, c, Rounding::Down)
}

/// `(a * b) / c` rounded up whenever the division leaves a remainder.
#[inline(always)]
pub fn mul_div_round_up(a: u128, b: u128, c: u128) -> Result<u128> {
    mul_div_rounding(a, b, c, Rounding::Up)
}

#[inline(always)]
pub fn mul_div_rounding(a: u128, b: u128, c: u128, rounding: Rounding) -> Result<u128> {
    require!(c != 0, ErrorCode::DivisionByZero);
    let prod = U256::from(a) * U256::from(b);
    narrow(div_rounding(prod, U256::from(c), rounding))
}

#[inline(always)]
pub fn mul_div_q64(a: Q64x64, b: Q64x64, c: Q64x64) -> Result<Q64x64> {
    Ok(Q64x64::from_raw(mul_div(a.raw(), b.raw(), c.raw())?))
}

// ---------- Square root ------------------------------------------------------

/// Floor of the square root of a 256-bit integer.
///
/// Newton's iteration started from a power of two above the root; the sequence decreases
/// monotonically until it reaches `floor(sqrt(n))`.
pub fn sqrt_u256(n: U256) -> U256 {
    if n < U256::new(2) {
        return n;
    }
    let bits = 256 - n.leading_zeros();
    let mut x = U256::ONE << bits.div_ceil(2);
    loop {
        let y = (x + n / x) >> 1;
        if y >= x {
            return x;
        }
        x = y;
    }
}

/// Square root of a Q64.64 value, floored to the nearest representable Q64.64 value.
///
/// `sqrt(v / 2^64) * 2^64 = sqrt(v * 2^64)`, so the input is widened and shifted before taking an
/// integer root. The result always fits: `sqrt(2^192) = 2^96`.
#[inline(always)]
pub fn sqrt_x64(value: Q64x64) -> Result<Q64x64> {
    let root = sqrt_u256(U256::from(value.raw()) << FRAC_BITS);
    narrow(root).map(Q64x64::from_raw)
}

// ---------- Decimal conversions ----------------------------------------------

/// Converts a non-negative decimal to Q64.64, truncating the bits beyond 2^-64.
pub fn to_q64(value: Decimal) -> Result<Q64x64> {
    to_q64_rounding(value, Rounding::Down)
}

pub fn to_q64_rounding(value: Decimal, rounding: Rounding) -> Result<Q64x64> {
    require!(!value.is_sign_negative(), ErrorCode::InvalidPrice);
    let mantissa = value.mantissa().unsigned_abs();
    let den = pow10(value.scale())?;
    let num = U256::from(mantissa) << FRAC_BITS;
    narrow(div_rounding(num, den, rounding)).map(Q64x64::from_raw)
}

/// Converts a Q64.64 value to a decimal, truncating toward zero at the finest scale the decimal
/// mantissa can hold.
pub fn from_q64(value: Q64x64) -> Result<Decimal> {
    ratio_to_decimal(U256::from(value.raw()), U256::ONE << FRAC_BITS)
}

/// `num / den` as a decimal, truncated at the finest scale whose mantissa still fits.
pub(crate) fn ratio_to_decimal(num: U256, den: U256) -> Result<Decimal> {
    require!(den != U256::ZERO, ErrorCode::DivisionByZero);
    for scale in (0..=MAX_DECIMAL_SCALE).rev() {
        let Some(scaled) = num.checked_mul(pow10(scale)?) else {
            continue;
        };
        let mantissa = scaled / den;
        if mantissa <= U256::from(MAX_DECIMAL_MANTISSA) {
            let decimal = Decimal::try_from_i128_with_scale(mantissa.as_i128(), scale)
                .map_err(|_| ErrorCode::Overflow)?;
            return Ok(decimal.normalize());
        }
    }
    err!(ErrorCode::Overflow)
}

#[inline(always)]
pub(crate) fn pow10(exp: u32) -> Result<U256> {
    Ok(U256::new(10).checked_pow(exp).ok_or(ErrorCode::Overflow)?)
}
