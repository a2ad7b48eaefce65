//! # whirlpool_core::math::tick_math
//!
//! Conversions between tick indices and Q64.64 sqrt prices, tick-spacing alignment and tick
//! array addressing. `price(tick) = 1.0001^tick`, so `sqrt_price(tick) = 1.0001^(tick / 2) * 2^64`.

use crate::error::ErrorCode;
use crate::math::core_arithmetic::Q64x64;
use crate::utils::constants::{MAX_SQRT_X64, MAX_TICK, MIN_SQRT_X64, MIN_TICK, TICK_ARRAY_SIZE};
use anchor_lang::prelude::*;
use ethnum::U256;

/// Rounding applied when snapping a tick to the tick spacing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub enum TickRounding {
    /// Closest multiple of the spacing; ties round up.
    Nearest,
    /// Largest multiple of the spacing not above the tick. Use for range lower bounds.
    Down,
    /// Smallest multiple of the spacing not below the tick. Use for range upper bounds.
    Up,
}

// ---------- Tick ⇄ √Price ----------------------------------------------------

// sqrt(1.0001)^(2^i) in Q32.96, one entry per bit of a non-negative tick.
const POSITIVE_TICK_COEFF: [u128; 19] = [
    79232123823359799118286999567,              // bit 0
    79236085330515764027303304731,              // bit 1
    79244008939048815603706035061,              // bit 2
    79259858533276714757314932305,              // bit 3
    79291567232598584799939703904,              // bit 4
    79355022692464371645785046466,              // bit 5
    79482085999252804386437311141,              // bit 6
    79736823300114093921829183326,              // bit 7
    80248749790819932309965073892,              // bit 8
    81282483887344747381513967011,              // bit 9
    83390072131320151908154831281,              // bit 10
    87770609709833776024991924138,              // bit 11
    97234110755111693312479820773,              // bit 12
    119332217159966728226237229890,             // bit 13
    179736315981702064433883588727,             // bit 14
    407748233172238350107850275304,             // bit 15
    2098478828474011932436660412517,            // bit 16
    55581415166113811149459800483533,           // bit 17
    38992368544603139932233054999993551,        // bit 18
];

// sqrt(1.0001)^-(2^i) in Q64.64, one entry per bit of |tick| for negative ticks.
const NEGATIVE_TICK_COEFF: [u128; 19] = [
    18445821805675392311, // bit 0
    18444899583751176498, // bit 1
    18443055278223354162, // bit 2
    18439367220385604838, // bit 3
    18431993317065449817, // bit 4
    18417254355718160513, // bit 5
    18387811781193591352, // bit 6
    18329067761203520168, // bit 7
    18212142134806087854, // bit 8
    17980523815641551639, // bit 9
    17526086738831147013, // bit 10
    16651378430235024244, // bit 11
    15030750278693429944, // bit 12
    12247334978882834399, // bit 13
    8131365268884726200,  // bit 14
    3584323654723342297,  // bit 15
    696457651847595233,   // bit 16
    26294789957452057,    // bit 17
    37481735321082,       // bit 18
];

const Q96_ONE: u128 = 1u128 << 96;

/// Converts a tick index to its sqrt price in Q64.64.
///
/// Walks the bits of `|tick|` and multiplies in the matching precomputed power of `sqrt(1.0001)`,
/// so no floating point is involved. Non-negative ticks accumulate in Q32.96 for precision and
/// are shifted down to Q64.64 at the end.
///
/// # Errors
/// * `ErrorCode::TickOutOfBounds` - if `tick` is outside `[MIN_TICK, MAX_TICK]`.
pub fn tick_to_sqrt_x64(tick: i32) -> Result<Q64x64> {
    require!(
        (MIN_TICK..=MAX_TICK).contains(&tick),
        ErrorCode::TickOutOfBounds
    );

    let abs_tick = tick.unsigned_abs();
    let ratio = if tick >= 0 {
        positive_tick_ratio(abs_tick)
    } else {
        negative_tick_ratio(abs_tick)
    };
    Ok(Q64x64::from_raw(ratio))
}

#[inline(always)]
fn positive_tick_ratio(abs_tick: u32) -> u128 {
    let mut ratio = U256::from(if abs_tick & 1 != 0 {
        POSITIVE_TICK_COEFF[0]
    } else {
        Q96_ONE
    });
    for (bit, coeff) in POSITIVE_TICK_COEFF.iter().enumerate().skip(1) {
        if abs_tick & (1 << bit) != 0 {
            ratio = (ratio * U256::from(*coeff)) >> 96;
        }
    }
    // Bounded by MAX_SQRT_X64 << 32, so the shifted value fits in 128 bits.
    (ratio >> 32u32).as_u128()
}

#[inline(always)]
fn negative_tick_ratio(abs_tick: u32) -> u128 {
    let mut ratio: u128 = if abs_tick & 1 != 0 {
        NEGATIVE_TICK_COEFF[0]
    } else {
        1u128 << 64
    };
    for (bit, coeff) in NEGATIVE_TICK_COEFF.iter().enumerate().skip(1) {
        if abs_tick & (1 << bit) != 0 {
            // Both factors are at most 2^64, so the product cannot overflow.
            ratio = (ratio * coeff) >> 64;
        }
    }
    ratio
}

/// Converts a sqrt price to the greatest tick whose sqrt price does not exceed it.
///
/// Binary search over [`tick_to_sqrt_x64`], which makes this the exact left inverse of that
/// function: `sqrt_x64_to_tick(tick_to_sqrt_x64(t)) == t` for every valid tick.
///
/// # Errors
/// * `ErrorCode::TickOutOfBounds` - if the sqrt price is outside `[MIN_SQRT_X64, MAX_SQRT_X64]`.
pub fn sqrt_x64_to_tick(sqrt_price: Q64x64) -> Result<i32> {
    let target = sqrt_price.raw();
    require!(
        (MIN_SQRT_X64..=MAX_SQRT_X64).contains(&target),
        ErrorCode::TickOutOfBounds
    );

    let mut low = MIN_TICK;
    let mut high = MAX_TICK;
    // Invariant: tick_to_sqrt_x64(low) <= target, and every tick above `high` maps above target.
    while low < high {
        let mid = low + ((high - low + 1) >> 1);
        if tick_to_sqrt_x64(mid)?.raw() <= target {
            low = mid;
        } else {
            high = mid - 1;
        }
    }
    Ok(low)
}

/// Smallest tick whose sqrt price is at or above `sqrt_price`.
pub fn sqrt_x64_to_tick_ceil(sqrt_price: Q64x64) -> Result<i32> {
    let tick = sqrt_x64_to_tick(sqrt_price)?;
    if tick_to_sqrt_x64(tick)? == sqrt_price {
        Ok(tick)
    } else {
        Ok(tick + 1)
    }
}

// ---------- Tick spacing -----------------------------------------------------

#[inline(always)]
fn spacing_i32(tick_spacing: u16) -> Result<i32> {
    require!(tick_spacing > 0, ErrorCode::InvalidTickSpacing);
    Ok(i32::from(tick_spacing))
}

#[inline(always)]
fn check_tick_bounds(tick: i32) -> Result<()> {
    require!((MIN_TICK..=MAX_TICK).contains(&tick), ErrorCode::TickOutOfBounds);
    Ok(())
}

/// Whether `tick` can bound a position in a pool with the given spacing.
pub fn is_tick_initializable(tick: i32, tick_spacing: u16) -> bool {
    tick_spacing > 0
        && (MIN_TICK..=MAX_TICK).contains(&tick)
        && tick.rem_euclid(i32::from(tick_spacing)) == 0
}

/// Lowest and highest initializable ticks for a spacing.
pub fn full_range_tick_indexes(tick_spacing: u16) -> Result<(i32, i32)> {
    let spacing = spacing_i32(tick_spacing)?;
    let max = MAX_TICK / spacing * spacing;
    Ok((-max, max))
}

/// Snaps `tick` to a multiple of the tick spacing.
///
/// Uses the Euclidean remainder so negative ticks round in the same direction as positive ones.
/// A result that would land outside the tick bounds is pulled back to the nearest initializable
/// tick inside them.
pub fn get_initializable_tick_index(
    tick: i32,
    tick_spacing: u16,
    rounding: TickRounding,
) -> Result<i32> {
    let spacing = spacing_i32(tick_spacing)?;
    check_tick_bounds(tick)?;
    let remainder = tick.rem_euclid(spacing);
    let down = tick - remainder;
    let snapped = match rounding {
        TickRounding::Down => down,
        TickRounding::Up if remainder == 0 => tick,
        TickRounding::Up => down + spacing,
        TickRounding::Nearest if remainder * 2 >= spacing => down + spacing,
        TickRounding::Nearest => down,
    };

    let (min_tick, max_tick) = full_range_tick_indexes(tick_spacing)?;
    Ok(snapped.clamp(min_tick, max_tick))
}

pub fn next_initializable_tick_index(tick: i32, tick_spacing: u16) -> Result<i32> {
    let spacing = spacing_i32(tick_spacing)?;
    check_tick_bounds(tick)?;
    let next = tick - tick.rem_euclid(spacing) + spacing;
    let (_, max_tick) = full_range_tick_indexes(tick_spacing)?;
    require!(next <= max_tick, ErrorCode::TickOutOfBounds);
    Ok(next)
}

pub fn prev_initializable_tick_index(tick: i32, tick_spacing: u16) -> Result<i32> {
    let spacing = spacing_i32(tick_spacing)?;
    check_tick_bounds(tick)?;
    let remainder = tick.rem_euclid(spacing);
    let prev = if remainder == 0 {
        tick - spacing
    } else {
        tick - remainder
    };
    let (min_tick, _) = full_range_tick_indexes(tick_spacing)?;
    require!(prev >= min_tick, ErrorCode::TickOutOfBounds);
    Ok(prev)
}

/// Checks that `[tick_lower, tick_upper)` can bound a position in a pool with this spacing.
///
/// # Errors
/// * `ErrorCode::InvalidRange` - unordered bounds, a bound off the spacing grid, or a bound
///   outside the tick bounds.
pub fn validate_tick_range(tick_lower: i32, tick_upper: i32, tick_spacing: u16) -> Result<()> {
    spacing_i32(tick_spacing)?;
    require!(tick_lower < tick_upper, ErrorCode::InvalidRange);
    require!(
        is_tick_initializable(tick_lower, tick_spacing)
            && is_tick_initializable(tick_upper, tick_spacing),
        ErrorCode::InvalidRange
    );
    Ok(())
}

// ---------- Tick arrays ------------------------------------------------------

/// Number of ticks covered by one tick array at this spacing.
#[inline(always)]
pub fn ticks_in_array(tick_spacing: u16) -> Result<i32> {
    Ok(TICK_ARRAY_SIZE * spacing_i32(tick_spacing)?)
}

/// Start tick of the tick array containing `tick`:
/// `floor(tick / (TICK_ARRAY_SIZE * spacing)) * TICK_ARRAY_SIZE * spacing`.
pub fn get_tick_array_start_tick(tick: i32, tick_spacing: u16) -> Result<i32> {
    let width = ticks_in_array(tick_spacing)?;
    check_tick_bounds(tick)?;
    Ok(tick.div_euclid(width) * width)
}

/// Whether `start_tick` is the start of a tick array that covers at least one valid tick.
pub fn is_valid_tick_array_start_tick(start_tick: i32, tick_spacing: u16) -> bool {
    let Ok(width) = ticks_in_array(tick_spacing) else {
        return false;
    };
    start_tick.rem_euclid(width) == 0 && start_tick <= MAX_TICK && start_tick + width > MIN_TICK
}

/// Slot of `tick` inside the tick array starting at `start_tick`.
///
/// # Errors
/// * `ErrorCode::TickOutOfBounds` - if `tick` is outside the tick bounds.
/// * `ErrorCode::InvalidRange` - if `tick` is off the spacing grid or outside the array.
pub fn tick_offset_in_array(tick: i32, start_tick: i32, tick_spacing: u16) -> Result<usize> {
    let spacing = spacing_i32(tick_spacing)?;
    check_tick_bounds(tick)?;
    let delta = tick.checked_sub(start_tick).ok_or(ErrorCode::Overflow)?;
    require!(
        delta >= 0 && delta % spacing == 0 && delta / spacing < TICK_ARRAY_SIZE,
        ErrorCode::InvalidRange
    );
    Ok((delta / spacing) as usize)
}
