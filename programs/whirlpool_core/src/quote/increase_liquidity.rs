use super::{LiquidityQuote, Percentage, PoolState};
use crate::error::ErrorCode;
use crate::math::core_arithmetic::{Q64x64, Rounding};
use crate::math::liquidity_math::{
    get_amounts_for_liquidity, liquidity_from_amount_a, liquidity_from_amount_b, position_status,
    PositionStatus,
};
use crate::math::tick_math::{tick_to_sqrt_x64, validate_tick_range};
use anchor_lang::prelude::*;

/// Validates the range against the pool and returns its sqrt-price bounds.
pub(crate) fn range_sqrt_prices(
    tick_lower: i32,
    tick_upper: i32,
    pool: &PoolState,
) -> Result<(Q64x64, Q64x64)> {
    if let Err(err) = validate_tick_range(tick_lower, tick_upper, pool.tick_spacing) {
        msg!(
            "Rejected range [{}, {}) for tick spacing {}",
            tick_lower,
            tick_upper,
            pool.tick_spacing
        );
        return Err(err);
    }
    Ok((tick_to_sqrt_x64(tick_lower)?, tick_to_sqrt_x64(tick_upper)?))
}

/// Quotes a deposit funded by a fixed amount of one token.
///
/// The liquidity is the most that `input_amount` of `input_mint` can back over the range at the
/// pool's current price, rounded down. Both token amounts are then recomputed from that
/// liquidity, rounded up, so the deposit always covers the liquidity it is credited with.
///
/// # Arguments
/// * `input_mint` - Either of the pool's mints.
/// * `input_amount` - Amount of `input_mint` the caller wants to deposit.
/// * `tick_lower`, `tick_upper` - Initializable bounds of the range.
/// * `slippage` - Band applied to both amounts.
/// * `pool` - Snapshot of the pool.
///
/// # Errors
/// * `ErrorCode::InvalidRange` - bounds unordered or not initializable.
/// * `ErrorCode::InvalidInputMint` - `input_mint` is neither pool mint.
/// * `ErrorCode::ZeroAmount` - the input backs no liquidity, including depositing the one token
///   the range cannot hold at the current price.
pub fn increase_liquidity_quote_by_input_token(
    input_mint: &Pubkey,
    input_amount: u64,
    tick_lower: i32,
    tick_upper: i32,
    slippage: Percentage,
    pool: &PoolState,
) -> Result<LiquidityQuote> {
    slippage.validate()?;
    let (sqrt_lower, sqrt_upper) = range_sqrt_prices(tick_lower, tick_upper, pool)?;

    let is_token_a = if *input_mint == pool.token_mint_a {
        true
    } else if *input_mint == pool.token_mint_b {
        false
    } else {
        return err!(ErrorCode::InvalidInputMint);
    };

    let status = position_status(pool.sqrt_price, sqrt_lower, sqrt_upper);
    let liquidity = match (is_token_a, status) {
        (true, PositionStatus::PriceBelowRange) => {
            liquidity_from_amount_a(sqrt_lower, sqrt_upper, input_amount)?
        }
        (true, PositionStatus::PriceInRange) => {
            liquidity_from_amount_a(pool.sqrt_price, sqrt_upper, input_amount)?
        }
        (false, PositionStatus::PriceInRange) => {
            liquidity_from_amount_b(sqrt_lower, pool.sqrt_price, input_amount)?
        }
        (false, PositionStatus::PriceAboveRange) => {
            liquidity_from_amount_b(sqrt_lower, sqrt_upper, input_amount)?
        }
        // The range holds only the other token at this price
        (true, PositionStatus::PriceAboveRange) | (false, PositionStatus::PriceBelowRange) => 0,
    };

    if liquidity == 0 {
        msg!(
            "Input of {} backs no liquidity in [{}, {})",
            input_amount,
            tick_lower,
            tick_upper
        );
        return err!(ErrorCode::ZeroAmount);
    }

    let (amount_a, amount_b) = get_amounts_for_liquidity(
        liquidity,
        pool.sqrt_price,
        sqrt_lower,
        sqrt_upper,
        Rounding::Up,
    )?;

    LiquidityQuote::with_slippage(liquidity, amount_a, amount_b, &slippage)
}

/// Quotes the token amounts required to add exactly `liquidity` to a range, rounded up.
pub fn increase_liquidity_quote_by_liquidity(
    liquidity: u128,
    tick_lower: i32,
    tick_upper: i32,
    slippage: Percentage,
    pool: &PoolState,
) -> Result<LiquidityQuote> {
    slippage.validate()?;
    let (sqrt_lower, sqrt_upper) = range_sqrt_prices(tick_lower, tick_upper, pool)?;
    require!(liquidity > 0, ErrorCode::ZeroAmount);

    let (amount_a, amount_b) = get_amounts_for_liquidity(
        liquidity,
        pool.sqrt_price,
        sqrt_lower,
        sqrt_upper,
        Rounding::Up,
    )?;

    LiquidityQuote::with_slippage(liquidity, amount_a, amount_b, &slippage)
}
