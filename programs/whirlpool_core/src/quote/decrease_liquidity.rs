use super::increase_liquidity::range_sqrt_prices;
use super::{LiquidityQuote, Percentage, PoolState};
use crate::error::ErrorCode;
use crate::math::core_arithmetic::Rounding;
use crate::math::liquidity_math::get_amounts_for_liquidity;
use anchor_lang::prelude::*;

/// Quotes the token amounts released by removing `liquidity` from a range.
///
/// Amounts round down: a withdrawal never pays out more than the liquidity is worth.
pub fn decrease_liquidity_quote(
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
        Rounding::Down,
    )?;

    LiquidityQuote::with_slippage(liquidity, amount_a, amount_b, &slippage)
}
