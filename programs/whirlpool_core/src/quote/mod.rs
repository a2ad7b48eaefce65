//! Deposit and withdraw quotes.
//!
//! A quote turns a user intent (deposit this much of one token, or move this much liquidity) into
//! the liquidity delta plus both token amounts, bracketed by a slippage band. The band is the
//! only protection against the price moving between quoting and execution, so callers should
//! quote against a fresh [`PoolState`].

use crate::math::core_arithmetic::Q64x64;
use crate::state::Whirlpool;
use anchor_lang::prelude::*;

pub mod decrease_liquidity;
pub mod increase_liquidity;
pub mod slippage;

pub use decrease_liquidity::decrease_liquidity_quote;
pub use increase_liquidity::{
    increase_liquidity_quote_by_input_token, increase_liquidity_quote_by_liquidity,
};
pub use slippage::Percentage;

/// Snapshot of the pool fields a quote depends on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct PoolState {
    pub sqrt_price: Q64x64,
    pub tick_current_index: i32,
    pub tick_spacing: u16,
    pub liquidity: u128,
    pub token_mint_a: Pubkey,
    pub token_mint_b: Pubkey,
}

impl From<&Whirlpool> for PoolState {
    fn from(whirlpool: &Whirlpool) -> Self {
        Self {
            sqrt_price: whirlpool.sqrt_price_x64(),
            tick_current_index: whirlpool.tick_current_index,
            tick_spacing: whirlpool.tick_spacing,
            liquidity: whirlpool.liquidity,
            token_mint_a: whirlpool.token_mint_a,
            token_mint_b: whirlpool.token_mint_b,
        }
    }
}

/// Liquidity delta and token amounts of a deposit or withdrawal.
///
/// `amount_a` / `amount_b` are the estimates at the snapshot price; execution must stay within
/// `[amount_min_*, amount_max_*]`.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct LiquidityQuote {
    pub liquidity: u128,
    pub amount_a: u64,
    pub amount_b: u64,
    pub amount_min_a: u64,
    pub amount_min_b: u64,
    pub amount_max_a: u64,
    pub amount_max_b: u64,
}

impl LiquidityQuote {
    pub(crate) fn with_slippage(
        liquidity: u128,
        amount_a: u64,
        amount_b: u64,
        slippage: &Percentage,
    ) -> Result<Self> {
        Ok(Self {
            liquidity,
            amount_a,
            amount_b,
            amount_min_a: slippage.adjust_down(amount_a)?,
            amount_min_b: slippage.adjust_down(amount_b)?,
            amount_max_a: slippage.adjust_up(amount_a)?,
            amount_max_b: slippage.adjust_up(amount_b)?,
        })
    }
}
