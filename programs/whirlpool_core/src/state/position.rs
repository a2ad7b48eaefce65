//! A liquidity position: one range on one pool, identified by its position mint.
use anchor_lang::prelude::*;

use crate::error::ErrorCode;
use crate::math::liquidity_math::add_liquidity_delta;
use crate::math::tick_math::validate_tick_range;

#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct Position {
    /// The pool this position provides liquidity to.
    pub whirlpool: Pubkey,
    /// The mint whose holder owns the position.
    pub position_mint: Pubkey,
    pub liquidity: u128,
    /// Liquidity is active while the pool's current tick is at or above this value.
    pub tick_lower_index: i32,
    /// Liquidity is active while the pool's current tick is below this value.
    pub tick_upper_index: i32,
    pub fee_owed_a: u64,
    pub fee_owed_b: u64,
}

impl Position {
    /// Discriminator (8) + whirlpool (32) + position_mint (32) + liquidity (16)
    /// + tick bounds (4 + 4) + fees owed (8 + 8)
    pub const LEN: usize = 8 + 32 + 32 + 16 + 4 + 4 + 8 + 8;

    /// Opens an empty position on `[tick_lower_index, tick_upper_index)`.
    ///
    /// # Errors
    /// * `ErrorCode::InvalidRange` - if the bounds are unordered or not initializable for the
    ///   pool's tick spacing.
    pub fn open_position(
        &mut self,
        whirlpool: Pubkey,
        tick_spacing: u16,
        position_mint: Pubkey,
        tick_lower_index: i32,
        tick_upper_index: i32,
    ) -> Result<()> {
        validate_tick_range(tick_lower_index, tick_upper_index, tick_spacing)?;

        self.whirlpool = whirlpool;
        self.position_mint = position_mint;
        self.liquidity = 0;
        self.tick_lower_index = tick_lower_index;
        self.tick_upper_index = tick_upper_index;
        self.fee_owed_a = 0;
        self.fee_owed_b = 0;
        Ok(())
    }

    pub fn update_liquidity(&mut self, liquidity_delta: i128) -> Result<()> {
        self.liquidity = add_liquidity_delta(self.liquidity, liquidity_delta)?;
        Ok(())
    }

    /// A position can be closed once it holds no liquidity and no uncollected fees.
    pub fn is_position_empty(&self) -> bool {
        self.liquidity == 0 && self.fee_owed_a == 0 && self.fee_owed_b == 0
    }

    pub fn require_empty(&self) -> Result<()> {
        require!(self.is_position_empty(), ErrorCode::PositionNotEmpty);
        Ok(())
    }
}
