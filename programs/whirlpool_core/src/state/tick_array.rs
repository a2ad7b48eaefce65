use crate::error::ErrorCode;
use crate::math::liquidity_math::add_liquidity_delta;
use crate::math::tick_math::{is_valid_tick_array_start_tick, tick_offset_in_array};
use crate::utils::constants::TICK_ARRAY_SIZE_USIZE;
use anchor_lang::prelude::*;

/// Liquidity bookkeeping for one initializable tick.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct Tick {
    pub initialized: bool,
    /// Liquidity added when the price crosses this tick upward, removed when crossing down.
    pub liquidity_net: i128,
    /// Total liquidity of positions using this tick as a bound.
    pub liquidity_gross: u128,
}

impl Tick {
    /// Updates the tick when a position bounded by it changes liquidity.
    ///
    /// # Arguments
    ///
    /// * `liquidity_delta` - Positive when adding liquidity, negative when removing.
    /// * `is_upper_tick` - True if this tick is the position's upper bound.
    pub fn update(&mut self, liquidity_delta: i128, is_upper_tick: bool) -> Result<()> {
        self.liquidity_gross = add_liquidity_delta(self.liquidity_gross, liquidity_delta)?;

        // Upper bounds remove liquidity when crossed upward, so their net moves the other way
        self.liquidity_net = if is_upper_tick {
            self.liquidity_net.checked_sub(liquidity_delta)
        } else {
            self.liquidity_net.checked_add(liquidity_delta)
        }
        .ok_or(ErrorCode::Overflow)?;

        self.initialized = self.liquidity_gross != 0;
        Ok(())
    }
}

/// A fixed run of `TICK_ARRAY_SIZE` ticks starting at `start_tick_index`, spaced by the pool's
/// tick spacing. Created lazily the first time a position uses one of its ticks.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct TickArray {
    pub start_tick_index: i32,
    pub ticks: [Tick; TICK_ARRAY_SIZE_USIZE],
    pub whirlpool: Pubkey,
}

impl Default for TickArray {
    fn default() -> Self {
        Self {
            start_tick_index: 0,
            ticks: [Tick::default(); TICK_ARRAY_SIZE_USIZE],
            whirlpool: Pubkey::default(),
        }
    }
}

impl TickArray {
    /// Tick: initialized (1) + liquidity_net (16) + liquidity_gross (16)
    pub const TICK_LEN: usize = 1 + 16 + 16;
    pub const LEN: usize = 8 + 4 + Self::TICK_LEN * TICK_ARRAY_SIZE_USIZE + 32;

    pub fn initialize(
        &mut self,
        whirlpool: Pubkey,
        start_tick_index: i32,
        tick_spacing: u16,
    ) -> Result<()> {
        require!(
            is_valid_tick_array_start_tick(start_tick_index, tick_spacing),
            ErrorCode::InvalidTickArrayStart
        );
        self.whirlpool = whirlpool;
        self.start_tick_index = start_tick_index;
        self.ticks = [Tick::default(); TICK_ARRAY_SIZE_USIZE];
        Ok(())
    }

    pub fn get_tick(&self, tick_index: i32, tick_spacing: u16) -> Result<&Tick> {
        let offset = tick_offset_in_array(tick_index, self.start_tick_index, tick_spacing)?;
        Ok(&self.ticks[offset])
    }

    pub fn update_tick(
        &mut self,
        tick_index: i32,
        tick_spacing: u16,
        liquidity_delta: i128,
        is_upper_tick: bool,
    ) -> Result<()> {
        let offset = tick_offset_in_array(tick_index, self.start_tick_index, tick_spacing)?;
        self.ticks[offset].update(liquidity_delta, is_upper_tick)
    }

    pub fn initialized_tick_count(&self) -> usize {
        self.ticks.iter().filter(|tick| tick.initialized).count()
    }
}
