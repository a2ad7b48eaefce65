use crate::error::ErrorCode;
use crate::math::core_arithmetic::Q64x64;
use crate::math::liquidity_math::add_liquidity_delta;
use crate::math::tick_math::sqrt_x64_to_tick;
use crate::utils::constants::{
    MAX_FEE_RATE, MAX_PROTOCOL_FEE_RATE, MAX_SQRT_X64, MIN_SQRT_X64, ONE_X64,
};
use anchor_lang::prelude::*;

/// A concentrated liquidity pool for one (config, mint_a, mint_b, tick_spacing) tuple.
///
/// `token_mint_a < token_mint_b` always holds, and prices are quoted as token B per token A.
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct Whirlpool {
    pub whirlpools_config: Pubkey,
    pub whirlpool_bump: [u8; 1],

    pub tick_spacing: u16,
    /// Hundredths of a basis point.
    pub fee_rate: u16,
    /// Basis points of the swap fee.
    pub protocol_fee_rate: u16,

    /// Liquidity of all positions whose range contains the current tick.
    pub liquidity: u128,
    /// Q64.64 sqrt price.
    pub sqrt_price: u128,
    pub tick_current_index: i32,

    pub protocol_fee_owed_a: u64,
    pub protocol_fee_owed_b: u64,

    pub token_mint_a: Pubkey,
    /// Q64.64 fee growth per unit of liquidity, token A.
    pub fee_growth_global_a: u128,

    pub token_mint_b: Pubkey,
    pub fee_growth_global_b: u128,
}

/// Parameters for initializing a new pool.
#[derive(Clone, Debug, Default)]
pub struct InitializePoolParams {
    pub token_mint_a: Pubkey,
    pub token_mint_b: Pubkey,
    pub tick_spacing: u16,
    /// Starting Q64.64 sqrt price. Defaults to a price of 1.
    pub initial_sqrt_price: Option<u128>,
}

impl Whirlpool {
    pub const LEN: usize = 8 + 32 + 1 + 2 + 2 + 2 + 16 + 16 + 4 + 8 + 8 + 32 + 16 + 32 + 16;

    /// Initializes the pool state.
    ///
    /// # Arguments
    /// * `whirlpools_config` - The config the pool belongs to.
    /// * `bump` - The bump seed of the pool's PDA.
    /// * `fee_rate` - The fee tier's default fee rate.
    /// * `protocol_fee_rate` - The config's default protocol fee rate.
    /// * `params` - Mints, tick spacing and the optional starting price.
    pub fn initialize(
        &mut self,
        whirlpools_config: Pubkey,
        bump: u8,
        fee_rate: u16,
        protocol_fee_rate: u16,
        params: InitializePoolParams,
    ) -> Result<()> {
        require_keys_neq!(
            params.token_mint_a,
            params.token_mint_b,
            ErrorCode::IdenticalMints
        );
        require!(
            params.token_mint_a < params.token_mint_b,
            ErrorCode::InvalidMintOrder
        );
        require!(params.tick_spacing > 0, ErrorCode::InvalidTickSpacing);

        let sqrt_price = params.initial_sqrt_price.unwrap_or(ONE_X64);
        require!(
            (MIN_SQRT_X64..=MAX_SQRT_X64).contains(&sqrt_price),
            ErrorCode::InvalidPrice
        );

        self.whirlpools_config = whirlpools_config;
        self.whirlpool_bump = [bump];
        self.tick_spacing = params.tick_spacing;
        self.update_fee_rate(fee_rate)?;
        self.update_protocol_fee_rate(protocol_fee_rate)?;

        self.liquidity = 0;
        self.sqrt_price = sqrt_price;
        self.tick_current_index = sqrt_x64_to_tick(Q64x64::from_raw(sqrt_price))?;

        self.protocol_fee_owed_a = 0;
        self.protocol_fee_owed_b = 0;
        self.token_mint_a = params.token_mint_a;
        self.fee_growth_global_a = 0;
        self.token_mint_b = params.token_mint_b;
        self.fee_growth_global_b = 0;

        Ok(())
    }

    pub fn update_fee_rate(&mut self, fee_rate: u16) -> Result<()> {
        require!(fee_rate <= MAX_FEE_RATE, ErrorCode::InvalidFeeRate);
        self.fee_rate = fee_rate;
        Ok(())
    }

    pub fn update_protocol_fee_rate(&mut self, protocol_fee_rate: u16) -> Result<()> {
        require!(
            protocol_fee_rate <= MAX_PROTOCOL_FEE_RATE,
            ErrorCode::InvalidProtocolFeeRate
        );
        self.protocol_fee_rate = protocol_fee_rate;
        Ok(())
    }

    /// Whether a range `[tick_lower, tick_upper)` contributes to the active liquidity.
    pub fn is_range_active(&self, tick_lower: i32, tick_upper: i32) -> bool {
        tick_lower <= self.tick_current_index && self.tick_current_index < tick_upper
    }

    /// Applies a liquidity delta to the active liquidity if the range covers the current tick.
    pub fn apply_position_liquidity_delta(
        &mut self,
        tick_lower: i32,
        tick_upper: i32,
        liquidity_delta: i128,
    ) -> Result<()> {
        if self.is_range_active(tick_lower, tick_upper) {
            self.liquidity = add_liquidity_delta(self.liquidity, liquidity_delta)?;
        }
        Ok(())
    }

    #[inline]
    pub fn sqrt_price_x64(&self) -> Q64x64 {
        Q64x64::from_raw(self.sqrt_price)
    }
}
