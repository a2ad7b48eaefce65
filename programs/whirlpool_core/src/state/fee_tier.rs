use crate::error::ErrorCode;
use crate::utils::constants::MAX_FEE_RATE;
use anchor_lang::prelude::*;

/// Default swap fee for every pool created with a given tick spacing under one config.
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct FeeTier {
    pub whirlpools_config: Pubkey,
    pub tick_spacing: u16,
    /// Hundredths of a basis point: 3000 = 0.30%.
    pub default_fee_rate: u16,
}

impl FeeTier {
    pub const LEN: usize = 8 + 32 + 2 + 2;

    pub fn initialize(
        &mut self,
        whirlpools_config: Pubkey,
        tick_spacing: u16,
        default_fee_rate: u16,
    ) -> Result<()> {
        require!(tick_spacing > 0, ErrorCode::InvalidTickSpacing);
        self.whirlpools_config = whirlpools_config;
        self.tick_spacing = tick_spacing;
        self.set_default_fee_rate(default_fee_rate)
    }

    pub fn set_default_fee_rate(&mut self, default_fee_rate: u16) -> Result<()> {
        require!(default_fee_rate <= MAX_FEE_RATE, ErrorCode::InvalidFeeRate);
        self.default_fee_rate = default_fee_rate;
        Ok(())
    }
}
