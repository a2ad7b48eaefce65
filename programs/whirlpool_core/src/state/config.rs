use crate::error::ErrorCode;
use crate::utils::constants::{DEFAULT_PROTOCOL_FEE_RATE, MAX_PROTOCOL_FEE_RATE};
use anchor_lang::prelude::*;

/// Root account scoping a family of fee tiers and pools.
///
/// Holds the authorities allowed to change fees, collect protocol fees and manage reward
/// emissions, plus the protocol fee rate new pools start with.
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct WhirlpoolsConfig {
    pub fee_authority: Pubkey,
    pub collect_protocol_fees_authority: Pubkey,
    pub reward_emissions_super_authority: Pubkey,
    /// Basis points of each swap fee routed to the protocol.
    pub default_protocol_fee_rate: u16,
}

/// Parameters for creating a config. Unset authorities fall back to `fee_authority`; an unset
/// protocol fee rate falls back to `DEFAULT_PROTOCOL_FEE_RATE`.
#[derive(Clone, Debug, Default)]
pub struct InitializeConfigParams {
    pub fee_authority: Pubkey,
    pub collect_protocol_fees_authority: Option<Pubkey>,
    pub reward_emissions_super_authority: Option<Pubkey>,
    pub default_protocol_fee_rate: Option<u16>,
}

impl WhirlpoolsConfig {
    /// Discriminator (8) + three authorities (3 * 32) + default_protocol_fee_rate (2)
    pub const LEN: usize = 8 + 96 + 2;

    pub fn initialize(&mut self, params: InitializeConfigParams) -> Result<()> {
        let protocol_fee_rate = params
            .default_protocol_fee_rate
            .unwrap_or(DEFAULT_PROTOCOL_FEE_RATE);

        self.fee_authority = params.fee_authority;
        self.collect_protocol_fees_authority = params
            .collect_protocol_fees_authority
            .unwrap_or(params.fee_authority);
        self.reward_emissions_super_authority = params
            .reward_emissions_super_authority
            .unwrap_or(params.fee_authority);
        self.set_default_protocol_fee_rate(protocol_fee_rate)
    }

    pub fn set_fee_authority(&mut self, fee_authority: Pubkey) {
        self.fee_authority = fee_authority;
    }

    pub fn set_collect_protocol_fees_authority(&mut self, authority: Pubkey) {
        self.collect_protocol_fees_authority = authority;
    }

    pub fn set_reward_emissions_super_authority(&mut self, authority: Pubkey) {
        self.reward_emissions_super_authority = authority;
    }

    pub fn set_default_protocol_fee_rate(&mut self, default_protocol_fee_rate: u16) -> Result<()> {
        require!(
            default_protocol_fee_rate <= MAX_PROTOCOL_FEE_RATE,
            ErrorCode::InvalidProtocolFeeRate
        );
        self.default_protocol_fee_rate = default_protocol_fee_rate;
        Ok(())
    }
}
