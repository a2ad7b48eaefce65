//! In-memory account arena keyed by derived address.
//!
//! Mirrors the ledger's account-by-address model: entities refer to each other by locator, never
//! by reference, and "does this account exist" is a derive-then-lookup. Token balances are not
//! modelled; liquidity operations report the amounts a settlement layer would have to move.

use std::collections::BTreeMap;

use crate::error::ErrorCode;
use crate::math::core_arithmetic::{Q64x64, Rounding};
use crate::math::liquidity_math::get_amounts_for_liquidity;
use crate::math::tick_math::{get_tick_array_start_tick, tick_to_sqrt_x64};
use crate::quote::PoolState;
use crate::state::{
    FeeTier, InitializeConfigParams, InitializePoolParams, Position, PositionBundle, TickArray,
    Whirlpool, WhirlpoolsConfig,
};
use crate::utils::pda::{canonical_mint_order, DerivedAccount, PdaManager};
use anchor_lang::prelude::*;

fn lookup<'a, T>(accounts: &'a BTreeMap<Pubkey, T>, key: &Pubkey) -> Result<&'a T> {
    accounts
        .get(key)
        .ok_or_else(|| error!(ErrorCode::AddressDerivationMismatch))
}

fn lookup_mut<'a, T>(accounts: &'a mut BTreeMap<Pubkey, T>, key: &Pubkey) -> Result<&'a mut T> {
    accounts
        .get_mut(key)
        .ok_or_else(|| error!(ErrorCode::AddressDerivationMismatch))
}

#[derive(Debug)]
pub struct AccountRegistry {
    program_id: Pubkey,
    configs: BTreeMap<Pubkey, WhirlpoolsConfig>,
    fee_tiers: BTreeMap<Pubkey, FeeTier>,
    whirlpools: BTreeMap<Pubkey, Whirlpool>,
    tick_arrays: BTreeMap<Pubkey, TickArray>,
    positions: BTreeMap<Pubkey, Position>,
    position_bundles: BTreeMap<Pubkey, PositionBundle>,
}

impl Default for AccountRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountRegistry {
    /// Registry deriving under the deployed Whirlpool program.
    pub fn new() -> Self {
        Self::with_program_id(crate::ID)
    }

    pub fn with_program_id(program_id: Pubkey) -> Self {
        Self {
            program_id,
            configs: BTreeMap::new(),
            fee_tiers: BTreeMap::new(),
            whirlpools: BTreeMap::new(),
            tick_arrays: BTreeMap::new(),
            positions: BTreeMap::new(),
            position_bundles: BTreeMap::new(),
        }
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    // ---------- Lookups ------------------------------------------------------

    pub fn config(&self, key: &Pubkey) -> Result<&WhirlpoolsConfig> {
        lookup(&self.configs, key)
    }

    pub fn config_mut(&mut self, key: &Pubkey) -> Result<&mut WhirlpoolsConfig> {
        lookup_mut(&mut self.configs, key)
    }

    pub fn fee_tier(&self, key: &Pubkey) -> Result<&FeeTier> {
        lookup(&self.fee_tiers, key)
    }

    pub fn fee_tier_mut(&mut self, key: &Pubkey) -> Result<&mut FeeTier> {
        lookup_mut(&mut self.fee_tiers, key)
    }

    pub fn whirlpool(&self, key: &Pubkey) -> Result<&Whirlpool> {
        lookup(&self.whirlpools, key)
    }

    pub fn tick_array(&self, key: &Pubkey) -> Result<&TickArray> {
        lookup(&self.tick_arrays, key)
    }

    pub fn position(&self, key: &Pubkey) -> Result<&Position> {
        lookup(&self.positions, key)
    }

    pub fn position_bundle(&self, key: &Pubkey) -> Result<&PositionBundle> {
        lookup(&self.position_bundles, key)
    }

    pub fn pool_state(&self, whirlpool: &Pubkey) -> Result<PoolState> {
        Ok(PoolState::from(self.whirlpool(whirlpool)?))
    }

    /// Derives the pool locator for a mint pair in either order and looks it up.
    pub fn find_pool(
        &self,
        config: &Pubkey,
        mint_0: &Pubkey,
        mint_1: &Pubkey,
        tick_spacing: u16,
    ) -> Result<(Pubkey, &Whirlpool)> {
        let pda = PdaManager::whirlpool(config, mint_0, mint_1, tick_spacing, &self.program_id)?;
        Ok((pda.address, self.whirlpool(&pda.address)?))
    }

    pub fn find_fee_tier(&self, config: &Pubkey, tick_spacing: u16) -> Result<(Pubkey, &FeeTier)> {
        let pda = PdaManager::fee_tier(config, tick_spacing, &self.program_id)?;
        Ok((pda.address, self.fee_tier(&pda.address)?))
    }

    pub fn find_position(&self, position_mint: &Pubkey) -> Result<(Pubkey, &Position)> {
        let pda = PdaManager::position(position_mint, &self.program_id)?;
        Ok((pda.address, self.position(&pda.address)?))
    }

    pub fn find_bundled_position(
        &self,
        position_bundle_mint: &Pubkey,
        bundle_index: u16,
    ) -> Result<(Pubkey, &Position)> {
        let pda =
            PdaManager::bundled_position(position_bundle_mint, bundle_index, &self.program_id)?;
        Ok((pda.address, self.position(&pda.address)?))
    }

    /// Tick array holding `tick_index`, if it has been created.
    pub fn find_tick_array(&self, whirlpool: &Pubkey, tick_index: i32) -> Result<(Pubkey, &TickArray)> {
        let tick_spacing = self.whirlpool(whirlpool)?.tick_spacing;
        let pda =
            PdaManager::tick_array_for_tick(whirlpool, tick_index, tick_spacing, &self.program_id)?;
        Ok((pda.address, self.tick_array(&pda.address)?))
    }

    // ---------- Config & fee tiers -------------------------------------------

    /// Registers a config under a caller-chosen key. Configs are not program-derived.
    pub fn initialize_config(
        &mut self,
        config_key: Pubkey,
        params: InitializeConfigParams,
    ) -> Result<Pubkey> {
        require!(
            !self.configs.contains_key(&config_key),
            ErrorCode::AccountAlreadyInitialized
        );

        let mut config = WhirlpoolsConfig::default();
        config.initialize(params)?;
        msg!(
            "Initialized config {} (default protocol fee rate {})",
            config_key,
            config.default_protocol_fee_rate
        );
        self.configs.insert(config_key, config);
        Ok(config_key)
    }

    pub fn initialize_fee_tier(
        &mut self,
        config: &Pubkey,
        tick_spacing: u16,
        default_fee_rate: u16,
    ) -> Result<Pubkey> {
        self.config(config)?;
        let pda = PdaManager::fee_tier(config, tick_spacing, &self.program_id)?;
        require!(
            !self.fee_tiers.contains_key(&pda.address),
            ErrorCode::AccountAlreadyInitialized
        );

        let mut fee_tier = FeeTier::default();
        fee_tier.initialize(*config, tick_spacing, default_fee_rate)?;
        msg!(
            "Initialized fee tier {}: tick spacing {}, fee rate {}",
            pda.address,
            tick_spacing,
            default_fee_rate
        );
        self.fee_tiers.insert(pda.address, fee_tier);
        Ok(pda.address)
    }

    // ---------- Pools & tick arrays ------------------------------------------

    /// Creates the pool for a mint pair, or returns the existing one.
    ///
    /// The mints are sorted first, and `initial_sqrt_price` is read as token B per token A of the
    /// sorted pair. Calling again with the same seeds (in either mint order) returns the existing
    /// locator untouched.
    ///
    /// # Errors
    /// * `ErrorCode::IdenticalMints` - both mints are equal.
    /// * `ErrorCode::AddressDerivationMismatch` - the config or the fee tier for the spacing does
    ///   not exist.
    pub fn initialize_pool(
        &mut self,
        config: &Pubkey,
        mut params: InitializePoolParams,
    ) -> Result<Pubkey> {
        let (mint_a, mint_b) = canonical_mint_order(&params.token_mint_a, &params.token_mint_b)?;
        let (mint_a, mint_b) = (*mint_a, *mint_b);
        params.token_mint_a = mint_a;
        params.token_mint_b = mint_b;

        let protocol_fee_rate = self.config(config)?.default_protocol_fee_rate;
        let (_, fee_tier) = self.find_fee_tier(config, params.tick_spacing)?;
        let fee_rate = fee_tier.default_fee_rate;

        let pda = PdaManager::whirlpool(
            config,
            &mint_a,
            &mint_b,
            params.tick_spacing,
            &self.program_id,
        )?;
        if self.whirlpools.contains_key(&pda.address) {
            msg!("Pool {} already initialized", pda.address);
            return Ok(pda.address);
        }

        let mut whirlpool = Whirlpool::default();
        whirlpool.initialize(*config, pda.bump, fee_rate, protocol_fee_rate, params)?;
        msg!(
            "Initialized pool {}: mints ({}, {}), tick spacing {}, tick {}",
            pda.address,
            mint_a,
            mint_b,
            whirlpool.tick_spacing,
            whirlpool.tick_current_index
        );
        self.whirlpools.insert(pda.address, whirlpool);
        Ok(pda.address)
    }

    /// Creates the tick array starting at `start_tick_index`, or returns the existing one.
    pub fn initialize_tick_array(
        &mut self,
        whirlpool: &Pubkey,
        start_tick_index: i32,
    ) -> Result<Pubkey> {
        let tick_spacing = self.whirlpool(whirlpool)?.tick_spacing;
        let pda = PdaManager::tick_array(whirlpool, start_tick_index, &self.program_id)?;
        if self.tick_arrays.contains_key(&pda.address) {
            return Ok(pda.address);
        }

        let mut tick_array = TickArray::default();
        tick_array.initialize(*whirlpool, start_tick_index, tick_spacing)?;
        msg!(
            "Initialized tick array {} at start tick {}",
            pda.address,
            start_tick_index
        );
        self.tick_arrays.insert(pda.address, tick_array);
        Ok(pda.address)
    }

    // ---------- Positions ----------------------------------------------------

    pub fn open_position(
        &mut self,
        whirlpool: &Pubkey,
        position_mint: &Pubkey,
        tick_lower_index: i32,
        tick_upper_index: i32,
    ) -> Result<Pubkey> {
        let pda = PdaManager::position(position_mint, &self.program_id)?;
        require!(
            !self.positions.contains_key(&pda.address),
            ErrorCode::AccountAlreadyInitialized
        );
        let position = self.new_position(
            whirlpool,
            position_mint,
            tick_lower_index,
            tick_upper_index,
        )?;

        msg!(
            "Opened position {} on [{}, {})",
            pda.address,
            tick_lower_index,
            tick_upper_index
        );
        self.positions.insert(pda.address, position);
        Ok(pda.address)
    }

    pub fn initialize_position_bundle(&mut self, position_bundle_mint: &Pubkey) -> Result<Pubkey> {
        let pda = PdaManager::position_bundle(position_bundle_mint, &self.program_id)?;
        require!(
            !self.position_bundles.contains_key(&pda.address),
            ErrorCode::AccountAlreadyInitialized
        );

        let mut bundle = PositionBundle::default();
        bundle.initialize(*position_bundle_mint);
        msg!("Initialized position bundle {}", pda.address);
        self.position_bundles.insert(pda.address, bundle);
        Ok(pda.address)
    }

    pub fn delete_position_bundle(&mut self, position_bundle_mint: &Pubkey) -> Result<()> {
        let pda = PdaManager::position_bundle(position_bundle_mint, &self.program_id)?;
        require!(
            lookup(&self.position_bundles, &pda.address)?.is_deletable(),
            ErrorCode::PositionBundleNotEmpty
        );
        self.position_bundles.remove(&pda.address);
        msg!("Deleted position bundle {}", pda.address);
        Ok(())
    }

    pub fn open_bundled_position(
        &mut self,
        position_bundle_mint: &Pubkey,
        bundle_index: u16,
        whirlpool: &Pubkey,
        tick_lower_index: i32,
        tick_upper_index: i32,
    ) -> Result<Pubkey> {
        let bundle_pda = PdaManager::position_bundle(position_bundle_mint, &self.program_id)?;
        let pda =
            PdaManager::bundled_position(position_bundle_mint, bundle_index, &self.program_id)?;
        let position = self.new_position(
            whirlpool,
            position_bundle_mint,
            tick_lower_index,
            tick_upper_index,
        )?;

        lookup_mut(&mut self.position_bundles, &bundle_pda.address)?
            .open_bundled_position(bundle_index)?;
        msg!(
            "Opened bundled position {} (index {}) on [{}, {})",
            pda.address,
            bundle_index,
            tick_lower_index,
            tick_upper_index
        );
        self.positions.insert(pda.address, position);
        Ok(pda.address)
    }

    /// Closes an empty, non-bundled position.
    ///
    /// # Errors
    /// * `ErrorCode::PositionNotEmpty` - liquidity or fees remain.
    /// * `ErrorCode::AddressDerivationMismatch` - unknown key, or a bundled position (use
    ///   [`Self::close_bundled_position`]).
    pub fn close_position(&mut self, position_key: &Pubkey) -> Result<()> {
        let position = self.position(position_key)?;
        DerivedAccount::Position {
            position_mint: position.position_mint,
        }
        .verify(position_key, &self.program_id)?;
        position.require_empty()?;

        self.positions.remove(position_key);
        msg!("Closed position {}", position_key);
        Ok(())
    }

    pub fn close_bundled_position(
        &mut self,
        position_bundle_mint: &Pubkey,
        bundle_index: u16,
    ) -> Result<()> {
        let bundle_pda = PdaManager::position_bundle(position_bundle_mint, &self.program_id)?;
        let (position_key, position) =
            self.find_bundled_position(position_bundle_mint, bundle_index)?;
        position.require_empty()?;

        lookup_mut(&mut self.position_bundles, &bundle_pda.address)?
            .close_bundled_position(bundle_index)?;
        self.positions.remove(&position_key);
        msg!(
            "Closed bundled position {} (index {})",
            position_key,
            bundle_index
        );
        Ok(())
    }

    /// Adds `liquidity` to a position. Returns the token amounts the deposit requires, rounded up.
    pub fn increase_liquidity(&mut self, position_key: &Pubkey, liquidity: u128) -> Result<(u64, u64)> {
        require!(liquidity > 0, ErrorCode::ZeroAmount);
        let delta = i128::try_from(liquidity).map_err(|_| error!(ErrorCode::Overflow))?;
        let amounts = self.modify_liquidity(position_key, delta, Rounding::Up)?;
        msg!(
            "Increased liquidity of {} by {}: amounts ({}, {})",
            position_key,
            liquidity,
            amounts.0,
            amounts.1
        );
        Ok(amounts)
    }

    /// Removes `liquidity` from a position. Returns the token amounts released, rounded down.
    pub fn decrease_liquidity(&mut self, position_key: &Pubkey, liquidity: u128) -> Result<(u64, u64)> {
        require!(liquidity > 0, ErrorCode::ZeroAmount);
        let delta = i128::try_from(liquidity).map_err(|_| error!(ErrorCode::Overflow))?;
        let amounts = self.modify_liquidity(position_key, -delta, Rounding::Down)?;
        msg!(
            "Decreased liquidity of {} by {}: amounts ({}, {})",
            position_key,
            liquidity,
            amounts.0,
            amounts.1
        );
        Ok(amounts)
    }

    fn new_position(
        &self,
        whirlpool: &Pubkey,
        position_mint: &Pubkey,
        tick_lower_index: i32,
        tick_upper_index: i32,
    ) -> Result<Position> {
        let tick_spacing = self.whirlpool(whirlpool)?.tick_spacing;
        let mut position = Position::default();
        position.open_position(
            *whirlpool,
            tick_spacing,
            *position_mint,
            tick_lower_index,
            tick_upper_index,
        )?;
        Ok(position)
    }

    // Stage on copies; commit only after every step succeeded.
    fn modify_liquidity(
        &mut self,
        position_key: &Pubkey,
        liquidity_delta: i128,
        rounding: Rounding,
    ) -> Result<(u64, u64)> {
        let mut position = self.position(position_key)?.clone();
        let whirlpool_key = position.whirlpool;
        let mut whirlpool = self.whirlpool(&whirlpool_key)?.clone();
        let tick_spacing = whirlpool.tick_spacing;
        let (tick_lower, tick_upper) = (position.tick_lower_index, position.tick_upper_index);

        position.update_liquidity(liquidity_delta)?;
        whirlpool.apply_position_liquidity_delta(tick_lower, tick_upper, liquidity_delta)?;

        let mut staged: BTreeMap<Pubkey, TickArray> = BTreeMap::new();
        for (tick_index, is_upper_tick) in [(tick_lower, false), (tick_upper, true)] {
            let start = get_tick_array_start_tick(tick_index, tick_spacing)?;
            let pda = PdaManager::tick_array(&whirlpool_key, start, &self.program_id)?;
            if !staged.contains_key(&pda.address) {
                let tick_array = match self.tick_arrays.get(&pda.address) {
                    Some(existing) => existing.clone(),
                    None => {
                        let mut created = TickArray::default();
                        created.initialize(whirlpool_key, start, tick_spacing)?;
                        created
                    }
                };
                staged.insert(pda.address, tick_array);
            }
            lookup_mut(&mut staged, &pda.address)?.update_tick(
                tick_index,
                tick_spacing,
                liquidity_delta,
                is_upper_tick,
            )?;
        }

        let amounts = get_amounts_for_liquidity(
            liquidity_delta.unsigned_abs(),
            Q64x64::from_raw(whirlpool.sqrt_price),
            tick_to_sqrt_x64(tick_lower)?,
            tick_to_sqrt_x64(tick_upper)?,
            rounding,
        )?;

        for (key, tick_array) in staged {
            if !self.tick_arrays.contains_key(&key) {
                msg!(
                    "Initialized tick array {} at start tick {}",
                    key,
                    tick_array.start_tick_index
                );
            }
            self.tick_arrays.insert(key, tick_array);
        }
        self.whirlpools.insert(whirlpool_key, whirlpool);
        self.positions.insert(*position_key, position);
        Ok(amounts)
    }
}
