//! PDA (Program Derived Address) management utilities
//!
//! Every Whirlpool account is located by hashing a kind-specific literal tag together with the
//! attributes that identify it. The seeds here must match the on-chain program byte for byte: a
//! single differing byte yields a different, most likely nonexistent, account.

use crate::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::Id;
use anchor_spl::metadata::Metadata;
use solana_program::pubkey::{MAX_SEEDS, MAX_SEED_LEN};

/// Information about a derived PDA.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PdaInfo {
    pub address: Pubkey,
    pub bump: u8,
}

/// The identifying attributes of every account kind the program derives.
///
/// The variant selects the leading literal seed, which doubles as a domain-separation tag: two
/// kinds never share a seed layout, so their addresses cannot collide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DerivedAccount {
    /// Mints may be passed in either order; they are sorted before hashing.
    Whirlpool {
        config: Pubkey,
        token_mint_a: Pubkey,
        token_mint_b: Pubkey,
        tick_spacing: u16,
    },
    FeeTier {
        config: Pubkey,
        tick_spacing: u16,
    },
    TickArray {
        whirlpool: Pubkey,
        start_tick_index: i32,
    },
    Position {
        position_mint: Pubkey,
    },
    /// Metaplex metadata of a position NFT. Derived under the metadata program, not this one.
    PositionMetadata {
        position_mint: Pubkey,
    },
    PositionBundle {
        position_bundle_mint: Pubkey,
    },
    BundledPosition {
        position_bundle_mint: Pubkey,
        bundle_index: u16,
    },
    Oracle {
        whirlpool: Pubkey,
    },
    ConfigExtension {
        config: Pubkey,
    },
    TokenBadge {
        config: Pubkey,
        token_mint: Pubkey,
    },
}

impl DerivedAccount {
    /// Leading literal seed of this kind.
    pub fn tag(&self) -> &'static [u8] {
        match self {
            DerivedAccount::Whirlpool { .. } => b"whirlpool",
            DerivedAccount::FeeTier { .. } => b"fee_tier",
            DerivedAccount::TickArray { .. } => b"tick_array",
            DerivedAccount::Position { .. } => b"position",
            DerivedAccount::PositionMetadata { .. } => b"metadata",
            DerivedAccount::PositionBundle { .. } => b"position_bundle",
            DerivedAccount::BundledPosition { .. } => b"bundled_position",
            DerivedAccount::Oracle { .. } => b"oracle",
            DerivedAccount::ConfigExtension { .. } => b"config_extension",
            DerivedAccount::TokenBadge { .. } => b"token_badge",
        }
    }

    /// Full seed list, tag first.
    ///
    /// # Errors
    /// * `ErrorCode::IdenticalMints` - a `Whirlpool` whose two mints are equal.
    pub fn seeds(&self) -> Result<Vec<Vec<u8>>> {
        let tag = self.tag().to_vec();
        let seeds = match self {
            DerivedAccount::Whirlpool {
                config,
                token_mint_a,
                token_mint_b,
                tick_spacing,
            } => {
                let (mint_a, mint_b) = canonical_mint_order(token_mint_a, token_mint_b)?;
                vec![
                    tag,
                    config.to_bytes().to_vec(),
                    mint_a.to_bytes().to_vec(),
                    mint_b.to_bytes().to_vec(),
                    tick_spacing.to_le_bytes().to_vec(),
                ]
            }
            DerivedAccount::FeeTier {
                config,
                tick_spacing,
            } => vec![
                tag,
                config.to_bytes().to_vec(),
                tick_spacing.to_le_bytes().to_vec(),
            ],
            // The program hashes the decimal string of the start index, not its binary form
            DerivedAccount::TickArray {
                whirlpool,
                start_tick_index,
            } => vec![
                tag,
                whirlpool.to_bytes().to_vec(),
                start_tick_index.to_string().into_bytes(),
            ],
            DerivedAccount::PositionMetadata { position_mint } => vec![
                tag,
                Metadata::id().to_bytes().to_vec(),
                position_mint.to_bytes().to_vec(),
            ],
            DerivedAccount::BundledPosition {
                position_bundle_mint,
                bundle_index,
            } => vec![
                tag,
                position_bundle_mint.to_bytes().to_vec(),
                bundle_index.to_string().into_bytes(),
            ],
            DerivedAccount::TokenBadge { config, token_mint } => vec![
                tag,
                config.to_bytes().to_vec(),
                token_mint.to_bytes().to_vec(),
            ],
            DerivedAccount::Position { position_mint: key }
            | DerivedAccount::PositionBundle {
                position_bundle_mint: key,
            }
            | DerivedAccount::Oracle { whirlpool: key }
            | DerivedAccount::ConfigExtension { config: key } => {
                vec![tag, key.to_bytes().to_vec()]
            }
        };
        Ok(seeds)
    }

    /// Program that owns the derived address. Only position metadata lives outside `program_id`.
    pub fn owner_program(&self, program_id: &Pubkey) -> Pubkey {
        match self {
            DerivedAccount::PositionMetadata { .. } => Metadata::id(),
            _ => *program_id,
        }
    }

    /// Derives the address under the given Whirlpool program id.
    pub fn derive_with_program_id(&self, program_id: &Pubkey) -> Result<PdaInfo> {
        let seeds = self.seeds()?;
        require!(
            seeds.len() < MAX_SEEDS && seeds.iter().all(|s| s.len() <= MAX_SEED_LEN),
            ErrorCode::AddressDerivationMismatch
        );
        let seed_refs: Vec<&[u8]> = seeds.iter().map(Vec::as_slice).collect();

        let (address, bump) =
            Pubkey::try_find_program_address(&seed_refs, &self.owner_program(program_id))
                .ok_or(ErrorCode::AddressDerivationMismatch)?;

        Ok(PdaInfo { address, bump })
    }

    /// Derives the address under the deployed Whirlpool program.
    pub fn derive(&self) -> Result<PdaInfo> {
        self.derive_with_program_id(&crate::ID)
    }

    /// Checks that `address` is the address these seeds derive.
    ///
    /// # Errors
    /// * `ErrorCode::AddressDerivationMismatch` - the address belongs to some other seed set.
    pub fn verify(&self, address: &Pubkey, program_id: &Pubkey) -> Result<PdaInfo> {
        let info = self.derive_with_program_id(program_id)?;
        if info.address != *address {
            msg!(
                "Address mismatch: expected {}, got {}",
                info.address,
                address
            );
            return err!(ErrorCode::AddressDerivationMismatch);
        }
        Ok(info)
    }

    /// Recreates the address from a stored bump without searching.
    pub fn create_with_bump(&self, bump: u8, program_id: &Pubkey) -> Result<Pubkey> {
        let seeds = self.seeds()?;
        let bump_seed = [bump];
        let mut seed_refs: Vec<&[u8]> = seeds.iter().map(Vec::as_slice).collect();
        seed_refs.push(&bump_seed);

        Pubkey::create_program_address(&seed_refs, &self.owner_program(program_id))
            .map_err(|_| error!(ErrorCode::AddressDerivationMismatch))
    }
}

/// Returns two distinct mints in canonical (byte-wise ascending) order.
///
/// Every pool is keyed by its sorted pair, so there is exactly one pool per unordered pair and
/// tick spacing.
///
/// # Errors
/// * `ErrorCode::IdenticalMints` - if both mints are the same.
pub fn canonical_mint_order<'a>(
    mint_0: &'a Pubkey,
    mint_1: &'a Pubkey,
) -> Result<(&'a Pubkey, &'a Pubkey)> {
    require_keys_neq!(*mint_0, *mint_1, ErrorCode::IdenticalMints);
    if mint_0 < mint_1 {
        Ok((mint_0, mint_1))
    } else {
        Ok((mint_1, mint_0))
    }
}

/// Centralized PDA manager with one helper per account kind.
///
/// Each helper takes the program id explicitly so forks and local validators derive under their
/// own deployment.
pub struct PdaManager;

impl PdaManager {
    /// Derives the pool PDA for a pair of mints and a tick spacing.
    ///
    /// # Arguments
    /// * `config` - The config that scopes the pool.
    /// * `mint_0`, `mint_1` - The pool's mints, in any order.
    /// * `tick_spacing` - The pool's tick spacing.
    /// * `program_id` - The Whirlpool program id.
    /// # Returns
    /// * `Ok(PdaInfo)` - The same address whichever order the mints were given in.
    /// * `Err(ErrorCode::IdenticalMints)` - If the mints are equal.
    pub fn whirlpool(
        config: &Pubkey,
        mint_0: &Pubkey,
        mint_1: &Pubkey,
        tick_spacing: u16,
        program_id: &Pubkey,
    ) -> Result<PdaInfo> {
        DerivedAccount::Whirlpool {
            config: *config,
            token_mint_a: *mint_0,
            token_mint_b: *mint_1,
            tick_spacing,
        }
        .derive_with_program_id(program_id)
    }

    pub fn fee_tier(config: &Pubkey, tick_spacing: u16, program_id: &Pubkey) -> Result<PdaInfo> {
        DerivedAccount::FeeTier {
            config: *config,
            tick_spacing,
        }
        .derive_with_program_id(program_id)
    }

    /// Derives the tick array PDA starting at `start_tick_index`.
    pub fn tick_array(
        whirlpool: &Pubkey,
        start_tick_index: i32,
        program_id: &Pubkey,
    ) -> Result<PdaInfo> {
        DerivedAccount::TickArray {
            whirlpool: *whirlpool,
            start_tick_index,
        }
        .derive_with_program_id(program_id)
    }

    /// Derives the PDA of the tick array that holds `tick_index`.
    pub fn tick_array_for_tick(
        whirlpool: &Pubkey,
        tick_index: i32,
        tick_spacing: u16,
        program_id: &Pubkey,
    ) -> Result<PdaInfo> {
        let start = crate::math::tick_math::get_tick_array_start_tick(tick_index, tick_spacing)?;
        Self::tick_array(whirlpool, start, program_id)
    }

    pub fn position(position_mint: &Pubkey, program_id: &Pubkey) -> Result<PdaInfo> {
        DerivedAccount::Position {
            position_mint: *position_mint,
        }
        .derive_with_program_id(program_id)
    }

    /// Derives the Metaplex metadata account of a position NFT.
    pub fn position_metadata(position_mint: &Pubkey) -> Result<PdaInfo> {
        DerivedAccount::PositionMetadata {
            position_mint: *position_mint,
        }
        .derive_with_program_id(&Metadata::id())
    }

    pub fn position_bundle(position_bundle_mint: &Pubkey, program_id: &Pubkey) -> Result<PdaInfo> {
        DerivedAccount::PositionBundle {
            position_bundle_mint: *position_bundle_mint,
        }
        .derive_with_program_id(program_id)
    }

    pub fn bundled_position(
        position_bundle_mint: &Pubkey,
        bundle_index: u16,
        program_id: &Pubkey,
    ) -> Result<PdaInfo> {
        DerivedAccount::BundledPosition {
            position_bundle_mint: *position_bundle_mint,
            bundle_index,
        }
        .derive_with_program_id(program_id)
    }

    pub fn oracle(whirlpool: &Pubkey, program_id: &Pubkey) -> Result<PdaInfo> {
        DerivedAccount::Oracle {
            whirlpool: *whirlpool,
        }
        .derive_with_program_id(program_id)
    }

    pub fn config_extension(config: &Pubkey, program_id: &Pubkey) -> Result<PdaInfo> {
        DerivedAccount::ConfigExtension { config: *config }.derive_with_program_id(program_id)
    }

    pub fn token_badge(config: &Pubkey, token_mint: &Pubkey, program_id: &Pubkey) -> Result<PdaInfo> {
        DerivedAccount::TokenBadge {
            config: *config,
            token_mint: *token_mint,
        }
        .derive_with_program_id(program_id)
    }
}
