//! Whirlpool Core Error Definitions
//!
//! Every fallible operation in the crate returns one of these codes.
use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    /// Fixed-point or integer arithmetic left the representable range.
    #[msg("Arithmetic overflow")]
    Overflow,

    #[msg("Division by zero")]
    DivisionByZero,

    /// Tick index (or the sqrt price standing in for it) is outside [MIN_TICK, MAX_TICK].
    #[msg("Tick index out of bounds")]
    TickOutOfBounds,

    #[msg("Tick spacing must be positive")]
    InvalidTickSpacing,

    /// Returned when a tick range is unusable for a pool
    ///
    /// This error occurs when:
    /// - The lower tick is greater than or equal to the upper tick
    /// - Either bound is not a multiple of the pool's tick spacing
    /// - Either bound lies outside the protocol tick bounds
    #[msg("Invalid tick range")]
    InvalidRange,

    /// A quote would move no liquidity at all.
    #[msg("Liquidity rounds to zero")]
    ZeroAmount,

    #[msg("Price must be a positive decimal")]
    InvalidPrice,

    #[msg("Slippage tolerance must be a fraction in [0, 1]")]
    InvalidSlippage,

    #[msg("Input mint is neither token A nor token B of the pool")]
    InvalidInputMint,

    #[msg("Token mints must differ")]
    IdenticalMints,

    /// The seeds do not lead to a known account, or the supplied address is not the one the
    /// seeds derive. Surfaced to callers as "not found".
    #[msg("Derived address does not match any account")]
    AddressDerivationMismatch,

    #[msg("Account already initialized")]
    AccountAlreadyInitialized,

    #[msg("Fee rate exceeds the maximum")]
    InvalidFeeRate,

    #[msg("Protocol fee rate exceeds the maximum")]
    InvalidProtocolFeeRate,

    #[msg("Bundle index out of bounds")]
    InvalidBundleIndex,

    #[msg("Bundled position already opened")]
    BundledPositionAlreadyOpened,

    #[msg("Bundled position not opened")]
    BundledPositionNotOpened,

    #[msg("Position still holds liquidity")]
    PositionNotEmpty,

    #[msg("Position bundle still holds open positions")]
    PositionBundleNotEmpty,

    #[msg("Liquidity delta exceeds available liquidity")]
    LiquidityUnderflow,

    #[msg("Tick array start index is invalid for the tick spacing")]
    InvalidTickArrayStart,

    /// Pool mints must be passed as (smaller, larger) once stored on a pool.
    #[msg("Token mints are not in canonical order")]
    InvalidMintOrder,
}
