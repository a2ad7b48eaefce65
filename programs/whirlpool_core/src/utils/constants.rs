pub const MIN_TICK: i32 = -443_636;
pub const MAX_TICK: i32 = 443_636;
pub const MIN_SQRT_X64: u128 = 4295048016;
pub const MAX_SQRT_X64: u128 = 79226673515401279992447579055;
pub const FRAC_BITS: u32 = 64; // Q64.64
pub const ONE_X64: u128 = 1u128 << FRAC_BITS;

/// Number of ticks grouped under one tick array account.
pub const TICK_ARRAY_SIZE: i32 = 88;
pub const TICK_ARRAY_SIZE_USIZE: usize = 88;

/// Capacity of a position bundle (256 bits of occupancy bitmap).
pub const POSITION_BUNDLE_SIZE: u16 = 256;
pub const POSITION_BITMAP_USIZE: usize = 32;

/// Largest decimal exponent a token mint may declare.
pub const MAX_TOKEN_DECIMALS: u8 = 28;

/// Fee rates are in hundredths of a basis point: 3000 = 0.30%.
pub const FEE_RATE_DENOMINATOR: u32 = 1_000_000;
pub const MAX_FEE_RATE: u16 = 60_000;

/// Protocol fee rates are in basis points of the swap fee: 300 = 3%.
pub const PROTOCOL_FEE_RATE_DENOMINATOR: u16 = 10_000;
pub const MAX_PROTOCOL_FEE_RATE: u16 = 2_500;
pub const DEFAULT_PROTOCOL_FEE_RATE: u16 = 300;

/// Standard fee tiers and their tick spacings
pub const TICK_SPACING_STABLE: u16 = 1;
pub const TICK_SPACING_STANDARD: u16 = 64;
pub const TICK_SPACING_VOLATILE: u16 = 128;
pub const FEE_RATE_STABLE: u16 = 100; // 0.01%
pub const FEE_RATE_STANDARD: u16 = 3000; // 0.30%
pub const FEE_RATE_VOLATILE: u16 = 10000; // 1.00%
