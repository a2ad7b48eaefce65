//! # whirlpool_core
//!
//! Off-chain engine for Whirlpool concentrated liquidity pools: Q64.64 fixed-point math,
//! tick and price conversions, liquidity/amount conversions, deposit and withdraw quotes,
//! and the program-derived address scheme used to locate pool, tick array, position and
//! fee tier accounts.
//!
//! The math and quote functions are pure functions of their inputs. The [`state`] module
//! models the program's accounts as an arena keyed by derived address so callers can run
//! whole liquidity lifecycles without a ledger.

use anchor_lang::prelude::*;

pub mod error;
pub mod math;
pub mod quote;
pub mod state;
pub mod utils;


// Whirlpool program id. Address derivation defaults to this id.
declare_id!("whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc");

pub use error::ErrorCode;
pub use math::core_arithmetic::{Q64x64, Rounding};
pub use math::tick_math::TickRounding;
pub use quote::{LiquidityQuote, Percentage, PoolState};
pub use utils::pda::{DerivedAccount, PdaInfo, PdaManager};
