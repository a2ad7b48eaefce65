//! Utility modules for Whirlpool Core
//!
//! Protocol constants and the program-derived address scheme.
pub mod constants;
pub mod pda;

pub use pda::{canonical_mint_order, DerivedAccount, PdaInfo, PdaManager};
