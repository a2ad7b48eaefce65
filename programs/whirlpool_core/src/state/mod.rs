pub mod config;
pub mod fee_tier;
pub mod position;
pub mod position_bundle;
pub mod registry;
pub mod tick_array;
pub mod whirlpool;

pub use config::{InitializeConfigParams, WhirlpoolsConfig};
pub use fee_tier::FeeTier;
pub use position::Position;
pub use position_bundle::PositionBundle;
pub use registry::AccountRegistry;
pub use tick_array::{Tick, TickArray};
pub use whirlpool::{InitializePoolParams, Whirlpool};
