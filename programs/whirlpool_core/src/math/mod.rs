pub mod core_arithmetic;
pub mod liquidity_math;
pub mod price_math;
pub mod tick_math;
