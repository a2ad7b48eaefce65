#[cfg(test)]
mod tests {
    use crate::error::ErrorCode;
    use crate::math::core_arithmetic::{Q64x64, Rounding};
    use crate::math::liquidity_math::*;
    use crate::math::tick_math::tick_to_sqrt_x64;
    use crate::unit_test::assert_error_code;
    use crate::utils::constants::{MAX_SQRT_X64, MIN_SQRT_X64};

    fn sqrt_at(tick: i32) -> Q64x64 {
        tick_to_sqrt_x64(tick).unwrap()
    }

    const LIQUIDITY: u128 = 1_000_000_000_000;

    #[test]
    fn test_amount_deltas_round_in_requested_direction() {
        let (lower, upper) = (sqrt_at(-64), sqrt_at(64));
        assert_eq!(
            get_amount_a_delta(lower, upper, LIQUIDITY, Rounding::Up).unwrap(),
            6399690943
        );
        assert_eq!(
            get_amount_a_delta(lower, upper, LIQUIDITY, Rounding::Down).unwrap(),
            6399690942
        );
        assert_eq!(
            get_amount_b_delta(lower, upper, LIQUIDITY, Rounding::Up).unwrap(),
            6399690943
        );
        assert_eq!(
            get_amount_b_delta(lower, upper, LIQUIDITY, Rounding::Down).unwrap(),
            6399690942
        );
    }

    #[test]
    fn test_amount_deltas_accept_bounds_in_either_order() {
        let (lower, upper) = (sqrt_at(-64), sqrt_at(64));
        assert_eq!(
            get_amount_a_delta(upper, lower, LIQUIDITY, Rounding::Up).unwrap(),
            get_amount_a_delta(lower, upper, LIQUIDITY, Rounding::Up).unwrap()
        );
        assert_eq!(
            get_amount_b_delta(upper, lower, LIQUIDITY, Rounding::Down).unwrap(),
            get_amount_b_delta(lower, upper, LIQUIDITY, Rounding::Down).unwrap()
        );
    }

    #[test]
    fn test_amount_deltas_zero_cases() {
        let price = sqrt_at(100);
        assert_eq!(get_amount_a_delta(price, price, LIQUIDITY, Rounding::Up).unwrap(), 0);
        assert_eq!(get_amount_b_delta(price, price, LIQUIDITY, Rounding::Up).unwrap(), 0);
        assert_eq!(get_amount_a_delta(sqrt_at(0), price, 0, Rounding::Up).unwrap(), 0);
        assert_eq!(get_amount_b_delta(sqrt_at(0), price, 0, Rounding::Up).unwrap(), 0);
    }

    #[test]
    fn test_amount_deltas_overflow() {
        let (lower, upper) = (
            Q64x64::from_raw(MIN_SQRT_X64),
            Q64x64::from_raw(MAX_SQRT_X64),
        );
        assert_error_code(
            get_amount_a_delta(lower, upper, u128::MAX, Rounding::Up),
            ErrorCode::Overflow,
        );
        assert_error_code(
            get_amount_b_delta(lower, upper, u128::MAX, Rounding::Up),
            ErrorCode::Overflow,
        );
    }

    #[test]
    fn test_liquidity_from_single_amounts() {
        let (current, upper) = (
            Q64x64::from_raw(41248173712355948587),
            sqrt_at(17920),
        );
        assert_eq!(
            liquidity_from_amount_a(current, upper, 1_000_000).unwrap(),
            25643580
        );
        assert_eq!(
            liquidity_from_amount_b(sqrt_at(13824), current, 6155166).unwrap(),
            25643583
        );
        assert_eq!(
            liquidity_from_amount_a(sqrt_at(0), sqrt_at(64), 1_000_000).unwrap(),
            313015891
        );

        assert_error_code(
            liquidity_from_amount_a(current, current, 1),
            ErrorCode::InvalidRange,
        );
        assert_error_code(
            liquidity_from_amount_b(current, current, 1),
            ErrorCode::InvalidRange,
        );
    }

    #[test]
    fn test_amounts_for_liquidity_regions() {
        let (lower, upper) = (sqrt_at(-64), sqrt_at(64));

        // Below the range: all token A
        let below = get_amounts_for_liquidity(LIQUIDITY, sqrt_at(-128), lower, upper, Rounding::Up)
            .unwrap();
        assert_eq!(below, (6399690943, 0));

        // Above the range: all token B
        let above = get_amounts_for_liquidity(LIQUIDITY, sqrt_at(128), lower, upper, Rounding::Up)
            .unwrap();
        assert_eq!(above, (0, 6399690943));

        // Inside: both tokens
        let inside =
            get_amounts_for_liquidity(LIQUIDITY, sqrt_at(0), lower, upper, Rounding::Up).unwrap();
        assert_eq!(inside, (3194725979, 3194725979));
        let inside_down =
            get_amounts_for_liquidity(LIQUIDITY, sqrt_at(0), lower, upper, Rounding::Down).unwrap();
        assert_eq!(inside_down, (3194725978, 3194725978));
    }

    #[test]
    fn test_amounts_for_liquidity_continuous_at_bounds() {
        let (lower, upper) = (sqrt_at(-64), sqrt_at(64));
        let at_lower =
            get_amounts_for_liquidity(LIQUIDITY, lower, lower, upper, Rounding::Up).unwrap();
        let at_upper =
            get_amounts_for_liquidity(LIQUIDITY, upper, lower, upper, Rounding::Up).unwrap();

        // The in-range formulas evaluated exactly at each bound
        let mixed_at_lower = (
            get_amount_a_delta(lower, upper, LIQUIDITY, Rounding::Up).unwrap(),
            get_amount_b_delta(lower, lower, LIQUIDITY, Rounding::Up).unwrap(),
        );
        let mixed_at_upper = (
            get_amount_a_delta(upper, upper, LIQUIDITY, Rounding::Up).unwrap(),
            get_amount_b_delta(lower, upper, LIQUIDITY, Rounding::Up).unwrap(),
        );
        assert_eq!(at_lower, mixed_at_lower);
        assert_eq!(at_upper, mixed_at_upper);
    }

    #[test]
    fn test_amounts_for_liquidity_rejects_inverted_range() {
        assert_error_code(
            get_amounts_for_liquidity(1, sqrt_at(0), sqrt_at(64), sqrt_at(-64), Rounding::Up),
            ErrorCode::InvalidRange,
        );
        assert_error_code(
            get_liquidity_for_amounts(1, 1, sqrt_at(0), sqrt_at(64), sqrt_at(64)),
            ErrorCode::InvalidRange,
        );
    }

    #[test]
    fn test_liquidity_for_amounts_takes_smaller_side() {
        let (lower, upper) = (sqrt_at(-64), sqrt_at(64));
        let current = sqrt_at(0);

        let balanced = get_liquidity_for_amounts(1_000_000, 1_000_000, current, lower, upper).unwrap();
        assert_eq!(balanced, 313015891);

        // Surplus of either token earns nothing extra
        assert_eq!(
            get_liquidity_for_amounts(1_000_000, 50_000_000, current, lower, upper).unwrap(),
            balanced
        );
        assert_eq!(
            get_liquidity_for_amounts(50_000_000, 1_000_000, current, lower, upper).unwrap(),
            balanced
        );

        // Outside the range only the held token matters
        assert_eq!(
            get_liquidity_for_amounts(1_000_000, 0, sqrt_at(-128), lower, upper).unwrap(),
            liquidity_from_amount_a(lower, upper, 1_000_000).unwrap()
        );
        assert_eq!(
            get_liquidity_for_amounts(0, 1_000_000, sqrt_at(128), lower, upper).unwrap(),
            liquidity_from_amount_b(lower, upper, 1_000_000).unwrap()
        );
    }

    #[test]
    fn test_position_status() {
        let (lower, upper) = (sqrt_at(-64), sqrt_at(64));
        assert_eq!(position_status(sqrt_at(-128), lower, upper), PositionStatus::PriceBelowRange);
        assert_eq!(position_status(lower, lower, upper), PositionStatus::PriceBelowRange);
        assert_eq!(position_status(sqrt_at(0), lower, upper), PositionStatus::PriceInRange);
        assert_eq!(position_status(upper, lower, upper), PositionStatus::PriceAboveRange);

        assert_eq!(position_status_by_tick(-65, -64, 64), PositionStatus::PriceBelowRange);
        assert_eq!(position_status_by_tick(-64, -64, 64), PositionStatus::PriceInRange);
        assert_eq!(position_status_by_tick(63, -64, 64), PositionStatus::PriceInRange);
        assert_eq!(position_status_by_tick(64, -64, 64), PositionStatus::PriceAboveRange);
    }

    #[test]
    fn test_add_liquidity_delta() {
        assert_eq!(add_liquidity_delta(100, 50).unwrap(), 150);
        assert_eq!(add_liquidity_delta(100, -100).unwrap(), 0);
        assert_eq!(add_liquidity_delta(100, 0).unwrap(), 100);
        assert_error_code(add_liquidity_delta(100, -101), ErrorCode::LiquidityUnderflow);
        assert_error_code(add_liquidity_delta(u128::MAX, 1), ErrorCode::Overflow);
        assert_eq!(
            add_liquidity_delta(u128::MAX, i128::MIN).unwrap(),
            u128::MAX - (1u128 << 127)
        );
    }
}
