#[cfg(test)]
mod tests {
    use crate::math::core_arithmetic::Rounding;
    use crate::math::liquidity_math::*;
    use crate::math::tick_math::tick_to_sqrt_x64;
    use proptest::prelude::*;

    const TICK_LIMIT: i32 = 100_000;

    // Liquidity small enough that amounts across +/-TICK_LIMIT fit in u64
    fn bounded_liquidity() -> impl Strategy<Value = u128> {
        0u128..=(1u128 << 48)
    }

    fn tick_range() -> impl Strategy<Value = (i32, i32)> {
        (-TICK_LIMIT..TICK_LIMIT, 1i32..=20_000)
            .prop_map(|(lower, width)| (lower, (lower + width).min(TICK_LIMIT)))
            .prop_filter("non-empty range", |(lower, upper)| lower < upper)
    }

    proptest! {
        #[test]
        fn test_amounts_monotonic_in_price(
            liquidity in bounded_liquidity(),
            (tick_lower, tick_upper) in tick_range(),
            a in -TICK_LIMIT..=TICK_LIMIT,
            b in -TICK_LIMIT..=TICK_LIMIT,
        ) {
            let lower = tick_to_sqrt_x64(tick_lower).unwrap();
            let upper = tick_to_sqrt_x64(tick_upper).unwrap();
            let (t0, t1) = if a <= b { (a, b) } else { (b, a) };

            let (a0, b0) = get_amounts_for_liquidity(
                liquidity, tick_to_sqrt_x64(t0).unwrap(), lower, upper, Rounding::Up,
            ).unwrap();
            let (a1, b1) = get_amounts_for_liquidity(
                liquidity, tick_to_sqrt_x64(t1).unwrap(), lower, upper, Rounding::Up,
            ).unwrap();

            // A higher price means less token A and more token B
            prop_assert!(a0 >= a1);
            prop_assert!(b0 <= b1);
        }

        #[test]
        fn test_rounding_up_never_below_down(
            liquidity in bounded_liquidity(),
            (tick_lower, tick_upper) in tick_range(),
            current in -TICK_LIMIT..=TICK_LIMIT,
        ) {
            let lower = tick_to_sqrt_x64(tick_lower).unwrap();
            let upper = tick_to_sqrt_x64(tick_upper).unwrap();
            let current = tick_to_sqrt_x64(current).unwrap();

            let up = get_amounts_for_liquidity(liquidity, current, lower, upper, Rounding::Up).unwrap();
            let down =
                get_amounts_for_liquidity(liquidity, current, lower, upper, Rounding::Down).unwrap();
            prop_assert!(up.0 >= down.0 && up.0 - down.0 <= 1);
            prop_assert!(up.1 >= down.1 && up.1 - down.1 <= 1);
        }

        #[test]
        fn test_liquidity_for_amounts_never_exceeds_deposit(
            amount_a in 0u64..=1_000_000_000_000,
            amount_b in 0u64..=1_000_000_000_000,
            (tick_lower, tick_upper) in tick_range(),
            current in -TICK_LIMIT..=TICK_LIMIT,
        ) {
            let lower = tick_to_sqrt_x64(tick_lower).unwrap();
            let upper = tick_to_sqrt_x64(tick_upper).unwrap();
            let current = tick_to_sqrt_x64(current).unwrap();

            let liquidity =
                get_liquidity_for_amounts(amount_a, amount_b, current, lower, upper).unwrap();
            let (required_a, required_b) =
                get_amounts_for_liquidity(liquidity, current, lower, upper, Rounding::Up).unwrap();
            prop_assert!(required_a <= amount_a, "{} > {}", required_a, amount_a);
            prop_assert!(required_b <= amount_b, "{} > {}", required_b, amount_b);
        }

        #[test]
        fn test_rounded_up_amounts_fund_liquidity(
            liquidity in bounded_liquidity(),
            (tick_lower, tick_upper) in tick_range(),
            current in -TICK_LIMIT..=TICK_LIMIT,
        ) {
            let lower = tick_to_sqrt_x64(tick_lower).unwrap();
            let upper = tick_to_sqrt_x64(tick_upper).unwrap();
            let current = tick_to_sqrt_x64(current).unwrap();

            let (amount_a, amount_b) =
                get_amounts_for_liquidity(liquidity, current, lower, upper, Rounding::Up).unwrap();
            let funded =
                get_liquidity_for_amounts(amount_a, amount_b, current, lower, upper).unwrap();
            prop_assert!(funded >= liquidity);
        }

        #[test]
        fn test_status_by_tick_agrees_with_amount_sides(
            (tick_lower, tick_upper) in tick_range(),
            current in -TICK_LIMIT..=TICK_LIMIT,
        ) {
            let status = position_status_by_tick(current, tick_lower, tick_upper);
            let (a, b) = get_amounts_for_liquidity(
                1u128 << 40,
                tick_to_sqrt_x64(current).unwrap(),
                tick_to_sqrt_x64(tick_lower).unwrap(),
                tick_to_sqrt_x64(tick_upper).unwrap(),
                Rounding::Down,
            ).unwrap();
            match status {
                PositionStatus::PriceBelowRange => prop_assert_eq!(b, 0),
                PositionStatus::PriceAboveRange => prop_assert_eq!(a, 0),
                PositionStatus::PriceInRange => prop_assert!(a > 0),
            }
        }

        #[test]
        fn test_add_liquidity_delta_inverse(liquidity: u128, delta in 0i128..=i128::MAX) {
            match add_liquidity_delta(liquidity, delta) {
                Ok(added) => prop_assert_eq!(add_liquidity_delta(added, -delta).unwrap(), liquidity),
                Err(_) => prop_assert!(liquidity.checked_add(delta as u128).is_none()),
            }
        }
    }
}
