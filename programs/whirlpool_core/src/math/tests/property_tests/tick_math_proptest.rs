#[cfg(test)]
mod tests {
    use crate::math::core_arithmetic::Q64x64;
    use crate::math::price_math::price_to_initializable_tick_index;
    use crate::math::tick_math::*;
    use crate::utils::constants::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn valid_tick() -> impl Strategy<Value = i32> {
        MIN_TICK..=MAX_TICK
    }

    fn valid_sqrt_price() -> impl Strategy<Value = Q64x64> {
        (MIN_SQRT_X64..=MAX_SQRT_X64).prop_map(Q64x64::from_raw)
    }

    fn any_spacing() -> impl Strategy<Value = u16> {
        1u16..=u16::MAX
    }

    fn tick_rounding() -> impl Strategy<Value = TickRounding> {
        prop_oneof![
            Just(TickRounding::Down),
            Just(TickRounding::Up),
            Just(TickRounding::Nearest),
        ]
    }

    // Prices between 1e-12 and 1e12
    fn reasonable_price() -> impl Strategy<Value = Decimal> {
        (1i64..=1_000_000_000_000i64, 0u32..=12u32)
            .prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
    }

    proptest! {
        #[test]
        fn test_tick_round_trip(tick in valid_tick()) {
            let sqrt_price = tick_to_sqrt_x64(tick).unwrap();
            prop_assert_eq!(sqrt_x64_to_tick(sqrt_price).unwrap(), tick);
            prop_assert_eq!(sqrt_x64_to_tick_ceil(sqrt_price).unwrap(), tick);
        }

        #[test]
        fn test_tick_to_sqrt_strictly_increasing(a in valid_tick(), b in valid_tick()) {
            prop_assume!(a != b);
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            prop_assert!(tick_to_sqrt_x64(lo).unwrap() < tick_to_sqrt_x64(hi).unwrap());
        }

        #[test]
        fn test_sqrt_to_tick_brackets_price(sqrt_price in valid_sqrt_price()) {
            let tick = sqrt_x64_to_tick(sqrt_price).unwrap();
            prop_assert!(tick_to_sqrt_x64(tick).unwrap() <= sqrt_price);
            if tick < MAX_TICK {
                prop_assert!(tick_to_sqrt_x64(tick + 1).unwrap() > sqrt_price);
            }

            let ceil = sqrt_x64_to_tick_ceil(sqrt_price).unwrap();
            prop_assert!(ceil == tick || ceil == tick + 1);
            prop_assert!(tick_to_sqrt_x64(ceil).unwrap() >= sqrt_price);
        }

        #[test]
        fn test_initializable_tick_aligned_and_bounded(
            tick in valid_tick(),
            spacing in any_spacing(),
            rounding in tick_rounding(),
        ) {
            let snapped = get_initializable_tick_index(tick, spacing, rounding).unwrap();
            prop_assert!(is_tick_initializable(snapped, spacing));

            let (min_tick, max_tick) = full_range_tick_indexes(spacing).unwrap();
            if (min_tick..=max_tick).contains(&tick) {
                prop_assert!((snapped - tick).abs() < i32::from(spacing));
            }
        }

        #[test]
        fn test_initializable_rounding_order(tick in valid_tick(), spacing in any_spacing()) {
            let down = get_initializable_tick_index(tick, spacing, TickRounding::Down).unwrap();
            let nearest = get_initializable_tick_index(tick, spacing, TickRounding::Nearest).unwrap();
            let up = get_initializable_tick_index(tick, spacing, TickRounding::Up).unwrap();
            prop_assert!(down <= nearest && nearest <= up);
        }

        #[test]
        fn test_price_to_initializable_tick_range_covers_price(
            price in reasonable_price(),
            spacing in prop_oneof![Just(1u16), Just(8u16), Just(64u16), Just(128u16)],
        ) {
            let lower =
                price_to_initializable_tick_index(price, 6, 6, spacing, TickRounding::Down).unwrap();
            let upper =
                price_to_initializable_tick_index(price, 6, 6, spacing, TickRounding::Up).unwrap();
            prop_assert!(is_tick_initializable(lower, spacing));
            prop_assert!(is_tick_initializable(upper, spacing));
            prop_assert!(lower <= upper);
            prop_assert!(upper - lower <= i32::from(spacing));
        }

        #[test]
        fn test_tick_array_start_contains_tick(tick in valid_tick(), spacing in any_spacing()) {
            let start = get_tick_array_start_tick(tick, spacing).unwrap();
            let width = ticks_in_array(spacing).unwrap();
            prop_assert!(start <= tick && tick < start + width);
            prop_assert!(is_valid_tick_array_start_tick(start, spacing));
        }
    }

    #[test]
    #[ignore]
    fn test_tick_round_trip_exhaustive() {
        for tick in MIN_TICK..=MAX_TICK {
            let sqrt_price = tick_to_sqrt_x64(tick).unwrap();
            assert_eq!(sqrt_x64_to_tick(sqrt_price).unwrap(), tick, "tick {tick}");
        }
    }
}
