#[cfg(test)]
mod tests {
    use crate::error::ErrorCode;
    use crate::math::core_arithmetic::Q64x64;
    use crate::math::tick_math::*;
    use crate::unit_test::assert_error_code;
    use crate::utils::constants::*;

    #[test]
    fn test_tick_to_sqrt_known_values() {
        assert_eq!(tick_to_sqrt_x64(0).unwrap().raw(), 1u128 << 64);
        assert_eq!(tick_to_sqrt_x64(1).unwrap().raw(), 18447666387855959850);
        assert_eq!(tick_to_sqrt_x64(-1).unwrap().raw(), 18445821805675392311);
        assert_eq!(tick_to_sqrt_x64(64).unwrap().raw(), 18505865242158250041);
        assert_eq!(tick_to_sqrt_x64(-64).unwrap().raw(), 18387811781193591352);
        assert_eq!(tick_to_sqrt_x64(1000).unwrap().raw(), 19392480388906836277);
        assert_eq!(tick_to_sqrt_x64(-1000).unwrap().raw(), 17547129613991598777);
    }

    #[test]
    fn test_tick_to_sqrt_bounds() {
        assert_eq!(tick_to_sqrt_x64(MIN_TICK).unwrap().raw(), MIN_SQRT_X64);
        assert_eq!(tick_to_sqrt_x64(MAX_TICK).unwrap().raw(), MAX_SQRT_X64);

        assert_error_code(tick_to_sqrt_x64(MIN_TICK - 1), ErrorCode::TickOutOfBounds);
        assert_error_code(tick_to_sqrt_x64(MAX_TICK + 1), ErrorCode::TickOutOfBounds);
        assert_error_code(tick_to_sqrt_x64(i32::MIN), ErrorCode::TickOutOfBounds);
    }

    #[test]
    fn test_sqrt_to_tick_floors_between_ticks() {
        let at_1000 = tick_to_sqrt_x64(1000).unwrap().raw();
        assert_eq!(sqrt_x64_to_tick(Q64x64::from_raw(at_1000)).unwrap(), 1000);
        assert_eq!(sqrt_x64_to_tick(Q64x64::from_raw(at_1000 + 1)).unwrap(), 1000);
        assert_eq!(sqrt_x64_to_tick(Q64x64::from_raw(at_1000 - 1)).unwrap(), 999);

        assert_eq!(sqrt_x64_to_tick_ceil(Q64x64::from_raw(at_1000)).unwrap(), 1000);
        assert_eq!(
            sqrt_x64_to_tick_ceil(Q64x64::from_raw(at_1000 + 1)).unwrap(),
            1001
        );
    }

    #[test]
    fn test_sqrt_to_tick_bounds() {
        assert_eq!(
            sqrt_x64_to_tick(Q64x64::from_raw(MIN_SQRT_X64)).unwrap(),
            MIN_TICK
        );
        assert_eq!(
            sqrt_x64_to_tick(Q64x64::from_raw(MAX_SQRT_X64)).unwrap(),
            MAX_TICK
        );
        assert_eq!(sqrt_x64_to_tick(Q64x64::one()).unwrap(), 0);

        assert_error_code(
            sqrt_x64_to_tick(Q64x64::from_raw(MIN_SQRT_X64 - 1)),
            ErrorCode::TickOutOfBounds,
        );
        assert_error_code(
            sqrt_x64_to_tick(Q64x64::from_raw(MAX_SQRT_X64 + 1)),
            ErrorCode::TickOutOfBounds,
        );
    }

    #[test]
    fn test_initializable_tick_rounding() {
        assert_eq!(get_initializable_tick_index(-1, 64, TickRounding::Down).unwrap(), -64);
        assert_eq!(get_initializable_tick_index(-1, 64, TickRounding::Up).unwrap(), 0);
        assert_eq!(get_initializable_tick_index(128, 64, TickRounding::Up).unwrap(), 128);
        assert_eq!(get_initializable_tick_index(-6932, 64, TickRounding::Down).unwrap(), -6976);
        assert_eq!(get_initializable_tick_index(-6931, 64, TickRounding::Up).unwrap(), -6912);

        // Nearest breaks ties upward, also below zero
        assert_eq!(get_initializable_tick_index(-32, 64, TickRounding::Nearest).unwrap(), 0);
        assert_eq!(get_initializable_tick_index(-33, 64, TickRounding::Nearest).unwrap(), -64);
        assert_eq!(get_initializable_tick_index(100, 64, TickRounding::Nearest).unwrap(), 128);
        assert_eq!(get_initializable_tick_index(16095, 64, TickRounding::Nearest).unwrap(), 16064);

        assert_error_code(
            get_initializable_tick_index(0, 0, TickRounding::Down),
            ErrorCode::InvalidTickSpacing,
        );
    }

    #[test]
    fn test_initializable_tick_stays_in_bounds() {
        assert_eq!(
            get_initializable_tick_index(MAX_TICK, 64, TickRounding::Up).unwrap(),
            443584
        );
        assert_eq!(
            get_initializable_tick_index(MIN_TICK, 64, TickRounding::Down).unwrap(),
            -443584
        );
        assert_eq!(
            get_initializable_tick_index(MAX_TICK, 1, TickRounding::Up).unwrap(),
            MAX_TICK
        );
    }

    #[test]
    fn test_is_tick_initializable() {
        assert!(is_tick_initializable(0, 64));
        assert!(is_tick_initializable(-128, 64));
        assert!(!is_tick_initializable(-1, 64));
        assert!(!is_tick_initializable(64, 0));
        assert!(!is_tick_initializable(443648, 64));
        assert!(is_tick_initializable(MIN_TICK, 1));
    }

    #[test]
    fn test_full_range_tick_indexes() {
        assert_eq!(full_range_tick_indexes(1).unwrap(), (MIN_TICK, MAX_TICK));
        assert_eq!(full_range_tick_indexes(64).unwrap(), (-443584, 443584));
        assert_eq!(full_range_tick_indexes(128).unwrap(), (-443520, 443520));
        assert_error_code(full_range_tick_indexes(0), ErrorCode::InvalidTickSpacing);
    }

    #[test]
    fn test_next_and_prev_initializable_tick() {
        assert_eq!(next_initializable_tick_index(0, 64).unwrap(), 64);
        assert_eq!(next_initializable_tick_index(-1, 64).unwrap(), 0);
        assert_eq!(next_initializable_tick_index(63, 64).unwrap(), 64);
        assert_error_code(
            next_initializable_tick_index(443584, 64),
            ErrorCode::TickOutOfBounds,
        );

        assert_eq!(prev_initializable_tick_index(0, 64).unwrap(), -64);
        assert_eq!(prev_initializable_tick_index(1, 64).unwrap(), 0);
        assert_eq!(prev_initializable_tick_index(-65, 64).unwrap(), -128);
        assert_error_code(
            prev_initializable_tick_index(-443584, 64),
            ErrorCode::TickOutOfBounds,
        );
    }

    #[test]
    fn test_validate_tick_range() {
        assert!(validate_tick_range(0, 64, 64).is_ok());
        assert!(validate_tick_range(-443584, 443584, 64).is_ok());

        assert_error_code(validate_tick_range(64, 64, 64), ErrorCode::InvalidRange);
        assert_error_code(validate_tick_range(128, 64, 64), ErrorCode::InvalidRange);
        assert_error_code(validate_tick_range(1, 64, 64), ErrorCode::InvalidRange);
        assert_error_code(validate_tick_range(-443648, 0, 64), ErrorCode::InvalidRange);
        assert_error_code(validate_tick_range(0, 64, 0), ErrorCode::InvalidTickSpacing);
    }

    #[test]
    fn test_tick_array_start_tick() {
        assert_eq!(get_tick_array_start_tick(0, 64).unwrap(), 0);
        assert_eq!(get_tick_array_start_tick(5631, 64).unwrap(), 0);
        assert_eq!(get_tick_array_start_tick(5632, 64).unwrap(), 5632);
        assert_eq!(get_tick_array_start_tick(-1, 64).unwrap(), -5632);
        assert_eq!(get_tick_array_start_tick(16095, 64).unwrap(), 11264);
        assert_eq!(get_tick_array_start_tick(17920, 64).unwrap(), 16896);
        assert_eq!(get_tick_array_start_tick(-1, 1).unwrap(), -88);
        assert_error_code(get_tick_array_start_tick(0, 0), ErrorCode::InvalidTickSpacing);
    }

    #[test]
    fn test_tick_array_start_validity() {
        assert!(is_valid_tick_array_start_tick(0, 64));
        assert!(is_valid_tick_array_start_tick(-5632, 64));
        assert!(!is_valid_tick_array_start_tick(64, 64));
        assert!(!is_valid_tick_array_start_tick(0, 0));

        // The outermost arrays still cover at least one valid tick
        assert!(is_valid_tick_array_start_tick(-443696, 1));
        assert!(!is_valid_tick_array_start_tick(-443784, 1));
        assert!(is_valid_tick_array_start_tick(443608, 1));
        assert!(!is_valid_tick_array_start_tick(443696, 1));
    }

    #[test]
    fn test_tick_offset_in_array() {
        assert_eq!(tick_offset_in_array(0, 0, 64).unwrap(), 0);
        assert_eq!(tick_offset_in_array(64, 0, 64).unwrap(), 1);
        assert_eq!(tick_offset_in_array(5568, 0, 64).unwrap(), 87);
        assert_eq!(tick_offset_in_array(-64, -5632, 64).unwrap(), 87);

        assert_error_code(tick_offset_in_array(5632, 0, 64), ErrorCode::InvalidRange);
        assert_error_code(tick_offset_in_array(65, 0, 64), ErrorCode::InvalidRange);
        assert_error_code(tick_offset_in_array(-64, 0, 64), ErrorCode::InvalidRange);
    }

    #[test]
    fn test_tick_helpers_reject_out_of_bounds_ticks() {
        for tick in [i32::MIN, MIN_TICK - 1, MAX_TICK + 1, i32::MAX] {
            assert_error_code(get_tick_array_start_tick(tick, 1), ErrorCode::TickOutOfBounds);
            assert_error_code(
                get_tick_array_start_tick(tick, u16::MAX),
                ErrorCode::TickOutOfBounds,
            );
            for rounding in [TickRounding::Down, TickRounding::Up, TickRounding::Nearest] {
                assert_error_code(
                    get_initializable_tick_index(tick, 64, rounding),
                    ErrorCode::TickOutOfBounds,
                );
            }
            assert_error_code(next_initializable_tick_index(tick, 64), ErrorCode::TickOutOfBounds);
            assert_error_code(prev_initializable_tick_index(tick, 64), ErrorCode::TickOutOfBounds);
            assert_error_code(tick_offset_in_array(tick, 0, 64), ErrorCode::TickOutOfBounds);
        }

        // A far-away start tick is an arithmetic overflow, not a panic
        assert_error_code(tick_offset_in_array(MAX_TICK, i32::MIN, 1), ErrorCode::Overflow);
    }
}
