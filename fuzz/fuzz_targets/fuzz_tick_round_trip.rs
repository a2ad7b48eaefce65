use arbitrary::{Arbitrary, Unstructured};
use honggfuzz::fuzz;
use whirlpool_core::math::core_arithmetic::Q64x64;
use whirlpool_core::math::tick_math::{sqrt_x64_to_tick, sqrt_x64_to_tick_ceil, tick_to_sqrt_x64};
use whirlpool_core::utils::constants::{MAX_SQRT_X64, MAX_TICK, MIN_SQRT_X64, MIN_TICK};

#[derive(Debug, Clone)]
struct TickInput {
    tick: i32,
    sqrt_price: u128,
}

impl<'a> Arbitrary<'a> for TickInput {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let tick = match u.int_in_range(0..=100)? {
            0..=80 => u.int_in_range(MIN_TICK..=MAX_TICK)?,
            81..=90 => *u.choose(&[MIN_TICK, MAX_TICK, 0, -1, 1])?,
            _ => u.arbitrary::<i32>()?,
        };
        let sqrt_price = match u.int_in_range(0..=100)? {
            0..=90 => u.int_in_range(MIN_SQRT_X64..=MAX_SQRT_X64)?,
            _ => u.arbitrary::<u128>()?,
        };
        Ok(TickInput { tick, sqrt_price })
    }
}

fn fuzz_tick_round_trip(input: TickInput) {
    match tick_to_sqrt_x64(input.tick) {
        Ok(sqrt_price) => {
            assert!((MIN_TICK..=MAX_TICK).contains(&input.tick));
            assert!((MIN_SQRT_X64..=MAX_SQRT_X64).contains(&sqrt_price.raw()));
            assert_eq!(sqrt_x64_to_tick(sqrt_price).ok(), Some(input.tick));

            if input.tick < MAX_TICK {
                let next = tick_to_sqrt_x64(input.tick + 1).expect("next tick in range");
                assert!(next > sqrt_price);
            }
        }
        Err(e) => {
            assert!(format!("{:?}", e).contains("TickOutOfBounds"));
            assert!(input.tick < MIN_TICK || input.tick > MAX_TICK);
        }
    }

    let sqrt_price = Q64x64::from_raw(input.sqrt_price);
    match sqrt_x64_to_tick(sqrt_price) {
        Ok(tick) => {
            assert!(tick_to_sqrt_x64(tick).expect("tick in range") <= sqrt_price);
            if tick < MAX_TICK {
                assert!(tick_to_sqrt_x64(tick + 1).expect("tick in range") > sqrt_price);
            }
            let ceil = sqrt_x64_to_tick_ceil(sqrt_price).expect("ceil in range");
            assert!(ceil == tick || ceil == tick + 1);
        }
        Err(_) => {
            assert!(!(MIN_SQRT_X64..=MAX_SQRT_X64).contains(&input.sqrt_price));
        }
    }
}

fn main() {
    loop {
        fuzz!(|data: TickInput| {
            fuzz_tick_round_trip(data);
        });
    }
}
