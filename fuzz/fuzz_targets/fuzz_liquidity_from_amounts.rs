use arbitrary::{Arbitrary, Unstructured};
use honggfuzz::fuzz;
use whirlpool_core::math::core_arithmetic::{Q64x64, Rounding};
use whirlpool_core::math::liquidity_math::{get_amounts_for_liquidity, get_liquidity_for_amounts};
use whirlpool_core::utils::constants::{MAX_SQRT_X64, MIN_SQRT_X64};

#[derive(Debug, Clone)]
struct LiquidityInput {
    sqrt_lower: Q64x64,
    sqrt_upper: Q64x64,
    sqrt_current: Q64x64,
    amount_a: u64,
    amount_b: u64,
}

impl<'a> Arbitrary<'a> for LiquidityInput {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let mut bounds = [
            u.int_in_range(MIN_SQRT_X64..=MAX_SQRT_X64)?,
            u.int_in_range(MIN_SQRT_X64..=MAX_SQRT_X64)?,
        ];
        bounds.sort_unstable();
        if bounds[0] == bounds[1] {
            if bounds[1] < MAX_SQRT_X64 {
                bounds[1] += 1;
            } else {
                bounds[0] -= 1;
            }
        }

        let sqrt_current = match u.int_in_range(0..=10)? {
            0 => bounds[0],
            1 => bounds[1],
            _ => u.int_in_range(MIN_SQRT_X64..=MAX_SQRT_X64)?,
        };

        Ok(LiquidityInput {
            sqrt_lower: Q64x64::from_raw(bounds[0]),
            sqrt_upper: Q64x64::from_raw(bounds[1]),
            sqrt_current: Q64x64::from_raw(sqrt_current),
            amount_a: u.arbitrary()?,
            amount_b: u.arbitrary()?,
        })
    }
}

fn fuzz_liquidity_from_amounts(input: LiquidityInput) {
    let LiquidityInput {
        sqrt_lower,
        sqrt_upper,
        sqrt_current,
        amount_a,
        amount_b,
    } = input;

    let Ok(liquidity) =
        get_liquidity_for_amounts(amount_a, amount_b, sqrt_current, sqrt_lower, sqrt_upper)
    else {
        return;
    };

    // The credited liquidity never costs more than what was offered
    let (required_a, required_b) =
        get_amounts_for_liquidity(liquidity, sqrt_current, sqrt_lower, sqrt_upper, Rounding::Up)
            .expect("amounts bounded by the inputs");
    assert!(required_a <= amount_a);
    assert!(required_b <= amount_b);

    let (paid_a, paid_b) =
        get_amounts_for_liquidity(liquidity, sqrt_current, sqrt_lower, sqrt_upper, Rounding::Down)
            .expect("amounts bounded by the inputs");
    assert!(paid_a <= required_a && required_a - paid_a <= 1);
    assert!(paid_b <= required_b && required_b - paid_b <= 1);
}

fn main() {
    loop {
        fuzz!(|data: LiquidityInput| {
            fuzz_liquidity_from_amounts(data);
        });
    }
}
