use arbitrary::Arbitrary;
use ethnum::U256;
use honggfuzz::fuzz;
use whirlpool_core::math::core_arithmetic::{mul_div, mul_div_rounding, Rounding};

#[derive(Debug, Clone, Arbitrary)]
struct MulDivInput {
    a: u128,
    b: u128,
    c: u128,
    round_up: bool,
}

fn fuzz_mul_div(input: MulDivInput) {
    let MulDivInput { a, b, c, round_up } = input;
    let rounding = if round_up { Rounding::Up } else { Rounding::Down };

    match mul_div_rounding(a, b, c, rounding) {
        Ok(value) => {
            assert!(c != 0);
            let product = U256::from(a) * U256::from(b);
            let floor = product / U256::from(c);
            let exact = product % U256::from(c) == U256::ZERO;
            let expected = if round_up && !exact {
                floor + U256::ONE
            } else {
                floor
            };
            assert_eq!(U256::from(value), expected);

            if round_up {
                let down = mul_div(a, b, c).expect("floor fits when the ceiling does");
                assert!(value - down <= 1);
            }
        }
        Err(e) => {
            let error_msg = format!("{:?}", e);
            if c == 0 {
                assert!(error_msg.contains("DivisionByZero"));
            } else {
                assert!(error_msg.contains("Overflow"));
            }
        }
    }
}

fn main() {
    loop {
        fuzz!(|data: MulDivInput| {
            fuzz_mul_div(data);
        });
    }
}
