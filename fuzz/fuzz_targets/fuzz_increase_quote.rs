use anchor_lang::prelude::Pubkey;
use arbitrary::{Arbitrary, Unstructured};
use honggfuzz::fuzz;
use whirlpool_core::math::tick_math::{get_initializable_tick_index, tick_to_sqrt_x64, TickRounding};
use whirlpool_core::quote::{
    decrease_liquidity_quote, increase_liquidity_quote_by_input_token, Percentage, PoolState,
};
use whirlpool_core::utils::constants::{MAX_TICK, MIN_TICK};

#[derive(Debug, Clone)]
struct QuoteInput {
    pool: PoolState,
    input_is_a: bool,
    input_amount: u64,
    tick_lower: i32,
    tick_upper: i32,
    slippage_bps: u64,
}

impl<'a> Arbitrary<'a> for QuoteInput {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let tick_spacing = *u.choose(&[1u16, 8, 64, 128, 256])?;
        let tick_current_index = u.int_in_range(MIN_TICK..=MAX_TICK)?;
        let sqrt_price = tick_to_sqrt_x64(tick_current_index).map_err(|_| arbitrary::Error::IncorrectFormat)?;

        let snap = |tick: i32, rounding| {
            get_initializable_tick_index(tick, tick_spacing, rounding)
                .map_err(|_| arbitrary::Error::IncorrectFormat)
        };
        let tick_lower = snap(u.int_in_range(MIN_TICK..=MAX_TICK)?, TickRounding::Down)?;
        let tick_upper = snap(u.int_in_range(MIN_TICK..=MAX_TICK)?, TickRounding::Up)?;

        Ok(QuoteInput {
            pool: PoolState {
                sqrt_price,
                tick_current_index,
                tick_spacing,
                liquidity: 0,
                token_mint_a: Pubkey::new_from_array([1; 32]),
                token_mint_b: Pubkey::new_from_array([2; 32]),
            },
            input_is_a: u.arbitrary()?,
            input_amount: u.arbitrary()?,
            tick_lower,
            tick_upper,
            slippage_bps: u.int_in_range(0..=10_000)?,
        })
    }
}

fn fuzz_increase_quote(input: QuoteInput) {
    let QuoteInput {
        pool,
        input_is_a,
        input_amount,
        tick_lower,
        tick_upper,
        slippage_bps,
    } = input;
    let slippage = Percentage::from_bps(slippage_bps).expect("bps within [0, 10000]");
    let input_mint = if input_is_a {
        pool.token_mint_a
    } else {
        pool.token_mint_b
    };

    let quote = match increase_liquidity_quote_by_input_token(
        &input_mint,
        input_amount,
        tick_lower,
        tick_upper,
        slippage,
        &pool,
    ) {
        Ok(quote) => quote,
        Err(e) => {
            let error_msg = format!("{:?}", e);
            assert!(
                error_msg.contains("InvalidRange")
                    || error_msg.contains("ZeroAmount")
                    || error_msg.contains("Overflow"),
                "{error_msg}"
            );
            return;
        }
    };

    assert!(quote.liquidity > 0);
    let deposited = if input_is_a {
        quote.amount_a
    } else {
        quote.amount_b
    };
    assert!(deposited <= input_amount);
    assert!(quote.amount_min_a <= quote.amount_a && quote.amount_a <= quote.amount_max_a);
    assert!(quote.amount_min_b <= quote.amount_b && quote.amount_b <= quote.amount_max_b);

    // Withdrawing the same liquidity right away never returns more than was deposited
    let exit = decrease_liquidity_quote(quote.liquidity, tick_lower, tick_upper, slippage, &pool)
        .expect("withdrawal of quoted liquidity");
    assert!(exit.amount_a <= quote.amount_a);
    assert!(exit.amount_b <= quote.amount_b);
}

fn main() {
    loop {
        fuzz!(|data: QuoteInput| {
            fuzz_increase_quote(data);
        });
    }
}
