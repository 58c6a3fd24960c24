//! Property-based tests for the pool invariants.
//!
//! 1. **Product non-decrease**: `reserve_a × reserve_b` never falls across
//!    a swap, and rises strictly when the fee is positive.
//! 2. **Exact-out coverage**: the input quoted for an output buys at
//!    least that output.
//! 3. **Round trip**: depositing then burning every claim returns the
//!    deposit exactly.
//! 4. **No overdraft**: a random operation sequence never leaves the
//!    tracked reserves out of step with the ledgers.
//! 5. **Swap reversibility**: A→B→A never returns more than was sold.

#![allow(clippy::panic)]

use proptest::prelude::*;

use super::{LiquidityAccountant, PoolService, PoolState, PricingEngine};
use crate::config::PoolConfig;
use crate::domain::{AccountId, Amount, Claims, FeeRate, Side, SwapDirection};
use crate::ledger::{AssetLedger, InMemoryLedger};
use crate::traits::{LiquidityPool, SwapPool};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const FUNDS: u128 = 1_000_000_000_000;

fn pool_account() -> AccountId {
    AccountId::from_bytes([9u8; 32])
}

fn trader(i: u8) -> AccountId {
    AccountId::from_bytes([i + 1; 32])
}

fn funded(symbol: &str) -> InMemoryLedger {
    let mut ledger = InMemoryLedger::new(symbol);
    for i in 0..3 {
        let Ok(()) = ledger.credit(&trader(i), Amount::new(FUNDS)) else {
            panic!("credit");
        };
        ledger.approve(&trader(i), &pool_account(), Amount::MAX);
    }
    ledger
}

fn make_pool(ra: u128, rb: u128) -> PoolService {
    let Ok(cfg) = PoolConfig::with_default_fee(pool_account()) else {
        panic!("valid config");
    };
    let Ok(mut pool) = PoolService::new(&cfg, funded("AAA"), funded("BBB"), InMemoryLedger::new("LP"))
    else {
        panic!("valid pool");
    };
    let Ok(_) = pool.provide_liquidity(&trader(0), Amount::new(ra), Amount::new(rb)) else {
        panic!("seed deposit");
    };
    pool
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in [1_000, 10_000_000].
fn reserve_strategy() -> impl Strategy<Value = u128> {
    1_000u128..=10_000_000u128
}

fn direction_strategy() -> impl Strategy<Value = SwapDirection> {
    prop_oneof![Just(SwapDirection::AForB), Just(SwapDirection::BForA)]
}

#[derive(Debug, Clone)]
enum Op {
    Swap(u8, SwapDirection, u128),
    Deposit(u8, u128),
    Withdraw(u8, u128),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..3, direction_strategy(), 1u128..=1_000_000).prop_map(|(t, d, a)| Op::Swap(t, d, a)),
        (0u8..3, 1u128..=1_000).prop_map(|(t, k)| Op::Deposit(t, k)),
        (0u8..3, 1u128..=1_000_000).prop_map(|(t, c)| Op::Withdraw(t, c)),
    ]
}

// ---------------------------------------------------------------------------
// Property 1: Product non-decrease
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_product_non_decreasing(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        direction in direction_strategy(),
        amount_in in 1u128..=10_000_000u128,
    ) {
        let mut pool = make_pool(ra, rb);
        let k_before = pool.state().reserves().product();
        if pool.swap(&trader(1), direction, Amount::new(amount_in), Amount::ZERO).is_err() {
            return Ok(());
        }
        let k_after = pool.state().reserves().product();
        prop_assert!(k_after > k_before, "k fell or stalled: {} -> {}", k_before, k_after);
    }

    #[test]
    fn prop_state_transition_matches_quote(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount_in in 1u128..=1_000_000u128,
    ) {
        let mut state = PoolState::new(FeeRate::ZERO);
        let Ok(seeded) = state.with_deposit(Amount::new(ra), Amount::new(rb), Claims::new(1)) else {
            panic!("seed");
        };
        state = seeded;
        let engine = PricingEngine::new(FeeRate::ZERO);
        let Ok(out) = engine.quote_output(Amount::new(amount_in), state.reserve_a(), state.reserve_b()) else {
            panic!("quote");
        };
        let Ok(next) = state.with_swap(SwapDirection::AForB, Amount::new(amount_in), out, Amount::ZERO) else {
            panic!("swap");
        };
        prop_assert!(next.reserves().product() >= state.reserves().product());
    }
}

// ---------------------------------------------------------------------------
// Property 2: Exact-out coverage
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_quote_input_buys_requested_output(
        ri in reserve_strategy(),
        ro in reserve_strategy(),
        bps in 0u32..=1_000u32,
        fraction in 1u128..=999u128,
    ) {
        let Ok(fee) = FeeRate::from_basis_points(bps) else {
            panic!("valid fee");
        };
        let engine = PricingEngine::new(fee);
        let wanted = (ro * fraction / 1_000).max(1);
        let Ok(needed) = engine.quote_input(Amount::new(wanted), Amount::new(ri), Amount::new(ro)) else {
            return Ok(());
        };
        let Ok(got) = engine.quote_output(needed, Amount::new(ri), Amount::new(ro)) else {
            panic!("quote_output");
        };
        prop_assert!(got.get() >= wanted, "paid {} for {} < {}", needed, got, wanted);
    }
}

// ---------------------------------------------------------------------------
// Property 3: Round trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_deposit_then_full_burn_round_trips(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
    ) {
        let mut pool = make_pool(ra, rb);
        let minted = pool.claim_balance_of(&trader(0));
        let Ok((out_a, out_b)) = pool.remove_liquidity(&trader(0), minted) else {
            panic!("full burn");
        };
        prop_assert_eq!((out_a.get(), out_b.get()), (ra, rb));
        prop_assert_eq!(pool.ledger(Side::A).balance_of(&trader(0)), Amount::new(FUNDS));
        prop_assert_eq!(pool.ledger(Side::B).balance_of(&trader(0)), Amount::new(FUNDS));
        prop_assert!(pool.state().is_empty());
    }

    #[test]
    fn prop_proportional_mint_never_dilutes(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        scale in 1u128..=1_000u128,
    ) {
        let pool = make_pool(ra, rb);
        let state = *pool.state();
        let Ok(minted) = LiquidityAccountant::claims_for_deposit(
            &state,
            Amount::new(ra * scale),
            Amount::new(rb * scale),
        ) else {
            panic!("proportional deposit");
        };
        prop_assert_eq!(minted.get(), state.total_claims().get() * scale);
    }
}

// ---------------------------------------------------------------------------
// Property 4: No overdraft across random sequences
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_random_sequences_stay_consistent(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        ops in proptest::collection::vec(op_strategy(), 1..32),
    ) {
        let mut pool = make_pool(ra, rb);
        for op in ops {
            let before = *pool.state();
            let result = match op {
                Op::Swap(t, direction, amount) => pool
                    .swap(&trader(t), direction, Amount::new(amount), Amount::ZERO)
                    .map(|_| ()),
                Op::Deposit(t, k) => {
                    // any exact multiple of the reduced reserve ratio
                    let (a, b) = (before.reserve_a().get(), before.reserve_b().get());
                    let g = gcd(a.max(1), b.max(1));
                    pool.provide_liquidity(&trader(t), Amount::new(a / g * k), Amount::new(b / g * k))
                        .map(|_| ())
                }
                Op::Withdraw(t, c) => pool.remove_liquidity(&trader(t), Claims::new(c)).map(|_| ()),
            };
            if result.is_err() {
                prop_assert_eq!(*pool.state(), before);
            }
            prop_assert!(pool.verify_reserves().is_ok());
            prop_assert!(pool.state().validate().is_ok());
        }
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

// ---------------------------------------------------------------------------
// Property 5: Swap reversibility
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_reversibility(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
    ) {
        let swap_in = (ra / 100).max(1);
        let mut pool = make_pool(ra, rb);

        let Ok(ab) = pool.swap_a_for_b(&trader(1), Amount::new(swap_in), Amount::ZERO) else {
            return Ok(());
        };
        let Ok(ba) = pool.swap_b_for_a(&trader(1), ab.amount_out(), Amount::ZERO) else {
            return Ok(());
        };
        prop_assert!(
            ba.amount_out().get() <= swap_in,
            "round trip gained value: {} > {}",
            ba.amount_out(),
            swap_in
        );
    }
}
