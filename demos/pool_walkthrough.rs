//! Constant-product pool walkthrough.
//!
//! Seeds a pool, adds proportional liquidity, trades in both directions,
//! shows slippage protection, and withdraws everything again.
//!
//! # Run
//!
//! ```bash
//! cargo run --example pool_walkthrough
//! ```

use pair_pool::config::PoolConfig;
use pair_pool::domain::{AccountId, Amount, FeeRate, SwapDirection};
use pair_pool::error::PoolError;
use pair_pool::ledger::InMemoryLedger;
use pair_pool::pool::PoolService;
use pair_pool::traits::{LiquidityPool, SwapPool};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Constant-product pool (x · y = k) ===\n");

    // ── 1. Accounts and ledgers ─────────────────────────────────────────
    let pool_account = AccountId::from_bytes([0xAA; 32]);
    let alice = AccountId::from_bytes([1u8; 32]);
    let bob = AccountId::from_bytes([2u8; 32]);

    let mut usdc = InMemoryLedger::new("USDC");
    let mut weth = InMemoryLedger::new("WETH");
    for who in [alice, bob] {
        usdc.credit(&who, Amount::new(1_000_000))?;
        weth.credit(&who, Amount::new(1_000_000))?;
        usdc.approve(&who, &pool_account, Amount::MAX);
        weth.approve(&who, &pool_account, Amount::MAX);
    }

    // ── 2. Pool with a 0.30% fee ────────────────────────────────────────
    let config = PoolConfig::new(pool_account, FeeRate::from_basis_points(30)?)?;
    let mut pool = PoolService::new(&config, usdc, weth, InMemoryLedger::new("USDC-WETH-LP"))?;
    println!("Pool account: {pool_account}");
    println!("Fee:          {}", pool.fee());

    // ── 3. Seed and add liquidity ───────────────────────────────────────
    let seeded = pool.provide_liquidity(&alice, Amount::new(100_000), Amount::new(400_000))?;
    println!("\nAlice seeds (100000, 400000) -> {seeded} claims");

    let added = pool.provide_liquidity(&bob, Amount::new(5_000), Amount::new(20_000))?;
    println!("Bob adds   (5000, 20000)    -> {added} claims");

    match pool.provide_liquidity(&bob, Amount::new(5_000), Amount::new(15_000)) {
        Err(PoolError::InvalidRatio) => println!("Bob adds   (5000, 15000)    -> rejected: off ratio"),
        other => println!("unexpected: {other:?}"),
    }
    let (ra, rb) = pool.reserves();
    println!("Reserves: ({ra}, {rb}), total claims {}", pool.total_claims());

    // ── 4. Swaps ────────────────────────────────────────────────────────
    let quoted = pool.quote_swap(SwapDirection::AForB, Amount::new(1_000))?;
    println!("\nQuote 1000 USDC -> {quoted} WETH");

    match pool.swap_a_for_b(&bob, Amount::new(1_000), Amount::new(quoted.get() + 1)) {
        Err(e @ PoolError::SlippageExceeded { .. }) => println!("Min {} -> {e}", quoted.get() + 1),
        other => println!("unexpected: {other:?}"),
    }

    let outcome = pool.swap_a_for_b(&bob, Amount::new(1_000), quoted)?;
    println!("Executed: {outcome}");

    let needed = pool.quote_input(SwapDirection::BForA, Amount::new(500))?;
    let back = pool.swap_b_for_a(&bob, needed, Amount::new(500))?;
    println!("Exact-out: paid {needed} WETH for {} USDC", back.amount_out());

    let state = pool.state();
    println!(
        "Fees retained: {} USDC, {} WETH",
        state.fees_a(),
        state.fees_b()
    );

    // ── 5. Withdraw everything ──────────────────────────────────────────
    let (a, b) = pool.remove_liquidity(&bob, added)?;
    println!("\nBob burns {added} claims -> ({a}, {b})");
    let (a, b) = pool.remove_liquidity(&alice, seeded)?;
    println!("Alice burns {seeded} claims -> ({a}, {b})");

    pool.verify_reserves()?;
    let (ra, rb) = pool.reserves();
    println!("Reserves after exit: ({ra}, {rb})");

    println!("\nEvents recorded: {}", pool.drain_events().len());
    Ok(())
}
