//! Walks a pool through its lifecycle with logging enabled.
//!
//! ```text
//! RUST_LOG=hydra_dex=debug cargo run --example swap_walkthrough
//! ```

use std::sync::Arc;

use hydra_dex::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hydra_dex=debug")),
        )
        .init();

    let usdc = TokenId::from_bytes([1u8; 32]);
    let weth = TokenId::from_bytes([2u8; 32]);
    let alice = Principal::from_bytes([0xa1; 32]);
    let bob = Principal::from_bytes([0xb0; 32]);

    let ledger = Arc::new(InMemoryLedger::new());
    for who in [&alice, &bob] {
        ledger.mint(usdc, who, Amount::new(1_000_000))?;
        ledger.mint(weth, who, Amount::new(1_000_000))?;
    }

    let registry = PoolRegistry::new(Arc::clone(&ledger));
    let pool = registry.get_or_create_pool(weth, usdc)?;
    println!("pool {} holds reserves under {}", pool.token_pair(), pool.principal());

    let minted = pool.add_liquidity(&alice, usdc, Amount::new(100_000), Amount::new(400_000))?;
    println!("alice minted {minted} shares");

    let expected = pool.get_amount_out(Amount::new(1_000), usdc)?;
    let received = pool.swap(&bob, Amount::new(1_000), usdc, expected)?;
    println!("bob sold 1000 USDC for {received} WETH");

    match pool.swap(&bob, Amount::new(1_000), usdc, Amount::new(received.get() + 1)) {
        Err(err @ DexError::SlippageExceeded { .. }) => println!("second swap refused: {err}"),
        other => println!("second swap: {other:?}"),
    }

    let paired = pool.quote(Amount::new(10_000), usdc)?;
    let bob_shares = pool.add_liquidity(&bob, usdc, Amount::new(10_000), paired)?;
    println!("bob deposited 10000 USDC + {paired} WETH for {bob_shares} shares");

    let withdrawal = pool.remove_liquidity(&alice, minted)?;
    println!(
        "alice withdrew {} USDC and {} WETH",
        withdrawal.amount_a, withdrawal.amount_b
    );

    let reserves = pool.reserves()?;
    println!(
        "final reserves {} / {} with {} shares outstanding",
        reserves.reserve_a, reserves.reserve_b, reserves.total_shares
    );
    println!("registry lists {} pool(s)", registry.all_pools().count());
    Ok(())
}
