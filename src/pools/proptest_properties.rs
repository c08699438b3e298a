//! Property-based tests using `proptest` for pool invariants.
//!
//! 1. **Swap reversibility**: a round trip A→B→A returns at most the input.
//! 2. **Invariant growth**: `R_a × R_b` never decreases across swaps.
//! 3. **No drain**: no input, however large, empties the output side.
//! 4. **Exact-out sufficiency**: `get_amount_in` always buys the target.
//! 5. **Liquidity round trip**: add then remove returns at most the deposit.
//! 6. **Share conservation**: total shares equal the sum of balances.
//! 7. **Registry symmetry**: `(x, y)` and `(y, x)` resolve to one pool.

use std::sync::Arc;

use proptest::prelude::*;

use crate::config::PoolConfig;
use crate::domain::{Amount, BasisPoints, FeeTier, Principal, Shares, TokenId};
use crate::ledger::InMemoryLedger;
use crate::math::{constant_product, wide_product, U256};
use crate::pools::Pool;
use crate::registry::PoolRegistry;
use crate::traits::{LiquidityPool, SwapPool};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn tok_a() -> TokenId {
    TokenId::from_bytes([1u8; 32])
}

fn tok_b() -> TokenId {
    TokenId::from_bytes([2u8; 32])
}

fn provider() -> Principal {
    Principal::from_bytes([0x11; 32])
}

fn trader() -> Principal {
    Principal::from_bytes([0x22; 32])
}

const WALLET: u128 = 1_000_000_000_000;

fn make_pool(ra: u128, rb: u128) -> Pool<InMemoryLedger> {
    let ledger = Arc::new(InMemoryLedger::new());
    for who in [provider(), trader()] {
        for token in [tok_a(), tok_b()] {
            let Ok(()) = ledger.mint(token, &who, Amount::new(WALLET)) else {
                panic!("mint");
            };
        }
    }
    let Ok(pool) = Pool::new(tok_a(), tok_b(), PoolConfig::default(), ledger) else {
        panic!("valid pool");
    };
    let Ok(_) = pool.add_liquidity(&provider(), tok_a(), Amount::new(ra), Amount::new(rb)) else {
        panic!("seed deposit");
    };
    pool
}

fn k(pool: &Pool<InMemoryLedger>) -> U256 {
    let Ok(r) = pool.reserves() else {
        panic!("reserves");
    };
    wide_product(r.reserve_a.get(), r.reserve_b.get())
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in range [10_000, 10_000_000] to avoid extremes.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=10_000_000u128
}

/// Fee tiers from zero up to 10%.
fn fee_strategy() -> impl Strategy<Value = FeeTier> {
    (0u32..=1_000u32).prop_map(|bps| FeeTier::new(BasisPoints::new(bps)))
}

// ---------------------------------------------------------------------------
// Swap properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_reversibility(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
    ) {
        let swap_in = (ra / 1_000).max(1);
        let pool = make_pool(ra, rb);

        let Ok(received_b) = pool.swap(&trader(), Amount::new(swap_in), tok_a(), Amount::ZERO) else {
            return Ok(());
        };
        let Ok(final_a) = pool.swap(&trader(), received_b, tok_b(), Amount::ZERO) else {
            return Ok(());
        };

        prop_assert!(
            final_a.get() <= swap_in,
            "round-trip should lose value: final={} > original={}",
            final_a, swap_in
        );
    }

    #[test]
    fn prop_invariant_growth(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        swaps in prop::collection::vec((1u128..=1_000_000u128, any::<bool>()), 1..8),
    ) {
        let pool = make_pool(ra, rb);
        let mut last = k(&pool);
        for (amount, a_to_b) in swaps {
            let token = if a_to_b { tok_a() } else { tok_b() };
            if pool.swap(&trader(), Amount::new(amount), token, Amount::ZERO).is_err() {
                continue;
            }
            let now = k(&pool);
            prop_assert!(now >= last, "k decreased: {} -> {}", last, now);
            last = now;
        }
    }

    #[test]
    fn prop_no_drain(
        reserve_in in 1u128..=1_000_000_000_000_000u128,
        reserve_out in 1u128..=1_000_000_000_000_000u128,
        amount_in in 1u128..=1_000_000_000_000_000u128,
        fee in fee_strategy(),
    ) {
        let out = constant_product::amount_out(
            Amount::new(amount_in),
            Amount::new(reserve_in),
            Amount::new(reserve_out),
            fee,
        );
        if let Ok(out) = out {
            prop_assert!(out.get() < reserve_out);
        }
    }

    #[test]
    fn prop_exact_out_sufficient(
        reserve_in in reserve_strategy(),
        reserve_out in reserve_strategy(),
        fraction in 1u128..=999u128,
        fee in fee_strategy(),
    ) {
        let target = (reserve_out * fraction / 1_000).max(1);
        let Ok(needed) = constant_product::amount_in(
            Amount::new(target),
            Amount::new(reserve_in),
            Amount::new(reserve_out),
            fee,
        ) else {
            return Ok(());
        };
        let Ok(out) = constant_product::amount_out(
            needed,
            Amount::new(reserve_in),
            Amount::new(reserve_out),
            fee,
        ) else {
            return Ok(());
        };
        prop_assert!(out.get() >= target, "bought {} < target {}", out, target);
    }
}

// ---------------------------------------------------------------------------
// Liquidity properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_liquidity_round_trip(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        pct in 1u128..=100u128,
    ) {
        let pool = make_pool(ra, rb);
        let add_a = (ra * pct / 100).max(1);
        let add_b = (rb * pct / 100).max(1);

        let Ok(minted) = pool.add_liquidity(&trader(), tok_a(), Amount::new(add_a), Amount::new(add_b)) else {
            return Ok(());
        };
        prop_assert!(!minted.is_zero());

        let Ok(back) = pool.remove_liquidity(&trader(), minted) else {
            return Ok(());
        };
        prop_assert!(back.amount_a.get() <= add_a, "a: {} > {}", back.amount_a, add_a);
        prop_assert!(back.amount_b.get() <= add_b, "b: {} > {}", back.amount_b, add_b);
        prop_assert_eq!(pool.share_balance(&trader()), Ok(Shares::ZERO));
    }

    #[test]
    fn prop_share_conservation(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        deposits in prop::collection::vec((1u8..=5u8, 1u128..=100_000u128), 1..10),
        burn_pct in 0u128..=100u128,
    ) {
        let pool = make_pool(ra, rb);
        for (who, amount) in &deposits {
            let lp = Principal::from_bytes([*who; 32]);
            for token in [tok_a(), tok_b()] {
                let Ok(()) = pool.ledger().mint(token, &lp, Amount::new(*amount * 1_000)) else {
                    panic!("mint");
                };
            }
            let Ok(paired) = pool.quote(Amount::new(*amount), tok_a()) else {
                return Ok(());
            };
            let _ = pool.add_liquidity(&lp, tok_a(), Amount::new(*amount), paired.max(Amount::new(1)));
        }

        let first = Principal::from_bytes([deposits[0].0; 32]);
        let Ok(held) = pool.share_balance(&first) else {
            panic!("share balance");
        };
        let burn = Shares::new(held.get() * burn_pct / 100);
        if !burn.is_zero() {
            let _ = pool.remove_liquidity(&first, burn);
        }

        let mut sum = 0u128;
        for holder in (1u8..=5).map(|b| Principal::from_bytes([b; 32])).chain([provider()]) {
            let Ok(shares) = pool.share_balance(&holder) else {
                panic!("share balance");
            };
            sum += shares.get();
        }
        prop_assert_eq!(pool.total_shares(), Ok(Shares::new(sum)));
    }
}

// ---------------------------------------------------------------------------
// Registry properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_registry_symmetry(
        x in 1u8..=255u8,
        y in 1u8..=255u8,
    ) {
        prop_assume!(x != y);
        let registry = PoolRegistry::new(Arc::new(InMemoryLedger::new()));
        let tx = TokenId::from_bytes([x; 32]);
        let ty = TokenId::from_bytes([y; 32]);

        let Ok(forward) = registry.get_or_create_pool(tx, ty) else {
            panic!("create");
        };
        let Ok(backward) = registry.get_or_create_pool(ty, tx) else {
            panic!("get");
        };
        prop_assert!(Arc::ptr_eq(&forward, &backward));
        prop_assert_eq!(registry.len(), 1);
        let Ok(found) = registry.get_pool(ty, tx) else {
            panic!("lookup");
        };
        prop_assert!(Arc::ptr_eq(&forward, &found));
    }
}
