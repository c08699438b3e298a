//! A constant-product pool settling against a shared ledger.
//!
//! # Operation Protocol
//!
//! Every mutating call follows the same steps under the pool's mutex:
//!
//! 1. Validate and price against the locked [`PoolState`] (no writes).
//! 2. Settle the resulting transfers on the ledger, in order. If a later
//!    transfer fails, earlier ones are reversed before the error returns.
//! 3. Commit share changes and re-read both reserves from the ledger.
//!
//! A failure at any step leaves the pool's state as it was.
//!
//! # Invariant
//!
//! After every swap `R_in × R_out` is at least what it was before. The
//! product is compared in 256 bits, so reserves of any size are checked.

use core::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, error, warn};

use super::state::PoolState;
use crate::config::PoolConfig;
use crate::domain::{
    Amount, FeeTier, Principal, Reserves, Shares, TokenId, TokenPair, Withdrawal,
};
use crate::error::DexError;
use crate::ledger::FungibleLedger;
use crate::math::{constant_product, wide_product, U256};
use crate::traits::{LiquidityPool, SwapPool};

/// One ledger movement inside an operation.
#[derive(Debug, Clone, Copy)]
struct Leg {
    token: TokenId,
    from: Principal,
    to: Principal,
    amount: Amount,
}

/// A constant-product pool (`x · y = k`) for one token pair.
///
/// The pool's reserves live on the ledger under [`Pool::principal`]; the
/// pool tracks them alongside its share book and re-reads them after every
/// mutation. All methods take `&self`; a mutex serializes operations on
/// one pool, while different pools proceed in parallel.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use hydra_dex::config::PoolConfig;
/// use hydra_dex::domain::{Amount, Principal, TokenId};
/// use hydra_dex::ledger::InMemoryLedger;
/// use hydra_dex::pools::Pool;
/// use hydra_dex::traits::{LiquidityPool, SwapPool};
///
/// let usdc = TokenId::from_bytes([1u8; 32]);
/// let weth = TokenId::from_bytes([2u8; 32]);
/// let alice = Principal::from_bytes([0xa1; 32]);
///
/// let ledger = Arc::new(InMemoryLedger::new());
/// ledger.mint(usdc, &alice, Amount::new(10_000)).expect("mint");
/// ledger.mint(weth, &alice, Amount::new(10_000)).expect("mint");
///
/// let pool = Pool::new(usdc, weth, PoolConfig::default(), Arc::clone(&ledger))
///     .expect("distinct tokens");
/// pool.add_liquidity(&alice, usdc, Amount::new(1_000), Amount::new(1_000))
///     .expect("deposit");
///
/// let out = pool.swap(&alice, Amount::new(100), usdc, Amount::new(90)).expect("swap");
/// assert_eq!(out, Amount::new(90));
/// ```
pub struct Pool<L: FungibleLedger> {
    pair: TokenPair,
    config: PoolConfig,
    principal: Principal,
    ledger: Arc<L>,
    state: Mutex<PoolState>,
}

impl<L: FungibleLedger> Pool<L> {
    /// Creates an empty pool for `token_x` and `token_y`, in either order.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidTokenPair`] if the tokens are equal or one is
    ///   the null token.
    /// - [`DexError::InvalidFee`] if `config` fails validation.
    pub fn new(
        token_x: TokenId,
        token_y: TokenId,
        config: PoolConfig,
        ledger: Arc<L>,
    ) -> Result<Self, DexError> {
        let pair = TokenPair::new(token_x, token_y)?;
        config.validate()?;
        Ok(Self {
            pair,
            config,
            principal: Principal::pool(pair),
            ledger,
            state: Mutex::new(PoolState::default()),
        })
    }

    /// Ledger account holding this pool's reserves.
    #[must_use]
    pub const fn principal(&self) -> Principal {
        self.principal
    }

    /// Configuration the pool was created with.
    #[must_use]
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Ledger the pool settles against.
    #[must_use]
    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    /// Tracked reserve of `token`.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidToken`] if `token` is not in the pair.
    /// - [`DexError::LockPoisoned`] if the pool's lock is poisoned.
    pub fn reserve_of(&self, token: TokenId) -> Result<Amount, DexError> {
        let is_first = self.pair.is_first(&token)?;
        let reserves = self.lock()?.snapshot();
        Ok(if is_first {
            reserves.reserve_a
        } else {
            reserves.reserve_b
        })
    }

    /// Re-reads both reserves from the ledger without moving tokens,
    /// absorbing anything sent to [`principal`](Self::principal) directly.
    ///
    /// An empty pool keeps zero reserves; tokens donated before the first
    /// deposit are picked up by that deposit.
    ///
    /// # Errors
    ///
    /// [`DexError::LockPoisoned`] if the pool's lock is poisoned.
    pub fn sync(&self) -> Result<Reserves, DexError> {
        let mut state = self.lock()?;
        self.resync(&mut state);
        let reserves = state.snapshot();
        debug!(
            pool = %self.pair,
            reserve_a = %reserves.reserve_a,
            reserve_b = %reserves.reserve_b,
            "synced reserves"
        );
        Ok(reserves)
    }

    fn lock(&self) -> Result<MutexGuard<'_, PoolState>, DexError> {
        Ok(self.state.lock()?)
    }

    fn resync(&self, state: &mut PoolState) {
        if state.total_shares().is_zero() {
            state.set_reserves(Amount::ZERO, Amount::ZERO);
            return;
        }
        state.set_reserves(
            self.ledger.balance_of(self.pair.first(), &self.principal),
            self.ledger.balance_of(self.pair.second(), &self.principal),
        );
    }

    /// Orients the pool's reserves for `amount` of `token`, enforcing the
    /// zero-amount check before the membership check.
    fn oriented(
        &self,
        state: &PoolState,
        amount: Amount,
        token: TokenId,
    ) -> Result<(Amount, Amount), DexError> {
        if amount.is_zero() {
            return Err(DexError::ZeroAmount);
        }
        state.snapshot().oriented(&self.pair, &token)
    }

    fn price_out(
        &self,
        state: &PoolState,
        input_amount: Amount,
        input_token: TokenId,
    ) -> Result<Amount, DexError> {
        let (reserve_in, reserve_out) = self.oriented(state, input_amount, input_token)?;
        constant_product::amount_out(input_amount, reserve_in, reserve_out, self.config.fee_tier())
    }

    fn deposit_leg(&self, caller: &Principal, token: TokenId, amount: Amount) -> Leg {
        Leg {
            token,
            from: *caller,
            to: self.principal,
            amount,
        }
    }

    fn payout_leg(&self, caller: &Principal, token: TokenId, amount: Amount) -> Leg {
        Leg {
            token,
            from: self.principal,
            to: *caller,
            amount,
        }
    }

    /// Executes `legs` in order; on failure reverses the completed ones.
    fn settle(&self, legs: &[Leg]) -> Result<(), DexError> {
        for (done, leg) in legs.iter().enumerate() {
            if leg.amount.is_zero() {
                continue;
            }
            if let Err(err) = self.ledger.transfer(leg.token, &leg.from, &leg.to, leg.amount) {
                debug!(pool = %self.pair, token = %leg.token, %err, "ledger refused transfer");
                self.reverse(&legs[..done]);
                return Err(err.into());
            }
        }
        Ok(())
    }

    fn reverse(&self, legs: &[Leg]) {
        for leg in legs.iter().rev().filter(|leg| !leg.amount.is_zero()) {
            warn!(
                pool = %self.pair,
                token = %leg.token,
                from = %leg.to,
                to = %leg.from,
                amount = %leg.amount,
                "reversing transfer of a failed operation"
            );
            if let Err(err) = self.ledger.transfer(leg.token, &leg.to, &leg.from, leg.amount) {
                error!(
                    pool = %self.pair,
                    token = %leg.token,
                    amount = %leg.amount,
                    %err,
                    "compensating transfer failed, ledger balances and pool diverge"
                );
            }
        }
    }
}

fn product(reserve_a: Amount, reserve_b: Amount) -> U256 {
    wide_product(reserve_a.get(), reserve_b.get())
}

impl<L: FungibleLedger> SwapPool for Pool<L> {
    fn get_amount_out(&self, input_amount: Amount, input_token: TokenId) -> Result<Amount, DexError> {
        let state = self.lock()?;
        self.price_out(&state, input_amount, input_token)
    }

    fn get_amount_in(&self, output_amount: Amount, output_token: TokenId) -> Result<Amount, DexError> {
        let state = self.lock()?;
        let (reserve_out, reserve_in) = self.oriented(&state, output_amount, output_token)?;
        constant_product::amount_in(output_amount, reserve_in, reserve_out, self.config.fee_tier())
    }

    fn quote(&self, amount: Amount, token: TokenId) -> Result<Amount, DexError> {
        let state = self.lock()?;
        let (reserve_from, reserve_to) = self.oriented(&state, amount, token)?;
        constant_product::quote(amount, reserve_from, reserve_to)
    }

    fn swap(
        &self,
        caller: &Principal,
        input_amount: Amount,
        input_token: TokenId,
        min_output: Amount,
    ) -> Result<Amount, DexError> {
        let mut state = self.lock()?;
        let output = self.price_out(&state, input_amount, input_token)?;
        if output < min_output {
            return Err(DexError::SlippageExceeded {
                output,
                minimum: min_output,
            });
        }
        if output.is_zero() {
            return Err(DexError::InsufficientOutput);
        }

        let output_token = self.pair.other(&input_token)?;
        let before = state.snapshot();
        let legs = [
            self.deposit_leg(caller, input_token, input_amount),
            self.payout_leg(caller, output_token, output),
        ];
        self.settle(&legs)?;

        let after_a = self.ledger.balance_of(self.pair.first(), &self.principal);
        let after_b = self.ledger.balance_of(self.pair.second(), &self.principal);
        if product(after_a, after_b) < product(before.reserve_a, before.reserve_b) {
            error!(
                pool = %self.pair,
                %caller,
                input = %input_amount,
                %output,
                before_a = %before.reserve_a,
                before_b = %before.reserve_b,
                %after_a,
                %after_b,
                "constant product decreased across swap"
            );
            self.reverse(&legs);
            return Err(DexError::InvariantViolation("k decreased across swap"));
        }
        state.set_reserves(after_a, after_b);

        debug!(
            pool = %self.pair,
            %caller,
            token_in = %input_token,
            amount_in = %input_amount,
            amount_out = %output,
            reserve_a = %after_a,
            reserve_b = %after_b,
            "swap"
        );
        Ok(output)
    }

    fn token_pair(&self) -> TokenPair {
        self.pair
    }

    fn fee_tier(&self) -> FeeTier {
        self.config.fee_tier()
    }

    fn reserves(&self) -> Result<Reserves, DexError> {
        Ok(self.lock()?.snapshot())
    }
}

impl<L: FungibleLedger> LiquidityPool for Pool<L> {
    fn add_liquidity(
        &self,
        caller: &Principal,
        token_x: TokenId,
        amount_x: Amount,
        amount_y: Amount,
    ) -> Result<Shares, DexError> {
        if amount_x.is_zero() || amount_y.is_zero() {
            return Err(DexError::ZeroAmount);
        }
        let (amount_a, amount_b) = if self.pair.is_first(&token_x)? {
            (amount_x, amount_y)
        } else {
            (amount_y, amount_x)
        };

        let mut state = self.lock()?;
        let minted = state.shares_for_deposit(amount_a, amount_b)?;
        self.settle(&[
            self.deposit_leg(caller, self.pair.first(), amount_a),
            self.deposit_leg(caller, self.pair.second(), amount_b),
        ])?;
        state.credit(caller, minted)?;
        self.resync(&mut state);

        let reserves = state.snapshot();
        debug!(
            pool = %self.pair,
            %caller,
            %amount_a,
            %amount_b,
            %minted,
            reserve_a = %reserves.reserve_a,
            reserve_b = %reserves.reserve_b,
            total_shares = %reserves.total_shares,
            "added liquidity"
        );
        Ok(minted)
    }

    fn remove_liquidity(&self, caller: &Principal, shares: Shares) -> Result<Withdrawal, DexError> {
        let mut state = self.lock()?;
        let withdrawal = state.withdrawal_for(caller, shares)?;
        self.settle(&[
            self.payout_leg(caller, self.pair.first(), withdrawal.amount_a),
            self.payout_leg(caller, self.pair.second(), withdrawal.amount_b),
        ])?;
        state.debit(caller, shares)?;
        self.resync(&mut state);

        let reserves = state.snapshot();
        debug!(
            pool = %self.pair,
            %caller,
            burned = %shares,
            amount_a = %withdrawal.amount_a,
            amount_b = %withdrawal.amount_b,
            reserve_a = %reserves.reserve_a,
            reserve_b = %reserves.reserve_b,
            total_shares = %reserves.total_shares,
            "removed liquidity"
        );
        Ok(withdrawal)
    }

    fn share_balance(&self, owner: &Principal) -> Result<Shares, DexError> {
        Ok(self.lock()?.share_balance(owner))
    }

    fn total_shares(&self) -> Result<Shares, DexError> {
        Ok(self.lock()?.total_shares())
    }
}

impl<L: FungibleLedger> fmt::Debug for Pool<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("pair", &self.pair)
            .field("config", &self.config)
            .field("principal", &self.principal)
            .finish_non_exhaustive()
    }
}
