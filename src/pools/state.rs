//! Lock-free pool accounting.
//!
//! [`PoolState`] knows nothing about locks or ledgers. Every `*_for`
//! method is a pure plan that validates and prices an operation without
//! touching state; `credit`, `debit` and `set_reserves` commit. The pool
//! calls the plan, settles on the ledger, and only then commits.

use std::collections::HashMap;

use crate::domain::{Amount, Principal, Reserves, Shares, Withdrawal};
use crate::error::DexError;
use crate::math::constant_product;

/// Reserves, share supply and per-holder share balances of one pool.
///
/// Holders whose balance drops to zero are removed, so the map only
/// contains live positions and `total_shares` always equals the sum of
/// its values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PoolState {
    reserve_a: Amount,
    reserve_b: Amount,
    total_shares: Shares,
    share_balances: HashMap<Principal, Shares>,
}

impl PoolState {
    pub(crate) fn snapshot(&self) -> Reserves {
        Reserves {
            reserve_a: self.reserve_a,
            reserve_b: self.reserve_b,
            total_shares: self.total_shares,
        }
    }

    pub(crate) const fn total_shares(&self) -> Shares {
        self.total_shares
    }

    pub(crate) fn share_balance(&self, owner: &Principal) -> Shares {
        self.share_balances.get(owner).copied().unwrap_or_default()
    }

    #[cfg(test)]
    pub(crate) fn holders(&self) -> usize {
        self.share_balances.len()
    }

    /// Shares a deposit of `(amount_a, amount_b)` would mint.
    pub(crate) fn shares_for_deposit(
        &self,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Shares, DexError> {
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(DexError::ZeroAmount);
        }
        let minted = if self.total_shares.is_zero() {
            constant_product::initial_shares(amount_a, amount_b)?
        } else {
            constant_product::proportional_shares(
                amount_a,
                amount_b,
                self.reserve_a,
                self.reserve_b,
                self.total_shares,
            )?
        };
        // Holder balances never exceed the total, so this covers both.
        self.total_shares
            .checked_add(&minted)
            .ok_or(DexError::Overflow("total shares"))?;
        Ok(minted)
    }

    /// Token amounts `owner` would receive for burning `shares`.
    pub(crate) fn withdrawal_for(
        &self,
        owner: &Principal,
        shares: Shares,
    ) -> Result<Withdrawal, DexError> {
        if shares.is_zero() {
            return Err(DexError::InvalidShareAmount);
        }
        let held = self.share_balance(owner);
        if shares > held {
            return Err(DexError::InsufficientShares {
                requested: shares,
                held,
            });
        }
        constant_product::withdrawal(shares, self.reserve_a, self.reserve_b, self.total_shares)
    }

    pub(crate) fn credit(&mut self, owner: &Principal, shares: Shares) -> Result<(), DexError> {
        let total = self
            .total_shares
            .checked_add(&shares)
            .ok_or(DexError::Overflow("total shares"))?;
        let balance = self
            .share_balance(owner)
            .checked_add(&shares)
            .ok_or(DexError::Overflow("share balance"))?;
        self.total_shares = total;
        self.share_balances.insert(*owner, balance);
        Ok(())
    }

    pub(crate) fn debit(&mut self, owner: &Principal, shares: Shares) -> Result<(), DexError> {
        let held = self.share_balance(owner);
        let balance = held
            .checked_sub(&shares)
            .ok_or(DexError::InsufficientShares {
                requested: shares,
                held,
            })?;
        let total = self
            .total_shares
            .checked_sub(&shares)
            .ok_or(DexError::InvariantViolation("share balance exceeds total shares"))?;
        self.total_shares = total;
        if balance.is_zero() {
            self.share_balances.remove(owner);
        } else {
            self.share_balances.insert(*owner, balance);
        }
        Ok(())
    }

    pub(crate) fn set_reserves(&mut self, reserve_a: Amount, reserve_b: Amount) {
        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
    }
}
