//! In-memory ledger with ERC-20 style allowances.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::trace;

use super::{FungibleLedger, LedgerError};
use crate::domain::{Amount, Principal, TokenId};

#[derive(Debug, Default)]
struct Book {
    balances: HashMap<(TokenId, Principal), Amount>,
    allowances: HashMap<(TokenId, Principal, Principal), Amount>,
    supply: HashMap<TokenId, Amount>,
    frozen: HashSet<(TokenId, Principal)>,
}

impl Book {
    fn balance(&self, token: TokenId, owner: &Principal) -> Amount {
        self.balances
            .get(&(token, *owner))
            .copied()
            .unwrap_or_default()
    }

    fn set_balance(&mut self, token: TokenId, owner: &Principal, amount: Amount) {
        if amount.is_zero() {
            self.balances.remove(&(token, *owner));
        } else {
            self.balances.insert((token, *owner), amount);
        }
    }

    fn check_not_frozen(&self, token: TokenId, who: &Principal) -> Result<(), LedgerError> {
        if self.frozen.contains(&(token, *who)) {
            return Err(LedgerError::Rejected(format!("{who} is frozen for {token}")));
        }
        Ok(())
    }

    /// Validates everything first, then writes, so a failed move has no effect.
    fn move_funds(
        &mut self,
        token: TokenId,
        from: &Principal,
        to: &Principal,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.check_not_frozen(token, from)?;
        self.check_not_frozen(token, to)?;

        let available = self.balance(token, from);
        let debited = available
            .checked_sub(&amount)
            .ok_or(LedgerError::InsufficientBalance {
                token,
                needed: amount,
                available,
            })?;
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance(token, to)
            .checked_add(&amount)
            .ok_or(LedgerError::Overflow)?;

        self.set_balance(token, from, debited);
        self.set_balance(token, to, credited);
        Ok(())
    }
}

/// A thread-safe, in-process [`FungibleLedger`].
///
/// Balances are keyed by `(token, owner)`. Besides the trait methods it
/// offers minting, burning, allowances and per-account freezing, which is
/// what a host chain's token module would provide.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::{Amount, Principal, TokenId};
/// use hydra_dex::ledger::{FungibleLedger, InMemoryLedger};
///
/// let usdc = TokenId::from_bytes([1u8; 32]);
/// let alice = Principal::from_bytes([0xa1; 32]);
/// let bob = Principal::from_bytes([0xb0; 32]);
///
/// let ledger = InMemoryLedger::new();
/// ledger.mint(usdc, &alice, Amount::new(100)).expect("mint");
/// ledger.transfer(usdc, &alice, &bob, Amount::new(40)).expect("transfer");
///
/// assert_eq!(ledger.balance_of(usdc, &alice), Amount::new(60));
/// assert_eq!(ledger.balance_of(usdc, &bob), Amount::new(40));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    book: RwLock<Book>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Every write validates before mutating, so a poisoned book is still
    // consistent and can be used.
    fn read(&self) -> RwLockReadGuard<'_, Book> {
        self.book.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Book> {
        self.book.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates `amount` new units of `token` for `to`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] if the balance or total supply
    /// would exceed `u128::MAX`.
    pub fn mint(&self, token: TokenId, to: &Principal, amount: Amount) -> Result<(), LedgerError> {
        let mut book = self.write();
        let supply = book
            .supply
            .get(&token)
            .copied()
            .unwrap_or_default()
            .checked_add(&amount)
            .ok_or(LedgerError::Overflow)?;
        let balance = book
            .balance(token, to)
            .checked_add(&amount)
            .ok_or(LedgerError::Overflow)?;
        book.supply.insert(token, supply);
        book.set_balance(token, to, balance);
        trace!(%token, %to, %amount, "mint");
        Ok(())
    }

    /// Destroys `amount` units of `token` held by `from`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientBalance`] if `from` holds less
    /// than `amount`.
    pub fn burn(&self, token: TokenId, from: &Principal, amount: Amount) -> Result<(), LedgerError> {
        let mut book = self.write();
        let available = book.balance(token, from);
        let remaining = available
            .checked_sub(&amount)
            .ok_or(LedgerError::InsufficientBalance {
                token,
                needed: amount,
                available,
            })?;
        let supply = book.supply.get(&token).copied().unwrap_or_default();
        book.supply
            .insert(token, supply.checked_sub(&amount).unwrap_or_default());
        book.set_balance(token, from, remaining);
        trace!(%token, %from, %amount, "burn");
        Ok(())
    }

    /// Sets the amount of `token` that `spender` may move out of `owner`.
    pub fn approve(&self, token: TokenId, owner: &Principal, spender: &Principal, amount: Amount) {
        self.write()
            .allowances
            .insert((token, *owner, *spender), amount);
    }

    /// Returns the remaining allowance of `spender` over `owner`'s `token`.
    #[must_use]
    pub fn allowance(&self, token: TokenId, owner: &Principal, spender: &Principal) -> Amount {
        self.read()
            .allowances
            .get(&(token, *owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    /// Moves `amount` of `owner`'s `token` to `to` on behalf of `spender`,
    /// consuming allowance.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InsufficientAllowance`] if the allowance is too low.
    /// - Any error of [`FungibleLedger::transfer`]. Allowance is only
    ///   consumed when the move succeeds.
    pub fn transfer_from(
        &self,
        token: TokenId,
        spender: &Principal,
        owner: &Principal,
        to: &Principal,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let mut book = self.write();
        let key = (token, *owner, *spender);
        let approved = book.allowances.get(&key).copied().unwrap_or_default();
        let left = approved
            .checked_sub(&amount)
            .ok_or(LedgerError::InsufficientAllowance {
                token,
                needed: amount,
                approved,
            })?;
        book.move_funds(token, owner, to, amount)?;
        book.allowances.insert(key, left);
        Ok(())
    }

    /// Returns the total minted and not burned supply of `token`.
    #[must_use]
    pub fn total_supply(&self, token: TokenId) -> Amount {
        self.read().supply.get(&token).copied().unwrap_or_default()
    }

    /// Blocks every transfer of `token` into or out of `who`.
    pub fn freeze(&self, token: TokenId, who: &Principal) {
        self.write().frozen.insert((token, *who));
    }

    /// Lifts a [`freeze`](Self::freeze).
    pub fn thaw(&self, token: TokenId, who: &Principal) {
        self.write().frozen.remove(&(token, *who));
    }
}

impl FungibleLedger for InMemoryLedger {
    fn transfer(
        &self,
        token: TokenId,
        from: &Principal,
        to: &Principal,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.write().move_funds(token, from, to, amount)?;
        trace!(%token, %from, %to, %amount, "transfer");
        Ok(())
    }

    fn balance_of(&self, token: TokenId, owner: &Principal) -> Amount {
        self.read().balance(token, owner)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn usdc() -> TokenId {
        TokenId::from_bytes([1u8; 32])
    }

    fn alice() -> Principal {
        Principal::from_bytes([0xa1; 32])
    }

    fn bob() -> Principal {
        Principal::from_bytes([0xb0; 32])
    }

    fn funded(amount: u128) -> InMemoryLedger {
        let ledger = InMemoryLedger::new();
        let Ok(()) = ledger.mint(usdc(), &alice(), Amount::new(amount)) else {
            panic!("mint");
        };
        ledger
    }

    #[test]
    fn mint_tracks_supply() {
        let ledger = funded(500);
        assert_eq!(ledger.total_supply(usdc()), Amount::new(500));
        assert_eq!(ledger.balance_of(usdc(), &alice()), Amount::new(500));
    }

    #[test]
    fn transfer_moves_balance() {
        let ledger = funded(100);
        let Ok(()) = ledger.transfer(usdc(), &alice(), &bob(), Amount::new(30)) else {
            panic!("transfer");
        };
        assert_eq!(ledger.balance_of(usdc(), &alice()), Amount::new(70));
        assert_eq!(ledger.balance_of(usdc(), &bob()), Amount::new(30));
    }

    #[test]
    fn transfer_over_balance_has_no_effect() {
        let ledger = funded(10);
        let result = ledger.transfer(usdc(), &alice(), &bob(), Amount::new(11));
        assert_eq!(
            result,
            Err(LedgerError::InsufficientBalance {
                token: usdc(),
                needed: Amount::new(11),
                available: Amount::new(10),
            })
        );
        assert_eq!(ledger.balance_of(usdc(), &alice()), Amount::new(10));
        assert_eq!(ledger.balance_of(usdc(), &bob()), Amount::ZERO);
    }

    #[test]
    fn self_transfer_is_noop() {
        let ledger = funded(10);
        let Ok(()) = ledger.transfer(usdc(), &alice(), &alice(), Amount::new(10)) else {
            panic!("transfer");
        };
        assert_eq!(ledger.balance_of(usdc(), &alice()), Amount::new(10));
    }

    #[test]
    fn burn_reduces_supply() {
        let ledger = funded(100);
        let Ok(()) = ledger.burn(usdc(), &alice(), Amount::new(40)) else {
            panic!("burn");
        };
        assert_eq!(ledger.total_supply(usdc()), Amount::new(60));
        assert!(ledger.burn(usdc(), &alice(), Amount::new(61)).is_err());
    }

    #[test]
    fn transfer_from_consumes_allowance() {
        let ledger = funded(100);
        ledger.approve(usdc(), &alice(), &bob(), Amount::new(50));

        let Ok(()) = ledger.transfer_from(usdc(), &bob(), &alice(), &bob(), Amount::new(20)) else {
            panic!("transfer_from");
        };
        assert_eq!(ledger.allowance(usdc(), &alice(), &bob()), Amount::new(30));
        assert_eq!(ledger.balance_of(usdc(), &bob()), Amount::new(20));

        let over = ledger.transfer_from(usdc(), &bob(), &alice(), &bob(), Amount::new(31));
        assert!(matches!(over, Err(LedgerError::InsufficientAllowance { .. })));
        assert_eq!(ledger.allowance(usdc(), &alice(), &bob()), Amount::new(30));
    }

    #[test]
    fn failed_transfer_from_keeps_allowance() {
        let ledger = funded(10);
        ledger.approve(usdc(), &alice(), &bob(), Amount::new(50));
        let result = ledger.transfer_from(usdc(), &bob(), &alice(), &bob(), Amount::new(20));
        assert!(matches!(result, Err(LedgerError::InsufficientBalance { .. })));
        assert_eq!(ledger.allowance(usdc(), &alice(), &bob()), Amount::new(50));
    }

    #[test]
    fn frozen_accounts_reject_transfers() {
        let ledger = funded(100);
        ledger.freeze(usdc(), &bob());
        let result = ledger.transfer(usdc(), &alice(), &bob(), Amount::new(1));
        assert!(matches!(result, Err(LedgerError::Rejected(_))));

        ledger.thaw(usdc(), &bob());
        assert!(ledger.transfer(usdc(), &alice(), &bob(), Amount::new(1)).is_ok());
    }
}
