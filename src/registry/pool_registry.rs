//! The pair-indexed pool registry.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use super::{AllPools, PoolHandle};
use crate::config::PoolConfig;
use crate::domain::{TokenId, TokenPair};
use crate::error::DexError;
use crate::ledger::FungibleLedger;
use crate::pools::Pool;

/// Pools keyed by pair, plus their creation order.
///
/// Entries are only ever appended, and each append writes the map and the
/// list together under the write lock.
pub(super) struct Index<L: FungibleLedger> {
    by_pair: HashMap<TokenPair, PoolHandle<L>>,
    pub(super) ordered: Vec<PoolHandle<L>>,
}

impl<L: FungibleLedger> Default for Index<L> {
    fn default() -> Self {
        Self {
            by_pair: HashMap::new(),
            ordered: Vec::new(),
        }
    }
}

/// Creates and indexes [`Pool`]s, at most one per unordered token pair.
///
/// Every pool shares the registry's ledger and is created with the
/// registry's [`PoolConfig`].
///
/// # Thread Safety
///
/// The index sits behind an `RwLock`. Lookups take the read lock;
/// creation takes the write lock and checks the index again before
/// inserting, so racing callers for a new pair all receive the one pool
/// that was created.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use hydra_dex::domain::TokenId;
/// use hydra_dex::ledger::InMemoryLedger;
/// use hydra_dex::registry::PoolRegistry;
///
/// let usdc = TokenId::from_bytes([1u8; 32]);
/// let weth = TokenId::from_bytes([2u8; 32]);
///
/// let registry = PoolRegistry::new(Arc::new(InMemoryLedger::new()));
/// let pool = registry.get_or_create_pool(usdc, weth).expect("valid pair");
/// let same = registry.get_pool(weth, usdc).expect("registered");
///
/// assert!(Arc::ptr_eq(&pool, &same));
/// assert_eq!(registry.len(), 1);
/// ```
pub struct PoolRegistry<L: FungibleLedger> {
    ledger: Arc<L>,
    config: PoolConfig,
    index: RwLock<Index<L>>,
}

impl<L: FungibleLedger> PoolRegistry<L> {
    /// Creates an empty registry whose pools use the default configuration.
    #[must_use]
    pub fn new(ledger: Arc<L>) -> Self {
        Self {
            ledger,
            config: PoolConfig::default(),
            index: RwLock::new(Index::default()),
        }
    }

    /// Creates an empty registry whose pools use `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidFee`] if `config` fails validation.
    pub fn with_config(ledger: Arc<L>, config: PoolConfig) -> Result<Self, DexError> {
        config.validate()?;
        Ok(Self {
            ledger,
            config,
            index: RwLock::new(Index::default()),
        })
    }

    /// Returns the pool for `{token_x, token_y}`, creating it if needed.
    ///
    /// Argument order does not matter: `(x, y)` and `(y, x)` return the same
    /// pool.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidTokenPair`] if the tokens are equal or one is
    ///   the null token.
    /// - [`DexError::LockPoisoned`] if the index lock is poisoned.
    pub fn get_or_create_pool(
        &self,
        token_x: TokenId,
        token_y: TokenId,
    ) -> Result<PoolHandle<L>, DexError> {
        let pair = TokenPair::new(token_x, token_y)?;
        if let Some(pool) = self.index.read()?.by_pair.get(&pair) {
            return Ok(Arc::clone(pool));
        }

        let mut index = self.index.write()?;
        if let Some(pool) = index.by_pair.get(&pair) {
            return Ok(Arc::clone(pool));
        }
        let pool = Arc::new(Pool::new(
            pair.first(),
            pair.second(),
            self.config,
            Arc::clone(&self.ledger),
        )?);
        index.by_pair.insert(pair, Arc::clone(&pool));
        index.ordered.push(Arc::clone(&pool));

        info!(
            pool = %pair,
            principal = %pool.principal(),
            fee = %self.config.fee_tier(),
            pools = index.ordered.len(),
            "created pool"
        );
        Ok(pool)
    }

    /// Returns the existing pool for `{token_x, token_y}`.
    ///
    /// # Errors
    ///
    /// - [`DexError::PoolNotFound`] if no pool was created for the pair,
    ///   including when the tokens could never form a pair.
    /// - [`DexError::LockPoisoned`] if the index lock is poisoned.
    pub fn get_pool(&self, token_x: TokenId, token_y: TokenId) -> Result<PoolHandle<L>, DexError> {
        let pair = TokenPair::new(token_x, token_y).map_err(|_| DexError::PoolNotFound)?;
        self.index
            .read()?
            .by_pair
            .get(&pair)
            .map(Arc::clone)
            .ok_or(DexError::PoolNotFound)
    }

    /// Iterates every pool in creation order.
    ///
    /// The iterator is lazy and covers the pools that existed when it was
    /// created. Clone it, or call `all_pools` again, to start over.
    #[must_use]
    pub fn all_pools(&self) -> AllPools<'_, L> {
        AllPools::new(&self.index, self.len())
    }

    /// Returns `true` if a pool exists for `{token_x, token_y}`.
    #[must_use]
    pub fn contains(&self, token_x: TokenId, token_y: TokenId) -> bool {
        TokenPair::new(token_x, token_y)
            .map(|pair| self.read_index().by_pair.contains_key(&pair))
            .unwrap_or(false)
    }

    /// Number of pools created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read_index().ordered.len()
    }

    /// Returns `true` if no pool has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configuration applied to every pool this registry creates.
    #[must_use]
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Ledger shared by every pool in the registry.
    #[must_use]
    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    // The index is append-only, so a poisoned lock still guards a
    // consistent prefix and infallible views can read through it.
    fn read_index(&self) -> std::sync::RwLockReadGuard<'_, Index<L>> {
        self.index.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<L: FungibleLedger> core::fmt::Debug for PoolRegistry<L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PoolRegistry")
            .field("config", &self.config)
            .field("pools", &self.len())
            .finish_non_exhaustive()
    }
}
