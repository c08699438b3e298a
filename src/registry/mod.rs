//! One pool per unordered token pair.
//!
//! [`PoolRegistry`] is the entry point for callers that address pools by
//! their tokens. It creates pools on demand, hands out shared
//! [`PoolHandle`]s, and enumerates pools in creation order through the
//! lazy [`AllPools`] iterator.

mod all_pools;
mod pool_registry;

use std::sync::Arc;

use crate::pools::Pool;

pub use all_pools::AllPools;
pub use pool_registry::PoolRegistry;

/// Shared reference to a registered pool. Cheap to clone.
pub type PoolHandle<L> = Arc<Pool<L>>;
