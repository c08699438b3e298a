//! Pool configuration.
//!
//! A [`PoolConfig`] is validated once at construction and then applied to
//! every pool a [`PoolRegistry`](crate::registry::PoolRegistry) creates.

mod pool_config;

pub use pool_config::PoolConfig;
