//! Fundamental domain value types used throughout the DEX library.
//!
//! This module contains the value types that model the settlement domain:
//! token identifiers, pairs, principals, amounts, share units, fees and
//! state snapshots. All types are newtypes with validated constructors so
//! that invariants hold by construction.

mod amount;
mod basis_points;
mod fee_tier;
mod principal;
mod reserves;
mod shares;
mod token_id;
mod token_pair;

pub use amount::Amount;
pub(crate) use basis_points::MAX_BPS;
pub use basis_points::BasisPoints;
pub use fee_tier::FeeTier;
pub use principal::Principal;
pub use reserves::{Reserves, Withdrawal};
pub use shares::Shares;
pub use token_id::TokenId;
pub use token_pair::TokenPair;
