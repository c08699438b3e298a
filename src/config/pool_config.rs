//! Parameters shared by every pool a registry creates.

use crate::domain::FeeTier;
use crate::error::DexError;

/// Configuration for a constant-product pool (`x · y = k`).
///
/// Token pairs are not part of the configuration: a registry applies one
/// `PoolConfig` to every pair it creates.
///
/// # Validation
///
/// - The fee tier must be strictly below 100%, otherwise no input would
///   participate in pricing.
///
/// # Examples
///
/// ```
/// use hydra_dex::config::PoolConfig;
/// use hydra_dex::domain::FeeTier;
///
/// let config = PoolConfig::default();
/// assert_eq!(config.fee_tier(), FeeTier::TIER_0_30_PERCENT);
///
/// let stable = PoolConfig::new(FeeTier::TIER_0_05_PERCENT).expect("valid fee");
/// assert_eq!(stable.fee_tier().basis_points().get(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    fee_tier: FeeTier,
}

impl PoolConfig {
    /// Creates a new `PoolConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidFee`] if `fee_tier` is 100% or more.
    pub fn new(fee_tier: FeeTier) -> Result<Self, DexError> {
        let config = Self { fee_tier };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidFee`] if the fee tier is 100% or more.
    pub fn validate(&self) -> Result<(), DexError> {
        if !self.fee_tier.is_usable() {
            return Err(DexError::InvalidFee("fee must be below 100%"));
        }
        Ok(())
    }

    /// Returns the fee tier.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            fee_tier: FeeTier::TIER_0_30_PERCENT,
        }
    }
}
