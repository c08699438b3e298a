//! Swap fee tiers built on [`BasisPoints`].

use core::fmt;

use super::BasisPoints;

/// The fee a pool charges on swap input, in basis points.
///
/// The fee is folded into the trade: only `input × (10 000 − bps) / 10 000`
/// participates in pricing, while the full input lands in the reserve.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::{BasisPoints, FeeTier};
///
/// let tier = FeeTier::default();
/// assert_eq!(tier, FeeTier::TIER_0_30_PERCENT);
/// assert_eq!(tier.basis_points(), BasisPoints::new(30));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// No fee. Swaps keep `k` constant up to rounding.
    pub const ZERO: Self = Self(BasisPoints::ZERO);

    /// 0.05% fee, for stable pairs (5 bp).
    pub const TIER_0_05_PERCENT: Self = Self(BasisPoints::new(5));

    /// 0.30% fee, the classic constant-product fee (30 bp).
    pub const TIER_0_30_PERCENT: Self = Self(BasisPoints::new(30));

    /// 1.00% fee, for exotic pairs (100 bp).
    pub const TIER_1_00_PERCENT: Self = Self(BasisPoints::new(100));

    /// Creates a new `FeeTier` from arbitrary [`BasisPoints`].
    #[must_use]
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Returns `true` if swaps can be priced with this fee, i.e. the fee is
    /// strictly below 100%.
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        self.0.get() < BasisPoints::MAX_PERCENT.get()
    }

    /// Multiplier applied to swap input, out of 10 000.
    ///
    /// `None` if the fee exceeds 100%.
    #[must_use]
    pub const fn input_multiplier(&self) -> Option<u32> {
        self.0.complement()
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::TIER_0_30_PERCENT
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}
