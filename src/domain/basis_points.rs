//! Fractions of ten thousand.

use core::fmt;

/// Denominator of every basis-point fraction.
pub(crate) const MAX_BPS: u32 = 10_000;

/// A fraction in hundredths of a percent: `30` is 0.30%, `10_000` is 100%.
///
/// Any `u32` can be stored. Whether a value is meaningful depends on where
/// it is used; [`FeeTier`](super::FeeTier) for instance only accepts fees
/// below 100%.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::BasisPoints;
///
/// let fee = BasisPoints::new(30);
/// assert_eq!(fee.complement(), Some(9_970));
/// assert_eq!(fee.to_string(), "30bp");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// 0%.
    pub const ZERO: Self = Self(0);

    /// 100%.
    pub const MAX_PERCENT: Self = Self(MAX_BPS);

    /// Wraps a raw basis-point count.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Raw basis-point count.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// The remaining fraction, `10_000 − self`, or `None` above 100%.
    ///
    /// For a fee this is the part of the input that takes part in pricing.
    #[must_use]
    pub const fn complement(&self) -> Option<u32> {
        MAX_BPS.checked_sub(self.0)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundred_percent_is_ten_thousand() {
        assert_eq!(BasisPoints::MAX_PERCENT.get(), MAX_BPS);
        assert_eq!(BasisPoints::default(), BasisPoints::ZERO);
    }

    #[test]
    fn complement_of_common_fees() {
        assert_eq!(BasisPoints::new(5).complement(), Some(9_995));
        assert_eq!(BasisPoints::new(30).complement(), Some(9_970));
        assert_eq!(BasisPoints::MAX_PERCENT.complement(), Some(0));
    }

    #[test]
    fn complement_above_hundred_percent() {
        assert_eq!(BasisPoints::new(MAX_BPS + 1).complement(), None);
    }

    #[test]
    fn display() {
        assert_eq!(BasisPoints::new(100).to_string(), "100bp");
    }
}
