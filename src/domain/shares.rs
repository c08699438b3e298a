//! Pool-share units.

use core::fmt;

/// Units of a pool's share token.
///
/// Distinct from [`Amount`](super::Amount) because shares measure a
/// proportional claim on both reserves, not a quantity of either token.
/// All `u128` values are valid share amounts.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::Shares;
///
/// let a = Shares::new(1_000);
/// let b = Shares::new(2_000);
/// assert_eq!(a.checked_add(&b), Some(Shares::new(3_000)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Shares(u128);

impl Shares {
    /// No shares.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Shares` from a raw `u128` value.
    #[must_use]
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if there are no shares.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl From<u128> for Shares {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_constant() {
        assert!(Shares::ZERO.is_zero());
        assert_eq!(Shares::default(), Shares::ZERO);
    }

    #[test]
    fn checked_ops() {
        assert_eq!(
            Shares::new(5).checked_sub(&Shares::new(2)),
            Some(Shares::new(3))
        );
        assert_eq!(Shares::new(1).checked_sub(&Shares::new(2)), None);
        assert_eq!(Shares::new(u128::MAX).checked_add(&Shares::new(1)), None);
    }

    #[test]
    fn display() {
        assert_eq!(Shares::new(200).to_string(), "200");
    }
}
