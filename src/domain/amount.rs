//! Token quantities in base units.

use core::fmt;

/// A quantity of some token in its smallest indivisible unit.
///
/// Reserves, deposits, swap legs and ledger balances are all `Amount`s.
/// Decimals are a presentation concern of the host and never appear here.
///
/// Arithmetic is checked and yields `None` where `u128` would wrap; callers
/// turn that into [`DexError::Overflow`](crate::error::DexError::Overflow)
/// or a ledger error with context.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::Amount;
///
/// let reserve = Amount::new(1_000);
/// let payout = Amount::new(90);
/// assert_eq!(reserve.checked_sub(&payout), Some(Amount::new(910)));
/// assert_eq!(payout.checked_sub(&reserve), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Nothing.
    pub const ZERO: Self = Self(0);

    /// Largest balance a ledger account can hold.
    pub const MAX: Self = Self(u128::MAX);

    /// Wraps a raw base-unit count.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Raw base-unit count.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// `true` for [`Amount::ZERO`].
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// `self + other`, or `None` past [`Amount::MAX`].
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// `self − other`, or `None` if `other` is larger.
    #[must_use]
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
