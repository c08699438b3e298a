//! Opaque token identifier.

use core::fmt;

/// Identifies a fungible token kind on the ledger.
///
/// Wraps a fixed-size `[u8; 32]`. The byte order defines the total order
/// used to normalize pairs. The all-zero value is the *null token*: it can
/// be constructed, but no pool accepts it.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::TokenId;
///
/// let id = TokenId::from_bytes([1u8; 32]);
/// assert!(!id.is_null());
/// assert!(TokenId::NULL.is_null());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId([u8; 32]);

impl TokenId {
    /// The null token identifier.
    pub const NULL: Self = Self([0u8; 32]);

    /// Creates a `TokenId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns `true` for the all-zero identifier.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "…")
    }
}
