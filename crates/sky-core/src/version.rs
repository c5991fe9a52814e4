//! Migration version identifiers.

use std::cmp::Ordering;
use std::fmt;

/// Version identifier parsed from a migration filename.
///
/// The raw digit string is preserved verbatim because it is the identity
/// recorded in the version ledger. Ordering uses the numeric value, so `V2`
/// sorts before `V010` regardless of zero-padding width.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    raw: String,
    number: u64,
}

impl Version {
    /// Parse a version from the digit portion of a migration filename.
    ///
    /// Returns `None` when the input is empty, contains a non-digit, or
    /// overflows `u64`.
    pub fn parse(digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let number = digits.parse().ok()?;
        Some(Self {
            raw: digits.to_string(),
            number,
        })
    }

    /// The raw digit string as it appeared in the filename.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The numeric value used for ordering.
    pub fn number(&self) -> u64 {
        self.number
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number
            .cmp(&other.number)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
