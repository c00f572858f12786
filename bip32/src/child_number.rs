//! Child numbers

use crate::{Error, Result};
use borsh::{BorshDeserialize, BorshSerialize};
use core::{
    fmt::{self, Display},
    str::FromStr,
};

/// Offset added to a child index to select hardened derivation (`2^31`).
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// Index of a particular child key for a given (extended) private key.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord, BorshSerialize, BorshDeserialize)]
pub struct ChildNumber(pub u32);

impl ChildNumber {
    /// Hardened child keys use indices 2^31 through 2^32-1.
    pub const HARDENED_FLAG: u32 = HARDENED_OFFSET;

    /// Create new [`ChildNumber`] with the given index and hardened flag.
    ///
    /// Returns an error if the index is already in the hardened range.
    pub fn new(index: u32, hardened: bool) -> Result<Self> {
        if index & Self::HARDENED_FLAG == 0 {
            if hardened { Ok(Self(index | Self::HARDENED_FLAG)) } else { Ok(Self(index)) }
        } else {
            Err(Error::InvalidIndex(index.to_string()))
        }
    }

    /// Get the index number for this [`ChildNumber`], i.e. with the hardened flag cleared.
    pub fn index(self) -> u32 {
        self.0 & !Self::HARDENED_FLAG
    }

    /// Is this child number within the hardened range?
    pub fn is_hardened(&self) -> bool {
        self.0 & Self::HARDENED_FLAG != 0
    }

    /// The next raw child number, or `None` past `u32::MAX`.
    ///
    /// Crossing from `2^31 - 1` to `2^31` moves into the hardened range.
    pub fn checked_next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Serialize this child number as bytes.
    pub fn to_bytes(&self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Parse a child number from its byte encoding.
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }
}

impl Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())?;

        if self.is_hardened() {
            f.write_str("'")?;
        }

        Ok(())
    }
}

impl From<u32> for ChildNumber {
    fn from(n: u32) -> ChildNumber {
        ChildNumber(n)
    }
}

impl From<ChildNumber> for u32 {
    fn from(n: ChildNumber) -> u32 {
        n.0
    }
}

impl FromStr for ChildNumber {
    type Err = Error;

    /// Parses a decimal index with an optional trailing `'` hardening marker.
    ///
    /// The raw index must be below [`HARDENED_OFFSET`] before the marker is applied.
    fn from_str(child: &str) -> Result<ChildNumber> {
        let (index, hardened) = match child.strip_suffix('\'') {
            Some(index) => (index, true),
            None => (child, false),
        };

        let index = index.parse::<u32>().map_err(|_| Error::InvalidIndex(child.to_string()))?;
        if index >= HARDENED_OFFSET {
            return Err(Error::InvalidIndex(child.to_string()));
        }

        ChildNumber::new(index, hardened)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        assert_eq!("0".parse::<ChildNumber>().unwrap(), ChildNumber(0));
        assert_eq!("44'".parse::<ChildNumber>().unwrap(), ChildNumber(44 + HARDENED_OFFSET));
        assert_eq!("2147483647'".parse::<ChildNumber>().unwrap().to_string(), "2147483647'");
        assert_eq!(ChildNumber(HARDENED_OFFSET + 2).index(), 2);
    }

    #[test]
    fn rejects_out_of_range_and_garbage() {
        assert!(matches!("2147483648".parse::<ChildNumber>(), Err(Error::InvalidIndex(_))));
        assert!(matches!("2147483648'".parse::<ChildNumber>(), Err(Error::InvalidIndex(_))));
        assert!(matches!("4294967296".parse::<ChildNumber>(), Err(Error::InvalidIndex(_))));
        assert!(matches!("'".parse::<ChildNumber>(), Err(Error::InvalidIndex(_))));
        assert!(matches!("x1".parse::<ChildNumber>(), Err(Error::InvalidIndex(_))));
        assert!(matches!("".parse::<ChildNumber>(), Err(Error::InvalidIndex(_))));
    }

    #[test]
    fn next_crosses_into_hardened_range() {
        let last_normal = ChildNumber(HARDENED_OFFSET - 1);
        assert!(!last_normal.is_hardened());
        assert!(last_normal.checked_next().unwrap().is_hardened());
        assert_eq!(ChildNumber(u32::MAX).checked_next(), None);
    }
}
