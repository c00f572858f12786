use crate::{ChainCode, ChildNumber, Depth, KeyFingerprint};
use borsh::{BorshDeserialize, BorshSerialize};

/// Extended key attributes: fields common to extended keys including depth,
/// fingerprints, child numbers, and chain codes.
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord, BorshSerialize, BorshDeserialize)]
pub struct ExtendedKeyAttrs {
    /// Depth in the key derivation hierarchy.
    pub depth: Depth,

    /// Parent fingerprint. Only meaningful when `depth > 0`.
    pub parent_fingerprint: KeyFingerprint,

    /// Child number.
    pub child_number: ChildNumber,

    /// Chain code.
    pub chain_code: ChainCode,
}

impl ExtendedKeyAttrs {
    /// Attributes of a master (depth 0) key.
    pub fn master(chain_code: ChainCode) -> Self {
        ExtendedKeyAttrs { depth: 0, parent_fingerprint: 0, child_number: ChildNumber::default(), chain_code }
    }

    /// Parent fingerprint as serialized: always zero at depth 0.
    pub fn effective_parent_fingerprint(&self) -> KeyFingerprint {
        if self.depth == 0 { 0 } else { self.parent_fingerprint }
    }
}
