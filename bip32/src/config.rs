//!
//! Version tags and master key construction settings.
//!

use crate::Version;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Label used as the HMAC key when expanding a seed into a master key.
pub const DEFAULT_MASTER_SECRET: &str = "Bitcoin seed";

/// Pair of version tags written at the front of serialized extended keys.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct Versions {
    pub private: Version,
    pub public: Version,
}

impl Versions {
    /// `xprv` / `xpub`
    pub const BITCOIN_MAINNET: Versions = Versions { private: 0x0488_ade4, public: 0x0488_b21e };
    /// `tprv` / `tpub`
    pub const BITCOIN_TESTNET: Versions = Versions { private: 0x0435_8394, public: 0x0435_87cf };

    pub const fn new(private: Version, public: Version) -> Self {
        Versions { private, public }
    }

    pub fn contains(&self, version: Version) -> bool {
        version == self.private || version == self.public
    }
}

impl Default for Versions {
    fn default() -> Self {
        Versions::BITCOIN_MAINNET
    }
}

/// Settings consumed by [`HDNode::from_master_seed`](crate::HDNode::from_master_seed).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MasterKeyConfig {
    /// HMAC-SHA512 key applied to the seed.
    pub master_secret: String,
    pub versions: Versions,
}

impl MasterKeyConfig {
    pub fn with_master_secret<S: Into<String>>(mut self, master_secret: S) -> Self {
        self.master_secret = master_secret.into();
        self
    }

    pub fn with_versions(mut self, versions: Versions) -> Self {
        self.versions = versions;
        self
    }
}

impl Default for MasterKeyConfig {
    fn default() -> Self {
        MasterKeyConfig { master_secret: DEFAULT_MASTER_SECRET.to_string(), versions: Versions::default() }
    }
}
