//!
//! # hdkey
//!
//! BIP32 hierarchical deterministic keys over secp256k1: master keys from
//! seeds, hardened and non-hardened child derivation, derivation paths,
//! `xprv`/`xpub` serialization, and ECDSA signing with derived keys.
//!
//! ```ignore
//! use hdkey::{HDNode, MasterKeyConfig};
//!
//! let master: HDNode = HDNode::from_master_seed(seed, &MasterKeyConfig::default())?;
//! let account = master.derive("m/44'/0'/0'")?;
//! println!("{}", account.public_extended_key());
//! ```
//!

mod attrs;
mod child_number;
mod config;
mod derivation;
mod derivation_path;
mod error;
mod node;
mod provider;
mod result;
mod signer;
pub mod types;
mod xkey;

pub use attrs::ExtendedKeyAttrs;
pub use child_number::{ChildNumber, HARDENED_OFFSET};
pub use config::{MasterKeyConfig, Versions, DEFAULT_MASTER_SECRET};
pub use derivation_path::DerivationPath;
pub use error::{Error, KeyKind};
pub use node::{ExtendedKeyPair, HDNode};
pub use provider::{Backend, EcProvider, HashProvider, Secp256k1};
pub use result::Result;
pub use types::*;
pub use xkey::ExtendedKey;
