//! Error type.

use thiserror::Error;

/// [`Error`](enum@Error) variants emitted while building, deriving,
/// serializing or signing with an [`HDNode`](crate::HDNode).
#[derive(Clone, Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Private key is not 32 bytes, or public key is neither 33 nor 65 bytes.
    #[error("{kind} key has invalid length: {len} bytes")]
    InvalidKeyLength { kind: KeyKind, len: usize },

    /// Key bytes rejected by the curve backend.
    #[error("Invalid {0} key")]
    InvalidKeyValue(KeyKind),

    #[error("Version mismatch: {0}")]
    VersionMismatch(&'static str),

    #[error("Path must start with \"m\" or \"M\"")]
    InvalidPath,

    #[error("Invalid index: {0}")]
    InvalidIndex(String),

    /// Hardened derivation or signing on a public-only node.
    #[error("private key should be present")]
    MissingPrivateKey,

    #[error("message length is invalid: {0} bytes")]
    InvalidHashLength(usize),

    #[error("signature length is invalid: {0} bytes")]
    InvalidSignatureLength(usize),

    #[error("maximum derivation depth exceeded")]
    MaxDepthExceeded,

    /// Every candidate index up to `u32::MAX` produced an invalid child key.
    #[error("child index space exhausted")]
    IndexExhausted,

    #[error("Base58 -> {0}")]
    Base58(String),

    #[error("extended key has invalid length: {0} bytes (expected {1})")]
    DecodeLength(usize, usize),

    #[error("Decoding -> {0}")]
    Decode(#[from] core::array::TryFromSliceError),

    #[error("invalid HMAC key length")]
    Hmac,

    #[error("Invalid UTF-8 sequence")]
    Utf8Error(#[from] std::str::Utf8Error),
}

/// Which half of a key pair an error refers to.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum KeyKind {
    Private,
    Public,
}

impl std::fmt::Display for KeyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyKind::Private => f.write_str("private"),
            KeyKind::Public => f.write_str("public"),
        }
    }
}

impl From<bs58::decode::Error> for Error {
    fn from(err: bs58::decode::Error) -> Error {
        Error::Base58(err.to_string())
    }
}

impl From<bs58::encode::Error> for Error {
    fn from(err: bs58::encode::Error) -> Error {
        Error::Base58(err.to_string())
    }
}

impl From<hmac::digest::InvalidLength> for Error {
    fn from(_: hmac::digest::InvalidLength) -> Error {
        Error::Hmac
    }
}
