//!
//! [`HDNode`]: a key pair with its chain code and position in the key tree.
//!

use crate::{
    Backend, ChainCode, ChildNumber, Depth, Error, ExtendedKey, ExtendedKeyAttrs, Identifier, KeyFingerprint, KeyKind,
    PrivateKeyBytes, PublicKeyBytes, Result, Secp256k1, Versions, KEY_SIZE,
};
use log::debug;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Debug},
    marker::PhantomData,
    str::FromStr,
};
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, Zeroizing};

/// A node of a BIP32 key tree.
///
/// Either a full node (private and public key) or a public-only node. The
/// public key, [`identifier`](HDNode::identifier) and
/// [`fingerprint`](HDNode::fingerprint) always describe the same key.
///
/// Derivation never mutates a node, it returns a new one.
pub struct HDNode<B: Backend = Secp256k1> {
    versions: Versions,
    attrs: ExtendedKeyAttrs,
    private_key: Option<Zeroizing<PrivateKeyBytes>>,
    public_key: PublicKeyBytes,
    identifier: Identifier,
    backend: PhantomData<B>,
}

impl<B: Backend> HDNode<B> {
    /// Build a full node from raw private key bytes.
    pub fn from_private_key(versions: Versions, attrs: ExtendedKeyAttrs, private_key: &[u8]) -> Result<Self> {
        let private_key = validate_private_key::<B>(private_key)?;
        let public_key = B::public_key_create(&private_key)?;
        Ok(Self::from_parts(versions, attrs, Some(private_key), public_key))
    }

    /// Build a public-only node from a 33 or 65 byte SEC1 public key.
    pub fn from_public_key(versions: Versions, attrs: ExtendedKeyAttrs, public_key: &[u8]) -> Result<Self> {
        let public_key = validate_public_key::<B>(public_key)?;
        Ok(Self::from_parts(versions, attrs, None, public_key))
    }

    pub(crate) fn from_parts(
        versions: Versions,
        attrs: ExtendedKeyAttrs,
        private_key: Option<Zeroizing<PrivateKeyBytes>>,
        public_key: PublicKeyBytes,
    ) -> Self {
        let identifier = B::hash160(&public_key);
        HDNode { versions, attrs, private_key, public_key, identifier, backend: PhantomData }
    }

    /// Parse a Base58Check extended key, private or public.
    ///
    /// The version tag must match `versions.private` for private key data and
    /// `versions.public` for public key data.
    pub fn from_extended_key(base58: &str, versions: Versions) -> Result<Self> {
        let extended_key = ExtendedKey::from_str(base58)?;
        Self::try_from_extended_key(&extended_key, versions)
    }

    pub fn try_from_extended_key(extended_key: &ExtendedKey, versions: Versions) -> Result<Self> {
        if !versions.contains(extended_key.version) {
            return Err(Error::VersionMismatch("does not match private or public"));
        }

        let node = if extended_key.is_private() {
            if extended_key.version != versions.private {
                return Err(Error::VersionMismatch("version does not match private"));
            }
            Self::from_private_key(versions, extended_key.attrs.clone(), &extended_key.key_bytes[1..])?
        } else {
            if extended_key.version != versions.public {
                return Err(Error::VersionMismatch("version does not match public"));
            }
            Self::from_public_key(versions, extended_key.attrs.clone(), &extended_key.key_bytes)?
        };

        debug!(
            "parsed {} extended key at depth {} (fingerprint {:08x})",
            if node.has_private_key() { "private" } else { "public" },
            node.depth(),
            node.fingerprint()
        );

        Ok(node)
    }

    /// Rebuild a node from its interchange form, through `xpriv` when present.
    pub fn from_json(pair: &ExtendedKeyPair, versions: Versions) -> Result<Self> {
        match &pair.xpriv {
            Some(xpriv) => Self::from_extended_key(xpriv, versions),
            None => Self::from_extended_key(&pair.xpub, versions),
        }
    }

    pub fn versions(&self) -> Versions {
        self.versions
    }

    /// Get attributes for this key such as depth, parent fingerprint,
    /// child number, and chain code.
    pub fn attrs(&self) -> &ExtendedKeyAttrs {
        &self.attrs
    }

    pub fn depth(&self) -> Depth {
        self.attrs.depth
    }

    /// Raw child index, including the hardened offset.
    pub fn index(&self) -> u32 {
        self.attrs.child_number.0
    }

    pub fn child_number(&self) -> ChildNumber {
        self.attrs.child_number
    }

    /// Fingerprint of the parent node; zero for a master node.
    pub fn parent_fingerprint(&self) -> KeyFingerprint {
        self.attrs.effective_parent_fingerprint()
    }

    pub fn chain_code(&self) -> &ChainCode {
        &self.attrs.chain_code
    }

    pub fn set_chain_code(&mut self, chain_code: ChainCode) {
        self.attrs.chain_code = chain_code;
    }

    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    /// Borrow the private key, `None` for public-only nodes.
    pub fn private_key(&self) -> Option<&PrivateKeyBytes> {
        self.private_key.as_deref()
    }

    /// Compressed SEC1 public key.
    pub fn public_key(&self) -> &PublicKeyBytes {
        &self.public_key
    }

    /// `RIPEMD160(SHA256(public_key))`
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Alias of [`identifier`](HDNode::identifier).
    pub fn pub_key_hash(&self) -> &Identifier {
        &self.identifier
    }

    /// First four bytes of the identifier, big-endian.
    pub fn fingerprint(&self) -> KeyFingerprint {
        u32::from_be_bytes([self.identifier[0], self.identifier[1], self.identifier[2], self.identifier[3]])
    }

    /// Replace the key pair with the one of `private_key`.
    pub fn set_private_key(&mut self, private_key: &[u8]) -> Result<()> {
        let private_key = validate_private_key::<B>(private_key)?;
        let public_key = B::public_key_create(&private_key)?;
        self.private_key = Some(private_key);
        self.set_public_key_unchecked(public_key);
        Ok(())
    }

    /// Replace the public key and drop any private key.
    pub fn set_public_key(&mut self, public_key: &[u8]) -> Result<()> {
        let public_key = validate_public_key::<B>(public_key)?;
        self.private_key = None;
        self.set_public_key_unchecked(public_key);
        Ok(())
    }

    fn set_public_key_unchecked(&mut self, public_key: PublicKeyBytes) {
        self.public_key = public_key;
        self.identifier = B::hash160(&public_key);
    }

    /// Serialize this node's private key as an [`ExtendedKey`], `None` for public-only nodes.
    pub fn to_private_extended_key(&self) -> Option<ExtendedKey> {
        self.private_key.as_ref().map(|private_key| {
            // Add leading `0` byte
            let mut key_bytes = [0u8; KEY_SIZE + 1];
            key_bytes[1..].copy_from_slice(private_key.as_slice());
            ExtendedKey { version: self.versions.private, attrs: self.attrs.clone(), key_bytes }
        })
    }

    /// Serialize this node's public key as an [`ExtendedKey`].
    pub fn to_public_extended_key(&self) -> ExtendedKey {
        ExtendedKey { version: self.versions.public, attrs: self.attrs.clone(), key_bytes: self.public_key }
    }

    /// Base58Check `xprv`-style string, `None` for public-only nodes.
    pub fn private_extended_key(&self) -> Option<Zeroizing<String>> {
        self.to_private_extended_key().map(|key| Zeroizing::new(key.to_string()))
    }

    /// Base58Check `xpub`-style string.
    pub fn public_extended_key(&self) -> String {
        self.to_public_extended_key().to_string()
    }

    pub fn to_json(&self) -> ExtendedKeyPair {
        ExtendedKeyPair {
            xpriv: self.private_extended_key().map(|xpriv| xpriv.as_str().to_owned()),
            xpub: self.public_extended_key(),
        }
    }

    /// Overwrite the private key with random bytes and drop it.
    ///
    /// The node keeps working as a public-only node. Calling this on a
    /// public-only node does nothing.
    pub fn wipe_private_data(&mut self) -> &mut Self {
        if let Some(mut private_key) = self.private_key.take() {
            rand::thread_rng().fill_bytes(private_key.as_mut_slice());
        }
        self
    }
}

fn validate_private_key<B: Backend>(private_key: &[u8]) -> Result<Zeroizing<PrivateKeyBytes>> {
    if private_key.len() != KEY_SIZE {
        return Err(Error::InvalidKeyLength { kind: KeyKind::Private, len: private_key.len() });
    }

    let private_key = Zeroizing::new(<PrivateKeyBytes>::try_from(private_key)?);
    if !B::is_valid_private_key(&private_key) {
        return Err(Error::InvalidKeyValue(KeyKind::Private));
    }

    Ok(private_key)
}

fn validate_public_key<B: Backend>(public_key: &[u8]) -> Result<PublicKeyBytes> {
    if public_key.len() != KEY_SIZE + 1 && public_key.len() != 2 * KEY_SIZE + 1 {
        return Err(Error::InvalidKeyLength { kind: KeyKind::Public, len: public_key.len() });
    }

    if !B::is_valid_public_key(public_key) {
        return Err(Error::InvalidKeyValue(KeyKind::Public));
    }

    B::public_key_compress(public_key)
}

impl<B: Backend> Clone for HDNode<B> {
    fn clone(&self) -> Self {
        HDNode {
            versions: self.versions,
            attrs: self.attrs.clone(),
            private_key: self.private_key.clone(),
            public_key: self.public_key,
            identifier: self.identifier,
            backend: PhantomData,
        }
    }
}

impl<B: Backend> ConstantTimeEq for HDNode<B> {
    fn ct_eq(&self, other: &Self) -> Choice {
        let private_keys = match (&self.private_key, &other.private_key) {
            (Some(a), Some(b)) => a.as_slice().ct_eq(b.as_slice()),
            (None, None) => Choice::from(1),
            _ => Choice::from(0),
        };

        private_keys
            & self.public_key.ct_eq(&other.public_key)
            & self.versions.private.ct_eq(&other.versions.private)
            & self.versions.public.ct_eq(&other.versions.public)
            & self.attrs.depth.ct_eq(&other.attrs.depth)
            & self.parent_fingerprint().ct_eq(&other.parent_fingerprint())
            & self.attrs.child_number.0.ct_eq(&other.attrs.child_number.0)
            & self.attrs.chain_code.ct_eq(&other.attrs.chain_code)
    }
}

/// NOTE: uses [`ConstantTimeEq`] internally
impl<B: Backend> Eq for HDNode<B> {}

/// NOTE: uses [`ConstantTimeEq`] internally
impl<B: Backend> PartialEq for HDNode<B> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<B: Backend> Debug for HDNode<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HDNode")
            .field("versions", &self.versions)
            .field("attrs", &self.attrs)
            .field("private_key", &self.private_key.as_ref().map(|_| "..."))
            .field("public_key", &self.public_key)
            .finish()
    }
}

impl FromStr for HDNode {
    type Err = Error;

    /// Parses with the default (`xprv`/`xpub`) versions.
    fn from_str(base58: &str) -> Result<Self> {
        Self::from_extended_key(base58, Versions::default())
    }
}

/// Interchange form of a node: its private and public extended keys.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExtendedKeyPair {
    pub xpriv: Option<String>,
    pub xpub: String,
}

impl Drop for ExtendedKeyPair {
    fn drop(&mut self) {
        self.xpriv.zeroize();
    }
}
