//!
//! Master key construction and child key derivation.
//!

use crate::{
    Backend, ChildNumber, DerivationPath, Error, ExtendedKeyAttrs, HDNode, MasterKeyConfig, Result, DEFAULT_MASTER_SECRET,
    KEY_SIZE,
};
use log::{debug, trace, warn};
use zeroize::Zeroizing;

impl<B: Backend> HDNode<B> {
    /// Create the master node for the given seed.
    ///
    /// `I = HMAC-SHA512(config.master_secret, seed)`: the left half becomes the
    /// private key, the right half the chain code. An empty master secret
    /// selects [`DEFAULT_MASTER_SECRET`]. An invalid left half is an error;
    /// there is no other seed to fall back to.
    pub fn from_master_seed<S>(seed: S, config: &MasterKeyConfig) -> Result<Self>
    where
        S: AsRef<[u8]>,
    {
        let master_secret = match config.master_secret.as_str() {
            "" => DEFAULT_MASTER_SECRET,
            master_secret => master_secret,
        };
        let result = B::hmac_sha512(master_secret.as_bytes(), seed.as_ref())?;
        let (secret_key, chain_code) = result.split_at(KEY_SIZE);

        let node = Self::from_private_key(config.versions, ExtendedKeyAttrs::master(chain_code.try_into()?), secret_key)?;
        debug!("created master key {:08x}", node.fingerprint());

        Ok(node)
    }

    /// Derive a child node for a particular [`ChildNumber`].
    ///
    /// Indices at or above [`HARDENED_OFFSET`](crate::HARDENED_OFFSET) need a
    /// private key. Public-only nodes derive public-only children.
    ///
    /// When the derived key is invalid (probability below 2^-127) the next
    /// index is used instead; the returned node records the index actually used.
    pub fn derive_child<C>(&self, child_number: C) -> Result<Self>
    where
        C: Into<ChildNumber>,
    {
        let depth = self.depth().checked_add(1).ok_or(Error::MaxDepthExceeded)?;
        let parent_fingerprint = self.fingerprint();
        let mut child_number = child_number.into();

        loop {
            trace!("deriving child {} at depth {}", child_number, depth);

            let mut data = Zeroizing::new(Vec::with_capacity(KEY_SIZE + 5));
            if child_number.is_hardened() {
                let private_key = self.private_key().ok_or(Error::MissingPrivateKey)?;
                data.push(0);
                data.extend_from_slice(private_key);
            } else {
                data.extend_from_slice(self.public_key());
            }
            data.extend_from_slice(&child_number.to_bytes());

            let result = B::hmac_sha512(self.chain_code(), &data)?;
            let (child_key, chain_code) = result.split_at(KEY_SIZE);
            let tweak: &[u8; KEY_SIZE] = child_key.try_into()?;

            let attrs = ExtendedKeyAttrs { depth, parent_fingerprint, child_number, chain_code: chain_code.try_into()? };

            let child = match self.private_key() {
                Some(private_key) => B::private_key_tweak_add(private_key, tweak).map(|private_key| {
                    B::public_key_create(&private_key)
                        .map(|public_key| Self::from_parts(self.versions(), attrs, Some(private_key), public_key))
                }),
                None => B::public_key_tweak_add(self.public_key(), tweak)
                    .map(|public_key| Ok(Self::from_parts(self.versions(), attrs, None, public_key))),
            };

            match child {
                Some(child) => return child,
                None => {
                    let next = child_number.checked_next().ok_or(Error::IndexExhausted)?;
                    warn!("invalid child key at index {}, proceeding with index {}", child_number.0, next.0);
                    child_number = next;
                }
            }
        }
    }

    /// Apply every step of `path` in order.
    pub fn derive_path(self, path: &DerivationPath) -> Result<Self> {
        path.iter().try_fold(self, |node, child_number| node.derive_child(child_number))
    }

    /// Parse `path` (e.g. `m/44'/0'/0'/0/0`) and derive the node it names.
    ///
    /// `m` and `m'` name this node itself.
    pub fn derive(&self, path: &str) -> Result<Self> {
        let path = path.parse::<DerivationPath>()?;
        self.clone().derive_path(&path)
    }
}
