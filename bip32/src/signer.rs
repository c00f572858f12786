//!
//! ECDSA signing and verification with a node's key pair.
//!

use crate::{Backend, Error, HDNode, Result, SignatureBytes};

impl<B: Backend> HDNode<B> {
    /// Sign a 32-byte message hash with the node's private key.
    ///
    /// Deterministic (RFC6979), returns the 64-byte compact signature.
    pub fn sign(&self, hash: &[u8]) -> Result<SignatureBytes> {
        let private_key = self.private_key().ok_or(Error::MissingPrivateKey)?;
        let hash = hash.try_into().map_err(|_| Error::InvalidHashLength(hash.len()))?;
        B::sign(hash, private_key)
    }

    /// Verify a 64-byte compact signature over a 32-byte message hash.
    ///
    /// Wrong input lengths are errors; a well-formed signature that does not
    /// match yields `Ok(false)`.
    pub fn verify(&self, hash: &[u8], signature: &[u8]) -> Result<bool> {
        let hash = hash.try_into().map_err(|_| Error::InvalidHashLength(hash.len()))?;
        let signature = signature.try_into().map_err(|_| Error::InvalidSignatureLength(signature.len()))?;
        Ok(B::verify(hash, signature, self.public_key()))
    }
}
