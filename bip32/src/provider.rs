//!
//! Hash and elliptic curve capabilities consumed by [`HDNode`](crate::HDNode).
//!
//! [`Secp256k1`] binds them to the `secp256k1`, `sha2`, `ripemd` and `hmac`
//! crates. Alternative backends (e.g. deterministic stubs in tests) implement
//! [`HashProvider`] and [`EcProvider`] and are picked up through [`Backend`].
//!

use crate::{
    Error, HmacSha512, Identifier, KeyKind, PrivateKeyBytes, PublicKeyBytes, Result, SignatureBytes, KEY_SIZE,
};
use hmac::Mac;
use ripemd::Ripemd160;
use secp256k1::{ecdsa::Signature, All, Message, PublicKey, Scalar, Secp256k1 as Context, SecretKey, SECP256K1};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Hash primitives.
pub trait HashProvider {
    fn sha256(data: &[u8]) -> [u8; 32];

    fn ripemd160(data: &[u8]) -> [u8; 20];

    fn hmac_sha512(key: &[u8], data: &[u8]) -> Result<Zeroizing<[u8; 64]>>;

    /// `RIPEMD160(SHA256(data))`
    fn hash160(data: &[u8]) -> Identifier {
        Self::ripemd160(&Self::sha256(data))
    }
}

/// Elliptic curve operations over a single fixed curve.
pub trait EcProvider {
    /// `1 <= key < n`
    fn is_valid_private_key(key: &PrivateKeyBytes) -> bool;

    /// Accepts SEC1 compressed (33 bytes) or uncompressed (65 bytes) points.
    fn is_valid_public_key(key: &[u8]) -> bool;

    /// `point(key)`, compressed.
    fn public_key_create(key: &PrivateKeyBytes) -> Result<PublicKeyBytes>;

    /// Re-encode a valid point in compressed form.
    fn public_key_compress(key: &[u8]) -> Result<PublicKeyBytes>;

    /// `key + tweak (mod n)`, `None` when `tweak >= n` or the sum is zero.
    fn private_key_tweak_add(key: &PrivateKeyBytes, tweak: &[u8; KEY_SIZE]) -> Option<Zeroizing<PrivateKeyBytes>>;

    /// `key + point(tweak)`, `None` when `tweak >= n` or the sum is the point at infinity.
    fn public_key_tweak_add(key: &PublicKeyBytes, tweak: &[u8; KEY_SIZE]) -> Option<PublicKeyBytes>;

    /// Deterministic ECDSA over a 32-byte message hash.
    fn sign(hash: &[u8; 32], key: &PrivateKeyBytes) -> Result<SignatureBytes>;

    fn verify(hash: &[u8; 32], signature: &SignatureBytes, key: &PublicKeyBytes) -> bool;
}

/// Everything an [`HDNode`](crate::HDNode) needs from its environment.
pub trait Backend: HashProvider + EcProvider {}

impl<T> Backend for T where T: HashProvider + EcProvider {}

/// Production backend: secp256k1 (libsecp256k1) with RustCrypto hashes.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Secp256k1;

fn context() -> &'static Context<All> {
    SECP256K1
}

fn secret_key(key: &PrivateKeyBytes) -> Result<SecretKey> {
    SecretKey::from_slice(key).map_err(|_| Error::InvalidKeyValue(KeyKind::Private))
}

impl HashProvider for Secp256k1 {
    fn sha256(data: &[u8]) -> [u8; 32] {
        Sha256::digest(data).into()
    }

    fn ripemd160(data: &[u8]) -> [u8; 20] {
        Ripemd160::digest(data).into()
    }

    fn hmac_sha512(key: &[u8], data: &[u8]) -> Result<Zeroizing<[u8; 64]>> {
        let mut hmac = HmacSha512::new_from_slice(key)?;
        hmac.update(data);

        let mut output = Zeroizing::new([0u8; 64]);
        output.copy_from_slice(&hmac.finalize().into_bytes());
        Ok(output)
    }
}

impl EcProvider for Secp256k1 {
    fn is_valid_private_key(key: &PrivateKeyBytes) -> bool {
        SecretKey::from_slice(key).is_ok()
    }

    fn is_valid_public_key(key: &[u8]) -> bool {
        PublicKey::from_slice(key).is_ok()
    }

    fn public_key_create(key: &PrivateKeyBytes) -> Result<PublicKeyBytes> {
        let mut secret_key = secret_key(key)?;
        let public_key = PublicKey::from_secret_key(context(), &secret_key);
        secret_key.non_secure_erase();
        Ok(public_key.serialize())
    }

    fn public_key_compress(key: &[u8]) -> Result<PublicKeyBytes> {
        PublicKey::from_slice(key).map(|key| key.serialize()).map_err(|_| Error::InvalidKeyValue(KeyKind::Public))
    }

    fn private_key_tweak_add(key: &PrivateKeyBytes, tweak: &[u8; KEY_SIZE]) -> Option<Zeroizing<PrivateKeyBytes>> {
        let tweak = Scalar::from_be_bytes(*tweak).ok()?;
        let child = secret_key(key).ok()?.add_tweak(&tweak).ok()?;
        Some(Zeroizing::new(child.secret_bytes()))
    }

    fn public_key_tweak_add(key: &PublicKeyBytes, tweak: &[u8; KEY_SIZE]) -> Option<PublicKeyBytes> {
        let tweak = Scalar::from_be_bytes(*tweak).ok()?;
        let child = PublicKey::from_slice(key).ok()?.add_exp_tweak(context(), &tweak).ok()?;
        Some(child.serialize())
    }

    fn sign(hash: &[u8; 32], key: &PrivateKeyBytes) -> Result<SignatureBytes> {
        let mut secret_key = secret_key(key)?;
        let signature = context().sign_ecdsa(&Message::from_digest(*hash), &secret_key);
        secret_key.non_secure_erase();
        Ok(signature.serialize_compact())
    }

    fn verify(hash: &[u8; 32], signature: &SignatureBytes, key: &PublicKeyBytes) -> bool {
        let (Ok(signature), Ok(public_key)) = (Signature::from_compact(signature), PublicKey::from_slice(key)) else {
            return false;
        };
        context().verify_ecdsa(&Message::from_digest(*hash), &signature, &public_key).is_ok()
    }
}
