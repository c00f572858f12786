use hmac::Hmac;
use sha2::Sha512;

/// Size of a raw secp256k1 private key and of a chain code.
pub const KEY_SIZE: usize = 32;

/// Chain code: 32 bytes of extra entropy keyed into child derivation.
pub type ChainCode = [u8; KEY_SIZE];

/// Derivation depth.
pub type Depth = u8;

/// First 4 bytes of a key [`Identifier`], read big-endian.
pub type KeyFingerprint = u32;

/// `RIPEMD160(SHA256(public_key))`.
pub type Identifier = [u8; 20];

/// Raw private key bytes.
pub type PrivateKeyBytes = [u8; KEY_SIZE];

/// SEC1-compressed public key bytes.
pub type PublicKeyBytes = [u8; KEY_SIZE + 1];

/// 32-bit extended key version tag (e.g. `0x0488ade4` for `xprv`).
pub type Version = u32;

/// Compact (`r || s`) ECDSA signature.
pub type SignatureBytes = [u8; 64];

/// HMAC with SHA-512
pub type HmacSha512 = Hmac<Sha512>;
