//! Parser for extended key types (i.e. `xprv` and `xpub`)

use crate::{ChildNumber, Error, ExtendedKeyAttrs, Result, Version, KEY_SIZE};
use core::{
    fmt::{self, Display},
    str::{self, FromStr},
};
use zeroize::{Zeroize, Zeroizing};

/// Serialized extended key (e.g. `xprv` and `xpub`).
///
/// `version(4) || depth(1) || parent_fingerprint(4) || child_number(4) || chain_code(32) || key(33)`
#[derive(Clone)]
pub struct ExtendedKey {
    /// Version tag of the key (e.g. `0x0488ade4` for `xprv`).
    pub version: Version,

    /// Extended key attributes.
    pub attrs: ExtendedKeyAttrs,

    /// Key material (may be public or private).
    ///
    /// Private keys are prefixed with a `0x00` byte, public keys carry their SEC1 tag.
    pub key_bytes: [u8; KEY_SIZE + 1],
}

impl ExtendedKey {
    /// Size of an extended key when deserialized into bytes from Base58.
    pub const BYTE_SIZE: usize = 78;

    /// Maximum size of a Base58Check-encoded extended key in bytes.
    pub const MAX_BASE58_SIZE: usize = 112;

    /// Does the key data hold a private key?
    pub fn is_private(&self) -> bool {
        self.key_bytes[0] == 0
    }

    /// Pack the 78-byte binary layout.
    ///
    /// The parent fingerprint is written as zero for depth 0 keys.
    pub fn to_bytes(&self) -> Zeroizing<[u8; Self::BYTE_SIZE]> {
        let mut bytes = Zeroizing::new([0u8; Self::BYTE_SIZE]);
        bytes[..4].copy_from_slice(&self.version.to_be_bytes());
        bytes[4] = self.attrs.depth;
        bytes[5..9].copy_from_slice(&self.attrs.effective_parent_fingerprint().to_be_bytes());
        bytes[9..13].copy_from_slice(&self.attrs.child_number.to_bytes());
        bytes[13..45].copy_from_slice(&self.attrs.chain_code);
        bytes[45..78].copy_from_slice(&self.key_bytes);
        bytes
    }

    /// Unpack the 78-byte binary layout.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::BYTE_SIZE {
            return Err(Error::DecodeLength(bytes.len(), Self::BYTE_SIZE));
        }

        let version = Version::from_be_bytes(bytes[..4].try_into()?);
        let depth = bytes[4];
        let parent_fingerprint = u32::from_be_bytes(bytes[5..9].try_into()?);
        let child_number = ChildNumber::from_bytes(bytes[9..13].try_into()?);
        let chain_code = bytes[13..45].try_into()?;
        let key_bytes = bytes[45..78].try_into()?;

        let attrs = ExtendedKeyAttrs { depth, parent_fingerprint, child_number, chain_code };

        Ok(ExtendedKey { version, attrs, key_bytes })
    }

    /// Write a Base58-encoded key to the provided buffer, returning a `&str`
    /// containing the serialized data.
    ///
    /// Note that this type also impls [`Display`] and therefore you can
    /// obtain an owned string by calling `to_string()`.
    pub fn write_base58<'a>(&self, buffer: &'a mut [u8; Self::MAX_BASE58_SIZE]) -> Result<&'a str> {
        let bytes = self.to_bytes();
        let base58_len = bs58::encode(bytes.as_slice()).with_check().onto(buffer.as_mut())?;
        str::from_utf8(&buffer[..base58_len]).map_err(Error::Utf8Error)
    }
}

impl Display for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; Self::MAX_BASE58_SIZE];
        let result = self.write_base58(&mut buf).map_err(|_| fmt::Error).and_then(|base58| f.write_str(base58));
        buf.zeroize();
        result
    }
}

impl FromStr for ExtendedKey {
    type Err = Error;

    fn from_str(base58: &str) -> Result<Self> {
        let mut bytes = Zeroizing::new([0u8; Self::BYTE_SIZE + 4]); // with 4-byte checksum
        let decoded_len = bs58::decode(base58).with_check(None).onto(bytes.as_mut_slice())?;
        Self::from_bytes(&bytes[..decoded_len])
    }
}

impl Drop for ExtendedKey {
    fn drop(&mut self) {
        self.key_bytes.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::ExtendedKey;
    use crate::{ChildNumber, Error, ExtendedKeyAttrs};
    use faster_hex::hex_decode_fallback;

    macro_rules! hex {
        ($str: literal) => {{
            let mut dst = vec![0; $str.len() / 2];
            hex_decode_fallback($str.as_bytes(), &mut dst);
            dst
        }};
    }

    fn key(parent_fingerprint: u32, depth: u8) -> ExtendedKey {
        ExtendedKey {
            version: 0x0488ade4,
            attrs: ExtendedKeyAttrs {
                depth,
                parent_fingerprint,
                child_number: ChildNumber(0),
                chain_code: hex!("2c06030e090b212127390803312a1d22152c1d010d2c2811242c0d0f23372f21").try_into().unwrap(),
            },
            key_bytes: hex!("02b4632d08485ff1df2db55b9dafd23347d1c47a457072a1e87be26896549a8737").try_into().unwrap(),
        }
    }

    #[test]
    fn serialize_without_parent() {
        assert_eq!(
            key(0x12345678, 0).to_bytes().to_vec(),
            hex!("0488ade40000000000000000002c06030e090b212127390803312a1d22152c1d010d2c2811242c0d0f23372f2102b4632d08485ff1df2db55b9dafd23347d1c47a457072a1e87be26896549a8737")
        );
    }

    #[test]
    fn serialize_with_parent() {
        assert_eq!(
            key(0x12345678, 1).to_bytes().to_vec(),
            hex!("0488ade40112345678000000002c06030e090b212127390803312a1d22152c1d010d2c2811242c0d0f23372f2102b4632d08485ff1df2db55b9dafd23347d1c47a457072a1e87be26896549a8737")
        );
    }

    #[test]
    fn bip32_test_vector_1_xprv() {
        let xprv_base58 = "xprv9s21ZrQH143K3QTDL4LXw2F7HEK3wJUD2nW2nRk4stbPy6cq3jPP\
            qjiChkVvvNKmPGJxWUtg6LnF5kejMRNNU3TGtRBeJgk33yuGBxrMPHi";

        let xprv = xprv_base58.parse::<ExtendedKey>();
        assert!(xprv.is_ok(), "Could not parse key");
        let xprv = xprv.unwrap();
        assert_eq!(xprv.version, 0x0488ade4);
        assert!(xprv.is_private());
        assert_eq!(xprv.attrs.depth, 0);
        assert_eq!(xprv.attrs.parent_fingerprint, 0);
        assert_eq!(xprv.attrs.child_number.0, 0);
        assert_eq!(xprv.attrs.chain_code.to_vec(), hex!("873DFF81C02F525623FD1FE5167EAC3A55A049DE3D314BB42EE227FFED37D508"));
        assert_eq!(xprv.key_bytes.to_vec(), hex!("00E8F32E723DECF4051AEFAC8E2C93C9C5B214313817CDB01A1494B917C8436B35"));
        assert_eq!(&xprv.to_string(), xprv_base58);
    }

    #[test]
    fn bip32_test_vector_1_xpub() {
        let xpub_base58 = "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhe\
             PY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8";

        let xpub = xpub_base58.parse::<ExtendedKey>();
        assert!(xpub.is_ok(), "Could not parse key");
        let xpub = xpub.unwrap();
        assert_eq!(xpub.version, 0x0488b21e);
        assert!(!xpub.is_private());
        assert_eq!(xpub.attrs.depth, 0);
        assert_eq!(xpub.attrs.chain_code.to_vec(), hex!("873DFF81C02F525623FD1FE5167EAC3A55A049DE3D314BB42EE227FFED37D508"));
        assert_eq!(xpub.key_bytes.to_vec(), hex!("0339A36013301597DAEF41FBE593A02CC513D0B55527EC2DF1050E2E8FF49C85C2"));
        assert_eq!(&xpub.to_string(), xpub_base58);
    }

    #[test]
    fn rejects_bad_checksum_and_length() {
        // last character altered
        let tampered = "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet9";
        assert!(matches!(tampered.parse::<ExtendedKey>(), Err(Error::Base58(_))));

        let short = bs58::encode([0u8; 77]).with_check().into_string();
        assert!(matches!(short.parse::<ExtendedKey>(), Err(Error::DecodeLength(77, 78))));
    }
}
