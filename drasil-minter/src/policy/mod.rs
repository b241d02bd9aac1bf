/*
#################################################################################
# See LICENSE.md for full license information.                                  #
# Software: Drasil Blockchain Application Framework                             #
# License: Drasil Source Available License v1.0                                 #
# Licensors: Torben Poguntke (torben@drasil.io) & Zak Bassey (zak@drasil.io)    #
#################################################################################
*/
//! Single-signature minting policies.
//!
//! A policy is a native script `[0, key_hash]`. Its policy id is the
//! Blake2b-224 hash of the script's cbor, prefixed with the native script
//! namespace tag. Encoding and hashing happen here without the ledger
//! library so the id can be derived and checked in isolation.

pub mod asset;

pub use asset::*;

use crate::cardano::{blake2b224, NATIVE_SCRIPT_TAG};
use crate::error::MinterError;
use cardano_serialization_lib as clib;
use cbor_event::{de::Deserializer, se::Serializer, Len};
use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

pub const KEY_HASH_LENGTH: usize = 28;
pub const POLICY_ID_LENGTH: usize = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    SignatureRequired,
}

impl PolicyKind {
    fn script_tag(&self) -> u64 {
        match self {
            PolicyKind::SignatureRequired => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetPolicy {
    kind: PolicyKind,
    key_hash: [u8; KEY_HASH_LENGTH],
}

impl AssetPolicy {
    pub fn kind(&self) -> PolicyKind {
        self.kind
    }

    pub fn key_hash(&self) -> &[u8; KEY_HASH_LENGTH] {
        &self.key_hash
    }

    /// Canonical cbor of the native script
    pub fn to_cbor(&self) -> Result<Vec<u8>, MinterError> {
        let mut se = Serializer::new_vec();
        se.write_array(Len::Len(2))?;
        se.write_unsigned_integer(self.kind.script_tag())?;
        se.write_bytes(self.key_hash)?;
        Ok(se.finalize())
    }

    pub fn to_hex(&self) -> Result<String, MinterError> {
        Ok(hex::encode(self.to_cbor()?))
    }

    pub fn from_cbor(bytes: &[u8]) -> Result<AssetPolicy, MinterError> {
        let mut raw = Deserializer::from(Cursor::new(bytes));
        if raw.array()? != Len::Len(2) {
            return Err(MinterError::new("native script must be a two element array"));
        }
        let tag = raw.unsigned_integer()?;
        if tag != PolicyKind::SignatureRequired.script_tag() {
            return Err(MinterError::Custom(format!(
                "unsupported native script type {tag}"
            )));
        }
        let policy = build_single_sig_policy(&raw.bytes()?)?;
        // rejects trailing bytes and non-canonical length headers
        if policy.to_cbor()? != bytes {
            return Err(MinterError::new("native script is not canonically encoded"));
        }
        Ok(policy)
    }

    pub fn from_hex(str: &str) -> Result<AssetPolicy, MinterError> {
        AssetPolicy::from_cbor(&hex::decode(str)?)
    }

    pub fn policy_id(&self) -> Result<PolicyId, MinterError> {
        policy_identifier(self)
    }

    /// The same script as a ledger library value, ready for a witness set
    pub fn to_native_script(&self) -> Result<clib::NativeScript, MinterError> {
        Ok(clib::NativeScript::from_bytes(self.to_cbor()?)?)
    }
}

/// Creates a policy which only allows minting and burning when the
/// transaction is signed by the key behind `key_hash`.
pub fn build_single_sig_policy(key_hash: &[u8]) -> Result<AssetPolicy, MinterError> {
    let bytes: [u8; KEY_HASH_LENGTH] =
        key_hash
            .try_into()
            .map_err(|_| MinterError::InvalidKeyHashLength {
                expected: KEY_HASH_LENGTH,
                actual: key_hash.len(),
            })?;
    Ok(AssetPolicy {
        kind: PolicyKind::SignatureRequired,
        key_hash: bytes,
    })
}

pub fn policy_identifier(policy: &AssetPolicy) -> Result<PolicyId, MinterError> {
    let script = policy.to_cbor()?;
    let mut preimage = Vec::with_capacity(script.len() + 1);
    preimage.push(NATIVE_SCRIPT_TAG);
    preimage.extend_from_slice(&script);
    Ok(PolicyId(blake2b224(&preimage)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PolicyId([u8; POLICY_ID_LENGTH]);

impl PolicyId {
    pub fn from_bytes(bytes: &[u8]) -> Result<PolicyId, MinterError> {
        let id: [u8; POLICY_ID_LENGTH] = bytes.try_into().map_err(|_| {
            MinterError::Custom(format!("a policy id has 28 bytes, got {}", bytes.len()))
        })?;
        Ok(PolicyId(id))
    }

    pub fn as_bytes(&self) -> &[u8; POLICY_ID_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn to_clib(&self) -> Result<clib::PolicyID, MinterError> {
        Ok(clib::PolicyID::from_bytes(self.0.to_vec())?)
    }
}

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for PolicyId {
    type Err = MinterError;
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        PolicyId::from_bytes(&hex::decode(src)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{SAMPLE_KEY_HASH, SAMPLE_POLICY_ID};
    use clib::crypto::Ed25519KeyHash;

    fn sample_key_hash() -> Vec<u8> {
        hex::decode(SAMPLE_KEY_HASH).unwrap()
    }

    #[test]
    fn builds_signature_policy() -> Result<(), MinterError> {
        let policy = build_single_sig_policy(&sample_key_hash())?;
        assert_eq!(policy.kind(), PolicyKind::SignatureRequired);
        assert_eq!(policy.key_hash().to_vec(), sample_key_hash());
        Ok(())
    }

    #[test]
    fn rejects_wrong_key_hash_length() {
        let kh = sample_key_hash();
        assert_eq!(
            build_single_sig_policy(&kh[..27]),
            Err(MinterError::InvalidKeyHashLength {
                expected: 28,
                actual: 27
            })
        );
        let mut long = kh.clone();
        long.push(0);
        assert_eq!(
            build_single_sig_policy(&long),
            Err(MinterError::InvalidKeyHashLength {
                expected: 28,
                actual: 29
            })
        );
        assert!(build_single_sig_policy(&[]).is_err());
    }

    #[test]
    fn canonical_script_encoding() -> Result<(), MinterError> {
        let policy = build_single_sig_policy(&sample_key_hash())?;
        assert_eq!(policy.to_hex()?, format!("8200581c{SAMPLE_KEY_HASH}"));
        Ok(())
    }

    #[test]
    fn known_policy_id() -> Result<(), MinterError> {
        let policy = build_single_sig_policy(&sample_key_hash())?;
        assert_eq!(policy_identifier(&policy)?.to_hex(), SAMPLE_POLICY_ID);
        Ok(())
    }

    #[test]
    fn policy_id_is_deterministic() -> Result<(), MinterError> {
        let a = build_single_sig_policy(&sample_key_hash())?;
        let b = build_single_sig_policy(&sample_key_hash())?;
        assert_eq!(policy_identifier(&a)?, policy_identifier(&a)?);
        assert_eq!(policy_identifier(&a)?, policy_identifier(&b)?);
        Ok(())
    }

    #[test]
    fn different_keys_give_different_ids() -> Result<(), MinterError> {
        let mut seen = std::collections::HashSet::new();
        for i in 0..=255u8 {
            let mut kh = [0u8; 28];
            kh[27] = i;
            let id = policy_identifier(&build_single_sig_policy(&kh)?)?;
            assert!(seen.insert(id), "collision for key hash ending in {i}");
        }
        Ok(())
    }

    #[test]
    fn matches_ledger_library() -> Result<(), MinterError> {
        let kh = Ed25519KeyHash::from_bytes(sample_key_hash())?;
        let native =
            clib::NativeScript::new_script_pubkey(&clib::ScriptPubkey::new(&kh));
        let policy = build_single_sig_policy(&sample_key_hash())?;

        assert_eq!(policy.to_cbor()?, native.to_bytes());
        assert_eq!(
            policy_identifier(&policy)?.as_bytes().to_vec(),
            native.hash().to_bytes()
        );
        assert_eq!(policy.to_native_script()?.to_bytes(), native.to_bytes());
        Ok(())
    }

    #[test]
    fn script_cbor_round_trip() -> Result<(), MinterError> {
        let policy = build_single_sig_policy(&sample_key_hash())?;
        assert_eq!(AssetPolicy::from_hex(&policy.to_hex()?)?, policy);
        Ok(())
    }

    #[test]
    fn from_cbor_rejects_other_scripts() {
        // script_n_of_k [3, 1, []]
        assert!(AssetPolicy::from_hex("83030180").is_err());
        // sig script with a short key hash
        assert!(matches!(
            AssetPolicy::from_hex(&format!("8200581b{}", "00".repeat(27))),
            Err(MinterError::InvalidKeyHashLength { actual: 27, .. })
        ));
        // trailing byte
        assert!(AssetPolicy::from_hex(&format!("8200581c{SAMPLE_KEY_HASH}00")).is_err());
    }

    #[test]
    fn policy_id_parse_and_display() -> Result<(), MinterError> {
        let id = PolicyId::from_str(SAMPLE_POLICY_ID)?;
        assert_eq!(id.to_string(), SAMPLE_POLICY_ID);
        assert_eq!(id.to_clib()?.to_bytes(), id.as_bytes().to_vec());
        assert!(PolicyId::from_str("bdf3").is_err());
        Ok(())
    }
}
