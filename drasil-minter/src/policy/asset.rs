/*
#################################################################################
# See LICENSE.md for full license information.                                  #
# Software: Drasil Blockchain Application Framework                             #
# License: Drasil Source Available License v1.0                                 #
# Licensors: Torben Poguntke (torben@drasil.io) & Zak Bassey (zak@drasil.io)    #
#################################################################################
*/
use super::PolicyId;
use crate::cardano::blake2b160;
use crate::error::MinterError;
use bech32::ToBase32;
use cardano_serialization_lib as clib;
use std::fmt;

pub const MAX_ASSET_NAME_LENGTH: usize = 32;

/// Raw bytes naming an asset under a policy. The ledger carries the bytes,
/// not the label, so `"TEST"` goes on chain as `54455354`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetName(Vec<u8>);

impl AssetName {
    pub fn new(bytes: Vec<u8>) -> Result<AssetName, MinterError> {
        if bytes.len() > MAX_ASSET_NAME_LENGTH {
            return Err(MinterError::AssetNameTooLong {
                max: MAX_ASSET_NAME_LENGTH,
                actual: bytes.len(),
            });
        }
        Ok(AssetName(bytes))
    }

    pub fn from_hex(str: &str) -> Result<AssetName, MinterError> {
        AssetName::new(hex::decode(str)?)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn to_clib(&self) -> Result<clib::AssetName, MinterError> {
        Ok(clib::AssetName::new(self.0.clone())?)
    }
}

impl fmt::Display for AssetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

pub fn encode_asset_name(name: &str) -> Result<AssetName, MinterError> {
    AssetName::new(name.as_bytes().to_vec())
}

/// Reverses `encode_asset_name` for hex encoded utf-8 names
pub fn decode_asset_name(str: &str) -> Result<String, MinterError> {
    Ok(String::from_utf8(AssetName::from_hex(str)?.0)?)
}

/// CIP-14 asset fingerprint
pub fn asset_fingerprint(policy: &PolicyId, name: &AssetName) -> Result<String, MinterError> {
    let data = [&policy.as_bytes()[..], name.as_bytes()].concat();
    let hash = blake2b160(&data);
    let fingerprint = bech32::Bech32::new("asset".to_string(), hash.to_base32())?;
    debug!("Fingerprint: {}", fingerprint);
    Ok(fingerprint.to_string())
}
