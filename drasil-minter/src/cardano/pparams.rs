/*
#################################################################################
# See LICENSE.md for full license information.                                  #
# Software: Drasil Blockchain Application Framework                             #
# License: Drasil Source Available License v1.0                                 #
# Licensors: Torben Poguntke (torben@drasil.io) & Zak Bassey (zak@drasil.io)    #
#################################################################################
*/
use serde::{Deserialize, Deserializer};

/// Protocol parameters needed to balance a minting transaction.
///
/// Accepts Blockfrost's `epochs/latest/parameters` response as well as the
/// camelCase names of a `cardano-cli query protocol-parameters` dump.
/// Blockfrost encodes some of the numbers as strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProtocolParameters {
    #[serde(alias = "txFeePerByte", deserialize_with = "number_or_string")]
    pub min_fee_a: u64,
    #[serde(alias = "txFeeFixed", deserialize_with = "number_or_string")]
    pub min_fee_b: u64,
    #[serde(alias = "utxoCostPerByte", deserialize_with = "number_or_string")]
    pub coins_per_utxo_size: u64,
    #[serde(alias = "maxTxSize", deserialize_with = "number_or_string")]
    pub max_tx_size: u64,
}

impl Default for ProtocolParameters {
    fn default() -> Self {
        ProtocolParameters {
            min_fee_a: 44,
            min_fee_b: 155381,
            coins_per_utxo_size: 4310,
            max_tx_size: 16384,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    String(String),
}

fn number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.parse::<u64>().map_err(serde::de::Error::custom),
    }
}
