/*
#################################################################################
# See LICENSE.md for full license information.                                  #
# Software: Drasil Blockchain Application Framework                             #
# License: Drasil Source Available License v1.0                                 #
# Licensors: Torben Poguntke (torben@drasil.io) & Zak Bassey (zak@drasil.io)    #
#################################################################################
*/

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MinterError {
    #[error("error: {0}")]
    Custom(String),
    #[error("invalid key hash length: expected {expected} bytes, got {actual}")]
    InvalidKeyHashLength { expected: usize, actual: usize },
    #[error("asset name is {actual} bytes long, maximum is {max}")]
    AssetNameTooLong { max: usize, actual: usize },
    #[error("mint quantity must not be zero")]
    ZeroMintQuantity,
    #[error("no wallet connected")]
    WalletNotConnected,
    #[error("missing configuration: {0}")]
    MissingConfiguration(String),
    #[error("utxo selection failed for a target of {0} lovelace")]
    UtxoSelectionFailed(u64),
    #[error("address does not carry a payment key hash")]
    NoPaymentKeyHash,
    #[error("transaction draft has no inputs")]
    NoInputs,
    #[error("transaction draft has no change address")]
    MissingChangeAddress,
    #[error("no minting script provided for policy {0}")]
    MissingMintWitness(String),
    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),
    #[error("output holds {actual} lovelace, minimum is {required}")]
    BelowMinUtxo { required: u64, actual: u64 },
    #[error("transaction is {size} bytes, maximum is {max}")]
    TxTooLarge { size: usize, max: u64 },
    #[error("fee calculation did not settle after {0} iterations")]
    FeeNotConverged(usize),
    #[error("signing failed: {0}")]
    Signing(String),
    #[error("data provider error: {0}")]
    Provider(String),
}

impl MinterError {
    pub fn new(msg: &str) -> MinterError {
        MinterError::Custom(msg.to_owned())
    }
}

impl From<&str> for MinterError {
    fn from(err: &str) -> Self {
        MinterError::Custom(err.to_owned())
    }
}

impl From<std::string::String> for MinterError {
    fn from(err: std::string::String) -> Self {
        MinterError::Custom(err)
    }
}

impl From<hex::FromHexError> for MinterError {
    fn from(err: hex::FromHexError) -> Self {
        MinterError::new(&err.to_string())
    }
}

impl From<serde_json::Error> for MinterError {
    fn from(err: serde_json::Error) -> Self {
        MinterError::new(&err.to_string())
    }
}

impl From<std::env::VarError> for MinterError {
    fn from(err: std::env::VarError) -> Self {
        MinterError::MissingConfiguration(err.to_string())
    }
}

impl From<std::num::ParseIntError> for MinterError {
    fn from(err: std::num::ParseIntError) -> Self {
        MinterError::new(&err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for MinterError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        MinterError::new(&err.to_string())
    }
}

impl From<cbor_event::Error> for MinterError {
    fn from(err: cbor_event::Error) -> Self {
        MinterError::new(&err.to_string())
    }
}

impl From<cardano_serialization_lib::error::DeserializeError> for MinterError {
    fn from(err: cardano_serialization_lib::error::DeserializeError) -> Self {
        MinterError::new(&err.to_string())
    }
}

impl From<cardano_serialization_lib::error::JsError> for MinterError {
    fn from(err: cardano_serialization_lib::error::JsError) -> Self {
        MinterError::new(&err.to_string())
    }
}

impl From<bech32::Error> for MinterError {
    fn from(err: bech32::Error) -> Self {
        MinterError::new(&err.to_string())
    }
}

impl From<reqwest::Error> for MinterError {
    fn from(err: reqwest::Error) -> Self {
        MinterError::Provider(err.to_string())
    }
}
