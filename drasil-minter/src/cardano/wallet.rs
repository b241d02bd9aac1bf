/*
#################################################################################
# See LICENSE.md for full license information.                                  #
# Software: Drasil Blockchain Application Framework                             #
# License: Drasil Source Available License v1.0                                 #
# Licensors: Torben Poguntke (torben@drasil.io) & Zak Bassey (zak@drasil.io)    #
#################################################################################
*/
use crate::error::MinterError;
use async_trait::async_trait;
use cardano_serialization_lib::address::{
    Address, BaseAddress, EnterpriseAddress, PointerAddress, StakeCredential,
};
use cardano_serialization_lib::crypto::Ed25519KeyHash;
use cardano_serialization_lib::utils::{TransactionUnspentOutput, Value};

/// The subset of the CIP-30 wallet API the minter talks to.
///
/// Payloads are the CIP-30 wire forms: utxos are cbor hex encoded
/// `TransactionUnspentOutput`s, `sign_tx` returns a cbor hex encoded
/// `TransactionWitnessSet`.
#[async_trait]
pub trait Cip30Wallet: Send + Sync {
    /// Returns utxos covering `amount`, `None` if the wallet cannot cover it.
    async fn get_utxos(&self, amount: &Value) -> Result<Option<Vec<String>>, MinterError>;

    async fn get_change_address(&self) -> Result<String, MinterError>;

    async fn sign_tx(&self, tx_hex: &str, partial_sign: bool) -> Result<String, MinterError>;
}

/// decode a hex or bech32 encoded address
pub fn decode_addr(str: &str) -> Result<Address, MinterError> {
    match hex::decode(str) {
        Ok(bytes) => Ok(Address::from_bytes(bytes)?),
        Err(_) => match Address::from_bech32(str) {
            Ok(addr) => Ok(addr),
            Err(_e) => Err(MinterError::new(
                "The provided Address is not byte encoded not bech32 encoded, Address invalid!",
            )),
        },
    }
}

/// convert cbor hex encoded utxos as delivered by a wallet
pub fn transaction_unspent_outputs_from_string_vec(
    enc_txuos: &[String],
) -> Result<Vec<TransactionUnspentOutput>, MinterError> {
    let mut txuos = Vec::with_capacity(enc_txuos.len());
    for utxo in enc_txuos {
        txuos.push(TransactionUnspentOutput::from_bytes(hex::decode(utxo)?)?);
    }
    Ok(txuos)
}

fn payment_credential(addr: &Address) -> Option<StakeCredential> {
    if let Some(base) = BaseAddress::from_address(addr) {
        return Some(base.payment_cred());
    }
    if let Some(enterprise) = EnterpriseAddress::from_address(addr) {
        return Some(enterprise.payment_cred());
    }
    PointerAddress::from_address(addr).map(|pointer| pointer.payment_cred())
}

/// Payment key hash of a base, enterprise or pointer address.
///
/// Script addresses and reward addresses have no payment key and fail with
/// `NoPaymentKeyHash`.
pub fn payment_key_hash(addr: &Address) -> Result<Ed25519KeyHash, MinterError> {
    payment_credential(addr)
        .and_then(|cred| cred.to_keyhash())
        .ok_or(MinterError::NoPaymentKeyHash)
}
