/*
#################################################################################
# See LICENSE.md for full license information.                                  #
# Software: Drasil Blockchain Application Framework                             #
# License: Drasil Source Available License v1.0                                 #
# Licensors: Torben Poguntke (torben@drasil.io) & Zak Bassey (zak@drasil.io)    #
#################################################################################
*/
use super::pparams::ProtocolParameters;
use super::wallet::payment_key_hash;
use super::DUMMY_VKEYWITNESS;
use crate::error::MinterError;
use cardano_serialization_lib as clib;
use cardano_serialization_lib::{crypto as ccrypto, utils as cutils};
use std::collections::HashSet;

/// Constant overhead of a utxo entry in the ledger's min-utxo formula
pub const UTXO_ENTRY_OVERHEAD: u64 = 160;

pub fn make_dummy_vkeywitnesses(
    vkey_count: usize,
) -> Result<ccrypto::Vkeywitnesses, MinterError> {
    let mut dummy_vkeywitnesses = ccrypto::Vkeywitnesses::new();
    let vkeywitness = ccrypto::Vkeywitness::from_bytes(hex::decode(DUMMY_VKEYWITNESS)?)?;
    debug!("Dummy Vkey Count: {:?}", vkey_count);
    for _ in 0..vkey_count {
        dummy_vkeywitnesses.add(&vkeywitness);
    }
    Ok(dummy_vkeywitnesses)
}

/// Number of vkey witnesses the wallet will attach: one per distinct
/// payment credential of the inputs plus one per extra key a minting
/// script requires.
pub fn get_vkey_count(
    txuos: &[cutils::TransactionUnspentOutput],
    script_key_hashes: &[[u8; 28]],
) -> usize {
    let mut signers = HashSet::<Vec<u8>>::new();
    for txuo in txuos {
        let address = txuo.output().address();
        match payment_key_hash(&address) {
            Ok(kh) => signers.insert(kh.to_bytes()),
            Err(_) => signers.insert(address.to_bytes()),
        };
    }
    for kh in script_key_hashes {
        signers.insert(kh.to_vec());
    }
    debug!(
        "Vkey count: {:?} for {:?} inputs",
        signers.len(),
        txuos.len()
    );
    signers.len()
}

pub fn calc_txfee(
    tx: &clib::Transaction,
    pparams: &ProtocolParameters,
) -> Result<cutils::BigNum, MinterError> {
    let linearfee = clib::fees::LinearFee::new(
        &cutils::to_bignum(pparams.min_fee_a),
        &cutils::to_bignum(pparams.min_fee_b),
    );
    let calculated_fee = clib::fees::min_fee(tx, &linearfee)?;
    debug!("Calculated fee: {:?}", calculated_fee);
    Ok(calculated_fee)
}

/// Minimum lovelace an output must hold: `(160 + |output|) * coinsPerUTxOByte`
pub fn calc_min_ada_for_output(
    output: &clib::TransactionOutput,
    pparams: &ProtocolParameters,
) -> cutils::BigNum {
    let size = output.to_bytes().len() as u64;
    cutils::to_bignum(
        (UTXO_ENTRY_OVERHEAD + size).saturating_mul(pparams.coins_per_utxo_size),
    )
}

pub fn sum_utxo_values(
    txuos: &[cutils::TransactionUnspentOutput],
) -> Result<cutils::Value, MinterError> {
    let mut acc = cutils::Value::new(&cutils::to_bignum(0));
    for txuo in txuos {
        acc = acc.checked_add(&txuo.output().amount())?;
    }
    Ok(acc)
}

pub fn sum_output_values(
    txouts: &[clib::TransactionOutput],
) -> Result<cutils::Value, MinterError> {
    let mut acc = cutils::Value::new(&cutils::to_bignum(0));
    for txout in txouts {
        acc = acc.checked_add(&txout.amount())?;
    }
    Ok(acc)
}

/// Amount of a single native asset held by a value
pub fn asset_amount(
    value: &cutils::Value,
    policy: &clib::PolicyID,
    name: &clib::AssetName,
) -> cutils::BigNum {
    value
        .multiasset()
        .and_then(|ma| ma.get(policy))
        .and_then(|assets| assets.get(name))
        .unwrap_or_else(|| cutils::to_bignum(0))
}
