/*
#################################################################################
# See LICENSE.md for full license information.                                  #
# Software: Drasil Blockchain Application Framework                             #
# License: Drasil Source Available License v1.0                                 #
# Licensors: Torben Poguntke (torben@drasil.io) & Zak Bassey (zak@drasil.io)    #
#################################################################################
*/
use crate::cardano::pparams::ProtocolParameters;
use crate::cardano::supporting_functions::{
    calc_min_ada_for_output, calc_txfee, get_vkey_count, make_dummy_vkeywitnesses,
    sum_output_values, sum_utxo_values,
};
use crate::error::MinterError;
use crate::policy::{AssetPolicy, PolicyId};
use cardano_serialization_lib as clib;
use cardano_serialization_lib::{address as caddr, utils as cutils};
use std::collections::BTreeMap;

pub mod finalize;
pub mod mint;

pub use finalize::*;
pub use mint::MintInstruction;

/// Upper bound of fee recalculations, the fee settles after two in practice
pub const MAX_FEE_ITERATIONS: usize = 5;

/// A transaction under construction.
///
/// Every transformation consumes the draft and hands back the extended one,
/// nothing is computed before `finalize`.
#[derive(Debug, Clone, Default)]
pub struct TxDraft {
    inputs: Vec<cutils::TransactionUnspentOutput>,
    outputs: Vec<clib::TransactionOutput>,
    mints: Vec<MintInstruction>,
    scripts: Vec<AssetPolicy>,
    change_address: Option<caddr::Address>,
}

impl TxDraft {
    pub fn new() -> Self {
        TxDraft::default()
    }

    /// Spends a prior output; the utxo carries its value so the draft can
    /// balance. Adding the same output reference twice has no effect.
    pub fn add_input(mut self, utxo: cutils::TransactionUnspentOutput) -> Self {
        let input = utxo.input();
        if self.inputs.iter().any(|i| same_input(&i.input(), &input)) {
            debug!(
                "Skipped duplicate input {}#{}",
                hex::encode(input.transaction_id().to_bytes()),
                input.index()
            );
            return self;
        }
        self.inputs.push(utxo);
        self
    }

    pub fn add_output(mut self, address: &caddr::Address, value: &cutils::Value) -> Self {
        self.outputs
            .push(clib::TransactionOutput::new(address, value));
        self
    }

    pub fn add_mint(mut self, mint: MintInstruction) -> Self {
        self.mints.push(mint);
        self
    }

    /// Attaches the script proving authorization for mints under its policy
    pub fn add_minting_script(mut self, policy: AssetPolicy) -> Self {
        if !self.scripts.contains(&policy) {
            self.scripts.push(policy);
        }
        self
    }

    pub fn change_address(mut self, address: &caddr::Address) -> Self {
        self.change_address = Some(address.clone());
        self
    }

    pub fn inputs(&self) -> &[cutils::TransactionUnspentOutput] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[clib::TransactionOutput] {
        &self.outputs
    }

    pub fn mints(&self) -> &[MintInstruction] {
        &self.mints
    }

    /// Computes fee and change and produces the signable transaction.
    ///
    /// The fee is evaluated on the transaction carrying dummy vkey witnesses
    /// for every key expected to sign, then the body is rebuilt with that fee
    /// until the size no longer moves it.
    pub fn finalize(self, pparams: &ProtocolParameters) -> Result<FinalizedTx, MinterError> {
        if self.inputs.is_empty() {
            return Err(MinterError::NoInputs);
        }
        let change_address = self
            .change_address
            .clone()
            .ok_or(MinterError::MissingChangeAddress)?;

        let mut witnesses = BTreeMap::<PolicyId, AssetPolicy>::new();
        for script in &self.scripts {
            witnesses.insert(script.policy_id()?, script.clone());
        }
        let mint_table = mint::aggregate(&self.mints)?;
        for policy_id in mint_table.keys() {
            if !witnesses.contains_key(policy_id) {
                return Err(MinterError::MissingMintWitness(policy_id.to_hex()));
            }
        }

        for output in &self.outputs {
            let required = cutils::from_bignum(&calc_min_ada_for_output(output, pparams));
            let actual = cutils::from_bignum(&output.amount().coin());
            if actual < required {
                return Err(MinterError::BelowMinUtxo { required, actual });
            }
        }

        let input_value = sum_utxo_values(&self.inputs)?;
        mint::check_burns_covered(&mint_table, &input_value)?;
        let (minted, burned) = mint::mint_values(&mint_table)?;
        let available = input_value.checked_add(&minted)?;
        let spent = sum_output_values(&self.outputs)?.checked_add(&burned)?;

        let mut txins = clib::TransactionInputs::new();
        for utxo in &self.inputs {
            txins.add(&utxo.input());
        }

        let mut txwitness = clib::TransactionWitnessSet::new();
        if !witnesses.is_empty() {
            let mut native_scripts = clib::NativeScripts::new();
            for script in witnesses.values() {
                native_scripts.add(&script.to_native_script()?);
            }
            txwitness.set_native_scripts(&native_scripts);
        }
        let key_hashes: Vec<[u8; 28]> = witnesses.values().map(|s| *s.key_hash()).collect();
        let vkey_count = get_vkey_count(&self.inputs, &key_hashes);
        let mut fee_witness = txwitness.clone();
        fee_witness.set_vkeys(&make_dummy_vkeywitnesses(vkey_count)?);

        let mint = if mint_table.is_empty() {
            None
        } else {
            Some(mint::to_mint(&mint_table)?)
        };

        let mut fee = cutils::to_bignum(0);
        for i in 0..MAX_FEE_ITERATIONS {
            let txbody = self.make_body(
                &txins,
                mint.as_ref(),
                &available,
                &spent,
                &fee,
                &change_address,
                pparams,
            )?;
            let draft_tx = clib::Transaction::new(&txbody, &fee_witness, None);
            let calculated_fee = calc_txfee(&draft_tx, pparams)?;
            debug!("Fee iteration {}: {:?}", i, calculated_fee);
            if calculated_fee.compare(&fee) <= 0 {
                let size = draft_tx.to_bytes().len();
                if size as u64 > pparams.max_tx_size {
                    return Err(MinterError::TxTooLarge {
                        size,
                        max: pparams.max_tx_size,
                    });
                }
                info!("Fee: {:?}", fee);
                return Ok(FinalizedTx::new(txbody, txwitness, fee));
            }
            fee = calculated_fee;
        }
        Err(MinterError::FeeNotConverged(MAX_FEE_ITERATIONS))
    }

    /// Body with the explicit outputs followed by the single change output
    #[allow(clippy::too_many_arguments)]
    fn make_body(
        &self,
        txins: &clib::TransactionInputs,
        mint: Option<&clib::Mint>,
        available: &cutils::Value,
        spent: &cutils::Value,
        fee: &cutils::BigNum,
        change_address: &caddr::Address,
        pparams: &ProtocolParameters,
    ) -> Result<clib::TransactionBody, MinterError> {
        let needed = spent.checked_add(&cutils::Value::new(fee))?;
        let change = available.checked_sub(&needed).map_err(|_| {
            MinterError::InsufficientFunds(format!(
                "inputs hold {} lovelace, outputs and fee need {}",
                cutils::from_bignum(&available.coin()),
                cutils::from_bignum(&needed.coin())
            ))
        })?;
        let change_output = clib::TransactionOutput::new(change_address, &change);
        let min_change = calc_min_ada_for_output(&change_output, pparams);
        if change.coin().compare(&min_change) < 0 {
            return Err(MinterError::InsufficientFunds(format!(
                "change of {} lovelace is below the minimum of {}",
                cutils::from_bignum(&change.coin()),
                cutils::from_bignum(&min_change)
            )));
        }

        let mut txouts = clib::TransactionOutputs::new();
        for output in &self.outputs {
            txouts.add(output);
        }
        txouts.add(&change_output);

        let mut txbody = clib::TransactionBody::new_tx_body(txins, &txouts, fee);
        if let Some(mint) = mint {
            txbody.set_mint(mint);
        }
        Ok(txbody)
    }
}

fn same_input(a: &clib::TransactionInput, b: &clib::TransactionInput) -> bool {
    a.transaction_id().to_bytes() == b.transaction_id().to_bytes() && a.index() == b.index()
}
