/*
#################################################################################
# See LICENSE.md for full license information.                                  #
# Software: Drasil Blockchain Application Framework                             #
# License: Drasil Source Available License v1.0                                 #
# Licensors: Torben Poguntke (torben@drasil.io) & Zak Bassey (zak@drasil.io)    #
#################################################################################
*/
use crate::cardano::wallet::Cip30Wallet;
use crate::error::MinterError;
use cardano_serialization_lib as clib;
use cardano_serialization_lib::utils as cutils;

/// A balanced transaction waiting for its vkey witnesses. It exposes no way
/// to change inputs, outputs, mint or fee.
#[derive(Debug, Clone)]
pub struct FinalizedTx {
    body: clib::TransactionBody,
    witness_set: clib::TransactionWitnessSet,
    fee: cutils::BigNum,
}

impl FinalizedTx {
    pub(crate) fn new(
        body: clib::TransactionBody,
        witness_set: clib::TransactionWitnessSet,
        fee: cutils::BigNum,
    ) -> Self {
        FinalizedTx {
            body,
            witness_set,
            fee,
        }
    }

    pub fn body(&self) -> &clib::TransactionBody {
        &self.body
    }

    pub fn witness_set(&self) -> &clib::TransactionWitnessSet {
        &self.witness_set
    }

    pub fn fee(&self) -> u64 {
        cutils::from_bignum(&self.fee)
    }

    pub fn to_transaction(&self) -> clib::Transaction {
        clib::Transaction::new(&self.body, &self.witness_set, None)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_transaction().to_bytes())
    }

    pub fn tx_hash(&self) -> String {
        hex::encode(cutils::hash_transaction(&self.body).to_bytes())
    }
}

#[derive(Debug, Clone)]
pub struct SignedTx {
    tx: clib::Transaction,
    tx_hash: String,
}

impl SignedTx {
    pub fn transaction(&self) -> &clib::Transaction {
        &self.tx
    }

    pub fn tx_hash(&self) -> &str {
        &self.tx_hash
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.tx.to_bytes())
    }
}

/// Applies the vkey witnesses of a wallet signature to the stored witness
/// set. Native scripts and other witnesses already present are kept.
pub fn apply_signature(tx: &FinalizedTx, signature: &str) -> Result<SignedTx, MinterError> {
    let tx_witness_signature =
        clib::TransactionWitnessSet::from_bytes(hex::decode(signature)?)?;
    let vkeys = tx_witness_signature
        .vkeys()
        .ok_or_else(|| MinterError::Signing("wallet returned no vkey witnesses".to_string()))?;

    let mut tx_witness_stored = tx.witness_set().clone();
    tx_witness_stored.set_vkeys(&vkeys);
    let fin_tx = clib::Transaction::new(tx.body(), &tx_witness_stored, None);
    Ok(SignedTx {
        tx: fin_tx,
        tx_hash: tx.tx_hash(),
    })
}

/// Asks the wallet to sign. A rejection or malformed reply ends the attempt,
/// nothing is retried.
pub async fn sign_transaction<W: Cip30Wallet + ?Sized>(
    wallet: &W,
    tx: &FinalizedTx,
) -> Result<SignedTx, MinterError> {
    info!("Requesting signature for transaction {}", tx.tx_hash());
    let signature = match wallet.sign_tx(&tx.to_hex(), false).await {
        Ok(s) => s,
        Err(MinterError::Signing(e)) => return Err(MinterError::Signing(e)),
        Err(e) => return Err(MinterError::Signing(e.to_string())),
    };
    apply_signature(tx, &signature).map_err(|e| match e {
        MinterError::Signing(_) => e,
        other => MinterError::Signing(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cardano::pparams::ProtocolParameters;
    use crate::policy::{build_single_sig_policy, encode_asset_name};
    use crate::testing::{sample_utxo, FakeWallet, SAMPLE_ADDRESS, SAMPLE_KEY_HASH};
    use crate::txbuilder::{MintInstruction, TxDraft};
    use crate::wallet::decode_addr;

    fn finalized() -> Result<FinalizedTx, MinterError> {
        let addr = decode_addr(SAMPLE_ADDRESS)?;
        let policy = build_single_sig_policy(&hex::decode(SAMPLE_KEY_HASH)?)?;
        TxDraft::new()
            .add_input(sample_utxo(0, 10_000_000_000)?)
            .add_output(&addr, &cutils::Value::new(&cutils::to_bignum(2_000_000)))
            .add_mint(MintInstruction::new(
                policy.policy_id()?,
                encode_asset_name("TEST")?,
                1,
            )?)
            .add_minting_script(policy)
            .change_address(&addr)
            .finalize(&ProtocolParameters::default())
    }

    #[test]
    fn finalized_tx_round_trips_through_hex() -> Result<(), MinterError> {
        let tx = finalized()?;
        let decoded = clib::Transaction::from_bytes(hex::decode(tx.to_hex())?)?;
        assert_eq!(decoded.body().to_bytes(), tx.body().to_bytes());
        assert_eq!(tx.tx_hash().len(), 64);
        Ok(())
    }

    #[tokio::test]
    async fn signature_is_merged_into_witness_set() -> Result<(), MinterError> {
        let tx = finalized()?;
        let wallet = FakeWallet::funded(10_000_000_000)?;
        let signed = sign_transaction(&wallet, &tx).await?;

        let witness = signed.transaction().witness_set();
        assert_eq!(witness.vkeys().map(|v| v.len()), Some(1));
        assert_eq!(witness.native_scripts().map(|s| s.len()), Some(1));
        assert_eq!(signed.tx_hash(), tx.tx_hash());
        assert_eq!(
            signed.transaction().body().to_bytes(),
            tx.body().to_bytes()
        );
        assert_eq!(wallet.sign_calls(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn rejection_is_a_signing_error() -> Result<(), MinterError> {
        let tx = finalized()?;
        let wallet = FakeWallet::funded(10_000_000_000)?.rejecting();
        let res = sign_transaction(&wallet, &tx).await;
        assert!(matches!(res, Err(MinterError::Signing(_))));
        assert_eq!(wallet.sign_calls(), 1);
        Ok(())
    }

    #[test]
    fn witness_set_without_vkeys_is_rejected() -> Result<(), MinterError> {
        let tx = finalized()?;
        let empty = hex::encode(clib::TransactionWitnessSet::new().to_bytes());
        assert!(matches!(
            apply_signature(&tx, &empty),
            Err(MinterError::Signing(_))
        ));
        assert!(apply_signature(&tx, "zz").is_err());
        Ok(())
    }
}
