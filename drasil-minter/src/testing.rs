/*
#################################################################################
# See LICENSE.md for full license information.                                  #
# Software: Drasil Blockchain Application Framework                             #
# License: Drasil Source Available License v1.0                                 #
# Licensors: Torben Poguntke (torben@drasil.io) & Zak Bassey (zak@drasil.io)    #
#################################################################################
*/
use crate::cardano::pparams::ProtocolParameters;
use crate::cardano::wallet::{decode_addr, Cip30Wallet};
use crate::error::MinterError;
use crate::flow::Notifier;
use crate::provider::ChainProvider;
use async_trait::async_trait;
use cardano_serialization_lib as clib;
use cardano_serialization_lib::{crypto as ccrypto, utils as cutils};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const SAMPLE_ADDRESS: &str = "00547a1a9f72988c93ad6f6dd6208061ba88bdd4b771ed9f0484ee1229bfd1261c8932b1bda5bf4bc76c0c5cbe0c83edb28be352c6cc24c4c3";
pub const SAMPLE_KEY_HASH: &str = "547a1a9f72988c93ad6f6dd6208061ba88bdd4b771ed9f0484ee1229";
pub const SAMPLE_POLICY_ID: &str = "bdf3a14517e60ac6bd8942f69117d9550eea65d7c5c655175eb84910";
pub const SAMPLE_TX_HASH: &str = "e1f11d7e9d34e0264c022ebef0e23147f51cb9614c7c6299bf1dedde84c405b9";

pub fn sample_utxo(
    index: u32,
    lovelace: u64,
) -> Result<cutils::TransactionUnspentOutput, MinterError> {
    let input = clib::TransactionInput::new(
        &ccrypto::TransactionHash::from_bytes(hex::decode(SAMPLE_TX_HASH)?)?,
        index,
    );
    let output = clib::TransactionOutput::new(
        &decode_addr(SAMPLE_ADDRESS)?,
        &cutils::Value::new(&cutils::to_bignum(lovelace)),
    );
    Ok(cutils::TransactionUnspentOutput::new(&input, &output))
}

enum Selection {
    Utxos(Vec<String>),
    Nothing,
    Fails,
}

/// In-memory CIP-30 wallet owning `SAMPLE_ADDRESS`
pub struct FakeWallet {
    selection: Selection,
    reject_signing: bool,
    utxo_calls: AtomicUsize,
    change_calls: AtomicUsize,
    sign_calls: AtomicUsize,
}

impl FakeWallet {
    fn with(selection: Selection) -> Self {
        FakeWallet {
            selection,
            reject_signing: false,
            utxo_calls: AtomicUsize::new(0),
            change_calls: AtomicUsize::new(0),
            sign_calls: AtomicUsize::new(0),
        }
    }

    pub fn funded(lovelace: u64) -> Result<Self, MinterError> {
        let utxo = hex::encode(sample_utxo(0, lovelace)?.to_bytes());
        Ok(FakeWallet::with(Selection::Utxos(vec![utxo])))
    }

    pub fn empty() -> Self {
        FakeWallet::with(Selection::Nothing)
    }

    pub fn failing_selection() -> Self {
        FakeWallet::with(Selection::Fails)
    }

    pub fn rejecting(mut self) -> Self {
        self.reject_signing = true;
        self
    }

    pub fn utxo_calls(&self) -> usize {
        self.utxo_calls.load(Ordering::SeqCst)
    }

    pub fn change_address_calls(&self) -> usize {
        self.change_calls.load(Ordering::SeqCst)
    }

    pub fn sign_calls(&self) -> usize {
        self.sign_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Cip30Wallet for FakeWallet {
    async fn get_utxos(&self, _amount: &cutils::Value) -> Result<Option<Vec<String>>, MinterError> {
        self.utxo_calls.fetch_add(1, Ordering::SeqCst);
        match &self.selection {
            Selection::Utxos(u) => Ok(Some(u.clone())),
            Selection::Nothing => Ok(None),
            Selection::Fails => Err(MinterError::new("wallet disconnected")),
        }
    }

    async fn get_change_address(&self) -> Result<String, MinterError> {
        self.change_calls.fetch_add(1, Ordering::SeqCst);
        Ok(SAMPLE_ADDRESS.to_string())
    }

    async fn sign_tx(&self, tx_hex: &str, _partial_sign: bool) -> Result<String, MinterError> {
        self.sign_calls.fetch_add(1, Ordering::SeqCst);
        if self.reject_signing {
            return Err(MinterError::Signing("user declined to sign".to_string()));
        }
        let tx = clib::Transaction::from_bytes(hex::decode(tx_hex)?)?;
        let key = ccrypto::PrivateKey::from_normal_bytes(&[7u8; 32])?;
        let mut vkeys = ccrypto::Vkeywitnesses::new();
        vkeys.add(&cutils::make_vkey_witness(
            &cutils::hash_transaction(&tx.body()),
            &key,
        ));
        let mut witness = clib::TransactionWitnessSet::new();
        witness.set_vkeys(&vkeys);
        Ok(hex::encode(witness.to_bytes()))
    }
}

/// Serves default protocol parameters and counts requests
#[derive(Clone, Default)]
pub struct FakeProvider {
    calls: Arc<AtomicUsize>,
}

impl FakeProvider {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainProvider for FakeProvider {
    async fn protocol_parameters(&self) -> Result<ProtocolParameters, MinterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ProtocolParameters::default())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        if let Ok(mut m) = self.messages.lock() {
            m.push(message.to_string());
        }
    }
}
