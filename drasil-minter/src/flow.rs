/*
#################################################################################
# See LICENSE.md for full license information.                                  #
# Software: Drasil Blockchain Application Framework                             #
# License: Drasil Source Available License v1.0                                 #
# Licensors: Torben Poguntke (torben@drasil.io) & Zak Bassey (zak@drasil.io)    #
#################################################################################
*/
use crate::cardano::wallet::{
    decode_addr, payment_key_hash, transaction_unspent_outputs_from_string_vec, Cip30Wallet,
};
use crate::config::{MintParams, MinterConfig};
use crate::error::MinterError;
use crate::policy::{build_single_sig_policy, encode_asset_name, AssetName, PolicyId};
use crate::provider::{BlockfrostProvider, ChainProvider};
use crate::txbuilder::{sign_transaction, FinalizedTx, MintInstruction, SignedTx, TxDraft};
use cardano_serialization_lib::utils as cutils;

pub const MSG_CONNECT_WALLET: &str = "Please connect your wallet";
pub const MSG_SETUP_ENVIRONMENT: &str = "Please set up environment variables";
pub const MSG_UTXO_SELECTION_FAILED: &str =
    "Utxo selection failed, either wallet has insufficient funds, or something went wrong";

/// User facing channel for failures
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        warn!("{}", message);
    }
}

#[derive(Debug, Clone)]
pub struct MintOutcome {
    pub policy_id: PolicyId,
    pub asset_name: AssetName,
    pub fingerprint: String,
    pub signed: SignedTx,
}

/// Runs one mint attempt end to end: checks preconditions, lets the wallet
/// select utxos, builds the policy and the transaction and asks the wallet
/// to sign. Every failure is reported once through the notifier and ends
/// the attempt.
pub struct Minter<P, N> {
    provider: Option<P>,
    params: MintParams,
    notifier: N,
}

impl<N: Notifier> Minter<BlockfrostProvider, N> {
    pub fn from_config(config: &MinterConfig, notifier: N) -> Self {
        let provider = config
            .blockfrost_api_key
            .as_ref()
            .map(|key| BlockfrostProvider::new(key, config.blockfrost_version));
        Minter::new(provider, config.mint.clone(), notifier)
    }
}

impl<P: ChainProvider, N: Notifier> Minter<P, N> {
    /// `provider` is `None` when no API credential is configured
    pub fn new(provider: Option<P>, params: MintParams, notifier: N) -> Self {
        Minter {
            provider,
            params,
            notifier,
        }
    }

    pub fn params(&self) -> &MintParams {
        &self.params
    }

    fn abort(&self, message: &str, err: MinterError) -> MinterError {
        self.notifier.notify(message);
        err
    }

    pub async fn mint<W: Cip30Wallet + ?Sized>(
        &self,
        wallet: Option<&W>,
    ) -> Result<MintOutcome, MinterError> {
        let wallet = match wallet {
            Some(w) => w,
            None => return Err(self.abort(MSG_CONNECT_WALLET, MinterError::WalletNotConnected)),
        };
        let provider = match &self.provider {
            Some(p) => p,
            None => {
                return Err(self.abort(
                    MSG_SETUP_ENVIRONMENT,
                    MinterError::MissingConfiguration(
                        crate::config::ENV_BLOCKFROST_API_KEY.to_string(),
                    ),
                ))
            }
        };

        let target = cutils::Value::new(&cutils::to_bignum(self.params.required_lovelace));
        let utxos = match wallet.get_utxos(&target).await {
            Ok(Some(utxos)) if !utxos.is_empty() => utxos,
            Ok(_) => {
                return Err(self.abort(
                    MSG_UTXO_SELECTION_FAILED,
                    MinterError::UtxoSelectionFailed(self.params.required_lovelace),
                ))
            }
            Err(e) => {
                error!("Utxo selection: {}", e);
                return Err(self.abort(
                    MSG_UTXO_SELECTION_FAILED,
                    MinterError::UtxoSelectionFailed(self.params.required_lovelace),
                ));
            }
        };
        info!("Wallet selected {} utxos", utxos.len());

        let (tx, mint) = match self.build(wallet, provider, &utxos).await {
            Ok(built) => built,
            Err(e @ MinterError::MissingConfiguration(_)) => {
                error!("Transaction building failed: {}", e);
                return Err(self.abort(MSG_SETUP_ENVIRONMENT, e));
            }
            Err(e) => {
                error!("Transaction building failed: {}", e);
                return Err(self.abort(&format!("Transaction building failed: {e}"), e));
            }
        };

        let signed = match sign_transaction(wallet, &tx).await {
            Ok(signed) => signed,
            Err(e) => {
                error!("{}", e);
                return Err(self.abort(&format!("Signing failed: {e}"), e));
            }
        };
        info!("Signed transaction: {}", signed.to_hex());

        Ok(MintOutcome {
            policy_id: *mint.policy_id(),
            asset_name: mint.asset_name().clone(),
            fingerprint: mint.fingerprint()?,
            signed,
        })
    }

    async fn build<W: Cip30Wallet + ?Sized>(
        &self,
        wallet: &W,
        provider: &P,
        utxos: &[String],
    ) -> Result<(FinalizedTx, MintInstruction), MinterError> {
        let mut draft = TxDraft::new();
        for utxo in transaction_unspent_outputs_from_string_vec(utxos)? {
            draft = draft.add_input(utxo);
        }

        let change_address = decode_addr(&wallet.get_change_address().await?)?;
        let key_hash = payment_key_hash(&change_address)?;
        let policy = build_single_sig_policy(&key_hash.to_bytes())?;
        let policy_id = policy.policy_id()?;
        info!("Policy id: {}", policy_id);

        let mint = MintInstruction::new(
            policy_id,
            encode_asset_name(&self.params.asset_name)?,
            self.params.quantity,
        )?;

        let pparams = provider.protocol_parameters().await?;
        let tx = draft
            .add_output(
                &change_address,
                &cutils::Value::new(&cutils::to_bignum(self.params.output_lovelace)),
            )
            .add_mint(mint.clone())
            .add_minting_script(policy)
            .change_address(&change_address)
            .finalize(&pparams)?;
        Ok((tx, mint))
    }
}
