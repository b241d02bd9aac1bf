/*
#################################################################################
# See LICENSE.md for full license information.                                  #
# Software: Drasil Blockchain Application Framework                             #
# License: Drasil Source Available License v1.0                                 #
# Licensors: Torben Poguntke (torben@drasil.io) & Zak Bassey (zak@drasil.io)    #
#################################################################################
*/
use crate::error::MinterError;

pub const ENV_BLOCKFROST_API_KEY: &str = "BLOCKFROST_API_KEY";
pub const ENV_BLOCKFROST_API_VERSION: &str = "BLOCKFROST_API_VERSION";
pub const ENV_MINT_ASSET_NAME: &str = "MINT_ASSET_NAME";
pub const ENV_MINT_QUANTITY: &str = "MINT_QUANTITY";
pub const ENV_MINT_REQUIRED_LOVELACE: &str = "MINT_REQUIRED_LOVELACE";
pub const ENV_MINT_OUTPUT_LOVELACE: &str = "MINT_OUTPUT_LOVELACE";

/// What a single mint attempt creates and how much it asks the wallet for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintParams {
    pub asset_name: String,
    pub quantity: i64,
    /// lovelace the wallet has to select utxos for
    pub required_lovelace: u64,
    /// lovelace sent along with the minted token
    pub output_lovelace: u64,
}

impl Default for MintParams {
    fn default() -> Self {
        MintParams {
            asset_name: "TEST".to_string(),
            quantity: 1,
            required_lovelace: 5_000_000,
            output_lovelace: 2_000_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinterConfig {
    pub blockfrost_api_key: Option<String>,
    pub blockfrost_version: u8,
    pub mint: MintParams,
}

impl MinterConfig {
    pub fn new(blockfrost_api_key: Option<String>) -> Self {
        MinterConfig {
            blockfrost_api_key: blockfrost_api_key.filter(|k| !k.is_empty()),
            blockfrost_version: 0,
            mint: MintParams::default(),
        }
    }

    /// Reads `.env` and the process environment. A missing API key is not an
    /// error here, the minter reports it when a mint is attempted.
    pub fn from_env() -> Result<Self, MinterError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, MinterError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = MinterConfig::new(lookup(ENV_BLOCKFROST_API_KEY));
        if let Some(v) = lookup(ENV_BLOCKFROST_API_VERSION) {
            config.blockfrost_version = v.parse::<u8>()?;
        }
        if let Some(name) = lookup(ENV_MINT_ASSET_NAME) {
            config.mint.asset_name = name;
        }
        if let Some(q) = lookup(ENV_MINT_QUANTITY) {
            config.mint.quantity = q.parse::<i64>()?;
        }
        if let Some(l) = lookup(ENV_MINT_REQUIRED_LOVELACE) {
            config.mint.required_lovelace = l.parse::<u64>()?;
        }
        if let Some(l) = lookup(ENV_MINT_OUTPUT_LOVELACE) {
            config.mint.output_lovelace = l.parse::<u64>()?;
        }
        Ok(config)
    }
}
