/*
#################################################################################
# See LICENSE.md for full license information.                                  #
# Software: Drasil Blockchain Application Framework                             #
# License: Drasil Source Available License v1.0                                 #
# Licensors: Torben Poguntke (torben@drasil.io) & Zak Bassey (zak@drasil.io)    #
#################################################################################
*/
use crate::cardano::pparams::ProtocolParameters;
use crate::error::MinterError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Chain data the minter needs beyond what the wallet provides
#[async_trait]
pub trait ChainProvider: Send + Sync {
    async fn protocol_parameters(&self) -> Result<ProtocolParameters, MinterError>;
}

const BLOCKFROST_HOST: &str = "blockfrost.io";

#[derive(Debug, Clone)]
pub struct BlockfrostProvider {
    client: reqwest::Client,
    project_id: String,
    version: u8,
}

impl BlockfrostProvider {
    pub fn new(project_id: &str, version: u8) -> BlockfrostProvider {
        BlockfrostProvider {
            client: reqwest::Client::new(),
            project_id: project_id.to_string(),
            version,
        }
    }

    /// The network (`mainnet`, `preprod`, `preview`) is the prefix of the
    /// project id, Blockfrost issues keys per network. A key without such a
    /// prefix fails on the first request.
    pub fn base_url(&self) -> Result<String, MinterError> {
        let network = self
            .project_id
            .get(..7)
            .filter(|n| n.chars().all(|c| c.is_ascii_lowercase()))
            .ok_or_else(|| {
                MinterError::MissingConfiguration("malformed blockfrost project id".to_string())
            })?;
        Ok(format!(
            "https://cardano-{network}.{BLOCKFROST_HOST}/api/v{}",
            self.version
        ))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, MinterError> {
        let url = format!("{}/{}", self.base_url()?, path);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .header("project_id", &self.project_id)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Blockfrost request {} failed: {} {}", path, status, body);
            return Err(MinterError::Provider(format!(
                "blockfrost returned {status} for {path}"
            )));
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ChainProvider for BlockfrostProvider {
    async fn protocol_parameters(&self) -> Result<ProtocolParameters, MinterError> {
        self.get("epochs/latest/parameters").await
    }
}
