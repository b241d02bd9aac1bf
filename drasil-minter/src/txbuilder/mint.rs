/*
#################################################################################
# See LICENSE.md for full license information.                                  #
# Software: Drasil Blockchain Application Framework                             #
# License: Drasil Source Available License v1.0                                 #
# Licensors: Torben Poguntke (torben@drasil.io) & Zak Bassey (zak@drasil.io)    #
#################################################################################
*/
use crate::cardano::asset_amount;
use crate::error::MinterError;
use crate::policy::{asset_fingerprint, AssetName, PolicyId};
use cardano_serialization_lib as clib;
use cardano_serialization_lib::utils as cutils;
use std::collections::BTreeMap;

/// Mints (positive quantity) or burns (negative quantity) one asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintInstruction {
    policy_id: PolicyId,
    asset_name: AssetName,
    quantity: i64,
}

impl MintInstruction {
    pub fn new(
        policy_id: PolicyId,
        asset_name: AssetName,
        quantity: i64,
    ) -> Result<MintInstruction, MinterError> {
        if quantity == 0 {
            return Err(MinterError::ZeroMintQuantity);
        }
        Ok(MintInstruction {
            policy_id,
            asset_name,
            quantity,
        })
    }

    pub fn policy_id(&self) -> &PolicyId {
        &self.policy_id
    }

    pub fn asset_name(&self) -> &AssetName {
        &self.asset_name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn is_burn(&self) -> bool {
        self.quantity < 0
    }

    pub fn fingerprint(&self) -> Result<String, MinterError> {
        asset_fingerprint(&self.policy_id, &self.asset_name)
    }
}

type MintTable = BTreeMap<PolicyId, BTreeMap<AssetName, i64>>;

/// The net quantity per policy and asset, mints and burns of the same asset
/// offset each other
pub(crate) fn aggregate(mints: &[MintInstruction]) -> Result<MintTable, MinterError> {
    let mut table = MintTable::new();
    for m in mints {
        let entry = table
            .entry(m.policy_id)
            .or_default()
            .entry(m.asset_name.clone())
            .or_insert(0);
        *entry = entry
            .checked_add(m.quantity)
            .ok_or_else(|| MinterError::new("mint quantity overflow"))?;
    }
    for assets in table.values_mut() {
        assets.retain(|_, q| *q != 0);
    }
    table.retain(|_, assets| !assets.is_empty());
    Ok(table)
}

pub(crate) fn to_mint(table: &MintTable) -> Result<clib::Mint, MinterError> {
    let mut mint = clib::Mint::new();
    for (policy_id, assets) in table {
        let mut mintassets = clib::MintAssets::new();
        for (name, quantity) in assets {
            let amount = cutils::to_bignum(quantity.unsigned_abs());
            let int = if *quantity < 0 {
                cutils::Int::new_negative(&amount)
            } else {
                cutils::Int::new(&amount)
            };
            mintassets.insert(&name.to_clib()?, int);
        }
        mint.insert(&policy_id.to_clib()?, &mintassets);
    }
    Ok(mint)
}

/// Splits the table into the value created and the value destroyed
pub(crate) fn mint_values(
    table: &MintTable,
) -> Result<(cutils::Value, cutils::Value), MinterError> {
    let mut minted = clib::MultiAsset::new();
    let mut burned = clib::MultiAsset::new();
    for (policy_id, assets) in table {
        let mut mint_assets = clib::Assets::new();
        let mut burn_assets = clib::Assets::new();
        for (name, quantity) in assets {
            let amount = cutils::to_bignum(quantity.unsigned_abs());
            if *quantity < 0 {
                burn_assets.insert(&name.to_clib()?, &amount);
            } else {
                mint_assets.insert(&name.to_clib()?, &amount);
            }
        }
        if mint_assets.len() > 0 {
            minted.insert(&policy_id.to_clib()?, &mint_assets);
        }
        if burn_assets.len() > 0 {
            burned.insert(&policy_id.to_clib()?, &burn_assets);
        }
    }
    let zero = cutils::to_bignum(0);
    let mut minted_value = cutils::Value::new(&zero);
    if minted.len() > 0 {
        minted_value.set_multiasset(&minted);
    }
    let mut burned_value = cutils::Value::new(&zero);
    if burned.len() > 0 {
        burned_value.set_multiasset(&burned);
    }
    Ok((minted_value, burned_value))
}

/// Burns can only destroy tokens the inputs actually carry
pub(crate) fn check_burns_covered(
    table: &MintTable,
    inputs: &cutils::Value,
) -> Result<(), MinterError> {
    for (policy_id, assets) in table {
        for (name, quantity) in assets.iter().filter(|(_, q)| **q < 0) {
            let held = asset_amount(inputs, &policy_id.to_clib()?, &name.to_clib()?);
            if cutils::from_bignum(&held) < quantity.unsigned_abs() {
                return Err(MinterError::InsufficientFunds(format!(
                    "cannot burn {} of {}.{}, inputs hold {}",
                    quantity.unsigned_abs(),
                    policy_id,
                    name,
                    cutils::from_bignum(&held)
                )));
            }
        }
    }
    Ok(())
}
