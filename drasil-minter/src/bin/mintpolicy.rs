/*
#################################################################################
# See LICENSE.md for full license information.                                  #
# Software: Drasil Blockchain Application Framework                             #
# License: Drasil Source Available License v1.0                                 #
# Licensors: Torben Poguntke (torben@drasil.io) & Zak Bassey (zak@drasil.io)    #
#################################################################################
*/
use drasil_minter::wallet::{decode_addr, payment_key_hash};
use drasil_minter::*;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "drasil-mintpolicy",
    about = "Derives a single signature minting policy and its asset identifiers"
)]
struct Opt {
    #[structopt(
        short,
        long,
        about = "Address (bech32 or hex) whose payment key signs the mint"
    )]
    signer: Option<String>,

    #[structopt(short, long, about = "Hex encoded payment key hash")]
    keyhash: Option<String>,

    #[structopt(long, about = "Hex encoded cbor of an existing policy script")]
    script: Option<String>,

    #[structopt(short, long, default_value = "TEST", about = "Asset name")]
    asset: String,
}

fn main() -> Result<(), MinterError> {
    pretty_env_logger::init();
    let opt = Opt::from_args();

    let policy = match (opt.script, opt.keyhash, opt.signer) {
        (Some(script), _, _) => AssetPolicy::from_hex(&script)?,
        (None, Some(keyhash), _) => build_single_sig_policy(&hex::decode(keyhash)?)?,
        (None, None, Some(signer)) => {
            let kh = payment_key_hash(&decode_addr(&signer)?)?;
            build_single_sig_policy(&kh.to_bytes())?
        }
        (None, None, None) => {
            return Err(MinterError::new(
                "one of --signer, --keyhash or --script is required",
            ))
        }
    };

    let policy_id = policy_identifier(&policy)?;
    let asset_name = encode_asset_name(&opt.asset)?;

    println!("policy id:    {}", policy_id);
    println!("script cbor:  {}", policy.to_hex()?);
    println!("asset name:   {}", asset_name);
    println!("fingerprint:  {}", asset_fingerprint(&policy_id, &asset_name)?);
    Ok(())
}
