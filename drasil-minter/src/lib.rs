/*
#################################################################################
# See LICENSE.md for full license information.                                  #
# Software: Drasil Blockchain Application Framework                             #
# License: Drasil Source Available License v1.0                                 #
# Licensors: Torben Poguntke (torben@drasil.io) & Zak Bassey (zak@drasil.io)    #
#################################################################################
*/
pub mod cardano;
pub mod config;
pub mod error;
pub mod flow;
pub mod policy;
pub mod provider;
pub mod txbuilder;

#[cfg(test)]
pub(crate) mod testing;

pub use cardano::pparams;
pub use cardano::wallet;
pub use config::{MintParams, MinterConfig};
pub use error::MinterError;
pub use flow::{LogNotifier, MintOutcome, Minter, Notifier};
pub use policy::*;
pub use provider::{BlockfrostProvider, ChainProvider};
pub use txbuilder::*;

pub use cardano_serialization_lib as clib;

extern crate pretty_env_logger;
#[macro_use]
extern crate log;
