/*
#################################################################################
# See LICENSE.md for full license information.                                  #
# Software: Drasil Blockchain Application Framework                             #
# License: Drasil Source Available License v1.0                                 #
# Licensors: Torben Poguntke (torben@drasil.io) & Zak Bassey (zak@drasil.io)    #
#################################################################################
*/
pub mod pparams;
pub mod supporting_functions;
pub mod wallet;

pub use supporting_functions::*;

use cryptoxide::{blake2b::Blake2b, digest::Digest};

pub const DUMMY_VKEYWITNESS: &str = "8258203818ad60f55faef4576ff88e9e7e1148fcb11d602ffa19def6e9c44b420fdaa25840751a9f1c01cf068e8b0becf3122832d13f8fc1dff74a43059b815e949442ad6b60c6a67d4b39e4a3271064665418960731280d0ef7ae5a471a98021cae074001";

/// Namespace byte prepended to a serialized native script before hashing it
pub const NATIVE_SCRIPT_TAG: u8 = 0x00;

pub fn blake2b224(data: &[u8]) -> [u8; 28] {
    let mut out = [0u8; 28];
    let mut context = Blake2b::new(28);
    context.input(data);
    context.result(&mut out);
    out
}

pub fn blake2b160(data: &[u8]) -> [u8; 20] {
    let mut out = [0u8; 20];
    let mut context = Blake2b::new(20);
    context.input(data);
    context.result(&mut out);
    out
}

#[cfg(test)]
mod tests {
    #[test]
    fn blake2b_output_lengths() {
        assert_eq!(super::blake2b224(b"drasil").len(), 28);
        assert_eq!(super::blake2b160(b"drasil").len(), 20);
        assert_ne!(super::blake2b224(b"a"), super::blake2b224(b"b"));
    }

    #[test]
    fn blake2b224_empty_input() {
        assert_eq!(
            hex::encode(super::blake2b224(&[])),
            "836cc68931c2e4e3e838602eca1902591d216837bafddfe6f0c8cb07"
        );
    }
}
