//! Json types returned by `bitcoin-cli`.
//!
//! Only the fields the report needs are modeled, anything else is ignored.

use bitcoin::{Amount, Txid};
use serde::Deserialize;

/// Max sequence. Inputs at this value do not signal replaceability.
pub const SEQUENCE_FINAL: u32 = 0xFFFF_FFFF;

/// Result of `getrawtransaction <txid> 1`
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Transaction {
    pub txid: Txid,
    pub version: i32,
    pub size: u64,
    pub vsize: u64,
    pub weight: u64,
    pub locktime: u32,
    pub vin: Vec<Input>,
    pub vout: Vec<Output>,
}

impl Transaction {
    /// Whether any input signals replace-by-fee
    pub fn signals_rbf(&self) -> bool {
        self.vin.iter().any(|txin| txin.sequence < SEQUENCE_FINAL)
    }

    /// Sum of all output values
    pub fn output_value(&self) -> Amount {
        self.vout.iter().map(|txo| txo.value).sum()
    }
}

/// Transaction input
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Input {
    /// Previous txid, missing for a coinbase input
    pub txid: Option<Txid>,
    /// Previous output index, missing for a coinbase input
    pub vout: Option<u32>,
    #[serde(rename = "scriptSig")]
    pub script_sig: Option<ScriptSig>,
    pub sequence: u32,
}

impl Input {
    /// The outpoint this input spends, if any
    pub fn prevout(&self) -> Option<(Txid, u32)> {
        Some((self.txid?, self.vout?))
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ScriptSig {
    pub asm: String,
}

/// Transaction output
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Output {
    #[serde(with = "bitcoin::amount::serde::as_btc")]
    pub value: Amount,
    #[serde(rename = "scriptPubKey")]
    pub script_pubkey: ScriptPubKey,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ScriptPubKey {
    pub asm: String,
    /// Script type label, e.g. `witness_v0_keyhash`
    #[serde(rename = "type")]
    pub type_: String,
    pub address: Option<String>,
}

/// Result of `decodescript <hex>`
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct DecodedScript {
    pub asm: String,
}
