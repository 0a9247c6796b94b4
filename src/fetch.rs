//! Fetching transactions and decoding scripts through the node.

use bitcoin::{Amount, ScriptBuf, Txid};

use super::*;
use crate::error::Error;
use crate::exec::RpcExecutor;
use crate::rpc::{DecodedScript, Transaction};

/// Shown in place of a script the node could not decode
pub const UNDECODED_SCRIPT: &str = "Could not decode script";

/// Reads transaction data from a node
#[derive(Debug)]
pub struct Fetcher<E> {
    exec: E,
}

impl<E: RpcExecutor> Fetcher<E> {
    pub fn new(exec: E) -> Self {
        Self { exec }
    }

    /// Returns a reference to the executor
    pub fn executor(&self) -> &E {
        &self.exec
    }

    /// Fetches a decoded transaction.
    ///
    /// ## Errors
    ///
    /// If `txid` is malformed, the request fails, or the response is not a transaction
    pub fn fetch_transaction(&self, txid: &str) -> Result<Transaction> {
        let txid: Txid = txid
            .parse()
            .map_err(|_| Error::InvalidTxid(txid.to_string()))?;
        self.get_transaction(&txid)
    }

    fn get_transaction(&self, txid: &Txid) -> Result<Transaction> {
        let txid = txid.to_string();
        let res = self.exec.invoke(&["getrawtransaction", &txid, "1"])?;
        Ok(serde_json::from_str(&res)?)
    }

    /// Returns the value of output `vout` of transaction `txid`, or `None` if it can't be
    /// resolved, e.g. the node is pruned or has no txindex.
    pub fn fetch_prev_output_value(&self, txid: &Txid, vout: u32) -> Option<Amount> {
        let tx = match self.get_transaction(txid) {
            Ok(tx) => tx,
            Err(e) => {
                log::debug!("prevout {txid}:{vout} not available: {e}");
                return None;
            }
        };
        let value = tx.vout.get(vout as usize).map(|txo| txo.value);
        if value.is_none() {
            log::debug!("prevout {txid}:{vout} out of range");
        }
        value
    }

    /// Decodes a hex-encoded script into its asm representation.
    /// This never fails, instead returning a placeholder string.
    pub fn decode_script(&self, script_hex: &str) -> String {
        if script_hex.is_empty() {
            return String::from("N/A");
        }
        match self.try_decode_script(script_hex) {
            Ok(asm) => asm,
            Err(e) => {
                log::debug!("decodescript: {e}");
                UNDECODED_SCRIPT.to_string()
            }
        }
    }

    fn try_decode_script(&self, script_hex: &str) -> Result<String> {
        ScriptBuf::from_hex(script_hex).map_err(|_| Error::InvalidScript(script_hex.to_string()))?;
        let res = self.exec.invoke(&["decodescript", script_hex])?;
        let script: DecodedScript = serde_json::from_str(&res)?;
        Ok(script.asm)
    }
}
