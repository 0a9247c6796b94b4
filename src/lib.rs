use std::cell::RefCell;

use serde_json::json;

pub use {
    // export globals
    error::Result,
    exec::{BitcoinCli, RemoteConfig, RpcExecutor},
    fee::{compute_fee, FeeSummary},
    fetch::Fetcher,
    report::build_report,
    std::collections::HashMap,
};

pub mod error;
pub mod exec;
pub mod fee;
pub mod fetch;
pub mod report;
pub mod rpc;
pub mod script;

/// Fetches `txid`, resolves its fee, and returns the report along with the parsed tx and fee.
///
/// ## Errors
///
/// if the transaction itself can't be fetched. Unresolved prevouts only make the fee unknown.
pub fn analyze<E: RpcExecutor>(
    fetcher: &Fetcher<E>,
    txid: &str,
) -> Result<(rpc::Transaction, Option<FeeSummary>, String)> {
    let tx = fetcher.fetch_transaction(txid)?;
    let fee = compute_fee(fetcher, &tx);
    let report = build_report(&tx, fee.as_ref());
    Ok((tx, fee, report))
}

/// An in-memory node answering `getrawtransaction` and `decodescript` from canned responses.
/// Every request is recorded.
#[derive(Debug, Default)]
pub struct TestNode {
    responses: HashMap<Vec<String>, String>,
    requests: RefCell<Vec<Vec<String>>>,
}

impl TestNode {
    /// Adds a tx with no inputs and one output for each of `values` (btc)
    pub fn add_tx(&mut self, txid: &str, values: &[f64]) {
        self.insert_raw(txid, &test_tx_json(txid, &[], values, 110));
    }

    /// Adds a tx spending each `(txid, vout, sequence)` of `inputs`
    pub fn add_spend(&mut self, txid: &str, inputs: &[(&str, u32, u32)], values: &[f64], vsize: u64) {
        self.insert_raw(txid, &test_tx_json(txid, inputs, values, vsize));
    }

    /// Sets the raw `getrawtransaction` response for `txid`
    pub fn insert_raw(&mut self, txid: &str, response: &str) {
        let req = vec!["getrawtransaction".to_string(), txid.to_string(), "1".to_string()];
        self.responses.insert(req, response.to_string());
    }

    /// Sets the `decodescript` response for `hex`
    pub fn add_script(&mut self, hex: &str, asm: &str) {
        let req = vec!["decodescript".to_string(), hex.to_string()];
        self.responses.insert(req, json!({ "asm": asm }).to_string());
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<Vec<String>> {
        self.requests.borrow().clone()
    }
}

impl RpcExecutor for TestNode {
    fn invoke(&self, args: &[&str]) -> Result<String> {
        let req: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        self.requests.borrow_mut().push(req.clone());
        self.responses
            .get(&req)
            .cloned()
            .ok_or_else(|| error::Error::Remote {
                code: Some(5),
                stderr: String::from(
                    "error code: -5\nerror message:\nNo such mempool or blockchain transaction.",
                ),
            })
    }
}

/// Builds `getrawtransaction` json for a tx spending `inputs` given as `(txid, vout, sequence)`.
/// Every output pays the same p2wpkh address.
pub fn test_tx_json(txid: &str, inputs: &[(&str, u32, u32)], values: &[f64], vsize: u64) -> String {
    let vin: Vec<_> = inputs
        .iter()
        .map(|(prev, vout, sequence)| {
            json!({
                "txid": prev,
                "vout": vout,
                "scriptSig": { "asm": "", "hex": "" },
                "txinwitness": [
                    "3044022025e2158ec5dc5cdf5dcf766a583ac9784ce4c37de3b59f9d61933498c8df38190220350d93d1cd07af15e17dcd90cc1cee61948bb3907dbd15b9f75dfd4ea4b4825d01",
                    "02e1798b4c71209f4ab7f63b348335459313a2b23127e26cf3e8b62082f1897086"
                ],
                "sequence": sequence,
            })
        })
        .collect();
    let vout: Vec<_> = values
        .iter()
        .enumerate()
        .map(|(n, value)| {
            json!({
                "value": value,
                "n": n,
                "scriptPubKey": {
                    "asm": "0 633bf3c375206e357ff31754be6c4a858733571f",
                    "desc": "addr(tb1qvvalx7m4yphr2llnza2tumz2skrnx4clhxmt0t)#8xkyyq8w",
                    "hex": "0014633bf3c375206e357ff31754be6c4a858733571f",
                    "address": "tb1qvvalx7m4yphr2llnza2tumz2skrnx4clhxmt0t",
                    "type": "witness_v0_keyhash"
                }
            })
        })
        .collect();
    json!({
        "txid": txid,
        "hash": txid,
        "version": 2,
        "size": 222,
        "vsize": vsize,
        "weight": vsize * 4,
        "locktime": 0,
        "vin": vin,
        "vout": vout,
    })
    .to_string()
}
