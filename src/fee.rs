use bitcoin::{Amount, SignedAmount};

use crate::exec::RpcExecutor;
use crate::fetch::Fetcher;
use crate::rpc::Transaction;

/// Fee paid by a transaction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeeSummary {
    /// Absolute fee
    pub fee: SignedAmount,
    /// Fee rate (sat/vb)
    pub feerate: f64,
}

/// Computes the fee of `tx` by resolving the value of every prevout.
///
/// Returns `None` if any prevout can't be resolved or if the inputs carry no value,
/// as is the case for a coinbase.
pub fn compute_fee<E: RpcExecutor>(fetcher: &Fetcher<E>, tx: &Transaction) -> Option<FeeSummary> {
    let mut input_value = Amount::ZERO;
    for (txid, vout) in tx.vin.iter().filter_map(|txin| txin.prevout()) {
        let value = fetcher.fetch_prev_output_value(&txid, vout)?;
        input_value += value;
    }
    if input_value == Amount::ZERO {
        return None;
    }

    let fee_sat = input_value.to_sat() as i64 - tx.output_value().to_sat() as i64;
    // vsize is never zero for a real tx
    let feerate = fee_sat as f64 / tx.vsize.max(1) as f64;

    Some(FeeSummary {
        fee: SignedAmount::from_sat(fee_sat),
        feerate,
    })
}
