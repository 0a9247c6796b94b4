use anyhow::Result;
use serde::Serialize;

use txinspect::rpc::Transaction;
use txinspect::script::{detect_multisig, extract_opcodes};
use txinspect::{FeeSummary, Fetcher, RpcExecutor};

/// Format for logging the summary json in quiet mode
#[derive(Debug, Serialize)]
struct TxSummary {
    txid: String,
    /// Fee in btc, `None` if unknown
    fee: Option<f64>,
    /// sat/vb
    feerate: Option<f64>,
    rbf: bool,
}

impl TxSummary {
    fn new(tx: &Transaction, fee: Option<&FeeSummary>) -> Self {
        Self {
            txid: tx.txid.to_string(),
            fee: fee.map(|f| f.fee.to_btc()),
            feerate: fee.map(|f| (f.feerate * 100.0).round() / 100.0),
            rbf: tx.signals_rbf(),
        }
    }
}

/// Print the analysis report for `txid`
pub fn tx<E: RpcExecutor>(fetcher: &Fetcher<E>, txid: &str, quiet: bool) -> Result<()> {
    let (tx, fee, report) = txinspect::analyze(fetcher, txid)?;

    if quiet {
        let summary = TxSummary::new(&tx, fee.as_ref());
        log::info!("{}", serde_json::to_string(&summary)?);
        return Ok(());
    }

    println!("{report}");
    Ok(())
}

/// Decode bitcoin script hex and print its asm, opcodes and multisig type
pub fn script<E: RpcExecutor>(fetcher: &Fetcher<E>, hex: &str) -> Result<()> {
    let asm = fetcher.decode_script(hex);
    println!("{asm}");
    println!("{}", extract_opcodes(&asm));
    println!("{}", detect_multisig(&asm));
    Ok(())
}
