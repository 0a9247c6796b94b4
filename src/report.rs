//! Markdown report of a transaction.

use std::fmt::Write;

use crate::fee::FeeSummary;
use crate::rpc::Transaction;
use crate::script::extract_opcodes;

/// Number of chars kept on each side of a truncated identifier
const TRUNCATE_KEEP: usize = 7;

/// Number of leading script asm chars shown in a table row
const SCRIPT_PREVIEW_LEN: usize = 15;

/// Builds the report for `tx`. `fee` is `None` when the fee is unknown.
pub fn build_report(tx: &Transaction, fee: Option<&FeeSummary>) -> String {
    let mut report = String::new();

    // writing to a String can't fail
    let _ = write_report(&mut report, tx, fee);

    report
}

fn write_report(w: &mut String, tx: &Transaction, fee: Option<&FeeSummary>) -> std::fmt::Result {
    writeln!(w, "### Bitcoin Transaction Analysis")?;
    writeln!(w, "TXID: {}", tx.txid)?;
    writeln!(w, "Version: {}", tx.version)?;
    writeln!(w, "Size: {} bytes", tx.size)?;
    writeln!(w, "vSize: {} vbytes", tx.vsize)?;
    writeln!(w, "Weight: {} weight units", tx.weight)?;
    writeln!(w, "Locktime: {}", tx.locktime)?;
    writeln!(w, "Inputs: {} | Outputs: {}", tx.vin.len(), tx.vout.len())?;

    if tx.signals_rbf() {
        writeln!(w, "🚀 **RBF Enabled**")?;
    } else {
        writeln!(w, "🚫 **RBF Disabled**")?;
    }

    match fee {
        Some(fee) => {
            writeln!(w, "Fee: {:.8} BTC", fee.fee.to_btc())?;
            writeln!(w, "Sats per vByte: {:.2} sat/vByte", fee.feerate)?;
        }
        None => writeln!(w, "Fee: Unknown (input amounts missing)")?,
    }

    writeln!(w, "\n---")?;
    writeln!(
        w,
        "| #  | Spent TXID | Output Index | Sequence | Decoded ScriptSig | OP Codes |"
    )?;
    writeln!(
        w,
        "|----|----------------|--------------|----------|------------------|--------------|"
    )?;
    for (i, txin) in tx.vin.iter().enumerate() {
        let spent_txid = match txin.txid {
            Some(txid) => truncate_middle(&txid.to_string()),
            None => truncate_middle("Coinbase"),
        };
        let vout = txin
            .vout
            .map_or_else(|| String::from("N/A"), |vout| vout.to_string());
        let script_sig = txin.script_sig.as_ref().map_or("N/A", |s| s.asm.as_str());
        writeln!(
            w,
            "| {}  | {} | {} | {} | {}... | {} |",
            i + 1,
            spent_txid,
            vout,
            txin.sequence,
            preview(script_sig),
            extract_opcodes(script_sig),
        )?;
    }

    writeln!(w, "\n---")?;
    writeln!(
        w,
        "| #  | BTC Value | Script Type | Address | Decoded ScriptPubKey | OP Codes |"
    )?;
    write!(
        w,
        "|----|---------------|--------------------|---------|---------------------|--------------|"
    )?;
    for (i, txo) in tx.vout.iter().enumerate() {
        let spk = &txo.script_pubkey;
        let address = truncate_middle(spk.address.as_deref().unwrap_or("N/A"));
        write!(
            w,
            "\n| {}  | {:.8} BTC | {} | {} | {}... | {} |",
            i + 1,
            txo.value.to_btc(),
            spk.type_,
            address,
            preview(&spk.asm),
            extract_opcodes(&spk.asm),
        )?;
    }

    Ok(())
}

/// Keeps the first and last 7 chars of `s` joined by "...". Short strings are not
/// spared, "N/A" becomes "N/A...N/A".
pub fn truncate_middle(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let head: String = chars.iter().take(TRUNCATE_KEEP).collect();
    let tail: String = chars[chars.len().saturating_sub(TRUNCATE_KEEP)..]
        .iter()
        .collect();
    format!("{head}...{tail}")
}

/// First chars of a script asm
fn preview(asm: &str) -> String {
    asm.chars().take(SCRIPT_PREVIEW_LEN).collect()
}
