use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::str::from_utf8;

use txinspect::{analyze, test_tx_json, Fetcher, TestNode};

const PROG: &str = env!("CARGO_BIN_EXE_txinspect");

const TXID: &str = "8d44470e162965e68ef177be00b8d5f4263f6f7ca5af3643b6a749b074f06e73";
const PREV: &str = "55bfbd568a73db4d99fc7705f1160cf36dbed6cd4242b91df059c915966f1b6f";

#[test]
fn report_one_in_two_out() {
    // 0.01 in, 0.0042 + 0.0057 out, fee 0.0001 at 141 vb
    let mut node = TestNode::default();
    node.add_tx(PREV, &[0.5, 0.01]);
    node.add_spend(TXID, &[(PREV, 1, 0xFFFF_FFFD)], &[0.0042, 0.0057], 141);
    let fetcher = Fetcher::new(node);

    let (tx, _, report) = analyze(&fetcher, TXID).unwrap();

    assert!(report.contains("Fee: 0.00010000 BTC"));
    assert!(report.contains("Sats per vByte: 70.92 sat/vByte"));
    assert!(report.contains("🚀 **RBF Enabled**"));
    assert!(report.contains("Inputs: 1 | Outputs: 2"));

    let (inputs, outputs) = report.split_once("\n---\n| #  | BTC Value").unwrap();
    let input_rows = inputs.lines().filter(|l| l.starts_with("| ") && !l.starts_with("| #")).count();
    let output_rows = outputs.lines().filter(|l| l.starts_with("| ")).count();
    assert_eq!(input_rows, tx.vin.len());
    assert_eq!(output_rows, tx.vout.len());
}

#[test]
fn unresolved_prevout_makes_fee_unknown() {
    let other = "09e0b530cb39c33bc7ec93bff68a2f99f974863cf7f75b9cff925fbf7fcd8a67";
    let mut node = TestNode::default();
    node.add_tx(PREV, &[0.01]);
    // `other` was pruned
    node.add_spend(
        TXID,
        &[(PREV, 0, 0xFFFF_FFFF), (other, 3, 0xFFFF_FFFF)],
        &[0.0099],
        200,
    );
    let fetcher = Fetcher::new(node);

    let (_, fee, report) = analyze(&fetcher, TXID).unwrap();
    assert!(fee.is_none());
    assert!(report.contains("Fee: Unknown (input amounts missing)"));
    assert!(!report.contains("Sats per vByte"));
    assert!(report.contains("🚫 **RBF Disabled**"));
}

#[test]
fn missing_txid_prints_usage() {
    let output = Command::new(PROG).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = from_utf8(&output.stderr).unwrap();
    assert!(stderr.contains("Usage:"));
}

#[test]
fn invalid_txid_fails() {
    let output = Command::new(PROG)
        .args(["--local", "--cli-path", "/nonexistent/bitcoin-cli"])
        .arg("not-a-txid")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = from_utf8(&output.stderr).unwrap();
    assert!(stderr.contains("invalid txid"));
}

#[test]
fn unreachable_node_fails() {
    let output = Command::new(PROG)
        .args(["--local", "--cli-path", "/nonexistent/bitcoin-cli", TXID])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn script_decode_failure_is_not_fatal() {
    let output = Command::new(PROG)
        .args(["--local", "--cli-path", "/nonexistent/bitcoin-cli", "script", "5221aa"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = from_utf8(&output.stdout).unwrap();
    assert_eq!(
        stdout,
        "Could not decode script\nNo OP codes found\nNo Multi-Sig\n"
    );
}

/// Writes an executable that answers `getrawtransaction <txid> 1` like bitcoin-cli
#[cfg(unix)]
fn fake_bitcoin_cli(name: &str, responses: &[(&str, String)]) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let mut script = String::from("#!/bin/sh\ncase \"$2\" in\n");
    for (txid, json) in responses {
        script.push_str(&format!("{txid})\ncat <<'EOF'\n{json}\nEOF\n;;\n"));
    }
    script.push_str("*)\necho 'error code: -5' >&2\nexit 5\n;;\nesac\n");

    let path = std::env::temp_dir().join(format!("txinspect-{}-{name}", std::process::id()));
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Runs the binary, retrying if the freshly written stub is still busy (ETXTBSY)
#[cfg(unix)]
fn run(args: &[&str], envs: &[(&str, &str)]) -> Output {
    for _ in 0..10 {
        match Command::new(PROG).args(args).envs(envs.iter().copied()).output() {
            Ok(output) => return output,
            Err(e) if e.raw_os_error() == Some(26) => {
                std::thread::sleep(std::time::Duration::from_millis(50))
            }
            Err(e) => panic!("{e}"),
        }
    }
    panic!("failed to run {PROG}");
}

#[cfg(unix)]
#[test]
fn report_from_cli() {
    let cli = fake_bitcoin_cli(
        "report",
        &[
            (PREV, test_tx_json(PREV, &[], &[0.5, 0.01], 110)),
            (
                TXID,
                test_tx_json(TXID, &[(PREV, 1, 0xFFFF_FFFD)], &[0.0042, 0.0057], 141),
            ),
        ],
    );
    let cli_path = cli.to_str().unwrap();

    let output = run(&["--local", "--cli-path", cli_path, TXID], &[]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = from_utf8(&output.stdout).unwrap();
    assert!(stdout.starts_with("### Bitcoin Transaction Analysis\n"));
    assert!(stdout.contains(&format!("TXID: {TXID}\n")));
    assert!(stdout.contains("Fee: 0.00010000 BTC\n"));
    assert!(stdout.contains("Sats per vByte: 70.92 sat/vByte\n"));

    // quiet mode logs the summary instead
    let output = run(
        &["--local", "--cli-path", cli_path, "-q", TXID],
        &[("RUST_LOG", "info")],
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    let stderr = from_utf8(&output.stderr).unwrap();
    assert!(stderr.contains(r#""fee":0.0001,"feerate":70.92,"rbf":true"#));

    fs::remove_file(cli).unwrap();
}

#[cfg(unix)]
#[test]
fn report_from_cli_with_pruned_prevout() {
    let cli = fake_bitcoin_cli(
        "pruned",
        &[(
            TXID,
            test_tx_json(TXID, &[(PREV, 1, 0xFFFF_FFFF)], &[0.0099], 141),
        )],
    );

    let output = run(&["--local", "--cli-path", cli.to_str().unwrap(), TXID], &[]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = from_utf8(&output.stdout).unwrap();
    assert!(stdout.contains("Fee: Unknown (input amounts missing)\n"));
    assert!(stdout.contains("🚫 **RBF Disabled**"));

    fs::remove_file(cli).unwrap();
}
