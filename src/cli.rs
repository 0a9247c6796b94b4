use clap::{Parser, Subcommand};

use txinspect::exec::{RemoteConfig, DEFAULT_CLI_PATH, DEFAULT_HOST};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Txid of the transaction to analyze
    pub txid: Option<String>,
    /// Don't print the report, log a json summary instead (shown with RUST_LOG=info)
    #[clap(long, short = 'q')]
    pub quiet: bool,
    #[clap(flatten)]
    pub remote: Remote,
    #[clap(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Clone)]
pub enum Cmd {
    /// Decode bitcoin script hex with the node and look for opcodes
    Script {
        #[clap(required = true)]
        hex: String,
    },
}

/// How to reach the node
#[derive(Parser, Clone)]
pub struct Remote {
    /// ssh destination of the node
    #[clap(long, env = "TXINSPECT_HOST", default_value = DEFAULT_HOST, global = true)]
    pub host: String,
    /// Path to bitcoin-cli on the node
    #[clap(long, env = "TXINSPECT_CLI_PATH", default_value = DEFAULT_CLI_PATH, global = true)]
    pub cli_path: String,
    /// Chain (main, test, signet, regtest) passed to bitcoin-cli [default: bitcoin-cli's own]
    #[clap(long, global = true)]
    pub chain: Option<String>,
    /// Run bitcoin-cli on this machine instead of over ssh
    #[clap(long, global = true)]
    pub local: bool,
}

impl From<Remote> for RemoteConfig {
    fn from(remote: Remote) -> Self {
        Self {
            host: if remote.local { None } else { Some(remote.host) },
            cli_path: remote.cli_path,
            chain: remote.chain,
        }
    }
}
