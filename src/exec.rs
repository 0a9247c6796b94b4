//! Running `bitcoin-cli` requests, locally or on a remote host over `ssh`.

use std::process::Command;

use super::*;
use crate::error::Error;

/// Default ssh destination
pub const DEFAULT_HOST: &str = "hodlr";

/// Default location of `bitcoin-cli` on the node
pub const DEFAULT_CLI_PATH: &str = "/snap/bitcoin-core/current/bin/bitcoin-cli";

/// Trait for types that can run a single `bitcoin-cli` request, e.g.
/// `["getrawtransaction", txid, "1"]`, and return what it printed to stdout.
///
/// A request that exits unsuccessfully must return an error.
pub trait RpcExecutor {
    fn invoke(&self, args: &[&str]) -> Result<String>;
}

/// Where and how to reach the node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    /// ssh destination. `None` runs `bitcoin-cli` on this machine.
    pub host: Option<String>,
    /// Path to `bitcoin-cli`
    pub cli_path: String,
    /// Passed to `bitcoin-cli` as `-chain=<chain>`
    pub chain: Option<String>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: Some(DEFAULT_HOST.to_string()),
            cli_path: DEFAULT_CLI_PATH.to_string(),
            chain: None,
        }
    }
}

/// Executes requests by spawning `bitcoin-cli`, wrapped in `ssh` when a host is configured
#[derive(Debug, Clone)]
pub struct BitcoinCli {
    config: RemoteConfig,
}

impl BitcoinCli {
    pub fn new(config: RemoteConfig) -> Self {
        Self { config }
    }

    /// Returns the program and argument vector used to run `args`.
    ///
    /// `ssh` joins the remote command into a single line for the remote shell,
    /// so in that case every remote word is single-quoted.
    pub fn command_line(&self, args: &[&str]) -> (String, Vec<String>) {
        let mut cli_args = Vec::with_capacity(args.len() + 1);
        if let Some(chain) = &self.config.chain {
            cli_args.push(format!("-chain={chain}"));
        }
        cli_args.extend(args.iter().map(|s| s.to_string()));

        match &self.config.host {
            Some(host) => {
                let mut argv = vec![
                    "-x".to_string(),
                    "--".to_string(),
                    host.clone(),
                    quote(&self.config.cli_path),
                ];
                argv.extend(cli_args.iter().map(|s| quote(s)));
                ("ssh".to_string(), argv)
            }
            None => (self.config.cli_path.clone(), cli_args),
        }
    }
}

impl RpcExecutor for BitcoinCli {
    fn invoke(&self, args: &[&str]) -> Result<String> {
        let (prog, argv) = self.command_line(args);
        log::debug!("{prog} {}", argv.join(" "));

        let output = Command::new(&prog).args(&argv).output()?;
        if !output.status.success() {
            return Err(Error::Remote {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Quotes a word for a POSIX shell
fn quote(word: &str) -> String {
    let mut s = String::with_capacity(word.len() + 2);
    s.push('\'');
    for c in word.chars() {
        if c == '\'' {
            s.push_str(r"'\''");
        } else {
            s.push(c);
        }
    }
    s.push('\'');
    s
}
