#![warn(clippy::all)]
use std::process;

use crate::cli::{Args, Cmd};
use clap::{CommandFactory, Parser};
use txinspect::{BitcoinCli, Fetcher};

mod cli;
mod cmd;

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_timed();
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version go to stdout and are not failures
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    let core = BitcoinCli::new(args.remote.into());
    let fetcher = Fetcher::new(core);

    match (args.cmd, args.txid) {
        (Some(Cmd::Script { hex }), _) => cmd::script(&fetcher, &hex)?,
        (None, Some(txid)) => cmd::tx(&fetcher, &txid, args.quiet)?,
        (None, None) => {
            eprintln!("{}", Args::command().render_usage());
            process::exit(1);
        }
    }
    Ok(())
}
