//! Command line tool for building and inspecting multisig governance actions.
//!
//! Every subcommand prints its result as JSON on stdout. Logs go to stderr.

mod args;
mod logging;
mod util;

use std::process;

use args::Args;
use util::exec_subc;

fn main() {
    let args: Args = argh::from_env();
    logging::init(args.log_json);
    let inner = || -> anyhow::Result<()> {
        exec_subc(args.subc)?;
        Ok(())
    };
    if let Err(e) = inner() {
        eprintln!("ERROR\n{e:?}");
        process::exit(1);
    }
}
