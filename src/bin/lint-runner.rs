//! Purpose: Run every sibling `lint-*` executable and merge their statuses.
//! Role: Binary entry point for the sweep driver; takes no arguments.
//! Invariants: Child stdio is inherited; product output stays line-oriented.
//! Invariants: Process exit code is the bitwise OR of all child exit codes.
//! Invariants: Only host faults (unlistable directory) abort a sweep early.
use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wasmpack::core::error::{to_exit_code, Error};
use wasmpack::core::sweep::{run_sweep, ExecutableHost};

#[derive(Parser)]
#[command(
    name = "lint-runner",
    version,
    about = "Run every sibling lint-* executable and exit with the merged status"
)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();
    init_tracing();

    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("lint-runner: {err}");
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<i32, Error> {
    let mut host = ExecutableHost::for_current_exe()?;
    let stdout = io::stdout();
    let outcome = run_sweep(&mut host, &mut stdout.lock())?;
    Ok(outcome.aggregate)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}
