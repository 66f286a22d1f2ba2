//! Purpose: `wasmpack` CLI entry point and mode dispatch.
//! Role: Binary crate root; reads stdin bytes, emits one output line on stdout.
//! Invariants: `generate` as the final argument derives a table; anything else encodes.
//! Invariants: Errors are emitted as plain lines on stderr.
//! Invariants: Process exit code is derived from `core::error::to_exit_code`.
use std::io::{self, Read, Write};

use clap::Parser;

use wasmpack::core::codec;
use wasmpack::core::error::{to_exit_code, Error, ErrorKind};
use wasmpack::core::table::Table;

#[derive(Parser)]
#[command(
    name = "wasmpack",
    version,
    about = "Pack byte streams into a 64-symbol printable alphabet",
    after_help = r#"EXAMPLES
  $ wasmpack < module.wasm            # encode stdin with the built-in table
  $ wasmpack generate < corpus.bin    # derive a 60-entry table from stdin
"#
)]
struct Cli {
    /// `generate` as the final argument switches to table generation; any
    /// other mode encodes standard input with the built-in table.
    #[arg(value_name = "MODE")]
    mode: Vec<String>,
}

fn main() {
    let exit_code = match run() {
        Ok(()) => 0,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<(), Error> {
    let cli = Cli::parse();
    let input = read_stdin()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.mode.last().is_some_and(|mode| mode.as_str() == "generate") {
        let table = Table::generate(&input)?;
        let listing = table
            .entries()
            .iter()
            .map(|byte| byte.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write_line(&mut out, &listing)
    } else {
        write_line(&mut out, &codec::encode(&input, &Table::default()))
    }
}

fn read_stdin() -> Result<Vec<u8>, Error> {
    let mut input = Vec::new();
    io::stdin().read_to_end(&mut input).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to read standard input")
            .with_source(err)
    })?;
    Ok(input)
}

fn write_line(out: &mut impl Write, line: &str) -> Result<(), Error> {
    writeln!(out, "{line}").map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to write standard output")
            .with_source(err)
    })
}

fn emit_error(err: &Error) {
    eprintln!("wasmpack: {err}");
    if let Some(hint) = err.hint() {
        eprintln!("hint: {hint}");
    }
}
