//! `json-pack`: encode JSON (stdin) to MessagePack (stdout).

use std::io::{self, Read, Write};

use clap::Parser;
use mpack_cli::{init_logging, pack, CliError};

#[derive(Parser)]
#[command(name = "json-pack", about = "Encode JSON from stdin as MessagePack on stdout")]
struct Cli {}

fn main() {
    let _cli = Cli::parse();
    init_logging();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    let bytes = pack(buf.trim())?;
    io::stdout().write_all(&bytes)?;
    Ok(())
}
