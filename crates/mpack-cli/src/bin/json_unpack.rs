//! `json-unpack`: decode MessagePack (stdin) to JSON (stdout).

use std::io::{self, Read, Write};

use clap::Parser;
use mpack::{DecoderOptions, TrailingPolicy, DEFAULT_MAX_DEPTH};
use mpack_cli::{init_logging, unpack, CliError};

#[derive(Parser)]
#[command(name = "json-unpack", about = "Decode MessagePack from stdin as JSON on stdout")]
struct Cli {
    /// Maximum nesting of arrays and maps.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    /// Fail if bytes remain after the first value.
    #[arg(long)]
    strict: bool,
}

impl Cli {
    fn options(&self) -> DecoderOptions {
        DecoderOptions::new()
            .max_depth(self.max_depth)
            .trailing(if self.strict {
                TrailingPolicy::Reject
            } else {
                TrailingPolicy::Allow
            })
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging();
    if let Err(err) = run(cli.options()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(options: DecoderOptions) -> Result<(), CliError> {
    let mut buf = Vec::new();
    io::stdin().read_to_end(&mut buf)?;
    let json = unpack(&buf, options)?;
    io::stdout().write_all(json.as_bytes())?;
    io::stdout().write_all(b"\n")?;
    Ok(())
}
