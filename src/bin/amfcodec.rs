// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # amfcodec CLI
//!
//! Command-line tool for inspecting and producing AMF0/AMF3 byte streams.
//!
//! ## Usage
//!
//! ```sh
//! # Decode a captured AMF0 command as JSON
//! amfcodec decode command.bin
//!
//! # Decode AMF3 from a hex string
//! amfcodec decode --format amf3 --hex "0a0b010762617a0301"
//!
//! # Encode JSON values as AMF0, printing hex
//! echo '["connect", 1, {"app": "live"}]' | amfcodec encode
//!
//! # Encode to a file
//! amfcodec encode values.json --format amf3 --output values.bin
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{DecodeCmd, EncodeCmd};
use common::Result;

/// amfcodec - AMF0/AMF3 codec toolkit
///
/// Decode AMF byte streams to JSON and encode JSON values to AMF.
#[derive(Parser, Clone)]
#[command(name = "amfcodec")]
#[command(about = "Decode and encode AMF0/AMF3 byte streams", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Log codec activity to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Decode every value in a byte stream and print them as a JSON array
    Decode(DecodeCmd),

    /// Encode JSON values into an AMF byte stream
    Encode(EncodeCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    common::init_tracing(cli.verbose);

    match cli.command {
        Commands::Decode(cmd) => cmd.run(),
        Commands::Encode(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
