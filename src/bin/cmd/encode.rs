// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encode command - turn JSON values into an AMF byte stream.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use amfcodec::{json, AnyCodec, Format, Value, ValueCodec};

use crate::common::{read_input, Result};

/// Encode JSON values.
#[derive(Args, Clone, Debug)]
pub struct EncodeCmd {
    /// JSON input file (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Wire format of the output
    #[arg(short, long, default_value = "amf0")]
    format: Format,

    /// Treat a top-level JSON array as one array value instead of a list
    /// of values
    #[arg(long)]
    single: bool,

    /// Write raw bytes to this file instead of printing hex
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl EncodeCmd {
    pub fn run(self) -> Result<()> {
        let text = read_input(self.input.as_deref())?;
        let document: serde_json::Value =
            serde_json::from_slice(&text).context("input is not valid JSON")?;

        let values = match document {
            serde_json::Value::Array(items) if !self.single => items
                .iter()
                .map(json::from_json)
                .collect::<amfcodec::Result<Vec<Value>>>()?,
            other => vec![json::from_json(&other)?],
        };

        let mut codec = AnyCodec::new(self.format);
        let mut buf = Vec::new();
        codec.encode_batch(&mut buf, &values)?;

        match &self.output {
            Some(path) => {
                fs::write(path, &buf)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                eprintln!("Wrote {} bytes to {}", buf.len(), path.display());
            }
            None => println!("{}", hex::encode(&buf)),
        }
        Ok(())
    }
}
