// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decode command - turn an AMF byte stream into JSON.

use std::path::PathBuf;

use clap::Args;
use tracing::warn;

use amfcodec::{json, CodecBuilder, Format, Utf8Policy, Value, ValueCodec};

use crate::common::{parse_hex, read_input, Result};

/// Decode every value in a byte stream.
#[derive(Args, Clone, Debug)]
pub struct DecodeCmd {
    /// Input file (reads stdin when omitted)
    #[arg(value_name = "FILE", conflicts_with = "hex")]
    input: Option<PathBuf>,

    /// Decode this hex string instead of reading input
    #[arg(long, value_name = "HEX")]
    hex: Option<String>,

    /// Wire format of the input
    #[arg(short, long, default_value = "amf0")]
    format: Format,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Fail on strings that are not valid UTF-8
    #[arg(long)]
    strict_utf8: bool,
}

impl DecodeCmd {
    pub fn run(self) -> Result<()> {
        let data = match &self.hex {
            Some(hex) => parse_hex(hex)?,
            None => read_input(self.input.as_deref())?,
        };

        let utf8 = if self.strict_utf8 {
            Utf8Policy::Strict
        } else {
            Utf8Policy::Lossy
        };
        let mut codec = CodecBuilder::new().utf8(utf8).build(self.format);

        let mut input = data.as_slice();
        match codec.decode_batch(&mut input) {
            Ok(values) => self.print(&values),
            Err(err) => {
                let consumed = data.len() - input.len();
                warn!(
                    decoded = err.decoded.len(),
                    offset = consumed,
                    "Decoding stopped early"
                );
                self.print(&err.decoded)?;
                Err(err.into())
            }
        }
    }

    fn print(&self, values: &[Value]) -> Result<()> {
        let json = serde_json::Value::Array(values.iter().map(json::to_json).collect());
        let text = if self.pretty {
            serde_json::to_string_pretty(&json)?
        } else {
            serde_json::to_string(&json)?
        };
        println!("{text}");
        Ok(())
    }
}
