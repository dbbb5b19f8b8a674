// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! AMF3 variable-length 29-bit unsigned integers.
//!
//! Big-endian. The first three bytes carry 7 data bits each with a
//! continuation flag in bit 7; a fourth byte, when reached, carries a full
//! 8 data bits.
//!
//! | Range | Bytes |
//! |-------|-------|
//! | `0x00000000..=0x0000007F` | `0xxxxxxx` |
//! | `0x00000080..=0x00003FFF` | `1xxxxxxx 0xxxxxxx` |
//! | `0x00004000..=0x001FFFFF` | `1xxxxxxx 1xxxxxxx 0xxxxxxx` |
//! | `0x00200000..=0x1FFFFFFF` | `1xxxxxxx 1xxxxxxx 1xxxxxxx xxxxxxxx` |

use std::io::{Read, Write};

use crate::core::{AmfError, Result, U29_MAX};
use crate::encoding::stream::{read_byte, write_bytes};

/// Largest length or index that fits in a U29 reference header.
pub const U28_MAX: u32 = U29_MAX >> 1;

/// A decoded U29 header: the low bit selects literal or reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum U29Header {
    /// Remaining bits index a reference table
    Reference(u32),
    /// Remaining bits give the length of an inline literal
    Literal(u32),
}

/// Read a U29 value.
pub fn read_u29<R: Read + ?Sized>(r: &mut R) -> Result<u32> {
    let mut value = 0u32;
    for _ in 0..3 {
        let b = read_byte(r)?;
        value = (value << 7) | u32::from(b & 0x7F);
        if b & 0x80 == 0 {
            return Ok(value);
        }
    }

    let b = read_byte(r)?;
    Ok((value << 8) | u32::from(b))
}

/// Write `value` in its shortest U29 form.
pub fn write_u29<W: Write + ?Sized>(w: &mut W, value: u32) -> Result<usize> {
    let mut buf = [0u8; 4];
    let n = match value {
        0..=0x7F => {
            buf[0] = value as u8;
            1
        }
        0x80..=0x3FFF => {
            buf[0] = ((value >> 7) | 0x80) as u8;
            buf[1] = (value & 0x7F) as u8;
            2
        }
        0x4000..=0x1F_FFFF => {
            buf[0] = ((value >> 14) | 0x80) as u8;
            buf[1] = (((value >> 7) & 0x7F) | 0x80) as u8;
            buf[2] = (value & 0x7F) as u8;
            3
        }
        0x20_0000..=U29_MAX => {
            buf[0] = ((value >> 22) | 0x80) as u8;
            buf[1] = (((value >> 15) & 0x7F) | 0x80) as u8;
            buf[2] = (((value >> 8) & 0x7F) | 0x80) as u8;
            buf[3] = (value & 0xFF) as u8;
            4
        }
        _ => return Err(AmfError::range(value)),
    };

    write_bytes(w, &buf[..n])
}

/// Read a U29 and split it into its reference flag and payload.
pub fn read_u29_header<R: Read + ?Sized>(r: &mut R) -> Result<U29Header> {
    let value = read_u29(r)?;
    Ok(if value & 0x01 == 0 {
        U29Header::Reference(value >> 1)
    } else {
        U29Header::Literal(value >> 1)
    })
}

/// Write a reference or literal header.
pub fn write_u29_header<W: Write + ?Sized>(w: &mut W, header: U29Header) -> Result<usize> {
    let (payload, flag) = match header {
        U29Header::Reference(index) => (index, 0),
        U29Header::Literal(len) => (len, 1),
    };
    if payload > U28_MAX {
        return Err(AmfError::range(payload));
    }
    write_u29(w, (payload << 1) | flag)
}

/// Write a literal header for a length taken from a host collection.
pub fn write_literal_len<W: Write + ?Sized>(w: &mut W, len: usize) -> Result<usize> {
    let len = u32::try_from(len).map_err(|_| AmfError::range(len as u64))?;
    write_u29_header(w, U29Header::Literal(len))
}
