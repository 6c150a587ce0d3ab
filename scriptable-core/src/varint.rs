//! Variable-length and fixed-width integer codecs
//!
//! Two encodings live here and they are not interchangeable:
//!
//! - the AVM varint: 1 to 5 bytes, 7 payload bits per byte with the high bit
//!   as continuation, and a fifth byte limited to 4 bits;
//! - the fixed u30: exactly 4 little-endian bytes whose top two bits must be
//!   clear.

use alloc::vec::Vec;

use crate::reader::Cursor;
use crate::{DecodeError, Result};

/// Largest value the fifth varint byte may carry
const FIFTH_BYTE_MAX: u8 = 15;

/// Smallest high byte rejected by the u30 codec
const U30_HIGH_BYTE_LIMIT: u8 = 64;

impl Cursor<'_> {
    /// Read an AVM varint, assembled as a 32-bit value
    pub fn read_avm_int(&mut self) -> Result<u32> {
        let mut value: u32 = 0;
        for shift in [0u32, 7, 14, 21] {
            let byte = self.read_byte()?;
            if byte < 0x80 {
                return Ok(value | ((byte as u32) << shift));
            }
            value |= ((byte & 0x7F) as u32) << shift;
        }

        let offset = self.position();
        let last = self.read_byte()?;
        if last > FIFTH_BYTE_MAX {
            return Err(DecodeError::BadIntEncoding { offset, byte: last });
        }
        Ok(value | ((last as u32) << 28))
    }

    /// Read an AVM varint as a signed 32-bit value (natural wraparound)
    pub fn read_avm_i32(&mut self) -> Result<i32> {
        Ok(self.read_avm_int()? as i32)
    }

    /// Read an AVM varint used as a count or index
    pub fn read_avm_usize(&mut self) -> Result<usize> {
        Ok(self.read_avm_int()? as usize)
    }

    /// Read a fixed 4-byte little-endian u30
    pub fn read_u30(&mut self) -> Result<u32> {
        let offset = self.position();
        let bytes = self.read_array::<4>()?;
        if bytes[3] >= U30_HIGH_BYTE_LIMIT {
            return Err(DecodeError::U30Overflow {
                offset: offset + 3,
                byte: bytes[3],
            });
        }
        Ok(u32::from_le_bytes(bytes))
    }
}

/// Append the AVM varint encoding of `value` to `out`
///
/// Produces the shortest form: values below 2^28 take at most four bytes,
/// anything larger uses the fifth byte for the top four bits.
pub fn encode_avm_int(value: u32, out: &mut Vec<u8>) {
    let mut rest = value;
    for _ in 0..4 {
        if rest < 0x80 {
            out.push(rest as u8);
            return;
        }
        out.push((rest as u8 & 0x7F) | 0x80);
        rest >>= 7;
    }
    out.push(rest as u8);
}

/// Number of bytes `encode_avm_int` emits for `value`
pub const fn avm_int_len(value: u32) -> usize {
    match value {
        0..=0x7F => 1,
        0x80..=0x3FFF => 2,
        0x4000..=0x1F_FFFF => 3,
        0x20_0000..=0x0FFF_FFFF => 4,
        _ => 5,
    }
}
