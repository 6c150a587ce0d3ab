//! Bounds-checked cursor over an immutable byte buffer
//!
//! All reads check the remaining length first and only then consume bytes,
//! so a failed read leaves the position where the record started to go bad.

use crate::{DecodeError, Result};

/// Read position over a borrowed buffer
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `data`
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current byte offset from the start of the buffer
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes left before the end
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether every byte has been consumed
    pub const fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Fail unless `n` more bytes are available
    pub fn ensure(&self, n: usize) -> Result<()> {
        if n > self.remaining() {
            return Err(DecodeError::UnexpectedEnd {
                offset: self.pos,
                needed: n,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    /// Read one byte
    pub fn read_byte(&mut self) -> Result<u8> {
        self.ensure(1)?;
        let byte = self.data[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    /// Read a block of `n` bytes, borrowed from the buffer
    pub fn read_block(&mut self, n: usize) -> Result<&'a [u8]> {
        self.ensure(n)?;
        let block = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(block)
    }

    /// Read exactly `N` bytes into an array
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_block(N)?);
        Ok(out)
    }

    /// Read a 4-byte little-endian integer (`b0 | b1<<8 | b2<<16 | b3<<24`)
    pub fn read_fixed32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array::<4>()?))
    }

    /// Read a 2-byte little-endian integer
    pub fn read_fixed16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array::<2>()?))
    }

    /// Read an 8-byte IEEE double stored in native byte order
    pub fn read_double(&mut self) -> Result<f64> {
        let raw = self.read_block(8)?;
        Ok(bytemuck::pod_read_unaligned::<f64>(raw))
    }

    /// Read a null-terminated string of at most `limit` bytes (terminator included)
    ///
    /// Returns the bytes before the terminator. Running out of input is
    /// `UnexpectedEnd`; consuming `limit` bytes without a terminator is
    /// `UnterminatedString`.
    pub fn read_cstring(&mut self, limit: usize) -> Result<&'a [u8]> {
        let start = self.pos;
        for len in 0..limit {
            if self.read_byte()? == 0 {
                return Ok(&self.data[start..start + len]);
            }
        }
        Err(DecodeError::UnterminatedString {
            offset: start,
            limit,
        })
    }
}
