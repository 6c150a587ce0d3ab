//! Record decoding trait and table helpers
//!
//! Each record type knows how to read itself from a cursor. Tables are read
//! as a varint count followed by that many records, with no sentinel slot.

use alloc::vec::Vec;

use crate::reader::Cursor;
use crate::Result;

/// A record that can be read from the current cursor position
pub trait Decode: Sized {
    /// Read one record, advancing the cursor past it
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self>;
}

/// Read exactly `count` records starting at index 0
///
/// Every record consumes at least one byte, so the initial allocation is
/// capped by the bytes left in the buffer rather than trusting `count`.
pub fn read_exact<T: Decode>(cursor: &mut Cursor<'_>, count: usize) -> Result<Vec<T>> {
    let mut records = Vec::with_capacity(count.min(cursor.remaining()));
    for _ in 0..count {
        records.push(T::decode(cursor)?);
    }
    Ok(records)
}

/// Read a varint count, then that many records
pub fn read_table<T: Decode>(cursor: &mut Cursor<'_>) -> Result<Vec<T>> {
    let count = cursor.read_avm_usize()?;
    read_exact(cursor, count)
}

/// AVM varint
impl Decode for u32 {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        cursor.read_avm_int()
    }
}

/// AVM varint, wrapped to signed
impl Decode for i32 {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        cursor.read_avm_i32()
    }
}

/// Single raw byte
impl Decode for u8 {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        cursor.read_byte()
    }
}

/// 8 raw bytes, native order
impl Decode for f64 {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        cursor.read_double()
    }
}
