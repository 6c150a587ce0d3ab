//! Constant pools with a reserved slot 0
//!
//! A pool is stored as a varint count followed by `count - 1` entries. Slot 0
//! is never on the wire: it holds the type's zero value and stands for
//! "none" or "any" wherever an index refers to it. A count of 0 is read as 1.

use alloc::vec::Vec;
use core::ops::Index;

use crate::decode::Decode;
use crate::reader::Cursor;
use crate::text::RawString;
use crate::Result;

/// Decoded pool; `entries()[0]` is always the reserved default slot
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstantPool<T> {
    entries: Vec<T>,
}

impl<T: Default> Default for ConstantPool<T> {
    fn default() -> Self {
        Self {
            entries: alloc::vec![T::default()],
        }
    }
}

impl<T: Default> ConstantPool<T> {
    /// Build a pool from the entries that follow the reserved slot
    pub fn from_entries(entries: impl IntoIterator<Item = T>) -> Self {
        let mut pool = Self::default();
        pool.entries.extend(entries);
        pool
    }
}

impl<T> ConstantPool<T> {
    /// Number of slots, the reserved one included (always at least 1)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the pool holds nothing beyond the reserved slot
    pub fn is_empty(&self) -> bool {
        self.entries.len() <= 1
    }

    /// Entry at `index`, or `None` for slot 0 and out-of-range indices
    pub fn get(&self, index: usize) -> Option<&T> {
        if index == 0 {
            return None;
        }
        self.entries.get(index)
    }

    /// Whether `index` addresses a slot of this pool (slot 0 included)
    pub fn contains_index(&self, index: usize) -> bool {
        index < self.entries.len()
    }

    /// All slots, the reserved one first
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    /// Entries read from the stream, paired with their pool index
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.entries.iter().enumerate().skip(1)
    }
}

impl<T> Index<usize> for ConstantPool<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.entries[index]
    }
}

/// Read a pool: a varint count (0 treated as 1), then entries from slot 1
pub fn read_pool<T: Decode + Default>(cursor: &mut Cursor<'_>) -> Result<ConstantPool<T>> {
    let count = cursor.read_avm_usize()?.max(1);

    let mut entries = Vec::with_capacity(count.min(cursor.remaining() + 1));
    entries.push(T::default());
    for _ in 1..count {
        entries.push(T::decode(cursor)?);
    }

    Ok(ConstantPool { entries })
}

/// Length-prefixed byte string
impl Decode for RawString {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        let len = cursor.read_avm_usize()?;
        Ok(RawString::from(cursor.read_block(len)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DecodeError;

    #[test]
    fn test_pool_reserves_slot_zero() {
        // count 3 => two entries on the wire
        let data = [0x03, 0x05, 0x06];
        let mut cursor = Cursor::new(&data);
        let pool: ConstantPool<u32> = read_pool(&mut cursor).unwrap();

        assert_eq!(pool.entries(), &[0, 5, 6]);
        assert_eq!(pool.get(0), None);
        assert_eq!(pool.get(2), Some(&6));
        assert_eq!(pool.get(3), None);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_pool_count_zero_and_one() {
        for data in [[0x00u8], [0x01]] {
            let mut cursor = Cursor::new(&data);
            let pool: ConstantPool<i32> = read_pool(&mut cursor).unwrap();
            assert_eq!(pool.len(), 1);
            assert!(pool.is_empty());
            assert!(cursor.is_empty());
        }
    }

    #[test]
    fn test_string_pool() {
        let data = [0x03, 0x02, b'h', b'i', 0x00];
        let mut cursor = Cursor::new(&data);
        let pool: ConstantPool<RawString> = read_pool(&mut cursor).unwrap();
        assert_eq!(pool[1], "hi");
        assert!(pool[2].is_empty());
        let listed: Vec<usize> = pool.iter().map(|(i, _)| i).collect();
        assert_eq!(listed, [1, 2]);
    }

    #[test]
    fn test_string_exact_fit_at_end() {
        // A string ending exactly on the last byte is valid
        let data = [0x02, 0x03, b'a', b'b', b'c'];
        let mut cursor = Cursor::new(&data);
        let pool: ConstantPool<RawString> = read_pool(&mut cursor).unwrap();
        assert_eq!(pool[1], "abc");

        let data = [0x02, 0x04, b'a', b'b', b'c'];
        let mut cursor = Cursor::new(&data);
        let result: Result<ConstantPool<RawString>> = read_pool(&mut cursor);
        assert!(matches!(result, Err(DecodeError::UnexpectedEnd { offset: 2, .. })));
    }
}
