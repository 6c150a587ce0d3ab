//! Interned field names and their hash index
//!
//! Field ids are looked up by a 31-bit hash of the name. The index keeps one
//! id per hash: when two names collide, the one inserted last wins. This is
//! how the module format's symbol table behaves, and callers comparing names
//! after a lookup must be prepared for a colliding id.

use alloc::vec::Vec;
use hashbrown::HashMap;

use super::global::read_module_string;
use crate::format::constants::module::{FIELD_HASH_MASK, FIELD_HASH_MULTIPLIER};
use crate::reader::Cursor;
use crate::text::RawString;
use crate::Result;

/// Hash a field name: `h = 223 * h + byte` over the unsigned bytes, masked to 31 bits
pub fn field_hash(name: &[u8]) -> u32 {
    let hash = name.iter().fold(0u32, |acc, &byte| {
        acc.wrapping_mul(FIELD_HASH_MULTIPLIER)
            .wrapping_add(byte as u32)
    });
    hash & FIELD_HASH_MASK
}

/// Field names by id plus the hash index over them
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldTable {
    names: Vec<RawString>,
    by_hash: HashMap<u32, usize>,
}

impl FieldTable {
    /// Build a table from names in id order
    pub fn from_names(names: impl IntoIterator<Item = RawString>) -> Self {
        let mut table = Self::default();
        for name in names {
            table.push(name);
        }
        table
    }

    fn push(&mut self, name: RawString) {
        let id = self.names.len();
        let hash = field_hash(name.as_bytes());
        if let Some(previous) = self.by_hash.insert(hash, id) {
            tracing::trace!(hash, previous, id, "field hash collision");
        }
        self.names.push(name);
    }

    /// Read `count` null-terminated names, hashing each as it is read
    pub(crate) fn read(cursor: &mut Cursor<'_>, count: usize) -> Result<Self> {
        let mut table = Self {
            names: Vec::with_capacity(count.min(cursor.remaining())),
            by_hash: HashMap::with_capacity(count.min(cursor.remaining())),
        };
        for _ in 0..count {
            let name = read_module_string(cursor)?;
            table.push(RawString::from(name));
        }
        Ok(table)
    }

    /// Number of field names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name of field `id`
    pub fn name(&self, id: usize) -> Option<&RawString> {
        self.names.get(id)
    }

    /// All names in id order
    pub fn names(&self) -> &[RawString] {
        &self.names
    }

    /// Id stored under `hash`
    pub fn by_hash(&self, hash: u32) -> Option<usize> {
        self.by_hash.get(&(hash & FIELD_HASH_MASK)).copied()
    }

    /// Id of `name` through the hash index
    ///
    /// May return a colliding field whose name differs; compare with
    /// [`FieldTable::name`] when that matters.
    pub fn lookup(&self, name: &[u8]) -> Option<usize> {
        self.by_hash(field_hash(name))
    }

    /// Number of distinct hashes in the index
    pub fn hash_count(&self) -> usize {
        self.by_hash.len()
    }
}
