//! Instance, class and script records
//!
//! Instance-info and class-info describe the same class by position: entry
//! `i` of one table pairs with entry `i` of the other.

use alloc::vec::Vec;

use super::index::{MethodIndex, MultinameIndex, NamespaceIndex};
use super::trait_info::Trait;
use crate::decode::{read_table, Decode};
use crate::format::constants::abc::instance as flag;
use crate::reader::Cursor;
use crate::Result;

/// Instance side of a class
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceInfo {
    pub name: MultinameIndex,
    pub super_name: MultinameIndex,
    pub flags: u8,
    /// Present only with the protected-namespace flag
    pub protected_ns: Option<NamespaceIndex>,
    pub interfaces: Vec<MultinameIndex>,
    /// Instance initializer (constructor)
    pub init: MethodIndex,
    pub traits: Vec<Trait>,
}

impl InstanceInfo {
    pub const fn is_sealed(&self) -> bool {
        self.flags & flag::SEALED != 0
    }

    pub const fn is_final(&self) -> bool {
        self.flags & flag::FINAL != 0
    }

    pub const fn is_interface(&self) -> bool {
        self.flags & flag::INTERFACE != 0
    }
}

impl Decode for InstanceInfo {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        let name = MultinameIndex::decode(cursor)?;
        let super_name = MultinameIndex::decode(cursor)?;
        let flags = cursor.read_byte()?;
        let protected_ns = if flags & flag::PROTECTED_NS != 0 {
            Some(NamespaceIndex::decode(cursor)?)
        } else {
            None
        };
        let interfaces = read_table(cursor)?;
        let init = MethodIndex::decode(cursor)?;
        let traits = read_table(cursor)?;

        Ok(Self {
            name,
            super_name,
            flags,
            protected_ns,
            interfaces,
            init,
            traits,
        })
    }
}

/// Initializer plus trait list; the shape of both class-info and script-info
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraitSet {
    /// Static initializer for a class, entry point for a script
    pub init: MethodIndex,
    pub traits: Vec<Trait>,
}

impl Decode for TraitSet {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        let init = MethodIndex::decode(cursor)?;
        let traits = read_table(cursor)?;
        Ok(Self { init, traits })
    }
}

/// Static side of a class
pub type ClassInfo = TraitSet;

/// Script: entry method plus its global traits
pub type ScriptInfo = TraitSet;
