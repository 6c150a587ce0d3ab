//! Traits: members attached to classes, instances, scripts and activations

use alloc::vec::Vec;

use super::index::{ClassIndex, MetadataIndex, MethodIndex, MultinameIndex};
use crate::decode::{read_table, Decode};
use crate::format::constants::abc::{trait_attr, trait_kind};
use crate::reader::Cursor;
use crate::{DecodeError, Result};

/// Kind-specific payload of a trait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TraitKind {
    Slot(SlotTrait),
    Const(SlotTrait),
    Method { disp_id: u32, method: MethodIndex },
    Getter { disp_id: u32, method: MethodIndex },
    Setter { disp_id: u32, method: MethodIndex },
    Class { slot_id: u32, class: ClassIndex },
    Function { slot_id: u32, function: MethodIndex },
}

impl TraitKind {
    /// The kind value stored in the low nibble of the flag byte
    pub const fn kind_value(&self) -> u8 {
        match self {
            Self::Slot(_) => trait_kind::SLOT,
            Self::Method { .. } => trait_kind::METHOD,
            Self::Getter { .. } => trait_kind::GETTER,
            Self::Setter { .. } => trait_kind::SETTER,
            Self::Class { .. } => trait_kind::CLASS,
            Self::Function { .. } => trait_kind::FUNCTION,
            Self::Const(_) => trait_kind::CONST,
        }
    }
}

/// Payload shared by slot and const traits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotTrait {
    pub slot_id: u32,
    pub type_name: MultinameIndex,
    /// Initial value index; 0 means no initial value
    pub value_index: u32,
    /// Pool selector for `value_index`; absent on the wire (and 0) when
    /// `value_index` is 0
    pub value_kind: u8,
}

impl Decode for SlotTrait {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        let slot_id = cursor.read_avm_int()?;
        let type_name = MultinameIndex::decode(cursor)?;
        let value_index = cursor.read_avm_int()?;
        let value_kind = if value_index == 0 {
            0
        } else {
            cursor.read_byte()?
        };
        Ok(Self {
            slot_id,
            type_name,
            value_index,
            value_kind,
        })
    }
}

/// Trait record
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trait {
    pub name: MultinameIndex,
    /// Raw flag byte: kind in the low nibble, attributes in the high nibble
    pub flags: u8,
    pub kind: TraitKind,
    /// Present only with the metadata attribute
    pub metadata: Vec<MetadataIndex>,
}

impl Trait {
    pub const fn is_final(&self) -> bool {
        self.flags & trait_attr::FINAL != 0
    }

    pub const fn is_override(&self) -> bool {
        self.flags & trait_attr::OVERRIDE != 0
    }

    pub const fn has_metadata(&self) -> bool {
        self.flags & trait_attr::METADATA != 0
    }
}

impl Decode for Trait {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        let name = MultinameIndex::decode(cursor)?;
        let flags_offset = cursor.position();
        let flags = cursor.read_byte()?;

        let kind = match flags & trait_kind::MASK {
            trait_kind::SLOT => TraitKind::Slot(SlotTrait::decode(cursor)?),
            trait_kind::CONST => TraitKind::Const(SlotTrait::decode(cursor)?),
            trait_kind::METHOD => TraitKind::Method {
                disp_id: cursor.read_avm_int()?,
                method: MethodIndex::decode(cursor)?,
            },
            trait_kind::GETTER => TraitKind::Getter {
                disp_id: cursor.read_avm_int()?,
                method: MethodIndex::decode(cursor)?,
            },
            trait_kind::SETTER => TraitKind::Setter {
                disp_id: cursor.read_avm_int()?,
                method: MethodIndex::decode(cursor)?,
            },
            trait_kind::CLASS => TraitKind::Class {
                slot_id: cursor.read_avm_int()?,
                class: ClassIndex::decode(cursor)?,
            },
            trait_kind::FUNCTION => TraitKind::Function {
                slot_id: cursor.read_avm_int()?,
                function: MethodIndex::decode(cursor)?,
            },
            other => {
                return Err(DecodeError::UnknownTraitKind {
                    offset: flags_offset,
                    kind: other,
                })
            }
        };

        let metadata = if flags & trait_attr::METADATA != 0 {
            read_table(cursor)?
        } else {
            Vec::new()
        };

        Ok(Self {
            name,
            flags,
            kind,
            metadata,
        })
    }
}
