//! Method signatures, metadata and method bodies

use alloc::vec::Vec;

use super::index::{MethodIndex, MultinameIndex, StringIndex};
use super::trait_info::Trait;
use crate::decode::{read_exact, read_table, Decode};
use crate::format::constants::abc::method as flag;
use crate::reader::Cursor;
use crate::Result;

/// Default value of an optional parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionalValue {
    /// Index into the pool selected by `kind`
    pub value: u32,
    /// Constant kind byte
    pub kind: u8,
}

impl Decode for OptionalValue {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        let value = cursor.read_avm_int()?;
        let kind = cursor.read_byte()?;
        Ok(Self { value, kind })
    }
}

/// Method signature
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodSignature {
    pub return_type: MultinameIndex,
    pub param_types: Vec<MultinameIndex>,
    pub name: StringIndex,
    pub flags: u8,
    /// Present only with `HAS_OPTIONAL`
    pub optionals: Vec<OptionalValue>,
    /// Present only with `HAS_PARAM_NAMES`; one per parameter
    pub param_names: Vec<StringIndex>,
}

impl MethodSignature {
    pub fn param_count(&self) -> usize {
        self.param_types.len()
    }

    pub const fn needs_arguments(&self) -> bool {
        self.flags & flag::NEED_ARGUMENTS != 0
    }

    pub const fn needs_activation(&self) -> bool {
        self.flags & flag::NEED_ACTIVATION != 0
    }

    pub const fn needs_rest(&self) -> bool {
        self.flags & flag::NEED_REST != 0
    }

    pub const fn has_optional(&self) -> bool {
        self.flags & flag::HAS_OPTIONAL != 0
    }

    pub const fn sets_dxns(&self) -> bool {
        self.flags & flag::SET_DXNS != 0
    }

    pub const fn has_param_names(&self) -> bool {
        self.flags & flag::HAS_PARAM_NAMES != 0
    }
}

impl Decode for MethodSignature {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        let param_count = cursor.read_avm_usize()?;
        let return_type = MultinameIndex::decode(cursor)?;
        let param_types = read_exact(cursor, param_count)?;
        let name = StringIndex::decode(cursor)?;
        let flags = cursor.read_byte()?;

        // Both blocks depend on the flag byte just read
        let optionals = if flags & flag::HAS_OPTIONAL != 0 {
            read_table(cursor)?
        } else {
            Vec::new()
        };
        let param_names = if flags & flag::HAS_PARAM_NAMES != 0 {
            read_exact(cursor, param_count)?
        } else {
            Vec::new()
        };

        Ok(Self {
            return_type,
            param_types,
            name,
            flags,
            optionals,
            param_names,
        })
    }
}

/// One key/value entry of a metadata record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetadataItem {
    pub key: StringIndex,
    pub value: StringIndex,
}

impl Decode for MetadataItem {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        let key = StringIndex::decode(cursor)?;
        let value = StringIndex::decode(cursor)?;
        Ok(Self { key, value })
    }
}

/// Metadata record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    pub name: StringIndex,
    pub items: Vec<MetadataItem>,
}

impl Decode for Metadata {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        let name = StringIndex::decode(cursor)?;
        let items = read_table(cursor)?;
        Ok(Self { name, items })
    }
}

/// Exception handler covering a code range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExceptionInfo {
    pub from: u32,
    pub to: u32,
    pub target: u32,
    pub exception_type: MultinameIndex,
    pub var_name: MultinameIndex,
}

impl Decode for ExceptionInfo {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            from: cursor.read_avm_int()?,
            to: cursor.read_avm_int()?,
            target: cursor.read_avm_int()?,
            exception_type: MultinameIndex::decode(cursor)?,
            var_name: MultinameIndex::decode(cursor)?,
        })
    }
}

/// Method body: limits, raw bytecode, handlers and activation traits
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodBody {
    pub method: MethodIndex,
    pub max_stack: u32,
    pub local_count: u32,
    pub init_scope_depth: u32,
    pub max_scope_depth: u32,
    /// Opaque instruction bytes
    pub code: Vec<u8>,
    pub exceptions: Vec<ExceptionInfo>,
    pub traits: Vec<Trait>,
}

impl Decode for MethodBody {
    fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        let method = MethodIndex::decode(cursor)?;
        let max_stack = cursor.read_avm_int()?;
        let local_count = cursor.read_avm_int()?;
        let init_scope_depth = cursor.read_avm_int()?;
        let max_scope_depth = cursor.read_avm_int()?;

        let code_len = cursor.read_avm_usize()?;
        let code = cursor.read_block(code_len)?.to_vec();

        let exceptions = read_table(cursor)?;
        let traits = read_table(cursor)?;

        Ok(Self {
            method,
            max_stack,
            local_count,
            init_scope_depth,
            max_scope_depth,
            code,
            exceptions,
            traits,
        })
    }
}
