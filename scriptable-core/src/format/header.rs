//! Container headers
//!
//! Both formats open with a fixed 4-byte marker. The ABC container follows it
//! directly with its constant pools, the module with three varint counts.

use alloc::vec::Vec;

use super::constants::{abc, module};
use crate::reader::Cursor;
use crate::varint::encode_avm_int;
use crate::{DecodeError, Result};

/// Read and check the ABC version marker
///
/// Any marker other than the supported version, including one that is not a
/// valid u30, fails with `UnsupportedVersion` after consuming only the four
/// marker bytes.
pub fn read_abc_version(cursor: &mut Cursor<'_>) -> Result<u32> {
    let offset = cursor.position();
    let raw = cursor.read_array::<4>()?;
    match Cursor::new(&raw).read_u30() {
        Ok(version) if version == abc::VERSION => Ok(version),
        _ => Err(DecodeError::UnsupportedVersion {
            offset,
            found: u32::from_le_bytes(raw),
        }),
    }
}

/// Module header following the magic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleHeader {
    /// Number of entries in the global table
    pub global_count: u32,
    /// Number of interned field names
    pub field_count: u32,
    /// Number of operand cells in the instruction stream
    pub code_size: u32,
}

impl ModuleHeader {
    /// Create a header from its three counts
    pub const fn new(global_count: u32, field_count: u32, code_size: u32) -> Self {
        Self {
            global_count,
            field_count,
            code_size,
        }
    }

    /// Parse the magic and counts
    pub fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
        let offset = cursor.position();
        let found = u32::from_be_bytes(cursor.read_array::<4>()?);
        if found != module::MAGIC {
            return Err(DecodeError::BadMagic { offset, found });
        }

        let global_count = cursor.read_avm_int()?;
        let field_count = cursor.read_avm_int()?;
        let code_size = cursor.read_avm_int()?;

        Ok(Self {
            global_count,
            field_count,
            code_size,
        })
    }

    /// Encode the magic and counts
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(4 + 3 * 5);
        bytes.extend_from_slice(&module::MAGIC_BYTES);
        encode_avm_int(self.global_count, &mut bytes);
        encode_avm_int(self.field_count, &mut bytes);
        encode_avm_int(self.code_size, &mut bytes);
        bytes
    }
}

/// Container kinds recognised from their leading marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContainerFormat {
    /// Pooled ABC bytecode container
    Abc,
    /// Compact bytecode module
    Module,
}

/// Guess the container format from the first four bytes
///
/// Only the marker is inspected; the rest of the buffer may still be invalid.
pub fn detect_format(bytes: &[u8]) -> Option<ContainerFormat> {
    let marker: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
    if marker == module::MAGIC_BYTES {
        Some(ContainerFormat::Module)
    } else if marker == abc::VERSION_BYTES {
        Some(ContainerFormat::Abc)
    } else {
        None
    }
}
