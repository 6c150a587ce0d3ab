//! Bytecode module decoding
//!
//! Layout: magic and header counts, the global table (which may embed the
//! debug table), the field-name table, then the compressed instruction
//! stream.

use alloc::vec::Vec;

pub mod code;
pub mod debug;
pub mod fields;
pub mod global;

pub use code::Opcode;
pub use debug::{DebugTable, SourcePosition};
pub use fields::{field_hash, FieldTable};
pub use global::{parse_float_literal, FunctionRef, GlobalValue};

use crate::format::constants::module::global as tag;
use crate::format::ModuleHeader;
use crate::reader::Cursor;
use crate::text::RawString;
use crate::{DecodeError, Result};
use code::{decode_instructions, TraceContext};
use global::{read_function_ref, read_module_string, read_wide_string};

/// Fully decoded module
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Module {
    pub header: ModuleHeader,
    /// One entry per global slot
    pub globals: Vec<GlobalValue>,
    pub fields: FieldTable,
    /// `code_size` operand cells followed by [`Opcode::TERMINATOR`]
    pub code: Vec<i32>,
    /// Entry code position (cell 1)
    pub entry: i32,
    pub debug: Option<DebugTable>,
}

/// Decode a module from `bytes`
pub fn decode_module(bytes: &[u8]) -> Result<Module> {
    let mut cursor = Cursor::new(bytes);
    let header = ModuleHeader::read(&mut cursor)?;

    let (globals, debug) = read_globals(&mut cursor, &header)?;
    let fields = FieldTable::read(&mut cursor, header.field_count as usize)?;

    let context = TraceContext {
        fields: &fields,
        globals: &globals,
    };
    let code = decode_instructions(&mut cursor, header.code_size as usize, &context)?;
    let entry = code.get(1).copied().unwrap_or(Opcode::TERMINATOR);

    let has_debug = debug.is_some();
    tracing::debug!(
        globals = globals.len(),
        fields = fields.len(),
        code_size = header.code_size,
        entry,
        has_debug,
        trailing = cursor.remaining(),
        "decoded module"
    );

    Ok(Module {
        header,
        globals,
        fields,
        code,
        entry,
        debug,
    })
}

fn read_globals(
    cursor: &mut Cursor<'_>,
    header: &ModuleHeader,
) -> Result<(Vec<GlobalValue>, Option<DebugTable>)> {
    let count = header.global_count as usize;
    let mut globals = Vec::with_capacity(count.min(cursor.remaining()));
    let mut debug = None;

    for slot in 0..count {
        let offset = cursor.position();
        let value = match cursor.read_byte()? {
            tag::STRING => GlobalValue::String(RawString::from(read_module_string(cursor)?)),
            tag::FUNCTION => GlobalValue::Function(read_function_ref(cursor, header.code_size)?),
            tag::WIDE_STRING => GlobalValue::WideString(read_wide_string(cursor)?),
            tag::FLOAT => GlobalValue::Float(parse_float_literal(read_module_string(cursor)?)),
            tag::DEBUG => {
                if debug.is_some() {
                    tracing::warn!(slot, offset, "second debug table replaces the first");
                }
                debug = Some(DebugTable::read(cursor, header.code_size)?);
                GlobalValue::DebugMarker
            }
            tag => return Err(DecodeError::UnknownGlobalTag { offset, tag }),
        };
        globals.push(value);
    }

    Ok((globals, debug))
}

impl Module {
    /// Decode a module from `bytes`
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        decode_module(bytes)
    }

    /// Declared number of operand cells
    pub fn code_size(&self) -> usize {
        self.header.code_size as usize
    }

    /// Operand cells without the terminator
    pub fn instructions(&self) -> &[i32] {
        let end = self.code_size().min(self.code.len());
        &self.code[..end]
    }

    pub fn global(&self, slot: usize) -> Option<&GlobalValue> {
        self.globals.get(slot)
    }

    /// Function references in slot order
    pub fn functions(&self) -> impl Iterator<Item = (usize, FunctionRef)> + '_ {
        self.globals
            .iter()
            .enumerate()
            .filter_map(|(slot, value)| match value {
                GlobalValue::Function(func) => Some((slot, *func)),
                _ => None,
            })
    }

    /// Source position of instruction cell `index`, when debug info is present
    pub fn source_position(&self, index: usize) -> Option<SourcePosition> {
        self.debug.as_ref()?.position(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module_bytes(header: ModuleHeader, body: &[u8]) -> Vec<u8> {
        let mut bytes = header.to_bytes();
        bytes.extend_from_slice(body);
        bytes
    }

    #[test]
    fn test_minimal_module() {
        let bytes = module_bytes(ModuleHeader::new(0, 0, 0), &[]);
        let module = decode_module(&bytes).unwrap();
        assert_eq!(module.code, [Opcode::TERMINATOR]);
        assert_eq!(module.entry, Opcode::TERMINATOR);
        assert!(module.instructions().is_empty());
        assert!(module.debug.is_none());
    }

    #[test]
    fn test_globals_fields_and_code() {
        let mut body = alloc::vec![];
        body.extend_from_slice(b"\x01hello\0");
        body.extend_from_slice(b"\x02");
        body.extend_from_slice(&0x0200_0001u32.to_le_bytes());
        body.extend_from_slice(b"\x03\x02\x00hi");
        body.extend_from_slice(b"\x041.5\0");
        body.extend_from_slice(b"length\0");
        // AccInt 1, Ret 0
        body.extend_from_slice(&[(4 << 2) | 2, 1, (28 << 2) | 2, 0]);

        let bytes = module_bytes(ModuleHeader::new(4, 1, 4), &body);
        let module = decode_module(&bytes).unwrap();

        assert_eq!(module.globals[0], GlobalValue::String(RawString::from("hello")));
        assert_eq!(
            module.global(1),
            Some(&GlobalValue::Function(FunctionRef {
                position: 1,
                extra_args: 2
            }))
        );
        assert_eq!(module.globals[2], GlobalValue::WideString(RawString::from("hi")));
        assert_eq!(module.globals[3], GlobalValue::Float(1.5));
        assert_eq!(module.fields.lookup(b"length"), Some(0));
        assert_eq!(module.code, [4, 1, 28, 0, Opcode::TERMINATOR]);
        assert_eq!(module.entry, 1);
        assert_eq!(module.functions().count(), 1);
    }

    #[test]
    fn test_debug_marker() {
        let mut body = alloc::vec![0x05, 0x01];
        body.extend_from_slice(b"a.n\0");
        body.extend_from_slice(&[0x02, 0x01, 0x0C]);
        body.extend_from_slice(&[0x00, 0x04]);

        let bytes = module_bytes(ModuleHeader::new(1, 0, 2), &body);
        let module = decode_module(&bytes).unwrap();

        assert_eq!(module.globals, [GlobalValue::DebugMarker]);
        assert_eq!(module.source_position(1), Some(SourcePosition { file: 0, line: 1 }));
        assert_eq!(module.code, [0, 1, Opcode::TERMINATOR]);
    }

    #[test]
    fn test_unknown_global_tag() {
        let bytes = module_bytes(ModuleHeader::new(1, 0, 0), &[0x09]);
        let header_len = bytes.len() - 1;
        assert_eq!(
            decode_module(&bytes),
            Err(DecodeError::UnknownGlobalTag {
                offset: header_len,
                tag: 0x09
            })
        );
    }

    #[test]
    fn test_reversed_magic() {
        assert_eq!(
            decode_module(&[0x4E, 0x45, 0x4B, 0x4F, 0, 0, 0]),
            Err(DecodeError::BadMagic {
                offset: 0,
                found: 0x4E45_4B4F
            })
        );
    }
}
