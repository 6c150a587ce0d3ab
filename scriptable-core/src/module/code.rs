//! Instruction stream decompression
//!
//! The stream is a run of control bytes. The low two bits of each control
//! byte pick how many cells it yields and where the second one comes from:
//!
//! | bits | cells                                        |
//! |------|----------------------------------------------|
//! | 00   | `byte >> 2`                                  |
//! | 01   | `byte >> 3`, `(byte >> 2) & 1`               |
//! | 10   | `byte >> 2`, next byte                       |
//! | 11   | `byte >> 2`, next 4-byte little-endian value |
//!
//! Decoding stops once `code_size` cells exist; a terminator cell is appended.
//! An operand that would fall past `code_size` is an error.

use alloc::vec::Vec;
use core::fmt;

use super::fields::FieldTable;
use super::global::GlobalValue;
use crate::reader::Cursor;
use crate::{DecodeError, Result};

macro_rules! opcodes {
    ($($name:ident),* $(,)?) => {
        /// Instruction opcodes of the module format
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u8)]
        pub enum Opcode {
            $($name,)*
            /// End-of-stream marker, appended after the last decoded cell
            Last,
        }

        impl Opcode {
            const ALL: &'static [Opcode] = &[$(Opcode::$name,)* Opcode::Last];

            /// Mnemonic
            pub const fn name(self) -> &'static str {
                match self {
                    $(Opcode::$name => stringify!($name),)*
                    Opcode::Last => "Last",
                }
            }
        }
    };
}

opcodes! {
    AccNull, AccTrue, AccFalse, AccThis, AccInt, AccStack, AccGlobal, AccEnv,
    AccField, AccArray, AccIndex, AccBuiltin, SetStack, SetGlobal, SetEnv,
    SetField, SetArray, SetIndex, SetThis, Push, Pop, Call, ObjCall, Jump,
    JumpIf, JumpIfNot, Trap, EndTrap, Ret, MakeEnv, MakeArray, Bool, IsNull,
    IsNotNull, Add, Sub, Mult, Div, Mod, Shl, Shr, UShr, Or, And, Xor, Eq, Neq,
    Gt, Gte, Lt, Lte, Not, TypeOf, Compare, Hash, New, JumpTable, Apply,
    AccStack0, AccStack1, AccIndex0, AccIndex1, PhysCompare, TailCall,
}

impl Opcode {
    /// Cell value of the end-of-stream terminator
    pub const TERMINATOR: i32 = Opcode::Last as i32;

    /// Opcode for a decoded cell, if it names one
    pub fn from_cell(cell: i32) -> Option<Self> {
        usize::try_from(cell)
            .ok()
            .and_then(|index| Self::ALL.get(index))
            .copied()
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Context used only to annotate trace output
pub(crate) struct TraceContext<'m> {
    pub fields: &'m FieldTable,
    pub globals: &'m [GlobalValue],
}

/// Decompress `code_size` cells and append the terminator
///
/// The stream must end exactly at `code_size`: a two-cell encoding whose
/// operand would land past it is a `CodeSizeMismatch` at its control byte.
pub(crate) fn decode_instructions(
    cursor: &mut Cursor<'_>,
    code_size: usize,
    context: &TraceContext<'_>,
) -> Result<Vec<i32>> {
    // Each control byte yields at most two cells
    let capacity = code_size.min(cursor.remaining().saturating_mul(2)) + 1;
    let mut cells = Vec::with_capacity(capacity);

    while cells.len() < code_size {
        let index = cells.len();
        let offset = cursor.position();
        let control = cursor.read_byte()?;
        let (opcode, operand) = match control & 3 {
            0 => ((control >> 2) as i32, None),
            1 => ((control >> 3) as i32, Some(((control >> 2) & 1) as i32)),
            2 => ((control >> 2) as i32, Some(cursor.read_byte()? as i32)),
            _ => ((control >> 2) as i32, Some(cursor.read_fixed32()?)),
        };

        trace_instruction(index, opcode, operand, context);

        cells.push(opcode);
        if let Some(operand) = operand {
            if cells.len() == code_size {
                return Err(DecodeError::CodeSizeMismatch {
                    offset,
                    declared: (cells.len() + 1) as u32,
                    code_size: code_size as u32,
                });
            }
            cells.push(operand);
        }
    }

    cells.push(Opcode::TERMINATOR);
    Ok(cells)
}

fn trace_instruction(index: usize, opcode: i32, operand: Option<i32>, context: &TraceContext<'_>) {
    if !tracing::enabled!(tracing::Level::TRACE) {
        return;
    }

    let op = Opcode::from_cell(opcode);
    let name = op.map_or("?", Opcode::name);
    match (op, operand) {
        (Some(Opcode::AccField | Opcode::SetField), Some(arg)) => {
            let field = context
                .fields
                .by_hash(arg as u32)
                .and_then(|id| context.fields.name(id));
            match field {
                Some(field) => tracing::trace!(index, op = name, arg, %field, "instruction"),
                None => tracing::trace!(index, op = name, arg, "instruction"),
            }
        }
        (Some(Opcode::AccGlobal | Opcode::SetGlobal), Some(arg)) => {
            let global = usize::try_from(arg)
                .ok()
                .and_then(|slot| context.globals.get(slot));
            match global {
                Some(global) => tracing::trace!(index, op = name, arg, %global, "instruction"),
                None => tracing::trace!(index, op = name, arg, "instruction"),
            }
        }
        (_, Some(arg)) => tracing::trace!(index, op = name, arg, "instruction"),
        (_, None) => tracing::trace!(index, op = name, "instruction"),
    }
}
