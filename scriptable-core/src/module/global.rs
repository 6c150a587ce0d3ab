//! Global-value table entries

use crate::format::constants::module::{global as tag, CODE_POSITION_MASK, EXTRA_ARGS_SHIFT};
use crate::format::constants::STRING_BUFFER_LEN;
use crate::reader::Cursor;
use crate::text::RawString;
use crate::{DecodeError, Result};

/// Packed function reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionRef {
    /// Code position of the function entry, always below the code size
    pub position: u32,
    /// Number of extra arguments
    pub extra_args: u8,
}

impl FunctionRef {
    /// Split a packed reference into position and extra-argument count
    pub const fn unpack(combined: u32) -> Self {
        Self {
            position: combined & CODE_POSITION_MASK,
            extra_args: (combined >> EXTRA_ARGS_SHIFT) as u8,
        }
    }

    /// Pack back into the 32-bit wire form
    pub const fn pack(&self) -> u32 {
        ((self.extra_args as u32) << EXTRA_ARGS_SHIFT) | (self.position & CODE_POSITION_MASK)
    }
}

/// Global table entry
///
/// Floats compare by bit pattern, so a `nan` entry equals itself and the
/// same module decoded twice compares equal.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GlobalValue {
    /// Null-terminated string
    String(RawString),
    /// Function entry in the instruction stream
    Function(FunctionRef),
    /// Length-prefixed string
    WideString(RawString),
    /// Float literal
    Float(f64),
    /// The debug table was read at this slot; the slot holds no value
    DebugMarker,
}

impl GlobalValue {
    /// Wire tag of this entry
    pub const fn tag(&self) -> u8 {
        match self {
            Self::String(_) => tag::STRING,
            Self::Function(_) => tag::FUNCTION,
            Self::WideString(_) => tag::WIDE_STRING,
            Self::Float(_) => tag::FLOAT,
            Self::DebugMarker => tag::DEBUG,
        }
    }

    /// String payload of either string kind
    pub fn as_string(&self) -> Option<&RawString> {
        match self {
            Self::String(s) | Self::WideString(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for GlobalValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b)) | (Self::WideString(a), Self::WideString(b)) => {
                a == b
            }
            (Self::Function(a), Self::Function(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::DebugMarker, Self::DebugMarker) => true,
            _ => false,
        }
    }
}

impl Eq for GlobalValue {}

impl core::fmt::Display for GlobalValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::String(s) | Self::WideString(s) => write!(f, "{s:?}"),
            Self::Function(func) => write!(f, "function @{}", func.position),
            Self::Float(value) => write!(f, "{value}"),
            Self::DebugMarker => f.write_str("(debug)"),
        }
    }
}

/// Read a null-terminated string within the module string bound
pub(crate) fn read_module_string<'a>(cursor: &mut Cursor<'a>) -> Result<&'a [u8]> {
    cursor.read_cstring(STRING_BUFFER_LEN)
}

/// Read a function reference and check it against the code size
pub(crate) fn read_function_ref(cursor: &mut Cursor<'_>, code_size: u32) -> Result<FunctionRef> {
    let offset = cursor.position();
    let func = FunctionRef::unpack(cursor.read_fixed32()? as u32);
    if func.position >= code_size {
        return Err(DecodeError::BadCodePosition {
            offset,
            position: func.position,
            code_size,
        });
    }
    Ok(func)
}

/// Read a string with a 2-byte length prefix
pub(crate) fn read_wide_string(cursor: &mut Cursor<'_>) -> Result<RawString> {
    let len = cursor.read_fixed16()? as usize;
    Ok(RawString::from(cursor.read_block(len)?))
}

/// Characters C `isspace` accepts
const C_SPACE: &[char] = &[' ', '\t', '\n', '\x0B', '\x0C', '\r'];

/// Parse a decimal float literal with C `atof` leniency
///
/// Leading C whitespace (space, `\t`, `\n`, `\v`, `\f`, `\r`) is skipped and
/// the longest prefix that forms a valid decimal literal, `inf` or `nan` is
/// used; text with no such prefix yields `0.0`. Hexadecimal floats are not
/// recognised: `0x10` reads as `0`.
pub fn parse_float_literal(bytes: &[u8]) -> f64 {
    let text = match core::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => match core::str::from_utf8(&bytes[..err.valid_up_to()]) {
            Ok(text) => text,
            Err(_) => return 0.0,
        },
    };
    let text = text.trim_start_matches(C_SPACE);

    // Only ASCII characters can take part in a literal, so char boundaries
    // below the first non-ASCII byte are byte boundaries.
    let candidate_end = text
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')))
        .map_or(text.len(), |(i, _)| i);

    for end in (1..=candidate_end).rev() {
        if let Ok(value) = text[..end].parse::<f64>() {
            return value;
        }
    }
    0.0
}
