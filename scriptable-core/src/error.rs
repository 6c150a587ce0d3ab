//! Error types for container decoding
//!
//! Every decode failure is terminal for the decode call that produced it.
//! Variants carry the byte offset at which the problem was detected.

use thiserror::Error;

/// Errors that can occur while decoding an ABC container or a module
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A read would cross the end of the buffer
    #[error("unexpected end of data at offset {offset:#x}: needed {needed} byte(s), {remaining} left")]
    UnexpectedEnd {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// The fifth byte of an AVM varint carried more than 4 bits
    #[error("bad integer encoding at offset {offset:#x}: fifth byte {byte:#04x} exceeds 15")]
    BadIntEncoding { offset: usize, byte: u8 },

    /// The high byte of a fixed u30 had one of its two reserved bits set
    #[error("u30 out of bounds at offset {offset:#x}: high byte {byte:#04x}")]
    U30Overflow { offset: usize, byte: u8 },

    /// Multiname tag outside the defined set
    #[error("unknown multiname kind {tag:#04x} at offset {offset:#x}")]
    UnknownMultinameKind { offset: usize, tag: u8 },

    /// Trait kind nibble outside the defined set
    #[error("unknown trait kind {kind} at offset {offset:#x}")]
    UnknownTraitKind { offset: usize, kind: u8 },

    /// Namespace kind byte outside the defined set
    #[error("unknown namespace kind {tag:#04x} at offset {offset:#x}")]
    UnknownNamespaceKind { offset: usize, tag: u8 },

    /// Module global tag outside the defined set
    #[error("unknown global tag {tag} at offset {offset:#x}")]
    UnknownGlobalTag { offset: usize, tag: u8 },

    /// ABC container version marker did not match
    #[error("unsupported ABC version {found:#010x} at offset {offset:#x}")]
    UnsupportedVersion { offset: usize, found: u32 },

    /// Module magic did not match
    #[error("bad module magic {found:#010x} at offset {offset:#x}")]
    BadMagic { offset: usize, found: u32 },

    /// Function reference points outside the code
    #[error("bad code position {position} at offset {offset:#x} (code size {code_size})")]
    BadCodePosition {
        offset: usize,
        position: u32,
        code_size: u32,
    },

    /// Debug table position count, or the cells an instruction stream
    /// produces, differs from the header code size
    #[error("code size mismatch at offset {offset:#x}: {declared} cells against header {code_size}")]
    CodeSizeMismatch {
        offset: usize,
        declared: u32,
        code_size: u32,
    },

    /// Debug table declares zero source files
    #[error("no debug files at offset {offset:#x}")]
    NoDebugFiles { offset: usize },

    /// Debug run would cover more slots than declared
    #[error("bad line count at offset {offset:#x}: run of {count} at slot {position} exceeds {npos}")]
    DebugRunOverflow {
        offset: usize,
        position: u32,
        count: u32,
        npos: u32,
    },

    /// No terminator found within the string buffer bound
    #[error("unterminated string at offset {offset:#x} (limit {limit} bytes)")]
    UnterminatedString { offset: usize, limit: usize },

    /// A stored index does not address an entry of its pool
    #[error("{pool} index {index} out of range (pool length {len})")]
    IndexOutOfRange {
        pool: &'static str,
        index: u32,
        len: usize,
    },
}

impl DecodeError {
    /// Byte offset at which the error was detected
    ///
    /// Reference-check failures are not tied to a position in the input and
    /// report offset 0.
    pub const fn offset(&self) -> usize {
        match *self {
            DecodeError::UnexpectedEnd { offset, .. }
            | DecodeError::BadIntEncoding { offset, .. }
            | DecodeError::U30Overflow { offset, .. }
            | DecodeError::UnknownMultinameKind { offset, .. }
            | DecodeError::UnknownTraitKind { offset, .. }
            | DecodeError::UnknownNamespaceKind { offset, .. }
            | DecodeError::UnknownGlobalTag { offset, .. }
            | DecodeError::UnsupportedVersion { offset, .. }
            | DecodeError::BadMagic { offset, .. }
            | DecodeError::BadCodePosition { offset, .. }
            | DecodeError::CodeSizeMismatch { offset, .. }
            | DecodeError::NoDebugFiles { offset }
            | DecodeError::DebugRunOverflow { offset, .. }
            | DecodeError::UnterminatedString { offset, .. } => offset,
            DecodeError::IndexOutOfRange { .. } => 0,
        }
    }

    /// Whether the error came from running out of input
    pub const fn is_truncation(&self) -> bool {
        matches!(self, DecodeError::UnexpectedEnd { .. })
    }
}

/// Result type for decode operations
pub type Result<T> = core::result::Result<T, DecodeError>;
