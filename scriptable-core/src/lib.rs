#![cfg_attr(not(test), no_std)]

//! Scriptable Core - validating decoders for bytecode containers
//!
//! Two binary formats are decoded from a borrowed byte slice into owned,
//! strongly-typed aggregates:
//!
//! - [`AbcFile`]: an ABC container with its constant pools, method
//!   signatures, metadata, class, script and method-body tables.
//! - [`Module`]: a bytecode module with its global table, hashed field names,
//!   the decompressed instruction stream and optional source positions.
//!
//! Decoding either returns the complete aggregate or the first error found,
//! with the byte offset at which it was detected. Nothing is resolved while
//! decoding; typed indices are looked up on the finished aggregate.

extern crate alloc;

pub mod abc;
pub mod decode;
pub mod error;
pub mod format;
pub mod module;
pub mod reader;
pub mod text;
pub mod validation;
pub mod varint;

pub use abc::{decode_abc, AbcFile};
pub use decode::Decode;
pub use error::*;
pub use format::{detect_format, ContainerFormat, ModuleHeader};
pub use module::{decode_module, Module, Opcode};
pub use reader::Cursor;
pub use text::RawString;
pub use validation::check_references;
