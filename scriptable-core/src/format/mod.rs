//! Wire-format definitions shared by both decoders
//!
//! Constants, tag values and header records. The table decoders live in
//! `abc` and `module`.

pub mod constants;
pub mod header;

pub use header::{detect_format, read_abc_version, ContainerFormat, ModuleHeader};
