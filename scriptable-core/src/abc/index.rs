//! Typed indices into the ABC pools and tables
//!
//! Each index names the table it points into, so a string index cannot be
//! used to look up a multiname. Resolution happens on the finished
//! [`AbcFile`](super::AbcFile), never while decoding.

use core::fmt;

use crate::decode::Decode;
use crate::reader::Cursor;
use crate::Result;

macro_rules! table_index {
    ($(#[$meta:meta])* $name:ident, $table:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            /// Name of the table this index points into
            pub const TABLE: &'static str = $table;

            /// Position in the table
            pub const fn as_usize(self) -> usize {
                self.0 as usize
            }
        }

        impl From<u32> for $name {
            fn from(index: u32) -> Self {
                Self(index)
            }
        }

        impl Decode for $name {
            fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
                Ok(Self(cursor.read_avm_int()?))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $table, self.0)
            }
        }
    };
}

table_index!(
    /// Index into the string pool
    StringIndex,
    "string"
);
table_index!(
    /// Index into the namespace pool
    NamespaceIndex,
    "namespace"
);
table_index!(
    /// Index into the namespace-set pool
    NamespaceSetIndex,
    "namespace set"
);
table_index!(
    /// Index into the multiname pool
    MultinameIndex,
    "multiname"
);
table_index!(
    /// Index into the method-signature table
    MethodIndex,
    "method"
);
table_index!(
    /// Index into the metadata table
    MetadataIndex,
    "metadata"
);
table_index!(
    /// Index into the class tables (instance-info and class-info share it)
    ClassIndex,
    "class"
);

impl StringIndex {
    /// Read a single-byte string index, as multiname records store them
    pub(crate) fn read_narrow(cursor: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self(cursor.read_byte()? as u32))
    }
}

impl NamespaceIndex {
    /// Read a single-byte namespace index, as multiname records store them
    pub(crate) fn read_narrow(cursor: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self(cursor.read_byte()? as u32))
    }
}

impl NamespaceSetIndex {
    /// Read a single-byte namespace-set index, as multiname records store them
    pub(crate) fn read_narrow(cursor: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self(cursor.read_byte()? as u32))
    }
}
