//! Format constants, markers and tag values for both container formats

/// Bound of a null-terminated module string, terminator included
pub const STRING_BUFFER_LEN: usize = 256;

/// ABC container constants
pub mod abc {
    /// Version marker (minor 16, major 46) read as a fixed u30
    pub const VERSION: u32 = 0x002E_0010;

    /// Version marker as it appears on the wire
    pub const VERSION_BYTES: [u8; 4] = VERSION.to_le_bytes();

    /// Namespace kind tags
    pub mod namespace {
        pub const PRIVATE: u8 = 0x05;
        pub const NAMESPACE: u8 = 0x08;
        pub const PUBLIC: u8 = 0x16;
        pub const INTERNAL: u8 = 0x17;
        pub const PROTECTED: u8 = 0x18;
        pub const EXPLICIT: u8 = 0x19;
        pub const STATIC_PROTECTED: u8 = 0x1A;
    }

    /// Multiname kind tags
    pub mod multiname {
        pub const QNAME: u8 = 0x07;
        pub const QNAME_A: u8 = 0x0D;
        pub const RTQNAME: u8 = 0x0F;
        pub const RTQNAME_A: u8 = 0x10;
        pub const RTQNAME_L: u8 = 0x11;
        pub const RTQNAME_LA: u8 = 0x12;
        pub const MULTINAME: u8 = 0x09;
        pub const MULTINAME_A: u8 = 0x0E;
        pub const MULTINAME_L: u8 = 0x1B;
        pub const MULTINAME_LA: u8 = 0x1C;
    }

    /// Method signature flag bits
    pub mod method {
        pub const NEED_ARGUMENTS: u8 = 0x01;
        pub const NEED_ACTIVATION: u8 = 0x02;
        pub const NEED_REST: u8 = 0x04;
        pub const HAS_OPTIONAL: u8 = 0x08;
        pub const SET_DXNS: u8 = 0x40;
        pub const HAS_PARAM_NAMES: u8 = 0x80;
    }

    /// Trait kind values (low nibble of the trait flag byte)
    pub mod trait_kind {
        pub const SLOT: u8 = 0;
        pub const METHOD: u8 = 1;
        pub const GETTER: u8 = 2;
        pub const SETTER: u8 = 3;
        pub const CLASS: u8 = 4;
        pub const FUNCTION: u8 = 5;
        pub const CONST: u8 = 6;

        /// Mask selecting the kind from the flag byte
        pub const MASK: u8 = 0x0F;
    }

    /// Trait attribute bits (high nibble of the trait flag byte)
    pub mod trait_attr {
        pub const FINAL: u8 = 0x10;
        pub const OVERRIDE: u8 = 0x20;
        pub const METADATA: u8 = 0x40;
    }

    /// Instance-info flag bits
    pub mod instance {
        pub const SEALED: u8 = 0x01;
        pub const FINAL: u8 = 0x02;
        pub const INTERFACE: u8 = 0x04;
        pub const PROTECTED_NS: u8 = 0x08;
    }
}

/// Bytecode module constants
pub mod module {
    /// Magic constant, compared big-endian (wire bytes `4F 4B 45 4E`)
    pub const MAGIC: u32 = 0x4F4B_454E;

    /// Magic as it appears on the wire
    pub const MAGIC_BYTES: [u8; 4] = MAGIC.to_be_bytes();

    /// Low bits of a function reference holding the code position
    pub const CODE_POSITION_MASK: u32 = 0x00FF_FFFF;

    /// Shift extracting the extra-argument count from a function reference
    pub const EXTRA_ARGS_SHIFT: u32 = 24;

    /// Global table tags
    pub mod global {
        pub const STRING: u8 = 1;
        pub const FUNCTION: u8 = 2;
        pub const WIDE_STRING: u8 = 3;
        pub const FLOAT: u8 = 4;
        pub const DEBUG: u8 = 5;
    }

    /// Debug file-count byte at or above this value uses the two-byte form
    pub const LARGE_FILE_COUNT: u8 = 0x80;

    /// Mask selecting the field hash bits
    pub const FIELD_HASH_MASK: u32 = 0x7FFF_FFFF;

    /// Multiplier of the field-name hash
    pub const FIELD_HASH_MULTIPLIER: u32 = 223;
}
