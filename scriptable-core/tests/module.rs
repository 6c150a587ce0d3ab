mod common;

use pretty_assertions::assert_eq;
use scriptable_core::module::{FunctionRef, GlobalValue, SourcePosition};
use scriptable_core::varint::encode_avm_int;
use scriptable_core::{
    decode_module, detect_format, ContainerFormat, DecodeError, ModuleHeader, Opcode, RawString,
};

#[test]
fn test_sample_module() {
    let module = decode_module(&common::sample_module()).unwrap();

    assert_eq!(module.header, ModuleHeader::new(3, 2, 5));
    assert_eq!(
        module.globals,
        [
            GlobalValue::String(RawString::from("print")),
            GlobalValue::Function(FunctionRef {
                position: 0,
                extra_args: 1
            }),
            GlobalValue::DebugMarker,
        ]
    );
    assert_eq!(module.fields.names(), [RawString::from("x"), RawString::from("length")]);
    assert_eq!(module.fields.lookup(b"length"), Some(1));

    assert_eq!(module.code, common::sample_code());
    assert_eq!(module.instructions().len(), 5);
    assert_eq!(module.entry, 0);
    assert_eq!(Opcode::from_cell(module.code[4]), Some(Opcode::Ret));

    let debug = module.debug.as_ref().unwrap();
    assert_eq!(debug.files, [RawString::from("m.n")]);
    assert_eq!(debug.len(), 5);
    assert_eq!(module.source_position(0), Some(SourcePosition { file: 0, line: 0 }));
    assert_eq!(module.source_position(4), Some(SourcePosition { file: 0, line: 1 }));
}

#[test]
fn test_decoding_is_idempotent() {
    let bytes = common::sample_module();
    assert_eq!(decode_module(&bytes), decode_module(&bytes));
    assert_eq!(detect_format(&bytes), Some(ContainerFormat::Module));
}

#[test]
fn test_reversed_magic_is_rejected() {
    let mut bytes = common::sample_module();
    bytes[..4].reverse();
    assert!(matches!(
        decode_module(&bytes),
        Err(DecodeError::BadMagic { offset: 0, .. })
    ));
}

#[test]
fn test_debug_count_must_match_code_size() {
    let mut bytes = ModuleHeader::new(1, 0, 5).to_bytes();
    bytes.extend([0x05, 0x01, b'a', 0x00]);
    let npos_offset = bytes.len();
    encode_avm_int(4, &mut bytes);
    // slots that would have been valid for four positions
    bytes.extend([0x01, (3 << 2) | 2]);

    assert_eq!(
        decode_module(&bytes),
        Err(DecodeError::CodeSizeMismatch {
            offset: npos_offset,
            declared: 4,
            code_size: 5
        })
    );
}

#[test]
fn test_debug_without_files() {
    let mut bytes = ModuleHeader::new(1, 0, 0).to_bytes();
    let at = bytes.len() + 1;
    bytes.extend([0x05, 0x00]);
    assert_eq!(
        decode_module(&bytes),
        Err(DecodeError::NoDebugFiles { offset: at })
    );
}

#[test]
fn test_function_past_code_end() {
    let mut bytes = ModuleHeader::new(1, 0, 2).to_bytes();
    let at = bytes.len() + 1;
    bytes.push(0x02);
    bytes.extend(2u32.to_le_bytes());
    bytes.extend([0x00, 0x00]);

    assert_eq!(
        decode_module(&bytes),
        Err(DecodeError::BadCodePosition {
            offset: at,
            position: 2,
            code_size: 2
        })
    );
}

#[test]
fn test_unterminated_global_string() {
    let mut bytes = ModuleHeader::new(1, 0, 0).to_bytes();
    let at = bytes.len() + 1;
    bytes.push(0x01);
    bytes.extend(std::iter::repeat(b'a').take(300));
    bytes.push(0x00);

    assert_eq!(
        decode_module(&bytes),
        Err(DecodeError::UnterminatedString { offset: at, limit: 256 })
    );
}

#[test]
fn test_float_and_wide_string_globals() {
    let mut bytes = ModuleHeader::new(2, 0, 0).to_bytes();
    bytes.extend(b"\x04-0.25e2\0");
    bytes.extend(b"\x03\x03\x00a\0b");

    let module = decode_module(&bytes).unwrap();
    assert_eq!(module.globals[0], GlobalValue::Float(-25.0));
    assert_eq!(
        module.globals[1].as_string().unwrap().as_bytes(),
        b"a\0b"
    );
    assert_eq!(module.code, [Opcode::TERMINATOR]);
}

#[test]
fn test_nan_global_is_idempotent() {
    let mut bytes = ModuleHeader::new(1, 0, 0).to_bytes();
    bytes.extend(b"\x04nan\0");

    let first = decode_module(&bytes).unwrap();
    assert!(matches!(first.globals[0], GlobalValue::Float(value) if value.is_nan()));
    assert_eq!(first, decode_module(&bytes).unwrap());
}

#[test]
fn test_operand_past_code_size() {
    let mut bytes = ModuleHeader::new(0, 0, 1).to_bytes();
    let at = bytes.len();
    bytes.push((Opcode::AccInt as u8) << 2 | 3);
    bytes.extend(0x1234_5678u32.to_le_bytes());

    assert_eq!(
        decode_module(&bytes),
        Err(DecodeError::CodeSizeMismatch {
            offset: at,
            declared: 2,
            code_size: 1
        })
    );
}

#[test]
fn test_colliding_field_names() {
    let mut bytes = ModuleHeader::new(0, 2, 0).to_bytes();
    bytes.extend([b'A', 0x01, 0x00, b'@', 0xE0, 0x00]);

    let module = decode_module(&bytes).unwrap();
    assert_eq!(module.fields.len(), 2);
    assert_eq!(module.fields.hash_count(), 1);
    assert_eq!(module.fields.lookup(&[b'A', 0x01]), Some(1));
}
