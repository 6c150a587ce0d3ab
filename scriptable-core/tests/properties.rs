mod common;

use proptest::prelude::*;
use scriptable_core::varint::{avm_int_len, encode_avm_int};
use scriptable_core::{decode_abc, decode_module, Cursor, DecodeError, ModuleHeader, Opcode};

/// Code size plus a stream that produces exactly that many cells
///
/// Random control bytes are used as they come, except that a two-cell
/// encoding landing on the last cell is turned into a one-cell one.
fn code_stream() -> impl Strategy<Value = (u32, Vec<u8>)> {
    (0u32..300).prop_flat_map(|size| {
        let controls = prop::collection::vec((any::<u8>(), any::<i32>()), size as usize);
        (Just(size), controls).prop_map(|(size, controls)| {
            let mut stream = Vec::new();
            let mut cells = 0;
            for (control, operand) in controls {
                if cells == size {
                    break;
                }
                if control & 3 != 0 && cells + 1 == size {
                    stream.push(control & !3);
                    cells += 1;
                    continue;
                }
                stream.push(control);
                match control & 3 {
                    0 => cells += 1,
                    1 => cells += 2,
                    2 => {
                        stream.push(operand as u8);
                        cells += 2;
                    }
                    _ => {
                        stream.extend(operand.to_le_bytes());
                        cells += 2;
                    }
                }
            }
            (size, stream)
        })
    })
}

proptest! {
    #[test]
    fn test_varint_roundtrip(value: u32) {
        let mut bytes = Vec::new();
        encode_avm_int(value, &mut bytes);
        prop_assert_eq!(bytes.len(), avm_int_len(value));

        let mut cursor = Cursor::new(&bytes);
        prop_assert_eq!(cursor.read_avm_int(), Ok(value));
        prop_assert!(cursor.is_empty());
    }

    #[test]
    fn test_varint_fifth_byte_over_fifteen(
        prefix in prop::array::uniform4(0x80u8..=0xFF),
        last in 16u8..=0xFF,
    ) {
        let mut bytes = prefix.to_vec();
        bytes.push(last);
        let result = Cursor::new(&bytes).read_avm_int();
        prop_assert_eq!(result, Err(DecodeError::BadIntEncoding { offset: 4, byte: last }));
    }

    #[test]
    fn test_code_has_declared_cells((size, stream) in code_stream()) {
        let mut bytes = ModuleHeader::new(0, 0, size).to_bytes();
        bytes.extend(&stream);

        let module = decode_module(&bytes).unwrap();
        prop_assert_eq!(module.code.len(), size as usize + 1);
        prop_assert_eq!(module.code.last().copied(), Some(Opcode::TERMINATOR));
    }

    #[test]
    fn test_code_never_overshoots(
        size in 0u32..64,
        stream in prop::collection::vec(any::<u8>(), 0..400),
    ) {
        let mut bytes = ModuleHeader::new(0, 0, size).to_bytes();
        bytes.extend(&stream);

        match decode_module(&bytes) {
            Ok(module) => prop_assert_eq!(module.code.len(), size as usize + 1),
            Err(err) => prop_assert!(
                matches!(
                    err,
                    DecodeError::UnexpectedEnd { .. } | DecodeError::CodeSizeMismatch { .. }
                ),
                "{:?}",
                err
            ),
        }
    }

    #[test]
    fn test_truncated_abc_is_unexpected_end(cut in 0usize..1000) {
        let bytes = common::sample_abc();
        let cut = cut % bytes.len();
        let err = decode_abc(&bytes[..cut]).unwrap_err();
        prop_assert!(err.is_truncation(), "cut at {}: {:?}", cut, err);
    }

    #[test]
    fn test_truncated_module_is_unexpected_end(cut in 0usize..1000) {
        let bytes = common::sample_module();
        let cut = cut % bytes.len();
        let err = decode_module(&bytes[..cut]).unwrap_err();
        prop_assert!(err.is_truncation(), "cut at {}: {:?}", cut, err);
    }

    #[test]
    fn test_arbitrary_input_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = decode_abc(&bytes);
        let _ = decode_module(&bytes);
    }
}
