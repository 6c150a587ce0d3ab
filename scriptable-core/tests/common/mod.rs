//! Hand-assembled container images shared by the integration tests

#![allow(dead_code)]

use scriptable_core::format::constants::abc;
use scriptable_core::module::field_hash;
use scriptable_core::varint::encode_avm_int;
use scriptable_core::{ModuleHeader, Opcode};

/// ABC container with one class, one script and two method bodies
pub fn sample_abc() -> Vec<u8> {
    let mut b = abc::VERSION_BYTES.to_vec();

    // ints: 5, -1
    b.extend([0x03, 0x05, 0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
    // uints: none
    b.push(0x00);
    // doubles: 1.5
    b.push(0x02);
    b.extend(1.5f64.to_ne_bytes());
    // strings: "Main", "run"
    b.extend([0x03, 0x04]);
    b.extend(b"Main");
    b.push(0x03);
    b.extend(b"run");
    // namespaces: public, unnamed
    b.extend([0x02, 0x16, 0x00]);
    // namespace sets: {1}
    b.extend([0x02, 0x01, 0x01]);
    // multinames: Main, run
    b.extend([0x03, 0x07, 0x01, 0x01, 0x07, 0x01, 0x02]);

    // methods: a bare initializer, then run(x = int#1) with param names
    b.extend([0x02, 0x00, 0x00, 0x00, 0x00]);
    b.extend([0x01, 0x01, 0x00, 0x02, 0x88, 0x01, 0x01, 0x03, 0x01]);
    // metadata: none
    b.push(0x00);

    // one class
    b.push(0x01);
    // instance: Main, no super, sealed, no interfaces, init 0, method trait run -> 1
    b.extend([0x01, 0x00, 0x01, 0x00, 0x00, 0x01, 0x02, 0x01, 0x00, 0x01]);
    // class: init 0, slot trait Main with no value
    b.extend([0x00, 0x01, 0x01, 0x00, 0x01, 0x00, 0x00]);

    // scripts: init 0, class trait Main -> class 0
    b.extend([0x01, 0x00, 0x01, 0x01, 0x04, 0x01, 0x00]);

    // method bodies
    b.push(0x02);
    b.extend([0x00, 0x01, 0x01, 0x00, 0x01, 0x01, 0x47, 0x00, 0x00]);
    b.extend([0x01, 0x02, 0x02, 0x00, 0x01, 0x02, 0xD0, 0x30]);
    b.extend([0x01, 0x00, 0x02, 0x02, 0x00, 0x00, 0x00]);

    b
}

/// Code cells of [`sample_module`]
pub fn sample_code() -> Vec<i32> {
    vec![
        Opcode::AccGlobal as i32,
        0,
        Opcode::AccField as i32,
        field_hash(b"length") as i32,
        Opcode::Ret as i32,
        Opcode::TERMINATOR,
    ]
}

/// Module with a string, a function, a debug table, two fields and five cells
pub fn sample_module() -> Vec<u8> {
    let mut b = ModuleHeader::new(3, 2, 5).to_bytes();

    b.push(0x01);
    b.extend(b"print\0");

    b.push(0x02);
    b.extend(0x0100_0000u32.to_le_bytes());

    b.push(0x05);
    b.push(0x01);
    b.extend(b"m.n\0");
    encode_avm_int(5, &mut b);
    // file 0, then a run of 4 one line further
    b.extend([0x01, (1 << 6) | (4 << 2) | 2]);

    b.extend(b"x\0length\0");

    b.extend([(Opcode::AccGlobal as u8) << 2 | 2, 0x00]);
    b.push((Opcode::AccField as u8) << 2 | 3);
    b.extend(field_hash(b"length").to_le_bytes());
    b.push((Opcode::Ret as u8) << 2);

    b
}
