//! Source-position debug table
//!
//! Layout: a file count (one byte, or two when the first byte has its high
//! bit set), that many null-terminated file names, a varint slot count that
//! must equal the code size, then a stream of tag bytes producing one
//! `{file, line}` slot per instruction cell.

use alloc::vec::Vec;

use super::global::read_module_string;
use crate::format::constants::module::LARGE_FILE_COUNT;
use crate::reader::Cursor;
use crate::text::RawString;
use crate::{DecodeError, Result};

/// Largest number of slots a single tag byte can produce
const MAX_RUN: usize = 15;

/// File and line of one instruction cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourcePosition {
    /// Index into [`DebugTable::files`]; not checked against the file count
    pub file: u32,
    pub line: u32,
}

/// Decoded debug table: one position per instruction cell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugTable {
    pub files: Vec<RawString>,
    pub positions: Vec<SourcePosition>,
}

impl DebugTable {
    /// Decode the table for a module of `code_size` cells
    pub(crate) fn read(cursor: &mut Cursor<'_>, code_size: u32) -> Result<Self> {
        let files_offset = cursor.position();
        let (file_count, large_files) = read_file_count(cursor)?;
        if file_count == 0 {
            return Err(DecodeError::NoDebugFiles {
                offset: files_offset,
            });
        }

        let mut files = Vec::with_capacity(file_count.min(cursor.remaining()));
        for _ in 0..file_count {
            files.push(RawString::from(read_module_string(cursor)?));
        }

        let npos_offset = cursor.position();
        let npos = cursor.read_avm_int()?;
        if npos != code_size {
            return Err(DecodeError::CodeSizeMismatch {
                offset: npos_offset,
                declared: npos,
                code_size,
            });
        }

        let positions = read_positions(cursor, npos, large_files)?;
        Ok(Self { files, positions })
    }

    /// Number of position slots
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of instruction cell `index`
    pub fn position(&self, index: usize) -> Option<SourcePosition> {
        self.positions.get(index).copied()
    }

    pub fn file_name(&self, file: u32) -> Option<&RawString> {
        self.files.get(file as usize)
    }

    /// File name and line of instruction cell `index`
    pub fn source_of(&self, index: usize) -> Option<(&RawString, u32)> {
        let pos = self.position(index)?;
        Some((self.file_name(pos.file)?, pos.line))
    }
}

fn read_file_count(cursor: &mut Cursor<'_>) -> Result<(usize, bool)> {
    let first = cursor.read_byte()?;
    if first >= LARGE_FILE_COUNT {
        let second = cursor.read_byte()?;
        let count = (((first & 0x7F) as usize) << 8) | second as usize;
        Ok((count, true))
    } else {
        Ok((first as usize, false))
    }
}

fn read_positions(
    cursor: &mut Cursor<'_>,
    npos: u32,
    large_files: bool,
) -> Result<Vec<SourcePosition>> {
    let total = npos as usize;
    let capacity = total.min(cursor.remaining().saturating_mul(MAX_RUN));
    let mut positions = Vec::with_capacity(capacity);
    let mut current = SourcePosition::default();

    while positions.len() < total {
        let offset = cursor.position();
        let c = cursor.read_byte()?;

        if c & 1 != 0 {
            let mut file = (c >> 1) as u32;
            if large_files {
                file = (file << 8) | cursor.read_byte()? as u32;
            }
            current.file = file;
            positions.push(current);
        } else if c & 2 != 0 {
            let delta = (c >> 6) as u32;
            let count = ((c >> 2) & 0x0F) as usize;
            if positions.len() + count > total {
                return Err(DecodeError::DebugRunOverflow {
                    offset,
                    position: positions.len() as u32,
                    count: count as u32,
                    npos,
                });
            }
            current.line = current.line.wrapping_add(delta);
            positions.extend(core::iter::repeat(current).take(count));
        } else if c & 4 != 0 {
            current.line = current.line.wrapping_add((c >> 3) as u32);
            positions.push(current);
        } else {
            let [b2, b3] = cursor.read_array::<2>()?;
            current.line = ((c >> 3) as u32) | ((b2 as u32) << 5) | ((b3 as u32) << 13);
            positions.push(current);
        }
    }

    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(body: &[u8], code_size: u32) -> Result<DebugTable> {
        let mut bytes = alloc::vec![0x01];
        bytes.extend_from_slice(b"main.n\0");
        bytes.extend_from_slice(body);
        DebugTable::read(&mut Cursor::new(&bytes), code_size)
    }

    #[test]
    fn test_positions() {
        let body = [
            0x05, // npos
            0x03, // file 1
            0x0C, // line += 1
            (1 << 6) | (2 << 2) | 2, // run of 2, line += 1
            0x28, 0x01, 0x00, // line = 5 | 1 << 5
        ];
        let table = table(&body, 5).unwrap();

        assert_eq!(table.files, [RawString::from("main.n")]);
        assert_eq!(
            table.positions,
            [
                SourcePosition { file: 1, line: 0 },
                SourcePosition { file: 1, line: 1 },
                SourcePosition { file: 1, line: 2 },
                SourcePosition { file: 1, line: 2 },
                SourcePosition { file: 1, line: 37 },
            ]
        );
        assert_eq!(table.source_of(0), None);
    }

    #[test]
    fn test_file_lookup() {
        let table = table(&[0x02, 0x01, 0x14], 2).unwrap();
        assert_eq!(table.position(1), Some(SourcePosition { file: 0, line: 2 }));
        let (file, line) = table.source_of(1).unwrap();
        assert_eq!(file, "main.n");
        assert_eq!(line, 2);
    }

    #[test]
    fn test_large_file_count() {
        let mut bytes = alloc::vec![0x80, 0x02, b'a', 0, b'b', 0];
        bytes.extend_from_slice(&[0x01, 0x01, 0x01]);
        let table = DebugTable::read(&mut Cursor::new(&bytes), 1).unwrap();
        assert_eq!(table.files.len(), 2);
        assert_eq!(table.positions, [SourcePosition { file: 1, line: 0 }]);
    }

    #[test]
    fn test_no_files() {
        assert_eq!(
            DebugTable::read(&mut Cursor::new(&[0x00, 0x00]), 0),
            Err(DecodeError::NoDebugFiles { offset: 0 })
        );
    }

    #[test]
    fn test_npos_mismatch_precedes_slots() {
        assert_eq!(
            table(&[0x03], 4),
            Err(DecodeError::CodeSizeMismatch {
                offset: 8,
                declared: 3,
                code_size: 4
            })
        );
    }

    #[test]
    fn test_run_overflow() {
        // a run of 3 with only 2 slots declared
        assert_eq!(
            table(&[0x02, (3 << 2) | 2], 2),
            Err(DecodeError::DebugRunOverflow {
                offset: 9,
                position: 0,
                count: 3,
                npos: 2
            })
        );
    }
}
