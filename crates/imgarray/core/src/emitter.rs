// ImgArray
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Byte-to-literal encoder
//!
//! Writes `<type> <name>[N] = {`, then every input byte as an unpadded
//! lowercase `0x..,` literal, wrapping after each tenth value, then `};`.
//! The output is a pure function of the bytes and the [`ArrayFormat`].

use crate::format::ArrayFormat;
use std::io::{self, Read, Write};
use thiserror::Error;
use tracing::debug;

/// Literals per line before wrapping
pub const VALUES_PER_LINE: usize = 10;

/// Size of each block read from the input
pub const READ_BLOCK_SIZE: usize = 64 * 1024;

const LINE_BREAK: &str = "\n  ";
const CLOSING: &str = "\n};\n";
const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Failures of the streaming encoder, before any path is attached
#[derive(Error, Debug)]
pub enum EmitError {
    #[error("read failed: {0}")]
    Read(#[source] io::Error),

    #[error("write failed: {0}")]
    Write(#[source] io::Error),

    #[error("input ended after {actual} of {expected} bytes")]
    Truncated { expected: u64, actual: u64 },
}

/// Tracks the wrap position across block boundaries
#[derive(Debug, Default)]
struct LiteralEncoder {
    emitted: u64,
    on_line: usize,
}

impl LiteralEncoder {
    fn encode(&mut self, bytes: &[u8], out: &mut String) {
        for &byte in bytes {
            out.push_str("0x");
            if byte >= 0x10 {
                out.push(HEX_DIGITS[(byte >> 4) as usize] as char);
            }
            out.push(HEX_DIGITS[(byte & 0x0f) as usize] as char);
            out.push(',');

            self.emitted += 1;
            self.on_line += 1;
            if self.on_line == VALUES_PER_LINE {
                out.push_str(LINE_BREAK);
                self.on_line = 0;
            }
        }
    }
}

/// Encodes byte streams as a C array declaration
#[derive(Debug, Clone, Default)]
pub struct ByteArrayEmitter {
    format: ArrayFormat,
}

impl ByteArrayEmitter {
    pub fn new(format: ArrayFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> &ArrayFormat {
        &self.format
    }

    /// Stream exactly `length` bytes from `reader` into `writer`.
    ///
    /// `length` is the declared array size and must be known up front. A
    /// reader that runs dry early yields [`EmitError::Truncated`]; bytes past
    /// `length` are never read. Returns the number of literals written.
    ///
    /// The writer is flushed before returning. Pass a buffered writer; each
    /// input block becomes a single `write_all`.
    pub fn emit<R: Read, W: Write>(&self, reader: R, length: u64, mut writer: W) -> Result<u64, EmitError> {
        let mut reader = reader.take(length);
        let mut encoder = LiteralEncoder::default();
        let mut block = vec![0u8; READ_BLOCK_SIZE];
        // Worst case is 5 chars per byte plus one line break per ten bytes.
        let mut text = String::with_capacity(READ_BLOCK_SIZE * 6);

        text.push_str(&self.format.declaration(length));
        text.push_str(LINE_BREAK);
        writer.write_all(text.as_bytes()).map_err(EmitError::Write)?;

        loop {
            let n = match reader.read(&mut block) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(EmitError::Read(e)),
            };

            text.clear();
            encoder.encode(&block[..n], &mut text);
            writer.write_all(text.as_bytes()).map_err(EmitError::Write)?;
        }

        if encoder.emitted < length {
            return Err(EmitError::Truncated {
                expected: length,
                actual: encoder.emitted,
            });
        }

        writer.write_all(CLOSING.as_bytes()).map_err(EmitError::Write)?;
        writer.flush().map_err(EmitError::Write)?;

        debug!(array = %self.format.array_name, literals = encoder.emitted, "array emitted");
        Ok(encoder.emitted)
    }

    /// Render an in-memory buffer as a complete declaration
    pub fn emit_to_string(&self, bytes: &[u8]) -> String {
        let mut text = self.format.declaration(bytes.len() as u64);
        text.push_str(LINE_BREAK);
        LiteralEncoder::default().encode(bytes, &mut text);
        text.push_str(CLOSING);
        text
    }
}

/// Number of lines carrying literals for an input of `length` bytes
pub fn literal_lines(length: u64) -> u64 {
    length.div_ceil(VALUES_PER_LINE as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit_vec(bytes: &[u8]) -> String {
        let emitter = ByteArrayEmitter::default();
        let mut out = Vec::new();
        let written = emitter.emit(bytes, bytes.len() as u64, &mut out).unwrap();
        assert_eq!(written, bytes.len() as u64);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(emit_vec(&[]), "unsigned char floppy_array[0] = {\n  \n};\n");
    }

    #[test]
    fn test_mixed_values() {
        assert_eq!(
            emit_vec(&[0x00, 0x01, 0x0a, 0xff]),
            "unsigned char floppy_array[4] = {\n  0x0,0x1,0xa,0xff,\n};\n"
        );
    }

    #[test]
    fn test_twelve_zero_bytes_wrap_once() {
        let expected = concat!(
            "unsigned char floppy_array[12] = {\n",
            "  0x0,0x0,0x0,0x0,0x0,0x0,0x0,0x0,0x0,0x0,\n",
            "  0x0,0x0,\n",
            "};\n"
        );
        assert_eq!(emit_vec(&[0u8; 12]), expected);
    }

    #[test]
    fn test_exact_multiple_of_ten_leaves_indent_line() {
        let bytes: Vec<u8> = (0x10..0x1a).collect();
        let expected = concat!(
            "unsigned char floppy_array[10] = {\n",
            "  0x10,0x11,0x12,0x13,0x14,0x15,0x16,0x17,0x18,0x19,\n",
            "  \n",
            "};\n"
        );
        assert_eq!(emit_vec(&bytes), expected);
    }

    #[test]
    fn test_streaming_matches_in_memory_across_blocks() {
        // Spans several read blocks with a wrap position that does not align to them.
        let bytes: Vec<u8> = (0..READ_BLOCK_SIZE * 2 + 7).map(|i| (i * 31 % 256) as u8).collect();
        let emitter = ByteArrayEmitter::default();
        assert_eq!(emit_vec(&bytes), emitter.emit_to_string(&bytes));
    }

    #[test]
    fn test_custom_format() {
        let emitter = ByteArrayEmitter::new(ArrayFormat::new("boot_sector", "const uint8_t"));
        assert_eq!(emitter.emit_to_string(&[0xab]), "const uint8_t boot_sector[1] = {\n  0xab,\n};\n");
    }

    #[test]
    fn test_short_reader_is_truncated() {
        let emitter = ByteArrayEmitter::default();
        let mut out = Vec::new();
        let err = emitter.emit(&[1u8, 2, 3][..], 5, &mut out).unwrap_err();
        assert!(matches!(err, EmitError::Truncated { expected: 5, actual: 3 }));
    }

    #[test]
    fn test_extra_bytes_are_ignored() {
        let emitter = ByteArrayEmitter::default();
        let mut out = Vec::new();
        let written = emitter.emit(&[1u8, 2, 3, 4][..], 2, &mut out).unwrap();
        assert_eq!(written, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "unsigned char floppy_array[2] = {\n  0x1,0x2,\n};\n");
    }

    #[test]
    fn test_write_failure_is_reported() {
        struct FullDisk;
        impl Write for FullDisk {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("no space left on device"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = ByteArrayEmitter::default().emit(&[0u8; 4][..], 4, FullDisk).unwrap_err();
        assert!(matches!(err, EmitError::Write(_)));
    }

    #[test]
    fn test_literal_lines() {
        assert_eq!(literal_lines(0), 0);
        assert_eq!(literal_lines(1), 1);
        assert_eq!(literal_lines(10), 1);
        assert_eq!(literal_lines(11), 2);
        assert_eq!(literal_lines(1_474_560), 147_456);
    }
}
