/// 8-bit byte mode segment (mode 0100)
use super::bit_buffer::BitBuffer;
use crate::models::Version;

/// UTF-8 byte order mark, prefixed when the text needed multi-byte sequences
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Data encoding mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Mode {
    /// 8-bit byte mode
    Byte,
}

impl Mode {
    /// 4-bit mode indicator
    pub fn indicator(&self) -> u32 {
        match self {
            Mode::Byte => 0b0100,
        }
    }

    /// Width of the character count field for this mode and version
    pub fn length_in_bits(&self, version: Version) -> usize {
        match self {
            Mode::Byte => {
                if version.number() < 10 {
                    8
                } else {
                    16
                }
            }
        }
    }
}

/// One input string in byte mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteSegment {
    data: Vec<u8>,
}

impl ByteSegment {
    /// Encode `text` one UTF-16 code unit at a time
    ///
    /// Surrogate halves are encoded on their own as 3-byte sequences, so characters
    /// outside the BMP come out as 6 bytes rather than 4. When the byte count differs
    /// from the UTF-16 length a BOM is prepended.
    pub fn new(text: &str) -> Self {
        let mut units = 0usize;
        let mut data = Vec::with_capacity(text.len() + UTF8_BOM.len());
        for unit in text.encode_utf16() {
            units += 1;
            push_code_unit(&mut data, unit as u32);
        }
        if data.len() != units {
            let mut prefixed = UTF8_BOM.to_vec();
            prefixed.append(&mut data);
            return Self { data: prefixed };
        }
        Self { data }
    }

    /// Always `Mode::Byte`
    pub fn mode(&self) -> Mode {
        Mode::Byte
    }

    /// Byte count, BOM included
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True only for empty text
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Encoded bytes, BOM included
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Emit every byte as 8 bits
    pub fn write(&self, buffer: &mut BitBuffer) {
        for &byte in &self.data {
            buffer.put(byte as u32, 8);
        }
    }
}

fn push_code_unit(out: &mut Vec<u8>, code: u32) {
    if code < 0x80 {
        out.push(code as u8);
    } else if code < 0x800 {
        out.push(0xC0 | ((code >> 6) & 0x1F) as u8);
        out.push(0x80 | (code & 0x3F) as u8);
    } else if code < 0x10000 {
        out.push(0xE0 | ((code >> 12) & 0x0F) as u8);
        out.push(0x80 | ((code >> 6) & 0x3F) as u8);
        out.push(0x80 | (code & 0x3F) as u8);
    } else {
        out.push(0xF0 | ((code >> 18) & 0x07) as u8);
        out.push(0x80 | ((code >> 12) & 0x3F) as u8);
        out.push(0x80 | ((code >> 6) & 0x3F) as u8);
        out.push(0x80 | (code & 0x3F) as u8);
    }
}
