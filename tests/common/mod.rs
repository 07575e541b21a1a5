//! Reference grid reader for generated symbols
//!
//! Reads a finished symbol back the way a scanner would once the grid is sampled:
//! format and version words, function-module mask, zigzag extraction, unmasking,
//! block de-interleaving, a Reed-Solomon syndrome check and the byte-mode parse.
//! Nothing here calls into the encoder, only the `SymbolView` surface.

#![allow(dead_code)]

use rust_qr_matrix::{ECLevel, SymbolView};

const FORMAT_MASK: u32 = 0x5412;

// Index: [ec_level][version]
const ECC_CODEWORDS_PER_BLOCK: [[u8; 41]; 4] = [
    [
        0, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        0, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ],
    [
        0, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        0, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
];

const NUM_ERROR_CORRECTION_BLOCKS: [[u8; 41]; 4] = [
    [
        0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ],
    [
        0, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ],
    [
        0, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ],
    [
        0, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ],
];

/// What the reader recovered from a symbol
#[derive(Debug, Clone)]
pub struct Decoded {
    pub version: u8,
    pub level: ECLevel,
    pub mask: u8,
    /// Byte-mode payload, BOM included when present
    pub payload: Vec<u8>,
}

impl Decoded {
    /// Payload as text with a leading UTF-8 BOM removed
    pub fn text(&self) -> Result<String, String> {
        let bytes = self
            .payload
            .strip_prefix(&[0xEF, 0xBB, 0xBF])
            .unwrap_or(&self.payload);
        String::from_utf8(bytes.to_vec()).map_err(|e| e.to_string())
    }
}

pub fn read_symbol(symbol: &impl SymbolView) -> Result<Decoded, String> {
    let size = symbol.module_count();
    if size < 21 || (size - 17) % 4 != 0 {
        return Err(format!("bad symbol size {}", size));
    }
    let version = ((size - 17) / 4) as u8;
    let dark = |row: usize, col: usize| symbol.is_dark(row, col).map_err(|e| e.to_string());

    // Format word, both copies
    let mut first = 0u32;
    for (row, col) in format_positions_top_left() {
        first = (first << 1) | dark(row, col)? as u32;
    }
    let mut second = 0u32;
    for (row, col) in format_positions_split(size) {
        second = (second << 1) | dark(row, col)? as u32;
    }
    if first != second {
        return Err(format!("format copies differ: {:015b} vs {:015b}", first, second));
    }
    let data = (0..32u32)
        .find(|&d| format_word(d) == first)
        .ok_or_else(|| format!("invalid format word {:015b}", first))?;
    let level = match data >> 3 {
        0b01 => ECLevel::L,
        0b00 => ECLevel::M,
        0b11 => ECLevel::Q,
        _ => ECLevel::H,
    };
    let mask = (data & 0b111) as u8;

    if !dark(size - 8, 8)? {
        return Err("dark module is light".to_string());
    }

    if version >= 7 {
        let mut word_tr = 0u32;
        let mut word_bl = 0u32;
        for i in (0..18).rev() {
            word_tr = (word_tr << 1) | dark(i / 3, size - 11 + i % 3)? as u32;
            word_bl = (word_bl << 1) | dark(size - 11 + i % 3, i / 3)? as u32;
        }
        let expected = version_word(version as u32);
        if word_tr != expected || word_bl != expected {
            return Err(format!(
                "version words {:018b}/{:018b}, expected {:018b}",
                word_tr, word_bl, expected
            ));
        }
    }

    let function = function_mask(version);

    // Zigzag: start upward at the right edge, skip the timing column
    let mut bits = Vec::new();
    let mut upward = true;
    let mut col = size as isize - 1;
    while col > 0 {
        if col == 6 {
            col -= 1;
            continue;
        }
        let rows: Vec<usize> = if upward {
            (0..size).rev().collect()
        } else {
            (0..size).collect()
        };
        for row in rows {
            for c in [col as usize, col as usize - 1] {
                if function[row][c] {
                    continue;
                }
                bits.push(dark(row, c)? ^ mask_bit(mask, row, c));
            }
        }
        upward = !upward;
        col -= 2;
    }

    let total_codewords = bits.len() / 8;
    let codewords: Vec<u8> = bits
        .chunks_exact(8)
        .take(total_codewords)
        .map(|byte| byte.iter().fold(0u8, |acc, &b| (acc << 1) | b as u8))
        .collect();

    let data = deinterleave_and_check(&codewords, version, level)?;
    let payload = parse_byte_mode(&data, version)?;

    Ok(Decoded {
        version,
        level,
        mask,
        payload,
    })
}

/// Positions around the top-left finder, bit 14 first
fn format_positions_top_left() -> Vec<(usize, usize)> {
    let mut positions = Vec::with_capacity(15);
    for col in [0, 1, 2, 3, 4, 5, 7, 8] {
        positions.push((8, col));
    }
    for row in [7, 5, 4, 3, 2, 1, 0] {
        positions.push((row, 8));
    }
    positions
}

/// Positions beside the bottom-left and top-right finders, bit 14 first
fn format_positions_split(size: usize) -> Vec<(usize, usize)> {
    let mut positions = Vec::with_capacity(15);
    for row in (size - 7..size).rev() {
        positions.push((row, 8));
    }
    for col in size - 8..size {
        positions.push((8, col));
    }
    positions
}

fn poly_remainder(mut value: u32, generator: u32) -> u32 {
    let degree = 31 - generator.leading_zeros();
    while value != 0 && 31 - value.leading_zeros() >= degree {
        value ^= generator << (31 - value.leading_zeros() - degree);
    }
    value
}

fn format_word(data: u32) -> u32 {
    ((data << 10) | poly_remainder(data << 10, 0x537)) ^ FORMAT_MASK
}

fn version_word(version: u32) -> u32 {
    (version << 12) | poly_remainder(version << 12, 0x1F25)
}

fn mask_bit(mask: u8, row: usize, col: usize) -> bool {
    let (i, j) = (row, col);
    match mask {
        0 => (i + j) % 2 == 0,
        1 => i % 2 == 0,
        2 => j % 3 == 0,
        3 => (i + j) % 3 == 0,
        4 => (i / 2 + j / 3) % 2 == 0,
        5 => (i * j) % 2 + (i * j) % 3 == 0,
        6 => ((i * j) % 2 + (i * j) % 3) % 2 == 0,
        _ => ((i + j) % 2 + (i * j) % 3) % 2 == 0,
    }
}

/// Alignment pattern centers for a given version.
pub fn alignment_pattern_positions(version: u8) -> Vec<usize> {
    if version == 1 {
        return Vec::new();
    }
    let num_align = (version / 7) as usize + 2;
    let size = 17 + 4 * version as usize;
    let step = if version == 32 {
        26
    } else {
        let numerator = version as usize * 4 + num_align * 2 + 1;
        let denom = num_align * 2 - 2;
        numerator / denom * 2
    };

    let mut positions = vec![0usize; num_align];
    positions[0] = 6;
    let mut pos = size - 7;
    for i in (1..num_align).rev() {
        positions[i] = pos;
        pos = pos.saturating_sub(step);
    }
    positions
}

/// true = function module, indexed [row][col]
fn function_mask(version: u8) -> Vec<Vec<bool>> {
    let size = 17 + 4 * version as usize;
    let mut mask = vec![vec![false; size]; size];
    let mut mark = |row: usize, col: usize| {
        if row < size && col < size {
            mask[row][col] = true;
        }
    };

    // Finders with separators
    for (top, left) in [(0, 0), (size - 7, 0), (0, size - 7)] {
        for row in top.saturating_sub(1)..(top + 8).min(size) {
            for col in left.saturating_sub(1)..(left + 8).min(size) {
                mark(row, col);
            }
        }
    }

    // Timing
    for i in 0..size {
        mark(6, i);
        mark(i, 6);
    }

    // Alignment, skipping the finder corners
    let align = alignment_pattern_positions(version);
    for &cy in &align {
        for &cx in &align {
            let in_tl = cx <= 8 && cy <= 8;
            let in_tr = cx >= size - 9 && cy <= 8;
            let in_bl = cx <= 8 && cy >= size - 9;
            if in_tl || in_tr || in_bl {
                continue;
            }
            for row in cy - 2..=cy + 2 {
                for col in cx - 2..=cx + 2 {
                    mark(row, col);
                }
            }
        }
    }

    // Format areas and the dark module
    for i in 0..9 {
        mark(8, i);
        mark(i, 8);
    }
    for i in 0..8 {
        mark(8, size - 1 - i);
        mark(size - 1 - i, 8);
    }

    // Version blocks
    if version >= 7 {
        for a in 0..6 {
            for b in 0..3 {
                mark(a, size - 11 + b);
                mark(size - 11 + b, a);
            }
        }
    }
    mask
}

struct Field {
    exp: [u8; 512],
    log: [usize; 256],
}

impl Field {
    fn new() -> Self {
        let mut exp = [0u8; 512];
        let mut log = [0usize; 256];
        let mut x = 1u16;
        for (i, slot) in exp.iter_mut().enumerate() {
            *slot = x as u8;
            if i < 255 {
                log[x as usize] = i;
            }
            x <<= 1;
            if x & 0x100 != 0 {
                x ^= 0x11D;
            }
        }
        Self { exp, log }
    }

    fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.exp[self.log[a as usize] + self.log[b as usize]]
    }
}

/// Split the codewords back into blocks and verify every block's syndromes
fn deinterleave_and_check(codewords: &[u8], version: u8, level: ECLevel) -> Result<Vec<u8>, String> {
    let idx = match level {
        ECLevel::L => 0,
        ECLevel::M => 1,
        ECLevel::Q => 2,
        ECLevel::H => 3,
    };
    let ecc = ECC_CODEWORDS_PER_BLOCK[idx][version as usize] as usize;
    let num_blocks = NUM_ERROR_CORRECTION_BLOCKS[idx][version as usize] as usize;

    let total = codewords.len();
    let short_len = total / num_blocks;
    let num_long = total % num_blocks;
    let num_short = num_blocks - num_long;
    let short_data = short_len - ecc;

    let mut blocks: Vec<Vec<u8>> = (0..num_blocks)
        .map(|b| Vec::with_capacity(short_len + usize::from(b >= num_short)))
        .collect();

    let mut pos = 0;
    for i in 0..=short_data {
        for (b, block) in blocks.iter_mut().enumerate() {
            if i == short_data && b < num_short {
                continue;
            }
            block.push(codewords[pos]);
            pos += 1;
        }
    }
    for _ in 0..ecc {
        for block in blocks.iter_mut() {
            block.push(codewords[pos]);
            pos += 1;
        }
    }

    let field = Field::new();
    let mut data = Vec::new();
    for (b, block) in blocks.iter().enumerate() {
        for k in 0..ecc {
            let alpha = field.exp[k];
            let syndrome = block
                .iter()
                .fold(0u8, |acc, &c| field.mul(acc, alpha) ^ c);
            if syndrome != 0 {
                return Err(format!("block {} syndrome {} is {:#04x}", b, k, syndrome));
            }
        }
        data.extend_from_slice(&block[..block.len() - ecc]);
    }
    Ok(data)
}

fn parse_byte_mode(data: &[u8], version: u8) -> Result<Vec<u8>, String> {
    let bit = |index: usize| (data[index / 8] >> (7 - index % 8)) & 1;
    let read = |start: usize, len: usize| {
        (start..start + len).fold(0usize, |acc, i| (acc << 1) | bit(i) as usize)
    };

    if data.is_empty() {
        return Err("no data codewords".to_string());
    }
    let mode = read(0, 4);
    if mode != 0b0100 {
        return Err(format!("unexpected mode {:04b}", mode));
    }
    let count_bits = if version < 10 { 8 } else { 16 };
    let count = read(4, count_bits);
    let start = 4 + count_bits;
    if start + count * 8 > data.len() * 8 {
        return Err(format!("count {} exceeds data", count));
    }
    Ok((0..count).map(|i| read(start + i * 8, 8) as u8).collect())
}
