/// Reed-Solomon block layout and codeword generation
use super::bit_buffer::BitBuffer;
use super::polynomial::Polynomial;
use super::segment::ByteSegment;
use crate::error::{QrError, Result};
use crate::models::{ECLevel, Version};

/// First pad codeword written after the terminator
pub const PAD0: u32 = 0xEC;
/// Second pad codeword, alternating with `PAD0`
pub const PAD1: u32 = 0x11;

/// One Reed-Solomon block: `total_count` codewords of which `data_count` carry data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCorrectionBlock {
    total_count: usize,
    data_count: usize,
}

impl ErrorCorrectionBlock {
    /// Fails unless `0 < data_count <= total_count`
    pub fn new(total_count: usize, data_count: usize) -> Result<Self> {
        if total_count == 0 || data_count == 0 || data_count > total_count {
            return Err(QrError::InvalidBlock {
                total: total_count,
                data: data_count,
            });
        }
        Ok(Self {
            total_count,
            data_count,
        })
    }

    /// Codewords in the block
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Data codewords
    pub fn data_count(&self) -> usize {
        self.data_count
    }

    /// Error correction codewords
    pub fn error_count(&self) -> usize {
        self.total_count - self.data_count
    }
}

// Index: (version - 1) * 4 + level (L, M, Q, H)
// Each row holds one or two groups of (block count, total codewords, data codewords)
const RS_BLOCK_TABLE: [&[u16]; 160] = [
    // 1
    &[1, 26, 19],
    &[1, 26, 16],
    &[1, 26, 13],
    &[1, 26, 9],
    // 2
    &[1, 44, 34],
    &[1, 44, 28],
    &[1, 44, 22],
    &[1, 44, 16],
    // 3
    &[1, 70, 55],
    &[1, 70, 44],
    &[2, 35, 17],
    &[2, 35, 13],
    // 4
    &[1, 100, 80],
    &[2, 50, 32],
    &[2, 50, 24],
    &[4, 25, 9],
    // 5
    &[1, 134, 108],
    &[2, 67, 43],
    &[2, 33, 15, 2, 34, 16],
    &[2, 33, 11, 2, 34, 12],
    // 6
    &[2, 86, 68],
    &[4, 43, 27],
    &[4, 43, 19],
    &[4, 43, 15],
    // 7
    &[2, 98, 78],
    &[4, 49, 31],
    &[2, 32, 14, 4, 33, 15],
    &[4, 39, 13, 1, 40, 14],
    // 8
    &[2, 121, 97],
    &[2, 60, 38, 2, 61, 39],
    &[4, 40, 18, 2, 41, 19],
    &[4, 40, 14, 2, 41, 15],
    // 9
    &[2, 146, 116],
    &[3, 58, 36, 2, 59, 37],
    &[4, 36, 16, 4, 37, 17],
    &[4, 36, 12, 4, 37, 13],
    // 10
    &[2, 86, 68, 2, 87, 69],
    &[4, 69, 43, 1, 70, 44],
    &[6, 43, 19, 2, 44, 20],
    &[6, 43, 15, 2, 44, 16],
    // 11
    &[4, 101, 81],
    &[1, 80, 50, 4, 81, 51],
    &[4, 50, 22, 4, 51, 23],
    &[3, 36, 12, 8, 37, 13],
    // 12
    &[2, 116, 92, 2, 117, 93],
    &[6, 58, 36, 2, 59, 37],
    &[4, 46, 20, 6, 47, 21],
    &[7, 42, 14, 4, 43, 15],
    // 13
    &[4, 133, 107],
    &[8, 59, 37, 1, 60, 38],
    &[8, 44, 20, 4, 45, 21],
    &[12, 33, 11, 4, 34, 12],
    // 14
    &[3, 145, 115, 1, 146, 116],
    &[4, 64, 40, 5, 65, 41],
    &[11, 36, 16, 5, 37, 17],
    &[11, 36, 12, 5, 37, 13],
    // 15
    &[5, 109, 87, 1, 110, 88],
    &[5, 65, 41, 5, 66, 42],
    &[5, 54, 24, 7, 55, 25],
    &[11, 36, 12, 7, 37, 13],
    // 16
    &[5, 122, 98, 1, 123, 99],
    &[7, 73, 45, 3, 74, 46],
    &[15, 43, 19, 2, 44, 20],
    &[3, 45, 15, 13, 46, 16],
    // 17
    &[1, 135, 107, 5, 136, 108],
    &[10, 74, 46, 1, 75, 47],
    &[1, 50, 22, 15, 51, 23],
    &[2, 42, 14, 17, 43, 15],
    // 18
    &[5, 150, 120, 1, 151, 121],
    &[9, 69, 43, 4, 70, 44],
    &[17, 50, 22, 1, 51, 23],
    &[2, 42, 14, 19, 43, 15],
    // 19
    &[3, 141, 113, 4, 142, 114],
    &[3, 70, 44, 11, 71, 45],
    &[17, 47, 21, 4, 48, 22],
    &[9, 39, 13, 16, 40, 14],
    // 20
    &[3, 135, 107, 5, 136, 108],
    &[3, 67, 41, 13, 68, 42],
    &[15, 54, 24, 5, 55, 25],
    &[15, 43, 15, 10, 44, 16],
    // 21
    &[4, 144, 116, 4, 145, 117],
    &[17, 68, 42],
    &[17, 50, 22, 6, 51, 23],
    &[19, 46, 16, 6, 47, 17],
    // 22
    &[2, 139, 111, 7, 140, 112],
    &[17, 74, 46],
    &[7, 54, 24, 16, 55, 25],
    &[34, 37, 13],
    // 23
    &[4, 151, 121, 5, 152, 122],
    &[4, 75, 47, 14, 76, 48],
    &[11, 54, 24, 14, 55, 25],
    &[16, 45, 15, 14, 46, 16],
    // 24
    &[6, 147, 117, 4, 148, 118],
    &[6, 73, 45, 14, 74, 46],
    &[11, 54, 24, 16, 55, 25],
    &[30, 46, 16, 2, 47, 17],
    // 25
    &[8, 132, 106, 4, 133, 107],
    &[8, 75, 47, 13, 76, 48],
    &[7, 54, 24, 22, 55, 25],
    &[22, 45, 15, 13, 46, 16],
    // 26
    &[10, 142, 114, 2, 143, 115],
    &[19, 74, 46, 4, 75, 47],
    &[28, 50, 22, 6, 51, 23],
    &[33, 46, 16, 4, 47, 17],
    // 27
    &[8, 152, 122, 4, 153, 123],
    &[22, 73, 45, 3, 74, 46],
    &[8, 53, 23, 26, 54, 24],
    &[12, 45, 15, 28, 46, 16],
    // 28
    &[3, 147, 117, 10, 148, 118],
    &[3, 73, 45, 23, 74, 46],
    &[4, 54, 24, 31, 55, 25],
    &[11, 45, 15, 31, 46, 16],
    // 29
    &[7, 146, 116, 7, 147, 117],
    &[21, 73, 45, 7, 74, 46],
    &[1, 53, 23, 37, 54, 24],
    &[19, 45, 15, 26, 46, 16],
    // 30
    &[5, 145, 115, 10, 146, 116],
    &[19, 75, 47, 10, 76, 48],
    &[15, 54, 24, 25, 55, 25],
    &[23, 45, 15, 25, 46, 16],
    // 31
    &[13, 145, 115, 3, 146, 116],
    &[2, 74, 46, 29, 75, 47],
    &[42, 54, 24, 1, 55, 25],
    &[23, 45, 15, 28, 46, 16],
    // 32
    &[17, 145, 115],
    &[10, 74, 46, 23, 75, 47],
    &[10, 54, 24, 35, 55, 25],
    &[19, 45, 15, 35, 46, 16],
    // 33
    &[17, 145, 115, 1, 146, 116],
    &[14, 74, 46, 21, 75, 47],
    &[29, 54, 24, 19, 55, 25],
    &[11, 45, 15, 46, 46, 16],
    // 34
    &[13, 145, 115, 6, 146, 116],
    &[14, 74, 46, 23, 75, 47],
    &[44, 54, 24, 7, 55, 25],
    &[59, 46, 16, 1, 47, 17],
    // 35
    &[12, 151, 121, 7, 152, 122],
    &[12, 75, 47, 26, 76, 48],
    &[39, 54, 24, 14, 55, 25],
    &[22, 45, 15, 41, 46, 16],
    // 36
    &[6, 151, 121, 14, 152, 122],
    &[6, 75, 47, 34, 76, 48],
    &[46, 54, 24, 10, 55, 25],
    &[2, 45, 15, 64, 46, 16],
    // 37
    &[17, 152, 122, 4, 153, 123],
    &[29, 74, 46, 14, 75, 47],
    &[49, 54, 24, 10, 55, 25],
    &[24, 45, 15, 46, 46, 16],
    // 38
    &[4, 152, 122, 18, 153, 123],
    &[13, 74, 46, 32, 75, 47],
    &[48, 54, 24, 14, 55, 25],
    &[42, 45, 15, 32, 46, 16],
    // 39
    &[20, 147, 117, 4, 148, 118],
    &[40, 75, 47, 7, 76, 48],
    &[43, 54, 24, 22, 55, 25],
    &[10, 45, 15, 67, 46, 16],
    // 40
    &[19, 148, 118, 6, 149, 119],
    &[18, 75, 47, 31, 76, 48],
    &[34, 54, 24, 34, 55, 25],
    &[20, 45, 15, 61, 46, 16],
];

/// Resolve the ordered block list for a version and level
pub fn rs_blocks(version: Version, level: ECLevel) -> Result<Vec<ErrorCorrectionBlock>> {
    let index = (version.number() as usize - 1) * 4 + level.table_index();
    let row = RS_BLOCK_TABLE
        .get(index)
        .filter(|row| !row.is_empty() && row.len() % 3 == 0)
        .ok_or(QrError::MissingBlockTable {
            version: version.number(),
            level,
        })?;

    let mut blocks = Vec::new();
    for group in row.chunks_exact(3) {
        let (count, total, data) = (group[0] as usize, group[1] as usize, group[2] as usize);
        if total < data {
            return Err(QrError::InvalidBlock { total, data });
        }
        for _ in 0..count {
            blocks.push(ErrorCorrectionBlock::new(total, data)?);
        }
    }
    Ok(blocks)
}

/// Total data codewords across all blocks
pub fn total_data_count(blocks: &[ErrorCorrectionBlock]) -> usize {
    blocks.iter().map(ErrorCorrectionBlock::data_count).sum()
}

/// Build the full interleaved codeword sequence (data then error correction)
///
/// Fails when the segments need more bits than the version/level can hold.
pub fn create_data(version: Version, level: ECLevel, segments: &[ByteSegment]) -> Result<Vec<u8>> {
    let blocks = rs_blocks(version, level)?;

    let mut buffer = BitBuffer::new();
    for segment in segments {
        let mode = segment.mode();
        buffer.put(mode.indicator(), 4);
        buffer.put(segment.len() as u32, mode.length_in_bits(version));
        segment.write(&mut buffer);
    }

    let capacity = total_data_count(&blocks) * 8;
    if buffer.len_in_bits() > capacity {
        return Err(QrError::DataOverflow {
            bits: buffer.len_in_bits(),
            capacity,
        });
    }

    // Terminator only when it fits
    if buffer.len_in_bits() + 4 <= capacity {
        buffer.put(0, 4);
    }
    while buffer.len_in_bits() % 8 != 0 {
        buffer.put_bit(false);
    }
    loop {
        if buffer.len_in_bits() >= capacity {
            break;
        }
        buffer.put(PAD0, 8);
        if buffer.len_in_bits() >= capacity {
            break;
        }
        buffer.put(PAD1, 8);
    }

    Ok(create_bytes(&buffer, &blocks))
}

/// Split padded data into blocks, append error correction, interleave column-major
pub fn create_bytes(buffer: &BitBuffer, blocks: &[ErrorCorrectionBlock]) -> Vec<u8> {
    let bytes = buffer.as_bytes();
    let mut offset = 0;
    let mut dc_data: Vec<Vec<u8>> = Vec::with_capacity(blocks.len());
    let mut ec_data: Vec<Vec<u8>> = Vec::with_capacity(blocks.len());

    for block in blocks {
        let dc_count = block.data_count();
        let ec_count = block.error_count();

        let data: Vec<u8> = (offset..offset + dc_count)
            .map(|i| bytes.get(i).copied().unwrap_or(0))
            .collect();
        offset += dc_count;

        let rs_poly = Polynomial::generator(ec_count);
        let mod_poly = Polynomial::new(&data, ec_count).modulo(&rs_poly);

        // Remainder may come back shorter than ec_count; left-pad with zeros
        let pad = ec_count.saturating_sub(mod_poly.len());
        let ec: Vec<u8> = (0..ec_count)
            .map(|i| if i < pad { 0 } else { mod_poly.get(i - pad) })
            .collect();

        dc_data.push(data);
        ec_data.push(ec);
    }

    let total: usize = blocks.iter().map(ErrorCorrectionBlock::total_count).sum();
    let mut out = Vec::with_capacity(total);
    interleave(&dc_data, &mut out);
    interleave(&ec_data, &mut out);
    out
}

fn interleave(blocks: &[Vec<u8>], out: &mut Vec<u8>) {
    let max_len = blocks.iter().map(Vec::len).max().unwrap_or(0);
    for i in 0..max_len {
        for block in blocks {
            if let Some(&byte) = block.get(i) {
                out.push(byte);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    /// Data modules minus function patterns, in whole codewords
    fn raw_codewords(version: u8) -> usize {
        let ver = version as usize;
        let mut result = (16 * ver + 128) * ver + 64;
        if ver >= 2 {
            let num_align = ver / 7 + 2;
            result -= (25 * num_align - 10) * num_align - 55;
            if ver >= 7 {
                result -= 36;
            }
        }
        result / 8
    }

    #[test]
    fn test_block_totals_fill_symbol() {
        for n in 1..=40 {
            for level in ECLevel::ALL {
                let blocks = rs_blocks(v(n), level).unwrap();
                let total: usize = blocks.iter().map(|b| b.total_count()).sum();
                assert_eq!(total, raw_codewords(n), "version {} level {:?}", n, level);

                // Every block shares one EC length; shorter blocks come first
                let ec = blocks[0].error_count();
                assert!(blocks.iter().all(|b| b.error_count() == ec));
                assert!(blocks.windows(2).all(|w| w[0].data_count() <= w[1].data_count()));
            }
        }
    }

    #[test]
    fn test_known_layouts() {
        let blocks = rs_blocks(v(1), ECLevel::M).unwrap();
        assert_eq!(blocks, vec![ErrorCorrectionBlock::new(26, 16).unwrap()]);

        let blocks = rs_blocks(v(5), ECLevel::Q).unwrap();
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0].data_count(), 15);
        assert_eq!(blocks[3].data_count(), 16);
        assert_eq!(total_data_count(&blocks), 62);

        let blocks = rs_blocks(v(40), ECLevel::H).unwrap();
        assert_eq!(blocks.len(), 81);
        assert_eq!(blocks[0].error_count(), 30);
    }

    #[test]
    fn test_invalid_block() {
        assert_eq!(
            ErrorCorrectionBlock::new(10, 11),
            Err(QrError::InvalidBlock { total: 10, data: 11 })
        );
        assert!(ErrorCorrectionBlock::new(10, 0).is_err());
        assert!(ErrorCorrectionBlock::new(0, 0).is_err());
    }

    #[test]
    fn test_hello_world_error_correction() {
        // Standard 1-M "HELLO WORLD" data block and its 10 EC codewords
        let data = [
            32u8, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 17, 236, 17,
        ];
        let mut buffer = BitBuffer::new();
        for &byte in &data {
            buffer.put(byte as u32, 8);
        }
        let blocks = rs_blocks(v(1), ECLevel::M).unwrap();
        let codewords = create_bytes(&buffer, &blocks);
        assert_eq!(&codewords[..16], &data);
        assert_eq!(
            &codewords[16..],
            &[196, 35, 39, 119, 235, 215, 231, 226, 93, 23]
        );
    }

    #[test]
    fn test_create_data_padding() {
        let segments = [ByteSegment::new("HI")];
        let codewords = create_data(v(1), ECLevel::H, &segments).unwrap();
        assert_eq!(codewords.len(), 26);
        // 0100 | 00000010 | 'H' | 'I' | 0000, then pad bytes
        assert_eq!(&codewords[..9], &[0x40, 0x24, 0x84, 0x90, 0xEC, 0x11, 0xEC, 0x11, 0xEC]);
    }

    #[test]
    fn test_create_data_overflow() {
        let segments = [ByteSegment::new(&"a".repeat(10))];
        // 1-H holds 9 data codewords = 72 bits; 4 + 8 + 80 = 92 bits
        assert_eq!(
            create_data(v(1), ECLevel::H, &segments),
            Err(QrError::DataOverflow {
                bits: 92,
                capacity: 72
            })
        );
    }

    #[test]
    fn test_interleave_order() {
        let blocks = vec![vec![1u8, 2], vec![3, 4, 5]];
        let mut out = Vec::new();
        interleave(&blocks, &mut out);
        assert_eq!(out, vec![1, 3, 2, 4, 5]);
    }
}
