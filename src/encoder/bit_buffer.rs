/// Append-only MSB-first bit writer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    buffer: Vec<u8>,
    length: usize,
}

impl BitBuffer {
    /// Empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the `num_bits` low bits of `value`, most significant first
    pub fn put(&mut self, value: u32, num_bits: usize) {
        for i in (0..num_bits).rev() {
            self.put_bit(((value >> i) & 1) == 1);
        }
    }

    /// Append a single bit
    pub fn put_bit(&mut self, bit: bool) {
        let byte_index = self.length / 8;
        if self.buffer.len() <= byte_index {
            self.buffer.push(0);
        }
        if bit {
            self.buffer[byte_index] |= 0x80 >> (self.length % 8);
        }
        self.length += 1;
    }

    /// Random-access read; bits past the end read as 0
    pub fn get(&self, index: usize) -> bool {
        if index >= self.length {
            return false;
        }
        ((self.buffer[index / 8] >> (7 - index % 8)) & 1) == 1
    }

    /// Bits written so far
    pub fn len_in_bits(&self) -> usize {
        self.length
    }

    /// Written bits packed MSB first; the last byte is zero-padded
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }
}
