/// Dense module grid, one bit per module (true = dark)
///
/// Rows are packed into `u64` words so a row never shares a word with the next one;
/// trailing bits of the last word in each row stay zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    words_per_row: usize,
    words: Vec<u64>,
}

impl BitMatrix {
    /// All-light matrix of the given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let words_per_row = width.div_ceil(64);
        Self {
            width,
            height,
            words_per_row,
            words: vec![0; words_per_row * height],
        }
    }

    /// Columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Module at column `x`, row `y`; out-of-range reads are light
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let word = self.words[y * self.words_per_row + x / 64];
        (word >> (x % 64)) & 1 == 1
    }

    /// Write the module at column `x`, row `y`; out-of-range writes are dropped
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let word = &mut self.words[y * self.words_per_row + x / 64];
        let bit = 1u64 << (x % 64);
        if value {
            *word |= bit;
        } else {
            *word &= !bit;
        }
    }

    /// Dark modules in row `y`
    pub fn row_count_ones(&self, y: usize) -> usize {
        if y >= self.height {
            return 0;
        }
        let start = y * self.words_per_row;
        self.words[start..start + self.words_per_row]
            .iter()
            .map(|w| w.count_ones() as usize)
            .sum()
    }

    /// Dark modules in the whole grid
    pub fn count_ones(&self) -> usize {
        (0..self.height).map(|y| self.row_count_ones(y)).sum()
    }
}
