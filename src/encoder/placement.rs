/// Zigzag placement of codewords into the free modules of a symbol
use crate::models::{MaskPattern, ModuleCanvas};

/// Fill every unset module with codeword bits, MSB first, applying `mask`
///
/// Columns are walked in pairs from the right edge, skipping the vertical timing
/// column, alternating upward and downward. Modules left over once `data` runs out
/// are written as light before masking.
pub fn map_data(canvas: &mut ModuleCanvas, data: &[u8], mask: MaskPattern) {
    let size = canvas.size();
    if size == 0 {
        return;
    }

    let mut upward = true;
    let mut row = size - 1;
    let mut bit_index: i32 = 7;
    let mut byte_index = 0usize;

    let mut col = size as isize - 1;
    while col > 0 {
        if col == 6 {
            col -= 1;
        }
        let right = col as usize;

        loop {
            for c in 0..2 {
                let cc = right - c;
                if canvas.is_set(row, cc) {
                    continue;
                }
                let mut dark = data
                    .get(byte_index)
                    .is_some_and(|&byte| (byte >> bit_index) & 1 == 1);
                if mask.is_masked(row, cc) {
                    dark = !dark;
                }
                canvas.set(row, cc, dark);

                bit_index -= 1;
                if bit_index < 0 {
                    byte_index += 1;
                    bit_index = 7;
                }
            }

            // Bounce off the top/bottom edge into the next column pair
            if upward {
                if row == 0 {
                    break;
                }
                row -= 1;
            } else {
                if row + 1 == size {
                    break;
                }
                row += 1;
            }
        }
        upward = !upward;
        col -= 2;
    }
}
