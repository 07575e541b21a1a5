/// Mask predicates and the penalty score used to choose between them
use crate::error::Result;
use crate::models::{BitMatrix, MaskPattern};

/// Penalty weights
const N1: u32 = 3;
const N2: u32 = 3;
const N3: u32 = 40;
const N4: f64 = 10.0;

/// Mask predicate by numeric pattern id; fails outside 0-7
pub fn get_mask(pattern: u8, i: usize, j: usize) -> Result<bool> {
    Ok(MaskPattern::from_id(pattern)?.is_masked(i, j))
}

/// Penalty score of a fully resolved symbol; lower is better
pub fn lost_point(modules: &BitMatrix) -> f64 {
    let (width, height) = (modules.width(), modules.height());
    let dark = |row: usize, col: usize| modules.get(col, row);

    let mut lost = 0u32;

    // Modules whose neighbourhood is mostly the same colour
    for row in 0..height {
        for col in 0..width {
            let center = dark(row, col);
            let mut same = 0u32;
            for r in row.saturating_sub(1)..=(row + 1).min(height - 1) {
                for c in col.saturating_sub(1)..=(col + 1).min(width - 1) {
                    if (r, c) != (row, col) && dark(r, c) == center {
                        same += 1;
                    }
                }
            }
            if same > 5 {
                lost += N1 + same - 5;
            }
        }
    }

    // Monochrome 2x2 blocks
    for row in 0..height.saturating_sub(1) {
        for col in 0..width.saturating_sub(1) {
            let count = [
                dark(row, col),
                dark(row + 1, col),
                dark(row, col + 1),
                dark(row + 1, col + 1),
            ]
            .iter()
            .filter(|&&d| d)
            .count();
            if count == 0 || count == 4 {
                lost += N2;
            }
        }
    }

    // 1:1:3:1:1 finder-like runs, horizontal then vertical
    for row in 0..height {
        for col in 0..width.saturating_sub(6) {
            if is_finder_run(|k| dark(row, col + k)) {
                lost += N3;
            }
        }
    }
    for col in 0..width {
        for row in 0..height.saturating_sub(6) {
            if is_finder_run(|k| dark(row + k, col)) {
                lost += N3;
            }
        }
    }

    // Dark module balance
    let dark_count = modules.count_ones() as f64;
    let ratio = (100.0 * dark_count / width as f64 / height as f64 - 50.0).abs() / 5.0;

    lost as f64 + ratio * N4
}

fn is_finder_run(dark: impl Fn(usize) -> bool) -> bool {
    dark(0) && !dark(1) && dark(2) && dark(3) && dark(4) && !dark(5) && dark(6)
}
