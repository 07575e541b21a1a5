/// Placement of function patterns (finder/alignment/timing/format/version)
use super::bch::{bch_type_info, bch_type_number};
use super::tables::pattern_position;
use crate::models::{ECLevel, MaskPattern, ModuleCanvas, Version};

/// Finder pattern with its one-module separator, top-left corner at (row, col)
///
/// Every module of the 9x9 footprint that lies inside the symbol is written, the light
/// ring and separator included.
pub fn setup_position_probe_pattern(canvas: &mut ModuleCanvas, row: usize, col: usize) {
    let size = canvas.size() as isize;
    for r in -1isize..=7 {
        let rr = row as isize + r;
        if rr < 0 || rr >= size {
            continue;
        }
        for c in -1isize..=7 {
            let cc = col as isize + c;
            if cc < 0 || cc >= size {
                continue;
            }
            let outer_ring = ((0..=6).contains(&r) && (c == 0 || c == 6))
                || ((0..=6).contains(&c) && (r == 0 || r == 6));
            let core = (2..=4).contains(&r) && (2..=4).contains(&c);
            canvas.set(rr as usize, cc as usize, outer_ring || core);
        }
    }
}

/// 5x5 alignment patterns at every center pair not already occupied
pub fn setup_position_adjust_pattern(canvas: &mut ModuleCanvas, version: Version) {
    let positions = pattern_position(version);
    for &row in positions {
        for &col in positions {
            if canvas.is_set(row, col) {
                continue;
            }
            for r in -2isize..=2 {
                for c in -2isize..=2 {
                    let dark = r.abs() == 2 || c.abs() == 2 || (r == 0 && c == 0);
                    canvas.set(
                        (row as isize + r) as usize,
                        (col as isize + c) as usize,
                        dark,
                    );
                }
            }
        }
    }
}

/// Alternating timing lines on row 6 and column 6, between the separators
pub fn setup_timing_pattern(canvas: &mut ModuleCanvas) {
    let size = canvas.size();
    for r in 8..size.saturating_sub(8) {
        if !canvas.is_set(r, 6) {
            canvas.set(r, 6, r % 2 == 0);
        }
    }
    for c in 8..size.saturating_sub(8) {
        if !canvas.is_set(6, c) {
            canvas.set(6, c, c % 2 == 0);
        }
    }
}

/// Both copies of the 15-bit format word plus the dark module
///
/// With `test` set every bit is written light, so mask trials score the same layout
/// regardless of which mask ends up in the word.
pub fn setup_type_info(canvas: &mut ModuleCanvas, test: bool, level: ECLevel, mask: MaskPattern) {
    let size = canvas.size();
    let data = ((level.format_bits() as u32) << 3) | mask.id() as u32;
    let bits = bch_type_info(data);

    // Vertical strip: column 8 beside the top-left finder, then beside the bottom-left
    for i in 0..15 {
        let dark = !test && ((bits >> i) & 1) == 1;
        if i < 6 {
            canvas.set(i, 8, dark);
        } else if i < 8 {
            canvas.set(i + 1, 8, dark);
        } else {
            canvas.set(size - 15 + i, 8, dark);
        }
    }

    // Horizontal strip: row 8 under the top-right finder, then under the top-left
    for i in 0..15 {
        let dark = !test && ((bits >> i) & 1) == 1;
        if i < 8 {
            canvas.set(8, size - i - 1, dark);
        } else if i < 9 {
            canvas.set(8, 15 - i, dark);
        } else {
            canvas.set(8, 15 - i - 1, dark);
        }
    }

    canvas.set(size - 8, 8, !test);
}

/// Two 6x3 copies of the 18-bit version word (versions 7+)
pub fn setup_type_number(canvas: &mut ModuleCanvas, version: Version, test: bool) {
    let size = canvas.size();
    let bits = bch_type_number(version.number() as u32);
    for i in 0..18 {
        let dark = !test && ((bits >> i) & 1) == 1;
        canvas.set(i / 3, i % 3 + size - 8 - 3, dark);
        canvas.set(i % 3 + size - 8 - 3, i / 3, dark);
    }
}
