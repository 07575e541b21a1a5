use crate::encoder::bch::G15_MASK;
use crate::error::{QrError, Result};
use crate::models::{ECLevel, MaskPattern, SymbolView};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DARK: &str = "██";
const LIGHT: &str = "  ";

/// Install the global tracing subscriber for command line tools.
///
/// `RUST_LOG` wins when set; otherwise the level is `debug` with `verbose` and `warn`
/// without. Later calls are ignored.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init();
}

/// Render a symbol as text, two characters per module, surrounded by `quiet_zone`
/// light modules on every side.
pub fn to_ascii(symbol: &impl SymbolView, quiet_zone: usize) -> Result<String> {
    let size = symbol.module_count();
    let side = size + 2 * quiet_zone;
    let mut out = String::with_capacity(side * (side * DARK.len() + 1));

    for y in 0..side {
        for x in 0..side {
            let inside = (quiet_zone..quiet_zone + size).contains(&y)
                && (quiet_zone..quiet_zone + size).contains(&x);
            let dark = inside && symbol.is_dark(y - quiet_zone, x - quiet_zone)?;
            out.push_str(if dark { DARK } else { LIGHT });
        }
        out.push('\n');
    }
    Ok(out)
}

/// Read the level and mask back from the format strip in column 8.
///
/// The BCH check bits are not corrected, so this only suits symbols straight from
/// the encoder.
pub fn format_info(symbol: &impl SymbolView) -> Result<(ECLevel, MaskPattern)> {
    let size = symbol.module_count();
    if size < 21 {
        return Err(QrError::OutOfBounds {
            row: 20,
            col: 8,
            size,
        });
    }

    let mut bits = 0u32;
    for i in 0..15 {
        let row = match i {
            0..=5 => i,
            6..=7 => i + 1,
            _ => size - 15 + i,
        };
        if symbol.is_dark(row, 8)? {
            bits |= 1 << i;
        }
    }
    let data = (bits ^ G15_MASK) >> 10;
    let level = ECLevel::from_format_bits((data >> 3) as u8);
    let mask = MaskPattern::from_id((data & 0x07) as u8)?;
    Ok((level, mask))
}

/// Summary statistics for a symbol.
#[derive(Debug, Clone, Copy)]
pub struct SymbolStats {
    /// Count of dark modules.
    pub dark_modules: usize,
    /// Total modules in the symbol.
    pub total_modules: usize,
    /// Ratio of dark modules to total modules.
    pub dark_ratio: f64,
}

/// Compute dark module stats for a symbol.
pub fn symbol_stats(symbol: &impl SymbolView) -> Result<SymbolStats> {
    let size = symbol.module_count();
    let mut dark = 0usize;
    for row in 0..size {
        for col in 0..size {
            if symbol.is_dark(row, col)? {
                dark += 1;
            }
        }
    }
    let total = size * size;
    let ratio = if total == 0 {
        0.0
    } else {
        dark as f64 / total as f64
    };
    Ok(SymbolStats {
        dark_modules: dark,
        total_modules: total,
        dark_ratio: ratio,
    })
}
