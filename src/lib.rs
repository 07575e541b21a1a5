//! RustQR Matrix - QR code generation in pure Rust
//!
//! Turns text into a fully resolved QR module grid: byte-mode encoding,
//! Reed-Solomon error correction, function patterns and penalty-driven mask
//! selection. Rendering is left to callers through the [`SymbolView`] trait.
//!
//! ```
//! use rust_qr_matrix::{ECLevel, make};
//!
//! let symbol = make("HELLO WORLD", ECLevel::L).unwrap();
//! assert_eq!(symbol.module_count(), 21);
//! assert!(symbol.is_dark(0, 0).unwrap());
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// QR code encoding modules (error correction, placement, masking)
pub mod encoder;
/// Error types shared by every stage
pub mod error;
/// Core data structures (QrSymbol, BitMatrix, Version, etc.)
pub mod models;
/// Text rendering and logging helpers for command line tools
pub mod tools;

pub use encoder::qr_encoder::{EncodeOptions, QrEncoder};
pub use error::{ErrorKind, QrError, Result};
pub use models::{BitMatrix, ECLevel, MaskPattern, QrSymbol, SymbolView, Version};

/// Encode `text` at `level`, picking the smallest version and the best mask
pub fn make(text: &str, level: ECLevel) -> Result<QrSymbol> {
    make_with_options(text, &EncodeOptions::new(level))
}

/// Encode `text` with an explicit version and/or mask
///
/// # Errors
/// * [`QrError::TooLongData`] when no version holds the text at the level
/// * [`QrError::DataOverflow`] when a forced version is too small
pub fn make_with_options(text: &str, options: &EncodeOptions) -> Result<QrSymbol> {
    QrEncoder::new(text, options)?.make()
}
