//! QR code encoding modules
//!
//! This module contains all the logic for turning text into a module grid:
//! - Galois field arithmetic and Reed-Solomon codewords
//! - Byte mode segments and bit packing
//! - Function patterns, data placement and masking
//! - Version selection and mask search

/// BCH encoding for format and version info
pub mod bch;
/// MSB-first bit accumulator
pub mod bit_buffer;
/// Byte-mode capacity table and version selection
pub mod capacity;
/// Environment knobs for parallel mask trials
pub mod config;
/// Finder, alignment, timing, format and version patterns
pub mod function_patterns;
/// GF(256) exponent/log tables
pub mod gf256;
/// Mask predicates and penalty scoring
pub mod mask;
/// Zigzag data placement
pub mod placement;
/// Polynomials over GF(256)
pub mod polynomial;
/// Main QR encoder that orchestrates the encoding pipeline
pub mod qr_encoder;
/// Reed-Solomon block layout, padding and interleaving
pub mod rs_blocks;
/// Byte mode segment
pub mod segment;
/// Alignment pattern center table
pub mod tables;
