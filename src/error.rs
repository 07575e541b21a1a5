//! Error types for QR matrix generation

use crate::models::ECLevel;
use thiserror::Error;

/// Result type for encoder operations
pub type Result<T> = std::result::Result<T, QrError>;

/// Broad classes of failure
///
/// None of them are transient: the engine does no I/O, so retrying the same input
/// always fails the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid field, mask, version or coordinate argument (programmer error)
    Domain,
    /// Input does not fit the requested version or level
    Capacity,
    /// Static table entry missing or inconsistent
    Lookup,
}

/// Errors that can occur while building a QR symbol
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QrError {
    /// GF(256) logarithm requested for a value below 1
    #[error("glog({0}): logarithm of a non-positive value is undefined")]
    LogOfZero(i32),

    /// Mask pattern id outside 0..=7
    #[error("bad mask pattern: {0}")]
    InvalidMaskPattern(u8),

    /// Version outside 1..=40
    #[error("invalid version: {0} (expected 1-40)")]
    InvalidVersion(u8),

    /// Module coordinate outside the symbol
    #[error("module ({row}, {col}) is outside a {size}x{size} symbol")]
    OutOfBounds {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Side length of the symbol
        size: usize,
    },

    /// A module was never written during construction
    #[error("module ({row}, {col}) was left unset")]
    UnresolvedModule {
        /// Row of the unset module
        row: usize,
        /// Column of the unset module
        col: usize,
    },

    /// Encoded bitstream longer than the data capacity of the chosen version
    #[error("code length overflow. ({bits}>{capacity})")]
    DataOverflow {
        /// Bits needed by header and payload
        bits: usize,
        /// Data bits available
        capacity: usize,
    },

    /// No version up to 40 can hold the payload at this level
    #[error("too long data: {length} bytes do not fit any version at level {level:?}")]
    TooLongData {
        /// Payload length in bytes
        length: usize,
        /// Requested level
        level: ECLevel,
    },

    /// No block layout for this version/level
    #[error("bad rs block @ version {version}/level {level:?}")]
    MissingBlockTable {
        /// Version number looked up
        version: u8,
        /// Level looked up
        level: ECLevel,
    },

    /// Block layout with a non-positive or inverted codeword count
    #[error("invalid error correction block: total {total}, data {data}")]
    InvalidBlock {
        /// Total codewords in the block
        total: usize,
        /// Data codewords in the block
        data: usize,
    },
}

impl QrError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            QrError::LogOfZero(_)
            | QrError::InvalidMaskPattern(_)
            | QrError::InvalidVersion(_)
            | QrError::OutOfBounds { .. }
            | QrError::UnresolvedModule { .. } => ErrorKind::Domain,
            QrError::DataOverflow { .. } | QrError::TooLongData { .. } => ErrorKind::Capacity,
            QrError::MissingBlockTable { .. } | QrError::InvalidBlock { .. } => ErrorKind::Lookup,
        }
    }
}
