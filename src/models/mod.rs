/// Tri-state module grid used during construction
pub mod canvas;
/// Packed dark/light module matrix
pub mod matrix;
/// Version, level, mask and symbol types
pub mod qr_code;

pub use canvas::{Module, ModuleCanvas};
pub use matrix::BitMatrix;
pub use qr_code::{ECLevel, MaskPattern, QrSymbol, SymbolView, Version};
