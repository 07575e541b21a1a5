use super::BitMatrix;
use crate::error::{QrError, Result};

/// State of one module while a symbol is under construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Module {
    /// Not written yet; data placement fills these
    #[default]
    Unset,
    /// Dark module
    Dark,
    /// Light module
    Light,
}

impl Module {
    /// `Dark` or `Light`
    pub fn from_dark(dark: bool) -> Self {
        if dark { Module::Dark } else { Module::Light }
    }

    /// Anything but `Unset`
    pub fn is_set(&self) -> bool {
        !matches!(self, Module::Unset)
    }
}

/// Square arena of tri-state modules, indexed by (row, col)
///
/// Writes outside the grid are ignored, reads outside it report `Unset`, so pattern
/// placement near the edges needs no clipping of its own.
#[derive(Debug, Clone)]
pub struct ModuleCanvas {
    size: usize,
    cells: Vec<Module>,
}

impl ModuleCanvas {
    /// `size` x `size` canvas with every module unset
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Module::Unset; size * size],
        }
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.size
    }

    /// Module at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Module {
        if row >= self.size || col >= self.size {
            return Module::Unset;
        }
        self.cells[row * self.size + col]
    }

    /// Whether (row, col) has been written
    pub fn is_set(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_set()
    }

    /// Write a dark or light module, overwriting any earlier value
    pub fn set(&mut self, row: usize, col: usize, dark: bool) {
        if row >= self.size || col >= self.size {
            return;
        }
        self.cells[row * self.size + col] = Module::from_dark(dark);
    }

    /// Modules not yet written
    pub fn unset_count(&self) -> usize {
        self.cells.iter().filter(|m| !m.is_set()).count()
    }

    /// Convert to a dense grid, failing on the first module left unset
    pub fn finalize(&self) -> Result<BitMatrix> {
        let mut matrix = BitMatrix::new(self.size, self.size);
        for row in 0..self.size {
            for col in 0..self.size {
                match self.get(row, col) {
                    Module::Unset => return Err(QrError::UnresolvedModule { row, col }),
                    Module::Dark => matrix.set(col, row, true),
                    Module::Light => {}
                }
            }
        }
        Ok(matrix)
    }
}
