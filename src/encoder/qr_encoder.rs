/// Main QR encoder - wires every stage into a finished symbol
use super::capacity::type_number;
use super::config::{parallel_masks, parallel_min_version};
use super::function_patterns::{
    setup_position_adjust_pattern, setup_position_probe_pattern, setup_timing_pattern,
    setup_type_info, setup_type_number,
};
use super::mask::lost_point;
use super::placement::map_data;
use super::rs_blocks::create_data;
use super::segment::ByteSegment;
use crate::error::Result;
use crate::models::{BitMatrix, ECLevel, MaskPattern, ModuleCanvas, QrSymbol, Version};
use rayon::prelude::*;
use tracing::{debug, trace};

/// Per-call encoding parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    level: ECLevel,
    version: Option<Version>,
    mask: Option<MaskPattern>,
}

impl EncodeOptions {
    /// Automatic version and mask at the given level
    pub fn new(level: ECLevel) -> Self {
        Self {
            level,
            version: None,
            mask: None,
        }
    }

    /// Force a version; encoding fails if the text does not fit it
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    /// Commit this mask instead of searching for the best one
    pub fn with_mask(mut self, mask: MaskPattern) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Error correction level
    pub fn level(&self) -> ECLevel {
        self.level
    }

    /// Forced version, if any
    pub fn version(&self) -> Option<Version> {
        self.version
    }

    /// Forced mask, if any
    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self::new(ECLevel::H)
    }
}

/// One text prepared for a fixed version and level
///
/// The interleaved codewords are computed once up front; every mask trial and the final
/// symbol are laid out from the same bytes.
#[derive(Debug, Clone)]
pub struct QrEncoder {
    version: Version,
    level: ECLevel,
    mask: Option<MaskPattern>,
    data: Vec<u8>,
}

impl QrEncoder {
    /// Select the version (unless forced) and build the codeword sequence
    pub fn new(text: &str, options: &EncodeOptions) -> Result<Self> {
        let level = options.level();
        let version = match options.version() {
            Some(version) => version,
            None => type_number(text, level)?,
        };

        let segment = ByteSegment::new(text);
        let data = create_data(version, level, &[segment])?;
        debug!(
            version = version.number(),
            ?level,
            codewords = data.len(),
            "version selected"
        );

        Ok(Self {
            version,
            level,
            mask: options.mask(),
            data,
        })
    }

    /// Version the codewords were laid out for
    pub fn version(&self) -> Version {
        self.version
    }

    /// Error correction level
    pub fn level(&self) -> ECLevel {
        self.level
    }

    /// Interleaved data and error correction codewords
    pub fn codewords(&self) -> &[u8] {
        &self.data
    }

    /// Lay out a complete symbol with `mask`
    ///
    /// In `test` mode the format and version areas are written light, which is how
    /// candidates are scored before a mask is chosen.
    pub fn make_impl(&self, test: bool, mask: MaskPattern) -> Result<BitMatrix> {
        let size = self.version.size();
        let mut canvas = ModuleCanvas::new(size);

        setup_position_probe_pattern(&mut canvas, 0, 0);
        setup_position_probe_pattern(&mut canvas, size - 7, 0);
        setup_position_probe_pattern(&mut canvas, 0, size - 7);
        setup_position_adjust_pattern(&mut canvas, self.version);
        setup_timing_pattern(&mut canvas);
        setup_type_info(&mut canvas, test, self.level, mask);

        if self.version.has_version_info() {
            setup_type_number(&mut canvas, self.version, test);
        }

        map_data(&mut canvas, &self.data, mask);
        canvas.finalize()
    }

    /// Penalty score of every candidate mask, in id order
    pub fn mask_scores(&self) -> Result<[f64; 8]> {
        let parallel = parallel_masks() && self.version.number() >= parallel_min_version();
        self.mask_scores_with(parallel)
    }

    fn mask_scores_with(&self, parallel: bool) -> Result<[f64; 8]> {
        let score = |mask: MaskPattern| -> Result<f64> {
            let modules = self.make_impl(true, mask)?;
            Ok(lost_point(&modules))
        };

        let scores: Vec<f64> = if parallel {
            MaskPattern::ALL
                .as_slice()
                .par_iter()
                .map(|&mask| score(mask))
                .collect::<Result<_>>()?
        } else {
            MaskPattern::ALL
                .iter()
                .map(|&mask| score(mask))
                .collect::<Result<_>>()?
        };

        let mut out = [0.0; 8];
        out.copy_from_slice(&scores);
        Ok(out)
    }

    /// Mask with the lowest penalty; ties go to the lowest id
    pub fn best_mask_pattern(&self) -> Result<MaskPattern> {
        let scores = self.mask_scores()?;

        let mut min_lost_point = 0.0;
        let mut pattern = 0usize;
        for (i, &lost) in scores.iter().enumerate() {
            trace!(mask = i, score = lost, "mask trial");
            if i == 0 || min_lost_point > lost {
                min_lost_point = lost;
                pattern = i;
            }
        }

        debug!(mask = pattern, score = min_lost_point, "mask selected");
        MaskPattern::from_id(pattern as u8)
    }

    /// Build the final symbol with the forced or best mask
    pub fn make(&self) -> Result<QrSymbol> {
        let mask = match self.mask {
            Some(mask) => mask,
            None => self.best_mask_pattern()?,
        };
        let modules = self.make_impl(false, mask)?;
        Ok(QrSymbol::new(self.version, self.level, mask, modules))
    }
}
