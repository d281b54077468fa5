//! Error type shared by all stages of descriptor extraction.

use crate::rect::Rect;
use thiserror::Error;

/// Failures reported by sampling, binning and descriptor extraction.
///
/// Every variant stems from a deterministic defect in the input or the
/// configuration, so retrying the same call never helps.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HogError {
    /// Image dimensions must both be strictly positive.
    #[error("invalid image size {width}x{height}")]
    InvalidImageSize {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },

    /// Neither a scale count nor a scale step was provided.
    #[error("no scale source: one of n_scales or scale_step must be non-zero")]
    NoScaleSource,

    /// Scale bounds are not positive finite numbers.
    #[error("invalid scale range [{min_scale}, {max_scale})")]
    InvalidScaleRange {
        /// Smallest scale.
        min_scale: f32,
        /// Exclusive upper bound on scales.
        max_scale: f32,
    },

    /// The multiplicative step between scales would never reach the upper bound.
    #[error("scale step {scale_step} must be finite and greater than 1")]
    InvalidScaleStep {
        /// Effective step, either provided or derived.
        scale_step: f32,
    },

    /// Window strides must be positive finite fractions of the window size.
    #[error("invalid stride ({stride_x}, {stride_y})")]
    InvalidStride {
        /// Horizontal stride as a fraction of window width.
        stride_x: f32,
        /// Vertical stride as a fraction of window height.
        stride_y: f32,
    },

    /// Sampling produced no rectangle, e.g. the window is larger than the
    /// image at every scale.
    #[error("no windows produced for a {width}x{height} image")]
    NoWindows {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },

    /// Orientation bin counts must lie in `1..=256` so that every bin index
    /// fits in a byte.
    #[error("invalid orientation bin count {bins}")]
    InvalidBinCount {
        /// Requested number of bins.
        bins: usize,
    },

    /// A gradient field buffer does not match its declared dimensions.
    #[error("gradient field size mismatch: expected {expected} samples, got {actual}")]
    FieldSizeMismatch {
        /// Number of samples implied by the dimensions.
        expected: usize,
        /// Number of samples provided.
        actual: usize,
    },

    /// The gradient operator produced an orientation bin outside `[0, bins)`.
    #[error("bin {bin} out of range [0, {bins}) at ({x}, {y}), channel {channel}")]
    BinOutOfRange {
        /// Pixel column.
        x: u32,
        /// Pixel row.
        y: u32,
        /// Gradient channel, 0 or 1.
        channel: usize,
        /// Offending bin index.
        bin: usize,
        /// Number of orientation bins.
        bins: usize,
    },

    /// A cell grid must have at least one row and one column.
    #[error("invalid cell grid {rows}x{cols}")]
    InvalidCellGrid {
        /// Number of cell rows.
        rows: u32,
        /// Number of cell columns.
        cols: u32,
    },

    /// The rectangle does not fit inside the integral images.
    #[error("rectangle {rect:?} exceeds integral image bounds {width}x{height}")]
    RectOutOfBounds {
        /// Requested rectangle.
        rect: Rect,
        /// Width of the source image.
        width: u32,
        /// Height of the source image.
        height: u32,
    },

    /// A descriptor failed its range check.
    #[error("non-finite value at index {index} (bin {bin}) of descriptor for {rect:?}")]
    NonFiniteDescriptor {
        /// Rectangle the descriptor was computed for.
        rect: Rect,
        /// Position of the first non-finite element.
        index: usize,
        /// Orientation bin of that element.
        bin: usize,
    },
}

impl HogError {
    /// Whether this error concerns a single window only. A driver can skip
    /// that window and carry on with the rest of the image.
    pub fn is_window_local(&self) -> bool {
        matches!(
            self,
            HogError::RectOutOfBounds { .. } | HogError::NonFiniteDescriptor { .. }
        )
    }
}

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, HogError>;
