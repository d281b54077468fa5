//! Cell-histogram descriptors read from [`OrientedIntegralImages`].

use crate::error::{HogError, Result};
use crate::integral_image::OrientedIntegralImages;
use crate::math::l2_norm;
use crate::rect::Rect;
use itertools::iproduct;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Added to the L2 norm before dividing by it, so that windows without any
/// gradient normalise to all zeros.
pub const NORMALIZATION_EPSILON: f32 = f32::EPSILON;

/// Number of cell rows and columns a window is divided into.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellGrid {
    /// Number of cells stacked vertically.
    pub rows: u32,
    /// Number of cells side by side horizontally.
    pub cols: u32,
}

impl CellGrid {
    /// A grid of `rows` by `cols` cells.
    pub fn new(rows: u32, cols: u32) -> CellGrid {
        CellGrid { rows, cols }
    }

    /// Total number of cells.
    pub fn cells(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Length of a descriptor over this grid with `bins` orientation bins.
    pub fn descriptor_length(&self, bins: usize) -> usize {
        self.cells() * bins
    }

    fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(HogError::InvalidCellGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

impl Default for CellGrid {
    /// 2x2 cells, giving 36 values with 9 orientation bins.
    fn default() -> Self {
        CellGrid::new(2, 2)
    }
}

/// An L2-normalised concatenation of per-cell orientation histograms.
///
/// Cells appear in row-major order, each contributing one value per bin in
/// bin order. Only [`hog_descriptor`] creates these, so every instance is
/// normalised and finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    values: Vec<f32>,
}

impl Descriptor {
    /// The descriptor values.
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the descriptor holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Histogram of the cell at `(row, col)`.
    ///
    /// # Panics
    /// If the cell lies outside `grid`, or `grid` is not the grid the
    /// descriptor was computed with.
    pub fn cell(&self, grid: CellGrid, row: u32, col: u32) -> &[f32] {
        assert!(row < grid.rows && col < grid.cols, "cell outside grid");
        let bins = self.values.len() / grid.cells();
        let start = (row as usize * grid.cols as usize + col as usize) * bins;
        &self.values[start..start + bins]
    }

    /// Consumes the descriptor, returning its values.
    pub fn into_vec(self) -> Vec<f32> {
        self.values
    }
}

impl AsRef<[f32]> for Descriptor {
    fn as_ref(&self) -> &[f32] {
        &self.values
    }
}

/// Computes the descriptor of `rect` from the integral images of its source.
///
/// The rectangle is split into `cells.rows` by `cells.cols` cells of
/// `trunc(width / cols)` by `trunc(height / rows)` pixels, laid out from the
/// rectangle origin. When the rectangle does not divide evenly the pixels
/// left over along its right and bottom edges belong to no cell. Each cell
/// contributes the sum of every bin over its pixels, and the whole vector is
/// divided by its L2 norm plus [`NORMALIZATION_EPSILON`]. The norm is
/// accumulated in `f64`.
///
/// # Errors
/// - [`HogError::InvalidCellGrid`] if the grid has no cells.
/// - [`HogError::RectOutOfBounds`] if `rect` does not fit in the source image.
/// - [`HogError::NonFiniteDescriptor`] if a cell sum or the result contains a
///   NaN or infinity, which means the gradient magnitudes were not finite.
///   The error names the first such element and its bin.
///
/// # Examples
/// ```
/// use hogscan::descriptor::{hog_descriptor, CellGrid};
/// use hogscan::gradient_field::{GradientField, GradientSample};
/// use hogscan::integral_image::OrientedIntegralImages;
/// use hogscan::rect::Rect;
///
/// // Unit magnitude in bin 4 at every pixel.
/// let field = GradientField::from_fn(8, 8, 9, |_, _| {
///     [GradientSample::new(1.0, 4), GradientSample::new(0.0, 0)]
/// }).unwrap();
/// let integrals = OrientedIntegralImages::from_gradient_field(&field).unwrap();
///
/// let descriptor = hog_descriptor(&integrals, Rect::at(0, 0).of_size(8, 8), CellGrid::new(2, 2))
///     .unwrap();
///
/// assert_eq!(descriptor.len(), 36);
/// for (i, v) in descriptor.as_slice().iter().enumerate() {
///     let expected = if i % 9 == 4 { 0.5 } else { 0.0 };
///     assert!((v - expected).abs() < 1e-6);
/// }
/// ```
pub fn hog_descriptor(
    integrals: &OrientedIntegralImages,
    rect: Rect,
    cells: CellGrid,
) -> Result<Descriptor> {
    cells.validate()?;
    let (width, height) = integrals.dimensions();
    if !rect.fits_within(width, height) {
        return Err(HogError::RectOutOfBounds {
            rect,
            width,
            height,
        });
    }

    let bins = integrals.bins();
    let cell_width = (rect.width() as f32 / cells.cols as f32) as u32;
    let cell_height = (rect.height() as f32 / cells.rows as f32) as u32;
    let mut values = Vec::with_capacity(cells.descriptor_length(bins));

    for (row, col) in iproduct!(0..cells.rows, 0..cells.cols) {
        let y0 = rect.top() + row * cell_height;
        let x0 = rect.left() + col * cell_width;
        for bin in 0..bins {
            let sum = integrals.region_sum(bin, x0, y0, x0 + cell_width, y0 + cell_height);
            values.push(sum as f32);
        }
    }
    check_finite(&values, rect, bins)?;

    let norm = l2_norm(&values) + NORMALIZATION_EPSILON as f64;
    for v in values.iter_mut() {
        *v = (*v as f64 / norm) as f32;
    }
    check_finite(&values, rect, bins)?;

    Ok(Descriptor { values })
}

fn check_finite(values: &[f32], rect: Rect, bins: usize) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(HogError::NonFiniteDescriptor {
            rect,
            index,
            bin: index % bins,
        }),
        None => Ok(()),
    }
}
