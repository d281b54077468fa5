//! Per-pixel gradient samples consumed by [`binning`](crate::binning).

use crate::definitions::GRADIENT_CHANNELS;
use crate::error::{HogError, Result};

/// Gradient magnitude deposited into one orientation bin.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct GradientSample {
    /// Magnitude assigned to `bin`.
    pub magnitude: f32,
    /// Orientation bin index, expected in `[0, bins)`.
    pub bin: u8,
}

impl GradientSample {
    /// A sample of magnitude `magnitude` in orientation bin `bin`.
    pub fn new(magnitude: f32, bin: u8) -> GradientSample {
        GradientSample { magnitude, bin }
    }
}

/// A row-major grid of gradient samples, two candidate bins per pixel.
///
/// Produced by a gradient operator such as
/// [`oriented_gradients`](crate::gradients::oriented_gradients). Bin indices
/// are not checked here; [`bin_images`](crate::binning::bin_images) rejects
/// any that fall outside `[0, bins)`.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientField {
    width: u32,
    height: u32,
    bins: usize,
    samples: Vec<[GradientSample; GRADIENT_CHANNELS]>,
}

impl GradientField {
    /// Wraps a row-major buffer of `width * height` samples.
    pub fn new(
        width: u32,
        height: u32,
        bins: usize,
        samples: Vec<[GradientSample; GRADIENT_CHANNELS]>,
    ) -> Result<GradientField> {
        check_bin_count(bins)?;
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(HogError::FieldSizeMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(GradientField {
            width,
            height,
            bins,
            samples,
        })
    }

    /// Builds a field by calling `f(x, y)` for every pixel in row-major order.
    ///
    /// # Examples
    /// ```
    /// use hogscan::gradient_field::{GradientField, GradientSample};
    ///
    /// // Unit magnitude in bin 4 everywhere, nothing in the second channel.
    /// let field = GradientField::from_fn(8, 8, 9, |_, _| {
    ///     [GradientSample::new(1.0, 4), GradientSample::new(0.0, 0)]
    /// }).unwrap();
    ///
    /// assert_eq!(field.get(3, 5)[0], GradientSample::new(1.0, 4));
    /// ```
    pub fn from_fn<F>(width: u32, height: u32, bins: usize, mut f: F) -> Result<GradientField>
    where
        F: FnMut(u32, u32) -> [GradientSample; GRADIENT_CHANNELS],
    {
        check_bin_count(bins)?;
        let mut samples = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                samples.push(f(x, y));
            }
        }
        Ok(GradientField {
            width,
            height,
            bins,
            samples,
        })
    }

    /// Width of the field in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the field in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` of the field.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of orientation bins the samples index into.
    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Both candidate samples at pixel `(x, y)`.
    ///
    /// # Panics
    /// If `(x, y)` is outside the field.
    pub fn get(&self, x: u32, y: u32) -> [GradientSample; GRADIENT_CHANNELS] {
        assert!(
            x < self.width && y < self.height,
            "({}, {}) outside {}x{} gradient field",
            x,
            y,
            self.width,
            self.height
        );
        self.samples[y as usize * self.width as usize + x as usize]
    }

    /// Row-major samples.
    pub fn samples(&self) -> &[[GradientSample; GRADIENT_CHANNELS]] {
        &self.samples
    }
}

fn check_bin_count(bins: usize) -> Result<()> {
    if bins == 0 || bins > u8::MAX as usize + 1 {
        return Err(HogError::InvalidBinCount { bins });
    }
    Ok(())
}
