//! Multi-scale sliding-window sampling of candidate rectangles.

use crate::error::{HogError, Result};
use crate::math::round_to_u32;
use crate::rect::Rect;
use log::trace;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for [`sample_windows`].
///
/// Window sizes grow geometrically from `min_scale` towards `max_scale`.
/// Either `n_scales` or `scale_step` must be non-zero. When `scale_step` is
/// zero it is derived as `(max_scale / min_scale) ^ (1 / n_scales)`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplingOptions {
    /// Window width in pixels at scale 1.
    pub base_width: f32,
    /// Window height in pixels at scale 1.
    pub base_height: f32,
    /// First scale sampled.
    pub min_scale: f32,
    /// Exclusive upper bound on the scales sampled.
    pub max_scale: f32,
    /// Number of multiplicative steps covering `[min_scale, max_scale)`.
    /// Only used when `scale_step` is zero.
    pub n_scales: u32,
    /// Ratio between consecutive scales, or zero to derive it from `n_scales`.
    pub scale_step: f32,
    /// Horizontal offset between windows, as a fraction of window width.
    pub stride_x: f32,
    /// Vertical offset between windows, as a fraction of window height.
    pub stride_y: f32,
}

impl SamplingOptions {
    /// Collects sampling parameters.
    pub fn new(
        base_width: f32,
        base_height: f32,
        min_scale: f32,
        max_scale: f32,
        n_scales: u32,
        scale_step: f32,
        stride_x: f32,
        stride_y: f32,
    ) -> SamplingOptions {
        SamplingOptions {
            base_width,
            base_height,
            min_scale,
            max_scale,
            n_scales,
            scale_step,
            stride_x,
            stride_y,
        }
    }

    /// Ratio between consecutive scales, either as provided or derived from
    /// `n_scales`.
    pub fn effective_scale_step(&self) -> Result<f32> {
        if !(self.min_scale > 0.0) || !self.min_scale.is_finite() || !self.max_scale.is_finite()
        {
            return Err(HogError::InvalidScaleRange {
                min_scale: self.min_scale,
                max_scale: self.max_scale,
            });
        }

        let scale_step = if self.scale_step < f32::EPSILON {
            if self.n_scales == 0 {
                return Err(HogError::NoScaleSource);
            }
            (self.max_scale / self.min_scale).powf(1.0 / self.n_scales as f32)
        } else {
            self.scale_step
        };

        // An empty range never multiplies, so any step is harmless there.
        if self.min_scale < self.max_scale && !(scale_step.is_finite() && scale_step > 1.0) {
            return Err(HogError::InvalidScaleStep { scale_step });
        }
        Ok(scale_step)
    }

    /// Scales visited by the sampler, in ascending order.
    ///
    /// # Examples
    /// ```
    /// use hogscan::window_sampling::SamplingOptions;
    ///
    /// let options = SamplingOptions::new(16.0, 16.0, 1.0, 5.0, 0, 2.0, 0.5, 0.5);
    /// assert_eq!(options.scales().unwrap(), vec![1.0, 2.0, 4.0]);
    /// ```
    pub fn scales(&self) -> Result<Vec<f32>> {
        let step = self.effective_scale_step()?;
        let mut scales = Vec::new();
        let mut scale = self.min_scale;
        while scale < self.max_scale {
            scales.push(scale);
            scale *= step;
        }
        Ok(scales)
    }

    fn validate_strides(&self) -> Result<()> {
        let valid = |s: f32| s.is_finite() && s > 0.0;
        if !valid(self.stride_x) || !valid(self.stride_y) {
            return Err(HogError::InvalidStride {
                stride_x: self.stride_x,
                stride_y: self.stride_y,
            });
        }
        Ok(())
    }
}

impl Default for SamplingOptions {
    /// 80x80 windows at 7 scales in `[1, 2)`, advancing by 40% of the window
    /// size in each direction.
    fn default() -> Self {
        SamplingOptions::new(80.0, 80.0, 1.0, 2.0, 7, 0.0, 0.4, 0.4)
    }
}

/// Enumerates every window position, at every scale, that fits entirely
/// inside a `width` x `height` image.
///
/// At scale `s` windows are `round(base_width * s)` by `round(base_height * s)`
/// pixels and advance by `round(stride * size)` pixels, and never by less
/// than one. Output is ordered by scale, then row, then column.
///
/// Returns [`HogError::NoWindows`] if no window fits at any scale.
///
/// # Examples
/// ```
/// use hogscan::rect::Rect;
/// use hogscan::window_sampling::{sample_windows, SamplingOptions};
///
/// // A single scale of 4x4 windows advancing by 2 pixels.
/// let options = SamplingOptions::new(4.0, 4.0, 1.0, 2.0, 0, 2.0, 0.5, 0.5);
/// let windows = sample_windows(6, 4, &options).unwrap();
///
/// assert_eq!(windows, vec![
///     Rect::at(0, 0).of_size(4, 4),
///     Rect::at(2, 0).of_size(4, 4),
/// ]);
/// ```
pub fn sample_windows(width: u32, height: u32, options: &SamplingOptions) -> Result<Vec<Rect>> {
    if width == 0 || height == 0 {
        return Err(HogError::InvalidImageSize { width, height });
    }
    options.validate_strides()?;

    let mut rects = Vec::new();
    for scale in options.scales()? {
        let w = round_to_u32(options.base_width * scale);
        let h = round_to_u32(options.base_height * scale);
        if w == 0 || h == 0 || w > width || h > height {
            trace!("scale {} gives a {}x{} window, skipped", scale, w, h);
            continue;
        }

        let step_x = round_to_u32(options.stride_x * w as f32).max(1);
        let step_y = round_to_u32(options.stride_y * h as f32).max(1);
        trace!(
            "scale {}: {}x{} windows, steps ({}, {})",
            scale,
            w,
            h,
            step_x,
            step_y
        );

        for y in (0..=height - h).step_by(step_y as usize) {
            for x in (0..=width - w).step_by(step_x as usize) {
                rects.push(Rect::at(x, y).of_size(w, h));
            }
        }
    }

    if rects.is_empty() {
        return Err(HogError::NoWindows { width, height });
    }
    Ok(rects)
}
