//! An oriented-gradient operator producing [`GradientField`]s from images.

use crate::definitions::{Image, GRADIENT_CHANNELS, ORIENTATION_BINS};
use crate::error::Result;
use crate::gradient_field::{GradientField, GradientSample};
use image::Pixel;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Parameters for [`oriented_gradients`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GradientOptions {
    /// Number of orientation bins covering `[0, π)`.
    pub bins: usize,
    /// Whether intensities are replaced by their square roots before
    /// differencing.
    pub gamma_correction: bool,
}

impl GradientOptions {
    /// Collects gradient parameters.
    pub fn new(bins: usize, gamma_correction: bool) -> GradientOptions {
        GradientOptions {
            bins,
            gamma_correction,
        }
    }
}

impl Default for GradientOptions {
    /// Nine bins with gamma correction.
    fn default() -> Self {
        GradientOptions::new(ORIENTATION_BINS, true)
    }
}

/// Computes a two-candidate [`GradientField`] from an image.
///
/// Gradients are centred differences `[-1, 0, 1]` in each direction. Borders
/// are reflected without repeating the edge pixel, so the neighbour left of
/// column 0 is column 1. With `gamma_correction` every intensity is replaced
/// by its square root first. For images with several channels the channel
/// with the largest gradient magnitude is used at each pixel.
///
/// Orientations are unsigned, so `[0, π)` is split into `bins` equal bins
/// whose centres lie at `(i + 0.5) * π / bins`. Each pixel's magnitude is
/// divided between the two bins whose centres surround its orientation,
/// in proportion to their distance from it: channel 0 holds the lower bin
/// and channel 1 the upper bin, wrapping from the last bin to the first.
///
/// # Examples
/// ```
/// use hogscan::gradients::{oriented_gradients, GradientOptions};
/// use image::{GrayImage, Luma};
///
/// // Intensity increases to the right, so the gradient points along x.
/// let image = GrayImage::from_fn(4, 4, |x, _| Luma([10 * x as u8]));
/// let field = oriented_gradients(&image, &GradientOptions::new(9, false)).unwrap();
///
/// // Angle 0 lies halfway between the centres of bins 8 and 0.
/// let [lower, upper] = field.get(1, 1);
/// assert_eq!((lower.bin, upper.bin), (8, 0));
/// assert_eq!(lower.magnitude + upper.magnitude, 20.0);
///
/// // Column 0 sees column 1 on both sides.
/// let [lower, upper] = field.get(0, 1);
/// assert_eq!(lower.magnitude + upper.magnitude, 0.0);
/// ```
pub fn oriented_gradients<P>(image: &Image<P>, options: &GradientOptions) -> Result<GradientField>
where
    P: Pixel<Subpixel = u8>,
{
    let (width, height) = image.dimensions();
    let bins = options.bins;
    let bin_width = PI / bins as f32;
    let intensity: fn(u8) -> f32 = if options.gamma_correction {
        |v| (v as f32).sqrt()
    } else {
        |v| v as f32
    };

    GradientField::from_fn(width, height, bins, |x, y| {
        let (dx, dy) = strongest_gradient(image, x, y, intensity);
        split_between_bins(dx, dy, bin_width, bins)
    })
}

/// Index of `i` in `[0, n)` after reflecting about the first and last
/// entries, e.g. `-1 -> 1` and `n -> n - 2`.
fn reflect_101(i: i64, n: u32) -> u32 {
    let n = n as i64;
    if n == 1 {
        return 0;
    }
    let i = if i < 0 { -i } else { i };
    let i = if i >= n { 2 * n - 2 - i } else { i };
    i as u32
}

/// Centred difference gradient at `(x, y)` of the channel with the largest
/// magnitude.
fn strongest_gradient<P>(image: &Image<P>, x: u32, y: u32, intensity: fn(u8) -> f32) -> (f32, f32)
where
    P: Pixel<Subpixel = u8>,
{
    let (width, height) = image.dimensions();
    let (x, y) = (x as i64, y as i64);
    let left = image.get_pixel(reflect_101(x - 1, width), y as u32).channels();
    let right = image.get_pixel(reflect_101(x + 1, width), y as u32).channels();
    let above = image.get_pixel(x as u32, reflect_101(y - 1, height)).channels();
    let below = image.get_pixel(x as u32, reflect_101(y + 1, height)).channels();

    let mut best = (0f32, 0f32);
    let mut best_sq = -1f32;
    for c in 0..P::CHANNEL_COUNT as usize {
        let dx = intensity(right[c]) - intensity(left[c]);
        let dy = intensity(below[c]) - intensity(above[c]);
        let sq = dx * dx + dy * dy;
        if sq > best_sq {
            best = (dx, dy);
            best_sq = sq;
        }
    }
    best
}

fn split_between_bins(
    dx: f32,
    dy: f32,
    bin_width: f32,
    bins: usize,
) -> [GradientSample; GRADIENT_CHANNELS] {
    let magnitude = (dx * dx + dy * dy).sqrt();
    let mut angle = dy.atan2(dx);
    if angle < 0.0 {
        angle += PI;
    }
    if angle >= PI {
        angle -= PI;
    }

    let position = angle / bin_width - 0.5;
    let lower = position.floor();
    let fraction = position - lower;
    let lower = (lower as i64).rem_euclid(bins as i64);
    let upper = (lower + 1).rem_euclid(bins as i64);

    [
        GradientSample::new(magnitude * (1.0 - fraction), lower as u8),
        GradientSample::new(magnitude * fraction, upper as u8),
    ]
}
