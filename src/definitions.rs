//! Type aliases and constants shared between the stages.

use image::{ImageBuffer, Luma, Pixel};

/// An `ImageBuffer` containing Pixels of type P with storage `Vec<P::Subpixel>`.
/// Most operations in this library only support inputs of this type.
pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;

/// Accumulated gradient magnitude for a single orientation bin.
/// Same dimensions as the source image.
pub type BinImage = Image<Luma<f32>>;

/// Summed-area table of a [`BinImage`]. One pixel wider and taller than
/// its source, with a zero top row and left column.
pub type IntegralImage = Image<Luma<f64>>;

/// Default number of orientation bins, spanning unsigned angles `[0, π)`.
pub const ORIENTATION_BINS: usize = 9;

/// Number of candidate `(magnitude, bin)` pairs a gradient operator
/// provides for each pixel.
pub const GRADIENT_CHANNELS: usize = 2;
