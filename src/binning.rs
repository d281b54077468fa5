//! Splitting a gradient field into per-orientation magnitude images.

use crate::definitions::{BinImage, GRADIENT_CHANNELS};
use crate::error::{HogError, Result};
use crate::gradient_field::GradientField;
use image::Luma;

/// Builds one magnitude image per orientation bin.
///
/// For every pixel, each of the two gradient candidates writes its magnitude
/// into the image of its own bin at that pixel. Writes replace rather than
/// accumulate, so when both candidates of a pixel name the same bin only the
/// second one is kept. Bins that no candidate names stay zero.
///
/// Returns [`HogError::BinOutOfRange`] for the first candidate, in row-major
/// order, whose bin index is not below `field.bins()`.
///
/// # Examples
/// ```
/// use hogscan::binning::bin_images;
/// use hogscan::gradient_field::{GradientField, GradientSample};
///
/// let field = GradientField::from_fn(2, 1, 3, |x, _| {
///     [GradientSample::new(1.0 + x as f32, 0), GradientSample::new(0.5, 2)]
/// }).unwrap();
///
/// let bins = bin_images(&field).unwrap();
/// assert_eq!(bins.len(), 3);
/// assert_eq!(bins[0].get_pixel(1, 0)[0], 2.0);
/// assert_eq!(bins[1].get_pixel(1, 0)[0], 0.0);
/// assert_eq!(bins[2].get_pixel(0, 0)[0], 0.5);
/// ```
pub fn bin_images(field: &GradientField) -> Result<Vec<BinImage>> {
    let (width, height) = field.dimensions();
    let bins = field.bins();
    let mut images = vec![BinImage::new(width, height); bins];

    for (i, samples) in field.samples().iter().enumerate() {
        let x = (i % width as usize) as u32;
        let y = (i / width as usize) as u32;
        for channel in 0..GRADIENT_CHANNELS {
            let sample = samples[channel];
            let bin = sample.bin as usize;
            if bin >= bins {
                return Err(HogError::BinOutOfRange {
                    x,
                    y,
                    channel,
                    bin,
                    bins,
                });
            }
            images[bin].put_pixel(x, y, Luma([sample.magnitude]));
        }
    }

    Ok(images)
}
