//! Functions for computing [integral images](https://en.wikipedia.org/wiki/Summed_area_table)
//! of orientation bin images, and reading rectangle sums back from them.

use crate::binning::bin_images;
use crate::definitions::{BinImage, IntegralImage};
use crate::error::Result;
use crate::gradient_field::GradientField;
use crate::rect::Rect;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Computes the 2d running sum of a bin image.
///
/// An integral image I has width and height one greater than its source image F,
/// and is defined by I(x, y) = sum of F(x', y') for x' < x, y' < y, i.e. each pixel
/// in the integral image contains the sum of all input pixels that are strictly
/// above it and strictly to its left. In particular, the left column and top row
/// of an integral image are all 0, and the value of the bottom right pixel of an
/// integral image is equal to the sum of all pixels in the source image.
///
/// Sums are accumulated in `f64`.
///
/// # Examples
/// ```
/// use hogscan::definitions::BinImage;
/// use hogscan::integral_image::{integral_image, sum_image_pixels};
/// use image::Luma;
///
/// let image = BinImage::from_fn(3, 2, |x, y| Luma([(1 + x + 3 * y) as f32]));
/// let integral = integral_image(&image);
///
/// assert_eq!(integral.dimensions(), (4, 3));
/// assert_eq!(integral.get_pixel(3, 2)[0], 21.0);
///
/// // Sum of all pixels in the right two columns
/// assert_eq!(sum_image_pixels(&integral, 1, 0, 2, 1), 2.0 + 3.0 + 5.0 + 6.0);
/// ```
pub fn integral_image(image: &BinImage) -> IntegralImage {
    let (in_width, in_height) = image.dimensions();
    let out_width = in_width as usize + 1;
    let mut out = IntegralImage::new(in_width + 1, in_height + 1);

    if in_width == 0 || in_height == 0 {
        return out;
    }

    let src: &[f32] = image.as_raw();
    let dst: &mut [f64] = &mut out;
    for y in 1..=in_height as usize {
        let src_row = &src[(y - 1) * in_width as usize..y * in_width as usize];
        let (above, rest) = dst.split_at_mut(y * out_width);
        let above = &above[(y - 1) * out_width..];
        let current = &mut rest[..out_width];

        let mut sum = 0f64;
        for x in 1..out_width {
            sum += src_row[x - 1] as f64;
            current[x] = above[x] + sum;
        }
    }

    out
}

/// Sums the pixels in positions [left, right] * [top, bottom] in F, where `integral_image` is the
/// integral image of F.
///
/// See the [`integral_image`] documentation for examples.
pub fn sum_image_pixels(
    integral_image: &IntegralImage,
    left: u32,
    top: u32,
    right: u32,
    bottom: u32,
) -> f64 {
    corner_sum(integral_image, left, top, right + 1, bottom + 1)
}

/// Sum over the half-open region `[x0, x1) * [y0, y1)` of the source image.
fn corner_sum(integral: &IntegralImage, x0: u32, y0: u32, x1: u32, y1: u32) -> f64 {
    let at = |x, y| integral.get_pixel(x, y)[0];
    at(x0, y0) + at(x1, y1) - at(x1, y0) - at(x0, y1)
}

/// The integral images of every orientation bin of one source image.
///
/// Built once per image and only read afterwards, so a shared reference can
/// serve any number of concurrent descriptor extractions.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientedIntegralImages {
    width: u32,
    height: u32,
    images: Vec<IntegralImage>,
}

impl OrientedIntegralImages {
    /// Integrates each bin image.
    ///
    /// # Panics
    /// If the bin images do not all have the same dimensions.
    pub fn from_bin_images(bins: &[BinImage]) -> OrientedIntegralImages {
        let (width, height) = common_dimensions(bins);
        OrientedIntegralImages {
            width,
            height,
            images: bins.iter().map(integral_image).collect(),
        }
    }

    #[cfg(feature = "rayon")]
    #[doc = generate_parallel_doc_comment!("OrientedIntegralImages::from_bin_images")]
    pub fn from_bin_images_parallel(bins: &[BinImage]) -> OrientedIntegralImages {
        let (width, height) = common_dimensions(bins);
        OrientedIntegralImages {
            width,
            height,
            images: bins.par_iter().map(integral_image).collect(),
        }
    }

    /// Splits a gradient field into bin images and integrates each of them.
    ///
    /// # Examples
    /// ```
    /// use hogscan::gradient_field::{GradientField, GradientSample};
    /// use hogscan::integral_image::OrientedIntegralImages;
    /// use hogscan::rect::Rect;
    ///
    /// let field = GradientField::from_fn(4, 4, 9, |_, _| {
    ///     [GradientSample::new(1.0, 4), GradientSample::new(0.0, 0)]
    /// }).unwrap();
    /// let integrals = OrientedIntegralImages::from_gradient_field(&field).unwrap();
    ///
    /// assert_eq!(integrals.bins(), 9);
    /// assert_eq!(integrals.rect_sum(4, Rect::at(1, 1).of_size(2, 3)), 6.0);
    /// assert_eq!(integrals.rect_sum(3, Rect::at(1, 1).of_size(2, 3)), 0.0);
    /// ```
    pub fn from_gradient_field(field: &GradientField) -> Result<OrientedIntegralImages> {
        let bins = bin_images(field)?;
        #[cfg(feature = "rayon")]
        let integrals = OrientedIntegralImages::from_bin_images_parallel(&bins);
        #[cfg(not(feature = "rayon"))]
        let integrals = OrientedIntegralImages::from_bin_images(&bins);
        Ok(integrals)
    }

    /// Number of orientation bins.
    pub fn bins(&self) -> usize {
        self.images.len()
    }

    /// Width of the source image. The integral images are one pixel wider.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the source image. The integral images are one pixel taller.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` of the source image.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Integral image of a single bin.
    pub fn integral(&self, bin: usize) -> &IntegralImage {
        &self.images[bin]
    }

    /// Sum of bin `bin` over `rect`.
    ///
    /// # Panics
    /// If `rect` does not fit in the source image or `bin >= self.bins()`.
    pub fn rect_sum(&self, bin: usize, rect: Rect) -> f64 {
        self.region_sum(
            bin,
            rect.left(),
            rect.top(),
            rect.left() + rect.width(),
            rect.top() + rect.height(),
        )
    }

    /// Sum of bin `bin` over the half-open region `[x0, x1) * [y0, y1)`.
    /// Empty regions sum to zero.
    pub(crate) fn region_sum(&self, bin: usize, x0: u32, y0: u32, x1: u32, y1: u32) -> f64 {
        corner_sum(&self.images[bin], x0, y0, x1, y1)
    }
}

fn common_dimensions(bins: &[BinImage]) -> (u32, u32) {
    let dimensions = bins.first().map_or((0, 0), |b| b.dimensions());
    assert!(
        bins.iter().all(|b| b.dimensions() == dimensions),
        "bin images must share their dimensions"
    );
    dimensions
}


#[cfg(not(miri))]
#[cfg(test)]
mod proptests {
    use super::*;
    use crate::proptest_utils::arbitrary_bin_image;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn proptest_rect_sum_identity(
            image in arbitrary_bin_image(1..20, 1..20),
            (fx, fy, fw, fh) in (0.0..1f64, 0.0..1f64, 0.0..1f64, 0.0..1f64),
        ) {
            let (width, height) = image.dimensions();
            let x = (fx * width as f64) as u32 % width;
            let y = (fy * height as f64) as u32 % height;
            let w = 1 + (fw * (width - x) as f64) as u32 % (width - x);
            let h = 1 + (fh * (height - y) as f64) as u32 % (height - y);
            let rect = Rect::at(x, y).of_size(w, h);

            let integrals = OrientedIntegralImages::from_bin_images(&[image.clone()]);
            let mut expected = 0f64;
            for iy in y..y + h {
                for ix in x..x + w {
                    expected += image.get_pixel(ix, iy)[0] as f64;
                }
            }
            prop_assert_eq!(integrals.rect_sum(0, rect), expected);
        }
    }
}
