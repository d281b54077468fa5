//! Descriptor extraction for every sampled window of one image.
//!
//! Errors that concern the whole image (bad sampling options, an invalid
//! gradient field) are returned to the caller, which decides whether to
//! abort a batch or move on to the next image. Errors that concern a single
//! window are logged and that window is skipped.

use crate::definitions::Image;
use crate::descriptor::{hog_descriptor, CellGrid, Descriptor};
use crate::error::{HogError, Result};
use crate::gradient_field::GradientField;
use crate::gradients::{oriented_gradients, GradientOptions};
use crate::integral_image::OrientedIntegralImages;
use crate::rect::Rect;
use crate::window_sampling::{sample_windows, SamplingOptions};
use image::Pixel;
use log::{debug, warn};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Gradient, sampling and cell layout settings used for every image.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DescriptorOptions {
    /// How gradients are computed from decoded images.
    pub gradients: GradientOptions,
    /// Where windows are placed.
    pub sampling: SamplingOptions,
    /// How each window is divided into cells.
    pub cells: CellGrid,
}

impl DescriptorOptions {
    /// Combines sampling options and a cell grid, with default gradients.
    pub fn new(sampling: SamplingOptions, cells: CellGrid) -> DescriptorOptions {
        DescriptorOptions {
            gradients: GradientOptions::default(),
            sampling,
            cells,
        }
    }

    /// Replaces the gradient settings.
    pub fn with_gradients(self, gradients: GradientOptions) -> DescriptorOptions {
        DescriptorOptions { gradients, ..self }
    }
}

/// A sampled window and its descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDescriptor {
    /// Window position and size in the source image.
    pub rect: Rect,
    /// Normalised cell histograms of the window.
    pub descriptor: Descriptor,
}

/// The descriptors of one image, in sampling order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageDescriptors {
    /// Successfully described windows.
    pub windows: Vec<WindowDescriptor>,
    /// Windows that were sampled but could not be described.
    pub skipped: Vec<(Rect, HogError)>,
}

impl ImageDescriptors {
    /// Number of described windows.
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Number of skipped windows.
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Describes each of `rects` in order, skipping windows whose extraction
/// fails with a [window-local](HogError::is_window_local) error.
///
/// Other errors, such as an invalid cell grid, would fail every window alike
/// and are returned immediately.
pub fn window_descriptors(
    integrals: &OrientedIntegralImages,
    rects: &[Rect],
    cells: CellGrid,
) -> Result<ImageDescriptors> {
    let results: Vec<_> = rects
        .iter()
        .map(|&rect| (rect, hog_descriptor(integrals, rect, cells)))
        .collect();
    collect_results(results)
}

#[cfg(feature = "rayon")]
#[doc = generate_parallel_doc_comment!("window_descriptors")]
pub fn window_descriptors_parallel(
    integrals: &OrientedIntegralImages,
    rects: &[Rect],
    cells: CellGrid,
) -> Result<ImageDescriptors> {
    let results: Vec<_> = rects
        .par_iter()
        .map(|&rect| (rect, hog_descriptor(integrals, rect, cells)))
        .collect();
    collect_results(results)
}

fn collect_results(results: Vec<(Rect, Result<Descriptor>)>) -> Result<ImageDescriptors> {
    let mut out = ImageDescriptors::default();
    for (rect, result) in results {
        match result {
            Ok(descriptor) => out.windows.push(WindowDescriptor { rect, descriptor }),
            Err(err) if err.is_window_local() => {
                warn!("skipping window {:?}: {}", rect, err);
                out.skipped.push((rect, err));
            }
            Err(err) => return Err(err),
        }
    }
    Ok(out)
}

/// Samples windows over a gradient field and describes each of them.
///
/// Bin images and integral images are built once and shared by all windows.
///
/// # Examples
/// ```
/// use hogscan::descriptor::CellGrid;
/// use hogscan::gradient_field::{GradientField, GradientSample};
/// use hogscan::pipeline::{field_descriptors, DescriptorOptions};
/// use hogscan::window_sampling::SamplingOptions;
///
/// let field = GradientField::from_fn(16, 8, 9, |x, _| {
///     [GradientSample::new(1.0, (x % 9) as u8), GradientSample::new(0.5, 0)]
/// }).unwrap();
///
/// // 8x8 windows at a single scale, advancing by half a window.
/// let sampling = SamplingOptions::new(8.0, 8.0, 1.0, 2.0, 1, 0.0, 0.5, 0.5);
/// let options = DescriptorOptions::new(sampling, CellGrid::new(2, 2));
///
/// let described = field_descriptors(&field, &options).unwrap();
/// assert_eq!(described.window_count(), 3);
/// assert!(described.windows.iter().all(|w| w.descriptor.len() == 36));
/// ```
pub fn field_descriptors(
    field: &GradientField,
    options: &DescriptorOptions,
) -> Result<ImageDescriptors> {
    let (width, height) = field.dimensions();
    let rects = sample_windows(width, height, &options.sampling)?;
    let integrals = OrientedIntegralImages::from_gradient_field(field)?;
    debug!(
        "{}x{} image: {} windows, {} bins",
        width,
        height,
        rects.len(),
        integrals.bins()
    );

    #[cfg(feature = "rayon")]
    let described = window_descriptors_parallel(&integrals, &rects, options.cells)?;
    #[cfg(not(feature = "rayon"))]
    let described = window_descriptors(&integrals, &rects, options.cells)?;

    if !described.skipped.is_empty() {
        debug!("{} of {} windows skipped", described.skipped_count(), rects.len());
    }
    Ok(described)
}

/// Computes gradients of a decoded image using `options.gradients`, then
/// describes every sampled window as [`field_descriptors`] does.
pub fn image_descriptors<P>(image: &Image<P>, options: &DescriptorOptions) -> Result<ImageDescriptors>
where
    P: Pixel<Subpixel = u8>,
{
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(HogError::InvalidImageSize { width, height });
    }
    let field = oriented_gradients(image, &options.gradients)?;
    field_descriptors(&field, options)
}
