//! Runs the whole pipeline on small synthetic inputs with known answers.

use hogscan::definitions::ORIENTATION_BINS;
use hogscan::descriptor::{hog_descriptor, CellGrid};
use hogscan::gradient_field::{GradientField, GradientSample};
use hogscan::integral_image::OrientedIntegralImages;
use hogscan::pipeline::{field_descriptors, image_descriptors, DescriptorOptions};
use hogscan::rect::Rect;
use hogscan::window_sampling::{sample_windows, SamplingOptions};
use hogscan::HogError;
use image::{GrayImage, Luma, Rgb, RgbImage};

/// Magnitude 1.0 at bin 4 for all pixels, nothing elsewhere.
fn single_edge_field() -> GradientField {
    GradientField::from_fn(8, 8, ORIENTATION_BINS, |_, _| {
        [GradientSample::new(1.0, 4), GradientSample::new(0.0, 0)]
    })
    .unwrap()
}

#[test]
fn test_single_window_single_edge() {
    let field = single_edge_field();
    // One scale of 8x8 windows over an 8x8 image yields exactly one window.
    let sampling = SamplingOptions::new(8.0, 8.0, 1.0, 2.0, 1, 0.0, 1.0, 1.0);
    let rects = sample_windows(8, 8, &sampling).unwrap();
    assert_eq!(rects, vec![Rect::at(0, 0).of_size(8, 8)]);

    let integrals = OrientedIntegralImages::from_gradient_field(&field).unwrap();
    let descriptor = hog_descriptor(&integrals, rects[0], CellGrid::new(2, 2)).unwrap();

    assert_eq!(descriptor.len(), 36);
    let values = descriptor.as_slice();
    assert_eq!(values.iter().filter(|v| **v != 0.0).count(), 4);
    for cell in 0..4 {
        assert!((values[cell * 9 + 4] - 0.5).abs() < 1e-6);
    }
}

#[test]
fn test_field_descriptors_single_edge() {
    let options = DescriptorOptions::new(
        SamplingOptions::new(8.0, 8.0, 1.0, 2.0, 1, 0.0, 1.0, 1.0),
        CellGrid::new(2, 2),
    );
    let described = field_descriptors(&single_edge_field(), &options).unwrap();
    assert_eq!(described.window_count(), 1);
    assert_eq!(described.windows[0].rect, Rect::at(0, 0).of_size(8, 8));
}

#[test]
fn test_reference_configuration_on_synthetic_image() {
    // Bright disc on a dark background, large enough for the default 80x80 windows.
    let image = GrayImage::from_fn(200, 160, |x, y| {
        let (dx, dy) = (x as f32 - 100.0, y as f32 - 80.0);
        Luma([if dx * dx + dy * dy < 50.0 * 50.0 { 220 } else { 30 }])
    });

    let options = DescriptorOptions::default();
    let described = image_descriptors(&image, &options).unwrap();

    let expected = sample_windows(200, 160, &options.sampling).unwrap();
    assert_eq!(described.window_count(), expected.len());
    for (window, rect) in described.windows.iter().zip(&expected) {
        assert_eq!(window.rect, *rect);
        assert_eq!(window.descriptor.len(), 36);
        assert!(window.descriptor.as_slice().iter().all(|v| v.is_finite()));
    }
}

#[test]
fn test_colour_images_are_supported() {
    let image = RgbImage::from_fn(32, 32, |x, _| Rgb([0, if x < 24 { 0 } else { 255 }, 0]));
    let options = DescriptorOptions::new(
        SamplingOptions::new(16.0, 16.0, 1.0, 2.0, 1, 0.0, 0.5, 0.5),
        CellGrid::new(2, 2),
    );
    let described = image_descriptors(&image, &options).unwrap();
    assert_eq!(described.window_count(), 9);

    // Windows away from the vertical edge have no gradient at all.
    let flat = described
        .windows
        .iter()
        .find(|w| w.rect == Rect::at(0, 0).of_size(16, 16))
        .unwrap();
    assert!(flat.descriptor.as_slice().iter().all(|v| *v == 0.0));
}

#[test]
fn test_small_image_reports_no_windows() {
    let image = GrayImage::new(40, 40);
    assert_eq!(
        image_descriptors(&image, &DescriptorOptions::default()),
        Err(HogError::NoWindows { width: 40, height: 40 })
    );
}
