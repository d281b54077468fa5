use crate::definitions::{BinImage, GRADIENT_CHANNELS};
use crate::gradient_field::{GradientField, GradientSample};
use image::Luma;
use proptest::{
    sample::SizeRange,
    strategy::{BoxedStrategy, Strategy},
};
use std::ops::RangeInclusive;

/// Create a strategy to generate bin images with arbitrary dimensions selected
/// within the specified ranges. Pixel values are small whole numbers so that
/// sums over them are exact.
pub(crate) fn arbitrary_bin_image(
    width_range: impl Into<SizeRange>,
    height_range: impl Into<SizeRange>,
) -> BoxedStrategy<BinImage> {
    dims(width_range, height_range)
        .prop_flat_map(|(w, h)| {
            proptest::collection::vec(0u8..100, (w * h) as usize)
                .prop_map(move |v| {
                    BinImage::from_fn(w, h, |x, y| Luma([v[(y * w + x) as usize] as f32]))
                })
        })
        .boxed()
}

/// Create a strategy to generate gradient fields with `bins` orientation bins,
/// valid bin indices and magnitudes that are multiples of 0.25 in `[0, 10)`.
pub(crate) fn arbitrary_gradient_field(
    width_range: impl Into<SizeRange>,
    height_range: impl Into<SizeRange>,
    bins: usize,
) -> BoxedStrategy<GradientField> {
    let sample =
        (0u8..40, 0..bins as u8).prop_map(|(m, b)| GradientSample::new(m as f32 * 0.25, b));
    let pixel = [sample.clone(), sample];
    dims(width_range, height_range)
        .prop_flat_map(move |(w, h)| {
            proptest::collection::vec(pixel.clone(), (w * h) as usize).prop_map(
                move |v: Vec<[GradientSample; GRADIENT_CHANNELS]>| {
                    GradientField::new(w, h, bins, v).expect("dimensions match by construction")
                },
            )
        })
        .boxed()
}

fn dims(width: impl Into<SizeRange>, height: impl Into<SizeRange>) -> BoxedStrategy<(u32, u32)> {
    let width = dim(width);
    let height = dim(height);
    width
        .prop_flat_map(move |w| height.clone().prop_map(move |h| (w, h)))
        .boxed()
}

fn dim(range: impl Into<SizeRange>) -> RangeInclusive<u32> {
    let range = range.into();
    range.start() as u32..=range.end_incl() as u32
}

#[cfg(not(miri))]
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_arbitrary_fixed_bin_image(img in arbitrary_bin_image(3, 7)) {
            assert_eq!(img.dimensions(), (3, 7));
        }

        #[test]
        fn test_arbitrary_gradient_field(field in arbitrary_gradient_field(1..10, 2..=15, 4)) {
            assert!((1..10).contains(&field.width()));
            assert!((2..=15).contains(&field.height()));
            assert!(field.samples().iter().flatten().all(|s| s.bin < 4));
        }
    }
}
