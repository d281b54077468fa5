use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hogscan::definitions::ORIENTATION_BINS;
use hogscan::descriptor::{hog_descriptor, CellGrid};
use hogscan::gradient_field::{GradientField, GradientSample};
use hogscan::integral_image::OrientedIntegralImages;
use hogscan::pipeline::window_descriptors;
use hogscan::window_sampling::{sample_windows, SamplingOptions};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_field(width: u32, height: u32) -> GradientField {
    let mut rng = StdRng::seed_from_u64(7);
    GradientField::from_fn(width, height, ORIENTATION_BINS, |_, _| {
        let bin = rng.gen_range(0..ORIENTATION_BINS as u8);
        let split = rng.gen_range(0.0..1.0f32);
        let magnitude = rng.gen_range(0.0..255.0f32);
        [
            GradientSample::new(magnitude * split, bin),
            GradientSample::new(magnitude * (1.0 - split), (bin + 1) % ORIENTATION_BINS as u8),
        ]
    })
    .expect("valid bin count")
}

fn bench_integral_images(c: &mut Criterion) {
    let field = random_field(640, 480);
    c.bench_function("oriented_integral_images_640x480", |b| {
        b.iter(|| {
            let integrals = OrientedIntegralImages::from_gradient_field(black_box(&field));
            black_box(integrals)
        });
    });
}

fn bench_window_descriptors(c: &mut Criterion) {
    let field = random_field(640, 480);
    let integrals = OrientedIntegralImages::from_gradient_field(&field).expect("valid field");
    let rects = sample_windows(640, 480, &SamplingOptions::default()).expect("windows fit");
    let cells = CellGrid::default();

    c.bench_function("hog_descriptor_single_80x80", |b| {
        b.iter(|| black_box(hog_descriptor(&integrals, black_box(rects[0]), cells)));
    });

    c.bench_function("window_descriptors_default_sampling_640x480", |b| {
        b.iter(|| black_box(window_descriptors(&integrals, black_box(&rects), cells)));
    });
}

criterion_group!(benches, bench_integral_images, bench_window_descriptors);
criterion_main!(benches);
