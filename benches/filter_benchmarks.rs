//! Criterion benchmarks for the filter chain and compositor

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use photomerge::{
    apply_filter, merge_images, ColorFilter, MergeConfig, PassthroughSegmenter, Position,
};

fn test_base(width: u32, height: u32) -> DynamicImage {
    let mut buffer = RgbImage::new(width, height);
    for (x, y, pixel) in buffer.enumerate_pixels_mut() {
        *pixel = Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8]);
    }
    DynamicImage::ImageRgb8(buffer)
}

fn test_overlay(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([0, 0, 255, 255])))
}

fn bench_filters(c: &mut Criterion) {
    let image = test_base(512, 512);

    let mut group = c.benchmark_group("filters_512x512");
    group.bench_function("grayscale", |b| {
        b.iter(|| apply_filter(black_box(image.clone()), ColorFilter::Grayscale));
    });
    group.bench_function("warm_tone", |b| {
        b.iter(|| apply_filter(black_box(image.clone()), ColorFilter::WarmTone));
    });
    group.bench_function("cool_tone", |b| {
        b.iter(|| apply_filter(black_box(image.clone()), ColorFilter::CoolTone));
    });
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let base = test_base(512, 512);
    let overlay = test_overlay(128, 128);
    let config = MergeConfig::builder()
        .filter(ColorFilter::WarmTone)
        .scale(1.5)
        .position(Position::new(64, 64))
        .build()
        .unwrap();

    c.bench_function("merge_512_base_128_overlay", |b| {
        b.iter(|| {
            merge_images(
                black_box(&base),
                black_box(&overlay),
                &config,
                Box::new(PassthroughSegmenter::new()),
            )
            .unwrap()
        });
    });
}

criterion_group!(benches, bench_filters, bench_merge);
criterion_main!(benches);
