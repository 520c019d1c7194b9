//! Benchmarks for tonal operations.
//!
//! Run with: `cargo bench`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use tonal_core::{GrayImage, Lut, RgbaImage};
use tonal_ops::{
    equalize_histogram_gray, equalize_histogram_rgba, gamma_lut, gaussian_blur, retinex, stretch_contrast_hsv,
    unsharp_mask_gray, unsharp_mask_rgba, RetinexParams,
};

const SIZES: [u32; 3] = [256, 512, 1024];

fn gray(size: u32) -> GrayImage {
    let data = (0..size * size).map(|i| ((i * 31) ^ (i >> 7)) as u8).collect();
    GrayImage::from_data(size, size, data).unwrap()
}

fn rgba(size: u32) -> RgbaImage {
    let data = (0..size * size * 4).map(|i| ((i * 17) ^ (i >> 5)) as u8).collect();
    RgbaImage::from_data(size, size, data).unwrap()
}

/// Benchmark LUT application on gray and color images.
fn bench_lut(c: &mut Criterion) {
    let mut group = c.benchmark_group("lut");
    let lut = gamma_lut(2.2).unwrap();
    let luts = [lut, Lut::identity(), lut, Lut::identity()];

    for size in SIZES {
        group.throughput(Throughput::Elements((size * size) as u64));

        let img = gray(size);
        group.bench_with_input(BenchmarkId::new("gray", size), &img, |b, img| {
            b.iter(|| {
                let mut out = img.clone();
                out.apply_lut(black_box(&lut));
                out
            })
        });

        let img = rgba(size);
        group.bench_with_input(BenchmarkId::new("rgba_per_channel", size), &img, |b, img| {
            b.iter(|| {
                let mut out = img.clone();
                out.apply_luts(black_box(&luts));
                out
            })
        });
    }

    group.finish();
}

/// Benchmark histogram equalization.
fn bench_equalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("equalize");

    for size in SIZES {
        group.throughput(Throughput::Elements((size * size) as u64));

        let img = gray(size);
        group.bench_with_input(BenchmarkId::new("gray", size), &img, |b, img| {
            b.iter(|| {
                let mut out = img.clone();
                equalize_histogram_gray(&mut out);
                out
            })
        });

        let img = rgba(size);
        group.bench_with_input(BenchmarkId::new("rgba_hsv", size), &img, |b, img| {
            b.iter(|| {
                let mut out = img.clone();
                equalize_histogram_rgba(&mut out, true).unwrap();
                out
            })
        });

        group.bench_with_input(BenchmarkId::new("stretch_hsv", size), &img, |b, img| {
            b.iter(|| {
                let mut out = img.clone();
                stretch_contrast_hsv(&mut out).unwrap();
                out
            })
        });
    }

    group.finish();
}

/// Benchmark Gaussian blur and unsharp mask.
fn bench_blur(c: &mut Criterion) {
    let mut group = c.benchmark_group("blur");
    group.sample_size(20);

    for size in SIZES {
        group.throughput(Throughput::Elements((size * size) as u64));

        let img = gray(size);
        for k in [3usize, 7, 15] {
            group.bench_with_input(BenchmarkId::new(format!("gaussian_k{k}"), size), &img, |b, img| {
                b.iter(|| gaussian_blur(img, black_box(k), 0.0))
            });
        }

        group.bench_with_input(BenchmarkId::new("unsharp_gray", size), &img, |b, img| {
            b.iter(|| {
                let mut out = img.clone();
                unsharp_mask_gray(&mut out, 7, 0.6);
                out
            })
        });

        let img = rgba(size);
        group.bench_with_input(BenchmarkId::new("unsharp_rgba", size), &img, |b, img| {
            b.iter(|| {
                let mut out = img.clone();
                unsharp_mask_rgba(&mut out, 7, 0.6);
                out
            })
        });
    }

    group.finish();
}

/// Benchmark Retinex on a small color image.
fn bench_retinex(c: &mut Criterion) {
    let mut group = c.benchmark_group("retinex");
    group.sample_size(10);

    let img = rgba(256);
    let params = RetinexParams {
        kernel_size: Some(31),
        ..Default::default()
    };
    group.bench_function("msrcr_256", |b| {
        b.iter(|| {
            let mut out = img.clone();
            retinex(&mut out, black_box(&params)).unwrap();
            out
        })
    });

    group.finish();
}

criterion_group!(benches, bench_lut, bench_equalize, bench_blur, bench_retinex);

criterion_main!(benches);
