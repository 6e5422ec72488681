use criterion::{Criterion, criterion_group, criterion_main};

use yuv_kernels::{Converter, Image, PixelFormat, convert};
use std::hint::black_box;

const IMAGE_WIDTH: usize = 1920;
const IMAGE_HEIGHT: usize = 1080;

fn do_convert(converter: Converter, src: &Image<Vec<u8>>, dst: &mut Image<Vec<u8>>) {
    convert(converter, black_box(src), black_box(dst)).unwrap();
}

#[cfg(feature = "multi-thread")]
fn do_convert_multi_thread(converter: Converter, src: &Image<Vec<u8>>, dst: &mut Image<Vec<u8>>) {
    use yuv_kernels::convert_multi_thread;

    convert_multi_thread(converter, black_box(src), black_box(dst)).unwrap();
}

type ConvertFunction = fn(Converter, &Image<Vec<u8>>, &mut Image<Vec<u8>>);

fn run_benchmarks(c: &mut Criterion, do_convert: ConvertFunction, s: &str) {
    use PixelFormat::*;

    let mut rgba = Image::blank(RGBA, IMAGE_WIDTH, IMAGE_HEIGHT);
    let rgba_src = Image::blank(RGBA, IMAGE_WIDTH, IMAGE_HEIGHT);
    let nv21 = Image::blank(NV21, IMAGE_WIDTH, IMAGE_HEIGHT);
    let nv12 = Image::blank(NV12, IMAGE_WIDTH, IMAGE_HEIGHT);
    let i420 = Image::blank(I420, IMAGE_WIDTH, IMAGE_HEIGHT);

    c.bench_function(&format!("RGBA identity {s}"), |b| {
        b.iter(|| do_convert(Converter::Identity, &rgba_src, &mut rgba))
    });

    c.bench_function(&format!("NV21 to RGBA {s}"), |b| {
        b.iter(|| do_convert(Converter::Nv21, &nv21, &mut rgba))
    });

    c.bench_function(&format!("NV12 to RGBA {s}"), |b| {
        b.iter(|| do_convert(Converter::Nv12, &nv12, &mut rgba))
    });

    c.bench_function(&format!("NV12 to RGBA (accessor) {s}"), |b| {
        b.iter(|| do_convert(Converter::Planar, &nv12, &mut rgba))
    });

    c.bench_function(&format!("I420 to RGBA {s}"), |b| {
        b.iter(|| do_convert(Converter::Planar, &i420, &mut rgba))
    });
}

fn single_threaded(c: &mut Criterion) {
    run_benchmarks(c, do_convert, "single threaded")
}

#[cfg(feature = "multi-thread")]
fn multi_threaded(c: &mut Criterion) {
    run_benchmarks(c, do_convert_multi_thread, "multi threaded")
}

#[cfg(feature = "multi-thread")]
criterion_group!(img, single_threaded, multi_threaded);

#[cfg(not(feature = "multi-thread"))]
criterion_group!(img, single_threaded);

criterion_main!(img);
