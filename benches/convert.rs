use criterion::{criterion_group, criterion_main, Criterion};
use edge_detector::{
    convert::{to_luma, yuv420_to_color},
    image::{self, FrameView},
};
use std::hint::black_box;

const DIMS: [(u32, u32); 5] = [
    (320, 240),
    (640, 480),
    (960, 540),
    (1920, 1080),
    (3840, 2160),
];

pub fn benchmark_convert(c: &mut Criterion) {
    for src_fmt in [image::NV21, image::NV12] {
        let mut group = c.benchmark_group(format!("convert/{}", src_fmt));
        for (w, h) in DIMS {
            let size = image::image_size(w, h, src_fmt).unwrap();
            let data = vec![128u8; size];
            let view = FrameView::new(w, h, src_fmt, &data).unwrap();
            group.bench_with_input(format!("{}x{}", w, h), &view, |b, view| {
                b.iter(|| yuv420_to_color(black_box(view), image::BGR3).unwrap())
            });
        }
    }
}

pub fn benchmark_luma(c: &mut Criterion) {
    let mut group = c.benchmark_group("luma/BGR3");
    for (w, h) in DIMS {
        let data = vec![96u8; (w * h * 3) as usize];
        let view = FrameView::new(w, h, image::BGR3, &data).unwrap();
        group.bench_with_input(format!("{}x{}", w, h), &view, |b, view| {
            b.iter(|| to_luma(black_box(view)).unwrap())
        });
    }
}

criterion_group!(benches, benchmark_convert, benchmark_luma);
criterion_main!(benches);
