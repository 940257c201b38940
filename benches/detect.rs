use criterion::{criterion_group, criterion_main, Criterion};
use edge_detector::{
    bridge::{BufferBridge, FORMAT_NV21},
    detector::EdgeDetector,
    image::{self, PixelBuffer},
};
use std::hint::black_box;

fn checkerboard(width: u32, height: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let v = if (x / 16 + y / 16) % 2 == 0 { 32 } else { 224 };
            data.extend_from_slice(&[v, v, v]);
        }
    }
    PixelBuffer::from_vec(width, height, image::BGR3, data).unwrap()
}

pub fn benchmark_detect(c: &mut Criterion) {
    let detector = EdgeDetector::new();
    let mut group = c.benchmark_group("detect");
    for (w, h) in [(320, 240), (640, 480), (1280, 720), (1920, 1080)] {
        let frame = checkerboard(w, h);
        group.bench_with_input(format!("edges/{}x{}", w, h), &frame, |b, frame| {
            b.iter(|| detector.detect_edges(black_box(frame)).unwrap())
        });
        group.bench_with_input(format!("grayscale/{}x{}", w, h), &frame, |b, frame| {
            b.iter(|| detector.to_grayscale(black_box(frame)).unwrap())
        });
    }
}

pub fn benchmark_bridge(c: &mut Criterion) {
    let mut bridge = BufferBridge::new();
    bridge.init();
    let mut group = c.benchmark_group("bridge/NV21");
    for (w, h) in [(640u32, 480u32), (1280, 720)] {
        let data = vec![128u8; (w * h * 3 / 2) as usize];
        group.bench_with_input(format!("{}x{}", w, h), &data, |b, data| {
            b.iter(|| bridge.process_frame(black_box(data), w, h, FORMAT_NV21).unwrap())
        });
    }
}

criterion_group!(benches, benchmark_detect, benchmark_bridge);
criterion_main!(benches);
