// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use args::Args;
use clap::Parser;
use edge_detector::{
    bridge::{BufferBridge, ProcessingMode},
    convert::{from_rgb_image, to_rgb_image},
    detector::{EdgeDetector, Thresholds},
    image::{PixelBuffer, BGR3},
    stats::FrameStats,
};
use std::{error::Error, fs, time::Instant};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod args;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    tracing_log::LogTracer::init()?;
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let thresholds = Thresholds::new(args.low, args.high)?;
    let mode = ProcessingMode::from(args.mode);
    let mut stats = FrameStats::new();

    let output = match args.format.tag() {
        Some(tag) => process_raw(&args, tag, thresholds, mode, &mut stats)?,
        None => process_image(&args, thresholds, mode, &mut stats)?,
    };

    let summary = stats.summary();
    info!(
        "processed {} frames {}x{} fps: {:.1} processing: {:.2}ms",
        summary.frames,
        output.width(),
        output.height(),
        summary.fps,
        summary.mean_processing_ms
    );

    if let Some(path) = &args.output {
        to_rgb_image(&output.as_view())?.save(path)?;
        info!("saved {}", path.display());
    }

    if let Some(path) = &args.raw_output {
        fs::write(path, output.as_slice())?;
        info!("saved {} ({} bytes)", path.display(), output.size());
    }

    if let Some(path) = &args.stats {
        fs::write(path, serde_json::to_string_pretty(&summary)?)?;
        info!("saved {}", path.display());
    }

    Ok(())
}

fn process_raw(
    args: &Args,
    tag: i32,
    thresholds: Thresholds,
    mode: ProcessingMode,
    stats: &mut FrameStats,
) -> Result<PixelBuffer, Box<dyn Error>> {
    let (width, height) = (args.frame_size[0], args.frame_size[1]);
    let data = fs::read(&args.input)?;
    debug!(
        "loaded {} ({} bytes) as {:?} {}x{}",
        args.input.display(),
        data.len(),
        args.format,
        width,
        height
    );

    let mut bridge = BufferBridge::new();
    bridge.init_with(thresholds);

    let mut bytes = Vec::new();
    for _ in 0..args.iterations.max(1) {
        let now = Instant::now();
        bytes = bridge.process_frame_with(&data, width, height, tag, mode)?;
        stats.record(now.elapsed());
    }
    bridge.release();

    Ok(PixelBuffer::from_vec(width, height, BGR3, bytes)?)
}

fn process_image(
    args: &Args,
    thresholds: Thresholds,
    mode: ProcessingMode,
    stats: &mut FrameStats,
) -> Result<PixelBuffer, Box<dyn Error>> {
    let img = image::open(&args.input)?.into_rgb8();
    let frame = from_rgb_image(img)?;
    debug!("loaded {} as {}", args.input.display(), frame);

    let detector = EdgeDetector::with_thresholds(thresholds);
    let mut output = PixelBuffer::empty(frame.format());
    for _ in 0..args.iterations.max(1) {
        let now = Instant::now();
        output = match mode {
            ProcessingMode::Edges => detector.detect_edges(&frame)?,
            ProcessingMode::Grayscale => detector.to_grayscale(&frame)?,
        };
        stats.record(now.elapsed());
    }

    Ok(output)
}
