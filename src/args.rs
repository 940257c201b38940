// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use clap::Parser;
use edge_detector::{
    bridge::{ProcessingMode, FORMAT_NV12, FORMAT_NV21},
    detector::{DEFAULT_HIGH_THRESHOLD, DEFAULT_LOW_THRESHOLD},
};
use std::path::PathBuf;

/// Layout of the input file.
#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Copy)]
pub enum InputFormat {
    /// Raw NV21 camera dump (Y plane followed by interleaved VU)
    Nv21,
    /// Raw NV12 camera dump (Y plane followed by interleaved UV)
    Nv12,
    /// Any image file readable by the image crate (PNG, JPEG)
    Image,
}

impl InputFormat {
    /// Boundary format tag for raw camera dumps.
    pub fn tag(self) -> Option<i32> {
        match self {
            InputFormat::Nv21 => Some(FORMAT_NV21),
            InputFormat::Nv12 => Some(FORMAT_NV12),
            InputFormat::Image => None,
        }
    }
}

/// Visualization to produce.
#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Copy)]
pub enum ModeSetting {
    /// Binary edge map
    Edges,
    /// Grayscale preview
    Grayscale,
}

impl From<ModeSetting> for ProcessingMode {
    fn from(mode: ModeSetting) -> Self {
        match mode {
            ModeSetting::Edges => ProcessingMode::Edges,
            ModeSetting::Grayscale => ProcessingMode::Grayscale,
        }
    }
}

/// Command-line arguments for the edge detector.
///
/// Runs the camera frame pipeline offline on a captured frame or an image
/// file. Arguments can be specified via command line or environment
/// variables.
///
/// # Example
///
/// ```bash
/// # Raw camera dump
/// edge-detector --input frame.nv21 --format nv21 --frame-size 640 480 --output edges.png
///
/// # Via environment variables
/// export INPUT=photo.jpg
/// export FORMAT=image
/// edge-detector --output edges.png
/// ```
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Input file, a raw camera dump or an image
    #[arg(short, long, env = "INPUT")]
    pub input: PathBuf,

    /// Input file layout
    #[arg(short, long, env = "FORMAT", default_value = "nv21", value_enum)]
    pub format: InputFormat,

    /// Frame resolution in pixels for raw dumps (width height)
    #[arg(
        long,
        env = "FRAME_SIZE",
        default_value = "640 480",
        value_delimiter = ' ',
        num_args = 2
    )]
    pub frame_size: Vec<u32>,

    /// Visualization mode
    #[arg(short, long, env = "MODE", default_value = "edges", value_enum)]
    pub mode: ModeSetting,

    /// Lower hysteresis threshold
    #[arg(long, env = "LOW_THRESHOLD", default_value_t = DEFAULT_LOW_THRESHOLD)]
    pub low: f32,

    /// Upper hysteresis threshold
    #[arg(long, env = "HIGH_THRESHOLD", default_value_t = DEFAULT_HIGH_THRESHOLD)]
    pub high: f32,

    /// Write the processed frame as PNG
    #[arg(short, long, env = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Write the processed frame as flat row-major bytes
    #[arg(long, env = "RAW_OUTPUT")]
    pub raw_output: Option<PathBuf>,

    /// Number of times to process the frame, for throughput measurement
    #[arg(long, env = "ITERATIONS", default_value = "1")]
    pub iterations: u32,

    /// Write frame statistics as JSON
    #[arg(long, env = "STATS")]
    pub stats: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
