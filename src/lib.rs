// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! # Edge Detector Bridge
//!
//! This library turns camera preview frames into displayable edge maps for a
//! mobile application. Frames cross the native boundary as flat byte
//! buffers; the result is a row-major 3-channel buffer that can be uploaded
//! directly as a texture.
//!
//! ## Features
//!
//! - **Camera Formats**: NV21 and NV12 4:2:0 semi-planar buffers converted in
//!   software with the BT.601 video range matrix.
//! - **Edge Detection**: luma reduction, 5x5 Gaussian smoothing and
//!   hysteresis edge detection via `imageproc`.
//! - **Grayscale Preview**: a lighter visualization without edge detection.
//! - **Native Bindings**: C ABI entry points over an opaque handle.
//!
//! ## Example
//!
//! ```
//! use edge_detector::bridge::{BufferBridge, FORMAT_NV21};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut bridge = BufferBridge::new();
//! bridge.init();
//!
//! let nv21 = vec![16u8; 640 * 480 * 3 / 2];
//! let rgb = bridge.process_frame(&nv21, 640, 480, FORMAT_NV21)?;
//! assert_eq!(rgb.len(), 640 * 480 * 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Safety
//!
//! Only the [`ffi`] module uses `unsafe`, to read caller memory and hand out
//! owned result buffers.

pub mod bridge;
pub mod convert;
pub mod detector;
pub mod error;
pub mod ffi;
pub mod image;
pub mod stats;

pub use crate::bridge::{BufferBridge, ProcessingMode};
pub use crate::detector::{EdgeDetector, Thresholds};
pub use crate::error::{Error, Result};
pub use crate::image::{FrameView, PixelBuffer};
