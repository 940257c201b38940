// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::{
    convert::yuv420_to_color,
    detector::{EdgeDetector, Thresholds},
    error::{Error, Result},
    image::{FourCC, FrameView, BGR3, NV12, NV21},
};
use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
};
use tracing::{debug, error, info, warn};

/// Format tag for NV21 camera buffers (Android preview default).
pub const FORMAT_NV21: i32 = 0;

/// Format tag for NV12 camera buffers.
pub const FORMAT_NV12: i32 = 1;

/// Maps a boundary format tag onto the camera layout it names.
///
/// # Errors
///
/// Returns `ConversionFailed` for tags other than [`FORMAT_NV21`] and
/// [`FORMAT_NV12`].
pub fn format_from_tag(tag: i32) -> Result<FourCC> {
    match tag {
        FORMAT_NV21 => Ok(NV21),
        FORMAT_NV12 => Ok(NV12),
        _ => Err(Error::ConversionFailed(format!(
            "unsupported format tag {tag}"
        ))),
    }
}

/// Visualization produced for each camera frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ProcessingMode {
    /// Binary edge map
    #[default]
    Edges,
    /// Luma replicated into 3 channels
    Grayscale,
}

/// Owner of the edge detector for one camera session.
///
/// The bridge is either uninitialized or ready. `init` and `release` are
/// idempotent, and processing while uninitialized fails with
/// [`Error::NotInitialized`].
///
/// `process_frame` borrows the bridge immutably while `init` and `release`
/// need exclusive access, so a Rust caller cannot release the detector while
/// a frame is in flight. Foreign callers on several threads go through
/// [`crate::ffi`], which serializes access with a mutex.
///
/// # Example
///
/// ```
/// use edge_detector::bridge::{BufferBridge, FORMAT_NV21};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut bridge = BufferBridge::new();
/// bridge.init();
///
/// let (width, height) = (8, 6);
/// let nv21 = vec![128u8; width * height * 3 / 2];
/// let out = bridge.process_frame(&nv21, width as u32, height as u32, FORMAT_NV21)?;
/// assert_eq!(out.len(), width * height * 3);
///
/// bridge.release();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct BufferBridge {
    detector: Option<EdgeDetector>,
}

impl BufferBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the detector with default thresholds. Does nothing if the
    /// bridge is already initialized.
    pub fn init(&mut self) {
        self.init_with(Thresholds::default());
    }

    /// Creates the detector with explicit thresholds. Does nothing if the
    /// bridge is already initialized.
    pub fn init_with(&mut self, thresholds: Thresholds) {
        if self.detector.is_some() {
            debug!("edge detector already initialized");
            return;
        }
        self.detector = Some(EdgeDetector::with_thresholds(thresholds));
        info!(
            "edge detector initialized low: {} high: {}",
            thresholds.low(),
            thresholds.high()
        );
    }

    pub fn is_ready(&self) -> bool {
        self.detector.is_some()
    }

    /// Thresholds of the live detector, if any.
    pub fn thresholds(&self) -> Option<Thresholds> {
        self.detector.as_ref().map(EdgeDetector::thresholds)
    }

    /// Runs edge detection on a 4:2:0 camera buffer and returns the flat
    /// row-major 3-channel result of `width * height * 3` bytes.
    pub fn process_frame(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
        format_tag: i32,
    ) -> Result<Vec<u8>> {
        self.process_frame_with(data, width, height, format_tag, ProcessingMode::Edges)
    }

    /// Same contract as [`BufferBridge::process_frame`] with a selectable
    /// visualization.
    ///
    /// # Errors
    ///
    /// - `NotInitialized` before `init` or after `release`
    /// - `MalformedBuffer` when `data` does not hold a full frame
    /// - `ConversionFailed` for unknown format tags or an internal fault
    pub fn process_frame_with(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
        format_tag: i32,
        mode: ProcessingMode,
    ) -> Result<Vec<u8>> {
        let Some(detector) = self.detector.as_ref() else {
            warn!("edge detector not initialized, dropping frame");
            return Err(Error::NotInitialized);
        };

        let format = format_from_tag(format_tag)?;
        let view = FrameView::new(width, height, format, data)?;

        let frame = catch_fault(|| {
            let color = yuv420_to_color(&view, BGR3)?;
            match mode {
                ProcessingMode::Edges => detector.detect_edges(&color),
                ProcessingMode::Grayscale => detector.to_grayscale(&color),
            }
        })?;

        debug!(
            "frame processed {}x{} {:?}: {} bytes",
            width,
            height,
            mode,
            frame.size()
        );
        Ok(frame.into_vec())
    }

    /// Drops the detector. Does nothing if the bridge is not initialized.
    ///
    /// A later `init` starts again from default thresholds.
    pub fn release(&mut self) {
        if self.detector.take().is_some() {
            info!("edge detector released");
        }
    }
}

/// Runs `f`, turning a panic into `ConversionFailed` carrying its message.
fn catch_fault<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let msg = panic_message(payload.as_ref());
            error!("frame processing panicked: {msg}");
            Err(Error::ConversionFailed(msg))
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
