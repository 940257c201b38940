// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::{
    convert::{luma_to_color, to_luma},
    error::{Error, Result},
    image::{FourCC, PixelBuffer, BGR3, RGB3},
};
use imageproc::{edges::canny, filter::separable_filter_equal};
use tracing::{debug, trace};

/// Default lower hysteresis threshold on gradient magnitude.
pub const DEFAULT_LOW_THRESHOLD: f32 = 50.0;

/// Default upper hysteresis threshold on gradient magnitude.
pub const DEFAULT_HIGH_THRESHOLD: f32 = 150.0;

/// Side length of the smoothing kernel applied before edge detection.
pub const BLUR_KERNEL_SIZE: usize = 5;

/// Spatial standard deviation of the smoothing kernel.
pub const BLUR_SIGMA: f32 = 1.5;

/// Low/high gradient thresholds for hysteresis edge linking.
///
/// Pixels above `high` are edges; pixels above `low` are edges only when
/// connected to one above `high`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Thresholds {
    low: f32,
    high: f32,
}

impl Thresholds {
    /// # Errors
    ///
    /// Returns `InvalidThresholds` unless both values are finite,
    /// non-negative and `low <= high`.
    pub fn new(low: f32, high: f32) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() || low < 0.0 || low > high {
            return Err(Error::InvalidThresholds { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> f32 {
        self.low
    }

    pub fn high(&self) -> f32 {
        self.high
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW_THRESHOLD,
            high: DEFAULT_HIGH_THRESHOLD,
        }
    }
}

/// Frame converter producing edge or grayscale visualizations.
///
/// The detector holds no per-frame state; its thresholds are fixed when it is
/// built. Both operations accept `BGR3`, `RGB3`, `GREY` and the 4:2:0 camera
/// formats and always return a 3-channel frame of the same dimensions, so the
/// result can be bound directly as a texture.
///
/// # Example
///
/// ```
/// use edge_detector::detector::EdgeDetector;
/// use edge_detector::image::{PixelBuffer, BGR3};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let detector = EdgeDetector::new();
/// let frame = PixelBuffer::new(64, 48, BGR3)?;
/// let edges = detector.detect_edges(&frame)?;
/// assert!(edges.as_slice().iter().all(|&v| v == 0));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct EdgeDetector {
    thresholds: Thresholds,
    kernel: Vec<f32>,
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeDetector {
    /// Creates a detector with the default 50/150 thresholds.
    pub fn new() -> Self {
        Self::with_thresholds(Thresholds::default())
    }

    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            kernel: gaussian_kernel(BLUR_KERNEL_SIZE, BLUR_SIGMA),
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Runs luma reduction, 5x5 Gaussian smoothing and hysteresis edge
    /// detection, then replicates the binary edge map into 3 channels.
    ///
    /// Every output sample is either 0 or 255. An empty frame is returned
    /// unchanged.
    ///
    /// `imageproc::edges::canny` applies its own Gaussian (σ = 1.4) before
    /// computing gradients, so the image is smoothed twice and gradient
    /// magnitudes run lower than after a single blur. Keep that in mind when
    /// tuning thresholds. The one-pixel border of the edge map is always 0.
    ///
    /// # Errors
    ///
    /// Returns `ConversionFailed` for pixel formats the detector cannot read.
    pub fn detect_edges(&self, frame: &PixelBuffer) -> Result<PixelBuffer> {
        if frame.is_empty() {
            debug!("empty frame passed through edge detection");
            return Ok(frame.clone());
        }

        let gray = to_luma(&frame.as_view())?;
        let smoothed = separable_filter_equal(&gray, self.kernel.as_slice());
        let edges = canny(&smoothed, self.thresholds.low, self.thresholds.high);
        let output = luma_to_color(&edges, output_format(frame.format()))?;

        trace!("edge detection processed: {}", output);
        Ok(output)
    }

    /// Reduces the frame to luma and replicates it into 3 channels without
    /// smoothing or edge detection.
    ///
    /// An empty frame is returned unchanged.
    pub fn to_grayscale(&self, frame: &PixelBuffer) -> Result<PixelBuffer> {
        if frame.is_empty() {
            debug!("empty frame passed through grayscale conversion");
            return Ok(frame.clone());
        }

        let gray = to_luma(&frame.as_view())?;
        luma_to_color(&gray, output_format(frame.format()))
    }
}

/// Colour frames keep their channel order, everything else renders as BGR.
fn output_format(input: FourCC) -> FourCC {
    match input {
        RGB3 => RGB3,
        _ => BGR3,
    }
}

/// Normalised 1D Gaussian taps of odd length `size`.
fn gaussian_kernel(size: usize, sigma: f32) -> Vec<f32> {
    let center = (size / 2) as f32;
    let denom = 2.0 * sigma * sigma;
    let taps: Vec<f32> = (0..size)
        .map(|i| {
            let x = i as f32 - center;
            (-(x * x) / denom).exp()
        })
        .collect();
    let sum: f32 = taps.iter().sum();
    taps.into_iter().map(|t| t / sum).collect()
}
