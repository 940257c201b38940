// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::error::{Error, Result};
use core::fmt;

/// Four character code identifying a pixel layout.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct FourCC(pub [u8; 4]);

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &c in &self.0 {
            let c = if c.is_ascii_graphic() || c == b' ' {
                c as char
            } else {
                '?'
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "FourCC({self})")
    }
}

/// BGR 24-bit pixel format (8 bits per channel, blue first)
pub const BGR3: FourCC = FourCC(*b"BGR3");

/// RGB 24-bit pixel format (8 bits per channel, no alpha)
pub const RGB3: FourCC = FourCC(*b"RGB3");

/// 8-bit single channel luma
pub const GREY: FourCC = FourCC(*b"GREY");

/// NV21 4:2:0 YUV semi-planar format (Android camera preview default)
pub const NV21: FourCC = FourCC(*b"NV21");

/// NV12 4:2:0 YUV semi-planar format (chroma in UV order)
pub const NV12: FourCC = FourCC(*b"NV12");

/// Returns true for the semi-planar 4:2:0 layouts.
pub const fn is_yuv420(format: FourCC) -> bool {
    matches!(format, NV21 | NV12)
}

/// Bytes per pixel for packed formats, `None` for planar or unknown ones.
pub const fn channels(format: FourCC) -> Option<usize> {
    match format {
        BGR3 | RGB3 => Some(3),
        GREY => Some(1),
        _ => None,
    }
}

/// Returns true for formats a [`PixelBuffer`] can hold.
pub const fn is_supported(format: FourCC) -> bool {
    channels(format).is_some() || is_yuv420(format)
}

/// Number of bytes a `width` x `height` frame of `format` occupies.
///
/// Semi-planar 4:2:0 frames carry a full resolution luma plane followed by a
/// half-height plane of interleaved chroma, `width * height * 3 / 2` in
/// total. Returns `None` for unsupported formats and for sizes that do not
/// fit in `usize`.
pub const fn image_size(width: u32, height: u32, format: FourCC) -> Option<usize> {
    let Some(pixels) = (width as usize).checked_mul(height as usize) else {
        return None;
    };
    if let Some(c) = channels(format) {
        return pixels.checked_mul(c);
    }
    if is_yuv420(format) {
        return pixels.checked_add(pixels / 2);
    }
    None
}

fn unsupported(format: FourCC) -> Error {
    Error::ConversionFailed(format!("unsupported pixel format {format}"))
}

fn validate(width: u32, height: u32, format: FourCC, actual: usize) -> Result<()> {
    if !is_supported(format) {
        return Err(unsupported(format));
    }
    // An overflowing size can never match a real slice length.
    let expected = image_size(width, height, format).unwrap_or(usize::MAX);
    if expected != actual {
        return Err(Error::MalformedBuffer {
            format,
            width,
            height,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Owned frame buffer in one of the supported pixel formats.
///
/// The byte length always matches [`image_size`] for the declared
/// dimensions. A frame with zero width or height holds no data and stands for
/// "no input".
///
/// # Example
///
/// ```
/// use edge_detector::image::{PixelBuffer, BGR3};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let img = PixelBuffer::new(640, 480, BGR3)?;
/// assert_eq!(img.size(), 640 * 480 * 3);
/// assert!(!img.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    format: FourCC,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocates a zero-filled frame.
    ///
    /// # Errors
    ///
    /// Returns `ConversionFailed` if `format` is not a supported layout and
    /// `MalformedBuffer` if the frame size does not fit in memory.
    pub fn new(width: u32, height: u32, format: FourCC) -> Result<Self> {
        if !is_supported(format) {
            return Err(unsupported(format));
        }
        let size = image_size(width, height, format).ok_or(Error::MalformedBuffer {
            format,
            width,
            height,
            expected: usize::MAX,
            actual: 0,
        })?;
        Ok(Self {
            width,
            height,
            format,
            data: vec![0; size],
        })
    }

    /// Wraps existing bytes, checking them against the declared dimensions.
    ///
    /// # Errors
    ///
    /// Returns `MalformedBuffer` when `data` is not exactly the size the
    /// dimensions and format require.
    pub fn from_vec(width: u32, height: u32, format: FourCC, data: Vec<u8>) -> Result<Self> {
        validate(width, height, format, data.len())?;
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// The 0x0 "no input" frame.
    pub fn empty(format: FourCC) -> Self {
        Self {
            width: 0,
            height: 0,
            format,
            data: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> FourCC {
        self.format
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    pub fn as_view(&self) -> FrameView<'_> {
        FrameView {
            width: self.width,
            height: self.height,
            format: self.format,
            data: &self.data,
        }
    }
}

impl fmt::Display for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}x{} {} len:{}",
            self.width,
            self.height,
            self.format,
            self.data.len()
        )
    }
}

/// Borrowed frame over caller-owned memory.
///
/// Used to read camera buffers in place. The view cannot outlive the slice it
/// was created from, so the borrow is released on every return path.
#[derive(Copy, Clone, Debug)]
pub struct FrameView<'a> {
    width: u32,
    height: u32,
    format: FourCC,
    data: &'a [u8],
}

impl<'a> FrameView<'a> {
    /// Borrows `data` as a frame.
    ///
    /// # Errors
    ///
    /// Returns `MalformedBuffer` on a length mismatch and `ConversionFailed`
    /// for unknown formats.
    pub fn new(width: u32, height: u32, format: FourCC, data: &'a [u8]) -> Result<Self> {
        validate(width, height, format, data.len())?;
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> FourCC {
        self.format
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Copies the view into an owned buffer.
    pub fn to_buffer(&self) -> PixelBuffer {
        PixelBuffer {
            width: self.width,
            height: self.height,
            format: self.format,
            data: self.data.to_vec(),
        }
    }
}
