// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use crate::image::FourCC;
use thiserror::Error;

/// Errors surfaced by the frame pipeline and the buffer bridge.
///
/// An empty frame is not an error: the converters return it unchanged so a
/// skipped camera frame can flow through without special handling.
#[derive(Debug, Error)]
pub enum Error {
    /// `process_frame` was called before `init` or after `release`.
    #[error("edge detector is not initialized")]
    NotInitialized,

    /// Declared dimensions do not match the length of the byte buffer.
    ///
    /// `expected` is `usize::MAX` when the declared size overflows.
    #[error(
        "malformed {format} buffer: {width}x{height} requires {expected} bytes but {actual} were provided"
    )]
    MalformedBuffer {
        format: FourCC,
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// A colour conversion or detection step failed.
    #[error("frame conversion failed: {0}")]
    ConversionFailed(String),

    /// Hysteresis thresholds must be finite, non-negative and ordered.
    #[error("invalid thresholds: low {low} high {high}")]
    InvalidThresholds { low: f32, high: f32 },
}

impl Error {
    /// Status code reported across the C ABI for this error.
    pub fn code(&self) -> i32 {
        match self {
            Error::NotInitialized => 1,
            Error::MalformedBuffer { .. } => 2,
            Error::ConversionFailed(_) => 3,
            Error::InvalidThresholds { .. } => 4,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
