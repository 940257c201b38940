// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use serde::Serialize;
use std::time::{Duration, Instant};

/// Number of frame intervals averaged for the FPS estimate.
pub const FPS_HISTORY: usize = 30;

/// Rolling frame rate and processing time tracker.
///
/// Call [`FrameStats::record`] once per processed frame with the time spent
/// inside the pipeline.
#[derive(Debug)]
pub struct FrameStats {
    prev: Option<Instant>,
    history: Vec<f64>,
    index: usize,
    frames: u64,
    total_processing: Duration,
    last_processing: Duration,
}

/// Serializable snapshot of [`FrameStats`].
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub frames: u64,
    pub fps: f64,
    pub last_processing_ms: f64,
    pub mean_processing_ms: f64,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStats {
    pub fn new() -> Self {
        Self {
            prev: None,
            history: Vec::with_capacity(FPS_HISTORY),
            index: 0,
            frames: 0,
            total_processing: Duration::ZERO,
            last_processing: Duration::ZERO,
        }
    }

    pub fn record(&mut self, processing: Duration) {
        self.record_at(Instant::now(), processing);
    }

    /// Records a frame that completed at `now`.
    pub fn record_at(&mut self, now: Instant, processing: Duration) {
        if let Some(prev) = self.prev {
            let elapsed = now.saturating_duration_since(prev).as_secs_f64();
            if elapsed > 0.0 {
                let fps = 1.0 / elapsed;
                if self.history.len() < FPS_HISTORY {
                    self.history.push(fps);
                } else {
                    self.history[self.index] = fps;
                }
                self.index = (self.index + 1) % FPS_HISTORY;
            }
        }
        self.prev = Some(now);
        self.frames += 1;
        self.total_processing += processing;
        self.last_processing = processing;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Mean of the recent per-frame rates, zero until two frames were seen.
    pub fn fps(&self) -> f64 {
        if self.history.is_empty() {
            return 0.0;
        }
        self.history.iter().sum::<f64>() / self.history.len() as f64
    }

    pub fn last_processing(&self) -> Duration {
        self.last_processing
    }

    pub fn mean_processing(&self) -> Duration {
        match u32::try_from(self.frames) {
            Ok(0) => Duration::ZERO,
            Ok(n) => self.total_processing / n,
            Err(_) => Duration::from_secs_f64(
                self.total_processing.as_secs_f64() / self.frames as f64,
            ),
        }
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            frames: self.frames,
            fps: self.fps(),
            last_processing_ms: self.last_processing.as_secs_f64() * 1000.0,
            mean_processing_ms: self.mean_processing().as_secs_f64() * 1000.0,
        }
    }
}
