//! Pointer-drag history for slice detection
//!
//! Keeps a short, bounded trail of recent pointer samples. Only the newest two
//! samples matter for hit testing; the rest exist so a renderer can draw the
//! blade trail.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GestureConfig;

/// A timestamped pointer position in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureSample {
    pub pos: Vec2,
    pub time_ms: f64,
}

/// Line between the two most recent samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSegment {
    pub from: Vec2,
    pub to: Vec2,
}

const PREALLOCATED_SAMPLES: usize = 64;

/// Bounded pointer history (oldest first)
#[derive(Debug, Clone)]
pub struct GestureTracker {
    config: GestureConfig,
    samples: VecDeque<GestureSample>,
    down: bool,
}

impl GestureTracker {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            samples: VecDeque::with_capacity(config.capacity.min(PREALLOCATED_SAMPLES)),
            config,
            down: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_down(&self) -> bool {
        self.down
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples oldest first, for trail rendering
    pub fn samples(&self) -> impl Iterator<Item = &GestureSample> {
        self.samples.iter()
    }

    /// Start a new gesture at `pos`
    pub fn pointer_down(&mut self, pos: Vec2, time_ms: f64) {
        self.samples.clear();
        self.samples.push_back(GestureSample { pos, time_ms });
        self.down = true;
    }

    /// Extend the gesture; returns the newest segment when one exists
    pub fn pointer_move(&mut self, pos: Vec2, time_ms: f64) -> Option<GestureSegment> {
        if !self.down {
            return None;
        }

        if self.config.min_sample_interval_ms > 0.0 {
            if let Some(last) = self.samples.back() {
                if time_ms - last.time_ms < self.config.min_sample_interval_ms {
                    return None;
                }
            }
        }

        self.samples.push_back(GestureSample { pos, time_ms });
        self.evict(time_ms);
        self.latest_segment()
    }

    /// End the gesture
    pub fn pointer_up(&mut self) {
        self.samples.clear();
        self.down = false;
    }

    /// Drop samples over capacity or older than the max age
    pub fn evict(&mut self, now_ms: f64) {
        while self.samples.len() > self.config.capacity {
            self.samples.pop_front();
        }
        while self
            .samples
            .front()
            .is_some_and(|s| now_ms - s.time_ms > self.config.max_age_ms)
        {
            self.samples.pop_front();
        }
    }

    pub fn latest_segment(&self) -> Option<GestureSegment> {
        let n = self.samples.len();
        if n < 2 {
            return None;
        }
        Some(GestureSegment {
            from: self.samples[n - 2].pos,
            to: self.samples[n - 1].pos,
        })
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.down = false;
    }
}
