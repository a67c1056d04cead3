//! Simulation clock
//!
//! Converts host frame timestamps into elapsed seconds and moves meteors.
//! Fall speeds are percent per frame at 60 fps, so the per-frame step is
//! `speed * elapsed_secs * 60` whatever the real frame rate is.

use super::registry::EntityRegistry;
use crate::consts::{CALIBRATION_FPS, GROUND_THRESHOLD};
use crate::tuning::FallSpeeds;

#[derive(Debug, Clone)]
pub struct Clock {
    /// Timestamp of the last frame, None until the first one after a stop
    last_frame_ms: Option<f64>,
    /// Longest step a single frame may take
    max_frame_secs: f32,
}

impl Clock {
    pub fn new(max_frame_secs: f32) -> Self {
        Self {
            last_frame_ms: None,
            max_frame_secs,
        }
    }

    /// Forget the reference point; the next frame has zero elapsed time
    pub fn stop(&mut self) {
        self.last_frame_ms = None;
    }

    /// Seconds since the previous frame, clamped to `max_frame_secs`
    pub fn elapsed_secs(&mut self, now_ms: f64) -> f32 {
        let elapsed = match self.last_frame_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);
        elapsed.min(self.max_frame_secs)
    }

    /// Advance every live meteor for the frame at `now_ms`.
    /// Returns the ids that hit the ground during this frame.
    pub fn advance(
        &mut self,
        registry: &mut EntityRegistry,
        now_ms: f64,
        speeds: &FallSpeeds,
    ) -> Vec<u32> {
        let elapsed = self.elapsed_secs(now_ms);
        registry.advance_positions(
            |difficulty| speeds.for_difficulty(difficulty) * elapsed * CALIBRATION_FPS,
            GROUND_THRESHOLD,
        )
    }
}
