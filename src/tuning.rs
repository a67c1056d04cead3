//! Timing and lives tuning
//!
//! Rule constants (points, ground line, bonus interval) live in `consts`;
//! the knobs here can be loaded from JSON with any field omitted.

use serde::{Deserialize, Serialize};

use crate::sim::Difficulty;

/// Fall speeds in percent of the play field per frame at 60 fps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallSpeeds {
    /// ~4 seconds from spawn to ground
    pub easy: f32,
    /// ~6 seconds
    pub medium: f32,
    /// ~10 seconds, more time to think
    pub hard: f32,
}

impl Default for FallSpeeds {
    fn default() -> Self {
        Self {
            easy: 0.4,
            medium: 0.25,
            hard: 0.15,
        }
    }
}

impl FallSpeeds {
    pub fn for_difficulty(&self, difficulty: Difficulty) -> f32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

/// Game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub initial_lives: u32,
    /// Time between timed spawn attempts.
    ///
    /// A medium meteor falls for about 6.3 s, so 3 s keeps two or three in
    /// flight. At 1 s there would be six or more to read at once.
    pub spawn_interval_ms: f64,
    /// How long a destroyed meteor stays for its explosion animation
    pub grace_period_ms: f64,
    /// Longest clock step per frame (background tabs, debugger stops)
    pub max_frame_secs: f32,
    pub fall_speeds: FallSpeeds,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_lives: 3,
            spawn_interval_ms: 3000.0,
            grace_period_ms: 1000.0,
            max_frame_secs: 0.25,
            fall_speeds: FallSpeeds::default(),
        }
    }
}

impl Tuning {
    /// Parse tuning JSON; omitted fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
