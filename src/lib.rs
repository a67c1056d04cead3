//! Meteor Drop - the arcade practice mode of Learninator
//!
//! Core modules:
//! - `sim`: Meteor simulation (entities, clock, spawner, answer handling)
//! - `content`: Pasted question sets and the adapter into game questions
//! - `collab`: Interfaces to the storage and progress services
//! - `tuning`: Data-driven timing and lives
//! - `summary`: End-of-run statistics

pub mod collab;
pub mod content;
pub mod sim;
pub mod summary;
pub mod tuning;

pub use collab::{ContentStore, GameSource, NullProgress, ProgressSink};
pub use content::{Content, ContentError, JsonContentStore, RawItem, to_meteor_format};
pub use sim::{Difficulty, Game, GameEvent, GamePhase, Question, StartError};
pub use summary::GameSummary;
pub use tuning::Tuning;

/// Game rule constants
pub mod consts {
    /// Position (percent from top) at which meteors appear, above the visible area
    pub const SPAWN_POSITION: f32 = -10.0;
    /// Position at which a meteor hits the ground
    pub const GROUND_THRESHOLD: f32 = 85.0;
    /// Fall speeds are calibrated in percent per frame at this rate
    pub const CALIBRATION_FPS: f32 = 60.0;

    /// Horizontal lane bounds (percent from left) for newly spawned meteors
    pub const LANE_MIN: f32 = 20.0;
    pub const LANE_MAX: f32 = 80.0;

    /// Correct answers needed per bonus life
    pub const BONUS_LIFE_INTERVAL: u32 = 10;

    /// Base points by difficulty
    pub const POINTS_EASY: u64 = 10;
    pub const POINTS_MEDIUM: u64 = 20;
    pub const POINTS_HARD: u64 = 30;

    /// Upper bounds (exclusive) of the top and middle thirds of the fall
    pub const TOP_THIRD_END: f32 = 33.0;
    pub const MIDDLE_THIRD_END: f32 = 66.0;
    /// Speed bonus as a fraction of base points
    pub const TOP_BONUS: f64 = 0.5;
    pub const MIDDLE_BONUS: f64 = 0.25;

    /// Streak multipliers, indexed by min(streak, len - 1)
    pub const STREAK_MULTIPLIERS: [u32; 5] = [1, 2, 3, 5, 5];
}

/// Normalize answer text for comparison (lower-cased, trimmed)
#[inline]
pub fn normalize_answer(text: &str) -> String {
    text.trim().to_lowercase()
}
