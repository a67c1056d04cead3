//! Session state and game events
//!
//! Counters shown on the HUD and game-over screen. Nothing here survives a
//! reload.

use serde::{Deserialize, Serialize};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Meteors falling, answers accepted
    Playing,
    /// Clock and spawner suspended, positions frozen
    Paused,
    /// Out of lives; frozen until play-again
    GameOver,
}

/// HUD counters for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub lives: u32,
    pub score: u64,
    /// Consecutive correct answers
    pub streak: u32,
    pub highest_streak: u32,
    pub questions_answered: u32,
    pub correct_answers: u32,
    pub phase: GamePhase,
}

impl SessionState {
    pub fn new(initial_lives: u32) -> Self {
        Self {
            lives: initial_lives,
            score: 0,
            streak: 0,
            highest_streak: 0,
            questions_answered: 0,
            correct_answers: 0,
            phase: GamePhase::Playing,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take one life. Returns true if that ended the game.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            return true;
        }
        false
    }

    /// Count a correct answer and extend the streak
    pub fn record_correct(&mut self, points: u64) {
        self.score += points;
        self.streak += 1;
        self.highest_streak = self.highest_streak.max(self.streak);
        self.correct_answers += 1;
    }
}

/// Something the presentation layer may want to animate or play a sound for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { entity_id: u32 },
    Correct { entity_id: u32, points: u64 },
    /// Wrong answer; the meteor keeps falling with a new question
    Wrong { entity_id: u32, life_lost: bool },
    GroundImpact { entity_id: u32, life_lost: bool },
    BonusLife,
    Paused,
    Resumed,
    GameOver,
}
