//! End-of-run statistics
//!
//! What the game-over screen shows.

use serde::{Deserialize, Serialize};

use crate::sim::state::SessionState;

/// Final numbers for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub score: u64,
    pub questions_answered: u32,
    pub correct_answers: u32,
    /// Rounded percentage, 0 when nothing was answered
    pub accuracy: u32,
    pub highest_streak: u32,
}

impl GameSummary {
    pub fn from_session(session: &SessionState) -> Self {
        let accuracy = if session.questions_answered > 0 {
            (session.correct_answers as f64 / session.questions_answered as f64 * 100.0).round()
                as u32
        } else {
            0
        };
        Self {
            score: session.score,
            questions_answered: session.questions_answered,
            correct_answers: session.correct_answers,
            accuracy,
            highest_streak: session.highest_streak,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_rounds() {
        let mut session = SessionState::new(3);
        session.questions_answered = 3;
        session.correct_answers = 2;
        assert_eq!(GameSummary::from_session(&session).accuracy, 67);
    }

    #[test]
    fn test_nothing_answered() {
        let session = SessionState::new(3);
        let summary = GameSummary::from_session(&session);
        assert_eq!(summary.accuracy, 0);
        assert_eq!(summary.score, 0);
    }
}
