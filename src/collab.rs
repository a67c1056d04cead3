//! Interfaces to the rest of Learninator
//!
//! Storage and mastery tracking live outside the game; it only reads the
//! current question set at start and reports each attempt.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::content::Content;

/// Which mode produced a progress update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum GameSource {
    Meteor,
}

/// Saved question sets
pub trait ContentStore {
    /// Topic the player picked, if any
    fn current_topic(&self) -> Option<String>;
    fn content(&self, topic_id: &str) -> Option<Content>;
}

/// Mastery tracking. Fire and forget: the game never looks at the outcome.
pub trait ProgressSink {
    fn update_progress(&mut self, question_id: &str, is_correct: bool, source: GameSource);
}

impl<T: ProgressSink + ?Sized> ProgressSink for &mut T {
    fn update_progress(&mut self, question_id: &str, is_correct: bool, source: GameSource) {
        (**self).update_progress(question_id, is_correct, source);
    }
}

/// Discards every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn update_progress(&mut self, _question_id: &str, _is_correct: bool, _source: GameSource) {}
}

/// Attempt counts for one question
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempts {
    pub attempts: u32,
    pub correct: u32,
}

/// In-memory progress, keyed by question id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressTally {
    pub questions: HashMap<String, Attempts>,
}

impl ProgressTally {
    pub fn get(&self, question_id: &str) -> Option<Attempts> {
        self.questions.get(question_id).copied()
    }

    pub fn total_attempts(&self) -> u32 {
        self.questions.values().map(|a| a.attempts).sum()
    }

    pub fn total_correct(&self) -> u32 {
        self.questions.values().map(|a| a.correct).sum()
    }
}

impl ProgressSink for ProgressTally {
    fn update_progress(&mut self, question_id: &str, is_correct: bool, _source: GameSource) {
        let entry = self.questions.entry(question_id.to_string()).or_default();
        entry.attempts += 1;
        if is_correct {
            entry.correct += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_counts() {
        let mut tally = ProgressTally::default();
        tally.update_progress("q1", true, GameSource::Meteor);
        tally.update_progress("q1", false, GameSource::Meteor);
        tally.update_progress("q2", true, GameSource::Meteor);

        assert_eq!(
            tally.get("q1"),
            Some(Attempts {
                attempts: 2,
                correct: 1
            })
        );
        assert_eq!(tally.total_attempts(), 3);
        assert_eq!(tally.total_correct(), 2);
        assert_eq!(tally.get("q3"), None);
    }

    #[test]
    fn test_borrowed_sink_forwards() {
        fn report<P: ProgressSink>(mut sink: P) {
            sink.update_progress("q1", true, GameSource::Meteor);
        }

        let mut tally = ProgressTally::default();
        report(&mut tally);
        assert_eq!(tally.total_correct(), 1);
    }
}
