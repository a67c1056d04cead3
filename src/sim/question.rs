//! Question types as the game sees them
//!
//! Questions arrive already adapted (see `content::to_meteor_format`), so
//! nothing here branches on missing fields.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::normalize_answer;

/// Question difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Parse an upstream label; anything unrecognized is Medium
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("easy") => Difficulty::Easy,
            Some("hard") => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }

    /// Base points for a correct answer
    pub fn base_points(&self) -> u64 {
        match self {
            Difficulty::Easy => POINTS_EASY,
            Difficulty::Medium => POINTS_MEDIUM,
            Difficulty::Hard => POINTS_HARD,
        }
    }
}

/// A question adapted for Meteor Drop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Upstream content item id (reported to the progress service)
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    /// Normalized (lower-cased, trimmed) answers that count as correct
    pub acceptable_answers: Vec<String>,
    pub difficulty: Difficulty,
}

impl Question {
    /// Check free text against the acceptable answers
    pub fn accepts(&self, text: &str) -> bool {
        let text = normalize_answer(text);
        self.acceptable_answers.iter().any(|a| *a == text)
    }

    /// Whether the option at `index` is correct (None if out of range)
    pub fn is_correct_option(&self, index: usize) -> Option<bool> {
        self.options.get(index).map(|option| self.accepts(option))
    }

    /// Index of the first correct option, for answer feedback
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|option| self.accepts(option))
    }
}

/// One draw of a question from the buffer
///
/// The same question can be in flight on several meteors at once; the
/// instance id keeps them apart.
#[derive(Debug, Clone)]
pub struct QuestionInstance {
    pub instance_id: u64,
    pub question: Rc<Question>,
}

impl QuestionInstance {
    pub fn difficulty(&self) -> Difficulty {
        self.question.difficulty
    }
}
