//! Pasted question sets
//!
//! Users paste JSON written by an LLM, so the shape is loose: either a bare
//! array of items or `{ "topic": ..., "items": [...] }`, ids as strings or
//! numbers, the answer given as text or as an index into `options`. All of
//! that is settled here so the game only ever sees a `Question`.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::collab::ContentStore;
use crate::normalize_answer;
use crate::sim::{Difficulty, Question};

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid question set JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One question as pasted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_index: Option<usize>,
    /// Older sets put the correct option index here
    #[serde(default)]
    pub correct_answer: Option<usize>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl RawItem {
    /// Canonical answer text: `answer`, else the option at the correct index
    pub fn answer_text(&self) -> String {
        if let Some(answer) = self.answer.as_deref().filter(|a| !a.is_empty()) {
            return answer.to_string();
        }
        let idx = self.correct_index.or(self.correct_answer).unwrap_or(0);
        self.options.get(idx).cloned().unwrap_or_default()
    }
}

/// A saved question set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub items: Vec<RawItem>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ContentDoc {
    Items(Vec<RawItem>),
    Full(Content),
}

impl Content {
    /// Parse a pasted set and give every item an id
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let mut content = match serde_json::from_str::<ContentDoc>(json)? {
            ContentDoc::Items(items) => Content { topic: None, items },
            ContentDoc::Full(content) => content,
        };
        for (idx, item) in content.items.iter_mut().enumerate() {
            if item.id.as_deref().is_none_or(str::is_empty) {
                item.id = Some(format!("q_{idx}"));
            }
        }
        Ok(content)
    }

    pub fn topic_name(&self) -> &str {
        self.topic.as_deref().unwrap_or("Imported Questions")
    }

    /// Human-readable problems with the set; empty when it is usable
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.items.is_empty() {
            problems.push("Content must have at least one question".to_string());
            return problems;
        }
        for (idx, item) in self.items.iter().enumerate() {
            let n = idx + 1;
            if item.question.trim().is_empty() {
                problems.push(format!("Item {n}: Missing question text"));
            }
            if item.answer.is_none() && item.options.is_empty() {
                problems.push(format!("Item {n}: Missing answer or options"));
            }
            if !item.options.is_empty() {
                let idx = item.correct_index.or(item.correct_answer);
                if !idx.is_some_and(|i| i < item.options.len()) {
                    problems.push(format!("Item {n}: Invalid correctIndex"));
                }
            }
        }
        problems
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Id>::deserialize(deserializer)?.map(|id| match id {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    }))
}

/// Adapt a pasted item into a game question
pub fn to_meteor_format(item: &RawItem) -> Question {
    Question {
        id: item.id.clone().unwrap_or_default(),
        question: item.question.clone(),
        options: item.options.clone(),
        acceptable_answers: acceptable_answers(&item.answer_text()),
        difficulty: Difficulty::from_label(item.difficulty.as_deref()),
    }
}

const ABBREVIATIONS: &[(&str, &[&str])] = &[
    ("dictionary", &["dict"]),
    ("function", &["func", "fn"]),
    ("variable", &["var"]),
    ("object", &["obj"]),
    ("string", &["str"]),
    ("integer", &["int"]),
    ("boolean", &["bool"]),
    ("array", &["arr", "list"]),
];

/// Normalized answer plus the variants a player might reasonably pick
pub fn acceptable_answers(answer: &str) -> Vec<String> {
    let answer = normalize_answer(answer);
    if answer.is_empty() {
        return Vec::new();
    }
    let mut variants = vec![answer.clone()];

    variants.push(
        answer
            .chars()
            .filter(|c| !matches!(c, '.' | ',' | '!' | '?' | ';' | ':'))
            .collect::<String>()
            .trim()
            .to_string(),
    );
    variants.push(strip_articles(&answer));

    if answer.ends_with('s') && answer.chars().count() > 2 {
        variants.push(answer[..answer.len() - 1].to_string());
    } else if !answer.ends_with('s') {
        variants.push(format!("{answer}s"));
    }

    for (full, abbrevs) in ABBREVIATIONS {
        if answer.contains(full) {
            for abbrev in *abbrevs {
                variants.push(answer.replacen(full, abbrev, 1));
            }
        }
    }

    let mut unique: Vec<String> = Vec::with_capacity(variants.len());
    for v in variants {
        if !v.is_empty() && !unique.contains(&v) {
            unique.push(v);
        }
    }
    unique
}

/// Drop whole-word "a", "an", "the"; the gaps they leave are kept
fn strip_articles(text: &str) -> String {
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
    let mut out = String::with_capacity(text.len());
    let mut word = String::new();
    for c in text.chars() {
        if is_word(c) {
            word.push(c);
            continue;
        }
        if !matches!(word.as_str(), "a" | "an" | "the") {
            out.push_str(&word);
        }
        word.clear();
        out.push(c);
    }
    if !matches!(word.as_str(), "a" | "an" | "the") {
        out.push_str(&word);
    }
    out.trim().to_string()
}

/// Turn a topic name into a storage id
pub fn topic_slug(topic: &str) -> String {
    let mut slug = String::new();
    let mut gap = false;
    for c in topic.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if gap {
                slug.push('_');
                gap = false;
            }
            slug.push(c);
        } else {
            gap = true;
        }
    }
    if gap {
        slug.push('_');
    }
    slug.chars().take(30).collect()
}

/// Content store over a single loaded question set
#[derive(Debug, Clone)]
pub struct JsonContentStore {
    topic_id: String,
    content: Content,
}

impl JsonContentStore {
    pub fn new(content: Content) -> Self {
        Self {
            topic_id: topic_slug(content.topic_name()),
            content,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        Ok(Self::new(Content::from_json(json)?))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn topic_id(&self) -> &str {
        &self.topic_id
    }

    pub fn loaded(&self) -> &Content {
        &self.content
    }
}

impl ContentStore for JsonContentStore {
    fn current_topic(&self) -> Option<String> {
        Some(self.topic_id.clone())
    }

    fn content(&self, topic_id: &str) -> Option<Content> {
        (topic_id == self.topic_id).then(|| self.content.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_array_and_numeric_ids() {
        let content = Content::from_json(
            r#"[
                {"id": 7, "question": "2+2?", "options": ["3", "4"], "correctIndex": 1},
                {"question": "Sky?", "answer": "Blue"}
            ]"#,
        )
        .unwrap();
        assert_eq!(content.items.len(), 2);
        assert_eq!(content.items[0].id.as_deref(), Some("7"));
        assert_eq!(content.items[1].id.as_deref(), Some("q_1"));
        assert_eq!(content.topic_name(), "Imported Questions");
    }

    #[test]
    fn test_full_document() {
        let content = Content::from_json(
            r#"{"topic": "Rust Basics", "items": [
                {"id": "r1", "question": "Owner count?", "options": ["one", "two"], "correctIndex": 0, "difficulty": "hard"}
            ]}"#,
        )
        .unwrap();
        let q = to_meteor_format(&content.items[0]);
        assert_eq!(q.id, "r1");
        assert_eq!(q.difficulty, Difficulty::Hard);
        assert!(q.acceptable_answers.contains(&"one".to_string()));
        assert_eq!(q.correct_index(), Some(0));
    }

    #[test]
    fn test_legacy_correct_answer_index() {
        let item = RawItem {
            options: vec!["red".into(), "green".into()],
            correct_answer: Some(1),
            ..Default::default()
        };
        assert_eq!(item.answer_text(), "green");
    }

    #[test]
    fn test_acceptable_answer_variants() {
        let answers = acceptable_answers("  The Hash Map. ");
        assert_eq!(answers[0], "the hash map.");
        assert!(answers.contains(&"the hash map".to_string()));
        assert!(answers.contains(&"hash map.".to_string()));
        assert!(answers.contains(&"the hash map.s".to_string()));

        let answers = acceptable_answers("Strings");
        assert!(answers.contains(&"strings".to_string()));
        assert!(answers.contains(&"string".to_string()));
        assert!(answers.contains(&"strs".to_string()));

        let answers = acceptable_answers("function");
        assert!(answers.contains(&"func".to_string()));
        assert!(answers.contains(&"fn".to_string()));
        assert!(answers.contains(&"functions".to_string()));
    }

    #[test]
    fn test_articles_only_as_whole_words() {
        assert_eq!(strip_articles("a theme"), "theme");
        assert_eq!(strip_articles("banana"), "banana");
        assert_eq!(strip_articles("the"), "");
    }

    #[test]
    fn test_empty_answer_has_no_variants() {
        assert!(acceptable_answers("   ").is_empty());
    }

    #[test]
    fn test_problems() {
        let content = Content::from_json(
            r#"[{"question": "", "options": ["a"], "correctIndex": 3}, {"question": "ok", "answer": "x"}]"#,
        )
        .unwrap();
        let problems = content.problems();
        assert_eq!(
            problems,
            vec![
                "Item 1: Missing question text".to_string(),
                "Item 1: Invalid correctIndex".to_string(),
            ]
        );
        assert!(!Content::default().problems().is_empty());
    }

    #[test]
    fn test_store_serves_current_topic() {
        let store =
            JsonContentStore::from_json(r#"{"topic": "World Capitals!", "items": []}"#).unwrap();
        assert_eq!(store.topic_id(), "world_capitals_");
        let topic = store.current_topic().unwrap();
        assert!(store.content(&topic).is_some());
        assert!(store.content("other").is_none());
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(
            Content::from_json("{not json"),
            Err(ContentError::Json(_))
        ));
    }
}
