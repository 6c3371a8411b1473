//! Question bank for the daily mood check.
//!
//! The bank is static configuration: built once at startup (either the
//! compiled-in default or a JSON file pointed to by `QUIZ_BANK_PATH`),
//! validated, then shared read-only behind an `Arc`.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Highest value any option may carry.
pub const MAX_OPTION_VALUE: u8 = 4;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizOption {
    pub label: String,
    pub emoji: String,
    pub value: u8,
}

impl QuizOption {
    fn new(label: &str, emoji: &str, value: u8) -> Self {
        Self {
            label: label.into(),
            emoji: emoji.into(),
            value,
        }
    }

    /// Text stored with an answer, e.g. "🚀 Rocket fuel".
    pub fn rendered(&self) -> String {
        format!("{} {}", self.emoji, self.label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    #[default]
    Scored,
    /// Free-choice "what do you need" question, never scored.
    Need,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    pub id: u32,
    pub text: String,
    #[serde(default)]
    pub kind: QuestionKind,
    pub options: Vec<QuizOption>,
}

impl Question {
    pub fn is_scored(&self) -> bool {
        self.kind == QuestionKind::Scored
    }

    pub fn max_value(&self) -> u8 {
        self.options.iter().map(|o| o.value).max().unwrap_or(0)
    }
}

/// Which question id feeds each column of a mood record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldMapping {
    pub mood: u32,
    pub energy: u32,
    pub sleep: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionBank {
    pub version: String,
    pub questions: Vec<Question>,
    pub fields: FieldMapping,
}

#[derive(Debug, thiserror::Error)]
pub enum BankError {
    #[error("question bank has no questions")]
    Empty,

    #[error("question {0} has no options")]
    NoOptions(u32),

    #[error("question id {0} appears more than once")]
    DuplicateId(u32),

    #[error("question {question_id} has option value {value}, max is {}", MAX_OPTION_VALUE)]
    ValueOutOfRange { question_id: u32, value: u8 },

    #[error("{field} is mapped to question {question_id}, which is not a scored question")]
    BadFieldMapping { field: &'static str, question_id: u32 },

    #[error("failed to read question bank: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse question bank: {0}")]
    Parse(#[from] serde_json::Error),
}

impl QuestionBank {
    /// Load the bank from `path` if given, otherwise use the built-in one.
    pub fn load(path: Option<&str>) -> Result<Self, BankError> {
        let bank = match path {
            Some(p) => Self::from_json_file(p)?,
            None => Self::default_bank(),
        };
        bank.validate()?;
        Ok(bank)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, BankError> {
        let raw = std::fs::read_to_string(path)?;
        let bank: Self = serde_json::from_str(&raw)?;
        Ok(bank)
    }

    pub fn validate(&self) -> Result<(), BankError> {
        if self.is_empty() {
            return Err(BankError::Empty);
        }

        let mut seen = HashSet::new();
        for q in &self.questions {
            if !seen.insert(q.id) {
                return Err(BankError::DuplicateId(q.id));
            }
            if q.options.is_empty() {
                return Err(BankError::NoOptions(q.id));
            }
            if let Some(bad) = q.options.iter().find(|o| o.value > MAX_OPTION_VALUE) {
                return Err(BankError::ValueOutOfRange {
                    question_id: q.id,
                    value: bad.value,
                });
            }
        }

        for (field, question_id) in [
            ("mood", self.fields.mood),
            ("energy", self.fields.energy),
            ("sleep", self.fields.sleep),
        ] {
            let scored = self
                .question_by_id(question_id)
                .map(Question::is_scored)
                .unwrap_or(false);
            if !scored {
                return Err(BankError::BadFieldMapping { field, question_id });
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question_by_id(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Highest reachable score with this bank.
    pub fn max_score(&self) -> u32 {
        self.questions
            .iter()
            .filter(|q| q.is_scored())
            .map(|q| u32::from(q.max_value()))
            .sum()
    }

    pub fn default_bank() -> Self {
        let scored = |id: u32, text: &str, options: [(&str, &str, u8); 4]| Question {
            id,
            text: text.into(),
            kind: QuestionKind::Scored,
            options: options
                .iter()
                .map(|(label, emoji, value)| QuizOption::new(label, emoji, *value))
                .collect(),
        };

        let mut questions = vec![
            scored(
                1,
                "How's your mental weather today?",
                [
                    ("Clear skies (calm, content)", "🌤️", 4),
                    ("Partly cloudy (a little off but okay)", "☁️", 3),
                    ("Thunderstorm (anxious or down)", "⛈️", 1),
                    ("Total fog (numb/confused)", "🌫️", 0),
                ],
            ),
            scored(
                2,
                "Which vibe ruled your day?",
                [
                    ("Peace mode", "🧘‍♀️", 4),
                    ("Zen-ish", "😌", 3),
                    ("Bit of everything", "🎭", 2),
                    ("Chaos mode", "🌪️", 1),
                ],
            ),
            scored(
                3,
                "Energy level check:",
                [
                    ("Rocket fuel", "🚀", 4),
                    ("Somewhere in the middle", "⚡", 3),
                    ("Meh", "🐢", 2),
                    ("Drained AF", "🔋", 1),
                ],
            ),
            scored(
                4,
                "Sleep recently?",
                [
                    ("Slept like a log", "😴", 4),
                    ("Got enough", "😊", 3),
                    ("Kept tossing", "😕", 2),
                    ("What is sleep?", "👁️", 1),
                ],
            ),
            scored(
                5,
                "Social battery status:",
                [
                    ("Fully charged", "🔋", 4),
                    ("Slightly dying", "🪫", 3),
                    ("No interactions today", "🤐", 2),
                    ("Please leave me alone", "🙅‍♀️", 1),
                ],
            ),
            scored(
                6,
                "Did anything today lift you up?",
                [
                    ("Yes, big moment!", "🎉", 4),
                    ("Yes, something small", "🌱", 3),
                    ("Not really", "😐", 2),
                    ("Quite the opposite", "👎", 1),
                ],
            ),
            scored(
                7,
                "How are you treating yourself lately?",
                [
                    ("Like royalty", "👑", 4),
                    ("Doing my best", "💪", 3),
                    ("Could be better", "🤷‍♀️", 2),
                    ("Not great", "😔", 1),
                ],
            ),
        ];

        questions.push(Question {
            id: 8,
            text: "Be real: what do you need most right now?".into(),
            kind: QuestionKind::Need,
            options: vec![
                QuizOption::new("Rest or sleep", "🛌", 0),
                QuizOption::new("A good laugh", "😂", 0),
                QuizOption::new("Motivation", "🔥", 0),
                QuizOption::new("Someone to talk to", "🗣️", 0),
            ],
        });

        Self {
            version: "2025-04-default".into(),
            questions,
            fields: FieldMapping {
                mood: 1,
                energy: 3,
                sleep: 4,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bank_is_valid() {
        let bank = QuestionBank::load(None).expect("default bank validates");
        assert_eq!(bank.len(), 8);
        assert_eq!(bank.max_score(), 28);
        assert_eq!(bank.questions.get(7).map(|q| q.kind), Some(QuestionKind::Need));
    }

    #[test]
    fn need_question_carries_no_score() {
        let bank = QuestionBank::default_bank();
        let need = bank.question_by_id(8).unwrap();
        assert!(!need.is_scored());
        assert!(need.options.iter().all(|o| o.value == 0));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut bank = QuestionBank::default_bank();
        bank.questions[2].options[0].value = 5;
        assert!(matches!(
            bank.validate(),
            Err(BankError::ValueOutOfRange { question_id: 3, value: 5 })
        ));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut bank = QuestionBank::default_bank();
        bank.questions[1].id = 1;
        assert!(matches!(bank.validate(), Err(BankError::DuplicateId(1))));
    }

    #[test]
    fn rejects_field_mapped_to_need_question() {
        let mut bank = QuestionBank::default_bank();
        bank.fields.sleep = 8;
        assert!(matches!(
            bank.validate(),
            Err(BankError::BadFieldMapping { field: "sleep", question_id: 8 })
        ));
    }

    #[test]
    fn rejects_empty_bank() {
        let mut bank = QuestionBank::default_bank();
        bank.questions.clear();
        assert!(matches!(bank.validate(), Err(BankError::Empty)));
    }

    #[test]
    fn parses_json_bank_with_default_kind() {
        let raw = r#"{
            "version": "custom-1",
            "questions": [
                {"id": 10, "text": "Mood?", "options": [{"label": "Good", "emoji": "🙂", "value": 3}]},
                {"id": 11, "text": "Need?", "kind": "need", "options": [{"label": "Tea", "emoji": "🍵", "value": 0}]}
            ],
            "fields": {"mood": 10, "energy": 10, "sleep": 10}
        }"#;
        let bank: QuestionBank = serde_json::from_str(raw).unwrap();
        bank.validate().unwrap();
        assert_eq!(bank.questions[0].kind, QuestionKind::Scored);
        assert_eq!(bank.max_score(), 3);
    }

    #[test]
    fn rendered_option_puts_emoji_first() {
        let opt = QuizOption::new("Rocket fuel", "🚀", 4);
        assert_eq!(opt.rendered(), "🚀 Rocket fuel");
    }
}
