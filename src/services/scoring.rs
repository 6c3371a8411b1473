//! Quiz scoring, result bands and the mapping of a finished quiz onto a
//! daily mood record.

use serde::Serialize;

use crate::models::mood_record::{MoodEntry, NOTES_MAX_CHARS, SCORE_MAX, SCORE_MIN};
use crate::services::quiz_bank::QuestionBank;
use crate::services::quiz_engine::Answer;

/// Record value used when the mapped answer is missing or worth less than
/// the record minimum (Q1 "Total fog" is worth 0).
const FALLBACK_FIELD_VALUE: i16 = 3;

const PROMPT_JOY: &str =
    "What's something that brought you joy today? How can you bring more of that into tomorrow?";
const PROMPT_BALANCE: &str =
    "What's one small thing you can do today to maintain this balanced feeling?";
const PROMPT_HEAVY_LIGHT: &str =
    "What's one thing that felt heavy today, and one thing that felt light?";
const PROMPT_COMFORT: &str = "What's one tiny form of comfort you can give yourself right now?";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct MoodBand {
    #[serde(skip)]
    pub threshold: u32,
    pub title: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    pub journal_prompt: &'static str,
}

/// Highest band first. The last threshold is 0 so every score lands somewhere.
pub const MOOD_BANDS: [MoodBand; 6] = [
    MoodBand {
        threshold: 24,
        title: "Radiant Explorer",
        emoji: "✨",
        description: "You're in a great mental space today! Your energy and outlook are strong. A perfect time to tackle challenges or enjoy activities that bring you joy.",
        journal_prompt: PROMPT_JOY,
    },
    MoodBand {
        threshold: 20,
        title: "Steady Sailor",
        emoji: "⛵",
        description: "You're feeling balanced and generally positive. You have good reserves of energy and resilience right now.",
        journal_prompt: PROMPT_JOY,
    },
    MoodBand {
        threshold: 16,
        title: "Gentle Drifter",
        emoji: "🍃",
        description: "You're doing okay - not fantastic, but not bad either. A good day for self-care and manageable tasks.",
        journal_prompt: PROMPT_BALANCE,
    },
    MoodBand {
        threshold: 12,
        title: "Tender Heart",
        emoji: "💗",
        description: "You might be feeling a bit vulnerable today. Be gentle with yourself and consider what small comforts might help.",
        journal_prompt: PROMPT_HEAVY_LIGHT,
    },
    MoodBand {
        threshold: 8,
        title: "Soft Sad Potato",
        emoji: "🥔",
        description: "You're having a rough time right now, and that's okay. Focus on basic needs and don't pressure yourself today.",
        journal_prompt: PROMPT_COMFORT,
    },
    MoodBand {
        threshold: 0,
        title: "Survival Mode Activated",
        emoji: "🛡️",
        description: "Things feel pretty tough right now. Remember that these intense feelings won't last forever. Consider reaching out for support.",
        journal_prompt: PROMPT_COMFORT,
    },
];

/// Sum of answer values at scored positions. Answers are matched to the bank
/// by position, not by question id.
pub fn compute_score(bank: &QuestionBank, answers: &[Answer]) -> u32 {
    bank.questions
        .iter()
        .zip(answers)
        .filter(|(q, _)| q.is_scored())
        .map(|(_, a)| u32::from(a.value))
        .sum()
}

pub fn categorize(score: u32) -> &'static MoodBand {
    MOOD_BANDS
        .iter()
        .find(|band| score >= band.threshold)
        .unwrap_or(&MOOD_BANDS[MOOD_BANDS.len() - 1])
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizOutcome {
    pub score: u32,
    pub max_score: u32,
    #[serde(flatten)]
    pub band: MoodBand,
    /// Rendered text of the unscored "need" answer, if the bank has one.
    pub need: Option<String>,
}

impl QuizOutcome {
    pub fn evaluate(bank: &QuestionBank, answers: &[Answer]) -> Self {
        let score = compute_score(bank, answers);
        let need = bank
            .questions
            .iter()
            .zip(answers)
            .find(|(q, _)| !q.is_scored())
            .map(|(_, a)| a.rendered_text.clone());

        Self {
            score,
            max_score: bank.max_score(),
            band: *categorize(score),
            need,
        }
    }
}

/// Fold a finished answer sequence into the columns of a mood record.
pub fn derive_mood_entry(bank: &QuestionBank, answers: &[Answer]) -> MoodEntry {
    let field = |question_id: u32| {
        answers
            .iter()
            .find(|a| a.question_id == question_id)
            .map(|a| i16::from(a.value))
            .filter(|v| (SCORE_MIN..=SCORE_MAX).contains(v))
            .unwrap_or(FALLBACK_FIELD_VALUE)
    };

    let notes = answers
        .iter()
        .map(|a| format!("Q{}: {}", a.question_id, a.rendered_text))
        .collect::<Vec<_>>()
        .join(" | ");

    MoodEntry {
        mood: field(bank.fields.mood),
        energy: field(bank.fields.energy),
        sleep: field(bank.fields.sleep),
        notes: truncate_chars(&notes, NOTES_MAX_CHARS),
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::services::quiz_engine::QuizSession;

    fn complete(selections: &[usize]) -> (Arc<QuestionBank>, Vec<Answer>) {
        let bank = Arc::new(QuestionBank::default_bank());
        let mut session = QuizSession::new(bank.clone());
        for &idx in selections {
            session.answer_current(idx).unwrap();
        }
        let answers = session.completed_answers().unwrap();
        (bank, answers)
    }

    #[test]
    fn best_and_worst_answers_hit_the_score_bounds() {
        let (bank, best) = complete(&[0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(compute_score(&bank, &best), 28);

        // Q1's lowest option is worth 0, the others bottom out at 1.
        let (bank, worst) = complete(&[3, 3, 3, 3, 3, 3, 3, 3]);
        assert_eq!(compute_score(&bank, &worst), 6);
    }

    #[test]
    fn need_answer_is_excluded_from_score() {
        let (bank, a) = complete(&[0, 0, 0, 0, 0, 0, 0, 0]);
        let (_, b) = complete(&[0, 0, 0, 0, 0, 0, 0, 3]);
        assert_eq!(compute_score(&bank, &a), compute_score(&bank, &b));
    }

    #[test]
    fn every_full_answer_set_stays_within_bounds() {
        let bank = Arc::new(QuestionBank::default_bank());
        let max = bank.max_score();
        let n = bank.len() as u32;

        for seed in 0..4usize.pow(n) {
            let mut session = QuizSession::new(bank.clone());
            for i in 0..n {
                session.answer_current((seed >> (i * 2)) % 4).unwrap();
            }
            let answers = session.completed_answers().unwrap();

            let score = compute_score(&bank, &answers);
            assert!(score <= max, "seed {seed}: {score} > {max}");

            let entry = derive_mood_entry(&bank, &answers);
            for v in [entry.mood, entry.energy, entry.sleep] {
                assert!((SCORE_MIN..=SCORE_MAX).contains(&v), "seed {seed}: field {v}");
            }
        }
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(categorize(28).title, "Radiant Explorer");
        assert_eq!(categorize(24).title, "Radiant Explorer");
        assert_eq!(categorize(23).title, "Steady Sailor");
        assert_eq!(categorize(20).title, "Steady Sailor");
        assert_eq!(categorize(19).title, "Gentle Drifter");
        assert_eq!(categorize(16).title, "Gentle Drifter");
        assert_eq!(categorize(15).title, "Tender Heart");
        assert_eq!(categorize(12).title, "Tender Heart");
        assert_eq!(categorize(11).title, "Soft Sad Potato");
        assert_eq!(categorize(8).title, "Soft Sad Potato");
        assert_eq!(categorize(7).title, "Survival Mode Activated");
        assert_eq!(categorize(0).title, "Survival Mode Activated");
    }

    #[test]
    fn bands_never_improve_as_score_drops() {
        let rank = |score: u32| {
            MOOD_BANDS
                .iter()
                .position(|b| b == categorize(score))
                .unwrap()
        };
        for score in 1..=28 {
            assert!(rank(score - 1) >= rank(score), "score {score}");
        }
    }

    #[test]
    fn journal_prompts_follow_bands() {
        assert_eq!(categorize(21).journal_prompt, PROMPT_JOY);
        assert_eq!(categorize(17).journal_prompt, PROMPT_BALANCE);
        assert_eq!(categorize(13).journal_prompt, PROMPT_HEAVY_LIGHT);
        assert_eq!(categorize(9).journal_prompt, PROMPT_COMFORT);
        assert_eq!(categorize(2).journal_prompt, PROMPT_COMFORT);
    }

    #[test]
    fn outcome_reports_need_answer() {
        let (bank, answers) = complete(&[0, 0, 0, 0, 0, 0, 0, 3]);
        let outcome = QuizOutcome::evaluate(&bank, &answers);
        assert_eq!(outcome.score, 28);
        assert_eq!(outcome.max_score, 28);
        assert_eq!(outcome.band.title, "Radiant Explorer");
        assert_eq!(outcome.need.as_deref(), Some("🗣️ Someone to talk to"));
    }

    #[test]
    fn completed_quiz_maps_onto_mood_entry() {
        // 3 + 4 + 3 + 3 + 3 + 3 + 3 = 22
        let (bank, answers) = complete(&[1, 0, 1, 1, 1, 1, 1, 0]);
        assert_eq!(compute_score(&bank, &answers), 22);

        let entry = derive_mood_entry(&bank, &answers);
        assert_eq!(entry.mood, 3);
        assert_eq!(entry.energy, 3);
        assert_eq!(entry.sleep, 3);
        assert!(entry.notes.starts_with("Q1: ☁️ Partly cloudy (a little off but okay) | Q2: "));
        assert!(entry.notes.ends_with("Q8: 🛌 Rest or sleep"));
        assert!(entry.notes.chars().count() <= NOTES_MAX_CHARS);
    }

    #[test]
    fn total_fog_mood_falls_back_to_neutral() {
        // Q1 "Total fog" is worth 0, below the record range
        let (bank, answers) = complete(&[3, 0, 0, 3, 0, 0, 0, 0]);
        let entry = derive_mood_entry(&bank, &answers);
        assert_eq!(entry.mood, FALLBACK_FIELD_VALUE);
        assert_eq!(entry.energy, 4);
        assert_eq!(entry.sleep, 1);
    }

    #[test]
    fn thunderstorm_mood_is_stored_as_is() {
        let (bank, answers) = complete(&[2, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(derive_mood_entry(&bank, &answers).mood, 1);
    }

    #[test]
    fn notes_are_truncated_on_char_boundaries() {
        let s = "é".repeat(600);
        let t = truncate_chars(&s, NOTES_MAX_CHARS);
        assert_eq!(t.chars().count(), 500);
        assert_eq!(truncate_chars("short", 500), "short");
    }

    #[test]
    fn long_notes_from_a_custom_bank_are_truncated() {
        let mut bank = QuestionBank::default_bank();
        for q in &mut bank.questions {
            for o in &mut q.options {
                o.label = "x".repeat(120);
            }
        }
        let bank = Arc::new(bank);
        let mut session = QuizSession::new(bank.clone());
        for _ in 0..8 {
            session.answer_current(0).unwrap();
        }
        let answers = session.completed_answers().unwrap();
        let entry = derive_mood_entry(&bank, &answers);
        assert_eq!(entry.notes.chars().count(), NOTES_MAX_CHARS);
    }
}
