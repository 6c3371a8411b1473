use std::sync::Arc;

use serde::Serialize;

use crate::services::quiz_bank::{Question, QuestionBank};

/// One recorded selection, stored at its question's position.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Answer {
    pub question_id: u32,
    pub option_index: usize,
    pub rendered_text: String,
    pub value: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the next question.
    Next,
    /// The last question was answered; the session is now terminal.
    Done,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("option {index} does not exist for question {question_id} ({available} options)")]
    InvalidSelection {
        question_id: u32,
        index: usize,
        available: usize,
    },

    #[error("quiz is already complete")]
    AlreadyComplete,

    #[error("quiz is not complete yet")]
    Incomplete,
}

/// A single linear walk through the question bank.
#[derive(Debug, Clone)]
pub struct QuizSession {
    bank: Arc<QuestionBank>,
    position: usize,
    answers: Vec<Option<Answer>>,
    complete: bool,
}

impl QuizSession {
    /// `bank` must be validated (non-empty).
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        let answers = vec![None; bank.len()];
        Self {
            bank,
            position: 0,
            answers,
            complete: false,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total(&self) -> usize {
        self.bank.len()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn current_question(&self) -> &Question {
        &self.bank.questions[self.position]
    }

    pub fn answer_at(&self, position: usize) -> Option<&Answer> {
        self.answers.get(position).and_then(Option::as_ref)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn answer_current(&mut self, option_index: usize) -> Result<Advance, QuizError> {
        if self.complete {
            return Err(QuizError::AlreadyComplete);
        }

        let question = self.current_question();
        let option = question
            .options
            .get(option_index)
            .ok_or(QuizError::InvalidSelection {
                question_id: question.id,
                index: option_index,
                available: question.options.len(),
            })?;

        let answer = Answer {
            question_id: question.id,
            option_index,
            rendered_text: option.rendered(),
            value: option.value,
        };
        self.answers[self.position] = Some(answer);

        if self.position + 1 < self.bank.len() {
            self.position += 1;
            Ok(Advance::Next)
        } else {
            self.complete = true;
            Ok(Advance::Done)
        }
    }

    pub fn go_to_previous(&mut self) -> Result<(), QuizError> {
        if self.complete {
            return Err(QuizError::AlreadyComplete);
        }
        self.position = self.position.saturating_sub(1);
        Ok(())
    }

    /// The full answer sequence, in bank order, once the session is terminal.
    pub fn completed_answers(&self) -> Result<Vec<Answer>, QuizError> {
        if !self.complete {
            return Err(QuizError::Incomplete);
        }
        self.answers
            .iter()
            .cloned()
            .collect::<Option<Vec<_>>>()
            .ok_or(QuizError::Incomplete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> QuizSession {
        QuizSession::new(Arc::new(QuestionBank::default_bank()))
    }

    #[test]
    fn starts_at_first_question_with_no_answers() {
        let s = session();
        assert_eq!(s.position(), 0);
        assert_eq!(s.answered_count(), 0);
        assert_eq!(s.current_question().id, 1);
        assert!(!s.is_complete());
    }

    #[test]
    fn previous_saturates_at_zero() {
        let mut s = session();
        s.go_to_previous().unwrap();
        s.go_to_previous().unwrap();
        assert_eq!(s.position(), 0);
    }

    #[test]
    fn answering_advances_and_records_rendered_text() {
        let mut s = session();
        assert_eq!(s.answer_current(2), Ok(Advance::Next));
        assert_eq!(s.position(), 1);

        let a = s.answer_at(0).unwrap();
        assert_eq!(a.question_id, 1);
        assert_eq!(a.value, 1);
        assert_eq!(a.rendered_text, "⛈️ Thunderstorm (anxious or down)");
    }

    #[test]
    fn going_back_and_reanswering_overwrites() {
        let mut s = session();
        s.answer_current(0).unwrap();
        s.go_to_previous().unwrap();
        assert_eq!(s.answer_at(0).unwrap().value, 4, "previous keeps the answer");

        s.answer_current(3).unwrap();
        assert_eq!(s.answered_count(), 1);
        assert_eq!(s.answer_at(0).unwrap().value, 0);
        assert_eq!(s.position(), 1);
    }

    #[test]
    fn rejects_option_outside_current_question() {
        let mut s = session();
        let err = s.answer_current(4).unwrap_err();
        assert_eq!(
            err,
            QuizError::InvalidSelection {
                question_id: 1,
                index: 4,
                available: 4
            }
        );
        assert_eq!(s.position(), 0);
        assert_eq!(s.answered_count(), 0);
    }

    #[test]
    fn last_answer_terminates_without_advancing() {
        let mut s = session();
        for _ in 0..7 {
            assert_eq!(s.answer_current(0), Ok(Advance::Next));
        }
        assert_eq!(s.position(), 7);
        assert_eq!(s.answer_current(1), Ok(Advance::Done));
        assert_eq!(s.position(), 7);
        assert!(s.is_complete());

        let answers = s.completed_answers().unwrap();
        assert_eq!(answers.len(), 8);
        assert_eq!(answers[7].rendered_text, "😂 A good laugh");
    }

    #[test]
    fn terminal_session_rejects_transitions() {
        let mut s = session();
        for _ in 0..8 {
            s.answer_current(0).unwrap();
        }
        assert_eq!(s.answer_current(0), Err(QuizError::AlreadyComplete));
        assert_eq!(s.go_to_previous(), Err(QuizError::AlreadyComplete));
        assert_eq!(s.position(), 7);
    }

    #[test]
    fn completed_answers_requires_terminal_state() {
        let mut s = session();
        s.answer_current(0).unwrap();
        assert_eq!(s.completed_answers(), Err(QuizError::Incomplete));
    }
}
