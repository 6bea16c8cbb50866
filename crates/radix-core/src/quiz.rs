//! Conversion quiz.
//!
//! Questions are random integers in `10..=999` written in a random source
//! base, to be converted into a random target base. Quiz answers never enter
//! the session ledger.

use crate::conversion::Radix;
use rand::Rng;

const MIN_VALUE: i64 = 10;
const MAX_VALUE: i64 = 999;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub value: String,
    pub source_base: u32,
    pub target_base: u32,
    pub correct_answer: String,
}

impl QuizQuestion {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let source = Radix::random(rng);
        let target = Radix::random(rng);
        let value = rng.gen_range(MIN_VALUE..=MAX_VALUE);

        Self {
            value: source.format(value),
            source_base: source.get(),
            target_base: target.get(),
            correct_answer: target.format(value),
        }
    }

    /// Trimmed, ASCII case-insensitive comparison with the expected answer.
    pub fn check(&self, answer: &str) -> bool {
        answer.trim().eq_ignore_ascii_case(&self.correct_answer)
    }
}

/// Feedback for one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizFeedback {
    pub correct: bool,
    pub expected: String,
}

/// A fixed-length quiz with a running score.
#[derive(Debug, Clone)]
pub struct Quiz {
    questions: Vec<QuizQuestion>,
    position: usize,
    score: usize,
}

impl Quiz {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Self {
        let questions = (0..count)
            .map(|_| QuizQuestion::generate(&mut *rng))
            .collect();
        Self::from_questions(questions)
    }

    pub fn from_questions(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            position: 0,
            score: 0,
        }
    }

    /// The question awaiting an answer, or `None` once every question is answered.
    pub fn current(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.position)
    }

    /// Answers the current question and advances.
    pub fn submit(&mut self, answer: &str) -> Option<QuizFeedback> {
        let question = self.questions.get(self.position)?;
        let correct = question.check(answer);
        let expected = question.correct_answer.clone();

        if correct {
            self.score += 1;
        }
        self.position += 1;

        Some(QuizFeedback { correct, expected })
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.questions.len()
    }
}
