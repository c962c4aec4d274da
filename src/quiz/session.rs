use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::QuizError;
use crate::quiz::bank::{generate_bank, BANK_SIZE};
use crate::quiz::{Domain, Question};

/// What a skipped question counts as at review time. Skips never change the
/// score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SkipPolicy {
    #[default]
    ReviewAsIncorrect,
    ExcludeFromReview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    NotStarted,
    InProgress,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnswerRecord {
    /// `None` when a question was skipped with nothing highlighted.
    pub selected: Option<usize>,
    pub correct: bool,
    pub skipped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub correct_index: usize,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub score: usize,
    pub total: usize,
    pub review: Vec<Question>,
}

impl Summary {
    pub fn is_perfect(&self) -> bool {
        self.review.is_empty()
    }
}

/// One quiz run. `Session::default()` is a session that has not started yet.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Session {
    started: bool,
    seed: u64,
    skip_policy: SkipPolicy,
    questions: Vec<Question>,
    position: usize,
    score: usize,
    answered: HashMap<String, AnswerRecord>,
}

impl Session {
    pub fn new(skip_policy: SkipPolicy) -> Self {
        Self {
            skip_policy,
            ..Self::default()
        }
    }

    /// Replaces this session with a fresh working set of at most `count`
    /// questions from `domains`. On error the session is left untouched.
    pub fn start(&mut self, seed: u64, domains: &[Domain], count: usize) -> Result<(), QuizError> {
        if count == 0 {
            return Err(QuizError::InvalidConfiguration(
                "question count must be at least 1".to_string(),
            ));
        }

        let mut filtered: Vec<Question> = generate_bank(BANK_SIZE, seed)
            .into_iter()
            .filter(|q| domains.contains(&q.domain))
            .collect();
        if filtered.is_empty() {
            log::warn!("No questions for domains {:?}", domains);
            return Err(QuizError::NoQuestions);
        }

        let mut rng = StdRng::seed_from_u64(seed);
        filtered.shuffle(&mut rng);
        filtered.truncate(count);

        log::info!(
            "Starting quiz with {} questions (seed {}, domains {:?})",
            filtered.len(),
            seed,
            domains
        );
        *self = Self {
            started: true,
            seed,
            skip_policy: self.skip_policy,
            questions: filtered,
            position: 0,
            score: 0,
            answered: HashMap::new(),
        };
        Ok(())
    }

    /// Back to not started. The skip policy is a setting, not session state,
    /// so it survives.
    pub fn reset(&mut self) {
        log::info!("Resetting quiz");
        *self = Self::new(self.skip_policy);
    }

    pub fn status(&self) -> Status {
        if !self.started {
            Status::NotStarted
        } else if self.position >= self.questions.len() {
            Status::Complete
        } else {
            Status::InProgress
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status() == Status::Complete
    }

    pub fn current_question(&self) -> Option<&Question> {
        if !self.started {
            return None;
        }
        self.questions.get(self.position)
    }

    pub fn record(&self, id: &str) -> Option<&AnswerRecord> {
        self.answered.get(id)
    }

    pub fn current_record(&self) -> Option<&AnswerRecord> {
        self.current_question().and_then(|q| self.record(&q.id))
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// `(1-based number of the current question, total)`.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.questions.len();
        ((self.position + 1).min(total), total)
    }

    fn unanswered_current(&self) -> Result<&Question, QuizError> {
        let question = self.current_question().ok_or(QuizError::OutOfRange)?;
        if self.answered.contains_key(&question.id) {
            log::warn!("Question {} was already answered", question.id);
            return Err(QuizError::AlreadyAnswered(question.id.clone()));
        }
        Ok(question)
    }

    /// Confirms `option` for the current question. Only the first
    /// confirmation counts.
    pub fn submit_answer(&mut self, option: usize) -> Result<AnswerOutcome, QuizError> {
        let question = self.unanswered_current()?;
        if option >= question.options.len() {
            return Err(QuizError::InvalidOption {
                index: option,
                len: question.options.len(),
            });
        }

        let outcome = AnswerOutcome {
            is_correct: option == question.answer_index,
            correct_index: question.answer_index,
            explanation: question.explanation.clone(),
        };
        let id = question.id.clone();

        self.answered.insert(
            id,
            AnswerRecord {
                selected: Some(option),
                correct: outcome.is_correct,
                skipped: false,
            },
        );
        if outcome.is_correct {
            self.score += 1;
        }
        Ok(outcome)
    }

    /// Marks the current question as skipped. `highlighted` is whatever option
    /// the user had selected but not confirmed, if any.
    pub fn skip_current(&mut self, highlighted: Option<usize>) -> Result<(), QuizError> {
        let question = self.unanswered_current()?;
        let selected = highlighted.filter(|i| *i < question.options.len());
        let id = question.id.clone();

        self.answered.insert(
            id,
            AnswerRecord {
                selected,
                correct: false,
                skipped: true,
            },
        );
        Ok(())
    }

    /// Moves forward. Allowed without answering, and past the end.
    pub fn advance(&mut self) -> Result<(), QuizError> {
        if !self.started {
            return Err(QuizError::OutOfRange);
        }
        if self.position < self.questions.len() {
            self.position += 1;
            if self.position == self.questions.len() {
                log::info!("Quiz complete: {} / {}", self.score, self.questions.len());
            }
        }
        Ok(())
    }

    pub fn retreat(&mut self) -> Result<(), QuizError> {
        if !self.started {
            return Err(QuizError::OutOfRange);
        }
        self.position = self.position.saturating_sub(1);
        Ok(())
    }

    pub fn summary(&self) -> Summary {
        let review = self
            .questions
            .iter()
            .filter(|q| match self.answered.get(&q.id) {
                Some(r) if r.skipped => self.skip_policy == SkipPolicy::ReviewAsIncorrect,
                Some(r) => !r.correct,
                None => false,
            })
            .cloned()
            .collect();

        Summary {
            score: self.score,
            total: self.questions.len(),
            review,
        }
    }
}
