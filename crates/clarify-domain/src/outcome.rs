//! Collection outcome - the record of one interview

use crate::question::{Answer, Question};
use std::fmt;

/// The final record of a collection attempt, complete or cancelled.
///
/// An outcome is created fresh for every interview. Only the collector builds
/// it; once finished it is consumed by the formatter as an immutable value.
///
/// Invariants (checked by [`CollectionOutcome::validate`]):
/// - `answers.len() <= questions.len()`
/// - not cancelled: every question answered, `cancelled_at` is `None`
/// - cancelled at `k`: exactly the first `k` questions answered
/// - the i-th answer belongs to the i-th question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionOutcome {
    /// Every question of the interview, in presentation order
    pub questions: Vec<Question>,

    /// Answers recorded so far, in submission order
    pub answers: Vec<Answer>,

    /// Whether the operator cancelled the interview
    pub cancelled: bool,

    /// Index of the question on screen at cancellation time
    pub cancelled_at: Option<usize>,
}

/// Invariant violations of a [`CollectionOutcome`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeError {
    /// More answers than questions
    TooManyAnswers {
        /// Number of questions
        questions: usize,
        /// Number of answers
        answers: usize,
    },

    /// A completed outcome that is missing answers
    Incomplete {
        /// Number of questions
        questions: usize,
        /// Number of answers
        answers: usize,
    },

    /// The cancel index disagrees with the number of answers
    CancelIndexMismatch {
        /// Recorded cancel index
        index: Option<usize>,
        /// Number of answers
        answers: usize,
    },

    /// An answer is paired with a different question than its position implies
    Misaligned {
        /// Position of the offending answer
        position: usize,
    },
}

impl fmt::Display for OutcomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeError::TooManyAnswers { questions, answers } => {
                write!(f, "{} answers recorded for {} questions", answers, questions)
            }
            OutcomeError::Incomplete { questions, answers } => write!(
                f,
                "completed outcome has {} answers for {} questions",
                answers, questions
            ),
            OutcomeError::CancelIndexMismatch { index, answers } => write!(
                f,
                "cancel index {:?} does not match {} recorded answers",
                index, answers
            ),
            OutcomeError::Misaligned { position } => {
                write!(f, "answer {} does not belong to question {}", position, position)
            }
        }
    }
}

impl std::error::Error for OutcomeError {}

impl CollectionOutcome {
    /// Outcome of an interview where every question was answered
    pub fn completed(questions: Vec<Question>, answers: Vec<Answer>) -> Self {
        Self {
            questions,
            answers,
            cancelled: false,
            cancelled_at: None,
        }
    }

    /// Outcome of an interview cancelled while question `index` was shown
    pub fn cancelled(questions: Vec<Question>, answers: Vec<Answer>, index: usize) -> Self {
        Self {
            questions,
            answers,
            cancelled: true,
            cancelled_at: Some(index),
        }
    }

    /// Outcome reported when an interview could not start at all
    ///
    /// Used for precondition failures (no questions, no UI): nothing was asked,
    /// so the record is cancelled without a cancel position.
    pub fn not_started(questions: Vec<Question>) -> Self {
        Self {
            questions,
            answers: Vec::new(),
            cancelled: true,
            cancelled_at: None,
        }
    }

    /// Cancel position in wire form: the index, or `-1` when not cancelled
    ///
    /// # Examples
    ///
    /// ```
    /// use clarify_domain::{Answer, CollectionOutcome};
    ///
    /// let done = CollectionOutcome::completed(
    ///     vec!["Q?".to_string()],
    ///     vec![Answer::new("Q?", "yes")],
    /// );
    /// assert_eq!(done.cancelled_at_index(), -1);
    ///
    /// let cancelled = CollectionOutcome::cancelled(vec!["Q?".to_string()], vec![], 0);
    /// assert_eq!(cancelled.cancelled_at_index(), 0);
    /// ```
    pub fn cancelled_at_index(&self) -> i64 {
        self.cancelled_at.map(|i| i as i64).unwrap_or(-1)
    }

    /// Check the outcome invariants
    pub fn validate(&self) -> Result<(), OutcomeError> {
        let questions = self.questions.len();
        let answers = self.answers.len();

        if answers > questions {
            return Err(OutcomeError::TooManyAnswers { questions, answers });
        }

        if self.cancelled {
            // `not_started` records carry no index and no answers
            let consistent = match self.cancelled_at {
                Some(index) => index == answers && index < questions,
                None => answers == 0,
            };
            if !consistent {
                return Err(OutcomeError::CancelIndexMismatch {
                    index: self.cancelled_at,
                    answers,
                });
            }
        } else {
            if answers != questions {
                return Err(OutcomeError::Incomplete { questions, answers });
            }
            if self.cancelled_at.is_some() {
                return Err(OutcomeError::CancelIndexMismatch {
                    index: self.cancelled_at,
                    answers,
                });
            }
        }

        for (position, answer) in self.answers.iter().enumerate() {
            if answer.question != self.questions[position] {
                return Err(OutcomeError::Misaligned { position });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions() -> Vec<Question> {
        vec!["A?".to_string(), "B?".to_string(), "C?".to_string()]
    }

    #[test]
    fn test_completed_is_valid() {
        let answers = questions().iter().map(|q| Answer::new(q.clone(), "x")).collect();
        let outcome = CollectionOutcome::completed(questions(), answers);
        assert!(outcome.validate().is_ok());
        assert_eq!(outcome.cancelled_at_index(), -1);
    }

    #[test]
    fn test_cancelled_is_valid() {
        let outcome = CollectionOutcome::cancelled(questions(), vec![Answer::new("A?", "x")], 1);
        assert!(outcome.validate().is_ok());
        assert_eq!(outcome.cancelled_at_index(), 1);
    }

    #[test]
    fn test_not_started_is_valid() {
        let outcome = CollectionOutcome::not_started(vec![]);
        assert!(outcome.validate().is_ok());
        assert!(outcome.cancelled);
        assert_eq!(outcome.cancelled_at_index(), -1);
    }

    #[test]
    fn test_incomplete_rejected() {
        let outcome = CollectionOutcome::completed(questions(), vec![Answer::new("A?", "x")]);
        assert!(matches!(outcome.validate(), Err(OutcomeError::Incomplete { .. })));
    }

    #[test]
    fn test_cancel_index_mismatch_rejected() {
        let outcome = CollectionOutcome::cancelled(questions(), vec![], 2);
        assert!(matches!(
            outcome.validate(),
            Err(OutcomeError::CancelIndexMismatch { .. })
        ));
    }

    #[test]
    fn test_misaligned_rejected() {
        let outcome = CollectionOutcome::cancelled(questions(), vec![Answer::new("B?", "x")], 1);
        assert_eq!(outcome.validate(), Err(OutcomeError::Misaligned { position: 0 }));
    }

    #[test]
    fn test_too_many_answers_rejected() {
        let outcome = CollectionOutcome::completed(
            vec!["A?".to_string()],
            vec![Answer::new("A?", "x"), Answer::new("A?", "y")],
        );
        assert!(matches!(outcome.validate(), Err(OutcomeError::TooManyAnswers { .. })));
    }
}
