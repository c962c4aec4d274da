use thiserror::Error;

/// Everything a quiz operation can refuse to do.
///
/// None of these are fatal: the session is left exactly as it was before the
/// rejected call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The domain filter left nothing to ask.
    #[error("no questions available for the selected domains")]
    NoQuestions,

    #[error("question {0} has already been answered")]
    AlreadyAnswered(String),

    /// There is no working set, or the position is past its end.
    #[error("no question at the current position")]
    OutOfRange,

    #[error("option {index} does not exist, the question has {len} options")]
    InvalidOption { index: usize, len: usize },
}
