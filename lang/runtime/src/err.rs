use thiserror::Error;

/// Failures program logic can raise while being forced.
///
/// These are emitted by compiled code itself and propagate verbatim through
/// every intermediate force; the runtime never catches, logs, or converts
/// them. None of them is retryable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgramFailure {
    #[error("pattern match failure at {location}")]
    PatternMatch { location: String },
    #[error("arithmetic failure: {0}")]
    Arithmetic(String),
    #[error("error: {0}")]
    Raised(String),
    #[error("undefined")]
    Undefined,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Forcing a value required forcing that same value again before it had
    /// produced anything: a non-productive recursive binding such as `x = x`.
    #[error("value depends on itself while being computed")]
    SelfReferentialValue,
    #[error("{0}")]
    Program(#[from] ProgramFailure),
}

pub type Result<T> = std::result::Result<T, EvalError>;
