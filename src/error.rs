use thiserror::Error;

/// Every way a run can fail. All of these are fatal: nothing is caught or
/// retried, the driver prints the message and exits non-zero.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("unbound symbol '{0}'")]
    UnboundSymbol(String),
    #[error("expected {expected} argument(s), got {got}")]
    ArityMismatch { expected: usize, got: usize },
    #[error("'{0}' is not callable")]
    NotCallable(String),
    #[error("malformed {0} form")]
    MalformedSpecialForm(&'static str),
    #[error("cannot evaluate an empty list")]
    EmptyApplication,
    #[error("'{0}' expects numeric arguments")]
    TypeMismatch(&'static str),
    #[error("division by zero")]
    DivisionByZero,
}
