// ABOUTME: Reader error types — evaluation errors are Value::Error sentinels (see eval.rs)

use crate::value::Loc;
use thiserror::Error;

/// Errors the reader can raise before a value tree even exists, so they
/// cannot be represented as a `Value::Error` sentinel the way evaluation
/// failures are. Each variant carries the `Loc` of the offending token; a
/// reader error does not consume input past what is needed to report it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReaderError {
    #[error("{0}: unterminated list")]
    UnterminatedList(Loc),

    #[error("{0}: unexpected ')'")]
    StrayRParen(Loc),

    #[error("{0}: malformed dotted form")]
    MalformedDot(Loc),

    #[error("{0}: unexpected end of input")]
    UnexpectedEof(Loc),

    #[error("{0}: unexpected trailing input")]
    TrailingInput(Loc),
}

impl ReaderError {
    pub fn loc(&self) -> Loc {
        match self {
            ReaderError::UnterminatedList(l)
            | ReaderError::StrayRParen(l)
            | ReaderError::MalformedDot(l)
            | ReaderError::UnexpectedEof(l)
            | ReaderError::TrailingInput(l) => *l,
        }
    }
}
