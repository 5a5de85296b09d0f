use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParseError>;

/// Why a present value could not be converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("invalid syntax")]
    Syntax,

    #[error("value out of range")]
    OutOfRange,

    #[error("value is not valid unicode")]
    NotUnicode,
}

/// A present environment value failed to convert to the requested type.
///
/// The key has already been removed from the environment when this is
/// returned. The raw value is never kept here, so the error is safe to log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse environment variable {key} as {target}: {kind}")]
pub struct ParseError {
    key: String,
    target: &'static str,
    kind: ParseErrorKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub key: String,
    pub target: String,
}

impl ParseError {
    pub(crate) fn new(key: impl Into<String>, target: &'static str, kind: ParseErrorKind) -> Self {
        Self {
            key: key.into(),
            target,
            kind,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn target(&self) -> &'static str {
        self.target
    }

    #[must_use]
    pub const fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ParseErrorKind::Syntax => "INVALID_SYNTAX",
            ParseErrorKind::OutOfRange => "OUT_OF_RANGE",
            ParseErrorKind::NotUnicode => "NOT_UNICODE",
        }
    }

    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            code: self.code().to_string(),
            message: self.to_string(),
            key: self.key.clone(),
            target: self.target.to_string(),
        }
    }
}
