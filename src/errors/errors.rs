use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

/// A parse error together with where it happened.
///
/// `Display` gives the plain message (`expected next token to be ...`), which
/// is what `Parser::error_messages` returns.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::MissingPrefixHandler { .. } => "MissingPrefixHandler",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::FloatParseError { .. } => "FloatParseError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { expected, found } => ErrorTip::Suggestion(format!(
                "expected next token to be {}, got {} instead",
                expected, found
            )),
            ErrorImpl::MissingPrefixHandler { kind, token } => match kind {
                TokenKind::Illegal => {
                    ErrorTip::Suggestion(format!("Unrecognised input: `{}`", token))
                }
                TokenKind::EOF => ErrorTip::Suggestion(String::from(
                    "Unexpected end of input, is an expression missing?",
                )),
                _ => ErrorTip::Suggestion(format!(
                    "Unexpected token: `{}`, it cannot start an expression",
                    token
                )),
            },
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::FloatParseError { .. } => ErrorTip::None,
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("expected next token to be {expected}, got {found} instead")]
    UnexpectedToken { expected: TokenKind, found: TokenKind },
    #[error("no prefix parse function for {kind} found")]
    MissingPrefixHandler { kind: TokenKind, token: String },
    #[error("could not parse {token:?} as integer")]
    NumberParseError { token: String },
    /// `Float` tokens from the lexer always parse; this is only reached when
    /// the float handler is registered for another token kind.
    #[error("could not parse {token:?} as float")]
    FloatParseError { token: String },
}
