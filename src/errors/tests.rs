//! Unit tests for error handling.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::lexer::tokens::TokenKind;
use crate::Position;
use std::rc::Rc;

fn at(offset: u32) -> Position {
    Position(offset, Rc::new("test.mk".to_string()))
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: TokenKind::CloseParen,
            found: TokenKind::EOF,
        },
        at(42),
    );

    assert_eq!(error.get_position().0, 42);
    assert_eq!(error.get_position().1.as_str(), "test.mk");
}

#[test]
fn test_unexpected_token_error() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: TokenKind::CloseParen,
            found: TokenKind::EOF,
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(
        error.to_string(),
        "expected next token to be CloseParen, got EOF instead"
    );
}

#[test]
fn test_missing_prefix_handler_error() {
    let error = Error::new(
        ErrorImpl::MissingPrefixHandler {
            kind: TokenKind::Illegal,
            token: "@".to_string(),
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "MissingPrefixHandler");
    assert_eq!(error.to_string(), "no prefix parse function for Illegal found");
    assert_eq!(error.get_tip().to_string(), "Unrecognised input: `@`");
}

#[test]
fn test_number_parse_error() {
    let error = Error::new(
        ErrorImpl::NumberParseError {
            token: "99999999999999999999".to_string(),
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "NumberParseError");
    assert_eq!(
        error.to_string(),
        "could not parse \"99999999999999999999\" as integer"
    );
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::FloatParseError {
            token: "1.x".to_string(),
        },
        at(0),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
    assert_eq!(error.get_tip().to_string(), "");
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::MissingPrefixHandler {
            kind: TokenKind::EOF,
            token: "\0".to_string(),
        },
        at(0),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(msg) => assert!(msg.contains("end of input")),
        ErrorTip::None => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_kind_access() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: TokenKind::Colon,
            found: TokenKind::Comma,
        },
        at(3),
    );

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::Colon,
            found: TokenKind::Comma,
        }
    );
}
