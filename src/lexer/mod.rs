//! Lexical analysis module.
//!
//! Converts source text into tokens on demand. It handles:
//!
//! - Keywords and identifiers
//! - Integer and float literals
//! - Single- and double-quoted strings
//! - Operators and delimiters
//! - Illegal input, which is returned as a token rather than raised

pub mod chars;
pub mod lexer;
pub mod tokens;
