//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that pulls tokens from a lexer and builds
//! a `Program`. It uses a Pratt parser for expressions with binding powers
//! for precedence and handles:
//!
//! - Statement parsing (`let`, `return`, expression statements, blocks)
//! - Expression parsing (prefix/infix operators, calls, indexing, literals)
//! - Error accumulation: errors are recorded and parsing carries on
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! registered per token kind.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
