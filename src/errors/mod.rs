//! Error types for the front end.
//!
//! Lexical problems never reach this module: they travel as `Illegal` tokens.
//! This module defines:
//!
//! - Error structures with source position information
//! - Syntactic error variants recorded by the parser
//! - Error names and suggestions used when rendering errors

pub mod errors;

#[cfg(test)]
mod tests;
