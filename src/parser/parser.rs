//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct. The parser pulls tokens from
//! a `Lexer` and looks one token ahead: `current_token` is the token being
//! parsed and `peek_token` decides what comes next.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use std::{collections::HashMap, mem};

use log::debug;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position, MK_SPAN, MK_TOKEN,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler,
        NUDLookup, StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// Source of tokens, pulled one at a time
    lexer: Lexer,
    /// The token being parsed
    current_token: Token,
    /// One token of lookahead
    peek_token: Token,
    /// Errors recorded so far, in the order they were found
    errors: Vec<Error>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a parser over `lexer` with the default grammar registered.
    ///
    /// The first two tokens are pulled immediately so that both
    /// `current_token` and `peek_token` are set.
    pub fn new(lexer: Lexer) -> Self {
        let mut lexer = lexer;
        let current_token = next_or_eof(&mut lexer);
        let peek_token = next_or_eof(&mut lexer);

        let mut parser = Parser {
            lexer,
            current_token,
            peek_token,
            errors: vec![],
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);

        parser
    }

    /// Parses statements until `EOF`.
    ///
    /// Never fails: problems are recorded in `errors()` and the affected
    /// statement is dropped or left with empty slots.
    pub fn parse_program(&mut self) -> Program {
        let mut body = vec![];

        while !self.current_token_is(TokenKind::EOF) {
            match parse_stmt(self) {
                Ok(stmt) => body.push(stmt),
                Err(error) => self.record_error(error),
            }
            self.advance();
        }

        Program { body }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current_token
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token.kind
    }

    pub fn peek_token(&self) -> &Token {
        &self.peek_token
    }

    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek_token.kind
    }

    pub fn current_token_is(&self, kind: TokenKind) -> bool {
        self.current_token.is(kind)
    }

    pub fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek_token.is(kind)
    }

    /// Shifts the lookahead into `current_token` and pulls a new lookahead.
    ///
    /// Once the lexer is exhausted the lookahead stays `EOF`.
    pub fn advance(&mut self) {
        let next = next_or_eof(&mut self.lexer);
        self.current_token = mem::replace(&mut self.peek_token, next);
    }

    /// Advances if the lookahead has the expected kind.
    ///
    /// # Returns
    ///
    /// The new current token, or an `UnexpectedToken` error positioned at the
    /// lookahead. The cursor does not move on failure.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.peek_token_is(expected_kind) {
            self.advance();
            Ok(self.current_token.clone())
        } else {
            Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kind,
                    found: self.peek_token.kind,
                },
                self.peek_token.span.start.clone(),
            ))
        }
    }

    /// Binding power of the lookahead; tokens without one bind at `Lowest`.
    pub fn peek_binding_power(&self) -> BindingPower {
        self.binding_power(self.peek_token.kind)
    }

    pub fn current_binding_power(&self) -> BindingPower {
        self.binding_power(self.current_token.kind)
    }

    fn binding_power(&self, kind: TokenKind) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&kind)
            .unwrap_or(&BindingPower::Lowest)
    }

    pub fn record_error(&mut self, error: Error) {
        debug!(
            "parse error at {}:{}: {}",
            error.get_position().1,
            error.get_position().0,
            error
        );
        self.errors.push(error);
    }

    /// Errors in the order they were recorded.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the current position in the source file.
    pub fn get_position(&self) -> Position {
        self.current_token.span.start.clone()
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Prefix handlers do not touch the binding power table, so a token can
    /// be both a prefix and an infix operator (`-`, `(`, `[`).
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }
}

fn next_or_eof(lexer: &mut Lexer) -> Token {
    match lexer.next_token() {
        Some(token) => token,
        None => {
            let file = lexer.file();
            let pos = lexer.offset();
            MK_TOKEN!(TokenKind::EOF, String::from("\0"), MK_SPAN!(pos, pos, file))
        }
    }
}

/// Parses `source` into a Program.
///
/// This is the main entry point for parsing. The returned parser holds the
/// errors; check `errors()` before trusting the Program.
///
/// # Arguments
///
/// * `source` - The source text
/// * `file` - Name used in error positions; defaults to `shell`
pub fn parse(source: String, file: Option<String>) -> (Parser, Program) {
    let mut parser = Parser::new(Lexer::new(source, file));
    let program = parser.parse_program();

    (parser, program)
}
