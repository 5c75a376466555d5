use std::{iter::FusedIterator, rc::Rc};

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::{MK_SPAN, MK_TOKEN};

use super::{
    chars::{is_digit, is_letter, is_literal, is_whitespace},
    tokens::{lookup_identifier, Token, TokenKind},
};

lazy_static! {
    static ref IDENTIFIER_PATTERN: Regex = Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap();
    static ref NUMBER_PATTERN: Regex = Regex::new("^[0-9]+(\\.[0-9]*)?").unwrap();
}

/// Where the lexer stands relative to the end of its input.
///
/// The end token is handed out exactly once after the last source character,
/// so "one past the end" and "finished" are separate states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Source characters remain.
    Input,
    /// Only the end token remains.
    Terminator,
    /// The end token has been read; no more tokens.
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct Lexer {
    source: String,
    pos: usize,
    end_token: char,
    cursor: Cursor,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        let cursor = if source.is_empty() {
            Cursor::Terminator
        } else {
            Cursor::Input
        };

        Lexer {
            source,
            pos: 0,
            end_token: '\0',
            cursor,
            file: file_name,
        }
    }

    /// Replaces the character injected after the input.
    ///
    /// Only `'\0'` lexes as `EOF`; any other end token is lexed like a source
    /// character and the stream ends without an `EOF` token.
    pub fn with_end_token(mut self, ch: char) -> Lexer {
        self.end_token = ch;
        self
    }

    pub fn has_next(&self) -> bool {
        self.cursor != Cursor::Exhausted
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    /// Byte offset of the next unread source character.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Produces the next token, or `None` once the end token has been consumed.
    pub fn next_token(&mut self) -> Option<Token> {
        if !self.has_next() {
            return None;
        }

        self.skip_whitespace();

        let start = self.pos;
        let ch = self.advance()?;

        let token = match ch {
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::Equals, String::from("=="), start)
                } else {
                    self.make_token(TokenKind::Assignment, ch.to_string(), start)
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::NotEquals, String::from("!="), start)
                } else {
                    self.make_token(TokenKind::Not, ch.to_string(), start)
                }
            }
            '+' => self.make_token(TokenKind::Plus, ch.to_string(), start),
            '-' => self.make_token(TokenKind::Dash, ch.to_string(), start),
            '*' => self.make_token(TokenKind::Star, ch.to_string(), start),
            '/' => self.make_token(TokenKind::Slash, ch.to_string(), start),
            '<' => self.make_token(TokenKind::Less, ch.to_string(), start),
            '>' => self.make_token(TokenKind::Greater, ch.to_string(), start),
            ';' => self.make_token(TokenKind::Semicolon, ch.to_string(), start),
            ':' => self.make_token(TokenKind::Colon, ch.to_string(), start),
            ',' => self.make_token(TokenKind::Comma, ch.to_string(), start),
            '{' => self.make_token(TokenKind::OpenCurly, ch.to_string(), start),
            '}' => self.make_token(TokenKind::CloseCurly, ch.to_string(), start),
            '(' => self.make_token(TokenKind::OpenParen, ch.to_string(), start),
            ')' => self.make_token(TokenKind::CloseParen, ch.to_string(), start),
            '[' => self.make_token(TokenKind::OpenBracket, ch.to_string(), start),
            ']' => self.make_token(TokenKind::CloseBracket, ch.to_string(), start),
            '\0' => self.make_token(TokenKind::EOF, ch.to_string(), start),
            '"' | '\'' => self.read_string(ch, start),
            _ if !is_literal(ch) => self.make_token(TokenKind::Illegal, ch.to_string(), start),
            _ if is_letter(ch) => self.read_identifier(ch, start),
            _ if is_digit(ch) => self.read_number(ch, start),
            _ => self.make_token(TokenKind::Illegal, ch.to_string(), start),
        };

        trace!("lexed {} at {}..{}", token, token.span.start.0, token.span.end.0);

        Some(token)
    }

    fn make_token(&self, kind: TokenKind, value: String, start: usize) -> Token {
        MK_TOKEN!(kind, value, MK_SPAN!(start, self.pos, self.file))
    }

    fn peek(&self) -> Option<char> {
        match self.cursor {
            Cursor::Input => self.remainder().chars().next(),
            Cursor::Terminator => Some(self.end_token),
            Cursor::Exhausted => None,
        }
    }

    fn advance(&mut self) -> Option<char> {
        match self.cursor {
            Cursor::Input => {
                let ch = self.remainder().chars().next()?;
                self.advance_to(self.pos + ch.len_utf8());
                Some(ch)
            }
            Cursor::Terminator => {
                self.cursor = Cursor::Exhausted;
                Some(self.end_token)
            }
            Cursor::Exhausted => None,
        }
    }

    /// Like `advance`, but never consumes the end token.
    fn advance_in_source(&mut self) -> Option<char> {
        match self.cursor {
            Cursor::Input => self.advance(),
            _ => None,
        }
    }

    /// Consumes the end token when a run reaches the end of the source and
    /// the end token can continue it.
    fn take_end_token_if(&mut self, continues: impl Fn(char) -> bool) -> Option<char> {
        if self.cursor != Cursor::Terminator || !continues(self.end_token) {
            return None;
        }
        self.advance()
    }

    fn advance_to(&mut self, pos: usize) {
        self.pos = pos;
        if self.cursor == Cursor::Input && self.pos >= self.source.len() {
            self.cursor = Cursor::Terminator;
        }
    }

    fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.advance();
        }
    }

    fn read_string(&mut self, quote: char, start: usize) -> Token {
        let mut value = quote.to_string();

        while let Some(ch) = self.advance_in_source() {
            value.push(ch);
            if ch == quote {
                return self.make_token(TokenKind::String, value, start);
            }
        }

        // Unterminated: hand back what was read and leave the end token for EOF.
        self.make_token(TokenKind::Illegal, value, start)
    }

    fn read_identifier(&mut self, first: char, start: usize) -> Token {
        // No match means `first` was the end token itself.
        let end = match IDENTIFIER_PATTERN.find(&self.source[start..]) {
            Some(matched) => start + matched.end(),
            None => return self.make_token(lookup_identifier(&first.to_string()), first.to_string(), start),
        };
        self.advance_to(end);

        let mut value = self.source[start..end].to_string();
        if let Some(ch) = self.take_end_token_if(is_literal) {
            value.push(ch);
        }

        self.make_token(lookup_identifier(&value), value, start)
    }

    fn read_number(&mut self, first: char, start: usize) -> Token {
        let (end, mut is_float) = match NUMBER_PATTERN.find(&self.source[start..]) {
            Some(matched) => (start + matched.end(), matched.as_str().contains('.')),
            None => return self.make_token(TokenKind::Int, first.to_string(), start),
        };
        self.advance_to(end);

        let mut value = self.source[start..end].to_string();
        let accepts_dot = !is_float;
        let continues = move |ch| is_digit(ch) || (ch == '.' && accepts_dot);
        if let Some(ch) = self.take_end_token_if(continues) {
            is_float |= ch == '.';
            value.push(ch);
        }

        if is_float && self.peek() == Some('.') {
            // The second dot is reported but left in the stream.
            value.push('.');
            return self.make_token(TokenKind::Illegal, value, start);
        }

        let kind = if is_float {
            TokenKind::Float
        } else {
            TokenKind::Int
        };
        self.make_token(kind, value, start)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

impl FusedIterator for Lexer {}

/// Lexes `source` to completion.
pub fn tokenize(source: String, file: Option<String>) -> Vec<Token> {
    Lexer::new(source, file).collect()
}
