//! Character classes used by the lexer.

/// ASCII letters and `_`.
pub fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// Characters that may appear inside an identifier or number.
pub fn is_literal(ch: char) -> bool {
    is_letter(ch) || is_digit(ch)
}

pub fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}
