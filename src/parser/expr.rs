use crate::{
    ast::{
        ast::ExprWrapper,
        expressions::{
            ArrayExpr, BooleanExpr, CallExpr, FloatExpr, FunctionExpr, HashExpr, IdentifierExpr,
            IfExpr, IndexExpr, InfixExpr, IntegerExpr, PrefixExpr, StringExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_block_stmt};

/// Parses an expression whose operators bind tighter than `bp`.
///
/// On entry the current token starts the expression; on return it is the
/// last token of the expression.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<ExprWrapper, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud_fn = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud_fn) => *nud_fn,
        None => {
            return Err(Error::new(
                ErrorImpl::MissingPrefixHandler {
                    kind: token_kind,
                    token: parser.current_token().value.clone(),
                },
                parser.get_position(),
            ))
        }
    };

    let mut left = nud_fn(parser)?;

    // While the lookahead binds tighter than bp, fold it into lhs
    while !parser.peek_token_is(TokenKind::Semicolon) && bp < parser.peek_binding_power() {
        let led_fn = match parser.get_led_lookup().get(&parser.peek_token_kind()) {
            Some(led_fn) => *led_fn,
            None => return Ok(left),
        };

        parser.advance();
        let operator_bp = parser.current_binding_power();
        left = led_fn(parser, left, operator_bp)?;
    }

    Ok(left)
}

/// Parses an operand slot of a larger construct.
///
/// A failure is recorded on the parser and the slot is left empty, so the
/// enclosing node is still built.
pub fn parse_operand(parser: &mut Parser, bp: BindingPower) -> Option<ExprWrapper> {
    match parse_expr(parser, bp) {
        Ok(expr) => Some(expr),
        Err(error) => {
            parser.record_error(error);
            None
        }
    }
}

pub fn parse_identifier_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token = parser.current_token().clone();

    Ok(ExprWrapper::new(IdentifierExpr {
        value: token.value.clone(),
        token,
    }))
}

pub fn parse_integer_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token = parser.current_token().clone();

    match parse_integer_literal(&token.value) {
        Some(value) => Ok(ExprWrapper::new(IntegerExpr { token, value })),
        None => Err(Error::new(
            ErrorImpl::NumberParseError { token: token.value },
            token.span.start,
        )),
    }
}

/// Reads integer text, detecting the base from its prefix: `0x`, `0o`, `0b`,
/// a leading `0` for octal, otherwise decimal. Returns `None` on bad digits
/// or overflow.
pub fn parse_integer_literal(text: &str) -> Option<i64> {
    let lower = text.to_ascii_lowercase();

    let (digits, radix) = if let Some(hex) = lower.strip_prefix("0x") {
        (hex, 16)
    } else if let Some(octal) = lower.strip_prefix("0o") {
        (octal, 8)
    } else if let Some(binary) = lower.strip_prefix("0b") {
        (binary, 2)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (&lower[1..], 8)
    } else {
        (lower.as_str(), 10)
    };

    // from_str_radix accepts a sign, the literal never carries one
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_digit(radix)) {
        return None;
    }

    i64::from_str_radix(digits, radix).ok()
}

pub fn parse_float_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token = parser.current_token().clone();

    match token.value.parse::<f64>() {
        Ok(value) => Ok(ExprWrapper::new(FloatExpr { token, value })),
        Err(_) => Err(Error::new(
            ErrorImpl::FloatParseError { token: token.value },
            token.span.start,
        )),
    }
}

pub fn parse_boolean_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token = parser.current_token().clone();

    Ok(ExprWrapper::new(BooleanExpr {
        value: token.is(TokenKind::True),
        token,
    }))
}

pub fn parse_string_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token = parser.current_token().clone();
    // String tokens always open and close with the same one-byte quote
    let value = token
        .value
        .get(1..token.value.len().saturating_sub(1))
        .unwrap_or_default()
        .to_string();

    Ok(ExprWrapper::new(StringExpr { token, value }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token = parser.current_token().clone();
    parser.advance();
    let right = parse_operand(parser, BindingPower::Prefix);

    Ok(ExprWrapper::new(PrefixExpr {
        operator: token.value.clone(),
        token,
        right,
    }))
}

pub fn parse_infix_expr(
    parser: &mut Parser,
    left: ExprWrapper,
    bp: BindingPower,
) -> Result<ExprWrapper, Error> {
    let token = parser.current_token().clone();
    parser.advance();
    let right = parse_operand(parser, bp);

    Ok(ExprWrapper::new(InfixExpr {
        operator: token.value.clone(),
        token,
        left,
        right,
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Lowest)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_if_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    parser.advance();
    let condition = parse_operand(parser, BindingPower::Lowest);
    parser.expect_peek(TokenKind::CloseParen)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let consequence = parse_block_stmt(parser);

    let alternative = if parser.peek_token_is(TokenKind::Else) {
        parser.advance();
        parser.expect_peek(TokenKind::OpenCurly)?;
        Some(parse_block_stmt(parser))
    } else {
        None
    };

    Ok(ExprWrapper::new(IfExpr {
        token,
        condition,
        consequence,
        alternative,
    }))
}

pub fn parse_function_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    let parameters = parse_function_parameters(parser)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let body = parse_block_stmt(parser);

    Ok(ExprWrapper::new(FunctionExpr {
        token,
        parameters,
        body,
    }))
}

fn parse_function_parameters(parser: &mut Parser) -> Result<Vec<IdentifierExpr>, Error> {
    let mut parameters = vec![];

    if parser.peek_token_is(TokenKind::CloseParen) {
        parser.advance();
        return Ok(parameters);
    }

    let token = parser.expect_peek(TokenKind::Identifier)?;
    parameters.push(IdentifierExpr {
        value: token.value.clone(),
        token,
    });

    while parser.peek_token_is(TokenKind::Comma) {
        parser.advance();
        let token = parser.expect_peek(TokenKind::Identifier)?;
        parameters.push(IdentifierExpr {
            value: token.value.clone(),
            token,
        });
    }

    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(parameters)
}

pub fn parse_call_expr(
    parser: &mut Parser,
    left: ExprWrapper,
    _bp: BindingPower,
) -> Result<ExprWrapper, Error> {
    let token = parser.current_token().clone();

    // A broken argument list still leaves a call node behind
    let arguments = match parse_expr_list(parser, TokenKind::CloseParen) {
        Ok(arguments) => arguments,
        Err(error) => {
            parser.record_error(error);
            vec![]
        }
    };

    Ok(ExprWrapper::new(CallExpr {
        token,
        function: left,
        arguments,
    }))
}

pub fn parse_index_expr(
    parser: &mut Parser,
    left: ExprWrapper,
    _bp: BindingPower,
) -> Result<ExprWrapper, Error> {
    let token = parser.current_token().clone();
    parser.advance();
    let index = parse_expr(parser, BindingPower::Lowest)?;
    parser.expect_peek(TokenKind::CloseBracket)?;

    Ok(ExprWrapper::new(IndexExpr { token, left, index }))
}

pub fn parse_array_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token = parser.current_token().clone();
    let elements = parse_expr_list(parser, TokenKind::CloseBracket)?;

    Ok(ExprWrapper::new(ArrayExpr { token, elements }))
}

pub fn parse_hash_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let mut hash = HashExpr {
        token: parser.current_token().clone(),
        pairs: vec![],
    };

    while !parser.peek_token_is(TokenKind::CloseCurly) {
        parser.advance();
        let key = parse_expr(parser, BindingPower::Lowest)?;

        parser.expect_peek(TokenKind::Colon)?;
        parser.advance();
        let value = parse_expr(parser, BindingPower::Lowest)?;

        hash.insert(key, value);

        if !parser.peek_token_is(TokenKind::CloseCurly) {
            parser.expect_peek(TokenKind::Comma)?;
        }
    }

    parser.expect_peek(TokenKind::CloseCurly)?;

    Ok(ExprWrapper::new(hash))
}

/// Parses comma separated expressions up to `end`.
///
/// The current token is the opening delimiter; on success the current token
/// is `end`.
pub fn parse_expr_list(parser: &mut Parser, end: TokenKind) -> Result<Vec<ExprWrapper>, Error> {
    let mut list = vec![];

    if parser.peek_token_is(end) {
        parser.advance();
        return Ok(list);
    }

    parser.advance();
    list.push(parse_expr(parser, BindingPower::Lowest)?);

    while parser.peek_token_is(TokenKind::Comma) {
        parser.advance();
        parser.advance();
        list.push(parse_expr(parser, BindingPower::Lowest)?);
    }

    parser.expect_peek(end)?;

    Ok(list)
}
