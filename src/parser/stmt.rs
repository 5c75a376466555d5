use crate::{
    ast::{
        ast::StmtWrapper,
        expressions::IdentifierExpr,
        statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::parse_operand, lookups::BindingPower, parser::Parser};

pub fn parse_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let stmt_fn = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied();

    match stmt_fn {
        Some(stmt_fn) => stmt_fn(parser),
        None => parse_expression_stmt(parser),
    }
}

pub fn parse_let_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let token = parser.current_token().clone();

    let name_token = parser.expect_peek(TokenKind::Identifier)?;
    let name = IdentifierExpr {
        value: name_token.value.clone(),
        token: name_token,
    };

    parser.expect_peek(TokenKind::Assignment)?;
    parser.advance();

    let value = parse_operand(parser, BindingPower::Lowest);
    skip_semicolon(parser);

    Ok(StmtWrapper::new(LetStmt { token, name, value }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let token = parser.current_token().clone();
    parser.advance();

    let value = parse_operand(parser, BindingPower::Lowest);
    skip_semicolon(parser);

    Ok(StmtWrapper::new(ReturnStmt { token, value }))
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let token = parser.current_token().clone();

    let expression = parse_operand(parser, BindingPower::Lowest);
    skip_semicolon(parser);

    Ok(StmtWrapper::new(ExpressionStmt { token, expression }))
}

/// Parses the statements of a `{ ... }` block.
///
/// The current token is the opening `{`; on return it is the closing `}`,
/// or `EOF` if the block was never closed. Reaching `EOF` ends the block
/// without an error.
pub fn parse_block_stmt(parser: &mut Parser) -> BlockStmt {
    let token = parser.current_token().clone();
    let mut body = vec![];

    parser.advance();

    while !parser.current_token_is(TokenKind::CloseCurly)
        && !parser.current_token_is(TokenKind::EOF)
    {
        match parse_stmt(parser) {
            Ok(stmt) => body.push(stmt),
            Err(error) => parser.record_error(error),
        }
        parser.advance();
    }

    BlockStmt { token, body }
}

fn skip_semicolon(parser: &mut Parser) {
    if parser.peek_token_is(TokenKind::Semicolon) {
        parser.advance();
    }
}
