use std::{
    any::Any,
    fmt::{self, Display},
    slice::Iter,
};

use crate::lexer::tokens::Token;

use super::{
    ast::{fmt_optional, ExprWrapper, Stmt, StmtType, StmtWrapper},
    expressions::IdentifierExpr,
};

/// Let Statement
/// `let <name> = <value>;`
#[derive(Debug, Clone)]
pub struct LetStmt {
    pub token: Token,
    pub name: IdentifierExpr,
    pub value: Option<ExprWrapper>,
}

impl Stmt for LetStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::LetStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_token(&self) -> &Token {
        &self.token
    }
}

impl Display for LetStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} = ", self.token.value, self.name)?;
        fmt_optional(f, &self.value)?;
        write!(f, ";")
    }
}

/// Return Statement
/// `return <value>;`
#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub token: Token,
    pub value: Option<ExprWrapper>,
}

impl Stmt for ReturnStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::ReturnStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_token(&self) -> &Token {
        &self.token
    }
}

impl Display for ReturnStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.token.value)?;
        fmt_optional(f, &self.value)?;
        write!(f, ";")
    }
}

/// Expression Statement
/// A bare expression used as a statement. `token` is the first token of the
/// expression.
#[derive(Debug, Clone)]
pub struct ExpressionStmt {
    pub token: Token,
    pub expression: Option<ExprWrapper>,
}

impl Stmt for ExpressionStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::ExpressionStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_token(&self) -> &Token {
        &self.token
    }
}

impl Display for ExpressionStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_optional(f, &self.expression)
    }
}

/// Block Statement
/// The `{ ... }` body of an `if` branch or a function literal.
#[derive(Debug, Clone)]
pub struct BlockStmt {
    pub token: Token,
    pub body: Vec<StmtWrapper>,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, StmtWrapper> {
        self.body.iter()
    }
}

impl Stmt for BlockStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::BlockStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(self.clone())
    }
    fn get_token(&self) -> &Token {
        &self.token
    }
}

impl Display for BlockStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.body {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}
