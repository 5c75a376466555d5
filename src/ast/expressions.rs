use std::{
    any::Any,
    fmt::{self, Display},
};

use crate::lexer::tokens::Token;

use super::{
    ast::{fmt_optional, Expr, ExprType, ExprWrapper},
    statements::BlockStmt,
};

/// Implements the `Expr` boilerplate shared by every node that derives
/// `Clone`.
macro_rules! impl_expr {
    ($node:ty, $expr_type:expr) => {
        impl Expr for $node {
            fn get_expr_type(&self) -> ExprType {
                $expr_type
            }
            fn as_any(&self) -> &dyn Any {
                self
            }
            fn clone_wrapper(&self) -> ExprWrapper {
                ExprWrapper::new(self.clone())
            }
            fn get_token(&self) -> &Token {
                &self.token
            }
        }
    };
}

// LITERALS

/// Identifier Expression
/// Represents a name in the AST, including function parameters.
#[derive(Debug, Clone)]
pub struct IdentifierExpr {
    pub token: Token,
    pub value: String,
}

impl_expr!(IdentifierExpr, ExprType::Identifier);

impl Display for IdentifierExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Integer Expression
/// Represents an integer literal in the AST.
#[derive(Debug, Clone)]
pub struct IntegerExpr {
    pub token: Token,
    pub value: i64,
}

impl_expr!(IntegerExpr, ExprType::Integer);

impl Display for IntegerExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token.value)
    }
}

/// Float Expression
/// Represents a floating point literal in the AST.
#[derive(Debug, Clone)]
pub struct FloatExpr {
    pub token: Token,
    pub value: f64,
}

impl_expr!(FloatExpr, ExprType::Float);

impl Display for FloatExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token.value)
    }
}

#[derive(Debug, Clone)]
pub struct BooleanExpr {
    pub token: Token,
    pub value: bool,
}

impl_expr!(BooleanExpr, ExprType::Boolean);

impl Display for BooleanExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token.value)
    }
}

/// String Expression
/// `value` holds the text between the quotes; rendering reproduces the
/// quoted token.
#[derive(Debug, Clone)]
pub struct StringExpr {
    pub token: Token,
    pub value: String,
}

impl_expr!(StringExpr, ExprType::String);

impl Display for StringExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token.value)
    }
}

// COMPLEX

/// Prefix Expression
/// Represents `!x` or `-x`.
#[derive(Debug, Clone)]
pub struct PrefixExpr {
    pub token: Token,
    pub operator: String,
    pub right: Option<ExprWrapper>,
}

impl_expr!(PrefixExpr, ExprType::Prefix);

impl Display for PrefixExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.operator)?;
        fmt_optional(f, &self.right)?;
        write!(f, ")")
    }
}

/// Infix Expression
/// Represents a binary operation between two expressions in the AST.
#[derive(Debug, Clone)]
pub struct InfixExpr {
    pub token: Token,
    pub left: ExprWrapper,
    pub operator: String,
    pub right: Option<ExprWrapper>,
}

impl_expr!(InfixExpr, ExprType::Infix);

impl Display for InfixExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} ", self.left, self.operator)?;
        fmt_optional(f, &self.right)?;
        write!(f, ")")
    }
}

/// If Expression
/// `if (<condition>) { ... } else { ... }`
#[derive(Debug, Clone)]
pub struct IfExpr {
    pub token: Token,
    pub condition: Option<ExprWrapper>,
    pub consequence: BlockStmt,
    pub alternative: Option<BlockStmt>,
}

impl_expr!(IfExpr, ExprType::If);

impl Display for IfExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if")?;
        fmt_optional(f, &self.condition)?;
        write!(f, " {}", self.consequence)?;
        if let Some(alternative) = &self.alternative {
            write!(f, "else {}", alternative)?;
        }
        Ok(())
    }
}

/// Function Expression
/// Represents a function literal `fn(<parameters>) { <body> }`.
#[derive(Debug, Clone)]
pub struct FunctionExpr {
    pub token: Token,
    pub parameters: Vec<IdentifierExpr>,
    pub body: BlockStmt,
}

impl_expr!(FunctionExpr, ExprType::Function);

impl Display for FunctionExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parameters = self
            .parameters
            .iter()
            .map(|parameter| parameter.to_string())
            .collect::<Vec<String>>();

        write!(
            f,
            "{}({}) {}",
            self.token.value,
            parameters.join(", "),
            self.body
        )
    }
}

/// Call Expression
/// Represents a function call in the AST. `token` is the opening `(`.
#[derive(Debug, Clone)]
pub struct CallExpr {
    pub token: Token,
    pub function: ExprWrapper,
    pub arguments: Vec<ExprWrapper>,
}

impl_expr!(CallExpr, ExprType::Call);

impl Display for CallExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.function, join(&self.arguments))
    }
}

/// Array Expression
/// Represents an array literal `[a, b, c]`.
#[derive(Debug, Clone)]
pub struct ArrayExpr {
    pub token: Token,
    pub elements: Vec<ExprWrapper>,
}

impl_expr!(ArrayExpr, ExprType::Array);

impl Display for ArrayExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", join(&self.elements))
    }
}

/// Index Expression
/// Represents `<left>[<index>]`. `token` is the opening `[`.
#[derive(Debug, Clone)]
pub struct IndexExpr {
    pub token: Token,
    pub left: ExprWrapper,
    pub index: ExprWrapper,
}

impl_expr!(IndexExpr, ExprType::Index);

impl Display for IndexExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}[{}])", self.left, self.index)
    }
}

/// Hash Expression
/// Represents a hash literal `{k: v, ...}`.
///
/// Pairs keep the order in which their keys first appeared. A repeated key
/// (same rendering) replaces the earlier value in place.
#[derive(Debug, Clone)]
pub struct HashExpr {
    pub token: Token,
    pub pairs: Vec<(ExprWrapper, ExprWrapper)>,
}

impl HashExpr {
    pub fn insert(&mut self, key: ExprWrapper, value: ExprWrapper) {
        let rendered = key.to_string();
        match self
            .pairs
            .iter_mut()
            .find(|(existing, _)| existing.to_string() == rendered)
        {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ExprWrapper> {
        self.pairs
            .iter()
            .find(|(existing, _)| existing.to_string() == key)
            .map(|(_, value)| value)
    }
}

impl_expr!(HashExpr, ExprType::Hash);

impl Display for HashExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs = self
            .pairs
            .iter()
            .map(|(key, value)| format!("{}:{}", key, value))
            .collect::<Vec<String>>();

        write!(f, "{{{}}}", pairs.join(", "))
    }
}

fn join(expressions: &[ExprWrapper]) -> String {
    expressions
        .iter()
        .map(|expr| expr.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}
