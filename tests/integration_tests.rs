//! Integration tests for the lexer and parser together.
//!
//! These tests drive whole programs through the public API: lexing, parsing,
//! rendering the AST back to text and rendering errors against the source.

use monkey::{
    ast::{
        ast::{Expr, ExprType, Stmt, StmtType},
        expressions::{CallExpr, FunctionExpr, HashExpr},
        statements::{ExpressionStmt, LetStmt},
    },
    display_error,
    lexer::{
        lexer::{tokenize, Lexer},
        tokens::TokenKind,
    },
    parser::parser::{parse, Parser},
};

const PROGRAM: &str = r#"let five = 5;
let ten = 10;

let add = fn(x, y) {
  x + y;
};

let result = add(five, ten);
!-5;
5 < 10 > 5;

if (5 < 10) {
	return true;
} else {
	return false;
}

10 == 10;
10 != 9;
"foobar";
"foo bar";
[1, 2];
{"foo": "bar"}
"#;

#[test]
fn test_program_tokens_end_with_single_eof() {
    let tokens = tokenize(PROGRAM.to_string(), Some("program.mk".to_string()));

    assert!(tokens.iter().all(|token| token.kind != TokenKind::Illegal));
    assert_eq!(
        tokens
            .iter()
            .filter(|token| token.kind == TokenKind::EOF)
            .count(),
        1
    );

    let last = tokens.last().unwrap();
    assert_eq!(last.kind, TokenKind::EOF);
    assert_eq!(last.value, "\0");
}

#[test]
fn test_parse_whole_program() {
    let (parser, program) = parse(PROGRAM.to_string(), Some("program.mk".to_string()));

    assert!(!parser.has_errors(), "{:?}", parser.error_messages());

    let rendered = program
        .iter()
        .map(|stmt| stmt.to_string())
        .collect::<Vec<String>>();

    assert_eq!(
        rendered,
        vec![
            "let five = 5;",
            "let ten = 10;",
            "let add = fn(x, y) (x + y);",
            "let result = add(five, ten);",
            "(!(-5))",
            "((5 < 10) > 5)",
            "if(5 < 10) return true;else return false;",
            "(10 == 10)",
            "(10 != 9)",
            "\"foobar\"",
            "\"foo bar\"",
            "[1, 2]",
            "{\"foo\":\"bar\"}",
        ]
    );
}

#[test]
fn test_statement_kinds() {
    let (parser, program) = parse(
        "let add = fn(a, b) { return a + b; }; add(1, 2);".to_string(),
        None,
    );
    assert!(!parser.has_errors());

    let kinds = program
        .iter()
        .map(|stmt| stmt.get_stmt_type())
        .collect::<Vec<StmtType>>();
    assert_eq!(kinds, vec![StmtType::LetStmt, StmtType::ExpressionStmt]);

    let let_stmt = program.body[0].as_any().downcast_ref::<LetStmt>().unwrap();
    let function = let_stmt.value.as_ref().unwrap();
    assert_eq!(function.get_expr_type(), ExprType::Function);

    let function = function.as_any().downcast_ref::<FunctionExpr>().unwrap();
    assert_eq!(function.body.body.len(), 1);
    assert_eq!(
        function.body.body[0].get_stmt_type(),
        StmtType::ReturnStmt
    );

    let call_stmt = program.body[1]
        .as_any()
        .downcast_ref::<ExpressionStmt>()
        .unwrap();
    let call = call_stmt.expression.as_ref().unwrap();
    let call = call.as_any().downcast_ref::<CallExpr>().unwrap();
    assert_eq!(call.function.to_string(), "add");
    assert_eq!(call.arguments.len(), 2);
}

#[test]
fn test_nested_collections() {
    let (parser, program) = parse(
        "let m = {\"list\": [1, 2, 3], \"f\": fn(x) { x * 2 }}; m[\"list\"][0]".to_string(),
        None,
    );
    assert!(!parser.has_errors(), "{:?}", parser.error_messages());

    assert_eq!(
        program.to_string(),
        "let m = {\"list\":[1, 2, 3], \"f\":fn(x) (x * 2)};((m[\"list\"])[0])"
    );

    let let_stmt = program.body[0].as_any().downcast_ref::<LetStmt>().unwrap();
    let hash = let_stmt.value.as_ref().unwrap();
    let hash = hash.as_any().downcast_ref::<HashExpr>().unwrap();
    assert_eq!(hash.get("\"list\"").unwrap().to_string(), "[1, 2, 3]");
}

#[test]
fn test_errors_are_collected_in_order() {
    let (parser, program) = parse(
        "let = 1;\nlet x = 2;\nlet y = (3 + 4;\nz".to_string(),
        Some("broken.mk".to_string()),
    );

    assert_eq!(
        parser.error_messages(),
        vec![
            "expected next token to be Identifier, got Assignment instead",
            "no prefix parse function for Assignment found",
            "expected next token to be CloseParen, got Semicolon instead",
        ]
    );

    let positions = parser
        .errors()
        .iter()
        .map(|error| error.get_position().0)
        .collect::<Vec<u32>>();
    assert_eq!(positions, vec![4, 4, 34]);
    assert_eq!(*parser.errors()[0].get_position().1, "broken.mk");

    // Parsing carried on past the broken statements
    assert_eq!(program.to_string(), "1let x = 2;let y = ;z");
}

#[test]
fn test_display_error_points_at_token() {
    let source = "let x = 1;\n    let y = (1 + 2;\n";
    let (parser, _) = parse(source.to_string(), Some("demo.mk".to_string()));
    assert_eq!(parser.errors().len(), 1);

    let rendered = display_error(&parser.errors()[0], source, "demo.mk");

    assert_eq!(
        rendered,
        "Error: UnexpectedToken (expected next token to be CloseParen, got Semicolon instead)\n\
         -> demo.mk\n  \
         |\n\
         2 | let y = (1 + 2;\n  \
         | --------------^\n"
    );
}

#[test]
fn test_display_error_counts_characters() {
    // "é" is two bytes but one column
    let source = "\"h\u{e9}llo\" + (1;";
    let (parser, _) = parse(source.to_string(), Some("utf8.mk".to_string()));
    assert_eq!(
        parser.error_messages(),
        vec!["expected next token to be CloseParen, got Semicolon instead"]
    );
    assert_eq!(parser.errors()[0].get_position().0, 13);

    let rendered = display_error(&parser.errors()[0], source, "utf8.mk");

    assert!(rendered.ends_with("  | ------------^\n"), "{}", rendered);
}

#[test]
fn test_display_error_at_end_of_input() {
    let source = "let x = 5 +";
    let (parser, _) = parse(source.to_string(), Some("eof.mk".to_string()));
    assert_eq!(
        parser.error_messages(),
        vec!["no prefix parse function for EOF found"]
    );

    let rendered = display_error(&parser.errors()[0], source, "eof.mk");

    assert!(rendered.starts_with(
        "Error: MissingPrefixHandler (Unexpected end of input, is an expression missing?)\n"
    ));
    assert!(rendered.contains("1 | let x = 5 +\n"));
    assert!(rendered.ends_with("| -----------^\n"));
}

#[test]
fn test_custom_end_token() {
    // The end token is lexed like any other character, so no EOF is produced
    let lexer = Lexer::new("1 + 2".to_string(), None).with_end_token(';');
    let kinds = lexer.map(|token| token.kind).collect::<Vec<TokenKind>>();

    assert_eq!(
        kinds,
        vec![
            TokenKind::Int,
            TokenKind::Plus,
            TokenKind::Int,
            TokenKind::Semicolon,
        ]
    );

    // The parser still stops once the lexer runs dry
    let lexer = Lexer::new("let a = 1 + 2".to_string(), None).with_end_token(';');
    let mut parser = Parser::new(lexer);
    let program = parser.parse_program();

    assert!(!parser.has_errors(), "{:?}", parser.error_messages());
    assert_eq!(program.to_string(), "let a = (1 + 2);");
}
