/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Core AST traits, wrappers and the Program root
/// - expressions: Definitions for the expression nodes
/// - statements: Definitions for the statement nodes
///
/// Every node renders itself through `Display`; the rendering is fully
/// parenthesised and is what the parser tests compare against.
pub mod ast;
pub mod expressions;
pub mod statements;
