//! minic source code parser
//!
//! This module transforms minic source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens) and the JSON token file
//! - [`parse`]: The [`Parser`](parse::Parser) struct, cursor and error type
//! - `statements` / `expressions`: grammar productions as `impl Parser` blocks
//! - [`ast`]: AST node definitions
//!
//! # Supported Subset
//!
//! - Exactly one function, `int main(int a, ...)`
//! - Statements: `int x;`, `x = expr;`, `if (a < b) { ... }` without `else`
//! - A mandatory trailing `return expr;`
//! - Expressions: `+ - * /`, parentheses, identifiers, integer literals
//!
//! # Parser Implementation
//!
//! Hand-written LL(1) recursive descent parser with one token of lookahead.
//! No external parser generator dependencies.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

pub use parse::{Parser, SyntaxError, MAX_NESTING_DEPTH};
