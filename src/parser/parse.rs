//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, the token cursor and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser is a single-pass recursive descent parser with exactly one token
//! of lookahead and no backtracking:
//! - This module: Parser struct, cursor helpers, `program` and `function`
//! - `statements`: parameter lists and statements
//! - `expressions`: `expression`/`term`/`factor` precedence levels
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared cursor.
//!
//! The first mismatch aborts the parse; no partial tree is returned.

use crate::parser::ast::{Node, NodeKind};
use crate::parser::lexer::{Lexer, SourceLocation, Token, TokenType};
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// The token at `position` does not fit the grammar.
    #[error("Syntax error at token {position}{}: expected {expected}, but got {found_type} with value {found_value}", at_location(.location))]
    UnexpectedToken {
        position: usize,
        location: Option<SourceLocation>,
        expected: String,
        found_type: TokenType,
        found_value: String,
    },

    /// The stream ran out while the grammar still expected something.
    #[error("Syntax error at token {position}: unexpected end of input, expected {expected}")]
    UnexpectedEnd { position: usize, expected: String },

    /// Parentheses and `if` bodies nested deeper than [`MAX_NESTING_DEPTH`].
    #[error("Syntax error at token {position}: nesting deeper than {limit} levels")]
    NestingTooDeep { position: usize, limit: usize },
}

impl SyntaxError {
    /// Index of the offending token in the stream.
    pub fn position(&self) -> usize {
        match self {
            SyntaxError::UnexpectedToken { position, .. }
            | SyntaxError::UnexpectedEnd { position, .. }
            | SyntaxError::NestingTooDeep { position, .. } => *position,
        }
    }
}

fn at_location(location: &Option<SourceLocation>) -> String {
    match location {
        Some(loc) => format!(" ({})", loc),
        None => String::new(),
    }
}

/// Human description of an expectation, e.g. `Keyword 'int'`.
pub(crate) fn describe(kind: TokenType, value: Option<&str>) -> String {
    match value {
        Some(value) => format!("{} '{}'", kind, value),
        None => kind.to_string(),
    }
}

/// Combined limit on open parentheses and `if` bodies.
pub const MAX_NESTING_DEPTH: usize = 200;

/// Recursive descent parser for the minic grammar
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    depth: usize,
}

impl Parser {
    /// Create a parser over an already tokenized stream.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Tokenize `source` and create a parser over the result.
    pub fn from_source(source: &str) -> Self {
        Self::new(Lexer::new(source).tokenize())
    }

    /// Parse the whole stream: `program ::= function`, followed by end of input.
    pub fn parse_program(&mut self) -> Result<Node, SyntaxError> {
        let function = self.parse_function()?;
        self.expect_end()?;
        Ok(Node::composite(NodeKind::Program, vec![function]))
    }

    /// `function ::= 'int' 'main' '(' params ')' '{' statements return_statement '}'`
    fn parse_function(&mut self) -> Result<Node, SyntaxError> {
        log::trace!("parsing function at token {}", self.position);

        self.expect(TokenType::Keyword, Some("int"))?;
        self.expect(TokenType::Keyword, Some("main"))?;
        self.expect(TokenType::LeftParen, Some("("))?;
        let params = self.parse_params()?;
        self.expect(TokenType::RightParen, Some(")"))?;
        self.expect(TokenType::LeftBrace, Some("{"))?;
        let statements = self.parse_statements()?;
        let return_statement = self.parse_return_statement()?;
        self.expect(TokenType::RightBrace, Some("}"))?;

        Ok(Node::composite(
            NodeKind::Function,
            vec![params, statements, return_statement],
        ))
    }

    // ===== Helper methods =====

    /// Current lookahead token, if any remain.
    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// True if the lookahead's value is `value`, whatever its type.
    pub(crate) fn check_value(&self, value: &str) -> bool {
        self.peek().is_some_and(|t| t.value == value)
    }

    /// True if the lookahead has type `kind` and, when given, value `value`.
    pub(crate) fn check(&self, kind: TokenType, value: Option<&str>) -> bool {
        self.peek()
            .is_some_and(|t| t.kind == kind && value.map_or(true, |v| t.value == v))
    }

    pub(crate) fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Match the lookahead against an expectation, consuming it on success.
    pub(crate) fn expect(
        &mut self,
        kind: TokenType,
        value: Option<&str>,
    ) -> Result<Token, SyntaxError> {
        if self.check(kind, value) {
            if let Some(token) = self.advance() {
                return Ok(token);
            }
        }
        Err(self.error_here(describe(kind, value)))
    }

    /// Match a token and wrap its text in a terminal node of `node_kind`.
    pub(crate) fn expect_terminal(
        &mut self,
        node_kind: NodeKind,
        kind: TokenType,
        value: Option<&str>,
    ) -> Result<Node, SyntaxError> {
        let token = self.expect(kind, value)?;
        Ok(Node::terminal(node_kind, token.value))
    }

    /// Run `parse` one nesting level down, failing at the current token once
    /// [`MAX_NESTING_DEPTH`] levels are open.
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<T, SyntaxError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(SyntaxError::NestingTooDeep {
                position: self.position,
                limit: MAX_NESTING_DEPTH,
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Build the error for the current lookahead against `expected`.
    pub(crate) fn error_here(&self, expected: String) -> SyntaxError {
        match self.peek() {
            Some(token) => SyntaxError::UnexpectedToken {
                position: self.position,
                location: token.location,
                expected,
                found_type: token.kind,
                found_value: token.value.clone(),
            },
            None => SyntaxError::UnexpectedEnd {
                position: self.position,
                expected,
            },
        }
    }

    /// Accept an `EOF` token or an exhausted stream; anything else is trailing input.
    fn expect_end(&mut self) -> Result<(), SyntaxError> {
        match self.peek() {
            None => Ok(()),
            Some(token) if token.kind == TokenType::Eof => {
                self.advance();
                Ok(())
            }
            Some(_) => Err(self.error_here("end of input".to_string())),
        }
    }
}
