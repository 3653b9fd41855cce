//! Statement parsing implementation
//!
//! This module handles the parameter list and every statement form:
//!
//! - Declarations: `int x;`
//! - Assignments: `x = a + 1;`
//! - Conditionals: `if (a < b) { ... }` (no `else`)
//! - The trailing `return expr;` of `main`
//!
//! # Grammar
//!
//! ```text
//! params           ::= ( 'int' identifier ( ',' )? )*
//! statements       ::= ( if_statement | declaration | assignment )*
//! declaration      ::= 'int' identifier ';'
//! if_statement     ::= 'if' '(' condition ')' '{' statements '}'
//! condition        ::= identifier logical_operator identifier
//! assignment       ::= identifier '=' expression ';'
//! return_statement ::= 'return' expression ';'
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::{Node, NodeKind};
use crate::parser::lexer::TokenType;
use crate::parser::parse::{Parser, SyntaxError};

impl Parser {
    /// Parse the parameter list up to (not including) the closing `)`.
    ///
    /// Commas are optional between parameters: `int a int b` is accepted.
    pub(crate) fn parse_params(&mut self) -> Result<Node, SyntaxError> {
        let mut children = Vec::new();

        while self.peek().is_some() && !self.check_value(")") {
            children.push(self.expect_terminal(NodeKind::Param, TokenType::Keyword, Some("int"))?);
            children.push(self.expect_terminal(NodeKind::Identifier, TokenType::Identifier, None)?);
            if self.check_value(",") {
                self.expect(TokenType::Symbol, Some(","))?;
            }
        }

        Ok(Node::composite(NodeKind::Params, children))
    }

    /// Parse statements until `return`, `}` or the end of the stream.
    pub(crate) fn parse_statements(&mut self) -> Result<Node, SyntaxError> {
        let mut children = Vec::new();

        while self.peek().is_some() && !self.check_value("return") && !self.check_value("}") {
            children.push(self.parse_statement()?);
        }

        Ok(Node::composite(NodeKind::Statements, children))
    }

    /// Dispatch on the lookahead: `if`, the `int` keyword, or an assignment.
    pub(crate) fn parse_statement(&mut self) -> Result<Node, SyntaxError> {
        if self.check_value("if") {
            self.parse_if_statement()
        } else if self.check(TokenType::Keyword, Some("int")) {
            self.parse_declaration()
        } else {
            self.parse_assignment()
        }
    }

    fn parse_declaration(&mut self) -> Result<Node, SyntaxError> {
        let ty = self.expect_terminal(NodeKind::Type, TokenType::Keyword, Some("int"))?;
        let name = self.expect_terminal(NodeKind::Identifier, TokenType::Identifier, None)?;
        self.expect(TokenType::Symbol, Some(";"))?;

        Ok(Node::composite(NodeKind::Declaration, vec![ty, name]))
    }

    fn parse_if_statement(&mut self) -> Result<Node, SyntaxError> {
        log::trace!("parsing if statement at token {}", self.position);

        self.nested(|parser| {
            let keyword = parser.expect_terminal(NodeKind::If, TokenType::Keyword, Some("if"))?;
            parser.expect(TokenType::LeftParen, Some("("))?;
            let condition = parser.parse_condition()?;
            parser.expect(TokenType::RightParen, Some(")"))?;
            parser.expect(TokenType::LeftBrace, Some("{"))?;
            let body = parser.parse_statements()?;
            parser.expect(TokenType::RightBrace, Some("}"))?;

            Ok(Node::composite(
                NodeKind::IfStatement,
                vec![keyword, condition, body],
            ))
        })
    }

    fn parse_condition(&mut self) -> Result<Node, SyntaxError> {
        let lhs = self.expect_terminal(NodeKind::Identifier, TokenType::Identifier, None)?;
        let op = self.expect_terminal(NodeKind::Operator, TokenType::LogicalOperator, None)?;
        let rhs = self.expect_terminal(NodeKind::Identifier, TokenType::Identifier, None)?;

        Ok(Node::composite(NodeKind::Condition, vec![lhs, op, rhs]))
    }

    fn parse_assignment(&mut self) -> Result<Node, SyntaxError> {
        let target = self.expect_terminal(NodeKind::Identifier, TokenType::Identifier, None)?;
        let op = self.expect_terminal(NodeKind::Operator, TokenType::AssignmentOperator, None)?;
        let value = self.parse_expression()?;
        self.expect(TokenType::Symbol, Some(";"))?;

        Ok(Node::composite(NodeKind::Assignment, vec![target, op, value]))
    }

    pub(crate) fn parse_return_statement(&mut self) -> Result<Node, SyntaxError> {
        let keyword = self.expect_terminal(NodeKind::Return, TokenType::Keyword, Some("return"))?;
        let value = self.parse_expression()?;
        self.expect(TokenType::Symbol, Some(";"))?;

        Ok(Node::composite(NodeKind::ReturnStatement, vec![keyword, value]))
    }
}
