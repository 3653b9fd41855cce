//! Expression parsing implementation
//!
//! Precedence is encoded structurally by two levels of recursion:
//!
//! ```text
//! expression ::= term ( ('+'|'-') term )*
//! term       ::= factor ( ('*'|'/') factor )*
//! factor     ::= integer | identifier | '(' expression ')'
//! ```
//!
//! Binary operators are left-associative: each loop iteration wraps the tree
//! built so far as the left child of a new `expression`/`term` node. A lone
//! term or factor is returned without a wrapper, and parentheses contribute
//! only their inner expression.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::{Node, NodeKind};
use crate::parser::lexer::TokenType;
use crate::parser::parse::{Parser, SyntaxError};

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Node, SyntaxError> {
        let mut node = self.parse_term()?;

        while self.check_arithmetic(&["+", "-"]) {
            let op = self.expect_terminal(NodeKind::Operator, TokenType::ArithmeticOperator, None)?;
            let rhs = self.parse_term()?;
            node = Node::composite(NodeKind::Expression, vec![node, op, rhs]);
        }

        Ok(node)
    }

    fn parse_term(&mut self) -> Result<Node, SyntaxError> {
        let mut node = self.parse_factor()?;

        while self.check_arithmetic(&["*", "/"]) {
            let op = self.expect_terminal(NodeKind::Operator, TokenType::ArithmeticOperator, None)?;
            let rhs = self.parse_factor()?;
            node = Node::composite(NodeKind::Term, vec![node, op, rhs]);
        }

        Ok(node)
    }

    fn parse_factor(&mut self) -> Result<Node, SyntaxError> {
        if self.check(TokenType::Integer, None) {
            self.expect_terminal(NodeKind::Integer, TokenType::Integer, None)
        } else if self.check(TokenType::Identifier, None) {
            self.expect_terminal(NodeKind::Identifier, TokenType::Identifier, None)
        } else if self.check_value("(") {
            self.nested(|parser| {
                parser.expect(TokenType::LeftParen, Some("("))?;
                let inner = parser.parse_expression()?;
                parser.expect(TokenType::RightParen, Some(")"))?;
                Ok(inner)
            })
        } else {
            Err(self.error_here("Integer, Identifier or '('".to_string()))
        }
    }

    fn check_arithmetic(&self, symbols: &[&str]) -> bool {
        symbols
            .iter()
            .any(|symbol| self.check(TokenType::ArithmeticOperator, Some(symbol)))
    }
}
