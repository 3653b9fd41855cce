//! Lexer (tokenizer) for minic source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! The lexer never fails: characters it does not recognise degrade to
//! [`TokenType::Symbol`] or [`TokenType::Unknown`] tokens and the parser decides
//! whether they are acceptable.
//!
//! The stream can also be written to and read from a JSON token file, an array
//! of `{"Type": ..., "Value": ...}` records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved words. Only `int`, `main`, `if` and `return` are used by the grammar.
pub const KEYWORDS: [&str; 11] = [
    "if", "else", "while", "for", "int", "char", "float", "main", "return", "printf", "void",
];

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The closed set of token type tags.
///
/// The serialized names are the ones used in token files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    Integer,
    Float,
    Identifier,
    #[serde(rename = "Assignment Operator")]
    AssignmentOperator,
    #[serde(rename = "Arithmetic Operator")]
    ArithmeticOperator,
    #[serde(rename = "Logical Operator")]
    LogicalOperator,
    Keyword,
    #[serde(rename = "String")]
    StringLiteral,
    #[serde(rename = "Left Parenthesis")]
    LeftParen,
    #[serde(rename = "Right Parenthesis")]
    RightParen,
    #[serde(rename = "Left Curly Brace")]
    LeftBrace,
    #[serde(rename = "Right Curly Brace")]
    RightBrace,
    Symbol,
    Unknown,
    #[serde(rename = "EOF")]
    Eof,
}

impl TokenType {
    pub fn name(self) -> &'static str {
        match self {
            TokenType::Integer => "Integer",
            TokenType::Float => "Float",
            TokenType::Identifier => "Identifier",
            TokenType::AssignmentOperator => "Assignment Operator",
            TokenType::ArithmeticOperator => "Arithmetic Operator",
            TokenType::LogicalOperator => "Logical Operator",
            TokenType::Keyword => "Keyword",
            TokenType::StringLiteral => "String",
            TokenType::LeftParen => "Left Parenthesis",
            TokenType::RightParen => "Right Parenthesis",
            TokenType::LeftBrace => "Left Curly Brace",
            TokenType::RightBrace => "Right Curly Brace",
            TokenType::Symbol => "Symbol",
            TokenType::Unknown => "Unknown",
            TokenType::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single token: a type tag plus the literal text it was built from.
///
/// Tokens produced by the [`Lexer`] remember where they started; tokens read
/// from a token file do not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "Type")]
    pub kind: TokenType,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(skip)]
    pub location: Option<SourceLocation>,
}

impl Token {
    pub fn new(kind: TokenType, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            location: None,
        }
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn is(&self, kind: TokenType, value: &str) -> bool {
        self.kind == kind && self.value == value
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type: {}, Value: {}", self.kind, self.value)
    }
}

/// Returns true if `word` is a reserved keyword (case-sensitive).
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// Serialize a token stream into the JSON token file format.
pub fn tokens_to_json(tokens: &[Token]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(tokens)
}

/// Read a token stream back from the JSON token file format.
pub fn tokens_from_json(json: &str) -> serde_json::Result<Vec<Token>> {
    serde_json::from_str(json)
}

/// Lexer for minic source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input. The result always ends with an `EOF` token.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                tokens.push(Token::new(TokenType::Eof, "EOF").at(self.current_location()));
                break;
            }

            tokens.push(self.next_token());
        }

        log::debug!("tokenized {} tokens", tokens.len());
        tokens
    }

    /// Get next token. Must not be called at end of input.
    fn next_token(&mut self) -> Token {
        let loc = self.current_location();
        let ch = match self.peek() {
            Some(ch) => ch,
            None => return Token::new(TokenType::Eof, "EOF").at(loc),
        };

        let token = match ch {
            '0'..='9' => self.number_literal(),
            '"' => self.string_literal(),
            c if c.is_ascii_alphabetic() || c == '_' => self.identifier_or_keyword(),
            '=' => {
                self.advance();
                if self.peek() == Some('=') {
                    self.advance();
                    Token::new(TokenType::LogicalOperator, "==")
                } else {
                    Token::new(TokenType::AssignmentOperator, "=")
                }
            }
            '+' | '-' | '*' | '/' => self.single(TokenType::ArithmeticOperator),
            '(' => self.single(TokenType::LeftParen),
            ')' => self.single(TokenType::RightParen),
            '{' => self.single(TokenType::LeftBrace),
            '}' => self.single(TokenType::RightBrace),
            '<' | '>' => self.single(TokenType::LogicalOperator),
            c if c.is_ascii() => self.single(TokenType::Symbol),
            _ => self.single(TokenType::Unknown),
        };

        token.at(loc)
    }

    fn single(&mut self, kind: TokenType) -> Token {
        let ch = self.advance().unwrap_or_default();
        Token::new(kind, ch.to_string())
    }

    /// Digits and dots; a dot anywhere makes it a float.
    fn number_literal(&mut self) -> Token {
        let text = self.take_while(|c| c.is_ascii_digit() || c == '.');
        let kind = if text.contains('.') {
            TokenType::Float
        } else {
            TokenType::Integer
        };
        Token::new(kind, text)
    }

    /// String literal including its quotes. An unterminated string runs to end of input.
    fn string_literal(&mut self) -> Token {
        let mut text = String::new();
        if let Some(open) = self.advance() {
            text.push(open);
        }

        while let Some(ch) = self.advance() {
            text.push(ch);
            if ch == '"' {
                break;
            }
        }

        Token::new(TokenType::StringLiteral, text)
    }

    fn identifier_or_keyword(&mut self) -> Token {
        let word = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let kind = if is_keyword(&word) {
            TokenType::Keyword
        } else {
            TokenType::Identifier
        };
        Token::new(kind, word)
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            text.push(ch);
            self.advance();
        }
        text
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
