//! One-call compilation pipeline: tokens → AST → TAC.

use crate::parser::ast::Node;
use crate::parser::lexer::{Lexer, Token};
use crate::parser::{Parser, SyntaxError};
use crate::tac::{GeneratorConfig, InternalError, TacGenerator, TacInstruction};
use thiserror::Error;

/// Any failure of the front end for one compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Internal(#[from] InternalError),
}

/// Everything the front end produced for one compilation unit.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub ast: Node,
    pub instructions: Vec<TacInstruction>,
}

/// Tokenize, parse and lower `source`.
pub fn compile(source: &str, config: GeneratorConfig) -> Result<Compilation, CompileError> {
    let tokens = Lexer::new(source).tokenize();
    compile_tokens(tokens, config)
}

/// Parse and lower an already tokenized stream.
pub fn compile_tokens(
    tokens: Vec<Token>,
    config: GeneratorConfig,
) -> Result<Compilation, CompileError> {
    let ast = Parser::new(tokens.clone()).parse_program()?;

    let mut generator = TacGenerator::with_config(config);
    generator.generate(&ast)?;

    Ok(Compilation {
        tokens,
        ast,
        instructions: generator.into_instructions(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_reports_syntax_errors() {
        let err = compile("int main() { return ; }", GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, CompileError::Syntax(ref e) if e.position() == 6));
        assert!(err.to_string().starts_with("Syntax error at token 6"));
    }

    #[test]
    fn test_compile_keeps_all_stages() {
        let unit = compile("int main() { return 7; }", GeneratorConfig::default()).unwrap();
        assert_eq!(unit.tokens.len(), 10);
        assert_eq!(unit.ast.children.len(), 1);
        assert_eq!(unit.instructions.len(), 1);
    }
}
