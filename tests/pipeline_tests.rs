// End-to-end tests: source → tokens → AST → TAC → execution

use minic::driver::{compile, compile_tokens, CompileError};
use minic::interpreter::engine::{Interpreter, DEFAULT_SNAPSHOT_LIMIT};
use minic::interpreter::errors::RuntimeError;
use minic::parser::ast::NodeKind;
use minic::parser::lexer::{tokens_from_json, tokens_to_json, Lexer, Token, TokenType};
use minic::parser::{SyntaxError, MAX_NESTING_DEPTH};
use minic::snapshot::Slot;
use minic::tac::{CounterScheme, GeneratorConfig, Opcode, Operand, TacInstruction};
use std::fs;
use std::path::Path;
use test_log::test;

const SCENARIO_1: &str = "int main(int a){ int b; b = a + 2; return b; }";

fn tac_lines(source: &str, config: GeneratorConfig) -> Vec<String> {
    compile(source, config)
        .expect("Compilation failed")
        .instructions
        .iter()
        .map(|i| i.to_string())
        .collect()
}

fn run_with(source: &str, inputs: &[(&str, i64)]) -> Result<Option<i64>, RuntimeError> {
    let unit = compile(source, GeneratorConfig::default()).expect("Compilation failed");
    let inputs = inputs.iter().map(|(name, value)| (name.to_string(), *value));
    let mut interpreter = Interpreter::new(unit.instructions, inputs, DEFAULT_SNAPSHOT_LIMIT)?;
    interpreter.run()
}

#[test]
fn test_scenario_1_tree() {
    let unit = compile(SCENARIO_1, GeneratorConfig::default()).expect("Compilation failed");
    let function = &unit.ast.children[0];
    assert_eq!(unit.ast.kind, NodeKind::Program);
    assert_eq!(function.kind, NodeKind::Function);

    assert_eq!(
        function.children[0].to_string(),
        "params[param(int), identifier(a)]"
    );
    assert_eq!(
        function.children[1].to_string(),
        "statements[declaration[type(int), identifier(b)], \
         assignment[identifier(b), operator(=), expression[identifier(a), operator(+), integer(2)]]]"
    );
    assert_eq!(
        function.children[2].to_string(),
        "return_statement[return(return), identifier(b)]"
    );
}

#[test]
fn test_scenario_1_tac() {
    let unit = compile(SCENARIO_1, GeneratorConfig::default()).expect("Compilation failed");
    assert_eq!(
        unit.instructions,
        vec![
            TacInstruction::binary(
                Opcode::Add,
                Operand::Var("a".into()),
                Operand::Literal("2".into()),
                Operand::Temp(0),
            ),
            TacInstruction::copy(Operand::Temp(0), Operand::Var("b".into())),
            TacInstruction::ret(Operand::Var("b".into())),
        ]
    );
}

#[test]
fn test_scenario_2_if_lowering() {
    let source = "int main(int x, int y) { int z; if (x < y) { z = 1; } return z; }";
    assert_eq!(
        tac_lines(source, GeneratorConfig::default()),
        [
            "t0 = x < y",
            "IF t0 GOTO L1",
            "GOTO L2",
            "LABEL L1",
            "z = 1",
            "LABEL L2",
            "RETURN z",
        ]
    );

    let split = GeneratorConfig {
        counters: CounterScheme::Split,
        ..GeneratorConfig::default()
    };
    assert_eq!(
        tac_lines(source, split)[..4],
        ["t0 = x < y", "IF t0 GOTO L0", "GOTO L1", "LABEL L0"]
    );
}

#[test]
fn test_empty_params() {
    let unit = compile("int main() { return 0; }", GeneratorConfig::default())
        .expect("Compilation failed");
    let params = &unit.ast.children[0].children[0];
    assert_eq!(params.kind, NodeKind::Params);
    assert!(params.children.is_empty());
}

#[test]
fn test_declarations_emit_nothing() {
    let with_decls = "int main(int a) { int b; b = a; int c; if (a < b) { int d; c = 1; } return b; }";
    let without = "int main(int a) { b = a; if (a < b) { c = 1; } return b; }";
    assert_eq!(
        tac_lines(with_decls, GeneratorConfig::default()),
        tac_lines(without, GeneratorConfig::default())
    );
}

/// Replacing token k of a valid stream by an unusable token fails at exactly k.
#[test]
fn test_syntax_error_reports_first_bad_token() {
    let path = Path::new("demos/input_program.c");
    let demo = fs::read_to_string(path).expect("Failed to read demo program");

    for source in [SCENARIO_1, demo.as_str()] {
        let tokens = Lexer::new(source).tokenize();
        for k in 0..tokens.len() {
            let mut broken = tokens.clone();
            broken[k] = Token::new(TokenType::Unknown, "@");
            match compile_tokens(broken, GeneratorConfig::default()) {
                Err(CompileError::Syntax(e)) => {
                    assert_eq!(e.position(), k, "wrong position for {}", e)
                }
                other => panic!("expected a syntax error at {}, got {:?}", k, other),
            }
        }
    }
}

#[test]
fn test_truncated_stream_reports_end() {
    let mut tokens = Lexer::new(SCENARIO_1).tokenize();
    tokens.truncate(9);
    let err = compile_tokens(tokens, GeneratorConfig::default()).unwrap_err();
    match err {
        CompileError::Syntax(e) => assert_eq!(e.position(), 9),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_trailing_tokens_are_rejected() {
    let err = compile("int main() { return 1; } int", GeneratorConfig::default()).unwrap_err();
    assert!(err.to_string().contains("expected end of input"), "{}", err);
}

#[test]
fn test_generation_is_deterministic_up_to_offset() {
    let path = Path::new("demos/input_program.c");
    let source = fs::read_to_string(path).expect("Failed to read demo program");

    let base = compile(&source, GeneratorConfig::default()).expect("Compilation failed");
    let again = compile(&source, GeneratorConfig::default()).expect("Compilation failed");
    assert_eq!(base.instructions, again.instructions);

    let offset = 7;
    let shifted = compile(
        &source,
        GeneratorConfig {
            first_index: offset,
            ..GeneratorConfig::default()
        },
    )
    .expect("Compilation failed");

    assert_eq!(base.instructions.len(), shifted.instructions.len());
    for (a, b) in base.instructions.iter().zip(&shifted.instructions) {
        assert_eq!(a.op, b.op);
        for (x, y) in a.operands().zip(b.operands()) {
            match (x, y) {
                (Operand::Temp(m), Operand::Temp(n)) | (Operand::Label(m), Operand::Label(n)) => {
                    assert_eq!(m + offset, *n)
                }
                _ => assert_eq!(x, y),
            }
        }
    }
}

#[test]
fn test_token_file_round_trip() {
    let path = Path::new("demos/input_program.c");
    let source = fs::read_to_string(path).expect("Failed to read demo program");

    let tokens = Lexer::new(&source).tokenize();
    let json = tokens_to_json(&tokens).expect("Serialization failed");
    let restored = tokens_from_json(&json).expect("Deserialization failed");

    let direct = compile_tokens(tokens, GeneratorConfig::default()).expect("Compilation failed");
    let from_file =
        compile_tokens(restored, GeneratorConfig::default()).expect("Compilation failed");
    assert_eq!(direct.ast, from_file.ast);
    assert_eq!(direct.instructions, from_file.instructions);
}

#[test]
fn test_demo_program_runs() {
    let path = Path::new("demos/input_program.c");
    let source = fs::read_to_string(path).expect("Failed to read demo program");

    // Both ifs taken
    assert_eq!(run_with(&source, &[("a", 4), ("b", 7)]), Ok(Some(65)));
    // Outer if skipped
    assert_eq!(run_with(&source, &[("a", 9), ("b", 2)]), Ok(Some(41)));
}

#[test]
fn test_untaken_branch_leaves_variable_unbound() {
    let path = Path::new("demos/scenario.c");
    let source = fs::read_to_string(path).expect("Failed to read demo program");
    assert_eq!(run_with(&source, &[("x", 1), ("y", 2)]), Ok(Some(1)));
    assert_eq!(run_with(&source, &[("x", 2), ("y", 1)]), Ok(Some(0)));

    let bare = "int main(int x, int y) { int z; if (x < y) { z = 1; } return z; }";
    assert!(matches!(
        run_with(bare, &[("x", 2), ("y", 1)]),
        Err(RuntimeError::UnboundVariable { ref name, .. }) if name == "z"
    ));
}

#[test]
fn test_stepping_back_restores_bindings() {
    let unit = compile(SCENARIO_1, GeneratorConfig::default()).expect("Compilation failed");
    let mut interpreter =
        Interpreter::new(unit.instructions, [("a".to_string(), 40)], DEFAULT_SNAPSHOT_LIMIT)
            .expect("Invalid program");
    assert_eq!(interpreter.run(), Ok(Some(42)));

    let b = Slot::Var("b".into());
    let value_of_b = |i: &Interpreter| {
        i.current_snapshot()
            .and_then(|s| s.bindings.get(&b).copied())
    };

    assert_eq!(value_of_b(&interpreter), Some(42));
    interpreter.step_backward().expect("step back");
    interpreter.step_backward().expect("step back");
    assert_eq!(value_of_b(&interpreter), None);
    interpreter.jump_to_end().expect("jump to end");
    assert_eq!(value_of_b(&interpreter), Some(42));
}

#[test]
fn test_long_flat_sum_compiles() {
    let terms = 10_000;
    let source = format!(
        "int main(int a) {{ int s; s = {}; return s; }}",
        vec!["a"; terms].join(" + ")
    );
    let unit = compile(&source, GeneratorConfig::default()).expect("Compilation failed");
    assert_eq!(unit.instructions.len(), terms + 1);
    assert_eq!(
        unit.instructions[terms - 1].to_string(),
        format!("s = t{}", terms - 2)
    );
    assert_eq!(unit.instructions[terms].to_string(), "RETURN s");
    assert!(unit.ast.pretty_lines().len() > 2 * terms);
}

#[test]
fn test_deep_nesting_is_a_syntax_error() {
    let depth = MAX_NESTING_DEPTH + 50;
    let source = format!(
        "int main(int a) {{ return {}a{}; }}",
        "(".repeat(depth),
        ")".repeat(depth)
    );
    match compile(&source, GeneratorConfig::default()) {
        Err(CompileError::Syntax(SyntaxError::NestingTooDeep { limit, .. })) => {
            assert_eq!(limit, MAX_NESTING_DEPTH)
        }
        other => panic!("Expected NestingTooDeep, got {:?}", other.map(|u| u.instructions)),
    }
}
