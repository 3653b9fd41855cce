// Arithmetic tests: the TAC for an expression computes what ordinary C
// precedence says the source text means

use minic::driver::compile;
use minic::interpreter::engine::{Interpreter, DEFAULT_SNAPSHOT_LIMIT};
use minic::tac::GeneratorConfig;
use test_log::test;

const INPUTS: [(&str, i64); 3] = [("a", 7), ("b", -3), ("c", 12)];

#[derive(Debug, Clone, Copy, PartialEq)]
enum Piece<'a> {
    Number(i64),
    Name(&'a str),
    Op(char),
    Open,
    Close,
}

fn pieces(text: &str) -> Vec<Piece<'_>> {
    let mut out = Vec::new();
    let mut rest = text.trim_start();
    while let Some(c) = rest.chars().next() {
        let len = if c.is_ascii_digit() || c.is_ascii_alphabetic() {
            rest.find(|ch: char| !ch.is_ascii_alphanumeric())
                .unwrap_or(rest.len())
        } else {
            1
        };
        let word = &rest[..len];
        out.push(match c {
            '(' => Piece::Open,
            ')' => Piece::Close,
            '+' | '-' | '*' | '/' => Piece::Op(c),
            _ if c.is_ascii_digit() => Piece::Number(word.parse().expect("number")),
            _ => Piece::Name(word),
        });
        rest = rest[len..].trim_start();
    }
    out
}

/// Precedence-climbing evaluation of the expression text, independent of the
/// crate's parser.
struct TextEval<'a> {
    pieces: Vec<Piece<'a>>,
    at: usize,
}

impl<'a> TextEval<'a> {
    fn evaluate(text: &'a str) -> i64 {
        let mut eval = TextEval {
            pieces: pieces(text),
            at: 0,
        };
        let value = eval.climb(1);
        assert_eq!(eval.at, eval.pieces.len(), "trailing input in {}", text);
        value
    }

    fn next(&mut self) -> Option<Piece<'a>> {
        let piece = self.pieces.get(self.at).copied();
        self.at += 1;
        piece
    }

    fn primary(&mut self) -> i64 {
        match self.next() {
            Some(Piece::Number(n)) => n,
            Some(Piece::Name(name)) => {
                INPUTS
                    .iter()
                    .find(|(input, _)| *input == name)
                    .expect("bound variable")
                    .1
            }
            Some(Piece::Open) => {
                let value = self.climb(1);
                assert_eq!(self.next(), Some(Piece::Close));
                value
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    fn climb(&mut self, min_prec: u8) -> i64 {
        let mut lhs = self.primary();
        while let Some(Piece::Op(op)) = self.pieces.get(self.at).copied() {
            let prec = if matches!(op, '*' | '/') { 2 } else { 1 };
            if prec < min_prec {
                break;
            }
            self.at += 1;
            let rhs = self.climb(prec + 1);
            lhs = match op {
                '+' => lhs + rhs,
                '-' => lhs - rhs,
                '*' => lhs * rhs,
                _ => lhs / rhs,
            };
        }
        lhs
    }
}

/// Compile `r = <expr>; return r;` and return (text result, TAC result).
fn both_ways(expr: &str) -> (i64, Option<i64>) {
    let source = format!(
        "int main(int a, int b, int c) {{ int r; r = {}; return r; }}",
        expr
    );
    let unit = compile(&source, GeneratorConfig::default()).expect("Compilation failed");
    let expected = TextEval::evaluate(expr);

    let inputs = INPUTS.iter().map(|(n, v)| (n.to_string(), *v));
    let mut interpreter = Interpreter::new(unit.instructions, inputs, DEFAULT_SNAPSHOT_LIMIT)
        .expect("Invalid program");
    let actual = interpreter.run().expect("Execution failed");

    (expected, actual)
}

#[test]
fn test_precedence_and_associativity() {
    let cases = [
        ("2 + 3 * 4", 14),
        ("(2 + 3) * 4", 20),
        ("10 - 3 - 2", 5),
        ("10 - (3 - 2)", 9),
        ("100 / 10 / 5", 2),
        ("a * b + c", -9),
        ("a + b * c", -29),
        ("((a))", 7),
    ];
    for (expr, value) in cases {
        let (expected, actual) = both_ways(expr);
        assert_eq!(expected, value, "text value of {}", expr);
        assert_eq!(actual, Some(value), "TAC value of {}", expr);
    }
}

#[test]
fn test_text_evaluation() {
    assert_eq!(TextEval::evaluate("1 + 2 * 3 - 4"), 3);
    assert_eq!(TextEval::evaluate("8 / 2 / 2"), 2);
    assert_eq!(TextEval::evaluate("(c - a) * b"), -15);
}

#[test]
fn test_division_truncates_toward_zero() {
    assert_eq!(both_ways("a / 2"), (3, Some(3)));
    assert_eq!(both_ways("b / 2"), (-1, Some(-1)));
    assert_eq!(both_ways("0 - a / 2"), (-3, Some(-3)));
}

/// Small deterministic generator (64-bit LCG) so failures reproduce.
struct ExprGen(u64);

impl ExprGen {
    fn next(&mut self, bound: u64) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) % bound
    }

    fn leaf(&mut self) -> String {
        match self.next(4) {
            0 => "a".to_string(),
            1 => "b".to_string(),
            2 => "c".to_string(),
            _ => self.next(20).to_string(),
        }
    }

    fn operand(&mut self, depth: u32) -> String {
        let text = self.expr(depth);
        if text.len() > 2 && self.next(2) == 0 {
            format!("({})", text)
        } else {
            text
        }
    }

    fn expr(&mut self, depth: u32) -> String {
        if depth == 0 || self.next(3) == 0 {
            return self.leaf();
        }
        let lhs = self.operand(depth - 1);
        match self.next(4) {
            0 => format!("{} + {}", lhs, self.operand(depth - 1)),
            1 => format!("{} - {}", lhs, self.operand(depth - 1)),
            2 => format!("{} * {}", lhs, self.operand(depth - 1)),
            // Divisors are nonzero literals
            _ => format!("{} / {}", lhs, self.next(9) + 1),
        }
    }
}

#[test]
fn test_tac_matches_text_evaluation() {
    let mut exprs = ExprGen(0x5eed);
    for _ in 0..200 {
        let expr = exprs.expr(3);
        let (expected, actual) = both_ways(&expr);
        assert_eq!(actual, Some(expected), "mismatch for {}", expr);
    }
}
