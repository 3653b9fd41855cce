//! Three-address code instructions
//!
//! An instruction is an [`Opcode`] plus up to three optional [`Operand`]s
//! (`arg1`, `arg2`, `result`). The position of an instruction in its sequence
//! is its place in control flow: `LABEL`s mark jump targets, `IF`/`GOTO` jump
//! to them.
//!
//! # Rendering
//!
//! [`fmt::Display`] gives one diagnostic line per instruction:
//!
//! ```text
//! t0 = a + 2        binary:  result = arg1 op arg2
//! b = t0            copy:    result = arg1
//! IF t1 GOTO L2     branch:  IF arg1 GOTO result
//! GOTO L3           jump:    GOTO result
//! LABEL L2          marker:  LABEL result
//! RETURN b          return:  RETURN arg1
//! ```

use std::fmt;

/// Operation code of a TAC instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    // Comparison
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    // Control
    Copy,
    If,
    Goto,
    Label,
    Return,
}

impl Opcode {
    /// Map an operator symbol from the source (`+`, `<`, `==`, ...) to its opcode.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "+" => Opcode::Add,
            "-" => Opcode::Sub,
            "*" => Opcode::Mul,
            "/" => Opcode::Div,
            "<" => Opcode::Lt,
            "<=" => Opcode::Le,
            ">" => Opcode::Gt,
            ">=" => Opcode::Ge,
            "==" => Opcode::Eq,
            "!=" => Opcode::Ne,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Opcode::Add => "+",
            Opcode::Sub => "-",
            Opcode::Mul => "*",
            Opcode::Div => "/",
            Opcode::Lt => "<",
            Opcode::Le => "<=",
            Opcode::Gt => ">",
            Opcode::Ge => ">=",
            Opcode::Eq => "==",
            Opcode::Ne => "!=",
            Opcode::Copy => "=",
            Opcode::If => "IF",
            Opcode::Goto => "GOTO",
            Opcode::Label => "LABEL",
            Opcode::Return => "RETURN",
        }
    }

    /// Arithmetic and comparison operators: two sources, one destination.
    pub fn is_binary(self) -> bool {
        matches!(
            self,
            Opcode::Add
                | Opcode::Sub
                | Opcode::Mul
                | Opcode::Div
                | Opcode::Lt
                | Opcode::Le
                | Opcode::Gt
                | Opcode::Ge
                | Opcode::Eq
                | Opcode::Ne
        )
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Opcode::Lt | Opcode::Le | Opcode::Gt | Opcode::Ge | Opcode::Eq | Opcode::Ne
        )
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A value handle or jump target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    /// A name from the source program.
    Var(String),
    /// Literal text from the source program, e.g. `42`.
    Literal(String),
    /// Compiler temporary, rendered `t<n>`.
    Temp(usize),
    /// Jump target, rendered `L<n>`.
    Label(usize),
}

impl Operand {
    /// The numeric suffix of a temp or label.
    pub fn number(&self) -> Option<usize> {
        match self {
            Operand::Temp(n) | Operand::Label(n) => Some(*n),
            Operand::Var(_) | Operand::Literal(_) => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Var(name) => f.write_str(name),
            Operand::Literal(text) => f.write_str(text),
            Operand::Temp(n) => write!(f, "t{}", n),
            Operand::Label(n) => write!(f, "L{}", n),
        }
    }
}

/// One TAC instruction. Immutable once appended to a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TacInstruction {
    pub op: Opcode,
    pub arg1: Option<Operand>,
    pub arg2: Option<Operand>,
    pub result: Option<Operand>,
}

impl TacInstruction {
    pub fn binary(op: Opcode, lhs: Operand, rhs: Operand, dest: Operand) -> Self {
        Self {
            op,
            arg1: Some(lhs),
            arg2: Some(rhs),
            result: Some(dest),
        }
    }

    pub fn copy(src: Operand, dest: Operand) -> Self {
        Self {
            op: Opcode::Copy,
            arg1: Some(src),
            arg2: None,
            result: Some(dest),
        }
    }

    pub fn branch_if(cond: Operand, target: Operand) -> Self {
        Self {
            op: Opcode::If,
            arg1: Some(cond),
            arg2: None,
            result: Some(target),
        }
    }

    pub fn goto(target: Operand) -> Self {
        Self {
            op: Opcode::Goto,
            arg1: None,
            arg2: None,
            result: Some(target),
        }
    }

    pub fn label(label: Operand) -> Self {
        Self {
            op: Opcode::Label,
            arg1: None,
            arg2: None,
            result: Some(label),
        }
    }

    pub fn ret(value: Operand) -> Self {
        Self {
            op: Opcode::Return,
            arg1: Some(value),
            arg2: None,
            result: None,
        }
    }

    /// All present operands, in `arg1`, `arg2`, `result` order.
    pub fn operands(&self) -> impl Iterator<Item = &Operand> {
        [&self.arg1, &self.arg2, &self.result]
            .into_iter()
            .flatten()
    }
}

/// An optional operand field, rendered as `_` when empty.
struct Field<'a>(&'a Option<Operand>);

impl fmt::Display for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(operand) => write!(f, "{}", operand),
            None => f.write_str("_"),
        }
    }
}

impl fmt::Display for TacInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b, r) = (Field(&self.arg1), Field(&self.arg2), Field(&self.result));
        match self.op {
            op if op.is_binary() => write!(f, "{} = {} {} {}", r, a, op, b),
            Opcode::Copy => write!(f, "{} = {}", r, a),
            Opcode::If => write!(f, "IF {} GOTO {}", a, r),
            Opcode::Goto | Opcode::Label => write!(f, "{} {}", self.op, r),
            Opcode::Return => write!(f, "RETURN {}", a),
            _ => write!(f, "{} {} {} {}", self.op, a, b, r),
        }
    }
}
