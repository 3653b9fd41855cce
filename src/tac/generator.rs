//! AST → TAC lowering
//!
//! [`TacGenerator`] walks the tree once, dispatching on [`NodeKind`].
//! Expression-shaped nodes hand a value [`Operand`] back to their caller;
//! statement-shaped nodes append instructions and hand back nothing.
//!
//! The generator trusts the parser's tree shapes but checks them anyway: a
//! malformed tree yields an [`InternalError`] rather than a panic.

use crate::parser::ast::{Node, NodeKind};
use crate::tac::instruction::{Opcode, Operand, TacInstruction};
use thiserror::Error;

/// The generator was handed a tree the parser could not have produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternalError {
    #[error("Internal error: node kind '{kind}' cannot be lowered on its own")]
    UnsupportedNode { kind: NodeKind },

    #[error("Internal error: '{kind}' node has {found} children, expected {expected}")]
    ChildCount {
        kind: NodeKind,
        expected: String,
        found: usize,
    },

    #[error("Internal error: child {index} of '{parent}' is '{found}', expected '{expected}'")]
    ChildKind {
        parent: NodeKind,
        index: usize,
        expected: NodeKind,
        found: NodeKind,
    },

    #[error("Internal error: '{kind}' node has no leaf text")]
    MissingLeaf { kind: NodeKind },

    #[error("Internal error: unknown operator '{symbol}'")]
    UnknownOperator { symbol: String },

    #[error("Internal error: '{kind}' node produced no value")]
    NoValue { kind: NodeKind },

    #[error("Internal error: tree nested deeper than {limit} levels")]
    TooDeep { limit: usize },
}

/// Recursion bound for [`TacGenerator::generate`]. Left-deep operator chains
/// are lowered iteratively and do not count towards it.
pub const MAX_LOWERING_DEPTH: usize = 512;

/// How temps and labels are numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterScheme {
    /// One counter mints both temps and labels (`t0`, `L1`, `L2`, `t3`, ...).
    #[default]
    Shared,
    /// Temps and labels count independently (`t0`, `L0`, `L1`, `t1`, ...).
    Split,
}

/// Generator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeneratorConfig {
    pub counters: CounterScheme,
    /// Value of the first minted number.
    pub first_index: usize,
}

/// Mints fresh temp and label numbers.
#[derive(Debug, Clone)]
struct NameSupply {
    scheme: CounterScheme,
    next_temp: usize,
    next_label: usize,
}

impl NameSupply {
    fn new(config: GeneratorConfig) -> Self {
        Self {
            scheme: config.counters,
            next_temp: config.first_index,
            next_label: config.first_index,
        }
    }

    fn temp(&mut self) -> Operand {
        let n = self.next_temp;
        self.next_temp += 1;
        Operand::Temp(n)
    }

    fn label(&mut self) -> Operand {
        let counter = match self.scheme {
            CounterScheme::Shared => &mut self.next_temp,
            CounterScheme::Split => &mut self.next_label,
        };
        let n = *counter;
        *counter += 1;
        Operand::Label(n)
    }
}

/// Tree-walking TAC generator. One instance per compilation unit.
#[derive(Debug, Clone)]
pub struct TacGenerator {
    instructions: Vec<TacInstruction>,
    names: NameSupply,
    depth: usize,
}

impl Default for TacGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TacGenerator {
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            instructions: Vec::new(),
            names: NameSupply::new(config),
            depth: 0,
        }
    }

    /// Lower `root` (normally the `program` node), appending to the sequence.
    pub fn generate(&mut self, root: &Node) -> Result<(), InternalError> {
        self.lower(root)?;
        log::debug!("generated {} instructions", self.instructions.len());
        Ok(())
    }

    pub fn instructions(&self) -> &[TacInstruction] {
        &self.instructions
    }

    pub fn into_instructions(self) -> Vec<TacInstruction> {
        self.instructions
    }

    fn emit(&mut self, instr: TacInstruction) {
        log::trace!("emit {}", instr);
        self.instructions.push(instr);
    }

    /// Lower one node. Returns the node's value handle, if it has one.
    fn lower(&mut self, node: &Node) -> Result<Option<Operand>, InternalError> {
        if self.depth >= MAX_LOWERING_DEPTH {
            return Err(InternalError::TooDeep {
                limit: MAX_LOWERING_DEPTH,
            });
        }
        self.depth += 1;
        let result = self.lower_node(node);
        self.depth -= 1;
        result
    }

    fn lower_node(&mut self, node: &Node) -> Result<Option<Operand>, InternalError> {
        match node.kind {
            NodeKind::Program | NodeKind::Function | NodeKind::Statements | NodeKind::Params => {
                for child in &node.children {
                    self.lower(child)?;
                }
                Ok(None)
            }
            NodeKind::Declaration => Ok(None),
            NodeKind::Assignment => {
                expect_children(node, 3)?;
                let target = leaf_text(child_of(node, 0, NodeKind::Identifier)?)?;
                let value = self.value_of(&node.children[2])?;
                self.emit(TacInstruction::copy(value, Operand::Var(target.to_string())));
                Ok(None)
            }
            NodeKind::ReturnStatement => {
                expect_children(node, 2)?;
                let value = self.value_of(&node.children[1])?;
                self.emit(TacInstruction::ret(value));
                Ok(None)
            }
            NodeKind::Expression | NodeKind::Term => self.lower_chain(node).map(Some),
            NodeKind::Condition => {
                expect_children(node, 3)?;
                let lhs = self.value_of(&node.children[0])?;
                self.lower_binary(node, lhs).map(Some)
            }
            NodeKind::IfStatement => {
                self.lower_if(node)?;
                Ok(None)
            }
            NodeKind::Identifier => Ok(Some(Operand::Var(leaf_text(node)?.to_string()))),
            NodeKind::Integer | NodeKind::Param | NodeKind::If => {
                Ok(Some(Operand::Literal(leaf_text(node)?.to_string())))
            }
            NodeKind::Type | NodeKind::Operator | NodeKind::Return => {
                Err(InternalError::UnsupportedNode { kind: node.kind })
            }
        }
    }

    /// Lower a node that must produce a value.
    fn value_of(&mut self, node: &Node) -> Result<Operand, InternalError> {
        self.lower(node)?
            .ok_or(InternalError::NoValue { kind: node.kind })
    }

    /// An `expression`/`term` chain. `a + b + c` parses left-deep, so the
    /// left spine is collected first and then lowered from the inside out:
    ///
    /// ```text
    /// t0 = a + b
    /// t1 = t0 + c
    /// ```
    fn lower_chain(&mut self, node: &Node) -> Result<Operand, InternalError> {
        let mut spine = Vec::new();
        let mut innermost = node;

        while matches!(innermost.kind, NodeKind::Expression | NodeKind::Term) {
            match innermost.children.len() {
                1 => {}
                3 => spine.push(innermost),
                found => {
                    return Err(InternalError::ChildCount {
                        kind: innermost.kind,
                        expected: "1 or 3".to_string(),
                        found,
                    })
                }
            }
            innermost = &innermost.children[0];
        }

        let mut value = self.value_of(innermost)?;
        for level in spine.into_iter().rev() {
            value = self.lower_binary(level, value)?;
        }
        Ok(value)
    }

    /// `[_, operator, rhs]` with `lhs` already lowered → `tN = lhs op rhs`, returning `tN`.
    fn lower_binary(&mut self, node: &Node, lhs: Operand) -> Result<Operand, InternalError> {
        let symbol = leaf_text(child_of(node, 1, NodeKind::Operator)?)?;
        let op = Opcode::from_symbol(symbol).ok_or_else(|| InternalError::UnknownOperator {
            symbol: symbol.to_string(),
        })?;
        let rhs = self.value_of(&node.children[2])?;

        let dest = self.names.temp();
        self.emit(TacInstruction::binary(op, lhs, rhs, dest.clone()));
        Ok(dest)
    }

    /// `[if, condition, statements]`:
    ///
    /// ```text
    /// tC = a < b
    /// IF tC GOTO Ltrue
    /// GOTO Lend
    /// LABEL Ltrue
    /// <body>
    /// LABEL Lend
    /// ```
    fn lower_if(&mut self, node: &Node) -> Result<(), InternalError> {
        expect_children(node, 3)?;
        let cond = self.value_of(child_of(node, 1, NodeKind::Condition)?)?;
        let body = child_of(node, 2, NodeKind::Statements)?;

        let true_label = self.names.label();
        let end_label = self.names.label();

        self.emit(TacInstruction::branch_if(cond, true_label.clone()));
        self.emit(TacInstruction::goto(end_label.clone()));
        self.emit(TacInstruction::label(true_label));
        for stmt in &body.children {
            self.lower(stmt)?;
        }
        self.emit(TacInstruction::label(end_label));
        Ok(())
    }
}

fn expect_children(node: &Node, count: usize) -> Result<(), InternalError> {
    if node.children.len() == count {
        Ok(())
    } else {
        Err(InternalError::ChildCount {
            kind: node.kind,
            expected: count.to_string(),
            found: node.children.len(),
        })
    }
}

fn child_of(parent: &Node, index: usize, expected: NodeKind) -> Result<&Node, InternalError> {
    let child = parent
        .child(index)
        .ok_or_else(|| InternalError::ChildCount {
            kind: parent.kind,
            expected: format!("at least {}", index + 1),
            found: parent.children.len(),
        })?;
    if child.kind != expected {
        return Err(InternalError::ChildKind {
            parent: parent.kind,
            index,
            expected,
            found: child.kind,
        });
    }
    Ok(child)
}

fn leaf_text(node: &Node) -> Result<&str, InternalError> {
    node.leaf()
        .ok_or(InternalError::MissingLeaf { kind: node.kind })
}
