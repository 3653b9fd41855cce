// Execution engine for TAC sequences

use crate::interpreter::errors::RuntimeError;
use crate::snapshot::{Slot, Snapshot, SnapshotManager};
use crate::tac::{Opcode, Operand, TacInstruction};
use rustc_hash::FxHashMap;

/// Default bound on recorded snapshots (and therefore executed instructions).
pub const DEFAULT_SNAPSHOT_LIMIT: usize = 10_000;

/// Executes a TAC sequence and keeps a navigable snapshot history
pub struct Interpreter {
    /// The instruction sequence being executed
    program: Vec<TacInstruction>,

    /// Label number -> index of its `LABEL` instruction
    labels: FxHashMap<usize, usize>,

    /// Initial bindings (values for `main` parameters)
    inputs: FxHashMap<Slot, i64>,

    /// Snapshot manager for stepping backward and forward
    snapshot_manager: SnapshotManager,

    /// Current position in execution history
    history_position: usize,

    /// Whether `run` has completed (successfully or not)
    finished: bool,
}

impl Interpreter {
    /// Create an interpreter for `program`, seeding the given input bindings.
    pub fn new(
        program: Vec<TacInstruction>,
        inputs: impl IntoIterator<Item = (String, i64)>,
        snapshot_limit: usize,
    ) -> Result<Self, RuntimeError> {
        let mut labels = FxHashMap::default();

        for (pc, instr) in program.iter().enumerate() {
            if instr.op != Opcode::Label {
                continue;
            }
            match &instr.result {
                Some(Operand::Label(n)) => {
                    if labels.insert(*n, pc).is_some() {
                        return Err(RuntimeError::DuplicateLabel {
                            label: Operand::Label(*n).to_string(),
                        });
                    }
                }
                Some(other) => {
                    return Err(RuntimeError::InvalidOperand {
                        operand: other.to_string(),
                        pc,
                    })
                }
                None => return Err(RuntimeError::MissingOperand { op: "LABEL", pc }),
            }
        }

        let inputs = inputs
            .into_iter()
            .map(|(name, value)| (Slot::Var(name), value))
            .collect();

        Ok(Self {
            program,
            labels,
            inputs,
            snapshot_manager: SnapshotManager::new(snapshot_limit),
            history_position: 0,
            finished: false,
        })
    }

    /// Execute from the first instruction until `RETURN` or the end of the sequence.
    ///
    /// Returns the value of the executed `RETURN`, or `None` if execution fell off
    /// the end. On error the history recorded so far is kept.
    pub fn run(&mut self) -> Result<Option<i64>, RuntimeError> {
        self.snapshot_manager.clear();
        self.history_position = 0;
        self.finished = false;

        let mut state = Snapshot {
            pc: 0,
            bindings: self.inputs.clone(),
            return_value: None,
        };

        let result = loop {
            if let Err(e) = self.record(&state) {
                break Err(e);
            }
            if state.return_value.is_some() || state.pc >= self.program.len() {
                break Ok(state.return_value);
            }
            if let Err(e) = self.execute(&mut state) {
                log::debug!("execution stopped: {}", e);
                break Err(e);
            }
        };

        self.finished = true;
        self.history_position = self.snapshot_manager.len().saturating_sub(1);
        log::debug!(
            "recorded {} snapshots, result {:?}",
            self.snapshot_manager.len(),
            result
        );
        result
    }

    fn record(&mut self, state: &Snapshot) -> Result<(), RuntimeError> {
        if self.snapshot_manager.push(state.clone()) {
            Ok(())
        } else {
            Err(RuntimeError::SnapshotLimitExceeded {
                limit: self.snapshot_manager.limit(),
            })
        }
    }

    /// Execute the instruction at `state.pc`, updating `state` in place.
    fn execute(&self, state: &mut Snapshot) -> Result<(), RuntimeError> {
        let pc = state.pc;
        let instr = &self.program[pc];
        log::trace!("exec {}: {}", pc, instr);

        match instr.op {
            Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Div
            | Opcode::Lt
            | Opcode::Le
            | Opcode::Gt
            | Opcode::Ge
            | Opcode::Eq
            | Opcode::Ne => {
                let lhs = self.read(state, required(&instr.arg1, instr.op, pc)?, pc)?;
                let rhs = self.read(state, required(&instr.arg2, instr.op, pc)?, pc)?;
                let value = apply(instr.op, lhs, rhs, pc)?;
                self.write(state, required(&instr.result, instr.op, pc)?, value, pc)?;
                state.pc += 1;
            }
            Opcode::Copy => {
                let value = self.read(state, required(&instr.arg1, instr.op, pc)?, pc)?;
                self.write(state, required(&instr.result, instr.op, pc)?, value, pc)?;
                state.pc += 1;
            }
            Opcode::If => {
                let cond = self.read(state, required(&instr.arg1, instr.op, pc)?, pc)?;
                state.pc = if cond != 0 {
                    self.jump_target(required(&instr.result, instr.op, pc)?, pc)?
                } else {
                    pc + 1
                };
            }
            Opcode::Goto => {
                state.pc = self.jump_target(required(&instr.result, instr.op, pc)?, pc)?;
            }
            Opcode::Label => {
                state.pc += 1;
            }
            Opcode::Return => {
                let value = self.read(state, required(&instr.arg1, instr.op, pc)?, pc)?;
                state.return_value = Some(value);
            }
        }

        Ok(())
    }

    fn read(&self, state: &Snapshot, operand: &Operand, pc: usize) -> Result<i64, RuntimeError> {
        match operand {
            Operand::Literal(text) => text.parse().map_err(|_| RuntimeError::InvalidLiteral {
                text: text.clone(),
                pc,
            }),
            Operand::Label(_) => Err(RuntimeError::InvalidOperand {
                operand: operand.to_string(),
                pc,
            }),
            Operand::Var(_) | Operand::Temp(_) => {
                let slot = Slot::of(operand).ok_or_else(|| RuntimeError::InvalidOperand {
                    operand: operand.to_string(),
                    pc,
                })?;
                state
                    .bindings
                    .get(&slot)
                    .copied()
                    .ok_or_else(|| RuntimeError::UnboundVariable {
                        name: slot.to_string(),
                        pc,
                    })
            }
        }
    }

    fn write(
        &self,
        state: &mut Snapshot,
        operand: &Operand,
        value: i64,
        pc: usize,
    ) -> Result<(), RuntimeError> {
        let slot = Slot::of(operand).ok_or_else(|| RuntimeError::InvalidOperand {
            operand: operand.to_string(),
            pc,
        })?;
        state.bindings.insert(slot, value);
        Ok(())
    }

    fn jump_target(&self, operand: &Operand, pc: usize) -> Result<usize, RuntimeError> {
        match operand {
            Operand::Label(n) => self
                .labels
                .get(n)
                .copied()
                .ok_or_else(|| RuntimeError::UnknownLabel {
                    label: operand.to_string(),
                    pc,
                }),
            _ => Err(RuntimeError::InvalidOperand {
                operand: operand.to_string(),
                pc,
            }),
        }
    }

    // ===== History navigation =====

    pub fn step_forward(&mut self) -> Result<(), RuntimeError> {
        if self.history_position + 1 < self.snapshot_manager.len() {
            self.history_position += 1;
            Ok(())
        } else {
            Err(RuntimeError::HistoryBoundary {
                message: "Already at the last step".to_string(),
            })
        }
    }

    pub fn step_backward(&mut self) -> Result<(), RuntimeError> {
        if self.history_position > 0 {
            self.history_position -= 1;
            Ok(())
        } else {
            Err(RuntimeError::HistoryBoundary {
                message: "Already at the first step".to_string(),
            })
        }
    }

    pub fn rewind_to_start(&mut self) -> Result<(), RuntimeError> {
        if self.snapshot_manager.is_empty() {
            return Err(RuntimeError::HistoryBoundary {
                message: "No execution history".to_string(),
            });
        }
        self.history_position = 0;
        Ok(())
    }

    pub fn jump_to_end(&mut self) -> Result<(), RuntimeError> {
        if self.snapshot_manager.is_empty() {
            return Err(RuntimeError::HistoryBoundary {
                message: "No execution history".to_string(),
            });
        }
        self.history_position = self.snapshot_manager.len() - 1;
        Ok(())
    }

    // ===== Accessors =====

    pub fn instructions(&self) -> &[TacInstruction] {
        &self.program
    }

    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        self.snapshot_manager.get(self.history_position)
    }

    /// The snapshot one step before the current one, if any.
    pub fn previous_snapshot(&self) -> Option<&Snapshot> {
        self.history_position
            .checked_sub(1)
            .and_then(|index| self.snapshot_manager.get(index))
    }

    pub fn history_position(&self) -> usize {
        self.history_position
    }

    pub fn total_snapshots(&self) -> usize {
        self.snapshot_manager.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

fn required(operand: &Option<Operand>, op: Opcode, pc: usize) -> Result<&Operand, RuntimeError> {
    operand.as_ref().ok_or(RuntimeError::MissingOperand {
        op: op.symbol(),
        pc,
    })
}

fn apply(op: Opcode, lhs: i64, rhs: i64, pc: usize) -> Result<i64, RuntimeError> {
    let overflow = || RuntimeError::IntegerOverflow {
        operation: format!("{} {} {}", lhs, op, rhs),
        pc,
    };

    match op {
        Opcode::Add => lhs.checked_add(rhs).ok_or_else(overflow),
        Opcode::Sub => lhs.checked_sub(rhs).ok_or_else(overflow),
        Opcode::Mul => lhs.checked_mul(rhs).ok_or_else(overflow),
        Opcode::Div => {
            if rhs == 0 {
                return Err(RuntimeError::DivisionByZero { pc });
            }
            lhs.checked_div(rhs).ok_or_else(overflow)
        }
        Opcode::Lt => Ok(i64::from(lhs < rhs)),
        Opcode::Le => Ok(i64::from(lhs <= rhs)),
        Opcode::Gt => Ok(i64::from(lhs > rhs)),
        Opcode::Ge => Ok(i64::from(lhs >= rhs)),
        Opcode::Eq => Ok(i64::from(lhs == rhs)),
        Opcode::Ne => Ok(i64::from(lhs != rhs)),
        Opcode::Copy | Opcode::If | Opcode::Goto | Opcode::Label | Opcode::Return => {
            Err(RuntimeError::InvalidOperand {
                operand: op.symbol().to_string(),
                pc,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::compile;
    use crate::tac::GeneratorConfig;
    use test_log::test;

    fn interpreter(source: &str, inputs: &[(&str, i64)]) -> Interpreter {
        let unit = compile(source, GeneratorConfig::default()).unwrap();
        Interpreter::new(
            unit.instructions,
            inputs.iter().map(|(n, v)| (n.to_string(), *v)),
            DEFAULT_SNAPSHOT_LIMIT,
        )
        .unwrap()
    }

    #[test]
    fn test_straight_line() {
        let mut interp = interpreter(
            "int main(int a){ int b; b = a + 2; return b * 3; }",
            &[("a", 5)],
        );
        assert_eq!(interp.run(), Ok(Some(21)));
        // t0 = a + 2, b = t0, t1 = b * 3, RETURN t1, plus the initial snapshot
        assert_eq!(interp.total_snapshots(), 5);
        assert!(interp.is_finished());
    }

    #[test]
    fn test_if_taken_and_not_taken() {
        let source = "int main(int x, int y){ z = 0; if (x < y) { z = 1; } return z; }";
        assert_eq!(interpreter(source, &[("x", 1), ("y", 2)]).run(), Ok(Some(1)));
        assert_eq!(interpreter(source, &[("x", 3), ("y", 2)]).run(), Ok(Some(0)));
    }

    #[test]
    fn test_division_truncates_toward_zero() {
        let mut interp = interpreter("int main(int a){ return a / 2; }", &[("a", -7)]);
        assert_eq!(interp.run(), Ok(Some(-3)));
    }

    #[test]
    fn test_division_by_zero() {
        let mut interp = interpreter("int main(int a){ return 1 / a; }", &[("a", 0)]);
        assert_eq!(interp.run(), Err(RuntimeError::DivisionByZero { pc: 0 }));
        // the snapshot before the failing instruction is kept
        assert_eq!(interp.total_snapshots(), 1);
    }

    #[test]
    fn test_unbound_variable() {
        let mut interp = interpreter("int main(){ int b; return b; }", &[]);
        assert_eq!(
            interp.run(),
            Err(RuntimeError::UnboundVariable {
                name: "b".to_string(),
                pc: 0
            })
        );
    }

    #[test]
    fn test_overflow() {
        let mut interp = interpreter(
            "int main(int a){ return a * a; }",
            &[("a", i64::MAX)],
        );
        assert!(matches!(
            interp.run(),
            Err(RuntimeError::IntegerOverflow { pc: 0, .. })
        ));
    }

    #[test]
    fn test_snapshot_limit() {
        let unit = compile(
            "int main(){ a = 1; b = 2; c = 3; return a; }",
            GeneratorConfig::default(),
        )
        .unwrap();
        let mut interp = Interpreter::new(unit.instructions, Vec::new(), 2).unwrap();
        assert_eq!(
            interp.run(),
            Err(RuntimeError::SnapshotLimitExceeded { limit: 2 })
        );
    }

    #[test]
    fn test_falling_off_the_end_returns_none() {
        let program = vec![TacInstruction::copy(
            Operand::Literal("4".into()),
            Operand::Var("x".into()),
        )];
        let mut interp = Interpreter::new(program, Vec::new(), 10).unwrap();
        assert_eq!(interp.run(), Ok(None));
        let last = interp.current_snapshot().unwrap();
        assert_eq!(last.bindings.get(&Slot::Var("x".into())), Some(&4));
    }

    #[test]
    fn test_duplicate_and_unknown_labels() {
        let duplicate = vec![
            TacInstruction::label(Operand::Label(1)),
            TacInstruction::label(Operand::Label(1)),
        ];
        assert!(matches!(
            Interpreter::new(duplicate, Vec::new(), 10),
            Err(RuntimeError::DuplicateLabel { .. })
        ));

        let unknown = vec![TacInstruction::goto(Operand::Label(9))];
        let mut interp = Interpreter::new(unknown, Vec::new(), 10).unwrap();
        assert_eq!(
            interp.run(),
            Err(RuntimeError::UnknownLabel {
                label: "L9".to_string(),
                pc: 0
            })
        );
    }

    #[test]
    fn test_history_navigation() {
        let mut interp = interpreter("int main(){ a = 1; a = a + 1; return a; }", &[]);
        assert_eq!(interp.run(), Ok(Some(2)));

        interp.rewind_to_start().unwrap();
        assert_eq!(interp.history_position(), 0);
        assert!(interp.step_backward().is_err());

        interp.step_forward().unwrap();
        let after_first = interp.current_snapshot().unwrap();
        assert_eq!(after_first.bindings.get(&Slot::Var("a".into())), Some(&1));

        interp.jump_to_end().unwrap();
        assert!(interp.step_forward().is_err());
        interp.step_backward().unwrap();
        let before_return = interp.current_snapshot().unwrap();
        assert_eq!(before_return.return_value, None);
        assert_eq!(before_return.bindings.get(&Slot::Var("a".into())), Some(&2));
    }
}
