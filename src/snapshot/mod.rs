// Snapshot management for stepping through TAC execution

use crate::tac::Operand;
use rustc_hash::FxHashMap;
use std::fmt;

/// A storage location written by TAC: a source variable or a temp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Var(String),
    Temp(usize),
}

impl Slot {
    /// The slot an operand names, if it names one at all.
    pub fn of(operand: &Operand) -> Option<Self> {
        match operand {
            Operand::Var(name) => Some(Slot::Var(name.clone())),
            Operand::Temp(n) => Some(Slot::Temp(*n)),
            Operand::Literal(_) | Operand::Label(_) => None,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Var(name) => f.write_str(name),
            Slot::Temp(n) => write!(f, "t{}", n),
        }
    }
}

/// Execution state captured before an instruction runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Index of the next instruction to execute (== len when execution fell off the end).
    pub pc: usize,
    pub bindings: FxHashMap<Slot, i64>,
    pub return_value: Option<i64>,
}

impl Snapshot {
    /// Bindings sorted by slot: variables by name, then temps by number.
    pub fn sorted_bindings(&self) -> Vec<(&Slot, i64)> {
        let mut entries: Vec<(&Slot, i64)> =
            self.bindings.iter().map(|(slot, value)| (slot, *value)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

/// Append-only history of snapshots with an upper bound.
#[derive(Debug, Clone)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    limit: usize,
}

impl SnapshotManager {
    pub fn new(limit: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            limit,
        }
    }

    /// Record a snapshot. Returns false (and records nothing) once the limit is reached.
    pub fn push(&mut self, snapshot: Snapshot) -> bool {
        if self.snapshots.len() >= self.limit {
            return false;
        }
        self.snapshots.push(snapshot);
        true
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
