//! Step-by-step viewing of a finished computation.
//!
//! A [`Replay`] is a cursor over an immutable [`Computation`]. Moving it is
//! pure indexing; the machine that produced the computation is never touched.
//! [`Session`] pairs a machine with the replay of its latest run.

use crate::core::{Computation, ComputationRecord, Outcome, Symbol, Tape};
use crate::engine::execute;
use crate::machine::Machine;

/// Everything a viewer shows for one record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame<'a> {
    pub index: usize,
    pub record: &'a ComputationRecord,
    /// Each stack's content as of this record, top first
    pub stacks: Vec<&'a [Symbol]>,
}

impl Frame<'_> {
    /// Tape cells consumed as of this record.
    pub fn tape_position(&self) -> usize {
        self.record.position
    }

    pub fn outcome(&self) -> Outcome {
        self.record.outcome
    }
}

/// Cursor over a computation, clamped to its records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replay {
    computation: Computation,
    cursor: usize,
}

impl Replay {
    /// Start at record 0.
    pub fn new(computation: Computation) -> Self {
        Self {
            computation,
            cursor: 0,
        }
    }

    pub fn computation(&self) -> &Computation {
        &self.computation
    }

    pub fn index(&self) -> usize {
        self.cursor
    }

    pub fn is_at_start(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor == self.computation.last_index()
    }

    /// Move one record forward, staying on the last one.
    pub fn step_forward(&mut self) -> Frame<'_> {
        if self.cursor < self.computation.last_index() {
            self.cursor += 1;
        }
        self.frame()
    }

    /// Move one record back, staying on the first one.
    pub fn step_back(&mut self) -> Frame<'_> {
        self.cursor = self.cursor.saturating_sub(1);
        self.frame()
    }

    /// Jump to `index`, clamped to the last record.
    pub fn seek(&mut self, index: usize) -> Frame<'_> {
        self.cursor = index.min(self.computation.last_index());
        self.frame()
    }

    pub fn rewind(&mut self) -> Frame<'_> {
        self.seek(0)
    }

    /// The frame under the cursor.
    pub fn frame(&self) -> Frame<'_> {
        let index = self.cursor;
        Frame {
            index,
            record: self.computation.record(index),
            stacks: (0..self.computation.stack_count())
                .map(|stack| self.computation.stack_snapshot(stack, index))
                .collect(),
        }
    }

    pub fn into_computation(self) -> Computation {
        self.computation
    }
}

impl From<Computation> for Replay {
    fn from(computation: Computation) -> Self {
        Self::new(computation)
    }
}

/// A machine together with the replay of its most recent run.
///
/// Each [`run`](Session::run) discards the previous computation and puts the
/// cursor back on record 0.
#[derive(Clone, Debug)]
pub struct Session<M: Machine> {
    machine: M,
    replay: Option<Replay>,
}

impl<M: Machine> Session<M> {
    pub fn new(machine: M) -> Self {
        Self {
            machine,
            replay: None,
        }
    }

    pub fn machine(&self) -> &M {
        &self.machine
    }

    /// Execute `tape` and replace the current replay with the new run.
    pub fn run(&mut self, tape: &mut Tape) -> &mut Replay {
        let computation = execute(&mut self.machine, tape);
        self.replay.insert(Replay::new(computation))
    }

    /// Replay of the latest run, if any.
    pub fn replay(&self) -> Option<&Replay> {
        self.replay.as_ref()
    }

    pub fn replay_mut(&mut self) -> Option<&mut Replay> {
        self.replay.as_mut()
    }

    pub fn into_machine(self) -> M {
        self.machine
    }
}
