//! Computation history: the replayable record of one run.
//!
//! A [`Computation`] is written once by the engine and is immutable after
//! that. Viewers move through it by index; nothing in here re-executes the
//! machine.

use super::stack::{Stack, StackSnapshot};
use super::symbol::{StateId, Symbol};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Tag carried by every record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Initial,
    Running,
    Accepted,
    Rejected,
}

impl Outcome {
    /// Whether this tag closes a computation.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Initial => "INITIAL",
            Self::Running => "RUNNING",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
        };
        f.write_str(tag)
    }
}

/// Final verdict of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Accepted,
    Rejected,
}

impl From<Verdict> for Outcome {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Accepted => Outcome::Accepted,
            Verdict::Rejected => Outcome::Rejected,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Outcome::from(*self), f)
    }
}

impl From<bool> for Verdict {
    fn from(accepted: bool) -> Self {
        if accepted {
            Verdict::Accepted
        } else {
            Verdict::Rejected
        }
    }
}

/// Why a run stopped consuming input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Halt {
    /// The whole tape was read; the verdict came from the acceptance test.
    Exhausted,
    /// No transition applied to `symbol`, the tape cell at `position`.
    Stuck { symbol: Symbol, position: usize },
}

/// One step of a computation.
///
/// The initial record has `from == to` and no symbol. Every other record is a
/// transition that fired on `symbol`; `position` counts the tape cells
/// consumed once the record was written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputationRecord {
    /// State before the step
    pub from: StateId,
    /// State after the step
    pub to: StateId,
    /// Symbol consumed by the step
    pub symbol: Option<Symbol>,
    /// Tape cells consumed after the step
    pub position: usize,
    pub outcome: Outcome,
}

/// Complete, immutable trace of one run.
///
/// Records and stack snapshots share one cadence: for every stack `i`,
/// `snapshots(i).len() == records().len()`, and `stack_snapshot(i, k)` is the
/// content of stack `i` as of record `k`.
///
/// The verdict is stamped on the last record. Index 0 is tagged
/// [`Outcome::Initial`] unless the run fired no transition at all, in which
/// case the single record carries the verdict.
///
/// Deserializing checks the same shape the engine guarantees and fails with
/// a [`HistoryError`] otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawComputation")]
pub struct Computation {
    records: Vec<ComputationRecord>,
    snapshots: Vec<Vec<StackSnapshot>>,
    halt: Halt,
}

/// A serialized computation that does not have the shape of a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("computation has no records")]
    Empty,

    #[error("stack {stack} has {snapshots} snapshots for {records} records")]
    SnapshotCadence {
        stack: usize,
        snapshots: usize,
        records: usize,
    },

    #[error("last record carries {0} instead of a verdict")]
    Unsettled(Outcome),
}

#[derive(Deserialize)]
struct RawComputation {
    records: Vec<ComputationRecord>,
    snapshots: Vec<Vec<StackSnapshot>>,
    halt: Halt,
}

impl TryFrom<RawComputation> for Computation {
    type Error = HistoryError;

    fn try_from(raw: RawComputation) -> Result<Self, Self::Error> {
        let last = raw.records.last().ok_or(HistoryError::Empty)?;
        if !last.outcome.is_terminal() {
            return Err(HistoryError::Unsettled(last.outcome));
        }
        if let Some((stack, history)) = raw
            .snapshots
            .iter()
            .enumerate()
            .find(|(_, history)| history.len() != raw.records.len())
        {
            return Err(HistoryError::SnapshotCadence {
                stack,
                snapshots: history.len(),
                records: raw.records.len(),
            });
        }

        Ok(Self {
            records: raw.records,
            snapshots: raw.snapshots,
            halt: raw.halt,
        })
    }
}

impl Computation {
    /// All records in order.
    pub fn records(&self) -> &[ComputationRecord] {
        &self.records
    }

    /// Record at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn record(&self, index: usize) -> &ComputationRecord {
        &self.records[index]
    }

    pub fn get(&self, index: usize) -> Option<&ComputationRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false: the engine and deserialization both require a record.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Index of the last record.
    pub fn last_index(&self) -> usize {
        self.records.len().saturating_sub(1)
    }

    pub fn verdict(&self) -> Verdict {
        match self.records.last().map(|r| r.outcome) {
            Some(Outcome::Accepted) => Verdict::Accepted,
            _ => Verdict::Rejected,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.verdict() == Verdict::Accepted
    }

    pub fn halt(&self) -> &Halt {
        &self.halt
    }

    /// State the machine ended in.
    pub fn final_state(&self) -> &str {
        self.records.last().map_or("", |r| r.to.as_str())
    }

    /// Number of stacks snapshotted (0, 1 or 2).
    pub fn stack_count(&self) -> usize {
        self.snapshots.len()
    }

    /// Every snapshot of stack `stack`, one per record.
    ///
    /// # Panics
    ///
    /// Panics if `stack >= stack_count()`.
    pub fn snapshots(&self, stack: usize) -> &[StackSnapshot] {
        &self.snapshots[stack]
    }

    /// Contents of stack `stack` as of record `index`, top first.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn stack_snapshot(&self, stack: usize, index: usize) -> &[Symbol] {
        &self.snapshots[stack][index]
    }

    /// States visited, starting with the initial state.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.records.len());
        if let Some(first) = self.records.first() {
            path.push(first.from.as_str());
        }
        for record in self.records.iter().skip(1) {
            path.push(record.to.as_str());
        }
        path
    }

    /// Symbols consumed by fired transitions, in order.
    pub fn consumed(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter_map(|r| r.symbol.as_deref())
            .collect()
    }
}

/// Append-only builder for a [`Computation`], owned by one run.
#[derive(Debug)]
pub(crate) struct Ledger {
    records: Vec<ComputationRecord>,
    snapshots: Vec<Vec<StackSnapshot>>,
}

impl Ledger {
    pub(crate) fn new(stack_count: usize) -> Self {
        Self {
            records: Vec::new(),
            snapshots: vec![Vec::new(); stack_count],
        }
    }

    /// Append a record together with a snapshot of every stack.
    pub(crate) fn push(&mut self, record: ComputationRecord, stacks: &[Stack]) {
        assert_eq!(
            stacks.len(),
            self.snapshots.len(),
            "stack count is fixed for the lifetime of a run"
        );
        self.records.push(record);
        for (history, stack) in self.snapshots.iter_mut().zip(stacks) {
            history.push(stack.snapshot());
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    /// Stamp the verdict on the last record and freeze the ledger.
    pub(crate) fn close(mut self, verdict: Verdict, halt: Halt) -> Computation {
        let last = self
            .records
            .last_mut()
            .expect("the initial record is written before a run can close");
        last.outcome = verdict.into();

        Computation {
            records: self.records,
            snapshots: self.snapshots,
            halt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(from: &str, to: &str, symbol: Option<&str>, position: usize) -> ComputationRecord {
        ComputationRecord {
            from: from.to_string(),
            to: to.to_string(),
            symbol: symbol.map(str::to_string),
            position,
            outcome: if symbol.is_some() {
                Outcome::Running
            } else {
                Outcome::Initial
            },
        }
    }

    fn sample() -> Computation {
        let mut stack = Stack::new();
        let mut ledger = Ledger::new(1);
        ledger.push(record("Q0", "Q0", None, 0), std::slice::from_ref(&stack));

        stack.push("X");
        ledger.push(record("Q0", "Q0", Some("a"), 1), std::slice::from_ref(&stack));

        stack.pop();
        ledger.push(record("Q0", "Q1", Some("b"), 2), std::slice::from_ref(&stack));

        ledger.close(Verdict::Accepted, Halt::Exhausted)
    }

    #[test]
    fn close_stamps_verdict_on_last_record() {
        let computation = sample();

        assert_eq!(computation.len(), 3);
        assert_eq!(computation.record(0).outcome, Outcome::Initial);
        assert_eq!(computation.record(1).outcome, Outcome::Running);
        assert_eq!(computation.record(2).outcome, Outcome::Accepted);
        assert!(computation.is_accepted());
    }

    #[test]
    fn single_record_carries_the_verdict() {
        let mut ledger = Ledger::new(0);
        ledger.push(record("Q0", "Q0", None, 0), &[]);
        let computation = ledger.close(Verdict::Rejected, Halt::Exhausted);

        assert_eq!(computation.len(), 1);
        assert_eq!(computation.record(0).outcome, Outcome::Rejected);
        assert_eq!(computation.verdict(), Verdict::Rejected);
    }

    #[test]
    fn snapshots_follow_record_cadence() {
        let computation = sample();

        assert_eq!(computation.stack_count(), 1);
        assert_eq!(computation.snapshots(0).len(), computation.len());
        assert!(computation.stack_snapshot(0, 0).is_empty());
        assert_eq!(computation.stack_snapshot(0, 1), ["X"]);
        assert!(computation.stack_snapshot(0, 2).is_empty());
    }

    #[test]
    fn path_lists_visited_states() {
        let computation = sample();
        assert_eq!(computation.path(), vec!["Q0", "Q0", "Q1"]);
        assert_eq!(computation.consumed(), vec!["a", "b"]);
        assert_eq!(computation.final_state(), "Q1");
    }

    #[test]
    fn reading_is_repeatable() {
        let computation = sample();
        let first = computation.record(1).clone();
        let _ = computation.record(2);
        assert_eq!(computation.record(1), &first);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_record_panics() {
        sample().record(3);
    }

    #[test]
    fn outcome_tags_render_uppercase() {
        assert_eq!(Outcome::Initial.to_string(), "INITIAL");
        assert_eq!(Outcome::Rejected.to_string(), "REJECTED");
        assert!(Outcome::Accepted.is_terminal());
        assert!(!Outcome::Running.is_terminal());
        assert_eq!(Verdict::Accepted.to_string(), "ACCEPTED");
    }

    #[test]
    fn computation_serializes_correctly() {
        let computation = sample();
        let json = serde_json::to_string(&computation).unwrap();
        assert!(json.contains("\"ACCEPTED\""));

        let back: Computation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, computation);
    }

    #[test]
    fn deserializing_rejects_snapshots_out_of_step() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["snapshots"] = serde_json::json!([[]]);

        let err = serde_json::from_value::<Computation>(value).unwrap_err();
        assert!(err.to_string().contains("stack 0 has 0 snapshots for 3 records"));
    }

    #[test]
    fn deserializing_rejects_an_empty_computation() {
        let json = r#"{"records":[],"snapshots":[],"halt":"exhausted"}"#;

        let err = serde_json::from_str::<Computation>(json).unwrap_err();
        assert!(err.to_string().contains("computation has no records"));
    }

    #[test]
    fn deserializing_rejects_a_run_without_verdict() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["records"][2]["outcome"] = serde_json::json!("RUNNING");

        let err = serde_json::from_value::<Computation>(value).unwrap_err();
        assert!(err.to_string().contains("instead of a verdict"));
    }

    #[test]
    fn halt_records_stuck_symbol() {
        let mut ledger = Ledger::new(0);
        ledger.push(record("Q0", "Q0", None, 0), &[]);
        let computation = ledger.close(
            Verdict::Rejected,
            Halt::Stuck {
                symbol: "b".to_string(),
                position: 0,
            },
        );

        assert_eq!(
            computation.halt(),
            &Halt::Stuck {
                symbol: "b".to_string(),
                position: 0
            }
        );
    }
}
