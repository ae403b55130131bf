//! Batch runs: one machine over many tapes.
//!
//! Each tape is executed independently; the report keeps one entry per tape
//! in input order together with its verdict and why the run stopped.

use crate::core::{Halt, Symbol, Tape, Verdict};
use crate::engine::execute;
use crate::machine::Machine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Result of running one tape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchEntry {
    /// Tape content as supplied
    pub input: Vec<Symbol>,

    pub verdict: Verdict,

    /// Records in the computation
    pub records: usize,

    pub halt: Halt,

    pub final_state: String,
}

/// Outcome of a whole batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Unique report identifier
    pub id: Uuid,

    /// Machine type the batch ran on
    pub kind: String,

    pub started_at: DateTime<Utc>,

    pub finished_at: DateTime<Utc>,

    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    pub fn accepted(&self) -> usize {
        self.count(Verdict::Accepted)
    }

    pub fn rejected(&self) -> usize {
        self.count(Verdict::Rejected)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn count(&self, verdict: Verdict) -> usize {
        self.entries.iter().filter(|e| e.verdict == verdict).count()
    }
}

/// Execute every tape on `machine`, in order.
///
/// The machine is re-initialized before each tape, so entries do not affect
/// each other.
pub fn run_batch<M, I>(machine: &mut M, tapes: I) -> BatchReport
where
    M: Machine + ?Sized,
    I: IntoIterator<Item = Tape>,
{
    let started_at = Utc::now();
    let entries: Vec<BatchEntry> = tapes
        .into_iter()
        .map(|mut tape| {
            let computation = execute(&mut *machine, &mut tape);
            BatchEntry {
                input: tape.symbols().to_vec(),
                verdict: computation.verdict(),
                records: computation.len(),
                final_state: computation.final_state().to_string(),
                halt: computation.halt().clone(),
            }
        })
        .collect();

    let report = BatchReport {
        id: Uuid::new_v4(),
        kind: machine.kind().to_string(),
        started_at,
        finished_at: Utc::now(),
        entries,
    };

    info!(
        id = %report.id,
        kind = %report.kind,
        tapes = report.len(),
        accepted = report.accepted(),
        rejected = report.rejected(),
        "batch finished"
    );
    report
}
