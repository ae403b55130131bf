//! Core building blocks shared by every machine variant.
//!
//! - Symbols and the reserved markers
//! - The input [`Tape`] and the LIFO [`Stack`]
//! - [`StackOp`], the all-or-nothing stack discipline
//! - The immutable [`Computation`] history produced by a run

mod history;
mod stack;
mod stack_op;
mod symbol;
mod tape;

pub(crate) use history::Ledger;
pub use history::{Computation, ComputationRecord, Halt, HistoryError, Outcome, Verdict};
pub use stack::{Stack, StackSnapshot};
pub use stack_op::StackOp;
pub use symbol::{is_reserved, StateId, Symbol, EMPTY_WORD, END_OF_TAPE};
pub use tape::Tape;
