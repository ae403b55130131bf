//! Autosim: deterministic finite and stack automata with replayable runs
//!
//! A machine is described once, validated once, and then executed over input
//! tapes. Each run produces an immutable [`Computation`]: one record per step
//! plus a snapshot of every stack at every record, so a viewer can move back
//! and forth through the run without executing anything again.
//!
//! # Core Concepts
//!
//! - **Machine**: a [`FiniteAutomaton`], [`OneStackMachine`] or
//!   [`TwoStackMachine`], all behind the [`Machine`] trait
//! - **Tape**: the input symbols, consumed left to right
//! - **Computation**: the replayable history of one run
//! - **Replay**: a cursor over a computation
//!
//! # Example
//!
//! ```rust
//! use autosim::builder::MachineBuilder;
//! use autosim::core::{StackOp, Tape};
//! use autosim::engine::execute;
//! use autosim::machine::{Acceptance, Transition};
//! use autosim::replay::Replay;
//!
//! let mut machine = MachineBuilder::new()
//!     .states(["Q0", "Q1"])
//!     .initial("Q0")
//!     .finals(["Q1"])
//!     .acceptance(Acceptance::FinalStateAndEmptyStacks)
//!     .transition("Q0", Transition::one_stack("a", StackOp::push("X"), "Q0"))
//!     .transition("Q0", Transition::one_stack("b", StackOp::pop("X"), "Q1"))
//!     .transition("Q1", Transition::one_stack("b", StackOp::pop("X"), "Q1"))
//!     .one_stack()
//!     .unwrap();
//!
//! let computation = execute(&mut machine, &mut Tape::from(vec!["a", "a", "b", "b"]));
//! assert!(computation.is_accepted());
//!
//! let mut replay = Replay::new(computation);
//! replay.seek(2);
//! assert_eq!(replay.frame().stacks[0], ["X", "X"]);
//! ```

pub mod batch;
pub mod builder;
pub mod core;
pub mod engine;
pub mod loader;
pub mod machine;
pub mod replay;

// Re-export commonly used types
pub use builder::MachineBuilder;
pub use core::{Computation, ComputationRecord, Outcome, Stack, StackOp, Tape, Verdict};
pub use engine::{execute, next_transition, Execution};
pub use loader::{load_path, load_str, LoadError};
pub use machine::{
    Acceptance, AnyMachine, FiniteAutomaton, Machine, MachineKind, OneStackMachine, Transition,
    TwoStackMachine,
};
pub use replay::{Replay, Session};
