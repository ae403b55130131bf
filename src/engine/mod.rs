//! Execution engine: drives a machine across a tape.
//!
//! [`execute`] runs to completion and returns an immutable [`Computation`].
//! [`Execution`] exposes the same loop one step at a time for callers that
//! want to observe the machine while it runs.
//!
//! Rejection is not an error. A symbol with no applicable transition, or a
//! final configuration that fails the acceptance test, both end in a
//! computation whose verdict is [`Verdict::Rejected`].

use crate::core::{Computation, ComputationRecord, Halt, Ledger, Outcome, StateId, Symbol, Tape, Verdict};
use crate::machine::Machine;
use tracing::{debug, debug_span, trace};

/// Engine-level run state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// Created, nothing read yet
    Idle,
    /// Initial record written, consuming input
    Running,
    /// Verdict reached; further steps do nothing
    Terminal(Verdict),
}

/// Result of executing a single step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// Machine initialized and the initial record written
    Started { state: StateId },

    /// A transition fired on `symbol`
    Moved {
        from: StateId,
        to: StateId,
        symbol: Symbol,
    },

    /// The run is over
    Halted(Verdict),
}

/// Fire the first applicable transition for `symbol` from the current state.
///
/// Returns `false` and leaves the machine unchanged when none applies.
pub fn next_transition<M: Machine + ?Sized>(machine: &mut M, symbol: &str) -> bool {
    machine.fire(symbol)
}

/// Run `machine` over `tape` and return the complete computation.
///
/// The machine is re-initialized and the tape rewound first, so repeated
/// calls with the same inputs produce identical computations.
///
/// # Example
///
/// ```rust
/// use autosim::builder::MachineBuilder;
/// use autosim::core::{Outcome, Tape, Verdict};
/// use autosim::engine::execute;
/// use autosim::machine::Transition;
///
/// let mut machine = MachineBuilder::new()
///     .states(["Q0", "Q1"])
///     .initial("Q0")
///     .finals(["Q1"])
///     .transition("Q0", Transition::simple("a", "Q1"))
///     .finite()
///     .unwrap();
///
/// let computation = execute(&mut machine, &mut Tape::from(vec!["a"]));
/// assert_eq!(computation.verdict(), Verdict::Accepted);
/// assert_eq!(computation.record(0).outcome, Outcome::Initial);
/// assert_eq!(computation.record(1).outcome, Outcome::Accepted);
/// ```
pub fn execute<M: Machine + ?Sized>(machine: &mut M, tape: &mut Tape) -> Computation {
    let span = debug_span!("execute", kind = %machine.kind(), tape_len = tape.len());
    let _entered = span.enter();
    Execution::new(machine, tape).finish()
}

/// One run of a machine over a tape, advanced step by step.
///
/// `Idle → Running → Terminal`. The first [`step`](Self::step) initializes
/// the machine and rewinds the tape; each later step consumes one symbol.
pub struct Execution<'a, M: Machine + ?Sized> {
    machine: &'a mut M,
    tape: &'a mut Tape,
    ledger: Ledger,
    status: RunStatus,
    halt: Option<Halt>,
}

impl<'a, M: Machine + ?Sized> Execution<'a, M> {
    pub fn new(machine: &'a mut M, tape: &'a mut Tape) -> Self {
        let stack_count = machine.kind().stack_count();
        Self {
            machine,
            tape,
            ledger: Ledger::new(stack_count),
            status: RunStatus::Idle,
            halt: None,
        }
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// The machine as of the last step.
    pub fn machine(&self) -> &M {
        self.machine
    }

    /// Records written so far.
    pub fn records_written(&self) -> usize {
        self.ledger.len()
    }

    /// Advance by one step.
    pub fn step(&mut self) -> StepResult {
        match self.status {
            RunStatus::Idle => self.start(),
            RunStatus::Running => self.advance(),
            RunStatus::Terminal(verdict) => StepResult::Halted(verdict),
        }
    }

    /// Run to the end and freeze the computation.
    pub fn finish(mut self) -> Computation {
        let verdict = loop {
            if let StepResult::Halted(verdict) = self.step() {
                break verdict;
            }
        };
        let halt = self
            .halt
            .take()
            .expect("a terminal run always records why it halted");

        debug!(
            %verdict,
            records = self.ledger.len(),
            state = self.machine.current_state(),
            ?halt,
            "run finished"
        );
        self.ledger.close(verdict, halt)
    }

    fn start(&mut self) -> StepResult {
        self.machine.init();
        self.tape.reset();

        let state = self.machine.current_state().to_string();
        self.ledger.push(
            ComputationRecord {
                from: state.clone(),
                to: state.clone(),
                symbol: None,
                position: 0,
                outcome: Outcome::Initial,
            },
            self.machine.stacks(),
        );
        self.status = RunStatus::Running;

        trace!(state = %state, "run started");
        StepResult::Started { state }
    }

    fn advance(&mut self) -> StepResult {
        let position = self.tape.position();
        let Some(symbol) = self.tape.read().map(str::to_string) else {
            let verdict = Verdict::from(self.machine.is_in_final_state());
            return self.terminate(verdict, Halt::Exhausted);
        };

        let from = self.machine.current_state().to_string();
        if !next_transition(&mut *self.machine, &symbol) {
            trace!(state = %from, symbol = %symbol, position, "no applicable transition");
            return self.terminate(Verdict::Rejected, Halt::Stuck { symbol, position });
        }

        let to = self.machine.current_state().to_string();
        trace!(from = %from, to = %to, symbol = %symbol, "transition fired");
        self.ledger.push(
            ComputationRecord {
                from: from.clone(),
                to: to.clone(),
                symbol: Some(symbol.clone()),
                position: self.tape.position(),
                outcome: Outcome::Running,
            },
            self.machine.stacks(),
        );

        StepResult::Moved { from, to, symbol }
    }

    fn terminate(&mut self, verdict: Verdict, halt: Halt) -> StepResult {
        self.status = RunStatus::Terminal(verdict);
        self.halt = Some(halt);
        StepResult::Halted(verdict)
    }
}
