//! Machine variants and the capability trait they share.
//!
//! Three concrete machines implement [`Machine`]:
//!
//! - [`FiniteAutomaton`]: no stacks
//! - [`OneStackMachine`]: one stack
//! - [`TwoStackMachine`]: two stacks
//!
//! Each composes a [`Definition`] with its own runtime fields (current state
//! and stacks). [`AnyMachine`] picks the variant from a [`MachineKind`] tag.

mod any;
mod definition;
mod error;
mod finite;
mod one_stack;
mod transition;
mod two_stack;

pub use any::AnyMachine;
pub use definition::Definition;
pub(crate) use definition::{settle, Check};
pub use error::{DefinitionError, DefinitionErrors, TupleError};
pub use finite::FiniteAutomaton;
pub use one_stack::OneStackMachine;
pub use transition::Transition;
pub use two_stack::TwoStackMachine;

use crate::core::{Stack, StackOp, StateId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared machine type, as tagged in a definition document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineKind {
    #[serde(rename = "simple_machine")]
    Finite,
    #[serde(rename = "1_stack_machine")]
    OneStack,
    #[serde(rename = "2_stack_machine")]
    TwoStack,
}

impl MachineKind {
    pub fn stack_count(self) -> usize {
        match self {
            Self::Finite => 0,
            Self::OneStack => 1,
            Self::TwoStack => 2,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Finite => "simple_machine",
            Self::OneStack => "1_stack_machine",
            Self::TwoStack => "2_stack_machine",
        }
    }
}

impl fmt::Display for MachineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for MachineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Finite, Self::OneStack, Self::TwoStack]
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Acceptance condition checked once the tape is exhausted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Acceptance {
    /// Accept in any final state.
    #[default]
    FinalState,
    /// Accept in a final state with every stack empty.
    FinalStateAndEmptyStacks,
}

impl Acceptance {
    /// Check the stack part of the condition. Pure.
    pub fn holds(self, stacks: &[Stack]) -> bool {
        match self {
            Self::FinalState => true,
            Self::FinalStateAndEmptyStacks => stacks.iter().all(Stack::is_empty),
        }
    }
}

/// Capabilities shared by every machine variant.
///
/// Declared fields come from [`Machine::definition`]; the runtime fields
/// (current state and stacks) are reset by [`Machine::init`] and driven by
/// [`Machine::fire`].
pub trait Machine {
    fn kind(&self) -> MachineKind;

    fn definition(&self) -> &Definition;

    fn acceptance(&self) -> Acceptance;

    /// Reset the current state to the initial state and clear every stack.
    fn init(&mut self);

    fn current_state(&self) -> &str;

    /// The machine's stacks, A before B. Empty for a finite automaton.
    fn stacks(&self) -> &[Stack];

    /// Fire the first transition from the current state that matches
    /// `symbol` and whose stack preconditions all hold.
    ///
    /// Returns `false` and leaves the machine unchanged when none applies.
    fn fire(&mut self, symbol: &str) -> bool;

    /// Final-state membership plus the variant's acceptance condition.
    fn is_in_final_state(&self) -> bool {
        self.definition().is_final(self.current_state())
            && self.acceptance().holds(self.stacks())
    }

    fn get_states(&self) -> &[StateId] {
        self.definition().states()
    }

    fn get_transitions(&self, state: &str) -> &[Transition] {
        self.definition().transitions_from(state)
    }

    fn possible_transitions(&self) -> &[Transition] {
        self.get_transitions(self.current_state())
    }
}

/// Scan transitions from `current` in declaration order and fire the first
/// one that matches `symbol` and whose stack operations apply.
///
/// Transitions that match the symbol but fail a stack precondition are
/// skipped, and the scan continues to later transitions with the same symbol.
pub(crate) fn fire_first(
    definition: &Definition,
    current: &mut StateId,
    stacks: &mut [Stack],
    symbol: &str,
) -> bool {
    let Some(transition) = definition
        .transitions_from(current)
        .iter()
        .find(|t| t.can_fire(symbol, &*stacks))
    else {
        return false;
    };

    let applied = StackOp::apply_all(&transition.ops, stacks);
    debug_assert!(applied, "stack operations were checked before firing");
    *current = transition.result.clone();
    true
}
