//! Finite automaton with two stacks.

use super::definition::Definition;
use super::error::DefinitionErrors;
use super::{fire_first, Acceptance, Machine, MachineKind};
use crate::core::{Stack, StateId};

/// Machine whose transitions read and write two stacks, A and B.
///
/// A transition fires only when the preconditions of both stacks hold; a
/// failure on either stack leaves both untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TwoStackMachine {
    definition: Definition,
    acceptance: Acceptance,
    current: StateId,
    stacks: [Stack; 2],
}

impl TwoStackMachine {
    /// Validate `definition` and build the machine in its initial state.
    pub fn new(definition: Definition, acceptance: Acceptance) -> Result<Self, DefinitionErrors> {
        definition.validate(MachineKind::TwoStack.stack_count())?;
        Ok(Self {
            current: definition.initial.clone(),
            definition,
            acceptance,
            stacks: [Stack::new(), Stack::new()],
        })
    }

    pub fn stack_a(&self) -> &Stack {
        &self.stacks[0]
    }

    pub fn stack_b(&self) -> &Stack {
        &self.stacks[1]
    }
}

impl Machine for TwoStackMachine {
    fn kind(&self) -> MachineKind {
        MachineKind::TwoStack
    }

    fn definition(&self) -> &Definition {
        &self.definition
    }

    fn acceptance(&self) -> Acceptance {
        self.acceptance
    }

    fn init(&mut self) {
        self.current.clone_from(&self.definition.initial);
        for stack in &mut self.stacks {
            stack.clear();
        }
    }

    fn current_state(&self) -> &str {
        &self.current
    }

    fn stacks(&self) -> &[Stack] {
        &self.stacks
    }

    fn fire(&mut self, symbol: &str) -> bool {
        fire_first(&self.definition, &mut self.current, &mut self.stacks, symbol)
    }
}
