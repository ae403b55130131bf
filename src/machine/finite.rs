//! Plain finite automaton.

use super::definition::Definition;
use super::error::DefinitionErrors;
use super::{fire_first, Acceptance, Machine, MachineKind};
use crate::core::{Stack, StateId};

/// Deterministic finite automaton: transitions carry no stack operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FiniteAutomaton {
    definition: Definition,
    current: StateId,
}

impl FiniteAutomaton {
    /// Validate `definition` and build the machine in its initial state.
    pub fn new(definition: Definition) -> Result<Self, DefinitionErrors> {
        definition.validate(MachineKind::Finite.stack_count())?;
        Ok(Self {
            current: definition.initial.clone(),
            definition,
        })
    }
}

impl Machine for FiniteAutomaton {
    fn kind(&self) -> MachineKind {
        MachineKind::Finite
    }

    fn definition(&self) -> &Definition {
        &self.definition
    }

    fn acceptance(&self) -> Acceptance {
        Acceptance::FinalState
    }

    fn init(&mut self) {
        self.current.clone_from(&self.definition.initial);
    }

    fn current_state(&self) -> &str {
        &self.current
    }

    fn stacks(&self) -> &[Stack] {
        &[]
    }

    fn fire(&mut self, symbol: &str) -> bool {
        fire_first(&self.definition, &mut self.current, &mut [], symbol)
    }
}
