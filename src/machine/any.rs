//! A machine of any variant, chosen at load time from its type tag.

use super::definition::Definition;
use super::error::DefinitionErrors;
use super::finite::FiniteAutomaton;
use super::one_stack::OneStackMachine;
use super::two_stack::TwoStackMachine;
use super::{Acceptance, Machine, MachineKind};
use crate::core::Stack;

/// One of the three concrete machines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnyMachine {
    Finite(FiniteAutomaton),
    OneStack(OneStackMachine),
    TwoStack(TwoStackMachine),
}

impl AnyMachine {
    /// Build the variant named by `kind`.
    ///
    /// `acceptance` is ignored for finite automata, which have no stacks.
    pub fn new(
        kind: MachineKind,
        definition: Definition,
        acceptance: Acceptance,
    ) -> Result<Self, DefinitionErrors> {
        Ok(match kind {
            MachineKind::Finite => Self::Finite(FiniteAutomaton::new(definition)?),
            MachineKind::OneStack => Self::OneStack(OneStackMachine::new(definition, acceptance)?),
            MachineKind::TwoStack => Self::TwoStack(TwoStackMachine::new(definition, acceptance)?),
        })
    }

    fn inner(&self) -> &dyn Machine {
        match self {
            Self::Finite(m) => m,
            Self::OneStack(m) => m,
            Self::TwoStack(m) => m,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Machine {
        match self {
            Self::Finite(m) => m,
            Self::OneStack(m) => m,
            Self::TwoStack(m) => m,
        }
    }
}

impl Machine for AnyMachine {
    fn kind(&self) -> MachineKind {
        self.inner().kind()
    }

    fn definition(&self) -> &Definition {
        self.inner().definition()
    }

    fn acceptance(&self) -> Acceptance {
        self.inner().acceptance()
    }

    fn init(&mut self) {
        self.inner_mut().init();
    }

    fn current_state(&self) -> &str {
        self.inner().current_state()
    }

    fn stacks(&self) -> &[Stack] {
        self.inner().stacks()
    }

    fn fire(&mut self, symbol: &str) -> bool {
        self.inner_mut().fire(symbol)
    }

    fn is_in_final_state(&self) -> bool {
        self.inner().is_in_final_state()
    }
}

impl From<FiniteAutomaton> for AnyMachine {
    fn from(machine: FiniteAutomaton) -> Self {
        Self::Finite(machine)
    }
}

impl From<OneStackMachine> for AnyMachine {
    fn from(machine: OneStackMachine) -> Self {
        Self::OneStack(machine)
    }
}

impl From<TwoStackMachine> for AnyMachine {
    fn from(machine: TwoStackMachine) -> Self {
        Self::TwoStack(machine)
    }
}
