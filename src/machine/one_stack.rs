//! Finite automaton with one stack.

use super::definition::Definition;
use super::error::DefinitionErrors;
use super::{fire_first, Acceptance, Machine, MachineKind};
use crate::core::{Stack, StateId};
use std::slice;

/// Machine whose transitions read and write a single stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OneStackMachine {
    definition: Definition,
    acceptance: Acceptance,
    current: StateId,
    stack: Stack,
}

impl OneStackMachine {
    /// Validate `definition` and build the machine in its initial state.
    pub fn new(definition: Definition, acceptance: Acceptance) -> Result<Self, DefinitionErrors> {
        definition.validate(MachineKind::OneStack.stack_count())?;
        Ok(Self {
            current: definition.initial.clone(),
            definition,
            acceptance,
            stack: Stack::new(),
        })
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }
}

impl Machine for OneStackMachine {
    fn kind(&self) -> MachineKind {
        MachineKind::OneStack
    }

    fn definition(&self) -> &Definition {
        &self.definition
    }

    fn acceptance(&self) -> Acceptance {
        self.acceptance
    }

    fn init(&mut self) {
        self.current.clone_from(&self.definition.initial);
        self.stack.clear();
    }

    fn current_state(&self) -> &str {
        &self.current
    }

    fn stacks(&self) -> &[Stack] {
        slice::from_ref(&self.stack)
    }

    fn fire(&mut self, symbol: &str) -> bool {
        fire_first(
            &self.definition,
            &mut self.current,
            slice::from_mut(&mut self.stack),
            symbol,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MachineBuilder;
    use crate::core::StackOp;
    use crate::machine::Transition;

    fn balanced(acceptance: Acceptance) -> OneStackMachine {
        MachineBuilder::new()
            .states(["Q0", "Q1"])
            .initial("Q0")
            .finals(["Q1"])
            .acceptance(acceptance)
            .transition("Q0", Transition::one_stack("a", StackOp::push("X"), "Q0"))
            .transition("Q0", Transition::one_stack("b", StackOp::pop("X"), "Q1"))
            .transition("Q1", Transition::one_stack("b", StackOp::pop("X"), "Q1"))
            .one_stack()
            .unwrap()
    }

    #[test]
    fn pushes_and_pops_drive_the_stack() {
        let mut machine = balanced(Acceptance::FinalState);
        assert!(machine.fire("a"));
        assert!(machine.fire("a"));
        assert_eq!(machine.stack().len(), 2);

        assert!(machine.fire("b"));
        assert_eq!(machine.current_state(), "Q1");
        assert!(machine.fire("b"));
        assert!(machine.stack().is_empty());
    }

    #[test]
    fn failed_precondition_leaves_machine_unchanged() {
        let mut machine = balanced(Acceptance::FinalState);
        assert!(!machine.fire("b"));
        assert_eq!(machine.current_state(), "Q0");
        assert!(machine.stack().is_empty());
    }

    #[test]
    fn empty_stack_acceptance_checks_the_stack() {
        let mut machine = balanced(Acceptance::FinalStateAndEmptyStacks);
        machine.fire("a");
        machine.fire("a");
        machine.fire("b");
        assert_eq!(machine.current_state(), "Q1");
        assert!(!machine.is_in_final_state());

        machine.fire("b");
        assert!(machine.is_in_final_state());
    }

    #[test]
    fn init_clears_the_stack() {
        let mut machine = balanced(Acceptance::FinalState);
        machine.fire("a");
        machine.init();

        assert!(machine.stack().is_empty());
        assert_eq!(machine.current_state(), "Q0");
    }

    #[test]
    fn scan_continues_past_failed_precondition() {
        let mut machine: OneStackMachine = MachineBuilder::new()
            .states(["Q0", "Q1", "Q2"])
            .initial("Q0")
            .finals(["Q2"])
            .transition("Q0", Transition::one_stack("a", StackOp::pop("X"), "Q1"))
            .transition("Q0", Transition::one_stack("a", StackOp::push("Y"), "Q2"))
            .one_stack()
            .unwrap();

        assert!(machine.fire("a"));
        assert_eq!(machine.current_state(), "Q2");
        assert_eq!(machine.stack().top(), Some("Y"));
    }
}
