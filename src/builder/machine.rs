//! Builder for constructing machines.

use crate::core::{StateId, Symbol};
use crate::machine::{
    Acceptance, AnyMachine, Definition, DefinitionErrors, FiniteAutomaton, MachineKind,
    OneStackMachine, Transition, TwoStackMachine,
};
use tracing::warn;

/// Builder for constructing machines with a fluent API.
///
/// Nothing is checked until a terminal method (`finite`, `one_stack`,
/// `two_stack` or `build`) runs; that method validates the whole definition
/// and reports every violation at once.
///
/// # Example
///
/// ```rust
/// use autosim::builder::MachineBuilder;
/// use autosim::machine::{Machine, Transition};
///
/// let machine = MachineBuilder::new()
///     .states(["Q0", "Q1"])
///     .initial("Q0")
///     .finals(["Q1"])
///     .transition("Q0", Transition::simple("a", "Q1"))
///     .finite()
///     .unwrap();
///
/// assert_eq!(machine.current_state(), "Q0");
/// ```
#[derive(Clone, Debug, Default)]
pub struct MachineBuilder {
    definition: Definition,
    acceptance: Acceptance,
}

impl MachineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare states (required, non-empty).
    pub fn states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateId>,
    {
        self.definition
            .states
            .extend(states.into_iter().map(Into::into));
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<StateId>) -> Self {
        self.definition.initial = state.into();
        self
    }

    /// Declare final states (required, non-empty).
    pub fn finals<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateId>,
    {
        self.definition
            .finals
            .extend(states.into_iter().map(Into::into));
        self
    }

    /// Declare the alphabet (advisory).
    pub fn alphabet<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.definition
            .alphabet
            .extend(symbols.into_iter().map(Into::into));
        self
    }

    /// Add a transition from `from`, after any already declared for it.
    pub fn transition(mut self, from: impl Into<StateId>, transition: Transition) -> Self {
        self.definition
            .transitions
            .entry(from.into())
            .or_default()
            .push(transition);
        self
    }

    /// Add several transitions from `from`, in order.
    pub fn transitions<I>(self, from: impl Into<StateId>, transitions: I) -> Self
    where
        I: IntoIterator<Item = Transition>,
    {
        let from = from.into();
        transitions
            .into_iter()
            .fold(self, |builder, t| builder.transition(from.clone(), t))
    }

    /// Set the acceptance condition for stack machines.
    pub fn acceptance(mut self, acceptance: Acceptance) -> Self {
        self.acceptance = acceptance;
        self
    }

    /// Build a finite automaton.
    pub fn finite(self) -> Result<FiniteAutomaton, DefinitionErrors> {
        FiniteAutomaton::new(self.checked())
    }

    /// Build a one-stack machine.
    pub fn one_stack(self) -> Result<OneStackMachine, DefinitionErrors> {
        let acceptance = self.acceptance;
        OneStackMachine::new(self.checked(), acceptance)
    }

    /// Build a two-stack machine.
    pub fn two_stack(self) -> Result<TwoStackMachine, DefinitionErrors> {
        let acceptance = self.acceptance;
        TwoStackMachine::new(self.checked(), acceptance)
    }

    /// Build the variant named by `kind`.
    pub fn build(self, kind: MachineKind) -> Result<AnyMachine, DefinitionErrors> {
        let acceptance = self.acceptance;
        AnyMachine::new(kind, self.checked(), acceptance)
    }

    /// Hand over the definition, logging alphabet mismatches on the way.
    fn checked(self) -> Definition {
        for symbol in self.definition.foreign_symbols() {
            warn!(symbol, "transition symbol is not in the declared alphabet");
        }
        self.definition
    }
}
