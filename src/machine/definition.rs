//! Declared fields shared by every machine variant.
//!
//! Validation uses `Validation` to accumulate ALL violations instead of
//! stopping at the first one, so a broken definition is reported in one pass.

use super::error::{DefinitionError, DefinitionErrors};
use super::transition::Transition;
use crate::core::{is_reserved, StateId, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub(crate) type Check = Validation<(), NonEmptyVec<DefinitionError>>;

/// States, initial state, final states, alphabet and transition table.
///
/// A `Definition` is read-only once a machine owns it. Transitions are
/// grouped by source state and kept in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub(crate) states: Vec<StateId>,
    pub(crate) initial: StateId,
    pub(crate) finals: Vec<StateId>,
    pub(crate) alphabet: Vec<Symbol>,
    pub(crate) transitions: BTreeMap<StateId, Vec<Transition>>,
}

impl Definition {
    pub fn states(&self) -> &[StateId] {
        &self.states
    }

    pub fn initial_state(&self) -> &str {
        &self.initial
    }

    pub fn final_states(&self) -> &[StateId] {
        &self.finals
    }

    /// Declared alphabet. Advisory: transitions are not checked against it.
    pub fn alphabet(&self) -> &[Symbol] {
        &self.alphabet
    }

    pub fn is_final(&self, state: &str) -> bool {
        self.finals.iter().any(|s| s == state)
    }

    /// Transitions declared for `state`, in declaration order.
    pub fn transitions_from(&self, state: &str) -> &[Transition] {
        self.transitions.get(state).map_or(&[], Vec::as_slice)
    }

    /// Every transition paired with its source state.
    pub fn transitions(&self) -> impl Iterator<Item = (&str, &Transition)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(from, ts)| ts.iter().map(move |t| (from.as_str(), t)))
    }

    /// Transition symbols missing from a non-empty alphabet.
    pub fn foreign_symbols(&self) -> Vec<&str> {
        if self.alphabet.is_empty() {
            return Vec::new();
        }
        let mut seen = HashSet::new();
        self.transitions()
            .map(|(_, t)| t.symbol.as_str())
            .filter(|s| !self.alphabet.iter().any(|a| a == s))
            .filter(|s| seen.insert(*s))
            .collect()
    }

    /// Validate against a machine with `stack_count` stacks.
    ///
    /// Returns every violation found, not just the first.
    pub fn validate(&self, stack_count: usize) -> Result<(), DefinitionErrors> {
        settle(self.checks(stack_count))
    }

    /// Every individual check, unsettled, so callers can add their own.
    pub(crate) fn checks(&self, stack_count: usize) -> Vec<Check> {
        let mut checks = vec![self.check_states(), self.check_initial(), self.check_finals()];
        for (from, transitions) in &self.transitions {
            checks.push(self.check_source(from));
            for transition in transitions {
                checks.push(self.check_transition(from, transition, stack_count));
            }
        }
        checks
    }

    fn declares(&self, state: &str) -> bool {
        self.states.iter().any(|s| s == state)
    }

    fn check_states(&self) -> Check {
        if self.states.is_empty() {
            return Validation::fail(DefinitionError::NoStates);
        }

        let mut seen = HashSet::new();
        let duplicates: Vec<Check> = self
            .states
            .iter()
            .filter(|s| !seen.insert(s.as_str()))
            .map(|s| Validation::fail(DefinitionError::DuplicateState(s.clone())))
            .collect();

        if duplicates.is_empty() {
            Validation::success(())
        } else {
            Validation::all_vec(duplicates).map(|_| ())
        }
    }

    fn check_initial(&self) -> Check {
        if self.initial.is_empty() {
            Validation::fail(DefinitionError::MissingInitialState)
        } else if !self.declares(&self.initial) {
            Validation::fail(DefinitionError::UnknownInitialState(self.initial.clone()))
        } else {
            Validation::success(())
        }
    }

    fn check_finals(&self) -> Check {
        if self.finals.is_empty() {
            return Validation::fail(DefinitionError::NoFinalStates);
        }

        let checks = self
            .finals
            .iter()
            .map(|state| {
                if self.declares(state) {
                    Validation::success(())
                } else {
                    Validation::fail(DefinitionError::UnknownFinalState(state.clone()))
                }
            })
            .collect();

        Validation::all_vec(checks).map(|_| ())
    }

    fn check_source(&self, from: &str) -> Check {
        if self.declares(from) {
            Validation::success(())
        } else {
            Validation::fail(DefinitionError::UnknownSourceState(from.to_string()))
        }
    }

    fn check_transition(&self, from: &str, transition: &Transition, stack_count: usize) -> Check {
        let mut checks: Vec<Check> = Vec::new();

        if !self.declares(&transition.result) {
            checks.push(Validation::fail(DefinitionError::UnknownResultState {
                from: from.to_string(),
                to: transition.result.clone(),
                transition: transition.to_string(),
            }));
        }

        if transition.arity() != stack_count {
            checks.push(Validation::fail(DefinitionError::ArityMismatch {
                from: from.to_string(),
                transition: transition.to_string(),
                expected: stack_count,
                found: transition.arity(),
            }));
        }

        let stack_symbols = transition
            .ops
            .iter()
            .flat_map(|op| op.read.iter().chain(op.write.iter()));
        for symbol in std::iter::once(&transition.symbol).chain(stack_symbols) {
            if is_reserved(symbol) {
                checks.push(Validation::fail(DefinitionError::ReservedSymbol {
                    from: from.to_string(),
                    transition: transition.to_string(),
                    symbol: symbol.clone(),
                }));
            }
        }

        if checks.is_empty() {
            Validation::success(())
        } else {
            Validation::all_vec(checks).map(|_| ())
        }
    }
}

/// Fold a non-empty list of checks into one result.
pub(crate) fn settle(checks: Vec<Check>) -> Result<(), DefinitionErrors> {
    match Validation::all_vec(checks) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(DefinitionErrors::new(errors)),
    }
}
