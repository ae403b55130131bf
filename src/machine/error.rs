//! Definition errors reported before a machine can run.

use crate::core::{StateId, Symbol};
use std::fmt;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A malformed transition tuple such as `(a, X Q0)`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TupleError {
    #[error("transition must start with '(' and end with ')'")]
    MissingParentheses,

    #[error("transition has {0} components, expected 2, 4 or 6")]
    ComponentCount(usize),
}

/// One violation found while validating a machine definition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("no states declared")]
    NoStates,

    #[error("state '{0}' declared more than once")]
    DuplicateState(StateId),

    #[error("no initial state declared")]
    MissingInitialState,

    #[error("initial state '{0}' is not a declared state")]
    UnknownInitialState(StateId),

    #[error("no final states declared")]
    NoFinalStates,

    #[error("final state '{0}' is not a declared state")]
    UnknownFinalState(StateId),

    #[error("transitions declared for unknown state '{0}'")]
    UnknownSourceState(StateId),

    #[error("transition {transition} from '{from}' targets unknown state '{to}'")]
    UnknownResultState {
        from: StateId,
        to: StateId,
        transition: String,
    },

    #[error("transition {transition} from '{from}' uses {found} stacks, machine has {expected}")]
    ArityMismatch {
        from: StateId,
        transition: String,
        expected: usize,
        found: usize,
    },

    #[error("transition {transition} from '{from}' uses reserved marker '{symbol}'")]
    ReservedSymbol {
        from: StateId,
        transition: String,
        symbol: Symbol,
    },

    #[error("malformed transition '{text}' from '{from}': {reason}")]
    MalformedTransition {
        from: StateId,
        text: String,
        reason: TupleError,
    },
}

/// Every violation found in one definition, never empty.
#[derive(Debug)]
pub struct DefinitionErrors(NonEmptyVec<DefinitionError>);

impl DefinitionErrors {
    pub(crate) fn new(errors: NonEmptyVec<DefinitionError>) -> Self {
        Self(errors)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DefinitionError> + '_ {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, error: &DefinitionError) -> bool {
        self.iter().any(|e| e == error)
    }
}

impl fmt::Display for DefinitionErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid machine definition")?;
        for (i, error) in self.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for DefinitionErrors {}
