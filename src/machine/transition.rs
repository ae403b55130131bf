//! Transitions: a match symbol, one stack operation per stack, a result state.

use super::error::TupleError;
use crate::core::{Stack, StackOp, StateId, Symbol, EMPTY_WORD};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A rule attached to a source state.
///
/// Finite automata carry no stack operations, one-stack machines carry one
/// and two-stack machines carry two. The arity is checked against the machine
/// when the machine is built.
///
/// # Example
///
/// ```rust
/// use autosim::machine::Transition;
/// use autosim::core::StackOp;
///
/// let t: Transition = "(a, &, X, Q0)".parse().unwrap();
/// assert_eq!(t, Transition::one_stack("a", StackOp::push("X"), "Q0"));
/// assert_eq!(t.to_string(), "(a, &, X, Q0)");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub symbol: Symbol,
    pub ops: Vec<StackOp>,
    pub result: StateId,
}

impl Transition {
    /// Finite automaton transition `(symbol, result)`.
    pub fn simple(symbol: impl Into<Symbol>, result: impl Into<StateId>) -> Self {
        Self {
            symbol: symbol.into(),
            ops: Vec::new(),
            result: result.into(),
        }
    }

    /// One-stack transition `(symbol, read, write, result)`.
    pub fn one_stack(symbol: impl Into<Symbol>, op: StackOp, result: impl Into<StateId>) -> Self {
        Self {
            symbol: symbol.into(),
            ops: vec![op],
            result: result.into(),
        }
    }

    /// Two-stack transition `(symbol, readA, writeA, readB, writeB, result)`.
    pub fn two_stack(
        symbol: impl Into<Symbol>,
        a: StackOp,
        b: StackOp,
        result: impl Into<StateId>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            ops: vec![a, b],
            result: result.into(),
        }
    }

    /// Number of stacks this transition operates on.
    pub fn arity(&self) -> usize {
        self.ops.len()
    }

    /// Check if this transition can fire on `symbol` given `stacks`. Pure.
    pub fn can_fire(&self, symbol: &str, stacks: &[Stack]) -> bool {
        self.symbol == symbol
            && self.ops.len() == stacks.len()
            && self.ops.iter().zip(stacks).all(|(op, s)| op.permits(s))
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.symbol)?;
        for op in &self.ops {
            write!(f, ", {op}")?;
        }
        write!(f, ", {})", self.result)
    }
}

impl FromStr for Transition {
    type Err = TupleError;

    /// Parse `(symbol[, readA, writeA[, readB, writeB]], result)`.
    ///
    /// Blank components and `&` in a read or write slot mean the empty word.
    /// A blank symbol or result is kept as `&` so validation can name it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or(TupleError::MissingParentheses)?;

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if !matches!(parts.len(), 2 | 4 | 6) {
            return Err(TupleError::ComponentCount(parts.len()));
        }

        let slot = |part: &str| -> Option<Symbol> {
            (!part.is_empty() && part != EMPTY_WORD).then(|| part.to_string())
        };
        let word = |part: &str| -> Symbol {
            if part.is_empty() {
                EMPTY_WORD.to_string()
            } else {
                part.to_string()
            }
        };

        let last = parts.len() - 1;
        let ops = parts[1..last]
            .chunks(2)
            .map(|pair| StackOp::new(slot(pair[0]), slot(pair[1])))
            .collect();

        Ok(Self {
            symbol: word(parts[0]),
            ops,
            result: word(parts[last]),
        })
    }
}
