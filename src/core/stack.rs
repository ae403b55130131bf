//! LIFO symbol stack used by the stack machine variants.

use super::symbol::{is_reserved, Symbol};
use serde::{Deserialize, Serialize};

/// Full contents of one stack at one step, top first.
pub type StackSnapshot = Vec<Symbol>;

/// LIFO container of symbols.
///
/// The stack is bottomless until empty and never stores the reserved markers;
/// callers that build stack operations go through [`StackOp`](super::StackOp),
/// which represents the empty word as `None` instead of a marker.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    items: Vec<Symbol>,
}

impl Stack {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Push `symbol` on top.
    ///
    /// `symbol` must not be a reserved marker. Debug builds assert this.
    pub fn push(&mut self, symbol: impl Into<Symbol>) {
        let symbol = symbol.into();
        debug_assert!(!is_reserved(&symbol), "reserved marker {symbol:?} pushed onto a stack");
        self.items.push(symbol);
    }

    /// Remove and return the top symbol.
    pub fn pop(&mut self) -> Option<Symbol> {
        self.items.pop()
    }

    /// The top symbol, if any.
    pub fn top(&self) -> Option<&str> {
        self.items.last().map(String::as_str)
    }

    /// Up to `amount` symbols from the top down.
    pub fn peek(&self, amount: usize) -> Vec<&str> {
        self.items
            .iter()
            .rev()
            .take(amount)
            .map(String::as_str)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Copy of the whole stack, top first.
    pub fn snapshot(&self) -> StackSnapshot {
        self.items.iter().rev().cloned().collect()
    }
}
