//! Read/write operations that gate and drive stack transitions.
//!
//! A [`StackOp`] pairs a pure precondition (the symbol that must sit on top of
//! the stack) with an effect (pop it, then push a replacement). Preconditions
//! are evaluated for every stack before any stack is touched, so a transition
//! either applies in full or leaves every stack as it was.

use super::stack::Stack;
use super::symbol::{or_empty_word, Symbol};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One read/write pair against one stack. `None` is the empty word.
///
/// # Example
///
/// ```rust
/// use autosim::core::{Stack, StackOp};
///
/// let push_x = StackOp::push("X");
/// let pop_x = StackOp::pop("X");
///
/// let mut stack = Stack::new();
/// assert!(!pop_x.permits(&stack));
/// assert!(push_x.permits(&stack));
///
/// assert!(StackOp::apply_all(&[push_x], std::slice::from_mut(&mut stack)));
/// assert!(pop_x.permits(&stack));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackOp {
    pub read: Option<Symbol>,
    pub write: Option<Symbol>,
}

impl StackOp {
    pub fn new(read: Option<Symbol>, write: Option<Symbol>) -> Self {
        Self { read, write }
    }

    /// Leave the stack untouched.
    pub fn keep() -> Self {
        Self::default()
    }

    /// Push `symbol` without reading anything.
    pub fn push(symbol: impl Into<Symbol>) -> Self {
        Self::new(None, Some(symbol.into()))
    }

    /// Pop `symbol`, which must be on top.
    pub fn pop(symbol: impl Into<Symbol>) -> Self {
        Self::new(Some(symbol.into()), None)
    }

    /// Replace `read` on top with `write`.
    pub fn replace(read: impl Into<Symbol>, write: impl Into<Symbol>) -> Self {
        Self::new(Some(read.into()), Some(write.into()))
    }

    /// Check the read precondition against `stack`. Pure.
    pub fn permits(&self, stack: &Stack) -> bool {
        match &self.read {
            None => true,
            Some(read) => stack.top() == Some(read.as_str()),
        }
    }

    /// Apply one operation per stack, all or nothing.
    ///
    /// Every precondition is checked first; if any fails, no stack is
    /// mutated and `false` is returned. Otherwise all pops happen, then all
    /// pushes.
    ///
    /// # Panics
    ///
    /// Panics if `ops` and `stacks` differ in length. Arity is validated when
    /// a machine is built, so a mismatch here is an engine defect.
    pub fn apply_all(ops: &[StackOp], stacks: &mut [Stack]) -> bool {
        assert_eq!(
            ops.len(),
            stacks.len(),
            "one stack operation per stack is validated at build time"
        );

        if !ops.iter().zip(stacks.iter()).all(|(op, s)| op.permits(s)) {
            return false;
        }

        for (op, stack) in ops.iter().zip(stacks.iter_mut()) {
            if op.read.is_some() {
                stack
                    .pop()
                    .expect("read precondition guarantees a non-empty stack");
            }
        }

        for (op, stack) in ops.iter().zip(stacks.iter_mut()) {
            if let Some(write) = &op.write {
                stack.push(write.clone());
            }
        }

        true
    }
}

impl fmt::Display for StackOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}",
            or_empty_word(self.read.as_deref()),
            or_empty_word(self.write.as_deref())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack_of(symbols: &[&str]) -> Stack {
        let mut stack = Stack::new();
        for symbol in symbols {
            stack.push(*symbol);
        }
        stack
    }

    #[test]
    fn empty_read_always_permits() {
        assert!(StackOp::keep().permits(&Stack::new()));
        assert!(StackOp::push("X").permits(&stack_of(&["Y"])));
    }

    #[test]
    fn read_requires_matching_top() {
        let op = StackOp::pop("X");
        assert!(!op.permits(&Stack::new()));
        assert!(!op.permits(&stack_of(&["X", "Y"])));
        assert!(op.permits(&stack_of(&["Y", "X"])));
    }

    #[test]
    fn permits_is_deterministic() {
        let stack = stack_of(&["A"]);
        let op = StackOp::pop("A");
        assert_eq!(op.permits(&stack), op.permits(&stack));
    }

    #[test]
    fn replace_pops_before_pushing() {
        let mut stacks = [stack_of(&["A"])];
        assert!(StackOp::apply_all(
            &[StackOp::replace("A", "B")],
            &mut stacks
        ));
        assert_eq!(stacks[0].snapshot(), vec!["B".to_string()]);
    }

    #[test]
    fn failed_precondition_mutates_no_stack() {
        let mut stacks = [stack_of(&["A"]), stack_of(&["B"])];
        let before = stacks.clone();

        // First stack would succeed, second fails: neither may change.
        let ops = [StackOp::pop("A"), StackOp::pop("Z")];
        assert!(!StackOp::apply_all(&ops, &mut stacks));
        assert_eq!(stacks, before);
    }

    #[test]
    fn both_stacks_change_when_all_preconditions_hold() {
        let mut stacks = [stack_of(&["A"]), Stack::new()];
        let ops = [StackOp::pop("A"), StackOp::push("A")];

        assert!(StackOp::apply_all(&ops, &mut stacks));
        assert!(stacks[0].is_empty());
        assert_eq!(stacks[1].top(), Some("A"));
    }

    #[test]
    fn no_stacks_always_applies() {
        assert!(StackOp::apply_all(&[], &mut []));
    }

    #[test]
    #[should_panic(expected = "one stack operation per stack")]
    fn arity_mismatch_is_an_engine_defect() {
        StackOp::apply_all(&[StackOp::keep()], &mut []);
    }

    #[test]
    fn display_uses_empty_word_marker() {
        assert_eq!(StackOp::push("X").to_string(), "&, X");
        assert_eq!(StackOp::pop("X").to_string(), "X, &");
    }
}
