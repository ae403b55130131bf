//! Input tape with a single forward read cursor.

use super::symbol::{Symbol, END_OF_TAPE};
use serde::{Deserialize, Serialize};

/// Ordered, restartable sequence of input symbols.
///
/// The end-of-tape marker is implicit: reading past the last real symbol, or
/// reaching a literal [`END_OF_TAPE`] in the content, yields `None`. The
/// content itself is never rebuilt; [`Tape::reset`] only rewinds the cursor.
///
/// # Example
///
/// ```rust
/// use autosim::core::Tape;
///
/// let mut tape = Tape::from(vec!["a", "b"]);
/// assert_eq!(tape.read(), Some("a"));
/// assert_eq!(tape.read(), Some("b"));
/// assert_eq!(tape.read(), None);
/// assert_eq!(tape.read(), None);
///
/// tape.reset();
/// assert_eq!(tape.read(), Some("a"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Symbol>", into = "Vec<Symbol>")]
pub struct Tape {
    symbols: Vec<Symbol>,
    cursor: usize,
}

impl Tape {
    /// Create a tape over the given symbols with the cursor at the start.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
            cursor: 0,
        }
    }

    /// Read the symbol under the cursor and advance.
    ///
    /// Returns `None` at the end of the tape; the cursor stays there.
    pub fn read(&mut self) -> Option<&str> {
        match self.symbols.get(self.cursor) {
            Some(symbol) if symbol != END_OF_TAPE => {
                self.cursor += 1;
                Some(symbol.as_str())
            }
            _ => None,
        }
    }

    /// Rewind the cursor to the first symbol.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Number of symbols consumed since the last reset.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Up to `amount` symbols from the cursor onward, without consuming them.
    pub fn peek(&self, amount: usize) -> &[Symbol] {
        let remaining = self.readable();
        &remaining[..amount.min(remaining.len())]
    }

    /// Whether the next read yields the end-of-tape marker.
    pub fn is_at_end(&self) -> bool {
        self.readable().is_empty()
    }

    /// The readable content, excluding anything from a literal end marker on.
    pub fn symbols(&self) -> &[Symbol] {
        let end = self
            .symbols
            .iter()
            .position(|s| s == END_OF_TAPE)
            .unwrap_or(self.symbols.len());
        &self.symbols[..end]
    }

    /// Number of readable symbols.
    pub fn len(&self) -> usize {
        self.symbols().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn readable(&self) -> &[Symbol] {
        let symbols = self.symbols();
        &symbols[self.cursor.min(symbols.len())..]
    }
}

impl<S: Into<Symbol>> From<Vec<S>> for Tape {
    fn from(symbols: Vec<S>) -> Self {
        Self::new(symbols)
    }
}

impl From<Tape> for Vec<Symbol> {
    fn from(tape: Tape) -> Self {
        tape.symbols
    }
}
