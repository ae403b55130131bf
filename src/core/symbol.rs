//! Symbols, state identifiers and the two reserved markers.

/// An alphabet token.
pub type Symbol = String;

/// A state identifier. Transitions refer to states by name.
pub type StateId = String;

/// Marker read from a tape once no real input remains.
pub const END_OF_TAPE: &str = "?";

/// Marker for "no symbol read or written" in a stack operation.
pub const EMPTY_WORD: &str = "&";

/// Check whether a token is one of the reserved markers.
///
/// Reserved markers live outside every alphabet: they are never matched by a
/// transition and never stored on a stack.
pub fn is_reserved(token: &str) -> bool {
    token == END_OF_TAPE || token == EMPTY_WORD
}

/// Render an optional symbol, using the empty-word marker for `None`.
pub(crate) fn or_empty_word(symbol: Option<&str>) -> &str {
    symbol.unwrap_or(EMPTY_WORD)
}
