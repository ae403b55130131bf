//! Load machine definitions and input tapes from text.
//!
//! A definition document is JSON:
//!
//! ```json
//! {
//!   "type": "1_stack_machine",
//!   "states": ["Q0", "Q1"],
//!   "initialState": "Q0",
//!   "finalStates": ["Q1"],
//!   "alphabet": ["a", "b"],
//!   "input": ["a", "b"],
//!   "acceptance": "final_state_and_empty_stacks",
//!   "transitions": { "Q0": ["(a, &, X, Q0)", "(b, X, &, Q1)"] }
//! }
//! ```
//!
//! `alphabet`, `input`, `acceptance` and `transitions` are optional.
//! Malformed tuples are reported together with every other definition error.

use crate::core::Tape;
use crate::machine::{
    settle, Acceptance, AnyMachine, Check, Definition, DefinitionError, DefinitionErrors, Machine,
    MachineKind, Transition,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use stillwater::validation::Validation;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while loading a definition or an input file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed definition document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown machine type '{0}'")]
    UnknownKind(String),

    #[error(transparent)]
    Invalid(#[from] DefinitionErrors),
}

/// The definition document as written on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(rename = "type")]
    pub kind: String,
    pub states: Vec<String>,
    pub initial_state: String,
    pub final_states: Vec<String>,
    #[serde(default)]
    pub alphabet: Vec<String>,
    #[serde(default)]
    pub input: Vec<String>,
    #[serde(default)]
    pub acceptance: Acceptance,
    /// Transition tuples keyed by source state
    #[serde(default)]
    pub transitions: BTreeMap<String, Vec<String>>,
}

/// A validated machine plus the document's default input.
#[derive(Clone, Debug)]
pub struct Loaded {
    pub machine: AnyMachine,
    pub input: Tape,
}

impl Document {
    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validate the document and build its machine.
    pub fn into_loaded(self) -> Result<Loaded, LoadError> {
        let kind: MachineKind = self
            .kind
            .parse()
            .map_err(LoadError::UnknownKind)?;

        let mut malformed: Vec<Check> = Vec::new();
        let mut transitions: BTreeMap<String, Vec<Transition>> = BTreeMap::new();
        for (from, tuples) in self.transitions {
            let parsed = transitions.entry(from.clone()).or_default();
            for text in tuples {
                match text.parse::<Transition>() {
                    Ok(transition) => parsed.push(transition),
                    Err(reason) => malformed.push(Validation::fail(
                        DefinitionError::MalformedTransition {
                            from: from.clone(),
                            text,
                            reason,
                        },
                    )),
                }
            }
        }

        let definition = Definition {
            states: self.states,
            initial: self.initial_state,
            finals: self.final_states,
            alphabet: self.alphabet,
            transitions,
        };

        if !malformed.is_empty() {
            malformed.extend(definition.checks(kind.stack_count()));
            settle(malformed)?;
        }

        for symbol in definition.foreign_symbols() {
            warn!(symbol, "transition symbol is not in the declared alphabet");
        }

        let machine = AnyMachine::new(kind, definition, self.acceptance)?;
        debug!(
            %kind,
            states = machine.get_states().len(),
            input_len = self.input.len(),
            "machine definition loaded"
        );

        Ok(Loaded {
            machine,
            input: Tape::from(self.input),
        })
    }
}

/// Load a definition document from a JSON string.
pub fn load_str(text: &str) -> Result<Loaded, LoadError> {
    Document::from_json(text)?.into_loaded()
}

/// Load a definition document from a file.
pub fn load_path(path: impl AsRef<Path>) -> Result<Loaded, LoadError> {
    load_str(&read_file(path.as_ref())?)
}

/// Parse one comma-separated tape per line.
///
/// Blank lines are skipped and symbols are trimmed. Empty fields are dropped
/// and do not occupy a tape cell, so `a,,b` reads as the two-symbol tape
/// `a, b` and `,` reads as the empty tape.
///
/// ```rust
/// use autosim::loader::read_inputs;
///
/// let tapes = read_inputs("a, b\n\nb,b,a\na,,b\n");
/// assert_eq!(tapes.len(), 3);
/// assert_eq!(tapes[1].symbols(), ["b", "b", "a"]);
/// assert_eq!(tapes[2].len(), 2);
/// ```
pub fn read_inputs(text: &str) -> Vec<Tape> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            Tape::new(
                line.split(',')
                    .map(str::trim)
                    .filter(|symbol| !symbol.is_empty()),
            )
        })
        .collect()
}

/// Read an inputs file; see [`read_inputs`].
pub fn read_inputs_path(path: impl AsRef<Path>) -> Result<Vec<Tape>, LoadError> {
    let tapes = read_inputs(&read_file(path.as_ref())?);
    debug!(count = tapes.len(), "input tapes loaded");
    Ok(tapes)
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}
