//! Copy Language with Two Stacks
//!
//! This demo loads a two-stack machine from a JSON definition and runs its
//! default input, then a few more words.
//!
//! The machine accepts `w c m^|w| d w`: it copies `w` onto stack A, moves it
//! to stack B one `m` at a time, and matches the second `w` against B.
//!
//! Run with: cargo run --example copy_language

use autosim::core::Tape;
use autosim::engine::execute;
use autosim::loader::load_str;
use autosim::machine::Machine;

const DEFINITION: &str = r#"{
    "type": "2_stack_machine",
    "states": ["Q0", "Q1", "Q2"],
    "initialState": "Q0",
    "finalStates": ["Q2"],
    "alphabet": ["a", "b", "c", "m", "d"],
    "input": ["a", "b", "c", "m", "m", "d", "a", "b"],
    "acceptance": "final_state_and_empty_stacks",
    "transitions": {
        "Q0": ["(a, &, A, &, &, Q0)", "(b, &, B, &, &, Q0)", "(c, &, &, &, &, Q1)"],
        "Q1": ["(m, A, &, &, A, Q1)", "(m, B, &, &, B, Q1)", "(d, &, &, &, &, Q2)"],
        "Q2": ["(a, &, &, A, &, Q2)", "(b, &, &, B, &, Q2)"]
    }
}"#;

fn main() {
    println!("=== Copy Language ===\n");

    let loaded = match load_str(DEFINITION) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };
    let mut machine = loaded.machine;
    let mut input = loaded.input;

    println!("Transitions:");
    for state in machine.get_states() {
        for transition in machine.get_transitions(state) {
            println!("  {state}: {transition}");
        }
    }

    let computation = execute(&mut machine, &mut input);
    println!("\nDefault input:");
    for (i, record) in computation.records().iter().enumerate() {
        println!(
            "  [{i}] {} -> {}  A {:?}  B {:?}  ({})",
            record.from,
            record.to,
            computation.stack_snapshot(0, i),
            computation.stack_snapshot(1, i),
            record.outcome
        );
    }

    println!("\nMore words:");
    for word in ["cd", "acmda", "abcmmdba", "abcmdab"] {
        let mut tape = Tape::new(word.chars().map(String::from));
        let computation = execute(&mut machine, &mut tape);
        println!("  {:<10} {} ({:?})", word, computation.verdict(), computation.halt());
    }

    println!("\n=== Demo Complete ===");
}
