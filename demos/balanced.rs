//! Balanced a^n b^n with One Stack
//!
//! This demo builds a one-stack machine and replays its run record by record.
//!
//! Key concepts:
//! - Building a machine with `MachineBuilder`
//! - Acceptance that requires empty stacks
//! - Stepping through a finished computation
//! - Batch runs over several tapes
//!
//! Run with: cargo run --example balanced

use autosim::batch::run_batch;
use autosim::builder::MachineBuilder;
use autosim::core::{StackOp, Tape};
use autosim::loader::read_inputs;
use autosim::machine::{Acceptance, Transition};
use autosim::replay::Session;

fn main() {
    println!("=== Balanced a^n b^n ===\n");

    let machine = MachineBuilder::new()
        .states(["Q0", "Q1"])
        .initial("Q0")
        .finals(["Q1"])
        .alphabet(["a", "b"])
        .acceptance(Acceptance::FinalStateAndEmptyStacks)
        .transition("Q0", Transition::one_stack("a", StackOp::push("X"), "Q0"))
        .transition("Q0", Transition::one_stack("b", StackOp::pop("X"), "Q1"))
        .transition("Q1", Transition::one_stack("b", StackOp::pop("X"), "Q1"))
        .one_stack()
        .unwrap();

    let mut session = Session::new(machine.clone());
    let replay = session.run(&mut Tape::from(vec!["a", "a", "b", "b"]));

    println!("Replaying a a b b:");
    loop {
        let frame = replay.frame();
        let symbol = frame.record.symbol.as_deref().unwrap_or("-");
        println!(
            "  [{}] {} --{}--> {}  stack {:?}  ({})",
            frame.index, frame.record.from, symbol, frame.record.to, frame.stacks[0], frame.outcome()
        );
        if replay.is_at_end() {
            break;
        }
        replay.step_forward();
    }

    println!("\nBatch:");
    let mut machine = machine;
    let report = run_batch(&mut machine, read_inputs("a,b\na,a,b\na,a,a,b,b,b\nb,a"));
    for entry in &report.entries {
        println!("  {:<14} {}", entry.input.join(""), entry.verdict);
    }
    println!(
        "\n{} accepted, {} rejected (report {})",
        report.accepted(),
        report.rejected(),
        report.id
    );

    println!("\n=== Demo Complete ===");
}
