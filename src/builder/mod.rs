//! Builder API for ergonomic machine construction.
//!
//! The builder and the definition loader share one validation path: both end
//! in [`Definition::validate`](crate::machine::Definition::validate).

pub mod machine;

pub use machine::MachineBuilder;
