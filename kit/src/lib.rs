//! Passage facade crate.
//!
//! This crate re-exports core, runtime and observe crates with a single entry point.
//! Hosts implement the `Screen` capability traits; every screen then gets
//! `TransitionHandler` for free.

pub use passage_core as core;
#[cfg(feature = "observe")]
pub use passage_observe as observe;
pub use passage_runtime as runtime;

pub use passage_core::{PassageConfig, Schematic, Screen, TransitionError, TransitionResult};
pub use passage_runtime::{
    CloseResolution, CloseTransitionNode, SegueTransitionNode, TransitionHandler, TransitionNode,
};

pub mod prelude {
    pub use passage_core::prelude::*;
    pub use passage_runtime::prelude::*;
}
