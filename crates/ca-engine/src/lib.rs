//! # ca-engine
//!
//! The cellular-automaton engine proper: the per-sweep orchestration of
//! rotation, reaction, and movement over a [`ca_core::Grid`], plus initial
//! random placement and the RNG stream threaded through all of it.

pub mod engine;
pub mod iteration_state;
pub mod movement;
pub mod placement;
pub mod reaction;
pub mod rng;
pub mod rotation;

pub use engine::{CaEngine, MolarFractionTable, RunResult};
pub use iteration_state::IterationState;
pub use movement::MovementAnalyzer;
pub use placement::{calculate_cell_counts, ncell, place_initial_grid};
pub use reaction::{ReactionOutcome, ReactionProcessor};
pub use rng::CaRng;
pub use rotation::{RotationInfo, RotationManager};
