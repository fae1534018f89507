//! # ca-core
//!
//! Shared types for the reaction/diffusion/rotation cellular-automaton
//! engine: lattice topology, species encoding, and the parameter tables
//! derived from user input.
//!
//! ## Design
//!
//! 1. A single integer per cell distinguishes empty / plain / rotation /
//!    intermediate by range (see [`species`]).
//! 2. The lattice's boundary behavior is abstracted behind [`Surface`], so
//!    the engine never special-cases torus vs. box vs. cylinder.
//! 3. Parameter tables (`Pm`, `J`, derived `Pb`) are computed once per run
//!    and treated as read-only afterwards.

pub mod config;
pub mod error;
pub mod grid;
pub mod params;
pub mod progress;
pub mod species;
pub mod surface;

pub use config::EngineConfig;
pub use error::{CaError, Result};
pub use grid::Grid;
pub use params::{Ingredient, JEntry, PairTable, Parameters, Reaction, RotationSpec};
pub use progress::{ProgressEvent, ProgressSink, RecordingSink};
pub use species::Code;
pub use surface::Surface;
