//! Fire Grid Simulation Core Library
//!
//! Simulates fire spreading across a population of plants standing on a
//! plane. A padded heat grid carries radiation, wind advection, and
//! dissipation; a partitioned plant registry tracks which plants are
//! unburned, burning, or burned down.
//!
//! ## Layout
//!
//! - [`core_types`]: plants, typed units, vectors
//! - [`grid`]: the two-layer [`HeatGrid`] and its transfer kernels
//! - [`weather`]: the [`Wind`] model
//! - [`simulation`]: the [`FireSimulation`] driver, [`PlantRegistry`], and
//!   the host-facing [`PlantProvider`] and [`Renderer`] traits
//!
//! The kernel never renders and never decides where plants stand; hosts
//! plug those in through the traits.

pub mod core_types;
pub mod error;
pub mod grid;
pub mod simulation;
pub mod weather;

pub use core_types::{CellIndex, Fraction, Plant, PlantId, PlantState, Radians, Seconds, Vec3};
pub use error::{Axis, ConfigError};
pub use grid::{HeatGrid, SimulationBounds};
pub use simulation::{
    DissipationPolicy, FireSimulation, PlantProvider, PlantRegistry, Renderer, SamplingMode,
    SimulationConfig, SimulationStats, TickSummary,
};
pub use weather::{Wind, WindOutcome};
