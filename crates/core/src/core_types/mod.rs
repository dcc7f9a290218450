//! Core types shared by the grid and the simulation driver

pub mod plant;
pub mod units;
pub mod vec3;

pub use plant::{CellIndex, Plant, PlantId, PlantState};
pub use units::{Fraction, Radians, Seconds};
pub use vec3::Vec3;
