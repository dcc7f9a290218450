//! Spatial heat grid: bounds, padded fields, and heat transfer kernels

pub mod bounds;
pub mod field;
pub mod heat_grid;
pub mod heat_transfer;

pub use bounds::SimulationBounds;
pub use field::ScalarField;
pub use heat_grid::HeatGrid;
pub use heat_transfer::CellSpacing;
