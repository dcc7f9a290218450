//! Weather inputs to the heat grid

pub mod wind;

pub use wind::{Wind, WindOutcome, BUOYANCY_BIAS, DIAGONAL_THRESHOLD, WIND_SPEED_SCALE};
