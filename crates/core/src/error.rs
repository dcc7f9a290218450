//! Configuration errors surfaced by the simulation driver
//!
//! Only configuration problems are errors. Invalid transition requests and
//! unknown plant ids are no-ops reported through `Option`/`bool` returns.

use std::fmt;

/// Grid axis named in configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Reasons a simulation refuses to start, regenerate, or reconfigure
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Grid resolution on an axis is zero
    ZeroResolution {
        /// Offending axis
        axis: Axis,
    },
    /// Border padding is zero, so edge cells would lack neighbors
    ZeroBorder,
    /// Bounds have no extent (or are inverted / non-finite) on an axis
    DegenerateBounds {
        /// Offending axis
        axis: Axis,
        /// Minimum coordinate on that axis
        min: f32,
        /// Maximum coordinate on that axis
        max: f32,
    },
    /// A scalar parameter is non-finite or out of range
    InvalidParameter {
        /// Parameter name as it appears in `SimulationConfig`
        name: &'static str,
        /// Rejected value
        value: f32,
    },
    /// No plant provider was attached before (re)generation
    MissingProvider,
    /// Grid reallocation was requested while ticks are running
    ReconfigureWhileRunning,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroResolution { axis } => {
                write!(f, "Grid resolution on {axis} axis must be positive")
            }
            ConfigError::ZeroBorder => write!(f, "Grid border must be at least one cell"),
            ConfigError::DegenerateBounds { axis, min, max } => write!(
                f,
                "Simulation bounds are degenerate on {axis} axis (min={min}, max={max})"
            ),
            ConfigError::InvalidParameter { name, value } => {
                write!(f, "Parameter '{name}' has invalid value {value}")
            }
            ConfigError::MissingProvider => write!(f, "No plant provider attached"),
            ConfigError::ReconfigureWhileRunning => {
                write!(f, "Grid can only be reconfigured while the simulation is paused")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_problem() {
        let err = ConfigError::DegenerateBounds {
            axis: Axis::Z,
            min: 5.0,
            max: 5.0,
        };
        assert_eq!(
            err.to_string(),
            "Simulation bounds are degenerate on z axis (min=5, max=5)"
        );

        let err = ConfigError::InvalidParameter {
            name: "heat_transfer_speed",
            value: -1.0,
        };
        assert!(err.to_string().contains("heat_transfer_speed"));
    }

    #[test]
    fn test_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&ConfigError::MissingProvider);
    }
}
