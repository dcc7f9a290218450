//! Axis-aligned simulation volume

use crate::core_types::Vec3;
use crate::error::{Axis, ConfigError};
use serde::{Deserialize, Serialize};

/// Axis-aligned box enclosing the simulated plane
///
/// X and Z span the ground plane mapped onto the heat grid; Y is height and
/// only matters for containment checks of newly placed plants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl SimulationBounds {
    /// Create bounds from two corners
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Full extent on each axis
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Inclusive containment test on all three axes
    #[must_use]
    pub fn contains(&self, point: &Vec3) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }

    /// Check the box can back a heat grid
    ///
    /// X and Z need a strictly positive extent; Y may be flat.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DegenerateBounds`] naming the first bad axis.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, axis, allow_flat) in [(0, Axis::X, false), (1, Axis::Y, true), (2, Axis::Z, false)] {
            let (min, max) = (self.min[i], self.max[i]);
            let ok = min.is_finite()
                && max.is_finite()
                && if allow_flat { max >= min } else { max > min };
            if !ok {
                return Err(ConfigError::DegenerateBounds { axis, min, max });
            }
        }
        Ok(())
    }
}

impl Default for SimulationBounds {
    fn default() -> Self {
        Self {
            min: Vec3::zeros(),
            max: Vec3::new(256.0, 10.0, 256.0),
        }
    }
}
