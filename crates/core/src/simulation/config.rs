//! Simulation configuration
//!
//! Defaults give a 256×256 grid, sources at 1200°,
//! ignition above 600°, and a decay of one heat unit per scaled second.

use crate::error::{Axis, ConfigError};
use crate::grid::SimulationBounds;
use serde::{Deserialize, Serialize};

/// How a normal plant reads its local temperature during the ignition pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SamplingMode {
    /// Read the plant's cached cell (1 lookup)
    #[default]
    NearestCached,
    /// Recompute the cell from the position every tick (1 lookup)
    Nearest,
    /// Interpolate the 4 surrounding cells (4 lookups, no popping at cell edges)
    Bilinear,
}

/// When passive dissipation runs relative to wind advection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DissipationPolicy {
    /// Dissipate exactly once per tick: after advection, or as the calm-wind fallback
    #[default]
    ExactlyOnce,
    /// Dissipate only as the calm-wind fallback; advection ticks do not cool
    FallbackOnly,
}

/// Tunable parameters of a fire simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Interior cells along world X
    pub resolution_x: usize,
    /// Interior cells along world Z
    pub resolution_y: usize,
    /// Padding cells on each side of the grid
    pub border: usize,
    /// Global multiplier applied to the frame delta before heat transfer
    pub heat_transfer_speed: f32,
    /// Temperature stamped by every burning plant
    pub fire_temperature: f32,
    /// Local heat above which a normal plant ignites
    pub flashpoint_temperature: f32,
    /// Heat removed per scaled second by dissipation
    pub decay_rate: f32,
    /// World-space box mapped onto the grid interior
    pub bounds: SimulationBounds,
    pub sampling: SamplingMode,
    pub dissipation: DissipationPolicy,
    /// Seed for choosing the initially ignited plant; `None` draws one per regeneration
    pub ignition_seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            resolution_x: 256,
            resolution_y: 256,
            border: 1,
            heat_transfer_speed: 1.0,
            fire_temperature: 1200.0,
            flashpoint_temperature: 600.0,
            decay_rate: 1.0,
            bounds: SimulationBounds::default(),
            sampling: SamplingMode::default(),
            dissipation: DissipationPolicy::default(),
            ignition_seed: None,
        }
    }
}

impl SimulationConfig {
    /// Set grid resolution
    pub fn with_resolution(mut self, resolution_x: usize, resolution_y: usize) -> Self {
        self.resolution_x = resolution_x;
        self.resolution_y = resolution_y;
        self
    }

    pub fn with_bounds(mut self, bounds: SimulationBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_heat_transfer_speed(mut self, speed: f32) -> Self {
        self.heat_transfer_speed = speed;
        self
    }

    /// Set source and ignition temperatures
    pub fn with_temperatures(mut self, fire: f32, flashpoint: f32) -> Self {
        self.fire_temperature = fire;
        self.flashpoint_temperature = flashpoint;
        self
    }

    pub fn with_decay_rate(mut self, decay_rate: f32) -> Self {
        self.decay_rate = decay_rate;
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingMode) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_dissipation(mut self, dissipation: DissipationPolicy) -> Self {
        self.dissipation = dissipation;
        self
    }

    pub fn with_ignition_seed(mut self, seed: u64) -> Self {
        self.ignition_seed = Some(seed);
        self
    }

    /// Check every parameter before a grid is allocated
    ///
    /// # Errors
    ///
    /// Returns the first problem found: zero resolution or border, degenerate
    /// bounds, or a non-finite/out-of-range scalar.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution_x == 0 {
            return Err(ConfigError::ZeroResolution { axis: Axis::X });
        }
        if self.resolution_y == 0 {
            return Err(ConfigError::ZeroResolution { axis: Axis::Z });
        }
        if self.border == 0 {
            return Err(ConfigError::ZeroBorder);
        }
        self.bounds.validate()?;

        non_negative("heat_transfer_speed", self.heat_transfer_speed)?;
        non_negative("decay_rate", self.decay_rate)?;
        positive("fire_temperature", self.fire_temperature)?;
        positive("flashpoint_temperature", self.flashpoint_temperature)?;
        Ok(())
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Vec3;

    #[test]
    fn test_defaults_are_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.fire_temperature, 1200.0);
        assert_eq!(config.flashpoint_temperature, 600.0);
        assert_eq!(config.sampling, SamplingMode::NearestCached);
        assert_eq!(config.dissipation, DissipationPolicy::ExactlyOnce);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_resolution_is_refused() {
        let config = SimulationConfig::default().with_resolution(0, 10);
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroResolution { axis: Axis::X })
        );
    }

    #[test]
    fn test_degenerate_bounds_are_refused() {
        let config = SimulationConfig::default()
            .with_bounds(SimulationBounds::new(Vec3::zeros(), Vec3::new(10.0, 1.0, 0.0)));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DegenerateBounds { axis: Axis::Z, .. })
        ));
    }

    #[test]
    fn test_scalars_are_checked() {
        let config = SimulationConfig::default().with_heat_transfer_speed(f32::NAN);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter {
                name: "heat_transfer_speed",
                ..
            })
        ));

        let config = SimulationConfig::default().with_temperatures(0.0, 600.0);
        assert!(config.validate().is_err());

        // Zero speed freezes heat transfer but is a legal setting
        let config = SimulationConfig::default().with_heat_transfer_speed(0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{ "resolution_x": 32, "sampling": "Bilinear" }"#).unwrap();
        assert_eq!(config.resolution_x, 32);
        assert_eq!(config.resolution_y, 256);
        assert_eq!(config.sampling, SamplingMode::Bilinear);
        assert_eq!(config.ignition_seed, None);
    }
}
