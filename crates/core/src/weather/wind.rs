//! Wind model feeding heat-grid advection
//!
//! The host supplies a normalized speed and angle. Each tick they become a
//! 3D propagation vector with a constant upward (buoyancy) component:
//!
//! ```text
//! s = speed · WIND_SPEED_SCALE
//! a = angle · 2π
//! p = normalize(cos(a)·s, BUOYANCY_BIAS, sin(a)·s)
//! ```
//!
//! The horizontal part of `p` is quantized to a grid-neighbor offset. A
//! component contributes an offset only when it exceeds `cos(45°)`, so weak
//! or strongly vertical wind produces no lateral transport at all.

use crate::core_types::{Fraction, Radians, Vec3};
use serde::{Deserialize, Serialize};

/// Multiplier mapping normalized speed onto the propagation vector's scale
pub const WIND_SPEED_SCALE: f32 = 100.0;

/// Constant upward component representing hot air rising
pub const BUOYANCY_BIAS: f32 = 1.0;

/// A horizontal component must exceed `cos(45°)` to select a neighbor offset
pub const DIAGONAL_THRESHOLD: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Host-facing wind parameters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Wind {
    /// Speed in [0, 1]
    speed: Fraction,
    /// Direction as a share of a full turn, in [0, 1)
    angle: Fraction,
}

impl Wind {
    /// No wind: heat only rises
    pub const CALM: Wind = Wind {
        speed: Fraction::ZERO,
        angle: Fraction::ZERO,
    };

    /// Build from normalized parameters
    ///
    /// # Arguments
    ///
    /// * `speed` - Speed in [0, 1]
    /// * `angle` - Direction in [0, 1), mapped onto [0, 2π); 0 blows toward +X
    #[must_use]
    pub fn from_normalized(speed: Fraction, angle: Fraction) -> Self {
        let angle = if angle >= Fraction::ONE {
            Fraction::ZERO
        } else {
            angle
        };
        Self { speed, angle }
    }

    /// Build from a world-space direction on the X/Z plane
    ///
    /// The Y component of `direction` is ignored. A zero horizontal direction
    /// yields calm wind.
    #[must_use]
    pub fn from_direction(direction: &Vec3, speed: Fraction) -> Self {
        if direction.x == 0.0 && direction.z == 0.0 {
            return Self::CALM;
        }
        let angle = Radians::new(direction.z.atan2(direction.x));
        Self {
            speed,
            angle: angle.to_turn_fraction(),
        }
    }

    /// Normalized speed
    pub fn speed(&self) -> Fraction {
        self.speed
    }

    /// Normalized angle
    pub fn angle(&self) -> Fraction {
        self.angle
    }

    /// Direction in radians, in [0, 2π)
    pub fn angle_radians(&self) -> Radians {
        self.angle.to_turn_angle()
    }

    /// Unit propagation vector including the buoyancy bias
    #[must_use]
    pub fn propagation_vector(&self) -> Vec3 {
        let s = self.speed * WIND_SPEED_SCALE;
        let a = self.angle_radians();
        Vec3::new(a.cos() * s, BUOYANCY_BIAS, a.sin() * s).normalize()
    }
}

/// Result of projecting a propagation vector onto the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindOutcome {
    /// No lateral offset; the grid dissipated instead of advecting
    Dissipated,
    /// Heat was advected one cell along the offset
    Advected {
        /// Offset along grid x (world X)
        offset_x: isize,
        /// Offset along grid y (world Z)
        offset_y: isize,
        /// Length of the horizontal part of the unit direction
        multiplier: f32,
    },
}

impl WindOutcome {
    /// Quantize an arbitrary propagation vector
    ///
    /// The vector is normalized first; a zero or non-finite vector is calm.
    #[must_use]
    pub fn project(propagation: &Vec3) -> Self {
        let Some(dir) = propagation.try_normalize(f32::EPSILON) else {
            return WindOutcome::Dissipated;
        };

        let offset_x = quantize(dir.x);
        let offset_y = quantize(dir.z);
        if offset_x == 0 && offset_y == 0 {
            return WindOutcome::Dissipated;
        }

        WindOutcome::Advected {
            offset_x,
            offset_y,
            multiplier: dir.x.hypot(dir.z),
        }
    }

    pub fn is_advected(&self) -> bool {
        matches!(self, WindOutcome::Advected { .. })
    }
}

fn quantize(component: f32) -> isize {
    if component.abs() > DIAGONAL_THRESHOLD {
        component.signum() as isize
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_calm_wind_points_straight_up() {
        let p = Wind::CALM.propagation_vector();
        assert_relative_eq!(p, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(WindOutcome::project(&p), WindOutcome::Dissipated);
    }

    #[test]
    fn test_strong_wind_along_x() {
        let wind = Wind::from_normalized(Fraction::new(0.5), Fraction::ZERO);
        let outcome = WindOutcome::project(&wind.propagation_vector());
        match outcome {
            WindOutcome::Advected {
                offset_x,
                offset_y,
                multiplier,
            } => {
                assert_eq!((offset_x, offset_y), (1, 0));
                // s = 50: horizontal share is 50 / sqrt(50² + 1)
                assert_relative_eq!(multiplier, 50.0 / 2501.0_f32.sqrt(), epsilon = 1e-5);
            }
            WindOutcome::Dissipated => panic!("expected advection"),
        }
    }

    #[test]
    fn test_quarter_turn_blows_along_positive_z() {
        let wind = Wind::from_normalized(Fraction::new(1.0), Fraction::new(0.25));
        let outcome = WindOutcome::project(&wind.propagation_vector());
        assert!(matches!(
            outcome,
            WindOutcome::Advected {
                offset_x: 0,
                offset_y: 1,
                ..
            }
        ));

        let wind = Wind::from_normalized(Fraction::new(1.0), Fraction::new(0.5));
        assert!(matches!(
            WindOutcome::project(&wind.propagation_vector()),
            WindOutcome::Advected {
                offset_x: -1,
                offset_y: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_weak_wind_falls_back() {
        // s = 0.5: horizontal share 0.5 / sqrt(1.25) ≈ 0.447 < 0.707
        let wind = Wind::from_normalized(Fraction::new(0.005), Fraction::ZERO);
        assert_eq!(
            WindOutcome::project(&wind.propagation_vector()),
            WindOutcome::Dissipated
        );
    }

    #[test]
    fn test_diagonal_wind_never_selects_an_offset() {
        // At 45° both components are at most cos(45°) of the unit vector
        let wind = Wind::from_normalized(Fraction::ONE, Fraction::new(0.125));
        assert_eq!(
            WindOutcome::project(&wind.propagation_vector()),
            WindOutcome::Dissipated
        );
    }

    #[test]
    fn test_zero_vector_is_calm() {
        assert_eq!(WindOutcome::project(&Vec3::zeros()), WindOutcome::Dissipated);
    }

    #[test]
    fn test_from_direction_matches_angle() {
        let wind = Wind::from_direction(&Vec3::new(0.0, 0.0, -3.0), Fraction::new(0.3));
        assert_relative_eq!(wind.angle().value(), 0.75, epsilon = 1e-5);
        assert_eq!(wind.speed(), Fraction::new(0.3));

        let calm = Wind::from_direction(&Vec3::new(0.0, 5.0, 0.0), Fraction::ONE);
        assert_eq!(calm, Wind::CALM);
    }

    #[test]
    fn test_full_turn_angle_wraps_to_zero() {
        let wind = Wind::from_normalized(Fraction::new(0.2), Fraction::ONE);
        assert_eq!(wind.angle(), Fraction::ZERO);
    }
}
