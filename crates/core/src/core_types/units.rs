//! Semantic unit types for the quantities the kernel exchanges with its host
//!
//! Newtype wrappers keep burn durations, normalized wind parameters, and
//! angles from being mixed up with raw temperatures or cell sizes.
//!
//! # Design Philosophy
//! - All wrappers are `f32` and `#[repr(transparent)]`
//! - Total ordering via `Ord` (NaN handled as greater than all values)
//! - `Deref` to the raw value for arithmetic-heavy call sites
//! - Serde support so configurations and host snapshots can carry them
//!
//! # Usage
//! ```
//! use fire_grid_core::core_types::units::{Fraction, Seconds};
//!
//! let mut on_fire = Seconds::new(1.5);
//! on_fire += Seconds::new(0.5);
//! assert_eq!(*on_fire, 2.0);
//!
//! let speed = Fraction::new(0.25);
//! assert_eq!(speed * 100.0, 25.0);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Deref, Mul, Sub};

/// Compare f32 values with total ordering
#[inline]
fn f32_total_cmp(a: f32, b: f32) -> Ordering {
    a.total_cmp(&b)
}

/// Implements `Eq`, `PartialOrd`, `Ord` and `Deref<Target = f32>` for a newtype
macro_rules! impl_total_order_f32 {
    ($ty:ident) => {
        impl Eq for $ty {}

        impl PartialOrd for $ty {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $ty {
            fn cmp(&self, other: &Self) -> Ordering {
                f32_total_cmp(self.0, other.0)
            }
        }

        impl Deref for $ty {
            type Target = f32;
            #[inline]
            fn deref(&self) -> &f32 {
                &self.0
            }
        }

        impl From<$ty> for f32 {
            fn from(v: $ty) -> f32 {
                v.0
            }
        }
    };
}

// ============================================================================
// TIME TYPES
// ============================================================================

/// Time duration in seconds
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Seconds(f32);

impl_total_order_f32!(Seconds);

impl Seconds {
    /// Zero duration
    pub const ZERO: Seconds = Seconds(0.0);

    /// Create a new duration in seconds. Asserts the value is non-negative.
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f32) -> Self {
        assert!(value >= 0.0, "Seconds::new: negative duration is invalid");
        Seconds(value)
    }

    /// Get the raw f32 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl From<f32> for Seconds {
    fn from(v: f32) -> Self {
        Seconds::new(v)
    }
}

impl Add for Seconds {
    type Output = Seconds;
    fn add(self, rhs: Seconds) -> Seconds {
        Seconds(self.0 + rhs.0)
    }
}

impl AddAssign for Seconds {
    fn add_assign(&mut self, rhs: Seconds) {
        self.0 += rhs.0;
    }
}

impl Sub for Seconds {
    type Output = Seconds;
    fn sub(self, rhs: Seconds) -> Seconds {
        Seconds((self.0 - rhs.0).max(0.0))
    }
}

impl Mul<f32> for Seconds {
    type Output = Seconds;
    fn mul(self, rhs: f32) -> Seconds {
        Seconds(self.0 * rhs)
    }
}

impl fmt::Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} s", self.0)
    }
}

// ============================================================================
// FRACTION/RATIO TYPES
// ============================================================================

/// A fraction in the range [0, 1]
/// Used for the host's normalized wind speed and wind angle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Fraction(f32);

impl_total_order_f32!(Fraction);

impl Fraction {
    /// Zero fraction
    pub const ZERO: Fraction = Fraction(0.0);

    /// Full/complete (1.0)
    pub const ONE: Fraction = Fraction(1.0);

    /// Create a new fraction. Asserts value is within [0, 1].
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f32) -> Self {
        assert!(
            value >= 0.0 && value <= 1.0,
            "Fraction::new: value not in [0, 1]"
        );
        Fraction(value)
    }

    /// Create a fraction by clamping into [0, 1]. NaN maps to zero.
    #[inline]
    #[must_use]
    pub fn saturating(value: f32) -> Self {
        if value.is_nan() {
            Fraction::ZERO
        } else {
            Fraction(value.clamp(0.0, 1.0))
        }
    }

    /// Get the raw f32 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Interpret this fraction as a share of a full turn
    #[inline]
    #[must_use]
    pub fn to_turn_angle(self) -> Radians {
        Radians(self.0 * std::f32::consts::TAU)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

impl From<f32> for Fraction {
    fn from(v: f32) -> Self {
        Fraction::new(v)
    }
}

impl Mul<f32> for Fraction {
    type Output = f32;
    fn mul(self, rhs: f32) -> f32 {
        self.0 * rhs
    }
}

impl Mul<Fraction> for f32 {
    type Output = f32;
    fn mul(self, rhs: Fraction) -> f32 {
        self * rhs.0
    }
}

// ============================================================================
// ANGLE TYPES
// ============================================================================

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Radians(f32);

impl_total_order_f32!(Radians);

impl Radians {
    /// Create a new angle in radians
    #[inline]
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Radians(value)
    }

    /// Get the raw f32 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Wrap into [0, 2π)
    #[inline]
    #[must_use]
    pub fn wrapped(self) -> Self {
        Radians(self.0.rem_euclid(std::f32::consts::TAU))
    }

    /// Express this angle as a fraction of a full turn, in [0, 1)
    #[inline]
    #[must_use]
    pub fn to_turn_fraction(self) -> Fraction {
        let turns = self.wrapped().0 / std::f32::consts::TAU;
        // rem_euclid can round up to exactly TAU for tiny negative inputs
        if turns >= 1.0 {
            Fraction::ZERO
        } else {
            Fraction::saturating(turns)
        }
    }

    /// Compute sine
    #[inline]
    #[must_use]
    pub fn sin(self) -> f32 {
        self.0.sin()
    }

    /// Compute cosine
    #[inline]
    #[must_use]
    pub fn cos(self) -> f32 {
        self.0.cos()
    }
}

impl From<f32> for Radians {
    fn from(v: f32) -> Self {
        Radians(v)
    }
}

impl fmt::Display for Radians {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} rad", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_seconds_accumulate() {
        let mut t = Seconds::ZERO;
        t += Seconds::new(0.25);
        t += Seconds::new(0.5);
        assert!((t.value() - 0.75).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "negative duration")]
    fn test_seconds_rejects_negative() {
        let _ = Seconds::new(-1.0);
    }

    #[test]
    fn test_seconds_ordering() {
        assert!(Seconds::new(2.0) > Seconds::new(1.0));
        assert_eq!(Seconds::new(3.0).max(Seconds::new(1.0)), Seconds::new(3.0));
    }

    #[test]
    fn test_fraction_saturating() {
        assert_eq!(Fraction::saturating(1.5), Fraction::ONE);
        assert_eq!(Fraction::saturating(-0.5), Fraction::ZERO);
        assert_eq!(Fraction::saturating(f32::NAN), Fraction::ZERO);
        assert_eq!(Fraction::saturating(0.4).value(), 0.4);
    }

    #[test]
    #[should_panic(expected = "not in [0, 1]")]
    fn test_fraction_rejects_out_of_range() {
        let _ = Fraction::new(1.01);
    }

    #[test]
    fn test_fraction_to_turn_angle() {
        let half = Fraction::new(0.5).to_turn_angle();
        assert!((half.value() - PI).abs() < 1e-6);
        let quarter = Fraction::new(0.25).to_turn_angle();
        assert!((quarter.value() - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_radians_wrap_and_fraction() {
        let r = Radians::new(-PI / 2.0);
        assert!((r.wrapped().value() - 1.5 * PI).abs() < 1e-5);
        assert!((r.to_turn_fraction().value() - 0.75).abs() < 1e-5);
        assert_eq!(Radians::new(TAU).to_turn_fraction(), Fraction::ZERO);
    }
}
