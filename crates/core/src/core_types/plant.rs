//! Combustible plants and their three-state burn lifecycle
//!
//! A [`Plant`] is the unit the kernel tracks: a fixed world position, a burn
//! duration, and a state that only ever moves forward:
//!
//! ```text
//! Normal --[local heat > flashpoint]--> OnFire --[time on fire > burn time]--> Burned
//! ```
//!
//! The plant also caches the heat-grid cell it stands in so the per-tick
//! ignition test is a single array read.

use super::units::Seconds;
use super::vec3::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a plant, assigned by whoever constructs it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct PlantId(pub u32);

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "plant#{}", self.0)
    }
}

/// Combustion state of a plant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlantState {
    /// Unburned, eligible for ignition
    #[default]
    Normal,
    /// Burning and acting as a heat source
    OnFire,
    /// Burned down (terminal)
    Burned,
}

impl PlantState {
    /// Whether `self -> next` is a legal forward transition
    #[must_use]
    pub fn can_transition_to(self, next: PlantState) -> bool {
        matches!(
            (self, next),
            (PlantState::Normal, PlantState::OnFire) | (PlantState::OnFire, PlantState::Burned)
        )
    }
}

/// Cached heat-grid coordinates of a plant (padded grid space)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellIndex {
    /// Column, including the border offset
    pub ix: usize,
    /// Row, including the border offset
    pub iy: usize,
}

impl CellIndex {
    /// Create a cell index
    #[must_use]
    pub const fn new(ix: usize, iy: usize) -> Self {
        Self { ix, iy }
    }
}

/// A combustible object on the simulation plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub(crate) id: PlantId,
    pub(crate) position: Vec3,
    pub(crate) state: PlantState,
    /// How long the plant burns once ignited
    pub(crate) burn_time: Seconds,
    /// Elapsed time since ignition; only meaningful while `OnFire`
    pub(crate) time_on_fire: Seconds,
    pub(crate) cell: CellIndex,
}

impl Plant {
    /// Create an unburned plant
    ///
    /// # Arguments
    ///
    /// * `id` - Identity, unique within one simulation
    /// * `position` - World position; only X and Z select the grid cell
    /// * `burn_time` - Seconds the plant stays on fire before burning down
    #[must_use]
    pub fn new(id: PlantId, position: Vec3, burn_time: Seconds) -> Self {
        Self {
            id,
            position,
            state: PlantState::Normal,
            burn_time,
            time_on_fire: Seconds::ZERO,
            cell: CellIndex::default(),
        }
    }

    /// Same plant, inserted in a given state (for programmatic insertion)
    #[must_use]
    pub fn with_state(mut self, state: PlantState) -> Self {
        self.state = state;
        self
    }

    /// Plant identity
    pub fn id(&self) -> PlantId {
        self.id
    }

    /// World position
    pub fn position(&self) -> &Vec3 {
        &self.position
    }

    /// Current combustion state
    pub fn state(&self) -> PlantState {
        self.state
    }

    /// Configured burn duration
    pub fn burn_time(&self) -> Seconds {
        self.burn_time
    }

    /// Time spent on fire so far
    pub fn time_on_fire(&self) -> Seconds {
        self.time_on_fire
    }

    /// Cached grid cell, valid until the grid is reconfigured
    pub fn cell(&self) -> CellIndex {
        self.cell
    }

    pub fn is_burning(&self) -> bool {
        self.state == PlantState::OnFire
    }

    /// Mark on fire and restart the burn clock
    pub(crate) fn ignite(&mut self) {
        self.state = PlantState::OnFire;
        self.time_on_fire = Seconds::ZERO;
    }

    /// Advance the burn clock; returns true once the burn time is exceeded
    pub(crate) fn age(&mut self, dt: Seconds) -> bool {
        self.time_on_fire += dt;
        self.time_on_fire > self.burn_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plant() -> Plant {
        Plant::new(PlantId(7), Vec3::new(1.0, 0.0, 2.0), Seconds::new(3.0))
    }

    #[test]
    fn test_new_plant_is_normal() {
        let p = plant();
        assert_eq!(p.state(), PlantState::Normal);
        assert_eq!(p.time_on_fire(), Seconds::ZERO);
        assert_eq!(p.id(), PlantId(7));
    }

    #[test]
    fn test_transitions_only_move_forward() {
        use PlantState::{Burned, Normal, OnFire};
        assert!(Normal.can_transition_to(OnFire));
        assert!(OnFire.can_transition_to(Burned));
        assert!(!Burned.can_transition_to(Normal));
        assert!(!Burned.can_transition_to(OnFire));
        assert!(!OnFire.can_transition_to(Normal));
        assert!(!Normal.can_transition_to(Burned));
    }

    #[test]
    fn test_age_reports_burn_out_strictly_after_burn_time() {
        let mut p = plant();
        p.ignite();
        assert!(!p.age(Seconds::new(2.0)));
        // exactly at burn time is still burning
        assert!(!p.age(Seconds::new(1.0)));
        assert!(p.age(Seconds::new(0.01)));
    }

    #[test]
    fn test_ignite_resets_clock() {
        let mut p = plant();
        p.time_on_fire = Seconds::new(10.0);
        p.ignite();
        assert!(p.is_burning());
        assert_eq!(p.time_on_fire(), Seconds::ZERO);
    }
}
