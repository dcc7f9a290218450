//! Capabilities the host supplies to the simulation
//!
//! The kernel never renders or decides where plants stand. A host plugs in a
//! [`PlantProvider`] (placement strategy) and a [`Renderer`] (state sink);
//! both are called synchronously from the driver and must not reach back
//! into the registry or grid.

use crate::core_types::{Plant, Vec3};

/// Supplies plants for a region and constructs single plants on demand
pub trait PlantProvider {
    /// Create the initial plant population inside the box `[min, max]`
    ///
    /// Called once per (re)generation. Plant ids must be unique for the
    /// lifetime of the provider, including plants from [`Self::get_plant`].
    fn get_plants(&mut self, min: Vec3, max: Vec3) -> Vec<Plant>;

    /// Create one plant at `position`
    fn get_plant(&mut self, position: Vec3) -> Plant;

    /// Forget every plant created so far
    fn clear(&mut self);
}

/// Receives plant lifecycle notifications
pub trait Renderer {
    /// A plant entered the simulation
    fn register(&mut self, plant: &Plant);

    /// A plant left the simulation
    fn unregister(&mut self, plant: &Plant);

    /// A plant changed state (Normal → OnFire or OnFire → Burned)
    fn notify_state_change(&mut self, plant: &Plant);

    /// All transitions for the current tick have been applied
    fn render(&mut self);

    /// Drop every registered plant
    fn clear(&mut self);
}
