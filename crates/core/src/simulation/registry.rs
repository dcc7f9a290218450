//! In-place partitioned plant storage
//!
//! All plants live in one contiguous `Vec`, split into three gap-free regions
//! by two counters:
//!
//! ```text
//! [0, burning_count)                              OnFire
//! [burning_count, burning_count + active_count)   Normal
//! [burning_count + active_count, len)             Burned
//! ```
//!
//! Order inside a region is irrelevant, so every state transition is a
//! constant number of swaps against a region boundary. Only identity lookup
//! (`index_of`) scans linearly.

use crate::core_types::{Plant, PlantId, PlantState};
use std::ops::{Index, Range};

/// Plants partitioned by combustion state
#[derive(Debug, Clone, Default)]
pub struct PlantRegistry {
    plants: Vec<Plant>,
    burning_count: usize,
    active_count: usize,
}

impl PlantRegistry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry, placing each plant in the region of its state
    #[must_use]
    pub fn from_plants(plants: impl IntoIterator<Item = Plant>) -> Self {
        let plants = plants.into_iter();
        let mut registry = Self {
            plants: Vec::with_capacity(plants.size_hint().0),
            ..Self::default()
        };
        for plant in plants {
            registry.add(plant);
        }
        registry
    }

    /// Total number of plants
    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    /// Number of plants on fire; also the end of the burning region
    pub fn burning_count(&self) -> usize {
        self.burning_count
    }

    /// First index of the normal region
    pub fn active_start(&self) -> usize {
        self.burning_count
    }

    /// Number of normal plants
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Index of the last normal plant, or `None` when no plant is normal
    pub fn active_end(&self) -> Option<usize> {
        (self.active_count > 0).then(|| self.burning_count + self.active_count - 1)
    }

    /// First index of the burned region
    pub fn burned_start(&self) -> usize {
        self.burning_count + self.active_count
    }

    pub fn burned_count(&self) -> usize {
        self.plants.len() - self.burned_start()
    }

    pub fn burning_range(&self) -> Range<usize> {
        0..self.burning_count
    }

    pub fn active_range(&self) -> Range<usize> {
        self.active_start()..self.burned_start()
    }

    pub fn burned_range(&self) -> Range<usize> {
        self.burned_start()..self.plants.len()
    }

    /// Plants currently on fire
    pub fn burning(&self) -> &[Plant] {
        &self.plants[self.burning_range()]
    }

    /// Plants not yet ignited
    pub fn active(&self) -> &[Plant] {
        &self.plants[self.active_range()]
    }

    /// Burned-down plants
    pub fn burned(&self) -> &[Plant] {
        &self.plants[self.burned_range()]
    }

    pub fn get(&self, index: usize) -> Option<&Plant> {
        self.plants.get(index)
    }

    /// Mutable access for bookkeeping that never touches `state`
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Plant> {
        self.plants.get_mut(index)
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Plant> {
        self.plants.iter_mut()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Plant> {
        self.plants.iter()
    }

    /// Current index of a plant (linear scan)
    pub fn index_of(&self, id: PlantId) -> Option<usize> {
        self.plants.iter().position(|p| p.id == id)
    }

    /// Ignite the normal plant at `index`
    ///
    /// The plant swaps with the first normal plant and the burning region
    /// grows over it, so it ends up as the last burning plant.
    ///
    /// Returns the plant's new index, or `None` (no-op) if the index is out of
    /// range or the plant is not normal.
    pub fn ignite(&mut self, index: usize) -> Option<usize> {
        if !self.plants.get(index)?.state.can_transition_to(PlantState::OnFire) {
            return None;
        }

        let first_active = self.burning_count;
        self.plants.swap(index, first_active);
        self.plants[first_active].ignite();
        self.burning_count += 1;
        self.active_count -= 1;
        Some(first_active)
    }

    /// Burn down the burning plant at `index`
    ///
    /// The plant moves to the last burning slot, then trades places with the
    /// last normal plant. The burning region shrinks by one and the normal
    /// region shifts left by one, so the plant lands at the new burned start.
    ///
    /// Returns the plant's new index, or `None` (no-op) if the index is out of
    /// range or the plant is not on fire.
    pub fn burn_down(&mut self, index: usize) -> Option<usize> {
        if !self.plants.get(index)?.state.can_transition_to(PlantState::Burned) {
            return None;
        }

        let last_burning = self.burning_count - 1;
        let last_active = last_burning + self.active_count;
        self.plants.swap(index, last_burning);
        self.plants.swap(last_burning, last_active);
        self.plants[last_active].state = PlantState::Burned;
        self.burning_count -= 1;
        Some(last_active)
    }

    /// Insert a plant into the region matching its state
    ///
    /// Returns the index the plant was placed at.
    pub fn add(&mut self, plant: Plant) -> usize {
        let state = plant.state;
        let burned_start = self.burned_start();
        self.plants.push(plant);
        let appended = self.plants.len() - 1;

        match state {
            // The tail already belongs to the burned region
            PlantState::Burned => appended,
            PlantState::Normal => {
                self.plants.swap(appended, burned_start);
                self.active_count += 1;
                burned_start
            }
            PlantState::OnFire => {
                let first_active = self.burning_count;
                self.plants.swap(appended, burned_start);
                self.plants.swap(burned_start, first_active);
                self.burning_count += 1;
                first_active
            }
        }
    }

    /// Remove a plant by identity, compacting its region
    ///
    /// Returns the removed plant, or `None` if no plant has this id.
    pub fn remove(&mut self, id: PlantId) -> Option<Plant> {
        let index = self.index_of(id)?;
        let last = self.plants.len() - 1;

        match self.plants[index].state {
            PlantState::Burned => {
                self.plants.swap(index, last);
            }
            PlantState::Normal => {
                let last_active = self.burned_start() - 1;
                self.plants.swap(index, last_active);
                self.plants.swap(last_active, last);
                self.active_count -= 1;
            }
            PlantState::OnFire => {
                let last_burning = self.burning_count - 1;
                let last_active = self.burned_start() - 1;
                self.plants.swap(index, last_burning);
                self.plants.swap(last_burning, last_active);
                self.plants.swap(last_active, last);
                self.burning_count -= 1;
            }
        }

        self.plants.pop()
    }

    /// Drop every plant
    pub fn clear(&mut self) {
        self.plants.clear();
        self.burning_count = 0;
        self.active_count = 0;
    }

    /// Whether every plant sits in the region matching its state
    pub fn is_consistent(&self) -> bool {
        self.burned_start() <= self.plants.len()
            && self.burning().iter().all(|p| p.state == PlantState::OnFire)
            && self.active().iter().all(|p| p.state == PlantState::Normal)
            && self.burned().iter().all(|p| p.state == PlantState::Burned)
    }
}

impl Index<usize> for PlantRegistry {
    type Output = Plant;

    fn index(&self, index: usize) -> &Plant {
        &self.plants[index]
    }
}

impl<'a> IntoIterator for &'a PlantRegistry {
    type Item = &'a Plant;
    type IntoIter = std::slice::Iter<'a, Plant>;

    fn into_iter(self) -> Self::IntoIter {
        self.plants.iter()
    }
}
