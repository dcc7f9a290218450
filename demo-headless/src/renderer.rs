//! Text renderer for the demo host

use fire_grid_core::{Plant, PlantId, PlantState, Renderer};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

/// Counts shared between the renderer and the host loop
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub normal: usize,
    pub on_fire: usize,
    pub burned: usize,
    pub frames: u64,
}

/// Tracks every registered plant's last known state and logs a summary
/// every `report_every` frames
#[derive(Debug)]
pub struct TallyRenderer {
    states: FxHashMap<PlantId, PlantState>,
    tally: Rc<RefCell<Tally>>,
    report_every: u64,
}

impl TallyRenderer {
    pub fn new(report_every: u64) -> Self {
        Self {
            states: FxHashMap::default(),
            tally: Rc::new(RefCell::new(Tally::default())),
            report_every: report_every.max(1),
        }
    }

    /// Handle to the live counts
    pub fn tally(&self) -> Rc<RefCell<Tally>> {
        Rc::clone(&self.tally)
    }

    fn count(&self, state: PlantState, delta: isize) {
        let mut tally = self.tally.borrow_mut();
        let slot = match state {
            PlantState::Normal => &mut tally.normal,
            PlantState::OnFire => &mut tally.on_fire,
            PlantState::Burned => &mut tally.burned,
        };
        *slot = slot.saturating_add_signed(delta);
    }
}

impl Renderer for TallyRenderer {
    fn register(&mut self, plant: &Plant) {
        if let Some(previous) = self.states.insert(plant.id(), plant.state()) {
            self.count(previous, -1);
        }
        self.count(plant.state(), 1);
    }

    fn unregister(&mut self, plant: &Plant) {
        if let Some(previous) = self.states.remove(&plant.id()) {
            self.count(previous, -1);
        }
    }

    fn notify_state_change(&mut self, plant: &Plant) {
        let Some(slot) = self.states.get_mut(&plant.id()) else {
            debug!("State change for unregistered {}", plant.id());
            return;
        };
        let previous = std::mem::replace(slot, plant.state());
        self.count(previous, -1);
        self.count(plant.state(), 1);
    }

    fn render(&mut self) {
        let tally = {
            let mut tally = self.tally.borrow_mut();
            tally.frames += 1;
            *tally
        };
        if tally.frames % self.report_every == 0 {
            info!(
                "frame {:>6}: {:>6} normal {:>6} on fire {:>6} burned",
                tally.frames, tally.normal, tally.on_fire, tally.burned
            );
        }
    }

    fn clear(&mut self) {
        self.states.clear();
        *self.tally.borrow_mut() = Tally::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fire_grid_core::{Seconds, Vec3};

    fn plant(id: u32, state: PlantState) -> Plant {
        Plant::new(PlantId(id), Vec3::zeros(), Seconds::new(1.0)).with_state(state)
    }

    #[test]
    fn test_tally_follows_lifecycle() {
        let mut renderer = TallyRenderer::new(10);
        let tally = renderer.tally();

        renderer.register(&plant(0, PlantState::Normal));
        renderer.register(&plant(1, PlantState::Normal));
        renderer.notify_state_change(&plant(0, PlantState::OnFire));
        renderer.notify_state_change(&plant(0, PlantState::Burned));
        renderer.unregister(&plant(1, PlantState::Normal));
        renderer.render();

        assert_eq!(
            *tally.borrow(),
            Tally {
                normal: 0,
                on_fire: 0,
                burned: 1,
                frames: 1
            }
        );
    }

    #[test]
    fn test_unknown_plants_are_ignored() {
        let mut renderer = TallyRenderer::new(1);
        renderer.notify_state_change(&plant(5, PlantState::OnFire));
        renderer.unregister(&plant(5, PlantState::OnFire));
        assert_eq!(*renderer.tally().borrow(), Tally::default());
    }
}
