//! Shared fixtures for the integration tests

#![allow(dead_code)]

use fire_grid_core::{
    Plant, PlantId, PlantProvider, Renderer, Seconds, SimulationBounds, SimulationConfig, Vec3,
};
use std::cell::RefCell;
use std::rc::Rc;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// One plant per lattice cell centre
pub struct LatticeProvider {
    next_id: u32,
    per_axis: usize,
    burn_time: f32,
}

impl LatticeProvider {
    pub fn new(per_axis: usize, burn_time: f32) -> Self {
        Self {
            next_id: 0,
            per_axis,
            burn_time,
        }
    }
}

impl PlantProvider for LatticeProvider {
    fn get_plants(&mut self, min: Vec3, max: Vec3) -> Vec<Plant> {
        let n = self.per_axis;
        let step_x = (max.x - min.x) / n as f32;
        let step_z = (max.z - min.z) / n as f32;
        (0..n * n)
            .map(|i| {
                let (ix, iz) = (i % n, i / n);
                Vec3::new(
                    min.x + (ix as f32 + 0.5) * step_x,
                    min.y,
                    min.z + (iz as f32 + 0.5) * step_z,
                )
            })
            .map(|pos| self.get_plant(pos))
            .collect()
    }

    fn get_plant(&mut self, position: Vec3) -> Plant {
        let id = PlantId(self.next_id);
        self.next_id += 1;
        Plant::new(id, position, Seconds::new(self.burn_time))
    }

    fn clear(&mut self) {
        self.next_id = 0;
    }
}

/// Counts notifications; clones share the same counters
#[derive(Clone, Default)]
pub struct CountingRenderer {
    pub state_changes: Rc<RefCell<usize>>,
    pub renders: Rc<RefCell<usize>>,
}

impl Renderer for CountingRenderer {
    fn register(&mut self, _plant: &Plant) {}

    fn unregister(&mut self, _plant: &Plant) {}

    fn notify_state_change(&mut self, _plant: &Plant) {
        *self.state_changes.borrow_mut() += 1;
    }

    fn render(&mut self) {
        *self.renders.borrow_mut() += 1;
    }

    fn clear(&mut self) {}
}

/// `size`×`size` grid whose cells are 1×1 world units
pub fn unit_config(size: usize) -> SimulationConfig {
    let extent = size as f32;
    SimulationConfig::default()
        .with_resolution(size, size)
        .with_bounds(SimulationBounds::new(
            Vec3::zeros(),
            Vec3::new(extent, 1.0, extent),
        ))
        .with_ignition_seed(42)
}
