//! Placement strategies for the demo host

use fire_grid_core::{Plant, PlantId, PlantProvider, Seconds, Vec3};
use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::Rng;

/// Fraction of a cell a jittered plant may stray from the cell centre
const JITTER_RADIUS: f32 = 0.45;

/// Lattice shared by both providers: `nx` × `nz` cells over the region
#[derive(Debug, Clone, Copy)]
struct Lattice {
    nx: usize,
    nz: usize,
}

impl Lattice {
    fn cell_size(self, min: &Vec3, max: &Vec3) -> Vector2<f32> {
        Vector2::new(
            (max.x - min.x) / self.nx as f32,
            (max.z - min.z) / self.nz as f32,
        )
    }

    /// Cell centres at the floor of the region, row by row
    fn centres(self, min: Vec3, max: Vec3) -> impl Iterator<Item = Vec3> {
        let cell = self.cell_size(&min, &max);
        (0..self.nz).flat_map(move |iz| {
            (0..self.nx).map(move |ix| {
                Vec3::new(
                    min.x + (ix as f32 + 0.5) * cell.x,
                    min.y,
                    min.z + (iz as f32 + 0.5) * cell.y,
                )
            })
        })
    }
}

/// One plant at the centre of every lattice cell
#[derive(Debug)]
pub struct GridPlantProvider {
    lattice: Lattice,
    burn_time: Seconds,
    next_id: u32,
}

impl GridPlantProvider {
    pub fn new(nx: usize, nz: usize, burn_time: Seconds) -> Self {
        Self {
            lattice: Lattice { nx, nz },
            burn_time,
            next_id: 0,
        }
    }
}

impl PlantProvider for GridPlantProvider {
    fn get_plants(&mut self, min: Vec3, max: Vec3) -> Vec<Plant> {
        self.clear();
        self.lattice
            .centres(min, max)
            .map(|pos| self.get_plant(pos))
            .collect()
    }

    fn get_plant(&mut self, position: Vec3) -> Plant {
        let id = PlantId(self.next_id);
        self.next_id += 1;
        Plant::new(id, position, self.burn_time)
    }

    fn clear(&mut self) {
        self.next_id = 0;
    }
}

/// Lattice placement with each plant pushed off-centre inside an ellipse
///
/// Burn times are drawn uniformly from `burn_time ± burn_jitter`.
#[derive(Debug)]
pub struct JitterPlantProvider {
    lattice: Lattice,
    burn_time: f32,
    burn_jitter: f32,
    rng: StdRng,
    next_id: u32,
}

impl JitterPlantProvider {
    pub fn new(nx: usize, nz: usize, burn_time: f32, burn_jitter: f32, rng: StdRng) -> Self {
        Self {
            lattice: Lattice { nx, nz },
            burn_time,
            burn_jitter: burn_jitter.abs(),
            rng,
            next_id: 0,
        }
    }

    /// Uniform point in the unit disc
    fn inside_unit_circle(&mut self) -> Vector2<f32> {
        loop {
            let p = Vector2::new(
                self.rng.random_range(-1.0..=1.0),
                self.rng.random_range(-1.0..=1.0),
            );
            if p.norm_squared() <= 1.0 {
                return p;
            }
        }
    }
}

impl PlantProvider for JitterPlantProvider {
    fn get_plants(&mut self, min: Vec3, max: Vec3) -> Vec<Plant> {
        self.clear();
        let cell = self.lattice.cell_size(&min, &max);
        let centres: Vec<Vec3> = self.lattice.centres(min, max).collect();
        centres
            .into_iter()
            .map(|centre| {
                let offset = self.inside_unit_circle().component_mul(&cell) * JITTER_RADIUS;
                self.get_plant(centre + Vec3::new(offset.x, 0.0, offset.y))
            })
            .collect()
    }

    fn get_plant(&mut self, position: Vec3) -> Plant {
        let id = PlantId(self.next_id);
        self.next_id += 1;
        let burn_time = if self.burn_jitter > 0.0 {
            let low = (self.burn_time - self.burn_jitter).max(0.0);
            let high = (self.burn_time + self.burn_jitter).max(low);
            self.rng.random_range(low..=high)
        } else {
            self.burn_time
        };
        Plant::new(id, position, Seconds::new(burn_time.max(0.0)))
    }

    fn clear(&mut self) {
        self.next_id = 0;
    }
}
