//! Fire simulation driver
//!
//! [`FireSimulation`] owns the heat grid and the plant registry and advances
//! both one tick at a time. Every tick runs the same fixed sequence:
//!
//! 1. Scale the frame delta by the heat transfer speed
//! 2. Rebuild the fire-source field from the burning plants
//! 3. Radiate heat out of every source cell
//! 4. Push heat along the wind (or dissipate when the wind is too weak)
//! 5. Dissipate, unless step 4 already did
//! 6. Age burning plants back to front, burning down the expired ones
//! 7. Ignite normal plants whose local heat exceeds the flashpoint
//! 8. Ask the renderer to draw
//!
//! Reordering these steps changes the outcome of a run.

pub mod config;
pub mod host;
pub mod registry;

pub use config::{DissipationPolicy, SamplingMode, SimulationConfig};
pub use host::{PlantProvider, Renderer};
pub use registry::PlantRegistry;

use crate::core_types::{Plant, PlantId, Seconds, Vec3};
use crate::error::ConfigError;
use crate::grid::{HeatGrid, SimulationBounds};
use crate::weather::{Wind, WindOutcome};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace, warn};

/// Snapshot of plant counts and simulated time
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimulationStats {
    pub burning_plants: usize,
    pub normal_plants: usize,
    pub burned_plants: usize,
    pub total_plants: usize,
    /// Unscaled seconds simulated since the last regeneration
    pub simulation_time: f32,
    pub ticks: u64,
}

/// What a single tick changed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummary {
    pub ignited: usize,
    pub burned_down: usize,
    /// How the wind step resolved for this tick
    pub wind: WindOutcome,
}

/// Fire spread simulation over a population of plants
pub struct FireSimulation {
    config: SimulationConfig,
    grid: Option<HeatGrid>,
    registry: PlantRegistry,
    provider: Option<Box<dyn PlantProvider>>,
    renderer: Option<Box<dyn Renderer>>,
    wind: Wind,
    running: bool,
    /// Set by `regenerate`, reset by `clear`
    generated: bool,
    seed: Option<u64>,
    seed_plant: Option<PlantId>,
    simulation_time: Seconds,
    ticks: u64,
}

impl std::fmt::Debug for FireSimulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FireSimulation")
            .field("config", &self.config)
            .field("plants", &self.registry.len())
            .field("wind", &self.wind)
            .field("running", &self.running)
            .field("seed", &self.seed)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

impl FireSimulation {
    /// Create a stopped simulation with no plants
    ///
    /// The configuration is not checked until [`Self::start`] or
    /// [`Self::regenerate`].
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            grid: None,
            registry: PlantRegistry::new(),
            provider: None,
            renderer: None,
            wind: Wind::CALM,
            running: false,
            generated: false,
            seed: None,
            seed_plant: None,
            simulation_time: Seconds::ZERO,
            ticks: 0,
        }
    }

    /// Attach the plant provider used by [`Self::regenerate`] and [`Self::add_entity`]
    #[must_use]
    pub fn with_provider(mut self, provider: impl PlantProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Attach the renderer that receives lifecycle notifications
    #[must_use]
    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn registry(&self) -> &PlantRegistry {
        &self.registry
    }

    /// Heat grid, once the simulation has been generated
    pub fn grid(&self) -> Option<&HeatGrid> {
        self.grid.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seed used to choose the initially ignited plant
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Plant force-ignited by the last regeneration
    pub fn seed_plant(&self) -> Option<PlantId> {
        self.seed_plant
    }

    pub fn wind(&self) -> Wind {
        self.wind
    }

    pub fn set_wind(&mut self, wind: Wind) {
        self.wind = wind;
    }

    /// Current plant counts and simulated time
    pub fn stats(&self) -> SimulationStats {
        SimulationStats {
            burning_plants: self.registry.burning_count(),
            normal_plants: self.registry.active_count(),
            burned_plants: self.registry.burned_count(),
            total_plants: self.registry.len(),
            simulation_time: self.simulation_time.value(),
            ticks: self.ticks,
        }
    }

    /// Resume ticking, generating the plant population on first start
    ///
    /// A grid allocated by [`Self::reconfigure_grid`] does not count as a
    /// generation; the first start after construction or [`Self::clear`]
    /// always asks the provider for plants.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid or no
    /// provider is attached. The simulation stays stopped.
    pub fn start(&mut self) -> Result<(), ConfigError> {
        if let Err(err) = self.config.validate() {
            warn!("Refusing to start: {}", err);
            self.running = false;
            return Err(err);
        }
        if self.provider.is_none() {
            warn!("Refusing to start: {}", ConfigError::MissingProvider);
            self.running = false;
            return Err(ConfigError::MissingProvider);
        }
        if !self.generated {
            return self.regenerate();
        }
        self.running = true;
        info!("Simulation started ({} plants)", self.registry.len());
        Ok(())
    }

    /// Stop ticking; state is kept
    pub fn pause(&mut self) {
        if self.running {
            info!("Simulation paused after {} ticks", self.ticks);
        }
        self.running = false;
    }

    /// Stop and drop every plant, including the provider's and renderer's copies
    pub fn clear(&mut self) {
        self.running = false;
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.clear();
        }
        if let Some(provider) = self.provider.as_mut() {
            provider.clear();
        }
        self.registry.clear();
        if let Some(grid) = self.grid.as_mut() {
            grid.clear();
        }
        self.generated = false;
        self.seed_plant = None;
        self.simulation_time = Seconds::ZERO;
        self.ticks = 0;
        info!("Simulation cleared");
    }

    /// Clear, re-provision plants, ignite one at random, and start
    ///
    /// The provider is asked for plants inside the configured bounds exactly
    /// once. One plant, chosen uniformly with [`SimulationConfig::ignition_seed`]
    /// (or a fresh seed when unset), is force-ignited.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an invalid configuration or a missing
    /// provider. The simulation stays stopped.
    pub fn regenerate(&mut self) -> Result<(), ConfigError> {
        if let Err(err) = self.config.validate() {
            warn!("Refusing to regenerate: {}", err);
            self.running = false;
            return Err(err);
        }
        if self.provider.is_none() {
            warn!("Refusing to regenerate: {}", ConfigError::MissingProvider);
            self.running = false;
            return Err(ConfigError::MissingProvider);
        }

        self.clear();

        let grid = HeatGrid::new(
            self.config.resolution_x,
            self.config.resolution_y,
            self.config.border,
            self.config.bounds,
        )?;

        let bounds = self.config.bounds;
        let plants = match self.provider.as_mut() {
            Some(provider) => provider.get_plants(bounds.min, bounds.max),
            None => Vec::new(),
        };
        self.registry = PlantRegistry::from_plants(plants);
        for plant in self.registry.iter_mut() {
            plant.cell = grid.cell_of(&plant.position);
        }
        self.grid = Some(grid);

        let seed = self.config.ignition_seed.unwrap_or_else(|| rand::rng().random());
        self.seed = Some(seed);
        if !self.registry.is_empty() {
            let mut rng = StdRng::seed_from_u64(seed);
            let pick = rng.random_range(0..self.registry.len());
            self.seed_plant = self.registry.get(pick).map(Plant::id);
            // Only normal plants can be force-ignited; a provider handing out
            // pre-burned plants may leave the pick as-is.
            self.registry.ignite(pick);
        }

        if let Some(renderer) = self.renderer.as_mut() {
            for plant in &self.registry {
                renderer.register(plant);
            }
        }

        self.generated = true;
        self.running = true;
        info!(
            "Generated {} plants on a {}x{} grid (seed {}, seed plant {})",
            self.registry.len(),
            self.config.resolution_x,
            self.config.resolution_y,
            seed,
            self.seed_plant
                .map_or_else(|| "none".to_string(), |id| id.to_string()),
        );
        Ok(())
    }

    /// Reallocate the grid with a new resolution and bounds
    ///
    /// Every plant's cached cell is recomputed before returning. Plants that
    /// now fall outside the bounds are clamped to the nearest edge cell.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReconfigureWhileRunning`] unless paused, or a
    /// validation error for the new geometry. On error nothing changes.
    pub fn reconfigure_grid(
        &mut self,
        resolution_x: usize,
        resolution_y: usize,
        bounds: SimulationBounds,
    ) -> Result<(), ConfigError> {
        if self.running {
            warn!("Refusing to reconfigure a running simulation");
            return Err(ConfigError::ReconfigureWhileRunning);
        }

        let config = self
            .config
            .clone()
            .with_resolution(resolution_x, resolution_y)
            .with_bounds(bounds);
        config.validate()?;
        let grid = HeatGrid::new(resolution_x, resolution_y, config.border, bounds)?;

        for plant in self.registry.iter_mut() {
            plant.cell = grid.cell_of(&plant.position);
        }
        self.grid = Some(grid);
        self.config = config;
        info!(
            "Grid reconfigured to {}x{} over {:?}..{:?}",
            resolution_x, resolution_y, bounds.min, bounds.max
        );
        Ok(())
    }

    /// Ask the provider for a plant at `position` and insert it
    ///
    /// Returns the new plant's id, or `None` if the position lies outside
    /// the bounds, the simulation has not been generated, or no provider is
    /// attached.
    pub fn add_entity(&mut self, position: Vec3) -> Option<PlantId> {
        if !self.config.bounds.contains(&position) {
            debug!("Rejected plant outside bounds at {:?}", position);
            return None;
        }
        let Some(grid) = self.grid.as_ref() else {
            debug!("Rejected plant before generation");
            return None;
        };
        let provider = self.provider.as_mut()?;

        let mut plant = provider.get_plant(position);
        plant.cell = grid.cell_of(&plant.position);
        let id = plant.id;
        let index = self.registry.add(plant);
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.register(&self.registry[index]);
        }
        Some(id)
    }

    /// Remove a plant by id; returns false for unknown ids
    pub fn remove_entity(&mut self, id: PlantId) -> bool {
        let Some(plant) = self.registry.remove(id) else {
            debug!("Ignoring removal of unknown {}", id);
            return false;
        };
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.unregister(&plant);
        }
        true
    }

    /// Set a normal plant on fire; returns false if unknown or not normal
    pub fn ignite_at(&mut self, id: PlantId) -> bool {
        let Some(index) = self.registry.index_of(id) else {
            debug!("Ignoring ignition of unknown {}", id);
            return false;
        };
        let Some(moved) = self.registry.ignite(index) else {
            debug!("Ignoring ignition of {} (not normal)", id);
            return false;
        };
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.notify_state_change(&self.registry[moved]);
        }
        true
    }

    /// Advance the simulation by one frame
    ///
    /// # Arguments
    ///
    /// * `dt` - Real (unscaled) frame time in seconds
    ///
    /// # Returns
    ///
    /// What changed, or `None` when the tick was skipped (paused, no plants,
    /// or an unusable `dt`).
    pub fn tick(&mut self, dt: f32) -> Option<TickSummary> {
        if !self.running || self.registry.is_empty() {
            return None;
        }
        if !dt.is_finite() || dt < 0.0 {
            debug!("Skipping tick with dt = {}", dt);
            return None;
        }
        let grid = self.grid.as_mut()?;
        let real_dt = Seconds::new(dt);
        let scaled_dt = dt * self.config.heat_transfer_speed;

        // 1-2. Rebuild sources from the burning region
        grid.reset_sources();
        for plant in self.registry.burning() {
            let cell = plant.cell;
            grid.stamp_source(cell.ix, cell.iy, self.config.fire_temperature);
        }

        // 3-5. Heat transfer
        grid.radiate(scaled_dt);
        let wind = grid.advect_wind(
            &self.wind.propagation_vector(),
            scaled_dt,
            self.config.decay_rate,
        );
        if wind.is_advected() && self.config.dissipation == DissipationPolicy::ExactlyOnce {
            grid.dissipate(scaled_dt, self.config.decay_rate);
        }

        // 6. Aging, back to front so burn_down never moves an unvisited plant
        let mut burned_down = 0;
        for index in self.registry.burning_range().rev() {
            let expired = self
                .registry
                .get_mut(index)
                .is_some_and(|plant| plant.age(real_dt));
            if !expired {
                continue;
            }
            if let Some(moved) = self.registry.burn_down(index) {
                burned_down += 1;
                let plant = &self.registry[moved];
                trace!("{} burned down", plant.id);
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.notify_state_change(plant);
                }
            }
        }

        // 7. Ignition over the normal region as it stood before this pass
        let flashpoint = self.config.flashpoint_temperature;
        let mut ignited = 0;
        for index in self.registry.active_range() {
            let plant = &self.registry[index];
            let heat = match self.config.sampling {
                SamplingMode::NearestCached => grid.sample_nearest(plant.cell.ix, plant.cell.iy),
                SamplingMode::Nearest => {
                    let cell = grid.cell_of(&plant.position);
                    grid.sample_nearest(cell.ix, cell.iy)
                }
                SamplingMode::Bilinear => grid.sample_bilinear_at(&plant.position),
            };
            if heat <= flashpoint {
                continue;
            }
            if let Some(moved) = self.registry.ignite(index) {
                ignited += 1;
                let plant = &self.registry[moved];
                trace!("{} ignited at {:.1}°", plant.id, heat);
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.notify_state_change(plant);
                }
            }
        }

        // 8. One render per tick
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.render();
        }

        self.simulation_time += real_dt;
        self.ticks += 1;
        debug!(
            "Tick {}: t={:.2}s scaled_dt={:.3} burning={} normal={} burned={} ignited={} burned_down={} wind={:?}",
            self.ticks,
            self.simulation_time.value(),
            scaled_dt,
            self.registry.burning_count(),
            self.registry.active_count(),
            self.registry.burned_count(),
            ignited,
            burned_down,
            wind,
        );

        Some(TickSummary {
            ignited,
            burned_down,
            wind,
        })
    }
}
