//! End-to-end fire spread through the public driver surface

mod common;

use approx::assert_abs_diff_eq;
use common::{unit_config, CountingRenderer, LatticeProvider};
use fire_grid_core::{
    ConfigError, FireSimulation, Fraction, HeatGrid, PlantId, SamplingMode, SimulationBounds,
    Vec3, Wind, WindOutcome,
};

fn lattice_simulation(size: usize, burn_time: f32) -> FireSimulation {
    FireSimulation::new(unit_config(size)).with_provider(LatticeProvider::new(size, burn_time))
}

#[test]
fn test_fire_consumes_a_dense_lattice() {
    let renderer = CountingRenderer::default();
    let changes = renderer.state_changes.clone();
    let mut sim = lattice_simulation(8, 2.0).with_renderer(renderer);
    sim.start().unwrap();

    for _ in 0..300 {
        sim.tick(0.1);
    }

    let stats = sim.stats();
    assert_eq!(stats.burned_plants, 64);
    assert_eq!(stats.burning_plants, 0);
    assert_eq!(stats.normal_plants, 0);
    assert_abs_diff_eq!(stats.simulation_time, 30.0, epsilon = 1e-2);
    // 63 ignitions plus 64 burn-downs; the seed ignition happens before registration
    assert_eq!(*changes.borrow(), 63 + 64);
}

#[test]
fn test_identical_seeds_replay_identically() {
    let run = || {
        let mut sim = lattice_simulation(10, 1.5);
        sim.set_wind(Wind::from_normalized(Fraction::new(0.8), Fraction::new(0.5)));
        sim.start().unwrap();
        let mut history = Vec::new();
        for _ in 0..60 {
            sim.tick(0.05);
            history.push(sim.stats());
        }
        let order: Vec<PlantId> = sim.registry().iter().map(|p| p.id()).collect();
        (sim.seed_plant(), history, order)
    };

    assert_eq!(run(), run());
}

#[test]
fn test_bilinear_sampling_still_spreads() {
    let config = unit_config(8).with_sampling(SamplingMode::Bilinear);
    let mut sim = FireSimulation::new(config).with_provider(LatticeProvider::new(8, 1000.0));
    sim.start().unwrap();
    for _ in 0..40 {
        sim.tick(0.1);
    }
    assert!(sim.stats().burning_plants > 1);
}

#[test]
fn test_invalid_configuration_refuses_to_start() {
    let config = unit_config(8).with_bounds(SimulationBounds::new(
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(4.0, 1.0, 8.0),
    ));
    let mut sim = FireSimulation::new(config).with_provider(LatticeProvider::new(8, 1.0));

    assert!(matches!(
        sim.start(),
        Err(ConfigError::DegenerateBounds { .. })
    ));
    assert!(!sim.is_running());
    assert!(sim.tick(0.1).is_none());
    assert_eq!(sim.stats().total_plants, 0);
}

#[test]
fn test_regenerate_replaces_population() {
    let mut sim = lattice_simulation(4, 0.5);
    sim.start().unwrap();
    for _ in 0..10 {
        sim.tick(0.1);
    }
    assert!(sim.stats().burned_plants > 0);

    sim.regenerate().unwrap();
    let stats = sim.stats();
    assert_eq!(stats.total_plants, 16);
    assert_eq!(stats.burning_plants, 1);
    assert_eq!(stats.burned_plants, 0);
    assert_eq!(stats.ticks, 0);
    assert!(sim.is_running());
}

#[test]
fn test_vertical_wind_never_advects() {
    let mut sim = lattice_simulation(4, 10.0);
    sim.set_wind(Wind::from_normalized(Fraction::ZERO, Fraction::new(0.25)));
    sim.start().unwrap();
    let summary = sim.tick(0.1).unwrap();
    assert_eq!(summary.wind, WindOutcome::Dissipated);
}

#[test]
fn test_orthogonal_neighbours_ignite_before_diagonals() {
    let bounds = SimulationBounds::new(Vec3::zeros(), Vec3::new(3.0, 1.0, 3.0));
    let mut grid = HeatGrid::new(3, 3, 1, bounds).unwrap();
    grid.reset_sources();
    grid.stamp_source(2, 2, 1200.0);
    grid.radiate(0.6);

    let flashpoint = 600.0;
    for (ix, iy) in [(1, 2), (3, 2), (2, 1), (2, 3)] {
        assert!(grid.sample_nearest(ix, iy) > flashpoint, "orthogonal ({ix}, {iy})");
    }
    for (ix, iy) in [(1, 1), (3, 1), (1, 3), (3, 3)] {
        assert!(grid.sample_nearest(ix, iy) < flashpoint, "diagonal ({ix}, {iy})");
    }
}

#[test]
fn test_strong_wind_carries_heat_downwind_only() {
    let bounds = SimulationBounds::new(Vec3::zeros(), Vec3::new(5.0, 1.0, 5.0));
    let mut grid = HeatGrid::new(5, 5, 1, bounds).unwrap();
    grid.reset_sources();
    grid.stamp_source(3, 3, 1200.0);
    grid.radiate(0.1);

    let wind = Wind::from_normalized(Fraction::ONE, Fraction::ZERO);
    let outcome = grid.advect_wind(&wind.propagation_vector(), 0.1, 1.0);
    assert!(matches!(
        outcome,
        WindOutcome::Advected {
            offset_x: 1,
            offset_y: 0,
            ..
        }
    ));

    // Radiation reaches one cell; only the downwind side sees heat two cells out
    assert!(grid.sample_nearest(5, 3) > 0.0);
    assert_abs_diff_eq!(grid.sample_nearest(1, 3), 0.0);
    assert_abs_diff_eq!(grid.sample_nearest(3, 1), 0.0);
    assert_abs_diff_eq!(grid.sample_nearest(3, 5), 0.0);
}
