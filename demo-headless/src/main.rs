mod providers;
mod renderer;

use clap::{Parser, ValueEnum};
use fire_grid_core::{
    DissipationPolicy, FireSimulation, Fraction, SamplingMode, Seconds, SimulationBounds,
    SimulationConfig, Vec3, Wind,
};
use providers::{GridPlantProvider, JitterPlantProvider};
use rand::rngs::StdRng;
use rand::SeedableRng;
use renderer::TallyRenderer;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Layout {
    /// One plant per lattice cell centre
    Grid,
    /// Lattice with each plant jittered inside its cell
    Jitter,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Sampling {
    NearestCached,
    Nearest,
    Bilinear,
}

impl From<Sampling> for SamplingMode {
    fn from(s: Sampling) -> Self {
        match s {
            Sampling::NearestCached => SamplingMode::NearestCached,
            Sampling::Nearest => SamplingMode::Nearest,
            Sampling::Bilinear => SamplingMode::Bilinear,
        }
    }
}

/// Headless fire spread demo
#[derive(Parser, Debug)]
#[command(name = "fire-grid-demo")]
#[command(about = "Fire spreading across a field of plants on a heat grid", long_about = None)]
struct Args {
    /// Simulated duration in seconds
    #[arg(short, long, default_value_t = 120.0)]
    duration: f32,

    /// Frame time in seconds
    #[arg(long, default_value_t = 0.05)]
    dt: f32,

    /// Heat grid cells per side
    #[arg(short, long, default_value_t = 256)]
    resolution: usize,

    /// World size of the square plane
    #[arg(long, default_value_t = 256.0)]
    size: f32,

    /// Plants per side; radiation only reaches adjacent cells, so keep this
    /// near the resolution
    #[arg(short, long, default_value_t = 256)]
    plants: usize,

    /// Plant placement strategy
    #[arg(long, value_enum, default_value_t = Layout::Jitter)]
    layout: Layout,

    /// Seconds a plant burns before burning down
    #[arg(long, default_value_t = 6.0)]
    burn_time: f32,

    /// Random spread of burn times (jitter layout only)
    #[arg(long, default_value_t = 2.0)]
    burn_jitter: f32,

    /// Wind speed in [0, 1]
    #[arg(short, long, default_value_t = 0.0)]
    wind_speed: f32,

    /// Wind angle in [0, 1), a fraction of a full turn from +X towards +Z
    #[arg(long, default_value_t = 0.0)]
    wind_angle: f32,

    /// Global heat transfer speed
    #[arg(long, default_value_t = 1.0)]
    heat_speed: f32,

    /// How normal plants read the heat field
    #[arg(long, value_enum, default_value_t = Sampling::NearestCached)]
    sampling: Sampling,

    /// Only dissipate when the wind is too weak to advect
    #[arg(long)]
    fallback_dissipation: bool,

    /// Seed for placement and the initial ignition
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log a summary every N frames
    #[arg(long, default_value_t = 100)]
    report_every: u64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let bounds = SimulationBounds::new(Vec3::zeros(), Vec3::new(args.size, 10.0, args.size));
    let mut config = SimulationConfig::default()
        .with_resolution(args.resolution, args.resolution)
        .with_bounds(bounds)
        .with_heat_transfer_speed(args.heat_speed)
        .with_sampling(args.sampling.into());
    if args.fallback_dissipation {
        config = config.with_dissipation(DissipationPolicy::FallbackOnly);
    }
    if let Some(seed) = args.seed {
        config = config.with_ignition_seed(seed);
    }

    let renderer = TallyRenderer::new(args.report_every);
    let tally = renderer.tally();
    let sim = FireSimulation::new(config).with_renderer(renderer);
    let mut sim = match args.layout {
        Layout::Grid => sim.with_provider(GridPlantProvider::new(
            args.plants,
            args.plants,
            Seconds::new(args.burn_time.max(0.0)),
        )),
        Layout::Jitter => {
            let rng = args
                .seed
                .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
            sim.with_provider(JitterPlantProvider::new(
                args.plants,
                args.plants,
                args.burn_time,
                args.burn_jitter,
                rng,
            ))
        }
    };
    sim.set_wind(Wind::from_normalized(
        Fraction::saturating(args.wind_speed),
        Fraction::saturating(args.wind_angle),
    ));

    if let Err(err) = sim.start() {
        error!("Cannot start simulation: {}", err);
        return ExitCode::FAILURE;
    }

    let frames = (args.duration / args.dt.max(f32::EPSILON)).ceil() as u64;
    for _ in 0..frames {
        if sim.tick(args.dt).is_none() || sim.stats().burning_plants == 0 {
            break;
        }
    }

    let stats = sim.stats();
    info!(
        "Finished after {} ticks ({:.1}s simulated)",
        stats.ticks, stats.simulation_time
    );

    let tally = *tally.borrow();
    println!("\n=== Fire Grid Demo ===");
    println!("Seed:          {}", sim.seed().unwrap_or_default());
    println!(
        "Seed plant:    {}",
        sim.seed_plant()
            .map_or_else(|| "none".to_string(), |id| id.to_string())
    );
    println!("Plants:        {}", stats.total_plants);
    println!("Burned:        {}", stats.burned_plants);
    println!("Still burning: {}", stats.burning_plants);
    println!("Untouched:     {}", stats.normal_plants);
    println!("Frames drawn:  {}", tally.frames);
    if stats.total_plants > 0 {
        let burned_pct = 100.0 * stats.burned_plants as f32 / stats.total_plants as f32;
        println!("Burned area:   {burned_pct:.1}%");
    }

    ExitCode::SUCCESS
}
