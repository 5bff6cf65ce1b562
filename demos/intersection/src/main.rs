//! intersection — drives a few traffic lights and the vehicles waiting on them.
//!
//! Each light cycles on its own thread.  Each vehicle is a thread that
//! approaches its assigned light, blocks in `wait_for_green`, crosses, drives
//! on for a while, and comes back.  `--unit-ms` shrinks the 1 s time unit so
//! a full run takes a fraction of a second.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tl_core::{CycleConfig, CycleRng, Phase, RandomDurations};
use tl_light::{PhaseObserver, TrafficLight, TrafficLightBuilder};

#[derive(Parser, Debug)]
#[command(name = "intersection", about = "Traffic lights with vehicles waiting for green")]
struct Cli {
    /// Number of traffic lights.
    #[arg(long, default_value_t = 2)]
    lights: u32,

    /// Number of vehicle threads.
    #[arg(long, default_value_t = 6)]
    vehicles: usize,

    /// Crossings each vehicle makes before parking.
    #[arg(long, default_value_t = 2)]
    crossings: u32,

    /// Run seed; each light derives its own seed from it.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Length of one time unit in milliseconds (cycles last 4–6 units).
    #[arg(long, default_value_t = 1_000)]
    unit_ms: u64,

    /// Draw a new cycle duration after every flip.
    #[arg(long)]
    redraw: bool,
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Counts flips per light for the summary table.
struct FlipCounter {
    flips:  Arc<AtomicU64>,
    greens: Arc<AtomicU64>,
}

impl PhaseObserver for FlipCounter {
    fn on_phase_change(&mut self, phase: Phase, _cycle: u64) {
        self.flips.fetch_add(1, Ordering::Relaxed);
        if phase.is_green() {
            self.greens.fetch_add(1, Ordering::Relaxed);
        }
    }
}

struct LightStats {
    flips:  Arc<AtomicU64>,
    greens: Arc<AtomicU64>,
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    anyhow::ensure!(cli.lights > 0, "--lights must be at least 1");
    anyhow::ensure!(cli.unit_ms > 0, "--unit-ms must be at least 1");

    let unit = Duration::from_millis(cli.unit_ms);
    let config = CycleConfig {
        min_cycle:         unit * 4,
        max_cycle:         unit * 6,
        resolution:        unit,
        poll_interval:     Duration::from_millis(1),
        redraw_each_cycle: cli.redraw,
        seed:              cli.seed,
    };

    println!("=== intersection ===");
    println!(
        "Lights: {}  |  Vehicles: {}  |  Crossings: {}  |  Seed: {}  |  Unit: {:?}",
        cli.lights, cli.vehicles, cli.crossings, cli.seed, unit
    );
    println!();

    // 1. Build and start the lights.
    let mut lights: Vec<Arc<TrafficLight>> = Vec::new();
    let mut stats: Vec<LightStats> = Vec::new();
    for i in 0..cli.lights {
        let flips = Arc::new(AtomicU64::new(0));
        let greens = Arc::new(AtomicU64::new(0));
        let durations = RandomDurations::new(
            CycleRng::for_light(cli.seed, i),
            config.min_cycle,
            config.max_cycle,
            config.resolution,
        );
        let light = TrafficLightBuilder::new()
            .name(format!("light-{i}"))
            .config(config.clone())
            .durations(durations)
            .observer(FlipCounter { flips: Arc::clone(&flips), greens: Arc::clone(&greens) })
            .build()
            .with_context(|| format!("building light-{i}"))?;
        light.simulate()?;
        lights.push(Arc::new(light));
        stats.push(LightStats { flips, greens });
    }

    // 2. Release the vehicles.
    let t0 = Instant::now();
    let vehicles: Vec<_> = (0..cli.vehicles)
        .map(|v| {
            let light = Arc::clone(&lights[v % lights.len()]);
            let crossings = cli.crossings;
            let drive = unit * 2;
            thread::Builder::new()
                .name(format!("vehicle-{v}"))
                .spawn(move || {
                    let mut waited = Duration::ZERO;
                    for n in 1..=crossings {
                        info!(vehicle = v, light = light.name(), phase = %light.current_phase(), "approaching");
                        let start = Instant::now();
                        light.wait_for_green();
                        waited += start.elapsed();
                        info!(vehicle = v, light = light.name(), crossing = n, "crossing on green");
                        thread::sleep(drive);
                    }
                    waited
                })
                .with_context(|| format!("spawning vehicle-{v}"))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut total_wait = Duration::ZERO;
    for handle in vehicles {
        total_wait += handle
            .join()
            .map_err(|_| anyhow::anyhow!("vehicle thread panicked"))?;
    }
    let elapsed = t0.elapsed();

    // 3. Stop the lights.
    for light in &lights {
        light.shutdown()?;
    }

    // 4. Summary.
    println!("Run complete in {:.3} s", elapsed.as_secs_f64());
    if cli.vehicles > 0 && cli.crossings > 0 {
        let crossings = cli.vehicles as u32 * cli.crossings;
        println!(
            "  mean wait at red : {:.3} s over {} crossings",
            total_wait.as_secs_f64() / crossings as f64,
            crossings
        );
    }
    println!();

    println!("{:<10} {:<8} {:<8} {:<8}", "Light", "Flips", "Greens", "Phase");
    println!("{}", "-".repeat(36));
    for (light, s) in lights.iter().zip(&stats) {
        println!(
            "{:<10} {:<8} {:<8} {:<8}",
            light.name(),
            s.flips.load(Ordering::Relaxed),
            s.greens.load(Ordering::Relaxed),
            light.current_phase(),
        );
    }

    Ok(())
}
