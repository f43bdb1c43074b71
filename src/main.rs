//! mefi-propagator - propagate an inertial orbit state to a target epoch
//!
//! ```text
//! mefi-propagator --epoch 2022-12-20T00:00:00Z \
//!     --position 42164,0,0 --velocity 0,3.07375,0 --hours 19
//! ```

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Datelike, Timelike, Utc};
use clap::Parser;
use nalgebra::Vector3;
use satkit::{Duration, Instant};

use mefi_propagator::propagation::{ForceModelChoice, OrbitState, PropagationSettings};

#[derive(Parser, Debug)]
#[command(name = "mefi-propagator", version, about = "Medium-fidelity RK4 orbit propagator")]
struct Cli {
    /// Initial epoch (RFC 3339, UTC)
    #[arg(long)]
    epoch: DateTime<Utc>,
    /// Initial inertial position x,y,z in km
    #[arg(long, value_parser = parse_vector, allow_hyphen_values = true)]
    position: Vector3<f64>,
    /// Initial inertial velocity vx,vy,vz in km/s
    #[arg(long, value_parser = parse_vector, allow_hyphen_values = true)]
    velocity: Vector3<f64>,
    /// Target epoch (RFC 3339, UTC)
    #[arg(long, conflicts_with = "hours", required_unless_present = "hours")]
    target: Option<DateTime<Utc>>,
    /// Propagation span in hours (negative for backward)
    #[arg(long, allow_hyphen_values = true)]
    hours: Option<f64>,
    /// Force model
    #[arg(long, default_value_t = ForceModelChoice::Full)]
    forces: ForceModelChoice,
    /// Maximum integration step in seconds
    #[arg(long)]
    max_step: Option<f64>,
}

fn parse_vector(s: &str) -> Result<Vector3<f64>, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|e| format!("invalid component in '{}': {}", s, e))?;
    match parts.as_slice() {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => Err(format!("expected 3 comma-separated values, got {}", parts.len())),
    }
}

fn to_instant(time: &DateTime<Utc>) -> Result<Instant> {
    Instant::from_datetime(
        time.year(),
        time.month() as i32,
        time.day() as i32,
        time.hour() as i32,
        time.minute() as i32,
        time.second() as f64 + time.nanosecond() as f64 * 1e-9,
    )
    .map_err(|_| anyhow!("epoch {} cannot be represented", time.to_rfc3339()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let epoch = to_instant(&cli.epoch)?;
    let target = match (cli.target, cli.hours) {
        (Some(target), _) => to_instant(&target)?,
        (None, Some(hours)) => epoch + Duration::from_seconds(hours * 3600.0),
        (None, None) => bail!("either --target or --hours is required"),
    };

    let mut settings = PropagationSettings {
        forces: cli.forces,
        ..Default::default()
    };
    if let Some(max_step) = cli.max_step {
        settings = settings.with_max_step(max_step);
    }

    let propagator = settings
        .build_propagator()
        .context("Failed to configure propagator")?;
    let orbit = OrbitState::try_new(epoch, cli.position, cli.velocity)
        .context("Invalid initial state")?;

    log::info!(
        "Propagating with {} forces ({}), max step {} s",
        cli.forces,
        cli.forces.description(),
        propagator.config().max_step_seconds
    );
    log::info!("Initial: {}", orbit);

    let summary = propagator
        .step_to_epoch(propagator.initial_state(orbit), target)
        .context("Propagation failed")?;

    log::info!(
        "Done: {} steps in {} rounds",
        summary.steps_taken,
        summary.refinement_rounds
    );
    println!("{}", summary.state.orbit);

    Ok(())
}
