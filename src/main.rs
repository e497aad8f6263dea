//! Endless Track demo runner
//!
//! Drives a headless autopilot along a generated track: it runs straight,
//! takes every turn it finds, and prints the active tile set at the end.
//!
//! Usage: `endless-track [seed] [config.json] [turns]`
//!
//! Exits with status 2 when the track config is unusable.

use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec3;

use endless_track::{
    Heading, TileType, TrackConfig, TrackError, TrackEvent, TrackGenerator, TurnDirection,
    TurnResolution,
};

const DEFAULT_TRACK: &str = include_str!("../assets/default_track.json");

/// Fixed simulation timestep (60 Hz)
const STEP_DT: f32 = 1.0 / 60.0;
/// Runner speed in units per second
const RUN_SPEED: f32 = 12.0;
/// Give up if the runner never reaches another turn
const MAX_STEPS: u32 = 100_000;
const DEFAULT_TURNS: u32 = 8;

/// Stand-in for the locomotion component
struct Runner {
    position: Vec3,
    heading: Heading,
}

#[derive(Debug, Default)]
struct Tally {
    tiles_spawned: usize,
    tiles_recycled: usize,
    obstacles_spawned: usize,
    rejected_turns: usize,
}

impl Tally {
    fn record(&mut self, events: Vec<TrackEvent>) {
        for event in events {
            match event {
                TrackEvent::TileSpawned { .. } => self.tiles_spawned += 1,
                TrackEvent::TileRecycled { .. } => self.tiles_recycled += 1,
                TrackEvent::ObstacleSpawned { .. } => self.obstacles_spawned += 1,
                TrackEvent::HeadingChanged { heading, direction } => {
                    log::info!("Heading changed to {heading:?} ({direction:?})");
                }
                TrackEvent::ObstacleRecycled { .. } => {}
            }
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn run() -> Result<(), TrackError> {
    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(clock_seed);
    let config = match args.next() {
        Some(path) => TrackConfig::load(path)?,
        None => TrackConfig::from_json(DEFAULT_TRACK)?,
    };
    let target_turns = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TURNS);

    let mut track = TrackGenerator::new(config, seed)?;
    log::info!("Endless Track started with seed {}", track.seed());
    let mut tally = Tally::default();
    tally.record(track.drain_events());

    let mut runner = Runner {
        position: Vec3::ZERO,
        heading: track.heading(),
    };
    let mut steps = 0;
    while track.turns() < target_turns && steps < MAX_STEPS {
        steps += 1;
        runner.position += runner.heading.to_vec3() * RUN_SPEED * STEP_DT;

        let Some(tile) = track.turn_tile_at(runner.position) else {
            continue;
        };
        // Wait until the pivot is reached
        if (tile.pivot - runner.position).dot(runner.heading.to_vec3()) > 0.0 {
            continue;
        }
        let direction = match tile.kind {
            TileType::Left => TurnDirection::Left,
            TileType::Right => TurnDirection::Right,
            TileType::Sideways if steps % 2 == 0 => TurnDirection::Left,
            TileType::Sideways => TurnDirection::Right,
            TileType::Straight => continue,
        };

        match track.commit_turn(runner.position, direction)? {
            TurnResolution::Accepted(turn) => {
                runner.position = turn.snap_position(runner.position);
                runner.heading = turn.heading;
            }
            TurnResolution::Rejected { tile, kind } => {
                tally.rejected_turns += 1;
                log::warn!("Turn {direction:?} refused on {} tile {tile}", kind.as_str());
            }
            TurnResolution::NoTurnAvailable => {}
        }
        tally.record(track.drain_events());
    }

    if track.turns() < target_turns {
        log::warn!(
            "Runner stopped after {steps} steps with {} of {target_turns} turns",
            track.turns()
        );
    }
    log::info!(
        "{} turns in {steps} steps: {} tiles spawned, {} recycled, {} obstacles, {} refused turns",
        track.turns(),
        tally.tiles_spawned,
        tally.tiles_recycled,
        tally.obstacles_spawned,
        tally.rejected_turns
    );

    let active: Vec<_> = track.active_tiles().collect();
    let snapshot = serde_json::to_string_pretty(&active).map_err(TrackError::Snapshot)?;
    println!("{snapshot}");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_configuration() => {
            log::error!("Unusable track config: {err}");
            ExitCode::from(2)
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
