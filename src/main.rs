//! Arena Shooter headless runner
//!
//! Plays a campaign with a simple autopilot at a fixed 60 Hz timestep and
//! prints the final results as JSON. Useful for balancing levels and for
//! replaying a seeded run.

use std::fs;

use anyhow::Context;
use glam::Vec2;
use serde::Serialize;

use arena_shooter::consts::SIM_DT;
use arena_shooter::score::RunResults;
use arena_shooter::sim::{GameEvent, GamePhase, GameState, TickInput};
use arena_shooter::{Campaign, Tuning};

/// Built-in campaign used when no `--levels` file is given
const DEFAULT_LEVELS: &str = include_str!("../data/levels.json");

/// Autopilot backs off when the nearest enemy is closer than this
const KEEP_AWAY: f32 = 220.0;
/// ... and closes in when it is further than this
const CLOSE_IN: f32 = 420.0;
/// Minimum direction component that counts as a key press
const INTENT_THRESHOLD: f32 = 0.3;

struct Options {
    levels_path: Option<String>,
    tuning_path: Option<String>,
    seed: Option<u64>,
    level: usize,
    campaign: bool,
    seconds: f32,
}

impl Options {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let value = |flag: &str| {
            args.iter()
                .position(|a| a == flag)
                .and_then(|i| args.get(i + 1))
                .cloned()
        };

        let seed = value("--seed")
            .map(|s| s.parse::<u64>())
            .transpose()
            .context("--seed expects an unsigned integer")?;
        let level = value("--level")
            .map(|s| s.parse::<usize>())
            .transpose()
            .context("--level expects a level index")?
            .unwrap_or(0);
        let seconds = value("--seconds")
            .map(|s| s.parse::<f32>())
            .transpose()
            .context("--seconds expects a number")?
            .unwrap_or(600.0);

        Ok(Self {
            levels_path: value("--levels"),
            tuning_path: value("--tuning"),
            seed,
            level,
            campaign: args.iter().any(|a| a == "--campaign"),
            seconds,
        })
    }
}

fn print_usage() {
    println!("Usage: arena-shooter [options]");
    println!();
    println!("Options:");
    println!("  --levels <file>    Campaign JSON (default: built-in campaign)");
    println!("  --tuning <file>    Tuning override JSON");
    println!("  --seed <n>         RNG seed (default: random)");
    println!("  --level <n>        Starting level index (default: 0)");
    println!("  --campaign         Continue to the next level after a win");
    println!("  --seconds <s>      Simulated time limit (default: 600)");
}

/// Final report printed to stdout
#[derive(Serialize)]
struct Summary {
    seed: u64,
    phase: GamePhase,
    level_index: usize,
    level: String,
    accuracy: f32,
    results: RunResults,
}

/// Aim at the nearest enemy, hold a comfortable distance and strafe
fn autopilot(state: &GameState) -> TickInput {
    let player = state.player.pos;
    let Some(target) = state
        .enemies
        .iter()
        .min_by(|a, b| a.pos.distance_squared(player).total_cmp(&b.pos.distance_squared(player)))
    else {
        // Drift back toward the middle between waves
        return steer(state.arena.center() - player, None);
    };

    let offset = target.pos - player;
    let dist = offset.length();
    let dir = if dist < KEEP_AWAY {
        -offset
    } else if dist > CLOSE_IN {
        offset
    } else {
        offset.perp()
    };
    steer(dir, Some(target.pos))
}

fn steer(dir: Vec2, aim: Option<Vec2>) -> TickInput {
    let dir = dir.normalize_or_zero();
    TickInput {
        up: dir.y > INTENT_THRESHOLD,
        down: dir.y < -INTENT_THRESHOLD,
        left: dir.x < -INTENT_THRESHOLD,
        right: dir.x > INTENT_THRESHOLD,
        shoot: aim.is_some(),
        aim: aim.unwrap_or_default(),
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::ShotFired { .. } => log::trace!("{:?}", event),
        GameEvent::SpawnFallback { .. } | GameEvent::LevelAdvanced { .. } => log::info!("{:?}", event),
        _ => log::debug!("{:?}", event),
    }
}

fn main() -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }
    let options = Options::parse(&args)?;

    let levels_json = match &options.levels_path {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading levels from {path}"))?,
        None => DEFAULT_LEVELS.to_string(),
    };
    let campaign = Campaign::from_json(&levels_json).context("loading campaign")?;

    let tuning = match &options.tuning_path {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading tuning from {path}"))?;
            Tuning::from_json(&json).context("loading tuning")?
        }
        None => Tuning::default(),
    };

    let seed = options.seed.unwrap_or_else(rand::random);
    log::info!(
        "Arena Shooter starting: seed {}, level {}, campaign {}",
        seed,
        options.level,
        options.campaign
    );
    let mut state = GameState::seeded(campaign, options.level, options.campaign, tuning, seed)?;

    let max_ticks = (options.seconds.max(0.0) / SIM_DT).ceil() as u64;
    while state.phase == GamePhase::Playing && state.time_ticks < max_ticks {
        let input = autopilot(&state);
        for event in state.advance(SIM_DT, &input) {
            log_event(&event);
        }
    }
    if state.phase == GamePhase::Playing {
        log::warn!("Time limit of {:.0}s reached with the run still in progress", options.seconds);
    }

    let summary = Summary {
        seed,
        phase: state.phase,
        level_index: state.level_index,
        level: state.level().name.clone(),
        accuracy: state.stats.accuracy(),
        results: state.results(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
