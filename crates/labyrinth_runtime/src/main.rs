//! Labyrinth Runtime
//!
//! Generates a maze world and drives a session headlessly for a fixed number
//! of ticks, walking the player with a scripted input pattern.
//!
//! Run with: cargo run -p labyrinth_runtime -- --seed 42 --ticks 1200
//!       or: cargo run --bin labyrinth -- --config labyrinth.toml --ppm maze.ppm

use clap::Parser;
use glam::Vec2;
use labyrinth_world::{FrameInput, MoveIntent, Session, WorldConfig};
use std::path::PathBuf;
use std::process::ExitCode;

/// Ticks spent on each leg of the scripted walk
const LEG_TICKS: u64 = 90;

const WALK: [MoveIntent; 4] = [
    MoveIntent::Forward,
    MoveIntent::Right,
    MoveIntent::Backward,
    MoveIntent::Left,
];

/// CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML world configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maze seed (overrides config and LABYRINTH_SEED)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Maze width in cells
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Maze height in cells
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Number of ticks to simulate
    #[arg(short, long, default_value = "600")]
    ticks: u64,

    /// Seconds per tick
    #[arg(long, default_value = "0.0166667")]
    dt: f32,

    /// Write the generated maze as a P3 image
    #[arg(long)]
    ppm: Option<PathBuf>,

    /// Send no input; only the enemies move
    #[arg(long)]
    idle: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

/// Defaults, then the config file, then the environment, then flags
fn load_config(args: &Args) -> labyrinth_world::Result<WorldConfig> {
    let mut config = match &args.config {
        Some(path) => WorldConfig::load(path)?,
        None => WorldConfig::default(),
    };
    config.apply_env();

    if let Some(seed) = args.seed {
        config.maze.seed = Some(seed);
    }
    if let Some(width) = args.width {
        config.maze.width = width;
    }
    if let Some(height) = args.height {
        config.maze.height = height;
    }

    config.validate()?;
    Ok(config)
}

/// Scripted input for tick `n`: walk a slow square while turning the camera
fn scripted_input(n: u64, idle: bool) -> FrameInput {
    if idle {
        return FrameInput::default();
    }
    let leg = ((n / LEG_TICKS) % WALK.len() as u64) as usize;
    FrameInput {
        intents: vec![WALK[leg]],
        look: Vec2::new(0.002, 0.0),
        zoom: 0.0,
    }
}

fn run(args: &Args) -> labyrinth_world::Result<()> {
    let config = load_config(args)?;
    config.print_summary();

    let mut session = Session::new(config)?;

    if let Some(path) = &args.ppm {
        session.world().maze().save_ppm(path)?;
    }

    let dt = args.dt.max(0.0);
    let ticks_per_second = if dt > 0.0 { (1.0 / dt).round() as u64 } else { 0 };

    for n in 0..args.ticks {
        let events = session.tick(dt, &scripted_input(n, args.idle));

        if events.completed {
            log::info!("Maze cleared on tick {}", n);
        }
        if ticks_per_second > 0 && n % ticks_per_second == 0 {
            let world = session.world();
            log::debug!(
                "t={:.1}s player={:?} nearest enemy={:?}",
                session.stats().elapsed,
                world.player().position(),
                world.nearest_agent_distance()
            );
        }
    }

    let stats = session.stats();
    log::info!("Session finished:");
    log::info!("  Ticks: {} ({:.1}s simulated)", stats.ticks, stats.elapsed);
    log::info!("  Goals: {}/{}", stats.goals_collected, stats.goals_total);
    log::info!("  Captures: {}", stats.captures);
    log::info!("  Completed: {}", stats.completed);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["labyrinth", "--seed", "7", "-W", "12", "--ticks", "10"]);
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.width, Some(12));
        assert_eq!(args.ticks, 10);
        assert!(!args.idle);
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from(["labyrinth", "--seed", "5", "--width", "9", "--height", "7"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.maze.seed, Some(5));
        assert_eq!((config.maze.width, config.maze.height), (9, 7));
    }

    #[test]
    fn test_zero_width_rejected() {
        let args = Args::parse_from(["labyrinth", "--width", "0"]);
        assert!(load_config(&args).is_err());
    }

    #[test]
    fn test_scripted_input_cycles() {
        assert_eq!(scripted_input(0, false).intents, vec![MoveIntent::Forward]);
        assert_eq!(scripted_input(LEG_TICKS, false).intents, vec![MoveIntent::Right]);
        assert_eq!(scripted_input(LEG_TICKS * 4, false).intents, vec![MoveIntent::Forward]);
        assert!(scripted_input(3, true).intents.is_empty());
    }
}
