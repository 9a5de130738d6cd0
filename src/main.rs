//! ATA Run headless driver
//!
//! Runs the simulation without a display: synthetic refresh timestamps go
//! through the same `Clock` a browser frame callback would feed, the autopilot
//! supplies jumps, and the best score is kept in a JSON file.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;

use ata_run::persistence::load_best_or_default;
use ata_run::sim::{
    Clock, GameEvent, GamePhase, GameWorld, TickInput, autopilot, random_seed, tick,
};
use ata_run::{JsonFileStore, Tuning};

#[derive(Debug, Parser)]
#[command(name = "ata-run", about = "Simulate ATA Run sessions headlessly")]
struct Args {
    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of runs to play back to back
    #[arg(long, default_value_t = 1)]
    runs: u32,

    /// Time limit per run in seconds
    #[arg(long, default_value_t = 120.0)]
    seconds: f32,

    /// Simulated display refresh rate
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Where the best score is stored
    #[arg(long, default_value = "ata_run_best.json")]
    best_file: PathBuf,

    /// Optional tuning JSON overriding the default balance
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Never jump (the run ends at the first obstacle)
    #[arg(long)]
    manual: bool,

    /// Print one JSON snapshot per frame
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    run: u32,
    seed: u64,
    frames: u64,
    seconds: f32,
    score: u64,
    ects: u32,
    coffee: u32,
    distance: f32,
    jumps: u32,
    best: u64,
    new_best: bool,
    game_over: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.fps == 0 {
        bail!("--fps must be > 0");
    }
    if args.seconds <= 0.0 {
        bail!("--seconds must be > 0");
    }

    let tuning = match &args.tuning {
        Some(path) => {
            Tuning::load(path).with_context(|| format!("loading tuning {}", path.display()))?
        }
        None => Tuning::default(),
    };

    let seed = args.seed.unwrap_or_else(random_seed);
    let mut store = JsonFileStore::new(&args.best_file);
    let best = load_best_or_default(&mut store);
    let mut world = GameWorld::with_seed(tuning, seed, best);

    for run in 1..=args.runs {
        let summary = play_run(&mut world, &mut store, &args, run, seed)?;
        println!("{}", serde_json::to_string(&summary)?);
    }

    Ok(())
}

fn play_run(
    world: &mut GameWorld,
    store: &mut JsonFileStore,
    args: &Args,
    run: u32,
    seed: u64,
) -> Result<RunSummary> {
    let frame_ms = 1000.0 / args.fps as f64;
    let max_frames = (args.seconds as f64 * args.fps as f64).ceil() as u64;

    let mut clock = Clock::default();
    let mut input = match world.phase() {
        GamePhase::Idle => TickInput {
            start: true,
            ..Default::default()
        },
        GamePhase::GameOver => TickInput {
            restart: true,
            ..Default::default()
        },
        // previous run hit the time limit
        GamePhase::Running => TickInput {
            reset: true,
            start: true,
            ..Default::default()
        },
    };

    let mut frames = 0;
    let mut jumps = 0;
    let mut new_best = false;
    let mut snapshot = None;

    while frames < max_frames {
        let dt = clock.advance(frames as f64 * frame_ms);
        let current = tick(world, &input, dt, store);
        frames += 1;

        if args.trace {
            println!("{}", serde_json::to_string(&current)?);
        }

        for event in &current.events {
            match event {
                GameEvent::Jumped => jumps += 1,
                GameEvent::GameOver { new_best: best, .. } => new_best = *best,
                _ => {}
            }
        }

        input = TickInput {
            jump: !args.manual && autopilot::should_jump(&current),
            ..Default::default()
        };

        let over = current.phase == GamePhase::GameOver;
        snapshot = Some(current);
        if over {
            break;
        }
    }

    let Some(last) = snapshot else {
        bail!("run {run} produced no frames");
    };
    if last.phase == GamePhase::Running {
        log::info!("Run {run} reached the time limit still running");
    }

    Ok(RunSummary {
        run,
        seed,
        frames,
        seconds: frames as f32 / args.fps as f32,
        score: last.score,
        ects: last.ects,
        coffee: last.coffee,
        distance: last.distance,
        jumps,
        best: last.best,
        new_best,
        game_over: last.phase == GamePhase::GameOver,
    })
}
