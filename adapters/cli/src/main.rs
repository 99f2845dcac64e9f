#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives a Miam session.
//!
//! The adapter resolves a strategy from the registry, builds the session
//! board, seeds it, then feeds step or continuous-play frames through the
//! session while printing the board as text.

mod config;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use miam_core::{BoardSize, CellCoord};
use miam_rendering::{RenderingBackend, Scene, TextBackend, TextStyle};
use miam_system_bootstrap::{pattern, random_cells, FrameInput, Registry, Session, PATTERNS};
use tracing::{info, warn};

use crate::config::{parse_cell, parse_size, SessionPlan};

/// Turn-based grid automaton driver.
#[derive(Debug, Parser)]
#[command(name = "miam", version)]
pub(crate) struct Args {
    /// Registered strategy to play.
    #[arg(long)]
    strategy: Option<String>,
    /// Board size as WxH, overriding the strategy's preference.
    #[arg(long, value_parser = parse_size)]
    size: Option<BoardSize>,
    /// TOML session file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Built-in pattern placed at the centre of the board.
    #[arg(long)]
    pattern: Option<String>,
    /// Cell to occupy before play starts, as X,Y. Repeatable.
    #[arg(long, value_parser = parse_cell)]
    cell: Vec<CellCoord>,
    /// Seed for a random initial fill.
    #[arg(long)]
    random: Option<u64>,
    /// Fraction of cells occupied by the random fill.
    #[arg(long)]
    density: Option<f64>,
    /// Cell to select before play starts, as X,Y.
    #[arg(long, value_parser = parse_cell)]
    select: Option<CellCoord>,
    /// Number of single-step turns to run.
    #[arg(long, default_value_t = 1)]
    steps: u64,
    /// Run this many frames of continuous play instead of single steps.
    #[arg(long, default_value_t = 0)]
    frames: u64,
    /// Frames between two turns during continuous play.
    #[arg(long)]
    rate: Option<u32>,
    /// Print the board after every turn, not just at the end.
    #[arg(long)]
    trace: bool,
    /// Print a plain occupancy mark instead of stack depths.
    #[arg(long)]
    flat: bool,
    /// Paint occupied cells with their entity color using ANSI escapes.
    #[arg(long)]
    color: bool,
    /// List registered strategies and patterns, then exit.
    #[arg(long)]
    list: bool,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .compact()
            .init();
    }
}

/// Entry point for the Miam command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let registry = Registry::default();

    if args.list {
        println!("strategies: {}", registry.names().collect::<Vec<_>>().join(", "));
        let names: Vec<&str> = PATTERNS.iter().map(|pattern| pattern.name).collect();
        println!("patterns: {}", names.join(", "));
        return Ok(());
    }

    run(&args, &registry)
}

fn run(args: &Args, registry: &Registry) -> Result<()> {
    let file = args.config.as_deref().map(config::load).transpose()?;
    let plan = SessionPlan::resolve(args, file);

    let strategy = registry.create(&plan.strategy)?;
    let mut session = match plan.size {
        Some(size) => Session::with_size(strategy, size)?,
        None => Session::new(strategy)?,
    };
    session.clock_mut().set_rate(plan.rate);
    seed(&mut session, &plan)?;

    if let Some(cell) = args.select {
        if !session.select(cell)? {
            warn!(%cell, "selection refused, cell is empty");
        }
    }

    let style = TextStyle {
        depth: !args.flat,
        color: args.color,
    };
    let mut backend = TextBackend::new(io::stdout().lock()).with_style(style);
    present(&mut backend, &session)?;

    if args.frames > 0 {
        play(&mut session, &mut backend, args)?;
    } else {
        let step = FrameInput {
            step_requested: true,
            ..FrameInput::default()
        };
        for _ in 0..args.steps {
            let _ = session.frame(step)?;
            if args.trace {
                present(&mut backend, &session)?;
            }
        }
    }

    if !args.trace {
        present(&mut backend, &session)?;
    }
    info!(
        strategy = session.strategy_name(),
        generation = session.generation(),
        "session finished"
    );
    Ok(())
}

fn seed(session: &mut Session, plan: &SessionPlan) -> Result<()> {
    if let Some(name) = plan.pattern.as_deref() {
        let pattern = pattern(name).with_context(|| format!("unknown pattern `{name}`"))?;
        let _ = session.seed_pattern(pattern)?;
    }

    let _ = session
        .place(&plan.cells)
        .context("requested cell does not fit the board")?;

    if let Some((random_seed, density)) = plan.random {
        let size = session.board().get_size();
        let _ = session.seed(random_cells(size, random_seed, density))?;
    }
    Ok(())
}

fn play<B: RenderingBackend>(session: &mut Session, backend: &mut B, args: &Args) -> Result<()> {
    let mut input = FrameInput {
        toggle_play: true,
        ..FrameInput::default()
    };
    for _ in 0..args.frames {
        let outcome = session.frame(input)?;
        input = FrameInput::default();
        if outcome.advanced && args.trace {
            present(backend, session)?;
        }
    }
    Ok(())
}

fn present<B: RenderingBackend>(backend: &mut B, session: &Session) -> Result<()> {
    let scene = Scene::capture(session.board(), session.generation())
        .context("failed to capture scene")?;
    backend.present(&scene)
}
