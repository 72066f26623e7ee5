//! Terminal runner (default binary).
//!
//! Owns the gravity timer: the engine only reports its tick period, and this
//! loop polls for keys until the next deadline, then calls `tick`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use blockfall::core::{Engine, EngineConfig};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameAction, TickResult};

/// Poll interval while no timer is armed (stopped, paused or game over).
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(name = "blockfall", version, about = "Falling-block puzzle game for the terminal")]
struct Args {
    #[arg(short, long, value_name = "FILE", help = "JSON engine configuration")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "RNG seed (defaults to the clock)")]
    seed: Option<u32>,

    #[arg(
        long,
        value_name = "FILE",
        help = "Append logs to FILE (filter with RUST_LOG, default info)"
    )]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref())?;

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(clock_seed);
    let mut engine = Engine::new(config, seed).context("invalid engine configuration")?;
    info!(
        seed,
        width = engine.grid().width(),
        height = engine.grid().height(),
        shapes = engine.config().shapes.len(),
        "starting"
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut engine);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!(score = engine.score(), lines = engine.lines(), "exit");
    result
}

/// Logs go to a file only: the game owns the terminal.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn load_config(path: &Path) -> Result<EngineConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, engine: &mut Engine) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut next_tick: Option<Instant> = None;
    let mut dirty = true;

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&engine.snapshot(), Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        // Arm the timer on entering play, disarm on leaving it.
        match (engine.wants_ticks(), next_tick) {
            (true, None) => next_tick = Some(Instant::now() + engine.tick_period()),
            (false, Some(_)) => next_tick = None,
            _ => {}
        }

        let timeout = next_tick.map_or(IDLE_POLL, |t| t.saturating_duration_since(Instant::now()));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        let level = engine.level();
                        let applied = engine.apply_action(action);
                        debug!(action = action.as_str(), applied, "command");
                        if applied {
                            dirty = true;
                            // New period takes effect from a fresh deadline
                            if engine.level() != level || action == GameAction::Restart {
                                next_tick = None;
                            }
                        }
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        if let Some(deadline) = next_tick {
            if Instant::now() >= deadline {
                if engine.tick() != TickResult::Rejected {
                    dirty = true;
                }
                next_tick = engine
                    .wants_ticks()
                    .then(|| Instant::now() + engine.tick_period());
            }
        }
    }
}
