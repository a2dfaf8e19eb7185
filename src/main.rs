mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use platformer::clock::SystemClock;
use platformer::config::GameConfig;
use platformer::entities::{Controls, GameMode};
use platformer::level::DirLevelSource;
use platformer::session::{Session, SessionStatus};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "platformer", about = "Tile-based side-scrolling platformer in the terminal")]
struct Args {
    /// TOML config file (defaults: $PLATFORMER_CONFIG, then ./platformer.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding mapN.json / crabsN.json
    #[arg(long)]
    levels: Option<PathBuf>,

    /// Level to start on
    #[arg(long)]
    level: Option<u32>,

    /// Where to write the log; the terminal is taken by the game
    #[arg(long, default_value = "platformer.log")]
    log_file: PathBuf,
}

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many ticks.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 ticks (100 ms at
/// 80 ticks/s) is refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` ticks.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| is_held(key_frame, key, frame))
}

fn is_quit(code: &KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits or clears the last level.
///
/// Input model: a `key_frame` map records the tick of the last press/repeat
/// event for every key.  Each tick, every key that is still "fresh" counts
/// as held, so Space + A/D can be held together.  Keyboard-enhancement
/// terminals also send releases, which drop the key immediately.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session<DirLevelSource, SystemClock>,
    rx: &mpsc::Receiver<Event>,
) -> Result<SessionStatus> {
    let tick_budget = session.config().tick_duration();

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut quit = false;
        let mut pressed_any = false;
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    if is_quit(&code, modifiers) {
                        quit = true;
                    }
                    pressed_any = true;
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let controls = Controls {
            move_left: any_held(&key_frame, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame),
            move_right: any_held(&key_frame, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame),
            jump: any_held(
                &key_frame,
                &[KeyCode::Char(' '), KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
                frame,
            ),
            fire: any_held(&key_frame, &[KeyCode::Char('f'), KeyCode::Char('F')], frame),
            restart: pressed_any && session.mode() == GameMode::GameOver,
            quit,
        };

        let status = session.step(&controls)?;
        if status != SessionStatus::Running {
            return Ok(status);
        }

        display::render(out, &session.frame())?;

        let elapsed = frame_start.elapsed();
        if elapsed < tick_budget {
            std::thread::sleep(tick_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_tracing(log_file: &Path) -> Result<()> {
    let file = File::create(log_file)
        .with_context(|| format!("failed to create log file {}", log_file.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_file)?;

    let mut config = GameConfig::discover(args.config.as_deref())?;
    if let Some(dir) = args.levels {
        config.levels.dir = dir;
    }
    if let Some(level) = args.level {
        config.levels.first = level;
    }
    config.validate()?;

    let source = DirLevelSource::new(config.levels.dir.clone());
    let mut session = Session::start(source, SystemClock::new(), config)
        .context("failed to load the first level")?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &mut session, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    match &result {
        Ok(SessionStatus::Completed) => {
            info!(coins = session.world().coin_count, "all levels cleared");
            println!("You cleared every level!");
        }
        Ok(_) => info!("session ended"),
        Err(err) => error!(error = %err, "session aborted"),
    }
    result.map(|_| ())
}
