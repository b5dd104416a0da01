mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use display::Viewport;
use zombie_coop::entities::{GameStatus, PlayerId, PlayerIntent};
use zombie_coop::frame::FrameInput;
use zombie_coop::shop::SHOP_SLOTS;
use zombie_coop::{SimConfig, WorldSimulation};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

const CONFIG_ENV_VAR: &str = "ZOMBIE_COOP_CONFIG";
const LOG_ENV_VAR: &str = "ZOMBIE_COOP_LOG";

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

/// Keyboard halves: player 1 on the arrows, player 2 on the left hand.
fn sample_intents(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> FrameInput {
    let ch = |c: char| [KeyCode::Char(c), KeyCode::Char(c.to_ascii_uppercase())];
    FrameInput {
        players: [
            PlayerIntent {
                up: is_held(key_frame, &KeyCode::Up, frame),
                down: is_held(key_frame, &KeyCode::Down, frame),
                left: is_held(key_frame, &KeyCode::Left, frame),
                right: is_held(key_frame, &KeyCode::Right, frame),
                attack: any_held(key_frame, &ch('m'), frame),
            },
            PlayerIntent {
                up: any_held(key_frame, &ch('z'), frame),
                down: any_held(key_frame, &ch('s'), frame),
                left: any_held(key_frame, &ch('q'), frame),
                right: any_held(key_frame, &ch('d'), frame),
                attack: any_held(key_frame, &ch('a'), frame),
            },
        ],
    }
}

/// Shop keys: the first `SHOP_SLOTS` digits buy for player 1, the next
/// `SHOP_SLOTS` for player 2.
fn shop_key(code: &KeyCode) -> Option<(PlayerId, usize)> {
    let KeyCode::Char(c) = code else {
        return None;
    };
    let digit = c.to_digit(10)? as usize;
    match digit.checked_sub(1)? {
        slot if slot < SHOP_SLOTS => Some((PlayerId::One, slot)),
        slot if slot < 2 * SHOP_SLOTS => Some((PlayerId::Two, slot - SHOP_SLOTS)),
        _ => None,
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_config() -> io::Result<SimConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV_VAR).ok())
        .map(PathBuf::from);
    match path {
        Some(path) => SimConfig::load(&path).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e)),
        None => Ok(SimConfig::default()),
    }
}

/// The terminal is in raw mode while playing, so logs go to a file.
fn init_tracing() -> io::Result<PathBuf> {
    let path = std::env::var(LOG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir().join("zombie_coop.log"));
    let file = File::create(&path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .init();
    Ok(path)
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> io::Result<MenuResult> {
    let (width, height) = terminal::size()?;
    display::draw_menu(out, width, height)?;

    // Block until the user makes a choice
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) => match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                KeyCode::Esc => return Ok(MenuResult::Quit),
                _ => {}
            },
            Ok(Event::Resize(w, h)) => display::draw_menu(out, w, h)?,
            Ok(_) => {}
            Err(_) => return Ok(MenuResult::Quit),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the user quits.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key, and each frame we sample which keys are
/// still "fresh" into a `FrameInput` for both players at once.  Keyboard-
/// enhancement terminals also send `Release`, which drops the key immediately.
fn game_loop<W: Write>(
    out: &mut W,
    world: &mut WorldSimulation,
    rx: &mpsc::Receiver<Event>,
) -> io::Result<()> {
    let mut rng = thread_rng();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut shop_note: Option<String> = None;
    let mut frame: u64 = 0;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Enter
                            if matches!(world.status, GameStatus::GameOver | GameStatus::Victory) =>
                        {
                            world.start();
                            shop_note = None;
                        }
                        _ if world.status == GameStatus::StageTransition => {
                            if let Some((player, slot)) = shop_key(&code) {
                                shop_note = Some(match world.purchase_weapon(player, slot) {
                                    Ok(weapon) => format!("{:?} equipped the {}", player, weapon.name),
                                    Err(err) => {
                                        debug!(%err, "purchase refused");
                                        err.to_string()
                                    }
                                });
                            }
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Step the simulation with the measured frame time ─────────────────
        let dt_ms = last.elapsed().as_millis() as u64;
        last = Instant::now();

        let input = sample_intents(&key_frame, frame);
        let was = world.status;
        for event in world.tick(&input, dt_ms, &mut rng) {
            debug!(?event, "sim event");
        }
        if was == GameStatus::StageTransition && world.status == GameStatus::Playing {
            shop_note = None;
        }

        let (cols, rows) = terminal::size()?;
        let view = Viewport {
            cols,
            rows,
            world_width: world.config.screen_width,
            world_height: world.config.screen_height,
        };
        display::render(
            out,
            &world.render_frame(),
            &world.config.weapons,
            shop_note.as_deref(),
            &view,
        )?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    let config = load_config()?;
    let log_path = init_tracing()?;
    info!(log = %log_path.display(), max_stages = config.max_stages, "starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to HOLD_WINDOW.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    if !keyboard_enhanced {
        warn!("terminal does not report key releases; using hold window");
    }

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

    let result = run(&mut out, &rx, config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, config: SimConfig) -> io::Result<()> {
    match show_menu(out, rx)? {
        MenuResult::Quit => Ok(()),
        MenuResult::Start => {
            let mut world = WorldSimulation::new(config);
            world.start();
            game_loop(out, &mut world, rx)
        }
    }
}
