mod display;
mod keys;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::Rng;

use alphabet_shooter::{Simulation, Tuning};
use keys::KeyTracker;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// OS key-repeat runs at 15 Hz or faster, so a window of 8 frames
/// (≈133 ms @ 60 FPS) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  `R` restarts after a game over.
fn game_loop<W: Write>(
    out: &mut W,
    sim: &mut Simulation,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let frame_len = sim.tuning().tick_duration();
    let mut keys = KeyTracker::new(HOLD_WINDOW);

    loop {
        let frame_start = Instant::now();
        keys.advance();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(());
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') if sim.is_over() => {
                            sim.restart();
                            keys.clear();
                            continue;
                        }
                        _ => {}
                    }
                    keys.press(code);
                }
                KeyEventKind::Repeat => keys.press(code),
                KeyEventKind::Release => keys.release(&code),
            }
        }

        sim.step(&keys.input_state());

        let (width, height) = terminal::size()?;
        display::render(out, &sim.snapshot(), sim.tuning(), width, height)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    env_logger::init();
    let tuning = Tuning::from_env();

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

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let seed: u64 = rand::thread_rng().gen();
    log::info!("seed {seed}");
    let mut sim = Simulation::new(tuning, seed);
    let result = game_loop(&mut out, &mut sim, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("final score {}", sim.score());
    result
}
