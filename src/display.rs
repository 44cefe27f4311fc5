//! Rendering layer: all terminal output lives here.
//!
//! Each function receives a mutable writer and an immutable `Snapshot`.
//! No game logic is performed; this module only translates arena
//! coordinates into terminal cells.

use std::io::Write;

use alphabet_shooter::entities::Position;
use alphabet_shooter::{Snapshot, Tuning};
use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_BORDER_SPECIAL: Color = Color::Yellow;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_READY: Color = Color::Green;
const C_HUD_COOLING: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::Blue;
const C_ENEMY: Color = Color::Red;
const C_BULLET: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

// ── Arena → terminal mapping ──────────────────────────────────────────────────

/// Play area between the border: columns `1..width-1`, rows `2..height-2`.
struct Viewport {
    width: u16,
    height: u16,
    arena_width: f32,
    arena_height: f32,
}

impl Viewport {
    fn inner_cols(&self) -> u16 {
        self.width.saturating_sub(2).max(1)
    }

    fn inner_rows(&self) -> u16 {
        self.height.saturating_sub(4).max(1)
    }

    /// Terminal cell containing the arena point `pos`.
    fn cell(&self, pos: Position) -> (u16, u16) {
        let cols = self.inner_cols();
        let rows = self.inner_rows();
        let cx = (pos.x / self.arena_width * f32::from(cols)).floor();
        let cy = (pos.y / self.arena_height * f32::from(rows)).floor();
        let cx = (cx.max(0.0) as u16).min(cols - 1);
        let cy = (cy.max(0.0) as u16).min(rows - 1);
        (1 + cx, 2 + cy)
    }

    /// Cell at the center of a square box anchored at `pos`.
    fn center_cell(&self, pos: Position, size: f32) -> (u16, u16) {
        self.cell(Position::new(pos.x + size / 2.0, pos.y + size / 2.0))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    snap: &Snapshot,
    tuning: &Tuning,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let view = Viewport {
        width,
        height,
        arena_width: tuning.arena_width,
        arena_height: tuning.arena_height,
    };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view, snap.special_attack_active)?;
    draw_hud(out, &view, snap)?;

    out.queue(style::SetForegroundColor(C_ENEMY))?;
    for enemy in &snap.enemies {
        let (x, y) = view.center_cell(enemy.pos, enemy.size as f32);
        out.queue(cursor::MoveTo(x, y))?;
        out.queue(Print(enemy.letter))?;
    }

    out.queue(style::SetForegroundColor(C_BULLET))?;
    for bullet in &snap.bullets {
        let (x, y) = view.cell(bullet.pos);
        out.queue(cursor::MoveTo(x, y))?;
        out.queue(Print("•"))?;
    }

    let (px, py) = view.center_cell(snap.player, tuning.player_size);
    out.queue(cursor::MoveTo(px, py))?;
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(Print("Z"))?;

    draw_controls_hint(out, &view)?;

    if snap.game_over {
        draw_game_over(out, &view, snap)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport, flash: bool) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(if flash { C_BORDER_SPECIAL } else { C_BORDER }))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &Viewport, snap: &Snapshot) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", snap.score)))?;

    if snap.special_attack_active {
        let banner = "✸ SPECIAL ATTACK ✸";
        let bx = (view.width / 2).saturating_sub(banner.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(bx, 0))?;
        out.queue(style::SetForegroundColor(C_BORDER_SPECIAL))?;
        out.queue(Print(banner))?;
    }

    let (tag, color) = if snap.cooldown_remaining_ms == 0 {
        ("[SPECIAL READY]".to_string(), C_HUD_READY)
    } else {
        // Round up so "0s" never shows while still cooling.
        let secs = snap.cooldown_remaining_ms.div_ceil(1000);
        (format!("[SPECIAL {secs}s]"), C_HUD_COOLING)
    };
    let rx = view.width.saturating_sub(tag.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(&tag))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("WASD : Move   Arrows : Shoot   SPACE : Special   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, view: &Viewport, snap: &Snapshot) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];
    let score_line = format!("Final Score: {:>6}", snap.score);
    let hint = "R - Play Again  Q - Quit";

    let cx = view.width / 2;
    let total_rows = lines.len() + 2;
    let start_row = (view.height / 2).saturating_sub(total_rows as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row + 1))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
