//! All game entity types. Pure data, no game logic.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    /// Terminal until an explicit restart.
    GameOver,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

/// The controllable `Z`.  Square, `player_size` on each side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Position,
}

/// A hostile letter drifting around the arena.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u64,
    /// Top-left corner of the enemy's square box.
    pub pos: Position,
    /// One uppercase glyph, `A..=Z`.
    pub letter: char,
    /// Side length of the box, also used as the font size by renderers.
    pub size: u32,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u64,
    pub pos: Position,
    /// Horizontal velocity per tick.
    pub dx: f32,
    /// Vertical velocity per tick (positive = downward).
    pub dy: f32,
}

// ── Special attack ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    /// Wall-clock millisecond of the last activation; `None` until the first one.
    pub last_activation_ms: Option<u64>,
    /// True while the clear-screen effect should be displayed.
    pub active: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entity store.  Cloneable so pure update functions can return a new
/// copy without mutating the original.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Most recently fired last.
    pub bullets: Vec<Bullet>,
    pub cooldown: Cooldown,
    pub score: u32,
    pub status: GameStatus,
    /// Number of ticks executed since the run started.
    pub frame: u64,
    /// Next entity id to hand out.  Ids are never reused within a run.
    pub next_id: u64,
}

impl GameState {
    /// Allocate a fresh id for a new enemy or bullet.
    pub fn next_entity_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}
