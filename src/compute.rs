//! Pure game-logic functions.
//!
//! Every public step takes an immutable reference to the current
//! `GameState` (plus the tuning, the held input and, where needed, an RNG
//! handle or the wall-clock time) and returns a brand-new `GameState`.
//! Side effects are limited to the injected RNG.

use rand::Rng;

use crate::config::Tuning;
use crate::entities::{Bullet, Cooldown, Enemy, GameState, GameStatus, Player, Position};
use crate::input::{Control, InputState};

// ── Constructors ─────────────────────────────────────────────────────────────

/// The player's spawn point: the arena center.
pub fn player_start(tuning: &Tuning) -> Player {
    Player {
        pos: Position::new(tuning.arena_width / 2.0, tuning.arena_height / 2.0),
    }
}

/// Build the state for a fresh run.  Restart uses this too.
pub fn init_state(tuning: &Tuning) -> GameState {
    GameState {
        player: player_start(tuning),
        enemies: Vec::new(),
        bullets: Vec::new(),
        cooldown: Cooldown::default(),
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
        next_id: 0,
    }
}

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Axis-aligned box, top-left anchored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn square(pos: Position, size: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            w: size,
            h: size,
        }
    }

    /// Strict overlap: boxes that merely touch do not collide.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

pub fn player_box(player: &Player, tuning: &Tuning) -> Aabb {
    Aabb::square(player.pos, tuning.player_size)
}

pub fn enemy_box(enemy: &Enemy) -> Aabb {
    Aabb::square(enemy.pos, enemy.size as f32)
}

pub fn bullet_box(bullet: &Bullet, tuning: &Tuning) -> Aabb {
    Aabb::square(bullet.pos, tuning.bullet_size)
}

// ── Motion ───────────────────────────────────────────────────────────────────

/// Apply held movement controls, then clamp so the whole sprite stays inside
/// the arena.  Opposite directions cancel out.
pub fn move_player(player: &Player, input: &InputState, tuning: &Tuning) -> Player {
    let mut x = player.pos.x;
    let mut y = player.pos.y;
    if input.is_held(Control::MoveLeft) {
        x -= tuning.player_speed;
    }
    if input.is_held(Control::MoveRight) {
        x += tuning.player_speed;
    }
    if input.is_held(Control::MoveUp) {
        y -= tuning.player_speed;
    }
    if input.is_held(Control::MoveDown) {
        y += tuning.player_speed;
    }
    Player {
        // max/min rather than clamp: never panics on a degenerate arena.
        pos: Position::new(
            x.min(tuning.player_max_x()).max(0.0),
            y.min(tuning.player_max_y()).max(0.0),
        ),
    }
}

/// Advance every bullet by its velocity and discard the ones that left the
/// open interval `(0, W) x (0, H)`.
pub fn move_bullets(bullets: &[Bullet], tuning: &Tuning) -> Vec<Bullet> {
    bullets
        .iter()
        .filter_map(|b| {
            let pos = Position::new(b.pos.x + b.dx, b.pos.y + b.dy);
            let inside = pos.x > 0.0
                && pos.x < tuning.arena_width
                && pos.y > 0.0
                && pos.y < tuning.arena_height;
            inside.then(|| Bullet { pos, ..b.clone() })
        })
        .collect()
}

/// Random-walk every enemy and discard the ones whose box left the arena.
pub fn move_enemies(enemies: &[Enemy], tuning: &Tuning, rng: &mut impl Rng) -> Vec<Enemy> {
    enemies
        .iter()
        .filter_map(|e| {
            let jx = (rng.gen::<f32>() - 0.5) * tuning.enemy_speed;
            let jy = (rng.gen::<f32>() - 0.5) * tuning.enemy_speed;
            let pos = Position::new(e.pos.x + jx, e.pos.y + jy);
            let size = e.size as f32;
            let inside = pos.x >= 0.0
                && pos.x <= tuning.arena_width - size
                && pos.y >= 0.0
                && pos.y <= tuning.arena_height - size;
            inside.then(|| Enemy { pos, ..e.clone() })
        })
        .collect()
}

pub fn motion_step(
    state: &GameState,
    input: &InputState,
    tuning: &Tuning,
    rng: &mut impl Rng,
) -> GameState {
    GameState {
        player: move_player(&state.player, input, tuning),
        bullets: move_bullets(&state.bullets, tuning),
        enemies: move_enemies(&state.enemies, tuning, rng),
        ..state.clone()
    }
}

// ── Spawning ─────────────────────────────────────────────────────────────────

/// Roll the per-tick spawn trial and, below the population cap, append one
/// enemy.  The trial is drawn even at the cap so the RNG stream does not
/// depend on the population.
pub fn spawn_step(state: &GameState, tuning: &Tuning, rng: &mut impl Rng) -> GameState {
    let roll = rng.gen_bool(tuning.spawn_chance.clamp(0.0, 1.0));
    if !roll || state.enemies.len() >= tuning.max_enemies {
        return state.clone();
    }

    let mut next = state.clone();
    let id = next.next_entity_id();
    let x = rng.gen::<f32>() * tuning.player_max_x().max(0.0);
    let y = rng.gen::<f32>() * tuning.player_max_y().max(0.0);
    let letter = char::from(b'A' + rng.gen_range(0..26u8));
    let size = if tuning.enemy_min_size < tuning.enemy_max_size {
        rng.gen_range(tuning.enemy_min_size..tuning.enemy_max_size)
    } else {
        tuning.enemy_min_size
    };

    log::debug!("spawned enemy {id} '{letter}' size {size} at ({x:.1}, {y:.1})");
    next.enemies.push(Enemy {
        id,
        pos: Position::new(x, y),
        letter,
        size,
    });
    next
}

// ── Collision ────────────────────────────────────────────────────────────────

/// Bullet hits first, then player contact against the survivors.
///
/// An enemy touched by any bullet is removed once and scores one point.
/// Bullets are not consumed, so one bullet may clear several overlapping
/// enemies in the same tick.
pub fn collision_step(state: &GameState, tuning: &Tuning) -> GameState {
    let bullet_boxes: Vec<Aabb> = state.bullets.iter().map(|b| bullet_box(b, tuning)).collect();

    let enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .filter(|e| {
            let eb = enemy_box(e);
            !bullet_boxes.iter().any(|bb| bb.overlaps(&eb))
        })
        .cloned()
        .collect();
    let kills = (state.enemies.len() - enemies.len()) as u32;

    let pb = player_box(&state.player, tuning);
    let player_hit = enemies.iter().any(|e| enemy_box(e).overlaps(&pb));

    let status = if player_hit {
        GameStatus::GameOver
    } else {
        state.status
    };

    GameState {
        enemies,
        score: state.score + kills,
        status,
        ..state.clone()
    }
}

// ── Firing ───────────────────────────────────────────────────────────────────

/// Unit vector for the held shoot controls, or `None` when none are held or
/// the held ones cancel out.
pub fn fire_direction(input: &InputState) -> Option<(f32, f32)> {
    if !input.any_held(&Control::SHOOT) {
        return None;
    }
    let axis = |pos: Control, neg: Control| match (input.is_held(pos), input.is_held(neg)) {
        (true, false) => 1.0_f32,
        (false, true) => -1.0,
        _ => 0.0,
    };
    let dx = axis(Control::ShootRight, Control::ShootLeft);
    let dy = axis(Control::ShootDown, Control::ShootUp);
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        return None;
    }
    Some((dx / len, dy / len))
}

/// Emit one bullet from the player's center when a shoot control is held.
pub fn fire_step(state: &GameState, input: &InputState, tuning: &Tuning) -> GameState {
    let Some((ux, uy)) = fire_direction(input) else {
        return state.clone();
    };
    let mut next = state.clone();
    let id = next.next_entity_id();
    let half = tuning.player_size / 2.0;
    next.bullets.push(Bullet {
        id,
        pos: Position::new(state.player.pos.x + half, state.player.pos.y + half),
        dx: ux * tuning.bullet_speed,
        dy: uy * tuning.bullet_speed,
    });
    next
}

// ── Special attack ───────────────────────────────────────────────────────────

/// True once the cooldown has fully elapsed (or the attack was never used).
pub fn special_attack_ready(cooldown: &Cooldown, now_ms: u64, tuning: &Tuning) -> bool {
    match cooldown.last_activation_ms {
        None => true,
        Some(t) => now_ms >= t && now_ms - t >= tuning.special_attack_cooldown_ms,
    }
}

/// Milliseconds until the attack is ready again; zero when ready.
pub fn special_attack_remaining_ms(cooldown: &Cooldown, now_ms: u64, tuning: &Tuning) -> u64 {
    cooldown.last_activation_ms.map_or(0, |t| {
        t.saturating_add(tuning.special_attack_cooldown_ms)
            .saturating_sub(now_ms)
    })
}

/// True for `special_attack_display_ms` after the last activation.
pub fn special_attack_active(cooldown: &Cooldown, now_ms: u64, tuning: &Tuning) -> bool {
    cooldown
        .last_activation_ms
        .is_some_and(|t| now_ms >= t && now_ms - t < tuning.special_attack_display_ms)
}

/// Clear every enemy for one point each when the special control is held and
/// the cooldown allows it.  The display flag is re-derived from the
/// activation timestamp on every call.
pub fn special_attack_step(
    state: &GameState,
    input: &InputState,
    now_ms: u64,
    tuning: &Tuning,
) -> GameState {
    let mut next = state.clone();

    if input.is_held(Control::Special) && special_attack_ready(&state.cooldown, now_ms, tuning) {
        let cleared = next.enemies.len() as u32;
        log::debug!("special attack at {now_ms}ms cleared {cleared} enemies");
        next.enemies.clear();
        next.score += cleared;
        next.cooldown.last_activation_ms = Some(now_ms);
    }

    next.cooldown.active = special_attack_active(&next.cooldown, now_ms, tuning);
    next
}

// ── Per-frame tick (nearly pure: RNG and clock are injected) ─────────────────

/// Advance the simulation by one tick:
/// motion, spawn, collision, fire, special attack.
///
/// A finished game is returned unchanged.  The tick that ends the game stops
/// right after collision, so nothing is fired on it.
pub fn tick(
    state: &GameState,
    input: &InputState,
    now_ms: u64,
    tuning: &Tuning,
    rng: &mut impl Rng,
) -> GameState {
    if state.is_over() {
        return state.clone();
    }

    let state = GameState {
        frame: state.frame + 1,
        ..state.clone()
    };
    let state = motion_step(&state, input, tuning, rng);
    let state = spawn_step(&state, tuning, rng);
    let state = collision_step(&state, tuning);
    if state.is_over() {
        log::trace!("frame {}: player hit", state.frame);
        return state;
    }
    let state = fire_step(&state, input, tuning);
    special_attack_step(&state, input, now_ms, tuning)
}
