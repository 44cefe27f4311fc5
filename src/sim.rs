//! The simulation clock.
//!
//! A `Simulation` owns one run: the current `GameState`, the tuning, the RNG
//! and the wall-clock epoch used by the special-attack cooldown.  Callers
//! drive it with `step` once per tick and read a `Snapshot` to render.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::compute::{init_state, special_attack_active, special_attack_remaining_ms, tick};
use crate::config::Tuning;
use crate::entities::{Bullet, Enemy, GameState, Position};
use crate::input::InputState;

/// Everything a renderer needs for one frame.  Owned, so it can be handed to
/// another thread without tearing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub player: Position,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub special_attack_active: bool,
    /// Zero when the special attack is ready.
    pub cooldown_remaining_ms: u64,
    pub score: u32,
    pub game_over: bool,
    pub frame: u64,
}

pub struct Simulation<R: Rng = StdRng> {
    state: GameState,
    tuning: Tuning,
    rng: R,
    epoch: Instant,
}

impl Simulation<StdRng> {
    /// A run whose randomness is fully determined by `seed`.
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self::with_rng(tuning, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    pub fn with_rng(tuning: Tuning, rng: R) -> Self {
        log::info!(
            "starting run: arena {}x{} at {} Hz",
            tuning.arena_width,
            tuning.arena_height,
            tuning.tick_rate_hz
        );
        Self {
            state: init_state(&tuning),
            tuning,
            rng,
            epoch: Instant::now(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Swap in a whole entity store, e.g. to resume a scripted scenario.
    pub fn replace_state(&mut self, state: GameState) {
        self.state = state;
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Wall-clock milliseconds since this simulation was created.
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Run one tick stamped with the current wall-clock time.
    pub fn step(&mut self, input: &InputState) {
        let now_ms = self.elapsed_ms();
        self.step_at(input, now_ms);
    }

    /// Run one tick with an explicit timestamp (milliseconds since the epoch
    /// of this simulation).  Once the game is over this is a no-op.
    pub fn step_at(&mut self, input: &InputState, now_ms: u64) {
        if self.state.is_over() {
            return;
        }
        self.state = tick(&self.state, input, now_ms, &self.tuning, &mut self.rng);
        if self.state.is_over() {
            log::info!(
                "game over at frame {} with score {}",
                self.state.frame,
                self.state.score
            );
        }
    }

    /// Start a fresh run: player centered, no enemies or bullets, score and
    /// cooldown reset.
    pub fn restart(&mut self) {
        log::info!("restarting (previous score {})", self.state.score);
        self.state = init_state(&self.tuning);
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_at(self.elapsed_ms())
    }

    pub fn snapshot_at(&self, now_ms: u64) -> Snapshot {
        let s = &self.state;
        Snapshot {
            player: s.player.pos,
            enemies: s.enemies.clone(),
            bullets: s.bullets.clone(),
            special_attack_active: special_attack_active(&s.cooldown, now_ms, &self.tuning),
            cooldown_remaining_ms: special_attack_remaining_ms(&s.cooldown, now_ms, &self.tuning),
            score: s.score,
            game_over: s.is_over(),
            frame: s.frame,
        }
    }
}
