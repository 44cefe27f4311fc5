//! Alphabet Shooter: steer a `Z` around the arena, shoot the drifting
//! letters, and don't let one touch you.
//!
//! Core modules:
//! - `entities`: plain game data
//! - `compute`: pure per-tick steps (motion, spawn, collision, fire, special attack)
//! - `sim`: the fixed-rate driver and render snapshots
//! - `input`: held-control set fed by an input collector
//! - `config`: tuning constants, loadable from JSON

pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod sim;

pub use config::Tuning;
pub use error::ConfigError;
pub use input::{Control, InputState};
pub use sim::{Simulation, Snapshot};
