//! Terminal key-hold tracking.
//!
//! Instead of acting on each key event individually, we record the frame of
//! the last press/repeat event for every key.  Each frame the keys that are
//! still "fresh" (within `window` frames) are turned into an `InputState`,
//! so movement, shooting and the special attack can all be held together.
//!
//! Works on two classes of terminal:
//! * **Keyboard-enhancement capable** (kitty protocol): proper `Release`
//!   events remove keys immediately.
//! * **Classic terminals**: only `Press` events (OS key-repeat shows up as
//!   repeated presses).  Keys expire after `window` frames of silence.

use std::collections::HashMap;

use alphabet_shooter::{Control, InputState};
use crossterm::event::KeyCode;

/// Map a terminal key to a game control.
pub fn control_for(code: &KeyCode) -> Option<Control> {
    match code {
        KeyCode::Up => Some(Control::ShootUp),
        KeyCode::Right => Some(Control::ShootRight),
        KeyCode::Down => Some(Control::ShootDown),
        KeyCode::Left => Some(Control::ShootLeft),
        KeyCode::Char(c) => Control::from_key_name(c.encode_utf8(&mut [0; 4])),
        _ => None,
    }
}

pub struct KeyTracker {
    last_seen: HashMap<KeyCode, u64>,
    frame: u64,
    window: u64,
}

impl KeyTracker {
    pub fn new(window: u64) -> Self {
        Self {
            last_seen: HashMap::new(),
            frame: 0,
            window,
        }
    }

    /// Call once at the start of every frame.
    pub fn advance(&mut self) {
        self.frame += 1;
    }

    /// Press or repeat.
    pub fn press(&mut self, code: KeyCode) {
        self.last_seen.insert(code, self.frame);
    }

    pub fn release(&mut self, code: &KeyCode) {
        self.last_seen.remove(code);
    }

    pub fn clear(&mut self) {
        self.last_seen.clear();
    }

    pub fn is_held(&self, code: &KeyCode) -> bool {
        self.last_seen
            .get(code)
            .is_some_and(|&last| self.frame.saturating_sub(last) <= self.window)
    }

    /// Controls whose keys are currently held.
    pub fn input_state(&self) -> InputState {
        self.last_seen
            .keys()
            .filter(|code| self.is_held(code))
            .filter_map(control_for)
            .collect()
    }
}
