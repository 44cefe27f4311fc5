//! Held-control set sampled once per tick.
//!
//! The collector (keyboard, test harness, replay) calls `press`/`release`;
//! the simulation only ever reads it.

use std::collections::HashSet;

/// Every control the simulation understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Control {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    ShootUp,
    ShootRight,
    ShootDown,
    ShootLeft,
    Special,
}

impl Control {
    pub const ALL: [Control; 9] = [
        Control::MoveLeft,
        Control::MoveRight,
        Control::MoveUp,
        Control::MoveDown,
        Control::ShootUp,
        Control::ShootRight,
        Control::ShootDown,
        Control::ShootLeft,
        Control::Special,
    ];

    pub const SHOOT: [Control; 4] = [
        Control::ShootUp,
        Control::ShootRight,
        Control::ShootDown,
        Control::ShootLeft,
    ];

    /// Map a browser-style key name (`"a"`, `"ArrowUp"`, `" "`) to a control.
    /// Anything unrecognized yields `None`.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "a" | "A" => Some(Control::MoveLeft),
            "d" | "D" => Some(Control::MoveRight),
            "w" | "W" => Some(Control::MoveUp),
            "s" | "S" => Some(Control::MoveDown),
            "ArrowUp" => Some(Control::ShootUp),
            "ArrowRight" => Some(Control::ShootRight),
            "ArrowDown" => Some(Control::ShootDown),
            "ArrowLeft" => Some(Control::ShootLeft),
            " " => Some(Control::Special),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    held: HashSet<Control>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, control: Control) {
        self.held.insert(control);
    }

    pub fn release(&mut self, control: Control) {
        self.held.remove(&control);
    }

    /// Key-name entry point for collectors that only see raw key strings.
    pub fn press_key(&mut self, name: &str) {
        if let Some(control) = Control::from_key_name(name) {
            self.press(control);
        }
    }

    pub fn release_key(&mut self, name: &str) {
        if let Some(control) = Control::from_key_name(name) {
            self.release(control);
        }
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.held.contains(&control)
    }

    pub fn any_held(&self, controls: &[Control]) -> bool {
        controls.iter().any(|c| self.is_held(*c))
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

impl FromIterator<Control> for InputState {
    fn from_iter<I: IntoIterator<Item = Control>>(iter: I) -> Self {
        Self {
            held: iter.into_iter().collect(),
        }
    }
}
