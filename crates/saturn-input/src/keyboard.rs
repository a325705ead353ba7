//! Frame-coherent keyboard state tracker.
//!
//! Key events arrive between frames; [`KeyboardState`] folds them into held
//! keys plus per-frame press and release edges, keyed by physical key code so
//! bindings do not depend on the keyboard layout.

use std::collections::HashSet;

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Minimal description of a key event, free of winit's platform fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawKeyEvent {
    pub code: KeyCode,
    pub state: ElementState,
    pub repeat: bool,
}

impl RawKeyEvent {
    /// Extract the fields we track. Keys without a known code are dropped.
    pub fn from_winit(event: &KeyEvent) -> Option<Self> {
        match event.physical_key {
            PhysicalKey::Code(code) => Some(Self {
                code,
                state: event.state,
                repeat: event.repeat,
            }),
            PhysicalKey::Unidentified(_) => None,
        }
    }
}

/// Held keys plus the edges seen since the last [`end_frame`](Self::end_frame).
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
    pressed_this_frame: HashSet<KeyCode>,
    released_this_frame: HashSet<KeyCode>,
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_event(&mut self, event: &KeyEvent) {
        if let Some(raw) = RawKeyEvent::from_winit(event) {
            self.process_raw(raw);
        }
    }

    /// Fold one event into the state. OS key-repeat events are ignored.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        match event.state {
            ElementState::Pressed => {
                if self.held.insert(event.code) {
                    self.pressed_this_frame.insert(event.code);
                }
            }
            ElementState::Released => {
                if self.held.remove(&event.code) {
                    self.released_this_frame.insert(event.code);
                }
            }
        }
    }

    /// Release everything, e.g. when the window loses focus and release events
    /// will never arrive.
    pub fn release_all(&mut self) {
        if !self.held.is_empty() {
            tracing::debug!(keys = self.held.len(), "Releasing held keys");
        }
        self.released_this_frame.extend(self.held.drain());
    }

    #[must_use]
    pub fn is_held(&self, code: KeyCode) -> bool {
        self.held.contains(&code)
    }

    /// `true` only during the frame the key went down.
    #[must_use]
    pub fn just_pressed(&self, code: KeyCode) -> bool {
        self.pressed_this_frame.contains(&code)
    }

    /// `true` only during the frame the key came up.
    #[must_use]
    pub fn just_released(&self, code: KeyCode) -> bool {
        self.released_this_frame.contains(&code)
    }

    /// Forget this frame's edges. Call once per frame after input is consumed.
    pub fn end_frame(&mut self) {
        self.pressed_this_frame.clear();
        self.released_this_frame.clear();
    }
}
