//! Fixed key bindings for camera control and time-scale selection.

use winit::keyboard::KeyCode;

use crate::keyboard::KeyboardState;

/// Continuous camera controls, active while their key is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    PitchUp,
    PitchDown,
    YawLeft,
    YawRight,
    ZoomIn,
    ZoomOut,
}

impl Control {
    pub const ALL: [Control; 6] = [
        Control::PitchUp,
        Control::PitchDown,
        Control::YawLeft,
        Control::YawRight,
        Control::ZoomIn,
        Control::ZoomOut,
    ];

    pub fn key(self) -> KeyCode {
        match self {
            Control::PitchUp => KeyCode::ArrowUp,
            Control::PitchDown => KeyCode::ArrowDown,
            Control::YawLeft => KeyCode::ArrowLeft,
            Control::YawRight => KeyCode::ArrowRight,
            Control::ZoomIn => KeyCode::PageUp,
            Control::ZoomOut => KeyCode::PageDown,
        }
    }

    pub fn is_active(self, keyboard: &KeyboardState) -> bool {
        keyboard.is_held(self.key())
    }
}

const DIGITS: [KeyCode; 10] = [
    KeyCode::Digit0,
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

const NUMPAD: [KeyCode; 10] = [
    KeyCode::Numpad0,
    KeyCode::Numpad1,
    KeyCode::Numpad2,
    KeyCode::Numpad3,
    KeyCode::Numpad4,
    KeyCode::Numpad5,
    KeyCode::Numpad6,
    KeyCode::Numpad7,
    KeyCode::Numpad8,
    KeyCode::Numpad9,
];

/// Digit of a top-row or numpad number key, if `code` is one.
pub fn digit_of(code: KeyCode) -> Option<u8> {
    DIGITS
        .iter()
        .position(|&k| k == code)
        .or_else(|| NUMPAD.iter().position(|&k| k == code))
        .map(|d| d as u8)
}

/// Highest digit pressed this frame. Held digits do not repeat.
pub fn digit_just_pressed(keyboard: &KeyboardState) -> Option<u8> {
    DIGITS
        .iter()
        .chain(NUMPAD.iter())
        .filter(|&&code| keyboard.just_pressed(code))
        .filter_map(|&code| digit_of(code))
        .max()
}
