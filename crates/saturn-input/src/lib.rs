//! Keyboard input: frame-coherent key state and the simulator's fixed bindings.

pub mod bindings;
pub mod keyboard;

pub use bindings::{Control, digit_just_pressed};
pub use keyboard::{KeyboardState, RawKeyEvent};
