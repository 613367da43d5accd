//! Input subsystem.
//!
//! Keys are tracked by Windows-style virtual key code so the frame driver
//! can test for `vk::ESCAPE` regardless of platform.
//! Runtime code is responsible for translating platform events into `InputEvent`s.

pub mod platform;
mod state;
mod types;

pub use state::{KeyTable, KEY_COUNT};
pub use types::{vk, InputEvent, KeyState, VirtualKey};
