use super::types::{InputEvent, KeyState, VirtualKey};

/// Number of tracked virtual key codes.
pub const KEY_COUNT: usize = 256;

/// Held state of every virtual key.
///
/// Codes at or above [`KEY_COUNT`] are ignored by every method.
#[derive(Debug, Clone)]
pub struct KeyTable {
    keys: [bool; KEY_COUNT],
}

impl Default for KeyTable {
    fn default() -> Self {
        Self {
            keys: [false; KEY_COUNT],
        }
    }
}

impl KeyTable {
    /// All keys released.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, code: VirtualKey) {
        if let Some(key) = self.keys.get_mut(code as usize) {
            *key = true;
        }
    }

    pub fn key_up(&mut self, code: VirtualKey) {
        if let Some(key) = self.keys.get_mut(code as usize) {
            *key = false;
        }
    }

    pub fn is_key_down(&self, code: VirtualKey) -> bool {
        self.keys.get(code as usize).copied().unwrap_or(false)
    }

    pub fn release_all(&mut self) {
        self.keys = [false; KEY_COUNT];
    }

    /// Applies a translated platform event.
    pub fn apply_event(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::Key {
                code,
                state: KeyState::Pressed,
            } => self.key_down(code),
            InputEvent::Key {
                code,
                state: KeyState::Released,
            } => self.key_up(code),

            // Avoids stuck keys when focus changes mid-press.
            InputEvent::Focused(false) => self.release_all(),
            InputEvent::Focused(true) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::vk;

    #[test]
    fn starts_released() {
        let keys = KeyTable::new();
        assert!((0..KEY_COUNT as u32).all(|k| !keys.is_key_down(k)));
    }

    #[test]
    fn down_then_up() {
        let mut keys = KeyTable::new();
        keys.key_down(vk::ESCAPE);
        assert!(keys.is_key_down(vk::ESCAPE));
        assert!(!keys.is_key_down(vk::SPACE));

        keys.key_up(vk::ESCAPE);
        assert!(!keys.is_key_down(vk::ESCAPE));
    }

    #[test]
    fn out_of_range_codes_are_ignored() {
        let mut keys = KeyTable::new();
        keys.key_down(256);
        keys.key_down(u32::MAX);
        assert!(!keys.is_key_down(256));
        assert!(!keys.is_key_down(u32::MAX));
        keys.key_up(1000);
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut keys = KeyTable::new();
        keys.apply_event(InputEvent::Key {
            code: vk::KEY_A,
            state: KeyState::Pressed,
        });
        keys.apply_event(InputEvent::Focused(true));
        assert!(keys.is_key_down(vk::KEY_A));

        keys.apply_event(InputEvent::Focused(false));
        assert!(!keys.is_key_down(vk::KEY_A));
    }
}
