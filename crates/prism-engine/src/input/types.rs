/// Virtual key code in the Windows numbering (`VK_*`), below 256.
pub type VirtualKey = u32;

/// Key codes the runtime maps platform keys onto.
pub mod vk {
    use super::VirtualKey;

    pub const BACK: VirtualKey = 0x08;
    pub const TAB: VirtualKey = 0x09;
    pub const RETURN: VirtualKey = 0x0D;
    pub const SHIFT: VirtualKey = 0x10;
    pub const CONTROL: VirtualKey = 0x11;
    pub const MENU: VirtualKey = 0x12;
    pub const PAUSE: VirtualKey = 0x13;
    pub const CAPITAL: VirtualKey = 0x14;
    pub const ESCAPE: VirtualKey = 0x1B;
    pub const SPACE: VirtualKey = 0x20;
    pub const PRIOR: VirtualKey = 0x21;
    pub const NEXT: VirtualKey = 0x22;
    pub const END: VirtualKey = 0x23;
    pub const HOME: VirtualKey = 0x24;
    pub const LEFT: VirtualKey = 0x25;
    pub const UP: VirtualKey = 0x26;
    pub const RIGHT: VirtualKey = 0x27;
    pub const DOWN: VirtualKey = 0x28;
    pub const SNAPSHOT: VirtualKey = 0x2C;
    pub const INSERT: VirtualKey = 0x2D;
    pub const DELETE: VirtualKey = 0x2E;

    /// `'0'..='9'` map to their ASCII codes.
    pub const DIGIT_0: VirtualKey = 0x30;

    /// `'A'..='Z'` map to their ASCII codes.
    pub const KEY_A: VirtualKey = 0x41;

    pub const LWIN: VirtualKey = 0x5B;
    pub const RWIN: VirtualKey = 0x5C;
    pub const NUMPAD_0: VirtualKey = 0x60;
    pub const MULTIPLY: VirtualKey = 0x6A;
    pub const ADD: VirtualKey = 0x6B;
    pub const SUBTRACT: VirtualKey = 0x6D;
    pub const DECIMAL: VirtualKey = 0x6E;
    pub const DIVIDE: VirtualKey = 0x6F;
    pub const F1: VirtualKey = 0x70;
    pub const NUMLOCK: VirtualKey = 0x90;
    pub const SCROLL: VirtualKey = 0x91;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Platform-agnostic input event consumed by the key table.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InputEvent {
    Key { code: VirtualKey, state: KeyState },

    /// Window focus changed.
    Focused(bool),
}
