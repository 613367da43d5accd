use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{vk, InputEvent, KeyState, VirtualKey};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Returns `None` for events the key table does not track, including keys
/// without a virtual key code.
pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::KeyboardInput { event, .. } => {
            let state = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };
            let code = map_key(event.physical_key)?;
            Some(InputEvent::Key { code, state })
        }

        _ => None,
    }
}

/// Physical key to virtual key code.
pub fn map_key(pk: PhysicalKey) -> Option<VirtualKey> {
    let PhysicalKey::Code(code) = pk else {
        return None;
    };

    let letter = |n: u32| vk::KEY_A + n;
    let digit = |n: u32| vk::DIGIT_0 + n;
    let numpad = |n: u32| vk::NUMPAD_0 + n;
    let function = |n: u32| vk::F1 + n - 1;

    let key = match code {
        KeyCode::Escape => vk::ESCAPE,
        KeyCode::Enter | KeyCode::NumpadEnter => vk::RETURN,
        KeyCode::Tab => vk::TAB,
        KeyCode::Backspace => vk::BACK,
        KeyCode::Space => vk::SPACE,
        KeyCode::Pause => vk::PAUSE,
        KeyCode::CapsLock => vk::CAPITAL,
        KeyCode::PrintScreen => vk::SNAPSHOT,
        KeyCode::NumLock => vk::NUMLOCK,
        KeyCode::ScrollLock => vk::SCROLL,

        KeyCode::Insert => vk::INSERT,
        KeyCode::Delete => vk::DELETE,
        KeyCode::Home => vk::HOME,
        KeyCode::End => vk::END,
        KeyCode::PageUp => vk::PRIOR,
        KeyCode::PageDown => vk::NEXT,

        KeyCode::ArrowUp => vk::UP,
        KeyCode::ArrowDown => vk::DOWN,
        KeyCode::ArrowLeft => vk::LEFT,
        KeyCode::ArrowRight => vk::RIGHT,

        KeyCode::ShiftLeft | KeyCode::ShiftRight => vk::SHIFT,
        KeyCode::ControlLeft | KeyCode::ControlRight => vk::CONTROL,
        KeyCode::AltLeft | KeyCode::AltRight => vk::MENU,
        KeyCode::SuperLeft => vk::LWIN,
        KeyCode::SuperRight => vk::RWIN,

        KeyCode::KeyA => letter(0),
        KeyCode::KeyB => letter(1),
        KeyCode::KeyC => letter(2),
        KeyCode::KeyD => letter(3),
        KeyCode::KeyE => letter(4),
        KeyCode::KeyF => letter(5),
        KeyCode::KeyG => letter(6),
        KeyCode::KeyH => letter(7),
        KeyCode::KeyI => letter(8),
        KeyCode::KeyJ => letter(9),
        KeyCode::KeyK => letter(10),
        KeyCode::KeyL => letter(11),
        KeyCode::KeyM => letter(12),
        KeyCode::KeyN => letter(13),
        KeyCode::KeyO => letter(14),
        KeyCode::KeyP => letter(15),
        KeyCode::KeyQ => letter(16),
        KeyCode::KeyR => letter(17),
        KeyCode::KeyS => letter(18),
        KeyCode::KeyT => letter(19),
        KeyCode::KeyU => letter(20),
        KeyCode::KeyV => letter(21),
        KeyCode::KeyW => letter(22),
        KeyCode::KeyX => letter(23),
        KeyCode::KeyY => letter(24),
        KeyCode::KeyZ => letter(25),

        KeyCode::Digit0 => digit(0),
        KeyCode::Digit1 => digit(1),
        KeyCode::Digit2 => digit(2),
        KeyCode::Digit3 => digit(3),
        KeyCode::Digit4 => digit(4),
        KeyCode::Digit5 => digit(5),
        KeyCode::Digit6 => digit(6),
        KeyCode::Digit7 => digit(7),
        KeyCode::Digit8 => digit(8),
        KeyCode::Digit9 => digit(9),

        KeyCode::Numpad0 => numpad(0),
        KeyCode::Numpad1 => numpad(1),
        KeyCode::Numpad2 => numpad(2),
        KeyCode::Numpad3 => numpad(3),
        KeyCode::Numpad4 => numpad(4),
        KeyCode::Numpad5 => numpad(5),
        KeyCode::Numpad6 => numpad(6),
        KeyCode::Numpad7 => numpad(7),
        KeyCode::Numpad8 => numpad(8),
        KeyCode::Numpad9 => numpad(9),
        KeyCode::NumpadMultiply => vk::MULTIPLY,
        KeyCode::NumpadAdd => vk::ADD,
        KeyCode::NumpadSubtract => vk::SUBTRACT,
        KeyCode::NumpadDecimal => vk::DECIMAL,
        KeyCode::NumpadDivide => vk::DIVIDE,

        KeyCode::F1 => function(1),
        KeyCode::F2 => function(2),
        KeyCode::F3 => function(3),
        KeyCode::F4 => function(4),
        KeyCode::F5 => function(5),
        KeyCode::F6 => function(6),
        KeyCode::F7 => function(7),
        KeyCode::F8 => function(8),
        KeyCode::F9 => function(9),
        KeyCode::F10 => function(10),
        KeyCode::F11 => function(11),
        KeyCode::F12 => function(12),

        _ => return None,
    };

    Some(key)
}
