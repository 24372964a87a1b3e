//! Key and button identifiers shared by the input sources

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Number of tracked buttons
    pub const COUNT: usize = 3;

    /// Slot of this button in per-button state arrays
    pub fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Middle => 2,
        }
    }

    /// Converts a winit button, `None` for buttons we don't track
    pub fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        match button {
            winit::event::MouseButton::Left => Some(Self::Left),
            winit::event::MouseButton::Right => Some(Self::Right),
            winit::event::MouseButton::Middle => Some(Self::Middle),
            _ => None,
        }
    }
}

/// Named key codes
///
/// Each variant maps to a small integer code (see [`KeyCode::code`]) inside
/// the bounded key space of [`super::keys::KeyStates`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum KeyCode {
    // Common keys
    Space,
    Enter,
    Escape,
    Backspace,
    Tab,

    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Numbers
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Arrows
    Left,
    Right,
    Up,
    Down,

    // Modifiers
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,
}

impl KeyCode {
    /// Raw code used to index key state
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Converts a winit physical key code, `None` for unmapped keys
    pub fn from_winit(key: winit::keyboard::KeyCode) -> Option<Self> {
        use winit::keyboard::KeyCode as WK;
        let key = match key {
            WK::Space => Self::Space,
            WK::Enter => Self::Enter,
            WK::Escape => Self::Escape,
            WK::Backspace => Self::Backspace,
            WK::Tab => Self::Tab,

            WK::KeyA => Self::A,
            WK::KeyB => Self::B,
            WK::KeyC => Self::C,
            WK::KeyD => Self::D,
            WK::KeyE => Self::E,
            WK::KeyF => Self::F,
            WK::KeyG => Self::G,
            WK::KeyH => Self::H,
            WK::KeyI => Self::I,
            WK::KeyJ => Self::J,
            WK::KeyK => Self::K,
            WK::KeyL => Self::L,
            WK::KeyM => Self::M,
            WK::KeyN => Self::N,
            WK::KeyO => Self::O,
            WK::KeyP => Self::P,
            WK::KeyQ => Self::Q,
            WK::KeyR => Self::R,
            WK::KeyS => Self::S,
            WK::KeyT => Self::T,
            WK::KeyU => Self::U,
            WK::KeyV => Self::V,
            WK::KeyW => Self::W,
            WK::KeyX => Self::X,
            WK::KeyY => Self::Y,
            WK::KeyZ => Self::Z,

            WK::Digit0 => Self::Num0,
            WK::Digit1 => Self::Num1,
            WK::Digit2 => Self::Num2,
            WK::Digit3 => Self::Num3,
            WK::Digit4 => Self::Num4,
            WK::Digit5 => Self::Num5,
            WK::Digit6 => Self::Num6,
            WK::Digit7 => Self::Num7,
            WK::Digit8 => Self::Num8,
            WK::Digit9 => Self::Num9,

            WK::F1 => Self::F1,
            WK::F2 => Self::F2,
            WK::F3 => Self::F3,
            WK::F4 => Self::F4,
            WK::F5 => Self::F5,
            WK::F6 => Self::F6,
            WK::F7 => Self::F7,
            WK::F8 => Self::F8,
            WK::F9 => Self::F9,
            WK::F10 => Self::F10,
            WK::F11 => Self::F11,
            WK::F12 => Self::F12,

            WK::ArrowLeft => Self::Left,
            WK::ArrowRight => Self::Right,
            WK::ArrowUp => Self::Up,
            WK::ArrowDown => Self::Down,

            WK::ShiftLeft => Self::ShiftLeft,
            WK::ShiftRight => Self::ShiftRight,
            WK::ControlLeft => Self::ControlLeft,
            WK::ControlRight => Self::ControlRight,
            WK::AltLeft => Self::AltLeft,
            WK::AltRight => Self::AltRight,

            _ => return None,
        };
        Some(key)
    }
}

impl From<KeyCode> for u16 {
    fn from(key: KeyCode) -> Self {
        key.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes_are_distinct_and_small() {
        assert_eq!(KeyCode::Space.code(), 0);
        assert_ne!(KeyCode::Escape.code(), KeyCode::C.code());
        assert!(KeyCode::AltRight.code() < 256);
    }

    #[test]
    fn test_winit_key_mapping() {
        use winit::keyboard::KeyCode as WK;
        assert_eq!(KeyCode::from_winit(WK::Escape), Some(KeyCode::Escape));
        assert_eq!(KeyCode::from_winit(WK::KeyC), Some(KeyCode::C));
        assert_eq!(KeyCode::from_winit(WK::Space), Some(KeyCode::Space));
        assert_eq!(KeyCode::from_winit(WK::NumpadAdd), None);
    }

    #[test]
    fn test_mouse_button_mapping() {
        assert_eq!(
            MouseButton::from_winit(winit::event::MouseButton::Middle),
            Some(MouseButton::Middle)
        );
        assert_eq!(
            MouseButton::from_winit(winit::event::MouseButton::Other(7)),
            None
        );
        assert_eq!(MouseButton::Right.index(), 1);
    }
}
