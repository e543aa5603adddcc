//! Button state of the settings page.

/// Enabled/visible/pressed state of one button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    pub enabled: bool,
    pub hidden: bool,
    /// Toggle-button pressed marking; `false` for plain buttons.
    pub pressed: bool,
}

impl ButtonState {
    /// Enabled, visible, not pressed.
    pub const fn shown() -> Self {
        Self {
            enabled: true,
            hidden: false,
            pressed: false,
        }
    }

    /// Enabled but not rendered.
    pub const fn hidden() -> Self {
        Self {
            enabled: true,
            hidden: true,
            pressed: false,
        }
    }
}

impl Default for ButtonState {
    fn default() -> Self {
        Self::shown()
    }
}

/// The five buttons of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub save: ButtonState,
    pub reset: ButtonState,
    pub test_hotkey: ButtonState,
    /// Only visible while capturing.
    pub stop_hotkey: ButtonState,
    pub beep: ButtonState,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            save: ButtonState::shown(),
            reset: ButtonState::shown(),
            test_hotkey: ButtonState::shown(),
            stop_hotkey: ButtonState::hidden(),
            beep: ButtonState::shown(),
        }
    }
}
