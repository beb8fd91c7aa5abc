use serde::{Deserialize, Serialize};

/// Logical keys the game core reacts to.
///
/// The windowing layer maps raw scancodes down to this set; anything else
/// arrives as `Other` and is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
    Escape,
    Other,
}

/// Discrete events delivered by the input collaborator each poll phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Quit,
    KeyDown { key: Key, repeat: bool },
    MouseButtonDown { x: f32, y: f32 },
    MouseButtonUp,
    MouseMotion { x: f32, y: f32 },
}

/// A menu widget was activated with this logical effect.
///
/// Pixel-level hit testing of buttons, sliders, and checkboxes happens in the
/// UI layer; the core only sees the outcome. Slider actions carry the value
/// the drag position maps to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MenuAction {
    /// Start button on the start screen.
    StartGame,
    /// Options button on the start or pause screen.
    OpenOptions,
    /// Resume button on the pause screen.
    ResumePaused,
    /// Exit button on the pause screen.
    ExitGame,
    /// Restart button on the game-over screen.
    Restart,
    /// Back button on the options screen.
    CloseOptions,
    /// Volume slider clicked or dragged to this raw value.
    SetVolume(f32),
    /// Mute checkbox toggled.
    ToggleMute,
    /// Resume-delay slider clicked or dragged to this value in seconds.
    SetResumeDelay(u32),
}
