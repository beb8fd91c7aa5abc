use serde::{Deserialize, Serialize};

/// Sound effects the game core can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sound {
    EatFood,
}

/// Audio collaborator contract.
///
/// Playback is fire-and-forget; the core never waits on the mixer. Volume and
/// mute are pushed whenever the corresponding settings change.
pub trait AudioSink {
    fn play(&mut self, sound: Sound);

    /// Master volume in `[0.0, 1.0]`.
    fn set_volume(&mut self, volume: f32);

    fn set_muted(&mut self, muted: bool);
}
