/// Failure updating a HUD label.
///
/// Text objects are a required resource: a label that cannot be updated means
/// the rendering/text subsystem is corrupted, so the session treats any
/// `HudError` as fatal and stops running instead of retrying.
#[derive(Debug)]
pub struct HudError {
    message: String,
}

impl HudError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for HudError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for HudError {}

/// Render-side text collaborator.
///
/// The core hands over pre-formatted label content; measuring, layout, and
/// drawing stay on the render side.
pub trait HudText {
    /// In-game score label ("Score: N").
    fn set_score(&mut self, score: usize) -> Result<(), HudError>;

    /// Game-over screen: final score plus the persisted high score.
    fn set_game_over(&mut self, score: usize, high_score: u64) -> Result<(), HudError>;

    /// Pause screen score label.
    fn set_pause(&mut self, score: usize) -> Result<(), HudError>;

    /// Countdown shown while resuming, in whole seconds remaining.
    fn set_resume_countdown(&mut self, seconds: u32) -> Result<(), HudError>;

    /// High score shown on the start screen.
    fn set_start_high_score(&mut self, high_score: u64) -> Result<(), HudError>;

    /// Current volume shown next to the options slider.
    fn set_options_volume(&mut self, volume: f32) -> Result<(), HudError>;

    /// Current resume delay shown next to the options slider.
    fn set_options_resume_delay(&mut self, seconds: u32) -> Result<(), HudError>;
}
