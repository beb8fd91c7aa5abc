use serde::{Deserialize, Serialize};

/// UI mode of the session. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Start,
    Playing,
    Paused,
    Resuming,
    GameOver,
    Options,
}

/// Countdown shown between Paused and Playing.
///
/// Carries an absolute deadline and the last displayed whole-second value so
/// the HUD label is only regenerated when the integer changes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResumeCountdown {
    deadline_ms: u64,
    last_display: Option<u32>,
}

impl ResumeCountdown {
    pub fn new(now_ms: u64, delay_seconds: u32) -> Self {
        Self {
            deadline_ms: now_ms + u64::from(delay_seconds) * 1000,
            last_display: None,
        }
    }

    /// Whole seconds remaining, ceil-rounded, clamped to zero.
    pub fn seconds_remaining(&self, now_ms: u64) -> u32 {
        if now_ms >= self.deadline_ms {
            return 0;
        }
        let remaining = self.deadline_ms - now_ms;
        ((remaining + 999) / 1000) as u32
    }

    pub fn expired(&self, now_ms: u64) -> bool {
        now_ms >= self.deadline_ms
    }

    /// Returns the current display value when it differs from the last one
    /// reported, marking it as shown.
    pub fn display_change(&mut self, now_ms: u64) -> Option<u32> {
        let seconds = self.seconds_remaining(now_ms);
        if self.last_display == Some(seconds) {
            None
        } else {
            self.last_display = Some(seconds);
            Some(seconds)
        }
    }
}

/// Sub-state carried while the options screen is open.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OptionsState {
    /// Mode to return to when the options screen closes.
    pub return_mode: Mode,
    pub dragging_volume: bool,
    pub dragging_resume: bool,
}

impl OptionsState {
    pub fn opened_from(return_mode: Mode) -> Self {
        Self {
            return_mode,
            dragging_volume: false,
            dragging_resume: false,
        }
    }

    pub fn clear_drags(&mut self) {
        self.dragging_volume = false;
        self.dragging_resume = false;
    }
}
