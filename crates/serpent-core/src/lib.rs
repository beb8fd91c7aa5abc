pub mod audio;
pub mod clock;
pub mod hud;
pub mod input;
pub mod settings;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::audio::{AudioSink, Sound};
    use crate::hud::{HudError, HudText};

    /// HUD test double that records the last value pushed to each label.
    ///
    /// Setting `fail_all` makes every label update return an error, which is
    /// how the fatal per-tick failure path is exercised in session tests.
    #[derive(Debug, Default)]
    pub struct NullHud {
        pub fail_all: bool,
        pub score: Option<usize>,
        pub game_over: Option<(usize, u64)>,
        pub pause_score: Option<usize>,
        pub countdowns: Vec<u32>,
        pub start_high_score: Option<u64>,
        pub options_volume: Option<f32>,
        pub options_resume_delay: Option<u32>,
    }

    impl NullHud {
        fn check(&self) -> Result<(), HudError> {
            if self.fail_all {
                Err(HudError::new("null hud forced failure"))
            } else {
                Ok(())
            }
        }
    }

    impl HudText for NullHud {
        fn set_score(&mut self, score: usize) -> Result<(), HudError> {
            self.check()?;
            self.score = Some(score);
            Ok(())
        }

        fn set_game_over(&mut self, score: usize, high_score: u64) -> Result<(), HudError> {
            self.check()?;
            self.game_over = Some((score, high_score));
            Ok(())
        }

        fn set_pause(&mut self, score: usize) -> Result<(), HudError> {
            self.check()?;
            self.pause_score = Some(score);
            Ok(())
        }

        fn set_resume_countdown(&mut self, seconds: u32) -> Result<(), HudError> {
            self.check()?;
            self.countdowns.push(seconds);
            Ok(())
        }

        fn set_start_high_score(&mut self, high_score: u64) -> Result<(), HudError> {
            self.check()?;
            self.start_high_score = Some(high_score);
            Ok(())
        }

        fn set_options_volume(&mut self, volume: f32) -> Result<(), HudError> {
            self.check()?;
            self.options_volume = Some(volume);
            Ok(())
        }

        fn set_options_resume_delay(&mut self, seconds: u32) -> Result<(), HudError> {
            self.check()?;
            self.options_resume_delay = Some(seconds);
            Ok(())
        }
    }

    /// Audio test double that counts playbacks and records applied settings.
    #[derive(Debug, Default)]
    pub struct NullAudio {
        pub played: Vec<Sound>,
        pub volume: Option<f32>,
        pub muted: Option<bool>,
    }

    impl AudioSink for NullAudio {
        fn play(&mut self, sound: Sound) {
            self.played.push(sound);
        }

        fn set_volume(&mut self, volume: f32) {
            self.volume = Some(volume);
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = Some(muted);
        }
    }
}
