use rand::SeedableRng;
use rand::rngs::StdRng;

use serpent_core::audio::{AudioSink, Sound};
use serpent_core::hud::{HudError, HudText};
use serpent_core::input::{InputEvent, Key, MenuAction};
use serpent_core::settings::{RESUME_DELAY_MAX, RESUME_DELAY_MIN, Settings, SettingsStore};

use crate::Direction;
use crate::body::{SnakeBody, gradient_green};
use crate::grid::{CellState, Grid, GridPos};
use crate::modes::{Mode, OptionsState, ResumeCountdown};
use crate::spawn::{SpawnError, find_random_empty};
use crate::tuning::Tuning;

/// One complete game session: grid, snake, food, mode state machine, and the
/// persisted settings.
///
/// Owned by a single-threaded loop that alternates input, fixed-step
/// simulation, and rendering phases; no locking anywhere because nothing is
/// shared. The render layer reads the grid, food, body, and mode through the
/// accessors; all mutation funnels through [`Session::tick`],
/// [`Session::handle_event`], and [`Session::handle_action`].
pub struct Session {
    grid: Grid,
    body: SnakeBody,
    food: Vec<GridPos>,
    mode: Mode,
    countdown: Option<ResumeCountdown>,
    options: OptionsState,
    settings: Settings,
    store: SettingsStore,
    tuning: Tuning,
    rng: StdRng,
    running: bool,
}

impl Session {
    pub fn new(
        tuning: Tuning,
        settings: Settings,
        store: SettingsStore,
    ) -> Result<Self, SpawnError> {
        Self::with_rng(tuning, settings, store, StdRng::from_os_rng())
    }

    /// Deterministic construction for tests.
    pub fn with_seed(
        tuning: Tuning,
        settings: Settings,
        store: SettingsStore,
        seed: u64,
    ) -> Result<Self, SpawnError> {
        Self::with_rng(tuning, settings, store, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        tuning: Tuning,
        settings: Settings,
        store: SettingsStore,
        rng: StdRng,
    ) -> Result<Self, SpawnError> {
        let grid = Grid::new(tuning.grid_width(), tuning.grid_height());
        let mut session = Self {
            body: SnakeBody::new(GridPos::new(1, 1)),
            grid,
            food: Vec::with_capacity(tuning.food_capacity),
            mode: Mode::Start,
            countdown: None,
            options: OptionsState::opened_from(Mode::Start),
            settings,
            store,
            tuning,
            rng,
            running: true,
        };
        session.reset_board()?;
        Ok(session)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn body(&self) -> &SnakeBody {
        &self.body
    }

    pub fn food(&self) -> &[GridPos] {
        &self.food
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn options(&self) -> &OptionsState {
        &self.options
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Body length doubles as the score.
    pub fn score(&self) -> usize {
        self.body.len()
    }

    /// Push the initial label contents after the HUD text objects exist.
    pub fn init_hud(&mut self, hud: &mut dyn HudText) {
        let high = self.settings.high_score;
        self.hud_guard(hud.set_start_high_score(high));
        self.hud_guard(hud.set_score(0));
    }

    /// Push the persisted volume and mute state to the audio device.
    pub fn apply_audio_settings(&self, audio: &mut dyn AudioSink) {
        audio.set_volume(self.settings.volume);
        audio.set_muted(self.settings.mute);
    }

    /// One fixed simulation step.
    ///
    /// Only Resuming (countdown) and Playing (movement) do work; every other
    /// mode waits on events.
    pub fn tick(&mut self, now_ms: u64, hud: &mut dyn HudText, audio: &mut dyn AudioSink) {
        match self.mode {
            Mode::Resuming => self.tick_countdown(now_ms, hud),
            Mode::Playing => self.tick_playing(hud, audio),
            Mode::Start | Mode::Paused | Mode::GameOver | Mode::Options => {},
        }
    }

    fn tick_countdown(&mut self, now_ms: u64, hud: &mut dyn HudText) {
        let Some(countdown) = self.countdown.as_mut() else {
            self.mode = Mode::Playing;
            return;
        };
        if let Some(seconds) = countdown.display_change(now_ms) {
            if hud.set_resume_countdown(seconds).is_err() {
                tracing::error!("Failed to update resume countdown text");
                self.running = false;
                return;
            }
        }
        if countdown.expired(now_ms) {
            self.countdown = None;
            self.mode = Mode::Playing;
        }
    }

    fn tick_playing(&mut self, hud: &mut dyn HudText, audio: &mut dyn AudioSink) {
        let vacated = self
            .body
            .advance(self.grid.width(), self.grid.height());
        self.grid.set_state(self.body.head, CellState::Snake);
        self.grid.set_state(vacated, CellState::Empty);

        if self.body.hits_self() {
            let score = self.score();
            tracing::info!(score, "Collision detected");
            self.mode = Mode::GameOver;
            if score as u64 > self.settings.high_score {
                self.settings.high_score = score as u64;
                if let Err(e) = self.store.save(&self.settings) {
                    tracing::warn!(error = %e, "Failed to persist new high score");
                }
                self.hud_guard(hud.set_start_high_score(self.settings.high_score));
            }
            self.hud_guard(hud.set_game_over(score, self.settings.high_score));
            return;
        }

        if self.eat_food_at_head(vacated) {
            audio.play(Sound::EatFood);
            self.hud_guard(hud.set_score(self.score()));
        }

        self.apply_gradient();
    }

    /// Food collision test and regrowth. Returns true on a hit.
    fn eat_food_at_head(&mut self, vacated: GridPos) -> bool {
        let Some(index) = self.food.iter().position(|f| *f == self.body.head) else {
            return false;
        };
        self.food.remove(index);

        // Grow before spawning the replacement so the allocator cannot hand
        // out the cell the tail is about to re-occupy.
        self.body.grow(vacated);
        self.grid.set_state(vacated, CellState::Snake);

        match find_random_empty(&self.grid, &mut self.rng) {
            Ok(pos) => {
                self.food.push(pos);
                self.grid.set_state(pos, CellState::Food);
            },
            // The board may transiently hold fewer food items.
            Err(SpawnError::GridFull) => {
                tracing::warn!("No room for replacement food, continuing with fewer items");
            },
        }
        true
    }

    /// Recolor head and body along the eased head-to-tail gradient. Purely
    /// cosmetic; recomputed every tick because segment identities shift.
    fn apply_gradient(&mut self) {
        self.grid.set_snake(self.body.head, self.tuning.head_green);
        let len = self.body.len();
        let segments: Vec<GridPos> = self.body.segments().copied().collect();
        for (i, pos) in segments.into_iter().enumerate() {
            let green = gradient_green(
                i,
                len,
                self.tuning.head_green,
                self.tuning.tail_green,
                self.tuning.gradient_knee,
                self.tuning.gradient_knee_weight,
            );
            self.grid.set_snake(pos, green);
        }
    }

    /// Rebuild the board: walls, random head, fresh food, empty body.
    fn reset_board(&mut self) -> Result<(), SpawnError> {
        tracing::info!("Resetting game state");
        self.grid.reset();

        let head = find_random_empty(&self.grid, &mut self.rng)?;
        self.body = SnakeBody::new(head);
        self.grid.set_state(head, CellState::Snake);

        self.food.clear();
        for spawned in 0..self.tuning.food_capacity {
            match find_random_empty(&self.grid, &mut self.rng) {
                Ok(pos) => {
                    self.food.push(pos);
                    self.grid.set_state(pos, CellState::Food);
                },
                Err(SpawnError::GridFull) => {
                    tracing::warn!(spawned, "Could only spawn part of the food set");
                    break;
                },
            }
        }

        self.countdown = None;
        tracing::info!(food_items = self.food.len(), "Game reset complete");
        Ok(())
    }

    fn start_round(&mut self, hud: &mut dyn HudText) {
        match self.reset_board() {
            Ok(()) => {
                self.mode = Mode::Playing;
                self.hud_guard(hud.set_score(0));
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to reset game state");
                self.running = false;
            },
        }
    }

    fn begin_resume(&mut self, now_ms: u64, hud: &mut dyn HudText) {
        let mut countdown = ResumeCountdown::new(now_ms, self.settings.resume_delay_seconds);
        self.mode = Mode::Resuming;
        if let Some(seconds) = countdown.display_change(now_ms) {
            self.hud_guard(hud.set_resume_countdown(seconds));
        }
        self.countdown = Some(countdown);
    }

    fn close_options(&mut self, hud: &mut dyn HudText) {
        self.options.clear_drags();
        self.mode = self.options.return_mode;
        if self.mode == Mode::Paused {
            self.hud_guard(hud.set_pause(self.score()));
        }
    }

    /// Map a raw input event onto the mode transition table.
    pub fn handle_event(&mut self, now_ms: u64, event: InputEvent, hud: &mut dyn HudText) {
        match event {
            InputEvent::Quit => {
                tracing::info!("Quit requested");
                self.running = false;
            },
            InputEvent::KeyDown {
                key: Key::Escape,
                repeat: false,
            } => match self.mode {
                Mode::Playing => {
                    self.mode = Mode::Paused;
                    self.hud_guard(hud.set_pause(self.score()));
                },
                Mode::Paused => self.begin_resume(now_ms, hud),
                Mode::Resuming => {
                    self.countdown = None;
                    self.mode = Mode::Paused;
                },
                Mode::Options => self.close_options(hud),
                Mode::Start | Mode::GameOver => {},
            },
            InputEvent::KeyDown { key, repeat: _ } => self.handle_movement_key(key),
            InputEvent::MouseButtonUp => {
                if self.mode == Mode::Options {
                    self.options.clear_drags();
                }
            },
            // Pixel hit-testing happens in the UI layer, which turns clicks
            // and drags into MenuActions.
            InputEvent::MouseButtonDown { .. } | InputEvent::MouseMotion { .. } => {},
        }
    }

    /// Movement keys apply only while Playing.
    fn handle_movement_key(&mut self, key: Key) {
        if self.mode != Mode::Playing {
            return;
        }
        let direction = match key {
            Key::Up | Key::W => Direction::Up,
            Key::Down | Key::S => Direction::Down,
            Key::Left | Key::A => Direction::Left,
            Key::Right | Key::D => Direction::Right,
            Key::Escape | Key::Other => return,
        };
        self.body.set_direction(direction);
    }

    /// Apply a logical widget activation. Actions that do not belong to the
    /// current mode are dropped.
    pub fn handle_action(
        &mut self,
        now_ms: u64,
        action: MenuAction,
        hud: &mut dyn HudText,
        audio: &mut dyn AudioSink,
    ) {
        match (self.mode, action) {
            (Mode::Start, MenuAction::StartGame) | (Mode::GameOver, MenuAction::Restart) => {
                self.start_round(hud);
            },
            (Mode::Start | Mode::Paused, MenuAction::OpenOptions) => {
                self.options = OptionsState::opened_from(self.mode);
                self.mode = Mode::Options;
                self.hud_guard(hud.set_options_volume(self.settings.volume));
                self.hud_guard(hud.set_options_resume_delay(self.settings.resume_delay_seconds));
            },
            (Mode::Paused, MenuAction::ResumePaused) => self.begin_resume(now_ms, hud),
            (Mode::Paused, MenuAction::ExitGame) => {
                tracing::info!("Exit requested from pause menu");
                self.running = false;
            },
            (Mode::Options, MenuAction::CloseOptions) => self.close_options(hud),
            (Mode::Options, MenuAction::SetVolume(volume)) => {
                self.settings.volume = volume.clamp(0.0, 1.0);
                audio.set_volume(self.settings.volume);
                self.hud_guard(hud.set_options_volume(self.settings.volume));
                self.save_settings();
                self.options.dragging_volume = true;
                self.options.dragging_resume = false;
            },
            (Mode::Options, MenuAction::ToggleMute) => {
                self.settings.mute = !self.settings.mute;
                audio.set_muted(self.settings.mute);
                self.save_settings();
            },
            (Mode::Options, MenuAction::SetResumeDelay(seconds)) => {
                self.settings.resume_delay_seconds =
                    seconds.clamp(RESUME_DELAY_MIN, RESUME_DELAY_MAX);
                self.hud_guard(hud.set_options_resume_delay(self.settings.resume_delay_seconds));
                self.save_settings();
                self.options.dragging_resume = true;
                self.options.dragging_volume = false;
            },
            (mode, action) => {
                tracing::debug!(?mode, ?action, "Dropped menu action outside its mode");
            },
        }
    }

    fn save_settings(&self) {
        if let Err(e) = self.store.save(&self.settings) {
            tracing::warn!(error = %e, "Failed to save settings");
        }
    }

    /// Label updates are a required resource: any failure stops the session.
    fn hud_guard(&mut self, result: Result<(), HudError>) {
        if let Err(e) = result {
            tracing::error!(error = %e, "Failed to update HUD text");
            self.running = false;
        }
    }
}
