use serde::{Deserialize, Serialize};

/// Data-driven tuning for the snake game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Square cell edge length in pixels. Grid dimensions derive from this.
    pub cell_size: u32,
    /// Simulation tick rate in Hz.
    pub tick_rate_hz: u32,
    /// Maximum number of food items on the board at once.
    pub food_capacity: usize,
    /// Green channel at the snake's head.
    pub head_green: u8,
    /// Green channel at the snake's tail.
    pub tail_green: u8,
    /// Normalized body position where the gradient easing changes slope.
    pub gradient_knee: f32,
    /// Fraction of the green range covered before the knee.
    pub gradient_knee_weight: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            window_width: 500,
            window_height: 500,
            cell_size: 10,
            tick_rate_hz: 10,
            food_capacity: 8,
            head_green: 255,
            tail_green: 120,
            gradient_knee: 0.3,
            gradient_knee_weight: 0.7,
        }
    }
}

impl Tuning {
    /// Load tuning from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("SERPENT_TUNING")
            && let Ok(contents) = std::fs::read_to_string(&path)
            && let Ok(tuning) = toml::from_str::<Self>(&contents)
        {
            return tuning;
        }
        if let Ok(contents) = std::fs::read_to_string("config/serpent.toml")
            && let Ok(tuning) = toml::from_str::<Self>(&contents)
        {
            return tuning;
        }
        Self::default()
    }

    /// Grid width in cells.
    pub fn grid_width(&self) -> i32 {
        (self.window_width / self.cell_size) as i32
    }

    /// Grid height in cells.
    pub fn grid_height(&self) -> i32 {
        (self.window_height / self.cell_size) as i32
    }

    /// Fixed simulation step in milliseconds.
    pub fn tick_interval_ms(&self) -> u64 {
        1000 / u64::from(self.tick_rate_hz)
    }
}
