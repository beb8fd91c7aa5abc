pub mod body;
pub mod grid;
pub mod modes;
pub mod session;
pub mod spawn;
pub mod tuning;

use serde::{Deserialize, Serialize};

/// Cardinal movement direction on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

pub use session::Session;
