use rand::Rng;

use crate::grid::{CellState, Grid, GridPos};

/// Multiplier on the interior cell count for random probing attempts.
///
/// A heuristic, not a proven bound: on a nearly-full board random probing can
/// exhaust its budget without finding the remaining empty cells, which is why
/// the deterministic scan fallback exists.
const PROBE_ATTEMPTS_PER_CELL: usize = 2;

#[derive(Debug, PartialEq, Eq)]
pub enum SpawnError {
    GridFull,
}

impl std::fmt::Display for SpawnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GridFull => write!(f, "no empty interior cell available"),
        }
    }
}

impl std::error::Error for SpawnError {}

/// Find a random empty interior cell.
///
/// Up to `2 x interior area` uniform random probes, accepting the first Empty
/// cell. Random placement keeps food distribution visually uniform in the
/// common case; the row-major scan fallback guarantees termination as the
/// board fills up.
pub fn find_random_empty<R: Rng>(grid: &Grid, rng: &mut R) -> Result<GridPos, SpawnError> {
    let interior_w = (grid.width() - 2) as usize;
    let interior_h = (grid.height() - 2) as usize;
    let max_attempts = interior_w * interior_h * PROBE_ATTEMPTS_PER_CELL;

    for _ in 0..max_attempts {
        let pos = GridPos::new(
            rng.random_range(1..grid.width() - 1),
            rng.random_range(1..grid.height() - 1),
        );
        if grid.cell(pos).state == CellState::Empty {
            return Ok(pos);
        }
    }

    for x in 1..grid.width() - 1 {
        for y in 1..grid.height() - 1 {
            let pos = GridPos::new(x, y);
            if grid.cell(pos).state == CellState::Empty {
                return Ok(pos);
            }
        }
    }

    tracing::warn!("Failed to find empty position on grid (grid full)");
    Err(SpawnError::GridFull)
}
