use serde::{Deserialize, Serialize};

/// A cell coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// What currently occupies a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Empty,
    Wall,
    Food,
    Snake,
}

/// Render color, one per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const COLOR_EMPTY: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const COLOR_WALL: Rgb = Rgb {
    r: 50,
    g: 50,
    b: 50,
};
pub const COLOR_FOOD: Rgb = Rgb { r: 255, g: 0, b: 0 };
pub const COLOR_SNAKE_HEAD: Rgb = Rgb { r: 0, g: 255, b: 0 };

fn state_color(state: CellState) -> Rgb {
    match state {
        CellState::Empty => COLOR_EMPTY,
        CellState::Wall => COLOR_WALL,
        CellState::Food => COLOR_FOOD,
        CellState::Snake => COLOR_SNAKE_HEAD,
    }
}

/// One grid tile. Position is fixed at creation; state and color cycle as the
/// game plays.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Cell {
    pub position: GridPos,
    pub state: CellState,
    pub color: Rgb,
}

/// The playing field: a fixed 2D array of cells stored row-major
/// (`y * width + x`).
///
/// The outermost ring is permanently [`CellState::Wall`]; only interior
/// cells cycle among Empty/Food/Snake. Rebuilt in full on every reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        assert!(
            width >= 3 && height >= 3,
            "grid must have at least one interior cell"
        );
        let mut cells = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell {
                    position: GridPos::new(x, y),
                    state: CellState::Empty,
                    color: COLOR_EMPTY,
                });
            }
        }
        let mut grid = Self {
            width,
            height,
            cells,
        };
        grid.reset();
        grid
    }

    /// Border ring to Wall, interior to Empty.
    pub fn reset(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = GridPos::new(x, y);
                let state = if self.is_border(pos) {
                    CellState::Wall
                } else {
                    CellState::Empty
                };
                self.set_state(pos, state);
            }
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn is_border(&self, pos: GridPos) -> bool {
        pos.x == 0 || pos.x == self.width - 1 || pos.y == 0 || pos.y == self.height - 1
    }

    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    fn index(&self, pos: GridPos) -> usize {
        debug_assert!(self.in_bounds(pos), "position {pos:?} out of bounds");
        (pos.y * self.width + pos.x) as usize
    }

    pub fn cell(&self, pos: GridPos) -> &Cell {
        &self.cells[self.index(pos)]
    }

    /// Set a cell's state and its derived color.
    pub fn set_state(&mut self, pos: GridPos, state: CellState) {
        let idx = self.index(pos);
        self.cells[idx].state = state;
        self.cells[idx].color = state_color(state);
    }

    /// Mark a cell as Snake with an explicit gradient color.
    pub fn set_snake(&mut self, pos: GridPos, green: u8) {
        let idx = self.index(pos);
        self.cells[idx].state = CellState::Snake;
        self.cells[idx].color = Rgb { r: 0, g: green, b: 0 };
    }

    /// All cells in row-major order, for the render layer.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn count_state(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state == state).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_walls_the_border_ring() {
        let grid = Grid::new(50, 50);
        // 50x50 minus the 48x48 interior leaves 196 border cells.
        assert_eq!(grid.count_state(CellState::Wall), 196);
        assert_eq!(grid.count_state(CellState::Empty), 50 * 50 - 196);
    }

    #[test]
    fn border_cells_are_wall_and_gray() {
        let grid = Grid::new(10, 10);
        for cell in grid.cells() {
            if grid.is_border(cell.position) {
                assert_eq!(cell.state, CellState::Wall);
                assert_eq!(cell.color, COLOR_WALL);
            } else {
                assert_eq!(cell.state, CellState::Empty);
                assert_eq!(cell.color, COLOR_EMPTY);
            }
        }
    }

    #[test]
    fn positions_fixed_at_creation() {
        let grid = Grid::new(5, 7);
        for y in 0..7 {
            for x in 0..5 {
                assert_eq!(grid.cell(GridPos::new(x, y)).position, GridPos::new(x, y));
            }
        }
    }

    #[test]
    fn state_change_updates_derived_color() {
        let mut grid = Grid::new(10, 10);
        let pos = GridPos::new(4, 4);
        grid.set_state(pos, CellState::Food);
        assert_eq!(grid.cell(pos).color, COLOR_FOOD);
        grid.set_state(pos, CellState::Empty);
        assert_eq!(grid.cell(pos).color, COLOR_EMPTY);
    }

    #[test]
    fn set_snake_keeps_state_with_gradient_color() {
        let mut grid = Grid::new(10, 10);
        let pos = GridPos::new(3, 5);
        grid.set_snake(pos, 180);
        assert_eq!(grid.cell(pos).state, CellState::Snake);
        assert_eq!(grid.cell(pos).color, Rgb { r: 0, g: 180, b: 0 });
    }

    #[test]
    fn reset_clears_interior_back_to_empty() {
        let mut grid = Grid::new(10, 10);
        grid.set_state(GridPos::new(5, 5), CellState::Snake);
        grid.set_state(GridPos::new(2, 2), CellState::Food);
        grid.reset();
        assert_eq!(grid.count_state(CellState::Snake), 0);
        assert_eq!(grid.count_state(CellState::Food), 0);
    }
}
