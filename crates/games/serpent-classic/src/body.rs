use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::Direction;
use crate::grid::GridPos;

/// The snake itself: head, queued direction, and the ordered body segments.
///
/// Segments are held head-to-tail in a deque; each tick the old head position
/// is pushed at the front and the true tail popped off the back, so no
/// per-segment shifting is needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnakeBody {
    pub head: GridPos,
    pub prev_head: GridPos,
    pub prev_tail: GridPos,
    direction: Direction,
    segments: VecDeque<GridPos>,
}

impl SnakeBody {
    pub fn new(head: GridPos) -> Self {
        Self {
            head,
            prev_head: head,
            prev_tail: head,
            direction: Direction::Up,
            segments: VecDeque::new(),
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Request a direction change. A 180-degree reversal is ignored; it would
    /// read as an immediate false self-collision.
    pub fn set_direction(&mut self, direction: Direction) {
        if direction != self.direction.opposite() {
            self.direction = direction;
        }
    }

    /// Body length, excluding the head.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &GridPos> {
        self.segments.iter()
    }

    /// Step the head one cell in the current direction with toroidal wrap,
    /// then shift the body. Returns the cell vacated this tick, which the
    /// caller clears (and which becomes the growth point if food was eaten).
    ///
    /// Wrap keeps the snake strictly interior: a step onto the border ring
    /// snaps to the opposite interior edge, so the walls stay cosmetic.
    pub fn advance(&mut self, grid_width: i32, grid_height: i32) -> GridPos {
        self.prev_head = self.head;

        let mut next = self.head;
        match self.direction {
            Direction::Up => next.y -= 1,
            Direction::Down => next.y += 1,
            Direction::Left => next.x -= 1,
            Direction::Right => next.x += 1,
        }

        if next.x == 0 {
            next.x = grid_width - 2;
        }
        if next.y == 0 {
            next.y = grid_height - 2;
        }
        if next.x == grid_width - 1 {
            next.x = 1;
        }
        if next.y == grid_height - 1 {
            next.y = 1;
        }

        self.head = next;

        if self.segments.is_empty() {
            self.prev_head
        } else {
            self.segments.push_front(self.prev_head);
            let tail = self
                .segments
                .pop_back()
                .unwrap_or(self.prev_head);
            self.prev_tail = tail;
            tail
        }
    }

    /// Append one segment at the cell vacated this tick.
    pub fn grow(&mut self, vacated: GridPos) {
        self.segments.push_back(vacated);
    }

    /// True iff the head landed on a cell the body occupied when the tick
    /// began. The cell the tail is vacating this tick still counts: biting
    /// the tail is a collision even though the tail moves away.
    ///
    /// Only meaningful immediately after [`SnakeBody::advance`].
    pub fn hits_self(&self) -> bool {
        self.segments.contains(&self.head)
            || (!self.segments.is_empty() && self.head == self.prev_tail)
    }
}

/// Green channel for body segment `index` of a snake with `len` segments.
///
/// `t` runs from the head-adjacent segment (`t` near 0) to the tail (`t` =
/// 1) and is eased through a piecewise-linear curve: up to `knee` the color
/// covers `knee_weight` of the head-to-tail range, after it the remainder.
/// The falloff is therefore fast near the head and gentle along the tail.
pub fn gradient_green(
    index: usize,
    len: usize,
    head_green: u8,
    tail_green: u8,
    knee: f32,
    knee_weight: f32,
) -> u8 {
    debug_assert!(index < len);

    let t = (index + 1) as f32 / len as f32;
    let eased = if t <= knee {
        (t / knee) * knee_weight
    } else {
        knee_weight + ((t - knee) / (1.0 - knee)) * (1.0 - knee_weight)
    };

    let start = f32::from(head_green);
    let end = f32::from(tail_green);
    let green = (start + (end - start) * eased).clamp(0.0, 255.0);
    (green + 0.5) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_right_moves_one_cell() {
        let mut body = SnakeBody::new(GridPos::new(25, 25));
        body.set_direction(Direction::Right);
        let vacated = body.advance(50, 50);
        assert_eq!(body.head, GridPos::new(26, 25));
        assert_eq!(vacated, GridPos::new(25, 25));
    }

    #[test]
    fn reversal_is_ignored() {
        let mut body = SnakeBody::new(GridPos::new(10, 10));
        assert_eq!(body.direction(), Direction::Up);
        body.set_direction(Direction::Down);
        assert_eq!(body.direction(), Direction::Up);
        body.set_direction(Direction::Left);
        assert_eq!(body.direction(), Direction::Left);
        body.set_direction(Direction::Right);
        assert_eq!(body.direction(), Direction::Left);
    }

    #[test]
    fn left_edge_wraps_to_opposite_interior_column() {
        let mut body = SnakeBody::new(GridPos::new(1, 25));
        body.set_direction(Direction::Left);
        body.advance(50, 50);
        assert_eq!(body.head, GridPos::new(48, 25));
    }

    #[test]
    fn all_edges_wrap_interior() {
        let cases = [
            (GridPos::new(1, 25), Direction::Left, GridPos::new(48, 25)),
            (GridPos::new(48, 25), Direction::Right, GridPos::new(1, 25)),
            (GridPos::new(25, 1), Direction::Up, GridPos::new(25, 48)),
            (GridPos::new(25, 48), Direction::Down, GridPos::new(25, 1)),
        ];
        for (start, dir, expected) in cases {
            let mut body = SnakeBody::new(start);
            // Seed a non-conflicting direction so the turn is accepted.
            body.set_direction(if dir == Direction::Down {
                Direction::Left
            } else {
                Direction::Up
            });
            body.set_direction(dir);
            body.advance(50, 50);
            assert_eq!(body.head, expected, "wrap from {start:?} going {dir:?}");
        }
    }

    #[test]
    fn body_follows_head_in_order() {
        let mut body = SnakeBody::new(GridPos::new(10, 10));
        body.set_direction(Direction::Right);
        let vacated = body.advance(50, 50);
        body.grow(vacated);
        let vacated = body.advance(50, 50);
        body.grow(vacated);

        // Head at (12,10); segments trail it leftward, head-to-tail.
        assert_eq!(body.head, GridPos::new(12, 10));
        let segs: Vec<GridPos> = body.segments().copied().collect();
        assert_eq!(segs, vec![GridPos::new(11, 10), GridPos::new(10, 10)]);
    }

    #[test]
    fn advance_reports_vacated_tail() {
        let mut body = SnakeBody::new(GridPos::new(10, 10));
        body.set_direction(Direction::Right);
        let v = body.advance(50, 50);
        body.grow(v);
        let vacated = body.advance(50, 50);
        // The single segment moved from (10,10) to (11,10); (10,10) freed up.
        assert_eq!(vacated, GridPos::new(10, 10));
        assert_eq!(body.prev_tail, GridPos::new(10, 10));
    }

    #[test]
    fn growth_extends_length_by_one() {
        let mut body = SnakeBody::new(GridPos::new(10, 10));
        body.set_direction(Direction::Right);
        for expected_len in 1..=5 {
            let vacated = body.advance(50, 50);
            body.grow(vacated);
            assert_eq!(body.len(), expected_len);
        }
    }

    #[test]
    fn head_and_segments_distinct_after_move() {
        let mut body = SnakeBody::new(GridPos::new(10, 10));
        body.set_direction(Direction::Right);
        for _ in 0..4 {
            let vacated = body.advance(50, 50);
            body.grow(vacated);
        }
        assert!(!body.hits_self());
        let segs: Vec<GridPos> = body.segments().copied().collect();
        for (i, a) in segs.iter().enumerate() {
            assert_ne!(*a, body.head);
            for b in &segs[i + 1..] {
                assert_ne!(a, b, "segments must not overlap");
            }
        }
    }

    #[test]
    fn collision_iff_head_equals_a_segment() {
        // Length 4 is the shortest snake that can bite itself: a 2x2 loop.
        let mut body = SnakeBody::new(GridPos::new(10, 10));
        body.set_direction(Direction::Right);
        for _ in 0..4 {
            let vacated = body.advance(50, 50);
            body.grow(vacated);
        }
        assert!(!body.hits_self());
        body.set_direction(Direction::Up);
        body.advance(50, 50);
        assert!(!body.hits_self());
        body.set_direction(Direction::Left);
        body.advance(50, 50);
        assert!(!body.hits_self());
        // Closing the loop lands the head exactly on the current tail segment.
        body.set_direction(Direction::Down);
        let _ = body.advance(50, 50);
        assert!(body.hits_self());
    }

    #[test]
    fn length_three_tail_bite_is_a_collision() {
        // Tight 2x2 turn: the head lands exactly on the cell the tail is
        // vacating this tick. Still a bite.
        let mut body = SnakeBody::new(GridPos::new(10, 10));
        body.set_direction(Direction::Right);
        for _ in 0..3 {
            let vacated = body.advance(50, 50);
            body.grow(vacated);
        }
        assert_eq!(body.len(), 3);
        body.set_direction(Direction::Up);
        body.advance(50, 50);
        assert!(!body.hits_self());
        body.set_direction(Direction::Left);
        body.advance(50, 50);
        assert!(!body.hits_self());
        body.set_direction(Direction::Down);
        let vacated = body.advance(50, 50);
        assert_eq!(body.head, vacated);
        assert!(body.hits_self());
    }

    #[test]
    fn gradient_full_range_head_to_tail() {
        // Tail segment always lands exactly on tail_green.
        assert_eq!(gradient_green(9, 10, 255, 120, 0.3, 0.7), 120);
        // Head-adjacent segment of a long snake stays near head_green.
        assert!(gradient_green(0, 100, 255, 120, 0.3, 0.7) > 250);
    }

    #[test]
    fn gradient_knee_covers_seventy_percent_of_range() {
        // With 10 segments, segment index 2 sits exactly at t = 0.3.
        let at_knee = gradient_green(2, 10, 255, 120, 0.3, 0.7);
        let expected = 255.0 + (120.0 - 255.0) * 0.7;
        assert_eq!(at_knee, (expected + 0.5) as u8);
    }

    #[test]
    fn gradient_monotonically_darkens() {
        let len = 20;
        let mut last = 255;
        for i in 0..len {
            let g = gradient_green(i, len, 255, 120, 0.3, 0.7);
            assert!(g <= last, "gradient must not brighten toward the tail");
            last = g;
        }
    }
}
