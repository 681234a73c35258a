use std::collections::{HashSet, VecDeque};

use super::direction::Direction;
use super::grid::{Cell, Grid};

/// Outcome of a single [`Snake::advance`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The body moved one cell
    Moved,
    /// Not enough ticks accumulated yet; nothing changed
    Blocked,
    /// The new head landed on the body; the snake is dead
    Collided,
}

/// The snake: a body on a wrapping grid that advances on a fixed sub-frame cadence.
///
/// `direction` is updated by [`turn`](Snake::turn) immediately, but only takes
/// effect on the next advance that crosses the `move_speed` threshold. Reversal
/// is judged against `heading`, the direction of the last real move. Growth
/// is queued: [`grow`](Snake::grow) raises `desired_length` and the tail is
/// simply not popped on the following moves.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Cell>,
    direction: Direction,
    /// Direction the body last moved in
    heading: Direction,
    desired_length: usize,
    move_accumulator: f32,
    move_speed: f32,
    alive: bool,
    grid: Grid,
}

impl Snake {
    /// Create a snake with its head at `head`, trailing `length - 1` segments
    /// behind it (opposite to `direction`).
    ///
    /// Panics if `length` is zero.
    pub fn new(
        grid: Grid,
        head: Cell,
        direction: Direction,
        length: usize,
        move_speed: f32,
    ) -> Self {
        assert!(length > 0, "snake needs at least one segment");
        let (dx, dy) = direction.delta();
        let body = (0..length as i32)
            .map(|i| grid.offset(head, -dx * i, -dy * i))
            .collect();

        Self {
            body,
            direction,
            heading: direction,
            desired_length: length,
            move_accumulator: 0.0,
            move_speed,
            alive: true,
            grid,
        }
    }

    /// Build a snake from explicit segments, head first.
    ///
    /// Panics if `segments` is empty.
    pub fn from_segments(
        grid: Grid,
        segments: impl IntoIterator<Item = Cell>,
        direction: Direction,
        move_speed: f32,
    ) -> Self {
        let mut snake = Self {
            desired_length: 0,
            body: segments.into_iter().collect(),
            direction,
            heading: direction,
            move_accumulator: 0.0,
            move_speed,
            alive: true,
            grid,
        };
        assert!(!snake.is_empty(), "snake needs at least one segment");
        snake.desired_length = snake.len();
        snake
    }

    /// Request a new heading.
    ///
    /// Ignored when dead, or when the request would reverse a multi-segment
    /// body into its own neck. Several requests between two moves are all
    /// checked against the last move, and the last accepted one wins.
    pub fn turn(&mut self, requested: Direction) {
        if !self.alive {
            return;
        }
        if self.body.len() > 1 && requested.is_opposite(self.heading) {
            return;
        }
        if requested != self.direction {
            tracing::debug!(from = %self.direction, to = %requested, "snake turned");
        }
        self.direction = requested;
    }

    /// Count one driver tick and move the body if enough ticks have accumulated.
    ///
    /// The accumulator carries the fractional remainder past the threshold, so
    /// a `move_speed` of 2.5 moves on exactly 2 out of every 5 calls.
    pub fn advance(&mut self) -> Advance {
        if !self.alive {
            return Advance::Collided;
        }

        self.move_accumulator += 1.0;
        if self.move_accumulator < self.move_speed {
            return Advance::Blocked;
        }
        self.move_accumulator -= self.move_speed;

        let new_head = self.grid.step(self.head(), self.direction);

        // The segment right behind the head is exempt from the hazard set,
        // checked against the body as it stands before the head moves.
        if self.body.iter().skip(2).any(|&segment| segment == new_head) {
            self.alive = false;
            tracing::debug!(col = new_head.col, row = new_head.row, "snake hit itself");
            return Advance::Collided;
        }

        self.body.push_front(new_head);
        self.heading = self.direction;
        while self.body.len() > self.desired_length {
            self.body.pop_back();
        }

        Advance::Moved
    }

    /// Queue one extra segment
    pub fn grow(&mut self) {
        self.grow_by(1);
    }

    /// Queue `segments` extra segments, realised one per move
    pub fn grow_by(&mut self, segments: usize) {
        self.desired_length += segments;
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn desired_length(&self) -> usize {
        self.desired_length
    }

    pub fn move_accumulator(&self) -> f32 {
        self.move_accumulator
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Body segments, head first
    pub fn segments(&self) -> impl ExactSizeIterator<Item = &Cell> + '_ {
        self.body.iter()
    }

    /// Set of cells currently covered by the body
    pub fn occupied(&self) -> HashSet<Cell> {
        self.body.iter().copied().collect()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false once constructed
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
