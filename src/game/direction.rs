use std::fmt;
use std::str::FromStr;

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// The direction pointing the other way
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Parse a classifier label, treating anything unrecognised as "no direction".
    ///
    /// Classifiers report `"none"` (or nothing) for frames without a usable
    /// pose; malformed labels are folded into the same case so they never
    /// reach the core as errors.
    pub fn from_label(label: &str) -> Option<Direction> {
        match label.parse() {
            Ok(direction) => Some(direction),
            Err(err) => {
                tracing::trace!("ignoring gesture label: {err}");
                None
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised direction label {0:?}")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UP" => Ok(Direction::Up),
            "DOWN" => Ok(Direction::Down),
            "LEFT" => Ok(Direction::Left),
            "RIGHT" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}
