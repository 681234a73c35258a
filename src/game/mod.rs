//! Core game logic module for gesture-steered Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies:
//! the direction voter, the wrapping-grid snake, food placement and the session
//! state machine that ties them together.

pub mod config;
pub mod direction;
pub mod error;
pub mod food;
pub mod grid;
pub mod session;
pub mod snake;
pub mod voter;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::{Direction, ParseDirectionError};
pub use error::GameError;
pub use food::FoodSpawner;
pub use grid::{Cell, Grid};
pub use session::{GameSession, GestureFrame, SessionEvent, SessionState, Snapshot};
pub use snake::{Advance, Snake};
pub use voter::DirectionVoter;
