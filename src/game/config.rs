use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use super::error::GameError;
use super::grid::Grid;

/// Tuning constants for a session, fixed at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Driver ticks per body advance (may be fractional)
    pub move_speed: f32,
    /// Number of recent classifications the voter remembers
    pub voter_capacity: usize,
    /// Agreeing classifications required to change the stabilized direction
    pub voter_quorum: usize,
    /// Segments added per food eaten
    pub growth_per_food: usize,
    /// Points awarded per food eaten
    pub score_per_food: u32,
    /// Fixed RNG seed for food placement; entropy when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 23,
            initial_snake_length: 3,
            move_speed: 2.5,
            voter_capacity: 5,
            voter_quorum: 3,
            growth_per_food: 1,
            score_per_food: 10,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a TOML file; missing keys keep their defaults
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width as i32, self.grid_height as i32)
    }

    /// Check that every constant is in range
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |msg: String| Err(GameError::InvalidConfig(msg));

        if self.grid_width == 0 || self.grid_height == 0 {
            return invalid(format!(
                "grid must be non-empty, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }

        if self.grid_width > i32::MAX as usize || self.grid_height > i32::MAX as usize {
            return invalid(format!(
                "grid dimensions must fit in i32, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }

        if self.initial_snake_length == 0 {
            return invalid("initial_snake_length must be at least 1".to_string());
        }

        if self.initial_snake_length > self.grid_width {
            return invalid(format!(
                "initial_snake_length ({}) cannot exceed grid_width ({})",
                self.initial_snake_length, self.grid_width
            ));
        }

        if self.grid_width * self.grid_height <= self.initial_snake_length {
            return invalid(format!(
                "a {}x{} grid has no room for food next to a snake of length {}",
                self.grid_width, self.grid_height, self.initial_snake_length
            ));
        }

        if !self.move_speed.is_finite() || self.move_speed < 1.0 {
            return invalid(format!(
                "move_speed must be a finite value >= 1.0, got {}",
                self.move_speed
            ));
        }

        if self.voter_capacity == 0 {
            return invalid("voter_capacity must be at least 1".to_string());
        }

        if self.voter_quorum == 0 || self.voter_quorum > self.voter_capacity {
            return invalid(format!(
                "voter_quorum must be in [1, {}], got {}",
                self.voter_capacity, self.voter_quorum
            ));
        }

        Ok(())
    }
}
