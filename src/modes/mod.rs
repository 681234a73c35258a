use std::fmt;

use crate::game::GameSession;
use crate::metrics::GameMetrics;

pub mod headless;
pub mod play;

pub use headless::HeadlessMode;
pub use play::{CaptureOptions, PlayMode};

/// End-of-run totals printed when a mode exits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub score: u32,
    pub high_score: u32,
    pub rounds_played: u32,
    pub food_eaten: u32,
}

impl RunSummary {
    pub fn from_session(session: &GameSession, metrics: &GameMetrics) -> Self {
        Self {
            score: session.score(),
            high_score: session.high_score(),
            rounds_played: metrics.rounds_played,
            food_eaten: metrics.food_eaten,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Final Score: {} | High Score: {} | Rounds: {} | Food: {}",
            self.score, self.high_score, self.rounds_played, self.food_eaten
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_display() {
        let summary = RunSummary {
            score: 40,
            high_score: 70,
            rounds_played: 3,
            food_eaten: 11,
        };
        assert_eq!(
            summary.to_string(),
            "Final Score: 40 | High Score: 70 | Rounds: 3 | Food: 11"
        );
    }
}
