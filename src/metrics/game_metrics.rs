use std::time::{Duration, Instant};

use crate::game::SessionEvent;

/// Per-process play statistics shown in the HUD and the exit summary
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub rounds_played: u32,
    pub food_eaten: u32,
    round_running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            rounds_played: 0,
            food_eaten: 0,
            round_running: false,
        }
    }

    /// Refresh the round timer; it stops while no round is running
    pub fn update(&mut self) {
        if self.round_running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_round_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.round_running = true;
    }

    pub fn on_round_over(&mut self) {
        self.update();
        self.rounds_played += 1;
        self.round_running = false;
    }

    /// An external reset: a round cut short still counts as played
    pub fn on_reset(&mut self) {
        if self.round_running {
            self.on_round_over();
        }
        self.on_round_start();
    }

    /// Fold a session event into the counters
    pub fn record(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Started => self.on_round_start(),
            SessionEvent::Ate { .. } => self.food_eaten += 1,
            SessionEvent::GameOver { .. } => self.on_round_over(),
            SessionEvent::Waiting
            | SessionEvent::Blocked
            | SessionEvent::Moved
            | SessionEvent::Frozen => {}
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
