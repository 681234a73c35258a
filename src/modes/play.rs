use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, info};

use super::RunSummary;
use crate::game::{GameConfig, GameSession};
use crate::input::{
    HandPose, InputHandler, KeyAction, SimulatedClassifier, SlotReader, SlotWriter,
    classification_slot,
};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Knobs for the simulated camera
#[derive(Debug, Clone, Copy)]
pub struct CaptureOptions {
    /// Chance a frame is misclassified as a random direction
    pub noise: f64,
    /// Chance a frame with a visible hand yields no label
    pub dropout: f64,
    /// Camera frame rate
    pub frames_per_second: u32,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            noise: 0.15,
            dropout: 0.1,
            frames_per_second: 15,
        }
    }
}

/// Interactive terminal game: keyboard-held hand pose, simulated capture, 60 Hz driver
pub struct PlayMode {
    session: GameSession,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    capture: CaptureOptions,
    seed: Option<u64>,
    pose_tx: watch::Sender<HandPose>,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig, capture: CaptureOptions) -> Result<Self> {
        let seed = config.seed;
        let session = GameSession::new(config).context("Failed to create game session")?;
        let (pose_tx, _) = watch::channel(HandPose::default());

        Ok(Self {
            session,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            capture,
            seed,
            pose_tx,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<RunSummary> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let (writer, reader) = classification_slot();
        let capture_task = self.spawn_capture(writer);

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal, reader).await;

        capture_task.abort();
        self.cleanup_terminal(&mut terminal)?;

        result.map(|()| RunSummary::from_session(&self.session, &self.metrics))
    }

    /// Camera + classifier on their own task, publishing into the slot
    fn spawn_capture(&self, writer: SlotWriter) -> JoinHandle<()> {
        let mut classifier =
            SimulatedClassifier::new(self.capture.noise, self.capture.dropout, self.seed);
        let pose_rx = self.pose_tx.subscribe();
        let frames_per_second = f64::from(self.capture.frames_per_second.max(1));
        let period = Duration::from_secs_f64(1.0 / frames_per_second);

        tokio::spawn(async move {
            let mut frame_timer = interval(period);
            loop {
                frame_timer.tick().await;
                if writer.is_closed() {
                    break;
                }
                let pose = *pose_rx.borrow();
                writer.publish(classifier.classify(pose));
            }
            debug!("capture task stopped");
        })
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
        mut reader: SlotReader,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Driver runs at 60 Hz; the snake itself moves every `move_speed` ticks
        let tick_interval = Duration::from_secs_f64(1.0 / 60.0);
        let mut tick_timer = interval(tick_interval);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    let event = self.session.update(reader.take())?;
                    self.metrics.record(event);
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let snapshot = self.session.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply(action)?;
        }

        Ok(())
    }

    fn apply(&mut self, action: KeyAction) -> Result<()> {
        match action {
            KeyAction::Point(direction) => {
                self.pose_tx.send_replace(HandPose::pointing(direction));
            }
            KeyAction::ToggleHand => {
                self.pose_tx.send_modify(|pose| pose.visible = !pose.visible);
            }
            KeyAction::Reset => {
                self.session.reset().context("Failed to reset session")?;
                self.metrics.on_reset();
                info!("reset requested from keyboard");
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }

        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, SessionState};

    fn mode() -> PlayMode {
        let config = GameConfig {
            seed: Some(5),
            ..GameConfig::small()
        };
        PlayMode::new(config, CaptureOptions::default()).unwrap()
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.session.state(), SessionState::Start);
        assert_eq!(*mode.pose_tx.borrow(), HandPose::default());
    }

    #[test]
    fn test_pointing_raises_hand() {
        let mut mode = mode();
        mode.apply(KeyAction::Point(Direction::Up)).unwrap();
        assert_eq!(*mode.pose_tx.borrow(), HandPose::pointing(Direction::Up));

        mode.apply(KeyAction::ToggleHand).unwrap();
        let pose = *mode.pose_tx.borrow();
        assert!(!pose.visible);
        assert_eq!(pose.pointing, Some(Direction::Up));
    }

    #[test]
    fn test_reset_starts_round() {
        let mut mode = mode();
        mode.apply(KeyAction::Reset).unwrap();
        assert_eq!(mode.session.state(), SessionState::Playing);
        assert_eq!(mode.session.score(), 0);
    }

    #[test]
    fn test_reset_mid_round_counts_round() {
        let mut mode = mode();
        mode.apply(KeyAction::Reset).unwrap();
        mode.apply(KeyAction::Reset).unwrap();
        mode.apply(KeyAction::Reset).unwrap();

        let summary = RunSummary::from_session(&mode.session, &mode.metrics);
        assert_eq!(summary.rounds_played, 2);
        assert_eq!(mode.session.state(), SessionState::Playing);
    }

    #[test]
    fn test_quit() {
        let mut mode = mode();
        mode.apply(KeyAction::Quit).unwrap();
        assert!(mode.should_quit);
    }

    #[test]
    fn test_invalid_config_fails() {
        let config = GameConfig {
            voter_capacity: 0,
            ..GameConfig::small()
        };
        assert!(PlayMode::new(config, CaptureOptions::default()).is_err());
    }
}
