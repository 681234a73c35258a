//! Scripted driver with no terminal.
//!
//! Replays a recorded stream of classifier output, one frame per line, through
//! a [`GameSession`]. Useful for reproducing a run from a log.
//!
//! # Script format
//!
//! - `UP` / `DOWN` / `LEFT` / `RIGHT` (any case): hand visible, pointing
//! - `none`: hand visible, no direction classified
//! - `-` or an empty line: no hand in frame
//! - `reset`: external reset command (consumes no frame)
//! - `# ...`: comment
//!
//! Anything else is a malformed label: it is logged and treated as `none`.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

use super::RunSummary;
use crate::game::{GameConfig, GameSession, GestureFrame, SessionEvent};
use crate::metrics::GameMetrics;

pub struct HeadlessMode {
    session: GameSession,
    metrics: GameMetrics,
    frames: u64,
}

impl HeadlessMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let session = GameSession::new(config).context("Failed to create game session")?;
        Ok(Self {
            session,
            metrics: GameMetrics::new(),
            frames: 0,
        })
    }

    pub fn run_script(&mut self, path: &Path) -> Result<RunSummary> {
        let script = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read gesture script {}", path.display()))?;
        self.run_lines(script.lines())
    }

    pub fn run_lines<'a>(
        &mut self,
        lines: impl IntoIterator<Item = &'a str>,
    ) -> Result<RunSummary> {
        for (index, line) in lines.into_iter().enumerate() {
            let line = line.trim();
            if line.starts_with('#') {
                continue;
            }

            if line.eq_ignore_ascii_case("reset") {
                self.session.reset().context("Failed to reset session")?;
                self.metrics.on_reset();
                info!(line = index + 1, "scripted reset");
                continue;
            }

            let frame = Self::parse_frame(line, index + 1);
            let event = self
                .session
                .update(frame)
                .with_context(|| format!("Session failed on script line {}", index + 1))?;
            self.frames += 1;
            self.metrics.record(event);

            match event {
                SessionEvent::Started => info!(frame = self.frames, "hand detected, round started"),
                SessionEvent::Ate { score } => info!(frame = self.frames, score, "food eaten"),
                SessionEvent::GameOver {
                    final_score,
                    new_high_score,
                } => info!(frame = self.frames, final_score, new_high_score, "game over"),
                _ => {}
            }
        }

        self.metrics.update();
        Ok(RunSummary::from_session(&self.session, &self.metrics))
    }

    fn parse_frame(line: &str, line_number: usize) -> GestureFrame {
        if line.is_empty() || line == "-" {
            return GestureFrame::absent();
        }

        let frame = GestureFrame::from_label(line);
        if frame.raw.is_none() && !line.eq_ignore_ascii_case("none") {
            warn!(line = line_number, label = line, "malformed gesture label, treated as none");
        }
        frame
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }
}
