use std::collections::HashSet;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Cell, Direction as Heading, SessionState, Snapshot};
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        // Render header with basic stats
        let stats = self.render_stats(snapshot, metrics);
        frame.render_widget(stats, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match snapshot.state {
            SessionState::Start => {
                frame.render_widget(self.render_start(), game_area);
            }
            SessionState::Playing => {
                frame.render_widget(self.render_grid(snapshot), game_area);
            }
            SessionState::GameOver => {
                // The final board stays visible under the overlay
                frame.render_widget(self.render_grid(snapshot), game_area);
                let overlay = centered(game_area, 44, 9);
                frame.render_widget(Clear, overlay);
                frame.render_widget(self.render_game_over(snapshot), overlay);
            }
        }

        // Render footer with controls
        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let body: HashSet<Cell> = snapshot.body.iter().copied().collect();
        let head = snapshot.head();
        let mut lines = Vec::with_capacity(snapshot.grid.height as usize);

        for row in 0..snapshot.grid.height {
            let mut spans = Vec::with_capacity(snapshot.grid.width as usize);

            for col in 0..snapshot.grid.width {
                let cell = Cell::new(col, row);

                let span = if Some(cell) == head {
                    // Snake head points where it is going
                    Span::styled(
                        head_glyph(snapshot.direction),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if body.contains(&cell) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if cell == snapshot.food {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Gesture Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let direction = snapshot
            .stabilized_direction
            .map(|d| d.as_str())
            .unwrap_or("None");

        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High: ", Style::default().fg(Color::Yellow)),
            Span::styled(snapshot.high_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(snapshot.body.len().to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Gesture: ", Style::default().fg(Color::Yellow)),
            Span::styled(direction, Style::default().fg(Color::Cyan)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_start(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GESTURE SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Point your hand to steer; the snake follows",
                Style::default().fg(Color::Gray),
            )]),
            Line::from(vec![Span::styled(
                "a direction once 3 of the last 5 frames agree.",
                Style::default().fg(Color::Gray),
            )]),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Show your hand to start",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_game_over(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let high_score_line = if snapshot.is_new_high_score() {
            Line::from(vec![Span::styled(
                "★ NEW HIGH SCORE! ★",
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            )])
        } else {
            Line::from(vec![
                Span::styled("High Score: ", Style::default().fg(Color::Gray)),
                Span::styled(snapshot.high_score.to_string(), Style::default().fg(Color::Gray)),
            ])
        };

        let text = vec![
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            high_score_line,
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to point | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" to raise/lower hand | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn head_glyph(direction: Heading) -> &'static str {
    match direction {
        Heading::Up => "▲ ",
        Heading::Down => "▼ ",
        Heading::Left => "◀ ",
        Heading::Right => "▶ ",
    }
}

/// A `width` x `height` rect centred in `area`, clipped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
