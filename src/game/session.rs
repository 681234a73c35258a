use tracing::{debug, info};

use super::{
    config::GameConfig,
    direction::Direction,
    error::GameError,
    food::FoodSpawner,
    grid::{Cell, Grid},
    snake::{Advance, Snake},
    voter::DirectionVoter,
};

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for a hand to appear
    Start,
    Playing,
    /// Round over; frozen until reset
    GameOver,
}

/// What the capture/classification side reports for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GestureFrame {
    /// Classified direction, `None` when no usable pose was seen
    pub raw: Option<Direction>,
    /// Whether a hand was detected at all
    pub presence: bool,
}

impl GestureFrame {
    /// No hand in view
    pub fn absent() -> Self {
        Self::default()
    }

    /// A hand pointing in `direction`
    pub fn pointing(direction: Direction) -> Self {
        Self {
            raw: Some(direction),
            presence: true,
        }
    }

    /// A hand in view with a raw classifier label; unknown labels carry no direction
    pub fn from_label(label: &str) -> Self {
        Self {
            raw: Direction::from_label(label),
            presence: true,
        }
    }
}

/// What happened during one [`GameSession::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Still on the start screen
    Waiting,
    /// Presence detected; a fresh round began
    Started,
    /// Tick counted, body did not move
    Blocked,
    Moved,
    /// Food eaten on this move
    Ate { score: u32 },
    /// The snake ran into itself
    GameOver { final_score: u32, new_high_score: bool },
    /// Round is over; nothing simulated
    Frozen,
}

/// Read-only view handed to the renderer each cycle
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub state: SessionState,
    pub grid: Grid,
    /// Body segments, head first
    pub body: Vec<Cell>,
    pub food: Cell,
    pub direction: Direction,
    pub score: u32,
    pub high_score: u32,
    pub stabilized_direction: Option<Direction>,
}

impl Snapshot {
    pub fn head(&self) -> Option<Cell> {
        self.body.first().copied()
    }

    /// The round just ended with a score that set (or tied) the best
    pub fn is_new_high_score(&self) -> bool {
        self.state == SessionState::GameOver && self.score > 0 && self.score >= self.high_score
    }
}

/// Sequences voting, movement, food and scoring for one player.
///
/// Driven once per external frame through [`update`](GameSession::update);
/// the snake, food and voter are rebuilt from scratch on every (re)start while
/// the high score survives for the lifetime of the session.
#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    state: SessionState,
    snake: Snake,
    food: Cell,
    voter: DirectionVoter,
    spawner: FoodSpawner,
    score: u32,
    high_score: u32,
}

impl GameSession {
    /// Create a session on the start screen
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;

        let grid = config.grid();
        let mut spawner = FoodSpawner::new(grid, config.seed);
        let snake = Self::initial_snake(&config, grid);
        let food = spawner.respawn(&snake.occupied())?;
        let voter = DirectionVoter::new(config.voter_capacity, config.voter_quorum);

        Ok(Self {
            config,
            grid,
            state: SessionState::Start,
            snake,
            food,
            voter,
            spawner,
            score: 0,
            high_score: 0,
        })
    }

    fn initial_snake(config: &GameConfig, grid: Grid) -> Snake {
        Snake::new(
            grid,
            grid.center(),
            Direction::Right,
            config.initial_snake_length,
            config.move_speed,
        )
    }

    /// Advance the session by one driver cycle
    pub fn update(&mut self, frame: GestureFrame) -> Result<SessionEvent, GameError> {
        match self.state {
            SessionState::Start => {
                if frame.presence {
                    self.reset()?;
                    Ok(SessionEvent::Started)
                } else {
                    Ok(SessionEvent::Waiting)
                }
            }
            SessionState::Playing => self.play(frame.raw),
            SessionState::GameOver => Ok(SessionEvent::Frozen),
        }
    }

    fn play(&mut self, raw: Option<Direction>) -> Result<SessionEvent, GameError> {
        self.voter.push(raw);
        if let Some(direction) = self.voter.stabilize() {
            self.snake.turn(direction);
        }

        match self.snake.advance() {
            Advance::Blocked => Ok(SessionEvent::Blocked),
            Advance::Collided => {
                self.state = SessionState::GameOver;
                let new_high_score = self.score > 0 && self.score >= self.high_score;
                info!(
                    final_score = self.score,
                    high_score = self.high_score,
                    length = self.snake.len(),
                    "game over"
                );
                Ok(SessionEvent::GameOver {
                    final_score: self.score,
                    new_high_score,
                })
            }
            Advance::Moved if self.snake.head() == self.food => {
                self.snake.grow_by(self.config.growth_per_food);
                self.score += self.config.score_per_food;
                self.high_score = self.high_score.max(self.score);
                self.food = self.spawner.respawn(&self.snake.occupied())?;
                debug!(
                    score = self.score,
                    food_col = self.food.col,
                    food_row = self.food.row,
                    "food eaten"
                );
                Ok(SessionEvent::Ate { score: self.score })
            }
            Advance::Moved => Ok(SessionEvent::Moved),
        }
    }

    /// Start a fresh round from any state
    pub fn reset(&mut self) -> Result<(), GameError> {
        let snake = Self::initial_snake(&self.config, self.grid);
        self.food = self.spawner.respawn(&snake.occupied())?;
        self.snake = snake;
        self.voter = DirectionVoter::new(self.config.voter_capacity, self.config.voter_quorum);
        self.score = 0;
        self.state = SessionState::Playing;
        info!(high_score = self.high_score, "round started");
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            grid: self.grid,
            body: self.snake.segments().copied().collect(),
            food: self.food,
            direction: self.snake.direction(),
            score: self.score,
            high_score: self.high_score,
            stabilized_direction: self.voter.current(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }
}
