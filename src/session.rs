//! Headless game session.
//!
//! Owns the mutable game state (snake, walls, food, lives, level) and advances
//! it one grid move at a time. Animation, overlays and input mapping stay with
//! the host; the host calls `steer` on key presses and `step` on every tick.

use log::debug;

use crate::config::{GameConfig, LevelConfig};
use crate::error::Result;
use crate::placement::{select_food_cell, Placement};
use crate::rng::RandomSource;
use crate::types::{Cell, GameSnapshot, GridBounds};
use crate::walls::generate_walls;

/// Direction the snake can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the delta (dcol, drow) for moving in this direction.
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
    /// Every level has been cleared.
    Victory,
}

/// What a single `step` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    /// Ate the food; the next one is already placed.
    Ate { next_food: Cell },
    /// Level cleared; the session has moved on to `level` (1-based).
    LevelComplete { level: usize },
    /// Lost a life; the current level restarted.
    Died { lives: u32 },
    GameOver,
    Victory,
    /// Nothing moved; the session is paused.
    Paused,
    /// The session has ended; call `restart`.
    Finished,
}

pub struct GameSession<R: RandomSource> {
    config: GameConfig,
    rng: R,
    /// 0-based index into `config.levels`.
    level: usize,
    lives: u32,
    snake: Vec<Cell>,
    direction: Direction,
    queued: Direction,
    pending_growth: u32,
    food: Option<Cell>,
    eaten: u32,
    walls: Vec<Cell>,
    status: GameStatus,
    paused: bool,
}

impl<R: RandomSource> GameSession<R> {
    /// Start a new game at level 1.
    pub fn new(config: GameConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let center = config.bounds().center();
        let lives = config.lives;
        let mut session = Self {
            config,
            rng,
            level: 0,
            lives,
            snake: vec![center],
            direction: Direction::Right,
            queued: Direction::Right,
            pending_growth: 0,
            food: None,
            eaten: 0,
            walls: Vec::new(),
            status: GameStatus::Playing,
            paused: false,
        };
        session.start_level();
        Ok(session)
    }

    /// Back to level 1 with full lives.
    pub fn restart(&mut self) {
        self.level = 0;
        self.lives = self.config.lives;
        self.status = GameStatus::Playing;
        self.start_level();
    }

    /// Reset the snake, regenerate walls and place the first food of the current level.
    pub fn start_level(&mut self) {
        let bounds = self.bounds();
        let level = self.level_config();

        self.snake = vec![bounds.center()];
        self.direction = Direction::Right;
        self.queued = Direction::Right;
        self.pending_growth = 0;
        self.eaten = 0;
        self.paused = false;
        self.walls = generate_walls(bounds, level.walls, &mut self.rng);
        self.food = match select_food_cell(&self.snapshot(), &self.config.placement, &mut self.rng) {
            Placement::Food(cell) => Some(cell),
            Placement::LevelComplete => None,
        };

        debug!(
            "level {} started: {} walls, {} food to eat",
            self.level + 1,
            self.walls.len(),
            level.food
        );
    }

    /// Queue a direction change for the next step.
    pub fn steer(&mut self, direction: Direction) {
        self.queued = direction;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Returns the new paused state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Advance the snake by one cell.
    pub fn step(&mut self) -> StepOutcome {
        if self.status != GameStatus::Playing {
            return StepOutcome::Finished;
        }
        if self.paused {
            return StepOutcome::Paused;
        }

        if !self.is_reverse(self.queued) {
            self.direction = self.queued;
        }

        let head = self.snake[0];
        let Some(new_head) = self.bounds().offset(head, self.direction.delta()) else {
            return self.lose_life();
        };
        // The tail still counts: moving into it is a collision even if it would vacate.
        if self.snake.contains(&new_head) || self.walls.contains(&new_head) {
            return self.lose_life();
        }

        let ate = self.food == Some(new_head);
        if ate {
            self.eaten += 1;
            self.pending_growth += 1;
            self.food = None;
        }

        self.snake.insert(0, new_head);
        if self.pending_growth == 0 {
            self.snake.pop();
        } else {
            self.pending_growth -= 1;
        }

        if !ate {
            return StepOutcome::Moved;
        }
        if self.eaten >= self.level_config().food {
            return self.complete_level();
        }

        match select_food_cell(&self.snapshot(), &self.config.placement, &mut self.rng) {
            Placement::Food(cell) => {
                self.food = Some(cell);
                StepOutcome::Ate { next_food: cell }
            }
            Placement::LevelComplete => self.complete_level(),
        }
    }

    /// The current state as the analyzer sees it.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::new(
            self.bounds(),
            self.snake.clone(),
            self.walls.clone(),
            self.pending_growth,
        )
    }

    pub fn bounds(&self) -> GridBounds {
        self.config.bounds()
    }

    /// 1-based level number.
    pub fn level(&self) -> usize {
        self.level + 1
    }

    pub fn level_config(&self) -> LevelConfig {
        self.config.levels[self.level]
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn snake(&self) -> &[Cell] {
        &self.snake
    }

    pub fn walls(&self) -> &[Cell] {
        &self.walls
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn eaten(&self) -> u32 {
        self.eaten
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// True if `direction` would turn the head back onto the neck.
    fn is_reverse(&self, direction: Direction) -> bool {
        if self.snake.len() < 2 {
            return false;
        }
        self.bounds().offset(self.snake[0], direction.delta()) == Some(self.snake[1])
    }

    fn lose_life(&mut self) -> StepOutcome {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            debug!("game over on level {}", self.level + 1);
            self.status = GameStatus::GameOver;
            return StepOutcome::GameOver;
        }
        debug!("life lost on level {}, {} left", self.level + 1, self.lives);
        self.start_level();
        StepOutcome::Died { lives: self.lives }
    }

    fn complete_level(&mut self) -> StepOutcome {
        if self.level + 1 >= self.config.levels.len() {
            debug!("all {} levels cleared", self.config.levels.len());
            self.status = GameStatus::Victory;
            return StepOutcome::Victory;
        }
        self.level += 1;
        self.lives = self.config.lives;
        self.start_level();
        StepOutcome::LevelComplete { level: self.level + 1 }
    }
}
