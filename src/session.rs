use log::info;
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::food::FoodGenerator;
use crate::game_loop::{Tick, TickOutcome};
use crate::grid::{Cell, Direction, Grid};
use crate::settings::Settings;
use crate::snake::{Snake, Step};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Playing,
    Collided,
    /// The snake filled the board, there is nowhere left to put food.
    Won,
}

/// One game: the grid, the snake on it, and the food generator feeding it.
#[derive(Debug)]
pub struct Session<R = ThreadRng> {
    grid: Grid,
    snake: Snake,
    food_generator: FoodGenerator<R>,
    food: Option<Cell>,
    points: u32,
    outcome: Outcome,
}

impl Session<ThreadRng> {
    pub fn new(settings: &Settings) -> Self {
        Session::with_food_generator(settings, FoodGenerator::new())
    }
}

impl<R: Rng> Session<R> {
    /// Builds the session and starts its first game.
    pub fn with_food_generator(settings: &Settings, food_generator: FoodGenerator<R>) -> Self {
        let mut session = Session {
            grid: Grid::new(settings.row_and_column_count),
            snake: Snake::new(settings.snake_start(), settings.wrap_around),
            food_generator,
            food: None,
            points: 0,
            outcome: Outcome::Playing,
        };
        session.new_game();
        session
    }

    pub fn new_game(&mut self) {
        self.grid.new_game();
        self.snake.new_game(&mut self.grid);
        self.points = 0;
        self.outcome = Outcome::Playing;
        self.place_food();
        info!(
            "New game on a {0}x{0} grid, snake at {1:?}",
            self.grid.size(),
            self.snake.head()
        );
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.snake.set_direction(direction);
    }

    /// Advances the snake one cell and feeds it again if it ate.
    pub fn step(&mut self) -> Step {
        let step = self.snake.advance(&mut self.grid);
        match step {
            Step::Ate(_) => {
                self.points += 1;
                self.place_food();
            }
            Step::Collided => {
                self.outcome = Outcome::Collided;
                info!("Collision, final score {}", self.points);
            }
            Step::Advanced | Step::Halted => {}
        }
        step
    }

    fn place_food(&mut self) {
        self.food = self.food_generator.generate_food(&mut self.grid);
        if self.food.is_none() {
            self.outcome = Outcome::Won;
            info!("Board full, game won with {} points", self.points);
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// For subscribing listeners; they survive [`Session::new_game`].
    pub fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome != Outcome::Playing
    }
}

impl<R: Rng> Tick for Session<R> {
    fn tick(&mut self) -> TickOutcome {
        if self.is_over() {
            return TickOutcome::Finished;
        }
        self.step();
        if self.is_over() {
            TickOutcome::Finished
        } else {
            TickOutcome::Continue
        }
    }
}
