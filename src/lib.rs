//! Snake game engine: grid, snake movement and collisions, food placement
//! and a speed-adjustable game loop. The terminal front end lives in the
//! `snekfx` binary and talks to the engine only through this API.

pub mod food;
pub mod game_loop;
pub mod grid;
pub mod high_score;
pub mod session;
pub mod settings;
pub mod snake;
pub mod speed;

pub use food::FoodGenerator;
pub use game_loop::{GameLoop, LoopStatus, Tick, TickOutcome};
pub use grid::{Cell, Direction, Grid, Occupant};
pub use high_score::{HighScore, HighScoreError, HighScores};
pub use session::{Outcome, Session};
pub use settings::{Settings, SettingsError};
pub use snake::{Snake, Step};
pub use speed::SpeedLevel;
