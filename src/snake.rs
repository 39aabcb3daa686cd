use std::collections::VecDeque;
use std::fmt;

use log::debug;

use crate::grid::{Cell, Direction, Grid, Occupant};

type Listener = Box<dyn FnMut()>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Advanced,   // Normal movement, no special events
    Ate(Cell),  // Ate the food on this cell and grew by one
    Collided,   // Hit a wall or itself, game over
    Halted,     // Already collided, nothing moves until a new game
}

/// The snake's body, head first, plus its steering and the listeners that
/// hear about collisions and points.
pub struct Snake {
    start: Cell,
    initial_direction: Direction,
    wrap_around: bool,
    body: VecDeque<Cell>,
    direction: Direction,
    next_direction: Direction,
    collided: bool,
    collision_listeners: Vec<Listener>,
    points_listeners: Vec<Listener>,
}

impl Snake {
    pub const DEFAULT_DIRECTION: Direction = Direction::Right;

    /// A snake of length one at `start`. It is not on any grid until
    /// [`Snake::new_game`] places it there.
    pub fn new(start: Cell, wrap_around: bool) -> Self {
        Self::with_direction(start, Self::DEFAULT_DIRECTION, wrap_around)
    }

    pub fn with_direction(start: Cell, initial_direction: Direction, wrap_around: bool) -> Self {
        Snake {
            start,
            initial_direction,
            wrap_around,
            body: VecDeque::from([start]),
            direction: initial_direction,
            next_direction: initial_direction,
            collided: false,
            collision_listeners: Vec::new(),
            points_listeners: Vec::new(),
        }
    }

    pub fn new_game(&mut self, grid: &mut Grid) {
        self.body.clear();
        self.body.push_back(self.start);
        self.direction = self.initial_direction;
        self.next_direction = self.initial_direction;
        self.collided = false;
        grid.occupy(self.start, Occupant::Snake);
    }

    pub fn add_collision_listener(&mut self, listener: impl FnMut() + 'static) {
        self.collision_listeners.push(Box::new(listener));
    }

    pub fn add_points_listener(&mut self, listener: impl FnMut() + 'static) {
        self.points_listeners.push(Box::new(listener));
    }

    /// Steers the next move. Reversing straight into the body is refused.
    pub fn set_direction(&mut self, new_direction: Direction) {
        if new_direction != self.direction.opposite() {
            self.next_direction = new_direction;
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_collided(&self) -> bool {
        self.collided
    }

    /// Moves one cell in the buffered direction and updates `grid` to match.
    pub fn advance(&mut self, grid: &mut Grid) -> Step {
        if self.collided {
            return Step::Halted;
        }

        self.direction = self.next_direction;

        let Some(new_head) = grid.neighbour(self.head(), self.direction, self.wrap_around) else {
            debug!("Snake hit the wall at {:?}", self.head());
            return self.collide();
        };

        match grid.occupant(new_head) {
            // The tail has not left its cell yet, so it counts too.
            Some(Occupant::Snake) => {
                debug!("Snake bit itself at {:?}", new_head);
                self.collide()
            }
            Some(Occupant::Food) => {
                grid.free(new_head);
                grid.occupy(new_head, Occupant::Snake);
                self.body.push_front(new_head);
                for listener in &mut self.points_listeners {
                    listener();
                }
                Step::Ate(new_head)
            }
            None => {
                grid.occupy(new_head, Occupant::Snake);
                self.body.push_front(new_head);
                if let Some(tail) = self.body.pop_back() {
                    grid.free(tail);
                }
                Step::Advanced
            }
        }
    }

    fn collide(&mut self) -> Step {
        self.collided = true;
        for listener in &mut self.collision_listeners {
            listener();
        }
        Step::Collided
    }
}

impl fmt::Debug for Snake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snake")
            .field("body", &self.body)
            .field("direction", &self.direction)
            .field("next_direction", &self.next_direction)
            .field("collided", &self.collided)
            .finish_non_exhaustive()
    }
}
