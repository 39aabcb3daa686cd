//! The square cell space the snake lives in.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellDelta {
    pub x: i32,
    pub y: i32,
}

impl From<Direction> for CellDelta {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => CellDelta { x: 0, y: -1 },
            Direction::Down => CellDelta { x: 0, y: 1 },
            Direction::Left => CellDelta { x: -1, y: 0 },
            Direction::Right => CellDelta { x: 1, y: 0 },
        }
    }
}

/// One grid coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: u16,
    pub y: u16,
}

impl Cell {
    pub const fn new(x: u16, y: u16) -> Self {
        Cell { x, y }
    }

    /// Adds `delta`, wrapping around a `size`×`size` board.
    pub fn wrapped_add(&self, delta: CellDelta, size: u16) -> Cell {
        let new_x = (self.x as i32 + delta.x).rem_euclid(size as i32) as u16;
        let new_y = (self.y as i32 + delta.y).rem_euclid(size as i32) as u16;
        Cell { x: new_x, y: new_y }
    }

    /// Adds `delta`, or `None` if the result falls off a `size`×`size` board.
    pub fn checked_add(&self, delta: CellDelta, size: u16) -> Option<Cell> {
        let new_x = self.x as i32 + delta.x;
        let new_y = self.y as i32 + delta.y;
        let range = 0..size as i32;
        if range.contains(&new_x) && range.contains(&new_y) {
            Some(Cell {
                x: new_x as u16,
                y: new_y as u16,
            })
        } else {
            None
        }
    }
}

/// What sits on an occupied cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occupant {
    Snake,
    Food,
}

/// Occupancy table for a `size`×`size` board. Each cell holds at most one
/// [`Occupant`].
#[derive(Clone, Debug)]
pub struct Grid {
    size: u16,
    cells: Vec<Option<Occupant>>,
}

impl Grid {
    pub fn new(row_and_column_count: u16) -> Self {
        assert!(row_and_column_count > 0, "Grid must have at least one cell");
        let len = row_and_column_count as usize * row_and_column_count as usize;
        Grid {
            size: row_and_column_count,
            cells: vec![None; len],
        }
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    pub fn new_game(&mut self) {
        self.cells.fill(None);
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.size && cell.y < self.size
    }

    fn index(&self, cell: Cell) -> usize {
        assert!(
            self.contains(cell),
            "Cell ({}, {}) is outside the {}x{} grid",
            cell.x,
            cell.y,
            self.size,
            self.size
        );
        cell.y as usize * self.size as usize + cell.x as usize
    }

    pub fn occupant(&self, cell: Cell) -> Option<Occupant> {
        self.cells[self.index(cell)]
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.occupant(cell).is_some()
    }

    pub fn occupy(&mut self, cell: Cell, kind: Occupant) {
        let index = self.index(cell);
        assert!(
            self.cells[index].is_none(),
            "Cell ({}, {}) is already occupied by {:?}",
            cell.x,
            cell.y,
            self.cells[index]
        );
        self.cells[index] = Some(kind);
    }

    pub fn free(&mut self, cell: Cell) {
        let index = self.index(cell);
        self.cells[index] = None;
    }

    /// The cell one step from `cell` in `direction`. Off the edge this is
    /// `None` unless `wrap` is set.
    pub fn neighbour(&self, cell: Cell, direction: Direction, wrap: bool) -> Option<Cell> {
        if wrap {
            Some(cell.wrapped_add(direction.into(), self.size))
        } else {
            cell.checked_add(direction.into(), self.size)
        }
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.size).flat_map(move |y| (0..self.size).map(move |x| Cell { x, y }))
    }

    pub fn free_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells().filter(move |&cell| !self.is_occupied(cell))
    }

    pub fn free_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    pub fn occupied(&self, kind: Occupant) -> impl Iterator<Item = Cell> + '_ {
        self.cells()
            .filter(move |&cell| self.occupant(cell) == Some(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);

        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_all_directions() {
        let cell = Cell::new(5, 5);

        assert_eq!(cell.checked_add(Direction::Up.into(), 10), Some(Cell::new(5, 4)));
        assert_eq!(cell.checked_add(Direction::Down.into(), 10), Some(Cell::new(5, 6)));
        assert_eq!(cell.checked_add(Direction::Left.into(), 10), Some(Cell::new(4, 5)));
        assert_eq!(cell.checked_add(Direction::Right.into(), 10), Some(Cell::new(6, 5)));
    }

    #[test]
    fn test_checked_add_off_the_edge() {
        assert_eq!(Cell::new(0, 5).checked_add(Direction::Left.into(), 10), None);
        assert_eq!(Cell::new(5, 0).checked_add(Direction::Up.into(), 10), None);
        assert_eq!(Cell::new(9, 5).checked_add(Direction::Right.into(), 10), None);
        assert_eq!(Cell::new(5, 9).checked_add(Direction::Down.into(), 10), None);
    }

    #[test]
    fn test_wrap_underflow() {
        let delta: CellDelta = Direction::Up.into();
        assert_eq!(Cell::new(0, 0).wrapped_add(delta, 10), Cell::new(0, 9));

        let delta: CellDelta = Direction::Left.into();
        assert_eq!(Cell::new(0, 5).wrapped_add(delta, 10), Cell::new(9, 5));
    }

    #[test]
    fn test_wrap_overflow() {
        let delta: CellDelta = Direction::Down.into();
        assert_eq!(Cell::new(9, 9).wrapped_add(delta, 10), Cell::new(9, 0));

        let delta: CellDelta = Direction::Right.into();
        assert_eq!(Cell::new(9, 5).wrapped_add(delta, 10), Cell::new(0, 5));
    }

    #[test]
    fn test_wrapped_add_large_deltas() {
        let cell = Cell::new(5, 5);
        // (5+25)%10=0, (5-15)%10=0
        let delta = CellDelta { x: 25, y: -15 };
        assert_eq!(cell.wrapped_add(delta, 10), Cell::new(0, 0));
    }

    #[test]
    fn test_neighbour_respects_wrap_flag() {
        let grid = Grid::new(10);
        let corner = Cell::new(0, 0);

        assert_eq!(grid.neighbour(corner, Direction::Left, false), None);
        assert_eq!(
            grid.neighbour(corner, Direction::Left, true),
            Some(Cell::new(9, 0))
        );
        assert_eq!(
            grid.neighbour(corner, Direction::Right, false),
            Some(Cell::new(1, 0))
        );
    }

    #[test]
    fn test_occupy_and_free() {
        let mut grid = Grid::new(4);
        let cell = Cell::new(1, 2);

        assert!(!grid.is_occupied(cell));
        grid.occupy(cell, Occupant::Food);
        assert!(grid.is_occupied(cell));
        assert_eq!(grid.occupant(cell), Some(Occupant::Food));
        assert_eq!(grid.free_count(), 15);

        grid.free(cell);
        assert!(!grid.is_occupied(cell));
        assert_eq!(grid.free_count(), 16);
    }

    #[test]
    fn test_new_game_clears_everything() {
        let mut grid = Grid::new(3);
        grid.occupy(Cell::new(0, 0), Occupant::Snake);
        grid.occupy(Cell::new(2, 2), Occupant::Food);

        grid.new_game();

        assert_eq!(grid.free_count(), grid.capacity());
        assert_eq!(grid.free_cells().count(), 9);
    }

    #[test]
    fn test_cells_are_row_major_and_in_range() {
        let grid = Grid::new(3);
        let cells: Vec<Cell> = grid.cells().collect();
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[1], Cell::new(1, 0));
        assert_eq!(cells[3], Cell::new(0, 1));
        assert!(cells.iter().all(|&c| grid.contains(c)));
    }

    #[test]
    fn test_occupied_filters_by_kind() {
        let mut grid = Grid::new(5);
        grid.occupy(Cell::new(1, 1), Occupant::Snake);
        grid.occupy(Cell::new(2, 1), Occupant::Snake);
        grid.occupy(Cell::new(4, 4), Occupant::Food);

        assert_eq!(grid.occupied(Occupant::Snake).count(), 2);
        assert_eq!(
            grid.occupied(Occupant::Food).collect::<Vec<_>>(),
            vec![Cell::new(4, 4)]
        );
    }

    #[test]
    #[should_panic(expected = "already occupied")]
    fn test_double_occupancy_panics() {
        let mut grid = Grid::new(4);
        grid.occupy(Cell::new(1, 1), Occupant::Snake);
        grid.occupy(Cell::new(1, 1), Occupant::Food);
    }

    #[test]
    fn test_out_of_bounds_panics() {
        let mut grid = Grid::new(4);
        assert!(!grid.contains(Cell::new(4, 0)));

        let result = std::panic::catch_unwind(move || {
            grid.occupy(Cell::new(4, 0), Occupant::Snake);
        });
        assert!(result.is_err());

        let grid = Grid::new(4);
        let result = std::panic::catch_unwind(move || grid.is_occupied(Cell::new(0, 7)));
        assert!(result.is_err());
    }
}
