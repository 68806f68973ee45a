#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we check bounds before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::*;

use crate::game::{BOARD_HEIGHT, BOARD_WIDTH, SPAWN_POSITION};

/// An RGB cell color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl TetrominoType {
    pub const ALL: [TetrominoType; 7] = [
        TetrominoType::I,
        TetrominoType::J,
        TetrominoType::L,
        TetrominoType::O,
        TetrominoType::S,
        TetrominoType::T,
        TetrominoType::Z,
    ];

    /// Picks a template uniformly at random.
    #[must_use]
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self::ALL[rng.usize(..Self::ALL.len())]
    }

    /// Offsets relative to the shape's root. Rotation pivots on `(0, 0)`.
    #[must_use]
    pub fn get_blocks(self) -> Vec<(i32, i32)> {
        match self {
            TetrominoType::I => vec![(0, 0), (0, 1), (0, 2), (0, 3)],
            TetrominoType::J => vec![(0, 0), (0, 1), (0, 2), (-1, 2)],
            TetrominoType::L => vec![(0, 0), (0, 1), (0, 2), (1, 2)],
            TetrominoType::O => vec![(0, 0), (0, 1), (1, 0), (1, 1)],
            TetrominoType::S => vec![(0, 0), (1, 0), (0, 1), (-1, 1)],
            TetrominoType::T => vec![(0, 0), (-1, 0), (1, 0), (0, 1)],
            TetrominoType::Z => vec![(0, 0), (-1, 0), (0, 1), (1, 1)],
        }
    }

    #[must_use]
    pub fn get_color(self) -> Rgb {
        match self {
            TetrominoType::I => Rgb(0, 255, 255),
            TetrominoType::J => Rgb(0, 0, 255),
            TetrominoType::L => Rgb(255, 165, 0),
            TetrominoType::O => Rgb(255, 255, 0),
            TetrominoType::S => Rgb(0, 255, 0),
            TetrominoType::T => Rgb(128, 0, 128),
            TetrominoType::Z => Rgb(255, 0, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn spawn_point() -> Self {
        Self {
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }
}

/// The settled board: `height` rows of `width` slots, row 0 at the top.
///
/// Row and column arguments outside the board are programming errors and
/// panic. Signed lookups that may legitimately fall outside the board go
/// through [`Grid::is_vacant`].
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    rows: Vec<Vec<Option<Rgb>>>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

impl Grid {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rows: vec![vec![None; width]; height],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Option<Rgb>>] {
        &self.rows
    }

    #[must_use]
    pub fn cell_at(&self, row: usize, col: usize) -> Option<Rgb> {
        self.assert_in_range(row, col);
        self.rows[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, color: Rgb) {
        self.assert_in_range(row, col);
        self.rows[row][col] = Some(color);
    }

    /// Whether `(x, y)` lies on the board.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Whether a piece cell may occupy `(x, y)`: on the board and empty.
    #[must_use]
    pub fn is_vacant(&self, x: i32, y: i32) -> bool {
        self.contains(x, y) && self.rows[y as usize][x as usize].is_none()
    }

    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.assert_in_range(row, 0);
        self.rows[row].iter().all(Option::is_some)
    }

    /// Removes `row` and shifts everything above it down by one, leaving a
    /// fresh empty row at the top.
    pub fn clear_row(&mut self, row: usize) {
        self.assert_in_range(row, 0);
        self.rows.remove(row);
        self.rows.insert(0, vec![None; self.width]);
    }

    /// Clears every full row and returns how many were removed.
    ///
    /// A single top-to-bottom pass is enough: a clear only shifts rows that
    /// were already scanned (and found not full) and inserts an empty row at
    /// the top, so it can never produce a new full row.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        for row in 0..self.height {
            if self.is_row_full(row) {
                self.clear_row(row);
                cleared += 1;
            }
        }
        cleared
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.rows.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    fn assert_in_range(&self, row: usize, col: usize) {
        assert!(
            row < self.height && col < self.width,
            "cell ({row}, {col}) is outside the {}x{} grid",
            self.height,
            self.width
        );
    }
}

/// The falling piece. Its cells are offsets from `root`.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub id: u64,
    pub cells: Vec<(i32, i32)>,
    pub color: Rgb,
    pub root: Position,
}

impl Shape {
    /// Instantiates a template at the spawn point.
    #[must_use]
    pub fn new(id: u64, tetromino_type: TetrominoType) -> Self {
        Self {
            id,
            cells: tetromino_type.get_blocks(),
            color: tetromino_type.get_color(),
            root: Position::spawn_point(),
        }
    }

    /// Draws a random template with a fresh id.
    pub fn spawn(ids: &mut ShapeIds, rng: &mut ShapeRng) -> Self {
        let tetromino_type = TetrominoType::random(&mut rng.0);
        Self::new(ids.next_id(), tetromino_type)
    }

    /// Board coordinates `(x, y)` of every cell.
    pub fn absolute_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells
            .iter()
            .map(|&(x, y)| (self.root.x + x, self.root.y + y))
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.root.x += dx;
        self.root.y += dy;
    }

    /// Whether the shape, shifted by `(dx, dy)`, would leave the board or
    /// overlap a settled cell. `(0, 0)` checks the current placement.
    #[must_use]
    pub fn collides(&self, grid: &Grid, dx: i32, dy: i32) -> bool {
        self.absolute_cells()
            .any(|(x, y)| !grid.is_vacant(x + dx, y + dy))
    }

    /// Returns whether the shape moved.
    pub fn move_if_possible(&mut self, grid: &Grid, dx: i32, dy: i32) -> bool {
        if self.collides(grid, dx, dy) {
            return false;
        }
        self.move_by(dx, dy);
        true
    }

    /// Quarter turn about the local origin: `(x, y)` becomes `(y, -x)`.
    pub fn rotate(&mut self) {
        for cell in &mut self.cells {
            *cell = (cell.1, -cell.0);
        }
    }

    /// Returns whether the shape rotated. No kicks: a blocked rotation leaves
    /// the cells untouched.
    pub fn rotate_if_possible(&mut self, grid: &Grid) -> bool {
        let snapshot = self.cells.clone();
        self.rotate();
        if self.collides(grid, 0, 0) {
            self.cells = snapshot;
            return false;
        }
        true
    }

    /// Bakes the shape's cells into the grid.
    pub fn lock_into(self, grid: &mut Grid) {
        for (x, y) in self.absolute_cells() {
            assert!(
                grid.contains(x, y),
                "shape {} locked with cell ({x}, {y}) off the board",
                self.id
            );
            grid.set(y as usize, x as usize, self.color);
        }
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameState {
    /// Rows cleared this session.
    pub score: u32,
    pub game_over: bool,
}

impl GameState {
    pub fn add_cleared_rows(&mut self, rows: usize) {
        self.score = self
            .score
            .saturating_add(u32::try_from(rows).unwrap_or(u32::MAX));
    }

    /// Game over is permanent for the session.
    pub fn end(&mut self) {
        self.game_over = true;
    }
}

// Hands out monotonically increasing shape ids
#[derive(Resource, Debug, Clone, Default)]
pub struct ShapeIds {
    next: u64,
}

impl ShapeIds {
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

// Source of randomness for shape selection
#[derive(Resource, Debug, Clone)]
pub struct ShapeRng(pub fastrand::Rng);

impl ShapeRng {
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(fastrand::Rng::with_seed(seed)),
            None => Self(fastrand::Rng::new()),
        }
    }
}

// Input state that persists between frames
#[derive(Resource, Debug, Clone, Default)]
pub struct Input {
    pub soft_drop_held: bool,
}
